//! Shared domain types and configuration for IntelliBrief.
//!
//! Everything the pipeline passes between crates lives here: the raw signal
//! records collected from external sources, the persisted [`Brief`], and the
//! environment-driven [`AppConfig`].

pub mod app_config;
pub mod brief;
pub mod config;
pub mod signals;

pub use app_config::{AppConfig, Environment, SourceCredentials};
pub use brief::{Brief, IntelligenceSources, NarrativeFields, NarrativeUpdate, NewBrief, UserId};
pub use config::{load_app_config, load_app_config_from_env};
pub use signals::{
    department_breakdown, Confidence, Department, EmotionScore, JobSignal, KeySignal, NewsItem, PricePoint, Sentiment,
    SignalBundle, SignalKind, SimulationFlags, StockData, TechCategory, TechStackItem,
    ToneInsights, UserCompany,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
