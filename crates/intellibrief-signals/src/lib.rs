//! Signal collection for IntelliBrief.
//!
//! Pulls news, job postings, stock figures and emotional tone for a target
//! company, infers its tech stack from the postings and distils everything
//! into a handful of key signals. Each provider is either live or simulated
//! per [`DataSource`]; a failing live provider degrades to simulated data.

pub mod error;
pub mod extract;
pub mod jobs;
pub mod news;
pub mod pipeline;
pub mod simulation;
pub mod source;
pub mod stock;
pub mod tech;
pub mod tone;

pub use error::SignalError;
pub use extract::extract_key_signals;
pub use jobs::JobsCollector;
pub use news::NewsCollector;
pub use pipeline::SignalCollector;
pub use source::{Collected, DataSource};
pub use stock::{collect_stock, lookup_ticker};
pub use tech::infer_tech_stack;
pub use tone::ToneCollector;
