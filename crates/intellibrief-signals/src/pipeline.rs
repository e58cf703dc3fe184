//! Signal collection orchestration.

use chrono::{DateTime, Utc};
use intellibrief_core::{SignalBundle, SimulationFlags, SourceCredentials};
use rand::Rng;

use crate::error::SignalError;
use crate::extract::extract_key_signals;
use crate::jobs::JobsCollector;
use crate::news::NewsCollector;
use crate::source::DataSource;
use crate::stock::collect_stock;
use crate::tech::infer_tech_stack;
use crate::tone::ToneCollector;

/// All collectors needed for one brief, built once and shared across requests.
pub struct SignalCollector {
    pub news: NewsCollector,
    pub jobs: JobsCollector,
    pub tone: ToneCollector,
}

impl SignalCollector {
    /// Builds collectors whose data sources follow the configured API keys.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Http`] if an HTTP client cannot be built.
    pub fn from_credentials(
        credentials: &SourceCredentials,
        user_agent: &str,
    ) -> Result<Self, SignalError> {
        Ok(Self {
            news: NewsCollector::new(
                DataSource::from_key(credentials.newsdata_api_key.as_deref()),
                user_agent,
            )?,
            jobs: JobsCollector::new(
                DataSource::from_key(credentials.jsearch_api_key.as_deref()),
                user_agent,
            )?,
            tone: ToneCollector::new(
                DataSource::from_key(credentials.twinword_api_key.as_deref()),
                user_agent,
            )?,
        })
    }

    /// Collectors that never touch the network.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Http`] if an HTTP client cannot be built.
    pub fn simulated(user_agent: &str) -> Result<Self, SignalError> {
        Self::from_credentials(&SourceCredentials::default(), user_agent)
    }

    /// Runs every collector in sequence, then tech inference and signal
    /// extraction.
    ///
    /// Never fails: each collector substitutes simulated data on error.
    pub async fn collect<R: Rng + Send>(
        &self,
        company: &str,
        user_intent: &str,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> SignalBundle {
        let news = self.news.collect(company, rng, now).await;
        let jobs = self.jobs.collect(company, rng, now).await;
        let tech_stack = infer_tech_stack(&jobs.data, now);
        let stock = collect_stock(company, rng, now);
        let tone = self
            .tone
            .collect(company, user_intent, &news.data, rng)
            .await;

        let key_signals = extract_key_signals(&news.data, &jobs.data, &stock.data, &tech_stack);

        tracing::info!(
            company,
            news = news.data.len(),
            jobs = jobs.data.len(),
            technologies = tech_stack.len(),
            key_signals = key_signals.len(),
            "signal collection complete"
        );

        SignalBundle {
            simulated: SimulationFlags {
                news: news.simulated,
                jobs: jobs.simulated,
                stock: stock.simulated,
                tone: tone.simulated,
            },
            news: news.data,
            jobs: jobs.data,
            tech_stack,
            stock: stock.data,
            tone: tone.data,
            key_signals,
        }
    }
}
