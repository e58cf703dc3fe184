//! Live-or-simulated selection shared by every collector.

use reqwest::{Client, Url};

use crate::error::SignalError;

/// Where a collector gets its data from.
///
/// Chosen once at startup from the presence of an API key. A `Live` source
/// still falls back to simulated data when a request fails.
#[derive(Clone, PartialEq, Eq)]
pub enum DataSource {
    Live { api_key: String },
    Simulated,
}

impl DataSource {
    /// `Live` when a non-blank key is present, otherwise `Simulated`.
    #[must_use]
    pub fn from_key(api_key: Option<&str>) -> Self {
        match api_key.map(str::trim) {
            Some(key) if !key.is_empty() => DataSource::Live {
                api_key: key.to_string(),
            },
            _ => DataSource::Simulated,
        }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, DataSource::Live { .. })
    }
}

impl std::fmt::Debug for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Live { .. } => f.write_str("Live { api_key: [redacted] }"),
            DataSource::Simulated => f.write_str("Simulated"),
        }
    }
}

/// A collector result tagged with whether it came from the simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Collected<T> {
    pub data: T,
    pub simulated: bool,
}

impl<T> Collected<T> {
    pub(crate) fn live(data: T) -> Self {
        Self {
            data,
            simulated: false,
        }
    }

    pub(crate) fn simulated(data: T) -> Self {
        Self {
            data,
            simulated: true,
        }
    }
}

pub(crate) fn build_client(user_agent: &str) -> Result<Client, SignalError> {
    Ok(Client::builder().user_agent(user_agent).build()?)
}

/// Parse `base_url`, forcing exactly one trailing slash so `Url::join`
/// appends to the path instead of replacing its last segment.
pub(crate) fn normalise_base_url(base_url: &str) -> Result<Url, SignalError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| SignalError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url, SignalError> {
    base.join(path).map_err(|e| SignalError::InvalidBaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })
}
