use thiserror::Error;

/// Failures from a live data provider.
///
/// These never escape a collector's `collect` call: the collector logs them
/// and substitutes simulated data.
#[derive(Debug, Error)]
pub enum SignalError {
    /// Network, TLS or non-2xx status from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider answered 2xx but without the payload we need.
    #[error("{0} response carried no usable data")]
    EmptyResponse(&'static str),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
