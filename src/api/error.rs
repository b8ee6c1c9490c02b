//! Error types for the market data API

use thiserror::Error;

/// Boxed source for transport failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a single fetch-validate-decode cycle
#[derive(Debug, Error)]
pub enum ApiError {
    /// DNS, connect, TLS or body read failure
    #[error("Unable to fetch data: {0}")]
    Transport(#[source] BoxError),

    /// Any HTTP status other than 200
    #[error("unable to fetch data. status code: {0}")]
    Status(u16),

    /// The exchange answered 200 with an error envelope
    #[error("exchange returned {code}: {description}")]
    Remote { code: String, description: String },

    /// Body did not match the expected shape
    #[error("Error parsing {kind} data: {source}")]
    Decode {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Wrap any transport-level error
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport(err.into())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err)
    }
}
