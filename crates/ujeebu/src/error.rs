//! Error types for the Ujeebu client

use thiserror::Error;

/// Errors that can occur while building, sending, or translating a request
#[derive(Debug, Error)]
pub enum UjeebuError {
    /// Transport-level failure: network error, timeout, or non-2xx status
    #[error("Ujeebu API error: {0}")]
    Api(String),

    /// The raw JSON given in JSON rules mode did not parse
    #[error("Invalid JSON in extract rules: {0}")]
    InvalidRules(String),

    /// Rule compilation produced zero rules
    #[error("At least one extraction rule is required")]
    EmptyRules,

    /// The resource/operation pair is not in the dispatch table
    #[error("Unknown operation: {resource}.{operation}")]
    UnknownOperation {
        resource: String,
        operation: String,
    },

    /// A required parameter is absent or empty
    #[error("Missing required parameter: {0}")]
    MissingField(&'static str),

    /// A per-item input value could not be deserialized
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Base URL has an unsupported scheme or does not parse
    #[error("Invalid base URL: must start with http:// or https://")]
    InvalidBaseUrl,

    /// Failed to build the underlying HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

impl UjeebuError {
    /// Wrap a reqwest error as an API error, preserving its message
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        UjeebuError::Api(err.to_string())
    }
}
