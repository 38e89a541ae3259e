//! API credentials

use crate::error::UjeebuError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default base URL for the Ujeebu API
pub const DEFAULT_BASE_URL: &str = "https://api.ujeebu.com";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "UJEEBU_API_KEY";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "UJEEBU_BASE_URL";

/// API key and base URL pair used to authenticate every request
///
/// Credentials are read-only once constructed; the client never mutates
/// or persists them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Raw API key, sent verbatim in the `ApiKey` header
    pub api_key: String,
    /// Base URL without a trailing slash
    pub base_url: String,
}

impl Credentials {
    /// Create credentials against the default base URL
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL, validating scheme and trimming a trailing slash
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, UjeebuError> {
        let raw = base_url.into();
        let parsed = Url::parse(&raw).map_err(|_| UjeebuError::InvalidBaseUrl)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(UjeebuError::InvalidBaseUrl);
        }
        self.base_url = raw.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Read credentials from `UJEEBU_API_KEY` and optional `UJEEBU_BASE_URL`
    pub fn from_env() -> Result<Self, UjeebuError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(UjeebuError::MissingField(API_KEY_ENV))?;

        let credentials = Credentials::new(api_key);
        match std::env::var(BASE_URL_ENV) {
            Ok(base_url) if !base_url.is_empty() => credentials.with_base_url(base_url),
            _ => Ok(credentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let credentials = Credentials::new("key");
        assert_eq!(credentials.base_url, DEFAULT_BASE_URL);
        assert_eq!(credentials.api_key, "key");
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let credentials = Credentials::new("key")
            .with_base_url("https://eu.ujeebu.example/")
            .unwrap();
        assert_eq!(credentials.base_url, "https://eu.ujeebu.example");
    }

    #[test]
    fn test_with_base_url_rejects_bad_scheme() {
        let result = Credentials::new("key").with_base_url("ftp://api.ujeebu.com");
        assert!(matches!(result, Err(UjeebuError::InvalidBaseUrl)));

        let result = Credentials::new("key").with_base_url("not a url");
        assert!(matches!(result, Err(UjeebuError::InvalidBaseUrl)));
    }
}
