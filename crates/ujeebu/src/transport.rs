//! HTTP transport
//!
//! Builds and sends one authenticated request per call. No retries, no
//! local deadline: a timeout is a wire parameter the remote API honors,
//! not something this layer enforces. Any transport failure (connect
//! error, timeout, non-2xx status) is normalized to
//! [`UjeebuError::Api`]; a 2xx body is decoded as JSON and returned
//! verbatim, without inspecting it for embedded error shapes.

use crate::credentials::Credentials;
use crate::error::UjeebuError;
use crate::params::Params;
use crate::types::AccountInfo;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde_json::Value;

/// Name of the authentication header
pub const API_KEY_HEADER: &str = "ApiKey";

/// API endpoint paths (closed set)
pub mod endpoints {
    /// Web page scraping, screenshots, PDFs, extraction rules
    pub const SCRAPE: &str = "/scrape";
    /// Article extraction
    pub const EXTRACT: &str = "/extract";
    /// Search engine results
    pub const SERP: &str = "/serp";
    /// Social card rendering
    pub const CARD: &str = "/card";
    /// Account and quota information; also the credential test
    pub const ACCOUNT: &str = "/account";
}

/// Authenticated client for one set of credentials
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    credentials: Credentials,
}

impl Client {
    /// Create a client from credentials
    pub fn new(credentials: Credentials) -> Result<Self, UjeebuError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(UjeebuError::ClientBuild)?;
        Ok(Self { http, credentials })
    }

    /// The credentials this client authenticates with
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Send one authenticated request to an API endpoint
    ///
    /// Body and query are attached only when non-empty. A single attempt
    /// per call.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Params>,
        query: Option<&Params>,
    ) -> Result<Value, UjeebuError> {
        let url = format!("{}{}", self.credentials.base_url, endpoint);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .header(CONTENT_TYPE, "application/json");

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            request = request.query(&query.to_query());
        }
        if let Some(body) = body.filter(|b| !b.is_empty()) {
            request = request.json(body.as_map());
        }

        tracing::debug!(%method, %url, "sending request");

        let response = request.send().await.map_err(UjeebuError::from_reqwest)?;
        let response = response
            .error_for_status()
            .map_err(UjeebuError::from_reqwest)?;
        response
            .json::<Value>()
            .await
            .map_err(UjeebuError::from_reqwest)
    }

    /// GET with query parameters
    pub async fn get(&self, endpoint: &str, query: &Params) -> Result<Value, UjeebuError> {
        self.request(Method::GET, endpoint, None, Some(query)).await
    }

    /// POST with a JSON body
    pub async fn post(&self, endpoint: &str, body: &Params) -> Result<Value, UjeebuError> {
        self.request(Method::POST, endpoint, Some(body), None).await
    }

    /// Download a raw (non-JSON) payload with the same auth header
    pub async fn get_binary(&self, endpoint: &str, query: &Params) -> Result<Bytes, UjeebuError> {
        let url = format!("{}{}", self.credentials.base_url, endpoint);

        let mut request = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.credentials.api_key);
        if !query.is_empty() {
            request = request.query(&query.to_query());
        }

        tracing::debug!(%url, "downloading binary payload");

        let response = request.send().await.map_err(UjeebuError::from_reqwest)?;
        let response = response
            .error_for_status()
            .map_err(UjeebuError::from_reqwest)?;
        response.bytes().await.map_err(UjeebuError::from_reqwest)
    }

    /// Fetch account and quota information
    pub async fn account(&self) -> Result<AccountInfo, UjeebuError> {
        let value = self.get(endpoints::ACCOUNT, &Params::new()).await?;
        serde_json::from_value(value)
            .map_err(|err| UjeebuError::Api(format!("malformed account response: {err}")))
    }

    /// Credential test: a 2xx from the account endpoint means the key is valid
    pub async fn verify_credentials(&self) -> Result<(), UjeebuError> {
        self.request(Method::GET, endpoints::ACCOUNT, None, None)
            .await
            .map(|_| ())
    }
}
