//! Typed API response models
//!
//! Partial, tolerant views of the JSON the API returns: unknown fields are
//! ignored and most fields are optional. SERP payloads stay untyped
//! (`serde_json::Value`) since they pass through unmodified.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured article produced by the extract endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    pub url: Option<String>,
    pub canonical_url: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub html: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub media: Option<Vec<String>>,
    pub language: Option<String>,
    pub author: Option<String>,
    pub pub_date: Option<String>,
    pub modified_date: Option<String>,
    pub site_name: Option<String>,
    pub favicon: Option<String>,
    pub encoding: Option<String>,
}

/// Envelope around an extracted [`Article`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub article: Option<Article>,
    /// Extraction time in seconds
    pub time: Option<f64>,
    /// Whether JavaScript rendering was used
    pub js: Option<bool>,
    pub pagination: Option<bool>,
}

/// Rendered HTML; `html_source` carries the pre-render source when present
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapeHtmlResponse {
    pub html: Option<String>,
    pub html_source: Option<String>,
}

impl ScrapeHtmlResponse {
    /// Rendered HTML, falling back to the raw source
    pub fn into_html(self) -> Option<String> {
        self.html.or(self.html_source)
    }
}

/// Base64-encoded PNG screenshot
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapeScreenshotResponse {
    pub screenshot: Option<String>,
}

/// Base64-encoded PDF document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapePdfResponse {
    pub pdf: Option<String>,
}

/// Result object produced by extraction rules
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapeExtractRulesResponse {
    pub result: Option<Value>,
}

/// Account and quota information from the account endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountInfo {
    pub balance: Option<f64>,
    pub days_till_next_billing: Option<i64>,
    pub next_billing_date: Option<String>,
    pub plan: Option<String>,
    pub quota: Option<String>,
    pub concurrent_requests: Option<i64>,
    pub total_requests: Option<i64>,
    pub used: Option<f64>,
    pub used_percent: Option<f64>,
    pub userid: Option<String>,
}
