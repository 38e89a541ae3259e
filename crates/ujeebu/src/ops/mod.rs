//! Operation handlers and dispatch
//!
//! Each (resource, operation) pair maps to one handler implementing the
//! same capability surface: build wire parameters from an input item, call
//! the endpoint, package the response. The registry holds the closed table
//! of supported pairs.

mod extract;
mod scrape;
mod serp;

pub use extract::{ArticleInput, ExtractArticle};
pub use scrape::{
    ExtractRulesInput, ScrapeExtractRules, ScrapeHtml, ScrapeHtmlInput, ScrapePdf,
    ScrapePdfInput, ScrapeScreenshot, ScreenshotInput, ScreenshotRegion,
};
pub use serp::{SearchKind, SerpInput, SerpSearch};

use crate::error::UjeebuError;
use crate::item::{InputItem, OutputItem};
use crate::transport::Client;
use async_trait::async_trait;
use schemars::{schema::RootSchema, schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

/// Top-level API category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Extract,
    Scrape,
    Serp,
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extract" => Ok(Resource::Extract),
            "scrape" => Ok(Resource::Scrape),
            "serp" => Ok(Resource::Serp),
            _ => Err(format!("Invalid resource: {s}")),
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::Extract => "extract",
            Resource::Scrape => "scrape",
            Resource::Serp => "serp",
        };
        write!(f, "{name}")
    }
}

/// A specific action within a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Article,
    GetHtml,
    Screenshot,
    Pdf,
    ExtractRules,
    WebSearch,
    NewsSearch,
    ImageSearch,
    VideoSearch,
    MapsSearch,
}

impl Operation {
    fn as_str(&self) -> &'static str {
        match self {
            Operation::Article => "article",
            Operation::GetHtml => "getHtml",
            Operation::Screenshot => "screenshot",
            Operation::Pdf => "pdf",
            Operation::ExtractRules => "extractRules",
            Operation::WebSearch => "webSearch",
            Operation::NewsSearch => "newsSearch",
            Operation::ImageSearch => "imageSearch",
            Operation::VideoSearch => "videoSearch",
            Operation::MapsSearch => "mapsSearch",
        }
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(Operation::Article),
            "getHtml" => Ok(Operation::GetHtml),
            "screenshot" => Ok(Operation::Screenshot),
            "pdf" => Ok(Operation::Pdf),
            "extractRules" => Ok(Operation::ExtractRules),
            "webSearch" => Ok(Operation::WebSearch),
            "newsSearch" => Ok(Operation::NewsSearch),
            "imageSearch" => Ok(Operation::ImageSearch),
            "videoSearch" => Ok(Operation::VideoSearch),
            "mapsSearch" => Ok(Operation::MapsSearch),
            _ => Err(format!("Invalid operation: {s}")),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait for operation handlers
///
/// Implementations translate one input item into one wire request and
/// package the response into one output item.
#[async_trait]
pub trait Handler: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this handler (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Endpoint path this handler targets
    fn endpoint(&self) -> &'static str;

    /// HTTP method used
    fn method(&self) -> reqwest::Method;

    /// Execute the operation for one input item
    async fn execute(&self, client: &Client, item: &InputItem)
        -> Result<OutputItem, UjeebuError>;
}

/// Deserialize an input item into an operation's typed input
pub(crate) fn parse_input<T: DeserializeOwned>(item: &InputItem) -> Result<T, UjeebuError> {
    serde_json::from_value(Value::Object(item.clone()))
        .map_err(|err| UjeebuError::InvalidInput(err.to_string()))
}

/// Closed dispatch table from (resource, operation) to handler
pub struct Registry {
    handlers: HashMap<(Resource, Operation), Box<dyn Handler>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Registry {
    /// Create a registry with every supported operation registered
    pub fn with_defaults() -> Self {
        let mut handlers: HashMap<(Resource, Operation), Box<dyn Handler>> = HashMap::new();

        handlers.insert((Resource::Extract, Operation::Article), Box::new(ExtractArticle));
        handlers.insert((Resource::Scrape, Operation::GetHtml), Box::new(ScrapeHtml));
        handlers.insert((Resource::Scrape, Operation::Screenshot), Box::new(ScrapeScreenshot));
        handlers.insert((Resource::Scrape, Operation::Pdf), Box::new(ScrapePdf));
        handlers.insert(
            (Resource::Scrape, Operation::ExtractRules),
            Box::new(ScrapeExtractRules),
        );
        for kind in SearchKind::ALL {
            handlers.insert(
                (Resource::Serp, kind.operation()),
                Box::new(SerpSearch::new(kind)),
            );
        }

        Self { handlers }
    }

    /// Look up the handler for a pair
    pub fn get(
        &self,
        resource: Resource,
        operation: Operation,
    ) -> Result<&dyn Handler, UjeebuError> {
        self.handlers
            .get(&(resource, operation))
            .map(Box::as_ref)
            .ok_or_else(|| UjeebuError::UnknownOperation {
                resource: resource.to_string(),
                operation: operation.to_string(),
            })
    }

    /// Number of registered pairs
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when no handlers are registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// All registered (resource, operation) pairs
    pub fn pairs(&self) -> impl Iterator<Item = (Resource, Operation)> + '_ {
        self.handlers.keys().copied()
    }
}

/// JSON Schema for an operation's input, for hosts rendering parameters
pub fn input_schema(resource: Resource, operation: Operation) -> Option<RootSchema> {
    match (resource, operation) {
        (Resource::Extract, Operation::Article) => Some(schema_for!(ArticleInput)),
        (Resource::Scrape, Operation::GetHtml) => Some(schema_for!(ScrapeHtmlInput)),
        (Resource::Scrape, Operation::Screenshot) => Some(schema_for!(ScreenshotInput)),
        (Resource::Scrape, Operation::Pdf) => Some(schema_for!(ScrapePdfInput)),
        (Resource::Scrape, Operation::ExtractRules) => Some(schema_for!(ExtractRulesInput)),
        (
            Resource::Serp,
            Operation::WebSearch
            | Operation::NewsSearch
            | Operation::ImageSearch
            | Operation::VideoSearch
            | Operation::MapsSearch,
        ) => Some(schema_for!(SerpInput)),
        _ => None,
    }
}
