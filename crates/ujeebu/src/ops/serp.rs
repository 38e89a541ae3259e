//! SERP operations: web, news, image, video, and maps search
//!
//! One handler covers all five search kinds; only the `search_type` wire
//! parameter and the handler name differ. Responses pass through
//! unmodified.

use crate::error::UjeebuError;
use crate::item::{InputItem, OutputItem};
use crate::ops::{parse_input, Handler, Operation};
use crate::params::Params;
use crate::transport::{endpoints, Client};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Search vertical, matching the `search_type` wire values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Search,
    News,
    Images,
    Videos,
    Maps,
}

impl SearchKind {
    /// Every kind, in registration order
    pub const ALL: [SearchKind; 5] = [
        SearchKind::Search,
        SearchKind::News,
        SearchKind::Images,
        SearchKind::Videos,
        SearchKind::Maps,
    ];

    /// Wire value for the `search_type` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Search => "search",
            SearchKind::News => "news",
            SearchKind::Images => "images",
            SearchKind::Videos => "videos",
            SearchKind::Maps => "maps",
        }
    }

    /// The operation this kind answers to in the dispatch table
    pub fn operation(&self) -> Operation {
        match self {
            SearchKind::Search => Operation::WebSearch,
            SearchKind::News => Operation::NewsSearch,
            SearchKind::Images => Operation::ImageSearch,
            SearchKind::Videos => Operation::VideoSearch,
            SearchKind::Maps => Operation::MapsSearch,
        }
    }

    fn handler_name(&self) -> &'static str {
        match self {
            SearchKind::Search => "serp_web_search",
            SearchKind::News => "serp_news_search",
            SearchKind::Images => "serp_image_search",
            SearchKind::Videos => "serp_video_search",
            SearchKind::Maps => "serp_maps_search",
        }
    }
}

/// Input shared by every search kind
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SerpInput {
    /// The search query
    pub search: String,
    /// Optional wire parameters, merged over the defaults
    ///
    /// Common keys: `lang`, `location`, `device`, `results_count`,
    /// `page`, `extra_params`.
    pub options: Map<String, Value>,
}

/// Search handler, one instance per [`SearchKind`]
#[derive(Debug)]
pub struct SerpSearch {
    kind: SearchKind,
}

impl SerpSearch {
    /// Create a handler for one search kind
    pub fn new(kind: SearchKind) -> Self {
        Self { kind }
    }

    /// Build wire parameters from the input
    pub fn build_params(&self, input: &SerpInput) -> Result<Params, UjeebuError> {
        if input.search.is_empty() {
            return Err(UjeebuError::MissingField("search"));
        }

        let mut params = Params::new();
        params.insert("search", input.search.clone());
        params.insert("search_type", self.kind.as_str());
        params.merge(&input.options);
        Ok(params)
    }
}

#[async_trait]
impl Handler for SerpSearch {
    fn name(&self) -> &'static str {
        self.kind.handler_name()
    }

    fn endpoint(&self) -> &'static str {
        endpoints::SERP
    }

    fn method(&self) -> reqwest::Method {
        reqwest::Method::GET
    }

    async fn execute(
        &self,
        client: &Client,
        item: &InputItem,
    ) -> Result<OutputItem, UjeebuError> {
        let input: SerpInput = parse_input(item)?;
        let params = self.build_params(&input)?;
        let response = client.get(self.endpoint(), &params).await?;
        Ok(OutputItem::from_json(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_type_injected_per_kind() {
        let input = SerpInput {
            search: "AI news".to_string(),
            options: Map::new(),
        };

        for (kind, expected) in [
            (SearchKind::Search, "search"),
            (SearchKind::News, "news"),
            (SearchKind::Images, "images"),
            (SearchKind::Videos, "videos"),
            (SearchKind::Maps, "maps"),
        ] {
            let params = SerpSearch::new(kind).build_params(&input).unwrap();
            assert_eq!(params.get("search"), Some(&json!("AI news")));
            assert_eq!(params.get("search_type"), Some(&json!(expected)));
        }
    }

    #[test]
    fn test_missing_query_is_rejected() {
        let input = SerpInput::default();
        let err = SerpSearch::new(SearchKind::Search)
            .build_params(&input)
            .unwrap_err();
        assert!(matches!(err, UjeebuError::MissingField("search")));
    }

    #[test]
    fn test_options_merge_and_prune() {
        let input = SerpInput {
            search: "restaurants near me".to_string(),
            options: json!({"lang": "en", "location": "", "page": 2})
                .as_object()
                .cloned()
                .unwrap(),
        };

        let params = SerpSearch::new(SearchKind::Maps).build_params(&input).unwrap();
        assert_eq!(params.get("lang"), Some(&json!("en")));
        assert_eq!(params.get("page"), Some(&json!(2)));
        assert!(params.get("location").is_none());
    }

    #[test]
    fn test_all_kinds_map_to_distinct_operations() {
        let mut operations: Vec<Operation> =
            SearchKind::ALL.iter().map(SearchKind::operation).collect();
        operations.sort_by_key(|op| op.to_string());
        operations.dedup();
        assert_eq!(operations.len(), SearchKind::ALL.len());
    }
}
