//! Extract: article operation
//!
//! Converts a news or blog URL into structured article JSON. The response
//! passes through unmodified.

use crate::error::UjeebuError;
use crate::item::{InputItem, OutputItem};
use crate::ops::{parse_input, Handler};
use crate::params::Params;
use crate::transport::{endpoints, Client};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Input for article extraction
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ArticleInput {
    /// URL of the article to extract
    pub url: String,
    /// Optional wire parameters, merged over the defaults
    ///
    /// Common keys: `js` (bool or `"auto"`), `text`, `html`, `images`,
    /// `author`, `pub_date`, `is_article`, `quick_mode`, `strip_tags`,
    /// `timeout`, `proxy_type`, `proxy_country`.
    pub options: Map<String, Value>,
}

/// Article extraction handler: POST to the extract endpoint
#[derive(Debug)]
pub struct ExtractArticle;

impl ExtractArticle {
    /// Build wire parameters from the input
    pub fn build_params(input: &ArticleInput) -> Result<Params, UjeebuError> {
        if input.url.is_empty() {
            return Err(UjeebuError::MissingField("url"));
        }

        let mut params = Params::new();
        params.insert("url", input.url.clone());
        params.merge(&input.options);
        Ok(params)
    }
}

#[async_trait]
impl Handler for ExtractArticle {
    fn name(&self) -> &'static str {
        "extract_article"
    }

    fn endpoint(&self) -> &'static str {
        endpoints::EXTRACT
    }

    fn method(&self) -> reqwest::Method {
        reqwest::Method::POST
    }

    async fn execute(
        &self,
        client: &Client,
        item: &InputItem,
    ) -> Result<OutputItem, UjeebuError> {
        let input: ArticleInput = parse_input(item)?;
        let params = Self::build_params(&input)?;
        let response = client.post(self.endpoint(), &params).await?;
        Ok(OutputItem::from_json(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_params_prunes_empty_options() {
        let input = ArticleInput {
            url: "https://example.com/article".to_string(),
            options: json!({"js": true, "timeout": null, "strip_tags": ""})
                .as_object()
                .cloned()
                .unwrap(),
        };

        let params = ExtractArticle::build_params(&input).unwrap();
        assert_eq!(params.get("url"), Some(&json!("https://example.com/article")));
        assert_eq!(params.get("js"), Some(&json!(true)));
        assert!(params.get("timeout").is_none());
        assert!(params.get("strip_tags").is_none());
    }

    #[test]
    fn test_build_params_requires_url() {
        let input = ArticleInput::default();
        let err = ExtractArticle::build_params(&input).unwrap_err();
        assert!(matches!(err, UjeebuError::MissingField("url")));
    }

    #[test]
    fn test_options_can_carry_auto_js() {
        let input = ArticleInput {
            url: "https://example.com/article".to_string(),
            options: json!({"js": "auto"}).as_object().cloned().unwrap(),
        };
        let params = ExtractArticle::build_params(&input).unwrap();
        assert_eq!(params.get("js"), Some(&json!("auto")));
    }
}
