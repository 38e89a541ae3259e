//! Scrape operations: HTML, screenshot, PDF, extraction rules
//!
//! All four target the scrape endpoint. HTML, screenshot, and PDF go over
//! GET; extraction rules POST because the nested rule object travels in
//! the body.

use crate::error::UjeebuError;
use crate::item::{BinaryAttachment, InputItem, OutputItem};
use crate::ops::{parse_input, Handler};
use crate::params::Params;
use crate::rules::RuleInput;
use crate::transport::{endpoints, Client};
use crate::types::{
    ScrapeExtractRulesResponse, ScrapeHtmlResponse, ScrapePdfResponse, ScrapeScreenshotResponse,
};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const SCREENSHOT_FILE_NAME: &str = "screenshot.png";
const SCREENSHOT_MIME: &str = "image/png";
const PDF_FILE_NAME: &str = "document.pdf";
const PDF_MIME: &str = "application/pdf";

// ==================== Get HTML ====================

/// Input for the HTML operation
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScrapeHtmlInput {
    /// URL to scrape
    pub url: String,
    /// Comma-separated tags/selectors to remove after rendering
    pub strip_tags: String,
    /// Optional wire parameters, merged over the defaults
    ///
    /// Common keys: `js`, `timeout`, `js_timeout`, `wait_for`,
    /// `wait_until`, `useragent`, `cookies`, `device`, `window_width`,
    /// `window_height`, `block_ads`, `block_resources`, scroll and proxy
    /// settings.
    pub options: Map<String, Value>,
}

/// Rendered-HTML handler
#[derive(Debug)]
pub struct ScrapeHtml;

impl ScrapeHtml {
    /// Build wire parameters from the input
    pub fn build_params(input: &ScrapeHtmlInput) -> Result<Params, UjeebuError> {
        if input.url.is_empty() {
            return Err(UjeebuError::MissingField("url"));
        }

        let mut params = Params::new();
        params.insert("url", input.url.clone());
        params.insert("response_type", "html");
        params.insert("json", true);
        params.merge(&input.options);
        if !input.strip_tags.is_empty() {
            params.insert("strip_tags", input.strip_tags.clone());
        }
        Ok(params)
    }

    /// Narrow the response to `{html, url}`
    pub fn package(input: &ScrapeHtmlInput, response: Value) -> Result<OutputItem, UjeebuError> {
        let parsed: ScrapeHtmlResponse = serde_json::from_value(response)
            .map_err(|err| UjeebuError::Api(format!("malformed scrape response: {err}")))?;

        let mut json = Map::new();
        json.insert(
            "html".to_string(),
            parsed.into_html().map(Value::from).unwrap_or(Value::Null),
        );
        json.insert("url".to_string(), Value::from(input.url.clone()));
        Ok(OutputItem::from_json(Value::Object(json)))
    }
}

#[async_trait]
impl Handler for ScrapeHtml {
    fn name(&self) -> &'static str {
        "scrape_html"
    }

    fn endpoint(&self) -> &'static str {
        endpoints::SCRAPE
    }

    fn method(&self) -> reqwest::Method {
        reqwest::Method::GET
    }

    async fn execute(
        &self,
        client: &Client,
        item: &InputItem,
    ) -> Result<OutputItem, UjeebuError> {
        let input: ScrapeHtmlInput = parse_input(item)?;
        let params = Self::build_params(&input)?;
        let response = client.get(self.endpoint(), &params).await?;
        Self::package(&input, response)
    }
}

// ==================== Screenshot ====================

/// Which part of the page to capture
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ScreenshotRegion {
    /// Full page or viewport, controlled by `full_page`
    #[default]
    None,
    /// A single element matched by a CSS selector
    Selector { selector: String },
    /// A pixel region
    Coordinates {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    },
}

// Wire shape for the coordinates variant; field order is the wire order.
#[derive(Serialize)]
struct PartialRegion {
    x: i64,
    y: i64,
    width: i64,
    height: i64,
}

/// Input for the screenshot operation
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScreenshotInput {
    /// URL to capture
    pub url: String,
    /// Capture the full scrollable page instead of just the viewport
    pub full_page: bool,
    /// Capture a specific element or region
    pub region: ScreenshotRegion,
    /// Package the image as a binary attachment instead of inline base64
    pub output_binary: bool,
    /// Attachment name for the binary payload
    pub binary_property: String,
    /// Optional wire parameters, merged over the defaults
    pub options: Map<String, Value>,
}

impl Default for ScreenshotInput {
    fn default() -> Self {
        Self {
            url: String::new(),
            full_page: false,
            region: ScreenshotRegion::None,
            output_binary: true,
            binary_property: "screenshot".to_string(),
            options: Map::new(),
        }
    }
}

/// Screenshot handler
#[derive(Debug)]
pub struct ScrapeScreenshot;

impl ScrapeScreenshot {
    /// Build wire parameters from the input
    pub fn build_params(input: &ScreenshotInput) -> Result<Params, UjeebuError> {
        if input.url.is_empty() {
            return Err(UjeebuError::MissingField("url"));
        }

        let mut params = Params::new();
        params.insert("url", input.url.clone());
        params.insert("response_type", "screenshot");
        params.insert("json", true);
        params.insert("screenshot_fullpage", input.full_page);
        params.merge(&input.options);

        match &input.region {
            ScreenshotRegion::None => {}
            ScreenshotRegion::Selector { selector } => {
                params.insert("screenshot_partial", selector.clone());
            }
            ScreenshotRegion::Coordinates {
                x,
                y,
                width,
                height,
            } => {
                let region = PartialRegion {
                    x: *x,
                    y: *y,
                    width: *width,
                    height: *height,
                };
                let rendered = serde_json::to_string(&region)
                    .map_err(|err| UjeebuError::InvalidInput(err.to_string()))?;
                params.insert("screenshot_partial", rendered);
            }
        }
        Ok(params)
    }

    /// Package the base64 payload as a binary attachment or inline JSON
    pub fn package(input: &ScreenshotInput, response: Value) -> Result<OutputItem, UjeebuError> {
        let parsed: ScrapeScreenshotResponse = serde_json::from_value(response)
            .map_err(|err| UjeebuError::Api(format!("malformed screenshot response: {err}")))?;

        let mut json = Map::new();
        json.insert("url".to_string(), Value::from(input.url.clone()));
        json.insert("full_page".to_string(), Value::from(input.full_page));

        match parsed.screenshot {
            Some(payload) if input.output_binary => {
                let bytes = BASE64.decode(&payload).map_err(|err| {
                    UjeebuError::Api(format!("invalid base64 in screenshot payload: {err}"))
                })?;
                Ok(OutputItem::from_json(Value::Object(json)).with_binary(
                    input.binary_property.clone(),
                    BinaryAttachment::new(&bytes, SCREENSHOT_FILE_NAME, SCREENSHOT_MIME),
                ))
            }
            Some(payload) => {
                json.insert("screenshot".to_string(), Value::from(payload));
                Ok(OutputItem::from_json(Value::Object(json)))
            }
            None => Ok(OutputItem::from_json(Value::Object(json))),
        }
    }
}

#[async_trait]
impl Handler for ScrapeScreenshot {
    fn name(&self) -> &'static str {
        "scrape_screenshot"
    }

    fn endpoint(&self) -> &'static str {
        endpoints::SCRAPE
    }

    fn method(&self) -> reqwest::Method {
        reqwest::Method::GET
    }

    async fn execute(
        &self,
        client: &Client,
        item: &InputItem,
    ) -> Result<OutputItem, UjeebuError> {
        let input: ScreenshotInput = parse_input(item)?;
        let params = Self::build_params(&input)?;
        let response = client.get(self.endpoint(), &params).await?;
        Self::package(&input, response)
    }
}

// ==================== PDF ====================

/// Input for the PDF operation
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScrapePdfInput {
    /// URL to convert to PDF
    pub url: String,
    /// Package the document as a binary attachment instead of inline base64
    pub output_binary: bool,
    /// Attachment name for the binary payload
    pub binary_property: String,
    /// Optional wire parameters, merged over the defaults
    pub options: Map<String, Value>,
}

impl Default for ScrapePdfInput {
    fn default() -> Self {
        Self {
            url: String::new(),
            output_binary: true,
            binary_property: "pdf".to_string(),
            options: Map::new(),
        }
    }
}

/// PDF generation handler
#[derive(Debug)]
pub struct ScrapePdf;

impl ScrapePdf {
    /// Build wire parameters from the input
    pub fn build_params(input: &ScrapePdfInput) -> Result<Params, UjeebuError> {
        if input.url.is_empty() {
            return Err(UjeebuError::MissingField("url"));
        }

        let mut params = Params::new();
        params.insert("url", input.url.clone());
        params.insert("response_type", "pdf");
        params.insert("json", true);
        params.merge(&input.options);
        Ok(params)
    }

    /// Package the base64 payload as a binary attachment or inline JSON
    pub fn package(input: &ScrapePdfInput, response: Value) -> Result<OutputItem, UjeebuError> {
        let parsed: ScrapePdfResponse = serde_json::from_value(response)
            .map_err(|err| UjeebuError::Api(format!("malformed pdf response: {err}")))?;

        let mut json = Map::new();
        json.insert("url".to_string(), Value::from(input.url.clone()));

        match parsed.pdf {
            Some(payload) if input.output_binary => {
                let bytes = BASE64.decode(&payload).map_err(|err| {
                    UjeebuError::Api(format!("invalid base64 in pdf payload: {err}"))
                })?;
                Ok(OutputItem::from_json(Value::Object(json)).with_binary(
                    input.binary_property.clone(),
                    BinaryAttachment::new(&bytes, PDF_FILE_NAME, PDF_MIME),
                ))
            }
            Some(payload) => {
                json.insert("pdf".to_string(), Value::from(payload));
                Ok(OutputItem::from_json(Value::Object(json)))
            }
            None => Ok(OutputItem::from_json(Value::Object(json))),
        }
    }
}

#[async_trait]
impl Handler for ScrapePdf {
    fn name(&self) -> &'static str {
        "scrape_pdf"
    }

    fn endpoint(&self) -> &'static str {
        endpoints::SCRAPE
    }

    fn method(&self) -> reqwest::Method {
        reqwest::Method::GET
    }

    async fn execute(
        &self,
        client: &Client,
        item: &InputItem,
    ) -> Result<OutputItem, UjeebuError> {
        let input: ScrapePdfInput = parse_input(item)?;
        let params = Self::build_params(&input)?;
        let response = client.get(self.endpoint(), &params).await?;
        Self::package(&input, response)
    }
}

// ==================== Extract Rules ====================

/// Input for the extraction-rules operation
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExtractRulesInput {
    /// URL to extract data from
    pub url: String,
    /// Extraction rules in either mode
    pub rules: RuleInput,
    /// Optional wire parameters, merged over the defaults
    pub options: Map<String, Value>,
}

/// CSS-selector extraction handler: POST because the rules travel in the body
#[derive(Debug)]
pub struct ScrapeExtractRules;

impl ScrapeExtractRules {
    /// Compile rules and build wire parameters
    pub fn build_params(input: &ExtractRulesInput) -> Result<Params, UjeebuError> {
        if input.url.is_empty() {
            return Err(UjeebuError::MissingField("url"));
        }

        let rules = input.rules.compile()?;

        let mut params = Params::new();
        params.insert("url", input.url.clone());
        params.insert("extract_rules", Value::Object(rules));
        params.insert("json", true);
        params.merge(&input.options);
        Ok(params)
    }

    /// Narrow the response to `{url, result}`
    pub fn package(input: &ExtractRulesInput, response: Value) -> Result<OutputItem, UjeebuError> {
        let parsed: ScrapeExtractRulesResponse = serde_json::from_value(response)
            .map_err(|err| UjeebuError::Api(format!("malformed extract-rules response: {err}")))?;

        let mut json = Map::new();
        json.insert("url".to_string(), Value::from(input.url.clone()));
        json.insert("result".to_string(), parsed.result.unwrap_or(Value::Null));
        Ok(OutputItem::from_json(Value::Object(json)))
    }
}

#[async_trait]
impl Handler for ScrapeExtractRules {
    fn name(&self) -> &'static str {
        "scrape_extract_rules"
    }

    fn endpoint(&self) -> &'static str {
        endpoints::SCRAPE
    }

    fn method(&self) -> reqwest::Method {
        reqwest::Method::POST
    }

    async fn execute(
        &self,
        client: &Client,
        item: &InputItem,
    ) -> Result<OutputItem, UjeebuError> {
        let input: ExtractRulesInput = parse_input(item)?;
        let params = Self::build_params(&input)?;
        let response = client.post(self.endpoint(), &params).await?;
        Self::package(&input, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;
    use serde_json::json;

    fn html_input(url: &str) -> ScrapeHtmlInput {
        ScrapeHtmlInput {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_html_injects_family_defaults() {
        let params = ScrapeHtml::build_params(&html_input("https://example.com")).unwrap();

        assert_eq!(params.get("response_type"), Some(&json!("html")));
        assert_eq!(params.get("json"), Some(&json!(true)));
        assert_eq!(params.get("url"), Some(&json!("https://example.com")));
    }

    #[test]
    fn test_html_strip_tags_promoted_when_set() {
        let mut input = html_input("https://example.com");
        input.strip_tags = "script,style".to_string();

        let params = ScrapeHtml::build_params(&input).unwrap();
        assert_eq!(params.get("strip_tags"), Some(&json!("script,style")));

        let params = ScrapeHtml::build_params(&html_input("https://example.com")).unwrap();
        assert!(params.get("strip_tags").is_none());
    }

    #[test]
    fn test_html_options_win_over_defaults() {
        let mut input = html_input("https://example.com");
        input.options = json!({"json": false, "js": true})
            .as_object()
            .cloned()
            .unwrap();

        let params = ScrapeHtml::build_params(&input).unwrap();
        assert_eq!(params.get("json"), Some(&json!(false)));
        assert_eq!(params.get("js"), Some(&json!(true)));
    }

    #[test]
    fn test_html_package_falls_back_to_source() {
        let input = html_input("https://example.com");
        let output =
            ScrapeHtml::package(&input, json!({"html_source": "<html>src</html>"})).unwrap();
        assert_eq!(output.json["html"], json!("<html>src</html>"));
        assert_eq!(output.json["url"], json!("https://example.com"));
    }

    #[test]
    fn test_screenshot_coordinates_serialize_to_exact_wire_string() {
        let input = ScreenshotInput {
            url: "https://example.com".to_string(),
            region: ScreenshotRegion::Coordinates {
                x: 0,
                y: 0,
                width: 800,
                height: 600,
            },
            ..Default::default()
        };

        let params = ScrapeScreenshot::build_params(&input).unwrap();
        assert_eq!(
            params.get("screenshot_partial"),
            Some(&json!(r#"{"x":0,"y":0,"width":800,"height":600}"#))
        );
    }

    #[test]
    fn test_screenshot_selector_region() {
        let input = ScreenshotInput {
            url: "https://example.com".to_string(),
            region: ScreenshotRegion::Selector {
                selector: "#main-content".to_string(),
            },
            ..Default::default()
        };

        let params = ScrapeScreenshot::build_params(&input).unwrap();
        assert_eq!(params.get("screenshot_partial"), Some(&json!("#main-content")));
        assert_eq!(params.get("response_type"), Some(&json!("screenshot")));
        assert_eq!(params.get("screenshot_fullpage"), Some(&json!(false)));
    }

    #[test]
    fn test_screenshot_binary_and_inline_carry_identical_bytes() {
        let payload = BASE64.encode(b"fake png bytes");
        let response = json!({ "screenshot": payload });

        let binary_input = ScreenshotInput {
            url: "https://example.com".to_string(),
            ..Default::default()
        };
        let inline_input = ScreenshotInput {
            output_binary: false,
            ..binary_input.clone()
        };

        let packaged = ScrapeScreenshot::package(&binary_input, response.clone()).unwrap();
        let attachment = &packaged.binary.as_ref().unwrap()["screenshot"];
        assert_eq!(attachment.file_name, "screenshot.png");
        assert_eq!(attachment.mime_type, "image/png");
        assert_eq!(packaged.json["url"], json!("https://example.com"));
        assert!(packaged.json.get("screenshot").is_none());

        let inline = ScrapeScreenshot::package(&inline_input, response).unwrap();
        assert!(inline.binary.is_none());

        // Same bytes whichever way the payload is packaged
        assert_eq!(
            attachment.decode().unwrap(),
            BASE64
                .decode(inline.json["screenshot"].as_str().unwrap())
                .unwrap()
        );
    }

    #[test]
    fn test_screenshot_missing_payload_stays_inline() {
        let input = ScreenshotInput {
            url: "https://example.com".to_string(),
            ..Default::default()
        };
        let output = ScrapeScreenshot::package(&input, json!({})).unwrap();
        assert!(output.binary.is_none());
        assert!(output.json.get("screenshot").is_none());
        assert_eq!(output.json["full_page"], json!(false));
    }

    #[test]
    fn test_pdf_binary_packaging_uses_fixed_name_and_mime() {
        let input = ScrapePdfInput {
            url: "https://example.com".to_string(),
            ..Default::default()
        };
        let response = json!({ "pdf": BASE64.encode(b"%PDF-1.4 fake") });

        let output = ScrapePdf::package(&input, response).unwrap();
        let attachment = &output.binary.as_ref().unwrap()["pdf"];
        assert_eq!(attachment.file_name, "document.pdf");
        assert_eq!(attachment.mime_type, "application/pdf");
        assert_eq!(attachment.decode().unwrap(), b"%PDF-1.4 fake");
        assert_eq!(output.json, json!({"url": "https://example.com"}));
    }

    #[test]
    fn test_pdf_custom_attachment_name() {
        let input = ScrapePdfInput {
            url: "https://example.com".to_string(),
            binary_property: "invoice".to_string(),
            ..Default::default()
        };
        let response = json!({ "pdf": BASE64.encode(b"%PDF") });

        let output = ScrapePdf::package(&input, response).unwrap();
        assert!(output.binary.as_ref().unwrap().contains_key("invoice"));
    }

    #[test]
    fn test_extract_rules_params_carry_compiled_rules() {
        let input = ExtractRulesInput {
            url: "https://example.com/products".to_string(),
            rules: RuleInput::Builder {
                rules: vec![Rule::text("title", "h1")],
            },
            options: Map::new(),
        };

        let params = ScrapeExtractRules::build_params(&input).unwrap();
        assert_eq!(params.get("json"), Some(&json!(true)));
        assert_eq!(
            params.get("extract_rules"),
            Some(&json!({"title": {"selector": "h1", "type": "text"}}))
        );
        // Rules endpoint has no response_type
        assert!(params.get("response_type").is_none());
    }

    #[test]
    fn test_extract_rules_empty_builder_fails() {
        let input = ExtractRulesInput {
            url: "https://example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ScrapeExtractRules::build_params(&input),
            Err(UjeebuError::EmptyRules)
        ));
    }

    #[test]
    fn test_extract_rules_package_narrows_to_url_and_result() {
        let input = ExtractRulesInput {
            url: "https://example.com".to_string(),
            rules: RuleInput::Builder {
                rules: vec![Rule::text("title", "h1")],
            },
            options: Map::new(),
        };
        let response = json!({
            "result": {"title": "A headline"},
            "js": true,
            "time": 0.8,
        });

        let output = ScrapeExtractRules::package(&input, response).unwrap();
        assert_eq!(
            output.json,
            json!({"url": "https://example.com", "result": {"title": "A headline"}})
        );
    }
}
