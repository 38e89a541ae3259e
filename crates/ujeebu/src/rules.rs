//! Extraction rules for the scrape endpoint
//!
//! Rules arrive in one of two modes: a raw JSON object, or an ordered list
//! of builder tuples. Both compile into the nested `extract_rules` object
//! the API expects.

use crate::error::UjeebuError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// What to pull out of the matched element(s)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    /// Text content
    #[default]
    Text,
    /// `href` attribute
    Link,
    /// `src` attribute
    Image,
    /// A named attribute
    Attr,
    /// Nested object
    Obj,
}

impl FromStr for RuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(RuleType::Text),
            "link" => Ok(RuleType::Link),
            "image" => Ok(RuleType::Image),
            "attr" => Ok(RuleType::Attr),
            "obj" => Ok(RuleType::Obj),
            _ => Err(format!("Invalid rule type: {s}")),
        }
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RuleType::Text => "text",
            RuleType::Link => "link",
            RuleType::Image => "image",
            RuleType::Attr => "attr",
            RuleType::Obj => "obj",
        };
        write!(f, "{name}")
    }
}

/// One builder-mode rule: a named CSS-selector instruction
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Rule {
    /// Name of the field in the output
    pub field_name: String,
    /// CSS selector to find the element(s)
    pub selector: String,
    /// Type of data to extract
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    /// Attribute to extract, only meaningful for the `attr` type
    pub attribute: String,
    /// Extract all matching elements as an array
    pub multiple: bool,
}

impl Rule {
    /// Create a rule extracting text content
    pub fn text(field_name: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            selector: selector.into(),
            ..Default::default()
        }
    }

    /// Set the rule type
    pub fn rule_type(mut self, rule_type: RuleType) -> Self {
        self.rule_type = rule_type;
        self
    }

    /// Set the attribute name (used with [`RuleType::Attr`])
    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Extract all matches instead of the first
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }
}

/// How extraction rules were supplied
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RuleInput {
    /// A raw JSON object, used verbatim as the rule mapping
    Json {
        /// JSON text, e.g. `{"title": {"selector": "h1", "type": "text"}}`
        rules: String,
    },
    /// An ordered list of builder rules
    Builder {
        /// Rules in output order
        rules: Vec<Rule>,
    },
}

impl Default for RuleInput {
    fn default() -> Self {
        RuleInput::Builder { rules: Vec::new() }
    }
}

impl RuleInput {
    /// Compile either mode into the nested `extract_rules` object
    ///
    /// Builder tuples with an empty field name or selector are discarded.
    /// Fails when the JSON does not parse or when no rules remain.
    pub fn compile(&self) -> Result<Map<String, Value>, UjeebuError> {
        let compiled = match self {
            RuleInput::Json { rules } => {
                let parsed: Value = serde_json::from_str(rules)
                    .map_err(|err| UjeebuError::InvalidRules(err.to_string()))?;
                match parsed {
                    Value::Object(map) => map,
                    _ => {
                        return Err(UjeebuError::InvalidRules(
                            "expected a JSON object".to_string(),
                        ))
                    }
                }
            }
            RuleInput::Builder { rules } => {
                let mut compiled = Map::new();
                for rule in rules {
                    if rule.field_name.is_empty() || rule.selector.is_empty() {
                        continue;
                    }

                    let mut config = Map::new();
                    config.insert("selector".to_string(), Value::from(rule.selector.clone()));
                    config.insert("type".to_string(), Value::from(rule.rule_type.to_string()));
                    if rule.rule_type == RuleType::Attr && !rule.attribute.is_empty() {
                        config.insert("attribute".to_string(), Value::from(rule.attribute.clone()));
                    }
                    if rule.multiple {
                        config.insert("multiple".to_string(), Value::from(true));
                    }

                    compiled.insert(rule.field_name.clone(), Value::Object(config));
                }
                compiled
            }
        };

        if compiled.is_empty() {
            return Err(UjeebuError::EmptyRules);
        }
        Ok(compiled)
    }
}
