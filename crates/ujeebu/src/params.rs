//! Wire request parameters
//!
//! Every operation builds a flat [`Params`] map that becomes either the
//! query string (GET endpoints) or the JSON body (POST endpoints). The map
//! never holds a null or empty-string value: absent values are omitted
//! entirely rather than sent as empty.

use serde_json::{Map, Value};

/// Normalized request parameters for a single API call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    map: Map<String, Value>,
}

impl Params {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, dropping JSON null and the empty string
    ///
    /// `false` and `0` are meaningful and are kept.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let value = value.into();
        if Self::is_empty_value(&value) {
            return;
        }
        self.map.insert(key.into(), value);
    }

    /// Shallow-merge an options object over the current map
    ///
    /// Options win on key collision; null and empty-string entries are
    /// dropped rather than overwriting.
    pub fn merge(&mut self, options: &Map<String, Value>) {
        for (key, value) in options {
            if Self::is_empty_value(value) {
                continue;
            }
            self.map.insert(key.clone(), value.clone());
        }
    }

    /// True when no parameters are set
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of parameters set
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Look up a parameter by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// Borrow the underlying map (used as a JSON request body)
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.map
    }

    /// Consume into the underlying map
    pub fn into_map(self) -> Map<String, Value> {
        self.map
    }

    /// Flatten to key/value string pairs for a query string
    ///
    /// Bools become `true`/`false`, numbers render via display, and any
    /// nested value is compact JSON.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.map
            .iter()
            .map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    other => other.to_string(),
                };
                (key.clone(), rendered)
            })
            .collect()
    }

    fn is_empty_value(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<Params> for Value {
    fn from(params: Params) -> Self {
        Value::Object(params.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_drops_null_and_empty_string() {
        let mut params = Params::new();
        params.insert("url", "https://example.com");
        params.insert("cookies", "");
        params.insert("wait_for", Value::Null);

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("url"), Some(&json!("https://example.com")));
        assert!(params.get("cookies").is_none());
        assert!(params.get("wait_for").is_none());
    }

    #[test]
    fn test_insert_keeps_false_and_zero() {
        let mut params = Params::new();
        params.insert("js", false);
        params.insert("page", 0);

        assert_eq!(params.get("js"), Some(&json!(false)));
        assert_eq!(params.get("page"), Some(&json!(0)));
    }

    #[test]
    fn test_merge_options_win_on_collision() {
        let mut params = Params::new();
        params.insert("timeout", 60);
        params.insert("url", "https://example.com");

        let options = json!({"timeout": 90, "js": true})
            .as_object()
            .cloned()
            .unwrap();
        params.merge(&options);

        assert_eq!(params.get("timeout"), Some(&json!(90)));
        assert_eq!(params.get("js"), Some(&json!(true)));
        assert_eq!(params.get("url"), Some(&json!("https://example.com")));
    }

    #[test]
    fn test_merge_skips_empty_values() {
        let mut params = Params::new();
        params.insert("useragent", "bot/1.0");

        let options = json!({"useragent": "", "cookies": null, "device": "mobile"})
            .as_object()
            .cloned()
            .unwrap();
        params.merge(&options);

        // An empty option must not clobber an existing value
        assert_eq!(params.get("useragent"), Some(&json!("bot/1.0")));
        assert!(params.get("cookies").is_none());
        assert_eq!(params.get("device"), Some(&json!("mobile")));
    }

    #[test]
    fn test_to_query_renders_scalars() {
        let mut params = Params::new();
        params.insert("url", "https://example.com");
        params.insert("json", true);
        params.insert("timeout", 60);

        let query = params.to_query();
        assert!(query.contains(&("url".to_string(), "https://example.com".to_string())));
        assert!(query.contains(&("json".to_string(), "true".to_string())));
        assert!(query.contains(&("timeout".to_string(), "60".to_string())));
    }
}
