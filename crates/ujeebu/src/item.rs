//! Batch item shapes
//!
//! Inputs and outputs cross the batch boundary as JSON-shaped items: a flat
//! map of parameter values in, a JSON payload plus optional binary
//! attachments out.

use crate::error::UjeebuError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Per-item parameter values, keyed by field name
pub type InputItem = Map<String, Value>;

/// A non-JSON payload (image or PDF bytes) carried alongside an output item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryAttachment {
    /// Base64-encoded payload
    pub data: String,
    pub mime_type: String,
    pub file_name: String,
}

impl BinaryAttachment {
    /// Package raw bytes as an attachment, encoding to base64
    pub fn new(bytes: &[u8], file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: BASE64.encode(bytes),
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }

    /// Decode the payload back to raw bytes
    pub fn decode(&self) -> Result<Vec<u8>, UjeebuError> {
        BASE64
            .decode(&self.data)
            .map_err(|err| UjeebuError::Api(format!("invalid base64 payload: {err}")))
    }
}

/// One output item per successful input item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputItem {
    /// JSON payload
    pub json: Value,
    /// Binary attachments, keyed by attachment name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<BTreeMap<String, BinaryAttachment>>,
}

impl OutputItem {
    /// Wrap a JSON payload with no attachments
    pub fn from_json(json: Value) -> Self {
        Self { json, binary: None }
    }

    /// Degraded item capturing a per-item failure as data
    pub fn from_error(err: &UjeebuError) -> Self {
        Self::from_json(json!({ "error": err.to_string() }))
    }

    /// Attach a binary payload under the given name
    pub fn with_binary(mut self, name: impl Into<String>, attachment: BinaryAttachment) -> Self {
        self.binary
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), attachment);
        self
    }
}
