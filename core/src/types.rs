//! Caller-facing value types.
//!
//! # Design
//! `RequestOptions` is the partial description a caller hands in; every
//! field is optional and `RequestSpec::new` fills the gaps with fixed
//! defaults. It deserializes from JSON with the same field names a plain
//! object literal would use, so request descriptions can live in config
//! files or test vectors.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::http::HttpVersion;

/// Query or body parameters. Keys are unique; ordering only affects the
/// encoded form, which is sorted by key.
pub type Params = BTreeMap<String, String>;

/// Partial request description. Unset fields take the defaults documented
/// on each field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestOptions {
    /// Version to pin on the wire. Default: unset.
    pub version: Option<HttpVersion>,
    /// HTTP verb, any casing. Default: `GET`.
    pub method: Option<String>,
    /// Path handed to `ClientConfig::resolve_url`. Default: empty path.
    pub url: Option<String>,
    /// Raw body payload, used when `params` is empty. Default: unset.
    pub content: Option<Value>,
    /// Default: empty.
    pub params: Option<Params>,
    /// Default: empty.
    pub headers: Option<BTreeMap<String, String>>,
    /// Encode bodies as JSON and send `Content-Type: application/json`.
    /// Default: `false`.
    pub json: Option<bool>,
    /// Kept for compatibility with existing request descriptions; has no
    /// effect. Default: `true`.
    pub return_transfer: Option<bool>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_version(mut self, version: HttpVersion) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_content(mut self, content: impl Into<Value>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Add one parameter, replacing an existing value for the same key.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .get_or_insert_with(Params::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = Some(json);
        self
    }

    pub fn with_return_transfer(mut self, return_transfer: bool) -> Self {
        self.return_transfer = Some(return_transfer);
        self
    }
}

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseValue {
    /// The response declared `application/json`.
    Json(Value),
    /// Any other content type, body returned unchanged.
    Text(String),
}

impl ResponseValue {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseValue::Json(value) => Some(value),
            ResponseValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseValue::Json(_) => None,
            ResponseValue::Text(text) => Some(text),
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            ResponseValue::Json(value) => Some(value),
            ResponseValue::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_deserialize_from_object_literal() {
        let options: RequestOptions = serde_json::from_str(
            r#"{"method":"post","url":"endpoint","params":{"key":"value"},"json":true,"returnTransfer":false}"#,
        )
        .unwrap();
        assert_eq!(options.method.as_deref(), Some("post"));
        assert_eq!(options.url.as_deref(), Some("endpoint"));
        assert_eq!(options.params.unwrap()["key"], "value");
        assert_eq!(options.json, Some(true));
        assert_eq!(options.return_transfer, Some(false));
        assert!(options.version.is_none());
    }

    #[test]
    fn options_accept_null_fields() {
        let options: RequestOptions =
            serde_json::from_str(r#"{"version":null,"content":null,"url":null}"#).unwrap();
        assert!(options.version.is_none());
        assert!(options.content.is_none());
        assert!(options.url.is_none());
    }

    #[test]
    fn with_param_replaces_duplicate_keys() {
        let options = RequestOptions::new()
            .with_param("a", "1")
            .with_param("a", "2");
        let params = options.params.unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["a"], "2");
    }

    #[test]
    fn response_value_accessors() {
        let json = ResponseValue::Json(serde_json::json!({"a": 1}));
        assert_eq!(json.as_json().unwrap()["a"], 1);
        assert!(json.as_text().is_none());

        let text = ResponseValue::Text("hello".to_string());
        assert_eq!(text.as_text(), Some("hello"));
        assert!(text.into_json().is_none());
    }
}
