// Outbound response types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response returned by a handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, HeaderValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// When set, `body` is base64 and is decoded before it is written
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl AlbResponse {
    /// Response with the given status, no headers and no body
    pub const fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: BTreeMap::new(),
            body: None,
            is_base64_encoded: false,
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<HeaderValues>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.is_base64_encoded = false;
        self
    }

    /// Set a base64-encoded body
    #[must_use]
    pub fn with_base64_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.is_base64_encoded = true;
        self
    }
}

/// One header value, or several values written as repeated header lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValues {
    One(String),
    Many(Vec<String>),
}

impl HeaderValues {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        };
        values.iter().map(String::as_str)
    }
}

impl From<&str> for HeaderValues {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for HeaderValues {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for HeaderValues {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_minimal_response() {
        let response: AlbResponse =
            serde_json::from_value(json!({ "statusCode": 204, "headers": {} })).unwrap();
        assert_eq!(response, AlbResponse::new(204));
    }

    #[test]
    fn test_deserialize_multi_value_header() {
        let response: AlbResponse = serde_json::from_value(json!({
            "statusCode": 200,
            "headers": { "set-cookie": ["a=1", "b=2"], "content-type": "text/plain" },
            "body": "ok",
            "isBase64Encoded": false
        }))
        .unwrap();
        let cookies: Vec<&str> = response.headers["set-cookie"].iter().collect();
        assert_eq!(cookies, vec!["a=1", "b=2"]);
        assert_eq!(
            response.headers["content-type"],
            HeaderValues::One("text/plain".to_string())
        );
        assert_eq!(response.body.as_deref(), Some("ok"));
    }

    #[test]
    fn test_missing_headers_is_rejected() {
        let result = serde_json::from_value::<AlbResponse>(json!({ "statusCode": 200 }));
        assert!(result.is_err());
        let result = serde_json::from_value::<AlbResponse>(json!({ "headers": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_serializes_in_camel_case() {
        let response = AlbResponse::new(200)
            .with_header("content-type", "image/gif")
            .with_base64_body("R0lG");
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({
                "statusCode": 200,
                "headers": { "content-type": "image/gif" },
                "body": "R0lG",
                "isBase64Encoded": true
            })
        );
    }
}
