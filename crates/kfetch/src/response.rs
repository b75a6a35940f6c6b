//! Kfetch response types

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Media type prefix decoded as JSON
pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";
/// Media type prefix decoded as text
pub(crate) const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Result of a completed request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseResult<T> {
    /// Decoded body, absent when the content type is neither JSON nor text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<T>,
    /// Response metadata
    pub response: ResponseMeta,
}

/// Response metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Raw `content-type` header value
    pub content_type: Option<String>,
    /// HTTP status code
    pub status: u16,
}

impl ResponseMeta {
    /// Check if the status is a success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the status is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the status is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// How a response body is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyKind {
    Json,
    Text,
    Skip,
}

impl BodyKind {
    /// Pick the decoder from a raw `content-type` value (case-sensitive prefix match)
    pub(crate) fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct) if ct.starts_with(JSON_CONTENT_TYPE) => BodyKind::Json,
            Some(ct) if ct.starts_with(TEXT_CONTENT_TYPE) => BodyKind::Text,
            _ => BodyKind::Skip,
        }
    }
}

/// Turn a text body into `T`
///
/// The text is handed to serde as a string, so `String` and
/// `serde_json::Value` targets work while e.g. a struct target fails.
pub(crate) fn text_into<T: DeserializeOwned>(text: String) -> serde_json::Result<T> {
    serde_json::from_value(serde_json::Value::String(text))
}
