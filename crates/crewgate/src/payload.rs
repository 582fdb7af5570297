//! Request payload validation
//!
//! Payloads are untyped JSON. The only rules are that required input is
//! present and non-empty (no null, false, zero, "", [] or {}), and that
//! fields read as text are JSON strings. Nothing is coerced.

use serde_json::Value;
use thiserror::Error;

use crate::capability::Capability;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("{0}")]
    Missing(&'static str),

    #[error("Invalid JSON payload: {0}")]
    Malformed(String),

    #[error("Field '{0}' must be a string")]
    NotAString(&'static str),
}

pub type Result<T> = std::result::Result<T, PayloadError>;

/// Validated input for content generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    pub topic: String,
    pub content_type: String,
}

/// A decoded request body; `None` when the body was empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Option<Value>);

impl Payload {
    /// Decode a raw request body
    pub fn parse(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(None));
        }
        serde_json::from_slice(body)
            .map(|value| Self(Some(value)))
            .map_err(|e| PayloadError::Malformed(e.to_string()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(Some(value))
    }

    /// Take the whole payload as opaque data for `capability`
    pub fn into_data(self, capability: Capability) -> Result<Value> {
        match self.0 {
            Some(value) if is_truthy(&value) => Ok(value),
            _ => Err(PayloadError::Missing(missing_message(capability))),
        }
    }

    /// The `text` field of a sentiment request
    pub fn text(&self) -> Result<String> {
        self.required_str("text", missing_message(Capability::Sentiment))
    }

    /// The `topic` and `content_type` fields of a content request
    pub fn content_request(&self) -> Result<ContentRequest> {
        let message = missing_message(Capability::GenerateContent);
        Ok(ContentRequest {
            topic: self.required_str("topic", message)?,
            content_type: self.required_str("content_type", message)?,
        })
    }

    fn required_str(&self, field: &'static str, message: &'static str) -> Result<String> {
        let value = self
            .0
            .as_ref()
            .and_then(|body| body.get(field))
            .filter(|v| is_truthy(v))
            .ok_or(PayloadError::Missing(message))?;

        value
            .as_str()
            .map(str::to_string)
            .ok_or(PayloadError::NotAString(field))
    }
}

/// Message returned when the required input for `capability` is absent
pub fn missing_message(capability: Capability) -> &'static str {
    match capability {
        Capability::Analyze => "No data provided",
        Capability::Recommend => "No user data provided",
        Capability::Sentiment => "No text provided for sentiment analysis",
        Capability::GenerateContent => {
            "Both topic and content_type are required for content generation"
        }
        Capability::ComprehensiveAnalysis => "No data provided for comprehensive analysis",
    }
}

/// `false` for null, false, zero and empty strings, arrays or objects
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// The first `max_chars` characters of `text`, for logging
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
