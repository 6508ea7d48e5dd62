use shared::PredictionResult;

use crate::error::{InvocationError, ResponseParseError};

/// Endpoint response body. Like the underlying network stream it can only be
/// drained once: every read after the first returns no data.
#[derive(Debug)]
pub struct OneShotBody {
    bytes: Option<Vec<u8>>,
}

impl OneShotBody {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes: Some(bytes) }
    }

    pub fn read(&mut self) -> Vec<u8> {
        self.bytes.take().unwrap_or_default()
    }
}

/// The response body captured exactly once. Consumes the `OneShotBody`, so the
/// raw display and the JSON parser always see the same text.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseText(String);

impl ResponseText {
    pub fn capture(mut body: OneShotBody) -> Result<Self, InvocationError> {
        let text = String::from_utf8(body.read())?;
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Parses a JSON object with optional `predicted_label` / `probability` keys.
    pub fn parse(&self) -> Result<PredictionResult, ResponseParseError> {
        let value: serde_json::Value = serde_json::from_str(&self.0)?;
        if !value.is_object() {
            return Err(ResponseParseError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }
}
