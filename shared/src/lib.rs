use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumString};

/// Width and height, in pixels, of the image the remote model expects.
pub const MODEL_INPUT_SIZE: u32 = 224;

/// The only file extension the upload form accepts.
pub const ACCEPTED_EXTENSION: &str = "jpg";

/// Placeholder rendered for any value the endpoint did not return.
pub const NOT_AVAILABLE: &str = "N/A";

pub const DECODE_ERROR_MESSAGE: &str = "Error decoding the JSON response.";

/// How the backend treats a failed endpoint invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ErrorMode {
    /// Invocation failures are reported as a failed request.
    Strict,
    /// Invocation failures are rendered as a message next to the form.
    #[default]
    Lenient,
}

/// Parsed endpoint reply. Both keys are optional on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default)]
    pub predicted_label: Option<String>,
    #[serde(default)]
    pub probability: Option<f64>,
}

impl PredictionResult {
    pub fn display_label(&self) -> String {
        self.predicted_label
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn confidence(&self) -> Confidence {
        match self.probability {
            Some(p) => Confidence::Value(p),
            None => Confidence::Missing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Confidence {
    Value(f64),
    Missing,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Value(p) => write!(f, "{:.2}", p),
            Confidence::Missing => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// What the page shows below the raw response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Prediction {
        label: String,
        confidence: String,
        probability: Option<f64>,
    },
    DecodeError {
        message: String,
    },
    InvocationError {
        message: String,
    },
}

impl Outcome {
    pub fn from_prediction(result: &PredictionResult) -> Self {
        Outcome::Prediction {
            label: result.display_label(),
            confidence: result.confidence().to_string(),
            probability: result.probability,
        }
    }

    pub fn decode_error() -> Self {
        Outcome::DecodeError {
            message: DECODE_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn invocation_error(error: impl fmt::Display) -> Self {
        Outcome::InvocationError {
            message: format!("An error occurred: {}", error),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Prediction { .. } => "prediction",
            Outcome::DecodeError { .. } => "decode_error",
            Outcome::InvocationError { .. } => "invocation_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResponse {
    pub request_id: String,
    /// Endpoint body exactly as received, absent when the call itself failed.
    pub raw_response: Option<String>,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Upload filter shared by the file picker and the backend.
pub fn is_accepted_file_name(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(ACCEPTED_EXTENSION))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn confidence_uses_two_decimals() {
        let result = PredictionResult {
            predicted_label: Some("PNEUMONIA".into()),
            probability: Some(0.87),
        };
        assert_eq!(result.confidence().to_string(), "0.87");
        assert_eq!(Confidence::Value(1.0).to_string(), "1.00");
        assert_eq!(Confidence::Value(0.123456).to_string(), "0.12");
    }

    #[test]
    fn missing_values_render_placeholder() {
        let result = PredictionResult {
            predicted_label: Some("NORMAL".into()),
            probability: None,
        };
        assert_eq!(result.display_label(), "NORMAL");
        assert_eq!(result.confidence(), Confidence::Missing);
        assert_eq!(result.confidence().to_string(), "N/A");
        assert_eq!(PredictionResult::default().display_label(), "N/A");
    }

    #[test]
    fn missing_keys_deserialize_as_none() {
        let result: PredictionResult = serde_json::from_str(r#"{"predicted_label":"NORMAL"}"#).unwrap();
        assert_eq!(result.predicted_label.as_deref(), Some("NORMAL"));
        assert!(result.probability.is_none());

        let empty: PredictionResult = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, PredictionResult::default());
    }

    #[test]
    fn outcome_is_tagged_on_the_wire() {
        let outcome = Outcome::from_prediction(&PredictionResult {
            predicted_label: Some("PNEUMONIA".into()),
            probability: Some(0.87),
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "prediction");
        assert_eq!(json["label"], "PNEUMONIA");
        assert_eq!(json["confidence"], "0.87");

        let err = Outcome::invocation_error("endpoint not found");
        assert_eq!(
            err,
            Outcome::InvocationError {
                message: "An error occurred: endpoint not found".into()
            }
        );
        assert_eq!(err.kind(), "invocation_error");
    }

    #[test]
    fn error_mode_parses_case_insensitively() {
        assert_eq!(ErrorMode::from_str("strict").unwrap(), ErrorMode::Strict);
        assert_eq!(ErrorMode::from_str("LENIENT").unwrap(), ErrorMode::Lenient);
        assert!(ErrorMode::from_str("loud").is_err());
        assert_eq!(ErrorMode::default(), ErrorMode::Lenient);
        assert_eq!(ErrorMode::Strict.to_string(), "strict");
    }

    #[test]
    fn only_jpg_names_are_accepted() {
        assert!(is_accepted_file_name("chest.jpg"));
        assert!(is_accepted_file_name("CHEST.JPG"));
        assert!(is_accepted_file_name("scan.2024.jpg"));
        assert!(!is_accepted_file_name("chest.jpeg"));
        assert!(!is_accepted_file_name("chest.png"));
        assert!(!is_accepted_file_name("jpg"));
        assert!(!is_accepted_file_name(".jpg"));
    }
}
