use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared::ErrorResponse;
use std::string::FromUtf8Error;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("No image was uploaded")]
    MissingUpload,
    #[error("Only one image can be uploaded at a time")]
    TooManyFiles,
    #[error("Unsupported file type: {0} (expected a .jpg file)")]
    UnsupportedFileType(String),
    #[error("File too large (limit is {limit} bytes)")]
    FileTooLarge { limit: usize },
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("Image worker failed: {0}")]
    Worker(String),
    #[error("Endpoint invocation failed: {0}")]
    Invocation(#[from] InvocationError),
}

#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    #[error("SageMaker error: {0}")]
    Service(String),
    #[error("Response body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ResponseParseError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected a JSON object")]
    NotAnObject,
}

impl ResponseError for PipelineError {
    fn status_code(&self) -> StatusCode {
        match self {
            PipelineError::MissingUpload | PipelineError::TooManyFiles | PipelineError::Decode(_) => {
                StatusCode::BAD_REQUEST
            }
            PipelineError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            PipelineError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            PipelineError::Encode(_) | PipelineError::Worker(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            PipelineError::Invocation(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
