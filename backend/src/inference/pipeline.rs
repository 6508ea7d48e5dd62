use actix_web::web;
use shared::{ErrorMode, InferenceResponse, Outcome};
use std::sync::Arc;
use uuid::Uuid;

use super::preprocess;
use super::response::ResponseText;
use super::upload::UploadedImage;
use crate::error::{InvocationError, PipelineError};
use crate::sagemaker::endpoint_service::EndpointInvoker;

/// Upload -> normalize -> invoke -> read once -> parse -> render.
#[derive(Clone)]
pub struct InferencePipeline {
    invoker: Arc<dyn EndpointInvoker>,
    error_mode: ErrorMode,
}

impl InferencePipeline {
    pub fn new(invoker: Arc<dyn EndpointInvoker>, error_mode: ErrorMode) -> Self {
        Self {
            invoker,
            error_mode,
        }
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }

    pub fn endpoint_name(&self) -> &str {
        self.invoker.endpoint_name()
    }

    /// Runs one upload through the endpoint.
    ///
    /// Response parse failures always render as `Outcome::DecodeError`. An
    /// invocation failure is rendered as `Outcome::InvocationError` in lenient
    /// mode and returned as `PipelineError::Invocation` in strict mode.
    pub async fn run(&self, upload: UploadedImage) -> Result<InferenceResponse, PipelineError> {
        let request_id = Uuid::new_v4().to_string();
        log::info!(
            "[{}] Received {} ({} bytes, sha256 {})",
            request_id,
            upload.file_name(),
            upload.len(),
            upload.fingerprint()
        );

        // decode and resize are CPU bound; keep them off the async worker
        let bytes = upload.into_bytes();
        let normalized = web::block(move || preprocess::normalize(&bytes))
            .await
            .map_err(|e| PipelineError::Worker(e.to_string()))?
            .map_err(|e| {
                log::warn!("[{}] Could not prepare image: {}", request_id, e);
                e
            })?;
        log::info!(
            "[{}] Resized {}x{} to model input, payload {} bytes",
            request_id,
            normalized.original_width,
            normalized.original_height,
            normalized.jpeg.len()
        );

        let text = match self.invoke(normalized.jpeg).await {
            Ok(text) => text,
            Err(e) => return self.handle_invocation_error(request_id, e),
        };
        log::debug!("[{}] Raw response: {}", request_id, text.as_str());

        let outcome = match text.parse() {
            Ok(prediction) => Outcome::from_prediction(&prediction),
            Err(e) => {
                log::warn!("[{}] Could not parse endpoint response: {}", request_id, e);
                Outcome::decode_error()
            }
        };
        log::info!("[{}] Completed with {}", request_id, outcome.kind());

        Ok(InferenceResponse {
            request_id,
            raw_response: Some(text.into_string()),
            outcome,
        })
    }

    async fn invoke(&self, payload: Vec<u8>) -> Result<ResponseText, InvocationError> {
        let body = self.invoker.invoke(payload).await?;
        ResponseText::capture(body)
    }

    fn handle_invocation_error(
        &self,
        request_id: String,
        error: InvocationError,
    ) -> Result<InferenceResponse, PipelineError> {
        match self.error_mode {
            ErrorMode::Strict => {
                log::error!("[{}] Endpoint invocation failed: {}", request_id, error);
                Err(PipelineError::Invocation(error))
            }
            ErrorMode::Lenient => {
                log::warn!("[{}] Endpoint invocation failed: {}", request_id, error);
                Ok(InferenceResponse {
                    request_id,
                    raw_response: None,
                    outcome: Outcome::invocation_error(&error),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::preprocess::tests::sample_jpeg;
    use crate::inference::response::OneShotBody;
    use crate::sagemaker::scripted::ScriptedInvoker;
    use std::collections::BTreeSet;
    use std::path::{Path, PathBuf};

    fn pipeline(invoker: &Arc<ScriptedInvoker>, mode: ErrorMode) -> InferencePipeline {
        InferencePipeline::new(invoker.clone(), mode)
    }

    fn upload() -> UploadedImage {
        UploadedImage::new("chest.jpg", sample_jpeg(800, 600))
    }

    #[actix_web::test]
    async fn well_formed_reply_renders_label_and_confidence() {
        let body = r#"{"predicted_label": "PNEUMONIA", "probability": 0.87}"#;
        let invoker = Arc::new(ScriptedInvoker::replying(body));
        let response = pipeline(&invoker, ErrorMode::Lenient).run(upload()).await.unwrap();

        assert_eq!(response.raw_response.as_deref(), Some(body));
        assert_eq!(
            response.outcome,
            Outcome::Prediction {
                label: "PNEUMONIA".into(),
                confidence: "0.87".into(),
                probability: Some(0.87),
            }
        );
        assert!(!response.request_id.is_empty());
    }

    #[actix_web::test]
    async fn endpoint_receives_one_224_jpeg() {
        let invoker = Arc::new(ScriptedInvoker::replying("{}"));
        pipeline(&invoker, ErrorMode::Strict).run(upload()).await.unwrap();

        let payloads = invoker.payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(
            image::guess_format(&payloads[0]).unwrap(),
            image::ImageFormat::Jpeg
        );
        let sent = image::load_from_memory(&payloads[0]).unwrap();
        assert_eq!((sent.width(), sent.height()), (224, 224));
    }

    #[actix_web::test]
    async fn invalid_json_is_reported_not_raised() {
        for mode in [ErrorMode::Strict, ErrorMode::Lenient] {
            let invoker = Arc::new(ScriptedInvoker::replying("not valid json"));
            let response = pipeline(&invoker, mode).run(upload()).await.unwrap();

            assert_eq!(response.raw_response.as_deref(), Some("not valid json"));
            assert_eq!(
                response.outcome,
                Outcome::DecodeError {
                    message: "Error decoding the JSON response.".into()
                }
            );
        }
    }

    #[actix_web::test]
    async fn missing_probability_renders_placeholder() {
        let invoker = Arc::new(ScriptedInvoker::replying(r#"{"predicted_label": "NORMAL"}"#));
        let response = pipeline(&invoker, ErrorMode::Strict).run(upload()).await.unwrap();

        assert_eq!(
            response.outcome,
            Outcome::Prediction {
                label: "NORMAL".into(),
                confidence: "N/A".into(),
                probability: None,
            }
        );
    }

    #[actix_web::test]
    async fn lenient_mode_renders_invocation_failure() {
        let invoker = Arc::new(ScriptedInvoker::failing("could not connect to endpoint"));
        let response = pipeline(&invoker, ErrorMode::Lenient).run(upload()).await.unwrap();

        assert!(response.raw_response.is_none());
        assert_eq!(
            response.outcome,
            Outcome::InvocationError {
                message: "An error occurred: SageMaker error: could not connect to endpoint".into()
            }
        );
    }

    #[actix_web::test]
    async fn strict_mode_propagates_invocation_failure() {
        let invoker = Arc::new(ScriptedInvoker::failing("access denied"));
        let err = pipeline(&invoker, ErrorMode::Strict).run(upload()).await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Invocation(InvocationError::Service(ref msg)) if msg == "access denied"
        ));
    }

    #[actix_web::test]
    async fn non_utf8_reply_follows_error_mode() {
        let invoker = Arc::new(ScriptedInvoker::replying(vec![0xff, 0xfe]));
        let err = pipeline(&invoker, ErrorMode::Strict).run(upload()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Invocation(InvocationError::InvalidUtf8(_))));

        let response = pipeline(&invoker, ErrorMode::Lenient).run(upload()).await.unwrap();
        assert_eq!(response.outcome.kind(), "invocation_error");
    }

    #[actix_web::test]
    async fn undecodable_upload_never_reaches_the_endpoint() {
        let invoker = Arc::new(ScriptedInvoker::replying("{}"));
        let bad = UploadedImage::new("broken.jpg", b"not an image".to_vec());

        for mode in [ErrorMode::Strict, ErrorMode::Lenient] {
            let err = pipeline(&invoker, mode).run(bad.clone()).await.unwrap_err();
            assert!(matches!(err, PipelineError::Decode(_)));
        }
        assert!(invoker.payloads().is_empty());
    }

    fn listing(dir: &Path) -> BTreeSet<PathBuf> {
        std::fs::read_dir(dir)
            .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn run_writes_nothing_to_disk() {
        let cwd = std::env::current_dir().unwrap();
        let tmp = std::env::temp_dir();
        let cwd_before = listing(&cwd);
        let tmp_before = listing(&tmp);

        let invoker = Arc::new(ScriptedInvoker::replying(
            r#"{"predicted_label": "PNEUMONIA", "probability": 0.87}"#,
        ));
        for mode in [ErrorMode::Strict, ErrorMode::Lenient] {
            pipeline(&invoker, mode).run(upload()).await.unwrap();
        }

        assert_eq!(listing(&cwd), cwd_before);
        assert_eq!(listing(&tmp), tmp_before);

        // intermediate data lives in owned memory buffers
        let normalized = preprocess::normalize(&sample_jpeg(64, 48)).unwrap();
        let jpeg: Vec<u8> = normalized.jpeg;
        assert!(!jpeg.is_empty());
        let text: String = ResponseText::capture(OneShotBody::new(b"{}".to_vec()))
            .unwrap()
            .into_string();
        assert_eq!(text, "{}");
    }
}
