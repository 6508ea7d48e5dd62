use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use shared::{ErrorResponse, InferenceResponse};

/// Posts one image to the backend and returns the rendered outcome.
pub async fn request_prediction(file: &GlooFile) -> Result<InferenceResponse, String> {
    let form_data =
        web_sys::FormData::new().map_err(|_| "Failed to build upload form.".to_string())?;
    form_data
        .append_with_blob("image", file.as_ref())
        .map_err(|_| "Failed to attach image to upload form.".to_string())?;

    let response = Request::post("/api/predict")
        .body(form_data)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.ok() {
        response
            .json::<InferenceResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        Err(format!("Server error: {} - {}", status, message))
    }
}
