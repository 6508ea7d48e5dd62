use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{web, Error, HttpResponse};
use futures::TryStreamExt;
use log::info;
use serde_json::json;

use crate::config::AppConfig;
use crate::error::PipelineError;
use crate::inference::pipeline::InferencePipeline;
use crate::inference::upload::UploadedImage;

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    configure_api(cfg);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/predict").route(web::post().to(handle_predict)))
        .service(web::resource("/api/health").route(web::get().to(health)));
}

async fn handle_predict(
    pipeline: web::Data<InferencePipeline>,
    config: web::Data<AppConfig>,
    payload: Multipart,
) -> Result<HttpResponse, Error> {
    let upload = read_upload(payload, config.max_upload_bytes).await?;
    let response = pipeline.run(upload).await?;
    Ok(HttpResponse::Ok().json(response))
}

async fn health(pipeline: web::Data<InferencePipeline>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "endpoint": pipeline.endpoint_name(),
        "error_mode": pipeline.error_mode(),
    }))
}

/// Collects the single `.jpg` file of a multipart form into memory.
async fn read_upload(mut payload: Multipart, max_bytes: usize) -> Result<UploadedImage, Error> {
    let mut upload: Option<UploadedImage> = None;

    while let Some(mut field) = payload.try_next().await? {
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned);

        let Some(file_name) = file_name else {
            // plain form value
            while field.try_next().await?.is_some() {}
            continue;
        };

        if upload.is_some() {
            return Err(PipelineError::TooManyFiles.into());
        }
        if !shared::is_accepted_file_name(&file_name) {
            return Err(PipelineError::UnsupportedFileType(file_name).into());
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if data.len() + chunk.len() > max_bytes {
                return Err(PipelineError::FileTooLarge { limit: max_bytes }.into());
            }
            data.extend_from_slice(&chunk);
        }
        info!("Upload {} received ({} bytes)", file_name, data.len());
        upload = Some(UploadedImage::new(file_name, data));
    }

    upload.ok_or_else(|| PipelineError::MissingUpload.into())
}
