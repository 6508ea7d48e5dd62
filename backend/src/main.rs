mod config;
mod error;
mod inference;
mod routes;
mod sagemaker;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use config::{AppConfig, SAGEMAKER_ENDPOINT};
use inference::pipeline::InferencePipeline;
use routes::configure_routes;
use sagemaker::endpoint_service::{load_client, SageMakerService};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                e.to_string(),
            ));
        }
    };
    log::info!("Loaded configuration: {:?}", config);

    let client = load_client(&config.aws).await;
    let service = SageMakerService::new(client, SAGEMAKER_ENDPOINT);
    let pipeline = InferencePipeline::new(Arc::new(service), config.error_mode);

    log::info!(
        "Forwarding uploads to endpoint {} in {} ({} error mode)",
        SAGEMAKER_ENDPOINT.name,
        config.aws.region,
        config.error_mode
    );

    let bind_address = format!("0.0.0.0:{}", config.port);
    let frontend_dir = config.frontend_dir.clone();
    let config = web::Data::new(config);
    let pipeline = web::Data::new(pipeline);

    log::info!("Serving frontend from {}", frontend_dir);
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(pipeline.clone())
            .app_data(config.clone())
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
