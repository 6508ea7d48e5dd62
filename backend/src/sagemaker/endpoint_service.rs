use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sagemakerruntime::Client;
use aws_sdk_sagemakerruntime::error::DisplayErrorContext;
use aws_sdk_sagemakerruntime::primitives::Blob;

use crate::config::{AwsSettings, EndpointConfig};
use crate::error::InvocationError;
use crate::inference::response::OneShotBody;

/// Sends one encoded image to a hosted model and hands back its raw reply.
#[async_trait]
pub trait EndpointInvoker: Send + Sync {
    fn endpoint_name(&self) -> &str;

    async fn invoke(&self, payload: Vec<u8>) -> Result<OneShotBody, InvocationError>;
}

#[derive(Clone)]
pub struct SageMakerService {
    client: Client,
    endpoint: EndpointConfig,
}

impl SageMakerService {
    pub fn new(client: Client, endpoint: EndpointConfig) -> Self {
        Self { client, endpoint }
    }
}

/// Builds the runtime client once per process from the startup settings.
pub async fn load_client(settings: &AwsSettings) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()));

    match settings.static_credentials() {
        Some(credentials) => {
            log::info!("Using AWS credentials from environment");
            loader = loader.credentials_provider(credentials);
        }
        None => log::info!("Using default AWS credential provider chain"),
    }

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}

#[async_trait]
impl EndpointInvoker for SageMakerService {
    fn endpoint_name(&self) -> &str {
        self.endpoint.name
    }

    async fn invoke(&self, payload: Vec<u8>) -> Result<OneShotBody, InvocationError> {
        log::debug!(
            "Invoking endpoint {} with {} bytes of {}",
            self.endpoint.name,
            payload.len(),
            self.endpoint.content_type
        );

        let output = self
            .client
            .invoke_endpoint()
            .endpoint_name(self.endpoint.name)
            .content_type(self.endpoint.content_type)
            .accept(self.endpoint.accept)
            .body(Blob::new(payload))
            .send()
            .await
            .map_err(|e| InvocationError::Service(DisplayErrorContext(&e).to_string()))?;

        if let Some(variant) = output.invoked_production_variant() {
            log::debug!("Served by production variant {}", variant);
        }

        let body = output.body.map(Blob::into_inner).unwrap_or_default();
        Ok(OneShotBody::new(body))
    }
}
