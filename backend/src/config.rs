use aws_credential_types::Credentials;
use shared::ErrorMode;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_PORT: u16 = 8081;
const DEFAULT_MAX_UPLOAD_MB: usize = 200;

/// Fixed contract with the deployed model. Not configurable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointConfig {
    pub name: &'static str,
    pub content_type: &'static str,
    pub accept: &'static str,
}

pub const SAGEMAKER_ENDPOINT: EndpointConfig = EndpointConfig {
    name: "canvas-new-deployment-08-18-2024-5-56-PM",
    content_type: "image/jpeg",
    accept: "application/json",
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone)]
pub struct AwsSettings {
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl AwsSettings {
    /// Static credentials when both halves are present, otherwise the default provider chain applies.
    pub fn static_credentials(&self) -> Option<Credentials> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) => Some(Credentials::new(
                id.clone(),
                secret.clone(),
                None,
                None,
                "environment",
            )),
            _ => None,
        }
    }
}

impl fmt::Debug for AwsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsSettings")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "***"),
            )
            .finish()
    }
}

/// Process-wide settings, read once in `main` and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub aws: AwsSettings,
    pub error_mode: ErrorMode,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub frontend_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let aws = AwsSettings {
            region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            access_key_id: get("AWS_ACCESS_KEY_ID"),
            secret_access_key: get("AWS_SECRET_ACCESS_KEY"),
        };

        let error_mode = match get("INFERENCE_ERROR_MODE") {
            Some(raw) => ErrorMode::from_str(raw.trim()).map_err(|_| ConfigError::InvalidValue {
                key: "INFERENCE_ERROR_MODE",
                value: raw.clone(),
                reason: "expected \"strict\" or \"lenient\"".to_string(),
            })?,
            None => ErrorMode::default(),
        };

        let port = parse_number(get("PORT"), "PORT", DEFAULT_PORT)?;
        let max_upload_mb = parse_number(get("MAX_UPLOAD_MB"), "MAX_UPLOAD_MB", DEFAULT_MAX_UPLOAD_MB)?;
        let max_upload_bytes = max_upload_mb.checked_mul(1024 * 1024).ok_or_else(|| {
            ConfigError::InvalidValue {
                key: "MAX_UPLOAD_MB",
                value: max_upload_mb.to_string(),
                reason: "too large to express in bytes".to_string(),
            }
        })?;

        let frontend_dir = get("FRONTEND_DIR").unwrap_or_else(|| match get("CARGO_MANIFEST_DIR") {
            Some(manifest_dir) => format!("{}/../frontend/dist", manifest_dir),
            None => "/usr/src/app/frontend/dist".to_string(),
        });

        Ok(Self {
            aws,
            error_mode,
            port,
            max_upload_bytes,
            frontend_dir,
        })
    }
}

fn parse_number<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
