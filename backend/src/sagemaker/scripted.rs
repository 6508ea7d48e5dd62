use async_trait::async_trait;
use std::sync::Mutex;

use super::endpoint_service::EndpointInvoker;
use crate::error::InvocationError;
use crate::inference::response::OneShotBody;

/// In-memory endpoint that replays a fixed reply and records every payload.
pub struct ScriptedInvoker {
    reply: Result<Vec<u8>, String>,
    payloads: Mutex<Vec<Vec<u8>>>,
}

impl ScriptedInvoker {
    pub fn replying(body: impl Into<Vec<u8>>) -> Self {
        Self {
            reply: Ok(body.into()),
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub fn payloads(&self) -> Vec<Vec<u8>> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl EndpointInvoker for ScriptedInvoker {
    fn endpoint_name(&self) -> &str {
        "scripted-endpoint"
    }

    async fn invoke(&self, payload: Vec<u8>) -> Result<OneShotBody, InvocationError> {
        self.payloads.lock().unwrap().push(payload);
        match &self.reply {
            Ok(body) => Ok(OneShotBody::new(body.clone())),
            Err(message) => Err(InvocationError::Service(message.clone())),
        }
    }
}
