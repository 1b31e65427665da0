use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use provadmin_api::{ApiCall, GatewayError, GatewayErrorKind, ProviderGateway};
use serde_json::{Value, json};

/// In-memory gateway that records every call and answers from a script.
#[derive(Default)]
pub(crate) struct RecordingGateway {
    calls: Mutex<Vec<ApiCall>>,
    responses: Mutex<HashMap<&'static str, Result<Value, GatewayError>>>,
}

impl RecordingGateway {
    pub(crate) fn with_providers(providers: Value) -> Self {
        let gateway = Self::default();
        gateway.respond("list providers", Ok(providers));
        gateway
    }

    pub(crate) fn respond(&self, action: &'static str, response: Result<Value, GatewayError>) {
        self.responses.lock().expect("responses lock").insert(action, response);
    }

    pub(crate) fn fail(&self, action: &'static str, kind: GatewayErrorKind) {
        self.respond(action, Err(GatewayError::new(kind, "scripted failure")));
    }

    pub(crate) fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl ProviderGateway for RecordingGateway {
    async fn send(&self, call: &ApiCall) -> Result<Value, GatewayError> {
        self.calls.lock().expect("calls lock").push(call.clone());
        let scripted = self.responses.lock().expect("responses lock").get(call.label()).cloned();
        scripted.unwrap_or_else(|| match call {
            ApiCall::ListProviders | ApiCall::ListPayments { .. } => Ok(json!([])),
            _ => Ok(Value::Null),
        })
    }
}
