//! Gateway decorator for `--dry-run`.
//!
//! Reads still reach the backend so that follow-up steps (for example
//! populating an update draft) see real data. Every mutating call is printed
//! as JSON with secrets redacted and reported as an empty success.

use async_trait::async_trait;
use provadmin_api::{ApiCall, GatewayError, GatewayErrorKind, HttpProviderGateway, ProviderGateway};
use reqwest::Method;
use serde_json::{Map, Value, json};

pub struct DryRunGateway {
    inner: HttpProviderGateway,
}

impl DryRunGateway {
    pub fn new(inner: HttpProviderGateway) -> Self {
        Self { inner }
    }

    /// JSON description of the request `call` would send.
    pub fn describe(&self, call: &ApiCall) -> Result<Value, GatewayError> {
        let request = self
            .inner
            .build(call)
            .build()
            .map_err(|error| GatewayError::new(GatewayErrorKind::Validation, error.to_string()))?;

        let mut headers = Map::new();
        for (name, value) in request.headers() {
            let line = format!("{}: {}", name.as_str(), value.to_str().unwrap_or(""));
            let redacted = provadmin_util::redact_sensitive(&line);
            let shown = redacted.split_once(':').map(|(_, rest)| rest.trim()).unwrap_or("");
            headers.insert(name.as_str().to_string(), Value::String(shown.to_string()));
        }

        Ok(json!({
            "method": request.method().as_str(),
            "url": request.url().as_str(),
            "headers": headers,
            "body": call.body(),
        }))
    }
}

#[async_trait]
impl ProviderGateway for DryRunGateway {
    async fn send(&self, call: &ApiCall) -> Result<Value, GatewayError> {
        if call.method() == Method::GET {
            return self.inner.send(call).await;
        }
        let description = self.describe(call)?;
        let pretty = serde_json::to_string_pretty(&description).map_err(GatewayError::decode)?;
        println!("{pretty}");
        Ok(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provadmin_api::{ProvadminClient, Session};

    fn gateway() -> DryRunGateway {
        let client =
            ProvadminClient::new("http://localhost:8001", Session::new(Some("super-secret".into()))).expect("client");
        DryRunGateway::new(HttpProviderGateway::new(client))
    }

    #[test]
    fn description_redacts_authorization() {
        let description = gateway()
            .describe(&ApiCall::DeleteProvider { id: "p-1".into() })
            .expect("describe");
        assert_eq!(description["method"], "DELETE");
        assert_eq!(description["url"], "http://localhost:8001/api/admin/providers/p-1");
        assert_eq!(description["headers"]["authorization"], "<redacted>");
        assert!(description["body"].is_null());
    }

    #[tokio::test]
    async fn mutations_are_not_sent() {
        let result = gateway()
            .send(&ApiCall::BlockProvider {
                id: "p-1".into(),
                reason: String::new(),
            })
            .await
            .expect("dry run");
        assert!(result.is_null());
    }
}
