use async_trait::async_trait;
use provadmin_types::{ProviderPayment, ProviderRecord};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{ApiCall, GatewayError, ProvadminClient};

/// Persistence boundary between the dashboard engine and the backend.
///
/// Implementors only provide [`ProviderGateway::send`]; the typed helpers map
/// one dashboard action onto one call and decode the response.
#[async_trait]
pub trait ProviderGateway: Send + Sync {
    /// Issue a single call. Any non-2xx response is an error. Empty bodies decode as `null`.
    async fn send(&self, call: &ApiCall) -> Result<Value, GatewayError>;

    async fn list_providers(&self) -> Result<Vec<ProviderRecord>, GatewayError> {
        decode(self.send(&ApiCall::ListProviders).await?)
    }

    async fn create_provider(&self, body: Value) -> Result<(), GatewayError> {
        self.send(&ApiCall::CreateProvider { body }).await.map(drop)
    }

    async fn update_provider(&self, id: &str, body: Value) -> Result<(), GatewayError> {
        self.send(&ApiCall::UpdateProvider { id: id.to_string(), body })
            .await
            .map(drop)
    }

    async fn delete_provider(&self, id: &str) -> Result<(), GatewayError> {
        self.send(&ApiCall::DeleteProvider { id: id.to_string() }).await.map(drop)
    }

    async fn block_provider(&self, id: &str, reason: &str) -> Result<(), GatewayError> {
        self.send(&ApiCall::BlockProvider {
            id: id.to_string(),
            reason: reason.to_string(),
        })
        .await
        .map(drop)
    }

    async fn unblock_provider(&self, id: &str) -> Result<(), GatewayError> {
        self.send(&ApiCall::UnblockProvider { id: id.to_string() }).await.map(drop)
    }

    async fn list_payments(&self, provider_id: &str) -> Result<Vec<ProviderPayment>, GatewayError> {
        decode(
            self.send(&ApiCall::ListPayments {
                provider_id: provider_id.to_string(),
            })
            .await?,
        )
    }

    async fn confirm_payment(&self, id: &str) -> Result<(), GatewayError> {
        self.send(&ApiCall::ConfirmPayment { id: id.to_string() }).await.map(drop)
    }

    async fn cancel_payment(&self, id: &str) -> Result<(), GatewayError> {
        self.send(&ApiCall::CancelPayment { id: id.to_string() }).await.map(drop)
    }
}

/// Decodes a collection response. A `null` body decodes as an empty list.
fn decode<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, GatewayError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value).map_err(GatewayError::decode)
}

/// [`ProviderGateway`] backed by the admin REST API.
#[derive(Debug, Clone)]
pub struct HttpProviderGateway {
    client: ProvadminClient,
}

impl HttpProviderGateway {
    pub fn new(client: ProvadminClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ProvadminClient {
        &self.client
    }

    /// Build the request for `call` without sending it.
    pub fn build(&self, call: &ApiCall) -> RequestBuilder {
        let builder = self.client.request(call.method(), &call.path());
        match call.body() {
            Some(body) => builder.json(&body),
            None => builder,
        }
    }
}

#[async_trait]
impl ProviderGateway for HttpProviderGateway {
    async fn send(&self, call: &ApiCall) -> Result<Value, GatewayError> {
        debug!(action = call.label(), method = %call.method(), path = %call.path(), "sending request");

        let response = self.build(call).send().await.map_err(|error| {
            warn!(action = call.label(), error = %error, "request failed before a response");
            GatewayError::network(error)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(GatewayError::network)?;

        if !status.is_success() {
            let error = GatewayError::from_response(status, &text);
            warn!(action = call.label(), status = status.as_u16(), kind = error.kind.as_str(), "request rejected");
            return Err(error);
        }

        debug!(action = call.label(), status = status.as_u16(), "request succeeded");
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(GatewayError::decode)
    }
}
