//! Provider administration API client.
//!
//! This crate provides a lightweight client for the admin REST backend and the
//! persistence gateway the dashboard talks to. It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Carrying the admin bearer token as an explicit [`Session`]
//! - Validating the backend origin for safety
//! - Mapping every dashboard action onto exactly one request ([`ApiCall`])
//! - Classifying failures into a [`GatewayErrorKind`]
//!
//! The primary entry points are [`ProvadminClient`] and
//! [`HttpProviderGateway`], which implements [`ProviderGateway`].
//!
//! # Example
//!
//! ```ignore
//! use provadmin_api::{HttpProviderGateway, ProvadminClient, ProviderGateway, Session};
//!
//! async fn list() -> anyhow::Result<()> {
//!     let client = ProvadminClient::new("http://localhost:8001", Session::new(Some("token".into())))?;
//!     let gateway = HttpProviderGateway::new(client);
//!     let providers = gateway.list_providers().await?;
//!     println!("{} providers", providers.len());
//!     Ok(())
//! }
//! ```

mod endpoint;
mod error;
mod gateway;
mod session;

pub use endpoint::{ADMIN_PAYMENTS_PATH, ADMIN_PROVIDERS_PATH, ApiCall, DEFAULT_BLOCK_REASON};
pub use error::{GatewayError, GatewayErrorKind};
pub use gateway::{HttpProviderGateway, ProviderGateway};
pub use session::Session;

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, header};
use tracing::debug;

#[derive(Debug, Clone)]
/// Thin wrapper around a configured `reqwest::Client` for the admin backend.
///
/// The client pre-configures default headers (including the session's bearer
/// token) and builds requests against a validated base URL.
pub struct ProvadminClient {
    pub base_url: String,
    pub http: Client,
    pub user_agent: String,
    authorization: Option<header::HeaderValue>,
}

impl ProvadminClient {
    /// Construct a client for `base_url` authenticated by `session`.
    ///
    /// Non-localhost hosts must use HTTPS. A session without a token produces
    /// requests without an `Authorization` header; the backend rejects them.
    /// The header is attached per request so built requests can be inspected.
    pub fn new(base_url: &str, session: Session) -> Result<Self> {
        provadmin_util::preferences::validate_api_base(base_url)?;

        let authorization = match session.authorization_header() {
            Some(raw) => {
                let mut value =
                    header::HeaderValue::from_str(&raw).context("admin token is not a valid header value")?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("build http client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            user_agent: format!("provadmin/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
            authorization,
        })
    }

    /// Build a `reqwest::RequestBuilder` for a method and API-relative path.
    ///
    /// The resulting request carries the User-Agent and the session's bearer
    /// token, and is resolved relative to `self.base_url`.
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "building request");

        let builder = self
            .http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent);
        match &self.authorization {
            Some(value) => builder.header(header::AUTHORIZATION, value.clone()),
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_plain_http_for_remote_hosts() {
        let error = ProvadminClient::new("http://admin.example.com", Session::anonymous()).unwrap_err();
        assert!(error.to_string().contains("https"));
    }

    #[test]
    fn trims_trailing_slash_from_base() {
        let client = ProvadminClient::new("http://localhost:8001/", Session::anonymous()).expect("client");
        assert_eq!(client.base_url, "http://localhost:8001");
    }

    #[test]
    fn request_carries_bearer_token_and_user_agent() {
        let client = ProvadminClient::new("http://localhost:8001", Session::new(Some("tok-123".into()))).expect("client");
        let request = client
            .request(reqwest::Method::GET, "/api/admin/providers")
            .build()
            .expect("request");

        assert_eq!(request.url().as_str(), "http://localhost:8001/api/admin/providers");
        assert!(request.headers().get(header::USER_AGENT).is_some());
        assert_eq!(
            request.headers().get(header::AUTHORIZATION).and_then(|value| value.to_str().ok()),
            Some("Bearer tok-123")
        );
    }

    #[tokio::test]
    async fn https_requests_reach_the_transport() {
        let client = ProvadminClient::new("https://localhost:1", Session::anonymous()).expect("client");
        let error = client
            .request(reqwest::Method::GET, "/api/admin/providers")
            .send()
            .await
            .expect_err("nothing listens on port 1");

        let mut source: Option<&dyn std::error::Error> = Some(&error);
        while let Some(current) = source {
            assert!(
                !current.to_string().contains("scheme is not http"),
                "https is not supported by the http client: {current}"
            );
            source = current.source();
        }
    }
}
