use reqwest::StatusCode;
use thiserror::Error;

/// Diagnostic classification of a failed gateway call.
///
/// The dashboard only ever shows a generic "operation failed" message; the
/// kind is logged so operators can tell an expired token from an outage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayErrorKind {
    /// The request never produced a response (DNS, connect, timeout).
    Network,
    /// 401 or 403.
    Auth,
    /// 404.
    NotFound,
    /// Any other 4xx.
    Validation,
    /// 5xx and anything else outside the 2xx range.
    Server,
    /// A 2xx response whose body could not be decoded.
    Decode,
}

impl GatewayErrorKind {
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 | 403 => Self::Auth,
            404 => Self::NotFound,
            400..=499 => Self::Validation,
            _ => Self::Server,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Auth => "auth",
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::Server => "server",
            Self::Decode => "decode",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind:?}: {message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Builds an error from a non-success response, keeping the backend's `detail` when present.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("detail").and_then(|detail| detail.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());
        let message = if detail.is_empty() {
            format!("HTTP {}", status.as_u16())
        } else {
            format!("HTTP {}: {}", status.as_u16(), detail)
        };
        Self::new(GatewayErrorKind::from_status(status), message)
    }

    pub(crate) fn network(error: reqwest::Error) -> Self {
        Self::new(GatewayErrorKind::Network, error.to_string())
    }

    pub fn decode(error: impl std::fmt::Display) -> Self {
        Self::new(GatewayErrorKind::Decode, error.to_string())
    }
}
