//! Request catalogue for the admin backend.
//!
//! Each dashboard action maps onto exactly one [`ApiCall`]; the call knows its
//! HTTP method, API-relative path and optional JSON body.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use provadmin_types::ChargePlan;
use reqwest::Method;
use serde_json::{Value, json};

pub const ADMIN_PROVIDERS_PATH: &str = "/api/admin/providers";
pub const ADMIN_PAYMENTS_PATH: &str = "/api/admin/payments";
/// Reason sent when blocking without an explicit one.
pub const DEFAULT_BLOCK_REASON: &str = "Blocked by administrator";

/// Characters left untouched in path segments (RFC 3986 unreserved set).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ListProviders,
    CreateProvider { body: Value },
    UpdateProvider { id: String, body: Value },
    DeleteProvider { id: String },
    BlockProvider { id: String, reason: String },
    UnblockProvider { id: String },
    ListPayments { provider_id: String },
    /// Issue a batch of monthly charges for a provider.
    GenerateFinancial { provider_id: String, plan: ChargePlan },
    ConfirmPayment { id: String },
    CancelPayment { id: String },
}

impl ApiCall {
    pub fn method(&self) -> Method {
        match self {
            Self::ListProviders | Self::ListPayments { .. } => Method::GET,
            Self::CreateProvider { .. }
            | Self::BlockProvider { .. }
            | Self::UnblockProvider { .. }
            | Self::GenerateFinancial { .. }
            | Self::ConfirmPayment { .. }
            | Self::CancelPayment { .. } => Method::POST,
            Self::UpdateProvider { .. } => Method::PUT,
            Self::DeleteProvider { .. } => Method::DELETE,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::ListProviders | Self::CreateProvider { .. } => ADMIN_PROVIDERS_PATH.to_string(),
            Self::UpdateProvider { id, .. } | Self::DeleteProvider { id } => {
                format!("{ADMIN_PROVIDERS_PATH}/{}", encode_segment(id))
            }
            Self::BlockProvider { id, .. } => format!("{ADMIN_PROVIDERS_PATH}/{}/block", encode_segment(id)),
            Self::UnblockProvider { id } => format!("{ADMIN_PROVIDERS_PATH}/{}/unblock", encode_segment(id)),
            Self::ListPayments { provider_id } => {
                format!("{ADMIN_PROVIDERS_PATH}/{}/payments", encode_segment(provider_id))
            }
            Self::GenerateFinancial { provider_id, .. } => {
                format!("{ADMIN_PROVIDERS_PATH}/{}/generate-financial", encode_segment(provider_id))
            }
            Self::ConfirmPayment { id } => format!("{ADMIN_PAYMENTS_PATH}/{}/confirm", encode_segment(id)),
            Self::CancelPayment { id } => format!("{ADMIN_PAYMENTS_PATH}/{}/cancel", encode_segment(id)),
        }
    }

    pub fn body(&self) -> Option<Value> {
        match self {
            Self::CreateProvider { body } | Self::UpdateProvider { body, .. } => Some(body.clone()),
            Self::BlockProvider { reason, .. } => {
                let reason = if reason.trim().is_empty() {
                    DEFAULT_BLOCK_REASON
                } else {
                    reason.as_str()
                };
                Some(json!({ "reason": reason }))
            }
            Self::GenerateFinancial { plan, .. } => serde_json::to_value(plan).ok(),
            _ => None,
        }
    }

    /// Short action name used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ListProviders => "list providers",
            Self::CreateProvider { .. } => "create provider",
            Self::UpdateProvider { .. } => "update provider",
            Self::DeleteProvider { .. } => "delete provider",
            Self::BlockProvider { .. } => "block provider",
            Self::UnblockProvider { .. } => "unblock provider",
            Self::ListPayments { .. } => "list payments",
            Self::GenerateFinancial { .. } => "generate payments",
            Self::ConfirmPayment { .. } => "confirm payment",
            Self::CancelPayment { .. } => "cancel payment",
        }
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use provadmin_types::ChargeKind;

    #[test]
    fn paths_and_methods() {
        let update = ApiCall::UpdateProvider {
            id: "p-1".into(),
            body: json!({}),
        };
        assert_eq!(update.method(), Method::PUT);
        assert_eq!(update.path(), "/api/admin/providers/p-1");

        let payments = ApiCall::ListPayments {
            provider_id: "p-1".into(),
        };
        assert_eq!(payments.method(), Method::GET);
        assert_eq!(payments.path(), "/api/admin/providers/p-1/payments");

        let confirm = ApiCall::ConfirmPayment { id: "pay-7".into() };
        assert_eq!(confirm.method(), Method::POST);
        assert_eq!(confirm.path(), "/api/admin/payments/pay-7/confirm");
        assert_eq!(confirm.body(), None);
    }

    #[test]
    fn generate_financial_posts_the_plan() {
        let generate = ApiCall::GenerateFinancial {
            provider_id: "p-1".into(),
            plan: ChargePlan::new(ChargeKind::BankSlip, 199.0, 3),
        };
        assert_eq!(generate.method(), Method::POST);
        assert_eq!(generate.path(), "/api/admin/providers/p-1/generate-financial");
        assert_eq!(
            generate.body(),
            Some(json!({"type": "boleto", "amount": 199.0, "installments": 3}))
        );
    }

    #[test]
    fn ids_are_percent_encoded() {
        let delete = ApiCall::DeleteProvider { id: "a/b c".into() };
        assert_eq!(delete.path(), "/api/admin/providers/a%2Fb%20c");
    }

    #[test]
    fn block_uses_default_reason_when_blank() {
        let block = ApiCall::BlockProvider {
            id: "p-1".into(),
            reason: " ".into(),
        };
        assert_eq!(block.path(), "/api/admin/providers/p-1/block");
        assert_eq!(block.body(), Some(json!({ "reason": DEFAULT_BLOCK_REASON })));

        let explicit = ApiCall::BlockProvider {
            id: "p-1".into(),
            reason: "Overdue invoices".into(),
        };
        assert_eq!(explicit.body(), Some(json!({ "reason": "Overdue invoices" })));
    }
}
