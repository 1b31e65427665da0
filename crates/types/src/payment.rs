use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ParseVariantError, wire};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Pending,
    Waiting,
    Paid,
    Cancelled,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Waiting => "waiting",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Only pending entries can be marked as received.
    pub fn is_confirmable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::Pending | Self::Waiting)
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for PaymentStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "waiting" => Self::Waiting,
            "paid" => Self::Paid,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Other(raw),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A billing entry attached to a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderPayment {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default, deserialize_with = "wire::from_text")]
    pub status: PaymentStatus,
    #[serde(default, deserialize_with = "wire::amount")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_string")]
    pub pdf: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_string")]
    pub qr_code: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_string")]
    pub barcode: Option<String>,
}

impl ProviderPayment {
    /// Pending and past its due moment. Entries without a due date never become overdue.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == PaymentStatus::Pending && self.expires_at.is_some_and(|expires_at| expires_at < now)
    }

    /// Printable bank-slip document: the PDF when present, otherwise the payment link.
    pub fn document_link(&self) -> Option<&str> {
        self.pdf.as_deref().or(self.link.as_deref())
    }

    /// Code a payer can paste into a banking app: the PIX copy-paste code, else the slip barcode.
    pub fn payable_code(&self) -> Option<&str> {
        self.qr_code.as_deref().or(self.barcode.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentFilter {
    #[default]
    All,
    Paid,
    Open,
    Overdue,
}

impl PaymentFilter {
    pub const ALL: [PaymentFilter; 4] = [Self::All, Self::Paid, Self::Open, Self::Overdue];

    pub fn matches(&self, payment: &ProviderPayment, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Paid => payment.status == PaymentStatus::Paid,
            Self::Open => payment.status == PaymentStatus::Pending && !payment.is_overdue(now),
            Self::Overdue => payment.is_overdue(now),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Paid => "paid",
            Self::Open => "open",
            Self::Overdue => "overdue",
        }
    }

    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|filter| filter == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl FromStr for PaymentFilter {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseVariantError {
                kind: "payment filter",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for PaymentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).single().expect("valid instant")
    }

    fn payment(id: &str, status: &str, expires_at: Option<&str>) -> ProviderPayment {
        serde_json::from_value(json!({"id": id, "status": status, "expires_at": expires_at})).expect("decode payment")
    }

    #[test]
    fn filters_partition_pending_by_due_date() {
        let payments = [
            payment("paid", "paid", Some("2026-09-01T00:00:00Z")),
            payment("late", "pending", Some("2026-10-18T23:59:59Z")),
            payment("open", "pending", Some("2026-10-30")),
            payment("undated", "pending", None),
            payment("void", "cancelled", Some("2026-01-01")),
        ];
        let ids = |filter: PaymentFilter| {
            payments
                .iter()
                .filter(|entry| filter.matches(entry, now()))
                .map(|entry| entry.id.as_str())
                .collect::<Vec<_>>()
        };

        assert_eq!(ids(PaymentFilter::All).len(), 5);
        assert_eq!(ids(PaymentFilter::Paid), vec!["paid"]);
        assert_eq!(ids(PaymentFilter::Overdue), vec!["late"]);
        assert_eq!(ids(PaymentFilter::Open), vec!["open", "undated"]);
    }

    #[test]
    fn unknown_status_is_preserved() {
        let entry = payment("x", "refunded", None);
        assert_eq!(entry.status, PaymentStatus::Other("refunded".into()));
        assert_eq!(serde_json::to_value(&entry.status).expect("encode"), json!("refunded"));
    }

    #[test]
    fn document_link_prefers_pdf() {
        let mut entry = payment("x", "pending", None);
        assert_eq!(entry.document_link(), None);
        entry.link = Some("https://pay.example/x".into());
        assert_eq!(entry.document_link(), Some("https://pay.example/x"));
        entry.pdf = Some("https://pay.example/x.pdf".into());
        assert_eq!(entry.document_link(), Some("https://pay.example/x.pdf"));
    }

    #[test]
    fn only_pending_confirms_and_waiting_still_cancels() {
        let pending = payment("a", "pending", None);
        let waiting = payment("b", "waiting", None);
        let paid = payment("c", "paid", None);
        let void = payment("d", "canceled", None);

        assert_eq!(waiting.status, PaymentStatus::Waiting);
        assert!(pending.status.is_confirmable() && pending.status.is_cancellable());
        assert!(!waiting.status.is_confirmable() && waiting.status.is_cancellable());
        assert!(!paid.status.is_confirmable() && !paid.status.is_cancellable());
        assert!(!void.status.is_confirmable() && !void.status.is_cancellable());
    }

    #[test]
    fn payable_code_prefers_pix_over_barcode() {
        let entry: ProviderPayment = serde_json::from_value(json!({
            "id": "p-1",
            "status": "pending",
            "barcode": "34191.79001 01043.510047 91020.150008 1 99990000019900",
            "qr_code": "00020126580014br.gov.bcb.pix"
        }))
        .expect("decode payment");
        assert_eq!(entry.payable_code(), Some("00020126580014br.gov.bcb.pix"));

        let slip_only: ProviderPayment =
            serde_json::from_value(json!({"id": "p-2", "barcode": "34191.79001", "qr_code": ""})).expect("decode payment");
        assert_eq!(slip_only.qr_code, None);
        assert_eq!(slip_only.payable_code(), Some("34191.79001"));
    }

    #[test]
    fn filter_parses_and_cycles() {
        assert_eq!("Overdue".parse::<PaymentFilter>(), Ok(PaymentFilter::Overdue));
        assert_eq!(PaymentFilter::Overdue.next(), PaymentFilter::All);
        assert!("late".parse::<PaymentFilter>().is_err());
    }
}
