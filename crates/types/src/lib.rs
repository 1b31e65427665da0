//! Shared data types for the provider administration client.
//!
//! The crate is deliberately free of I/O. It defines:
//!
//! - [`ProviderRecord`]: the server-owned provider entity as the client caches it
//! - [`FormDraft`] and [`DraftField`]: the string-valued staging copy edited in forms
//! - [`FormTab`]: the grouping of draft fields into the six edit tabs
//! - [`ProviderPayment`] and [`PaymentFilter`]: billing history shown on the billing tab
//! - [`ChargePlan`]: a batch of monthly charges to issue for a provider
//! - [`Notification`] and [`Severity`]: transient user-facing messages

mod charge;
mod draft;
mod notification;
mod payment;
mod provider;
mod schema;
mod wire;

pub use charge::{ChargeKind, ChargePlan, MAX_INSTALLMENTS};
pub use draft::{DEFAULT_PLAN_VALUE, FormDraft};
pub use notification::{Notification, Severity};
pub use payment::{PaymentFilter, PaymentStatus, ProviderPayment};
pub use provider::{PaymentMethod, PlanType, ProviderRecord};
pub use schema::{DraftField, FieldKind, FormTab};

/// Error returned when a textual identifier does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVariantError {
    pub kind: &'static str,
    pub value: String,
}

impl std::fmt::Display for ParseVariantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseVariantError {}
