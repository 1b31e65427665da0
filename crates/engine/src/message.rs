//! Messages consumed by the dashboard and effects it asks the shell to run.

use provadmin_api::{ApiCall, GatewayError};
use provadmin_types::{ChargePlan, DraftField, FormTab, PaymentFilter, ProviderPayment, ProviderRecord};

/// Inputs to [`crate::Dashboard::update`]: user intents and completed requests.
#[derive(Debug, Clone)]
pub enum Msg {
    /// Fetch the provider collection.
    LoadRequested,
    SearchChanged(String),
    Select(String),
    ClearSelection,
    MoveSelection(isize),
    NewRequested,
    /// Start editing the cached record with this id.
    EditRequested(String),
    FieldChanged(DraftField, String),
    /// Step a choice field to its neighbouring value.
    FieldCycled(DraftField, isize),
    TabChanged(FormTab),
    /// Move the form cursor within the active tab.
    FieldFocusMoved(isize),
    TogglePasswordVisibility,
    SaveRequested,
    CancelRequested,
    DeleteRequested(String),
    BlockRequested { id: String, reason: Option<String> },
    UnblockRequested(String),
    /// Block an active provider or unblock a blocked one.
    BlockToggleRequested(String),
    PaymentFilterChanged(PaymentFilter),
    PaymentsRefreshRequested,
    /// Number of monthly charges the next batch will issue.
    InstallmentsChanged(u32),
    /// Issue charges for the provider being updated, from its drafted plan.
    GeneratePaymentsRequested,
    ConfirmPaymentRequested(String),
    CancelPaymentRequested(String),
    /// The user accepted a confirmation prompt.
    Confirmed(PendingAction),
    /// The user rejected a confirmation prompt.
    Declined(PendingAction),
    Completed(Box<Completion>),
}

/// Side effects requested by the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send one gateway call; its outcome must come back as [`Msg::Completed`].
    Dispatch(Ticket),
    /// Ask the user a yes/no question; answer with [`Msg::Confirmed`] or [`Msg::Declined`].
    Confirm(Confirmation),
}

/// A gateway call stamped with the generation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub call: ApiCall,
    pub generation: u64,
}

/// Destructive action waiting on a yes/no answer.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    DeleteProvider { id: String },
    ConfirmPayment { id: String },
    CancelPayment { id: String },
    GeneratePayments { provider_id: String, plan: ChargePlan },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub prompt: String,
    pub action: PendingAction,
}

impl PendingAction {
    pub fn prompt(&self) -> String {
        match self {
            Self::DeleteProvider { .. } => "Are you sure you want to delete this provider?".to_string(),
            Self::ConfirmPayment { .. } => "Confirm receipt of this payment?".to_string(),
            Self::CancelPayment { .. } => "Are you sure you want to cancel this payment?".to_string(),
            Self::GeneratePayments { plan, .. } => format!(
                "Generate {} {}(s) with monthly due dates? {}",
                plan.installments,
                plan.kind.label(),
                plan.summary()
            ),
        }
    }

    pub(crate) fn into_call(self) -> ApiCall {
        match self {
            Self::DeleteProvider { id } => ApiCall::DeleteProvider { id },
            Self::ConfirmPayment { id } => ApiCall::ConfirmPayment { id },
            Self::CancelPayment { id } => ApiCall::CancelPayment { id },
            Self::GeneratePayments { provider_id, plan } => ApiCall::GenerateFinancial { provider_id, plan },
        }
    }
}

/// Decoded payload of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Providers(Vec<ProviderRecord>),
    Payments(Vec<ProviderPayment>),
    Done,
}

#[derive(Debug, Clone)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Result<Response, GatewayError>,
}

impl Completion {
    pub fn into_msg(self) -> Msg {
        Msg::Completed(Box::new(self))
    }
}
