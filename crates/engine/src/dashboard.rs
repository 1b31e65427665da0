//! Provider dashboard state machine.
//!
//! [`Dashboard::update`] is pure with respect to I/O: it mutates in-memory
//! state and returns the [`Effect`]s the caller must run. Gateway outcomes
//! come back as [`Msg::Completed`] and are matched against the generation
//! that issued them, so a slow response can never overwrite newer state.

use std::collections::VecDeque;

use chrono::{DateTime, NaiveDate, Utc};
use provadmin_api::{ApiCall, GatewayError};
use provadmin_types::{FormTab, Notification, PaymentStatus, ProviderPayment};
use tracing::{debug, info, warn};

use crate::{Completion, Confirmation, DraftEditor, EditMode, Effect, Msg, PaymentsPanel, PendingAction, ProviderList, Response, Ticket};

/// Source of the current instant; injectable for tests.
pub type Clock = fn() -> DateTime<Utc>;

pub struct Dashboard {
    list: ProviderList,
    editor: DraftEditor,
    payments: PaymentsPanel,
    notifications: VecDeque<Notification>,
    in_flight: usize,
    clock: Clock,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("list", &self.list)
            .field("editor", &self.editor)
            .field("payments", &self.payments)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            list: ProviderList::default(),
            editor: DraftEditor::default(),
            payments: PaymentsPanel::default(),
            notifications: VecDeque::new(),
            in_flight: 0,
            clock,
        }
    }

    pub fn list(&self) -> &ProviderList {
        &self.list
    }

    pub fn editor(&self) -> &DraftEditor {
        &self.editor
    }

    pub fn mode(&self) -> &EditMode {
        self.editor.mode()
    }

    pub fn payments(&self) -> &PaymentsPanel {
        &self.payments
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Payments of the current provider that pass the active filter.
    pub fn visible_payments(&self) -> Vec<&ProviderPayment> {
        self.payments.visible(self.now())
    }

    pub fn selected_payment(&self) -> Option<&ProviderPayment> {
        self.payments.selected(self.now())
    }

    pub fn move_payment_cursor(&mut self, delta: isize) {
        let now = self.now();
        self.payments.move_cursor(delta, now);
    }

    /// Number of dispatched calls whose outcome has not come back yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::LoadRequested => vec![self.load_list()],
            Msg::SearchChanged(term) => {
                self.list.set_search(term);
                Vec::new()
            }
            Msg::Select(id) => {
                self.list.select(&id);
                self.sync_payments()
            }
            Msg::ClearSelection => {
                self.list.clear_selection();
                self.sync_payments()
            }
            Msg::MoveSelection(delta) => {
                self.list.move_selection(delta);
                self.sync_payments()
            }
            Msg::NewRequested => {
                let today = self.today();
                self.editor.start_new(today);
                self.list.clear_selection();
                self.sync_payments()
            }
            Msg::EditRequested(id) => self.start_edit(&id),
            Msg::FieldChanged(field, value) => {
                self.editor.set_field(field, value);
                Vec::new()
            }
            Msg::FieldCycled(field, step) => {
                self.editor.cycle_choice(field, step);
                Vec::new()
            }
            Msg::TabChanged(tab) => {
                if self.editor.mode().is_editing() {
                    self.editor.select_tab(tab);
                }
                self.sync_payments()
            }
            Msg::FieldFocusMoved(delta) => {
                self.editor.move_focus(delta);
                Vec::new()
            }
            Msg::TogglePasswordVisibility => {
                self.editor.toggle_password();
                Vec::new()
            }
            Msg::SaveRequested => self.save(),
            Msg::CancelRequested => {
                if self.editor.mode().is_editing() {
                    self.editor.close();
                    self.list.clear_selection();
                }
                self.sync_payments()
            }
            Msg::DeleteRequested(id) => vec![confirm(PendingAction::DeleteProvider { id })],
            Msg::BlockRequested { id, reason } => vec![self.dispatch(
                ApiCall::BlockProvider {
                    id,
                    reason: reason.unwrap_or_default(),
                },
                0,
            )],
            Msg::UnblockRequested(id) => vec![self.dispatch(ApiCall::UnblockProvider { id }, 0)],
            Msg::BlockToggleRequested(id) => match self.list.find(&id).map(|record| record.is_blocked) {
                Some(true) => self.update(Msg::UnblockRequested(id)),
                Some(false) => self.update(Msg::BlockRequested { id, reason: None }),
                None => {
                    self.notify(Notification::error("Provider not found"));
                    Vec::new()
                }
            },
            Msg::PaymentFilterChanged(filter) => {
                self.payments.set_filter(filter);
                Vec::new()
            }
            Msg::PaymentsRefreshRequested => self.payments_target().map(|id| self.load_payments(&id)).into_iter().collect(),
            Msg::InstallmentsChanged(installments) => {
                self.payments.set_installments(installments);
                Vec::new()
            }
            Msg::GeneratePaymentsRequested => self.generate_payments(),
            Msg::ConfirmPaymentRequested(id) => match self.payment_allows(&id, PaymentStatus::is_confirmable) {
                Some(true) => vec![confirm(PendingAction::ConfirmPayment { id })],
                Some(false) => {
                    self.notify(Notification::error("Only pending payments can be confirmed"));
                    Vec::new()
                }
                None => {
                    self.notify(Notification::error("Payment not found"));
                    Vec::new()
                }
            },
            Msg::CancelPaymentRequested(id) => match self.payment_allows(&id, PaymentStatus::is_cancellable) {
                Some(true) => vec![confirm(PendingAction::CancelPayment { id })],
                Some(false) => {
                    self.notify(Notification::error("Only pending or waiting payments can be cancelled"));
                    Vec::new()
                }
                None => {
                    self.notify(Notification::error("Payment not found"));
                    Vec::new()
                }
            },
            Msg::Confirmed(action) => vec![self.dispatch(action.into_call(), 0)],
            Msg::Declined(action) => {
                debug!(?action, "confirmation declined");
                Vec::new()
            }
            Msg::Completed(completion) => self.complete(*completion),
        }
    }

    fn load_list(&mut self) -> Effect {
        let generation = self.list.begin_load();
        self.dispatch(ApiCall::ListProviders, generation)
    }

    fn load_payments(&mut self, provider_id: &str) -> Effect {
        let generation = self.payments.begin_load(provider_id);
        self.dispatch(
            ApiCall::ListPayments {
                provider_id: provider_id.to_string(),
            },
            generation,
        )
    }

    fn dispatch(&mut self, call: ApiCall, generation: u64) -> Effect {
        self.in_flight += 1;
        Effect::Dispatch(Ticket { call, generation })
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
    }

    fn start_edit(&mut self, id: &str) -> Vec<Effect> {
        let Some(record) = self.list.find(id).cloned() else {
            self.notify(Notification::error("Provider not found"));
            return Vec::new();
        };
        self.editor.start_edit(&record);
        self.list.select(&record.id);
        self.sync_payments()
    }

    fn save(&mut self) -> Vec<Effect> {
        let Some(draft) = self.editor.draft() else {
            return Vec::new();
        };
        let body = draft.to_body();
        let call = match self.editor.mode() {
            EditMode::Creating => ApiCall::CreateProvider { body },
            EditMode::Updating { id } => ApiCall::UpdateProvider { id: id.clone(), body },
            EditMode::Listing => return Vec::new(),
        };
        let generation = self.editor.generation();
        vec![self.dispatch(call, generation)]
    }

    /// Checks a loaded payment's status; `None` when the panel does not hold it.
    fn payment_allows(&self, id: &str, allowed: fn(&PaymentStatus) -> bool) -> Option<bool> {
        self.payments.find(id).map(|payment| allowed(&payment.status))
    }

    fn generate_payments(&mut self) -> Vec<Effect> {
        let EditMode::Updating { id } = self.editor.mode() else {
            self.notify(Notification::error("Save the provider before generating payments"));
            return Vec::new();
        };
        let provider_id = id.clone();
        let installments = self.payments.installments();
        match self.editor.draft().and_then(|draft| draft.charge_plan(installments)) {
            Some(plan) => vec![confirm(PendingAction::GeneratePayments { provider_id, plan })],
            None => {
                self.notify(Notification::error("Plan value must be a positive amount"));
                Vec::new()
            }
        }
    }

    /// Provider whose payments the billing tab should show.
    fn payments_target(&self) -> Option<String> {
        if self.editor.active_tab() != FormTab::Billing {
            return None;
        }
        self.list.selected_id().map(str::to_string)
    }

    fn sync_payments(&mut self) -> Vec<Effect> {
        match self.payments_target() {
            Some(id) if self.payments.provider_id() != Some(id.as_str()) => vec![self.load_payments(&id)],
            Some(_) => Vec::new(),
            None => {
                if self.payments.provider_id().is_some() {
                    self.payments.clear();
                }
                Vec::new()
            }
        }
    }

    fn complete(&mut self, completion: Completion) -> Vec<Effect> {
        self.in_flight = self.in_flight.saturating_sub(1);
        let Completion { ticket, outcome } = completion;
        let Ticket { call, generation } = ticket;

        match (call, outcome) {
            (ApiCall::ListProviders, outcome) => {
                if !self.list.is_current(generation) {
                    debug!(generation, "discarding stale provider list");
                    return Vec::new();
                }
                match outcome {
                    Ok(Response::Providers(records)) => {
                        info!(count = records.len(), "provider list loaded");
                        self.list.replace(records);
                        self.sync_payments()
                    }
                    Ok(other) => {
                        warn!(?other, "unexpected response to provider list");
                        self.list.fail_load();
                        self.notify(Notification::error("Failed to load providers"));
                        Vec::new()
                    }
                    Err(error) => {
                        log_failure("list providers", &error);
                        self.list.fail_load();
                        self.notify(Notification::error("Failed to load providers"));
                        Vec::new()
                    }
                }
            }
            (call @ (ApiCall::CreateProvider { .. } | ApiCall::UpdateProvider { .. }), outcome) => {
                let created = matches!(call, ApiCall::CreateProvider { .. });
                let current = self.editor.is_current(generation);
                match outcome {
                    Ok(_) => {
                        self.notify(Notification::success(if created {
                            "Provider created"
                        } else {
                            "Provider updated"
                        }));
                        if current {
                            self.editor.close();
                            self.list.clear_selection();
                            self.payments.clear();
                        } else {
                            debug!(generation, "save finished for a closed draft session");
                        }
                        vec![self.load_list()]
                    }
                    Err(error) => {
                        log_failure(call.label(), &error);
                        self.notify(Notification::error("Failed to save provider"));
                        Vec::new()
                    }
                }
            }
            (ApiCall::ListPayments { provider_id }, outcome) => {
                if !self.payments.is_current(generation) {
                    debug!(generation, %provider_id, "discarding stale payments");
                    return Vec::new();
                }
                match outcome {
                    Ok(Response::Payments(payments)) => self.payments.replace(payments),
                    Ok(_) => self.payments.replace(Vec::new()),
                    Err(error) => {
                        log_failure("list payments", &error);
                        self.payments.replace(Vec::new());
                    }
                }
                Vec::new()
            }
            (call, outcome) => {
                let (done, failed) = action_messages(&call);
                match outcome {
                    Ok(_) => {
                        self.notify(Notification::success(done));
                        match call {
                            ApiCall::ConfirmPayment { .. }
                            | ApiCall::CancelPayment { .. }
                            | ApiCall::GenerateFinancial { .. } => {
                                self.payments_target().map(|id| self.load_payments(&id)).into_iter().collect()
                            }
                            _ => vec![self.load_list()],
                        }
                    }
                    Err(error) => {
                        log_failure(call.label(), &error);
                        self.notify(Notification::error(failed));
                        Vec::new()
                    }
                }
            }
        }
    }
}

fn confirm(action: PendingAction) -> Effect {
    Effect::Confirm(Confirmation {
        prompt: action.prompt(),
        action,
    })
}

fn action_messages(call: &ApiCall) -> (&'static str, &'static str) {
    match call {
        ApiCall::DeleteProvider { .. } => ("Provider deleted", "Failed to delete provider"),
        ApiCall::BlockProvider { .. } => ("Provider blocked", "Failed to block provider"),
        ApiCall::UnblockProvider { .. } => ("Provider unblocked", "Failed to unblock provider"),
        ApiCall::ConfirmPayment { .. } => ("Payment confirmed", "Failed to confirm payment"),
        ApiCall::CancelPayment { .. } => ("Payment cancelled", "Failed to cancel payment"),
        ApiCall::GenerateFinancial { .. } => ("Payments generated", "Failed to generate payments"),
        _ => ("Done", "Operation failed"),
    }
}

fn log_failure(action: &str, error: &GatewayError) {
    warn!(action, kind = error.kind.as_str(), message = %error.message, "gateway call failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use provadmin_api::GatewayErrorKind;
    use provadmin_types::{ChargeKind, ChargePlan, PaymentFilter, ProviderRecord};
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).single().expect("instant")
    }

    fn dashboard() -> Dashboard {
        Dashboard::with_clock(fixed_now)
    }

    fn ticket(effects: &[Effect]) -> Ticket {
        match effects {
            [Effect::Dispatch(ticket)] => ticket.clone(),
            other => panic!("expected a single dispatch, got {other:?}"),
        }
    }

    fn providers(ticket: Ticket, records: Vec<ProviderRecord>) -> Msg {
        Completion {
            ticket,
            outcome: Ok(Response::Providers(records)),
        }
        .into_msg()
    }

    fn loaded(records: Vec<ProviderRecord>) -> Dashboard {
        let mut dashboard = dashboard();
        let load = ticket(&dashboard.update(Msg::LoadRequested));
        dashboard.update(providers(load, records));
        dashboard
    }

    fn sample() -> Vec<ProviderRecord> {
        vec![ProviderRecord::new("1", "Alpha"), ProviderRecord::new("2", "Beta")]
    }

    #[test]
    fn new_then_cancel_returns_to_listing_without_calls() {
        let mut dashboard = loaded(sample());
        dashboard.update(Msg::Select("1".into()));

        assert!(dashboard.update(Msg::NewRequested).is_empty());
        assert_eq!(dashboard.mode(), &EditMode::Creating);
        assert_eq!(
            dashboard.editor().draft().map(|draft| draft.get(provadmin_types::DraftField::ContractDate)),
            Some("2026-10-19")
        );

        assert!(dashboard.update(Msg::CancelRequested).is_empty());
        assert_eq!(dashboard.mode(), &EditMode::Listing);
        assert!(dashboard.editor().draft().is_none());
        assert!(dashboard.list().selected().is_none());
        assert_eq!(dashboard.in_flight(), 0);
    }

    #[test]
    fn stale_list_response_is_discarded() {
        let mut dashboard = dashboard();
        let first = ticket(&dashboard.update(Msg::LoadRequested));
        let second = ticket(&dashboard.update(Msg::LoadRequested));

        dashboard.update(providers(second, vec![ProviderRecord::new("new", "Fresh")]));
        dashboard.update(providers(first, vec![ProviderRecord::new("old", "Stale")]));

        let ids: Vec<_> = dashboard.list().records().iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, vec!["new"]);
    }

    #[test]
    fn reload_drops_vanished_selection() {
        let mut dashboard = loaded(sample());
        dashboard.update(Msg::Select("2".into()));
        let reload = ticket(&dashboard.update(Msg::LoadRequested));
        dashboard.update(providers(reload, vec![ProviderRecord::new("1", "Alpha")]));
        assert!(dashboard.list().selected().is_none());
    }

    #[test]
    fn edit_of_unknown_record_notifies() {
        let mut dashboard = loaded(sample());
        assert!(dashboard.update(Msg::EditRequested("99".into())).is_empty());
        assert_eq!(dashboard.mode(), &EditMode::Listing);
        assert_eq!(dashboard.drain_notifications()[0].message, "Provider not found");
    }

    #[test]
    fn delete_asks_for_confirmation_first() {
        let mut dashboard = loaded(sample());
        let effects = dashboard.update(Msg::DeleteRequested("1".into()));
        assert!(matches!(
            effects.as_slice(),
            [Effect::Confirm(Confirmation { action: PendingAction::DeleteProvider { id }, .. })] if id == "1"
        ));
        assert!(
            dashboard
                .update(Msg::Declined(PendingAction::DeleteProvider { id: "1".into() }))
                .is_empty()
        );
    }

    #[test]
    fn save_outcome_from_closed_session_leaves_new_session_alone() {
        let mut dashboard = loaded(sample());
        dashboard.update(Msg::EditRequested("1".into()));
        let save = ticket(&dashboard.update(Msg::SaveRequested));
        dashboard.update(Msg::EditRequested("2".into()));

        let effects = dashboard.update(
            Completion {
                ticket: save,
                outcome: Ok(Response::Done),
            }
            .into_msg(),
        );

        assert_eq!(dashboard.mode(), &EditMode::Updating { id: "2".into() });
        assert_eq!(ticket(&effects).call, ApiCall::ListProviders);
        assert_eq!(dashboard.drain_notifications()[0].message, "Provider updated");
    }

    #[test]
    fn duplicate_saves_are_both_dispatched() {
        let mut dashboard = loaded(sample());
        dashboard.update(Msg::NewRequested);
        assert_eq!(dashboard.update(Msg::SaveRequested).len(), 1);
        assert_eq!(dashboard.update(Msg::SaveRequested).len(), 1);
        assert_eq!(dashboard.in_flight(), 2);
    }

    #[test]
    fn billing_tab_loads_payments_of_edited_provider() {
        let mut dashboard = loaded(sample());
        dashboard.update(Msg::EditRequested("2".into()));
        let load = ticket(&dashboard.update(Msg::TabChanged(FormTab::Billing)));
        assert_eq!(load.call, ApiCall::ListPayments { provider_id: "2".into() });

        let payments = serde_json::from_value(json!([
            {"id": "a", "status": "paid", "expires_at": "2026-09-10"},
            {"id": "b", "status": "pending", "expires_at": "2026-10-01"},
            {"id": "c", "status": "pending", "expires_at": "2026-11-10"}
        ]))
        .expect("payments");
        dashboard.update(
            Completion {
                ticket: load,
                outcome: Ok(Response::Payments(payments)),
            }
            .into_msg(),
        );
        assert_eq!(dashboard.visible_payments().len(), 3);

        dashboard.update(Msg::PaymentFilterChanged(PaymentFilter::Overdue));
        let overdue: Vec<_> = dashboard.visible_payments().iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(overdue, vec!["b"]);

        assert!(dashboard.update(Msg::TabChanged(FormTab::Billing)).is_empty());
        dashboard.update(Msg::TabChanged(FormTab::Client));
        assert!(dashboard.payments().provider_id().is_none());
    }

    #[test]
    fn payments_failure_clears_list_silently() {
        let mut dashboard = loaded(sample());
        dashboard.update(Msg::EditRequested("1".into()));
        let load = ticket(&dashboard.update(Msg::TabChanged(FormTab::Billing)));
        dashboard.update(
            Completion {
                ticket: load,
                outcome: Err(GatewayError::new(GatewayErrorKind::Network, "offline")),
            }
            .into_msg(),
        );
        assert!(dashboard.payments().payments().is_empty());
        assert_eq!(dashboard.notifications().count(), 0);
    }

    fn on_billing(payments: serde_json::Value) -> Dashboard {
        let mut dashboard = loaded(sample());
        dashboard.update(Msg::EditRequested("1".into()));
        let load = ticket(&dashboard.update(Msg::TabChanged(FormTab::Billing)));
        dashboard.update(
            Completion {
                ticket: load,
                outcome: Ok(Response::Payments(serde_json::from_value(payments).expect("payments"))),
            }
            .into_msg(),
        );
        dashboard
    }

    #[test]
    fn settled_payments_cannot_be_confirmed_or_cancelled() {
        let mut dashboard = on_billing(json!([
            {"id": "paid", "status": "paid"},
            {"id": "void", "status": "cancelled"}
        ]));

        assert!(dashboard.update(Msg::ConfirmPaymentRequested("paid".into())).is_empty());
        assert!(dashboard.update(Msg::CancelPaymentRequested("void".into())).is_empty());
        assert!(dashboard.update(Msg::ConfirmPaymentRequested("gone".into())).is_empty());

        let messages: Vec<_> = dashboard.drain_notifications().into_iter().map(|note| note.message).collect();
        assert_eq!(
            messages,
            vec![
                "Only pending payments can be confirmed",
                "Only pending or waiting payments can be cancelled",
                "Payment not found"
            ]
        );
        assert_eq!(dashboard.in_flight(), 0);
    }

    #[test]
    fn waiting_payment_can_be_cancelled_but_not_confirmed() {
        let mut dashboard = on_billing(json!([{"id": "w", "status": "waiting"}]));

        assert!(dashboard.update(Msg::ConfirmPaymentRequested("w".into())).is_empty());
        let effects = dashboard.update(Msg::CancelPaymentRequested("w".into()));
        assert!(matches!(
            effects.as_slice(),
            [Effect::Confirm(Confirmation { action: PendingAction::CancelPayment { id }, .. })] if id == "w"
        ));
    }

    #[test]
    fn generating_payments_confirms_the_drafted_plan_then_reloads() {
        let mut dashboard = on_billing(json!([]));
        dashboard.update(Msg::FieldChanged(provadmin_types::DraftField::PlanValue, "150,00".into()));
        dashboard.update(Msg::InstallmentsChanged(3));

        let effects = dashboard.update(Msg::GeneratePaymentsRequested);
        let [Effect::Confirm(confirmation)] = effects.as_slice() else {
            panic!("expected a confirmation, got {effects:?}");
        };
        assert!(confirmation.prompt.contains("3x 150.00 = 450.00"), "{}", confirmation.prompt);

        let generate = ticket(&dashboard.update(Msg::Confirmed(confirmation.action.clone())));
        assert_eq!(
            generate.call,
            ApiCall::GenerateFinancial {
                provider_id: "1".into(),
                plan: ChargePlan::new(ChargeKind::BankSlip, 150.0, 3),
            }
        );

        let reload = dashboard.update(
            Completion {
                ticket: generate,
                outcome: Ok(Response::Done),
            }
            .into_msg(),
        );
        assert_eq!(ticket(&reload).call, ApiCall::ListPayments { provider_id: "1".into() });
        assert_eq!(dashboard.drain_notifications()[0].message, "Payments generated");
    }

    #[test]
    fn generating_needs_a_saved_provider_and_a_plan_value() {
        let mut dashboard = loaded(sample());
        dashboard.update(Msg::NewRequested);
        assert!(dashboard.update(Msg::GeneratePaymentsRequested).is_empty());

        let mut dashboard = on_billing(json!([]));
        dashboard.update(Msg::FieldChanged(provadmin_types::DraftField::PlanValue, "free".into()));
        assert!(dashboard.update(Msg::GeneratePaymentsRequested).is_empty());
        assert_eq!(dashboard.drain_notifications()[0].message, "Plan value must be a positive amount");
    }

    #[test]
    fn confirmed_payment_reloads_payments() {
        let mut dashboard = loaded(sample());
        dashboard.update(Msg::EditRequested("1".into()));
        dashboard.update(Msg::TabChanged(FormTab::Billing));

        let confirm = ticket(&dashboard.update(Msg::Confirmed(PendingAction::ConfirmPayment { id: "pay-1".into() })));
        assert_eq!(confirm.call, ApiCall::ConfirmPayment { id: "pay-1".into() });

        let effects = dashboard.update(
            Completion {
                ticket: confirm,
                outcome: Ok(Response::Done),
            }
            .into_msg(),
        );
        assert_eq!(ticket(&effects).call, ApiCall::ListPayments { provider_id: "1".into() });
        assert_eq!(dashboard.drain_notifications()[0].message, "Payment confirmed");
    }
}
