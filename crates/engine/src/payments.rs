use chrono::{DateTime, Utc};
use provadmin_types::{MAX_INSTALLMENTS, PaymentFilter, ProviderPayment};

/// Billing history of the provider being edited.
#[derive(Debug, Default)]
pub struct PaymentsPanel {
    provider_id: Option<String>,
    payments: Vec<ProviderPayment>,
    filter: PaymentFilter,
    cursor: usize,
    generation: u64,
    loading: bool,
    installments: u32,
}

impl PaymentsPanel {
    pub fn provider_id(&self) -> Option<&str> {
        self.provider_id.as_deref()
    }

    pub fn payments(&self) -> &[ProviderPayment] {
        &self.payments
    }

    pub fn filter(&self) -> PaymentFilter {
        self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Installments for the next generated batch; at least one.
    pub fn installments(&self) -> u32 {
        self.installments.max(1)
    }

    pub fn set_installments(&mut self, installments: u32) {
        self.installments = installments.clamp(1, MAX_INSTALLMENTS);
    }

    pub fn find(&self, id: &str) -> Option<&ProviderPayment> {
        self.payments.iter().find(|payment| payment.id == id)
    }

    /// Starts a fetch for `provider_id`; entries of another provider are dropped.
    pub fn begin_load(&mut self, provider_id: &str) -> u64 {
        if self.provider_id.as_deref() != Some(provider_id) {
            self.payments.clear();
            self.cursor = 0;
            self.installments = 1;
        }
        self.provider_id = Some(provider_id.to_string());
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn replace(&mut self, payments: Vec<ProviderPayment>) {
        self.payments = payments;
        self.loading = false;
        self.cursor = self.cursor.min(self.payments.len().saturating_sub(1));
    }

    /// Detaches the panel; any in-flight fetch becomes stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.provider_id = None;
        self.payments.clear();
        self.cursor = 0;
        self.loading = false;
    }

    pub fn set_filter(&mut self, filter: PaymentFilter) {
        self.filter = filter;
        self.cursor = 0;
    }

    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&ProviderPayment> {
        self.payments
            .iter()
            .filter(|payment| self.filter.matches(payment, now))
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, delta: isize, now: DateTime<Utc>) {
        let count = self.visible(now).len();
        if count == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(count - 1);
    }

    pub fn selected(&self, now: DateTime<Utc>) -> Option<&ProviderPayment> {
        self.visible(now).get(self.cursor).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).single().expect("instant")
    }

    fn payment(id: &str, status: &str, expires_at: &str) -> ProviderPayment {
        serde_json::from_value(json!({"id": id, "status": status, "expires_at": expires_at})).expect("payment")
    }

    #[test]
    fn switching_provider_drops_previous_entries() {
        let mut panel = PaymentsPanel::default();
        panel.begin_load("p-1");
        panel.replace(vec![payment("a", "paid", "2026-01-01")]);
        panel.begin_load("p-1");
        assert_eq!(panel.payments().len(), 1);
        panel.begin_load("p-2");
        assert!(panel.payments().is_empty());
    }

    #[test]
    fn clearing_invalidates_in_flight_loads() {
        let mut panel = PaymentsPanel::default();
        let generation = panel.begin_load("p-1");
        panel.clear();
        assert!(!panel.is_current(generation));
        assert!(panel.provider_id().is_none());
    }

    #[test]
    fn installments_stay_within_a_year() {
        let mut panel = PaymentsPanel::default();
        assert_eq!(panel.installments(), 1);
        panel.set_installments(6);
        assert_eq!(panel.installments(), 6);
        panel.set_installments(30);
        assert_eq!(panel.installments(), 12);
        panel.set_installments(0);
        assert_eq!(panel.installments(), 1);
    }

    #[test]
    fn cursor_follows_filtered_rows() {
        let mut panel = PaymentsPanel::default();
        panel.begin_load("p-1");
        panel.replace(vec![
            payment("a", "paid", "2026-01-01"),
            payment("b", "pending", "2026-10-01"),
            payment("c", "pending", "2026-12-01"),
        ]);
        panel.set_filter(PaymentFilter::Overdue);
        panel.move_cursor(3, now());
        assert_eq!(panel.selected(now()).map(|entry| entry.id.as_str()), Some("b"));
        panel.set_filter(PaymentFilter::All);
        panel.move_cursor(1, now());
        assert_eq!(panel.selected(now()).map(|entry| entry.id.as_str()), Some("b"));
    }
}
