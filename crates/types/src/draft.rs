use chrono::NaiveDate;
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::{ChargeKind, ChargePlan, DraftField, PaymentMethod, PlanType, ProviderRecord, wire};

/// Plan value pre-filled on new drafts and on records without one.
pub const DEFAULT_PLAN_VALUE: f64 = 199.0;

/// String-valued staging copy of a provider's editable fields.
///
/// Every [`DraftField`] always has an entry. Numeric and date fields stay
/// text-encoded until [`FormDraft::to_body`] builds the request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    values: IndexMap<DraftField, String>,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self::blank()
    }
}

impl FormDraft {
    /// Draft with every field empty.
    pub fn blank() -> Self {
        Self {
            values: DraftField::ALL.iter().map(|field| (*field, String::new())).collect(),
        }
    }

    /// Fresh draft for a new provider: today's contract date and the default plan.
    pub fn for_new(today: NaiveDate) -> Self {
        let mut draft = Self::blank();
        draft.set(DraftField::ContractDate, today.format("%Y-%m-%d").to_string());
        draft.set(DraftField::PlanType, PlanType::default().as_str());
        draft.set(DraftField::PlanValue, format_amount(DEFAULT_PLAN_VALUE));
        draft.set(DraftField::PaymentMethod, PaymentMethod::default().as_str());
        draft
    }

    /// Draft populated from an existing record.
    ///
    /// The password is left blank, meaning "keep the current password". The
    /// username falls back to the e-mail when the record has none.
    pub fn from_record(record: &ProviderRecord) -> Self {
        let mut draft = Self::blank();
        draft.set(DraftField::Name, record.name.as_str());
        draft.set(DraftField::Email, record.email.as_str());
        draft.set(DraftField::Cnpj, record.cnpj.clone().unwrap_or_default());
        draft.set(DraftField::Cpf, record.cpf.clone().unwrap_or_default());
        draft.set(DraftField::Phone, record.phone.as_str());
        draft.set(DraftField::Address, record.address.as_str());
        draft.set(DraftField::Number, record.number.as_str());
        draft.set(DraftField::Complement, record.complement.clone().unwrap_or_default());
        draft.set(DraftField::Neighborhood, record.neighborhood.as_str());
        draft.set(DraftField::City, record.city.as_str());
        draft.set(DraftField::State, record.state.as_str());
        draft.set(DraftField::Cep, record.cep.as_str());
        let username = if record.username.is_empty() { &record.email } else { &record.username };
        draft.set(DraftField::Username, username.as_str());
        draft.set(DraftField::ContractNumber, record.contract_number.as_str());
        draft.set(
            DraftField::ContractDate,
            record
                .contract_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        );
        draft.set(DraftField::PlanType, record.plan_type.unwrap_or_default().as_str());
        draft.set(DraftField::PlanValue, format_amount(record.plan_value.unwrap_or(DEFAULT_PLAN_VALUE)));
        draft.set(DraftField::PaymentMethod, record.payment_method.unwrap_or_default().as_str());
        draft
    }

    pub fn get(&self, field: DraftField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Overwrites a single field. No cross-field validation happens here.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// JSON request body carrying every draft key.
    ///
    /// `plan_value` becomes a JSON number when it parses as a decimal and is
    /// sent verbatim otherwise; the password is always present, even when blank.
    pub fn to_body(&self) -> Value {
        let mut body = Map::with_capacity(self.values.len());
        for (field, value) in &self.values {
            let encoded = match field {
                DraftField::PlanValue => wire::parse_decimal(value)
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(value.clone())),
                _ => Value::String(value.clone()),
            };
            body.insert(field.key().to_string(), encoded);
        }
        Value::Object(body)
    }

    /// Charges for `installments` months at the drafted plan value, issued the
    /// way the drafted payment method implies.
    ///
    /// `None` when the plan value is not a positive decimal.
    pub fn charge_plan(&self, installments: u32) -> Option<ChargePlan> {
        let amount = wire::parse_decimal(self.get(DraftField::PlanValue)).filter(|amount| *amount > 0.0)?;
        let method = self.get(DraftField::PaymentMethod).parse::<PaymentMethod>().unwrap_or_default();
        Some(ChargePlan::new(ChargeKind::from(method), amount, installments))
    }
}

fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}
