//! Field schema for the provider edit form.
//!
//! Every editable field of a provider has a [`DraftField`] key. Fields are
//! grouped into six [`FormTab`]s. The partition is disjoint except for
//! [`DraftField::Email`], which appears on both the client and the contact tab
//! and shares a single draft value.

use std::fmt;
use std::str::FromStr;

use crate::{ParseVariantError, PaymentMethod, PlanType};

/// How a draft field is edited and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Masked unless the user asks to reveal it.
    Secret,
    /// `YYYY-MM-DD`.
    Date,
    /// Currency amount; sent as a JSON number when it parses.
    Decimal,
    /// One of a fixed set of wire values.
    Choice(&'static [&'static str]),
}

const PLAN_CHOICES: &[&str] = &["mensal", "trimestral", "semestral", "anual"];
const PAYMENT_CHOICES: &[&str] = &["boleto", "pix", "cartao"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DraftField {
    Name,
    Email,
    Cnpj,
    Cpf,
    Phone,
    Address,
    Number,
    Complement,
    Neighborhood,
    City,
    State,
    Cep,
    Username,
    Password,
    ContractNumber,
    ContractDate,
    PlanType,
    PlanValue,
    PaymentMethod,
}

impl DraftField {
    /// All fields in wire order.
    pub const ALL: [DraftField; 19] = [
        Self::Name,
        Self::Email,
        Self::Cnpj,
        Self::Cpf,
        Self::Phone,
        Self::Address,
        Self::Number,
        Self::Complement,
        Self::Neighborhood,
        Self::City,
        Self::State,
        Self::Cep,
        Self::Username,
        Self::Password,
        Self::ContractNumber,
        Self::ContractDate,
        Self::PlanType,
        Self::PlanValue,
        Self::PaymentMethod,
    ];

    /// JSON key used in request bodies.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Cnpj => "cnpj",
            Self::Cpf => "cpf",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Number => "number",
            Self::Complement => "complement",
            Self::Neighborhood => "neighborhood",
            Self::City => "city",
            Self::State => "state",
            Self::Cep => "cep",
            Self::Username => "username",
            Self::Password => "password",
            Self::ContractNumber => "contract_number",
            Self::ContractDate => "contract_date",
            Self::PlanType => "plan_type",
            Self::PlanValue => "plan_value",
            Self::PaymentMethod => "payment_method",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Company name",
            Self::Email => "E-mail",
            Self::Cnpj => "CNPJ",
            Self::Cpf => "CPF",
            Self::Phone => "Phone",
            Self::Address => "Street",
            Self::Number => "Number",
            Self::Complement => "Complement",
            Self::Neighborhood => "Neighborhood",
            Self::City => "City",
            Self::State => "State (UF)",
            Self::Cep => "CEP",
            Self::Username => "Username",
            Self::Password => "Password",
            Self::ContractNumber => "Contract number",
            Self::ContractDate => "Contract date",
            Self::PlanType => "Plan type",
            Self::PlanValue => "Plan value (R$)",
            Self::PaymentMethod => "Payment method",
        }
    }

    /// Marked as required in the form. Nothing enforces it before submission.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Self::Name
                | Self::Email
                | Self::Cep
                | Self::Address
                | Self::Number
                | Self::Neighborhood
                | Self::City
                | Self::State
                | Self::Phone
                | Self::Username
        )
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Password => FieldKind::Secret,
            Self::ContractDate => FieldKind::Date,
            Self::PlanValue => FieldKind::Decimal,
            Self::PlanType => FieldKind::Choice(PLAN_CHOICES),
            Self::PaymentMethod => FieldKind::Choice(PAYMENT_CHOICES),
            _ => FieldKind::Text,
        }
    }

    /// Human label for a stored value; choice fields map wire values to labels.
    pub fn display_value<'a>(&self, value: &'a str) -> std::borrow::Cow<'a, str> {
        match self {
            Self::PlanType => value
                .parse::<PlanType>()
                .map(|plan| plan.label().into())
                .unwrap_or(value.into()),
            Self::PaymentMethod => value
                .parse::<PaymentMethod>()
                .map(|method| method.label().into())
                .unwrap_or(value.into()),
            _ => value.into(),
        }
    }
}

impl FromStr for DraftField {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.key() == normalized)
            .ok_or_else(|| ParseVariantError {
                kind: "field",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormTab {
    #[default]
    Client,
    Address,
    Contact,
    Contract,
    Credentials,
    Billing,
}

impl FormTab {
    pub const ALL: [FormTab; 6] = [
        Self::Client,
        Self::Address,
        Self::Contact,
        Self::Contract,
        Self::Credentials,
        Self::Billing,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Address => "Address",
            Self::Contact => "Contact",
            Self::Contract => "Contract",
            Self::Credentials => "Logins",
            Self::Billing => "Billing",
        }
    }

    pub fn fields(&self) -> &'static [DraftField] {
        match self {
            Self::Client => &[DraftField::Name, DraftField::Email, DraftField::Cnpj, DraftField::Cpf],
            Self::Address => &[
                DraftField::Cep,
                DraftField::Address,
                DraftField::Number,
                DraftField::Complement,
                DraftField::Neighborhood,
                DraftField::City,
                DraftField::State,
            ],
            Self::Contact => &[DraftField::Phone, DraftField::Email],
            Self::Contract => &[DraftField::ContractNumber, DraftField::ContractDate],
            Self::Credentials => &[DraftField::Username, DraftField::Password],
            Self::Billing => &[DraftField::PlanType, DraftField::PlanValue, DraftField::PaymentMethod],
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|tab| tab == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tabs_cover_every_field() {
        let covered: HashSet<DraftField> = FormTab::ALL.iter().flat_map(|tab| tab.fields().iter().copied()).collect();
        assert_eq!(covered.len(), DraftField::ALL.len());
    }

    #[test]
    fn only_email_is_shared_between_tabs() {
        for field in DraftField::ALL {
            let owners = FormTab::ALL.iter().filter(|tab| tab.fields().contains(&field)).count();
            if field == DraftField::Email {
                assert_eq!(owners, 2, "email appears on client and contact");
            } else {
                assert_eq!(owners, 1, "{field} belongs to exactly one tab");
            }
        }
    }

    #[test]
    fn field_keys_parse_back() {
        for field in DraftField::ALL {
            assert_eq!(field.key().parse::<DraftField>(), Ok(field));
        }
        assert_eq!("contract-date".parse::<DraftField>(), Ok(DraftField::ContractDate));
        assert!("is_active".parse::<DraftField>().is_err());
    }

    #[test]
    fn tab_navigation_wraps() {
        assert_eq!(FormTab::Billing.next(), FormTab::Client);
        assert_eq!(FormTab::Client.previous(), FormTab::Billing);
        assert_eq!(FormTab::Contact.index(), 2);
    }

    #[test]
    fn choice_fields_show_labels() {
        assert_eq!(DraftField::PlanType.display_value("semestral"), "Semiannual");
        assert_eq!(DraftField::PaymentMethod.display_value("pix"), "PIX");
        assert_eq!(DraftField::Name.display_value("Alpha"), "Alpha");
    }
}
