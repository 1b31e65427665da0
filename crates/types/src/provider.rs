use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ParseVariantError, wire};

/// Billing cadence of a provider contract.
///
/// Wire values are the backend's identifiers (`mensal`, `trimestral`,
/// `semestral`, `anual`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlanType {
    #[default]
    #[serde(rename = "mensal")]
    Monthly,
    #[serde(rename = "trimestral")]
    Quarterly,
    #[serde(rename = "semestral")]
    Semiannual,
    #[serde(rename = "anual")]
    Annual,
}

impl PlanType {
    pub const ALL: [PlanType; 4] = [Self::Monthly, Self::Quarterly, Self::Semiannual, Self::Annual];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "mensal",
            Self::Quarterly => "trimestral",
            Self::Semiannual => "semestral",
            Self::Annual => "anual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Semiannual => "Semiannual",
            Self::Annual => "Annual",
        }
    }
}

impl FromStr for PlanType {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mensal" | "monthly" => Ok(Self::Monthly),
            "trimestral" | "quarterly" => Ok(Self::Quarterly),
            "semestral" | "semiannual" => Ok(Self::Semiannual),
            "anual" | "annual" => Ok(Self::Annual),
            _ => Err(ParseVariantError {
                kind: "plan type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the provider pays its subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "boleto")]
    BankSlip,
    #[serde(rename = "pix")]
    InstantTransfer,
    #[serde(rename = "cartao")]
    CreditCard,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::BankSlip, Self::InstantTransfer, Self::CreditCard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BankSlip => "boleto",
            Self::InstantTransfer => "pix",
            Self::CreditCard => "cartao",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BankSlip => "Bank slip",
            Self::InstantTransfer => "PIX",
            Self::CreditCard => "Credit card",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "boleto" | "bank-slip" => Ok(Self::BankSlip),
            "pix" | "instant-transfer" => Ok(Self::InstantTransfer),
            "cartao" | "credit-card" => Ok(Self::CreditCard),
            _ => Err(ParseVariantError {
                kind: "payment method",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider as returned by `GET /api/admin/providers`.
///
/// The authoritative copy lives on the server; the client only caches it.
/// The password is write-only and therefore never part of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,

    // identity
    #[serde(default, deserialize_with = "wire::string")]
    pub name: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub email: String,
    #[serde(default, deserialize_with = "wire::optional_string", skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_string", skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,

    // address
    #[serde(default, deserialize_with = "wire::string")]
    pub address: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub number: String,
    #[serde(default, deserialize_with = "wire::optional_string", skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(default, deserialize_with = "wire::string")]
    pub neighborhood: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub city: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub state: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub cep: String,

    // contact
    #[serde(default, deserialize_with = "wire::string")]
    pub phone: String,

    // contract
    #[serde(default, deserialize_with = "wire::string")]
    pub contract_number: String,
    #[serde(default, deserialize_with = "wire::date")]
    pub contract_date: Option<NaiveDate>,

    // credentials
    #[serde(default, deserialize_with = "wire::string")]
    pub username: String,

    // billing
    #[serde(default, deserialize_with = "wire::variant")]
    pub plan_type: Option<PlanType>,
    #[serde(default, deserialize_with = "wire::amount")]
    pub plan_value: Option<f64>,
    #[serde(default, deserialize_with = "wire::variant")]
    pub payment_method: Option<PaymentMethod>,

    // status (server-owned)
    #[serde(default = "wire::default_true", deserialize_with = "wire::flag_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "wire::flag_false")]
    pub is_blocked: bool,
    #[serde(default, deserialize_with = "wire::optional_string", skip_serializing_if = "Option::is_none")]
    pub blocked_reason: Option<String>,
}

impl ProviderRecord {
    /// Minimal record carrying only an id and a name; other fields are empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            cnpj: None,
            cpf: None,
            address: String::new(),
            number: String::new(),
            complement: None,
            neighborhood: String::new(),
            city: String::new(),
            state: String::new(),
            cep: String::new(),
            phone: String::new(),
            contract_number: String::new(),
            contract_date: None,
            username: String::new(),
            plan_type: None,
            plan_value: None,
            payment_method: None,
            is_active: true,
            is_blocked: false,
            blocked_reason: None,
        }
    }

    /// Search predicate used by the provider list.
    ///
    /// Name and email match case-insensitively; the company tax id matches
    /// as an exact substring. An empty term matches every record.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
            || self.cnpj.as_deref().is_some_and(|cnpj| cnpj.contains(term))
    }

    /// `city/state` for the list, or `-` when the city is unknown.
    pub fn location_label(&self) -> String {
        if self.city.is_empty() {
            "-".to_string()
        } else {
            format!("{}/{}", self.city, self.state)
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_blocked {
            "Blocked"
        } else if !self.is_active {
            "Inactive"
        } else {
            "Active"
        }
    }
}
