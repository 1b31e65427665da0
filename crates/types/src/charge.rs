use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::{ParseVariantError, PaymentMethod};

/// Upper bound on the installments issued in one batch.
pub const MAX_INSTALLMENTS: u32 = 12;

/// Document the billing backend issues for each installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ChargeKind {
    #[default]
    #[serde(rename = "boleto")]
    BankSlip,
    #[serde(rename = "pix")]
    Pix,
}

impl ChargeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BankSlip => "boleto",
            Self::Pix => "pix",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BankSlip => "bank slip",
            Self::Pix => "PIX charge",
        }
    }
}

/// PIX providers are charged over PIX; every other method gets bank slips.
impl From<PaymentMethod> for ChargeKind {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::InstantTransfer => Self::Pix,
            PaymentMethod::BankSlip | PaymentMethod::CreditCard => Self::BankSlip,
        }
    }
}

impl FromStr for ChargeKind {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boleto" | "bank-slip" => Ok(Self::BankSlip),
            "pix" => Ok(Self::Pix),
            _ => Err(ParseVariantError {
                kind: "charge kind",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ChargeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A batch of monthly charges, one per installment, each worth `amount`.
///
/// Serializes to the `generate-financial` request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargePlan {
    #[serde(rename = "type")]
    pub kind: ChargeKind,
    pub amount: f64,
    pub installments: u32,
}

impl ChargePlan {
    /// Installments are clamped to `1..=MAX_INSTALLMENTS`.
    pub fn new(kind: ChargeKind, amount: f64, installments: u32) -> Self {
        Self {
            kind,
            amount,
            installments: installments.clamp(1, MAX_INSTALLMENTS),
        }
    }

    pub fn total(&self) -> f64 {
        self.amount * f64::from(self.installments)
    }

    /// One-line summary such as `3x 199.00 = 597.00`.
    pub fn summary(&self) -> String {
        format!("{}x {:.2} = {:.2}", self.installments, self.amount, self.total())
    }
}
