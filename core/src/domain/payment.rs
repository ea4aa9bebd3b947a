// core/src/domain/payment.rs

use super::UnknownVariant;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "payment_method", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
  Card,
  #[serde(alias = "bank-transfer")]
  Transfer,
  #[serde(alias = "quote-only")]
  Quote,
}

impl PaymentMethod {
  pub fn label(&self) -> &'static str {
    match self {
      PaymentMethod::Card => "Credit/Debit card",
      PaymentMethod::Transfer => "Bank transfer",
      PaymentMethod::Quote => "Quote request",
    }
  }
}

impl FromStr for PaymentMethod {
  type Err = UnknownVariant;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "card" => Ok(PaymentMethod::Card),
      "transfer" | "bank-transfer" => Ok(PaymentMethod::Transfer),
      "quote" | "quote-only" => Ok(PaymentMethod::Quote),
      _ => Err(UnknownVariant::new("payment method", s)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
  #[serde(default = "same_as_shipping_default")]
  pub same_as_shipping: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub address: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub city: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub country: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub postal_code: Option<String>,
}

fn same_as_shipping_default() -> bool {
  true
}

impl Default for BillingAddress {
  fn default() -> Self {
    Self {
      same_as_shipping: true,
      address: None,
      city: None,
      state: None,
      country: None,
      postal_code: None,
    }
  }
}

/// Non-sensitive payment selection. Card data itself never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
  pub payment_method: PaymentMethod,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cardholder_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub billing_address: Option<BillingAddress>,
}

impl PaymentInfo {
  pub fn new(payment_method: PaymentMethod) -> Self {
    Self {
      payment_method,
      cardholder_name: None,
      billing_address: Some(BillingAddress::default()),
    }
  }

  /// `billingAddress.sameAsShipping`, true when no billing block was sent.
  pub fn billing_same_as_shipping(&self) -> bool {
    self.billing_address.as_ref().map_or(true, |b| b.same_as_shipping)
  }
}
