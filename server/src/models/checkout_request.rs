// server/src/models/checkout_request.rs

//! Lenient request bodies for the checkout endpoints.
//!
//! Every field is optional at the serde level so that a body with missing or
//! mistyped values still deserializes, and the problems are reported per field
//! instead of as one opaque JSON error.

use archiplan_core::validation::{validate_buyer, validate_payment};
use archiplan_core::{
  BillingAddress, BuyerInfo, CheckoutPayload, DocumentType, FieldErrors, PaymentInfo, PaymentMethod, ReservationType,
};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutRequest {
  pub project_id: Option<String>,
  pub reservation_type: Option<String>,
  pub buyer: Option<BuyerRequest>,
  pub payment: Option<PaymentRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerRequest {
  pub first_name: Option<String>,
  pub last_name: Option<String>,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub document_type: Option<String>,
  pub document_number: Option<String>,
  pub address: Option<String>,
  pub city: Option<String>,
  pub state: Option<String>,
  pub country: Option<String>,
  pub postal_code: Option<String>,
  pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentRequest {
  pub payment_method: Option<String>,
  pub cardholder_name: Option<String>,
  pub billing_address: Option<BillingAddress>,
}

impl CheckoutRequest {
  /// Applies every checkout rule and returns the typed payload, or all the
  /// failures keyed by dotted path (`buyer.email`, `payment.cardholderName`).
  pub fn into_payload(self) -> Result<CheckoutPayload, FieldErrors> {
    let mut errors = FieldErrors::new();

    let project_id = self.project_id.map(|id| id.trim().to_string()).unwrap_or_default();
    if project_id.is_empty() {
      errors.insert("projectId", "Project is required");
    }

    let reservation_type = match self.reservation_type.as_deref().map(str::parse::<ReservationType>) {
      Some(Ok(kind)) => Some(kind),
      _ => {
        errors.insert("reservationType", "Invalid reservation type");
        None
      }
    };

    let (buyer, buyer_errors) = self.buyer.unwrap_or_default().into_buyer_info();
    errors.extend_prefixed("buyer", buyer_errors);

    let (payment, payment_errors) = self.payment.unwrap_or_default().into_payment_info();
    errors.extend_prefixed("payment", payment_errors);

    match (reservation_type, buyer, payment) {
      (Some(reservation_type), Some(buyer), Some(payment)) if errors.is_empty() => Ok(CheckoutPayload {
        project_id,
        reservation_type,
        buyer,
        payment,
      }),
      _ => Err(errors),
    }
  }
}

impl BuyerRequest {
  fn into_buyer_info(self) -> (Option<BuyerInfo>, FieldErrors) {
    let document_type = self.document_type.as_deref().map(str::parse::<DocumentType>);
    let info = BuyerInfo {
      first_name: self.first_name.unwrap_or_default(),
      last_name: self.last_name.unwrap_or_default(),
      email: self.email.map(|e| e.trim().to_string()).unwrap_or_default(),
      phone: self.phone.unwrap_or_default(),
      document_type: DocumentType::default(),
      document_number: self.document_number.unwrap_or_default(),
      address: self.address.unwrap_or_default(),
      city: self.city.unwrap_or_default(),
      state: self.state.unwrap_or_default(),
      country: self.country.unwrap_or_default(),
      postal_code: self.postal_code.unwrap_or_default(),
      notes: self.notes.filter(|n| !n.trim().is_empty()),
    };

    let mut errors = validate_buyer(&info);
    match document_type {
      Some(Ok(document_type)) if errors.is_empty() => (Some(BuyerInfo { document_type, ..info }), errors),
      Some(Ok(_)) => (None, errors),
      _ => {
        errors.insert("documentType", "Invalid document type");
        (None, errors)
      }
    }
  }
}

impl PaymentRequest {
  fn into_payment_info(self) -> (Option<PaymentInfo>, FieldErrors) {
    let Some(Ok(payment_method)) = self.payment_method.as_deref().map(str::parse::<PaymentMethod>) else {
      return (None, FieldErrors::single("paymentMethod", "Invalid payment method"));
    };
    let info = PaymentInfo {
      payment_method,
      cardholder_name: self.cardholder_name,
      billing_address: self.billing_address,
    };
    let errors = validate_payment(&info);
    if errors.is_empty() {
      (Some(info), errors)
    } else {
      (None, errors)
    }
  }
}
