// core/src/validation.rs

//! Field rules for buyer and payment data.
//!
//! The step forms run these before committing to the checkout store and the
//! server runs them again on the submitted payload. Errors are keyed by the
//! camelCase wire name of the field.

use crate::domain::{BuyerInfo, PaymentInfo, PaymentMethod};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// `local-part@domain.tld` with no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
  EMAIL_PATTERN.is_match(email)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field: String,
  pub message: String,
}

/// Per-field messages in the order they were recorded. One message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
    let mut errors = Self::new();
    errors.insert(field, message);
    errors
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Records `message` for `field`, replacing an earlier message for it.
  pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
    let field = field.into();
    let message = message.into();
    match self.0.iter_mut().find(|e| e.field == field) {
      Some(existing) => existing.message = message,
      None => self.0.push(FieldError { field, message }),
    }
  }

  pub fn get(&self, field: &str) -> Option<&str> {
    self.0.iter().find(|e| e.field == field).map(|e| e.message.as_str())
  }

  pub fn contains(&self, field: &str) -> bool {
    self.get(field).is_some()
  }

  pub fn remove(&mut self, field: &str) -> Option<String> {
    let idx = self.0.iter().position(|e| e.field == field)?;
    Some(self.0.remove(idx).message)
  }

  pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
    self.0.iter()
  }

  /// Moves every error of `other` in, prefixing its field names
  /// (`email` becomes `buyer.email`).
  pub fn extend_prefixed(&mut self, prefix: &str, other: FieldErrors) {
    for e in other.0 {
      self.insert(format!("{}.{}", prefix, e.field), e.message);
    }
  }

  pub fn into_result(self) -> Result<(), FieldErrors> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(self)
    }
  }
}

impl std::fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut first = true;
    for e in &self.0 {
      if !first {
        f.write_str("; ")?;
      }
      write!(f, "{}: {}", e.field, e.message)?;
      first = false;
    }
    Ok(())
  }
}

impl std::error::Error for FieldErrors {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuyerField {
  FirstName,
  LastName,
  Email,
  Phone,
  DocumentNumber,
  Address,
  City,
  State,
  Country,
  PostalCode,
  Notes,
}

impl BuyerField {
  pub fn key(&self) -> &'static str {
    match self {
      BuyerField::FirstName => "firstName",
      BuyerField::LastName => "lastName",
      BuyerField::Email => "email",
      BuyerField::Phone => "phone",
      BuyerField::DocumentNumber => "documentNumber",
      BuyerField::Address => "address",
      BuyerField::City => "city",
      BuyerField::State => "state",
      BuyerField::Country => "country",
      BuyerField::PostalCode => "postalCode",
      BuyerField::Notes => "notes",
    }
  }
}

pub fn validate_buyer(info: &BuyerInfo) -> FieldErrors {
  let mut errors = FieldErrors::new();
  let required = [
    (BuyerField::FirstName, &info.first_name, "First name is required"),
    (BuyerField::LastName, &info.last_name, "Last name is required"),
  ];
  for (field, value, message) in required {
    if value.trim().is_empty() {
      errors.insert(field.key(), message);
    }
  }

  let email = info.email.trim();
  if email.is_empty() {
    errors.insert(BuyerField::Email.key(), "Email is required");
  } else if !is_valid_email(email) {
    errors.insert(BuyerField::Email.key(), "Invalid email");
  }

  let required = [
    (BuyerField::Phone, &info.phone, "Phone is required"),
    (BuyerField::DocumentNumber, &info.document_number, "Document number is required"),
    (BuyerField::Address, &info.address, "Address is required"),
    (BuyerField::City, &info.city, "City is required"),
    (BuyerField::State, &info.state, "State/province is required"),
    (BuyerField::PostalCode, &info.postal_code, "Postal code is required"),
  ];
  for (field, value, message) in required {
    if value.trim().is_empty() {
      errors.insert(field.key(), message);
    }
  }
  errors
}

pub const CARDHOLDER_NAME_FIELD: &str = "cardholderName";

/// Only card payments carry a required field.
pub fn validate_payment(info: &PaymentInfo) -> FieldErrors {
  let mut errors = FieldErrors::new();
  if info.payment_method == PaymentMethod::Card {
    let missing = info.cardholder_name.as_deref().map_or(true, |name| name.trim().is_empty());
    if missing {
      errors.insert(CARDHOLDER_NAME_FIELD, "Cardholder name is required");
    }
  }
  errors
}
