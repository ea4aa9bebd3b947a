// core/src/checkout/buyer_form.rs

use crate::checkout::store::CheckoutStore;
use crate::domain::{BuyerInfo, DocumentType, DEFAULT_COUNTRY};
use crate::validation::{validate_buyer, BuyerField, FieldErrors};
use tracing::debug;

/// Buyer step: edits a draft copy and commits it only when every rule passes.
#[derive(Debug, Clone)]
pub struct BuyerInfoForm {
  draft: BuyerInfo,
  errors: FieldErrors,
}

impl BuyerInfoForm {
  /// Seeds the draft from the store, or with defaults on the first visit.
  pub fn from_store(store: &CheckoutStore) -> Self {
    Self {
      draft: store.buyer_info().cloned().unwrap_or_default(),
      errors: FieldErrors::new(),
    }
  }

  pub fn draft(&self) -> &BuyerInfo {
    &self.draft
  }

  pub fn errors(&self) -> &FieldErrors {
    &self.errors
  }

  /// Updates one field and clears that field's error only. Other errors stay
  /// until the next submit.
  pub fn set_field(&mut self, field: BuyerField, value: impl Into<String>) {
    let value = value.into();
    let d = &mut self.draft;
    match field {
      BuyerField::FirstName => d.first_name = value,
      BuyerField::LastName => d.last_name = value,
      BuyerField::Email => d.email = value,
      BuyerField::Phone => d.phone = value,
      BuyerField::DocumentNumber => d.document_number = value,
      BuyerField::Address => d.address = value,
      BuyerField::City => d.city = value,
      BuyerField::State => d.state = value,
      BuyerField::Country => d.country = value,
      BuyerField::PostalCode => d.postal_code = value,
      BuyerField::Notes => d.notes = if value.trim().is_empty() { None } else { Some(value) },
    }
    self.errors.remove(field.key());
  }

  pub fn set_document_type(&mut self, document_type: DocumentType) {
    self.draft.document_type = document_type;
  }

  /// Re-runs every rule and replaces the recorded errors.
  pub fn validate(&mut self) -> bool {
    self.errors = validate_buyer(&self.draft);
    self.errors.is_empty()
  }

  /// On success writes the draft into the store and advances one step.
  pub fn submit(&mut self, store: &mut CheckoutStore) -> Result<(), FieldErrors> {
    if !self.validate() {
      debug!(invalid_fields = self.errors.len(), "Buyer form rejected.");
      return Err(self.errors.clone());
    }
    let mut committed = self.draft.clone();
    committed.email = committed.email.trim().to_string();
    if committed.country.trim().is_empty() {
      committed.country = DEFAULT_COUNTRY.to_string();
    }
    store.set_buyer_info(committed);
    store.next_step();
    Ok(())
  }
}
