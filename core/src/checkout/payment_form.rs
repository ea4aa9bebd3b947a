// core/src/checkout/payment_form.rs

use crate::checkout::store::CheckoutStore;
use crate::domain::{BillingAddress, PaymentInfo, PaymentMethod, ReservationType};
use crate::validation::{validate_payment, FieldErrors, CARDHOLDER_NAME_FIELD};

/// What happens to card/billing fields when the payment method changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleFieldPolicy {
  /// Keep whatever was typed, in case the buyer switches back.
  #[default]
  Retain,
  /// Drop cardholder name and billing details on every switch.
  Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentField {
  CardholderName,
  BillingAddress,
  BillingCity,
  BillingState,
  BillingCountry,
  BillingPostalCode,
}

impl PaymentField {
  pub fn key(&self) -> &'static str {
    match self {
      PaymentField::CardholderName => CARDHOLDER_NAME_FIELD,
      PaymentField::BillingAddress => "billing.address",
      PaymentField::BillingCity => "billing.city",
      PaymentField::BillingState => "billing.state",
      PaymentField::BillingCountry => "billing.country",
      PaymentField::BillingPostalCode => "billing.postalCode",
    }
  }
}

#[derive(Debug, Clone)]
pub struct PaymentInfoForm {
  draft: PaymentInfo,
  errors: FieldErrors,
  policy: StaleFieldPolicy,
}

impl PaymentInfoForm {
  /// Seeds from the store. A first visit defaults to `quote` for quote
  /// reservations and `card` otherwise.
  pub fn from_store(store: &CheckoutStore) -> Self {
    let draft = store.payment_info().cloned().unwrap_or_else(|| {
      let method = match store.reservation_type() {
        ReservationType::Quote => PaymentMethod::Quote,
        ReservationType::Purchase => PaymentMethod::Card,
      };
      PaymentInfo::new(method)
    });
    Self {
      draft,
      errors: FieldErrors::new(),
      policy: StaleFieldPolicy::default(),
    }
  }

  pub fn with_policy(mut self, policy: StaleFieldPolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn draft(&self) -> &PaymentInfo {
    &self.draft
  }

  pub fn errors(&self) -> &FieldErrors {
    &self.errors
  }

  pub fn select_method(&mut self, method: PaymentMethod) {
    self.draft.payment_method = method;
    if self.policy == StaleFieldPolicy::Clear {
      self.draft.cardholder_name = None;
      self.draft.billing_address = Some(BillingAddress::default());
      self.errors = FieldErrors::new();
    }
  }

  pub fn set_field(&mut self, field: PaymentField, value: impl Into<String>) {
    let value = Some(value.into());
    if field == PaymentField::CardholderName {
      self.draft.cardholder_name = value;
    } else {
      let billing = self.draft.billing_address.get_or_insert_with(BillingAddress::default);
      match field {
        PaymentField::BillingAddress => billing.address = value,
        PaymentField::BillingCity => billing.city = value,
        PaymentField::BillingState => billing.state = value,
        PaymentField::BillingCountry => billing.country = value,
        PaymentField::BillingPostalCode => billing.postal_code = value,
        PaymentField::CardholderName => {}
      }
    }
    self.errors.remove(field.key());
  }

  pub fn set_same_as_shipping(&mut self, same_as_shipping: bool) {
    self
      .draft
      .billing_address
      .get_or_insert_with(BillingAddress::default)
      .same_as_shipping = same_as_shipping;
  }

  pub fn validate(&mut self) -> bool {
    self.errors = validate_payment(&self.draft);
    self.errors.is_empty()
  }

  pub fn submit(&mut self, store: &mut CheckoutStore) -> Result<(), FieldErrors> {
    if !self.validate() {
      return Err(self.errors.clone());
    }
    store.set_payment_info(self.draft.clone());
    store.next_step();
    Ok(())
  }
}
