// core/src/domain/mod.rs

//! Records shared by the checkout store and the REST backend.

pub mod buyer;
pub mod payment;
pub mod project;
pub mod reservation;

pub use buyer::{BuyerInfo, DocumentType, DEFAULT_COUNTRY};
pub use payment::{BillingAddress, PaymentInfo, PaymentMethod};
pub use project::{Project, ProjectCategory};
pub use reservation::{ReservationStatus, ReservationType};

use thiserror::Error;

/// Returned by the `FromStr` impls of the domain enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: '{value}'")]
pub struct UnknownVariant {
  pub kind: &'static str,
  pub value: String,
}

impl UnknownVariant {
  pub(crate) fn new(kind: &'static str, value: &str) -> Self {
    Self {
      kind,
      value: value.to_string(),
    }
  }
}
