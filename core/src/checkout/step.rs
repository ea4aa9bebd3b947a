// core/src/checkout/step.rs

use serde::{Deserialize, Serialize};

/// Checkout steps in their fixed order. The derived ordering is the step order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckoutStep {
  #[default]
  ProjectSelection,
  BuyerInfo,
  PaymentInfo,
  Review,
  Confirmation,
}

impl CheckoutStep {
  pub const ALL: [CheckoutStep; 5] = [
    CheckoutStep::ProjectSelection,
    CheckoutStep::BuyerInfo,
    CheckoutStep::PaymentInfo,
    CheckoutStep::Review,
    CheckoutStep::Confirmation,
  ];

  pub fn index(&self) -> usize {
    *self as usize
  }

  pub fn next(&self) -> Option<CheckoutStep> {
    Self::ALL.get(self.index() + 1).copied()
  }

  pub fn prev(&self) -> Option<CheckoutStep> {
    self.index().checked_sub(1).map(|i| Self::ALL[i])
  }
}
