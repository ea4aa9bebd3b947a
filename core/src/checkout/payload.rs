// core/src/checkout/payload.rs

use crate::checkout::store::CheckoutState;
use crate::domain::{BuyerInfo, PaymentInfo, ReservationType};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/checkout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
  pub project_id: String,
  pub reservation_type: ReservationType,
  pub buyer: BuyerInfo,
  pub payment: PaymentInfo,
}

impl CheckoutPayload {
  /// `None` unless project, buyer and payment are all present.
  pub fn from_state(state: &CheckoutState) -> Option<Self> {
    let project = state.selected_project.as_ref()?;
    Some(Self {
      project_id: project.id.clone(),
      reservation_type: state.reservation_type,
      buyer: state.buyer_info.clone()?,
      payment: state.payment_info.clone()?,
    })
  }
}
