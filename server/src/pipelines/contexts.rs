// server/src/pipelines/contexts.rs

//! Data carried through a checkout pipeline run. Handlers receive it wrapped
//! in `archiplan_core::ContextData`.

use crate::models::{CheckoutRequest, ReservationDetails};
use crate::state::AppState;
use archiplan_core::{CheckoutPayload, Project};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutMode {
  /// Validate, persist and dispatch follow-ups.
  Create,
  /// Run the checks only. Nothing is written.
  ValidateOnly,
}

pub struct CheckoutCtxData {
  pub app_state: AppState,
  pub mode: CheckoutMode,
  /// Consumed by the validation step.
  pub request: Option<CheckoutRequest>,
  pub payload: Option<CheckoutPayload>,
  pub project: Option<Project>,
  pub reservation: Option<ReservationDetails>,
  pub follow_ups: Vec<JoinHandle<()>>,
}

impl CheckoutCtxData {
  pub fn new(app_state: AppState, request: CheckoutRequest, mode: CheckoutMode) -> Self {
    Self {
      app_state,
      mode,
      request: Some(request),
      payload: None,
      project: None,
      reservation: None,
      follow_ups: Vec::new(),
    }
  }
}
