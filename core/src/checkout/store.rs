// core/src/checkout/store.rs

use crate::checkout::persistence::{SnapshotStore, CHECKOUT_SNAPSHOT_KEY};
use crate::checkout::step::CheckoutStep;
use crate::domain::{BuyerInfo, PaymentInfo, Project, ReservationType};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Everything an in-progress checkout knows. Also the persisted snapshot shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutState {
  pub current_step: CheckoutStep,
  pub selected_project: Option<Project>,
  pub buyer_info: Option<BuyerInfo>,
  pub payment_info: Option<PaymentInfo>,
  pub reservation_type: ReservationType,
}

/// Why `go_to_step` refused to move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationBlocked {
  #[error("a project must be selected first")]
  MissingProject,
  #[error("buyer information must be completed first")]
  MissingBuyerInfo,
  #[error("payment information must be completed first")]
  MissingPaymentInfo,
  #[error("the confirmation step is only reached by submitting the order")]
  SubmissionRequired,
}

/// Single source of truth for one checkout, with guarded step navigation.
///
/// No operation fails loudly: rejected navigation is reported as a value and
/// snapshot persistence failures are logged and otherwise ignored.
pub struct CheckoutStore {
  state: CheckoutState,
  snapshots: Option<Arc<dyn SnapshotStore>>,
}

impl Default for CheckoutStore {
  fn default() -> Self {
    Self::new()
  }
}

impl std::fmt::Debug for CheckoutStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CheckoutStore")
      .field("state", &self.state)
      .field("persistent", &self.snapshots.is_some())
      .finish()
  }
}

impl CheckoutStore {
  /// A store that keeps nothing beyond its own lifetime.
  pub fn new() -> Self {
    Self {
      state: CheckoutState::default(),
      snapshots: None,
    }
  }

  /// A store backed by `snapshots`, resumed from the last saved snapshot if
  /// one exists and parses.
  pub fn restore(snapshots: Arc<dyn SnapshotStore>) -> Self {
    let state = match snapshots.load(CHECKOUT_SNAPSHOT_KEY) {
      Ok(Some(raw)) => serde_json::from_str::<CheckoutState>(&raw).unwrap_or_else(|e| {
        warn!(error = %e, "Discarding unreadable checkout snapshot.");
        CheckoutState::default()
      }),
      Ok(None) => CheckoutState::default(),
      Err(e) => {
        warn!(error = %e, "Failed to load checkout snapshot.");
        CheckoutState::default()
      }
    };
    Self {
      state,
      snapshots: Some(snapshots),
    }
  }

  pub fn state(&self) -> &CheckoutState {
    &self.state
  }

  pub fn current_step(&self) -> CheckoutStep {
    self.state.current_step
  }

  pub fn step_index(&self) -> usize {
    self.state.current_step.index()
  }

  pub fn selected_project(&self) -> Option<&Project> {
    self.state.selected_project.as_ref()
  }

  pub fn buyer_info(&self) -> Option<&BuyerInfo> {
    self.state.buyer_info.as_ref()
  }

  pub fn payment_info(&self) -> Option<&PaymentInfo> {
    self.state.payment_info.as_ref()
  }

  pub fn reservation_type(&self) -> ReservationType {
    self.state.reservation_type
  }

  /// Does not advance the step.
  pub fn select_project(&mut self, project: Project) {
    debug!(project_id = %project.id, "Project selected.");
    self.state.selected_project = Some(project);
    self.persist();
  }

  /// Without a project no later step makes sense, so the store falls back to
  /// project selection.
  pub fn clear_project(&mut self) {
    self.state.selected_project = None;
    if self.state.current_step > CheckoutStep::ProjectSelection {
      self.state.current_step = CheckoutStep::ProjectSelection;
    }
    self.persist();
  }

  pub fn set_reservation_type(&mut self, kind: ReservationType) {
    self.state.reservation_type = kind;
    self.persist();
  }

  pub fn set_buyer_info(&mut self, info: BuyerInfo) {
    self.state.buyer_info = Some(info);
    self.persist();
  }

  pub fn set_payment_info(&mut self, info: PaymentInfo) {
    self.state.payment_info = Some(info);
    self.persist();
  }

  /// Advances one step, stopping at `Review`. Validation is the caller's job.
  pub fn next_step(&mut self) -> CheckoutStep {
    if self.state.current_step < CheckoutStep::Review {
      if let Some(next) = self.state.current_step.next() {
        self.state.current_step = next;
        self.persist();
      }
    }
    self.state.current_step
  }

  pub fn prev_step(&mut self) -> CheckoutStep {
    if let Some(prev) = self.state.current_step.prev() {
      self.state.current_step = prev;
      self.persist();
    }
    self.state.current_step
  }

  /// Moves to `target`. Backward moves and staying put always succeed; forward
  /// moves need every slice up to the target filled in.
  pub fn go_to_step(&mut self, target: CheckoutStep) -> Result<CheckoutStep, NavigationBlocked> {
    if target > self.state.current_step {
      if let Err(reason) = self.check_prerequisites(target) {
        debug!(?target, %reason, "Forward navigation rejected.");
        return Err(reason);
      }
    }
    self.state.current_step = target;
    self.persist();
    Ok(target)
  }

  /// Whether the slice owned by the current step has been filled.
  pub fn can_proceed(&self) -> bool {
    match self.state.current_step {
      CheckoutStep::ProjectSelection => self.state.selected_project.is_some(),
      CheckoutStep::BuyerInfo => self.state.buyer_info.is_some(),
      CheckoutStep::PaymentInfo => self.state.payment_info.is_some(),
      CheckoutStep::Review => true,
      CheckoutStep::Confirmation => false,
    }
  }

  pub fn reset(&mut self) {
    self.state = CheckoutState::default();
    self.persist();
  }

  fn check_prerequisites(&self, target: CheckoutStep) -> Result<(), NavigationBlocked> {
    if target >= CheckoutStep::BuyerInfo && self.state.selected_project.is_none() {
      return Err(NavigationBlocked::MissingProject);
    }
    if target >= CheckoutStep::PaymentInfo && self.state.buyer_info.is_none() {
      return Err(NavigationBlocked::MissingBuyerInfo);
    }
    if target >= CheckoutStep::Review && self.state.payment_info.is_none() {
      return Err(NavigationBlocked::MissingPaymentInfo);
    }
    if target == CheckoutStep::Confirmation {
      return Err(NavigationBlocked::SubmissionRequired);
    }
    Ok(())
  }

  fn persist(&self) {
    let Some(snapshots) = &self.snapshots else { return };
    let result = serde_json::to_string(&self.state)
      .map_err(anyhow::Error::from)
      .and_then(|raw| snapshots.save(CHECKOUT_SNAPSHOT_KEY, &raw));
    if let Err(e) = result {
      warn!(error = %e, "Failed to persist checkout snapshot.");
    }
  }
}
