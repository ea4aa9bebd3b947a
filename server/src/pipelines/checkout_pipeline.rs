// server/src/pipelines/checkout_pipeline.rs

use crate::errors::{AppError, Result as AppResult};
use crate::models::{CheckoutOrder, CheckoutRequest, ReservationDetails};
use crate::pipelines::contexts::{CheckoutCtxData, CheckoutMode};
use crate::state::AppState;
use archiplan_core::pipeline::SkipCondition;
use archiplan_core::{CheckoutPayload, ContextData, FieldErrors, Pipeline, PipelineControl, Project};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

pub const VALIDATE_PAYLOAD: &str = "validate_checkout_payload";
pub const LOAD_PROJECT: &str = "load_project";
pub const PERSIST_RESERVATION: &str = "persist_reservation";
pub const DISPATCH_FOLLOW_UPS: &str = "dispatch_follow_ups";

const PROJECT_NOT_FOUND: &str = "Project not found";
const PROJECT_UNAVAILABLE: &str = "This project is no longer available";

pub type CheckoutPipeline = Pipeline<CheckoutCtxData, AppError>;

/// What a finished checkout run produced.
pub struct CheckoutOutcome {
  pub payload: CheckoutPayload,
  pub project: Project,
  /// `None` in `ValidateOnly` mode.
  pub reservation: Option<ReservationDetails>,
  pub follow_ups: Vec<JoinHandle<()>>,
}

pub fn build_checkout_pipeline() -> CheckoutPipeline {
  let validate_only: SkipCondition<CheckoutCtxData> =
    Arc::new(|ctx: ContextData<CheckoutCtxData>| ctx.read().mode == CheckoutMode::ValidateOnly);

  let mut p = Pipeline::<CheckoutCtxData, AppError>::new(&[
    (VALIDATE_PAYLOAD, false, None),
    (LOAD_PROJECT, false, None),
    (PERSIST_RESERVATION, false, Some(validate_only.clone())),
    (DISPATCH_FOLLOW_UPS, true, Some(validate_only)),
  ]);

  p.on_root(VALIDATE_PAYLOAD, validate_checkout_payload);
  p.on_root(LOAD_PROJECT, load_project);
  p.on_root(PERSIST_RESERVATION, persist_reservation);
  p.on_root(DISPATCH_FOLLOW_UPS, dispatch_follow_ups);
  p
}

/// Runs the checkout pipeline for one request.
#[instrument(name = "checkout_pipeline::run_checkout", skip(state, request))]
pub async fn run_checkout(state: &AppState, request: CheckoutRequest, mode: CheckoutMode) -> AppResult<CheckoutOutcome> {
  let ctx = ContextData::new(CheckoutCtxData::new(state.clone(), request, mode));
  state.checkout_pipeline.run(ctx.clone()).await?;

  let data = ctx
    .try_into_inner()
    .ok_or_else(|| AppError::Internal("checkout context still shared after the run".to_string()))?;
  match (data.payload, data.project) {
    (Some(payload), Some(project)) => Ok(CheckoutOutcome {
      payload,
      project,
      reservation: data.reservation,
      follow_ups: data.follow_ups,
    }),
    _ => Err(AppError::Internal("checkout pipeline finished without a payload".to_string())),
  }
}

async fn validate_checkout_payload(ctx: ContextData<CheckoutCtxData>) -> AppResult<PipelineControl> {
  let request = ctx.write().request.take().unwrap_or_default();
  match request.into_payload() {
    Ok(payload) => {
      debug!(project_id = %payload.project_id, reservation_type = ?payload.reservation_type, "Checkout payload is valid.");
      ctx.write().payload = Some(payload);
      Ok(PipelineControl::Continue)
    }
    Err(errors) => {
      info!(failed_fields = errors.len(), "Checkout payload rejected.");
      Err(AppError::Validation(errors))
    }
  }
}

async fn load_project(ctx: ContextData<CheckoutCtxData>) -> AppResult<PipelineControl> {
  let (repo, project_id, mode) = {
    let guard = ctx.read();
    let project_id = guard
      .payload
      .as_ref()
      .map(|p| p.project_id.clone())
      .ok_or_else(|| AppError::Internal("project lookup ran before validation".to_string()))?;
    (guard.app_state.repo.clone(), project_id, guard.mode)
  };

  let project = repo.find_project(&project_id).await?;
  let rejection = match &project {
    None => Some(PROJECT_NOT_FOUND),
    Some(p) if !p.is_active => Some(PROJECT_UNAVAILABLE),
    Some(_) => None,
  };
  if let Some(message) = rejection {
    warn!(%project_id, message, "Checkout refused for project.");
    return Err(match (mode, project.is_some()) {
      (CheckoutMode::ValidateOnly, _) => AppError::Validation(FieldErrors::single("projectId", message)),
      (CheckoutMode::Create, false) => AppError::NotFound(message.to_string()),
      (CheckoutMode::Create, true) => AppError::Unavailable(message.to_string()),
    });
  }

  ctx.write().project = project;
  Ok(PipelineControl::Continue)
}

async fn persist_reservation(ctx: ContextData<CheckoutCtxData>) -> AppResult<PipelineControl> {
  let (repo, order) = {
    let guard = ctx.read();
    let (Some(payload), Some(project)) = (guard.payload.clone(), guard.project.clone()) else {
      return Err(AppError::Internal("persist ran without a validated payload and project".to_string()));
    };
    let order = CheckoutOrder {
      project,
      reservation_type: payload.reservation_type,
      buyer: payload.buyer,
      payment: payload.payment,
      default_country: guard.app_state.config.default_country.clone(),
    };
    (guard.app_state.repo.clone(), order)
  };

  let details = repo.create_reservation(&order).await?;
  info!(
    reservation_number = %details.reservation.reservation_number,
    status = %details.reservation.status,
    total = %details.reservation.total_amount,
    "Reservation created."
  );
  ctx.write().reservation = Some(details);
  Ok(PipelineControl::Continue)
}

async fn dispatch_follow_ups(ctx: ContextData<CheckoutCtxData>) -> AppResult<PipelineControl> {
  let mut guard = ctx.write();
  if let Some(details) = guard.reservation.as_ref() {
    let handles = guard.app_state.follow_ups.dispatch(details);
    guard.follow_ups = handles;
  }
  Ok(PipelineControl::Continue)
}
