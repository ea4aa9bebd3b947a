// server/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use archiplan_core::ReservationType;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::CheckoutRequest;
use crate::pipelines::{run_checkout, CheckoutMode};
use crate::state::AppState;

#[instrument(name = "handler::create_checkout", skip(app_state, body))]
pub async fn create_checkout_handler(
  app_state: web::Data<AppState>,
  body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
  let outcome = run_checkout(&app_state, body.into_inner(), CheckoutMode::Create).await?;
  let details = outcome
    .reservation
    .ok_or_else(|| AppError::Internal("Checkout completed without a reservation".to_string()))?;

  info!(
    reservation_number = %details.reservation.reservation_number,
    follow_ups = outcome.follow_ups.len(),
    "Checkout completed."
  );
  let message = match details.reservation.reservation_type {
    ReservationType::Quote => "Quote request created successfully",
    ReservationType::Purchase => "Reservation created successfully",
  };
  Ok(HttpResponse::Created().json(json!({
    "success": true,
    "data": details,
    "message": message,
  })))
}

#[instrument(name = "handler::validate_checkout", skip(app_state, body))]
pub async fn validate_checkout_handler(
  app_state: web::Data<AppState>,
  body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
  match run_checkout(&app_state, body.into_inner(), CheckoutMode::ValidateOnly).await {
    Ok(_) => Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "valid": true,
      "message": "Checkout data is valid",
    }))),
    Err(AppError::Validation(errors)) => Ok(HttpResponse::BadRequest().json(json!({
      "success": false,
      "valid": false,
      "errors": errors,
    }))),
    Err(other) => Err(other),
  }
}

/// Price breakdown for any known project, active or not.
#[instrument(name = "handler::checkout_summary", skip(app_state, path), fields(project_id = %path.as_str()))]
pub async fn checkout_summary_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let project = app_state
    .repo
    .find_project(&path)
    .await?
    .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

  let subtotal = project.price;
  let tax = Decimal::ZERO;
  let currency = project.currency.clone();
  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "data": {
      "project": project,
      "subtotal": subtotal,
      "tax": tax,
      "total": subtotal + tax,
      "currency": currency,
    },
  })))
}
