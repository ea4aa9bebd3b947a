// server/src/web/handlers/reservation_handlers.rs

use actix_web::{web, HttpResponse};
use archiplan_core::ReservationStatus;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
  #[serde(default)]
  pub status: Option<String>,
}

/// Ids that do not parse cannot name a reservation, so they read as missing.
fn parse_reservation_id(raw: &str) -> Result<Uuid, AppError> {
  Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Reservation not found".to_string()))
}

#[instrument(name = "handler::list_reservations", skip(app_state))]
pub async fn list_reservations_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let reservations = app_state.repo.list_reservations().await?;
  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "total": reservations.len(),
    "data": reservations,
  })))
}

#[instrument(name = "handler::get_reservation", skip(app_state, path), fields(reservation_id = %path.as_str()))]
pub async fn get_reservation_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let id = parse_reservation_id(&path)?;
  let details = app_state
    .repo
    .find_reservation(id)
    .await?
    .ok_or_else(|| AppError::NotFound("Reservation not found".to_string()))?;
  Ok(HttpResponse::Ok().json(json!({ "success": true, "data": details })))
}

#[instrument(name = "handler::get_reservation_by_number", skip(app_state, path), fields(reservation_number = %path.as_str()))]
pub async fn get_reservation_by_number_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let details = app_state
    .repo
    .find_reservation_by_number(&path)
    .await?
    .ok_or_else(|| AppError::NotFound("Reservation not found".to_string()))?;
  Ok(HttpResponse::Ok().json(json!({ "success": true, "data": details })))
}

#[instrument(name = "handler::update_reservation_status", skip(app_state, path, body), fields(reservation_id = %path.as_str()))]
pub async fn update_reservation_status_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  body: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, AppError> {
  let id = parse_reservation_id(&path)?;
  let status: ReservationStatus = body
    .status
    .as_deref()
    .and_then(|s| s.parse().ok())
    .ok_or_else(|| AppError::BadRequest("Invalid status".to_string()))?;

  let details = app_state.repo.update_reservation_status(id, status).await?;
  info!(%status, "Reservation status updated.");
  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "data": details,
    "message": "Reservation status updated successfully",
  })))
}
