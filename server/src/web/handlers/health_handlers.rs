// server/src/web/handlers/health_handlers.rs

use actix_web::HttpResponse;
use chrono::Utc;
use serde_json::json;

pub async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "status": "ok",
    "timestamp": Utc::now(),
    "service": "archiplan-api",
  }))
}

pub async fn endpoint_not_found_handler() -> HttpResponse {
  HttpResponse::NotFound().json(json!({ "error": "Endpoint not found" }))
}
