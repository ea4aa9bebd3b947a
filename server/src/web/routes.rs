// server/src/web/routes.rs

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::{checkout_handlers, health_handlers, project_handlers, reservation_handlers};

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  tracing::debug!(error = %err, "Rejecting malformed JSON body.");
  AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
}

/// Registers shared state, the JSON body policy and every `/api` route.
/// Called from `main.rs` and from the HTTP tests.
pub fn configure_app(cfg: &mut web::ServiceConfig, state: AppState) {
  cfg
    .app_data(web::Data::new(state))
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .service(
      web::scope("/api")
        .route("/health", web::get().to(health_handlers::health_check_handler))
        .service(
          web::scope("/projects")
            .route("", web::get().to(project_handlers::list_projects_handler))
            .route(
              "/category/{category}",
              web::get().to(project_handlers::list_projects_by_category_handler),
            )
            .route("/{id}", web::get().to(project_handlers::get_project_handler)),
        )
        .service(
          web::scope("/reservations")
            .route("", web::get().to(reservation_handlers::list_reservations_handler))
            .route(
              "/number/{number}",
              web::get().to(reservation_handlers::get_reservation_by_number_handler),
            )
            .route("/{id}", web::get().to(reservation_handlers::get_reservation_handler))
            .route(
              "/{id}/status",
              web::patch().to(reservation_handlers::update_reservation_status_handler),
            ),
        )
        .service(
          web::scope("/checkout")
            .route("", web::post().to(checkout_handlers::create_checkout_handler))
            .route("/validate", web::post().to(checkout_handlers::validate_checkout_handler))
            .route(
              "/summary/{project_id}",
              web::get().to(checkout_handlers::checkout_summary_handler),
            ),
        ),
    )
    .default_service(web::to(health_handlers::endpoint_not_found_handler));
}
