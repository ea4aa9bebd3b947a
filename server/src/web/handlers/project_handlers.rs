// server/src/web/handlers/project_handlers.rs

use actix_web::{web, HttpResponse};
use archiplan_core::ProjectCategory;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::list_projects", skip(app_state))]
pub async fn list_projects_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let projects = app_state.repo.list_active_projects().await?;
  info!("Fetched {} active projects.", projects.len());
  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "total": projects.len(),
    "data": projects,
  })))
}

#[instrument(name = "handler::get_project", skip(app_state, path), fields(project_id = %path.as_str()))]
pub async fn get_project_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let project_id = path.into_inner();
  match app_state.repo.find_project(&project_id).await? {
    Some(project) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": project }))),
    None => {
      warn!("Project {} not found.", project_id);
      Err(AppError::NotFound("Project not found".to_string()))
    }
  }
}

#[instrument(name = "handler::list_projects_by_category", skip(app_state, path), fields(category = %path.as_str()))]
pub async fn list_projects_by_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let category: ProjectCategory = path
    .parse()
    .map_err(|_| AppError::BadRequest(format!("Invalid category: {}", path.as_str())))?;
  let projects = app_state.repo.list_projects_by_category(category).await?;
  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "total": projects.len(),
    "data": projects,
  })))
}
