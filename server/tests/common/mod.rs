// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every fixture.

use archiplan_core::Project;
use archiplan_server::repository::seed::sample_projects;
use archiplan_server::repository::InMemCheckoutRepo;
use archiplan_server::{AppConfig, AppState};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::Level;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub const INACTIVE_PROJECT_ID: &str = "p-retired";

/// The sample catalog plus one inactive project.
pub fn catalog() -> Vec<Project> {
  let mut projects = sample_projects();
  let mut retired = projects[1].clone();
  retired.id = INACTIVE_PROJECT_ID.to_string();
  retired.name = "Retired Loft".to_string();
  retired.is_active = false;
  projects.push(retired);
  projects
}

pub fn test_state() -> AppState {
  setup_tracing();
  let repo = Arc::new(InMemCheckoutRepo::with_projects(catalog()));
  AppState::new(repo, AppConfig::default())
}

pub fn buyer_json(email: &str) -> Value {
  json!({
    "firstName": "Ana",
    "lastName": "Ruiz",
    "email": email,
    "phone": "5512345678",
    "documentType": "dni",
    "documentNumber": "RUIZ800101",
    "address": "Av. Reforma 222",
    "city": "Ciudad de México",
    "state": "CDMX",
    "postalCode": "06600"
  })
}

/// A complete card purchase of `project_id`.
pub fn purchase_body(project_id: &str, email: &str) -> Value {
  json!({
    "projectId": project_id,
    "reservationType": "purchase",
    "buyer": buyer_json(email),
    "payment": {
      "paymentMethod": "card",
      "cardholderName": "Ana Ruiz",
      "billingAddress": { "sameAsShipping": true }
    }
  })
}

pub fn quote_body(project_id: &str, email: &str) -> Value {
  json!({
    "projectId": project_id,
    "reservationType": "quote",
    "buyer": buyer_json(email),
    "payment": { "paymentMethod": "quote" }
  })
}
