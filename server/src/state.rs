// server/src/state.rs

use crate::config::AppConfig;
use crate::pipelines::{build_checkout_pipeline, CheckoutPipeline};
use crate::repository::seed::sample_projects;
use crate::repository::{AbstCheckoutRepo, InMemCheckoutRepo, PgCheckoutRepo};
use crate::services::FollowUpDispatcher;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
  pub repo: Arc<dyn AbstCheckoutRepo>,
  pub checkout_pipeline: Arc<CheckoutPipeline>,
  pub config: Arc<AppConfig>, // Share loaded config
  pub follow_ups: Arc<FollowUpDispatcher>,
}

impl AppState {
  pub fn new(repo: Arc<dyn AbstCheckoutRepo>, config: AppConfig) -> Self {
    let follow_ups = Arc::new(FollowUpDispatcher::new(config.mail_sender.clone()));
    Self {
      repo,
      checkout_pipeline: Arc::new(build_checkout_pipeline()),
      config: Arc::new(config),
      follow_ups,
    }
  }
}

/// Picks the repository from the configuration: PostgreSQL when a database
/// URL is set, the in-memory store otherwise. The in-memory store always
/// starts with the sample catalog.
pub async fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
  let repo: Arc<dyn AbstCheckoutRepo> = match config.database_url.as_deref() {
    Some(url) => {
      let repo = PgCheckoutRepo::connect(url).await?;
      if config.run_migrations {
        repo.run_migrations().await?;
      }
      if config.seed_db {
        let added = repo.seed_projects(&sample_projects()).await?;
        info!(added, "Database seeded with sample projects.");
      }
      Arc::new(repo)
    }
    None => {
      info!("DATABASE_URL not set, using the in-memory repository.");
      Arc::new(InMemCheckoutRepo::with_projects(sample_projects()))
    }
  };
  Ok(AppState::new(repo, config))
}
