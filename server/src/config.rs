// server/src/config.rs

use crate::errors::{AppError, Result};
use archiplan_core::DEFAULT_COUNTRY;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// Only origin allowed by CORS.
  pub frontend_url: String,
  /// PostgreSQL URL. `None` runs the API on the in-memory repository.
  pub database_url: Option<String>,
  pub run_migrations: bool,
  pub seed_db: bool,
  pub default_country: String,
  pub mail_sender: String,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 4000,
      frontend_url: "http://localhost:3000".to_string(),
      database_url: None,
      run_migrations: true,
      seed_db: false,
      default_country: DEFAULT_COUNTRY.to_string(),
      mail_sender: "noreply@archiplan.dev".to_string(),
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // .env is optional

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());
    let defaults = Self::default();

    let server_port = port_from(get_env)?.unwrap_or(defaults.server_port);
    let run_migrations = match get_env("RUN_MIGRATIONS") {
      Some(raw) => parse_var("RUN_MIGRATIONS", &raw)?,
      None => defaults.run_migrations,
    };
    let seed_db = match get_env("SEED_DB") {
      Some(raw) => parse_var("SEED_DB", &raw)?,
      None => defaults.seed_db,
    };

    let config = Self {
      server_host: get_env("SERVER_HOST").unwrap_or(defaults.server_host),
      server_port,
      frontend_url: get_env("FRONTEND_URL").unwrap_or(defaults.frontend_url),
      database_url: get_env("DATABASE_URL"),
      run_migrations,
      seed_db,
      default_country: get_env("DEFAULT_COUNTRY").unwrap_or(defaults.default_country),
      mail_sender: get_env("MAIL_SENDER").unwrap_or(defaults.mail_sender),
    };

    tracing::info!(
      host = %config.server_host,
      port = config.server_port,
      persistent = config.database_url.is_some(),
      "Application configuration loaded."
    );
    Ok(config)
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .trim()
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", name, raw, e)))
}

/// `SERVER_PORT`, falling back to `PORT`. Parse errors name the variable
/// the value came from.
fn port_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<u16>> {
  for name in ["SERVER_PORT", "PORT"] {
    if let Some(raw) = lookup(name) {
      return parse_var(name, &raw).map(Some);
    }
  }
  Ok(None)
}
