// server/src/main.rs

use actix_cors::Cors;
use actix_web::{http::header, App, HttpServer};
use anyhow::Context;
use archiplan_server::{build_state, web::configure_app, AppConfig};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))) // RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting Archiplan API server...");

  let app_config = AppConfig::from_env().context("Failed to load application configuration")?;
  let bind_address = app_config.bind_address();
  let frontend_url = app_config.frontend_url.clone();

  let app_state = build_state(app_config).await.context("Failed to initialize application state")?;

  tracing::info!("Attempting to bind server to {}...", bind_address);
  HttpServer::new(move || {
    let cors = Cors::default()
      .allowed_origin(&frontend_url)
      .allowed_methods(vec!["GET", "POST", "PATCH", "OPTIONS"])
      .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
      .supports_credentials()
      .max_age(3600);

    App::new()
      .wrap(cors)
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(|cfg| configure_app(cfg, app_state.clone()))
  })
  .bind(&bind_address)?
  .run()
  .await?;

  Ok(())
}
