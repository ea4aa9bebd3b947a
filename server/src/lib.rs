// server/src/lib.rs

//! Archiplan REST backend: project catalog, reservations and the checkout
//! endpoint, run on actix-web over a PostgreSQL or in-memory repository.

pub mod config;
pub mod errors;
pub mod models;
pub mod pipelines;
pub mod repository;
pub mod services;
pub mod state;
pub mod web;

pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use state::{build_state, AppState};
