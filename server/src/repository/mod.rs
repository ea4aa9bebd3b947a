// server/src/repository/mod.rs

//! Storage behind the API: a PostgreSQL implementation and an in-memory one
//! with the same all-or-nothing checkout semantics.

mod in_mem;
mod pg;
pub mod reservation_number;
pub mod seed;

pub use in_mem::InMemCheckoutRepo;
pub use pg::PgCheckoutRepo;

use crate::errors::Result as AppResult;
use crate::models::{CheckoutOrder, ReservationDetails};
use archiplan_core::{Project, ProjectCategory, ReservationStatus};
use async_trait::async_trait;
use uuid::Uuid;

/// Attempts at drawing a reservation number before the checkout gives up.
pub const MAX_RESERVATION_NUMBER_ATTEMPTS: usize = 5;

/// Produces candidate reservation numbers.
pub type NumberGenerator = fn() -> String;

/// Row totals of the checkout tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCounts {
  pub buyers: i64,
  pub payment_infos: i64,
  pub reservations: i64,
}

#[async_trait]
pub trait AbstCheckoutRepo: Sync + Send {
  /// Active projects, newest first.
  async fn list_active_projects(&self) -> AppResult<Vec<Project>>;

  async fn list_projects_by_category(&self, category: ProjectCategory) -> AppResult<Vec<Project>>;

  /// Any project with this id, active or not.
  async fn find_project(&self, id: &str) -> AppResult<Option<Project>>;

  /// Buyer upsert, payment-info insert and reservation insert as one unit.
  /// On error nothing is persisted.
  async fn create_reservation(&self, order: &CheckoutOrder) -> AppResult<ReservationDetails>;

  /// Newest first.
  async fn list_reservations(&self) -> AppResult<Vec<ReservationDetails>>;

  async fn find_reservation(&self, id: Uuid) -> AppResult<Option<ReservationDetails>>;

  async fn find_reservation_by_number(&self, number: &str) -> AppResult<Option<ReservationDetails>>;

  /// Fails with `NotFound` for an unknown id and `InvalidTransition` when the
  /// current status may not move to `next`.
  async fn update_reservation_status(&self, id: Uuid, next: ReservationStatus) -> AppResult<ReservationDetails>;

  async fn row_counts(&self) -> AppResult<RowCounts>;

  /// Inserts projects whose id is not taken yet. Returns how many were added.
  async fn seed_projects(&self, projects: &[Project]) -> AppResult<usize>;
}

pub(crate) fn transition_error(current: ReservationStatus, next: ReservationStatus) -> crate::errors::AppError {
  crate::errors::AppError::InvalidTransition(format!(
    "Cannot change reservation status from {} to {}",
    current, next
  ))
}

pub(crate) fn reservation_not_found() -> crate::errors::AppError {
  crate::errors::AppError::NotFound("Reservation not found".to_string())
}
