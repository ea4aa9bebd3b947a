// server/src/repository/in_mem.rs

use super::reservation_number::generate_reservation_number;
use super::{
  reservation_not_found, transition_error, AbstCheckoutRepo, NumberGenerator, RowCounts,
  MAX_RESERVATION_NUMBER_ATTEMPTS,
};
use crate::errors::{AppError, Result as AppResult};
use crate::models::{Buyer, CheckoutOrder, PaymentInfoRecord, Reservation, ReservationDetails};
use archiplan_core::{Project, ProjectCategory, ReservationStatus};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
struct Tables {
  projects: HashMap<String, Project>,
  buyers: HashMap<Uuid, Buyer>,
  buyer_ids_by_email: HashMap<String, Uuid>,
  payment_infos: HashMap<Uuid, PaymentInfoRecord>,
  reservations: HashMap<Uuid, Reservation>,
}

impl Tables {
  fn details(&self, reservation: &Reservation) -> AppResult<ReservationDetails> {
    let dangling = |what: &str| AppError::Internal(format!("reservation {} references a missing {}", reservation.id, what));
    Ok(ReservationDetails {
      reservation: reservation.clone(),
      project: self.projects.get(&reservation.project_id).cloned().ok_or_else(|| dangling("project"))?,
      buyer: self.buyers.get(&reservation.buyer_id).cloned().ok_or_else(|| dangling("buyer"))?,
      payment_info: self
        .payment_infos
        .get(&reservation.payment_info_id)
        .cloned()
        .ok_or_else(|| dangling("payment info"))?,
    })
  }

  fn active_projects_newest_first(&self, keep: impl Fn(&Project) -> bool) -> Vec<Project> {
    let mut projects: Vec<Project> = self.projects.values().filter(|p| p.is_active && keep(p)).cloned().collect();
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    projects
  }
}

/// Process-local repository. One mutex guards all tables; a checkout works on
/// a staged copy and swaps it in only when every write succeeded.
pub struct InMemCheckoutRepo {
  tables: Mutex<Tables>,
  next_number: NumberGenerator,
}

impl Default for InMemCheckoutRepo {
  fn default() -> Self {
    Self::new()
  }
}

impl InMemCheckoutRepo {
  pub fn new() -> Self {
    Self {
      tables: Mutex::new(Tables::default()),
      next_number: generate_reservation_number,
    }
  }

  /// An empty repository preloaded with `projects`.
  pub fn with_projects(projects: Vec<Project>) -> Self {
    let repo = Self::new();
    {
      let mut tables = repo.tables.lock();
      for project in projects {
        tables.projects.insert(project.id.clone(), project);
      }
    }
    repo
  }

  pub fn with_number_generator(mut self, generator: NumberGenerator) -> Self {
    self.next_number = generator;
    self
  }
}

#[async_trait]
impl AbstCheckoutRepo for InMemCheckoutRepo {
  async fn list_active_projects(&self) -> AppResult<Vec<Project>> {
    Ok(self.tables.lock().active_projects_newest_first(|_| true))
  }

  async fn list_projects_by_category(&self, category: ProjectCategory) -> AppResult<Vec<Project>> {
    Ok(self.tables.lock().active_projects_newest_first(move |p| p.category == category))
  }

  async fn find_project(&self, id: &str) -> AppResult<Option<Project>> {
    Ok(self.tables.lock().projects.get(id).cloned())
  }

  #[instrument(name = "InMemCheckoutRepo::create_reservation", skip_all, fields(project_id = %order.project.id))]
  async fn create_reservation(&self, order: &CheckoutOrder) -> AppResult<ReservationDetails> {
    let mut tables = self.tables.lock();
    let mut staged = tables.clone();
    let now = Utc::now();

    if !staged.projects.contains_key(&order.project.id) {
      return Err(AppError::NotFound("Project not found".to_string()));
    }

    let email = order.buyer.email.trim().to_string();
    let buyer_id = match staged.buyer_ids_by_email.get(&email).copied() {
      Some(id) => {
        let buyer = staged
          .buyers
          .get_mut(&id)
          .ok_or_else(|| AppError::Internal(format!("buyer index points at missing buyer {}", id)))?;
        buyer.overwrite_with(&order.buyer, &order.default_country, now);
        id
      }
      None => {
        let mut buyer = Buyer::new(&order.buyer, &order.default_country, now);
        buyer.email = email.clone();
        let id = buyer.id;
        staged.buyers.insert(id, buyer);
        staged.buyer_ids_by_email.insert(email, id);
        id
      }
    };

    let payment_info = PaymentInfoRecord::new(&order.payment, now);
    let payment_info_id = payment_info.id;
    staged.payment_infos.insert(payment_info_id, payment_info);

    let mut reservation = None;
    for attempt in 1..=MAX_RESERVATION_NUMBER_ATTEMPTS {
      let number = (self.next_number)();
      if staged.reservations.values().any(|r| r.reservation_number == number) {
        debug!(attempt, %number, "Reservation number already taken, drawing again.");
        continue;
      }
      reservation = Some(order.new_reservation(number, buyer_id, payment_info_id, now));
      break;
    }
    let Some(reservation) = reservation else {
      warn!("Could not allocate a unique reservation number.");
      return Err(AppError::Internal("Could not allocate a unique reservation number".to_string()));
    };

    let details = staged.details(&reservation)?;
    staged.reservations.insert(reservation.id, reservation);
    *tables = staged;
    Ok(details)
  }

  async fn list_reservations(&self) -> AppResult<Vec<ReservationDetails>> {
    let tables = self.tables.lock();
    let mut reservations: Vec<&Reservation> = tables.reservations.values().collect();
    reservations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    reservations.into_iter().map(|r| tables.details(r)).collect()
  }

  async fn find_reservation(&self, id: Uuid) -> AppResult<Option<ReservationDetails>> {
    let tables = self.tables.lock();
    tables.reservations.get(&id).map(|r| tables.details(r)).transpose()
  }

  async fn find_reservation_by_number(&self, number: &str) -> AppResult<Option<ReservationDetails>> {
    let tables = self.tables.lock();
    tables
      .reservations
      .values()
      .find(|r| r.reservation_number == number)
      .map(|r| tables.details(r))
      .transpose()
  }

  async fn update_reservation_status(&self, id: Uuid, next: ReservationStatus) -> AppResult<ReservationDetails> {
    let mut tables = self.tables.lock();
    let reservation = tables.reservations.get_mut(&id).ok_or_else(reservation_not_found)?;
    if !reservation.status.can_transition_to(next) {
      return Err(transition_error(reservation.status, next));
    }
    reservation.apply_status(next, Utc::now());
    let updated = reservation.clone();
    tables.details(&updated)
  }

  async fn row_counts(&self) -> AppResult<RowCounts> {
    let tables = self.tables.lock();
    Ok(RowCounts {
      buyers: tables.buyers.len() as i64,
      payment_infos: tables.payment_infos.len() as i64,
      reservations: tables.reservations.len() as i64,
    })
  }

  async fn seed_projects(&self, projects: &[Project]) -> AppResult<usize> {
    let mut tables = self.tables.lock();
    let mut added = 0;
    for project in projects {
      if !tables.projects.contains_key(&project.id) {
        tables.projects.insert(project.id.clone(), project.clone());
        added += 1;
      }
    }
    Ok(added)
  }
}
