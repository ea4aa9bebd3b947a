// server/src/models/reservation.rs

use crate::models::{Buyer, PaymentInfoRecord};
use archiplan_core::{BuyerInfo, PaymentInfo, Project, ReservationStatus, ReservationType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
  pub id: Uuid,
  pub reservation_number: String,
  pub project_id: String,
  pub buyer_id: Uuid,
  pub payment_info_id: Uuid,
  #[serde(rename = "type")]
  pub reservation_type: ReservationType,
  pub status: ReservationStatus,
  pub total_amount: Decimal,
  pub currency: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub confirmed_at: Option<DateTime<Utc>>,
  pub cancelled_at: Option<DateTime<Utc>>,
  pub completed_at: Option<DateTime<Utc>>,
}

impl Reservation {
  /// Moves to `next` and stamps the matching timestamp. The caller has
  /// already checked the transition.
  pub fn apply_status(&mut self, next: ReservationStatus, now: DateTime<Utc>) {
    self.status = next;
    self.updated_at = now;
    match next {
      ReservationStatus::Confirmed => self.confirmed_at = Some(now),
      ReservationStatus::Cancelled => self.cancelled_at = Some(now),
      ReservationStatus::Completed => self.completed_at = Some(now),
      ReservationStatus::Pending | ReservationStatus::Processing => {}
    }
  }
}

/// A reservation with its project, buyer and payment info loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetails {
  #[serde(flatten)]
  pub reservation: Reservation,
  pub project: Project,
  pub buyer: Buyer,
  pub payment_info: PaymentInfoRecord,
}

/// A validated checkout ready to be written in one transaction.
#[derive(Debug, Clone)]
pub struct CheckoutOrder {
  pub project: Project,
  pub reservation_type: ReservationType,
  pub buyer: BuyerInfo,
  pub payment: PaymentInfo,
  pub default_country: String,
}

impl CheckoutOrder {
  pub fn initial_status(&self) -> ReservationStatus {
    ReservationStatus::initial_for(self.reservation_type)
  }

  pub fn total_amount(&self) -> Decimal {
    self.project.total_for(self.reservation_type)
  }

  pub fn new_reservation(
    &self,
    reservation_number: String,
    buyer_id: Uuid,
    payment_info_id: Uuid,
    now: DateTime<Utc>,
  ) -> Reservation {
    Reservation {
      id: Uuid::new_v4(),
      reservation_number,
      project_id: self.project.id.clone(),
      buyer_id,
      payment_info_id,
      reservation_type: self.reservation_type,
      status: self.initial_status(),
      total_amount: self.total_amount(),
      currency: self.project.currency.clone(),
      created_at: now,
      updated_at: now,
      confirmed_at: None,
      cancelled_at: None,
      completed_at: None,
    }
  }
}
