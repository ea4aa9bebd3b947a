// core/src/domain/reservation.rs

use super::UnknownVariant;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "reservation_type", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ReservationType {
  /// Direct purchase at the listed price.
  #[default]
  Purchase,
  /// Quote request; priced later by hand.
  Quote,
}

impl ReservationType {
  pub fn as_str(&self) -> &'static str {
    match self {
      ReservationType::Purchase => "purchase",
      ReservationType::Quote => "quote",
    }
  }
}

impl FromStr for ReservationType {
  type Err = UnknownVariant;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "purchase" => Ok(ReservationType::Purchase),
      "quote" => Ok(ReservationType::Quote),
      _ => Err(UnknownVariant::new("reservation type", s)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "reservation_status", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
  Pending,
  Processing,
  Confirmed,
  Cancelled,
  Completed,
}

impl ReservationStatus {
  pub const ALL: [ReservationStatus; 5] = [
    ReservationStatus::Pending,
    ReservationStatus::Processing,
    ReservationStatus::Confirmed,
    ReservationStatus::Cancelled,
    ReservationStatus::Completed,
  ];

  /// Status a freshly created reservation starts in.
  pub fn initial_for(kind: ReservationType) -> Self {
    match kind {
      ReservationType::Quote => ReservationStatus::Pending,
      ReservationType::Purchase => ReservationStatus::Processing,
    }
  }

  /// States from which a reservation may move into `self`.
  pub fn allowed_predecessors(&self) -> &'static [ReservationStatus] {
    use ReservationStatus::*;
    match self {
      Pending => &[],
      Processing => &[Pending],
      Confirmed => &[Pending, Processing],
      Cancelled => &[Pending, Processing, Confirmed],
      Completed => &[Confirmed],
    }
  }

  pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
    next.allowed_predecessors().contains(self)
  }

  pub fn is_terminal(&self) -> bool {
    Self::ALL.iter().all(|next| !self.can_transition_to(*next))
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      ReservationStatus::Pending => "pending",
      ReservationStatus::Processing => "processing",
      ReservationStatus::Confirmed => "confirmed",
      ReservationStatus::Cancelled => "cancelled",
      ReservationStatus::Completed => "completed",
    }
  }
}

impl FromStr for ReservationStatus {
  type Err = UnknownVariant;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|status| status.as_str() == s)
      .ok_or_else(|| UnknownVariant::new("reservation status", s))
  }
}

impl std::fmt::Display for ReservationStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::ReservationStatus::*;
  use super::*;

  #[test]
  fn initial_status_depends_on_type() {
    assert_eq!(ReservationStatus::initial_for(ReservationType::Quote), Pending);
    assert_eq!(ReservationStatus::initial_for(ReservationType::Purchase), Processing);
  }

  #[test]
  fn forward_transitions_are_allowed() {
    assert!(Pending.can_transition_to(Processing));
    assert!(Pending.can_transition_to(Confirmed));
    assert!(Processing.can_transition_to(Confirmed));
    assert!(Confirmed.can_transition_to(Completed));
    assert!(Processing.can_transition_to(Cancelled));
  }

  #[test]
  fn backward_and_terminal_transitions_are_rejected() {
    assert!(!Completed.can_transition_to(Pending));
    assert!(!Confirmed.can_transition_to(Processing));
    assert!(!Cancelled.can_transition_to(Confirmed));
    assert!(!Processing.can_transition_to(Processing));
    assert!(!Pending.can_transition_to(Completed));
    assert!(Completed.is_terminal());
    assert!(Cancelled.is_terminal());
    assert!(!Pending.is_terminal());
  }

  #[test]
  fn status_round_trips_through_str() {
    for status in ReservationStatus::ALL {
      assert_eq!(status.as_str().parse::<ReservationStatus>(), Ok(status));
    }
    assert!("shipped".parse::<ReservationStatus>().is_err());
  }
}
