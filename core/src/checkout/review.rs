// core/src/checkout/review.rs

//! Final checkout step: summary, terms gate and submission.

use crate::checkout::gateway::{CheckoutGateway, GatewayError};
use crate::checkout::payload::CheckoutPayload;
use crate::checkout::step::CheckoutStep;
use crate::checkout::store::CheckoutStore;
use crate::domain::ReservationType;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// `$2,500.00 USD`. Always two decimals, comma thousands separator.
pub fn format_price(amount: Decimal, currency: &str) -> String {
  let rounded = amount.round_dp(2);
  let negative = rounded.is_sign_negative() && !rounded.is_zero();
  let text = format!("{:.2}", rounded.abs());
  let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

  let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
  for (i, ch) in int_part.chars().enumerate() {
    if i > 0 && (int_part.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }

  format!("{}${}.{} {}", if negative { "-" } else { "" }, grouped, frac_part, currency)
}

const QUOTE_TOTAL_LINE: &str = "To be quoted";

/// What the review page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSummary {
  pub project_name: String,
  pub price_line: String,
  pub buyer_name: String,
  pub buyer_email: String,
  pub payment_method_label: &'static str,
  pub reservation_type: ReservationType,
  pub total: Decimal,
  pub total_line: String,
}

#[derive(Debug)]
pub enum Review {
  /// Some slice is missing; the UI should send the buyer back to `recover_to`.
  Incomplete { recover_to: CheckoutStep },
  Ready(ReviewController),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
  pub reservation_id: Uuid,
  pub reservation_number: String,
  pub confirmation_path: String,
}

#[derive(Debug, Error)]
pub enum SubmitError {
  #[error("terms and conditions must be accepted")]
  TermsNotAccepted,
  #[error("a submission is already in progress")]
  AlreadySubmitting,
  #[error("checkout data is incomplete")]
  Incomplete,
  #[error(transparent)]
  Gateway(#[from] GatewayError),
}

#[derive(Debug)]
pub struct ReviewController {
  summary: ReviewSummary,
  terms_accepted: bool,
  submitting: AtomicBool,
  last_error: Mutex<Option<String>>,
}

/// Clears the in-flight flag even if the submit future is dropped midway.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::Release);
  }
}

impl ReviewController {
  pub fn prepare(store: &CheckoutStore) -> Review {
    let (Some(project), Some(buyer), Some(payment)) =
      (store.selected_project(), store.buyer_info(), store.payment_info())
    else {
      return Review::Incomplete {
        recover_to: CheckoutStep::ProjectSelection,
      };
    };

    let kind = store.reservation_type();
    let total = project.total_for(kind);
    let total_line = match kind {
      ReservationType::Quote => QUOTE_TOTAL_LINE.to_string(),
      ReservationType::Purchase => format_price(total, &project.currency),
    };
    let summary = ReviewSummary {
      project_name: project.name.clone(),
      price_line: format_price(project.price, &project.currency),
      buyer_name: buyer.full_name(),
      buyer_email: buyer.email.clone(),
      payment_method_label: payment.payment_method.label(),
      reservation_type: kind,
      total,
      total_line,
    };

    Review::Ready(Self {
      summary,
      terms_accepted: false,
      submitting: AtomicBool::new(false),
      last_error: Mutex::new(None),
    })
  }

  pub fn summary(&self) -> &ReviewSummary {
    &self.summary
  }

  pub fn accept_terms(&mut self, accepted: bool) {
    self.terms_accepted = accepted;
  }

  pub fn terms_accepted(&self) -> bool {
    self.terms_accepted
  }

  pub fn can_submit(&self) -> bool {
    self.terms_accepted && !self.is_submitting()
  }

  pub fn is_submitting(&self) -> bool {
    self.submitting.load(Ordering::Acquire)
  }

  /// Message from the last failed submission, if any.
  pub fn last_error(&self) -> Option<String> {
    self.last_error.lock().clone()
  }

  /// Sends the store's checkout through `gateway`. The store is reset only
  /// after the gateway accepts; on failure it is left untouched so the buyer
  /// can retry by hand.
  #[instrument(name = "ReviewController::submit", skip_all)]
  pub async fn submit(
    &self,
    store: &mut CheckoutStore,
    gateway: &dyn CheckoutGateway,
  ) -> Result<SubmissionReceipt, SubmitError> {
    if !self.terms_accepted {
      return Err(SubmitError::TermsNotAccepted);
    }
    if self
      .submitting
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .is_err()
    {
      return Err(SubmitError::AlreadySubmitting);
    }
    let _in_flight = InFlight(&self.submitting);

    let payload = CheckoutPayload::from_state(store.state()).ok_or(SubmitError::Incomplete)?;
    *self.last_error.lock() = None;

    match gateway.submit(&payload).await {
      Ok(reservation) => {
        info!(reservation_number = %reservation.reservation_number, "Checkout submitted.");
        store.reset();
        Ok(SubmissionReceipt {
          reservation_id: reservation.id,
          confirmation_path: format!("/confirmacion/{}", reservation.reservation_number),
          reservation_number: reservation.reservation_number,
        })
      }
      Err(e) => {
        warn!(error = %e, "Checkout submission failed.");
        let message = match &e {
          GatewayError::Rejected { message, .. } => message.clone(),
          GatewayError::Transport(_) => "Could not reach the server. Please try again.".to_string(),
        };
        *self.last_error.lock() = Some(message);
        Err(SubmitError::Gateway(e))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  #[test]
  fn formats_with_thousands_separators() {
    assert_eq!(format_price(Decimal::from(2500), "USD"), "$2,500.00 USD");
    assert_eq!(format_price(Decimal::from_str("1234567.5").unwrap(), "MXN"), "$1,234,567.50 MXN");
    assert_eq!(format_price(Decimal::ZERO, "USD"), "$0.00 USD");
    assert_eq!(format_price(Decimal::from(999), "EUR"), "$999.00 EUR");
  }

  #[test]
  fn empty_store_is_incomplete() {
    let store = CheckoutStore::new();
    match ReviewController::prepare(&store) {
      Review::Incomplete { recover_to } => assert_eq!(recover_to, CheckoutStep::ProjectSelection),
      Review::Ready(_) => panic!("expected incomplete review"),
    }
  }
}
