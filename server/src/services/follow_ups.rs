// server/src/services/follow_ups.rs

//! Side effects that run after a checkout committed. They never fail the
//! request that triggered them; failures are logged and the most recent
//! outcomes are kept in a bounded history.

use crate::models::ReservationDetails;
use crate::services::{email_mock, payment_mock};
use archiplan_core::{PaymentMethod, ReservationType};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, Instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUpOutcome {
  ConfirmationSent { reservation_number: String, message_id: String },
  PaymentCaptured { reservation_number: String, intent_id: String },
  Failed { reservation_number: String, task: &'static str, error: String },
}

/// Outcomes kept by a dispatcher built with `FollowUpDispatcher::new`.
pub const DEFAULT_OUTCOME_HISTORY: usize = 64;

#[derive(Debug)]
struct OutcomeLog {
  entries: VecDeque<FollowUpOutcome>,
  limit: usize,
}

impl OutcomeLog {
  /// Evicts the oldest entries so that at most `limit` remain.
  fn push(&mut self, outcome: FollowUpOutcome) {
    if self.limit == 0 {
      return;
    }
    while self.entries.len() >= self.limit {
      self.entries.pop_front();
    }
    self.entries.push_back(outcome);
  }
}

pub struct FollowUpDispatcher {
  sender: String,
  log: Arc<Mutex<OutcomeLog>>,
}

impl FollowUpDispatcher {
  pub fn new(sender: impl Into<String>) -> Self {
    Self::with_history_limit(sender, DEFAULT_OUTCOME_HISTORY)
  }

  pub fn with_history_limit(sender: impl Into<String>, limit: usize) -> Self {
    Self {
      sender: sender.into(),
      log: Arc::new(Mutex::new(OutcomeLog {
        entries: VecDeque::with_capacity(limit),
        limit,
      })),
    }
  }

  /// The most recent outcomes of finished follow-ups, oldest first.
  pub fn outcomes(&self) -> Vec<FollowUpOutcome> {
    self.log.lock().entries.iter().cloned().collect()
  }

  /// Spawns the confirmation email and, for card purchases, the payment
  /// capture. Must be called from within a tokio runtime.
  pub fn dispatch(&self, details: &ReservationDetails) -> Vec<JoinHandle<()>> {
    let number = details.reservation.reservation_number.clone();
    let span = tracing::info_span!("follow_ups", reservation_number = %number);
    let mut handles = Vec::with_capacity(2);

    {
      let details = details.clone();
      let sender = self.sender.clone();
      let log = self.log.clone();
      let number = number.clone();
      handles.push(tokio::spawn(
        async move {
          let outcome = match email_mock::send_confirmation(&details, &sender).await {
            Ok(sent) => FollowUpOutcome::ConfirmationSent {
              reservation_number: number,
              message_id: sent.message_id,
            },
            Err(e) => {
              error!(error = %e, "Confirmation email failed.");
              FollowUpOutcome::Failed {
                reservation_number: number,
                task: "confirmation_email",
                error: e.to_string(),
              }
            }
          };
          log.lock().push(outcome);
        }
        .instrument(span.clone()),
      ));
    }

    let r = &details.reservation;
    if r.reservation_type == ReservationType::Purchase && details.payment_info.payment_method == PaymentMethod::Card {
      let log = self.log.clone();
      let (reservation_id, amount, currency) = (r.id, r.total_amount, r.currency.clone());
      handles.push(tokio::spawn(
        async move {
          let captured = async {
            let mut intent = payment_mock::create_mock_payment_intent(reservation_id, amount, &currency).await?;
            payment_mock::confirm_mock_payment(&mut intent).await?;
            anyhow::Ok(intent.id)
          }
          .await;
          let outcome = match captured {
            Ok(intent_id) => {
              info!(%intent_id, "Payment captured.");
              FollowUpOutcome::PaymentCaptured {
                reservation_number: number,
                intent_id,
              }
            }
            Err(e) => {
              error!(error = %e, "Payment capture failed.");
              FollowUpOutcome::Failed {
                reservation_number: number,
                task: "payment_capture",
                error: e.to_string(),
              }
            }
          };
          log.lock().push(outcome);
        }
        .instrument(span),
      ));
    }

    handles
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sent(n: usize) -> FollowUpOutcome {
    FollowUpOutcome::ConfirmationSent {
      reservation_number: format!("RES-TEST-{:04}", n),
      message_id: format!("mock_email_{}", n),
    }
  }

  #[test]
  fn history_keeps_only_the_newest_entries() {
    let dispatcher = FollowUpDispatcher::with_history_limit("noreply@archiplan.dev", 3);
    for n in 0..10 {
      dispatcher.log.lock().push(sent(n));
    }
    assert_eq!(dispatcher.outcomes(), vec![sent(7), sent(8), sent(9)]);
  }

  #[test]
  fn zero_limit_records_nothing() {
    let dispatcher = FollowUpDispatcher::with_history_limit("noreply@archiplan.dev", 0);
    dispatcher.log.lock().push(sent(1));
    assert!(dispatcher.outcomes().is_empty());
  }
}
