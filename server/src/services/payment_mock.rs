// server/src/services/payment_mock.rs

use anyhow::{bail, Result};
use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentStatus {
  RequiresAction,
  Succeeded,
}

#[derive(Debug, Clone)]
pub struct MockPaymentIntent {
  pub id: String,
  pub amount: Decimal,
  pub currency: String,
  pub status: IntentStatus,
  pub client_secret: Option<String>,
}

#[instrument(name = "payment_mock::create_intent")]
pub async fn create_mock_payment_intent(reservation_id: Uuid, amount: Decimal, currency: &str) -> Result<MockPaymentIntent> {
  info!("Simulating creation of payment intent.");
  if amount <= Decimal::ZERO {
    bail!("Amount must be greater than zero");
  }
  tokio::time::sleep(std::time::Duration::from_millis(50)).await; // Simulate network latency

  let intent_id = format!("mock_pi_{}", Uuid::new_v4());
  Ok(MockPaymentIntent {
    id: intent_id.clone(),
    amount,
    currency: currency.to_string(),
    status: IntentStatus::RequiresAction,
    client_secret: Some(format!("{}_secret_{}", intent_id, Uuid::new_v4())),
  })
}

#[instrument(skip(intent), fields(payment_intent_id = %intent.id))]
pub async fn confirm_mock_payment(intent: &mut MockPaymentIntent) -> Result<()> {
  info!("Simulating confirmation of payment intent ID: {}", intent.id);
  tokio::time::sleep(std::time::Duration::from_millis(100)).await; // Simulate processing

  if intent.status == IntentStatus::Succeeded {
    bail!("Payment intent {} was already confirmed", intent.id);
  }
  intent.status = IntentStatus::Succeeded;
  info!("Mock payment SUCCEEDED for intent ID: {}", intent.id);
  Ok(())
}
