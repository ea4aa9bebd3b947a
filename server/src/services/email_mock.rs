// server/src/services/email_mock.rs

use crate::models::ReservationDetails;
use anyhow::{bail, Result};
use archiplan_core::ReservationType;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct SentEmailInfo {
  pub to: String,
  pub from: String,
  pub subject: String,
  pub body_preview: String, // First 50 chars of body
  pub message_id: String,
}

pub async fn send_mock_email(to: &str, from: &str, subject: &str, html_body: &str) -> Result<SentEmailInfo> {
  info!("Simulating sending email: To='{}', From='{}', Subject='{}'", to, from, subject);
  tokio::time::sleep(std::time::Duration::from_millis(20)).await; // Simulate network latency

  if to.trim().is_empty() {
    warn!("Refusing to send email without a recipient.");
    bail!("Email recipient is empty");
  }

  let body_preview = html_body.chars().take(50).collect::<String>() + "...";
  let message_id = format!("mock_email_{}", uuid::Uuid::new_v4());
  info!("Mock email sent successfully. Message ID: {}", message_id);

  Ok(SentEmailInfo {
    to: to.to_string(),
    from: from.to_string(),
    subject: subject.to_string(),
    body_preview,
    message_id,
  })
}

/// Subject and HTML body of the mail a buyer gets once the checkout committed.
pub fn confirmation_email(details: &ReservationDetails) -> (String, String) {
  let r = &details.reservation;
  let (subject, lead) = match r.reservation_type {
    ReservationType::Quote => (
      format!("Quote request {} received", r.reservation_number),
      "We received your quote request. An architect will contact you shortly.",
    ),
    ReservationType::Purchase => (
      format!("Reservation {} confirmed", r.reservation_number),
      "Thank you for your purchase. Your reservation is being processed.",
    ),
  };
  let body = format!(
    "<p>Hello {} {},</p><p>{}</p><p>Project: <strong>{}</strong><br/>Reservation number: <strong>{}</strong><br/>Total: {} {}</p>",
    details.buyer.first_name,
    details.buyer.last_name,
    lead,
    details.project.name,
    r.reservation_number,
    r.total_amount,
    r.currency
  );
  (subject, body)
}

#[instrument(name = "email_mock::send_confirmation", skip_all, fields(reservation_number = %details.reservation.reservation_number))]
pub async fn send_confirmation(details: &ReservationDetails, sender: &str) -> Result<SentEmailInfo> {
  let (subject, body) = confirmation_email(details);
  send_mock_email(&details.buyer.email, sender, &subject, &body).await
}
