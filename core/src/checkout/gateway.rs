// core/src/checkout/gateway.rs

use crate::checkout::payload::CheckoutPayload;
use crate::domain::ReservationStatus;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The part of a created reservation the client needs after submitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedReservation {
  pub id: Uuid,
  pub reservation_number: String,
  pub status: ReservationStatus,
  pub total_amount: Decimal,
  pub currency: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
  /// The backend answered with a non-success status.
  #[error("{message}")]
  Rejected { status: u16, message: String },
  #[error("checkout request failed: {0}")]
  Transport(#[from] anyhow::Error),
}

/// Where a completed checkout is sent.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
  async fn submit(&self, payload: &CheckoutPayload) -> Result<SubmittedReservation, GatewayError>;
}

#[cfg(feature = "http-client")]
pub use http::HttpCheckoutGateway;

#[cfg(feature = "http-client")]
mod http {
  use super::*;
  use tracing::{debug, instrument};

  #[derive(Deserialize)]
  struct Envelope {
    data: SubmittedReservation,
  }

  #[derive(Deserialize)]
  struct ErrorBody {
    error: Option<String>,
  }

  /// Talks to the archiplan REST backend.
  #[derive(Debug, Clone)]
  pub struct HttpCheckoutGateway {
    client: reqwest::Client,
    base_url: String,
  }

  impl HttpCheckoutGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
      Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
      let base_url = base_url.into().trim_end_matches('/').to_string();
      Self { client, base_url }
    }
  }

  #[async_trait]
  impl CheckoutGateway for HttpCheckoutGateway {
    #[instrument(name = "HttpCheckoutGateway::submit", skip_all, fields(project_id = %payload.project_id))]
    async fn submit(&self, payload: &CheckoutPayload) -> Result<SubmittedReservation, GatewayError> {
      let url = format!("{}/api/checkout", self.base_url);
      let response = self
        .client
        .post(&url)
        .json(payload)
        .send()
        .await
        .map_err(anyhow::Error::from)?;

      let status = response.status();
      if !status.is_success() {
        let message = response
          .json::<ErrorBody>()
          .await
          .ok()
          .and_then(|b| b.error)
          .unwrap_or_else(|| format!("Checkout failed with status {}", status.as_u16()));
        debug!(status = status.as_u16(), %message, "Checkout rejected by backend.");
        return Err(GatewayError::Rejected {
          status: status.as_u16(),
          message,
        });
      }

      let envelope: Envelope = response.json().await.map_err(anyhow::Error::from)?;
      Ok(envelope.data)
    }
  }
}
