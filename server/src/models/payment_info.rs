// server/src/models/payment_info.rs

use archiplan_core::{PaymentInfo, PaymentMethod};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Payment selection stored with a reservation. Holds no card data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfoRecord {
  pub id: Uuid,
  pub payment_method: PaymentMethod,
  pub cardholder_name: Option<String>,
  pub billing_same_as_shipping: bool,
  pub billing_address: Option<String>,
  pub billing_city: Option<String>,
  pub billing_state: Option<String>,
  pub billing_country: Option<String>,
  pub billing_postal_code: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl PaymentInfoRecord {
  pub fn new(info: &PaymentInfo, now: DateTime<Utc>) -> Self {
    let billing = info.billing_address.as_ref();
    Self {
      id: Uuid::new_v4(),
      payment_method: info.payment_method,
      cardholder_name: info.cardholder_name.clone(),
      billing_same_as_shipping: info.billing_same_as_shipping(),
      billing_address: billing.and_then(|b| b.address.clone()),
      billing_city: billing.and_then(|b| b.city.clone()),
      billing_state: billing.and_then(|b| b.state.clone()),
      billing_country: billing.and_then(|b| b.country.clone()),
      billing_postal_code: billing.and_then(|b| b.postal_code.clone()),
      created_at: now,
    }
  }
}
