// server/src/models/buyer.rs

use archiplan_core::{BuyerInfo, DocumentType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row per distinct email. Repeat checkouts overwrite the contact fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
  pub id: Uuid,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub document_type: DocumentType,
  pub document_number: String,
  pub address: String,
  pub city: String,
  pub state: String,
  pub country: String,
  pub postal_code: String,
  pub notes: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Buyer {
  pub fn new(info: &BuyerInfo, default_country: &str, now: DateTime<Utc>) -> Self {
    let mut buyer = Self {
      id: Uuid::new_v4(),
      first_name: String::new(),
      last_name: String::new(),
      email: info.email.clone(),
      phone: String::new(),
      document_type: info.document_type,
      document_number: String::new(),
      address: String::new(),
      city: String::new(),
      state: String::new(),
      country: String::new(),
      postal_code: String::new(),
      notes: None,
      created_at: now,
      updated_at: now,
    };
    buyer.overwrite_with(info, default_country, now);
    buyer
  }

  /// Copies every contact field except the email, which identifies the row.
  pub fn overwrite_with(&mut self, info: &BuyerInfo, default_country: &str, now: DateTime<Utc>) {
    self.first_name = info.first_name.clone();
    self.last_name = info.last_name.clone();
    self.phone = info.phone.clone();
    self.document_type = info.document_type;
    self.document_number = info.document_number.clone();
    self.address = info.address.clone();
    self.city = info.city.clone();
    self.state = info.state.clone();
    self.country = info.country_or(default_country).to_string();
    self.postal_code = info.postal_code.clone();
    self.notes = info.notes.clone();
    self.updated_at = now;
  }
}
