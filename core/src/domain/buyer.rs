// core/src/domain/buyer.rs

use super::UnknownVariant;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Country recorded for a buyer who leaves the field empty.
pub const DEFAULT_COUNTRY: &str = "México";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "document_type", rename_all = "kebab-case"))]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
  #[default]
  #[serde(alias = "dni")]
  NationalId,
  Passport,
  #[serde(alias = "ruc")]
  TaxId,
}

impl FromStr for DocumentType {
  type Err = UnknownVariant;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "national-id" | "dni" => Ok(DocumentType::NationalId),
      "passport" => Ok(DocumentType::Passport),
      "tax-id" | "ruc" => Ok(DocumentType::TaxId),
      _ => Err(UnknownVariant::new("document type", s)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerInfo {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub document_type: DocumentType,
  pub document_number: String,
  pub address: String,
  pub city: String,
  pub state: String,
  #[serde(default)]
  pub country: String,
  pub postal_code: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
}

impl BuyerInfo {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name.trim(), self.last_name.trim())
  }

  /// Country to persist: the submitted one, or `default_country` when blank.
  pub fn country_or<'a>(&'a self, default_country: &'a str) -> &'a str {
    let country = self.country.trim();
    if country.is_empty() {
      default_country
    } else {
      country
    }
  }
}

impl Default for BuyerInfo {
  fn default() -> Self {
    Self {
      first_name: String::new(),
      last_name: String::new(),
      email: String::new(),
      phone: String::new(),
      document_type: DocumentType::default(),
      document_number: String::new(),
      address: String::new(),
      city: String::new(),
      state: String::new(),
      country: DEFAULT_COUNTRY.to_string(),
      postal_code: String::new(),
      notes: None,
    }
  }
}
