// core/src/domain/project.rs

use super::{ReservationType, UnknownVariant};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "project_category", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
  #[serde(alias = "residencial")]
  Residential,
  #[serde(alias = "comercial")]
  Commercial,
  Industrial,
  #[serde(alias = "institucional")]
  Institutional,
  #[serde(alias = "mixto")]
  Mixed,
}

impl ProjectCategory {
  pub fn as_str(&self) -> &'static str {
    match self {
      ProjectCategory::Residential => "residential",
      ProjectCategory::Commercial => "commercial",
      ProjectCategory::Industrial => "industrial",
      ProjectCategory::Institutional => "institutional",
      ProjectCategory::Mixed => "mixed",
    }
  }
}

impl FromStr for ProjectCategory {
  type Err = UnknownVariant;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "residential" | "residencial" => Ok(ProjectCategory::Residential),
      "commercial" | "comercial" => Ok(ProjectCategory::Commercial),
      "industrial" => Ok(ProjectCategory::Industrial),
      "institutional" | "institucional" => Ok(ProjectCategory::Institutional),
      "mixed" | "mixto" => Ok(ProjectCategory::Mixed),
      _ => Err(UnknownVariant::new("project category", s)),
    }
  }
}

/// A sellable house-plan listing. Immutable from the checkout's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Project {
  pub id: String,
  pub name: String,
  pub description: String,
  pub category: ProjectCategory,
  pub price: Decimal,
  pub currency: String,
  #[serde(default)]
  pub images: Vec<String>,
  #[serde(default)]
  pub features: Vec<String>,
  /// Built area in square meters.
  pub area: f64,
  pub rooms: i32,
  pub bathrooms: i32,
  pub floors: i32,
  pub style: String,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Project {
  /// Amount charged for a reservation of `kind` created right now. Quotes are
  /// priced later, by hand.
  pub fn total_for(&self, kind: ReservationType) -> Decimal {
    match kind {
      ReservationType::Purchase => self.price,
      ReservationType::Quote => Decimal::ZERO,
    }
  }
}
