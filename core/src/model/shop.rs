// src/model/shop.rs

use super::ids::ShopId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
  Pending,
  Verified,
  Rejected,
}

/// Directory entry read straight from the document store; the public
/// listing requests `verified` entries only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopListing {
  pub id: ShopId,
  pub name: String,
  pub verification_status: VerificationStatus,
  pub created_at: DateTime<Utc>,
}

/// The slice of a shop embedded in raffle projections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopSummary {
  pub id: ShopId,
  pub name: String,
}
