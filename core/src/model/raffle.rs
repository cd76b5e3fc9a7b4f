// src/model/raffle.rs

use super::ids::RaffleId;
use super::shop::ShopSummary;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle of a prize draw. Only `active` raffles sell tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaffleStatus {
  Draft,
  PendingApproval,
  Active,
  Paused,
  SoldOut,
  Finished,
  Cancelled,
  Rejected,
}

/// The slice of the product record a raffle page needs for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
  pub name: String,
  #[serde(default)]
  pub image_url: Option<String>,
}

/// A prize draw, as projected by the backend.
///
/// Invariant (backend-owned, validated here defensively through
/// [`Raffle::remaining_tickets`] saturating): `0 ≤ sold_tickets ≤
/// total_tickets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Raffle {
  pub id: RaffleId,
  pub shop: ShopSummary,
  pub product: ProductSummary,
  /// Unit price of one ticket, exact decimal.
  pub product_value: Decimal,
  pub total_tickets: u32,
  pub sold_tickets: u32,
  pub status: RaffleStatus,
  #[serde(default)]
  pub winning_ticket: Option<u32>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Raffle {
  /// Tickets still purchasable. Never negative, even on a projection that
  /// violates the sold/total invariant.
  pub fn remaining_tickets(&self) -> u32 {
    self.total_tickets.saturating_sub(self.sold_tickets)
  }
}
