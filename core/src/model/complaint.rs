// src/model/complaint.rs

use super::ids::{ComplaintId, PaymentId, RaffleId, ShopId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a filed dispute:
/// `pending → in_review → {resolved | rejected | cancelled}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
  Pending,
  InReview,
  Resolved,
  Rejected,
  Cancelled,
}

impl ComplaintStatus {
  pub fn can_transition(self, to: ComplaintStatus) -> bool {
    use ComplaintStatus::*;
    matches!(
      (self, to),
      (Pending, InReview) | (InReview, Resolved) | (InReview, Rejected) | (InReview, Cancelled)
    )
  }
}

/// What the grievance is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintKind {
  UndeliveredPrize,
  PaymentIssue,
  MisleadingListing,
  Other,
}

/// A user-filed dispute, optionally tied to a shop, raffle or payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
  pub id: ComplaintId,
  pub user_id: UserId,
  #[serde(default)]
  pub shop_id: Option<ShopId>,
  #[serde(default)]
  pub raffle_id: Option<RaffleId>,
  #[serde(default)]
  pub payment_id: Option<PaymentId>,
  pub kind: ComplaintKind,
  pub subject: String,
  pub description: String,
  pub status: ComplaintStatus,
  /// Display-only: when the shop is expected to answer by.
  pub response_deadline: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Complaint {
  /// Whole days until the response deadline; negative once it has passed.
  /// Display-only, no workflow hangs off this value.
  pub fn response_due_in_days(&self, now: DateTime<Utc>) -> i64 {
    (self.response_deadline - now).num_days()
  }
}
