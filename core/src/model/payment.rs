// src/model/payment.rs

use super::ids::{PaymentId, RaffleId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle of one purchase attempt.
///
/// Transitions are monotonic: `pending` may move to `completed`, `failed`
/// or `cancelled`; `completed` may later become `refunded`; nothing else
/// is legal. The backend enforces this; the client validates projections
/// against the same matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
  Pending,
  Completed,
  Failed,
  Refunded,
  Cancelled,
}

impl PaymentStatus {
  pub fn is_pending(self) -> bool {
    matches!(self, PaymentStatus::Pending)
  }

  /// Whether `self -> to` is a legal lifecycle move.
  pub fn can_transition(self, to: PaymentStatus) -> bool {
    use PaymentStatus::*;
    matches!(
      (self, to),
      (Pending, Completed) | (Pending, Failed) | (Pending, Cancelled) | (Completed, Refunded)
    )
  }

  pub fn as_str(self) -> &'static str {
    match self {
      PaymentStatus::Pending => "pending",
      PaymentStatus::Completed => "completed",
      PaymentStatus::Failed => "failed",
      PaymentStatus::Refunded => "refunded",
      PaymentStatus::Cancelled => "cancelled",
    }
  }
}

/// Gateway families the marketplace settles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
  Stripe,
  MercadoPago,
}

impl PaymentMethod {
  pub fn as_str(self) -> &'static str {
    match self {
      PaymentMethod::Stripe => "stripe",
      PaymentMethod::MercadoPago => "mercado_pago",
    }
  }
}

/// One purchase attempt, as projected by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
  pub id: PaymentId,
  pub user_id: UserId,
  /// Absent on some historical records; outcome rendering tolerates this.
  #[serde(default)]
  pub raffle_id: Option<RaffleId>,
  /// Exact decimal amount; equals `ticket_quantity × raffle.product_value`
  /// at creation time.
  pub amount: Decimal,
  pub currency: String,
  pub status: PaymentStatus,
  #[serde(default)]
  pub payment_method: Option<PaymentMethod>,
  pub ticket_quantity: u32,
  #[serde(default)]
  pub external_transaction_id: Option<String>,
  #[serde(default)]
  pub failure_reason: Option<String>,
  pub created_at: DateTime<Utc>,
  #[serde(default)]
  pub completed_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub failed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
  use super::PaymentStatus::*;

  #[test]
  fn pending_reaches_every_first_terminal() {
    assert!(Pending.can_transition(Completed));
    assert!(Pending.can_transition(Failed));
    assert!(Pending.can_transition(Cancelled));
  }

  #[test]
  fn completed_only_refunds() {
    assert!(Completed.can_transition(Refunded));
    assert!(!Completed.can_transition(Failed));
    assert!(!Completed.can_transition(Pending));
    assert!(!Completed.can_transition(Cancelled));
  }

  #[test]
  fn terminal_states_are_dead_ends() {
    for terminal in [Failed, Refunded, Cancelled] {
      for target in [Pending, Completed, Failed, Refunded, Cancelled] {
        assert!(!terminal.can_transition(target), "{terminal:?} -> {target:?} must be illegal");
      }
    }
  }

  #[test]
  fn pending_never_refunds_directly() {
    assert!(!Pending.can_transition(Refunded));
    assert!(!Pending.can_transition(Pending));
  }
}
