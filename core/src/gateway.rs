// src/gateway.rs

//! The payment-gateway seam. The marketplace never talks to a provider
//! SDK from the checkout flows; it awaits an implementation of
//! [`PaymentGateway`] and reconciles whatever came back. Real provider
//! integrations (redirect or webhook based) are implementations of this
//! trait; so are the simulators the demo application ships.

use crate::error::CheckoutResult;
use crate::model::{Payment, PaymentMethod};
use async_trait::async_trait;

/// What the gateway reported for one collection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayOutcome {
  /// Funds collected. `transaction_id` is the provider's reference,
  /// carried into the backend confirmation.
  Approved { transaction_id: String },
  /// Collection declined. `reason` is human-readable and carried into
  /// the backend failure record verbatim.
  Declined { reason: String },
}

/// One payment provider.
///
/// `collect` resolves only once the provider's answer is known; the
/// settlement flow awaits it before issuing any backend call. Errors are
/// transport-level only — a declined card is an `Ok(Declined { .. })`,
/// not an error.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
  /// The method tag reported to the backend on confirmation.
  fn method(&self) -> PaymentMethod;

  async fn collect(&self, payment: &Payment) -> CheckoutResult<GatewayOutcome>;
}
