// demos/marketplace_app/src/services/gateway_sim.rs

//! Simulated payment providers. These exist so the demo can drive the
//! whole settlement leg; real provider integrations are other
//! implementations of the same `PaymentGateway` seam, not extensions of
//! this file.

use async_trait::async_trait;
use rifa::{CheckoutResult, GatewayOutcome, Payment, PaymentGateway, PaymentMethod};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// What the simulator should report once its fake latency elapses.
#[derive(Debug, Clone)]
enum SimVerdict {
  Approve,
  Decline { reason: String },
}

pub struct SimulatedGateway {
  method: PaymentMethod,
  latency: Duration,
  verdict: SimVerdict,
}

impl SimulatedGateway {
  pub fn approving(method: PaymentMethod, latency: Duration) -> Self {
    Self {
      method,
      latency,
      verdict: SimVerdict::Approve,
    }
  }

  pub fn declining(method: PaymentMethod, latency: Duration, reason: String) -> Self {
    Self {
      method,
      latency,
      verdict: SimVerdict::Decline { reason },
    }
  }

  fn transaction_prefix(&self) -> &'static str {
    match self.method {
      PaymentMethod::Stripe => "stripe",
      PaymentMethod::MercadoPago => "mp",
    }
  }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
  fn method(&self) -> PaymentMethod {
    self.method
  }

  #[instrument(skip(self, payment), fields(payment_id = %payment.id, method = self.method().as_str()))]
  async fn collect(&self, payment: &Payment) -> CheckoutResult<GatewayOutcome> {
    info!(amount = %payment.amount, "Simulating provider collection.");
    tokio::time::sleep(self.latency).await; // Simulated provider latency

    let outcome = match &self.verdict {
      SimVerdict::Approve => GatewayOutcome::Approved {
        transaction_id: format!("{}_{}", self.transaction_prefix(), Uuid::new_v4().simple()),
      },
      SimVerdict::Decline { reason } => GatewayOutcome::Declined {
        reason: reason.clone(),
      },
    };
    info!(outcome = ?outcome, "Simulated provider answered.");
    Ok(outcome)
  }
}
