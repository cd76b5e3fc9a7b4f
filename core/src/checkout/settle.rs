// src/checkout/settle.rs

//! Checkout settlement: await the gateway's verdict for a pending
//! payment, reconcile it with the backend (confirm or fail), and resolve
//! the outcome route. The reconciling call is always awaited before any
//! navigation; if it cannot be delivered, the flow errors with no route
//! set and the payment keeps its prior state for a user-driven retry.

use crate::api::{ConfirmPaymentRequest, FailPaymentRequest, MarketplaceApi};
use crate::checkout::NextRoute;
use crate::error::CheckoutError;
use crate::flow::{Flow, FlowControl, FlowData};
use crate::gateway::{GatewayOutcome, PaymentGateway};
use crate::model::{Payment, PaymentStatus};
use crate::session::SessionStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Context for one settlement attempt over one pending payment.
pub struct SettleCtx {
  pub api: Arc<dyn MarketplaceApi>,
  pub session: Arc<SessionStore>,
  pub gateway: Arc<dyn PaymentGateway>,

  /// The payment being settled; replaced by the backend's answer once
  /// reconciliation succeeds.
  pub payment: Payment,

  /// The gateway's verdict, set by the flow.
  pub gateway_outcome: Option<GatewayOutcome>,
  /// Latch: once true, this flow instance refuses to issue confirm or
  /// fail again.
  pub finalized: bool,
  pub next_route: Option<NextRoute>,
}

impl SettleCtx {
  pub fn new(
    api: Arc<dyn MarketplaceApi>,
    session: Arc<SessionStore>,
    gateway: Arc<dyn PaymentGateway>,
    payment: Payment,
  ) -> Self {
    Self {
      api,
      session,
      gateway,
      payment,
      gateway_outcome: None,
      finalized: false,
      next_route: None,
    }
  }
}

fn route_for_status(payment: &Payment) -> NextRoute {
  match payment.status {
    PaymentStatus::Completed => NextRoute::Success {
      payment_id: payment.id.clone(),
    },
    PaymentStatus::Failed => NextRoute::Failure {
      payment_id: payment.id.clone(),
    },
    // Pending belongs back in checkout; refunded/cancelled have no
    // dedicated page of their own.
    PaymentStatus::Pending => NextRoute::Checkout {
      payment_id: payment.id.clone(),
    },
    PaymentStatus::Refunded | PaymentStatus::Cancelled => NextRoute::Marketplace,
  }
}

pub fn build_settle_flow() -> Flow<SettleCtx, CheckoutError> {
  let mut f = Flow::<SettleCtx, CheckoutError>::new(&[
    ("latch_double_submit", false, None),
    ("collect_gateway_outcome", false, None),
    ("reconcile_with_backend", false, None),
    ("resolve_outcome_route", false, None),
  ]);

  // A settled flow instance (or a payment that is already terminal from
  // this client's own doing) never issues a second confirm/fail. The
  // route still resolves so the surface can move the user along.
  f.on("latch_double_submit", |ctx_data: FlowData<SettleCtx>| {
    Box::pin(async move {
      let (finalized, payment) = {
        let guard = ctx_data.read();
        (guard.finalized, guard.payment.clone())
      };
      if finalized || !payment.status.is_pending() {
        warn!(payment_id = %payment.id, status = ?payment.status, "Settlement refused: payment already settled in this flow.");
        ctx_data.write().next_route = Some(route_for_status(&payment));
        return Ok::<_, CheckoutError>(FlowControl::Halt);
      }
      Ok(FlowControl::Continue)
    })
  });

  // The opaque external leg. Awaited; a transport error here surfaces
  // before any backend call is issued.
  f.on("collect_gateway_outcome", |ctx_data: FlowData<SettleCtx>| {
    Box::pin(async move {
      let (gateway, payment) = {
        let guard = ctx_data.read();
        (guard.gateway.clone(), guard.payment.clone())
      };
      let outcome = gateway.collect(&payment).await?;
      info!(payment_id = %payment.id, method = gateway.method().as_str(), outcome = ?outcome, "Gateway verdict collected.");
      ctx_data.write().gateway_outcome = Some(outcome);
      Ok::<_, CheckoutError>(FlowControl::Continue)
    })
  });

  // Reconcile the verdict with the backend. Only a successful answer
  // flips the latch; a failed call leaves everything retryable.
  f.on("reconcile_with_backend", |ctx_data: FlowData<SettleCtx>| {
    Box::pin(async move {
      let (api, session, method, payment_id, outcome) = {
        let guard = ctx_data.read();
        (
          guard.api.clone(),
          guard.session.clone(),
          guard.gateway.method(),
          guard.payment.id.clone(),
          guard
            .gateway_outcome
            .clone()
            .ok_or_else(|| CheckoutError::Internal("gateway outcome missing before reconciliation".to_string()))?,
        )
      };

      let token = session.bearer()?;
      let reconciled = match outcome {
        GatewayOutcome::Approved { transaction_id } => {
          api
            .confirm_payment(
              &token,
              ConfirmPaymentRequest {
                payment_id: payment_id.clone(),
                external_transaction_id: transaction_id,
                payment_method: method,
              },
            )
            .await
        }
        GatewayOutcome::Declined { reason } => {
          api
            .fail_payment(
              &token,
              FailPaymentRequest {
                payment_id: payment_id.clone(),
                failure_reason: reason,
              },
            )
            .await
        }
      };

      match reconciled {
        Ok(payment) => {
          let mut guard = ctx_data.write();
          guard.payment = payment;
          guard.finalized = true;
          Ok(FlowControl::Continue)
        }
        Err(e) => Err(session.absorb(e)),
      }
    })
  });

  f.after("reconcile_with_backend", |ctx_data: FlowData<SettleCtx>| {
    Box::pin(async move {
      let guard = ctx_data.read();
      info!(
        payment_id = %guard.payment.id,
        status = guard.payment.status.as_str(),
        failure_reason = ?guard.payment.failure_reason,
        "Payment settled."
      );
      Ok::<_, CheckoutError>(FlowControl::Continue)
    })
  });

  f.on("resolve_outcome_route", |ctx_data: FlowData<SettleCtx>| {
    Box::pin(async move {
      let route = route_for_status(&ctx_data.read().payment);
      ctx_data.write().next_route = Some(route);
      Ok::<_, CheckoutError>(FlowControl::Continue)
    })
  });

  f
}
