// src/checkout/initiate.rs

//! Payment initiation: guard availability over the page's raffle
//! projection, price the order exactly, submit the purchase intent, and
//! route the user into checkout keyed by the new pending payment.

use crate::api::{CreatePaymentRequest, MarketplaceApi};
use crate::availability;
use crate::checkout::NextRoute;
use crate::error::CheckoutError;
use crate::flow::{Flow, FlowControl, FlowData};
use crate::model::{Payment, Raffle};
use crate::pricing;
use crate::session::SessionStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

/// Context for one initiation attempt. On any error the input fields are
/// left untouched and `payment` stays `None` — retry is resubmission with
/// the same context shape; there is never a dangling half-created payment
/// on the client side.
pub struct InitiateCtx {
  pub api: Arc<dyn MarketplaceApi>,
  pub session: Arc<SessionStore>,

  /// The raffle projection the page was rendered from.
  pub raffle: Raffle,
  /// Quantity the user submitted (the UI clamps on every change; the
  /// guard validates again before anything leaves the client).
  pub requested_quantity: u32,

  /// Priced amount, set by the flow.
  pub amount: Option<Decimal>,
  /// The pending payment, set on success only.
  pub payment: Option<Payment>,
  pub next_route: Option<NextRoute>,
}

impl InitiateCtx {
  pub fn new(
    api: Arc<dyn MarketplaceApi>,
    session: Arc<SessionStore>,
    raffle: Raffle,
    requested_quantity: u32,
  ) -> Self {
    Self {
      api,
      session,
      raffle,
      requested_quantity,
      amount: None,
      payment: None,
      next_route: None,
    }
  }
}

pub fn build_initiate_flow() -> Flow<InitiateCtx, CheckoutError> {
  let mut f = Flow::<InitiateCtx, CheckoutError>::new(&[
    ("require_session", false, None),
    ("guard_ticket_availability", false, None),
    ("price_order", false, None),
    ("create_pending_payment", false, None),
    ("resolve_checkout_route", false, None),
  ]);

  // Purchases require an authenticated user. Checked first so no guard
  // output leaks to an anonymous caller.
  f.on("require_session", |ctx_data: FlowData<InitiateCtx>| {
    Box::pin(async move {
      let session = ctx_data.read().session.clone();
      session.bearer()?;
      Ok::<_, CheckoutError>(FlowControl::Continue)
    })
  });

  // The availability guard: pure, no request issued on rejection.
  f.on("guard_ticket_availability", |ctx_data: FlowData<InitiateCtx>| {
    Box::pin(async move {
      let (raffle, requested) = {
        let guard = ctx_data.read();
        (guard.raffle.clone(), guard.requested_quantity)
      };

      if !availability::purchase_allowed(&raffle) {
        warn!(raffle_id = %raffle.id, status = ?raffle.status, "Purchase blocked: raffle not open for sale.");
        return Err(CheckoutError::Validation(
          "Esta rifa no está disponible para compra.".to_string(),
        ));
      }
      availability::validate_quantity(requested, raffle.remaining_tickets())?;
      Ok(FlowControl::Continue)
    })
  });

  // Exact decimal pricing: quantity × unit value.
  f.on("price_order", |ctx_data: FlowData<InitiateCtx>| {
    Box::pin(async move {
      let amount = {
        let guard = ctx_data.read();
        pricing::order_amount(guard.requested_quantity, guard.raffle.product_value)
      };
      ctx_data.write().amount = Some(amount);
      Ok::<_, CheckoutError>(FlowControl::Continue)
    })
  });

  // The one network call of this flow. Either a pending payment comes
  // back or nothing does.
  f.on("create_pending_payment", |ctx_data: FlowData<InitiateCtx>| {
    Box::pin(async move {
      let (api, session, raffle_id, amount, quantity) = {
        let guard = ctx_data.read();
        (
          guard.api.clone(),
          guard.session.clone(),
          guard.raffle.id.clone(),
          guard.amount.expect("price_order runs before create_pending_payment"),
          guard.requested_quantity,
        )
      };

      let token = session.bearer()?;
      let req = CreatePaymentRequest {
        raffle_id: raffle_id.clone(),
        amount,
        ticket_quantity: quantity,
      };
      match api.create_payment(&token, req).await {
        Ok(payment) => {
          info!(raffle_id = %raffle_id, payment_id = %payment.id, %amount, quantity, "Pending payment created.");
          ctx_data.write().payment = Some(payment);
          Ok(FlowControl::Continue)
        }
        Err(e) => Err(session.absorb(e)),
      }
    })
  });

  f.on("resolve_checkout_route", |ctx_data: FlowData<InitiateCtx>| {
    Box::pin(async move {
      let payment_id = {
        let guard = ctx_data.read();
        guard
          .payment
          .as_ref()
          .map(|p| p.id.clone())
          .ok_or_else(|| CheckoutError::Internal("pending payment missing after creation step".to_string()))?
      };
      ctx_data.write().next_route = Some(NextRoute::Checkout { payment_id });
      Ok::<_, CheckoutError>(FlowControl::Continue)
    })
  });

  f
}
