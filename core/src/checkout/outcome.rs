// src/checkout/outcome.rs

//! Outcome reflection: given only a payment identifier from the page
//! URL, rebuild what the success/failure page shows. Every exit of this
//! flow leaves a renderable view in the context — an absent identifier
//! or a fetch error becomes an error view with a marketplace escape
//! hatch, never a crash and never a spinner that no data will fill.

use crate::api::MarketplaceApi;
use crate::error::CheckoutError;
use crate::flow::{Flow, FlowControl, FlowData};
use crate::model::{Payment, PaymentId, Raffle};
use crate::session::SessionStore;
use std::sync::Arc;
use tracing::warn;

/// What an outcome page renders.
#[derive(Debug, Clone)]
pub enum OutcomeView {
  /// The payment in its terminal (or still pending) state, plus the
  /// raffle context when the payment references one. `raffle: None`
  /// means those display fields are omitted, not loading.
  Settled {
    payment: Payment,
    raffle: Option<Raffle>,
  },
  /// One generic error panel; not-found is deliberately not
  /// distinguished. The only action offered is the marketplace link.
  Error { message: String },
}

/// Context for one outcome page load.
pub struct OutcomeCtx {
  pub api: Arc<dyn MarketplaceApi>,
  pub session: Arc<SessionStore>,

  /// The `paymentId` query parameter, exactly as (not) present in the URL.
  pub payment_ref: Option<PaymentId>,

  pub payment: Option<Payment>,
  pub raffle: Option<Raffle>,
  /// Always `Some` once the flow returns, whether it completed or halted.
  pub view: Option<OutcomeView>,
}

impl OutcomeCtx {
  pub fn new(api: Arc<dyn MarketplaceApi>, session: Arc<SessionStore>, payment_ref: Option<PaymentId>) -> Self {
    Self {
      api,
      session,
      payment_ref,
      payment: None,
      raffle: None,
      view: None,
    }
  }
}

/// Message for the panel rendered when the URL carries no payment id.
const MISSING_REFERENCE_MESSAGE: &str = "Falta la referencia del pago.";

pub fn build_outcome_flow() -> Flow<OutcomeCtx, CheckoutError> {
  let mut f = Flow::<OutcomeCtx, CheckoutError>::new(&[
    ("require_payment_reference", false, None),
    ("fetch_payment", false, None),
    (
      "fetch_raffle_context",
      false,
      // Tolerated absence: a payment without a raffle reference renders
      // with the raffle-dependent fields omitted.
      Some(Arc::new(|ctx_data: FlowData<OutcomeCtx>| {
        ctx_data
          .read()
          .payment
          .as_ref()
          .map_or(true, |p| p.raffle_id.is_none())
      })),
    ),
    ("compose_view", false, None),
  ]);

  // An absent identifier is a first-class rendered error: no fetch, no
  // retry, terminal immediately.
  f.on("require_payment_reference", |ctx_data: FlowData<OutcomeCtx>| {
    Box::pin(async move {
      let missing = ctx_data.read().payment_ref.is_none();
      if missing {
        warn!("Outcome page loaded without a paymentId query parameter.");
        ctx_data.write().view = Some(OutcomeView::Error {
          message: MISSING_REFERENCE_MESSAGE.to_string(),
        });
        return Ok::<_, CheckoutError>(FlowControl::Halt);
      }
      Ok(FlowControl::Continue)
    })
  });

  f.on("fetch_payment", |ctx_data: FlowData<OutcomeCtx>| {
    Box::pin(async move {
      let (api, session, payment_id) = {
        let guard = ctx_data.read();
        (
          guard.api.clone(),
          guard.session.clone(),
          guard.payment_ref.clone().expect("reference checked one step earlier"),
        )
      };

      let fetched = match session.bearer() {
        Ok(token) => api.fetch_payment(&token, &payment_id).await,
        Err(e) => Err(e),
      };
      match fetched {
        Ok(payment) => {
          ctx_data.write().payment = Some(payment);
          Ok(FlowControl::Continue)
        }
        Err(e) => {
          let e = session.absorb(e);
          warn!(payment_id = %payment_id, error = %e, "Outcome page could not load its payment.");
          ctx_data.write().view = Some(OutcomeView::Error {
            message: e.surface_message(),
          });
          Ok(FlowControl::Halt)
        }
      }
    })
  });

  f.on("fetch_raffle_context", |ctx_data: FlowData<OutcomeCtx>| {
    Box::pin(async move {
      let (api, session, raffle_id) = {
        let guard = ctx_data.read();
        let raffle_id = guard
          .payment
          .as_ref()
          .and_then(|p| p.raffle_id.clone())
          .expect("skip condition admits only payments with a raffle reference");
        (guard.api.clone(), guard.session.clone(), raffle_id)
      };

      match api.fetch_raffle(&raffle_id).await {
        Ok(raffle) => {
          ctx_data.write().raffle = Some(raffle);
          Ok::<_, CheckoutError>(FlowControl::Continue)
        }
        Err(e) => {
          let e = session.absorb(e);
          warn!(raffle_id = %raffle_id, error = %e, "Outcome page could not load its raffle context.");
          ctx_data.write().view = Some(OutcomeView::Error {
            message: e.surface_message(),
          });
          Ok(FlowControl::Halt)
        }
      }
    })
  });

  f.on("compose_view", |ctx_data: FlowData<OutcomeCtx>| {
    Box::pin(async move {
      let mut guard = ctx_data.write();
      let payment = guard
        .payment
        .clone()
        .ok_or_else(|| CheckoutError::Internal("payment missing at view composition".to_string()))?;
      let raffle = guard.raffle.clone();
      guard.view = Some(OutcomeView::Settled { payment, raffle });
      Ok::<_, CheckoutError>(FlowControl::Continue)
    })
  });

  f
}
