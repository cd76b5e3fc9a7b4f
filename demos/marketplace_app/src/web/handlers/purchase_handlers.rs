// demos/marketplace_app/src/web/handlers/purchase_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use super::{open_session, route_payload, AuthenticatedUser};
use crate::errors::AppError;
use crate::services::gateway_sim::SimulatedGateway;
use crate::state::AppState;
use rifa::{FlowData, FlowOutcome, InitiateCtx, MarketplaceApi, PaymentId, PaymentMethod, RaffleId, SettleCtx};

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StartPurchasePayload {
  pub raffle_id: String,
  pub ticket_quantity: u32,
}

/// Which answer the simulated provider should give. Real deployments
/// replace the simulator with a provider-backed `PaymentGateway`, and
/// this knob disappears with it.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SimulatedVerdict {
  Approve,
  Decline,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SettlePaymentPayload {
  pub payment_method: PaymentMethod,
  #[serde(default)]
  pub simulate: Option<SimulatedVerdict>,
  #[serde(default)]
  pub decline_reason: Option<String>,
}

// --- Handlers ---

#[instrument(
    name = "handler::start_purchase",
    skip(app_state, auth_user, payload),
    fields(raffle_id = %payload.raffle_id, quantity = payload.ticket_quantity)
)]
pub async fn start_purchase_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<StartPurchasePayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let (session, user_id) = open_session(&app_state, auth_user.token)?;
  info!(%user_id, "Purchase initiation attempt.");

  // The page projection the availability guard runs against.
  let raffle = app_state
    .backend
    .fetch_raffle(&RaffleId::new(payload.raffle_id.clone()))
    .await
    .map_err(AppError::from)?;

  let ctx = FlowData::new(InitiateCtx::new(
    app_state.backend.clone(),
    session,
    raffle,
    payload.ticket_quantity,
  ));

  match app_state.flows.initiate.run(ctx.clone()).await {
    Ok(FlowOutcome::Completed) => {
      let guard = ctx.read();
      let payment = guard
        .payment
        .as_ref()
        .ok_or_else(|| AppError::Internal("initiation completed without a payment".to_string()))?;
      let route = guard
        .next_route
        .as_ref()
        .ok_or_else(|| AppError::Internal("initiation completed without a route".to_string()))?;
      info!(payment_id = %payment.id, "Purchase initiated; routing to checkout.");
      Ok(HttpResponse::Created().json(json!({
        "payment": payment,
        "nextRoute": route_payload(route),
      })))
    }
    Ok(FlowOutcome::Halted) => {
      warn!("Initiation flow halted unexpectedly.");
      Err(AppError::Internal("La compra no pudo iniciarse.".to_string()))
    }
    Err(e) => Err(AppError::from(e)),
  }
}

#[instrument(
    name = "handler::settle_payment",
    skip(app_state, auth_user, payload),
    fields(method = ?payload.payment_method)
)]
pub async fn settle_payment_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: web::Json<SettlePaymentPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let payment_id = PaymentId::new(path.into_inner());
  let (session, _user_id) = open_session(&app_state, auth_user.token)?;

  let token = session.bearer().map_err(AppError::from)?;
  let payment = app_state
    .backend
    .fetch_payment(&token, &payment_id)
    .await
    .map_err(AppError::from)?;

  let latency = Duration::from_millis(app_state.config.sim_gateway_latency_ms);
  let gateway = match payload.simulate.unwrap_or(SimulatedVerdict::Approve) {
    SimulatedVerdict::Approve => Arc::new(SimulatedGateway::approving(payload.payment_method, latency)),
    SimulatedVerdict::Decline => Arc::new(SimulatedGateway::declining(
      payload.payment_method,
      latency,
      payload
        .decline_reason
        .clone()
        .unwrap_or_else(|| "Pago rechazado por el usuario".to_string()),
    )),
  };

  let ctx = FlowData::new(SettleCtx::new(app_state.backend.clone(), session, gateway, payment));

  match app_state.flows.settle.run(ctx.clone()).await {
    Ok(outcome) => {
      let guard = ctx.read();
      let route = guard
        .next_route
        .as_ref()
        .ok_or_else(|| AppError::Internal("settlement resolved no route".to_string()))?;
      let already_settled = outcome == FlowOutcome::Halted;
      if already_settled {
        warn!(payment_id = %guard.payment.id, "Settlement refused by the double-submit latch.");
      }
      Ok(HttpResponse::Ok().json(json!({
        "payment": &guard.payment,
        "alreadySettled": already_settled,
        "nextRoute": route_payload(route),
      })))
    }
    // Transport failure of the confirm/fail leg: report, do not navigate.
    // The payment stays in its prior state for a user-driven retry.
    Err(e) => Err(AppError::from(e)),
  }
}
