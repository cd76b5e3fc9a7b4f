// demos/marketplace_app/src/web/handlers/outcome_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use super::{open_session, AuthenticatedUser};
use crate::errors::AppError;
use crate::state::AppState;
use rifa::{FlowData, OutcomeCtx, OutcomeView, PaymentId, PaymentStatus};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeQuery {
  /// Required by the page contract; its absence is a rendered error, so
  /// it stays optional at the HTTP layer instead of failing extraction.
  #[serde(default)]
  pub payment_id: Option<String>,
}

#[instrument(
    name = "handler::outcome_page",
    skip(app_state, auth_user, query),
    fields(payment_id = ?query.payment_id)
)]
pub async fn outcome_page_handler(
  app_state: web::Data<AppState>,
  query: web::Query<OutcomeQuery>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let (session, _user_id) = open_session(&app_state, auth_user.token)?;

  let payment_ref = query.payment_id.clone().map(PaymentId::new);
  let ctx = FlowData::new(OutcomeCtx::new(app_state.backend.clone(), session, payment_ref));

  // Both Completed and Halted leave a renderable view behind.
  app_state.flows.outcome.run(ctx.clone()).await.map_err(AppError::from)?;

  let guard = ctx.read();
  let view = guard
    .view
    .as_ref()
    .ok_or_else(|| AppError::Internal("outcome flow left no view".to_string()))?;

  let body = match view {
    OutcomeView::Settled { payment, raffle } => {
      let page = match payment.status {
        PaymentStatus::Completed => "success",
        PaymentStatus::Failed => "failure",
        _ => "checkout",
      };
      let mut body = json!({
        "page": page,
        "payment": payment,
      });
      // Raffle-dependent fields are omitted outright when the payment
      // carries no raffle reference, never rendered as null placeholders.
      if let Some(raffle) = raffle {
        body["raffle"] = json!(raffle);
      }
      body
    }
    OutcomeView::Error { message } => json!({
      "page": "error",
      "message": message,
      "escapeRoute": { "page": "marketplace" },
    }),
  };
  Ok(HttpResponse::Ok().json(body))
}
