// demos/marketplace_app/src/web/handlers/complaint_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};

use super::{open_session, AuthenticatedUser};
use crate::errors::AppError;
use crate::state::AppState;
use rifa::{ComplaintCtx, FileComplaintRequest, FlowData, FlowOutcome};

#[instrument(
    name = "handler::file_complaint",
    skip(app_state, auth_user, payload),
    fields(kind = ?payload.kind)
)]
pub async fn file_complaint_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<FileComplaintRequest>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let (session, user_id) = open_session(&app_state, auth_user.token)?;
  info!(%user_id, "Complaint filing attempt.");

  let ctx = FlowData::new(ComplaintCtx::new(
    app_state.backend.clone(),
    session,
    payload.into_inner(),
  ));

  match app_state.flows.complaint.run(ctx.clone()).await {
    Ok(FlowOutcome::Completed) => {
      let guard = ctx.read();
      let complaint = guard
        .complaint
        .as_ref()
        .ok_or_else(|| AppError::Internal("complaint flow completed without a record".to_string()))?;
      Ok(HttpResponse::Created().json(json!({
        "complaint": complaint,
        "responseDueInDays": complaint.response_due_in_days(Utc::now()),
      })))
    }
    Ok(FlowOutcome::Halted) => Err(AppError::Internal("La queja no pudo registrarse.".to_string())),
    Err(e) => Err(AppError::from(e)),
  }
}
