// demos/marketplace_app/src/web/handlers/mod.rs

pub mod catalog_handlers;
pub mod complaint_handlers;
pub mod outcome_handlers;
pub mod purchase_handlers;

use crate::errors::AppError;
use crate::state::AppState;
use actix_web::{FromRequest, HttpRequest};
use rifa::{BearerToken, NextRoute, SessionStore, UserId};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use tracing::warn;

// --- Bearer-token extractor ---
// The original client persisted a credential and attached it as
// `Authorization: Bearer <token>` to every call; here the header is the
// credential store.
#[derive(Debug)]
pub struct AuthenticatedUser {
  pub token: BearerToken,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    if let Some(header) = req.headers().get("Authorization") {
      if let Ok(raw) = header.to_str() {
        if let Some(token) = raw.strip_prefix("Bearer ") {
          if !token.is_empty() {
            return futures_util::future::ready(Ok(AuthenticatedUser {
              token: BearerToken::new(token),
            }));
          }
        }
      }
    }
    warn!("AuthenticatedUser extractor: missing or malformed Authorization header.");
    futures_util::future::ready(Err(AppError::Auth(
      "Se requiere autenticación (encabezado Authorization: Bearer).".to_string(),
    )))
  }
}

/// Builds the per-request session context the flows expect: the presented
/// credential plus the user it resolves to. An unknown credential is a
/// 401 before any flow runs.
pub fn open_session(state: &AppState, token: BearerToken) -> Result<(Arc<SessionStore>, UserId), AppError> {
  let user_id = state.backend.resolve_user(&token).map_err(AppError::from)?;
  Ok((Arc::new(SessionStore::signed_in(token, user_id.clone())), user_id))
}

/// Wire shape for the route a flow resolved.
pub fn route_payload(route: &NextRoute) -> JsonValue {
  match route {
    NextRoute::Checkout { payment_id } => json!({"page": "checkout", "paymentId": payment_id}),
    NextRoute::Success { payment_id } => json!({"page": "success", "paymentId": payment_id}),
    NextRoute::Failure { payment_id } => json!({"page": "failure", "paymentId": payment_id}),
    NextRoute::Marketplace => json!({"page": "marketplace"}),
  }
}
