// demos/marketplace_app/src/web/handlers/catalog_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;
use rifa::{MarketplaceApi, RaffleId, ShopDirectory, VerificationStatus};

/// Raffle pages are public: no credential required to browse.
#[instrument(name = "handler::get_raffle", skip(app_state))]
pub async fn get_raffle_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let raffle = app_state
    .backend
    .fetch_raffle(&RaffleId::new(path.into_inner()))
    .await
    .map_err(AppError::from)?;
  Ok(HttpResponse::Ok().json(raffle))
}

/// The public directory lists verified shops only.
#[instrument(name = "handler::list_shops", skip(app_state))]
pub async fn list_shops_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let shops = app_state
    .backend
    .shops_with_status(VerificationStatus::Verified)
    .await
    .map_err(AppError::from)?;
  Ok(HttpResponse::Ok().json(json!({ "shops": shops })))
}
