// demos/marketplace_app/src/state.rs
use crate::config::AppConfig;
use crate::services::backend_mem::InMemoryBackend;
use rifa::CheckoutFlows;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub backend: Arc<InMemoryBackend>,
  pub flows: Arc<CheckoutFlows>,
  pub config: Arc<AppConfig>, // Share loaded config
}
