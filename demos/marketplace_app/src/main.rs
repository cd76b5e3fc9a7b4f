// demos/marketplace_app/src/main.rs

// Declare modules for the application
mod config;
mod errors;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::services::backend_mem::InMemoryBackend;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use rifa::{CheckoutFlows, UserId};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting raffle marketplace demo server...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      panic!("Configuration error: {}", e);
    }
  };

  // The external collaborators, stood in for the demo.
  let backend = Arc::new(InMemoryBackend::new(app_config.complaint_response_days));
  backend.register_session(&app_config.demo_bearer_token, UserId::from("user-demo"));
  if app_config.seed_catalog {
    backend.seed_demo_catalog();
  }

  // Build the checkout flows once; they are shared across requests.
  let flows = Arc::new(CheckoutFlows::build());
  tracing::info!("Checkout flows built.");

  // Create AppState
  let app_state = AppState {
    backend,
    flows,
    config: app_config.clone(),
  };

  // Configure and Start Actix Web Server
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::routes::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
