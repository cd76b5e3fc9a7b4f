// demos/marketplace_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  /// Credential the seeded demo user presents as `Authorization: Bearer`.
  pub demo_bearer_token: String,

  /// Simulated provider latency for the gateway stand-ins.
  pub sim_gateway_latency_ms: u64,

  /// Days a shop gets to answer a complaint (display-only deadline).
  pub complaint_response_days: i64,

  /// Seed the in-memory catalog with demo shops and raffles on startup.
  pub seed_catalog: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let demo_bearer_token = get_env("DEMO_BEARER_TOKEN").unwrap_or_else(|_| "demo-token".to_string());

    let sim_gateway_latency_ms = get_env("SIM_GATEWAY_LATENCY_MS")
      .unwrap_or_else(|_| "50".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid SIM_GATEWAY_LATENCY_MS: {}", e)))?;

    let complaint_response_days = get_env("COMPLAINT_RESPONSE_DAYS")
      .unwrap_or_else(|_| "7".to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid COMPLAINT_RESPONSE_DAYS: {}", e)))?;

    let seed_catalog = get_env("SEED_CATALOG")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_CATALOG value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      demo_bearer_token,
      sim_gateway_latency_ms,
      complaint_response_days,
      seed_catalog,
    })
  }
}
