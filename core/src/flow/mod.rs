// src/flow/mod.rs

//! A small asynchronous flow engine: named steps executed in order, each
//! step an async handler over a shared context, with skip conditions,
//! optional steps, before/on/after phases and a continue/halt signal.
//!
//! Flows carry the checkout protocol of this crate, but the engine itself
//! knows nothing about raffles or payments.

pub mod control;
pub mod data;
pub mod definition;
pub mod execution;
pub mod step;

pub use control::{FlowControl, FlowOutcome};
pub use data::FlowData;
pub use definition::Flow;
pub use step::{SkipCondition, StepDef};

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors produced by the engine itself, as opposed to errors produced by
/// the handlers it runs. A flow's handler error type must be
/// `From<FlowError>` so framework failures surface through the same
/// channel as domain failures.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("flow configuration error for step '{step_name}': {message}")]
  Configuration { step_name: String, message: String },
}

pub type FlowResult<T, E = FlowError> = std::result::Result<T, E>;

/// Future returned by a step handler.
pub type HandlerFuture<E> = Pin<Box<dyn Future<Output = Result<FlowControl, E>> + Send>>;

/// A registered step handler: borrows the shared context, returns a
/// control signal or the flow's error type.
pub type Handler<C, E> = Box<dyn Fn(FlowData<C>) -> HandlerFuture<E> + Send + Sync>;
