// src/flow/definition.rs

//! The `Flow<C, E>` struct: construction and handler registration.

use crate::flow::control::FlowControl;
use crate::flow::data::FlowData;
use crate::flow::step::{SkipCondition, StepDef};
use crate::flow::{FlowError, Handler};
use std::collections::HashMap;
use std::future::Future;

/// An ordered, named-step flow over a shared context `C`.
///
/// `C` is the context type handlers operate on, `E` the error type the
/// flow reports. `E` must be `From<FlowError>` so engine-level failures
/// (a non-optional step with no handlers) surface through the same
/// channel as handler failures.
pub struct Flow<C, E>
where
  C: 'static + Send + Sync,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef<C>>,

  // Handlers for the three phases of each step, keyed by step name.
  pub(crate) before: HashMap<String, Vec<Handler<C, E>>>,
  pub(crate) on: HashMap<String, Vec<Handler<C, E>>>,
  pub(crate) after: HashMap<String, Vec<Handler<C, E>>>,
}

impl<C, E> Flow<C, E>
where
  C: 'static + Send + Sync,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Creates a flow from an ordered list of `(name, optional, skip_if)`
  /// step definitions.
  pub fn new(step_defs: &[(&str, bool, Option<SkipCondition<C>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional, skip_cond_opt)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
        skip_if: skip_cond_opt.clone(),
      })
      .collect();

    Self {
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  /// Panics if `step_name` is not part of this flow. Registering a handler
  /// against an unknown step is a programming error, not a runtime one.
  fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!("flow setup error: step '{}' not found in flow definition", step_name);
    }
  }

  fn box_handler<F, HandlerErr>(handler_fn: impl Fn(FlowData<C>) -> F + Send + Sync + 'static) -> Handler<C, E>
  where
    F: Future<Output = Result<FlowControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<E> + Send + Sync + 'static,
  {
    Box::new(move |ctx_data| {
      let fut = handler_fn(ctx_data);
      Box::pin(async move { fut.await.map_err(Into::into) })
    })
  }

  /// Registers a handler to run before the step's main handlers. The
  /// handler's own error type only has to convert into the flow's `E`.
  pub fn before<F, HandlerErr>(&mut self, step_name: &str, handler_fn: impl Fn(FlowData<C>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<FlowControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<E> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .before
      .entry(step_name.to_string())
      .or_default()
      .push(Self::box_handler(handler_fn));
  }

  /// Registers a main handler for the step.
  pub fn on<F, HandlerErr>(&mut self, step_name: &str, handler_fn: impl Fn(FlowData<C>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<FlowControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<E> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .on
      .entry(step_name.to_string())
      .or_default()
      .push(Self::box_handler(handler_fn));
  }

  /// Registers a handler to run after the step's main handlers.
  pub fn after<F, HandlerErr>(&mut self, step_name: &str, handler_fn: impl Fn(FlowData<C>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<FlowControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<E> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .after
      .entry(step_name.to_string())
      .or_default()
      .push(Self::box_handler(handler_fn));
  }

  /// Replaces the skip condition of an existing step.
  pub fn set_skip_condition(&mut self, step_name: &str, skip_if: Option<SkipCondition<C>>) {
    self.ensure_step_exists(step_name);
    self.steps.iter_mut().find(|s| s.name == step_name).unwrap().skip_if = skip_if;
  }

  /// Marks an existing step optional (or not).
  pub fn set_optional(&mut self, step_name: &str, optional: bool) {
    self.ensure_step_exists(step_name);
    self.steps.iter_mut().find(|s| s.name == step_name).unwrap().optional = optional;
  }
}
