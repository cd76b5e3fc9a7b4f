// src/flow/step.rs

//! Definition of a single named step within a flow.

use super::data::FlowData;
use std::sync::Arc;

/// Predicate evaluated against the shared context before a step executes.
/// Returning `true` skips the step entirely.
pub type SkipCondition<C> = Arc<dyn Fn(FlowData<C>) -> bool + Send + Sync + 'static>;

/// A step definition: name, optionality and an optional skip predicate.
///
/// Optional steps are allowed to have no registered handlers; a
/// non-optional step without handlers is a configuration error surfaced
/// at run time.
#[derive(Clone)]
pub struct StepDef<C: 'static + Send + Sync> {
  pub name: String,
  pub optional: bool,
  pub skip_if: Option<SkipCondition<C>>,
}

impl<C: 'static + Send + Sync> std::fmt::Debug for StepDef<C> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
