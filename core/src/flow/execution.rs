// src/flow/execution.rs

//! `Flow::run()`: walks the steps in order and drives their handlers.

use crate::flow::control::{FlowControl, FlowOutcome};
use crate::flow::data::FlowData;
use crate::flow::definition::Flow;
use crate::flow::{FlowError, Handler};
use tracing::{event, instrument, span, Instrument, Level};

impl<C, E> Flow<C, E>
where
  C: 'static + Send + Sync,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Executes the flow against the shared context `ctx_data`.
  ///
  /// Returns `Ok(FlowOutcome::Completed)` when every non-skipped step ran,
  /// `Ok(FlowOutcome::Halted)` when a handler returned
  /// [`FlowControl::Halt`], and `Err(E)` when a handler failed or the flow
  /// definition itself is invalid (a non-optional step with no handlers).
  ///
  /// Span guards are never held across handler awaits; handler futures are
  /// instrumented instead, keeping the returned future `Send`.
  #[instrument(
        name = "Flow::run",
        skip_all,
        fields(
            flow_context_type = %std::any::type_name::<C>(),
            flow_error_type = %std::any::type_name::<E>(),
            num_steps = self.steps.len(),
        ),
        err(Display)
    )]
  pub async fn run(&self, ctx_data: FlowData<C>) -> Result<FlowOutcome, E> {
    event!(Level::DEBUG, "Flow execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name_str = step_def.name.as_str();

      if let Some(skip_cond_fn) = &step_def.skip_if {
        if skip_cond_fn(ctx_data.clone()) {
          event!(Level::INFO, step = step_name_str, "Step skipped by its skip condition.");
          continue;
        }
      }

      let phases: [(&str, Option<&Vec<Handler<C, E>>>); 3] = [
        ("before", self.before.get(step_name_str)),
        ("on", self.on.get(step_name_str)),
        ("after", self.after.get(step_name_str)),
      ];

      let has_any_handler = phases.iter().any(|(_, h)| h.map_or(false, |v| !v.is_empty()));
      if !has_any_handler {
        if step_def.optional {
          event!(Level::DEBUG, step = step_name_str, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(Level::ERROR, step = step_name_str, "Non-optional step has no handlers.");
        return Err(E::from(FlowError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      for (phase_name, handlers_opt) in phases {
        let handlers = match handlers_opt {
          Some(h) if !h.is_empty() => h,
          _ => continue,
        };
        for (handler_idx, handler_fn) in handlers.iter().enumerate() {
          let handler_span = span!(
            Level::DEBUG,
            "flow_handler",
            step = step_name_str,
            step_index = step_idx,
            phase = phase_name,
            handler_index = handler_idx
          );
          match handler_fn(ctx_data.clone()).instrument(handler_span).await {
            Ok(FlowControl::Continue) => {}
            Ok(FlowControl::Halt) => {
              event!(
                Level::INFO,
                step = step_name_str,
                phase = phase_name,
                "Flow halted by a handler."
              );
              return Ok(FlowOutcome::Halted);
            }
            Err(e) => {
              event!(Level::ERROR, step = step_name_str, phase = phase_name, error = %e, "Handler failed.");
              return Err(e);
            }
          }
        }
      }

      event!(Level::DEBUG, step = step_name_str, "Step finished.");
    }

    event!(Level::DEBUG, "Flow execution completed.");
    Ok(FlowOutcome::Completed)
  }
}
