// src/flow/control.rs

//! Signals for steering a flow and the outcome of a full run.

/// Signal returned by a step handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
  /// Proceed with the remaining handlers of this step and the steps after it.
  Continue,
  /// Halt the flow immediately. No further handlers run.
  ///
  /// Halting is not an error: it is how a flow expresses an expected
  /// business outcome (a declined payment, a latched double submit).
  Halt,
}

/// Outcome of a full flow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  /// Every non-skipped step ran to completion.
  Completed,
  /// A handler returned [`FlowControl::Halt`].
  Halted,
}
