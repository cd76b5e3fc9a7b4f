// tests/flow_engine_tests.rs
mod common;

use common::setup_tracing;
use rifa::{Flow, FlowControl, FlowData, FlowError, FlowOutcome};
use serial_test::serial;
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone, Debug, Default)]
struct EngineTestCtx {
  counter: i32,
  steps_executed: Vec<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
enum EngineTestError {
  #[error("engine error: {0}")]
  Engine(String),

  #[error("handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for EngineTestError {
  fn from(fe: FlowError) -> Self {
    // Stringified so the test error stays Eq-comparable.
    EngineTestError::Engine(format!("{:?}", fe))
  }
}

fn recording_handler(step_name: &'static str) -> rifa::flow::Handler<EngineTestCtx, EngineTestError> {
  Box::new(move |ctx: FlowData<EngineTestCtx>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.steps_executed.push(step_name.to_string());
      Ok(FlowControl::Continue)
    })
  })
}

#[tokio::test]
#[serial]
async fn steps_run_in_declared_order() {
  setup_tracing();
  let mut flow =
    Flow::<EngineTestCtx, EngineTestError>::new(&[("step1", false, None), ("step2", false, None), ("step3", false, None)]);
  flow.on("step1", recording_handler("step1"));
  flow.on("step2", recording_handler("step2"));
  flow.on("step3", recording_handler("step3"));

  let ctx = FlowData::new(EngineTestCtx::default());
  let outcome = flow.run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, FlowOutcome::Completed);
  let guard = ctx.read();
  assert_eq!(guard.counter, 3);
  assert_eq!(guard.steps_executed, vec!["step1", "step2", "step3"]);
}

#[tokio::test]
#[serial]
async fn halt_stops_downstream_steps() {
  setup_tracing();
  let mut flow = Flow::<EngineTestCtx, EngineTestError>::new(&[
    ("step_a", false, None),
    ("halting_step", false, None),
    ("step_c", false, None),
  ]);
  flow.on("step_a", recording_handler("step_a"));
  flow.on("halting_step", |ctx: FlowData<EngineTestCtx>| {
    Box::pin(async move {
      ctx.write().steps_executed.push("halting_step".to_string());
      Ok::<_, EngineTestError>(FlowControl::Halt)
    })
  });
  flow.on("step_c", recording_handler("step_c"));

  let ctx = FlowData::new(EngineTestCtx::default());
  let outcome = flow.run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, FlowOutcome::Halted);
  let guard = ctx.read();
  assert_eq!(guard.counter, 1);
  assert_eq!(guard.steps_executed, vec!["step_a", "halting_step"]);
}

#[tokio::test]
#[serial]
async fn handler_errors_propagate_and_stop_the_flow() {
  setup_tracing();
  let mut flow = Flow::<EngineTestCtx, EngineTestError>::new(&[
    ("good_step", false, None),
    ("bad_step", false, None),
    ("never_runs", false, None),
  ]);
  flow.on("good_step", recording_handler("good_step"));
  flow.on("bad_step", |_ctx: FlowData<EngineTestCtx>| {
    Box::pin(async move { Err(EngineTestError::Handler("broken".to_string())) })
  });
  flow.on("never_runs", recording_handler("never_runs"));

  let ctx = FlowData::new(EngineTestCtx::default());
  let result = flow.run(ctx.clone()).await;

  assert_eq!(result.err().unwrap(), EngineTestError::Handler("broken".to_string()));
  assert_eq!(ctx.read().steps_executed, vec!["good_step"]);
}

#[tokio::test]
#[serial]
async fn skip_condition_skips_a_step() {
  setup_tracing();
  let mut flow = Flow::<EngineTestCtx, EngineTestError>::new(&[
    ("step1", false, None),
    (
      "skipped_when_counter_positive",
      false,
      Some(Arc::new(|ctx: FlowData<EngineTestCtx>| ctx.read().counter > 0)),
    ),
    ("step3", false, None),
  ]);
  flow.on("step1", recording_handler("step1"));
  flow.on("skipped_when_counter_positive", recording_handler("skipped_when_counter_positive"));
  flow.on("step3", recording_handler("step3"));

  let ctx = FlowData::new(EngineTestCtx::default());
  let outcome = flow.run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, FlowOutcome::Completed);
  assert_eq!(ctx.read().steps_executed, vec!["step1", "step3"]);
}

#[tokio::test]
#[serial]
async fn non_optional_step_without_handlers_is_a_configuration_error() {
  setup_tracing();
  let flow = Flow::<EngineTestCtx, EngineTestError>::new(&[("no_handler_here", false, None)]);

  let result = flow.run(FlowData::new(EngineTestCtx::default())).await;
  match result {
    Err(EngineTestError::Engine(s)) => {
      assert!(s.contains("HandlerMissing"));
      assert!(s.contains("no_handler_here"));
    }
    other => panic!("expected engine configuration error, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn optional_step_without_handlers_is_skipped() {
  setup_tracing();
  let flow = Flow::<EngineTestCtx, EngineTestError>::new(&[("optional_no_handler", true, None)]);

  let outcome = flow.run(FlowData::new(EngineTestCtx::default())).await.unwrap();
  assert_eq!(outcome, FlowOutcome::Completed);
}

#[tokio::test]
#[serial]
async fn before_on_after_run_in_phase_order() {
  setup_tracing();
  let mut flow = Flow::<EngineTestCtx, EngineTestError>::new(&[("main_step", false, None)]);
  flow.before("main_step", recording_handler("before_main"));
  flow.on("main_step", recording_handler("on_main"));
  flow.after("main_step", recording_handler("after_main"));

  let ctx = FlowData::new(EngineTestCtx::default());
  flow.run(ctx.clone()).await.unwrap();

  let guard = ctx.read();
  assert_eq!(guard.counter, 3);
  assert_eq!(guard.steps_executed, vec!["before_main", "on_main", "after_main"]);
}
