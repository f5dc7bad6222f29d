// tests/pipeline_execution_tests.rs
mod common; // Reference the common module

use common::*;
use pipewright::{
  ask, from_step, map_output, middleware, pipe, pipe_as_middleware, Control, History, Pipeline, PipelineResult,
  PipeResult, Step,
};
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
#[serial]
async fn test_pass_through_pipelines_return_the_input() {
  setup_tracing();
  for len in [0usize, 1, 2, 7] {
    let steps = (0..len).map(|_| identity()).collect::<Vec<_>>();
    let result = pipe(TestDeps::shared(), 42, steps).await.unwrap();
    assert_eq!(result, 42, "pipeline of {} identity steps", len);
  }
}

#[tokio::test]
#[serial]
async fn test_pipeline_runs_steps_in_order() {
  setup_tracing();
  let deps = TestDeps::shared();
  let pipeline = Pipeline::new(vec![counted("step1", 1), counted("step2", 10), counted("step3", 100)]);

  let result = pipeline.run(deps.clone(), 0).await.unwrap();

  assert_eq!(result, 111);
  assert_eq!(deps.calls(), 3);
  assert_eq!(deps.log(), vec!["step1", "step2", "step3"]);
}

#[tokio::test]
#[serial]
async fn test_stop_returns_value_produced_before_the_stopping_step() {
  setup_tracing();
  let deps = TestDeps::shared();
  let pipeline = Pipeline::new(vec![
    counted("stepA", 1),
    counted("stepB", 1),
    stopping("stopStep", "enough"),
    counted("stepD", 1), // This should not run
  ]);

  let result = pipeline.run_with_status(deps.clone(), 5).await.unwrap();

  assert!(result.is_stopped());
  match result {
    PipelineResult::Stopped { value, signal } => {
      assert_eq!(value, 7);
      assert_eq!(signal.message(), "enough");
    }
    other => panic!("Expected PipelineResult::Stopped, got {:?}", other),
  }
  assert_eq!(deps.log(), vec!["stepA", "stepB", "stopStep"]);
}

#[tokio::test]
#[serial]
async fn test_stop_in_first_step_returns_initial_value() {
  setup_tracing();
  let deps = TestDeps::shared();
  let result = pipe(deps.clone(), 9, vec![stopping("first", "s"), add(1)]).await;

  assert_eq!(result.unwrap(), 9);
  assert_eq!(deps.calls(), 1);
}

#[tokio::test]
#[serial]
async fn test_pipeline_propagates_middleware_error_and_skips_later_steps() {
  setup_tracing();
  let deps = TestDeps::shared();
  let pipeline = Pipeline::new(vec![
    counted("good_step", 1),
    failing("bad_step", "I am a bad step!"),
    counted("another_step", 1),
  ]);

  let result = pipeline.run(deps.clone(), 0).await;

  let err = result.expect_err("pipeline should fail");
  assert_eq!(boom_message(&err).as_deref(), Some("I am a bad step!"));
  assert_eq!(deps.calls(), 2);
  assert_eq!(deps.log(), vec!["good_step", "bad_step"]);
}

#[tokio::test]
#[serial]
async fn test_each_step_sees_history_up_to_its_own_input() {
  setup_tracing();
  let deps = TestDeps::shared();
  let pipeline = Pipeline::new(vec![
    record_history("s0"),
    add(1),
    record_history("s2"),
    double(),
    record_history("s4"),
  ]);

  let result = pipeline.run(deps.clone(), 3).await.unwrap();

  assert_eq!(result, 8);
  assert_eq!(deps.log(), vec!["s0:[3]", "s2:[3,3,4]", "s4:[3,3,4,4,8]"]);
}

#[tokio::test]
#[serial]
async fn test_ask_returns_value_current_at_start_of_second_step() {
  setup_tracing();
  let lookup: Mw = map_output(ask(1), |found: Option<i64>| found.unwrap_or(-1));
  let result = pipe(TestDeps::shared(), 1, vec![add(10), double(), lookup]).await.unwrap();

  // step 1 starts with 1, step 2 with 11, step 3 with 22
  assert_eq!(result, 11);
}

#[tokio::test]
#[serial]
async fn test_ask_past_the_end_of_history_is_unknown() {
  setup_tracing();
  let lookup: Mw<Option<i64>> = ask(5);
  let out = lookup(TestDeps::shared(), 0, History::from(vec![0, 1])).await.unwrap();
  assert_eq!(out, Control::Continue(None));
}

#[tokio::test]
#[serial]
async fn test_embedded_pipeline_absorbs_its_own_stop() {
  setup_tracing();
  let deps = TestDeps::shared();
  let inner: Mw = pipe_as_middleware(vec![add(1), stopping("inner_stop", "inner done"), add(1000)]);

  let result = pipe(deps.clone(), 0, vec![inner, counted("after_inner", 10)]).await.unwrap();

  assert_eq!(result, 11);
  assert_eq!(deps.log(), vec!["inner_stop", "after_inner"]);
}

#[tokio::test]
#[serial]
async fn test_embedded_pipeline_starts_a_fresh_history() {
  setup_tracing();
  let deps = TestDeps::shared();
  let inner: Mw = pipe_as_middleware(vec![record_history("inner")]);

  pipe(deps.clone(), 1, vec![add(1), add(1), inner]).await.unwrap();

  assert_eq!(deps.log(), vec!["inner:[3]"]);
}

#[tokio::test]
#[serial]
async fn test_embedded_pipeline_error_propagates() {
  setup_tracing();
  let deps = TestDeps::shared();
  let inner: Mw = pipe_as_middleware(vec![failing("inner_fail", "nested")]);

  let err = pipe(deps.clone(), 0, vec![inner, counted("never", 1)]).await.unwrap_err();

  assert_eq!(boom_message(&err).as_deref(), Some("nested"));
  assert_eq!(deps.log(), vec!["inner_fail"]);
}

#[tokio::test]
#[serial]
async fn test_flow_is_reusable_across_dependency_bags() {
  setup_tracing();
  let reusable = pipewright::flow(vec![counted("only", 1)]);

  let first = TestDeps::shared();
  let second = TestDeps::shared();
  assert_eq!(reusable.run(first.clone(), 1).await.unwrap(), 2);
  assert_eq!(reusable.run(second.clone(), 5).await.unwrap(), 6);
  assert_eq!(first.calls(), 1);
  assert_eq!(second.calls(), 1);
}

#[tokio::test]
#[serial]
async fn test_steps_do_not_overlap() {
  setup_tracing();
  let deps = TestDeps::shared();
  let slow: Mw = middleware(|deps: Arc<TestDeps>, value: i64, _history: History<i64>| async move {
    deps.log.write().push("slow:start".to_string());
    tokio::time::sleep(Duration::from_millis(20)).await;
    deps.log.write().push("slow:end".to_string());
    Ok(Control::Continue(value + 1))
  });

  pipe(deps.clone(), 0, vec![slow, counted("fast", 1)]).await.unwrap();

  assert_eq!(deps.log(), vec!["slow:start", "slow:end", "fast"]);
}

#[tokio::test]
#[serial]
async fn test_builder_methods_keep_order() {
  setup_tracing();
  let deps = TestDeps::shared();
  let mut pipeline = Pipeline::default().then(counted("a", 1)).then(counted("c", 1));
  pipeline.insert(1, counted("b", 1));
  pipeline.push(counted("d", 1));

  assert_eq!(pipeline.len(), 4);
  pipeline.run(deps.clone(), 0).await.unwrap();
  assert_eq!(deps.log(), vec!["a", "b", "c", "d"]);
}

struct Multiply {
  factor: i64,
}

#[async_trait::async_trait]
impl Step<TestDeps, i64> for Multiply {
  async fn call(&self, deps: Arc<TestDeps>, input: i64, _history: History<i64>) -> PipeResult<Control<i64>> {
    deps.log.write().push(format!("multiply by {}", self.factor));
    Ok(Control::Continue(input * self.factor))
  }
}

#[tokio::test]
#[serial]
async fn test_struct_step_runs_like_closure_middleware() {
  setup_tracing();
  let deps = TestDeps::shared();
  let result = pipe(deps.clone(), 3, vec![from_step(Multiply { factor: 4 }), add(1)]).await.unwrap();

  assert_eq!(result, 13);
  assert_eq!(deps.log(), vec!["multiply by 4"]);
}
