// tests/mutation_tests.rs
mod common;

use common::*;
use pipekit::{Handler, PipekitError, Pipeline, PipelineOptions, PipelineResult, Stage};
use std::sync::Arc;

type IntPipeline = Pipeline<i64, (), TestError>;

#[test]
fn test_add_appends_in_order() {
  setup_tracing();
  let mut pipeline = IntPipeline::new(true);
  pipeline.add(Arc::new(AddOne));
  pipeline.add_async(Arc::new(AsyncDouble));
  pipeline += Stage::blocking(Arc::new(Double));

  assert_eq!(pipeline.len(), 3);
  let flavors: Vec<bool> = pipeline.stages().map(Stage::is_suspending).collect();
  assert_eq!(flavors, vec![false, true, false]);
}

#[test]
fn test_remove_present_handler() {
  setup_tracing();
  let add_one = Arc::new(AddOne);
  let mut pipeline = IntPipeline::new(true);
  pipeline.add(add_one.clone());
  pipeline.add(Arc::new(Double));

  pipeline.remove(&add_one).unwrap();
  assert_eq!(pipeline.len(), 1);
  assert_eq!(pipeline.run(3, &()).unwrap(), PipelineResult::Completed(6));
}

#[test]
fn test_remove_missing_handler_is_not_found() {
  setup_tracing();
  let mut pipeline = IntPipeline::new(true);
  pipeline.add(Arc::new(AddOne));

  // Same type, different instance: identity, not equality, decides.
  let stranger = Arc::new(AddOne);
  match pipeline.remove(&stranger) {
    Err(PipekitError::HandlerNotFound { handler_type }) => assert!(handler_type.contains("AddOne")),
    other => panic!("Expected PipekitError::HandlerNotFound, got {:?}", other),
  }
  assert_eq!(pipeline.len(), 1);
}

#[test]
fn test_remove_duplicate_removes_first_only() {
  setup_tracing();
  let tracker = Arc::new(Tracking::default());
  let mut pipeline = IntPipeline::new(true);
  pipeline.add(tracker.clone());
  pipeline.add(Arc::new(AddOne));
  pipeline.add(tracker.clone());

  pipeline.remove(&tracker).unwrap();
  assert_eq!(pipeline.len(), 2);

  // The surviving tracker sits after AddOne, so it sees 1 + 1.
  pipeline.run(1, &()).unwrap();
  assert_eq!(tracker.calls(), vec![2]);

  pipeline.remove(&tracker).unwrap();
  assert!(pipeline.remove(&tracker).is_err());
}

#[test]
fn test_remove_suspending_handler() {
  setup_tracing();
  let async_double = Arc::new(AsyncDouble);
  let mut pipeline = IntPipeline::new(true);
  pipeline.add(Arc::new(AddOne));
  pipeline.add_async(async_double.clone());

  pipeline.remove(&async_double).unwrap();
  // Only blocking stages remain, so the blocking path works again.
  assert_eq!(pipeline.run(1, &()).unwrap(), PipelineResult::Completed(2));
}

#[test]
fn test_remove_through_trait_object_arc() {
  setup_tracing();
  let handler: Arc<dyn Handler<i64, (), TestError>> = Arc::new(Double);
  let mut pipeline = IntPipeline::new(true);
  pipeline.push(Stage::Blocking(handler.clone()));

  pipeline.remove(&handler).unwrap();
  assert!(pipeline.is_empty());
}

#[test]
fn test_add_fn_returns_removable_handle() {
  setup_tracing();
  let mut pipeline = IntPipeline::new(true);
  let triple = pipeline.add_fn("triple", |value, _ctx| Ok((value * 3).into()));
  assert_eq!(pipeline.run(2, &()).unwrap(), PipelineResult::Completed(6));

  pipeline.remove(&triple).unwrap();
  assert_eq!(pipeline.run(2, &()).unwrap(), PipelineResult::Completed(2));
}

#[test]
fn test_handler_shared_between_pipelines() {
  setup_tracing();
  let tracker = Arc::new(Tracking::default());

  let mut threaded = IntPipeline::new(true);
  threaded.add(Arc::new(AddOne));
  threaded.add(tracker.clone());

  let mut plain = IntPipeline::new(false);
  plain.add(Arc::new(AddOne));
  plain.add(tracker.clone());

  threaded.run(1, &()).unwrap();
  plain.run(1, &()).unwrap();
  assert_eq!(tracker.calls(), vec![2, 1]);

  // Removing from one pipeline leaves the other untouched.
  threaded.remove(&tracker).unwrap();
  assert_eq!(plain.len(), 2);
}

#[test]
fn test_options_configure_pipeline() {
  setup_tracing();
  let pipeline = IntPipeline::with_options(PipelineOptions {
    name: Some("scoring".to_string()),
    pass_result: true,
  });
  assert_eq!(pipeline.name(), Some("scoring"));
  assert!(pipeline.pass_result());

  let defaults = IntPipeline::default();
  assert_eq!(defaults.name(), None);
  assert!(!defaults.pass_result());
}
