// pipekit/src/core/handler.rs

//! Defines the handler capability traits a pipeline stage must satisfy,
//! in a blocking (`Handler`) and a suspending (`AsyncHandler`) flavor,
//! plus `FnHandler` for building blocking handlers out of closures.

use crate::core::control::PipelineControl;
use async_trait::async_trait;
use std::fmt;

/// A blocking pipeline handler.
///
/// `T` is the value flowing through the pipeline, `Ctx` the per-run context
/// shared by every stage and `Err` the error type the pipeline propagates.
///
/// Handlers see the current value by reference and return either
/// `PipelineControl::Continue(output)` or `PipelineControl::Stop(payload)`.
/// Returning `Err` aborts the run; work done by earlier stages is not undone.
pub trait Handler<T, Ctx = (), Err = crate::error::PipekitError>: Send + Sync {
  /// Whether this handler wants to process `input`. Skipped handlers leave
  /// the running value untouched.
  fn can_process(&self, _input: &T, _ctx: &Ctx) -> bool {
    true
  }

  fn process(&self, input: &T, ctx: &Ctx) -> Result<PipelineControl<T>, Err>;
}

/// A handler whose `process` is a suspension point.
///
/// Only `Pipeline::run_async` (and `run_blocking`, which drives it) can
/// execute these. The returned future must be `Send`, so implementations
/// generic over `T` or `Ctx` need those types to be `Sync`.
#[async_trait]
pub trait AsyncHandler<T, Ctx = (), Err = crate::error::PipekitError>: Send + Sync {
  fn can_process(&self, _input: &T, _ctx: &Ctx) -> bool {
    true
  }

  async fn process(&self, input: &T, ctx: &Ctx) -> Result<PipelineControl<T>, Err>;
}

type ProcessFn<T, Ctx, Err> = Box<dyn Fn(&T, &Ctx) -> Result<PipelineControl<T>, Err> + Send + Sync>;
type FilterFn<T, Ctx> = Box<dyn Fn(&T, &Ctx) -> bool + Send + Sync>;

/// Blocking handler backed by closures.
pub struct FnHandler<T, Ctx = (), Err = crate::error::PipekitError> {
  label: String,
  filter: Option<FilterFn<T, Ctx>>,
  process_fn: ProcessFn<T, Ctx, Err>,
}

impl<T, Ctx, Err> FnHandler<T, Ctx, Err> {
  pub fn new(
    label: impl Into<String>,
    process_fn: impl Fn(&T, &Ctx) -> Result<PipelineControl<T>, Err> + Send + Sync + 'static,
  ) -> Self {
    Self {
      label: label.into(),
      filter: None,
      process_fn: Box::new(process_fn),
    }
  }

  /// Only process inputs for which `filter` returns true.
  pub fn with_filter(mut self, filter: impl Fn(&T, &Ctx) -> bool + Send + Sync + 'static) -> Self {
    self.filter = Some(Box::new(filter));
    self
  }

  pub fn label(&self) -> &str {
    &self.label
  }
}

impl<T, Ctx, Err> Handler<T, Ctx, Err> for FnHandler<T, Ctx, Err> {
  fn can_process(&self, input: &T, ctx: &Ctx) -> bool {
    self.filter.as_ref().map_or(true, |filter| filter(input, ctx))
  }

  fn process(&self, input: &T, ctx: &Ctx) -> Result<PipelineControl<T>, Err> {
    (self.process_fn)(input, ctx)
  }
}

// Closures don't implement Debug; show what we can.
impl<T, Ctx, Err> fmt::Debug for FnHandler<T, Ctx, Err> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FnHandler")
      .field("label", &self.label)
      .field("filter_present", &self.filter.is_some())
      .finish()
  }
}
