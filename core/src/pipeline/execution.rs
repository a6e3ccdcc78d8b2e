// pipekit/src/pipeline/execution.rs

//! Contains the run methods of `Pipeline<T, Ctx, Err>`.
//!
//! `run` and `run_async` walk the same state machine: gate each stage with
//! `can_process`, record its output, thread it forward when `pass_result` is
//! set, and end early on `PipelineControl::Stop`. They differ only in how a
//! stage's `process` is invoked.

use crate::core::control::{PipelineControl, PipelineResult};
use crate::core::stage::Stage;
use crate::error::PipekitError;
use crate::pipeline::definition::Pipeline;
use std::ops::ControlFlow;
use tracing::{event, instrument, span, Instrument, Level};

/// Values tracked across one run.
struct RunState<T> {
  /// What the next stage receives.
  current: T,
  /// Output of the last stage that ran, when it differs from `current`
  /// (only with `pass_result == false`).
  last_output: Option<T>,
  pass_result: bool,
}

impl<T> RunState<T> {
  fn new(input: T, pass_result: bool) -> Self {
    Self {
      current: input,
      last_output: None,
      pass_result,
    }
  }

  fn current(&self) -> &T {
    &self.current
  }

  fn record(&mut self, output: T) {
    if self.pass_result {
      self.current = output;
    } else {
      self.last_output = Some(output);
    }
  }

  /// Folds one stage outcome into the run. `Break` carries the final answer.
  fn settle<Err>(&mut self, outcome: Result<PipelineControl<T>, Err>) -> ControlFlow<Result<PipelineResult<T>, Err>>
  where
    Err: std::fmt::Display,
  {
    match outcome {
      Ok(PipelineControl::Continue(output)) => {
        self.record(output);
        ControlFlow::Continue(())
      }
      Ok(PipelineControl::Stop(payload)) => {
        event!(Level::INFO, has_payload = payload.is_some(), "Pipeline stopped by a handler.");
        ControlFlow::Break(Ok(PipelineResult::Stopped(payload)))
      }
      Err(e) => {
        event!(Level::ERROR, error = %e, "Handler failed.");
        ControlFlow::Break(Err(e))
      }
    }
  }

  fn finish(self) -> PipelineResult<T> {
    PipelineResult::Completed(self.last_output.unwrap_or(self.current))
  }
}

impl<T, Ctx, Err> Pipeline<T, Ctx, Err>
where
  T: Send + Sync + 'static,
  Ctx: Send + Sync + 'static,
  Err: std::error::Error + From<PipekitError> + Send + Sync + 'static,
{
  /// Runs every stage on the calling thread.
  ///
  /// Returns `PipelineResult::Completed` with the last executed stage's
  /// output (the original `input` if no stage ran), or
  /// `PipelineResult::Stopped` with the payload of the stage that stopped.
  ///
  /// A handler error is returned unchanged and later stages do not run.
  /// Side effects of earlier stages are not rolled back.
  ///
  /// Fails with `PipekitError::SuspendingHandlerInBlockingRun` (converted
  /// into `Err`) if a stage that would process the value is a suspending
  /// handler; use [`Pipeline::run_async`] or [`Pipeline::run_blocking`] for those.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      pipeline = self.name.as_deref().unwrap_or("<unnamed>"),
      value_type = %std::any::type_name::<T>(),
      num_stages = self.stages.len(),
      pass_result = self.pass_result,
    ),
    err(Display)
  )]
  pub fn run(&self, input: T, ctx: &Ctx) -> Result<PipelineResult<T>, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");
    let mut state = RunState::new(input, self.pass_result);

    for (stage_idx, stage) in self.stages.iter().enumerate() {
      let stage_span = span!(
        Level::DEBUG,
        "pipeline_stage",
        stage_index = stage_idx,
        flavor = stage.flavor()
      );
      let _stage_span_guard = stage_span.enter();

      if !stage.can_process(state.current(), ctx) {
        event!(Level::TRACE, "Stage skipped by can_process.");
        continue;
      }

      let outcome = match stage {
        Stage::Blocking(handler) => handler.process(state.current(), ctx),
        Stage::Suspending(_) => {
          event!(Level::ERROR, "Suspending handler reached on the blocking path.");
          return Err(Err::from(PipekitError::SuspendingHandlerInBlockingRun { index: stage_idx }));
        }
      };

      if let ControlFlow::Break(done) = state.settle(outcome) {
        return done;
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(state.finish())
  }

  /// Runs every stage, awaiting suspending handlers and calling blocking
  /// ones inline. Same semantics and results as [`Pipeline::run`].
  ///
  /// Concurrent calls on a shared pipeline are independent of each other.
  #[instrument(
    name = "Pipeline::run_async",
    skip_all,
    fields(
      pipeline = self.name.as_deref().unwrap_or("<unnamed>"),
      value_type = %std::any::type_name::<T>(),
      num_stages = self.stages.len(),
      pass_result = self.pass_result,
    ),
    err(Display)
  )]
  pub async fn run_async(&self, input: T, ctx: &Ctx) -> Result<PipelineResult<T>, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");
    let mut state = RunState::new(input, self.pass_result);

    for (stage_idx, stage) in self.stages.iter().enumerate() {
      // Entered only around synchronous work; the await below is instrumented instead.
      let stage_span = span!(
        Level::DEBUG,
        "pipeline_stage",
        stage_index = stage_idx,
        flavor = stage.flavor()
      );

      if !stage_span.in_scope(|| stage.can_process(state.current(), ctx)) {
        event!(parent: &stage_span, Level::TRACE, "Stage skipped by can_process.");
        continue;
      }

      let outcome = match stage {
        Stage::Blocking(handler) => stage_span.in_scope(|| handler.process(state.current(), ctx)),
        Stage::Suspending(handler) => {
          handler
            .process(state.current(), ctx)
            .instrument(stage_span.clone())
            .await
        }
      };

      if let ControlFlow::Break(done) = stage_span.in_scope(|| state.settle(outcome)) {
        return done;
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(state.finish())
  }

  /// Drives [`Pipeline::run_async`] to completion on the current thread.
  ///
  /// This is the blocking entry point for pipelines that contain suspending
  /// handlers. Do not call it from inside an async runtime's worker thread;
  /// await `run_async` there instead.
  pub fn run_blocking(&self, input: T, ctx: &Ctx) -> Result<PipelineResult<T>, Err> {
    futures::executor::block_on(self.run_async(input, ctx))
  }
}
