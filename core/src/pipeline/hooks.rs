// pipekit/src/pipeline/hooks.rs

//! Contains methods for appending handlers to a pipeline, in either flavor.
//! Every method appends at the end; execution order is append order and the
//! same handler may be added any number of times.

use crate::core::control::PipelineControl;
use crate::core::handler::{AsyncHandler, FnHandler, Handler};
use crate::core::stage::Stage;
use crate::error::PipekitError;
use crate::pipeline::definition::Pipeline;
use std::ops::AddAssign;
use std::sync::Arc;
use tracing::{event, Level};

impl<T, Ctx, Err> Pipeline<T, Ctx, Err>
where
  T: Send + Sync + 'static,
  Ctx: Send + Sync + 'static,
  Err: std::error::Error + From<PipekitError> + Send + Sync + 'static,
{
  /// Appends a blocking handler.
  ///
  /// The pipeline keeps a clone of the `Arc`; hold on to your own clone if
  /// you want to `remove` the handler later or share it with another pipeline.
  pub fn add<H>(&mut self, handler: Arc<H>)
  where
    H: Handler<T, Ctx, Err> + 'static,
  {
    self.push(Stage::blocking(handler));
  }

  /// Appends a suspending handler. Pipelines holding one must be run with
  /// `run_async` or `run_blocking`.
  pub fn add_async<H>(&mut self, handler: Arc<H>)
  where
    H: AsyncHandler<T, Ctx, Err> + 'static,
  {
    self.push(Stage::suspending(handler));
  }

  /// Wraps `process_fn` in a [`FnHandler`] and appends it.
  /// Returns the handler so the caller can remove it later.
  pub fn add_fn<F>(&mut self, label: &str, process_fn: F) -> Arc<FnHandler<T, Ctx, Err>>
  where
    F: Fn(&T, &Ctx) -> Result<PipelineControl<T>, Err> + Send + Sync + 'static,
  {
    let handler = Arc::new(FnHandler::new(label, process_fn));
    self.add(Arc::clone(&handler));
    handler
  }

  pub fn push(&mut self, stage: Stage<T, Ctx, Err>) {
    event!(
      Level::DEBUG,
      pipeline = self.name.as_deref().unwrap_or("<unnamed>"),
      stage_index = self.stages.len(),
      flavor = stage.flavor(),
      "Stage added."
    );
    self.stages.push(stage);
  }
}

/// `pipeline += Stage::blocking(handler)` appends, same as `push`.
impl<T, Ctx, Err> AddAssign<Stage<T, Ctx, Err>> for Pipeline<T, Ctx, Err>
where
  T: Send + Sync + 'static,
  Ctx: Send + Sync + 'static,
  Err: std::error::Error + From<PipekitError> + Send + Sync + 'static,
{
  fn add_assign(&mut self, stage: Stage<T, Ctx, Err>) {
    self.push(stage);
  }
}
