// pipekit/src/pipeline/definition.rs

//! Contains the `Pipeline<T, Ctx, Err>` struct definition and methods for its
//! construction and structural modification.

use crate::core::stage::Stage;
use crate::error::PipekitError;
use std::fmt;
use std::sync::Arc;
use tracing::{event, Level};

/// Construction-time settings for a [`Pipeline`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
  /// Label recorded on the pipeline's tracing spans.
  pub name: Option<String>,
  /// Feed each stage the previous stage's output instead of the original input.
  pub pass_result: bool,
}

/// An ordered list of handler stages, run front to back over a single value.
///
/// `T` is the value flowing through the stages, `Ctx` the context every stage
/// receives by reference, and `Err` the error type handlers return. `Err` must
/// be `From<PipekitError>` so the pipeline can report its own failures
/// through the same channel.
///
/// Runs borrow the pipeline immutably and mutation needs `&mut self`, so a
/// pipeline cannot be modified while one of its runs is in flight.
pub struct Pipeline<T, Ctx = (), Err = PipekitError>
where
  T: Send + Sync + 'static,
  Ctx: Send + Sync + 'static,
  Err: std::error::Error + From<PipekitError> + Send + Sync + 'static,
{
  pub(crate) stages: Vec<Stage<T, Ctx, Err>>,
  pub(crate) pass_result: bool,
  pub(crate) name: Option<String>,
}

impl<T, Ctx, Err> Pipeline<T, Ctx, Err>
where
  T: Send + Sync + 'static,
  Ctx: Send + Sync + 'static,
  Err: std::error::Error + From<PipekitError> + Send + Sync + 'static,
{
  /// Creates an empty pipeline.
  pub fn new(pass_result: bool) -> Self {
    Self::with_options(PipelineOptions {
      pass_result,
      ..Default::default()
    })
  }

  pub fn with_options(options: PipelineOptions) -> Self {
    Self {
      stages: Vec::new(),
      pass_result: options.pass_result,
      name: options.name,
    }
  }

  pub fn pass_result(&self) -> bool {
    self.pass_result
  }

  pub fn set_pass_result(&mut self, pass_result: bool) {
    self.pass_result = pass_result;
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn len(&self) -> usize {
    self.stages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.stages.is_empty()
  }

  /// Stages in execution order.
  pub fn stages(&self) -> impl Iterator<Item = &Stage<T, Ctx, Err>> {
    self.stages.iter()
  }

  /// Removes the first stage holding `handler` (compared by `Arc` identity).
  ///
  /// Works for either flavor and for `Arc<dyn Handler<..>>` as well as
  /// concrete handler types. If the handler was added more than once, only
  /// the earliest entry goes.
  pub fn remove<H: ?Sized>(&mut self, handler: &Arc<H>) -> Result<(), PipekitError> {
    match self.stages.iter().position(|stage| stage.holds(handler)) {
      Some(idx) => {
        self.stages.remove(idx);
        event!(Level::DEBUG, stage_index = idx, remaining = self.stages.len(), "Stage removed.");
        Ok(())
      }
      None => {
        event!(Level::DEBUG, handler_type = %std::any::type_name::<H>(), "Stage removal requested for unknown handler.");
        Err(PipekitError::HandlerNotFound {
          handler_type: std::any::type_name::<H>().to_string(),
        })
      }
    }
  }
}

impl<T, Ctx, Err> Default for Pipeline<T, Ctx, Err>
where
  T: Send + Sync + 'static,
  Ctx: Send + Sync + 'static,
  Err: std::error::Error + From<PipekitError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new(false)
  }
}

impl<T, Ctx, Err> fmt::Debug for Pipeline<T, Ctx, Err>
where
  T: Send + Sync + 'static,
  Ctx: Send + Sync + 'static,
  Err: std::error::Error + From<PipekitError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pipeline")
      .field("name", &self.name)
      .field("pass_result", &self.pass_result)
      .field("stages", &self.stages)
      .finish()
  }
}
