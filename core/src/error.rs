// pipekit/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipekitError {
  /// `Pipeline::remove` was given a handler that is not registered.
  #[error("Handler not found in pipeline: {handler_type}")]
  HandlerNotFound { handler_type: String },

  /// The blocking `Pipeline::run` reached a handler that can only be awaited.
  #[error("Stage {index} holds a suspending handler and cannot run on the blocking path; use run_async or run_blocking")]
  SuspendingHandlerInBlockingRun { index: usize },

  #[error("Error in user-provided handler. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },
}

// Lets handlers that use PipekitError as their error type `?` arbitrary errors.
impl From<AnyhowError> for PipekitError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<PipekitError>() {
      Ok(pipekit_err) => pipekit_err,
      Err(source) => PipekitError::HandlerError { source },
    }
  }
}

pub type PipekitResult<T, E = PipekitError> = std::result::Result<T, E>;
