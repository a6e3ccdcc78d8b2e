// demos/order_intake/src/errors.rs
use pipekit::PipekitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Order validation failed: {0}")]
  Validation(String),

  #[error("Pipeline error: {0}")]
  Pipeline(#[from] PipekitError),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
