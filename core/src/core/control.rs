// pipekit/src/core/control.rs

//! Defines signals for controlling pipeline flow and the outcome of a pipeline run.

/// Signal from a handler indicating whether the pipeline should continue or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl<T> {
  /// The handler produced this output; keep going with the next stage.
  Continue(T),
  /// Halt the pipeline immediately. No further stages run, and the carried
  /// payload (if any) becomes the result of the whole run.
  Stop(Option<T>),
}

impl<T> PipelineControl<T> {
  /// Early exit without a payload.
  pub fn stop() -> Self {
    PipelineControl::Stop(None)
  }

  /// Early exit that replaces the pipeline result with `value`.
  pub fn stop_with(value: T) -> Self {
    PipelineControl::Stop(Some(value))
  }

  pub fn is_stop(&self) -> bool {
    matches!(self, PipelineControl::Stop(_))
  }
}

impl<T> From<T> for PipelineControl<T> {
  fn from(value: T) -> Self {
    PipelineControl::Continue(value)
  }
}

/// Outcome of a full pipeline execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult<T> {
  /// Every stage was visited. Holds the output of the last stage that
  /// actually ran, or the original input if none did.
  Completed(T),
  /// A handler returned `PipelineControl::Stop`; holds its payload.
  Stopped(Option<T>),
}

impl<T> PipelineResult<T> {
  pub fn is_stopped(&self) -> bool {
    matches!(self, PipelineResult::Stopped(_))
  }

  /// Flattens the outcome into the value a caller usually wants:
  /// the completed output, the stop payload, or `None` for a bare stop.
  pub fn into_output(self) -> Option<T> {
    match self {
      PipelineResult::Completed(value) => Some(value),
      PipelineResult::Stopped(payload) => payload,
    }
  }
}
