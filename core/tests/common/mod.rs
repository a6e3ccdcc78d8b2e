// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use parking_lot::Mutex;
use pipekit::{AsyncHandler, Handler, PipekitError, PipelineControl};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::Level;

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)] // Clone, PartialEq, Eq for assertions
pub enum TestError {
  #[error("Pipekit framework error: {0}")] // PipekitError isn't PartialEq; keep its Debug text
  Pipekit(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<PipekitError> for TestError {
  fn from(pe: PipekitError) -> Self {
    TestError::Pipekit(format!("{:?}", pe))
  }
}

pub type TestControl = Result<PipelineControl<i64>, TestError>;

// --- Blocking handlers ---
pub struct AddOne;

impl Handler<i64, (), TestError> for AddOne {
  fn process(&self, input: &i64, _ctx: &()) -> TestControl {
    Ok(PipelineControl::Continue(input + 1))
  }
}

pub struct Double;

impl Handler<i64, (), TestError> for Double {
  fn process(&self, input: &i64, _ctx: &()) -> TestControl {
    Ok(PipelineControl::Continue(input * 2))
  }
}

/// Stops the pipeline (no payload) on even input, passes odd input through.
pub struct StopIfEven;

impl Handler<i64, (), TestError> for StopIfEven {
  fn process(&self, input: &i64, _ctx: &()) -> TestControl {
    if input % 2 == 0 {
      return Ok(PipelineControl::stop());
    }
    Ok(PipelineControl::Continue(*input))
  }
}

pub struct AlwaysSkip;

impl Handler<i64, (), TestError> for AlwaysSkip {
  fn can_process(&self, _input: &i64, _ctx: &()) -> bool {
    false
  }

  fn process(&self, _input: &i64, _ctx: &()) -> TestControl {
    Err(TestError::Handler("AlwaysSkip should never process".to_string()))
  }
}

/// Only processes odd input; doubles it.
pub struct DoubleIfOdd;

impl Handler<i64, (), TestError> for DoubleIfOdd {
  fn can_process(&self, input: &i64, _ctx: &()) -> bool {
    input % 2 != 0
  }

  fn process(&self, input: &i64, _ctx: &()) -> TestControl {
    Ok(PipelineControl::Continue(input * 2))
  }
}

/// Records every input it processes and returns it unchanged.
#[derive(Default)]
pub struct Tracking {
  calls: Mutex<Vec<i64>>,
}

impl Tracking {
  pub fn calls(&self) -> Vec<i64> {
    self.calls.lock().clone()
  }
}

impl Handler<i64, (), TestError> for Tracking {
  fn process(&self, input: &i64, _ctx: &()) -> TestControl {
    self.calls.lock().push(*input);
    Ok(PipelineControl::Continue(*input))
  }
}

pub struct Failing(pub &'static str);

impl Handler<i64, (), TestError> for Failing {
  fn process(&self, _input: &i64, _ctx: &()) -> TestControl {
    tracing::warn!(target: "test_handlers", "failing with: '{}'", self.0);
    Err(TestError::Handler(self.0.to_string()))
  }
}

// --- Suspending handlers ---

/// Returns `Pending` once before completing, so awaiting it really yields.
/// Works on any executor, including `futures::executor::block_on`.
pub struct YieldOnce {
  yielded: bool,
}

impl Future for YieldOnce {
  type Output = ();

  fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
    if self.yielded {
      return Poll::Ready(());
    }
    self.yielded = true;
    cx.waker().wake_by_ref();
    Poll::Pending
  }
}

pub fn yield_once() -> YieldOnce {
  YieldOnce { yielded: false }
}

pub struct AsyncAddOne;

#[async_trait]
impl AsyncHandler<i64, (), TestError> for AsyncAddOne {
  async fn process(&self, input: &i64, _ctx: &()) -> TestControl {
    yield_once().await;
    Ok(PipelineControl::Continue(input + 1))
  }
}

pub struct AsyncDouble;

#[async_trait]
impl AsyncHandler<i64, (), TestError> for AsyncDouble {
  async fn process(&self, input: &i64, _ctx: &()) -> TestControl {
    yield_once().await;
    Ok(PipelineControl::Continue(input * 2))
  }
}

pub struct AsyncStopIfNegative;

#[async_trait]
impl AsyncHandler<i64, (), TestError> for AsyncStopIfNegative {
  async fn process(&self, input: &i64, _ctx: &()) -> TestControl {
    yield_once().await;
    if *input < 0 {
      return Ok(PipelineControl::stop());
    }
    Ok(PipelineControl::Continue(*input))
  }
}

/// Suspending counterpart of `DoubleIfOdd`.
pub struct AsyncDoubleIfOdd;

#[async_trait]
impl AsyncHandler<i64, (), TestError> for AsyncDoubleIfOdd {
  fn can_process(&self, input: &i64, _ctx: &()) -> bool {
    input % 2 != 0
  }

  async fn process(&self, input: &i64, _ctx: &()) -> TestControl {
    yield_once().await;
    Ok(PipelineControl::Continue(input * 2))
  }
}

#[derive(Default)]
pub struct AsyncTracking {
  calls: Mutex<Vec<i64>>,
}

impl AsyncTracking {
  pub fn calls(&self) -> Vec<i64> {
    self.calls.lock().clone()
  }
}

#[async_trait]
impl AsyncHandler<i64, (), TestError> for AsyncTracking {
  async fn process(&self, input: &i64, _ctx: &()) -> TestControl {
    yield_once().await;
    self.calls.lock().push(*input);
    Ok(PipelineControl::Continue(*input))
  }
}

pub struct AsyncFailing(pub &'static str);

#[async_trait]
impl AsyncHandler<i64, (), TestError> for AsyncFailing {
  async fn process(&self, _input: &i64, _ctx: &()) -> TestControl {
    yield_once().await;
    Err(TestError::Handler(self.0.to_string()))
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
