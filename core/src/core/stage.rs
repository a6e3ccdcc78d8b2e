// pipekit/src/core/stage.rs

//! Defines `Stage`, one entry in a pipeline's ordered handler list.

use crate::core::handler::{AsyncHandler, Handler};
use std::sync::Arc;

/// A registered handler, tagged with its flavor.
///
/// The flavor is fixed when the stage is created, so execution dispatches on
/// the tag instead of inspecting the handler at run time.
pub enum Stage<T, Ctx, Err> {
  /// `process` always completes synchronously.
  Blocking(Arc<dyn Handler<T, Ctx, Err>>),
  /// `process` may suspend; only the async path can drive it.
  Suspending(Arc<dyn AsyncHandler<T, Ctx, Err>>),
}

impl<T, Ctx, Err> Stage<T, Ctx, Err>
where
  T: Send + Sync + 'static,
  Ctx: Send + Sync + 'static,
  Err: 'static,
{
  pub fn blocking<H: Handler<T, Ctx, Err> + 'static>(handler: Arc<H>) -> Self {
    Stage::Blocking(handler)
  }

  pub fn suspending<H: AsyncHandler<T, Ctx, Err> + 'static>(handler: Arc<H>) -> Self {
    Stage::Suspending(handler)
  }

  pub fn is_suspending(&self) -> bool {
    matches!(self, Stage::Suspending(_))
  }

  pub fn can_process(&self, input: &T, ctx: &Ctx) -> bool {
    match self {
      Stage::Blocking(handler) => handler.can_process(input, ctx),
      Stage::Suspending(handler) => handler.can_process(input, ctx),
    }
  }

  /// True if this stage holds the same allocation as `handler`.
  pub fn holds<H: ?Sized>(&self, handler: &Arc<H>) -> bool {
    self.handler_addr() == Arc::as_ptr(handler) as *const ()
  }

  // Data pointer only; vtable pointers are not a stable identity.
  fn handler_addr(&self) -> *const () {
    match self {
      Stage::Blocking(handler) => Arc::as_ptr(handler) as *const (),
      Stage::Suspending(handler) => Arc::as_ptr(handler) as *const (),
    }
  }

  pub(crate) fn flavor(&self) -> &'static str {
    match self {
      Stage::Blocking(_) => "blocking",
      Stage::Suspending(_) => "suspending",
    }
  }
}

impl<T, Ctx, Err> Clone for Stage<T, Ctx, Err> {
  fn clone(&self) -> Self {
    match self {
      Stage::Blocking(handler) => Stage::Blocking(Arc::clone(handler)),
      Stage::Suspending(handler) => Stage::Suspending(Arc::clone(handler)),
    }
  }
}

impl<T, Ctx, Err> std::fmt::Debug for Stage<T, Ctx, Err> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let (flavor, addr) = match self {
      Stage::Blocking(handler) => ("Blocking", Arc::as_ptr(handler) as *const ()),
      Stage::Suspending(handler) => ("Suspending", Arc::as_ptr(handler) as *const ()),
    };
    f.debug_tuple(flavor).field(&addr).finish()
  }
}
