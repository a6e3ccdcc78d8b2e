// pipekit/src/core/shared_context.rs
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::sync::Arc;

/// Run context that handlers can mutate through a shared reference.
///
/// Handlers only ever receive `&Ctx`. Using `SharedContext<C>` as the pipeline's
/// `Ctx` gives them interior mutability (counters, call logs, accumulated
/// diagnostics) while the caller keeps a clone to inspect afterwards.
///
/// IMPORTANT: guards are blocking parking_lot guards and MUST NOT be held
/// across `.await` points inside an `AsyncHandler`.
pub struct SharedContext<C: Send + Sync + 'static>(Arc<RwLock<C>>);

impl<C: Send + Sync + 'static> SharedContext<C> {
  pub fn new(data: C) -> Self {
    SharedContext(Arc::new(RwLock::new(data)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, C> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, C> {
    self.0.write()
  }

  pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, C>> {
    self.0.try_write()
  }

  /// Read guard narrowed to one part of the context, e.g. `ctx.map_read(|c| &c.calls)`.
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&C) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }

  /// Runs `f` with exclusive access and returns its result. The guard is
  /// released before this returns, so it is safe to call between awaits.
  pub fn update<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
    f(&mut self.write())
  }

  /// Copies the current state out.
  pub fn snapshot(&self) -> C
  where
    C: Clone,
  {
    self.read().clone()
  }
}

impl<C: Send + Sync + 'static> Clone for SharedContext<C> {
  fn clone(&self) -> Self {
    SharedContext(Arc::clone(&self.0))
  }
}

impl<C: Send + Sync + 'static + Default> Default for SharedContext<C> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}

impl<C: Send + Sync + 'static + fmt::Debug> fmt::Debug for SharedContext<C> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.0.try_read() {
      Some(guard) => f.debug_tuple("SharedContext").field(&*guard).finish(),
      None => f.write_str("SharedContext(<locked>)"),
    }
  }
}
