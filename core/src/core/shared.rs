// pipewright/src/core/shared.rs

//! Lockable state for dependency bags.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// A handle to state that several middleware, or several concurrent branches,
/// read and mutate through the same dependency bag: counters, logs, caches.
///
/// Pipelines never lock it themselves. Guards from `read`/`write` block, so
/// drop them before the next `.await`; `update` and `snapshot` release the
/// lock before returning.
#[derive(Debug)]
pub struct Shared<T>(Arc<RwLock<T>>);

impl<T> Shared<T> {
  pub fn new(value: T) -> Self {
    Shared(Arc::new(RwLock::new(value)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Mutates the value in place and returns whatever `f` returns.
  pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
    let mut guard = self.0.write();
    f(&mut guard)
  }
}

impl<T: Clone> Shared<T> {
  /// Copies the current value out.
  pub fn snapshot(&self) -> T {
    self.0.read().clone()
  }
}

impl<T> Clone for Shared<T> {
  fn clone(&self) -> Self {
    Shared(Arc::clone(&self.0))
  }
}

impl<T: Default> Default for Shared<T> {
  fn default() -> Self {
    Shared::new(T::default())
  }
}
