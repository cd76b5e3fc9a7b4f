// src/flow/data.rs

//! Shared, lock-protected context data passed to every flow handler.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared ownership and interior mutability for a flow's context,
/// backed by `parking_lot::RwLock`.
///
/// IMPORTANT: guards obtained from this wrapper are blocking and MUST NOT
/// be held across `.await` suspension points. Read what you need into
/// locals, drop the guard, then await.
#[derive(Debug)]
pub struct FlowData<C: Send + Sync + 'static>(Arc<RwLock<C>>);

impl<C: Send + Sync + 'static> FlowData<C> {
  pub fn new(data: C) -> Self {
    FlowData(Arc::new(RwLock::new(data)))
  }

  /// Acquires a read lock. The guard must be dropped before any `.await`.
  pub fn read(&self) -> RwLockReadGuard<'_, C> {
    self.0.read()
  }

  /// Acquires a write lock. The guard must be dropped before any `.await`.
  pub fn write(&self) -> RwLockWriteGuard<'_, C> {
    self.0.write()
  }
}

impl<C: Send + Sync + 'static> Clone for FlowData<C> {
  fn clone(&self) -> Self {
    FlowData(Arc::clone(&self.0))
  }
}

impl<C: Send + Sync + 'static + Default> Default for FlowData<C> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
