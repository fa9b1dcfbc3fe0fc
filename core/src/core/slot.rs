// escapehatch/src/core/slot.rs

use crate::error::EhResult;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// A shared output slot an escape hatch can write its final result into.
///
/// Each concurrent unit of work owns its own slot and its own hatch. Slots only hand a
/// result to another thread through an ordinary join: the reader must not look at the
/// slot before the writer's thread has been joined.
///
/// IMPORTANT: guards returned by `read`/`write` are blocking locks. Do not hold one while
/// running a hatch bound to the same slot.
#[derive(Debug)]
pub struct ResultSlot<T>(Arc<RwLock<Option<EhResult<T>>>>);

impl<T> ResultSlot<T> {
  /// Creates an empty slot.
  pub fn new() -> Self {
    ResultSlot(Arc::new(RwLock::new(None)))
  }

  /// Replaces the slot's content, returning whatever was there before.
  pub fn store(&self, result: EhResult<T>) -> Option<EhResult<T>> {
    self.0.write().replace(result)
  }

  /// Empties the slot.
  pub fn take(&self) -> Option<EhResult<T>> {
    self.0.write().take()
  }

  pub fn is_filled(&self) -> bool {
    self.0.read().is_some()
  }

  /// `true` if the slot holds a success. An empty slot is neither ok nor err.
  pub fn is_ok(&self) -> bool {
    matches!(*self.0.read(), Some(Ok(_)))
  }

  /// `true` if the slot holds a failure.
  pub fn is_err(&self) -> bool {
    matches!(*self.0.read(), Some(Err(_)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, Option<EhResult<T>>> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, Option<EhResult<T>>> {
    self.0.write()
  }

  /// Read access to the stored result, if there is one.
  // Example: slot.map_result(|res| res.as_ref().ok())
  pub fn map_result<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&Option<EhResult<T>>) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }
}

impl<T: Clone> ResultSlot<T> {
  /// Clones the success value out, if the slot holds one.
  pub fn ok_value(&self) -> Option<T> {
    match &*self.0.read() {
      Some(Ok(value)) => Some(value.clone()),
      _ => None,
    }
  }
}

impl<T> Clone for ResultSlot<T> {
  fn clone(&self) -> Self {
    ResultSlot(Arc::clone(&self.0))
  }
}

impl<T> Default for ResultSlot<T> {
  fn default() -> Self {
    Self::new()
  }
}
