// escapehatch/src/core/target.rs

//! Failure classification for the handler chain.
//!
//! A handler only claims a failure if the failure *equals or wraps* one of its targets.
//! "Wraps" means the target appears anywhere in the failure's source chain, so a
//! sentinel stays recognizable after `anyhow::Context` has been layered on top of it.

use crate::error::Failure;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A process-wide failure classifier, compared by value.
///
/// Sentinels are meant to be declared once as statics and raised or matched by reference:
///
/// ```
/// use escapehatch::Sentinel;
///
/// static NOT_FOUND: Sentinel = Sentinel::new("not found");
/// let failure = anyhow::Error::from(NOT_FOUND).context("loading profile");
/// assert!(escapehatch::Target::matches(&NOT_FOUND, &failure));
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[error("{name}")]
pub struct Sentinel {
  name: &'static str,
}

impl Sentinel {
  pub const fn new(name: &'static str) -> Self {
    Self { name }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }
}

/// Something a failure can be classified against.
///
/// Implemented for every error type that can be compared by value. A failure matches when
/// it, or any error in its source chain, is of the same type and equal to `self`.
pub trait Target: Send + Sync {
  fn matches(&self, failure: &Failure) -> bool;
}

impl<E> Target for E
where
  E: std::error::Error + PartialEq + Send + Sync + 'static,
{
  fn matches(&self, failure: &Failure) -> bool {
    // anyhow resolves context layers on direct downcasts; the chain walk covers
    // errors nested through `source()`.
    if failure.downcast_ref::<E>() == Some(self) {
      return true;
    }
    failure.chain().any(|cause| cause.downcast_ref::<E>() == Some(self))
  }
}

/// The target list of one handler registration.
///
/// An empty list is a catch-all. Otherwise a failure is claimed if it matches any entry.
#[derive(Clone, Default)]
pub struct Targets(Vec<Arc<dyn Target>>);

impl Targets {
  /// A catch-all: matches every failure.
  pub fn any() -> Self {
    Self(Vec::new())
  }

  pub fn of<T: Target + 'static>(target: T) -> Self {
    Self(vec![Arc::new(target)])
  }

  pub fn or<T: Target + 'static>(mut self, target: T) -> Self {
    self.0.push(Arc::new(target));
    self
  }

  pub fn is_catch_all(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn matches(&self, failure: &Failure) -> bool {
    self.is_catch_all() || self.0.iter().any(|target| target.matches(failure))
  }
}

impl<T: Target + 'static, const N: usize> From<[T; N]> for Targets {
  fn from(targets: [T; N]) -> Self {
    Self(
      targets
        .into_iter()
        .map(|target| Arc::new(target) as Arc<dyn Target>)
        .collect(),
    )
  }
}

impl<T: Target + 'static> From<Vec<T>> for Targets {
  fn from(targets: Vec<T>) -> Self {
    Self(
      targets
        .into_iter()
        .map(|target| Arc::new(target) as Arc<dyn Target>)
        .collect(),
    )
  }
}

impl fmt::Debug for Targets {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_catch_all() {
      f.write_str("Targets(any)")
    } else {
      f.debug_struct("Targets").field("count", &self.0.len()).finish()
    }
  }
}
