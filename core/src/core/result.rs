// escapehatch/src/core/result.rs

//! Constructors and accessors for [`EhResult`].
//!
//! `EhResult<T>` is a plain two-variant `Result<T, Failure>`: the variant alone decides
//! whether a result is a success or a failure, and there is no payload to misread while
//! in the `Err` state. Callers that still need a `(value, failure)` pair get
//! `T::default()` as the value of a failed result.

use crate::error::{EhResult, Failure, Fault};

/// Builds a result from a `(value, failure)` pair.
///
/// The result is `Err` whenever a failure is present, regardless of `value`.
pub fn from_pair<T, E>(value: T, failure: Option<E>) -> EhResult<T>
where
  E: Into<Failure>,
{
  match failure {
    Some(failure) => Err(failure.into()),
    None => Ok(value),
  }
}

/// Builds a result from a bare, optional failure.
///
/// Mostly useful inside recovery functions that want to raise a chosen failure:
/// `from_failable(Some(OTHER)).eh()`.
pub fn from_failable<E>(failure: Option<E>) -> EhResult<()>
where
  E: Into<Failure>,
{
  from_pair((), failure)
}

/// Accessors on top of the standard `Result` API.
pub trait ResultExt<T> {
  /// Splits the result into a `(value, failure)` pair. Never panics.
  ///
  /// A failed result yields `T::default()` as its value.
  fn into_pair(self) -> (T, Option<Failure>)
  where
    T: Default;

  /// Returns the success value.
  ///
  /// # Panics
  /// Panics with a [`Fault::UnwrapOnFailure`] payload carrying the failure if the result is
  /// `Err`. This is an assertion, not a propagation: no escape hatch absorbs it.
  fn must_unwrap(self) -> T;

  /// Returns the failure.
  ///
  /// # Panics
  /// Panics with a [`Fault::ExpectedFailure`] payload if the result is `Ok`.
  fn must_unwrap_failure(self) -> Failure;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<Failure>,
{
  fn into_pair(self) -> (T, Option<Failure>)
  where
    T: Default,
  {
    match self {
      Ok(value) => (value, None),
      Err(failure) => (T::default(), Some(failure.into())),
    }
  }

  #[track_caller]
  fn must_unwrap(self) -> T {
    match self {
      Ok(value) => value,
      Err(failure) => Fault::UnwrapOnFailure {
        failure: failure.into(),
      }
      .raise(),
    }
  }

  #[track_caller]
  fn must_unwrap_failure(self) -> Failure {
    match self {
      Ok(_) => Fault::ExpectedFailure.raise(),
      Err(failure) => failure.into(),
    }
  }
}
