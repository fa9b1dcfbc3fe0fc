// escapehatch/src/legacy.rs

//! Adapters for call sites that must keep a non-`Result` signature.
//!
//! Some interfaces dictate a `(value, Option<failure>)` return, or a bare
//! `Option<failure>`. These adapters let such functions use `.eh()` internally: the body
//! runs behind an escape hatch and whatever failure it propagates is written back into the
//! legacy shape.

use crate::core::result::{from_failable, from_pair, ResultExt};
use crate::error::Failure;
use crate::hatch::boundary::escape_hatch;

/// Runs a pair-returning `body` behind an escape hatch.
///
/// A failure propagated inside `body` is returned as `(T::default(), Some(failure))`.
/// A pair returned normally is handed back as is, except that a failed pair has its
/// value replaced by `T::default()`.
///
/// ```
/// use escapehatch::{escape_hatch_pair, Propagate};
///
/// fn halve(x: &str) -> (i32, Option<anyhow::Error>) {
///   escape_hatch_pair(|| {
///     let x = x.parse::<i32>().eh();
///     (x / 2, None)
///   })
/// }
///
/// assert_eq!(halve("8").0, 4);
/// assert!(halve("eight").1.is_some());
/// ```
pub fn escape_hatch_pair<T: Default>(body: impl FnOnce() -> (T, Option<Failure>)) -> (T, Option<Failure>) {
  escape_hatch(|| {
    let (value, failure) = body();
    from_pair(value, failure)
  })
  .into_pair()
}

/// Runs `body` behind an escape hatch for interfaces that only report a failure.
///
/// The failure returned by `body` or propagated inside it is written back to the caller;
/// `None` means success.
pub fn escape_hatch_failure(body: impl FnOnce() -> Option<Failure>) -> Option<Failure> {
  let (_, failure) = escape_hatch(|| from_failable(body())).into_pair();
  failure
}
