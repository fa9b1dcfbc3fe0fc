// escapehatch/src/hatch/boundary.rs

//! The plain escape hatch: a boundary with no handlers.

use crate::core::slot::ResultSlot;
use crate::error::EhResult;
use crate::hatch::interrupt::{absorb, ActiveHatch};

/// Runs `body` behind an escape hatch.
///
/// Any failure propagated with `.eh()` inside `body` (at any call depth, on this thread)
/// ends up as the `Err` of the returned result. A result returned normally by `body` is
/// passed through as is. Panics that did not come from `.eh()` keep unwinding.
///
/// ```
/// use escapehatch::{escape_hatch, EhResult, Propagate};
///
/// fn parse_sum(a: &str, b: &str) -> EhResult<i64> {
///   escape_hatch(|| {
///     let a = a.parse::<i64>().eh();
///     let b = b.parse::<i64>().eh();
///     Ok(a + b)
///   })
/// }
///
/// assert_eq!(parse_sum("40", "2").unwrap(), 42);
/// assert!(parse_sum("40", "two").is_err());
/// ```
pub fn escape_hatch<T>(body: impl FnOnce() -> EhResult<T>) -> EhResult<T> {
  let _active = ActiveHatch::enter();
  absorb(body)
}

/// Runs `body` behind an escape hatch and writes the outcome into `slot`.
///
/// Returns `true` if the stored result is a success.
pub fn escape_hatch_into<T>(slot: &ResultSlot<T>, body: impl FnOnce() -> EhResult<T>) -> bool {
  let result = escape_hatch(body);
  let ok = result.is_ok();
  slot.store(result);
  ok
}
