// escapehatch/src/error.rs

//! Failure and fault types.
//!
//! Two kinds of "something went wrong" exist in this crate and they never mix:
//!  - A [`Failure`] is a recoverable domain failure. It lives in the `Err` side of an
//!    [`EhResult`], travels upward through `.eh()` interruptions and is always absorbed
//!    by an escape hatch.
//!  - A [`Fault`] is a broken invariant in the calling code (unwrapping a failed result,
//!    propagating with no hatch installed). Faults are raised with the [`Fault`] itself as
//!    the panic payload and are never absorbed by a hatch or a handler. Code that catches
//!    the panic can downcast the payload to `Fault` and get the failure back.

use std::panic::{self, Location};
use thiserror::Error;
use tracing::{event, Level};

/// The failure descriptor carried by every `Err` and every interruption.
///
/// Any `std::error::Error + Send + Sync + 'static` converts into it. Wrapping is done with
/// `anyhow::Context`, and the wrapped value stays visible to target matching.
pub type Failure = anyhow::Error;

/// Result type used throughout the crate. The failure side defaults to [`Failure`].
pub type EhResult<T, E = Failure> = std::result::Result<T, E>;

/// A broken invariant in the calling code, raised as a panic payload.
///
/// ```
/// use escapehatch::{Fault, ResultExt, Sentinel, Target};
///
/// static GONE: Sentinel = Sentinel::new("gone");
///
/// let caught = std::panic::catch_unwind(|| Err::<i32, _>(GONE).must_unwrap());
/// let payload = caught.unwrap_err();
/// match payload.downcast_ref::<Fault>() {
///   Some(Fault::UnwrapOnFailure { failure }) => assert!(GONE.matches(failure)),
///   other => panic!("unexpected payload: {:?}", other),
/// }
/// ```
#[derive(Debug, Error)]
pub enum Fault {
  #[error("called `must_unwrap` on a failed result: {failure:#}")]
  UnwrapOnFailure { failure: Failure },

  #[error("expected the result to contain a failure, found a success")]
  ExpectedFailure,

  #[error("failure propagated at {location} with no escape hatch active on this thread: {failure:#}")]
  NoActiveHatch {
    failure: Failure,
    location: &'static Location<'static>,
  },
}

impl Fault {
  /// The failure this fault carries, if any.
  pub fn failure(&self) -> Option<&Failure> {
    match self {
      Fault::UnwrapOnFailure { failure } | Fault::NoActiveHatch { failure, .. } => Some(failure),
      Fault::ExpectedFailure => None,
    }
  }

  /// Panics with `self` as the payload.
  ///
  /// The payload is not a string, so the default panic hook cannot print the message; it is
  /// logged at ERROR first.
  #[track_caller]
  pub(crate) fn raise(self) -> ! {
    event!(Level::ERROR, fault = %self, "Raising fault.");
    panic::panic_any(self)
  }
}
