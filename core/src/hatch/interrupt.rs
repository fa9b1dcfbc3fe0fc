// escapehatch/src/hatch/interrupt.rs

//! The propagation operator and the interruption it raises.
//!
//! `.eh()` turns an `Err` into a non-local exit: it unwinds the stack with a crate-private
//! payload until the nearest escape hatch on the same thread catches it. The payload type
//! is the tag. Hatches only absorb payloads that downcast to [`Interruption`]; every other
//! panic keeps unwinding untouched.
//!
//! The interruption is raised with `resume_unwind`, which skips the panic hook, so a
//! propagated failure does not print anything on its way to the hatch.

use crate::error::{EhResult, Failure, Fault};
use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe, Location};
use tracing::{event, Level};

thread_local! {
  // Number of escape hatches currently running on this thread.
  static ACTIVE_HATCHES: Cell<usize> = const { Cell::new(0) };
}

/// Unwinding payload raised by `.eh()`. Carries exactly one failure.
pub(crate) struct Interruption {
  pub(crate) failure: Failure,
  pub(crate) raised_at: &'static Location<'static>,
}

/// Marks one hatch as active on the current thread for as long as it lives.
///
/// Dropped on every exit path, including while a foreign panic unwinds through the hatch.
pub(crate) struct ActiveHatch {
  _private: (),
}

impl ActiveHatch {
  pub(crate) fn enter() -> Self {
    let depth = ACTIVE_HATCHES.with(|active| {
      let depth = active.get() + 1;
      active.set(depth);
      depth
    });
    event!(Level::TRACE, depth, "Escape hatch opened.");
    ActiveHatch { _private: () }
  }
}

impl Drop for ActiveHatch {
  fn drop(&mut self) {
    let depth = ACTIVE_HATCHES.with(|active| {
      let depth = active.get().saturating_sub(1);
      active.set(depth);
      depth
    });
    event!(Level::TRACE, depth, "Escape hatch closed.");
  }
}

/// Number of escape hatches active on the calling thread.
///
/// `.eh()` may only raise while this is non-zero. Hatches on other threads do not count.
pub fn active_hatches() -> usize {
  ACTIVE_HATCHES.with(Cell::get)
}

/// The propagation operator.
pub trait Propagate<T> {
  /// Returns the success value, or leaves the current function by unwinding to the
  /// nearest escape hatch with the failure.
  ///
  /// Never returns when the result is `Err`.
  ///
  /// # Panics
  /// Panics with a [`Fault::NoActiveHatch`] payload if the result is `Err` and no escape
  /// hatch is active on the current thread.
  fn eh(self) -> T;
}

impl<T, E> Propagate<T> for Result<T, E>
where
  E: Into<Failure>,
{
  #[track_caller]
  fn eh(self) -> T {
    match self {
      Ok(value) => value,
      Err(failure) => raise(failure.into(), Location::caller()),
    }
  }
}

fn raise(failure: Failure, raised_at: &'static Location<'static>) -> ! {
  if active_hatches() == 0 {
    Fault::NoActiveHatch {
      failure,
      location: raised_at,
    }
    .raise();
  }
  event!(Level::TRACE, %raised_at, error = %failure, "Raising interruption.");
  panic::resume_unwind(Box::new(Interruption { failure, raised_at }))
}

/// Runs `body`, converting an interruption raised inside it into `Err`.
///
/// A result returned normally by `body` passes through unchanged. Panics that are not
/// interruptions are re-raised with their original payload.
pub(crate) fn absorb<T>(body: impl FnOnce() -> EhResult<T>) -> EhResult<T> {
  match panic::catch_unwind(AssertUnwindSafe(body)) {
    Ok(result) => result,
    Err(payload) => Err(claim(payload)),
  }
}

/// Like [`absorb`], for bodies that cannot fail except by interruption.
pub(crate) fn absorb_value<T>(body: impl FnOnce() -> T) -> EhResult<T> {
  absorb(|| Ok(body()))
}

fn claim(payload: Box<dyn Any + Send>) -> Failure {
  match payload.downcast::<Interruption>() {
    Ok(interruption) => {
      let Interruption { failure, raised_at } = *interruption;
      event!(Level::DEBUG, %raised_at, error = %failure, "Interruption absorbed.");
      failure
    }
    Err(foreign) => {
      event!(Level::WARN, "Foreign panic crossing an escape hatch; re-raising.");
      panic::resume_unwind(foreign)
    }
  }
}
