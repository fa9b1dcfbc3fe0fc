// escapehatch/src/hatch/handlers.rs

//! Escape hatches with a chain of `catch_error` / `fallback` handlers.
//!
//! Handlers are registered on a [`Hatch`] in source order and fire in reverse order once
//! the body has finished (last registered, first fired). Each handler looks at the
//! outcome left by the body and by the handlers that fired before it:
//!  - `Ok`: nothing to do.
//!  - `Err` matching the handler's targets (or any `Err`, for a catch-all): the handler's
//!    recovery runs and its return value becomes the new `Ok` outcome. A recovery may
//!    itself call `.eh()`; the new failure becomes the outcome the next handler sees.
//!  - `Err` not matching: the failure passes through untouched.
//!
//! Whatever is still `Err` after the last handler is the hatch's result.

use crate::core::slot::ResultSlot;
use crate::core::target::Targets;
use crate::error::{EhResult, Failure};
use crate::hatch::interrupt::{absorb, absorb_value, ActiveHatch};
use tracing::{event, instrument, span, Level};

/// Recovery function of one registration. Borrows from the enclosing scope for `'h`.
pub(crate) type Recovery<'h, T> = Box<dyn FnOnce(Failure) -> T + 'h>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
  CatchError,
  Fallback,
}

struct Registration<'h, T> {
  kind: HandlerKind,
  targets: Targets,
  recovery: Recovery<'h, T>,
}

/// An escape hatch with an ordered chain of recovery handlers.
///
/// ```
/// use escapehatch::{Hatch, Propagate, Sentinel, Targets};
///
/// static BUSY: Sentinel = Sentinel::new("busy");
/// static GONE: Sentinel = Sentinel::new("gone");
///
/// let result = Hatch::new()
///   .fallback(0, Targets::of(GONE))
///   .catch_error(|_| 7, Targets::of(BUSY))
///   .run(|| {
///     let value: i32 = Err(BUSY).eh();
///     Ok(value)
///   });
/// assert_eq!(result.unwrap(), 7);
/// ```
pub struct Hatch<'h, T> {
  label: Option<String>,
  handlers: Vec<Registration<'h, T>>,
}

impl<'h, T> Hatch<'h, T> {
  pub fn new() -> Self {
    Self {
      label: None,
      handlers: Vec::new(),
    }
  }

  /// Creates a hatch whose label is attached to its tracing span.
  pub fn named<S: Into<String>>(label: S) -> Self {
    Self {
      label: Some(label.into()),
      handlers: Vec::new(),
    }
  }

  pub fn label(&self) -> Option<&str> {
    self.label.as_deref()
  }

  /// Number of registered handlers.
  pub fn handler_count(&self) -> usize {
    self.handlers.len()
  }

  /// Registers a handler that turns a matching failure into `Ok(recovery(failure))`.
  ///
  /// `targets` may be a single [`Targets`] or an array of comparable error values. An empty
  /// target list catches everything.
  pub fn catch_error(mut self, recovery: impl FnOnce(Failure) -> T + 'h, targets: impl Into<Targets>) -> Self {
    self.handlers.push(Registration {
      kind: HandlerKind::CatchError,
      targets: targets.into(),
      recovery: Box::new(recovery),
    });
    self
  }

  /// Registers a catch-all `catch_error`.
  pub fn catch_any(self, recovery: impl FnOnce(Failure) -> T + 'h) -> Self {
    self.catch_error(recovery, Targets::any())
  }

  /// Registers a handler that turns a matching failure into `Ok(value)`.
  pub fn fallback(mut self, value: T, targets: impl Into<Targets>) -> Self
  where
    T: 'h,
  {
    self.handlers.push(Registration {
      kind: HandlerKind::Fallback,
      targets: targets.into(),
      recovery: Box::new(move |_failure: Failure| value),
    });
    self
  }

  /// Registers a catch-all `fallback`.
  pub fn fallback_any(self, value: T) -> Self
  where
    T: 'h,
  {
    self.fallback(value, Targets::any())
  }

  /// Runs `body` behind this hatch, then fires the handlers last-registered-first.
  ///
  /// Panics that did not come from `.eh()` are never absorbed, neither by the hatch nor by
  /// any handler.
  #[instrument(
        name = "Hatch::run",
        skip_all,
        fields(
            label = self.label.as_deref().unwrap_or("anonymous"),
            num_handlers = self.handlers.len(),
        )
    )]
  pub fn run(mut self, body: impl FnOnce() -> EhResult<T>) -> EhResult<T> {
    let _active = ActiveHatch::enter();
    let mut outcome = absorb(body);

    while let Some(registration) = self.handlers.pop() {
      let handler_idx = self.handlers.len();
      let failure = match outcome {
        Ok(value) => {
          event!(Level::TRACE, remaining_handlers = handler_idx + 1, "Outcome is Ok; handlers skipped.");
          return Ok(value);
        }
        Err(failure) => failure,
      };

      let handler_span = span!(
        Level::DEBUG,
        "hatch_handler",
        handler_index = handler_idx,
        kind = ?registration.kind,
        catch_all = registration.targets.is_catch_all()
      );
      let _handler_span_guard = handler_span.enter();

      if !registration.targets.matches(&failure) {
        event!(Level::DEBUG, error = %failure, "Handler targets did not match; failure passes through.");
        outcome = Err(failure);
        continue;
      }

      event!(Level::DEBUG, error = %failure, "Handler claimed failure.");
      let recovery = registration.recovery;
      outcome = absorb_value(move || recovery(failure));
      match &outcome {
        Ok(_) => event!(Level::DEBUG, "Handler recovered."),
        Err(replacement) => event!(Level::DEBUG, error = %replacement, "Handler raised a replacement failure."),
      }
    }

    outcome
  }

  /// Like [`run`](Hatch::run), writing the outcome into `slot`.
  ///
  /// Returns `true` if the stored result is a success.
  pub fn run_into(self, slot: &ResultSlot<T>, body: impl FnOnce() -> EhResult<T>) -> bool {
    let result = self.run(body);
    let ok = result.is_ok();
    slot.store(result);
    ok
  }
}

impl<'h, T> Default for Hatch<'h, T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<'h, T> std::fmt::Debug for Hatch<'h, T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Hatch")
      .field("label", &self.label)
      .field(
        "handlers",
        &self
          .handlers
          .iter()
          .map(|registration| (registration.kind, &registration.targets))
          .collect::<Vec<_>>(),
      )
      .finish()
  }
}
