// src/lib.rs

//! escapehatch: explicit result values with early-exit propagation across nested calls.
//!
//! A fallible call produces an [`EhResult`]. Calling [`.eh()`](Propagate::eh) on it either
//! yields the success value or leaves the current call chain by unwinding to the nearest
//! escape hatch on the same thread, which turns the failure back into an `Err`. Between
//! the two, a [`Hatch`] can carry a chain of handlers that classify failures and recover
//! from the ones they know.
//!
//!  - [`escape_hatch`] / [`escape_hatch_into`]: the boundary with no handlers.
//!  - [`Hatch`]: a boundary with `catch_error` / `fallback` handlers, fired last-registered-first.
//!  - [`Sentinel`], [`Target`], [`Targets`]: equals-or-wraps failure classification.
//!  - [`from_pair`], [`from_failable`], [`ResultExt`]: conversions and asserting accessors.
//!  - [`escape_hatch_pair`] / [`escape_hatch_failure`]: adapters for non-`Result` signatures.
//!  - [`ResultSlot`]: a shared output slot for handing results across a thread join.
//!
//! ```
//! use escapehatch::{escape_hatch, from_pair, EhResult, Propagate};
//!
//! fn divide(x: i32, y: i32) -> (i32, Option<anyhow::Error>) {
//!   if y == 0 {
//!     return (0, Some(anyhow::anyhow!("divide by zero")));
//!   }
//!   (x / y, None)
//! }
//!
//! fn divide_twice(x: i32, y: i32) -> EhResult<i32> {
//!   escape_hatch(|| {
//!     let (value, failure) = divide(x, y);
//!     let once = from_pair(value, failure).eh();
//!     let (value, failure) = divide(once, y);
//!     from_pair(value, failure)
//!   })
//! }
//!
//! assert_eq!(divide_twice(8, 2).unwrap(), 2);
//! assert_eq!(divide_twice(8, 0).unwrap_err().to_string(), "divide by zero");
//! ```
//!
//! Interruptions are delivered by unwinding, so crates using escapehatch must build with
//! `panic = "unwind"` (the default). They never cross threads: every thread of work installs
//! its own hatch.

pub mod core;
pub mod error;
pub mod hatch;
pub mod legacy;

// --- Re-exports for the Public API ---

pub use crate::core::result::{from_failable, from_pair, ResultExt};
pub use crate::core::slot::ResultSlot;
pub use crate::core::target::{Sentinel, Target, Targets};

pub use crate::hatch::boundary::{escape_hatch, escape_hatch_into};
pub use crate::hatch::handlers::{HandlerKind, Hatch};
pub use crate::hatch::interrupt::{active_hatches, Propagate};

pub use crate::legacy::{escape_hatch_failure, escape_hatch_pair};

pub use crate::error::{EhResult, Failure, Fault};
