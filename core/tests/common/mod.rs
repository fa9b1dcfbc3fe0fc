// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use escapehatch::{Failure, Sentinel};
use std::cell::RefCell;
use tracing::Level;

// --- Common Sentinels ---
pub static FAIL_FIRST_TIME: Sentinel = Sentinel::new("fail first time");
pub static FAIL_SECOND_TIME: Sentinel = Sentinel::new("fail second time");
pub static FAIL_THIRD_TIME: Sentinel = Sentinel::new("fail third time");

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("divide by zero")]
  DivideByZero,

  #[error("Test lookup failed: {0}")]
  Lookup(String),

  #[error("Test storage failed")]
  Storage {
    #[source]
    source: Sentinel,
  },
}

// --- Common Fallible Operations ---

/// Pair-style division, the shape legacy call sites return.
pub fn divide(x: i32, y: i32) -> (i32, Option<Failure>) {
  if y == 0 {
    return (0, Some(anyhow::anyhow!("divide by zero")));
  }
  (x / y, None)
}

/// Result-style division with a comparable error.
pub fn checked_divide(x: i32, y: i32) -> Result<i32, TestError> {
  if y == 0 {
    return Err(TestError::DivideByZero);
  }
  Ok(x / y)
}

/// Always fails with the given sentinel.
pub fn fails_with(sentinel: Sentinel) -> Result<i32, Sentinel> {
  Err(sentinel)
}

// --- Helper for recording handler firing order ---
#[derive(Debug, Default)]
pub struct FireLog(RefCell<Vec<&'static str>>);

impl FireLog {
  pub fn record(&self, name: &'static str) {
    self.0.borrow_mut().push(name);
  }

  pub fn entries(&self) -> Vec<&'static str> {
    self.0.borrow().clone()
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
