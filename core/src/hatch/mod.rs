// escapehatch/src/hatch/mod.rs

//! The propagation operator, escape hatches and handler chains.

pub mod boundary;
pub mod handlers;
pub mod interrupt;

pub use boundary::{escape_hatch, escape_hatch_into};
pub use handlers::{Hatch, HandlerKind};
pub use interrupt::{active_hatches, Propagate};
