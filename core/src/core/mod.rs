pub mod result;
pub mod slot;
pub mod target;

// Re-export key types for easier access from other modules (and lib.rs)
pub use result::{from_failable, from_pair, ResultExt};
pub use slot::ResultSlot;
pub use target::{Sentinel, Target, Targets};
