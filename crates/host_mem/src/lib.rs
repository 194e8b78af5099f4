//! # host_mem
//!
//! In-memory implementation of the `host_api` capabilities: an
//! arena-backed display tree with live text-input state, plus a
//! latching render scheduler.
//!
//! This is both the reference host and the fixture the engine's
//! integration tests run against: it honors the same contracts a real
//! display backend would (positional children, replace-through-parent,
//! focus that may scroll), while staying cheap enough to rebuild in
//! every test.

mod arena;
mod scheduler;

pub use arena::{MemHost, MemNodeRef};
pub use scheduler::MemScheduler;
