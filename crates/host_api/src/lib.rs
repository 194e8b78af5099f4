//! # host_api
//!
//! Host capability traits and event types for the retained-tree UI engine.
//!
//! The engine core never touches a concrete display tree, input widget,
//! or scheduler. Everything it needs from its surroundings is expressed
//! here as a small trait or plain data type:
//! - [`HostTree`]: create/mutate/read a live display tree
//! - [`HostInput`]: read/write text-widget values, selection, and focus
//! - [`RenderScheduler`]: coalescing "render on the next paint" requests
//! - [`HostEvent`]: raw input events delivered by the host event loop
//! - [`SelectionRange`]: a normalized caret/selection byte range
//!
//! ## Design Principles
//!
//! This crate is intentionally backend-agnostic and does not depend on:
//! - Any graphics or DOM framework
//! - The engine's tree model or diff machinery
//! - Platform-specific APIs
//!
//! It depends only on `std`, so in-memory fakes and real backends
//! implement the same contracts and the core is testable without a
//! display server.

mod event;
mod input;
mod scheduler;
mod selection;
mod tree;

pub use event::{HostEvent, KeyCode};
pub use input::HostInput;
pub use scheduler::RenderScheduler;
pub use selection::SelectionRange;
pub use tree::HostTree;
