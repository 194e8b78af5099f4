//! # runtime_ui
//!
//! Frame lifecycle and interaction monitoring for the retained-tree UI
//! engine.
//!
//! [`UiRuntime`] owns everything that survives between frames: the
//! previous tree, the [`InteractionMonitor`], and the input-value
//! snapshot map. One call to [`UiRuntime::render_frame`] runs a full
//! cycle to completion on the calling thread: snapshot host-input
//! state, build the new tree, diff, patch, restore input state, and
//! clear one-shot interaction flags. Host events route through
//! [`UiRuntime::handle_event`], which asks the scheduler for a frame
//! only when the event actually changed pending interaction state.

mod frame;
mod monitor;

pub use frame::UiRuntime;
pub use monitor::InteractionMonitor;
