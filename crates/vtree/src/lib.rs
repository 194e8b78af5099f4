//! # vtree
//!
//! Tree model, builder protocol, differ, and patch applier for the
//! retained-tree UI engine.
//!
//! Application code rebuilds a lightweight [`Node`] tree from scratch
//! every frame through a [`TreeBuilder`]; [`diff`] compares it against
//! the previous frame's tree and emits a minimal ordered [`Patch`]
//! batch; [`apply_patches`] replays that batch against a live display
//! tree behind the [`host_api::HostTree`] capability.
//!
//! Nothing in this crate retains host state between frames. The frame
//! lifecycle that owns the previous/current tree transition lives in
//! `runtime_ui`.

pub mod snapshot;

mod apply;
mod builder;
mod diff;
mod patch;
mod types;

pub use crate::apply::{apply_patches, materialize};
pub use crate::builder::{BuildError, TreeBuilder};
pub use crate::diff::diff;
pub use crate::patch::{Patch, TreeAddress};
pub use crate::types::Node;
