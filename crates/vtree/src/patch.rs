//! Minimal mutation instructions against a live display tree.
//!
//! Invariants:
//! - Patches are applied strictly in the order the differ produced them.
//! - Every address is positional (child indices from the host root) and
//!   is computed against the *previous* frame's tree shape.
//! - For one node the differ orders output as: attribute update first,
//!   then per-child patches in ascending index order, then trailing
//!   removals, then trailing appends. Only under that order do trailing
//!   removals/appends leave earlier addresses valid.
//! - In `UpdateAttributes`, an empty-string value means "remove this
//!   attribute"; any other value is set verbatim.

use crate::types::Node;
use std::collections::BTreeMap;
use std::fmt;

/// Positional address of a node: the child-index path from the host
/// root. The empty address is the root itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeAddress(Vec<usize>);

impl TreeAddress {
    /// The address of the root node.
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// The address of this node's `index`-th child.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// The child-index path, outermost first.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for TreeAddress {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for TreeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

/// One mutation instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Patch {
    /// Discard whatever occupies `at` and substitute a freshly
    /// materialized subtree for `node`.
    Replace { at: TreeAddress, node: Node },
    /// Add/change the listed attributes on the element at `at`; an
    /// empty-string value removes the attribute.
    UpdateAttributes {
        at: TreeAddress,
        attributes: BTreeMap<String, String>,
    },
    /// Delete the final child of the node at `at`.
    RemoveLastChild { at: TreeAddress },
    /// Materialize `node` as the new final child of the node at `at`.
    AppendChild { at: TreeAddress, node: Node },
}

impl Patch {
    /// The address this patch targets.
    pub fn at(&self) -> &TreeAddress {
        match self {
            Patch::Replace { at, .. }
            | Patch::UpdateAttributes { at, .. }
            | Patch::RemoveLastChild { at }
            | Patch::AppendChild { at, .. } => at,
        }
    }
}
