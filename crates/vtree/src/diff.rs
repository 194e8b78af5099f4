//! Positional tree diffing to ordered patch batches.
//!
//! Contract:
//! - Nodes are matched by identity: variant, element tag, and `id`
//!   attribute (see [`Node::same_identity`]). An identity mismatch
//!   replaces the whole subtree; children are never inspected.
//! - Siblings are paired purely by index. There is no keyed matching:
//!   reordering a list degenerates to a cascade of replacements. That is
//!   accepted behavior for the append/remove-at-end workloads this
//!   engine targets, and it keeps the diff O(total nodes) with no
//!   auxiliary matching pass.
//! - Text/Raw leaves compare by payload only and are never
//!   attribute-patched.
//! - Output ordering per node: `UpdateAttributes` first, then per-child
//!   patches in ascending index order, then one `RemoveLastChild` per
//!   surplus previous child, then one `AppendChild` per surplus current
//!   child. Appliers rely on this order for address validity.
//! - `diff(None, tree)` (the very first frame) yields exactly one
//!   root-level `Replace`.

use crate::patch::{Patch, TreeAddress};
use crate::types::Node;
use std::collections::BTreeMap;

/// Compare the previous frame's tree against the current one, producing
/// the ordered patch batch that carries the live display tree from the
/// former shape to the latter.
pub fn diff(previous: Option<&Node>, current: &Node) -> Vec<Patch> {
    let mut patches = Vec::new();
    diff_at(previous, current, TreeAddress::root(), &mut patches);
    log::trace!(
        target: "vtree.diff",
        "diff produced {} patch(es)",
        patches.len()
    );
    patches
}

fn diff_at(previous: Option<&Node>, current: &Node, at: TreeAddress, out: &mut Vec<Patch>) {
    let Some(previous) = previous else {
        out.push(Patch::Replace {
            at,
            node: current.clone(),
        });
        return;
    };

    if !previous.same_identity(current) {
        out.push(Patch::Replace {
            at,
            node: current.clone(),
        });
        return;
    }

    match (previous, current) {
        (Node::Text(prev), Node::Text(next)) | (Node::Raw(prev), Node::Raw(next)) => {
            // Leaves cannot have children and are never attribute-patched.
            if prev != next {
                out.push(Patch::Replace {
                    at,
                    node: current.clone(),
                });
            }
        }
        (
            Node::Element {
                attributes: prev_attrs,
                children: prev_children,
                ..
            },
            Node::Element {
                attributes: next_attrs,
                children: next_children,
                ..
            },
        ) => {
            let delta = attribute_delta(prev_attrs, next_attrs);
            if !delta.is_empty() {
                out.push(Patch::UpdateAttributes {
                    at: at.clone(),
                    attributes: delta,
                });
            }

            let paired = prev_children.len().min(next_children.len());
            for index in 0..paired {
                diff_at(
                    Some(&prev_children[index]),
                    &next_children[index],
                    at.child(index),
                    out,
                );
            }
            // Trailing removals always target the live node's current
            // last child, so one patch per surplus previous child.
            for _ in paired..prev_children.len() {
                out.push(Patch::RemoveLastChild { at: at.clone() });
            }
            for child in &next_children[paired..] {
                out.push(Patch::AppendChild {
                    at: at.clone(),
                    node: child.clone(),
                });
            }
        }
        _ => unreachable!("same_identity guarantees matching variants"),
    }
}

/// Changed/added keys carry the new value; keys present only in the
/// previous map carry an empty string (the removal signal).
fn attribute_delta(
    previous: &BTreeMap<String, String>,
    current: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut delta = BTreeMap::new();
    for (key, value) in current {
        if previous.get(key) != Some(value) {
            delta.insert(key.clone(), value.clone());
        }
    }
    for key in previous.keys() {
        if !current.contains_key(key) {
            delta.insert(key.clone(), String::new());
        }
    }
    delta
}
