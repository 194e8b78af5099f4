//! Patch application against a live host tree.
//!
//! Patches must be applied strictly in the order the differ produced
//! them; only then is every address valid against the pre-patch shape.
//!
//! An address that no longer resolves, or a root with no parent, is an
//! expected race (the host tree was mutated outside this cycle, or a
//! prior `Replace` made the path moot). Those patches are skipped
//! silently: the next frame re-derives the correct state, so a dropped
//! effect self-heals. Nothing here propagates a failure.

use crate::patch::Patch;
use crate::types::Node;
use host_api::HostTree;

/// Replay an ordered patch batch against the live host tree.
pub fn apply_patches<H: HostTree>(host: &mut H, patches: &[Patch]) {
    for patch in patches {
        match patch {
            Patch::Replace { at, node } => {
                let Some(target) = resolve(host, at.indices()) else {
                    skip(patch);
                    continue;
                };
                let Some(parent) = host.parent(&target) else {
                    skip(patch);
                    continue;
                };
                let fresh = materialize(host, node);
                host.replace_child(&parent, &target, fresh);
            }
            Patch::UpdateAttributes { at, attributes } => {
                let Some(target) = resolve(host, at.indices()) else {
                    skip(patch);
                    continue;
                };
                for (key, value) in attributes {
                    if value.is_empty() {
                        host.remove_attribute(&target, key);
                    } else {
                        host.set_attribute(&target, key, value);
                    }
                }
            }
            Patch::RemoveLastChild { at } => {
                let Some(target) = resolve(host, at.indices()) else {
                    skip(patch);
                    continue;
                };
                let count = host.child_count(&target);
                let Some(last) = count.checked_sub(1).and_then(|i| host.child(&target, i)) else {
                    skip(patch);
                    continue;
                };
                host.remove_child(&target, &last);
            }
            Patch::AppendChild { at, node } => {
                let Some(target) = resolve(host, at.indices()) else {
                    skip(patch);
                    continue;
                };
                let fresh = materialize(host, node);
                host.append_child(&target, fresh);
            }
        }
    }
}

/// Create a live subtree for `node`: text/raw leaves become text and
/// fragment nodes, elements get all attributes set and their children
/// materialized and appended in order.
pub fn materialize<H: HostTree>(host: &mut H, node: &Node) -> H::NodeRef {
    match node {
        Node::Text(text) => host.create_text(text),
        Node::Raw(markup) => host.create_fragment(markup),
        Node::Element {
            tag,
            attributes,
            children,
        } => {
            let element = host.create_element(tag);
            for (key, value) in attributes {
                host.set_attribute(&element, key, value);
            }
            for child in children {
                let live = materialize(host, child);
                host.append_child(&element, live);
            }
            element
        }
    }
}

fn resolve<H: HostTree>(host: &H, indices: &[usize]) -> Option<H::NodeRef> {
    let mut node = host.root();
    for &index in indices {
        node = host.child(&node, index)?;
    }
    Some(node)
}

fn skip(patch: &Patch) {
    log::debug!(
        target: "vtree.apply",
        "skipping unresolvable patch at {}",
        patch.at()
    );
}
