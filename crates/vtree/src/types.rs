use std::collections::BTreeMap;

/// One node of a frame's UI description.
///
/// A node's variant never changes after construction. Attribute keys are
/// unique; `BTreeMap` keeps iteration deterministic so serialization and
/// diffing never depend on insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        children: Vec<Node>,
    },
    /// Opaque text payload; no children.
    Text(String),
    /// Opaque pre-formatted markup; no children, never inspected by the
    /// differ beyond payload equality.
    Raw(String),
}

impl Node {
    /// The element's `id` attribute, if this is an element and it has one.
    pub fn id_attribute(&self) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes.get("id").map(String::as_str),
            Node::Text(_) | Node::Raw(_) => None,
        }
    }

    /// Child nodes. Leaves report an empty slice.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text(_) | Node::Raw(_) => &[],
        }
    }

    /// Whether `self` and `other` are "the same thing, possibly changed"
    /// for diffing purposes: same variant, and for elements the same tag
    /// name and `id` attribute. Nodes that fail this test are wholly
    /// replaced, never diffed structurally.
    pub fn same_identity(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Text(_), Node::Text(_)) => true,
            (Node::Raw(_), Node::Raw(_)) => true,
            (Node::Element { tag: a, .. }, Node::Element { tag: b, .. }) => {
                a == b && self.id_attribute() == other.id_attribute()
            }
            _ => false,
        }
    }
}
