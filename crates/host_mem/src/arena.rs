//! Arena-backed display tree with live input-widget state.

use host_api::{HostInput, HostTree, SelectionRange};
use std::collections::BTreeMap;
use vtree::Node;

/// Arena slot of the document container. The managed root element is
/// always its first child, which gives the root a parent to be replaced
/// through.
const DOCUMENT: usize = 0;

/// Handle to a live node in a [`MemHost`] arena. Indices are never
/// reused, so a stale handle resolves to a detached node rather than a
/// different one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemNodeRef(usize);

#[derive(Debug)]
struct MemNode {
    kind: MemKind,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug)]
enum MemKind {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        /// Live widget value; meaningful only for text inputs, where it
        /// lives beside the tree because no attribute represents it.
        value: String,
        selection: SelectionRange,
    },
    Text(String),
    Fragment(String),
}

impl MemKind {
    fn element(tag: &str) -> Self {
        MemKind::Element {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            value: String::new(),
            selection: SelectionRange::caret(0),
        }
    }
}

/// In-memory display tree plus the input/focus/scroll state a real host
/// would keep outside the tree.
#[derive(Debug)]
pub struct MemHost {
    nodes: Vec<MemNode>,
    focused: Option<String>,
    scroll: (i32, i32),
    /// When set, focusing scrolls here first (a host "scroll into
    /// view"), which the frame lifecycle must undo.
    focus_scroll: Option<(i32, i32)>,
}

impl MemHost {
    /// New host with a document container holding one root element of
    /// the given tag.
    pub fn new(root_tag: &str) -> Self {
        let document = MemNode {
            kind: MemKind::element("#document"),
            parent: None,
            children: vec![1],
        };
        let root = MemNode {
            kind: MemKind::element(root_tag),
            parent: Some(DOCUMENT),
            children: Vec::new(),
        };
        Self {
            nodes: vec![document, root],
            focused: None,
            scroll: (0, 0),
            focus_scroll: None,
        }
    }

    fn push(&mut self, kind: MemKind) -> MemNodeRef {
        let index = self.nodes.len();
        self.nodes.push(MemNode {
            kind,
            parent: None,
            children: Vec::new(),
        });
        MemNodeRef(index)
    }

    fn is_text_input(&self, index: usize) -> bool {
        matches!(
            &self.nodes[index].kind,
            MemKind::Element { tag, .. } if tag == "input" || tag == "textarea"
        )
    }

    /// Depth-first walk of the attached tree, document order.
    fn walk_attached(&self, from: usize, visit: &mut impl FnMut(usize)) {
        visit(from);
        // Children are cloned so the borrow does not outlive the visit.
        for child in self.nodes[from].children.clone() {
            self.walk_attached(child, visit);
        }
    }

    /// The attached element carrying this `id` attribute, if any.
    pub fn find_by_id(&self, id: &str) -> Option<MemNodeRef> {
        let mut found = None;
        self.walk_attached(DOCUMENT, &mut |index| {
            if found.is_some() {
                return;
            }
            if let MemKind::Element { attributes, .. } = &self.nodes[index].kind {
                if attributes.get("id").map(String::as_str) == Some(id) {
                    found = Some(MemNodeRef(index));
                }
            }
        });
        found
    }

    /// The `id` attributes on the ancestor chain from `node` upward
    /// (nearest first, empty ids omitted), the shape a host event
    /// source delivers alongside a raw event.
    pub fn ancestor_ids(&self, node: MemNodeRef) -> Vec<String> {
        let mut ids = Vec::new();
        let mut current = Some(node.0);
        while let Some(index) = current {
            if let MemKind::Element { attributes, .. } = &self.nodes[index].kind {
                if let Some(id) = attributes.get("id") {
                    if !id.is_empty() {
                        ids.push(id.clone());
                    }
                }
            }
            current = self.nodes[index].parent;
        }
        ids
    }

    /// Read the live tree back as a `vtree::Node` for structural
    /// assertions. Fragments come back as `Raw` leaves.
    pub fn live_tree(&self) -> Node {
        self.read_node(self.root().0)
    }

    fn read_node(&self, index: usize) -> Node {
        match &self.nodes[index].kind {
            MemKind::Element {
                tag, attributes, ..
            } => Node::Element {
                tag: tag.clone(),
                attributes: attributes.clone(),
                children: self.nodes[index]
                    .children
                    .iter()
                    .map(|&child| self.read_node(child))
                    .collect(),
            },
            MemKind::Text(text) => Node::Text(text.clone()),
            MemKind::Fragment(markup) => Node::Raw(markup.clone()),
        }
    }

    /// The id of the currently focused element, if any.
    pub fn focused_id(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Make [`HostInput::focus`] scroll to this offset first, simulating
    /// a host that scrolls the focused element into view.
    pub fn set_focus_scroll(&mut self, offset: (i32, i32)) {
        self.focus_scroll = Some(offset);
    }

    fn input_state(&self, id: &str) -> Option<usize> {
        let node = self.find_by_id(id)?;
        self.is_text_input(node.0).then_some(node.0)
    }
}

impl HostTree for MemHost {
    type NodeRef = MemNodeRef;

    fn root(&self) -> MemNodeRef {
        let index = *self.nodes[DOCUMENT]
            .children
            .first()
            .expect("document always holds the root element");
        MemNodeRef(index)
    }

    fn create_element(&mut self, tag: &str) -> MemNodeRef {
        self.push(MemKind::element(tag))
    }

    fn create_text(&mut self, text: &str) -> MemNodeRef {
        self.push(MemKind::Text(text.to_string()))
    }

    fn create_fragment(&mut self, markup: &str) -> MemNodeRef {
        self.push(MemKind::Fragment(markup.to_string()))
    }

    fn set_attribute(&mut self, node: &MemNodeRef, key: &str, value: &str) {
        if let MemKind::Element { attributes, .. } = &mut self.nodes[node.0].kind {
            attributes.insert(key.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: &MemNodeRef, key: &str) {
        if let MemKind::Element { attributes, .. } = &mut self.nodes[node.0].kind {
            attributes.remove(key);
        }
    }

    fn append_child(&mut self, parent: &MemNodeRef, child: MemNodeRef) {
        self.nodes[child.0].parent = Some(parent.0);
        self.nodes[parent.0].children.push(child.0);
    }

    fn remove_child(&mut self, parent: &MemNodeRef, child: &MemNodeRef) {
        self.nodes[parent.0].children.retain(|&index| index != child.0);
        self.nodes[child.0].parent = None;
    }

    fn replace_child(&mut self, parent: &MemNodeRef, old: &MemNodeRef, new: MemNodeRef) {
        let children = &mut self.nodes[parent.0].children;
        let Some(position) = children.iter().position(|&index| index == old.0) else {
            return;
        };
        children[position] = new.0;
        self.nodes[old.0].parent = None;
        self.nodes[new.0].parent = Some(parent.0);
    }

    fn child(&self, node: &MemNodeRef, index: usize) -> Option<MemNodeRef> {
        self.nodes[node.0].children.get(index).copied().map(MemNodeRef)
    }

    fn child_count(&self, node: &MemNodeRef) -> usize {
        self.nodes[node.0].children.len()
    }

    fn parent(&self, node: &MemNodeRef) -> Option<MemNodeRef> {
        self.nodes[node.0].parent.map(MemNodeRef)
    }
}

impl HostInput for MemHost {
    fn input_values(&self) -> Vec<(String, String)> {
        let mut values = Vec::new();
        self.walk_attached(DOCUMENT, &mut |index| {
            if !self.is_text_input(index) {
                return;
            }
            if let MemKind::Element {
                attributes, value, ..
            } = &self.nodes[index].kind
            {
                if let Some(id) = attributes.get("id") {
                    if !id.is_empty() {
                        values.push((id.clone(), value.clone()));
                    }
                }
            }
        });
        values
    }

    fn set_input_value(&mut self, id: &str, new_value: &str) -> bool {
        let Some(index) = self.input_state(id) else {
            return false;
        };
        if let MemKind::Element {
            value, selection, ..
        } = &mut self.nodes[index].kind
        {
            *value = new_value.to_string();
            // A programmatic write moves the caret to the end of the new value,
            // matching what input elements do.
            *selection = SelectionRange::caret(value.len());
        }
        true
    }

    fn selection(&self, id: &str) -> Option<SelectionRange> {
        let index = self.input_state(id)?;
        match &self.nodes[index].kind {
            MemKind::Element { selection, .. } => Some(*selection),
            _ => None,
        }
    }

    fn set_selection(&mut self, id: &str, new_selection: SelectionRange) -> bool {
        let Some(index) = self.input_state(id) else {
            return false;
        };
        if let MemKind::Element { selection, .. } = &mut self.nodes[index].kind {
            *selection = new_selection;
        }
        true
    }

    fn select_end(&mut self, id: &str) -> bool {
        let Some(index) = self.input_state(id) else {
            return false;
        };
        if let MemKind::Element {
            value, selection, ..
        } = &mut self.nodes[index].kind
        {
            *selection = SelectionRange::caret(value.len());
        }
        true
    }

    fn focus(&mut self, id: &str) -> bool {
        if self.find_by_id(id).is_none() {
            return false;
        }
        self.focused = Some(id.to_string());
        if let Some(offset) = self.focus_scroll {
            self.scroll = offset;
        }
        true
    }

    fn scroll_offset(&self) -> (i32, i32) {
        self.scroll
    }

    fn scroll_to(&mut self, x: i32, y: i32) {
        self.scroll = (x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attach_input(host: &mut MemHost, id: &str) -> MemNodeRef {
        let root = host.root();
        let input = host.create_element("input");
        host.set_attribute(&input, "id", id);
        host.append_child(&root, input);
        input
    }

    #[test]
    fn root_has_a_parent_to_be_replaced_through() {
        let host = MemHost::new("body");
        let root = host.root();
        assert!(host.parent(&root).is_some());
    }

    #[test]
    fn replace_child_swaps_in_place_and_detaches_old() {
        let mut host = MemHost::new("body");
        let root = host.root();
        let old = host.create_element("div");
        host.append_child(&root, old);
        let keep = host.create_text("tail");
        host.append_child(&root, keep);

        let new = host.create_element("span");
        host.replace_child(&root, &old, new);

        assert_eq!(host.child(&root, 0), Some(new));
        assert_eq!(host.child(&root, 1), Some(keep));
        assert!(host.parent(&old).is_none());
    }

    #[test]
    fn find_by_id_ignores_detached_nodes() {
        let mut host = MemHost::new("body");
        let root = host.root();
        let div = host.create_element("div");
        host.set_attribute(&div, "id", "x");
        host.append_child(&root, div);
        assert_eq!(host.find_by_id("x"), Some(div));

        host.remove_child(&root, &div);
        assert_eq!(host.find_by_id("x"), None);
    }

    #[test]
    fn ancestor_ids_run_nearest_first() {
        let mut host = MemHost::new("body");
        let root = host.root();
        let outer = host.create_element("div");
        host.set_attribute(&outer, "id", "outer");
        host.append_child(&root, outer);
        let inner = host.create_element("span");
        host.set_attribute(&inner, "id", "inner");
        host.append_child(&outer, inner);

        assert_eq!(
            host.ancestor_ids(inner),
            vec!["inner".to_string(), "outer".to_string()]
        );
    }

    #[test]
    fn input_values_report_live_state_in_document_order() {
        let mut host = MemHost::new("body");
        attach_input(&mut host, "first");
        attach_input(&mut host, "second");
        assert!(host.set_input_value("first", "hello"));

        assert_eq!(
            host.input_values(),
            vec![
                ("first".to_string(), "hello".to_string()),
                ("second".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn set_input_value_moves_caret_to_end() {
        let mut host = MemHost::new("body");
        attach_input(&mut host, "a");
        host.set_input_value("a", "longer text");
        host.set_selection("a", SelectionRange::new(3, 8));
        host.set_input_value("a", "hi");
        assert_eq!(host.selection("a"), Some(SelectionRange::caret(2)));
    }

    #[test]
    fn select_end_places_caret_after_value() {
        let mut host = MemHost::new("body");
        attach_input(&mut host, "a");
        host.set_input_value("a", "hello");
        host.select_end("a");
        assert_eq!(host.selection("a"), Some(SelectionRange::caret(5)));
    }

    #[test]
    fn focus_applies_configured_scroll_jump() {
        let mut host = MemHost::new("body");
        attach_input(&mut host, "a");
        host.set_focus_scroll((0, 120));
        assert!(host.focus("a"));
        assert_eq!(host.focused_id(), Some("a"));
        assert_eq!(host.scroll_offset(), (0, 120));
    }

    #[test]
    fn focus_on_missing_id_reports_failure() {
        let mut host = MemHost::new("body");
        assert!(!host.focus("ghost"));
        assert_eq!(host.focused_id(), None);
    }
}
