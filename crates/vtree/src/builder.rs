//! Immediate-mode tree construction with stack discipline.
//!
//! All build state lives in an explicit [`TreeBuilder`] context; there
//! is no global "active node". The root element is created up front and
//! stays on the stack until [`TreeBuilder::finish`], so attribute and
//! leaf operations always have an active element to target.
//!
//! Structural errors (ending the wrong tag, ending past the root,
//! finishing with elements still open) are programmer errors. They
//! surface as [`BuildError`] and the caller is expected to abort the
//! frame, not recover: the half-built tree is inconsistent by then.

use crate::types::Node;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum BuildError {
    /// `end(tag)` did not match the active element's tag.
    TagMismatch { active: String, ended: String },
    /// `end` was called with only the root element active. The root is
    /// closed by `finish`, never by `end`.
    EndedRoot { tag: String },
    /// `finish` was called before every `begin` was matched by an `end`.
    UnclosedElements { open: Vec<String> },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::TagMismatch { active, ended } => {
                write!(f, "attempted to end <{ended}> while <{active}> is active")
            }
            BuildError::EndedRoot { tag } => {
                write!(f, "attempted to end <{tag}> past the root element")
            }
            BuildError::UnclosedElements { open } => {
                write!(f, "finished build with unclosed elements: {}", open.join(", "))
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// An element still under construction. Children are complete [`Node`]s;
/// styles are held apart from attributes until the element is closed.
#[derive(Debug)]
struct OpenElement {
    tag: String,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    children: Vec<Node>,
}

impl OpenElement {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Flatten the style map into a single `style` attribute and produce
    /// the finished node. Keys iterate in sorted order, so two builds of
    /// identical styles serialize identically regardless of call order.
    fn close(mut self) -> Node {
        if !self.styles.is_empty() {
            let mut style = String::new();
            for (key, value) in &self.styles {
                style.push_str(key);
                style.push(':');
                style.push_str(value);
                style.push(';');
            }
            self.attributes.insert("style".to_string(), style);
        }
        Node::Element {
            tag: self.tag,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

/// Per-frame build context for one tree.
///
/// The open-element stack always holds at least the root; the top of the
/// stack is the active element that [`TreeBuilder::text`],
/// [`TreeBuilder::attr`], and friends target.
#[derive(Debug)]
pub struct TreeBuilder {
    stack: Vec<OpenElement>,
}

impl TreeBuilder {
    /// Begin a build with a root element of the given tag.
    pub fn new(root_tag: &str) -> Self {
        Self {
            stack: vec![OpenElement::new(root_tag)],
        }
    }

    fn active(&mut self) -> &mut OpenElement {
        self.stack.last_mut().expect("builder stack holds the root")
    }

    /// Open a child element and make it active.
    pub fn begin(&mut self, tag: &str) {
        self.stack.push(OpenElement::new(tag));
    }

    /// Close the active element, asserting its tag, and restore its
    /// parent as active. Styles flatten into the `style` attribute here.
    pub fn end(&mut self, tag: &str) -> Result<(), BuildError> {
        if self.stack.len() == 1 {
            return Err(BuildError::EndedRoot {
                tag: tag.to_string(),
            });
        }
        let active = self.stack.last().expect("builder stack holds the root");
        if active.tag != tag {
            return Err(BuildError::TagMismatch {
                active: active.tag.clone(),
                ended: tag.to_string(),
            });
        }
        let closed = self.stack.pop().expect("checked above").close();
        self.active().children.push(closed);
        Ok(())
    }

    /// Append a text leaf to the active element.
    pub fn text(&mut self, value: &str) {
        self.active().children.push(Node::Text(value.to_string()));
    }

    /// Append a raw-markup leaf to the active element.
    pub fn raw(&mut self, markup: &str) {
        self.active().children.push(Node::Raw(markup.to_string()));
    }

    /// Merge one attribute into the active element. Later calls win for
    /// the same key within the frame.
    pub fn attr(&mut self, key: &str, value: &str) {
        self.active()
            .attributes
            .insert(key.to_string(), value.to_string());
    }

    /// Merge several attributes into the active element.
    pub fn attrs<'a>(&mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (key, value) in pairs {
            self.attr(key, value);
        }
    }

    /// Merge one style property into the active element. Later calls win
    /// for the same key within the frame.
    pub fn style(&mut self, key: &str, value: &str) {
        self.active()
            .styles
            .insert(key.to_string(), value.to_string());
    }

    /// Merge several style properties into the active element.
    pub fn styles<'a>(&mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (key, value) in pairs {
            self.style(key, value);
        }
    }

    /// Begin/close bracket that cannot unbalance: opens `tag`, runs the
    /// closure against the builder, then closes `tag`.
    pub fn with(
        &mut self,
        tag: &str,
        f: impl FnOnce(&mut TreeBuilder) -> Result<(), BuildError>,
    ) -> Result<(), BuildError> {
        self.begin(tag);
        f(self)?;
        self.end(tag)
    }

    /// Shorthand for an element holding a single text leaf.
    pub fn text_element(&mut self, tag: &str, value: &str) -> Result<(), BuildError> {
        self.with(tag, |b| {
            b.text(value);
            Ok(())
        })
    }

    /// Complete the build, returning the root node. Fails if any element
    /// other than the root is still open. The root's styles flatten here.
    pub fn finish(mut self) -> Result<Node, BuildError> {
        if self.stack.len() != 1 {
            return Err(BuildError::UnclosedElements {
                open: self.stack.iter().skip(1).map(|e| e.tag.clone()).collect(),
            });
        }
        let root = self.stack.pop().expect("builder stack holds the root");
        Ok(root.close())
    }
}
