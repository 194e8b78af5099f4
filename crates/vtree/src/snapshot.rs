//! Deterministic tree serialization and equality for tests.
//!
//! Not a public stable format; intended for internal test comparisons.
//! Attribute maps serialize in key order (they are `BTreeMap`s), so two
//! structurally equal trees always render identical snapshots.

use crate::types::Node;
use std::fmt::{self, Write};

/// Line-per-node rendering of a tree, indented by depth.
#[derive(Debug)]
pub struct TreeSnapshot {
    lines: Vec<String>,
}

impl TreeSnapshot {
    pub fn new(root: &Node) -> Self {
        let mut lines = Vec::new();
        walk(root, 0, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for TreeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Structural mismatch between two trees, with the path to the offending
/// node and full subtree renderings for context.
#[derive(Debug)]
pub struct TreeMismatch {
    path: String,
    detail: String,
    expected: String,
    actual: String,
}

impl fmt::Display for TreeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tree mismatch at {}: {}", self.path, self.detail)?;
        writeln!(f, "expected:\n{}", self.expected)?;
        write!(f, "actual:\n{}", self.actual)
    }
}

impl std::error::Error for TreeMismatch {}

/// Panic with a labeled mismatch if the trees differ structurally.
pub fn assert_tree_eq(expected: &Node, actual: &Node) {
    if let Err(mismatch) = compare_trees(expected, actual) {
        panic!("{mismatch}");
    }
}

pub fn compare_trees(expected: &Node, actual: &Node) -> Result<(), Box<TreeMismatch>> {
    let mut path = vec![node_label(expected)];
    compare_nodes(expected, actual, &mut path)
}

fn compare_nodes(
    expected: &Node,
    actual: &Node,
    path: &mut Vec<String>,
) -> Result<(), Box<TreeMismatch>> {
    match (expected, actual) {
        (
            Node::Element {
                tag: expected_tag,
                attributes: expected_attrs,
                children: expected_children,
            },
            Node::Element {
                tag: actual_tag,
                attributes: actual_attrs,
                children: actual_children,
            },
        ) => {
            if expected_tag != actual_tag {
                return Err(mismatch(path, "element tag", expected, actual));
            }
            if expected_attrs != actual_attrs {
                return Err(mismatch(path, "attributes", expected, actual));
            }
            if expected_children.len() != actual_children.len() {
                return Err(mismatch(
                    path,
                    &format!(
                        "child count (expected {}, actual {})",
                        expected_children.len(),
                        actual_children.len()
                    ),
                    expected,
                    actual,
                ));
            }
            for (index, (exp, act)) in expected_children
                .iter()
                .zip(actual_children.iter())
                .enumerate()
            {
                path.push(format!("{}[{}]", node_label(exp), index));
                let result = compare_nodes(exp, act, path);
                path.pop();
                result?;
            }
            Ok(())
        }
        (Node::Text(expected_text), Node::Text(actual_text)) => {
            if expected_text != actual_text {
                return Err(mismatch(path, "text", expected, actual));
            }
            Ok(())
        }
        (Node::Raw(expected_markup), Node::Raw(actual_markup)) => {
            if expected_markup != actual_markup {
                return Err(mismatch(path, "raw markup", expected, actual));
            }
            Ok(())
        }
        _ => Err(mismatch(path, "node kind", expected, actual)),
    }
}

fn mismatch(path: &[String], detail: &str, expected: &Node, actual: &Node) -> Box<TreeMismatch> {
    Box::new(TreeMismatch {
        path: format!("/{}", path.join("/")),
        detail: detail.to_string(),
        expected: TreeSnapshot::new(expected).render(),
        actual: TreeSnapshot::new(actual).render(),
    })
}

fn node_label(node: &Node) -> String {
    match node {
        Node::Element { tag, .. } => match node.id_attribute() {
            Some(id) => format!("{tag}#{id}"),
            None => tag.clone(),
        },
        Node::Text(_) => "#text".to_string(),
        Node::Raw(_) => "#raw".to_string(),
    }
}

fn walk(node: &Node, depth: usize, out: &mut Vec<String>) {
    let mut line = " ".repeat(depth * 2);
    write_node_line(&mut line, node);
    out.push(line);
    for child in node.children() {
        walk(child, depth + 1, out);
    }
}

fn write_node_line(out: &mut String, node: &Node) {
    match node {
        Node::Element {
            tag, attributes, ..
        } => {
            out.push('<');
            out.push_str(tag);
            for (key, value) in attributes {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                write_escaped(out, value);
                out.push('"');
            }
            out.push('>');
        }
        Node::Text(text) => {
            out.push('"');
            write_escaped(out, text);
            out.push('"');
        }
        Node::Raw(markup) => {
            out.push_str("raw(");
            write_escaped(out, markup);
            out.push(')');
        }
    }
}

fn write_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ if ch.is_ascii() => out.push(ch),
            _ => {
                let _ = write!(out, "\\u{{{:X}}}", ch as u32);
            }
        }
    }
}
