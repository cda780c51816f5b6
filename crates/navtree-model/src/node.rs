//! Hierarchy node.

use serde::Serialize;

/// A labeled entry in the hierarchy, optionally linkable, with ordered children.
///
/// Identity is per occurrence: a class with two base classes appears once
/// under each parent, as two independent nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Node {
    /// Create an unlinked node without children.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: None,
            children: Vec::new(),
        }
    }

    /// Set the navigation link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Replace the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Append one child.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Display name.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Navigation target, `None` for grouping entries.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Children in declared order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes below this one, not counting itself.
    #[must_use]
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}
