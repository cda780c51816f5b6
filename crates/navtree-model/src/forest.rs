//! Ordered forest of hierarchy nodes.
//!
//! A [`Forest`] is immutable once constructed. The only check performed at
//! construction time is that no node is its own ancestor; ordering and
//! duplicate occurrences are taken as given.

use serde::Serialize;
use tracing::debug;

use crate::error::MalformedTreeError;
use crate::node::Node;

/// Ordered sequence of root nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<Node>,
}

impl Forest {
    /// Create a forest from root nodes.
    ///
    /// A node is identified by its label when checking ancestry: a node
    /// whose label matches one of its ancestors closes a cycle. The same
    /// label appearing in unrelated branches is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTreeError::Cycle`] if any node is its own ancestor.
    pub fn new(roots: Vec<Node>) -> Result<Self, MalformedTreeError> {
        check_acyclic(&roots)?;
        Ok(Self::from_validated(roots))
    }

    /// Wrap roots the caller has already checked for cycles.
    pub(crate) fn from_validated(roots: Vec<Node>) -> Self {
        let forest = Self { roots };
        debug!(
            roots = forest.len(),
            nodes = forest.node_count(),
            "Constructed forest"
        );
        forest
    }

    /// Forest with no roots.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Root nodes in declared order.
    #[must_use]
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Number of root nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of node occurrences.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.roots
            .iter()
            .map(|root| 1 + root.descendant_count())
            .sum()
    }

    /// Number of levels; 0 for an empty forest, 1 for roots only.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.walk().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }

    /// Pre-order traversal yielding `(depth, node)`, roots at depth 0.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.roots.iter().rev().map(|node| (0, node)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.iter()
    }
}

/// Pre-order iterator over a [`Forest`].
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

fn check_acyclic(roots: &[Node]) -> Result<(), MalformedTreeError> {
    fn visit<'a>(
        node: &'a Node,
        ancestors: &mut Vec<&'a str>,
    ) -> Result<(), MalformedTreeError> {
        if ancestors.contains(&node.label()) {
            return Err(MalformedTreeError::Cycle {
                label: node.label().to_owned(),
                ancestors: ancestors.iter().map(|&label| label.to_owned()).collect(),
            });
        }
        ancestors.push(node.label());
        for child in node.children() {
            visit(child, ancestors)?;
        }
        ancestors.pop();
        Ok(())
    }

    let mut ancestors = Vec::new();
    for root in roots {
        visit(root, &mut ancestors)?;
    }
    Ok(())
}
