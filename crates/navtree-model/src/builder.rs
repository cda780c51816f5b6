//! Arena-style forest builder.
//!
//! Nodes are registered once and attached by [`NodeId`]. Attaching the same
//! id under several parents is how multiple inheritance is expressed; each
//! attachment becomes its own occurrence in the built [`Forest`].

use crate::error::MalformedTreeError;
use crate::forest::Forest;
use crate::node::Node;

/// Handle to a node registered with a [`ForestBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Entry {
    label: String,
    link: Option<String>,
    children: Vec<NodeId>,
}

/// Builder for [`Forest`] from a graph of node references.
#[derive(Debug, Default)]
pub struct ForestBuilder {
    entries: Vec<Entry>,
    roots: Vec<NodeId>,
}

impl ForestBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node and return its handle.
    pub fn add_node(&mut self, label: impl Into<String>, link: Option<&str>) -> NodeId {
        let id = NodeId(self.entries.len());
        self.entries.push(Entry {
            label: label.into(),
            link: link.map(str::to_owned),
            children: Vec::new(),
        });
        id
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTreeError::UnknownNode`] if either id was not
    /// issued by this builder.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), MalformedTreeError> {
        self.check_id(child)?;
        self.check_id(parent)?;
        self.entries[parent.0].children.push(child);
        Ok(())
    }

    /// Append a root.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTreeError::UnknownNode`] if the id was not issued
    /// by this builder.
    pub fn add_root(&mut self, id: NodeId) -> Result<(), MalformedTreeError> {
        self.check_id(id)?;
        self.roots.push(id);
        Ok(())
    }

    /// Expand every attachment into an owned node tree.
    ///
    /// Identity is the [`NodeId`]: distinct nodes may share a label, even
    /// when one is nested under the other.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTreeError::Cycle`] if a node is reachable from
    /// itself.
    pub fn build(self) -> Result<Forest, MalformedTreeError> {
        let mut path = Vec::new();
        let roots = self
            .roots
            .iter()
            .map(|&id| self.expand(id, &mut path))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Forest::from_validated(roots))
    }

    fn expand(&self, id: NodeId, path: &mut Vec<NodeId>) -> Result<Node, MalformedTreeError> {
        let entry = &self.entries[id.0];
        if path.contains(&id) {
            return Err(MalformedTreeError::Cycle {
                label: entry.label.clone(),
                ancestors: path
                    .iter()
                    .map(|ancestor| self.entries[ancestor.0].label.clone())
                    .collect(),
            });
        }

        path.push(id);
        let children = entry
            .children
            .iter()
            .map(|&child| self.expand(child, path))
            .collect::<Result<Vec<_>, _>>()?;
        path.pop();

        let node = Node::new(entry.label.clone()).with_children(children);
        Ok(match &entry.link {
            Some(link) => node.with_link(link.clone()),
            None => node,
        })
    }

    fn check_id(&self, id: NodeId) -> Result<(), MalformedTreeError> {
        if id.0 < self.entries.len() {
            Ok(())
        } else {
            Err(MalformedTreeError::UnknownNode(id.0))
        }
    }
}
