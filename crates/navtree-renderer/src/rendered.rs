//! Rendered tree types.
//!
//! The rendered tree mirrors the source forest one-to-one. Each node carries
//! its initial [`NodeState`]; after rendering, the state belongs to the
//! presentation layer, which flips it on user interaction.

use navtree_model::{Forest, MalformedTreeError, Node};
use serde::{Deserialize, Serialize};

/// Per-node disclosure state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// Children hidden.
    #[default]
    Collapsed,
    /// Children shown.
    Expanded,
}

impl NodeState {
    #[must_use]
    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }

    /// The opposite state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    pub fn toggle(&mut self) {
        *self = self.toggled();
    }
}

/// Rendered node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedNode {
    /// Display name.
    pub label: String,
    /// Resolved link target; `None` renders as plain text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Disclosure state.
    pub state: NodeState,
    /// Rendered children in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderedNode>,
}

impl RenderedNode {
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Flip this node's disclosure state.
    pub fn toggle(&mut self) {
        self.state.toggle();
    }

    /// Expand this node and every descendant.
    pub fn expand_all(&mut self) {
        self.set_all(NodeState::Expanded);
    }

    /// Collapse this node and every descendant.
    pub fn collapse_all(&mut self) {
        self.set_all(NodeState::Collapsed);
    }

    fn set_all(&mut self, state: NodeState) {
        self.state = state;
        for child in &mut self.children {
            child.set_all(state);
        }
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }

    fn to_node(&self) -> Node {
        let node = Node::new(self.label.clone())
            .with_children(self.children.iter().map(Self::to_node).collect());
        match &self.link {
            Some(link) => node.with_link(link.clone()),
            None => node,
        }
    }
}

/// Output of rendering a [`Forest`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderedTree {
    /// Rendered roots in source order.
    pub roots: Vec<RenderedNode>,
}

impl RenderedTree {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of rendered node occurrences.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(RenderedNode::count).sum()
    }

    /// Labels in pre-order, duplicates included.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        fn collect<'a>(node: &'a RenderedNode, out: &mut Vec<&'a str>) {
            out.push(&node.label);
            for child in &node.children {
                collect(child, out);
            }
        }

        let mut out = Vec::new();
        for root in &self.roots {
            collect(root, &mut out);
        }
        out
    }

    /// Rebuild a forest from the rendered structure.
    ///
    /// Disclosure state is dropped; links that failed resolution stay
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTreeError::Cycle`] if the tree was edited into a
    /// shape where a node is its own ancestor.
    pub fn to_forest(&self) -> Result<Forest, MalformedTreeError> {
        Forest::new(self.roots.iter().map(RenderedNode::to_node).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(label: &str, state: NodeState, children: Vec<RenderedNode>) -> RenderedNode {
        RenderedNode {
            label: label.to_owned(),
            link: None,
            state,
            children,
        }
    }

    #[test]
    fn test_state_toggles() {
        let mut state = NodeState::Collapsed;

        state.toggle();
        assert!(state.is_expanded());
        state.toggle();
        assert_eq!(state, NodeState::Collapsed);
    }

    #[test]
    fn test_expand_all_reaches_descendants() {
        let mut root = node(
            "A",
            NodeState::Collapsed,
            vec![node("B", NodeState::Collapsed, vec![node("C", NodeState::Collapsed, vec![])])],
        );

        root.expand_all();

        assert!(root.state.is_expanded());
        assert!(root.children[0].state.is_expanded());
        assert!(root.children[0].children[0].state.is_expanded());

        root.collapse_all();
        assert_eq!(root.children[0].children[0].state, NodeState::Collapsed);
    }

    #[test]
    fn test_toggle_affects_only_one_node() {
        let mut root = node(
            "A",
            NodeState::Expanded,
            vec![node("B", NodeState::Collapsed, vec![])],
        );

        root.children[0].toggle();

        assert!(root.state.is_expanded());
        assert!(root.children[0].state.is_expanded());
    }

    #[test]
    fn test_labels_and_count() {
        let tree = RenderedTree {
            roots: vec![
                node("A", NodeState::Expanded, vec![node("B", NodeState::Collapsed, vec![])]),
                node("C", NodeState::Expanded, vec![node("B", NodeState::Collapsed, vec![])]),
            ],
        };

        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.labels(), vec!["A", "B", "C", "B"]);
    }

    #[test]
    fn test_json_shape() {
        let tree = RenderedTree {
            roots: vec![RenderedNode {
                label: "A".to_owned(),
                link: Some("a.html".to_owned()),
                state: NodeState::Expanded,
                children: vec![node("B", NodeState::Collapsed, vec![])],
            }],
        };

        let json = serde_json::to_string(&tree).unwrap();

        assert_eq!(
            json,
            concat!(
                r#"[{"label":"A","link":"a.html","state":"expanded","#,
                r#""children":[{"label":"B","state":"collapsed"}]}]"#,
            )
        );
        let parsed: RenderedTree = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_edited_cycle_fails_to_forest() {
        let tree = RenderedTree {
            roots: vec![node(
                "A",
                NodeState::Expanded,
                vec![node("A", NodeState::Collapsed, vec![])],
            )],
        };

        assert!(tree.to_forest().is_err());
    }
}
