//! Output backend abstraction.
//!
//! [`write_tree`] walks a [`RenderedTree`] depth-first and calls the
//! backend's hooks. Children hooks are only called for nodes that have
//! children.

use crate::rendered::{RenderedNode, RenderedTree};
use crate::renderer::RenderOptions;

/// Output format for a rendered tree.
pub trait RenderBackend {
    /// Open the tree container.
    fn tree_start(out: &mut String);

    /// Close the tree container.
    fn tree_end(out: &mut String);

    /// Open a node and write its label.
    fn node_start(node: &RenderedNode, depth: usize, options: &RenderOptions, out: &mut String);

    /// Open the child list of a node.
    fn children_start(node: &RenderedNode, depth: usize, out: &mut String);

    /// Close the child list of a node.
    fn children_end(node: &RenderedNode, depth: usize, out: &mut String);

    /// Close a node.
    fn node_end(node: &RenderedNode, depth: usize, out: &mut String);
}

/// Serialize `tree` with backend `B`.
#[must_use]
pub fn write_tree<B: RenderBackend>(tree: &RenderedTree, options: &RenderOptions) -> String {
    fn write_node<B: RenderBackend>(
        node: &RenderedNode,
        depth: usize,
        options: &RenderOptions,
        out: &mut String,
    ) {
        B::node_start(node, depth, options, out);
        if !node.is_leaf() {
            B::children_start(node, depth, out);
            for child in &node.children {
                write_node::<B>(child, depth + 1, options, out);
            }
            B::children_end(node, depth, out);
        }
        B::node_end(node, depth, out);
    }

    let mut out = String::new();
    B::tree_start(&mut out);
    for root in &tree.roots {
        write_node::<B>(root, 0, options, &mut out);
    }
    B::tree_end(&mut out);
    out
}
