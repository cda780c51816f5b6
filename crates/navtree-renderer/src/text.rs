//! Plain-text backend for terminals.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::rendered::RenderedNode;
use crate::renderer::RenderOptions;

/// Indented text backend.
///
/// Every node is printed regardless of state; `[-]` marks an expanded node
/// with children, `[+]` a collapsed one, `-` a leaf. Links follow the label
/// in angle brackets.
pub struct TextBackend;

impl RenderBackend for TextBackend {
    fn tree_start(_out: &mut String) {}

    fn tree_end(_out: &mut String) {}

    fn node_start(node: &RenderedNode, depth: usize, _options: &RenderOptions, out: &mut String) {
        let marker = match (node.is_leaf(), node.state.is_expanded()) {
            (true, _) => "-",
            (false, true) => "[-]",
            (false, false) => "[+]",
        };
        write!(out, "{}{marker} {}", "  ".repeat(depth), node.label).unwrap();
        if let Some(link) = &node.link {
            write!(out, " <{link}>").unwrap();
        }
        out.push('\n');
    }

    fn children_start(_node: &RenderedNode, _depth: usize, _out: &mut String) {}

    fn children_end(_node: &RenderedNode, _depth: usize, _out: &mut String) {}

    fn node_end(_node: &RenderedNode, _depth: usize, _out: &mut String) {}
}
