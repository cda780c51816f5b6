//! Forest to rendered tree transformation.

use navtree_model::{Forest, Node};
use tracing::{debug, warn};

use crate::backend::{RenderBackend, write_tree};
use crate::error::UnknownNodeReferenceError;
use crate::rendered::{NodeState, RenderedNode, RenderedTree};
use crate::resolver::{AcceptAllLinks, LinkResolver};

/// Rendering options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Number of levels initially expanded. `1` expands roots only, `0`
    /// collapses everything.
    pub expanded_depth: usize,
    /// Prefix for relative link targets in HTML output.
    pub base_url: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            expanded_depth: 1,
            base_url: None,
        }
    }
}

/// Result of rendering a forest.
#[derive(Clone, Debug, Default)]
pub struct RenderResult {
    /// The rendered tree.
    pub tree: RenderedTree,
    /// Links that did not resolve; their nodes render as plain text.
    pub warnings: Vec<UnknownNodeReferenceError>,
}

/// Stateless forest renderer.
///
/// # Example
///
/// ```
/// use navtree_model::{Forest, Node};
/// use navtree_renderer::{HtmlBackend, KnownLinks, Renderer};
///
/// let forest = Forest::new(vec![
///     Node::new("A").with_link("a.html").with_child(Node::new("B").with_link("b.html")),
/// ])
/// .unwrap();
///
/// let renderer = Renderer::new().with_resolver(KnownLinks::from_iter(["a.html"]));
/// let result = renderer.render(&forest);
///
/// assert_eq!(result.warnings.len(), 1);
/// assert_eq!(result.tree.roots[0].children[0].link, None);
/// let html = renderer.write::<HtmlBackend>(&result.tree);
/// assert!(html.contains(r#"<a href="a.html">A</a>"#));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Renderer<R = AcceptAllLinks> {
    options: RenderOptions,
    resolver: R,
}

impl Renderer {
    /// Create a renderer with default options that accepts every link.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: LinkResolver> Renderer<R> {
    /// Replace the rendering options.
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate links with `resolver`.
    #[must_use]
    pub fn with_resolver<S: LinkResolver>(self, resolver: S) -> Renderer<S> {
        Renderer {
            options: self.options,
            resolver,
        }
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a forest.
    ///
    /// Ordering and nesting are preserved exactly. Nodes shallower than
    /// `expanded_depth` start expanded, the rest collapsed.
    #[must_use]
    pub fn render(&self, forest: &Forest) -> RenderResult {
        let mut warnings = Vec::new();
        let roots = forest
            .roots()
            .iter()
            .map(|root| self.render_node(root, 0, &mut warnings))
            .collect();
        let tree = RenderedTree { roots };

        debug!(
            nodes = tree.node_count(),
            unresolved = warnings.len(),
            "Rendered forest"
        );
        RenderResult { tree, warnings }
    }

    /// Serialize a rendered tree with backend `B`.
    #[must_use]
    pub fn write<B: RenderBackend>(&self, tree: &RenderedTree) -> String {
        write_tree::<B>(tree, &self.options)
    }

    fn render_node(
        &self,
        node: &Node,
        depth: usize,
        warnings: &mut Vec<UnknownNodeReferenceError>,
    ) -> RenderedNode {
        let link = match node.link() {
            Some(target) if self.resolver.resolve(target) => Some(target.to_owned()),
            Some(target) => {
                warn!(label = node.label(), link = target, "Unresolved link target");
                warnings.push(UnknownNodeReferenceError {
                    label: node.label().to_owned(),
                    target: target.to_owned(),
                });
                None
            }
            None => None,
        };

        let state = if depth < self.options.expanded_depth {
            NodeState::Expanded
        } else {
            NodeState::Collapsed
        };

        RenderedNode {
            label: node.label().to_owned(),
            link,
            state,
            children: node
                .children()
                .iter()
                .map(|child| self.render_node(child, depth + 1, warnings))
                .collect(),
        }
    }
}

/// Render a forest with default options, accepting every link.
#[must_use]
pub fn render(forest: &Forest) -> RenderedTree {
    Renderer::new().render(forest).tree
}
