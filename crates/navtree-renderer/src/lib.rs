//! Collapsible tree renderer with pluggable backends.
//!
//! This crate turns a [`Forest`](navtree_model::Forest) into a
//! [`RenderedTree`] and serializes it using the [`RenderBackend`] trait.
//!
//! # Architecture
//!
//! - [`Renderer`]: pure transformation carrying [`RenderOptions`] and a
//!   [`LinkResolver`]; unresolved links become plain text and are reported
//!   as [`UnknownNodeReferenceError`] warnings
//! - [`HtmlBackend`]: nested `<ul>` with `<details>` disclosure
//! - [`TextBackend`]: indented terminal tree
//! - [`parse_html`]: reads HTML backend output back into a forest
//!
//! # Example
//!
//! ```
//! use navtree_model::parse_hierarchy;
//! use navtree_renderer::{HtmlBackend, NodeState, Renderer};
//!
//! let forest = parse_hierarchy(r#"[["A", "a.html", [["B", null, []]]]]"#).unwrap();
//! let renderer = Renderer::new();
//! let result = renderer.render(&forest);
//!
//! assert_eq!(result.tree.roots[0].state, NodeState::Expanded);
//! assert_eq!(result.tree.roots[0].children[0].state, NodeState::Collapsed);
//!
//! let html = renderer.write::<HtmlBackend>(&result.tree);
//! assert!(html.contains("<span>B</span>"));
//! ```

mod backend;
mod error;
mod html;
mod html_parse;
mod page;
mod rendered;
mod renderer;
mod resolver;
mod text;

pub use backend::{RenderBackend, write_tree};
pub use error::{HtmlParseError, UnknownNodeReferenceError};
pub use html::{HtmlBackend, escape_html};
pub use html_parse::parse_html;
pub use page::render_page;
pub use rendered::{NodeState, RenderedNode, RenderedTree};
pub use renderer::{RenderOptions, RenderResult, Renderer, render};
pub use resolver::{AcceptAllLinks, DirectoryLinks, KnownLinks, LinkResolver};
pub use text::TextBackend;
