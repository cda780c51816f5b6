//! Hierarchy forest model for navtree.
//!
//! This crate provides:
//! - [`Node`] and [`Forest`]: immutable ordered hierarchy with per-occurrence
//!   node identity
//! - [`ForestBuilder`]: arena-style construction from node references
//! - [`parse_hierarchy`] / [`write_hierarchy`]: the generator's
//!   `var hierarchy = [...]` file format
//!
//! # Example
//!
//! ```
//! use navtree_model::parse_hierarchy;
//!
//! let forest = parse_hierarchy(r#"[["A", "a.html", [["B", null, []]]]]"#).unwrap();
//! assert_eq!(forest.len(), 1);
//! assert_eq!(forest.roots()[0].link(), Some("a.html"));
//! assert_eq!(forest.roots()[0].children()[0].label(), "B");
//! ```

mod builder;
mod error;
mod forest;
mod format;
mod node;

pub use builder::{ForestBuilder, NodeId};
pub use error::MalformedTreeError;
pub use forest::{Forest, Walk};
pub use format::{
    DEFAULT_VARIABLE, Hierarchy, is_identifier, parse_hierarchy, to_json, write_hierarchy,
};
pub use node::Node;
