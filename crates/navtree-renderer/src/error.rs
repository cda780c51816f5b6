//! Renderer error types.

use navtree_model::MalformedTreeError;

/// Link target that could not be resolved.
///
/// Recoverable: the node is rendered as plain text and the error is
/// reported alongside the tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unresolved link '{target}' on '{label}'")]
pub struct UnknownNodeReferenceError {
    /// Label of the node carrying the link.
    pub label: String,
    /// Link target as written in the hierarchy.
    pub target: String,
}

/// Error from re-parsing rendered HTML.
#[derive(Debug, thiserror::Error)]
pub enum HtmlParseError {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error during XML parsing.
    #[error("Encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Markup does not have the rendered tree's shape.
    #[error("Unexpected markup: {0}")]
    Structure(String),

    /// Recovered structure is not a valid forest.
    #[error(transparent)]
    Malformed(#[from] MalformedTreeError),
}
