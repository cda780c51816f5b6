//! HTML backend.
//!
//! Produces a nested `<ul>` list. Nodes with children are wrapped in
//! `<details>`/`<summary>` so they collapse without script; the `open`
//! attribute carries the initial [`NodeState`](crate::NodeState).

use std::borrow::Cow;
use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::rendered::RenderedNode;
use crate::renderer::RenderOptions;
use crate::resolver::is_external;

/// Class attribute of the outermost list.
pub(crate) const TREE_CLASS: &str = "navtree";

/// HTML render backend.
///
/// Produces:
/// - `<a href>` for linked labels
/// - `<span>` for unlinked labels
/// - `<details open="">` for expanded nodes with children
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn tree_start(out: &mut String) {
        writeln!(out, r#"<ul class="{TREE_CLASS}">"#).unwrap();
    }

    fn tree_end(out: &mut String) {
        out.push_str("</ul>\n");
    }

    fn node_start(node: &RenderedNode, _depth: usize, options: &RenderOptions, out: &mut String) {
        out.push_str("<li>");
        if node.is_leaf() {
            write_label(node, options, out);
            return;
        }
        if node.state.is_expanded() {
            out.push_str(r#"<details open="">"#);
        } else {
            out.push_str("<details>");
        }
        out.push_str("<summary>");
        write_label(node, options, out);
        out.push_str("</summary>");
    }

    fn children_start(_node: &RenderedNode, _depth: usize, out: &mut String) {
        out.push_str("<ul>\n");
    }

    fn children_end(_node: &RenderedNode, _depth: usize, out: &mut String) {
        out.push_str("</ul>");
    }

    fn node_end(node: &RenderedNode, _depth: usize, out: &mut String) {
        if !node.is_leaf() {
            out.push_str("</details>");
        }
        out.push_str("</li>\n");
    }
}

fn write_label(node: &RenderedNode, options: &RenderOptions, out: &mut String) {
    match &node.link {
        Some(link) => write!(
            out,
            r#"<a href="{}">{}</a>"#,
            escape_html(&resolve_href(options.base_url.as_deref(), link)),
            escape_html(&node.label)
        )
        .unwrap(),
        None => write!(out, "<span>{}</span>", escape_html(&node.label)).unwrap(),
    }
}

/// Prefix a relative link target with `base_url`.
///
/// Absolute URLs, root-relative paths and fragment-only links are returned
/// unchanged.
pub(crate) fn resolve_href<'a>(base_url: Option<&str>, target: &'a str) -> Cow<'a, str> {
    let base = match base_url {
        Some(base) if !base.is_empty() => base,
        _ => return Cow::Borrowed(target),
    };
    if is_external(target) || target.starts_with('/') || target.starts_with('#') {
        return Cow::Borrowed(target);
    }
    if base.ends_with('/') {
        Cow::Owned(format!("{base}{target}"))
    } else {
        Cow::Owned(format!("{base}/{target}"))
    }
}

/// Escape special HTML characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
