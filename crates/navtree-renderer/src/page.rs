//! Standalone HTML page.

use std::fmt::Write;

use crate::backend::write_tree;
use crate::html::{HtmlBackend, escape_html};
use crate::rendered::RenderedTree;
use crate::renderer::RenderOptions;

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; margin: 2rem; }
ul.navtree, ul.navtree ul { list-style: none; padding-left: 1.25rem; }
ul.navtree { padding-left: 0; }
ul.navtree li { margin: 0.15rem 0; }
ul.navtree summary { cursor: pointer; }
ul.navtree span { color: #555; }
";

/// Wrap a rendered tree in a complete HTML5 document.
///
/// The markup is well-formed XML so that it can be fed back through
/// [`parse_html`](crate::parse_html).
#[must_use]
pub fn render_page(title: &str, tree: &RenderedTree, options: &RenderOptions) -> String {
    let title = escape_html(title);
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n");
    out.push_str("<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n");
    writeln!(out, "<title>{title}</title>").unwrap();
    writeln!(out, "<style>\n{STYLE}</style>").unwrap();
    out.push_str("</head>\n<body>\n");
    writeln!(out, "<h1>{title}</h1>").unwrap();
    out.push_str(&write_tree::<HtmlBackend>(tree, options));
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::render;
    use navtree_model::Forest;

    #[test]
    fn test_page_contains_title_and_tree() {
        let tree = render(&Forest::empty());

        let page = render_page("Class <Hierarchy>", &tree, &RenderOptions::default());

        assert!(page.starts_with("<!DOCTYPE html>\n"));
        assert!(page.contains("<title>Class &lt;Hierarchy&gt;</title>"));
        assert!(page.contains("<ul class=\"navtree\">\n</ul>\n</body>"));
    }
}
