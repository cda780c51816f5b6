//! Re-parse rendered HTML into a forest.
//!
//! Accepts the output of [`HtmlBackend`](crate::HtmlBackend), either bare or
//! wrapped in a standalone page. The first `<ul class="navtree">` found is
//! used, falling back to the first `<ul>`.

use std::collections::HashMap;

use navtree_model::{Forest, Node};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::HtmlParseError;
use crate::html::TREE_CLASS;

/// Parsed markup element.
#[derive(Debug, Default)]
struct Element {
    tag: String,
    attrs: HashMap<String, String>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag == tag)
    }

    fn find_list(&self, class: Option<&str>) -> Option<&Element> {
        if self.tag == "ul"
            && class.is_none_or(|class| self.attrs.get("class").is_some_and(|c| c == class))
        {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_list(class))
    }
}

/// Parse HTML produced by the HTML backend back into a forest.
///
/// Disclosure state is not recovered; links are taken from `href` as
/// written.
///
/// # Errors
///
/// Returns [`HtmlParseError`] if the markup is not well-formed, does not
/// contain a tree list, or describes a cyclic tree.
pub fn parse_html(html: &str) -> Result<Forest, HtmlParseError> {
    let document = parse_elements(html)?;
    let list = document
        .find_list(Some(TREE_CLASS))
        .or_else(|| document.find_list(None))
        .ok_or_else(|| HtmlParseError::Structure("no <ul> element found".to_owned()))?;

    Ok(Forest::new(nodes_from_list(list)?)?)
}

fn nodes_from_list(list: &Element) -> Result<Vec<Node>, HtmlParseError> {
    list.children
        .iter()
        .filter(|child| child.tag == "li")
        .map(node_from_item)
        .collect()
}

fn node_from_item(item: &Element) -> Result<Node, HtmlParseError> {
    let Some(details) = item.child("details") else {
        return label_node(item);
    };
    let summary = details
        .child("summary")
        .ok_or_else(|| HtmlParseError::Structure("<details> without <summary>".to_owned()))?;
    let children = match details.child("ul") {
        Some(list) => nodes_from_list(list)?,
        None => Vec::new(),
    };
    Ok(label_node(summary)?.with_children(children))
}

fn label_node(container: &Element) -> Result<Node, HtmlParseError> {
    if let Some(anchor) = container.child("a") {
        let node = Node::new(anchor.text.clone());
        return Ok(match anchor.attrs.get("href") {
            Some(href) => node.with_link(href.clone()),
            None => node,
        });
    }
    if let Some(span) = container.child("span") {
        return Ok(Node::new(span.text.clone()));
    }
    Err(HtmlParseError::Structure(format!(
        "<{}> without <a> or <span> label",
        container.tag
    )))
}

fn parse_elements(html: &str) -> Result<Element, HtmlParseError> {
    let mut reader = Reader::from_str(html);
    reader.config_mut().trim_text(false);

    let mut stack = vec![Element::default()];
    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(start_element(&reader, &e)),
            Event::Empty(e) => {
                let element = start_element(&reader, &e);
                push_child(&mut stack, element);
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(HtmlParseError::Structure("unbalanced end tag".to_owned()));
                }
                if let Some(element) = stack.pop() {
                    push_child(&mut stack, element);
                }
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                push_text(&mut stack, &text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                push_text(&mut stack, &decode_entity(&entity));
            }
            Event::CData(e) => {
                push_text(&mut stack, &String::from_utf8_lossy(&e));
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    match stack.pop() {
        Some(document) if stack.is_empty() => Ok(document),
        _ => Err(HtmlParseError::Structure("unclosed element".to_owned())),
    }
}

fn start_element(reader: &Reader<&[u8]>, e: &BytesStart) -> Element {
    let tag = decode_lossy(reader, e.name().as_ref());
    let attrs = e
        .attributes()
        .flatten()
        .map(|attr| {
            let key = decode_lossy(reader, attr.key.as_ref());
            let value = attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                std::borrow::Cow::into_owned,
            );
            (key, value)
        })
        .collect();
    Element {
        tag,
        attrs,
        ..Element::default()
    }
}

fn decode_lossy(reader: &Reader<&[u8]>, bytes: &[u8]) -> String {
    reader.decoder().decode(bytes).map_or_else(
        |_| String::from_utf8_lossy(bytes).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

fn push_child(stack: &mut [Element], element: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    }
}

fn push_text(stack: &mut [Element], text: &str) {
    if let Some(current) = stack.last_mut() {
        current.text.push_str(text);
    }
}

/// Decode an XML entity reference to its character value.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::HtmlBackend;
    use crate::page::render_page;
    use crate::renderer::{RenderOptions, Renderer, render};
    use navtree_model::parse_hierarchy;
    use pretty_assertions::assert_eq;

    const GENERATED: &str = include_str!("../../../testdata/hierarchy.js");

    fn html_for(forest: &Forest) -> String {
        Renderer::new().write::<HtmlBackend>(&render(forest))
    }

    #[test]
    fn test_parse_simple_tree() {
        let html = "<ul class=\"navtree\">\n\
                    <li><details open=\"\"><summary><a href=\"a.html\">A</a></summary><ul>\n\
                    <li><span>B</span></li>\n\
                    </ul></details></li>\n\
                    </ul>\n";

        let forest = parse_html(html).unwrap();

        let expected = Forest::new(vec![
            Node::new("A").with_link("a.html").with_child(Node::new("B")),
        ])
        .unwrap();
        assert_eq!(forest, expected);
    }

    #[test]
    fn test_round_trip_generated_hierarchy() {
        let forest = parse_hierarchy(GENERATED).unwrap();

        let reparsed = parse_html(&html_for(&forest)).unwrap();

        assert_eq!(reparsed, forest);
    }

    #[test]
    fn test_render_is_idempotent_through_html() {
        let forest = parse_hierarchy(GENERATED).unwrap();
        let first = render(&forest);

        let html = Renderer::new().write::<HtmlBackend>(&first);
        let second = render(&parse_html(&html).unwrap());

        assert_eq!(second, first);
    }

    #[test]
    fn test_escaped_labels_round_trip() {
        let forest = Forest::new(vec![
            Node::new("Dummy::TestNotification< T >").with_link("a.html?x=1&y=2"),
            Node::new("Tom's \"quoted\" & co"),
        ])
        .unwrap();

        let reparsed = parse_html(&html_for(&forest)).unwrap();

        assert_eq!(reparsed, forest);
    }

    #[test]
    fn test_parse_standalone_page() {
        let forest = parse_hierarchy(r#"[["A", "a.html", [["B", null, null]]]]"#).unwrap();
        let page = render_page("Class Hierarchy", &render(&forest), &RenderOptions::default());

        let reparsed = parse_html(&page).unwrap();

        assert_eq!(reparsed, forest);
    }

    #[test]
    fn test_parse_empty_list() {
        let forest = parse_html("<ul class=\"navtree\">\n</ul>\n").unwrap();

        assert!(forest.is_empty());
    }

    #[test]
    fn test_missing_list_is_error() {
        let err = parse_html("<p>nothing here</p>").unwrap_err();

        assert!(matches!(err, HtmlParseError::Structure(_)));
    }

    #[test]
    fn test_item_without_label_is_error() {
        let err = parse_html("<ul><li>bare text</li></ul>").unwrap_err();

        assert!(matches!(err, HtmlParseError::Structure(_)));
    }

    #[test]
    fn test_mismatched_tags_is_error() {
        let err = parse_html("<ul><li><span>A</li></span></ul>").unwrap_err();

        assert!(matches!(err, HtmlParseError::Xml(_)));
    }

    #[test]
    fn test_cyclic_markup_is_malformed() {
        let html = "<ul><li><details><summary><span>A</span></summary><ul>\
                    <li><span>A</span></li></ul></details></li></ul>";

        let err = parse_html(html).unwrap_err();

        assert!(matches!(err, HtmlParseError::Malformed(_)));
    }
}
