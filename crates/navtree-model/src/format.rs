//! Hierarchy file format.
//!
//! The documentation generator writes the class hierarchy as a script
//! assignment of nested `[label, link, children]` tuples:
//!
//! ```text
//! var hierarchy =
//! [
//!     [ "CheckFailCallbackInterface", null, [
//!       [ "SimpleFailureNotifier", "class_simple_failure_notifier.html", null ]
//!     ] ],
//!     [ "DataFlash", "class_data_flash.html", null ]
//! ];
//! ```
//!
//! Leaves carry `null` children. A bare JSON array without the assignment
//! is accepted too.

use std::fmt::Write;

use serde_json::Value;
use tracing::debug;

use crate::error::MalformedTreeError;
use crate::forest::Forest;
use crate::node::Node;

/// Variable name the generator assigns the hierarchy to.
pub const DEFAULT_VARIABLE: &str = "hierarchy";

/// Parsed hierarchy file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hierarchy {
    /// Name of the script variable, `None` for bare JSON input.
    pub variable: Option<String>,
    /// The parsed forest.
    pub forest: Forest,
}

impl Hierarchy {
    /// Parse a hierarchy file.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTreeError`] if the source is not valid JSON, an
    /// entry is not a `[label, link, children]` tuple, a children field is
    /// neither an array nor null, or the tree contains a cycle.
    pub fn parse(source: &str) -> Result<Self, MalformedTreeError> {
        let (variable, body) = split_assignment(source)?;
        let value: Value = serde_json::from_str(body)?;
        let entries = match value {
            Value::Array(entries) => entries,
            other => {
                return Err(MalformedTreeError::NotAnArray {
                    found: kind(&other),
                });
            }
        };

        let roots = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| parse_entry(entry, &format!("[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;
        let forest = Forest::new(roots)?;
        debug!(
            variable = variable.unwrap_or("<none>"),
            nodes = forest.node_count(),
            "Parsed hierarchy"
        );

        Ok(Self {
            variable: variable.map(str::to_owned),
            forest,
        })
    }
}

/// Parse a hierarchy file, discarding the variable name.
///
/// # Errors
///
/// See [`Hierarchy::parse`].
pub fn parse_hierarchy(source: &str) -> Result<Forest, MalformedTreeError> {
    Hierarchy::parse(source).map(|hierarchy| hierarchy.forest)
}

/// Write a forest in the generator's script format.
#[must_use]
pub fn write_hierarchy(forest: &Forest, variable: &str) -> String {
    let mut out = String::new();
    writeln!(out, "var {variable} =").unwrap();
    out.push_str("[\n");
    write_entries(forest.roots(), 4, &mut out);
    out.push_str("];\n");
    out
}

/// Convert a forest to the bare nested-array form with array children.
#[must_use]
pub fn to_json(forest: &Forest) -> Value {
    fn entry(node: &Node) -> Value {
        Value::Array(vec![
            Value::String(node.label().to_owned()),
            node.link()
                .map_or(Value::Null, |link| Value::String(link.to_owned())),
            Value::Array(node.children().iter().map(entry).collect()),
        ])
    }

    Value::Array(forest.roots().iter().map(entry).collect())
}

fn write_entries(nodes: &[Node], indent: usize, out: &mut String) {
    let pad = " ".repeat(indent);
    for (i, node) in nodes.iter().enumerate() {
        let sep = if i + 1 < nodes.len() { "," } else { "" };
        let label = Value::String(node.label().to_owned());
        let link = node
            .link()
            .map_or(Value::Null, |link| Value::String(link.to_owned()));
        write!(out, "{pad}[ {label}, {link}, ").unwrap();
        if node.is_leaf() {
            writeln!(out, "null ]{sep}").unwrap();
        } else {
            out.push_str("[\n");
            write_entries(node.children(), indent + 2, out);
            writeln!(out, "{pad}] ]{sep}").unwrap();
        }
    }
}

/// Split `var name = [...];` into the variable name and the array text.
fn split_assignment(source: &str) -> Result<(Option<&str>, &str), MalformedTreeError> {
    let source = skip_comments(source);
    let Some(rest) = ["var", "let", "const"].iter().find_map(|keyword| {
        source
            .strip_prefix(keyword)
            .filter(|rest| rest.starts_with(char::is_whitespace))
    }) else {
        return Ok((None, strip_terminator(source)));
    };

    let (name, body) = rest.split_once('=').ok_or_else(|| {
        MalformedTreeError::InvalidWrapper("missing '=' after variable name".to_owned())
    })?;
    let name = name.trim();
    if !is_identifier(name) {
        return Err(MalformedTreeError::InvalidWrapper(format!(
            "'{name}' is not a valid variable name"
        )));
    }

    Ok((Some(name), strip_terminator(body)))
}

/// Drop the final `;` when only whitespace and comments follow it.
fn strip_terminator(body: &str) -> &str {
    body.rmatch_indices(';')
        .find(|&(index, _)| skip_comments(&body[index + 1..]).is_empty())
        .map_or(body, |(index, _)| &body[..index])
        .trim()
}

/// Skip leading whitespace and `/* */` or `//` comments.
fn skip_comments(mut source: &str) -> &str {
    loop {
        source = source.trim_start();
        if let Some(rest) = source.strip_prefix("/*") {
            source = rest.split_once("*/").map_or("", |(_, after)| after);
        } else if let Some(rest) = source.strip_prefix("//") {
            source = rest.split_once('\n').map_or("", |(_, after)| after);
        } else {
            return source;
        }
    }
}

/// Whether `name` is a valid script variable name.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn parse_entry(value: &Value, path: &str) -> Result<Node, MalformedTreeError> {
    let Value::Array(items) = value else {
        return Err(MalformedTreeError::InvalidEntry {
            path: path.to_owned(),
            reason: format!("expected [label, link, children], found {}", kind(value)),
        });
    };
    let [label, link, children] = items.as_slice() else {
        return Err(MalformedTreeError::InvalidEntry {
            path: path.to_owned(),
            reason: format!("expected 3 elements, found {}", items.len()),
        });
    };

    let Value::String(label) = label else {
        return Err(MalformedTreeError::InvalidLabel {
            path: path.to_owned(),
            found: kind(label),
        });
    };

    let node = match link {
        Value::Null => Node::new(label.clone()),
        Value::String(link) => Node::new(label.clone()).with_link(link.clone()),
        other => {
            return Err(MalformedTreeError::InvalidLink {
                label: label.clone(),
                found: kind(other),
            });
        }
    };

    let children = match children {
        Value::Null => Vec::new(),
        Value::Array(children) => children
            .iter()
            .enumerate()
            .map(|(i, child)| parse_entry(child, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(MalformedTreeError::InvalidChildren {
                label: label.clone(),
                found: kind(other),
            });
        }
    };

    Ok(node.with_children(children))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GENERATED: &str = include_str!("../../../testdata/hierarchy.js");

    #[test]
    fn test_parse_generated_hierarchy() {
        let hierarchy = Hierarchy::parse(GENERATED).unwrap();

        assert_eq!(hierarchy.variable.as_deref(), Some("hierarchy"));
        let forest = &hierarchy.forest;
        assert_eq!(forest.len(), 12);
        assert_eq!(forest.node_count(), 26);
        assert_eq!(forest.max_depth(), 2);

        let grouping = &forest.roots()[1];
        assert_eq!(grouping.label(), "CheckFailCallbackInterface");
        assert_eq!(grouping.link(), None);
        assert_eq!(grouping.children()[0].label(), "SimpleFailureNotifier");

        let test = &forest.roots()[10];
        assert_eq!(test.label(), "Dummy::Test");
        assert_eq!(test.link(), Some("class_dummy_1_1_test.html"));
        assert_eq!(test.children().len(), 8);
        assert_eq!(
            forest.roots()[11].children()[1].label(),
            "Dummy::TestNotification< T >"
        );
    }

    #[test]
    fn test_write_reproduces_generated_file() {
        let forest = parse_hierarchy(GENERATED).unwrap();

        let written = write_hierarchy(&forest, DEFAULT_VARIABLE);

        assert_eq!(written.trim_end(), GENERATED.trim_end());
    }

    #[test]
    fn test_parse_bare_json_array() {
        let forest = parse_hierarchy(r#"[["A", "a.html", [["B", null, []]]]]"#).unwrap();

        let expected = Forest::new(vec![
            Node::new("A").with_link("a.html").with_child(Node::new("B")),
        ])
        .unwrap();
        assert_eq!(forest, expected);
    }

    #[test]
    fn test_parse_empty_array() {
        let forest = parse_hierarchy("var hierarchy = [];").unwrap();

        assert!(forest.is_empty());
    }

    #[test]
    fn test_parse_skips_license_comment() {
        let source = concat!(
            "/*\n @licstart\n*/\n",
            "// generated\n",
            "var hierarchy =\n[ [ \"A\", null, null ] ];",
        );

        let forest = parse_hierarchy(source).unwrap();

        assert_eq!(forest.roots()[0].label(), "A");
    }

    #[test]
    fn test_string_children_is_rejected() {
        let err = parse_hierarchy(r#"[["A", null, "hierarchy0.js"]]"#).unwrap_err();

        assert!(matches!(
            err,
            MalformedTreeError::InvalidChildren { ref label, found: "string" } if label == "A"
        ));
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        let err = parse_hierarchy(r#"[["A", null, [["B", null]]]]"#).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid entry at [0][0]: expected 3 elements, found 2"
        );
    }

    #[test]
    fn test_non_string_label_is_rejected() {
        let err = parse_hierarchy("[[42, null, null]]").unwrap_err();

        assert!(matches!(err, MalformedTreeError::InvalidLabel { found: "number", .. }));
    }

    #[test]
    fn test_non_string_link_is_rejected() {
        let err = parse_hierarchy(r#"[["A", true, null]]"#).unwrap_err();

        assert!(matches!(err, MalformedTreeError::InvalidLink { found: "boolean", .. }));
    }

    #[test]
    fn test_object_top_level_is_rejected() {
        let err = parse_hierarchy(r#"{"A": []}"#).unwrap_err();

        assert!(matches!(err, MalformedTreeError::NotAnArray { found: "object" }));
    }

    #[test]
    fn test_invalid_json_is_syntax_error() {
        let err = parse_hierarchy("var hierarchy = [ [ \"A\", null, null ], ];").unwrap_err();

        assert!(matches!(err, MalformedTreeError::Syntax(_)));
    }

    #[test]
    fn test_invalid_variable_name_is_rejected() {
        let err = parse_hierarchy("var 1st = [];").unwrap_err();

        assert!(matches!(err, MalformedTreeError::InvalidWrapper(_)));
    }

    #[test]
    fn test_self_referential_child_is_cycle() {
        let err = parse_hierarchy(r#"[["A", null, [["A", "a.html", null]]]]"#).unwrap_err();

        assert!(matches!(err, MalformedTreeError::Cycle { .. }));
    }

    #[test]
    fn test_to_json_uses_array_children() {
        let forest = parse_hierarchy(r#"[["A", "a.html", [["B", null, null]]]]"#).unwrap();

        assert_eq!(
            to_json(&forest).to_string(),
            r#"[["A","a.html",[["B",null,[]]]]]"#
        );
    }

    #[test]
    fn test_json_output_parses_back() {
        let forest = parse_hierarchy(GENERATED).unwrap();

        let reparsed = parse_hierarchy(&to_json(&forest).to_string()).unwrap();

        assert_eq!(reparsed, forest);
    }

    #[test]
    fn test_trailing_comment_after_terminator() {
        let hierarchy = Hierarchy::parse("var hierarchy = [];\n// end of file\n").unwrap();

        assert_eq!(hierarchy.variable.as_deref(), Some("hierarchy"));
        assert!(hierarchy.forest.is_empty());
    }

    #[test]
    fn test_keyword_followed_by_tab() {
        let hierarchy = Hierarchy::parse("var\thierarchy = [[\"A\", null, null]];").unwrap();

        assert_eq!(hierarchy.variable.as_deref(), Some("hierarchy"));
        assert_eq!(hierarchy.forest.len(), 1);
    }

    #[test]
    fn test_semicolon_inside_label_is_kept() {
        let source = r#"var hierarchy = [["a;b", null, null]]; /* done */"#;

        let forest = parse_hierarchy(source).unwrap();

        assert_eq!(forest.roots()[0].label(), "a;b");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("hierarchy"));
        assert!(is_identifier("_nav$2"));
        assert!(!is_identifier("2nav"));
        assert!(!is_identifier("my-tree"));
        assert!(!is_identifier(""));
    }
}
