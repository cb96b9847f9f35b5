//! Emitter: SceneDocument → markup text.
//!
//! Produces a complete standalone document that round-trips through the
//! parser: two-space indentation, attribute order preserved, entities
//! escaped. Text content elements and anything holding character data are
//! written inline so indentation never adds or removes rendered spaces.

use crate::model::*;
use petgraph::graph::NodeIndex;
use std::fmt::Write;

/// Emit a `SceneDocument` as standalone markup.
#[must_use]
pub fn emit_document(doc: &SceneDocument) -> String {
    let mut out = String::with_capacity(1024);
    emit_root(&mut out, doc);
    out
}

/// The root always carries the SVG namespace; an `xmlns` already present
/// is written as-is and never duplicated.
fn emit_root(out: &mut String, doc: &SceneDocument) {
    let root = &doc[doc.root];
    out.push('<');
    out.push_str(root.tag.name());
    if !root.attrs.contains("xmlns") {
        write!(out, " xmlns=\"{SVG_NAMESPACE}\"").unwrap();
    }
    emit_attrs(out, &root.attrs);
    emit_content(out, doc, doc.root, 0);
    out.push('\n');
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn emit_attrs(out: &mut String, attrs: &Attributes) {
    for (key, value) in attrs.iter() {
        write!(out, " {key}=\"{}\"", escape_attr(value)).unwrap();
    }
}

fn emit_node(out: &mut String, doc: &SceneDocument, idx: NodeIndex, depth: usize) {
    let node = &doc[idx];
    if node.tag == Tag::Characters {
        out.push_str(&escape_text(node.text.as_deref().unwrap_or_default()));
        return;
    }
    out.push('<');
    out.push_str(node.tag.name());
    emit_attrs(out, &node.attrs);
    emit_content(out, doc, idx, depth);
}

/// Emit everything after the attributes of an open tag: either `/>` or
/// `>` + children + closing tag.
fn emit_content(out: &mut String, doc: &SceneDocument, idx: NodeIndex, depth: usize) {
    let children = doc.children(idx);
    if children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');

    let inline = doc[idx].tag.is_text_content()
        || children.iter().any(|&c| doc[c].tag == Tag::Characters);
    if inline {
        for &child in children {
            emit_node(out, doc, child, 0);
        }
    } else {
        for &child in children {
            out.push('\n');
            indent(out, depth + 1);
            emit_node(out, doc, child, depth + 1);
        }
        out.push('\n');
        indent(out, depth);
    }
    write!(out, "</{}>", doc[idx].tag.name()).unwrap();
}

pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;
    use pretty_assertions::assert_eq;

    #[test]
    fn emit_pretty_prints_nested_groups() {
        let input = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><g id="g"><rect width="10" height="10"/></g></svg>"##;
        let doc = parse_document(input).unwrap();
        let expected = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <g id="g">
    <rect width="10" height="10"/>
  </g>
</svg>
"##;
        assert_eq!(emit_document(&doc), expected);
    }

    #[test]
    fn emit_adds_namespace_when_missing() {
        let doc = parse_document("<svg width=\"1\" height=\"1\"/>").unwrap();
        assert_eq!(
            emit_document(&doc),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1\" height=\"1\"/>\n"
        );
    }

    #[test]
    fn emit_keeps_text_inline_and_escaped() {
        let input = r#"<svg><text x="1">a &lt; b <tspan>c</tspan></text></svg>"#;
        let doc = parse_document(input).unwrap();
        let out = emit_document(&doc);
        assert!(
            out.contains(r#"<text x="1">a &lt; b <tspan>c</tspan></text>"#),
            "got:\n{out}"
        );
    }

    #[test]
    fn emit_escapes_attribute_quotes() {
        let input = r#"<svg><g data-note='say "hi" &amp; go'/></svg>"#;
        let doc = parse_document(input).unwrap();
        let out = emit_document(&doc);
        assert!(out.contains(r#"data-note="say &quot;hi&quot; &amp; go""#));
        let reparsed = parse_document(&out).unwrap();
        let g = reparsed.children(reparsed.root)[0];
        assert_eq!(reparsed[g].attr("data-note"), Some(r#"say "hi" & go"#));
    }

    #[test]
    fn emit_keeps_existing_namespace_once() {
        let input = r#"<svg width="1" xmlns="http://www.w3.org/2000/svg"/>"#;
        let out = emit_document(&parse_document(input).unwrap());
        assert_eq!(out.matches("xmlns=").count(), 1);
        assert_eq!(out, "<svg width=\"1\" xmlns=\"http://www.w3.org/2000/svg\"/>\n");
    }

    #[test]
    fn adjacent_tspans_stay_adjacent() {
        let doc = parse_document("<svg><text><tspan>Hello</tspan><tspan>World</tspan></text></svg>")
            .unwrap();
        let out = emit_document(&doc);
        assert!(
            out.contains("<text><tspan>Hello</tspan><tspan>World</tspan></text>"),
            "got:\n{out}"
        );
    }

    #[test]
    fn space_between_tspans_survives() {
        let input = "<svg><text><tspan>Hello</tspan> <tspan>World</tspan></text></svg>";
        let out = emit_document(&parse_document(input).unwrap());
        assert!(out.contains("<tspan>Hello</tspan> <tspan>World</tspan>"), "got:\n{out}");
        assert_eq!(emit_document(&parse_document(&out).unwrap()), out);
    }

    #[test]
    fn groups_around_text_stay_indented() {
        let doc = parse_document("<svg><g><text>a</text></g></svg>").unwrap();
        assert_eq!(
            emit_document(&doc),
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\n  <g>\n    <text>a</text>\n  </g>\n</svg>\n"
        );
    }

    #[test]
    fn text_path_content_is_inline() {
        let input = r##"<svg><text><textPath href="#p"> on a curve </textPath></text></svg>"##;
        let out = emit_document(&parse_document(input).unwrap());
        assert!(
            out.contains(r##"<text><textPath href="#p"> on a curve </textPath></text>"##),
            "got:\n{out}"
        );
    }
}
