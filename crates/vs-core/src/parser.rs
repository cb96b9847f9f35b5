//! Parser for vector markup → `SceneDocument`.
//!
//! Built on `winnow` 0.7. Handles: XML declaration, DOCTYPE, comments,
//! processing instructions, CDATA sections, single- and double-quoted
//! attributes, entity references, self-closing tags, and mixed content.
//! Whitespace-only character data is dropped between structural elements
//! but kept inside text content (`text`, `tspan`, `textPath`), where it
//! renders. Everything else is kept verbatim so emit → parse is lossless.

use crate::model::*;
use petgraph::graph::NodeIndex;
use winnow::combinator::{alt, delimited};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// Parse a vector document string into a `SceneDocument`.
#[must_use = "parsing result should be used"]
pub fn parse_document(input: &str) -> Result<SceneDocument, String> {
    let mut rest = input.strip_prefix('\u{feff}').unwrap_or(input);

    skip_misc(&mut rest)?;
    if rest.starts_with("<!DOCTYPE") {
        skip_doctype(&mut rest)?;
        skip_misc(&mut rest)?;
    }
    if !rest.starts_with('<') {
        return Err("Markup parse error: expected a root element".to_string());
    }

    let root = parse_element.parse_next(&mut rest).map_err(|e| {
        let offset = input.len() - rest.len();
        format!("Markup parse error at byte {offset}: {e}")
    })?;

    skip_misc(&mut rest)?;
    if !rest.is_empty() {
        let offset = input.len() - rest.len();
        return Err(format!(
            "Markup parse error at byte {offset}: content after the root element"
        ));
    }
    if root.tag != Tag::Svg {
        return Err(format!(
            "Markup parse error: root element is <{}>, expected <svg>",
            root.tag.name()
        ));
    }

    let mut doc = SceneDocument::with_root(SceneNode {
        tag: root.tag,
        attrs: root.attrs,
        text: None,
    });
    let root_idx = doc.root;
    for child in root.children {
        insert_recursive(&mut doc, root_idx, child);
    }
    log::debug!("parsed document with {} nodes", doc.node_count());
    Ok(doc)
}

/// Internal representation during parsing before inserting into the graph.
#[derive(Debug)]
struct ParsedElement {
    tag: Tag,
    attrs: Attributes,
    children: Vec<ParsedChild>,
}

#[derive(Debug)]
enum ParsedChild {
    Element(ParsedElement),
    Text(String),
}

fn insert_recursive(doc: &mut SceneDocument, parent: NodeIndex, child: ParsedChild) {
    match child {
        ParsedChild::Text(text) => {
            doc.append_child(parent, SceneNode::characters(text));
        }
        ParsedChild::Element(el) => {
            let idx = doc.append_child(
                parent,
                SceneNode {
                    tag: el.tag,
                    attrs: el.attrs,
                    text: None,
                },
            );
            for grandchild in el.children {
                insert_recursive(doc, idx, grandchild);
            }
        }
    }
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn cut<T>() -> ModalResult<T> {
    Err(ErrMode::Cut(ContextError::new()))
}

/// Skip whitespace, comments, and processing instructions.
fn skip_misc(input: &mut &str) -> Result<(), String> {
    loop {
        *input = input.trim_start();
        if input.starts_with("<!--") {
            skip_past(input, "-->").ok_or("Markup parse error: unterminated comment")?;
        } else if input.starts_with("<?") {
            skip_past(input, "?>")
                .ok_or("Markup parse error: unterminated processing instruction")?;
        } else {
            return Ok(());
        }
    }
}

/// Skip a DOCTYPE declaration, including an internal subset in brackets.
fn skip_doctype(input: &mut &str) -> Result<(), String> {
    let mut depth = 0i32;
    for (i, c) in input.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth -= 1,
            '>' if depth <= 0 => {
                *input = &input[i + 1..];
                return Ok(());
            }
            _ => {}
        }
    }
    Err("Markup parse error: unterminated DOCTYPE".to_string())
}

/// Advance past the next occurrence of `terminator`.
fn skip_past<'a>(input: &mut &'a str, terminator: &str) -> Option<&'a str> {
    let pos = input.find(terminator)?;
    let skipped = &input[..pos];
    *input = &input[pos + terminator.len()..];
    Some(skipped)
}

fn skip_ws(input: &mut &str) {
    *input = input.trim_start();
}

fn parse_name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.')
    })
    .parse_next(input)
}

fn parse_attr_value<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    alt((
        delimited('"', take_till(0.., '"'), '"'),
        delimited('\'', take_till(0.., '\''), '\''),
    ))
    .parse_next(input)
}

fn parse_element(input: &mut &str) -> ModalResult<ParsedElement> {
    let _ = '<'.parse_next(input)?;
    let name = parse_name(input)?;
    let mut element = ParsedElement {
        tag: Tag::from_name(name),
        attrs: Attributes::new(),
        children: Vec::new(),
    };
    let keep_ws = element.tag.is_text_content();

    // Attributes
    loop {
        skip_ws(input);
        if let Some(after) = input.strip_prefix("/>") {
            *input = after;
            return Ok(element);
        }
        if let Some(after) = input.strip_prefix('>') {
            *input = after;
            break;
        }
        let key = parse_name(input)?;
        skip_ws(input);
        let _ = '='.parse_next(input)?;
        skip_ws(input);
        let value = parse_attr_value(input)?;
        element.attrs.set(key, decode_entities(value));
    }

    // Content
    loop {
        if input.is_empty() {
            return cut();
        }
        if let Some(after) = input.strip_prefix("</") {
            *input = after;
            let close = parse_name(input)?;
            skip_ws(input);
            let _ = '>'.parse_next(input)?;
            if close != name {
                log::warn!("mismatched closing tag </{close}> for <{name}>");
                return cut();
            }
            return Ok(element);
        }
        if input.starts_with("<!--") {
            if skip_past(input, "-->").is_none() {
                return cut();
            }
            continue;
        }
        if let Some(after) = input.strip_prefix("<![CDATA[") {
            *input = after;
            match skip_past(input, "]]>") {
                Some(data) => push_text(&mut element.children, data.to_string(), keep_ws),
                None => return cut(),
            }
            continue;
        }
        if input.starts_with("<?") {
            if skip_past(input, "?>").is_none() {
                return cut();
            }
            continue;
        }
        if input.starts_with('<') {
            let child = parse_element(input)?;
            element.children.push(ParsedChild::Element(child));
            continue;
        }

        let text: &str = take_till(1.., '<').parse_next(input)?;
        push_text(&mut element.children, decode_entities(text), keep_ws);
    }
}

/// Append character data, merging with an immediately preceding run.
/// Whitespace-only runs are dropped unless `keep_ws` is set.
fn push_text(children: &mut Vec<ParsedChild>, text: String, keep_ws: bool) {
    if let Some(ParsedChild::Text(prev)) = children.last_mut() {
        prev.push_str(&text);
        return;
    }
    if text.is_empty() || (!keep_ws && text.trim().is_empty()) {
        return;
    }
    children.push(ParsedChild::Text(text));
}

/// Decode the predefined entities and numeric character references.
/// Unknown entities are kept literally.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let c = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => parse_char_ref(entity),
            }?;
            Some((c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn parse_char_ref(entity: &str) -> Option<char> {
    let num = entity.strip_prefix('#')?;
    let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => num.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeId;

    #[test]
    fn parse_minimal_svg() {
        let input = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">
  <rect id="a" x="10" y="10" width="50" height="20" fill="#FF0000"/>
</svg>"##;
        let doc = parse_document(input).unwrap();
        let a = doc.find_by_id(NodeId::intern("a")).unwrap();
        assert_eq!(doc[a].tag, Tag::Rect);
        assert_eq!(doc[a].attr("fill"), Some("#FF0000"));
        assert_eq!(doc.children(doc.root), &[a]);
    }

    #[test]
    fn parse_prolog_comments_and_doctype() {
        let input = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- generated -->
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg width="10" height="10"><!-- inner --><g/></svg>
"#;
        let doc = parse_document(input).unwrap();
        let children = doc.children(doc.root);
        assert_eq!(children.len(), 1);
        assert_eq!(doc[children[0]].tag, Tag::Group);
    }

    #[test]
    fn parse_text_content_and_entities() {
        let input = r#"<svg><text x='5' y="20">Tom &amp; Jerry &#x263A;</text></svg>"#;
        let doc = parse_document(input).unwrap();
        let text = doc.children(doc.root)[0];
        assert_eq!(doc[text].attr("x"), Some("5"));
        let chars = doc.children(text)[0];
        assert_eq!(doc[chars].tag, Tag::Characters);
        assert_eq!(doc[chars].text.as_deref(), Some("Tom & Jerry \u{263A}"));
    }

    #[test]
    fn parse_cdata_is_character_data() {
        let input = "<svg><style><![CDATA[rect { fill: red; }]]></style></svg>";
        let doc = parse_document(input).unwrap();
        let style = doc.children(doc.root)[0];
        let chars = doc.children(style)[0];
        assert_eq!(doc[chars].text.as_deref(), Some("rect { fill: red; }"));
    }

    #[test]
    fn mismatched_close_is_error() {
        assert!(parse_document("<svg><g></rect></svg>").is_err());
    }

    #[test]
    fn unterminated_document_is_error() {
        assert!(parse_document("<svg><rect/>").is_err());
    }

    #[test]
    fn non_svg_root_is_error() {
        let err = parse_document("<html></html>").unwrap_err();
        assert!(err.contains("expected <svg>"), "got: {err}");
    }

    #[test]
    fn trailing_garbage_is_error() {
        assert!(parse_document("<svg/>trailing").is_err());
    }

    #[test]
    fn unknown_entities_are_kept() {
        assert_eq!(decode_entities("a &nbsp; b & c"), "a &nbsp; b & c");
    }

    #[test]
    fn whitespace_between_tspans_is_kept() {
        let doc = parse_document("<svg><text><tspan>Hello</tspan> <tspan>World</tspan></text></svg>")
            .unwrap();
        let text = doc.children(doc.root)[0];
        let kids = doc.children(text);
        assert_eq!(kids.len(), 3);
        assert_eq!(doc[kids[1]].tag, Tag::Characters);
        assert_eq!(doc[kids[1]].text.as_deref(), Some(" "));
    }

    #[test]
    fn whitespace_between_shapes_is_dropped() {
        let doc = parse_document("<svg>\n  <g>\n    <rect/>\n  </g>\n</svg>").unwrap();
        let g = doc.children(doc.root)[0];
        assert_eq!(doc.children(doc.root).len(), 1);
        assert_eq!(doc.children(g).len(), 1);
    }
}
