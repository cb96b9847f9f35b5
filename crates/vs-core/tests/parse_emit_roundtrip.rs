//! Integration tests: parse → emit → re-parse round-trip.
//!
//! Verifies that no structure is lost when converting markup →
//! SceneDocument → markup.

use pretty_assertions::assert_eq;
use vs_core::emitter::emit_document;
use vs_core::id::NodeId;
use vs_core::model::*;
use vs_core::parser::parse_document;
use vs_core::NodeIndex;

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Flatten a subtree into (depth, tag, attributes, text) records in
/// document order.
fn structure(doc: &SceneDocument) -> Vec<(usize, String, Vec<(String, String)>, Option<String>)> {
    fn walk(
        doc: &SceneDocument,
        idx: NodeIndex,
        depth: usize,
        out: &mut Vec<(usize, String, Vec<(String, String)>, Option<String>)>,
    ) {
        let node = &doc[idx];
        out.push((
            depth,
            node.tag.name().to_string(),
            node.attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            node.text.clone(),
        ));
        for &child in doc.children(idx) {
            walk(doc, child, depth + 1, out);
        }
    }
    let mut out = Vec::new();
    walk(doc, doc.root, 0, &mut out);
    out
}

fn assert_roundtrip(input: &str) {
    let doc1 = parse_document(input).expect("first parse failed");
    let emitted = emit_document(&doc1);
    let doc2 = parse_document(&emitted).expect("re-parse failed");

    let mut s1 = structure(&doc1);
    let s2 = structure(&doc2);
    // The emitter adds the namespace to a root that lacks one.
    if !doc1[doc1.root].attrs.contains("xmlns") {
        s1[0].2.insert(0, ("xmlns".into(), SVG_NAMESPACE.into()));
    }
    assert_eq!(s1, s2, "structure changed after round-trip.\nEmitted:\n{emitted}");
}

// ─── Fixture-based tests ─────────────────────────────────────────────────

#[test]
fn roundtrip_poster_fixture() {
    assert_roundtrip(include_str!("fixtures/poster.svg"));
}

#[test]
fn roundtrip_degenerate_fixture() {
    assert_roundtrip(include_str!("fixtures/degenerate.svg"));
}

#[test]
fn emit_is_stable_after_first_pass() {
    let doc1 = parse_document(include_str!("fixtures/poster.svg")).unwrap();
    let once = emit_document(&doc1);
    let twice = emit_document(&parse_document(&once).unwrap());
    assert_eq!(once, twice);
}

#[test]
fn poster_fixture_content() {
    let doc = parse_document(include_str!("fixtures/poster.svg")).unwrap();

    let defs = doc.defs().expect("defs missing");
    assert_eq!(doc.children(doc.root)[1], defs);

    let sky = doc.paint_server(NodeId::intern("sky")).expect("paint server");
    assert_eq!(doc[sky].tag, Tag::LinearGradient);
    assert_eq!(doc.children(sky).len(), 2);

    let bg = doc.find_by_id(NodeId::intern("background")).unwrap();
    assert_eq!(
        doc[bg].fill(),
        Some(FillRef::PaintServer(NodeId::intern("sky")))
    );

    let hero = doc.find_by_id(NodeId::intern("hero")).unwrap();
    assert_eq!(doc[hero].translation(), Translation::new(120.0, 80.0));

    let headline = doc.find_by_id(NodeId::intern("headline")).unwrap();
    let text = doc.children(headline)[0];
    assert_eq!(doc[text].text.as_deref(), Some("Launch & Learn"));
}

// ─── Inline markup ───────────────────────────────────────────────────────

#[test]
fn roundtrip_mixed_content() {
    assert_roundtrip(
        r#"<svg><text x="0" y="10">Hello <tspan font-weight="bold">bold</tspan> world</text></svg>"#,
    );
}

#[test]
fn roundtrip_unknown_elements_and_namespaces() {
    assert_roundtrip(
        r##"<svg xmlns:xlink="http://www.w3.org/1999/xlink"><metadata><rdf:RDF/></metadata><use xlink:href="#a" x="1" y="2"/><foreignObject width="10" height="10"/></svg>"##,
    );
}

#[test]
fn roundtrip_after_mutation() {
    let mut doc = parse_document(include_str!("fixtures/poster.svg")).unwrap();
    let card = doc.find_by_id(NodeId::intern("card-a")).unwrap();
    doc.set_translation(card, Translation::new(16.0, 16.0));
    doc.set_attr(card, "fill", "url(#sky)");

    let emitted = emit_document(&doc);
    let reparsed = parse_document(&emitted).unwrap();
    let card2 = reparsed.find_by_id(NodeId::intern("card-a")).unwrap();
    assert_eq!(reparsed[card2].translation(), Translation::new(16.0, 16.0));
    assert_eq!(structure(&doc), structure(&reparsed));
}

#[test]
fn roundtrip_text_runs_keep_their_spacing() {
    let input = r#"<svg width="200" height="80">
  <text id="greeting" x="10" y="40">
    <tspan>Hello</tspan> <tspan font-weight="bold">World</tspan>
  </text>
  <text id="joined" x="10" y="70"><tspan>Hello</tspan><tspan>World</tspan></text>
</svg>"#;
    assert_roundtrip(input);

    let out = emit_document(&parse_document(input).unwrap());
    assert!(out.contains("<tspan>Hello</tspan> <tspan font-weight=\"bold\">World</tspan>"), "{out}");
    assert!(out.contains("<tspan>Hello</tspan><tspan>World</tspan></text>"), "{out}");
}
