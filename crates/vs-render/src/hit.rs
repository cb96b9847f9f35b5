//! Hit testing: point → node lookup.
//!
//! Reverse-walks the scene (front-to-back) to find which element is at a
//! given (x, y) canvas position. Boxes are measured on the fly from the
//! document, so there is no separate render tree to keep in sync.

use kurbo::{Point, Rect};
use vs_core::geometry::{BBox, intrinsic_box};
use vs_core::model::*;
use vs_core::NodeIndex;

/// Find the innermost, topmost element at position (px, py).
/// Returns `None` if nothing is hit (background).
///
/// Containers are never hit on their own: a point inside a group's box
/// but outside all of its children misses, matching how the host
/// rasterizer dispatches pointer events.
pub fn hit_test(doc: &SceneDocument, px: f64, py: f64) -> Option<NodeIndex> {
    let point = Point::new(px, py);
    let hit = hit_test_node(doc, doc.root, Translation::ZERO, point);
    log::trace!("hit_test({px}, {py}) → {hit:?}");
    hit
}

fn hit_test_node(
    doc: &SceneDocument,
    idx: NodeIndex,
    parent_offset: Translation,
    point: Point,
) -> Option<NodeIndex> {
    let node = &doc[idx];
    if node.tag.is_non_visual() {
        return None;
    }
    let offset = if idx == doc.root {
        Translation::ZERO
    } else {
        let own = node.translation();
        Translation::new(parent_offset.dx + own.dx, parent_offset.dy + own.dy)
    };

    // Check children in reverse (last painted = topmost)
    for &child in doc.children(idx).iter().rev() {
        if let Some(hit) = hit_test_node(doc, child, offset, point) {
            return Some(hit);
        }
    }

    if idx == doc.root || matches!(node.tag, Tag::Group | Tag::Svg) {
        return None;
    }

    let b = intrinsic_box(doc, idx)?.translate(offset);
    contains(b.to_rect(), point).then_some(idx)
}

/// Edge-inclusive containment, so zero-width lines can still be picked.
fn contains(r: Rect, p: Point) -> bool {
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}

/// Find all visual elements whose canvas box intersects the given region,
/// in document order. Used for marquee (box) selection.
pub fn hit_test_rect(doc: &SceneDocument, region: BBox) -> Vec<NodeIndex> {
    let mut result = Vec::new();
    collect_intersecting(doc, doc.root, Translation::ZERO, region.to_rect(), &mut result);
    result
}

fn collect_intersecting(
    doc: &SceneDocument,
    idx: NodeIndex,
    parent_offset: Translation,
    region: Rect,
    out: &mut Vec<NodeIndex>,
) {
    let node = &doc[idx];
    if node.tag.is_non_visual() {
        return;
    }
    let mut offset = Translation::ZERO;
    if idx != doc.root {
        let own = node.translation();
        offset = Translation::new(parent_offset.dx + own.dx, parent_offset.dy + own.dy);
        if let Some(b) = intrinsic_box(doc, idx)
            && intersects(b.translate(offset).to_rect(), region)
        {
            out.push(idx);
        }
    }

    for &child in doc.children(idx) {
        collect_intersecting(doc, child, offset, region, out);
    }
}

fn intersects(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}
