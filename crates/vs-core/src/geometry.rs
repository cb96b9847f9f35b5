//! Geometry utility: intrinsic boxes, canvas-space boxes, and the colour
//! conversion used by effect synthesis.
//!
//! Measurement is closed-form per element kind so nothing depends on a
//! live renderer. Failure to measure (missing or degenerate geometry) is a
//! plain `None`; callers treat measurement as best-effort over a set.

use crate::model::*;
use kurbo::{BezPath, Rect, Shape};
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_rect(r: Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn translate(&self, t: Translation) -> Self {
        Self {
            x: self.x + t.dx,
            y: self.y + t.dy,
            ..*self
        }
    }

    pub fn union(&self, other: &BBox) -> BBox {
        BBox::from_rect(self.to_rect().union(other.to_rect()))
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        self.to_rect().contains(kurbo::Point::new(px, py))
            || (px == self.x + self.width && py >= self.y && py <= self.y + self.height)
            || (py == self.y + self.height && px >= self.x && px <= self.x + self.width)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Running min/max accumulator.
#[derive(Debug, Default)]
struct Extent(Option<BBox>);

impl Extent {
    fn add(&mut self, b: BBox) {
        self.0 = Some(match self.0 {
            Some(acc) => acc.union(&b),
            None => b,
        });
    }
}

/// Default font size used for text metrics when none is declared.
const DEFAULT_FONT_SIZE: f64 = 16.0;
/// Average glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f64 = 0.6;

/// The element's own box in its local coordinates, before its own
/// transform. Containers measure as the union of their visual children,
/// each offset by the child's translation.
pub fn intrinsic_box(doc: &SceneDocument, idx: NodeIndex) -> Option<BBox> {
    let node = doc.get(idx)?;
    if node.tag.is_non_visual() {
        return None;
    }
    let b = match &node.tag {
        Tag::Rect => {
            let (w, h) = (node.num("width")?, node.num("height")?);
            if w < 0.0 || h < 0.0 {
                return None;
            }
            BBox::new(num_or_zero(node, "x"), num_or_zero(node, "y"), w, h)
        }
        Tag::Circle => {
            let r = node.num("r")?;
            if r < 0.0 {
                return None;
            }
            let (cx, cy) = (num_or_zero(node, "cx"), num_or_zero(node, "cy"));
            BBox::new(cx - r, cy - r, r * 2.0, r * 2.0)
        }
        Tag::Ellipse => {
            let rx = node.num("rx").or_else(|| node.num("ry"))?;
            let ry = node.num("ry").unwrap_or(rx);
            if rx < 0.0 || ry < 0.0 {
                return None;
            }
            let (cx, cy) = (num_or_zero(node, "cx"), num_or_zero(node, "cy"));
            BBox::new(cx - rx, cy - ry, rx * 2.0, ry * 2.0)
        }
        Tag::Line => {
            let (x1, y1) = (num_or_zero(node, "x1"), num_or_zero(node, "y1"));
            let (x2, y2) = (num_or_zero(node, "x2"), num_or_zero(node, "y2"));
            BBox::from_rect(Rect::new(x1, y1, x2, y2))
        }
        Tag::Polyline | Tag::Polygon => points_box(node.attr("points")?)?,
        Tag::Path => path_box(node.attr("d")?)?,
        Tag::Text => text_box(doc, idx)?,
        _ => {
            // Containers and pass-through elements.
            if let (Some(w), Some(h)) = (node.num("width"), node.num("height"))
                && !matches!(node.tag, Tag::Group | Tag::Svg)
            {
                BBox::new(num_or_zero(node, "x"), num_or_zero(node, "y"), w, h)
            } else {
                children_box(doc, idx)?
            }
        }
    };
    b.is_finite().then_some(b)
}

fn num_or_zero(node: &SceneNode, key: &str) -> f64 {
    node.num(key).unwrap_or(0.0)
}

fn children_box(doc: &SceneDocument, idx: NodeIndex) -> Option<BBox> {
    let mut extent = Extent::default();
    for &child in doc.children(idx) {
        if let Some(b) = intrinsic_box(doc, child) {
            extent.add(b.translate(doc[child].translation()));
        }
    }
    extent.0
}

fn points_box(points: &str) -> Option<BBox> {
    let nums = parse_number_list(points);
    if nums.len() < 2 {
        return None;
    }
    let mut extent = Extent::default();
    for pair in nums.chunks_exact(2) {
        extent.add(BBox::new(pair[0], pair[1], 0.0, 0.0));
    }
    extent.0
}

/// Tight bounds of path data. Unparseable or empty data is a measurement
/// failure.
pub fn path_box(d: &str) -> Option<BBox> {
    let path = match BezPath::from_svg(d) {
        Ok(p) => p,
        Err(e) => {
            log::debug!("unmeasurable path data: {e}");
            return None;
        }
    };
    if path.elements().is_empty() {
        return None;
    }
    Some(BBox::from_rect(path.bounding_box()))
}

/// Estimated text box: glyph count × average advance, one line height.
fn text_box(doc: &SceneDocument, idx: NodeIndex) -> Option<BBox> {
    let node = &doc[idx];
    let content: String = doc
        .descendants(idx)
        .into_iter()
        .filter_map(|n| doc[n].text.as_deref())
        .collect();
    let glyphs = content.trim().chars().count();
    if glyphs == 0 {
        return None;
    }
    let font_size = font_size(node).unwrap_or(DEFAULT_FONT_SIZE);
    let x = node
        .attr("x")
        .and_then(|v| parse_number_list(v).first().copied())
        .unwrap_or(0.0);
    let y = node
        .attr("y")
        .and_then(|v| parse_number_list(v).first().copied())
        .unwrap_or(0.0);
    let width = glyphs as f64 * font_size * GLYPH_ADVANCE;
    let x = match node.attr("text-anchor") {
        Some("middle") => x - width / 2.0,
        Some("end") => x - width,
        _ => x,
    };
    // Baseline sits at `y`; ascent ≈ 0.8em, descent ≈ 0.2em.
    Some(BBox::new(x, y - font_size * 0.8, width, font_size))
}

fn font_size(node: &SceneNode) -> Option<f64> {
    if let Some(size) = node.num("font-size") {
        return Some(size);
    }
    let style = node.attr("style")?;
    parse_style(style)
        .into_iter()
        .find(|(k, _)| k == "font-size")
        .and_then(|(_, v)| parse_length(&v))
}

/// Box in canvas space: the intrinsic box moved by the element's own
/// translation and those of all its ancestors.
pub fn canvas_box(doc: &SceneDocument, idx: NodeIndex) -> Option<BBox> {
    let local = intrinsic_box(doc, idx)?;
    let mut b = local.translate(doc[idx].translation());
    for ancestor in doc.ancestors(idx) {
        if ancestor == doc.root {
            break;
        }
        b = b.translate(doc[ancestor].translation());
    }
    Some(b)
}

/// Union of the canvas boxes of a set of elements. Unmeasurable elements
/// are skipped; `None` when nothing could be measured.
pub fn selection_box(doc: &SceneDocument, nodes: &[NodeIndex]) -> Option<BBox> {
    let mut extent = Extent::default();
    for &idx in nodes {
        match canvas_box(doc, idx) {
            Some(b) => extent.add(b),
            None => log::trace!("skipping unmeasurable node {idx:?}"),
        }
    }
    extent.0
}

/// Blend a colour with an opacity into CSS `rgba()` form. Input that is not
/// a colour at all (`currentColor`, `var(...)`) is returned unchanged.
pub fn blend_color(color: &str, opacity: f64) -> String {
    match Color::parse(color) {
        Some(c) => c.to_rgba_css(opacity as f32),
        None => color.trim().to_string(),
    }
}
