//! Auto-layout solver.
//!
//! A container carrying layout attributes positions its direct children in
//! a single row or column by rewriting each child's translation. Layout
//! state lives entirely in attributes so it survives serialization:
//!
//! ```text
//! <g data-layout="flex" data-direction="horizontal" data-gap="16" data-padding="16">
//! ```

use crate::geometry::intrinsic_box;
use crate::model::*;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

pub const ATTR_LAYOUT: &str = "data-layout";
pub const ATTR_DIRECTION: &str = "data-direction";
pub const ATTR_GAP: &str = "data-gap";
pub const ATTR_PADDING: &str = "data-padding";

pub const DEFAULT_GAP: f64 = 16.0;
pub const DEFAULT_PADDING: f64 = 16.0;

/// Main axis of a layout container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    /// Children flow left to right.
    #[default]
    Row,
    /// Children flow top to bottom.
    Column,
}

impl LayoutDirection {
    /// Accepts both the serialized form and the CSS-style names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "horizontal" | "row" => Some(LayoutDirection::Row),
            "vertical" | "column" => Some(LayoutDirection::Column),
            _ => None,
        }
    }

    pub fn as_attr(&self) -> &'static str {
        match self {
            LayoutDirection::Row => "horizontal",
            LayoutDirection::Column => "vertical",
        }
    }
}

/// Layout parameters of a container, as stored in its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlexLayout {
    pub direction: LayoutDirection,
    pub gap: f64,
    pub padding: f64,
}

impl Default for FlexLayout {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::Row,
            gap: DEFAULT_GAP,
            padding: DEFAULT_PADDING,
        }
    }
}

impl FlexLayout {
    /// Read the layout of a node. `None` unless the node is a container with
    /// the layout marker; missing parameters take their defaults.
    pub fn read(node: &SceneNode) -> Option<Self> {
        if node.tag != Tag::Group || !node.attrs.contains(ATTR_LAYOUT) {
            return None;
        }
        Some(Self::from_attrs(node))
    }

    /// Read the layout parameters regardless of the marker, with defaults
    /// for anything missing or invalid.
    pub fn from_attrs(node: &SceneNode) -> Self {
        let defaults = FlexLayout::default();
        Self {
            direction: node
                .attr(ATTR_DIRECTION)
                .and_then(LayoutDirection::parse)
                .unwrap_or(defaults.direction),
            gap: node
                .num(ATTR_GAP)
                .filter(|g| *g >= 0.0)
                .unwrap_or(defaults.gap),
            padding: node
                .num(ATTR_PADDING)
                .filter(|p| *p >= 0.0)
                .unwrap_or(defaults.padding),
        }
    }

    /// Write all four layout attributes onto a node.
    pub fn write(&self, doc: &mut SceneDocument, idx: NodeIndex) {
        doc.set_attr(idx, ATTR_LAYOUT, "flex");
        doc.set_attr(idx, ATTR_DIRECTION, self.direction.as_attr());
        doc.set_attr(idx, ATTR_GAP, format_num(self.gap));
        doc.set_attr(idx, ATTR_PADDING, format_num(self.padding));
    }
}

/// Remove every layout attribute from a node.
pub fn clear_layout(doc: &mut SceneDocument, idx: NodeIndex) {
    for key in [ATTR_LAYOUT, ATTR_DIRECTION, ATTR_GAP, ATTR_PADDING] {
        doc.remove_attr(idx, key);
    }
}

/// Reposition the direct children of a layout container.
///
/// Returns the number of children that were positioned; children that
/// cannot be measured are skipped without stopping the pass. A node
/// without layout is left untouched and yields 0.
pub fn apply_layout(doc: &mut SceneDocument, container: NodeIndex) -> usize {
    let Some(layout) = doc.get(container).and_then(FlexLayout::read) else {
        return 0;
    };

    let children: Vec<NodeIndex> = doc
        .children(container)
        .iter()
        .copied()
        .filter(|&c| !doc[c].tag.is_non_visual())
        .collect();

    let mut offset = layout.padding;
    let mut positioned = 0;
    for child in children {
        let Some(b) = intrinsic_box(doc, child) else {
            log::trace!("layout: skipping unmeasurable child {child:?}");
            continue;
        };
        let (translation, advance) = match layout.direction {
            LayoutDirection::Row => (Translation::new(offset, layout.padding), b.width),
            LayoutDirection::Column => (Translation::new(layout.padding, offset), b.height),
        };
        log::trace!("layout: {child:?} → {translation:?}");
        doc.set_translation(child, translation);
        offset += advance + layout.gap;
        positioned += 1;
    }
    positioned
}
