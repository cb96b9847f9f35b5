//! Panel state derived from the current selection.
//!
//! Recomputed after every selection change and every mutation; it is a
//! view of the document and is never written back directly.

use crate::effects::{ShadowDescriptor, read_shadow};
use crate::paint::{GradientDescriptor, read_gradient};
use serde::{Deserialize, Serialize};
use vs_core::geometry::{BBox, selection_box};
use vs_core::layout::{ATTR_LAYOUT, FlexLayout, LayoutDirection};
use vs_core::model::*;
use vs_core::NodeIndex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPanel {
    pub enabled: bool,
    pub direction: LayoutDirection,
    pub gap: f64,
    pub padding: f64,
}

impl Default for LayoutPanel {
    fn default() -> Self {
        let layout = FlexLayout::default();
        Self {
            enabled: false,
            direction: layout.direction,
            gap: layout.gap,
            padding: layout.padding,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inspector {
    pub layout: LayoutPanel,
    pub shadow: ShadowDescriptor,
    pub gradient: GradientDescriptor,
    /// Canvas-space box of the selection; absent when nothing measurable
    /// is selected.
    pub bbox: Option<BBox>,
    /// `id` of each selected element, `None` for anonymous ones.
    pub selected_ids: Vec<Option<String>>,
}

impl Inspector {
    pub fn with_shadow(shadow: ShadowDescriptor) -> Self {
        Self {
            shadow,
            ..Self::default()
        }
    }

    /// Re-derive every panel from `selection`.
    pub fn derive(&mut self, doc: &SceneDocument, selection: &[NodeIndex]) {
        self.derive_layout(doc, selection);

        let first = selection.first().copied().filter(|&n| doc.contains(n));
        self.shadow = match first {
            Some(idx) => read_shadow(doc, idx, &self.shadow),
            None => ShadowDescriptor {
                enabled: false,
                ..self.shadow.clone()
            },
        };
        self.derive_gradient(doc, first);

        self.bbox = selection_box(doc, selection);
        self.selected_ids = selection
            .iter()
            .map(|&n| doc.get(n).and_then(SceneNode::id).map(|id| id.as_str().to_string()))
            .collect();
    }

    fn derive_layout(&mut self, doc: &SceneDocument, selection: &[NodeIndex]) {
        let container = match selection {
            [only] => doc.get(*only).filter(|n| n.tag == Tag::Group),
            _ => None,
        };
        match container {
            Some(node) => {
                let layout = FlexLayout::from_attrs(node);
                self.layout = LayoutPanel {
                    enabled: node.attrs.contains(ATTR_LAYOUT),
                    direction: layout.direction,
                    gap: layout.gap,
                    padding: layout.padding,
                };
            }
            None => self.layout.enabled = false,
        }
    }

    fn derive_gradient(&mut self, doc: &SceneDocument, first: Option<NodeIndex>) {
        let angle = self.gradient.angle;
        let server = first
            .and_then(|idx| doc[idx].fill())
            .and_then(|fill| match fill {
                FillRef::PaintServer(id) => doc.paint_server(id),
                FillRef::Color(_) => None,
            });
        match server.and_then(|s| read_gradient(doc, s, angle)) {
            Some(desc) => self.gradient = desc,
            None => self.gradient.enabled = false,
        }
    }
}
