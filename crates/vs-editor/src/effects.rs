//! Effect applicator: drop shadows on the style layer.

use serde::{Deserialize, Serialize};
use vs_core::geometry::blend_color;
use vs_core::model::*;
use vs_core::NodeIndex;

/// State of the shadow panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowDescriptor {
    pub enabled: bool,
    pub x: f64,
    pub y: f64,
    pub blur: f64,
    pub color: String,
    /// 0–1, blended into the colour's alpha.
    pub opacity: f64,
}

impl Default for ShadowDescriptor {
    fn default() -> Self {
        Self {
            enabled: false,
            x: 0.0,
            y: 4.0,
            blur: 12.0,
            color: "#000000".to_string(),
            opacity: 0.25,
        }
    }
}

impl ShadowDescriptor {
    fn to_effect(&self) -> Effect {
        Effect::DropShadow {
            dx: self.x,
            dy: self.y,
            blur: self.blur.max(0.0),
            color: blend_color(&self.color, self.opacity.clamp(0.0, 1.0)),
        }
    }
}

/// Apply or clear a drop shadow on every element in `selection`.
pub fn set_shadow(doc: &mut SceneDocument, selection: &[NodeIndex], desc: &ShadowDescriptor) -> bool {
    let targets: Vec<NodeIndex> = selection
        .iter()
        .copied()
        .filter(|&n| n != doc.root && doc.contains(n))
        .collect();
    if targets.is_empty() {
        return false;
    }
    for idx in targets {
        if desc.enabled {
            doc.set_presentation(idx, Presentation::Effect(desc.to_effect()));
        } else {
            doc.clear_presentation(idx, PresentationKind::Effect);
        }
    }
    log::debug!("shadow enabled={} on {} nodes", desc.enabled, selection.len());
    true
}

/// Reverse-parse an element's shadow onto the panel state.
///
/// Only offsets and blur are read back; colour and opacity keep their
/// previous panel values. Anything other than a single drop shadow reads
/// as disabled.
pub fn read_shadow(doc: &SceneDocument, idx: NodeIndex, previous: &ShadowDescriptor) -> ShadowDescriptor {
    match doc.presentation(idx, PresentationKind::Effect) {
        Some(Presentation::Effect(Effect::DropShadow { dx, dy, blur, .. })) => ShadowDescriptor {
            enabled: true,
            x: dx,
            y: dy,
            blur,
            ..previous.clone()
        },
        _ => ShadowDescriptor {
            enabled: false,
            ..previous.clone()
        },
    }
}
