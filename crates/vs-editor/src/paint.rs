//! Paint synthesizer: gradient paint servers bound to element fills.
//!
//! Paint servers live in the document's definitions container. An element
//! with an `id` always resolves to the server `grad-<id>`, so repeated
//! edits mutate one server instead of piling up new ones. Before the first
//! binding, the element's fill is recorded in [`ATTR_ORIGINAL_FILL`] so
//! disabling the gradient can put it back.

use crate::config::EditorConfig;
use serde::{Deserialize, Serialize};
use vs_core::id::{IdSource, NodeId};
use vs_core::model::*;
use vs_core::NodeIndex;

/// Attribute recording the fill an element had before a gradient was
/// bound. An empty value means the element had no fill.
pub const ATTR_ORIGINAL_FILL: &str = "data-original-fill";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

impl GradientKind {
    pub fn tag(&self) -> Tag {
        match self {
            GradientKind::Linear => Tag::LinearGradient,
            GradientKind::Radial => Tag::RadialGradient,
        }
    }

    pub fn from_tag(tag: &Tag) -> Option<Self> {
        match tag {
            Tag::LinearGradient => Some(GradientKind::Linear),
            Tag::RadialGradient => Some(GradientKind::Radial),
            _ => None,
        }
    }
}

/// A colour stop. `offset` is an integer percentage; stops need not be
/// sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: u8,
    pub color: String,
}

impl GradientStop {
    pub fn new(offset: u8, color: impl Into<String>) -> Self {
        Self {
            offset: offset.min(100),
            color: color.into(),
        }
    }
}

/// Fields to merge into an existing stop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopPatch {
    pub offset: Option<u8>,
    pub color: Option<String>,
}

/// State of the gradient panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientDescriptor {
    pub enabled: bool,
    pub kind: GradientKind,
    /// Degrees, linear gradients only.
    pub angle: f64,
    pub stops: Vec<GradientStop>,
}

impl Default for GradientDescriptor {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: GradientKind::Linear,
            angle: 90.0,
            stops: vec![
                GradientStop::new(0, "#000000"),
                GradientStop::new(100, "#FFFFFF"),
            ],
        }
    }
}

impl GradientDescriptor {
    /// Merge `patch` into the stop at `index`.
    pub fn patch_stop(&mut self, index: usize, patch: StopPatch) -> bool {
        let Some(stop) = self.stops.get_mut(index) else {
            return false;
        };
        if let Some(offset) = patch.offset {
            stop.offset = offset.min(100);
        }
        if let Some(color) = patch.color {
            stop.color = color;
        }
        true
    }

    pub fn add_stop(&mut self, color: &str) {
        self.stops.push(GradientStop::new(100, color));
    }

    /// Remove the stop at `index`, refusing to go below two stops.
    pub fn remove_stop(&mut self, index: usize) -> bool {
        if self.stops.len() <= 2 || index >= self.stops.len() {
            return false;
        }
        self.stops.remove(index);
        true
    }
}

/// Linear endpoints `(x1, y1, x2, y2)` in percent for an angle in degrees.
///
/// `y2` deliberately uses the cosine like `x2`; existing documents were
/// authored against this convention.
pub fn linear_endpoints(angle: f64) -> (f64, f64, f64, f64) {
    let theta = angle.to_radians();
    let (sin, cos) = theta.sin_cos();
    (
        50.0 - 50.0 * cos,
        50.0 - 50.0 * sin,
        50.0 + 50.0 * cos,
        50.0 + 50.0 * cos,
    )
}

fn percent(n: f64) -> String {
    format!("{}%", format_num(n))
}

/// Apply a gradient descriptor to every element in `selection`.
///
/// Disabled descriptors restore each element's recorded fill (or the
/// configured fallback). Returns `false` for an empty selection.
pub fn set_gradient(
    doc: &mut SceneDocument,
    selection: &[NodeIndex],
    desc: &GradientDescriptor,
    ids: &mut dyn IdSource,
    config: &EditorConfig,
) -> bool {
    let targets: Vec<NodeIndex> = selection
        .iter()
        .copied()
        .filter(|&n| n != doc.root && doc.contains(n))
        .collect();
    if targets.is_empty() {
        return false;
    }

    if !desc.enabled {
        for idx in targets {
            restore_fill(doc, idx, config);
        }
        return true;
    }

    let defs = doc.ensure_defs();
    for idx in targets {
        let server_id = resolve_server_id(doc, idx, ids, config);
        record_original_fill(doc, idx, &server_id);
        let server = ensure_server(doc, defs, &server_id, desc.kind);
        write_server(doc, server, desc);
        doc.set_presentation(
            idx,
            Presentation::Fill(FillRef::PaintServer(NodeId::intern(&server_id))),
        );
        log::debug!("bound {idx:?} fill to #{server_id}");
    }
    true
}

fn restore_fill(doc: &mut SceneDocument, idx: NodeIndex, config: &EditorConfig) {
    let recorded = doc
        .remove_attr(idx, ATTR_ORIGINAL_FILL)
        .filter(|f| !f.is_empty());
    let fill = recorded.unwrap_or_else(|| config.fallback_fill.clone());
    log::debug!("restoring fill {fill} on {idx:?}");
    doc.set_presentation(idx, Presentation::Fill(FillRef::parse(&fill)));
}

/// `grad-<id>` for elements with an id. Id-less elements keep the server
/// they were bound to earlier, otherwise draw a fresh id.
fn resolve_server_id(
    doc: &SceneDocument,
    idx: NodeIndex,
    ids: &mut dyn IdSource,
    config: &EditorConfig,
) -> String {
    let node = &doc[idx];
    if let Some(id) = node.id() {
        let candidate = format!("{}-{}", config.gradient_id_prefix, id.as_str());
        // Taken by something that is not a paint server: cannot reuse it.
        let usable = match doc.find_by_id(NodeId::intern(&candidate)) {
            Some(existing) => doc[existing].tag.is_paint_server(),
            None => true,
        };
        if usable {
            return candidate;
        }
    } else if node.attrs.contains(ATTR_ORIGINAL_FILL)
        && let Some(FillRef::PaintServer(bound)) = node.fill()
        && doc.paint_server(bound).is_some()
    {
        return bound.as_str().to_string();
    }
    doc.fresh_id(ids, &config.gradient_id_prefix)
}

/// Record the current fill unless one is already recorded. A fill that
/// already points at the target server is ours and is not recorded.
fn record_original_fill(doc: &mut SceneDocument, idx: NodeIndex, server_id: &str) {
    let node = &doc[idx];
    if node.attrs.contains(ATTR_ORIGINAL_FILL) {
        return;
    }
    let current = match node.fill() {
        Some(FillRef::PaintServer(id)) if id.as_str() == server_id => String::new(),
        Some(fill) => fill.to_attr(),
        None => String::new(),
    };
    doc.set_attr(idx, ATTR_ORIGINAL_FILL, current);
}

/// Find the server with `id` under the definitions container, creating it
/// or swapping its kind in place as needed.
fn ensure_server(
    doc: &mut SceneDocument,
    defs: NodeIndex,
    id: &str,
    kind: GradientKind,
) -> NodeIndex {
    let fresh = || SceneNode::new(kind.tag()).with_attr("id", id);
    match doc.find_by_id(NodeId::intern(id)) {
        Some(existing) if doc[existing].tag == kind.tag() => {
            if doc.parent(existing) != Some(defs) {
                let len = doc.children(defs).len();
                doc.move_node(existing, defs, len);
            }
            existing
        }
        Some(existing) => {
            log::debug!("replacing paint server #{id} with {kind:?}");
            doc.replace_node(existing, fresh());
            if doc.parent(existing) != Some(defs) {
                let len = doc.children(defs).len();
                doc.move_node(existing, defs, len);
            }
            existing
        }
        None => doc.append_child(defs, fresh()),
    }
}

fn write_server(doc: &mut SceneDocument, server: NodeIndex, desc: &GradientDescriptor) {
    match desc.kind {
        GradientKind::Linear => {
            let (x1, y1, x2, y2) = linear_endpoints(desc.angle);
            doc.set_attr(server, "x1", percent(x1));
            doc.set_attr(server, "y1", percent(y1));
            doc.set_attr(server, "x2", percent(x2));
            doc.set_attr(server, "y2", percent(y2));
        }
        GradientKind::Radial => {
            for key in ["cx", "cy", "r"] {
                doc.set_attr(server, key, "50%");
            }
        }
    }

    doc.clear_children(server);
    for stop in &desc.stops {
        doc.append_child(
            server,
            SceneNode::new(Tag::Stop)
                .with_attr("offset", format!("{}%", stop.offset.min(100)))
                .with_attr("stop-color", stop.color.as_str()),
        );
    }
}

/// Read a paint server back into a descriptor. The angle cannot be
/// recovered from endpoints, so `angle` is passed through.
pub fn read_gradient(
    doc: &SceneDocument,
    server: NodeIndex,
    angle: f64,
) -> Option<GradientDescriptor> {
    let kind = GradientKind::from_tag(&doc.get(server)?.tag)?;
    let stops = doc
        .children(server)
        .iter()
        .filter(|&&c| doc[c].tag == Tag::Stop)
        .map(|&c| read_stop(&doc[c]))
        .collect();
    Some(GradientDescriptor {
        enabled: true,
        kind,
        angle,
        stops,
    })
}

fn read_stop(node: &SceneNode) -> GradientStop {
    let offset = node
        .attr("offset")
        .and_then(|o| {
            let o = o.trim();
            match o.strip_suffix('%') {
                Some(pct) => pct.trim().parse::<f64>().ok(),
                None => o.parse::<f64>().ok().map(|f| f * 100.0),
            }
        })
        .unwrap_or(0.0)
        .round()
        .clamp(0.0, 100.0) as u8;
    let color = node
        .attr("stop-color")
        .map(str::to_string)
        .or_else(|| {
            let style = node.attr("style")?;
            parse_style(style)
                .into_iter()
                .find(|(k, _)| k == "stop-color")
                .map(|(_, v)| v)
        })
        .unwrap_or_else(|| "#000000".to_string());
    GradientStop { offset, color }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vs_core::id::SequentialIds;
    use vs_core::parser::parse_document;

    const DOC: &str = r##"<svg width="200" height="200">
  <rect id="a" width="10" height="10" fill="#FF0000"/>
  <rect width="10" height="10" fill="#00FF00"/>
  <rect id="c" width="10" height="10"/>
</svg>"##;

    fn enabled(kind: GradientKind, angle: f64) -> GradientDescriptor {
        GradientDescriptor {
            enabled: true,
            kind,
            angle,
            stops: vec![
                GradientStop::new(0, "#111111"),
                GradientStop::new(100, "#FFFFFF"),
            ],
        }
    }

    fn node(doc: &SceneDocument, id: &str) -> NodeIndex {
        doc.find_by_id(NodeId::intern(id)).unwrap()
    }

    #[test]
    fn linear_endpoints_at_90_degrees() {
        let (x1, y1, x2, y2) = linear_endpoints(90.0);
        assert_eq!(
            [x1, y1, x2, y2].map(format_num),
            ["50", "0", "50", "50"].map(String::from)
        );
    }

    #[test]
    fn enabling_creates_server_and_binds_fill() {
        let mut doc = parse_document(DOC).unwrap();
        let a = node(&doc, "a");
        let mut ids = SequentialIds::new();
        let config = EditorConfig::default();

        assert!(set_gradient(&mut doc, &[a], &enabled(GradientKind::Linear, 0.0), &mut ids, &config));

        let defs = doc.defs().unwrap();
        assert_eq!(doc.children(doc.root)[0], defs);
        let server = doc.paint_server(NodeId::intern("grad-a")).unwrap();
        assert_eq!(doc[server].tag, Tag::LinearGradient);
        assert_eq!(doc[server].attr("x1"), Some("0%"));
        assert_eq!(doc[server].attr("y1"), Some("50%"));
        assert_eq!(doc[server].attr("x2"), Some("100%"));
        assert_eq!(doc[server].attr("y2"), Some("100%"));
        assert_eq!(doc.children(server).len(), 2);
        assert_eq!(doc[a].attr("fill"), Some("url(#grad-a)"));
        assert_eq!(doc[a].attr(ATTR_ORIGINAL_FILL), Some("#FF0000"));
    }

    #[test]
    fn repeated_calls_reuse_server_and_keep_original() {
        let mut doc = parse_document(DOC).unwrap();
        let a = node(&doc, "a");
        let mut ids = SequentialIds::new();
        let config = EditorConfig::default();

        set_gradient(&mut doc, &[a], &enabled(GradientKind::Linear, 0.0), &mut ids, &config);
        let count = doc.node_count();
        set_gradient(&mut doc, &[a], &enabled(GradientKind::Linear, 45.0), &mut ids, &config);

        assert_eq!(doc.node_count(), count);
        assert_eq!(doc[a].attr("fill"), Some("url(#grad-a)"));
        assert_eq!(doc[a].attr(ATTR_ORIGINAL_FILL), Some("#FF0000"));
    }

    #[test]
    fn disable_then_enable_restores_original() {
        let mut doc = parse_document(DOC).unwrap();
        let a = node(&doc, "a");
        let mut ids = SequentialIds::new();
        let config = EditorConfig::default();
        let on = enabled(GradientKind::Linear, 90.0);
        let off = GradientDescriptor { enabled: false, ..on.clone() };

        set_gradient(&mut doc, &[a], &on, &mut ids, &config);
        set_gradient(&mut doc, &[a], &off, &mut ids, &config);
        assert_eq!(doc[a].attr("fill"), Some("#FF0000"));
        assert_eq!(doc[a].attr(ATTR_ORIGINAL_FILL), None);

        set_gradient(&mut doc, &[a], &on, &mut ids, &config);
        assert_eq!(doc[a].attr("fill"), Some("url(#grad-a)"));
        set_gradient(&mut doc, &[a], &off, &mut ids, &config);
        assert_eq!(doc[a].attr("fill"), Some("#FF0000"));
    }

    #[test]
    fn missing_original_falls_back_to_neutral() {
        let mut doc = parse_document(DOC).unwrap();
        let c = node(&doc, "c");
        let mut ids = SequentialIds::new();
        let config = EditorConfig::default();

        set_gradient(&mut doc, &[c], &enabled(GradientKind::Radial, 0.0), &mut ids, &config);
        assert_eq!(doc[c].attr(ATTR_ORIGINAL_FILL), Some(""));
        set_gradient(&mut doc, &[c], &GradientDescriptor::default(), &mut ids, &config);
        assert_eq!(doc[c].attr("fill"), Some("#CCCCCC"));
    }

    #[test]
    fn wrong_kind_is_replaced_in_place() {
        let mut doc = parse_document(DOC).unwrap();
        let a = node(&doc, "a");
        let mut ids = SequentialIds::new();
        let config = EditorConfig::default();

        set_gradient(&mut doc, &[a], &enabled(GradientKind::Linear, 0.0), &mut ids, &config);
        let linear = doc.paint_server(NodeId::intern("grad-a")).unwrap();
        set_gradient(&mut doc, &[a], &enabled(GradientKind::Radial, 0.0), &mut ids, &config);
        let radial = doc.paint_server(NodeId::intern("grad-a")).unwrap();

        assert_eq!(linear, radial);
        assert_eq!(doc[radial].tag, Tag::RadialGradient);
        assert_eq!(doc[radial].attr("cx"), Some("50%"));
        assert_eq!(doc[radial].attr("x1"), None);
    }

    #[test]
    fn idless_elements_keep_their_server() {
        let mut doc = parse_document(DOC).unwrap();
        let anon = doc.children(doc.root)[1];
        let mut ids = SequentialIds::new();
        let config = EditorConfig::default();

        set_gradient(&mut doc, &[anon], &enabled(GradientKind::Linear, 0.0), &mut ids, &config);
        assert_eq!(doc[anon].attr("fill"), Some("url(#grad-1)"));
        set_gradient(&mut doc, &[anon], &enabled(GradientKind::Linear, 30.0), &mut ids, &config);
        assert_eq!(doc[anon].attr("fill"), Some("url(#grad-1)"));
        assert_eq!(doc[anon].attr(ATTR_ORIGINAL_FILL), Some("#00FF00"));
    }

    #[test]
    fn empty_selection_is_rejected() {
        let mut doc = parse_document(DOC).unwrap();
        let before = doc.node_count();
        assert!(!set_gradient(
            &mut doc,
            &[],
            &enabled(GradientKind::Linear, 0.0),
            &mut SequentialIds::new(),
            &EditorConfig::default()
        ));
        assert_eq!(doc.node_count(), before);
        assert!(doc.defs().is_none());
    }

    #[test]
    fn stop_floor() {
        let mut desc = enabled(GradientKind::Linear, 0.0);
        assert!(!desc.remove_stop(0));
        desc.add_stop("#FFFFFF");
        assert_eq!(desc.stops[2], GradientStop::new(100, "#FFFFFF"));
        assert!(desc.remove_stop(0));
        assert!(!desc.remove_stop(0));
        assert_eq!(desc.stops.len(), 2);
    }

    #[test]
    fn patch_stop_merges_fields() {
        let mut desc = enabled(GradientKind::Linear, 0.0);
        assert!(desc.patch_stop(
            1,
            StopPatch {
                offset: Some(60),
                color: None
            }
        ));
        assert_eq!(desc.stops[1], GradientStop::new(60, "#FFFFFF"));
        assert!(!desc.patch_stop(5, StopPatch::default()));
    }

    #[test]
    fn read_back_server() {
        let doc = parse_document(
            r##"<svg><defs><radialGradient id="r"><stop offset="0.25" style="stop-color: #123456"/><stop offset="80%" stop-color="red"/></radialGradient></defs></svg>"##,
        )
        .unwrap();
        let r = doc.paint_server(NodeId::intern("r")).unwrap();
        let desc = read_gradient(&doc, r, 33.0).unwrap();
        assert_eq!(desc.kind, GradientKind::Radial);
        assert_eq!(desc.angle, 33.0);
        assert_eq!(
            desc.stops,
            vec![GradientStop::new(25, "#123456"), GradientStop::new(80, "red")]
        );
    }
}
