//! Editor session: the scene document, its canonical text, the selection,
//! and the derived panels, kept consistent across every operation.
//!
//! Each public mutation either leaves the document untouched (failed
//! precondition, returns `false`) or finishes by republishing the text and
//! re-deriving the inspector before it returns.

use crate::config::EditorConfig;
use crate::effects::{self, ShadowDescriptor};
use crate::export;
use crate::grouping::{self, LayoutProperty};
use crate::input::InputEvent;
use crate::inspect::Inspector;
use crate::paint::{self, GradientDescriptor, StopPatch};
use crate::selection::{Selection, eligible_target, is_selectable_node};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::sync::CanonicalText;
use vs_core::id::{IdSource, NodeId, UuidIds};
use vs_core::model::{SceneDocument, Tag};
use vs_core::parser::parse_document;
use vs_core::NodeIndex;

pub struct EditorSession {
    doc: SceneDocument,
    text: CanonicalText,
    selection: Selection,
    inspector: Inspector,
    ids: Box<dyn IdSource>,
    config: EditorConfig,
}

impl EditorSession {
    /// Empty canvas with random identifiers.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_ids(config, Box::new(UuidIds))
    }

    pub fn with_ids(config: EditorConfig, ids: Box<dyn IdSource>) -> Self {
        let doc = SceneDocument::default();
        Self {
            text: CanonicalText::from_document(&doc),
            doc,
            selection: Selection::new(),
            inspector: Inspector::with_shadow(config.shadow.clone()),
            ids,
            config,
        }
    }

    pub fn from_text(text: &str, config: EditorConfig) -> Result<Self, String> {
        let mut session = Self::new(config);
        session.load(text)?;
        Ok(session)
    }

    /// Replace the scene with a new document. The text is parsed first; on
    /// failure the current scene stays as it was.
    pub fn load(&mut self, text: &str) -> Result<(), String> {
        let doc = parse_document(text)?;
        log::debug!("loaded scene with {} nodes", doc.node_count());
        self.doc = doc;
        self.selection.clear();
        self.inspector = Inspector::with_shadow(self.config.shadow.clone());
        self.commit();
        Ok(())
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn document(&self) -> &SceneDocument {
        &self.doc
    }

    /// The canonical serialized document.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn revision(&self) -> u64 {
        self.text.revision()
    }

    pub fn selection(&self) -> &[NodeIndex] {
        self.selection.as_slice()
    }

    pub fn inspector(&self) -> &Inspector {
        &self.inspector
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Apply a click on `target` (already climbed to an eligible node, or
    /// `None` for empty canvas).
    pub fn select_at(&mut self, target: Option<NodeIndex>, additive: bool) -> bool {
        let changed = self.selection.select_at(&self.doc, target, additive);
        if changed {
            self.derive();
        }
        changed
    }

    /// Hit-test a canvas position and select what is under it.
    pub fn pointer_down(&mut self, x: f64, y: f64, additive: bool) -> bool {
        let target = vs_render::hit_test(&self.doc, x, y).map(|hit| eligible_target(&self.doc, hit));
        self.select_at(target, additive)
    }

    /// Replace the selection with the elements carrying `ids`, in order.
    /// Unknown ids and elements that cannot be selected (paint servers,
    /// definitions, text runs, the root) are skipped; returns how many
    /// were selected.
    pub fn select_ids<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let nodes: Vec<NodeIndex> = ids
            .iter()
            .filter_map(|id| self.doc.find_by_id(NodeId::intern(id.as_ref())))
            .filter(|&n| is_selectable_node(&self.doc, n))
            .collect();
        let found = nodes.len();
        self.selection.replace(nodes);
        self.derive();
        found
    }

    pub fn deselect(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.selection.clear();
        self.derive();
        true
    }

    /// Route an input event. Returns whether anything changed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y, shift } => self.pointer_down(*x, *y, *shift),
            InputEvent::Key {
                key,
                ctrl,
                shift,
                alt,
                meta,
            } => self.handle_key(key, *ctrl, *shift, *alt, *meta),
            InputEvent::PointerMove { .. } | InputEvent::PointerUp { .. } => false,
        }
    }

    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> bool {
        match ShortcutMap::resolve(key, ctrl, shift, alt, meta) {
            Some(ShortcutAction::Delete) => self.delete_selection(),
            Some(ShortcutAction::Deselect) => self.deselect(),
            Some(ShortcutAction::Group) => self.group(),
            Some(ShortcutAction::Ungroup) => self.ungroup(),
            None => false,
        }
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    pub fn group(&mut self) -> bool {
        let Some(container) = grouping::group(
            &mut self.doc,
            self.selection.as_slice(),
            self.ids.as_mut(),
            &self.config,
        ) else {
            return false;
        };
        self.selection.replace([container]);
        self.commit();
        true
    }

    pub fn ungroup(&mut self) -> bool {
        let Some(children) = grouping::ungroup(&mut self.doc, self.selection.as_slice()) else {
            return false;
        };
        self.selection.replace(children);
        self.commit();
        true
    }

    /// Edit the layout of the selected container. Requires exactly one
    /// selected node.
    pub fn set_layout_property(&mut self, prop: LayoutProperty) -> bool {
        let Some(container) = self.selection.single() else {
            return false;
        };
        if !grouping::set_layout_property(&mut self.doc, container, prop) {
            return false;
        }
        self.commit();
        true
    }

    pub fn set_gradient(&mut self, desc: GradientDescriptor) -> bool {
        self.inspector.gradient = desc.clone();
        if !paint::set_gradient(
            &mut self.doc,
            self.selection.as_slice(),
            &desc,
            self.ids.as_mut(),
            &self.config,
        ) {
            return false;
        }
        self.commit();
        true
    }

    pub fn set_gradient_stop(&mut self, index: usize, patch: StopPatch) -> bool {
        let mut desc = self.inspector.gradient.clone();
        desc.patch_stop(index, patch) && self.resynthesize(desc)
    }

    pub fn add_gradient_stop(&mut self) -> bool {
        let mut desc = self.inspector.gradient.clone();
        desc.add_stop(&self.config.default_stop_color);
        self.resynthesize(desc)
    }

    pub fn remove_gradient_stop(&mut self, index: usize) -> bool {
        let mut desc = self.inspector.gradient.clone();
        desc.remove_stop(index) && self.resynthesize(desc)
    }

    /// Stop edits on a disabled gradient only update the panel; applying a
    /// disabled descriptor would restore fills.
    fn resynthesize(&mut self, desc: GradientDescriptor) -> bool {
        if desc.enabled {
            self.set_gradient(desc)
        } else {
            self.inspector.gradient = desc;
            true
        }
    }

    pub fn set_shadow(&mut self, desc: ShadowDescriptor) -> bool {
        self.inspector.shadow = desc.clone();
        if !effects::set_shadow(&mut self.doc, self.selection.as_slice(), &desc) {
            return false;
        }
        self.commit();
        true
    }

    /// Remove every selected subtree.
    pub fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let mut parents = Vec::new();
        for &idx in self.selection.as_slice() {
            if let Some(parent) = self.doc.parent(idx)
                && !parents.contains(&parent)
            {
                parents.push(parent);
            }
            self.doc.remove_subtree(idx);
        }
        grouping::relayout(&mut self.doc, &parents);
        log::debug!("deleted {} nodes", self.selection.len());
        self.selection.clear();
        self.commit();
        true
    }

    // ─── Export ──────────────────────────────────────────────────────────

    pub fn export_base64(&self) -> String {
        export::to_base64(self.text())
    }

    pub fn export_data_uri(&self) -> String {
        export::to_data_uri(self.text())
    }

    /// Download name taken from the document's top-level `<title>`.
    pub fn export_file_name(&self) -> String {
        let doc = &self.doc;
        let title = doc
            .children(doc.root)
            .iter()
            .find(|&&c| doc[c].tag == Tag::Title)
            .map(|&t| {
                doc.descendants(t)
                    .into_iter()
                    .filter_map(|n| doc[n].text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default();
        export::file_name(&title)
    }

    // ─── Internal ────────────────────────────────────────────────────────

    fn derive(&mut self) {
        self.inspector.derive(&self.doc, self.selection.as_slice());
    }

    /// Republish the canonical text and re-derive the panels.
    fn commit(&mut self) {
        self.text.publish(&self.doc);
        self.derive();
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
