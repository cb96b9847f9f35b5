//! WASM bridge for Vector Studio. Exposes the editor session to the
//! browser studio.
//!
//! Compiled via `wasm-pack build --target web`. Panels only talk to the
//! document through [`StudioCanvas`]; structured values cross the
//! boundary as JSON strings.

use vs_core::layout::LayoutDirection;
use vs_editor::shortcuts::{ShortcutAction, ShortcutMap};
use vs_editor::{
    EditorConfig, EditorSession, GradientDescriptor, LayoutProperty, ShadowDescriptor, StopPatch,
};
use wasm_bindgen::prelude::*;

/// The canvas controller held by the studio page.
#[wasm_bindgen]
pub struct StudioCanvas {
    session: EditorSession,
}

#[wasm_bindgen]
impl StudioCanvas {
    /// Create an empty canvas. `config_json` may be empty for defaults;
    /// unknown or missing fields fall back to their defaults too.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Self {
        let config = if config_json.trim().is_empty() {
            EditorConfig::default()
        } else {
            serde_json::from_str(config_json).unwrap_or_else(|e| {
                log::warn!("ignoring editor config: {e}");
                EditorConfig::default()
            })
        };
        Self {
            session: EditorSession::new(config),
        }
    }

    /// Install a new vector document. Returns `{"ok":true}` or
    /// `{"ok":false,"error":"..."}`; on error the previous scene stays.
    pub fn load(&mut self, text: &str) -> String {
        match self.session.load(text) {
            Ok(()) => r#"{"ok":true}"#.to_string(),
            Err(e) => error_json(&e),
        }
    }

    /// The canonical serialized document.
    pub fn get_text(&self) -> String {
        self.session.text().to_string()
    }

    /// Bumped whenever the canonical text changes.
    pub fn revision(&self) -> f64 {
        self.session.revision() as f64
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Click at canvas coordinates. Returns true if the selection changed.
    pub fn pointer_down(&mut self, x: f64, y: f64, shift: bool) -> bool {
        self.session.pointer_down(x, y, shift)
    }

    /// Select elements by a JSON array of ids. Returns how many were
    /// selected. Malformed input leaves the selection alone and yields 0.
    pub fn select_ids(&mut self, ids_json: &str) -> u32 {
        match serde_json::from_str::<Vec<String>>(ids_json) {
            Ok(ids) => self.session.select_ids(&ids) as u32,
            Err(e) => {
                log::warn!("select_ids: invalid id list: {e}");
                0
            }
        }
    }

    pub fn deselect(&mut self) -> bool {
        self.session.deselect()
    }

    // ─── Structure ───────────────────────────────────────────────────────

    pub fn group(&mut self) -> bool {
        self.session.group()
    }

    pub fn ungroup(&mut self) -> bool {
        self.session.ungroup()
    }

    /// Edit one layout field of the selected container.
    /// `prop` is `enabled`, `direction`, `gap` or `padding`.
    pub fn set_layout(&mut self, prop: &str, value: &str) -> bool {
        match parse_layout_property(prop, value) {
            Some(prop) => self.session.set_layout_property(prop),
            None => {
                log::warn!("bad layout property {prop}={value}");
                false
            }
        }
    }

    /// Delete the selected elements.
    pub fn delete(&mut self) -> bool {
        self.session.delete_selection()
    }

    // ─── Paint and effects ───────────────────────────────────────────────

    /// Apply a gradient descriptor given as JSON.
    pub fn set_gradient(&mut self, json: &str) -> bool {
        match serde_json::from_str::<GradientDescriptor>(json) {
            Ok(desc) => self.session.set_gradient(desc),
            Err(e) => {
                log::warn!("bad gradient descriptor: {e}");
                false
            }
        }
    }

    /// Patch one stop. `patch_json` is `{"offset":N}`, `{"color":"#..."}`
    /// or both.
    pub fn set_gradient_stop(&mut self, index: usize, patch_json: &str) -> bool {
        match serde_json::from_str::<StopPatch>(patch_json) {
            Ok(patch) => self.session.set_gradient_stop(index, patch),
            Err(e) => {
                log::warn!("bad stop patch: {e}");
                false
            }
        }
    }

    pub fn add_gradient_stop(&mut self) -> bool {
        self.session.add_gradient_stop()
    }

    pub fn remove_gradient_stop(&mut self, index: usize) -> bool {
        self.session.remove_gradient_stop(index)
    }

    /// Apply a shadow descriptor given as JSON.
    pub fn set_shadow(&mut self, json: &str) -> bool {
        match serde_json::from_str::<ShadowDescriptor>(json) {
            Ok(desc) => self.session.set_shadow(desc),
            Err(e) => {
                log::warn!("bad shadow descriptor: {e}");
                false
            }
        }
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"changed":bool, "action":"<action_name>"}`
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let action = match ShortcutMap::resolve(key, ctrl, shift, alt, meta) {
            Some(a) => a,
            None => return r#"{"changed":false,"action":"none"}"#.to_string(),
        };
        let changed = self.session.handle_key(key, ctrl, shift, alt, meta);
        let action_name = action_to_name(action);
        format!(r#"{{"changed":{changed},"action":"{action_name}"}}"#)
    }

    // ─── Panels and export ───────────────────────────────────────────────

    /// The derived panel state as JSON.
    pub fn inspector_json(&self) -> String {
        serde_json::to_string(self.session.inspector()).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn export_data_uri(&self) -> String {
        self.session.export_data_uri()
    }

    /// Suggested name for the download link.
    pub fn export_file_name(&self) -> String {
        self.session.export_file_name()
    }
}

fn parse_layout_property(prop: &str, value: &str) -> Option<LayoutProperty> {
    let value = value.trim();
    match prop {
        "enabled" => value.parse().ok().map(LayoutProperty::Enabled),
        "direction" => LayoutDirection::parse(value).map(LayoutProperty::Direction),
        "gap" => value.parse().ok().map(LayoutProperty::Gap),
        "padding" => value.parse().ok().map(LayoutProperty::Padding),
        _ => None,
    }
}

fn action_to_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::Delete => "delete",
        ShortcutAction::Deselect => "deselect",
        ShortcutAction::Group => "group",
        ShortcutAction::Ungroup => "ungroup",
    }
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "ok": false, "error": message }).to_string()
}

// ─── Standalone validation (no canvas needed) ────────────────────────────

/// Validate vector markup. Returns JSON: `{"ok":true}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate(source: &str) -> String {
    match vs_core::parse_document(source) {
        Ok(_) => r#"{"ok":true}"#.to_string(),
        Err(e) => error_json(&e),
    }
}
