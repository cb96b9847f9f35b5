//! Keyboard bindings for the canvas.
//!
//! Only the structural edits have keys; paint and effect changes come from
//! the panels.

/// Operations a key combination can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Delete,
    Deselect,
    Group,
    Ungroup,
}

/// Key-to-action table. `ctrl` and `meta` are interchangeable so the same
/// bindings work on macOS and elsewhere.
pub struct ShortcutMap;

impl ShortcutMap {
    /// `key` is the DOM `KeyboardEvent.key` value. Unbound combinations
    /// resolve to `None`.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let command = ctrl || meta;
        let is_g = key.eq_ignore_ascii_case("g");

        match (command, shift) {
            (true, true) if is_g => Some(ShortcutAction::Ungroup),
            (true, false) if is_g => Some(ShortcutAction::Group),
            (false, false) => match key {
                "Delete" | "Backspace" => Some(ShortcutAction::Delete),
                "Escape" => Some(ShortcutAction::Deselect),
                _ => None,
            },
            _ => None,
        }
    }
}
