//! Serialization sync: scene → canonical text.
//!
//! The canonical text is the only form export, copy, and source views
//! consume. It is republished from the whole document after every
//! mutation, so it can never lag behind the tree.

use vs_core::emitter::emit_document;
use vs_core::model::SceneDocument;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalText {
    text: String,
    /// Bumped on every publish that changed the text.
    revision: u64,
}

impl CanonicalText {
    pub fn from_document(doc: &SceneDocument) -> Self {
        Self {
            text: emit_document(doc),
            revision: 0,
        }
    }

    /// Re-serialize the document. Returns whether the text changed.
    pub fn publish(&mut self, doc: &SceneDocument) -> bool {
        let text = emit_document(doc);
        if text == self.text {
            return false;
        }
        self.text = text;
        self.revision += 1;
        log::debug!("published revision {} ({} bytes)", self.revision, self.text.len());
        true
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
