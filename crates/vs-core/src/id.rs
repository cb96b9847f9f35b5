use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Process-wide interner for element ids.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned `id` attribute value.
/// Copy-sized handle; equality and hashing never touch the string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Spur);

impl NodeId {
    /// Intern a new string as a NodeId, or return existing if already interned.
    pub fn intern(s: &str) -> Self {
        NodeId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// The `url(#id)` reference form used by fill attributes.
    pub fn to_url(&self) -> String {
        format!("url(#{})", self.as_str())
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NodeId::intern(&s))
    }
}

// ─── Id generation ───────────────────────────────────────────────────────

/// Source of fresh identifiers for synthesized nodes (layout containers,
/// paint servers of elements without an explicit id).
///
/// Injected into the editor session so tests can run against a
/// deterministic sequence.
pub trait IdSource {
    /// Produce a new identifier starting with `prefix`.
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Deterministic counter: `prefix-1`, `prefix-2`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    counter: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}-{}", self.counter)
    }
}

/// Random identifiers with a short UUID v4 suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self, prefix: &str) -> String {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        format!("{prefix}-{}", &uuid[..9])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = NodeId::intern("hero_card");
        let b = NodeId::intern("hero_card");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "hero_card");
        assert_eq!(a.to_url(), "url(#hero_card)");
    }

    #[test]
    fn sequential_ids_are_deterministic() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id("layout"), "layout-1");
        assert_eq!(ids.next_id("grad"), "grad-2");
    }

    #[test]
    fn uuid_ids_are_unique() {
        let mut ids = UuidIds;
        let a = ids.next_id("grad");
        let b = ids.next_id("grad");
        assert_ne!(a, b);
        assert!(a.starts_with("grad-"));
    }
}
