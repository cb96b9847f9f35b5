//! Selection state.
//!
//! An ordered set of scene nodes. Order is interaction order (the order in
//! which elements were clicked), not document order; grouping relies on it
//! to decide the order children land in the new container.

use smallvec::SmallVec;
use vs_core::NodeIndex;
use vs_core::model::{SceneDocument, Tag};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: SmallVec<[NodeIndex; 4]>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[NodeIndex] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node, when exactly one is selected.
    pub fn single(&self) -> Option<NodeIndex> {
        match self.nodes.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Replace the whole selection, dropping duplicates but keeping the
    /// first occurrence's position.
    pub fn replace(&mut self, nodes: impl IntoIterator<Item = NodeIndex>) {
        self.nodes.clear();
        for idx in nodes {
            if !self.nodes.contains(&idx) {
                self.nodes.push(idx);
            }
        }
    }

    /// Add a node if absent, remove it if present.
    pub fn toggle(&mut self, idx: NodeIndex) {
        match self.nodes.iter().position(|&n| n == idx) {
            Some(pos) => {
                self.nodes.remove(pos);
            }
            None => self.nodes.push(idx),
        }
    }

    /// Apply a pointer interaction.
    ///
    /// `target` is the eligible node under the pointer (see
    /// [`eligible_target`]), `None` for empty canvas. Returns whether the
    /// selection changed.
    pub fn select_at(
        &mut self,
        doc: &SceneDocument,
        target: Option<NodeIndex>,
        additive: bool,
    ) -> bool {
        let before = self.nodes.clone();
        match target {
            None if additive => {}
            None => self.clear(),
            Some(idx) if idx == doc.root => {}
            Some(idx) if additive => self.toggle(idx),
            Some(idx) => self.replace([idx]),
        }
        before != self.nodes
    }
}

/// Whether a node may be selected by id: a selectable kind that is not a
/// definition (anything under `<defs>`).
pub fn is_selectable_node(doc: &SceneDocument, idx: NodeIndex) -> bool {
    doc.get(idx).is_some_and(|n| n.tag.is_selectable())
        && !doc.ancestors(idx).iter().any(|&a| doc[a].tag == Tag::Defs)
}

/// Climb from a pointer target to the nearest node of a selectable kind.
/// Reaching the root yields the root, which selection treats as a no-op.
pub fn eligible_target(doc: &SceneDocument, hit: NodeIndex) -> NodeIndex {
    let mut current = hit;
    loop {
        if current == doc.root || doc[current].tag.is_selectable() {
            return current;
        }
        match doc.parent(current) {
            Some(p) => current = p,
            None => return current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vs_core::id::NodeId;
    use vs_core::parser::parse_document;

    const DOC: &str = r#"<svg>
  <rect id="a" width="10" height="10"/>
  <rect id="b" width="10" height="10"/>
  <rect id="c" width="10" height="10"/>
  <text id="t">x<tspan id="s">y</tspan></text>
  <line id="l" x2="5" y2="5"/>
  <defs><g id="d"/><linearGradient id="lg"/></defs>
</svg>"#;

    fn setup() -> (SceneDocument, [NodeIndex; 3]) {
        let doc = parse_document(DOC).unwrap();
        let ids = ["a", "b", "c"].map(|id| doc.find_by_id(NodeId::intern(id)).unwrap());
        (doc, ids)
    }

    #[test]
    fn plain_click_replaces() {
        let (doc, [a, b, _]) = setup();
        let mut sel = Selection::new();
        assert!(sel.select_at(&doc, Some(a), false));
        assert!(sel.select_at(&doc, Some(b), false));
        assert_eq!(sel.as_slice(), &[b]);
    }

    #[test]
    fn shift_click_toggles_only_that_node() {
        let (doc, [a, b, c]) = setup();
        let mut sel = Selection::new();
        sel.select_at(&doc, Some(a), false);
        sel.select_at(&doc, Some(b), true);
        sel.select_at(&doc, Some(c), true);
        assert_eq!(sel.as_slice(), &[a, b, c]);

        sel.select_at(&doc, Some(b), true);
        assert_eq!(sel.as_slice(), &[a, c]);
    }

    #[test]
    fn empty_canvas_clears_unless_additive() {
        let (doc, [a, _, _]) = setup();
        let mut sel = Selection::new();
        sel.select_at(&doc, Some(a), false);
        assert!(!sel.select_at(&doc, None, true));
        assert_eq!(sel.len(), 1);
        assert!(sel.select_at(&doc, None, false));
        assert!(sel.is_empty());
    }

    #[test]
    fn root_is_a_no_op() {
        let (doc, [a, _, _]) = setup();
        let mut sel = Selection::new();
        sel.select_at(&doc, Some(a), false);
        assert!(!sel.select_at(&doc, Some(doc.root), false));
        assert_eq!(sel.as_slice(), &[a]);
    }

    #[test]
    fn climbs_to_eligible_ancestor() {
        let (doc, _) = setup();
        let span = doc.find_by_id(NodeId::intern("s")).unwrap();
        let text = doc.find_by_id(NodeId::intern("t")).unwrap();
        assert_eq!(eligible_target(&doc, span), text);

        // Lines are not selectable and sit directly under the root.
        let line = doc.find_by_id(NodeId::intern("l")).unwrap();
        assert_eq!(eligible_target(&doc, line), doc.root);
    }

    #[test]
    fn replace_drops_duplicates() {
        let (_, [a, b, _]) = setup();
        let mut sel = Selection::new();
        sel.replace([a, b, a]);
        assert_eq!(sel.as_slice(), &[a, b]);
    }

    #[test]
    fn selectable_by_id() {
        let (doc, [a, _, _]) = setup();
        let node = |id: &str| doc.find_by_id(NodeId::intern(id)).unwrap();
        assert!(is_selectable_node(&doc, a));
        assert!(is_selectable_node(&doc, node("t")));
        assert!(!is_selectable_node(&doc, node("s")));
        assert!(!is_selectable_node(&doc, node("l")));
        assert!(!is_selectable_node(&doc, node("lg")));
        // A group is selectable, but not inside definitions.
        assert!(!is_selectable_node(&doc, node("d")));
    }
}
