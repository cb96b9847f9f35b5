//! Grouping engine: wrap a selection in an auto-layout container, unwrap
//! it again, and edit a container's layout parameters.
//!
//! Every operation checks its preconditions up front and returns without
//! touching the document when they fail.

use crate::config::EditorConfig;
use serde::{Deserialize, Serialize};
use vs_core::id::IdSource;
use vs_core::layout::{
    ATTR_DIRECTION, ATTR_GAP, ATTR_LAYOUT, ATTR_PADDING, FlexLayout, LayoutDirection,
    apply_layout, clear_layout,
};
use vs_core::model::*;
use vs_core::NodeIndex;

/// One editable field of the layout panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "prop", content = "value", rename_all = "lowercase")]
pub enum LayoutProperty {
    Enabled(bool),
    Direction(LayoutDirection),
    Gap(f64),
    Padding(f64),
}

/// Wrap `selection` in a new layout container.
///
/// The container is inserted immediately before the first selected node
/// and receives the selected nodes in selection order. Requires at least
/// two nodes, none of them the root, and no node nested inside another
/// selected node. Returns the new container.
pub fn group(
    doc: &mut SceneDocument,
    selection: &[NodeIndex],
    ids: &mut dyn IdSource,
    config: &EditorConfig,
) -> Option<NodeIndex> {
    if selection.len() < 2 {
        return None;
    }
    if selection
        .iter()
        .any(|&n| n == doc.root || !doc.contains(n) || doc.parent(n).is_none())
    {
        return None;
    }
    let nested = selection.iter().any(|&a| {
        selection
            .iter()
            .any(|&b| a != b && doc.is_ancestor_of(a, b))
    });
    if nested {
        log::debug!("group: selection contains nested nodes, ignoring");
        return None;
    }

    let id = doc.fresh_id(ids, &config.group_id_prefix);
    let first = selection[0];
    let container = doc.insert_before(first, SceneNode::new(Tag::Group).with_attr("id", &id))?;
    FlexLayout {
        direction: LayoutDirection::Row,
        gap: config.layout_gap,
        padding: config.layout_padding,
    }
    .write(doc, container);

    let mut former_parents = Vec::new();
    for (i, &node) in selection.iter().enumerate() {
        if let Some(parent) = doc.parent(node)
            && !former_parents.contains(&parent)
        {
            former_parents.push(parent);
        }
        doc.move_node(node, container, i);
    }

    apply_layout(doc, container);
    relayout(doc, &former_parents);
    log::debug!("grouped {} nodes into #{id}", selection.len());
    Some(container)
}

/// Dissolve a container, moving its children to the container's parent at
/// the container's former position, in their original order.
///
/// Requires `selection` to be exactly one container. Returns the moved
/// children that can be selected.
pub fn ungroup(doc: &mut SceneDocument, selection: &[NodeIndex]) -> Option<Vec<NodeIndex>> {
    let &[container] = selection else {
        return None;
    };
    if container == doc.root || doc.get(container)?.tag != Tag::Group {
        return None;
    }
    let parent = doc.parent(container)?;
    let pos = doc.position(container)?;

    let children = doc.children(container).to_vec();
    for (i, &child) in children.iter().enumerate() {
        doc.move_node(child, parent, pos + i);
    }
    doc.remove_subtree(container);
    relayout(doc, &[parent]);

    log::debug!("ungrouped {} children", children.len());
    Some(
        children
            .into_iter()
            .filter(|&c| !doc[c].tag.is_non_visual())
            .collect(),
    )
}

/// Write one layout property onto a container and re-run its layout.
pub fn set_layout_property(
    doc: &mut SceneDocument,
    container: NodeIndex,
    prop: LayoutProperty,
) -> bool {
    if doc.get(container).is_none_or(|n| n.tag != Tag::Group) {
        return false;
    }
    match prop {
        LayoutProperty::Enabled(true) => {
            let layout = FlexLayout::from_attrs(&doc[container]);
            layout.write(doc, container);
        }
        LayoutProperty::Enabled(false) => clear_layout(doc, container),
        LayoutProperty::Direction(direction) => {
            doc.set_attr(container, ATTR_DIRECTION, direction.as_attr());
        }
        LayoutProperty::Gap(gap) if gap >= 0.0 && gap.is_finite() => {
            doc.set_attr(container, ATTR_GAP, format_num(gap));
        }
        LayoutProperty::Padding(padding) if padding >= 0.0 && padding.is_finite() => {
            doc.set_attr(container, ATTR_PADDING, format_num(padding));
        }
        LayoutProperty::Gap(_) | LayoutProperty::Padding(_) => return false,
    }
    log::debug!(
        "layout property {prop:?} on {container:?} (enabled: {})",
        doc[container].attrs.contains(ATTR_LAYOUT)
    );
    apply_layout(doc, container);
    true
}

/// Re-run layout on containers whose child list changed. Containers
/// without layout are left alone.
pub fn relayout(doc: &mut SceneDocument, containers: &[NodeIndex]) {
    for &c in containers {
        if doc.contains(c) {
            apply_layout(doc, c);
        }
    }
}
