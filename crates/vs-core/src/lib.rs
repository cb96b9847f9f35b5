pub mod emitter;
pub mod geometry;
pub mod id;
pub mod layout;
pub mod model;
pub mod parser;

pub use emitter::emit_document;
pub use geometry::{BBox, canvas_box, intrinsic_box, selection_box};
pub use id::{IdSource, NodeId, SequentialIds, UuidIds};
pub use layout::{FlexLayout, LayoutDirection, apply_layout, clear_layout};
pub use model::*;
pub use parser::parse_document;

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
