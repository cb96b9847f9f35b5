pub mod config;
pub mod effects;
pub mod export;
pub mod grouping;
pub mod input;
pub mod inspect;
pub mod paint;
pub mod selection;
pub mod session;
pub mod shortcuts;
pub mod sync;

pub use config::EditorConfig;
pub use effects::ShadowDescriptor;
pub use grouping::LayoutProperty;
pub use inspect::{Inspector, LayoutPanel};
pub use paint::{GradientDescriptor, GradientKind, GradientStop, StopPatch};
pub use selection::Selection;
pub use session::EditorSession;
