//! Editor configuration.
//!
//! Every field has a default, so a partial TOML/JSON document only needs
//! to name the values it overrides.

use crate::effects::ShadowDescriptor;
use serde::{Deserialize, Serialize};
use vs_core::layout::{DEFAULT_GAP, DEFAULT_PADDING};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Gap written onto containers created by grouping.
    pub layout_gap: f64,
    /// Padding written onto containers created by grouping.
    pub layout_padding: f64,
    /// Fill restored when a gradient is disabled on an element whose
    /// original fill was never recorded.
    pub fallback_fill: String,
    /// Colour of a stop appended by "add stop".
    pub default_stop_color: String,
    /// Initial state of the shadow panel.
    pub shadow: ShadowDescriptor,
    pub group_id_prefix: String,
    pub gradient_id_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            layout_gap: DEFAULT_GAP,
            layout_padding: DEFAULT_PADDING,
            fallback_fill: "#CCCCCC".to_string(),
            default_stop_color: "#FFFFFF".to_string(),
            shadow: ShadowDescriptor::default(),
            group_id_prefix: "layout".to_string(),
            gradient_id_prefix: "grad".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"layout_gap": 8}"#).unwrap();
        assert_eq!(config.layout_gap, 8.0);
        assert_eq!(config.layout_padding, 16.0);
        assert_eq!(config.fallback_fill, "#CCCCCC");
        assert_eq!(config.shadow, ShadowDescriptor::default());
    }
}
