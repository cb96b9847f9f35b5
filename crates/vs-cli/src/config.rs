//! Editor configuration file.

use anyhow::{Context, Result};
use std::path::Path;
use vs_editor::EditorConfig;

/// Read `path` as TOML, or the defaults when no file was given.
pub fn load(path: Option<&Path>) -> Result<EditorConfig> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse(text: &str) -> Result<EditorConfig> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = parse(
            r##"
layout_gap = 24
fallback_fill = "#EEEEEE"

[shadow]
blur = 20
"##,
        )
        .unwrap();
        assert_eq!(config.layout_gap, 24.0);
        assert_eq!(config.layout_padding, 16.0);
        assert_eq!(config.fallback_fill, "#EEEEEE");
        assert_eq!(config.shadow.blur, 20.0);
        assert_eq!(config.shadow.y, 4.0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/vs.toml"))).unwrap_err();
        assert!(err.to_string().contains("reading /nonexistent/vs.toml"));
    }
}
