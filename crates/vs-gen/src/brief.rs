//! Design brief schema and generation inputs.

use serde::{Deserialize, Serialize};

/// Overall look the generated illustration should follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualStyle {
    Minimalist,
    Modern,
    Playful,
    Corporate,
    Vintage,
    Futuristic,
    Organic,
    Bold,
}

impl VisualStyle {
    pub const ALL: [VisualStyle; 8] = [
        VisualStyle::Minimalist,
        VisualStyle::Modern,
        VisualStyle::Playful,
        VisualStyle::Corporate,
        VisualStyle::Vintage,
        VisualStyle::Futuristic,
        VisualStyle::Organic,
        VisualStyle::Bold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisualStyle::Minimalist => "Minimalist",
            VisualStyle::Modern => "Modern",
            VisualStyle::Playful => "Playful",
            VisualStyle::Corporate => "Corporate",
            VisualStyle::Vintage => "Vintage",
            VisualStyle::Futuristic => "Futuristic",
            VisualStyle::Organic => "Organic",
            VisualStyle::Bold => "Bold",
        }
    }
}

/// Structured brief returned by the first generation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brief {
    pub title: String,
    pub description: String,
    pub target_audience: String,
    pub primary_colors: Vec<String>,
    pub visual_style: VisualStyle,
    pub pages: Vec<String>,
    pub suggested_title: String,
    pub keywords: Vec<String>,
}

/// An inline reference image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceImage {
    pub mime_type: String,
    pub data_base64: String,
}

/// Inputs to brief generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefRequest {
    pub images: Vec<ReferenceImage>,
    pub link_refs: Vec<String>,
    pub prompt: String,
    /// Free-form style hint from the host, e.g. "Minimalist".
    pub style_label: String,
}

/// Which model tier renders the vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineChoice {
    #[default]
    Fast,
    Quality,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn brief_uses_camel_case_json() {
        let json = r##"{
            "title": "Launch",
            "description": "A poster",
            "targetAudience": "Developers",
            "primaryColors": ["#111111", "#ffffff"],
            "visualStyle": "Minimalist",
            "pages": ["cover"],
            "suggestedTitle": "Launch & Learn",
            "keywords": ["launch"]
        }"##;
        let brief: Brief = serde_json::from_str(json).unwrap();
        assert_eq!(brief.visual_style, VisualStyle::Minimalist);
        assert_eq!(brief.primary_colors, vec!["#111111", "#ffffff"]);

        let back = serde_json::to_value(&brief).unwrap();
        assert_eq!(back["suggestedTitle"], "Launch & Learn");
    }

    #[test]
    fn unknown_style_is_rejected() {
        let err = serde_json::from_str::<VisualStyle>(r#""Baroque""#);
        assert!(err.is_err());
    }
}
