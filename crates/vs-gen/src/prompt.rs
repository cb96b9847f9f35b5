//! Prompt text sent to the backend.

use crate::brief::{Brief, BriefRequest, VisualStyle};

/// Canvas size requested for the first vector document.
pub const DEFAULT_IMAGE_SIZE: (u32, u32) = (800, 600);

/// Instruction for the brief step. The reply must be a single JSON object
/// matching [`Brief`].
pub fn brief_prompt(request: &BriefRequest) -> String {
    let styles: Vec<&str> = VisualStyle::ALL.iter().map(VisualStyle::as_str).collect();
    let mut out = String::new();
    out.push_str("You are a senior art director. Write a design brief as one JSON object with the fields ");
    out.push_str("title, description, targetAudience, primaryColors (hex strings), visualStyle, ");
    out.push_str("pages, suggestedTitle and keywords.\n");
    out.push_str(&format!("visualStyle must be one of: {}.\n", styles.join(", ")));
    if !request.style_label.is_empty() {
        out.push_str(&format!("Preferred style: {}.\n", request.style_label));
    }
    if !request.link_refs.is_empty() {
        out.push_str("References:\n");
        for link in &request.link_refs {
            out.push_str(&format!("- {link}\n"));
        }
    }
    if !request.images.is_empty() {
        out.push_str(&format!(
            "{} reference image(s) are attached.\n",
            request.images.len()
        ));
    }
    out.push_str(&format!("Request: {}\n", request.prompt.trim()));
    out
}

/// Instruction for the vector step, describing the brief to the model.
pub fn vector_prompt(brief: &Brief) -> String {
    let (width, height) = DEFAULT_IMAGE_SIZE;
    let mut out = String::new();
    out.push_str(&format!(
        "Create a single standalone SVG document, width=\"{width}\" height=\"{height}\", "
    ));
    out.push_str("with a viewBox, grouped elements with ids, and gradients inside <defs>.\n");
    out.push_str(&format!("Title: {}\n", brief.suggested_title));
    out.push_str(&format!("Description: {}\n", brief.description));
    out.push_str(&format!("Audience: {}\n", brief.target_audience));
    out.push_str(&format!("Style: {}\n", brief.visual_style.as_str()));
    if !brief.primary_colors.is_empty() {
        out.push_str(&format!("Palette: {}\n", brief.primary_colors.join(", ")));
    }
    if !brief.keywords.is_empty() {
        out.push_str(&format!("Keywords: {}\n", brief.keywords.join(", ")));
    }
    out.push_str("Reply with the SVG markup only.");
    out
}
