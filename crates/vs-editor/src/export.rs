//! Export helpers over the canonical text.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub const DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

pub fn to_base64(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// `data:` URI suitable for a download link or an `<img>` source.
pub fn to_data_uri(text: &str) -> String {
    format!("{DATA_URI_PREFIX}{}", to_base64(text))
}

/// Download file name derived from a title: lowercase ASCII words joined
/// by dashes, with an `.svg` extension.
pub fn file_name(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "design.svg".to_string()
    } else {
        format!("{slug}.svg")
    }
}
