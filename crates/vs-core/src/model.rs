//! Core scene-graph data model for vector documents.
//!
//! The document is a tree of markup elements held in a `StableDiGraph`:
//! nodes are elements (shapes, containers, paint servers, character data)
//! and edges represent parent→child containment. Child order is paint order
//! and document order, so it is kept as an explicit per-parent sequence
//! rather than relying on adjacency iteration order.
//!
//! Attributes are the single source of truth for everything the editor
//! touches. Typed views (translation, fill reference, effects) are parsed
//! from and written back to attributes, which keeps the serialized text and
//! the in-memory tree from drifting.

use crate::id::{IdSource, NodeId};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| -> Option<f32> { Some((hex_val(bytes[i])? * 17) as f32 / 255.0) };
        let long = |i: usize| -> Option<f32> {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Parse any CSS colour the editor meets in paint attributes: hex,
    /// `rgb()`/`rgba()` with numeric or percentage channels, named colours
    /// and `transparent`. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::from_hex(s);
        }
        let lower = s.to_ascii_lowercase();
        if lower == "transparent" {
            return Some(Self::rgba(0.0, 0.0, 0.0, 0.0));
        }
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::from_rgb_args(args);
        }
        let i = NAMED_COLORS
            .binary_search_by(|(name, _)| name.cmp(&lower.as_str()))
            .ok()?;
        let rgb = NAMED_COLORS[i].1;
        let channel = |shift: u32| ((rgb >> shift) & 0xFF) as f32 / 255.0;
        Some(Self::rgba(channel(16), channel(8), channel(0), 1.0))
    }

    /// `r, g, b[, a]` or the space form `r g b[ / a]`.
    fn from_rgb_args(args: &str) -> Option<Self> {
        let parts: Vec<&str> = args
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        let channel = |p: &str| -> Option<f32> {
            match p.strip_suffix('%') {
                Some(pct) => pct.parse::<f32>().ok().map(|v| v / 100.0),
                None => p.parse::<f32>().ok().map(|v| v / 255.0),
            }
            .map(|v| v.clamp(0.0, 1.0))
        };
        let alpha = |p: &str| -> Option<f32> {
            match p.strip_suffix('%') {
                Some(pct) => pct.parse::<f32>().ok().map(|v| v / 100.0),
                None => p.parse::<f32>().ok(),
            }
            .map(|v| v.clamp(0.0, 1.0))
        };
        match parts.as_slice() {
            [r, g, b] => Some(Self::rgba(channel(r)?, channel(g)?, channel(b)?, 1.0)),
            [r, g, b, a] => Some(Self::rgba(channel(r)?, channel(g)?, channel(b)?, alpha(a)?)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_u8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// CSS `rgba()` form with the alpha channel multiplied by `opacity`.
    pub fn to_rgba_css(&self, opacity: f32) -> String {
        let [r, g, b, _] = self.to_u8();
        let alpha = (self.a * opacity.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
        format!("rgba({r}, {g}, {b}, {alpha})")
    }

    fn to_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// CSS named colours, sorted for binary search.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xF0F8FF), ("antiquewhite", 0xFAEBD7), ("aqua", 0x00FFFF),
    ("aquamarine", 0x7FFFD4), ("azure", 0xF0FFFF), ("beige", 0xF5F5DC),
    ("bisque", 0xFFE4C4), ("black", 0x000000), ("blanchedalmond", 0xFFEBCD),
    ("blue", 0x0000FF), ("blueviolet", 0x8A2BE2), ("brown", 0xA52A2A),
    ("burlywood", 0xDEB887), ("cadetblue", 0x5F9EA0), ("chartreuse", 0x7FFF00),
    ("chocolate", 0xD2691E), ("coral", 0xFF7F50), ("cornflowerblue", 0x6495ED),
    ("cornsilk", 0xFFF8DC), ("crimson", 0xDC143C), ("cyan", 0x00FFFF),
    ("darkblue", 0x00008B), ("darkcyan", 0x008B8B), ("darkgoldenrod", 0xB8860B),
    ("darkgray", 0xA9A9A9), ("darkgreen", 0x006400), ("darkgrey", 0xA9A9A9),
    ("darkkhaki", 0xBDB76B), ("darkmagenta", 0x8B008B), ("darkolivegreen", 0x556B2F),
    ("darkorange", 0xFF8C00), ("darkorchid", 0x9932CC), ("darkred", 0x8B0000),
    ("darksalmon", 0xE9967A), ("darkseagreen", 0x8FBC8F), ("darkslateblue", 0x483D8B),
    ("darkslategray", 0x2F4F4F), ("darkslategrey", 0x2F4F4F), ("darkturquoise", 0x00CED1),
    ("darkviolet", 0x9400D3), ("deeppink", 0xFF1493), ("deepskyblue", 0x00BFFF),
    ("dimgray", 0x696969), ("dimgrey", 0x696969), ("dodgerblue", 0x1E90FF),
    ("firebrick", 0xB22222), ("floralwhite", 0xFFFAF0), ("forestgreen", 0x228B22),
    ("fuchsia", 0xFF00FF), ("gainsboro", 0xDCDCDC), ("ghostwhite", 0xF8F8FF),
    ("gold", 0xFFD700), ("goldenrod", 0xDAA520), ("gray", 0x808080),
    ("green", 0x008000), ("greenyellow", 0xADFF2F), ("grey", 0x808080),
    ("honeydew", 0xF0FFF0), ("hotpink", 0xFF69B4), ("indianred", 0xCD5C5C),
    ("indigo", 0x4B0082), ("ivory", 0xFFFFF0), ("khaki", 0xF0E68C),
    ("lavender", 0xE6E6FA), ("lavenderblush", 0xFFF0F5), ("lawngreen", 0x7CFC00),
    ("lemonchiffon", 0xFFFACD), ("lightblue", 0xADD8E6), ("lightcoral", 0xF08080),
    ("lightcyan", 0xE0FFFF), ("lightgoldenrodyellow", 0xFAFAD2), ("lightgray", 0xD3D3D3),
    ("lightgreen", 0x90EE90), ("lightgrey", 0xD3D3D3), ("lightpink", 0xFFB6C1),
    ("lightsalmon", 0xFFA07A), ("lightseagreen", 0x20B2AA), ("lightskyblue", 0x87CEFA),
    ("lightslategray", 0x778899), ("lightslategrey", 0x778899), ("lightsteelblue", 0xB0C4DE),
    ("lightyellow", 0xFFFFE0), ("lime", 0x00FF00), ("limegreen", 0x32CD32),
    ("linen", 0xFAF0E6), ("magenta", 0xFF00FF), ("maroon", 0x800000),
    ("mediumaquamarine", 0x66CDAA), ("mediumblue", 0x0000CD), ("mediumorchid", 0xBA55D3),
    ("mediumpurple", 0x9370DB), ("mediumseagreen", 0x3CB371), ("mediumslateblue", 0x7B68EE),
    ("mediumspringgreen", 0x00FA9A), ("mediumturquoise", 0x48D1CC), ("mediumvioletred", 0xC71585),
    ("midnightblue", 0x191970), ("mintcream", 0xF5FFFA), ("mistyrose", 0xFFE4E1),
    ("moccasin", 0xFFE4B5), ("navajowhite", 0xFFDEAD), ("navy", 0x000080),
    ("oldlace", 0xFDF5E6), ("olive", 0x808000), ("olivedrab", 0x6B8E23),
    ("orange", 0xFFA500), ("orangered", 0xFF4500), ("orchid", 0xDA70D6),
    ("palegoldenrod", 0xEEE8AA), ("palegreen", 0x98FB98), ("paleturquoise", 0xAFEEEE),
    ("palevioletred", 0xDB7093), ("papayawhip", 0xFFEFD5), ("peachpuff", 0xFFDAB9),
    ("peru", 0xCD853F), ("pink", 0xFFC0CB), ("plum", 0xDDA0DD),
    ("powderblue", 0xB0E0E6), ("purple", 0x800080), ("rebeccapurple", 0x663399),
    ("red", 0xFF0000), ("rosybrown", 0xBC8F8F), ("royalblue", 0x4169E1),
    ("saddlebrown", 0x8B4513), ("salmon", 0xFA8072), ("sandybrown", 0xF4A460),
    ("seagreen", 0x2E8B57), ("seashell", 0xFFF5EE), ("sienna", 0xA0522D),
    ("silver", 0xC0C0C0), ("skyblue", 0x87CEEB), ("slateblue", 0x6A5ACD),
    ("slategray", 0x708090), ("slategrey", 0x708090), ("snow", 0xFFFAFA),
    ("springgreen", 0x00FF7F), ("steelblue", 0x4682B4), ("tan", 0xD2B48C),
    ("teal", 0x008080), ("thistle", 0xD8BFD8), ("tomato", 0xFF6347),
    ("turquoise", 0x40E0D0), ("violet", 0xEE82EE), ("wheat", 0xF5DEB3),
    ("white", 0xFFFFFF), ("whitesmoke", 0xF5F5F5), ("yellow", 0xFFFF00),
    ("yellowgreen", 0x9ACD32),
];

// ─── Tags ────────────────────────────────────────────────────────────────

/// The element kinds the editor distinguishes. Anything else is carried
/// through untouched as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Svg,
    Group,
    Path,
    Rect,
    Circle,
    Ellipse,
    Line,
    Polyline,
    Polygon,
    Text,
    TSpan,
    Defs,
    LinearGradient,
    RadialGradient,
    Stop,
    Title,
    Desc,
    /// Character data between tags (text content).
    Characters,
    Other(String),
}

impl Tag {
    pub fn from_name(name: &str) -> Self {
        match name {
            "svg" => Tag::Svg,
            "g" => Tag::Group,
            "path" => Tag::Path,
            "rect" => Tag::Rect,
            "circle" => Tag::Circle,
            "ellipse" => Tag::Ellipse,
            "line" => Tag::Line,
            "polyline" => Tag::Polyline,
            "polygon" => Tag::Polygon,
            "text" => Tag::Text,
            "tspan" => Tag::TSpan,
            "defs" => Tag::Defs,
            "linearGradient" => Tag::LinearGradient,
            "radialGradient" => Tag::RadialGradient,
            "stop" => Tag::Stop,
            "title" => Tag::Title,
            "desc" => Tag::Desc,
            other => Tag::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Tag::Svg => "svg",
            Tag::Group => "g",
            Tag::Path => "path",
            Tag::Rect => "rect",
            Tag::Circle => "circle",
            Tag::Ellipse => "ellipse",
            Tag::Line => "line",
            Tag::Polyline => "polyline",
            Tag::Polygon => "polygon",
            Tag::Text => "text",
            Tag::TSpan => "tspan",
            Tag::Defs => "defs",
            Tag::LinearGradient => "linearGradient",
            Tag::RadialGradient => "radialGradient",
            Tag::Stop => "stop",
            Tag::Title => "title",
            Tag::Desc => "desc",
            Tag::Characters => "#text",
            Tag::Other(name) => name,
        }
    }

    /// Kinds a pointer selection may land on.
    pub fn is_selectable(&self) -> bool {
        matches!(
            self,
            Tag::Group | Tag::Path | Tag::Rect | Tag::Circle | Tag::Ellipse | Tag::Text
        )
    }

    /// Elements whose character data is rendered, whitespace included.
    pub fn is_text_content(&self) -> bool {
        match self {
            Tag::Text | Tag::TSpan => true,
            Tag::Other(name) => name == "textPath",
            _ => false,
        }
    }

    pub fn is_paint_server(&self) -> bool {
        matches!(self, Tag::LinearGradient | Tag::RadialGradient)
    }

    /// Kinds that never paint anything themselves and are skipped by
    /// layout, measurement, and hit testing.
    pub fn is_non_visual(&self) -> bool {
        match self {
            Tag::Defs
            | Tag::LinearGradient
            | Tag::RadialGradient
            | Tag::Stop
            | Tag::Title
            | Tag::Desc
            | Tag::Characters => true,
            Tag::Other(name) => matches!(
                name.as_str(),
                "metadata"
                    | "style"
                    | "script"
                    | "filter"
                    | "clipPath"
                    | "mask"
                    | "marker"
                    | "pattern"
                    | "symbol"
            ),
            _ => false,
        }
    }
}

// ─── Attributes ──────────────────────────────────────────────────────────

/// Ordered attribute map. Keys are unique; insertion order is preserved so
/// serialization is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes(SmallVec<[(String, String); 4]>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set a value, keeping the attribute's position if it already exists.
    /// Returns the previous value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Option<String> {
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.0.push((key.to_string(), value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            let k: String = k.into();
            attrs.set(&k, v);
        }
        attrs
    }
}

// ─── Typed attribute views ───────────────────────────────────────────────

/// A translation component of a `transform` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub dx: f64,
    pub dy: f64,
}

impl Translation {
    pub const ZERO: Translation = Translation { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Sum of every `translate(...)` function in a transform list. Other
    /// transform functions are ignored.
    pub fn from_transform(transform: &str) -> Self {
        split_translates(transform).0
    }

    pub fn to_transform(&self) -> String {
        format!("translate({}, {})", format_num(self.dx), format_num(self.dy))
    }
}

/// Pull every `translate(...)` out of a transform list. Returns their sum
/// and the remaining functions, whitespace-normalised.
fn split_translates(transform: &str) -> (Translation, String) {
    let mut total = Translation::ZERO;
    let mut kept = String::with_capacity(transform.len());
    let mut rest = transform;
    while let Some(start) = rest.find("translate") {
        let after = &rest[start + "translate".len()..];
        let call = after
            .trim_start()
            .strip_prefix('(')
            .and_then(|args| args.find(')').map(|close| (&args[..close], &args[close + 1..])));
        match call {
            Some((args, tail)) => {
                let nums = parse_number_list(args);
                total.dx += nums.first().copied().unwrap_or(0.0);
                total.dy += nums.get(1).copied().unwrap_or(0.0);
                kept.push_str(&rest[..start]);
                kept.push(' ');
                rest = tail;
            }
            None => {
                kept.push_str(&rest[..start + "translate".len()]);
                rest = after;
            }
        }
    }
    kept.push_str(rest);
    let kept = kept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string();
    (total, kept)
}

/// Fold every `translate(...)` of a transform list into one leading
/// `translate(t)`, keeping the other functions in order. Reading the result
/// back with [`Translation::from_transform`] yields exactly `t`.
pub fn with_translation(transform: Option<&str>, t: Translation) -> String {
    let kept = transform.map(|s| split_translates(s).1).unwrap_or_default();
    if kept.is_empty() {
        t.to_transform()
    } else {
        format!("{} {kept}", t.to_transform())
    }
}

/// What an element's `fill` attribute points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillRef {
    /// A literal color (or keyword such as `none`).
    Color(String),
    /// `url(#id)` reference to a paint server.
    PaintServer(NodeId),
}

impl FillRef {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if let Some(inner) = trimmed
            .strip_prefix("url(")
            .and_then(|s| s.strip_suffix(')'))
        {
            let inner = inner.trim().trim_matches(|c| c == '\'' || c == '"');
            if let Some(id) = inner.strip_prefix('#') {
                return FillRef::PaintServer(NodeId::intern(id));
            }
        }
        FillRef::Color(trimmed.to_string())
    }

    pub fn to_attr(&self) -> String {
        match self {
            FillRef::Color(c) => c.clone(),
            FillRef::PaintServer(id) => id.to_url(),
        }
    }
}

/// Style-layer visual effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    DropShadow {
        dx: f64,
        dy: f64,
        blur: f64,
        color: String,
    },
}

impl Effect {
    /// Parse a CSS `filter` value. Only a single `drop-shadow(...)` function
    /// is recognized; stacks of several filter functions yield `None`.
    pub fn parse_filter(value: &str) -> Option<Self> {
        let inner = value
            .trim()
            .strip_prefix("drop-shadow(")?
            .strip_suffix(')')?;
        // The closing paren we stripped must match the opening one.
        let mut depth = 0i32;
        for c in inner.chars() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth < 0 {
                        return None;
                    }
                }
                _ => {}
            }
        }

        let mut lengths = Vec::with_capacity(3);
        let mut color_parts = Vec::new();
        // CSS allows the color either before or after the lengths.
        for token in split_css_tokens(inner) {
            match parse_css_length(&token) {
                Some(n) => lengths.push(n),
                None => color_parts.push(token),
            }
        }
        if lengths.len() < 2 || lengths.len() > 3 || color_parts.len() > 1 {
            return None;
        }
        Some(Effect::DropShadow {
            dx: lengths[0],
            dy: lengths[1],
            blur: lengths.get(2).copied().unwrap_or(0.0),
            color: color_parts
                .pop()
                .unwrap_or_else(|| "currentColor".to_string()),
        })
    }

    pub fn to_filter(&self) -> String {
        match self {
            Effect::DropShadow {
                dx,
                dy,
                blur,
                color,
            } => format!(
                "drop-shadow({}px {}px {}px {color})",
                format_num(*dx),
                format_num(*dy),
                format_num(*blur)
            ),
        }
    }
}

/// Split on whitespace outside parentheses.
fn split_css_tokens(s: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0u32;
    for c in s.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn parse_css_length(token: &str) -> Option<f64> {
    token
        .strip_suffix("px")
        .unwrap_or(token)
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Parse the declarations of a `style` attribute, in order.
pub fn parse_style(style: &str) -> Vec<(String, String)> {
    split_declarations(style)
        .into_iter()
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let k = k.trim();
            if k.is_empty() {
                return None;
            }
            Some((k.to_string(), v.trim().to_string()))
        })
        .collect()
}

/// Split on `;` outside parentheses and quotes, so `url(data:...;base64,...)`
/// and quoted font names stay in one declaration.
fn split_declarations(style: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in style.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                out.push(&style[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&style[start..]);
    out
}

pub fn emit_style(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse a comma/whitespace separated number list (`points`, transform args).
pub fn parse_number_list(s: &str) -> Vec<f64> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .filter_map(|t| t.parse::<f64>().ok())
        .collect()
}

/// Parse a length attribute, tolerating a `px` suffix. Percentages and other
/// units are not resolvable without a viewport and yield `None`.
pub fn parse_length(s: &str) -> Option<f64> {
    let s = s.trim();
    s.strip_suffix("px")
        .unwrap_or(s)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Compact number formatting: integers without a decimal point, otherwise
/// at most four decimals with trailing zeros removed.
pub fn format_num(n: f64) -> String {
    // Past 1e15 there are no fractional digits left and `as i64` saturates.
    if !n.is_finite() || n.abs() >= 1e15 {
        return format!("{n}");
    }
    let rounded = (n * 10_000.0).round() / 10_000.0;
    if rounded == rounded.trunc() {
        // Avoid emitting "-0".
        format!("{}", rounded.trunc() as i64)
    } else {
        format!("{rounded:.4}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

// ─── Presentation properties ─────────────────────────────────────────────

/// Which presentation channel a property lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationKind {
    /// Document-native `fill` attribute.
    Fill,
    /// Style-layer `filter` declaration.
    Effect,
}

/// A presentation property attached to a node, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    Fill(FillRef),
    Effect(Effect),
}

impl Presentation {
    pub fn kind(&self) -> PresentationKind {
        match self {
            Presentation::Fill(_) => PresentationKind::Fill,
            Presentation::Effect(_) => PresentationKind::Effect,
        }
    }
}

// ─── Scene nodes ─────────────────────────────────────────────────────────

/// A single element (or run of character data) in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub tag: Tag,
    pub attrs: Attributes,
    /// Character data, only for `Tag::Characters`.
    pub text: Option<String>,
}

impl SceneNode {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Attributes::new(),
            text: None,
        }
    }

    pub fn characters(text: impl Into<String>) -> Self {
        Self {
            tag: Tag::Characters,
            attrs: Attributes::new(),
            text: Some(text.into()),
        }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }

    pub fn id(&self) -> Option<NodeId> {
        self.attrs
            .get("id")
            .filter(|s| !s.is_empty())
            .map(NodeId::intern)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key)
    }

    /// Numeric attribute, `None` when absent or not a plain length.
    pub fn num(&self, key: &str) -> Option<f64> {
        self.attrs.get(key).and_then(parse_length)
    }

    pub fn translation(&self) -> Translation {
        self.attrs
            .get("transform")
            .map(Translation::from_transform)
            .unwrap_or_default()
    }

    pub fn fill(&self) -> Option<FillRef> {
        self.attrs.get("fill").map(FillRef::parse)
    }

    pub fn effect(&self) -> Option<Effect> {
        let style = self.attrs.get("style")?;
        parse_style(style)
            .into_iter()
            .find(|(k, _)| k == "filter")
            .and_then(|(_, v)| Effect::parse_filter(&v))
    }

    pub fn presentation(&self, kind: PresentationKind) -> Option<Presentation> {
        match kind {
            PresentationKind::Fill => self.fill().map(Presentation::Fill),
            PresentationKind::Effect => self.effect().map(Presentation::Effect),
        }
    }
}

// ─── Scene document ──────────────────────────────────────────────────────

/// The complete vector document: a tree of `SceneNode` values rooted at
/// the canvas (`svg`) element.
#[derive(Debug, Clone)]
pub struct SceneDocument {
    /// The underlying graph; edges go parent → child.
    pub graph: StableDiGraph<SceneNode, ()>,

    /// The canvas root.
    pub root: NodeIndex,

    /// Ordered children per parent.
    child_order: HashMap<NodeIndex, Vec<NodeIndex>>,

    /// Index from `id` attribute → node for fast lookup.
    id_index: HashMap<NodeId, NodeIndex>,
}

impl SceneDocument {
    /// Create an empty canvas of the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let root = SceneNode::new(Tag::Svg)
            .with_attr("xmlns", SVG_NAMESPACE)
            .with_attr("width", format_num(width))
            .with_attr("height", format_num(height))
            .with_attr(
                "viewBox",
                format!("0 0 {} {}", format_num(width), format_num(height)),
            );
        Self::with_root(root)
    }

    /// Create a document from an already-built root element.
    pub fn with_root(root: SceneNode) -> Self {
        let mut graph = StableDiGraph::new();
        let root_id = root.id();
        let root_idx = graph.add_node(root);
        let mut id_index = HashMap::new();
        if let Some(id) = root_id {
            id_index.insert(id, root_idx);
        }
        Self {
            graph,
            root: root_idx,
            child_order: HashMap::new(),
            id_index,
        }
    }

    pub fn get(&self, idx: NodeIndex) -> Option<&SceneNode> {
        self.graph.node_weight(idx)
    }

    pub fn contains(&self, idx: NodeIndex) -> bool {
        self.graph.contains_node(idx)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Canvas size from the root's `width`/`height`, falling back to the
    /// `viewBox` extent.
    pub fn canvas_size(&self) -> Option<(f64, f64)> {
        let root = &self[self.root];
        if let (Some(w), Some(h)) = (root.num("width"), root.num("height")) {
            return Some((w, h));
        }
        let vb = parse_number_list(root.attr("viewBox")?);
        (vb.len() == 4).then(|| (vb[2], vb[3]))
    }

    // ─── Structure queries ──────────────────────────────────────────────

    /// Children of a node in document order.
    pub fn children(&self, idx: NodeIndex) -> &[NodeIndex] {
        self.child_order.get(&idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get the parent index of a node.
    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    /// Position of a node among its parent's children.
    pub fn position(&self, idx: NodeIndex) -> Option<usize> {
        let parent = self.parent(idx)?;
        self.children(parent).iter().position(|&c| c == idx)
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut current = idx;
        while let Some(p) = self.parent(current) {
            out.push(p);
            current = p;
        }
        out
    }

    pub fn is_ancestor_of(&self, ancestor: NodeIndex, descendant: NodeIndex) -> bool {
        self.ancestors(descendant).contains(&ancestor)
    }

    /// The node and all its descendants in pre-order.
    pub fn descendants(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![idx];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev());
        }
        out
    }

    /// Look up a node by its `id` attribute.
    pub fn find_by_id(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id_index.contains_key(&NodeId::intern(id))
    }

    /// Draw ids from `ids` until one is not used in this document.
    pub fn fresh_id(&self, ids: &mut dyn IdSource, prefix: &str) -> String {
        loop {
            let candidate = ids.next_id(prefix);
            if !self.has_id(&candidate) {
                return candidate;
            }
            log::debug!("id collision on {candidate}, drawing again");
        }
    }

    // ─── Tree mutation ──────────────────────────────────────────────────

    fn add_detached(&mut self, node: SceneNode) -> NodeIndex {
        let id = node.id();
        let idx = self.graph.add_node(node);
        if let Some(id) = id {
            self.id_index.insert(id, idx);
        }
        idx
    }

    /// Link an unparented node under `parent` at `position` (clamped).
    pub fn attach(&mut self, parent: NodeIndex, child: NodeIndex, position: usize) {
        self.graph.add_edge(parent, child, ());
        let order = self.child_order.entry(parent).or_default();
        let at = position.min(order.len());
        order.insert(at, child);
    }

    /// Unlink a node from its parent, keeping it (and its subtree) alive.
    /// Returns the former parent and position.
    pub fn detach(&mut self, idx: NodeIndex) -> Option<(NodeIndex, usize)> {
        let parent = self.parent(idx)?;
        if let Some(edge) = self.graph.find_edge(parent, idx) {
            self.graph.remove_edge(edge);
        }
        let order = self.child_order.get_mut(&parent)?;
        let pos = order.iter().position(|&c| c == idx)?;
        order.remove(pos);
        Some((parent, pos))
    }

    /// Add a node as the last child of `parent`. Returns the new index.
    pub fn append_child(&mut self, parent: NodeIndex, node: SceneNode) -> NodeIndex {
        let idx = self.add_detached(node);
        let len = self.children(parent).len();
        self.attach(parent, idx, len);
        idx
    }

    /// Add a node as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeIndex, node: SceneNode) -> NodeIndex {
        let idx = self.add_detached(node);
        self.attach(parent, idx, 0);
        idx
    }

    /// Insert a node immediately before `reference` under the same parent.
    /// Returns `None` when `reference` has no parent.
    pub fn insert_before(&mut self, reference: NodeIndex, node: SceneNode) -> Option<NodeIndex> {
        let parent = self.parent(reference)?;
        let pos = self.position(reference)?;
        let idx = self.add_detached(node);
        self.attach(parent, idx, pos);
        Some(idx)
    }

    /// Move an existing node under `new_parent` at `position`.
    pub fn move_node(&mut self, idx: NodeIndex, new_parent: NodeIndex, position: usize) {
        self.detach(idx);
        self.attach(new_parent, idx, position);
    }

    /// Remove a node and its whole subtree. The root cannot be removed.
    pub fn remove_subtree(&mut self, idx: NodeIndex) -> bool {
        if idx == self.root || !self.contains(idx) {
            return false;
        }
        self.detach(idx);
        for n in self.descendants(idx) {
            self.child_order.remove(&n);
            if let Some(removed) = self.graph.remove_node(n)
                && let Some(id) = removed.id()
                && self.id_index.get(&id) == Some(&n)
            {
                self.id_index.remove(&id);
            }
        }
        true
    }

    /// Swap a node's payload in place, keeping its position and children.
    pub fn replace_node(&mut self, idx: NodeIndex, node: SceneNode) -> Option<SceneNode> {
        let new_id = node.id();
        let slot = self.graph.node_weight_mut(idx)?;
        let old = std::mem::replace(slot, node);
        if let Some(id) = old.id()
            && self.id_index.get(&id) == Some(&idx)
        {
            self.id_index.remove(&id);
        }
        if let Some(id) = new_id {
            self.id_index.insert(id, idx);
        }
        Some(old)
    }

    /// Remove every child of `idx` (and their subtrees).
    pub fn clear_children(&mut self, idx: NodeIndex) {
        for child in self.children(idx).to_vec() {
            self.remove_subtree(child);
        }
    }

    // ─── Attribute mutation ─────────────────────────────────────────────

    /// Set an attribute, keeping the id index in sync.
    pub fn set_attr(&mut self, idx: NodeIndex, key: &str, value: impl Into<String>) {
        let value = value.into();
        if key == "id" {
            self.unindex(idx);
            if !value.is_empty() {
                self.id_index.insert(NodeId::intern(&value), idx);
            }
        }
        if let Some(node) = self.graph.node_weight_mut(idx) {
            node.attrs.set(key, value);
        }
    }

    pub fn remove_attr(&mut self, idx: NodeIndex, key: &str) -> Option<String> {
        if key == "id" {
            self.unindex(idx);
        }
        self.graph.node_weight_mut(idx)?.attrs.remove(key)
    }

    fn unindex(&mut self, idx: NodeIndex) {
        if let Some(id) = self.graph.node_weight(idx).and_then(SceneNode::id)
            && self.id_index.get(&id) == Some(&idx)
        {
            self.id_index.remove(&id);
        }
    }

    pub fn set_translation(&mut self, idx: NodeIndex, t: Translation) {
        let Some(node) = self.get(idx) else { return };
        let transform = with_translation(node.attr("transform"), t);
        self.set_attr(idx, "transform", transform);
    }

    // ─── Presentation channel ───────────────────────────────────────────

    pub fn presentation(&self, idx: NodeIndex, kind: PresentationKind) -> Option<Presentation> {
        self.get(idx)?.presentation(kind)
    }

    /// Write a presentation property through its channel: fills go to the
    /// `fill` attribute, effects to the `filter` style declaration.
    pub fn set_presentation(&mut self, idx: NodeIndex, value: Presentation) {
        match value {
            Presentation::Fill(fill) => self.set_attr(idx, "fill", fill.to_attr()),
            Presentation::Effect(effect) => {
                self.set_style_decl(idx, "filter", Some(effect.to_filter()));
            }
        }
    }

    pub fn clear_presentation(&mut self, idx: NodeIndex, kind: PresentationKind) {
        match kind {
            PresentationKind::Fill => {
                self.remove_attr(idx, "fill");
            }
            PresentationKind::Effect => self.set_style_decl(idx, "filter", None),
        }
    }

    /// Set (or remove, with `None`) one declaration of the `style` attribute.
    /// An emptied `style` attribute is dropped.
    fn set_style_decl(&mut self, idx: NodeIndex, key: &str, value: Option<String>) {
        let Some(node) = self.get(idx) else { return };
        let mut decls = node.attr("style").map(parse_style).unwrap_or_default();
        let existing = decls.iter().position(|(k, _)| k == key);
        match (existing, value) {
            (Some(pos), Some(v)) => decls[pos].1 = v,
            (None, Some(v)) => decls.push((key.to_string(), v)),
            (Some(pos), None) => {
                decls.remove(pos);
            }
            (None, None) => return,
        }
        if decls.is_empty() {
            self.remove_attr(idx, "style");
        } else {
            self.set_attr(idx, "style", emit_style(&decls));
        }
    }

    // ─── Definitions container ──────────────────────────────────────────

    /// The definitions container directly under the root, if any.
    pub fn defs(&self) -> Option<NodeIndex> {
        self.children(self.root)
            .iter()
            .copied()
            .find(|&c| self[c].tag == Tag::Defs)
    }

    /// The definitions container, created and prepended to the root when
    /// absent.
    pub fn ensure_defs(&mut self) -> NodeIndex {
        match self.defs() {
            Some(defs) => defs,
            None => {
                log::debug!("creating definitions container");
                self.prepend_child(self.root, SceneNode::new(Tag::Defs))
            }
        }
    }

    /// Resolve a paint-server reference. Only servers inside the
    /// definitions container count.
    pub fn paint_server(&self, id: NodeId) -> Option<NodeIndex> {
        let idx = self.find_by_id(id)?;
        let defs = self.defs()?;
        (self[idx].tag.is_paint_server() && self.parent(idx) == Some(defs)).then_some(idx)
    }
}

impl std::ops::Index<NodeIndex> for SceneDocument {
    type Output = SceneNode;

    fn index(&self, idx: NodeIndex) -> &SceneNode {
        &self.graph[idx]
    }
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(id: &str) -> SceneNode {
        SceneNode::new(Tag::Rect)
            .with_attr("id", id)
            .with_attr("width", "10")
            .with_attr("height", "10")
    }

    #[test]
    fn scene_document_basics() {
        let mut doc = SceneDocument::new(400.0, 300.0);
        let idx = doc.append_child(doc.root, rect("box1"));

        assert_eq!(doc.find_by_id(NodeId::intern("box1")), Some(idx));
        assert_eq!(doc.children(doc.root), &[idx]);
        assert_eq!(doc.parent(idx), Some(doc.root));
        assert_eq!(doc.canvas_size(), Some((400.0, 300.0)));
    }

    #[test]
    fn insert_before_keeps_order() {
        let mut doc = SceneDocument::default();
        let a = doc.append_child(doc.root, rect("a"));
        let c = doc.append_child(doc.root, rect("c"));
        let b = doc.insert_before(c, rect("b")).unwrap();
        assert_eq!(doc.children(doc.root), &[a, b, c]);
    }

    #[test]
    fn remove_subtree_unindexes_descendants() {
        let mut doc = SceneDocument::default();
        let g = doc.append_child(doc.root, SceneNode::new(Tag::Group).with_attr("id", "g"));
        doc.append_child(g, rect("inner"));
        assert!(doc.remove_subtree(g));
        assert!(!doc.has_id("g"));
        assert!(!doc.has_id("inner"));
        assert!(doc.children(doc.root).is_empty());
        assert!(!doc.remove_subtree(doc.root));
    }

    #[test]
    fn set_attr_reindexes_id() {
        let mut doc = SceneDocument::default();
        let idx = doc.append_child(doc.root, rect("old"));
        doc.set_attr(idx, "id", "new");
        assert!(!doc.has_id("old"));
        assert_eq!(doc.find_by_id(NodeId::intern("new")), Some(idx));
    }

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex("#6C5CE7").unwrap();
        assert_eq!(c.to_hex(), "#6C5CE7");

        let c2 = Color::from_hex("#FF000080").unwrap();
        assert!((c2.a - 128.0 / 255.0).abs() < 0.01);
        assert_eq!(c2.to_hex().len(), 9);
        assert_eq!(Color::from_hex("#fff").unwrap().to_hex(), "#FFFFFF");
    }

    #[test]
    fn rgba_css_blends_opacity() {
        let c = Color::from_hex("#000000").unwrap();
        assert_eq!(c.to_rgba_css(0.25), "rgba(0, 0, 0, 0.25)");
    }

    #[test]
    fn translation_parsing() {
        assert_eq!(
            Translation::from_transform("translate(10, 20)"),
            Translation::new(10.0, 20.0)
        );
        assert_eq!(
            Translation::from_transform("translate(5) scale(2)"),
            Translation::new(5.0, 0.0)
        );
        assert_eq!(
            Translation::from_transform("rotate(45)"),
            Translation::ZERO
        );
    }

    #[test]
    fn with_translation_preserves_other_functions() {
        assert_eq!(
            with_translation(Some("translate(1 2) scale(2)"), Translation::new(16.0, 16.0)),
            "translate(16, 16) scale(2)"
        );
        assert_eq!(
            with_translation(Some("scale(2)"), Translation::new(3.0, 4.0)),
            "translate(3, 4) scale(2)"
        );
        assert_eq!(with_translation(None, Translation::ZERO), "translate(0, 0)");
    }

    #[test]
    fn with_translation_folds_every_translate() {
        let written = with_translation(
            Some("translate(50, 50) rotate(45) translate(-50, -50)"),
            Translation::new(16.0, 16.0),
        );
        assert_eq!(written, "translate(16, 16) rotate(45)");
        assert_eq!(
            Translation::from_transform(&written),
            Translation::new(16.0, 16.0)
        );
        assert_eq!(
            with_translation(Some("translate(1,2), scale(2)"), Translation::new(3.0, 4.0)),
            "translate(3, 4) scale(2)"
        );
    }

    #[test]
    fn fill_ref_parsing() {
        assert_eq!(
            FillRef::parse("url(#grad-a)"),
            FillRef::PaintServer(NodeId::intern("grad-a"))
        );
        assert_eq!(
            FillRef::parse("url('#grad-b')"),
            FillRef::PaintServer(NodeId::intern("grad-b"))
        );
        assert_eq!(FillRef::parse("#FF0000"), FillRef::Color("#FF0000".into()));
    }

    #[test]
    fn drop_shadow_filter_roundtrip() {
        let effect = Effect::DropShadow {
            dx: 4.0,
            dy: -2.0,
            blur: 8.0,
            color: "rgba(0, 0, 0, 0.25)".into(),
        };
        let filter = effect.to_filter();
        assert_eq!(filter, "drop-shadow(4px -2px 8px rgba(0, 0, 0, 0.25))");
        assert_eq!(Effect::parse_filter(&filter), Some(effect));
    }

    #[test]
    fn filter_stacks_are_not_recognized() {
        assert_eq!(
            Effect::parse_filter("drop-shadow(1px 1px 2px red) blur(3px)"),
            None
        );
        assert_eq!(Effect::parse_filter("blur(3px)"), None);
    }

    #[test]
    fn presentation_channels() {
        let mut doc = SceneDocument::default();
        let idx = doc.append_child(doc.root, rect("p").with_attr("style", "opacity: 0.5"));

        doc.set_presentation(
            idx,
            Presentation::Effect(Effect::DropShadow {
                dx: 1.0,
                dy: 2.0,
                blur: 3.0,
                color: "red".into(),
            }),
        );
        assert_eq!(
            doc[idx].attr("style"),
            Some("opacity: 0.5; filter: drop-shadow(1px 2px 3px red)")
        );
        assert!(doc.presentation(idx, PresentationKind::Effect).is_some());

        doc.clear_presentation(idx, PresentationKind::Effect);
        assert_eq!(doc[idx].attr("style"), Some("opacity: 0.5"));

        doc.set_presentation(idx, Presentation::Fill(FillRef::Color("#123456".into())));
        assert_eq!(doc[idx].attr("fill"), Some("#123456"));
    }

    #[test]
    fn style_split_ignores_nested_semicolons() {
        let style = r#"background: url(data:image/png;base64,AAAA); font-family: "A;B", sans-serif;opacity:0.5"#;
        assert_eq!(
            parse_style(style),
            vec![
                ("background".to_string(), "url(data:image/png;base64,AAAA)".to_string()),
                ("font-family".to_string(), r#""A;B", sans-serif"#.to_string()),
                ("opacity".to_string(), "0.5".to_string()),
            ]
        );
    }

    #[test]
    fn shadow_survives_data_uri_neighbour() {
        let mut doc = SceneDocument::default();
        let idx = doc.append_child(
            doc.root,
            rect("p").with_attr("style", "mask: url(data:a;b); filter: drop-shadow(1px 2px 3px red)"),
        );
        assert!(doc[idx].effect().is_some());

        doc.clear_presentation(idx, PresentationKind::Effect);
        assert_eq!(doc[idx].attr("style"), Some("mask: url(data:a;b)"));
    }

    #[test]
    fn ensure_defs_is_lazy_and_unique() {
        let mut doc = SceneDocument::default();
        doc.append_child(doc.root, rect("x"));
        assert!(doc.defs().is_none());
        let defs = doc.ensure_defs();
        assert_eq!(doc.children(doc.root)[0], defs);
        assert_eq!(doc.ensure_defs(), defs);
    }

    #[test]
    fn format_num_trims() {
        assert_eq!(format_num(16.0), "16");
        assert_eq!(format_num(0.25), "0.25");
        assert_eq!(format_num(1.0 / 3.0), "0.3333");
        assert_eq!(format_num(-0.00001), "0");
    }

    #[test]
    fn format_num_large_magnitudes() {
        assert_eq!(format_num(1e20), "100000000000000000000");
        assert_eq!(format_num(-1e20), "-100000000000000000000");
        assert_eq!(format_num(123_456_789_012.5), "123456789012.5");
        assert_eq!(format_num(f64::INFINITY), "inf");
    }

    #[test]
    fn color_parse_forms() {
        let red = Color::rgba(1.0, 0.0, 0.0, 1.0);
        assert_eq!(Color::parse("red"), Some(red));
        assert_eq!(Color::parse("  Red "), Some(red));
        assert_eq!(Color::parse("#f00"), Some(red));
        assert_eq!(Color::parse("rgb(255, 0, 0)"), Some(red));
        assert_eq!(Color::parse("rgb(100% 0% 0%)"), Some(red));
        assert_eq!(Color::parse("rgba(255,0,0,0.5)"), Some(Color::rgba(1.0, 0.0, 0.0, 0.5)));
        assert_eq!(Color::parse("rgb(255 0 0 / 50%)"), Some(Color::rgba(1.0, 0.0, 0.0, 0.5)));
        assert_eq!(Color::parse("transparent").map(|c| c.a), Some(0.0));
        assert_eq!(Color::parse("cornflowerblue").map(|c| c.to_hex()), Some("#6495ED".into()));
        assert_eq!(Color::parse("rgb(1, 2)"), None);
        assert_eq!(Color::parse("url(#g)"), None);
        assert_eq!(Color::parse("notacolor"), None);
    }
}
