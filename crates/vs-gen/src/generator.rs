//! Brief and vector generation over a [`GenerativeBackend`].

use crate::brief::{Brief, BriefRequest, EngineChoice};
use crate::error::{GenerationError, Result};
use crate::retry::{RetryPolicy, retry_with_backoff};

/// The model service. Implementations build their requests with
/// [`crate::brief_prompt`] and [`crate::vector_prompt`], return the raw
/// response text, and map transport failures through [`crate::classify`].
#[allow(async_fn_in_trait)]
pub trait GenerativeBackend {
    /// Raw JSON for a [`Brief`].
    async fn generate_brief(&self, request: &BriefRequest) -> Result<String>;

    /// Raw model text expected to contain one SVG document.
    async fn generate_vector(&self, brief: &Brief, engine: EngineChoice) -> Result<String>;
}

/// Drives the two generation steps with retry and output validation.
pub struct Generator<B> {
    backend: B,
    policy: RetryPolicy,
}

impl<B: GenerativeBackend> Generator<B> {
    pub fn new(backend: B) -> Self {
        Self::with_policy(backend, RetryPolicy::default())
    }

    pub fn with_policy(backend: B, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn brief(&self, request: &BriefRequest) -> Result<Brief> {
        let raw = retry_with_backoff(&self.policy, move || self.backend.generate_brief(request)).await?;
        let json = strip_fence(&raw);
        let brief: Brief = serde_json::from_str(json)
            .map_err(|e| GenerationError::MalformedOutput(format!("brief: {e}")))?;
        log::debug!("brief '{}' ({})", brief.title, brief.visual_style.as_str());
        Ok(brief)
    }

    /// Returns the extracted SVG text, already known to parse.
    pub async fn vector(&self, brief: &Brief, engine: EngineChoice) -> Result<String> {
        let raw = retry_with_backoff(&self.policy, move || {
            self.backend.generate_vector(brief, engine)
        })
        .await?;
        let svg = extract_svg(&raw)?;
        vs_core::parse_document(svg).map_err(GenerationError::MalformedOutput)?;
        log::debug!("vector document of {} bytes", svg.len());
        Ok(svg.to_string())
    }

    /// Brief first, then the vector built from it.
    pub async fn generate(
        &self,
        request: &BriefRequest,
        engine: EngineChoice,
    ) -> Result<(Brief, String)> {
        let brief = self.brief(request).await?;
        let svg = self.vector(&brief, engine).await?;
        Ok((brief, svg))
    }
}

/// The first complete `<svg ...>...</svg>` span of a model response. Nested
/// `<svg>` elements are balanced, so the span ends at the matching close.
pub fn extract_svg(raw: &str) -> Result<&str> {
    let unterminated = || GenerationError::MalformedOutput("unterminated <svg> element".into());
    let start = find_svg_open(raw, 0)
        .ok_or_else(|| GenerationError::MalformedOutput("no <svg> element in response".into()))?;

    let mut depth = 0usize;
    let mut pos = start;
    loop {
        let open = find_svg_open(raw, pos);
        let close = raw[pos..].find("</svg").map(|i| pos + i);
        let (at, opening) = match (open, close) {
            (Some(o), c) if c.is_none_or(|c| o < c) => (o, true),
            (_, Some(c)) => (c, false),
            _ => return Err(unterminated()),
        };
        let tag_end = raw[at..].find('>').map(|i| at + i).ok_or_else(unterminated)?;
        let self_closing = raw[..tag_end].ends_with('/');
        match (opening, self_closing) {
            (true, true) => {}
            (true, false) => depth += 1,
            (false, _) => depth -= 1,
        }
        if depth == 0 {
            return Ok(&raw[start..=tag_end]);
        }
        pos = tag_end + 1;
    }
}

/// Next `<svg` start tag at or after `from`, skipping names like `<svgx`.
fn find_svg_open(raw: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(i) = raw[pos..].find("<svg") {
        let at = pos + i;
        match raw[at + 4..].chars().next() {
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => return Some(at),
            _ => pos = at + 4,
        }
    }
    None
}

/// Models like to wrap JSON in a markdown fence.
fn strip_fence(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw.trim(),
    }
}
