//! Subcommands and the session operations behind them.

use anyhow::{Context, Result, bail};
use clap::{Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use vs_core::geometry::{BBox, canvas_box};
use vs_core::layout::LayoutDirection;
use vs_core::model::{SceneDocument, SceneNode};
use vs_core::NodeIndex;
use vs_editor::{
    EditorConfig, EditorSession, GradientDescriptor, GradientKind, GradientStop, LayoutProperty,
    ShadowDescriptor,
};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List elements with their canvas bounding boxes
    Inspect {
        file: PathBuf,
        /// Only elements intersecting `x,y,width,height`
        #[arg(long, value_parser = parse_region)]
        region: Option<BBox>,
        /// Print the derived panel state for `--ids` as JSON
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
    },
    /// Wrap elements in a new auto-layout container
    Group {
        file: PathBuf,
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
        #[arg(long, value_enum)]
        direction: Option<Direction>,
        #[arg(long)]
        gap: Option<f64>,
        #[arg(long)]
        padding: Option<f64>,
    },
    /// Dissolve a container, keeping its children in place
    Ungroup {
        file: PathBuf,
        #[arg(long)]
        id: String,
    },
    /// Fill elements with a gradient
    Gradient {
        file: PathBuf,
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
        #[arg(long, value_enum, default_value = "linear")]
        kind: Kind,
        #[arg(long, default_value_t = 90.0)]
        angle: f64,
        /// `color:offset` pairs, e.g. `#111:0,#fff:100`
        #[arg(long, value_parser = parse_stops, default_value = "#000000:0,#FFFFFF:100")]
        stops: Stops,
        /// Restore the original fills instead
        #[arg(long)]
        disable: bool,
    },
    /// Apply a drop shadow
    Shadow {
        file: PathBuf,
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
        #[arg(long, allow_hyphen_values = true)]
        x: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        y: Option<f64>,
        #[arg(long)]
        blur: Option<f64>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        opacity: Option<f64>,
        /// Remove the shadow instead
        #[arg(long)]
        disable: bool,
    },
    /// Print the canonical text, or a base64 data URI
    Export {
        file: PathBuf,
        #[arg(long)]
        base64: bool,
        /// Print the download file name derived from the document title
        #[arg(long, conflicts_with = "base64")]
        name: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl From<Direction> for LayoutDirection {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Horizontal => LayoutDirection::Row,
            Direction::Vertical => LayoutDirection::Column,
        }
    }
}

/// Parsed `--stops` list.
#[derive(Clone, Debug, PartialEq)]
pub struct Stops(pub Vec<GradientStop>);

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Kind {
    Linear,
    Radial,
}

impl From<Kind> for GradientKind {
    fn from(k: Kind) -> Self {
        match k {
            Kind::Linear => GradientKind::Linear,
            Kind::Radial => GradientKind::Radial,
        }
    }
}

/// Run `command` and return what should be written out.
pub fn run(command: &Command, config: EditorConfig) -> Result<String> {
    match command {
        Command::Inspect { file, region, ids } => {
            let session = open(file, config)?;
            if ids.is_empty() {
                Ok(inspect(session.document(), *region))
            } else {
                let mut session = session;
                select(&mut session, ids)?;
                Ok(serde_json::to_string_pretty(session.inspector())? + "\n")
            }
        }
        Command::Group {
            file,
            ids,
            direction,
            gap,
            padding,
        } => {
            let mut session = open(file, config)?;
            select(&mut session, ids)?;
            if !session.group() {
                bail!("cannot group {}: need two or more unnested elements", ids.join(","));
            }
            let props = [
                direction.map(|d| LayoutProperty::Direction(d.into())),
                gap.map(LayoutProperty::Gap),
                padding.map(LayoutProperty::Padding),
            ];
            for prop in props.into_iter().flatten() {
                if !session.set_layout_property(prop) {
                    bail!("rejected layout property {prop:?}");
                }
            }
            Ok(session.text().to_string())
        }
        Command::Ungroup { file, id } => {
            let mut session = open(file, config)?;
            select(&mut session, std::slice::from_ref(id))?;
            if !session.ungroup() {
                bail!("'{id}' is not a container");
            }
            Ok(session.text().to_string())
        }
        Command::Gradient {
            file,
            ids,
            kind,
            angle,
            stops,
            disable,
        } => {
            let mut session = open(file, config)?;
            select(&mut session, ids)?;
            if stops.0.len() < 2 {
                bail!("a gradient needs at least two stops");
            }
            let desc = GradientDescriptor {
                enabled: !disable,
                kind: (*kind).into(),
                angle: *angle,
                stops: stops.0.clone(),
            };
            if !session.set_gradient(desc) {
                bail!("nothing to fill");
            }
            Ok(session.text().to_string())
        }
        Command::Shadow {
            file,
            ids,
            x,
            y,
            blur,
            color,
            opacity,
            disable,
        } => {
            let mut session = open(file, config)?;
            select(&mut session, ids)?;
            // Start from what the first element already has.
            let current = session.inspector().shadow.clone();
            let desc = ShadowDescriptor {
                enabled: !disable,
                x: x.unwrap_or(current.x),
                y: y.unwrap_or(current.y),
                blur: blur.unwrap_or(current.blur),
                color: color.clone().unwrap_or(current.color),
                opacity: opacity.unwrap_or(current.opacity),
            };
            if !session.set_shadow(desc) {
                bail!("nothing to shade");
            }
            Ok(session.text().to_string())
        }
        Command::Export { file, base64, name } => {
            let session = open(file, config)?;
            if *name {
                Ok(session.export_file_name() + "\n")
            } else if *base64 {
                Ok(session.export_data_uri() + "\n")
            } else {
                Ok(session.text().to_string())
            }
        }
    }
}

fn open(path: &Path, config: EditorConfig) -> Result<EditorSession> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut session = EditorSession::new(config);
    session
        .load(&text)
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
    log::debug!("opened {}", path.display());
    Ok(session)
}

fn select(session: &mut EditorSession, ids: &[String]) -> Result<()> {
    session.select_ids(ids);
    let selected: Vec<&str> = session
        .inspector()
        .selected_ids
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();
    let (missing, unselectable): (Vec<&str>, Vec<&str>) = ids
        .iter()
        .map(String::as_str)
        .filter(|id| !selected.contains(id))
        .partition(|id| !session.document().has_id(id));
    if !missing.is_empty() {
        bail!("no element with id {}", missing.join(", "));
    }
    if !unselectable.is_empty() {
        bail!("not selectable: {}", unselectable.join(", "));
    }
    Ok(())
}

/// One line per visual element: indentation, `tag#id`, canvas box.
fn inspect(doc: &SceneDocument, region: Option<BBox>) -> String {
    let nodes: Vec<NodeIndex> = match region {
        Some(region) => vs_render::hit_test_rect(doc, region),
        None => doc
            .descendants(doc.root)
            .into_iter()
            .filter(|&n| n != doc.root && !doc[n].tag.is_non_visual())
            .collect(),
    };
    let mut out = String::new();
    for idx in nodes {
        let depth = doc.ancestors(idx).len().saturating_sub(1);
        let _ = write!(out, "{}{}", "  ".repeat(depth), label(&doc[idx]));
        match canvas_box(doc, idx) {
            Some(b) => {
                let _ = writeln!(out, " [{} {} {} {}]", b.x, b.y, b.width, b.height);
            }
            None => out.push('\n'),
        }
    }
    out
}

fn label(node: &SceneNode) -> String {
    match node.id() {
        Some(id) => format!("{}#{}", node.tag.name(), id.as_str()),
        None => node.tag.name().to_string(),
    }
}

fn parse_region(s: &str) -> Result<BBox, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("'{p}': {e}")))
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        [x, y, w, h] => Ok(BBox::new(*x, *y, *w, *h)),
        _ => Err("expected x,y,width,height".to_string()),
    }
}

/// `#111:0,#fff:100` into stops. Offsets may carry a trailing `%`.
fn parse_stops(s: &str) -> Result<Stops, String> {
    s.split(',')
        .map(|pair| {
            let (color, offset) = pair
                .trim()
                .rsplit_once(':')
                .ok_or_else(|| format!("'{pair}': expected color:offset"))?;
            let offset: u8 = offset
                .trim()
                .trim_end_matches('%')
                .parse()
                .map_err(|e| format!("'{pair}': {e}"))?;
            if offset > 100 {
                return Err(format!("'{pair}': offset above 100"));
            }
            Ok(GradientStop::new(offset, color.trim()))
        })
        .collect::<Result<_, _>>()
        .map(Stops)
}
