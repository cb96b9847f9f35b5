//! `vs-cli`: edit vector documents from the command line.
//!
//! Every command loads a document into an editor session, applies one
//! operation, and writes the canonical text to stdout or `--out`.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::Command;
use std::path::PathBuf;

/// Select, regroup and restyle the elements of a vector document
#[derive(Parser, Debug)]
#[command(name = "vs-cli")]
#[command(about = "Select, regroup and restyle the elements of a vector document")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Editor configuration (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write output here instead of stdout
    #[arg(short, long, global = true)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = config::load(args.config.as_deref())?;
    let output = commands::run(&args.command, config)?;

    match &args.out {
        Some(path) => {
            std::fs::write(path, output)
                .map_err(|e| anyhow::anyhow!("writing {}: {e}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{output}"),
    }
    Ok(())
}
