//! Ilot planner
//!
//! Reads a JSON entity list, lays out ilots and corridors, and prints the
//! layout as JSON on stdout. Logs go to stderr.

use std::path::PathBuf;

use clap::Parser;
use ilotplan::operations::AuditLayout;
use ilotplan::zones::ClassifyZones;
use ilotplan::{LayoutError, RawEntity, Settings};
use thiserror::Error;

/// Place ilots and corridors on a classified floor plan
#[derive(Parser, Debug)]
#[command(name = "ilotplan")]
#[command(about = "Place ilots and corridors on a floor plan and print the layout as JSON")]
struct Args {
    /// JSON file holding an array of tagged entities (coordinates in mm)
    #[arg(long)]
    entities: PathBuf,

    /// JSON settings document; built-in defaults when omitted
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Random seed for the size distribution
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read entities: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load(path).map_err(LayoutError::from)?,
        None => Settings::default(),
    };
    settings.validate().map_err(LayoutError::from)?;

    let json = std::fs::read_to_string(&args.entities)?;
    let entities: Vec<RawEntity> = serde_json::from_str(&json)?;

    let classification = ClassifyZones::new(&entities, &settings).execute();
    tracing::info!(
        entities = entities.len(),
        rooms = classification.zones.room_count(),
        dropped = classification.dropped,
        undersized = classification.undersized,
        ignored = classification.ignored,
        "loaded floor plan"
    );

    let zones = classification.zones;
    let layout = ilotplan::run(&zones, &settings, args.seed)?;

    let violations = AuditLayout::new(&zones, &layout, settings.ilot_clearance).execute();
    if !violations.is_empty() {
        tracing::warn!(count = violations.len(), "layout audit found violations");
    }

    let out = if args.pretty {
        serde_json::to_string_pretty(&layout)?
    } else {
        serde_json::to_string(&layout)?
    };
    println!("{out}");
    Ok(())
}
