//! Output artifacts: the map image and the JSON event listing.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::event::Event;
use crate::render::MapCanvas;

pub const IMAGE_SUFFIX: &str = "png";
pub const LISTING_SUFFIX: &str = "json";

/// Logs an event using Rust's debug pretty-print format.
pub fn print_pretty(event: &Event) {
    debug!("{:#?}", event);
}

/// `<base>.<suffix>`. The suffix is appended, never substituted, so a base
/// name containing dots keeps them.
pub fn artifact_path(base: &str, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{base}.{suffix}"))
}

/// Writes `events` as a JSON array indented by four spaces.
pub fn write_listing(path: &Path, events: &[Event]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create listing file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut writer, formatter);
    events.serialize(&mut ser)?;
    writeln!(writer)?;
    writer.flush()?;

    debug!(path = %path.display(), count = events.len(), "Event listing written");
    Ok(())
}

/// Saves the canvas to `<base>.png` and the events to `<base>.json`.
///
/// Returns the two paths, image first.
pub fn write_report<C: MapCanvas + ?Sized>(
    base: &str,
    canvas: &C,
    events: &[Event],
) -> Result<(PathBuf, PathBuf)> {
    let png_path = artifact_path(base, IMAGE_SUFFIX);
    let json_path = artifact_path(base, LISTING_SUFFIX);

    canvas.save(&png_path)?;
    write_listing(&json_path, events)?;

    info!(
        png = %png_path.display(),
        json = %json_path.display(),
        "Report written"
    );
    Ok((png_path, json_path))
}
