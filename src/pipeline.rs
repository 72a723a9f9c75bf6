//! One fetch → parse → render → write run.

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::fetch::FeedSource;
use crate::output::{print_pretty, write_report};
use crate::parser::parse_events;
use crate::render::{MapCanvas, render_events};

pub const DEFAULT_FEED_URL: &str =
    "http://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.csv";

#[derive(Debug)]
pub struct Report {
    pub png_path: PathBuf,
    pub json_path: PathBuf,
    pub title: String,
    pub event_count: usize,
}

/// Loads the feed at `url`, renders it onto `canvas` and writes
/// `<base>.png` and `<base>.json`.
#[tracing::instrument(skip(source, canvas))]
pub fn run<S, C>(source: &S, url: &str, canvas: &mut C, base: &str) -> Result<Report>
where
    S: FeedSource + ?Sized,
    C: MapCanvas + ?Sized,
{
    let text = source.load(url)?;
    info!(bytes = text.len(), "Feed loaded");

    let events = parse_events(&text)?;
    info!(events = events.len(), "Events with positive magnitude");
    if let Some(first) = events.first() {
        print_pretty(first);
    }

    let rendered = render_events(canvas, events)?;
    let (png_path, json_path) = write_report(base, &*canvas, &rendered.events)?;

    Ok(Report {
        png_path,
        json_path,
        title: rendered.title,
        event_count: rendered.events.len(),
    })
}
