//! Map rendering.
//!
//! [`render_events`] decides what gets drawn (order, marker encoding, title).
//! Drawing itself goes through the [`MapCanvas`] trait; [`RasterMap`] is the
//! PNG-producing implementation.

mod projection;
mod raster;

pub use projection::{Projection, ProjectionKind};
pub use raster::RasterMap;

use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

use crate::error::QuakeError;
use crate::event::{Event, sort_by_magnitude_desc};
use crate::marker::Marker;

/// Drawing surface for a world map with event markers.
pub trait MapCanvas {
    /// Sets up the projection and draws the map background.
    fn draw_base_map(&mut self, projection: &Projection) -> Result<()>;

    fn plot_marker(&mut self, longitude: f64, latitude: f64, marker: Marker) -> Result<()>;

    fn set_title(&mut self, title: &str);

    /// Writes the finished map as a PNG image.
    fn save(&self, path: &Path) -> Result<()>;
}

/// Dates of the oldest and newest events in a newest-first feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    /// Start comes from the last event, end from the first. Must be taken
    /// before events are re-sorted.
    pub fn from_feed_order(events: &[Event]) -> Option<Self> {
        let first = events.first()?;
        let last = events.last()?;
        Some(DateRange {
            start: last.date().to_string(),
            end: first.date().to_string(),
        })
    }

    pub fn title(&self) -> String {
        format!("Earthquakes {} to {}", self.start, self.end)
    }
}

/// Result of a render pass: the title and the events in plot order.
#[derive(Debug)]
pub struct RenderedMap {
    pub title: String,
    pub events: Vec<Event>,
}

/// Draws `events` (in feed order) onto `canvas`.
///
/// Events are plotted strongest first so weaker, smaller markers stay
/// visible on top. The returned events are in that plot order.
#[tracing::instrument(skip_all, fields(events = events.len()))]
pub fn render_events<C: MapCanvas + ?Sized>(
    canvas: &mut C,
    mut events: Vec<Event>,
) -> Result<RenderedMap> {
    let range = DateRange::from_feed_order(&events).ok_or(QuakeError::NoEvents)?;

    canvas.draw_base_map(&Projection::default())?;

    sort_by_magnitude_desc(&mut events);
    for event in &events {
        let marker = Marker::for_magnitude(event.magnitude);
        canvas.plot_marker(event.longitude, event.latitude, marker)?;
    }
    debug!(plotted = events.len(), "Markers plotted");

    let title = range.title();
    canvas.set_title(&title);
    info!(title = %title, "Map rendered");

    Ok(RenderedMap { title, events })
}
