//! CSV parser for the earthquake summary feed.

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{QuakeError, QuakeResult};
use crate::event::Event;

const TIMESTAMP_COL: usize = 0;
const LATITUDE_COL: usize = 1;
const LONGITUDE_COL: usize = 2;
const MAGNITUDE_COL: usize = 4;
const MIN_COLUMNS: usize = MAGNITUDE_COL + 1;

/// Parses feed text (one header line, then one row per event) into events
/// with a strictly positive magnitude, in feed order.
///
/// # Errors
///
/// Returns [`QuakeError::MalformedRecord`] for rows with fewer than five
/// columns and [`QuakeError::InvalidCoordinate`] when latitude or longitude
/// is not a finite number.
pub fn parse_events(text: &str) -> QuakeResult<Vec<Event>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut events = Vec::new();
    let mut dropped = 0usize;

    for result in rdr.records() {
        let record = result?;
        let event = parse_record(&record)?;
        if event.magnitude > 0.0 {
            events.push(event);
        } else {
            dropped += 1;
        }
    }

    debug!(kept = events.len(), dropped, "Feed rows parsed");
    Ok(events)
}

fn parse_record(record: &StringRecord) -> QuakeResult<Event> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);

    if record.len() < MIN_COLUMNS {
        return Err(QuakeError::MalformedRecord {
            line,
            found: record.len(),
        });
    }

    let coordinate = |idx: usize, field: &'static str| -> QuakeResult<f64> {
        let raw = &record[idx];
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| QuakeError::InvalidCoordinate {
                line,
                field,
                value: raw.to_string(),
            })
    };

    let latitude = coordinate(LATITUDE_COL, "latitude")?;
    let longitude = coordinate(LONGITUDE_COL, "longitude")?;

    // Unparseable or non-finite magnitude counts as 0 and is filtered out
    // by the caller.
    let magnitude = match record[MAGNITUDE_COL].trim().parse::<f64>() {
        Ok(m) if m.is_finite() => m,
        _ => {
            debug!(line, raw = &record[MAGNITUDE_COL], "Unparseable magnitude");
            0.0
        }
    };

    Ok(Event {
        timestamp: record[TIMESTAMP_COL].to_string(),
        latitude,
        longitude,
        magnitude,
    })
}
