use serde::{Deserialize, Serialize};

/// One earthquake record from the feed.
///
/// Field order matters: it is the key order of the JSON listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub magnitude: f64,
}

impl Event {
    /// Calendar date part of the timestamp (its first 10 characters).
    ///
    /// Shorter timestamps are returned whole.
    pub fn date(&self) -> &str {
        match self.timestamp.char_indices().nth(10) {
            Some((idx, _)) => &self.timestamp[..idx],
            None => &self.timestamp,
        }
    }
}

/// Sorts events strongest first. Equal magnitudes keep feed order.
pub fn sort_by_magnitude_desc(events: &mut [Event]) {
    events.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
}
