//! Magnitude → marker encoding.

use serde::Serialize;

/// Marker diameter per unit of magnitude, in points.
pub const SIZE_PER_MAGNITUDE: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MagnitudeClass {
    Low,
    Moderate,
    Elevated,
    Severe,
}

impl MagnitudeClass {
    /// Classifies a magnitude. Boundaries are left-closed.
    ///
    /// | Range          | Class    |
    /// |----------------|----------|
    /// | < 1.0          | Low      |
    /// | 1.0 ..< 3.0    | Moderate |
    /// | 3.0 ..< 5.0    | Elevated |
    /// | >= 5.0         | Severe   |
    pub fn of(magnitude: f64) -> Self {
        match magnitude {
            m if m < 1.0 => MagnitudeClass::Low,
            m if m < 3.0 => MagnitudeClass::Moderate,
            m if m < 5.0 => MagnitudeClass::Elevated,
            _ => MagnitudeClass::Severe,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MagnitudeClass::Low => "low",
            MagnitudeClass::Moderate => "moderate",
            MagnitudeClass::Elevated => "elevated",
            MagnitudeClass::Severe => "severe",
        }
    }

    /// Marker fill color (blue, green, yellow, red).
    pub fn rgb(self) -> [u8; 3] {
        match self {
            MagnitudeClass::Low => [0, 0, 255],
            MagnitudeClass::Moderate => [0, 128, 0],
            MagnitudeClass::Elevated => [191, 191, 0],
            MagnitudeClass::Severe => [255, 0, 0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub class: MagnitudeClass,
    /// Diameter in points.
    pub size: f64,
}

impl Marker {
    pub fn for_magnitude(magnitude: f64) -> Self {
        Marker {
            class: MagnitudeClass::of(magnitude),
            size: magnitude * SIZE_PER_MAGNITUDE,
        }
    }
}
