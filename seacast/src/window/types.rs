//! Trajectory window type definitions.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Valid latitude range in degrees.
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range in degrees.
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A single validated vessel position fix.
///
/// Produced by [`TrajectoryWindow::from_records`](super::TrajectoryWindow::from_records)
/// from raw telemetry and consumed read-only by the forecast strategies.
///
/// # SOG vs COG vs Heading
///
/// - **SOG** (`sog`): speed over ground in knots - how fast the vessel
///   actually moves over the Earth's surface.
/// - **COG** (`cog`): course over ground in degrees - the direction of
///   that movement. Differs from heading under current and leeway.
/// - **Heading** (`heading`): where the bow points, in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSample {
    /// When this position was reported.
    pub timestamp: DateTime<Utc>,

    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,

    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,

    /// Speed over ground in knots. 0.0 when not reported.
    pub sog: f64,

    /// Course over ground in degrees (0-360). 0.0 when not reported.
    pub cog: f64,

    /// True heading in degrees (0-360). 0.0 when not reported.
    pub heading: f64,
}

impl PositionSample {
    /// Position as a (latitude, longitude) pair for the geodesic functions.
    #[inline]
    pub fn coords(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// A numeric field as transmitted by the upstream feed.
///
/// The legacy AIS pipeline serializes database rows without type
/// coercion, so the same field arrives as a JSON number (`43.3`) from
/// some producers and a string (`"43.3"`) from others. Both forms are
/// accepted at deserialization; [`as_f64`](Self::as_f64) resolves the
/// value, and the window builder rejects strings that do not parse.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// A plain JSON number.
    Number(f64),
    /// A string-encoded number from the legacy feed.
    Text(String),
}

impl RawNumber {
    /// The value as a float, or `None` when the string form is not a
    /// valid number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Raw position record as supplied by the ingestion collaborator.
///
/// Required fields are `timestamp`, `latitude`, and `longitude`;
/// the vector fields are optional and default to 0.0 when absent.
/// Numeric fields accept both JSON numbers and string-encoded numbers
/// (see [`RawNumber`]). Field aliases accept the legacy AIS feed keys
/// (`horodatage`, `cap_reel`).
#[derive(Debug, Clone, Deserialize)]
pub struct RawPositionRecord {
    /// Report time as an ISO 8601 string (`2024-05-01T12:00:00Z`)
    /// or a `YYYY-MM-DD HH:MM:SS` string interpreted as UTC.
    #[serde(alias = "horodatage")]
    pub timestamp: String,

    /// Latitude in degrees.
    pub latitude: RawNumber,

    /// Longitude in degrees.
    pub longitude: RawNumber,

    /// Speed over ground in knots.
    #[serde(default)]
    pub sog: Option<RawNumber>,

    /// Course over ground in degrees.
    #[serde(default)]
    pub cog: Option<RawNumber>,

    /// True heading in degrees.
    #[serde(default, alias = "cap_reel")]
    pub heading: Option<RawNumber>,
}

/// Errors raised while building a trajectory window.
///
/// Both variants are fatal to the whole prediction request: the window
/// builder is the single validation gate, so nothing downstream
/// re-validates record shapes.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WindowError {
    /// A required field of a record could not be parsed or is out of range.
    #[error("invalid position record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// Fewer usable records than the minimum required for any forecast.
    #[error("not enough position records: {actual} supplied, {required} required")]
    InsufficientData { required: usize, actual: usize },
}
