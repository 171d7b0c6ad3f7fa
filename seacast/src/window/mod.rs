//! Trajectory window construction.
//!
//! Validates and normalizes raw position records into a
//! [`TrajectoryWindow`]: an immutable, time-descending sequence of
//! [`PositionSample`]s capped at the 10 most recent fixes. The window
//! builder is the single validation gate of the forecasting core; the
//! strategies only re-check their own minimum lengths.
//!
//! # Contract
//!
//! - Numeric fields are coerced from the JSON-number or string form
//!   the feed emits (see [`RawNumber`]); unparseable strings fail with
//!   [`WindowError::InvalidRecord`].
//! - Unparseable timestamps and non-finite or out-of-range coordinates
//!   fail with [`WindowError::InvalidRecord`], as do non-finite
//!   optional fields.
//! - Fewer than 2 usable records fail with
//!   [`WindowError::InsufficientData`].
//! - Records are stably sorted by timestamp descending (most recent
//!   first, input order preserved on ties) and truncated to 10.
//! - Missing optional fields (`sog`, `cog`, `heading`) default to 0.0
//!   rather than failing.

mod types;

pub use types::{
    PositionSample, RawNumber, RawPositionRecord, WindowError, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON,
};

use chrono::{DateTime, NaiveDateTime, Utc};

/// Maximum number of samples retained in a window.
pub const WINDOW_CAPACITY: usize = 10;

/// Minimum number of usable records required for any forecast.
pub const MIN_SAMPLES: usize = 2;

/// Timestamp format for legacy space-separated UTC strings.
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An ordered sequence of position samples, most recent first.
///
/// Built once per prediction request and never mutated afterwards.
/// Guaranteed to hold between [`MIN_SAMPLES`] and [`WINDOW_CAPACITY`]
/// samples, strictly ordered by timestamp descending (ties broken by
/// input order).
#[derive(Debug, Clone)]
pub struct TrajectoryWindow {
    samples: Vec<PositionSample>,
}

impl TrajectoryWindow {
    /// Build a window from raw position records.
    ///
    /// Records are validated, stably sorted by timestamp descending,
    /// and truncated to the [`WINDOW_CAPACITY`] most recent.
    ///
    /// # Errors
    ///
    /// - [`WindowError::InsufficientData`] if fewer than
    ///   [`MIN_SAMPLES`] records are supplied.
    /// - [`WindowError::InvalidRecord`] if a required field of any
    ///   record is unparseable or out of range.
    pub fn from_records(records: &[RawPositionRecord]) -> Result<Self, WindowError> {
        if records.len() < MIN_SAMPLES {
            return Err(WindowError::InsufficientData {
                required: MIN_SAMPLES,
                actual: records.len(),
            });
        }

        let mut samples = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            samples.push(Self::validate_record(index, record)?);
        }

        // Stable sort keeps input order for equal timestamps
        samples.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        samples.truncate(WINDOW_CAPACITY);

        tracing::debug!(
            supplied = records.len(),
            retained = samples.len(),
            "trajectory window built"
        );

        Ok(Self { samples })
    }

    /// Validate one raw record into a position sample.
    fn validate_record(
        index: usize,
        record: &RawPositionRecord,
    ) -> Result<PositionSample, WindowError> {
        let timestamp = parse_timestamp(&record.timestamp).ok_or_else(|| {
            WindowError::InvalidRecord {
                index,
                reason: format!("unparseable timestamp '{}'", record.timestamp),
            }
        })?;

        let latitude = coordinate(index, "latitude", &record.latitude, MIN_LAT, MAX_LAT)?;
        let longitude = coordinate(index, "longitude", &record.longitude, MIN_LON, MAX_LON)?;

        Ok(PositionSample {
            timestamp,
            latitude,
            longitude,
            sog: vector_field(index, "sog", record.sog.as_ref())?,
            cog: vector_field(index, "cog", record.cog.as_ref())?,
            heading: vector_field(index, "heading", record.heading.as_ref())?,
        })
    }

    /// Samples in time-descending order (most recent first).
    #[inline]
    pub fn samples(&self) -> &[PositionSample] {
        &self.samples
    }

    /// Number of samples in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the window holds no samples.
    ///
    /// Cannot happen for a window produced by `from_records`, which
    /// requires at least [`MIN_SAMPLES`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The most recent sample.
    #[inline]
    pub fn latest(&self) -> &PositionSample {
        &self.samples[0]
    }
}

/// Resolve a required coordinate field, checking range.
fn coordinate(
    index: usize,
    field: &str,
    raw: &RawNumber,
    min: f64,
    max: f64,
) -> Result<f64, WindowError> {
    let value = raw.as_f64().ok_or_else(|| WindowError::InvalidRecord {
        index,
        reason: format!("{} is not numeric: {:?}", field, raw),
    })?;
    if !value.is_finite() || !(min..=max).contains(&value) {
        return Err(WindowError::InvalidRecord {
            index,
            reason: format!("{} {} out of range", field, value),
        });
    }
    Ok(value)
}

/// Resolve an optional vector field (`sog`, `cog`, `heading`).
///
/// Absent fields default to 0.0; present fields must resolve to a
/// finite number.
fn vector_field(index: usize, field: &str, raw: Option<&RawNumber>) -> Result<f64, WindowError> {
    let raw = match raw {
        Some(raw) => raw,
        None => return Ok(0.0),
    };
    match raw.as_f64() {
        Some(value) if value.is_finite() => Ok(value),
        _ => Err(WindowError::InvalidRecord {
            index,
            reason: format!("{} is not a finite number: {:?}", field, raw),
        }),
    }
}

/// Parse a report timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T12:00:00Z`, with or without offset)
/// and the legacy space-separated format (`2024-05-01 12:00:00`),
/// which is interpreted as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, LEGACY_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
