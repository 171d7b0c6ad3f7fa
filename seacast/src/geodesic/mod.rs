//! Great-circle navigation math for vessel position forecasting.
//!
//! This module provides the geodesic primitives used by every forecast
//! strategy: haversine distance, initial bearing, and destination-point
//! projection on a spherical Earth model.
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Bearing: degrees true (0-360, 0=north, 90=east)
//! - Distance: meters
//!
//! All functions are pure and total; none allocates or performs I/O.

use std::f64::consts::PI;

/// Earth's mean radius in meters (spherical model).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per second in one knot.
///
/// Used to convert AIS speed-over-ground (knots) into m/s.
pub const MPS_PER_KNOT: f64 = 0.514444;

/// Degrees to radians conversion factor.
const DEG_TO_RAD: f64 = PI / 180.0;

/// Radians to degrees conversion factor.
const RAD_TO_DEG: f64 = 180.0 / PI;

/// Calculate the great-circle distance between two positions.
///
/// Uses the haversine formula, which is numerically stable for the
/// short to medium distances a vessel covers between AIS fixes.
///
/// # Arguments
///
/// * `from` - First position as (latitude, longitude) in degrees
/// * `to` - Second position as (latitude, longitude) in degrees
///
/// # Returns
///
/// Distance in meters. Zero for identical points; symmetric in its
/// arguments.
///
/// # Example
///
/// ```
/// use seacast::geodesic::distance_m;
///
/// // One degree of latitude is ~111.2 km
/// let dist = distance_m((0.0, 0.0), (1.0, 0.0));
/// assert!((dist - 111_195.0).abs() < 100.0);
/// ```
pub fn distance_m(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;

    let lat1_rad = lat1 * DEG_TO_RAD;
    let lat2_rad = lat2 * DEG_TO_RAD;
    let delta_lat = (lat2 - lat1) * DEG_TO_RAD;
    let delta_lon = (lon2 - lon1) * DEG_TO_RAD;

    // Haversine formula
    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Calculate the initial bearing from one position to another.
///
/// Returns the forward azimuth (direction to travel from `from` to
/// `to`) along the great circle.
///
/// # Arguments
///
/// * `from` - Starting position as (latitude, longitude) in degrees
/// * `to` - Ending position as (latitude, longitude) in degrees
///
/// # Returns
///
/// Bearing in degrees (0-360, 0=north, 90=east). The result for two
/// identical points is unspecified; callers must not rely on it.
///
/// # Example
///
/// ```
/// use seacast::geodesic::bearing_between;
///
/// // Bearing from the origin to a point due east
/// let bearing = bearing_between((0.0, 0.0), (0.0, 1.0));
/// assert!((bearing - 90.0).abs() < 0.1);
/// ```
pub fn bearing_between(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;

    let lat1_rad = lat1 * DEG_TO_RAD;
    let lat2_rad = lat2 * DEG_TO_RAD;
    let delta_lon = (lon2 - lon1) * DEG_TO_RAD;

    let y = delta_lon.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lon.cos();

    normalize_bearing(y.atan2(x) * RAD_TO_DEG)
}

/// Project a position along a bearing for a given distance.
///
/// Uses the spherical destination-point formula. This is the inverse of
/// the distance/bearing pair up to spherical-model rounding, so
/// `distance_m(p, project_position(p, b, d)) ≈ d` for distances small
/// relative to the Earth radius.
///
/// # Arguments
///
/// * `start` - Starting position as (latitude, longitude) in degrees
/// * `bearing_deg` - True bearing in degrees (0-360)
/// * `distance_m` - Distance to project in meters
///
/// # Returns
///
/// New position as (latitude, longitude) in degrees, with longitude
/// normalized to -180..180.
///
/// # Example
///
/// ```
/// use seacast::geodesic::project_position;
///
/// // Project ~111 km north from the equator
/// let (lat, lon) = project_position((0.0, 0.0), 0.0, 111_195.0);
/// assert!((lat - 1.0).abs() < 0.01);
/// assert!(lon.abs() < 0.001);
/// ```
pub fn project_position(start: (f64, f64), bearing_deg: f64, distance_m: f64) -> (f64, f64) {
    let (lat1, lon1) = start;
    let lat1_rad = lat1 * DEG_TO_RAD;
    let lon1_rad = lon1 * DEG_TO_RAD;
    let bearing_rad = bearing_deg * DEG_TO_RAD;
    let angular_distance = distance_m / EARTH_RADIUS_M;

    let sin_lat1 = lat1_rad.sin();
    let cos_lat1 = lat1_rad.cos();
    let sin_d = angular_distance.sin();
    let cos_d = angular_distance.cos();

    let lat2_rad = (sin_lat1 * cos_d + cos_lat1 * sin_d * bearing_rad.cos()).asin();

    let lon2_rad =
        lon1_rad + (bearing_rad.sin() * sin_d * cos_lat1).atan2(cos_d - sin_lat1 * lat2_rad.sin());

    let lat2 = lat2_rad * RAD_TO_DEG;
    let mut lon2 = lon2_rad * RAD_TO_DEG;

    // Normalize longitude to -180..180
    if lon2 > 180.0 {
        lon2 -= 360.0;
    } else if lon2 < -180.0 {
        lon2 += 360.0;
    }

    (lat2, lon2)
}

/// Normalize a bearing to the range [0, 360) degrees.
///
/// Handles negative bearings and values >= 360 by wrapping
/// appropriately.
///
/// # Example
///
/// ```
/// use seacast::geodesic::normalize_bearing;
///
/// assert_eq!(normalize_bearing(0.0), 0.0);
/// assert_eq!(normalize_bearing(360.0), 0.0);
/// assert_eq!(normalize_bearing(-90.0), 270.0);
/// assert_eq!(normalize_bearing(450.0), 90.0);
/// ```
pub fn normalize_bearing(bearing: f64) -> f64 {
    let mut b = bearing % 360.0;
    if b < 0.0 {
        b += 360.0;
    }
    b
}
