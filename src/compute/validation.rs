//! Validation for geographic coordinates.
//!
//! Only consulted when the index runs with `CoordinatePolicy::Reject`; the
//! default permissive policy stores whatever it is given.

use crate::error::{IndexError, Result};
use roadquad_types::LatLon;

/// Validates that a position is finite and inside the world range.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use roadquad::compute::validation::validate_lat_lon;
/// use roadquad::LatLon;
///
/// assert!(validate_lat_lon(LatLon::new(47.6, -122.3)).is_ok());
/// assert!(validate_lat_lon(LatLon::new(95.0, 0.0)).is_err());
/// assert!(validate_lat_lon(LatLon::new(0.0, f64::NAN)).is_err());
/// ```
pub fn validate_lat_lon(pos: LatLon) -> Result<()> {
    let reason = if !pos.lat.is_finite() {
        "latitude must be finite"
    } else if !pos.lon.is_finite() {
        "longitude must be finite"
    } else if !(-90.0..=90.0).contains(&pos.lat) {
        "latitude out of range [-90.0, 90.0]"
    } else if !(-180.0..=180.0).contains(&pos.lon) {
        "longitude out of range [-180.0, 180.0]"
    } else {
        return Ok(());
    };

    Err(IndexError::InvalidCoordinate {
        lat: pos.lat,
        lon: pos.lon,
        reason: reason.to_string(),
    })
}

/// Validates both endpoints of a segment.
pub fn validate_segment(a: LatLon, b: LatLon) -> Result<()> {
    validate_lat_lon(a)?;
    validate_lat_lon(b)
}

/// Validates every vertex of a polyline, reporting the first bad index.
pub fn validate_polyline(points: &[LatLon]) -> Result<()> {
    for (idx, pos) in points.iter().enumerate() {
        validate_lat_lon(*pos).map_err(|e| match e {
            IndexError::InvalidCoordinate { lat, lon, reason } => IndexError::InvalidCoordinate {
                lat,
                lon,
                reason: format!("point at index {}: {}", idx, reason),
            },
            other => other,
        })?;
    }
    Ok(())
}
