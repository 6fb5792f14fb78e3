use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

/// A geographic position in degrees.
///
/// Latitude is stored first because the index and the edge geometry files
/// both order coordinates that way. Conversions to `geo` types place
/// longitude on the x axis and latitude on the y axis.
///
/// # Examples
///
/// ```
/// use roadquad_types::LatLon;
/// use geo::Point;
///
/// let pos = LatLon::new(47.6062, -122.3321);
/// let point: Point = pos.into();
/// assert_eq!(point.x(), -122.3321);
/// assert_eq!(point.y(), 47.6062);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLon {
    /// Latitude in degrees, nominally `[-90, 90]`
    pub lat: f64,
    /// Longitude in degrees, nominally `[-180, 180]`
    pub lon: f64,
}

impl LatLon {
    /// Create a new position from latitude and longitude.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether both components are finite (neither NaN nor infinite).
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Whether the position lies inside the world range, inclusive on both ends.
    pub fn in_world_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<LatLon> for Coord<f64> {
    fn from(pos: LatLon) -> Self {
        Coord {
            x: pos.lon,
            y: pos.lat,
        }
    }
}

impl From<LatLon> for Point<f64> {
    fn from(pos: LatLon) -> Self {
        Point::new(pos.lon, pos.lat)
    }
}

impl From<Point<f64>> for LatLon {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<Coord<f64>> for LatLon {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<(f64, f64)> for LatLon {
    /// Interprets the tuple as `(lat, lon)`.
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_axis_order() {
        let pos = LatLon::new(10.0, 20.0);
        let coord: Coord = pos.into();
        assert_eq!(coord.x, 20.0);
        assert_eq!(coord.y, 10.0);
        assert_eq!(LatLon::from(coord), pos);
        assert_eq!(LatLon::from(Point::new(20.0, 10.0)), pos);
    }

    #[test]
    fn test_world_range() {
        assert!(LatLon::new(90.0, 180.0).in_world_range());
        assert!(LatLon::new(-90.0, -180.0).in_world_range());
        assert!(!LatLon::new(90.5, 0.0).in_world_range());
        assert!(!LatLon::new(0.0, -180.1).in_world_range());
        assert!(!LatLon::new(f64::NAN, 0.0).in_world_range());
    }

    #[test]
    fn test_finite() {
        assert!(LatLon::new(1.0, 2.0).is_finite());
        assert!(!LatLon::new(f64::INFINITY, 2.0).is_finite());
        assert!(!LatLon::new(1.0, f64::NAN).is_finite());
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_string(&LatLon::new(1.5, -2.5)).unwrap();
        assert_eq!(json, r#"{"lat":1.5,"lon":-2.5}"#);
    }
}
