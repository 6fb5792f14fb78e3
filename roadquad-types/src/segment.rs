use crate::bbox::BoundingBox;
use crate::point::LatLon;
use geo::Line;
use serde::{Deserialize, Serialize};

/// Dense insertion index of a segment inside its store.
pub type SegmentId = u32;

/// Identifier of the road-network edge a segment belongs to.
pub type EdgeId = u32;

/// A straight piece of a road-network edge.
///
/// Segments are immutable once stored; quadtree nodes refer to them by
/// [`SegmentId`] rather than holding copies.
///
/// # Examples
///
/// ```
/// use roadquad_types::{LatLon, Segment};
///
/// let seg = Segment::new(3, 1001, LatLon::new(10.0, -5.0), LatLon::new(10.0, 5.0));
/// assert!(seg.is_horizontal());
/// assert!(!seg.is_vertical());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub edge_id: EdgeId,
    pub a: LatLon,
    pub b: LatLon,
}

impl Segment {
    pub const fn new(id: SegmentId, edge_id: EdgeId, a: LatLon, b: LatLon) -> Self {
        Self { id, edge_id, a, b }
    }

    /// Both endpoints share a latitude (runs east-west).
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.a.lat == self.b.lat
    }

    /// Both endpoints share a longitude (runs north-south).
    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.a.lon == self.b.lon
    }

    /// Tight box around both endpoints (closed on every side).
    pub fn envelope(&self) -> BoundingBox {
        BoundingBox::new(
            self.a.lat.min(self.b.lat),
            self.a.lat.max(self.b.lat),
            self.a.lon.min(self.b.lon),
            self.a.lon.max(self.b.lon),
        )
    }

    /// The segment as a `geo::Line` (x = longitude, y = latitude).
    pub fn to_line(&self) -> Line<f64> {
        Line::new(self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation() {
        let oblique = Segment::new(0, 1, LatLon::new(0.0, -5.0), LatLon::new(20.0, 5.0));
        assert!(!oblique.is_horizontal());
        assert!(!oblique.is_vertical());

        let vertical = Segment::new(1, 1, LatLon::new(0.0, 5.0), LatLon::new(20.0, 5.0));
        assert!(vertical.is_vertical());
    }

    #[test]
    fn test_envelope_normalizes_order() {
        let seg = Segment::new(0, 1, LatLon::new(20.0, 5.0), LatLon::new(0.0, -5.0));
        assert_eq!(seg.envelope(), BoundingBox::new(0.0, 20.0, -5.0, 5.0));
    }

    #[test]
    fn test_to_line() {
        let seg = Segment::new(0, 1, LatLon::new(1.0, 2.0), LatLon::new(3.0, 4.0));
        let line = seg.to_line();
        assert_eq!(line.start.x, 2.0);
        assert_eq!(line.start.y, 1.0);
        assert_eq!(line.end.x, 4.0);
        assert_eq!(line.end.y, 3.0);
    }
}
