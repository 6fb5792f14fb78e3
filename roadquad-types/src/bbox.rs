use crate::point::LatLon;
use geo::{Rect, coord};
use serde::{Deserialize, Serialize};

/// Maximum latitude of the world box.
pub const WORLD_LAT_MAX: f64 = 90.0;
/// Maximum longitude of the world box.
pub const WORLD_LON_MAX: f64 = 180.0;

/// An axis-aligned latitude/longitude box.
///
/// Membership is half-open: `lat_min <= lat < lat_max` and
/// `lon_min <= lon < lon_max`, so the four quadrants of a box never share a
/// point. The one exception is a max edge lying on the world's max edge
/// (`lat_max == 90` or `lon_max == 180`), which is closed so that positions on
/// the north edge or the antimeridian still belong to some box.
///
/// # Examples
///
/// ```
/// use roadquad_types::{BoundingBox, LatLon};
///
/// let bbox = BoundingBox::new(0.0, 20.0, -10.0, 10.0);
/// assert_eq!(bbox.lat_mid(), 10.0);
/// assert!(bbox.contains(LatLon::new(0.0, -10.0)));
/// assert!(!bbox.contains(LatLon::new(20.0, 0.0)));
///
/// let north_east = bbox.quadrant(true, true);
/// assert_eq!(north_east, BoundingBox::new(10.0, 20.0, 0.0, 10.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// The whole world, `lat ∈ [-90, 90]`, `lon ∈ [-180, 180]`.
    pub const WORLD: BoundingBox = BoundingBox {
        lat_min: -90.0,
        lat_max: WORLD_LAT_MAX,
        lon_min: -180.0,
        lon_max: WORLD_LON_MAX,
    };

    /// Create a box from its latitude and longitude ranges.
    pub const fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Latitude that bisects the box.
    #[inline]
    pub fn lat_mid(&self) -> f64 {
        self.lat_max - (self.lat_max - self.lat_min) / 2.0
    }

    /// Longitude that bisects the box.
    #[inline]
    pub fn lon_mid(&self) -> f64 {
        self.lon_max - (self.lon_max - self.lon_min) / 2.0
    }

    /// Latitude extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Longitude extent in degrees.
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Center of the box.
    pub fn center(&self) -> LatLon {
        LatLon::new(self.lat_mid(), self.lon_mid())
    }

    /// One of the four boxes obtained by bisecting both ranges.
    ///
    /// The split coordinate is computed with the same expression as
    /// [`lat_mid`](Self::lat_mid) / [`lon_mid`](Self::lon_mid), so adjacent
    /// quadrants share bit-identical edges.
    pub fn quadrant(&self, lat_upper: bool, lon_upper: bool) -> BoundingBox {
        let lat_mid = self.lat_mid();
        let lon_mid = self.lon_mid();
        let (lat_min, lat_max) = if lat_upper {
            (lat_mid, self.lat_max)
        } else {
            (self.lat_min, lat_mid)
        };
        let (lon_min, lon_max) = if lon_upper {
            (lon_mid, self.lon_max)
        } else {
            (self.lon_min, lon_mid)
        };
        BoundingBox::new(lat_min, lat_max, lon_min, lon_max)
    }

    /// Whether `lat` is below this box's max latitude.
    #[inline]
    pub fn below_lat_max(&self, lat: f64) -> bool {
        lat < self.lat_max || (lat == self.lat_max && self.lat_max == WORLD_LAT_MAX)
    }

    /// Whether `lon` is below this box's max longitude.
    #[inline]
    pub fn below_lon_max(&self, lon: f64) -> bool {
        lon < self.lon_max || (lon == self.lon_max && self.lon_max == WORLD_LON_MAX)
    }

    /// Whether `lat` is at or past this box's max latitude. NaN is never beyond.
    #[inline]
    pub fn beyond_lat_max(&self, lat: f64) -> bool {
        lat > self.lat_max || (lat == self.lat_max && self.lat_max != WORLD_LAT_MAX)
    }

    /// Whether `lon` is at or past this box's max longitude. NaN is never beyond.
    #[inline]
    pub fn beyond_lon_max(&self, lon: f64) -> bool {
        lon > self.lon_max || (lon == self.lon_max && self.lon_max != WORLD_LON_MAX)
    }

    /// Whether `lat` falls in the box's latitude range.
    #[inline]
    pub fn contains_lat(&self, lat: f64) -> bool {
        self.lat_min <= lat && self.below_lat_max(lat)
    }

    /// Whether `lon` falls in the box's longitude range.
    #[inline]
    pub fn contains_lon(&self, lon: f64) -> bool {
        self.lon_min <= lon && self.below_lon_max(lon)
    }

    /// Whether a position lies inside the box.
    #[inline]
    pub fn contains(&self, pos: LatLon) -> bool {
        self.contains_lat(pos.lat) && self.contains_lon(pos.lon)
    }

    /// Convert to a `geo::Rect` (x = longitude, y = latitude).
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.lon_min, y: self.lat_min },
            coord! { x: self.lon_max, y: self.lat_max },
        )
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::WORLD
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        Self::new(rect.min().y, rect.max().y, rect.min().x, rect.max().x)
    }
}

impl From<BoundingBox> for Rect<f64> {
    fn from(bbox: BoundingBox) -> Self {
        bbox.to_rect()
    }
}
