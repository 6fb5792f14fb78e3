//! Quadrant classification of line segments.
//!
//! Given a node's box and a segment already known to overlap it, decide which
//! of the box's four quadrants the segment touches. This runs once per
//! segment per tree level during bulk loading, so the general case works from
//! six intercepts computed once per call instead of clipping the segment
//! against each quadrant separately.
//!
//! Quadrants are numbered `(lat_half << 1) | lon_half`:
//!
//! ```text
//! |---|---|
//! | 2 | 3 |
//! |---|---|
//! | 0 | 1 |
//! |---|---|
//! ```
//!
//! ## Boundary conventions
//!
//! Deciding which half an endpoint falls in uses a strict comparison against
//! the midline (`lat > lat_mid` is the upper half). The overlap test used for
//! oblique segments treats each quadrant as half-open on its max edges, see
//! [`BoundingBox`]. Edges on the world's max edge are closed.

use roadquad_types::{BoundingBox, LatLon, Segment};
use std::fmt;

/// One of the four quadrants of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quadrant(u8);

impl Quadrant {
    pub const SOUTH_WEST: Quadrant = Quadrant(0);
    pub const SOUTH_EAST: Quadrant = Quadrant(1);
    pub const NORTH_WEST: Quadrant = Quadrant(2);
    pub const NORTH_EAST: Quadrant = Quadrant(3);

    /// All four quadrants in index order.
    pub const ALL: [Quadrant; 4] = [
        Self::SOUTH_WEST,
        Self::SOUTH_EAST,
        Self::NORTH_WEST,
        Self::NORTH_EAST,
    ];

    #[inline]
    pub const fn new(lat_upper: bool, lon_upper: bool) -> Self {
        Quadrant(((lat_upper as u8) << 1) | lon_upper as u8)
    }

    /// Quadrant from its index `0..4`.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 4 {
            Some(Quadrant(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 1 for the upper latitude half, 0 for the lower.
    #[inline]
    pub const fn lat_half(self) -> usize {
        (self.0 >> 1) as usize
    }

    /// 1 for the upper longitude half, 0 for the lower.
    #[inline]
    pub const fn lon_half(self) -> usize {
        (self.0 & 1) as usize
    }

    /// This quadrant's box within `parent`.
    #[inline]
    pub fn bounds(self, parent: &BoundingBox) -> BoundingBox {
        parent.quadrant(self.lat_half() == 1, self.lon_half() == 1)
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.0 {
            0 => "south-west",
            1 => "south-east",
            2 => "north-west",
            _ => "north-east",
        };
        f.write_str(name)
    }
}

/// A subset of the four quadrants, stored as a 4-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QuadrantSet(u8);

impl QuadrantSet {
    pub const EMPTY: QuadrantSet = QuadrantSet(0);
    pub const FULL: QuadrantSet = QuadrantSet(0b1111);

    #[inline]
    pub const fn single(quadrant: Quadrant) -> Self {
        QuadrantSet(1 << quadrant.0)
    }

    #[inline]
    pub fn insert(&mut self, quadrant: Quadrant) {
        self.0 |= 1 << quadrant.0;
    }

    #[inline]
    pub const fn contains(self, quadrant: Quadrant) -> bool {
        self.0 & (1 << quadrant.0) != 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw mask, bit `i` set for quadrant index `i`.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Member quadrants in index order.
    pub fn iter(self) -> impl Iterator<Item = Quadrant> {
        Quadrant::ALL.into_iter().filter(move |q| self.contains(*q))
    }
}

impl FromIterator<Quadrant> for QuadrantSet {
    fn from_iter<I: IntoIterator<Item = Quadrant>>(iter: I) -> Self {
        let mut set = QuadrantSet::EMPTY;
        for quadrant in iter {
            set.insert(quadrant);
        }
        set
    }
}

/// Where the segment's infinite line crosses each grid line of a node box.
///
/// `lat_at_lon[i]` is the line's latitude at `lon_min`, `lon_mid`, `lon_max`
/// for `i = 0, 1, 2`; `lon_at_lat[i]` is its longitude at `lat_min`,
/// `lat_mid`, `lat_max`. Only valid for oblique segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intercepts {
    pub lat_at_lon: [f64; 3],
    pub lon_at_lat: [f64; 3],
    /// Latitude grows with longitude.
    pub rising: bool,
}

impl Intercepts {
    /// Intercepts of the line through `a` and `b` with the 3x3 grid of
    /// `bbox`. The caller guarantees `a.lat != b.lat` and `a.lon != b.lon`.
    #[inline]
    pub fn compute(a: LatLon, b: LatLon, bbox: &BoundingBox) -> Self {
        let slope = (b.lat - a.lat) / (b.lon - a.lon);
        let offset = a.lat - slope * a.lon;
        let lons = [bbox.lon_min, bbox.lon_mid(), bbox.lon_max];
        let lats = [bbox.lat_min, bbox.lat_mid(), bbox.lat_max];
        Self {
            lat_at_lon: lons.map(|lon| slope * lon + offset),
            lon_at_lat: lats.map(|lat| (lat - offset) / slope),
            rising: slope > 0.0,
        }
    }

    /// The three intercepts [`overlaps`] needs for one quadrant.
    #[inline]
    pub fn for_quadrant(&self, quadrant: Quadrant) -> QuadrantIntercepts {
        let lat_half = quadrant.lat_half();
        let lon_half = quadrant.lon_half();
        QuadrantIntercepts {
            lat_at_lon_min: self.lat_at_lon[lon_half],
            lat_at_lon_max: self.lat_at_lon[lon_half + 1],
            lon_at_lat_min: self.lon_at_lat[lat_half],
            rising: self.rising,
        }
    }
}

/// Intercepts of a segment's line with three edges of one box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrantIntercepts {
    pub lat_at_lon_min: f64,
    pub lat_at_lon_max: f64,
    pub lon_at_lat_min: f64,
    pub rising: bool,
}

/// Whether the oblique segment `a`-`b` overlaps `bbox`.
///
/// Rules are applied in order and the first one that fires decides:
///
/// 1. An endpoint inside the box means overlap.
/// 2. Both endpoints past the same edge means no overlap.
/// 3. Otherwise the segment either crosses the boundary twice or not at all,
///    and three of the four edge crossings are enough to tell which. The
///    latitude-at-`lon_max` crossing sits on an open edge; when it lands
///    exactly on the open `(lat_min, lon_max)` corner and the line rises, the
///    line only grazes that corner and does not count.
#[inline]
pub fn overlaps(a: LatLon, b: LatLon, bbox: &BoundingBox, intercepts: QuadrantIntercepts) -> bool {
    if bbox.contains(a) || bbox.contains(b) {
        return true;
    }

    if (bbox.beyond_lat_max(a.lat) && bbox.beyond_lat_max(b.lat))
        || (a.lat < bbox.lat_min && b.lat < bbox.lat_min)
        || (bbox.beyond_lon_max(a.lon) && bbox.beyond_lon_max(b.lon))
        || (a.lon < bbox.lon_min && b.lon < bbox.lon_min)
    {
        return false;
    }

    let grazes_corner = intercepts.rising
        && intercepts.lat_at_lon_max == bbox.lat_min
        && !bbox.below_lon_max(bbox.lon_max);

    bbox.contains_lat(intercepts.lat_at_lon_min)
        || (bbox.contains_lat(intercepts.lat_at_lon_max) && !grazes_corner)
        || bbox.contains_lon(intercepts.lon_at_lat_min)
}

/// Quadrants of `bbox` that the segment `a`-`b` overlaps.
///
/// The segment must already overlap `bbox`; for such segments the result is
/// never empty unless a coordinate is NaN.
pub fn classify_endpoints(bbox: &BoundingBox, a: LatLon, b: LatLon) -> QuadrantSet {
    let lat_mid = bbox.lat_mid();
    let lon_mid = bbox.lon_mid();
    let a_north = a.lat > lat_mid;
    let a_east = a.lon > lon_mid;
    let b_north = b.lat > lat_mid;
    let b_east = b.lon > lon_mid;

    if a_north == b_north && a_east == b_east {
        return QuadrantSet::single(Quadrant::new(a_north, a_east));
    }

    if a.lat == b.lat {
        // East-west: both quadrants of the endpoints' row.
        let mut set = QuadrantSet::single(Quadrant::new(a_north, false));
        set.insert(Quadrant::new(a_north, true));
        return set;
    }

    if a.lon == b.lon {
        // North-south: both quadrants of the endpoints' column.
        let mut set = QuadrantSet::single(Quadrant::new(false, a_east));
        set.insert(Quadrant::new(true, a_east));
        return set;
    }

    let intercepts = Intercepts::compute(a, b, bbox);
    let mut set = QuadrantSet::EMPTY;
    for quadrant in Quadrant::ALL {
        if overlaps(a, b, &quadrant.bounds(bbox), intercepts.for_quadrant(quadrant)) {
            set.insert(quadrant);
        }
    }
    set
}

/// Quadrants of `bbox` that `segment` overlaps. See [`classify_endpoints`].
#[inline]
pub fn classify(bbox: &BoundingBox, segment: &Segment) -> QuadrantSet {
    classify_endpoints(bbox, segment.a, segment.b)
}
