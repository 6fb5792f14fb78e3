//! Quantized coordinates and quadtree node keys.
//!
//! Latitude `[-90, 90]` and longitude `[-180, 180]` map linearly onto the
//! full `u32` range. At depth `d` the quadtree splits on bit `31 - d` of each
//! quantized coordinate, so a node is identified by the `d`-bit prefixes of
//! the latitude and longitude indices of every point inside it.
//!
//! ```text
//!   [lat bit][lon bit]
//!
//!   |-----------------|
//!   | [1][0] | [1][1] |
//!   |--------+--------|
//!   | [0][0] | [0][1] |
//!   |-----------------|
//! ```

use crate::compute::Quadrant;
use roadquad_types::{BoundingBox, LatLon};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of bits in a quantized coordinate.
pub const INDEX_BITS: u32 = u32::BITS;

/// Quantize a latitude. Values outside `[-90, 90]` saturate, NaN maps to 0.
#[inline]
pub fn lat_to_index(lat: f64) -> u32 {
    ((lat + 90.0) / 180.0 * u32::MAX as f64) as u32
}

/// Quantize a longitude. Values outside `[-180, 180]` saturate, NaN maps to 0.
#[inline]
pub fn lon_to_index(lon: f64) -> u32 {
    ((lon + 180.0) / 360.0 * u32::MAX as f64) as u32
}

/// Latitude and longitude indices of a position.
#[inline]
pub fn quantize(pos: LatLon) -> (u32, u32) {
    (lat_to_index(pos.lat), lon_to_index(pos.lon))
}

/// Path of a node from the root, one latitude bit and one longitude bit per
/// level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NodeKey {
    depth: u32,
    lat_bits: u32,
    lon_bits: u32,
}

impl NodeKey {
    /// Key of the root node.
    pub const ROOT: NodeKey = NodeKey {
        depth: 0,
        lat_bits: 0,
        lon_bits: 0,
    };

    /// Key of the depth-`depth` node containing the given quantized
    /// coordinates.
    pub fn from_index(depth: u32, lat_index: u32, lon_index: u32) -> Self {
        let depth = depth.min(INDEX_BITS);
        Self {
            depth,
            lat_bits: prefix(lat_index, depth),
            lon_bits: prefix(lon_index, depth),
        }
    }

    /// Key of the child in `quadrant`.
    pub fn child(&self, quadrant: Quadrant) -> NodeKey {
        debug_assert!(self.depth < INDEX_BITS, "node key is already at full depth");
        NodeKey {
            depth: self.depth + 1,
            lat_bits: (self.lat_bits << 1) | quadrant.lat_half() as u32,
            lon_bits: (self.lon_bits << 1) | quadrant.lon_half() as u32,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn lat_bits(&self) -> u32 {
        self.lat_bits
    }

    pub fn lon_bits(&self) -> u32 {
        self.lon_bits
    }

    /// Number of low bits not yet fixed by the path (32 at the root).
    pub fn bit_index(&self) -> u32 {
        INDEX_BITS - self.depth
    }

    /// Bit of the latitude index that separates this node's children, or
    /// `None` at full depth.
    pub fn lat_mask(&self) -> Option<u32> {
        self.split_mask()
    }

    /// Bit of the longitude index that separates this node's children, or
    /// `None` at full depth.
    pub fn lon_mask(&self) -> Option<u32> {
        self.split_mask()
    }

    fn split_mask(&self) -> Option<u32> {
        (self.depth < INDEX_BITS).then(|| 1u32 << (INDEX_BITS - 1 - self.depth))
    }

    /// Whether the quantized coordinates fall under this node.
    #[inline]
    pub fn contains_index(&self, lat_index: u32, lon_index: u32) -> bool {
        prefix(lat_index, self.depth) == self.lat_bits
            && prefix(lon_index, self.depth) == self.lon_bits
    }

    /// Whether a position falls under this node, up to quantization rounding
    /// at the node's edges.
    pub fn contains(&self, pos: LatLon) -> bool {
        let (lat_index, lon_index) = quantize(pos);
        self.contains_index(lat_index, lon_index)
    }

    /// The node's box, rebuilt from the key alone.
    pub fn bounds(&self) -> BoundingBox {
        let world = BoundingBox::WORLD;
        let cells = (1u64 << self.depth) as f64;
        let lat_step = world.lat_span() / cells;
        let lon_step = world.lon_span() / cells;
        let lat_min = world.lat_min + self.lat_bits as f64 * lat_step;
        let lon_min = world.lon_min + self.lon_bits as f64 * lon_step;
        BoundingBox::new(lat_min, lat_min + lat_step, lon_min, lon_min + lon_step)
    }
}

impl fmt::Display for NodeKey {
    /// Quadrant digits from the root down, e.g. `"30"`; the root is `"-"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.depth == 0 {
            return f.write_str("-");
        }
        for level in (0..self.depth).rev() {
            let lat = (self.lat_bits >> level) & 1;
            let lon = (self.lon_bits >> level) & 1;
            write!(f, "{}", (lat << 1) | lon)?;
        }
        Ok(())
    }
}

#[inline]
fn prefix(index: u32, depth: u32) -> u32 {
    if depth == 0 {
        0
    } else {
        index >> (INDEX_BITS - depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_endpoints() {
        assert_eq!(lat_to_index(-90.0), 0);
        assert_eq!(lat_to_index(90.0), u32::MAX);
        assert_eq!(lon_to_index(-180.0), 0);
        assert_eq!(lon_to_index(180.0), u32::MAX);
        assert_eq!(lat_to_index(0.0) >> 31, 0);
        assert_eq!(lat_to_index(0.001) >> 31, 1);
    }

    #[test]
    fn test_index_saturates() {
        assert_eq!(lat_to_index(-1000.0), 0);
        assert_eq!(lat_to_index(1000.0), u32::MAX);
        assert_eq!(lon_to_index(f64::NAN), 0);
    }

    #[test]
    fn test_root_masks() {
        let root = NodeKey::ROOT;
        assert_eq!(root.bit_index(), 32);
        assert_eq!(root.lat_mask(), Some(1 << 31));
        assert_eq!(root.lon_mask(), Some(1 << 31));
        assert!(root.contains_index(0, u32::MAX));
        assert_eq!(root.to_string(), "-");
    }

    #[test]
    fn test_child_path() {
        let key = NodeKey::ROOT
            .child(Quadrant::NORTH_EAST)
            .child(Quadrant::SOUTH_WEST)
            .child(Quadrant::SOUTH_EAST);
        assert_eq!(key.depth(), 3);
        assert_eq!(key.lat_bits(), 0b100);
        assert_eq!(key.lon_bits(), 0b101);
        assert_eq!(key.bit_index(), 29);
        assert_eq!(key.lat_mask(), Some(1 << 28));
        assert_eq!(key.to_string(), "301");
    }

    #[test]
    fn test_full_depth_has_no_mask() {
        let key = NodeKey::from_index(32, 7, 9);
        assert_eq!(key.bit_index(), 0);
        assert_eq!(key.lat_mask(), None);
        assert!(key.contains_index(7, 9));
        assert!(!key.contains_index(8, 9));
    }

    #[test]
    fn test_bounds_match_bisection() {
        let mut bbox = BoundingBox::WORLD;
        let mut key = NodeKey::ROOT;
        for quadrant in [
            Quadrant::NORTH_WEST,
            Quadrant::SOUTH_EAST,
            Quadrant::SOUTH_EAST,
            Quadrant::NORTH_EAST,
            Quadrant::SOUTH_WEST,
        ] {
            bbox = quadrant.bounds(&bbox);
            key = key.child(quadrant);
            assert_eq!(key.bounds(), bbox);
        }
    }

    #[test]
    fn test_contains_position() {
        let seattle = LatLon::new(47.6062, -122.3321);
        let (lat_index, lon_index) = quantize(seattle);
        for depth in 0..=20 {
            let key = NodeKey::from_index(depth, lat_index, lon_index);
            assert!(key.contains(seattle));
            assert!(key.bounds().contains(seattle), "depth {}", depth);
        }
        let north_west = NodeKey::ROOT.child(Quadrant::NORTH_WEST);
        assert!(north_west.contains(seattle));
        assert!(!NodeKey::ROOT.child(Quadrant::NORTH_EAST).contains(seattle));
    }
}
