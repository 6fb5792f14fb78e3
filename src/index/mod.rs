//! The segment index: an append-only segment store plus the quadtree built
//! over it.

pub mod node;
#[cfg(feature = "sync")]
mod sync;

pub use node::{Descendants, QuadNode};
#[cfg(feature = "sync")]
pub use sync::SyncSegmentIndex;

use crate::builder::IndexBuilder;
use crate::compute::validation::{validate_polyline, validate_segment};
use crate::config::{CoordinatePolicy, IndexConfig, IndexStats};
use crate::error::{IndexError, Result};
use crate::geometry::{EdgeGeometryReader, LoadSummary};
use crate::store::SegmentStore;
use node::NodeLimits;
use roadquad_types::{EdgeId, LatLon, Segment, SegmentId};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::Path;

/// Quadtree index over road segments covering the whole world.
///
/// Segments are only ever added. Each one is stored once in the segment
/// store and referenced by id from every leaf whose box it overlaps.
///
/// # Examples
///
/// ```rust
/// use roadquad::{LatLon, SegmentIndex};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut index = SegmentIndex::new();
///
/// let id = index.insert(17, 47.61, -122.34, 47.62, -122.35)?;
/// assert_eq!(id, 0);
///
/// let ids = index.insert_polyline(
///     18,
///     &[
///         LatLon::new(47.60, -122.30),
///         LatLon::new(47.61, -122.31),
///         LatLon::new(47.62, -122.31),
///     ],
/// )?;
/// assert_eq!(ids, 1..3);
/// assert_eq!(index.len(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SegmentIndex {
    config: IndexConfig,
    store: SegmentStore,
    root: QuadNode,
}

impl SegmentIndex {
    /// Empty index with the default configuration.
    pub fn new() -> Self {
        Self::from_parts(IndexConfig::default())
    }

    /// Empty index with a custom configuration.
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate().map_err(IndexError::InvalidConfig)?;
        Ok(Self::from_parts(config))
    }

    /// Start building an index.
    pub fn builder() -> IndexBuilder {
        IndexBuilder::new()
    }

    fn from_parts(config: IndexConfig) -> Self {
        log::debug!(
            "creating segment index (leaf threshold {}, max depth {}, {:?} coordinates)",
            config.leaf_threshold,
            config.max_depth,
            config.coordinate_policy
        );
        let store = match config.segment_capacity {
            Some(capacity) => SegmentStore::with_capacity(capacity),
            None => SegmentStore::new(),
        };
        Self {
            config,
            store,
            root: QuadNode::root(),
        }
    }

    fn limits(&self) -> NodeLimits {
        NodeLimits {
            leaf_threshold: self.config.leaf_threshold,
            max_depth: self.config.max_depth,
        }
    }

    fn rejects_invalid(&self) -> bool {
        self.config.coordinate_policy == CoordinatePolicy::Reject
    }

    /// Store a segment and index it. Returns the new segment's id, which is
    /// the number of segments inserted before it.
    pub fn insert(
        &mut self,
        edge_id: EdgeId,
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    ) -> Result<SegmentId> {
        self.insert_segment(edge_id, LatLon::new(lat1, lon1), LatLon::new(lat2, lon2))
    }

    /// Same as [`insert`](Self::insert) with endpoints given as positions.
    pub fn insert_segment(&mut self, edge_id: EdgeId, a: LatLon, b: LatLon) -> Result<SegmentId> {
        if self.rejects_invalid() {
            if let Err(e) = validate_segment(a, b) {
                log::warn!("rejecting segment of edge {}: {}", edge_id, e);
                return Err(e);
            }
        }
        self.push(edge_id, a, b)
    }

    fn push(&mut self, edge_id: EdgeId, a: LatLon, b: LatLon) -> Result<SegmentId> {
        let id = self.store.append(edge_id, a, b)?;
        let limits = self.limits();
        self.root.insert(id, self.store.as_slice(), limits);
        Ok(id)
    }

    /// Split a polyline into consecutive segments tagged with `edge_id` and
    /// insert them in order. Returns the range of ids handed out.
    ///
    /// With `CoordinatePolicy::Reject` every vertex is checked before
    /// anything is inserted, so a bad vertex leaves the index unchanged.
    pub fn insert_polyline(&mut self, edge_id: EdgeId, points: &[LatLon]) -> Result<Range<SegmentId>> {
        if points.len() < 2 {
            return Err(IndexError::PolylineTooShort {
                edge_id,
                points: points.len(),
            });
        }
        if self.rejects_invalid() {
            if let Err(e) = validate_polyline(points) {
                log::warn!("rejecting polyline of edge {}: {}", edge_id, e);
                return Err(e);
            }
        }

        let start = self.push(edge_id, points[0], points[1])?;
        let mut end = start + 1;
        for pair in points[1..].windows(2) {
            end = self.push(edge_id, pair[0], pair[1])? + 1;
        }
        Ok(start..end)
    }

    /// Insert every edge of a caret-delimited geometry stream.
    ///
    /// Edges with fewer than two points are skipped. Parse errors abort the
    /// load; edges read before the error stay indexed.
    pub fn load_edge_geometry<R: BufRead>(&mut self, reader: R) -> Result<LoadSummary> {
        let mut summary = LoadSummary::default();
        for edge in EdgeGeometryReader::new(reader) {
            let edge = edge?;
            if edge.points.len() < 2 {
                log::warn!(
                    "skipping edge {} with {} point(s)",
                    edge.edge_id,
                    edge.points.len()
                );
                summary.skipped_edges += 1;
                continue;
            }
            let ids = self.insert_polyline(edge.edge_id, &edge.points)?;
            summary.edges += 1;
            summary.segments += ids.len();
        }
        log::debug!(
            "loaded {} edges ({} segments, {} skipped)",
            summary.edges,
            summary.segments,
            summary.skipped_edges
        );
        Ok(summary)
    }

    /// Open `path` and [`load_edge_geometry`](Self::load_edge_geometry) from it.
    pub fn load_edge_geometry_file<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadSummary> {
        let file = File::open(path.as_ref())?;
        log::debug!("loading edge geometry from {}", path.as_ref().display());
        self.load_edge_geometry(BufReader::new(file))
    }

    #[inline]
    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.store.get(id)
    }

    pub fn segments(&self) -> &SegmentStore {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Root node, whose box is the whole world.
    pub fn root(&self) -> &QuadNode {
        &self.root
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Walk the tree and summarise its shape.
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            segments: self.store.len(),
            ..Default::default()
        };
        for node in self.root.descendants() {
            stats.nodes += 1;
            stats.max_depth = stats.max_depth.max(node.depth());
            match node.segment_ids() {
                Some(ids) => {
                    stats.leaves += 1;
                    stats.stored_ids += ids.len();
                    stats.largest_leaf = stats.largest_leaf.max(ids.len());
                }
                None => stats.internal_nodes += 1,
            }
        }
        stats
    }
}

impl Default for SegmentIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{Quadrant, classify};
    use roadquad_types::BoundingBox;

    /// `count` short segments inside the south-west world quadrant.
    fn fill_south_west(index: &mut SegmentIndex, count: u32) {
        for i in 0..count {
            let lat = -80.0 + i as f64;
            let lon = -170.0 + i as f64;
            index.insert(i, lat, lon, lat + 0.5, lon + 0.5).unwrap();
        }
    }

    #[test]
    fn test_ids_are_dense() {
        let mut index = SegmentIndex::new();
        for expected in 0..5 {
            let id = index.insert(1, 1.0, 1.0, 2.0, 2.0).unwrap();
            assert_eq!(id, expected);
        }
        assert_eq!(index.len(), 5);
        assert_eq!(index.segment(3).unwrap().edge_id, 1);
        assert!(index.segment(5).is_none());
    }

    #[test]
    fn test_threshold_keeps_root_leaf() {
        let mut index = SegmentIndex::new();
        fill_south_west(&mut index, 30);
        assert!(index.root().is_leaf());
        assert_eq!(index.root().segment_ids().unwrap().len(), 30);
    }

    #[test]
    fn test_one_past_threshold_promotes() {
        let mut index = SegmentIndex::new();
        fill_south_west(&mut index, 31);
        let root = index.root();
        assert!(!root.is_leaf());
        assert!(root.segment_ids().is_none());

        // Each child holds exactly the ids that classify against the root box
        // sends to it.
        for quadrant in Quadrant::ALL {
            let expected: Vec<SegmentId> = index
                .segments()
                .iter()
                .filter(|seg| classify(&BoundingBox::WORLD, seg).contains(quadrant))
                .map(|seg| seg.id)
                .collect();
            match root.child(quadrant) {
                Some(child) => assert_eq!(child.collect_segment_ids(), expected),
                None => assert!(expected.is_empty()),
            }
        }
    }

    #[test]
    fn test_straddling_segment_is_duplicated() {
        let mut index = SegmentIndex::with_config(IndexConfig::default().with_leaf_threshold(1)).unwrap();
        index.insert(1, 10.0, 10.0, 11.0, 11.0).unwrap();
        let id = index.insert(2, 10.0, -5.0, 10.0, 5.0).unwrap();

        let root = index.root();
        let nw = root.child(Quadrant::NORTH_WEST).unwrap();
        let ne = root.child(Quadrant::NORTH_EAST).unwrap();
        assert!(nw.collect_segment_ids().contains(&id));
        assert!(ne.collect_segment_ids().contains(&id));
        assert!(root.child(Quadrant::SOUTH_WEST).is_none());

        let stats = index.stats();
        assert!(stats.stored_ids > stats.segments);
    }

    #[test]
    fn test_children_tile_parent() {
        let mut index = SegmentIndex::with_config(IndexConfig::default().with_leaf_threshold(2)).unwrap();
        // One segment per world quadrant.
        index.insert(0, 10.0, 10.0, 11.0, 11.0).unwrap();
        index.insert(1, 10.0, -10.0, 11.0, -11.0).unwrap();
        index.insert(2, -10.0, 10.0, -11.0, 11.0).unwrap();
        index.insert(3, -10.0, -10.0, -11.0, -11.0).unwrap();

        for node in index.root().descendants() {
            let children: Vec<_> = node.children().collect();
            if children.len() < 4 {
                continue;
            }
            let b = node.bounds();
            for (quadrant, child) in children {
                assert_eq!(*child.bounds(), quadrant.bounds(b));
                assert_eq!(child.depth(), node.depth() + 1);
            }
        }
        assert_eq!(index.root().children().count(), 4);
    }

    #[test]
    fn test_reject_policy() {
        let config = IndexConfig::default().with_coordinate_policy(CoordinatePolicy::Reject);
        let mut index = SegmentIndex::with_config(config).unwrap();
        assert!(matches!(
            index.insert(1, 95.0, 0.0, 10.0, 0.0),
            Err(IndexError::InvalidCoordinate { .. })
        ));
        assert!(index.is_empty());

        let polyline = [
            LatLon::new(0.0, 0.0),
            LatLon::new(1.0, 1.0),
            LatLon::new(f64::NAN, 1.0),
        ];
        assert!(index.insert_polyline(2, &polyline).is_err());
        assert!(index.is_empty());
    }

    #[test]
    fn test_permissive_policy_accepts_nan() {
        let mut index = SegmentIndex::new();
        let id = index.insert(1, f64::NAN, f64::NAN, f64::NAN, f64::NAN).unwrap();
        assert_eq!(id, 0);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_polyline_ids() {
        let mut index = SegmentIndex::new();
        index.insert(0, 0.0, 0.0, 1.0, 1.0).unwrap();
        let points = [
            LatLon::new(1.0, 1.0),
            LatLon::new(2.0, 2.0),
            LatLon::new(3.0, 2.0),
            LatLon::new(3.0, 4.0),
        ];
        let ids = index.insert_polyline(5, &points).unwrap();
        assert_eq!(ids, 1..4);
        for (id, pair) in ids.zip(points.windows(2)) {
            let seg = index.segment(id).unwrap();
            assert_eq!(seg.edge_id, 5);
            assert_eq!(seg.a, pair[0]);
            assert_eq!(seg.b, pair[1]);
        }

        assert!(matches!(
            index.insert_polyline(6, &points[..1]),
            Err(IndexError::PolylineTooShort { edge_id: 6, points: 1 })
        ));
    }

    #[test]
    fn test_invalid_config() {
        let config = IndexConfig::default().with_leaf_threshold(0);
        assert!(matches!(
            SegmentIndex::with_config(config),
            Err(IndexError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_stats() {
        let mut index = SegmentIndex::new();
        assert_eq!(
            index.stats(),
            IndexStats {
                nodes: 1,
                leaves: 1,
                ..Default::default()
            }
        );

        fill_south_west(&mut index, 31);
        let stats = index.stats();
        assert_eq!(stats.segments, 31);
        assert_eq!(stats.nodes, stats.leaves + stats.internal_nodes);
        assert!(stats.internal_nodes >= 1);
        assert!(stats.max_depth >= 1);
        assert!(stats.largest_leaf <= 30);
        assert!(stats.stored_ids >= 31);
    }
}
