//! Quadtree index over road-network segments.
//!
//! Road edges are split into straight segments, stored once, and referenced
//! by id from every quadtree leaf whose box they overlap, so a later
//! map-matching stage can narrow candidate roads to a small region.
//!
//! ```rust
//! use roadquad::{IndexBuilder, Quadrant};
//!
//! let mut index = IndexBuilder::new().leaf_threshold(2).build()?;
//! index.insert(1, 10.0, 10.0, 11.0, 11.0)?;
//! index.insert(2, -10.0, -10.0, -11.0, -11.0)?;
//! // Crosses the equator, so it is stored on both sides.
//! let id = index.insert(3, -5.0, 20.0, 5.0, 20.0)?;
//!
//! let root = index.root();
//! assert!(!root.is_leaf());
//! assert!(root.child(Quadrant::NORTH_EAST).unwrap().segment_ids().unwrap().contains(&id));
//! assert!(root.child(Quadrant::SOUTH_EAST).unwrap().segment_ids().unwrap().contains(&id));
//! # Ok::<(), roadquad::IndexError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod geometry;
pub mod index;
pub mod quantize;
pub mod store;

pub use builder::IndexBuilder;
pub use compute::{Quadrant, QuadrantSet, classify, classify_endpoints};
pub use config::{CoordinatePolicy, IndexConfig, IndexStats};
pub use error::{IndexError, Result};
pub use geometry::{EdgeGeometry, EdgeGeometryReader, LoadSummary};
#[cfg(feature = "sync")]
pub use index::SyncSegmentIndex;
pub use index::{QuadNode, SegmentIndex};
pub use quantize::NodeKey;
pub use store::SegmentStore;

pub use roadquad_types::{BoundingBox, EdgeId, LatLon, Segment, SegmentId};

pub use geo::{Line, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{IndexBuilder, IndexError, Result, SegmentIndex};

    pub use crate::{CoordinatePolicy, IndexConfig};

    pub use crate::{BoundingBox, LatLon, Quadrant, Segment, SegmentId};

    #[cfg(feature = "sync")]
    pub use crate::SyncSegmentIndex;
}
