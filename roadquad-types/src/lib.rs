//! # roadquad-types
//!
//! Plain geometric value types shared by the `roadquad` segment index.
//!
//! - **Coordinates**: [`LatLon`], a latitude/longitude pair in degrees
//! - **Boxes**: [`BoundingBox`], an axis-aligned latitude/longitude box that
//!   bisects into four quadrants
//! - **Segments**: [`Segment`], one straight piece of a road-network edge
//!
//! All types are serializable with Serde and convert to and from the `geo`
//! crate's primitives, with longitude on the x axis and latitude on the y axis.
//!
//! ## Examples
//!
//! ```rust
//! use roadquad_types::{BoundingBox, LatLon, Segment};
//!
//! let world = BoundingBox::WORLD;
//! let seattle = LatLon::new(47.6062, -122.3321);
//! assert!(world.contains(seattle));
//!
//! let segment = Segment::new(0, 7, seattle, LatLon::new(47.6101, -122.3420));
//! assert_eq!(segment.edge_id, 7);
//! ```

pub mod bbox;
pub mod point;
pub mod segment;

pub use bbox::BoundingBox;
pub use point::LatLon;
pub use segment::{EdgeId, Segment, SegmentId};
