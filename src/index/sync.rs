//! Thread-safe wrapper for sharing one index between threads.
//!
//! Enable the `sync` feature to use this module:
//!
//! ```toml
//! [dependencies]
//! roadquad = { version = "0.1", features = ["sync"] }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use roadquad::SyncSegmentIndex;
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = SyncSegmentIndex::new();
//!
//! let writer = index.clone();
//! let handle = thread::spawn(move || {
//!     writer.insert(1, 47.6, -122.3, 47.7, -122.4).unwrap();
//! });
//!
//! index.insert(2, 40.7, -74.0, 40.8, -73.9)?;
//! handle.join().unwrap();
//!
//! assert_eq!(index.len(), 2);
//! # Ok(())
//! # }
//! ```

use super::SegmentIndex;
use crate::config::{IndexConfig, IndexStats};
use crate::error::Result;
use crate::geometry::LoadSummary;
use parking_lot::RwLock;
use roadquad_types::{EdgeId, LatLon, SegmentId};
use std::io::BufRead;
use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

/// Cloneable handle to a `SegmentIndex` behind `Arc<RwLock<_>>`.
///
/// Insertions take the write lock; inspection through [`read`](Self::read)
/// and the counters share the read lock.
#[derive(Clone, Debug)]
pub struct SyncSegmentIndex {
    inner: Arc<RwLock<SegmentIndex>>,
}

impl SyncSegmentIndex {
    /// Empty index with the default configuration.
    pub fn new() -> Self {
        Self::from_index(SegmentIndex::new())
    }

    /// Empty index with a custom configuration.
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        Ok(Self::from_index(SegmentIndex::with_config(config)?))
    }

    /// Wrap an existing index.
    pub fn from_index(index: SegmentIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    pub fn insert(
        &self,
        edge_id: EdgeId,
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    ) -> Result<SegmentId> {
        self.inner.write().insert(edge_id, lat1, lon1, lat2, lon2)
    }

    pub fn insert_polyline(&self, edge_id: EdgeId, points: &[LatLon]) -> Result<Range<SegmentId>> {
        self.inner.write().insert_polyline(edge_id, points)
    }

    /// Load a geometry stream while holding the write lock for the whole
    /// stream.
    pub fn load_edge_geometry<R: BufRead>(&self, reader: R) -> Result<LoadSummary> {
        self.inner.write().load_edge_geometry(reader)
    }

    pub fn load_edge_geometry_file<P: AsRef<Path>>(&self, path: P) -> Result<LoadSummary> {
        self.inner.write().load_edge_geometry_file(path)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        self.inner.read().stats()
    }

    /// Run `f` with shared access to the index.
    pub fn read<T>(&self, f: impl FnOnce(&SegmentIndex) -> T) -> T {
        f(&self.inner.read())
    }

    /// Unwrap the index if this is the last handle.
    pub fn try_into_inner(self) -> std::result::Result<SegmentIndex, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl Default for SyncSegmentIndex {
    fn default() -> Self {
        Self::new()
    }
}
