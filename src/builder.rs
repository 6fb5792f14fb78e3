//! Index builder for flexible configuration
//!
//! Collects configuration and, optionally, edge-geometry files to load, then
//! produces a ready `SegmentIndex`.

use crate::config::{CoordinatePolicy, IndexConfig};
use crate::error::Result;
use crate::index::SegmentIndex;
use std::path::PathBuf;

/// Builder for a `SegmentIndex`.
///
/// # Examples
///
/// ```rust
/// use roadquad::IndexBuilder;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let index = IndexBuilder::new()
///     .leaf_threshold(16)
///     .max_depth(20)
///     .reject_invalid_coordinates()
///     .build()?;
/// assert_eq!(index.config().leaf_threshold, 16);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct IndexBuilder {
    config: IndexConfig,
    geometry_files: Vec<PathBuf>,
}

impl IndexBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: IndexConfig) -> Self {
        self.config = config;
        self
    }

    pub fn leaf_threshold(mut self, threshold: usize) -> Self {
        self.config.leaf_threshold = threshold;
        self
    }

    pub fn max_depth(mut self, depth: u32) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Refuse non-finite or out-of-range coordinates on insert.
    pub fn reject_invalid_coordinates(mut self) -> Self {
        self.config.coordinate_policy = CoordinatePolicy::Reject;
        self
    }

    pub fn segment_capacity(mut self, capacity: usize) -> Self {
        self.config.segment_capacity = Some(capacity);
        self
    }

    /// Load an edge-geometry file when building. Files load in the order
    /// they were added.
    pub fn geometry_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.geometry_files.push(path.into());
        self
    }

    /// Validate the configuration, create the index and load any geometry
    /// files.
    pub fn build(self) -> Result<SegmentIndex> {
        let mut index = SegmentIndex::with_config(self.config)?;
        for path in &self.geometry_files {
            index.load_edge_geometry_file(path)?;
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexError;
    use std::io::Write;

    #[test]
    fn test_builder_default() {
        let index = IndexBuilder::new().build().unwrap();
        assert_eq!(*index.config(), IndexConfig::default());
        assert!(index.is_empty());
    }

    #[test]
    fn test_builder_with_config() {
        let config = IndexConfig::default()
            .with_leaf_threshold(8)
            .with_coordinate_policy(CoordinatePolicy::Reject);
        let mut index = IndexBuilder::new().config(config).segment_capacity(64).build().unwrap();
        assert_eq!(index.config().leaf_threshold, 8);
        assert_eq!(index.config().segment_capacity, Some(64));
        assert!(index.insert(1, 0.0, 200.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_builder_rejects_bad_config() {
        let result = IndexBuilder::new().max_depth(0).build();
        assert!(matches!(result, Err(IndexError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_geometry_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1^a^b^10^0.0^0.0^1.0^1.0^2.0^1.0").unwrap();
        writeln!(file, "2^a^b^10^5.0^5.0^6.0^6.0").unwrap();
        file.flush().unwrap();

        let index = IndexBuilder::new().geometry_file(file.path()).build().unwrap();
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_builder_missing_geometry_file() {
        let result = IndexBuilder::new()
            .geometry_file("/nonexistent/roadquad/geometry.txt")
            .build();
        assert!(matches!(result, Err(IndexError::Io(_))));
    }
}
