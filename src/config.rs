//! Index configuration and statistics.
//!
//! The configuration is small and serializable so it can be loaded from JSON
//! (or TOML with the `toml` feature) next to the road data it indexes.

use serde::de::Error;
use serde::{Deserialize, Serialize};

/// How the index treats coordinates that are not finite or fall outside the
/// world range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatePolicy {
    /// Accept everything. NaN or out-of-range endpoints produce unspecified
    /// quadrant assignments but never panic.
    #[default]
    Permissive,
    /// Refuse such segments with `IndexError::InvalidCoordinate`.
    Reject,
}

/// Segment index configuration.
///
/// # Example
///
/// ```rust
/// use roadquad::{CoordinatePolicy, IndexConfig};
///
/// let config = IndexConfig::default();
/// assert_eq!(config.leaf_threshold, 30);
///
/// let json = r#"{
///     "leaf_threshold": 16,
///     "coordinate_policy": "reject"
/// }"#;
/// let config = IndexConfig::from_json(json).unwrap();
/// assert_eq!(config.leaf_threshold, 16);
/// assert_eq!(config.max_depth, 32);
/// assert_eq!(config.coordinate_policy, CoordinatePolicy::Reject);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Maximum number of segment ids a leaf holds before it is split into
    /// four children.
    #[serde(default = "IndexConfig::default_leaf_threshold")]
    pub leaf_threshold: usize,

    /// Deepest level at which a leaf may still split (root is depth 0).
    /// Leaves at this depth keep accepting ids past the threshold, which
    /// bounds recursion for coincident segments. Capped at 32, the bit width
    /// of the quantized coordinates.
    #[serde(default = "IndexConfig::default_max_depth")]
    pub max_depth: u32,

    #[serde(default)]
    pub coordinate_policy: CoordinatePolicy,

    /// Number of segments to pre-allocate room for
    #[serde(default)]
    pub segment_capacity: Option<usize>,
}

impl IndexConfig {
    /// Largest supported `max_depth`.
    pub const MAX_SUPPORTED_DEPTH: u32 = 32;

    const fn default_leaf_threshold() -> usize {
        30
    }

    const fn default_max_depth() -> u32 {
        Self::MAX_SUPPORTED_DEPTH
    }

    pub fn with_leaf_threshold(mut self, threshold: usize) -> Self {
        self.leaf_threshold = threshold;
        self
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_coordinate_policy(mut self, policy: CoordinatePolicy) -> Self {
        self.coordinate_policy = policy;
        self
    }

    pub fn with_segment_capacity(mut self, capacity: usize) -> Self {
        self.segment_capacity = Some(capacity);
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.leaf_threshold == 0 {
            return Err("Leaf threshold must be greater than zero".to_string());
        }

        if self.max_depth == 0 || self.max_depth > Self::MAX_SUPPORTED_DEPTH {
            return Err(format!(
                "Max depth must be between 1 and {}, got {}",
                Self::MAX_SUPPORTED_DEPTH,
                self.max_depth
            ));
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: IndexConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: IndexConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            leaf_threshold: Self::default_leaf_threshold(),
            max_depth: Self::default_max_depth(),
            coordinate_policy: CoordinatePolicy::default(),
            segment_capacity: None,
        }
    }
}

/// Shape of the tree at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Segments in the store
    pub segments: usize,
    /// Nodes in the tree, root included
    pub nodes: usize,
    pub leaves: usize,
    pub internal_nodes: usize,
    /// Depth of the deepest node (root is 0)
    pub max_depth: u32,
    /// Sum of leaf sizes. Exceeds `segments` when segments straddle quadrants.
    pub stored_ids: usize,
    pub largest_leaf: usize,
}

impl IndexStats {
    /// Average number of leaves each segment was stored in.
    pub fn replication_factor(&self) -> f64 {
        if self.segments == 0 {
            0.0
        } else {
            self.stored_ids as f64 / self.segments as f64
        }
    }
}
