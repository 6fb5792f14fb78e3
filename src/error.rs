//! Error types for the segment index.

use roadquad_types::EdgeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Debug, Error)]
pub enum IndexError {
    /// Coordinate rejected by `CoordinatePolicy::Reject`.
    #[error("invalid coordinate ({lat}, {lon}): {reason}")]
    InvalidCoordinate { lat: f64, lon: f64, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed edge-geometry input. `line` is 1-based.
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("edge {edge_id} has {points} point(s), a polyline needs at least 2")]
    PolylineTooShort { edge_id: EdgeId, points: usize },

    #[error("segment store is full ({} segments)", u32::MAX as u64 + 1)]
    StoreFull,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
