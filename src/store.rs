//! Append-only segment storage.

use crate::error::{IndexError, Result};
use roadquad_types::{EdgeId, LatLon, Segment, SegmentId};

/// Owns every segment ever inserted, addressed by dense ids starting at 0.
///
/// Nothing is ever removed or rewritten, so an id handed out once stays valid
/// for the lifetime of the store.
#[derive(Debug, Default, Clone)]
pub struct SegmentStore {
    segments: Vec<Segment>,
}

impl SegmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
        }
    }

    /// Append a segment and return its id (the store length before the push).
    pub fn append(&mut self, edge_id: EdgeId, a: LatLon, b: LatLon) -> Result<SegmentId> {
        let id = SegmentId::try_from(self.segments.len()).map_err(|_| IndexError::StoreFull)?;
        self.segments.push(Segment::new(id, edge_id, a, b));
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }
}

impl std::ops::Index<SegmentId> for SegmentStore {
    type Output = Segment;

    fn index(&self, id: SegmentId) -> &Segment {
        &self.segments[id as usize]
    }
}

impl<'a> IntoIterator for &'a SegmentStore {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
