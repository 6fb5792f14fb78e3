//! Quadtree nodes.
//!
//! A node starts as a leaf holding segment ids directly. Once a leaf is full
//! and another id arrives it becomes internal for good: every held id and the
//! new one are pushed down into the quadrants they overlap, and the leaf list
//! is dropped. Children are only created when a segment first reaches them.
//!
//! The tree is an overlap index rather than a partition: a segment that
//! crosses a midline is stored under every quadrant it touches.

use crate::compute::{Quadrant, classify};
use crate::quantize::NodeKey;
use roadquad_types::{BoundingBox, Segment, SegmentId};
use smallvec::SmallVec;

/// Limits that decide when a leaf splits.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeLimits {
    pub leaf_threshold: usize,
    pub max_depth: u32,
}

type Children = Box<[Option<QuadNode>; 4]>;

#[derive(Debug, Clone)]
enum NodeState {
    Leaf { ids: Vec<SegmentId> },
    Internal { children: Children },
}

/// A box-scoped node of the segment quadtree.
#[derive(Debug, Clone)]
pub struct QuadNode {
    bounds: BoundingBox,
    key: NodeKey,
    state: NodeState,
}

impl QuadNode {
    pub(crate) fn new(bounds: BoundingBox, key: NodeKey) -> Self {
        Self {
            bounds,
            key,
            state: NodeState::Leaf { ids: Vec::new() },
        }
    }

    pub(crate) fn root() -> Self {
        Self::new(BoundingBox::WORLD, NodeKey::ROOT)
    }

    /// Add `id` to this subtree. `segments` must contain `id`.
    pub(crate) fn insert(&mut self, id: SegmentId, segments: &[Segment], limits: NodeLimits) {
        match &mut self.state {
            NodeState::Leaf { ids } => {
                let depth = self.key.depth();
                if ids.len() < limits.leaf_threshold || depth >= limits.max_depth {
                    if ids.len() == limits.leaf_threshold {
                        log::debug!(
                            "leaf {} at max depth {} grows past threshold {}",
                            self.key,
                            depth,
                            limits.leaf_threshold
                        );
                    }
                    ids.push(id);
                    return;
                }

                let held = std::mem::take(ids);
                log::trace!("splitting leaf {} at depth {} ({} ids)", self.key, depth, held.len() + 1);

                let mut children: Children = Box::default();
                for held_id in held.into_iter().chain(std::iter::once(id)) {
                    Self::distribute(&self.bounds, self.key, &mut children, held_id, segments, limits);
                }
                self.state = NodeState::Internal { children };
            }
            NodeState::Internal { children } => {
                Self::distribute(&self.bounds, self.key, children, id, segments, limits);
            }
        }
    }

    fn distribute(
        bounds: &BoundingBox,
        key: NodeKey,
        children: &mut [Option<QuadNode>; 4],
        id: SegmentId,
        segments: &[Segment],
        limits: NodeLimits,
    ) {
        let segment = &segments[id as usize];
        for quadrant in classify(bounds, segment).iter() {
            children[quadrant.index()]
                .get_or_insert_with(|| QuadNode::new(quadrant.bounds(bounds), key.child(quadrant)))
                .insert(id, segments, limits);
        }
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// Distance from the root, which is at depth 0.
    pub fn depth(&self) -> u32 {
        self.key.depth()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.state, NodeState::Leaf { .. })
    }

    /// Ids held by a leaf, in insertion order. `None` for internal nodes.
    pub fn segment_ids(&self) -> Option<&[SegmentId]> {
        match &self.state {
            NodeState::Leaf { ids } => Some(ids),
            NodeState::Internal { .. } => None,
        }
    }

    /// Child in `quadrant`, if this node is internal and the child exists.
    pub fn child(&self, quadrant: Quadrant) -> Option<&QuadNode> {
        match &self.state {
            NodeState::Leaf { .. } => None,
            NodeState::Internal { children } => children[quadrant.index()].as_ref(),
        }
    }

    /// Existing children with their quadrant, in quadrant order.
    pub fn children(&self) -> impl Iterator<Item = (Quadrant, &QuadNode)> {
        Quadrant::ALL
            .into_iter()
            .filter_map(move |quadrant| self.child(quadrant).map(|child| (quadrant, child)))
    }

    /// This node and all of its descendants, depth first.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack = SmallVec::new();
        stack.push(self);
        Descendants { stack }
    }

    /// Every id stored in the subtree, sorted and without repeats.
    pub fn collect_segment_ids(&self) -> Vec<SegmentId> {
        let mut ids: Vec<SegmentId> = self
            .descendants()
            .filter_map(QuadNode::segment_ids)
            .flatten()
            .copied()
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Depth-first iterator over a subtree.
pub struct Descendants<'a> {
    stack: SmallVec<[&'a QuadNode; 32]>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a QuadNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let NodeState::Internal { children } = &node.state {
            self.stack.extend(children.iter().rev().flatten());
        }
        Some(node)
    }
}
