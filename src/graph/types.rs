//! Handle and weight types for the tangent graph.
//!
//! Identity is an index into a petgraph-managed arena, never an object
//! address.

use petgraph::stable_graph::NodeIndex;

use crate::geometry::Vec2;

/// Stable handle to a circle registered in a [`crate::graph::Graph`].
/// Indexes into the graph's circle arena; `None` tombstones mean the slot
/// was vacated by `clear_points` but the index is never reused, so old
/// handles fail closed rather than silently pointing at a different circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CircleId(pub(crate) usize);

/// Stable handle to a tangent-point node, returned to callers by
/// `build_graph`/`add_point` and accepted by `astar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) NodeIndex<usize>);

impl NodeId {
    pub(crate) fn from_index(idx: NodeIndex<usize>) -> Self {
        NodeId(idx)
    }

    pub(crate) fn index(self) -> NodeIndex<usize> {
        self.0
    }
}

/// Tags whether a circle was supplied at construction (permanent) or
/// introduced by `add_point` (transient, wiped by `clear_points`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOrigin {
    Obstacle,
    Inserted,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct CircleRecord {
    pub circle: crate::geometry::Circle,
    pub origin: PointOrigin,
}

/// Node weight stored in the underlying petgraph arena.
///
/// `origin` tags whether this node was created while building the permanent
/// obstacle graph or while inserting a point. A tangent point added for an
/// inserted point can anchor to a permanent obstacle circle, so the
/// node-level tag (not just the circle-level one in [`CircleRecord`]) is
/// what lets `clear_points` find exactly the nodes it introduced.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeWeight {
    pub circle: CircleId,
    pub position: Vec2,
    pub origin: PointOrigin,
}

/// Whether an edge is a straight bitangent segment or a circular arc around
/// a single obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Surfing,
    Hugging,
}

/// Which bucket an edge belongs to, so `clear_points`/`prepare` know what to
/// rebuild without touching permanent obstacle geometry. Not part of the
/// public API; `EdgeKind` is what callers and `astar`'s cost function see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeOrigin {
    ObstacleSurfing,
    TransientTangent,
    Hugging,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeWeight {
    pub kind: EdgeKind,
    pub origin: EdgeOrigin,
}

/// The graph's lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GraphState {
    Built,
    PointsAdded,
    Prepared,
    Searched,
}
