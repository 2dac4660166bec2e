#![cfg_attr(not(feature = "disable_contracts"), feature(try_blocks))]

//! Collision-free tangent-graph path planner: visibility graph over circular
//! piece footprints (obstacles) plus A* search.
//!
//! - [`geometry`], vector math and the `Circle` primitive.
//! - [`graph`], the tangent graph itself: construction, point insertion,
//!   pruning, hugging edges, the `Built -> ... -> Prepared` state machine.
//! - [`astar`], the generic priority-queue search petgraph itself uses.
//! - [`search`], the tangent-graph-specific A* wrapper, edge cost and
//!   heuristic.
//! - [`plan`], the single synchronous `plan()` entry point composing all
//!   of the above in order.
//! - [`scenario`], JSON scenario loading for the CLI demonstration.
//! - [`error`], the two loud, contract-violation error variants.

pub mod astar;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod plan;
pub mod scenario;
pub mod search;

pub use error::PlannerError;
pub use geometry::Circle;
pub use graph::{EdgeKind, Graph, NodeId};
pub use plan::{plan, PlanOutcome, Waypoint};
pub use search::{astar as search_astar, SearchOutcome};
