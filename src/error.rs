//! Error taxonomy for the planner core.
//!
//! `GeometricDegeneracy` and `NoPath` are not represented here: the former is
//! skipped at the call site (logged at `trace`, see
//! [`crate::graph::bitangent`]) and the latter is a value
//! ([`crate::search::SearchOutcome::NoPath`]), not an error. `PlannerError`
//! covers only the two contract violations that are loud programmer
//! errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerError {
    /// `neighbours()` or `astar()` was called on a graph that has not been
    /// (re-)prepared since its last mutation.
    #[error("graph has not been prepared for searching; call prepare() first")]
    UnpreparedGraph,

    /// A `NodeId` was passed to an operation on a graph that does not own
    /// it (or the node has since been removed, e.g. by `clear_points`).
    #[error("node handle does not belong to this graph")]
    InvalidHandle,
}
