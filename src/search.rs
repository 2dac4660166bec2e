//! A* search over the prepared tangent graph.
//!
//! Wraps the generic `astar` in [`crate::astar`] with the tangent graph's
//! edge-cost and heuristic functions, since an edge's cost here depends on
//! its kind (surfing vs hugging), not a plain weight read off the edge
//! directly.

use log::{debug, warn};
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::astar::{astar as generic_astar, AstarStrategy, PathTracker};
use crate::error::PlannerError;
use crate::graph::{EdgeKind, Graph, NodeId, PetGraph};

/// The outcome of one A* query: either a path with its total cost, or the
/// distinguished "no path" value. Not an error: an exhausted frontier is a
/// normal, recoverable planning result.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found { path: Vec<NodeId>, cost: f64 },
    NoPath,
}

struct TangentStrategy<'a> {
    graph: &'a Graph,
    goal: NodeIndex<usize>,
}

impl<'a> AstarStrategy<&'a PetGraph, f64> for TangentStrategy<'a> {
    fn reroute(&mut self, node: NodeIndex<usize>, _tracker: &PathTracker<&'a PetGraph>) -> Option<f64> {
        if node == self.goal {
            None
        } else {
            Some(0.0)
        }
    }

    fn edge_cost(&mut self, edge: <&'a PetGraph as petgraph::visit::IntoEdgeReferences>::EdgeRef) -> f64 {
        let kind = edge.weight().kind;
        self.graph
            .edge_cost(NodeId::from_index(edge.source()), NodeId::from_index(edge.target()), kind)
    }

    fn estimate_cost(&mut self, node: NodeIndex<usize>) -> f64 {
        self.graph.heuristic(NodeId::from_index(node), NodeId::from_index(self.goal))
    }
}

/// Runs A* from `start` to `goal` over a graph that must already be
/// `prepare()`d. Ties in `f` are broken explicitly by `NodeIndex` ordering
/// inside [`crate::astar::MinScored`], since handles are assigned
/// monotonically and never reused.
pub fn astar(graph: &mut Graph, start: NodeId, goal: NodeId) -> Result<SearchOutcome, PlannerError> {
    if !graph.is_prepared() {
        return Err(PlannerError::UnpreparedGraph);
    }
    if !graph.contains_node(start) || !graph.contains_node(goal) {
        return Err(PlannerError::InvalidHandle);
    }

    let outcome = {
        let mut strategy = TangentStrategy {
            graph: &*graph,
            goal: goal.index(),
        };
        let pg = graph.internal_graph();
        generic_astar(pg, start.index(), &mut strategy)
    };

    match outcome {
        Some((cost, path)) => {
            debug!("astar: found path of {} nodes, cost {:.6}", path.len(), cost);
            graph.mark_searched();
            Ok(SearchOutcome::Found {
                path: path.into_iter().map(NodeId::from_index).collect(),
                cost,
            })
        }
        None => {
            warn!("astar: frontier exhausted without reaching the goal");
            graph.mark_searched();
            Ok(SearchOutcome::NoPath)
        }
    }
}
