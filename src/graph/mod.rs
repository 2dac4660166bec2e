//! The tangent graph: obstacle circles, the tangent points anchored to
//! them, and the surfing/hugging edges that connect them, plus the
//! `Built -> PointsAdded -> Prepared -> Searched` state machine.
//!
//! One struct owns a `StableUnGraph` plus a circle arena, addressed through
//! wrapped handles rather than pointers. The graph is undirected: surfing
//! and hugging edges have no direction.

pub mod bitangent;
pub mod hugging;
pub mod prune;
pub mod types;

pub use types::{CircleId, EdgeKind, NodeId, PointOrigin};

use std::collections::HashMap;

use contracts::{debug_ensures, debug_invariant};
use log::{debug, trace};
use petgraph::stable_graph::StableUnGraph;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use crate::error::PlannerError;
use crate::geometry::{angle_to, dist, Circle, Vec2, EPSILON};
use bitangent::{external_bitangents, internal_bitangents};
use hugging::{angular_order, arc_length, hugging_pairs};
use prune::{prune_parallel, PruneCandidate};
use types::{CircleRecord, EdgeOrigin, EdgeWeight, GraphState, NodeWeight};

pub(crate) type PetGraph = StableUnGraph<NodeWeight, EdgeWeight, usize>;

/// One endpoint of an edge as returned by [`Graph::neighbours`]: the node
/// reached and the edge's kind.
#[derive(Debug, Clone, Copy)]
pub struct Neighbour {
    pub node: NodeId,
    pub kind: EdgeKind,
}

/// A tangent point: a circle plus a position on its boundary (or, for a
/// degenerate circle, the point itself). The public, read-only view of a
/// [`types::NodeWeight`].
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub circle: Circle,
    pub position: Vec2,
}

pub struct Graph {
    circles: Vec<CircleRecord>,
    graph: PetGraph,
    nodes_by_circle: HashMap<CircleId, Vec<NodeId>>,
    state: GraphState,
}

#[debug_invariant(self.tangency_holds())]
impl Graph {
    /// Builds every bitangent between every unordered pair of obstacle
    /// circles. Self-pairs are skipped. Degeneracies (overlapping or
    /// concentric circles) are logged at `trace` and skip just that pair;
    /// the graph stays valid but loses those edges.
    pub fn build(obstacles: Vec<Circle>) -> Self {
        let circles: Vec<CircleRecord> = obstacles
            .into_iter()
            .map(|circle| CircleRecord {
                circle,
                origin: PointOrigin::Obstacle,
            })
            .collect();

        let mut graph = Graph {
            circles,
            graph: PetGraph::default(),
            nodes_by_circle: HashMap::new(),
            state: GraphState::Built,
        };

        let n = graph.circles.len();
        let mut degeneracies = 0usize;
        for i in 0..n {
            for j in (i + 1)..n {
                let a = graph.circles[i].circle;
                let b = graph.circles[j].circle;
                let a_id = CircleId(i);
                let b_id = CircleId(j);

                match internal_bitangents(a, b) {
                    Some(pairs) => {
                        for pair in pairs {
                            graph.add_obstacle_surfing_edge(a_id, pair.first, b_id, pair.second);
                        }
                    }
                    None => degeneracies += 1,
                }
                match external_bitangents(a, b) {
                    Some(pairs) => {
                        for pair in pairs {
                            graph.add_obstacle_surfing_edge(a_id, pair.first, b_id, pair.second);
                        }
                    }
                    None => degeneracies += 1,
                }
            }
        }

        debug!(
            "built tangent graph: {} obstacles, {} nodes, {} surfing edges, {} skipped degeneracies",
            n,
            graph.graph.node_count(),
            graph.graph.edge_count(),
            degeneracies,
        );
        graph
    }

    fn add_node(&mut self, circle: CircleId, position: Vec2, origin: PointOrigin) -> NodeId {
        let idx = self.graph.add_node(NodeWeight {
            circle,
            position,
            origin,
        });
        let id = NodeId(idx);
        self.nodes_by_circle.entry(circle).or_default().push(id);
        id
    }

    fn add_obstacle_surfing_edge(&mut self, a: CircleId, pa: Vec2, b: CircleId, pb: Vec2) {
        let na = self.add_node(a, pa, PointOrigin::Obstacle);
        let nb = self.add_node(b, pb, PointOrigin::Obstacle);
        self.graph.add_edge(
            na.0,
            nb.0,
            EdgeWeight {
                kind: EdgeKind::Surfing,
                origin: EdgeOrigin::ObstacleSurfing,
            },
        );
    }

    fn circle_of(&self, id: CircleId) -> Circle {
        self.circles[id.0].circle
    }

    fn node_weight(&self, id: NodeId) -> &NodeWeight {
        self.graph
            .node_weight(id.0)
            .expect("NodeId came from this graph's arena")
    }

    /// Public, read-only view of a node: its anchoring circle and position.
    pub fn node(&self, id: NodeId) -> Node {
        let w = self.node_weight(id);
        Node {
            circle: self.circle_of(w.circle),
            position: w.position,
        }
    }

    /// Inserts a degenerate circle at `p` and its tangents to every circle
    /// currently in the graph. Tangents to other degenerate (already
    /// inserted) points are single direct segments; tangents to
    /// non-degenerate obstacles add two new tangent points on that
    /// obstacle. A point inside an obstacle's interior skips that one
    /// obstacle (the `arccos` domain check fails), logged at `trace`; the
    /// point still gets tangents to every other circle.
    pub fn add_point(&mut self, p: Vec2) -> NodeId {
        let others: Vec<CircleId> = (0..self.circles.len()).map(CircleId).collect();

        let p_circle_idx = self.circles.len();
        self.circles.push(CircleRecord {
            circle: Circle::point(p),
            origin: PointOrigin::Inserted,
        });
        let p_circle = CircleId(p_circle_idx);
        let node_p = self.add_node(p_circle, p, PointOrigin::Inserted);

        let mut skipped = 0usize;
        for other in others {
            let record = &self.circles[other.0];
            if record.origin == PointOrigin::Inserted && record.circle.is_degenerate() {
                // Pre-existing inserted point: one direct segment.
                if let Some(&other_node) = self.nodes_by_circle.get(&other).and_then(|v| v.first()) {
                    if self.graph.find_edge(node_p.0, other_node.0).is_none() {
                        self.graph.add_edge(
                            node_p.0,
                            other_node.0,
                            EdgeWeight {
                                kind: EdgeKind::Surfing,
                                origin: EdgeOrigin::TransientTangent,
                            },
                        );
                    }
                }
                continue;
            }

            let circle = record.circle;
            let d = dist(p, circle.center);
            if d <= circle.r + EPSILON {
                // p lies inside (or exactly on) the obstacle: no tangent.
                trace!(
                    "add_point({:?}): geometric degeneracy against circle {:?} (point inside or on boundary)",
                    p, circle
                );
                skipped += 1;
                continue;
            }
            let ratio = (circle.r / d).clamp(-1.0, 1.0);
            let theta = ratio.acos();
            let alpha_ba = angle_to(circle.center, p);

            for sign in [1.0, -1.0] {
                let angle = alpha_ba + sign * theta;
                let tangent_point = crate::geometry::polar_offset(circle.center, circle.r, angle);
                let tangent_node = self.add_node(other, tangent_point, PointOrigin::Inserted);
                self.graph.add_edge(
                    node_p.0,
                    tangent_node.0,
                    EdgeWeight {
                        kind: EdgeKind::Surfing,
                        origin: EdgeOrigin::TransientTangent,
                    },
                );
            }
        }

        trace!("add_point({:?}): {} circles skipped as degenerate", p, skipped);
        self.state = GraphState::PointsAdded;
        node_p
    }

    /// Removes every node, circle and edge introduced by [`Graph::add_point`]
    /// since the last `clear_points` (or since construction). Permanent
    /// obstacle geometry is untouched.
    pub fn clear_points(&mut self) {
        let to_remove: Vec<_> = self
            .graph
            .node_indices()
            .filter(|&idx| self.graph[idx].origin == PointOrigin::Inserted)
            .collect();

        for idx in to_remove {
            self.graph.remove_node(idx);
        }

        self.circles.retain(|c| c.origin != PointOrigin::Inserted);
        // Node handles for removed circles are gone; rebuild the index from
        // what remains rather than trying to patch it in place.
        self.nodes_by_circle.clear();
        for idx in self.graph.node_indices() {
            let weight = &self.graph[idx];
            self.nodes_by_circle
                .entry(weight.circle)
                .or_default()
                .push(NodeId(idx));
        }

        self.state = GraphState::Built;
    }

    /// Finalises the graph for search: prunes surfing edges and transient
    /// tangent edges that cross a third obstacle, drops now-orphan nodes,
    /// then reinstalls hugging edges from scratch. Idempotent on an
    /// unchanged graph.
    #[debug_ensures(matches!(self.state, GraphState::Prepared))]
    pub fn prepare(&mut self) {
        self.prune_surfing_edges();
        self.install_hugging_edges();
        self.state = GraphState::Prepared;
    }

    fn prune_surfing_edges(&mut self) {
        let obstacle_circles: Vec<(CircleId, Circle)> = self
            .circles
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.circle.is_degenerate())
            .map(|(i, c)| (CircleId(i), c.circle))
            .collect();

        let candidate_edges: Vec<_> = self
            .graph
            .edge_references()
            .filter(|e| e.weight().kind == EdgeKind::Surfing)
            .map(|e| (e.id(), e.source(), e.target()))
            .collect();

        let mut blockers_per_edge: Vec<Vec<Circle>> = Vec::with_capacity(candidate_edges.len());
        for (_, src, tgt) in &candidate_edges {
            let src_circle = self.graph[*src].circle;
            let tgt_circle = self.graph[*tgt].circle;
            blockers_per_edge.push(
                obstacle_circles
                    .iter()
                    .filter(|(id, _)| *id != src_circle && *id != tgt_circle)
                    .map(|(_, c)| *c)
                    .collect(),
            );
        }

        let candidates: Vec<PruneCandidate<'_>> = candidate_edges
            .iter()
            .zip(&blockers_per_edge)
            .map(|((_, src, tgt), blockers)| PruneCandidate {
                p1: self.graph[*src].position,
                p2: self.graph[*tgt].position,
                blockers,
            })
            .collect();

        let survives = prune_parallel(&candidates);
        let removed = survives.iter().filter(|s| !**s).count();

        for ((edge_id, _, _), keep) in candidate_edges.iter().zip(&survives) {
            if !keep {
                self.graph.remove_edge(*edge_id);
            }
        }

        // Drop nodes that lost their only incident edge. A node anchored to
        // a circle that still has other surviving nodes is fine to lose;
        // the hugging pass below only cares about what's left.
        let orphans: Vec<_> = self
            .graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors(idx).next().is_none())
            .collect();
        let orphan_count = orphans.len();
        for idx in orphans {
            self.graph.remove_node(idx);
        }

        debug!(
            "prepare(): pruned {} surfing edges, removed {} orphan nodes",
            removed, orphan_count
        );
        self.rebuild_nodes_by_circle();
    }

    fn rebuild_nodes_by_circle(&mut self) {
        self.nodes_by_circle.clear();
        for idx in self.graph.node_indices() {
            let weight = &self.graph[idx];
            self.nodes_by_circle
                .entry(weight.circle)
                .or_default()
                .push(NodeId(idx));
        }
    }

    /// Rebuilds hugging edges from scratch: every circle's surviving nodes
    /// are sorted into angular order and wired into a cyclic skeleton.
    /// Ephemeral, called by every `prepare()`.
    fn install_hugging_edges(&mut self) {
        let hugging_edges: Vec<_> = self
            .graph
            .edge_references()
            .filter(|e| e.weight().kind == EdgeKind::Hugging)
            .map(|e| e.id())
            .collect();
        for id in hugging_edges {
            self.graph.remove_edge(id);
        }

        let mut installed = 0usize;
        for (circle_id, record) in self
            .circles
            .iter()
            .enumerate()
            .map(|(i, c)| (CircleId(i), c))
        {
            if record.circle.is_degenerate() {
                continue;
            }
            let Some(node_ids) = self.nodes_by_circle.get(&circle_id) else {
                continue;
            };
            if node_ids.len() < 2 {
                continue;
            }

            let mut indexed: Vec<(usize, Vec2)> = node_ids
                .iter()
                .enumerate()
                .map(|(i, n)| (i, self.graph[n.0].position))
                .collect();
            angular_order(record.circle.center, &mut indexed);

            for (a, b) in hugging_pairs(indexed.len()) {
                let na = node_ids[indexed[a].0];
                let nb = node_ids[indexed[b].0];
                // Two surviving nodes: the consecutive pair and its
                // wrap-around are the same unordered pair. Skip the
                // duplicate.
                if self.graph.find_edge(na.0, nb.0).is_some() {
                    continue;
                }
                self.graph.add_edge(
                    na.0,
                    nb.0,
                    EdgeWeight {
                        kind: EdgeKind::Hugging,
                        origin: EdgeOrigin::Hugging,
                    },
                );
                installed += 1;
            }
        }
        debug!("prepare(): installed {} hugging edges", installed);
    }

    /// Every edge incident to `n`, with its opposite endpoint. Requires
    /// `prepare()` to have been called since the last mutation.
    pub fn neighbours(&self, n: NodeId) -> Result<Vec<Neighbour>, PlannerError> {
        if !matches!(self.state, GraphState::Prepared | GraphState::Searched) {
            return Err(PlannerError::UnpreparedGraph);
        }
        if self.graph.node_weight(n.0).is_none() {
            return Err(PlannerError::InvalidHandle);
        }
        Ok(self
            .graph
            .edges(n.0)
            .map(|e| Neighbour {
                node: NodeId(if e.source() == n.0 { e.target() } else { e.source() }),
                kind: e.weight().kind,
            })
            .collect())
    }

    /// Cost of traversing `a -> b` along `kind`: `1 + dist` for surfing,
    /// `1 + arc length` for hugging.
    pub fn edge_cost(&self, a: NodeId, b: NodeId, kind: EdgeKind) -> f64 {
        let wa = self.node_weight(a);
        let wb = self.node_weight(b);
        match kind {
            EdgeKind::Surfing => 1.0 + dist(wa.position, wb.position),
            EdgeKind::Hugging => {
                let circle = self.circle_of(wa.circle);
                let a1 = angle_to(circle.center, wa.position);
                let a2 = angle_to(circle.center, wb.position);
                1.0 + arc_length(circle.r, a1, a2)
            }
        }
    }

    /// Straight-line distance heuristic for A*. Admissible: every edge cost
    /// strictly exceeds the straight-line distance it bridges.
    pub fn heuristic(&self, n: NodeId, goal: NodeId) -> f64 {
        dist(self.node_weight(n).position, self.node_weight(goal).position)
    }

    pub(crate) fn internal_graph(&self) -> &PetGraph {
        &self.graph
    }

    pub(crate) fn state(&self) -> GraphState {
        self.state
    }

    /// Whether `prepare()` has run since the last mutation. `astar`
    /// requires this.
    pub fn is_prepared(&self) -> bool {
        matches!(self.state, GraphState::Prepared | GraphState::Searched)
    }

    /// Marks the graph as having been searched at least once. `clear_points`
    /// and `prepare` both fall back to `Built`/`Prepared` regardless of
    /// whether a search ran; this is purely informational bookkeeping.
    pub(crate) fn mark_searched(&mut self) {
        if self.state == GraphState::Prepared {
            self.state = GraphState::Searched;
        }
    }

    pub fn contains_node(&self, n: NodeId) -> bool {
        self.graph.node_weight(n.0).is_some()
    }

    /// Every node's position sits on its circle's boundary within epsilon
    /// (or at the circle's centre when degenerate).
    fn tangency_holds(&self) -> bool {
        self.graph.node_weights().all(|w| {
            let circle = self.circle_of(w.circle);
            if circle.is_degenerate() {
                dist(w.position, circle.center) < 1e-6
            } else {
                (dist(w.position, circle.center) - circle.r).abs() < 1e-6
            }
        })
    }
}
