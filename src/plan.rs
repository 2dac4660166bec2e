//! The single synchronous entry point: composes
//! `build_graph -> add_point(start) -> add_point(goal) -> prepare -> astar`
//! in order.

use log::debug;

use crate::error::PlannerError;
use crate::geometry::{Circle, Vec2};
use crate::graph::{Graph, NodeId};
use crate::search::{astar, SearchOutcome};

/// One waypoint of a returned path: its position and, for the benefit of a
/// motion-controller collaborator, the circle it anchors to, so consumers
/// can decode each consecutive pair into either a straight move or an arc
/// move around a shared circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub position: Vec2,
    pub circle: Circle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Found { waypoints: Vec<Waypoint>, cost: f64 },
    NoPath,
}

/// Plans a collision-free path for a disk moving from `start` to `goal`
/// among `obstacles`. Blocking: no cancellation, no timeouts, no
/// concurrency within a single call.
pub fn plan(obstacles: Vec<Circle>, start: Vec2, goal: Vec2) -> Result<PlanOutcome, PlannerError> {
    let mut graph = Graph::build(obstacles);
    let start_id = graph.add_point(start);
    let goal_id = graph.add_point(goal);
    graph.prepare();

    match astar(&mut graph, start_id, goal_id)? {
        SearchOutcome::Found { path, cost } => {
            let waypoints = path
                .into_iter()
                .map(|id| {
                    let node = graph.node(id);
                    Waypoint {
                        position: node.position,
                        circle: node.circle,
                    }
                })
                .collect();
            debug!("plan(): path found, cost {:.6}", cost);
            Ok(PlanOutcome::Found { waypoints, cost })
        }
        SearchOutcome::NoPath => {
            debug!("plan(): no path");
            Ok(PlanOutcome::NoPath)
        }
    }
}

/// Re-plans a query against an existing, already-built obstacle graph:
/// wipes any previously inserted points, inserts the new start/goal, and
/// re-prepares. Useful for a caller holding one `Graph` across many
/// successive queries against the same board position, avoiding rebuilding
/// obstacle bitangents every move.
pub fn replan(graph: &mut Graph, start: Vec2, goal: Vec2) -> Result<(PlanOutcome, NodeId, NodeId), PlannerError> {
    graph.clear_points();
    let start_id = graph.add_point(start);
    let goal_id = graph.add_point(goal);
    graph.prepare();

    let outcome = match astar(graph, start_id, goal_id)? {
        SearchOutcome::Found { path, cost } => {
            let waypoints = path
                .into_iter()
                .map(|id| {
                    let node = graph.node(id);
                    Waypoint {
                        position: node.position,
                        circle: node.circle,
                    }
                })
                .collect();
            PlanOutcome::Found { waypoints, cost }
        }
        SearchOutcome::NoPath => PlanOutcome::NoPath,
    };
    Ok((outcome, start_id, goal_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EPSILON;

    fn p(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y)
    }

    fn path_clears_obstacles(waypoints: &[Waypoint], obstacles: &[Circle]) {
        for pair in waypoints.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            for obstacle in obstacles {
                if a.circle.center == obstacle.center && a.circle.r == obstacle.r {
                    continue;
                }
                if b.circle.center == obstacle.center && b.circle.r == obstacle.r {
                    continue;
                }
                let blocked = crate::graph::prune::segment_intersects_circle(
                    a.position,
                    b.position,
                    *obstacle,
                );
                assert!(!blocked, "segment {:?}-{:?} clips {:?}", a.position, b.position, obstacle);
            }
        }
    }

    /// S1, empty field: the path is the direct segment.
    #[test]
    fn s1_empty_field_is_a_direct_segment() {
        let outcome = plan(vec![], p(0.0, 0.0), p(10.0, 0.0)).unwrap();
        match outcome {
            PlanOutcome::Found { waypoints, cost } => {
                assert_eq!(waypoints.len(), 2);
                assert!((waypoints[0].position.x() - 0.0).abs() < EPSILON);
                assert!((waypoints[1].position.x() - 10.0).abs() < EPSILON);
                // One surfing edge: 1 + dist.
                assert!((cost - 11.0).abs() < 1e-6);
            }
            PlanOutcome::NoPath => panic!("expected a path across an empty field"),
        }
    }

    /// S2, a single obstacle directly on the line: the path must hug
    /// around it with exactly one arc.
    #[test]
    fn s2_single_obstacle_in_the_way() {
        let obstacles = vec![Circle::new(p(5.0, 0.0), 1.0)];
        let outcome = plan(obstacles.clone(), p(0.0, 0.0), p(10.0, 0.0)).unwrap();
        match outcome {
            PlanOutcome::Found { waypoints, .. } => {
                assert_eq!(waypoints.len(), 4, "start, two tangent points, goal");
                path_clears_obstacles(&waypoints, &obstacles);
                let hugging_circles: Vec<_> = waypoints[1..3]
                    .iter()
                    .map(|w| w.circle)
                    .collect();
                assert_eq!(hugging_circles[0], hugging_circles[1], "middle hop hugs one circle");
            }
            PlanOutcome::NoPath => panic!("expected a path around the single obstacle"),
        }
    }

    /// S3, two disjoint circles side by side: verify the path clears both
    /// and uses at most two hugging arcs.
    #[test]
    fn s3_two_disjoint_circles_side_by_side() {
        let obstacles = vec![Circle::new(p(3.0, 0.0), 1.0), Circle::new(p(7.0, 0.0), 1.0)];
        let outcome = plan(obstacles.clone(), p(0.0, 0.0), p(10.0, 0.0)).unwrap();
        match outcome {
            PlanOutcome::Found { waypoints, .. } => {
                path_clears_obstacles(&waypoints, &obstacles);
                let hugging_hops = waypoints.windows(2).filter(|w| w[0].circle == w[1].circle).count();
                assert!(hugging_hops <= 2);
            }
            PlanOutcome::NoPath => panic!("expected a path around two disjoint obstacles"),
        }
    }

    /// S4, an 8x8 grid of small obstacles: A* must terminate with an
    /// obstacle-free path no worse than the straight-line baseline plus
    /// slack.
    #[test]
    fn s4_grid_obstacle_field() {
        let mut obstacles = Vec::new();
        for i in 0..8 {
            for j in 0..8 {
                obstacles.push(Circle::new(p(i as f64, j as f64), 0.1));
            }
        }
        let start = p(0.5, 0.5);
        let goal = p(6.5, 1.0);
        let outcome = plan(obstacles.clone(), start, goal).unwrap();
        match outcome {
            PlanOutcome::Found { waypoints, cost } => {
                path_clears_obstacles(&waypoints, &obstacles);
                let straight_line = crate::geometry::dist(start, goal);
                assert!(cost <= straight_line + waypoints.len() as f64 * 2.0 + 10.0);
            }
            PlanOutcome::NoPath => panic!("a sparse grid of radius-0.1 circles must admit a path"),
        }
    }

    /// S5, a ring of mutually overlapping circles enclosing the start:
    /// there is no escape, so A* must report `NoPath`.
    #[test]
    fn s5_enclosed_start_has_no_path() {
        let mut obstacles = Vec::new();
        let ring_radius = 3.0;
        let circle_radius = 2.0; // wide overlap between neighbours closes the ring solidly
        for i in 0..12 {
            let theta = i as f64 * std::f64::consts::TAU / 12.0;
            obstacles.push(Circle::new(
                p(ring_radius * theta.cos(), ring_radius * theta.sin()),
                circle_radius,
            ));
        }
        let outcome = plan(obstacles, p(0.0, 0.0), p(100.0, 100.0)).unwrap();
        assert_eq!(outcome, PlanOutcome::NoPath);
    }

    /// S6, start lies within another circle's clearance but not inside
    /// any obstacle's own interior: the point is still inserted normally
    /// and a path is returned.
    #[test]
    fn s6_start_just_outside_a_neighbouring_obstacle() {
        let obstacles = vec![Circle::new(p(1.5, 0.0), 1.0)];
        // Start sits just outside the obstacle boundary, well inside what a
        // larger clearance radius would have inflated it to.
        let start = p(0.4, 0.0);
        let goal = p(10.0, 0.0);
        let outcome = plan(obstacles.clone(), start, goal).unwrap();
        match outcome {
            PlanOutcome::Found { waypoints, .. } => {
                assert_eq!(waypoints[0].position, start);
                path_clears_obstacles(&waypoints, &obstacles);
            }
            PlanOutcome::NoPath => panic!("start just outside an obstacle boundary must still find a path"),
        }
    }

    #[test]
    fn start_equals_goal_is_a_degenerate_single_point_path() {
        let outcome = plan(vec![], p(2.0, 2.0), p(2.0, 2.0)).unwrap();
        match outcome {
            PlanOutcome::Found { waypoints, cost } => {
                assert_eq!(waypoints[0].position, p(2.0, 2.0));
                assert!(cost >= 0.0);
            }
            PlanOutcome::NoPath => panic!("start == goal must trivially succeed"),
        }
    }

    /// Idempotence: clearing, re-inserting the same pair of points and
    /// re-preparing twice must yield the same path.
    #[test]
    fn replanning_the_same_query_is_idempotent() {
        let obstacles = vec![Circle::new(p(5.0, 0.0), 1.0)];
        let mut graph = Graph::build(obstacles);

        let (first, _, _) = replan(&mut graph, p(0.0, 0.0), p(10.0, 0.0)).unwrap();
        let (second, _, _) = replan(&mut graph, p(0.0, 0.0), p(10.0, 0.0)).unwrap();

        assert_eq!(first, second);
    }

    /// Heuristic admissibility: every node's straight-line distance to the
    /// goal never exceeds the optimal remaining cost A* itself reports for
    /// the full path.
    #[test]
    fn heuristic_never_overestimates_the_full_path_cost() {
        let obstacles = vec![Circle::new(p(5.0, 0.0), 1.0)];
        let mut graph = Graph::build(obstacles);
        let start = graph.add_point(p(0.0, 0.0));
        let goal = graph.add_point(p(10.0, 0.0));
        graph.prepare();

        let straight = graph.heuristic(start, goal);
        match astar(&mut graph, start, goal).unwrap() {
            SearchOutcome::Found { cost, .. } => assert!(straight <= cost + 1e-9),
            SearchOutcome::NoPath => panic!("expected a path"),
        }
    }
}
