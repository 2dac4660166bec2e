//! Surfing-edge pruning.

use crate::geometry::{cross_mag, dist, dot, Circle, Vec2, EPSILON};

/// A circle is hit by a segment when the closest point on the (closed)
/// segment to its centre comes within `r`, minus a small epsilon so exact
/// tangency is not mistaken for a collision.
pub fn segment_intersects_circle(p1: Vec2, p2: Vec2, circle: Circle) -> bool {
    if dist(p1, p2) <= EPSILON {
        return false;
    }

    let u = Vec2::new(p2.x() - p1.x(), p2.y() - p1.y());
    let v = Vec2::new(circle.center.x() - p1.x(), circle.center.y() - p1.y());
    let w = Vec2::new(circle.center.x() - p2.x(), circle.center.y() - p2.y());
    let neg_u = Vec2::new(-u.x(), -u.y());

    let d = if dot(v, u) < 0.0 {
        dist(p1, circle.center)
    } else if dot(w, neg_u) < 0.0 {
        dist(p2, circle.center)
    } else {
        let u_len = (u.x() * u.x() + u.y() * u.y()).sqrt();
        cross_mag(u, v) / u_len
    };

    d <= circle.r - EPSILON
}

/// A unit of work for the parallel pruning scan: a segment plus every
/// obstacle circle it must clear (every circle in the graph except the two
/// the segment's own endpoints are anchored to).
pub struct PruneCandidate<'a> {
    pub p1: Vec2,
    pub p2: Vec2,
    pub blockers: &'a [Circle],
}

/// Runs the embarrassingly-parallel pruning scan: each candidate is checked
/// against its blocker list independently, split across
/// `std::thread::available_parallelism()` plain `std` threads. Below a
/// small threshold the scan runs sequentially on the calling thread
/// instead. Either way the result is a `bool` per candidate in input
/// order.
pub fn prune_parallel(candidates: &[PruneCandidate<'_>]) -> Vec<bool> {
    const PARALLEL_THRESHOLD: usize = 64;

    let survives = |c: &PruneCandidate<'_>| {
        !c.blockers
            .iter()
            .any(|blocker| segment_intersects_circle(c.p1, c.p2, *blocker))
    };

    if candidates.len() < PARALLEL_THRESHOLD {
        return candidates.iter().map(survives).collect();
    }

    let worker_count = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(1);
    let chunk_size = candidates.len().div_ceil(worker_count).max(1);

    let mut results = vec![false; candidates.len()];
    let chunks = results.chunks_mut(chunk_size).zip(candidates.chunks(chunk_size));

    std::thread::scope(|scope| {
        for (result_chunk, candidate_chunk) in chunks {
            scope.spawn(move || {
                for (slot, candidate) in result_chunk.iter_mut().zip(candidate_chunk) {
                    *slot = survives(candidate);
                }
            });
        }
    });

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Circle;

    fn p(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn segment_through_circle_intersects() {
        let c = Circle::new(p(5.0, 0.0), 1.0);
        assert!(segment_intersects_circle(p(0.0, 0.0), p(10.0, 0.0), c));
    }

    #[test]
    fn segment_clearing_circle_does_not_intersect() {
        let c = Circle::new(p(5.0, 5.0), 1.0);
        assert!(!segment_intersects_circle(p(0.0, 0.0), p(10.0, 0.0), c));
    }

    #[test]
    fn tangent_segment_is_not_a_hit() {
        // Segment along y = 1, circle centred at (5, 0) radius 1: the closest
        // approach is exactly tangent.
        let c = Circle::new(p(5.0, 0.0), 1.0);
        assert!(!segment_intersects_circle(p(0.0, 1.0), p(10.0, 1.0), c));
    }

    #[test]
    fn closest_point_beyond_either_endpoint_uses_endpoint_distance() {
        let c = Circle::new(p(-5.0, 0.0), 1.0);
        // Circle sits behind p1 on the line through the segment; the segment
        // itself must not be considered intersecting even though the
        // infinite line would pass near it.
        assert!(!segment_intersects_circle(p(0.0, 0.0), p(10.0, 0.0), c));
    }

    #[test]
    fn zero_length_segment_never_intersects() {
        let c = Circle::new(p(0.0, 0.0), 1.0);
        assert!(!segment_intersects_circle(p(0.0, 0.0), p(0.0, 0.0), c));
    }

    #[test]
    fn parallel_and_serial_scans_agree() {
        let blockers = vec![Circle::new(p(5.0, 0.0), 1.0)];
        let mut candidates = Vec::new();
        for i in 0..200 {
            let y = i as f64 * 0.05;
            candidates.push(PruneCandidate {
                p1: p(0.0, y),
                p2: p(10.0, y),
                blockers: &blockers,
            });
        }
        let parallel = prune_parallel(&candidates);
        let serial: Vec<bool> = candidates
            .iter()
            .map(|c| !c.blockers.iter().any(|b| segment_intersects_circle(c.p1, c.p2, *b)))
            .collect();
        assert_eq!(parallel, serial);
    }
}
