//! 2-D vector math and the `Circle` primitive.
//!
//! Every operation here is deterministic 64-bit floating point.

use geo::Point;
use serde::{Deserialize, Serialize};

/// Points too close together, or angles too close to a domain boundary, are
/// treated as coincident/degenerate rather than producing NaN.
pub const EPSILON: f64 = 1e-9;

pub type Vec2 = Point<f64>;

/// Euclidean distance between two points. `dist(a, a) == 0.0`; callers must
/// guard against division by zero themselves (see [`crate::graph::prune`]).
pub fn dist(a: Vec2, b: Vec2) -> f64 {
    ((b.x() - a.x()).powi(2) + (b.y() - a.y()).powi(2)).sqrt()
}

/// Signed angle from `a` to `b`, range `(-pi, pi]`.
pub fn angle_to(a: Vec2, b: Vec2) -> f64 {
    (b.y() - a.y()).atan2(b.x() - a.x())
}

/// The point `r` units from `origin` at angle `theta`.
pub fn polar_offset(origin: Vec2, r: f64, theta: f64) -> Vec2 {
    Point::new(origin.x() + r * theta.cos(), origin.y() + r * theta.sin())
}

/// Magnitude of the 2-D cross product, i.e. the area of the parallelogram
/// spanned by `u` and `v`. Always non-negative.
pub fn cross_mag(u: Vec2, v: Vec2) -> f64 {
    (u.x() * v.y() - u.y() * v.x()).abs()
}

/// Standard inner product.
pub fn dot(u: Vec2, v: Vec2) -> f64 {
    u.x() * v.x() + u.y() * v.y()
}

/// Normalises an angle to `[0, 2*pi)`.
pub fn normalise_2pi(theta: f64) -> f64 {
    let two_pi = std::f64::consts::TAU;
    let wrapped = theta % two_pi;
    if wrapped < 0.0 {
        wrapped + two_pi
    } else {
        wrapped
    }
}

/// A circular obstacle (or, when `r == 0`, a degenerate point used to embed
/// start/goal into the tangent-graph framework).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub r: f64,
}

impl Circle {
    pub fn new(center: Vec2, r: f64) -> Self {
        Self { center, r }
    }

    pub fn point(center: Vec2) -> Self {
        Self { center, r: 0.0 }
    }

    pub fn is_degenerate(&self) -> bool {
        self.r <= EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Vec2 {
        Point::new(x, y)
    }

    #[test]
    fn dist_of_point_to_itself_is_zero() {
        assert_eq!(dist(p(3.0, 4.0), p(3.0, 4.0)), 0.0);
    }

    #[test]
    fn dist_matches_pythagoras() {
        assert!((dist(p(0.0, 0.0), p(3.0, 4.0)) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn angle_to_is_atan2_of_displacement() {
        assert!((angle_to(p(0.0, 0.0), p(1.0, 0.0)) - 0.0).abs() < EPSILON);
        assert!((angle_to(p(0.0, 0.0), p(0.0, 1.0)) - std::f64::consts::FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn polar_offset_round_trips_through_angle_to() {
        let origin = p(1.0, 2.0);
        let target = polar_offset(origin, 5.0, 0.7);
        assert!((dist(origin, target) - 5.0).abs() < 1e-9);
        assert!((angle_to(origin, target) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn cross_mag_is_nonnegative_and_zero_for_parallel_vectors() {
        assert_eq!(cross_mag(p(2.0, 0.0), p(4.0, 0.0)), 0.0);
        assert_eq!(cross_mag(p(1.0, 0.0), p(0.0, 1.0)), 1.0);
        assert_eq!(cross_mag(p(0.0, 1.0), p(1.0, 0.0)), 1.0);
    }

    #[test]
    fn dot_of_perpendicular_vectors_is_zero() {
        assert_eq!(dot(p(1.0, 0.0), p(0.0, 1.0)), 0.0);
    }

    #[test]
    fn normalise_2pi_stays_in_range() {
        let tau = std::f64::consts::TAU;
        assert!((normalise_2pi(-0.1) - (tau - 0.1)).abs() < EPSILON);
        assert!((normalise_2pi(tau + 0.2) - 0.2).abs() < EPSILON);
        assert_eq!(normalise_2pi(0.0), 0.0);
    }

    #[test]
    fn zero_radius_circle_is_degenerate() {
        assert!(Circle::point(p(0.0, 0.0)).is_degenerate());
        assert!(!Circle::new(p(0.0, 0.0), 1.0).is_degenerate());
    }
}
