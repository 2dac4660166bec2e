//! Bitangent construction between two obstacle circles.

use crate::geometry::{angle_to, dist, polar_offset, Circle, Vec2, EPSILON};

/// A candidate surfing edge between two tangent points, one on each circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentPair {
    pub first: Vec2,
    pub second: Vec2,
}

/// The two internal bitangents between `a` and `b` (crossing segment `AB`),
/// or `None` if the circles overlap or are concentric. Skipped silently by
/// the caller.
pub fn internal_bitangents(a: Circle, b: Circle) -> Option<[TangentPair; 2]> {
    let d = dist(a.center, b.center);
    if d <= EPSILON {
        return None;
    }
    let ratio = (a.r + b.r) / d;
    if ratio > 1.0 {
        return None;
    }
    let theta = ratio.clamp(-1.0, 1.0).acos();

    let alpha_ab = angle_to(a.center, b.center);
    let alpha_ba = angle_to(b.center, a.center);

    let c = polar_offset(a.center, a.r, alpha_ab + theta);
    let d_pt = polar_offset(a.center, a.r, alpha_ab - theta);
    let e = polar_offset(b.center, b.r, alpha_ba - theta);
    let f = polar_offset(b.center, b.r, alpha_ba + theta);

    Some([
        TangentPair { first: d_pt, second: e },
        TangentPair { first: c, second: f },
    ])
}

/// The two external bitangents between `a` and `b` (not crossing segment
/// `AB`). Defined whenever the centres are distinct, even when one circle
/// lies inside the other's footprint, unless `|r1 - r2| > d` (one circle
/// strictly contains the other without touching), in which case `None`.
pub fn external_bitangents(a: Circle, b: Circle) -> Option<[TangentPair; 2]> {
    let d = dist(a.center, b.center);
    if d <= EPSILON {
        return None;
    }
    let ratio = (a.r - b.r).abs() / d;
    if ratio > 1.0 {
        return None;
    }
    let theta = ratio.clamp(-1.0, 1.0).acos();

    let alpha_ab = angle_to(a.center, b.center);
    let alpha_ba = angle_to(b.center, a.center) + std::f64::consts::PI;

    let c = polar_offset(a.center, a.r, alpha_ab + theta);
    let d_pt = polar_offset(a.center, a.r, alpha_ab - theta);
    let e = polar_offset(b.center, b.r, alpha_ba - theta);
    let f = polar_offset(b.center, b.r, alpha_ba + theta);

    Some([
        TangentPair { first: d_pt, second: e },
        TangentPair { first: c, second: f },
    ])
}
