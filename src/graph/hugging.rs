//! Hugging-edge installation.

use crate::geometry::{angle_to, normalise_2pi, Vec2};

/// Sorts surviving tangent points around a circle into the cyclic order
/// hugging edges connect.
pub fn angular_order(center: Vec2, positions: &mut [(usize, Vec2)]) {
    positions.sort_by(|(_, a), (_, b)| {
        normalise_2pi(angle_to(center, *a))
            .partial_cmp(&normalise_2pi(angle_to(center, *b)))
            .expect("angles are finite")
    });
}

/// The consecutive-pair-plus-wraparound hugging edges for one circle, given
/// its nodes already sorted into angular order. Returns pairs of indices
/// into the slice that was sorted by [`angular_order`], not node handles;
/// the caller zips these back to real `NodeId`s. A circle with `k < 2`
/// surviving nodes gets no hugging edges. Degenerate circles are never
/// passed in.
pub fn hugging_pairs(sorted_len: usize) -> Vec<(usize, usize)> {
    if sorted_len < 2 {
        return Vec::new();
    }
    (0..sorted_len)
        .map(|i| (i, (i + 1) % sorted_len))
        .collect()
}

/// Arc length of a hugging edge between two angular positions on a circle
/// of radius `r`, taking the shorter of the two arcs.
pub fn arc_length(r: f64, alpha1: f64, alpha2: f64) -> f64 {
    let delta = normalise_2pi(alpha2 - alpha1);
    let short = delta.min(std::f64::consts::TAU - delta);
    r * short
}
