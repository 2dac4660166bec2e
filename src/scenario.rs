//! Scenario loading for the CLI front-end.
//!
//! Plain `serde`-derived data carriers deserialized from a file the binary
//! reads at startup. The tangent-graph core itself has no file format;
//! this type exists only for the CLI demonstration.

use serde::{Deserialize, Serialize};

use crate::geometry::{Circle, Vec2};

/// One obstacle circle as it appears in a scenario file: plain numbers,
/// not the `geo::Point`-backed [`Circle`] the core works with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleDef {
    pub center: [f64; 2],
    pub radius: f64,
}

impl From<CircleDef> for Circle {
    fn from(def: CircleDef) -> Self {
        Circle::new(Vec2::new(def.center[0], def.center[1]), def.radius)
    }
}

/// A complete planning query: the obstacle field plus start and goal,
/// loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub obstacles: Vec<CircleDef>,
    pub start: [f64; 2],
    pub goal: [f64; 2],
}

impl Scenario {
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn obstacle_circles(&self) -> Vec<Circle> {
        self.obstacles.iter().map(|&def| Circle::from(def)).collect()
    }

    pub fn start_point(&self) -> Vec2 {
        Vec2::new(self.start[0], self.start[1])
    }

    pub fn goal_point(&self) -> Vec2 {
        Vec2::new(self.goal[0], self.goal[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_scenario() {
        let json = r#"{
            "obstacles": [{"center": [5.0, 0.0], "radius": 1.0}],
            "start": [0.0, 0.0],
            "goal": [10.0, 0.0]
        }"#;
        let scenario = Scenario::from_json_str(json).unwrap();
        assert_eq!(scenario.obstacles.len(), 1);
        assert_eq!(scenario.obstacle_circles()[0].r, 1.0);
        assert_eq!(scenario.start_point(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Scenario::from_json_str("{ not json").is_err());
    }
}
