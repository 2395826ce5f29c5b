//! Cubic Bezier segment.

use pathgen_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Curve;

/// One segment of a path: two anchors and the two control points between
/// them, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub points: [Point3; 4],
}

impl CubicBezier {
    pub fn new(points: [Point3; 4]) -> Self {
        Self { points }
    }

    pub fn start(&self) -> Point3 {
        self.points[0]
    }

    pub fn end(&self) -> Point3 {
        self.points[3]
    }
}

impl Curve for CubicBezier {
    fn point_at(&self, t: f64) -> Point3 {
        let [p0, p1, p2, p3] = self.points;
        let u = 1.0 - t;
        p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        let [p0, p1, p2, p3] = self.points;
        let u = 1.0 - t;
        (p1 - p0) * (3.0 * u * u) + (p2 - p1) * (6.0 * u * t) + (p3 - p2) * (3.0 * t * t)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}
