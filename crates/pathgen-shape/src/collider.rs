//! Edge collider traced along a path.

use pathgen_core::error::{PathError, Result};
use pathgen_core::traits::BoundingBox;
use pathgen_curve::tessellate::sink_to_polyline;
use pathgen_curve::{ColliderBuilder, CurveSink, CurveSpec};
use pathgen_math::{PathSpace, Point2, Point3};
use serde::{Deserialize, Serialize};

/// Flattening tolerance used by [`PathCollider2d::default`].
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// A 2D polyline following the curve, regenerated on every rebuild.
///
/// Points are taken in the curve's own plane: `(x, z)` for an XZ path,
/// `(x, y)` otherwise. Closed paths repeat their first point at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCollider2d {
    tolerance: f64,
    points: Vec<Point2>,
    closed: bool,
}

impl PathCollider2d {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            points: Vec::new(),
            closed: false,
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Consecutive point pairs.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn edge_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

impl Default for PathCollider2d {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

fn project(space: PathSpace, p: Point3) -> Point2 {
    match space {
        PathSpace::Xz => Point2::new(p.x, p.z),
        PathSpace::Xy | PathSpace::Xyz => p.truncate(),
    }
}

impl ColliderBuilder for PathCollider2d {
    fn regenerate(&mut self, curve: &CurveSpec, sink: &dyn CurveSink) -> Result<()> {
        let polyline = sink_to_polyline(sink, self.tolerance);
        if polyline.len() < 2 {
            self.points.clear();
            return Err(PathError::Collider(format!(
                "path has {} segments, need at least one",
                sink.segment_count()
            )));
        }
        let space = curve.space();
        self.points = polyline.into_iter().map(|p| project(space, p)).collect();
        self.closed = sink.is_closed();
        tracing::debug!(edges = self.edge_count(), closed = self.closed, "collider regenerated");
        Ok(())
    }
}

impl BoundingBox for PathCollider2d {
    type Point = Point2;

    fn bounding_box(&self) -> Option<(Point2, Point2)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }
}
