//! Mirroring a Bezier path into a sprite-shape spline.
//!
//! The spline stores positions plus left/right tangent offsets per point,
//! the way 2D sprite-shape renderers expect them. Export is incremental:
//! the exporter remembers the last segment it copied and only appends
//! segments past it on the next [`SpriteShapeExporter::update`].

use pathgen_curve::{Curve, CurveSink};
use pathgen_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Length factor applied to the unit anchor tangents.
pub const SCALE: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TangentMode {
    /// Left and right tangents stay opposite.
    #[default]
    Continuous,
    /// Tangents are independent; used for sharp corners.
    Broken,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapePoint {
    pub position: Point3,
    pub left_tangent: Vector3,
    pub right_tangent: Vector3,
    pub mode: TangentMode,
}

impl ShapePoint {
    fn new(position: Point3) -> Self {
        Self {
            position,
            left_tangent: Vector3::ZERO,
            right_tangent: Vector3::ZERO,
            mode: TangentMode::Continuous,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeSpline {
    pub points: Vec<ShapePoint>,
    pub open_ended: bool,
}

impl ShapeSpline {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Keeps a [`ShapeSpline`] in step with a growing curve sink.
///
/// Segments are tracked by index, so a sink that dropped segments from its
/// front has to be exported again with [`SpriteShapeExporter::convert_smooth`]
/// or [`SpriteShapeExporter::convert_sharp`].
#[derive(Debug, Clone, Default)]
pub struct SpriteShapeExporter {
    spline: ShapeSpline,
    last_segment: usize,
}

impl SpriteShapeExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spline(&self) -> &ShapeSpline {
        &self.spline
    }

    /// Index of the last segment copied into the spline.
    pub fn last_segment(&self) -> usize {
        self.last_segment
    }

    /// Append segments past the last exported one and recompute tangents.
    /// Returns the new last exported segment index.
    pub fn update(&mut self, sink: &dyn CurveSink, sharp: bool) -> usize {
        let count = sink.segment_count();
        self.spline.open_ended = !sink.is_closed();
        if count == 0 {
            tracing::warn!("sprite shape export skipped: path has no segments");
            return self.last_segment;
        }

        if self.spline.len() <= 2 {
            if let Some([start, .., end]) = sink.points_in_segment(0) {
                self.spline.clear();
                self.spline.points.push(ShapePoint::new(start));
                self.spline.points.push(ShapePoint::new(end));
                self.last_segment = 0;
            }
        }

        for i in self.last_segment + 1..count {
            // The closing segment of a loop ends on the first point.
            if i == count - 1 && !self.spline.open_ended {
                continue;
            }
            if let Some([.., end]) = sink.points_in_segment(i) {
                self.spline.points.push(ShapePoint::new(end));
                self.last_segment = i;
            }
        }

        if sharp {
            self.set_sharp_tangents();
        } else {
            self.set_smooth_tangents(sink);
        }
        tracing::debug!(
            points = self.spline.len(),
            last_segment = self.last_segment,
            sharp,
            "sprite shape updated"
        );
        self.last_segment
    }

    /// Re-export everything with continuous tangents.
    pub fn convert_smooth(&mut self, sink: &dyn CurveSink) -> usize {
        self.clear();
        self.update(sink, false)
    }

    /// Re-export everything with zero tangents.
    pub fn convert_sharp(&mut self, sink: &dyn CurveSink) -> usize {
        self.clear();
        self.update(sink, true)
    }

    pub fn clear(&mut self) {
        self.spline.clear();
        self.last_segment = 0;
    }

    fn set_sharp_tangents(&mut self) {
        for point in &mut self.spline.points {
            point.mode = TangentMode::Broken;
            point.left_tangent = Vector3::ZERO;
            point.right_tangent = Vector3::ZERO;
        }
    }

    fn set_smooth_tangents(&mut self, sink: &dyn CurveSink) {
        for (i, point) in self.spline.points.iter_mut().enumerate() {
            let t = anchor_tangent(sink, i) * SCALE;
            point.mode = TangentMode::Continuous;
            point.left_tangent = -t;
            point.right_tangent = t;
        }
        if self.spline.open_ended {
            if let Some(first) = self.spline.points.first_mut() {
                first.left_tangent = Vector3::ZERO;
            }
            if let Some(last) = self.spline.points.last_mut() {
                last.right_tangent = Vector3::ZERO;
            }
        }
    }
}

/// Unit direction of travel through anchor `index`.
///
/// Taken from the curve derivative where the anchor starts a segment (or
/// ends the last one); falls back to the chord when a handle sits on its
/// anchor.
fn anchor_tangent(sink: &dyn CurveSink, index: usize) -> Vector3 {
    let count = sink.segment_count();
    let (segment, t) = if index < count {
        (sink.segment(index), 0.0)
    } else {
        (sink.segment(count.saturating_sub(1)), 1.0)
    };
    let Some(segment) = segment else {
        return Vector3::ZERO;
    };
    let derivative = segment.tangent_at(t);
    if derivative.length_squared() > f64::EPSILON {
        return derivative.normalize();
    }
    (segment.end() - segment.start()).normalize_or_zero()
}
