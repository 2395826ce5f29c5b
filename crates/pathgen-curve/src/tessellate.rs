//! Flattening curves into polylines.

use pathgen_math::Point3;

use crate::curve::Curve;
use crate::sink::CurveSink;

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

/// Convert a curve to a polyline using adaptive subdivision.
///
/// Segments are split wherever the parametric midpoint deviates from the
/// chord midpoint by more than `tolerance`.
pub fn curve_to_polyline(curve: &dyn Curve, tolerance: f64) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    let mut points = vec![curve.point_at(t_min)];
    subdivide_curve(curve, t_min, t_max, tolerance, &mut points, 0);
    points
}

/// Flatten every segment of a sink into one polyline. Shared anchors are
/// emitted once; a closed path ends on its first point again.
pub fn sink_to_polyline(sink: &dyn CurveSink, tolerance: f64) -> Vec<Point3> {
    let mut points = Vec::new();
    for i in 0..sink.segment_count() {
        let Some(segment) = sink.segment(i) else {
            continue;
        };
        if points.is_empty() {
            points.push(segment.point_at(0.0));
        }
        subdivide_curve(&segment, 0.0, 1.0, tolerance, &mut points, 0);
    }
    points
}

fn subdivide_curve(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    tolerance: f64,
    points: &mut Vec<Point3>,
    depth: u32,
) {
    if depth >= MAX_DEPTH {
        points.push(curve.point_at(t1));
        return;
    }

    let t_mid = (t0 + t1) * 0.5;
    let p0 = curve.point_at(t0);
    let p1 = curve.point_at(t1);
    let p_mid = curve.point_at(t_mid);

    let chord_mid = (p0 + p1) * 0.5;
    let deviation = (p_mid - chord_mid).length();

    if deviation > tolerance {
        subdivide_curve(curve, t0, t_mid, tolerance, points, depth + 1);
        subdivide_curve(curve, t_mid, t1, tolerance, points, depth + 1);
    } else {
        points.push(p1);
    }
}
