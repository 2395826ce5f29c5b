//! Drawing planes of flat paths.

use serde::{Deserialize, Serialize};

use crate::{Point3, Vector3};

/// Plane `normal . p = offset`, with a unit normal.
///
/// A flat path draws every anchor on one of these; anything that drifts
/// off it is snapped back along the normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vector3,
    pub offset: f64,
}

impl Plane {
    /// Plane through `point`. A zero `normal` falls back to +Z.
    pub fn through(point: Point3, normal: Vector3) -> Self {
        let normal = normal.try_normalize().unwrap_or(Vector3::Z);
        Self {
            normal,
            offset: normal.dot(point),
        }
    }

    /// Ground plane of `Xy` paths.
    pub fn xy() -> Self {
        Self::through(Point3::ZERO, Vector3::Z)
    }

    /// Ground plane of `Xz` paths.
    pub fn xz() -> Self {
        Self::through(Point3::ZERO, Vector3::Y)
    }

    /// How far `point` sits above the plane, along the normal.
    pub fn height(&self, point: Point3) -> f64 {
        self.normal.dot(point) - self.offset
    }

    pub fn snap(&self, point: Point3) -> Point3 {
        point - self.normal * self.height(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::dvec3;

    #[test]
    fn test_xz_snap_drops_height_only() {
        let plane = Plane::xz();
        let p = dvec3(3.0, -7.5, 2.0);
        assert_relative_eq!(plane.height(p), -7.5);
        assert_eq!(plane.snap(p), dvec3(3.0, 0.0, 2.0));
        assert_eq!(plane.snap(plane.snap(p)), plane.snap(p));
    }

    #[test]
    fn test_raised_plane() {
        let plane = Plane::through(dvec3(0.0, 0.0, 4.0), dvec3(0.0, 0.0, 2.0));
        assert_relative_eq!(plane.offset, 4.0);
        assert_relative_eq!(plane.height(dvec3(1.0, 1.0, 1.0)), -3.0);
        assert_eq!(plane.snap(dvec3(1.0, 1.0, 1.0)), dvec3(1.0, 1.0, 4.0));
    }

    #[test]
    fn test_zero_normal_falls_back_to_z() {
        assert_eq!(Plane::through(Point3::ZERO, Vector3::ZERO), Plane::xy());
    }
}
