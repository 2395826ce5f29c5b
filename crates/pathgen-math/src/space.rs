//! Dimensionality of a path.

use serde::{Deserialize, Serialize};

use crate::{Plane, Point3};

/// Coordinate space a path lives in. Planar spaces flatten every anchor
/// onto their plane before it reaches the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathSpace {
    #[default]
    Xyz,
    Xy,
    Xz,
}

impl PathSpace {
    /// `Xyz` for 3D generators, `Xy` otherwise.
    pub fn from_is_3d(is_3d: bool) -> Self {
        if is_3d {
            PathSpace::Xyz
        } else {
            PathSpace::Xy
        }
    }

    pub fn plane(self) -> Option<Plane> {
        match self {
            PathSpace::Xyz => None,
            PathSpace::Xy => Some(Plane::xy()),
            PathSpace::Xz => Some(Plane::xz()),
        }
    }

    pub fn flatten(self, p: Point3) -> Point3 {
        match self.plane() {
            Some(plane) => plane.snap(p),
            None => p,
        }
    }
}
