//! Principal axis selection and the coordinate mappings tied to it.

use pathgen_core::PathError;
use serde::{Deserialize, Serialize};

use crate::{Point2, Point3};

/// The axis a planar shape is aligned to, or a spiral advances along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathAxis {
    X,
    #[default]
    Y,
    Z,
    /// Accepted for compatibility; has no mapping of its own.
    Custom,
}

impl PathAxis {
    /// Axis used when a selection has no mapping.
    pub const FALLBACK: PathAxis = PathAxis::X;

    /// Resolve to an axis with a defined mapping. `Custom` falls back to
    /// [`PathAxis::FALLBACK`] and reports `UnsupportedAxis` alongside it.
    pub fn resolve(self) -> (PathAxis, Option<PathError>) {
        match self {
            PathAxis::Custom => (
                Self::FALLBACK,
                Some(PathError::UnsupportedAxis(format!(
                    "{:?} axis has no mapping yet, defaulting to {:?}",
                    self,
                    Self::FALLBACK
                ))),
            ),
            axis => (axis, None),
        }
    }

    /// Component index into a 3D vector. `Custom` uses the fallback index.
    pub fn index(self) -> usize {
        match self {
            PathAxis::X | PathAxis::Custom => 0,
            PathAxis::Y => 1,
            PathAxis::Z => 2,
        }
    }

    /// The two perpendicular axes `(p, q)` in the order the spiral swings
    /// through them: first `p`, then `q`.
    pub fn perpendicular(self) -> (PathAxis, PathAxis) {
        match self {
            PathAxis::X | PathAxis::Custom => (PathAxis::Y, PathAxis::Z),
            PathAxis::Y => (PathAxis::X, PathAxis::Z),
            PathAxis::Z => (PathAxis::X, PathAxis::Y),
        }
    }

    /// Map a 2D direction in the shape's own plane into 3D.
    ///
    /// * `X` -> `(0, d.x, d.y)`
    /// * `Y` -> `(d.y, 0, d.x)`
    /// * `Z` -> `(d.y, d.x, 0)`
    pub fn map_planar(self, d: Point2) -> Point3 {
        match self {
            PathAxis::X | PathAxis::Custom => Point3::new(0.0, d.x, d.y),
            PathAxis::Y => Point3::new(d.y, 0.0, d.x),
            PathAxis::Z => Point3::new(d.y, d.x, 0.0),
        }
    }
}
