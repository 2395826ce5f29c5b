//! The curve representation derived from a point sequence.

use pathgen_core::error::{PathError, Result};
use pathgen_core::traits::{BoundingBox, Validate};
use pathgen_core::Tolerance;
use pathgen_math::{Aabb3, PathSpace, Point3};
use serde::{Deserialize, Serialize};

use crate::control::AnchorStyle;

/// Ordered anchors with one [`AnchorStyle`] each, plus the open/closed
/// flag fixed at construction.
///
/// An open curve with `n` anchors has `n - 1` segments; a closed one has
/// `n`, the last segment wrapping back to the first anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSpec {
    anchors: Vec<Point3>,
    styles: Vec<AnchorStyle>,
    closed: bool,
    space: PathSpace,
}

impl CurveSpec {
    /// Build a curve through `points`, flattened into `space`, with the
    /// same style on every anchor.
    pub fn new(points: &[Point3], closed: bool, space: PathSpace, style: AnchorStyle) -> Self {
        Self {
            anchors: points.iter().map(|&p| space.flatten(p)).collect(),
            styles: vec![style; points.len()],
            closed,
            space,
        }
    }

    pub fn anchors(&self) -> &[Point3] {
        &self.anchors
    }

    pub fn styles(&self) -> &[AnchorStyle] {
        &self.styles
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn space(&self) -> PathSpace {
        self.space
    }

    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    pub fn segment_count(&self) -> usize {
        let n = self.anchors.len();
        if n < 2 {
            0
        } else if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Anchor indices `(start, end)` of segment `index`.
    pub fn segment_anchors(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.segment_count() {
            return None;
        }
        Some((index, (index + 1) % self.anchors.len()))
    }

    /// Neighbouring anchors of `index`, wrapping for closed curves.
    pub fn neighbours(&self, index: usize) -> (Option<Point3>, Option<Point3>) {
        let n = self.anchors.len();
        if index >= n || n < 2 {
            return (None, None);
        }
        if self.closed {
            (
                Some(self.anchors[(index + n - 1) % n]),
                Some(self.anchors[(index + 1) % n]),
            )
        } else {
            (
                index.checked_sub(1).map(|i| self.anchors[i]),
                self.anchors.get(index + 1).copied(),
            )
        }
    }

    /// Append an anchor at the end. The point is flattened into the curve's space.
    pub fn push_anchor(&mut self, point: Point3, style: AnchorStyle) {
        self.anchors.push(self.space.flatten(point));
        self.styles.push(style);
    }

    /// Remove the anchor at `index`, which deletes the segment starting there.
    pub fn remove_anchor(&mut self, index: usize) -> Option<Point3> {
        if index >= self.anchors.len() {
            return None;
        }
        self.styles.remove(index);
        Some(self.anchors.remove(index))
    }

    pub fn set_style(&mut self, index: usize, style: AnchorStyle) {
        if let Some(s) = self.styles.get_mut(index) {
            *s = style;
        }
    }
}

impl Validate for CurveSpec {
    fn validate(&self) -> Result<()> {
        if self.anchors.len() != self.styles.len() {
            return Err(PathError::InvalidConfig(format!(
                "curve has {} anchors but {} anchor styles",
                self.anchors.len(),
                self.styles.len()
            )));
        }
        if let Some(i) = self.anchors.iter().position(|p| !p.is_finite()) {
            return Err(PathError::InvalidConfig(format!("anchor {} is not finite", i)));
        }
        if let Some(plane) = self.space.plane() {
            let tolerance = Tolerance::default_precision();
            if let Some(i) = self
                .anchors
                .iter()
                .position(|&p| !tolerance.is_zero(plane.height(p)))
            {
                return Err(PathError::InvalidConfig(format!(
                    "anchor {} lies outside the {:?} plane",
                    i, self.space
                )));
            }
        }
        Ok(())
    }
}

impl BoundingBox for CurveSpec {
    type Point = Point3;

    fn bounding_box(&self) -> Option<(Point3, Point3)> {
        Aabb3::from_points(&self.anchors).map(|b| (b.min, b.max))
    }
}
