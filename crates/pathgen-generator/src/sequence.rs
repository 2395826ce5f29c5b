//! Ordered anchor points of a path, with an optional size limit.

use pathgen_core::error::{PathError, Result};
use pathgen_core::traits::{BoundingBox, Validate};
use pathgen_math::{Aabb3, Point3};

/// The points a generator has produced, oldest first.
///
/// With a limit set, `append` refuses to grow past it; making room is the
/// caller's job through [`PointSequence::evict_front`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSequence {
    points: Vec<Point3>,
    limit: Option<usize>,
}

impl PointSequence {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            points: Vec::new(),
            limit,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    pub fn append(&mut self, point: Point3) -> Result<()> {
        if !self.can_accept(1) {
            return Err(PathError::CapacityExceeded {
                requested: 1,
                max: self.limit.unwrap_or(usize::MAX),
            });
        }
        self.points.push(point);
        Ok(())
    }

    /// Remove the first `n` points, returning them.
    pub fn evict_front(&mut self, n: usize) -> Result<Vec<Point3>> {
        if n > self.points.len() {
            return Err(PathError::InsufficientLength {
                requested: n,
                available: self.points.len(),
            });
        }
        Ok(self.points.drain(..n).collect())
    }

    /// Reset to the canonical `[origin, (1, 1, 1)]` pair when fewer than two
    /// points are present. Returns whether the reset happened.
    pub fn ensure_minimum(&mut self) -> bool {
        if self.points.len() >= 2 {
            return false;
        }
        self.points.clear();
        self.points.push(Point3::ZERO);
        self.points.push(Point3::ONE);
        true
    }

    /// Whether `n` more points fit under the limit.
    pub fn can_accept(&self, n: usize) -> bool {
        match self.limit {
            Some(max) => self.points.len().saturating_add(n) <= max,
            None => true,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point3> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point3> {
        self.points.last().copied()
    }

    pub fn as_slice(&self) -> &[Point3] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3> {
        self.points.iter()
    }
}

impl Validate for PointSequence {
    fn validate(&self) -> Result<()> {
        if let Some(max) = self.limit {
            if self.points.len() > max {
                return Err(PathError::CapacityExceeded {
                    requested: self.points.len(),
                    max,
                });
            }
        }
        if self.points.len() == 1 {
            return Err(PathError::InsufficientLength {
                requested: 2,
                available: 1,
            });
        }
        Ok(())
    }
}

impl BoundingBox for PointSequence {
    type Point = Point3;

    fn bounding_box(&self) -> Option<(Point3, Point3)> {
        Aabb3::from_points(&self.points).map(|b| (b.min, b.max))
    }
}
