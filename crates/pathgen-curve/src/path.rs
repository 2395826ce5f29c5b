//! Default [`CurveSink`]: a cubic Bezier path that places its own handles.

use pathgen_core::error::{PathError, Result};
use pathgen_math::{PathSpace, Point3};

use crate::control::{anchor_handles, AnchorStyle};
use crate::sink::CurveSink;
use crate::spec::CurveSpec;

/// Bezier path with `[incoming, outgoing]` handles cached per anchor.
///
/// Handles are refreshed locally: touching an anchor only recomputes it
/// and its neighbours.
#[derive(Debug, Clone)]
pub struct BezierPath {
    spec: CurveSpec,
    handles: Vec<[Point3; 2]>,
}

impl BezierPath {
    pub fn new() -> Self {
        Self {
            spec: CurveSpec::new(&[], false, PathSpace::Xyz, AnchorStyle::default()),
            handles: Vec::new(),
        }
    }

    pub fn from_spec(spec: &CurveSpec) -> Self {
        let mut path = Self::new();
        path.load(spec);
        path
    }

    pub fn spec(&self) -> &CurveSpec {
        &self.spec
    }

    pub fn anchor_count(&self) -> usize {
        self.spec.anchor_count()
    }

    /// `[incoming, outgoing]` handle of anchor `index`.
    pub fn handles(&self, index: usize) -> Option<[Point3; 2]> {
        self.handles.get(index).copied()
    }

    fn refresh(&mut self, index: usize) {
        let Some(&anchor) = self.spec.anchors().get(index) else {
            return;
        };
        let (prev, next) = self.spec.neighbours(index);
        self.handles[index] = anchor_handles(prev, anchor, next, self.spec.styles()[index]);
    }

    /// Recompute `index` and its direct neighbours (with wrap-around on
    /// closed paths).
    fn refresh_around(&mut self, index: usize) {
        let n = self.spec.anchor_count();
        if n == 0 {
            return;
        }
        let index = index.min(n - 1);
        self.refresh(index);
        if index > 0 {
            self.refresh(index - 1);
        } else if self.spec.is_closed() {
            self.refresh(n - 1);
        }
        if index + 1 < n {
            self.refresh(index + 1);
        } else if self.spec.is_closed() {
            self.refresh(0);
        }
    }
}

impl Default for BezierPath {
    fn default() -> Self {
        Self::new()
    }
}

impl CurveSink for BezierPath {
    fn load(&mut self, spec: &CurveSpec) {
        self.spec = spec.clone();
        self.handles = vec![[Point3::ZERO; 2]; spec.anchor_count()];
        for i in 0..spec.anchor_count() {
            self.refresh(i);
        }
    }

    fn append_segment(&mut self, anchor: Point3, style: AnchorStyle) {
        self.spec.push_anchor(anchor, style);
        self.handles.push([Point3::ZERO; 2]);
        self.refresh_around(self.spec.anchor_count() - 1);
    }

    fn set_anchor_style(&mut self, index: usize, style: AnchorStyle) {
        if index < self.spec.anchor_count() {
            self.spec.set_style(index, style);
            self.refresh(index);
        }
    }

    fn delete_segment(&mut self, index: usize) -> Result<()> {
        let count = self.segment_count();
        if count == 0 {
            return Err(PathError::EmptyCurve);
        }
        if index >= count {
            return Err(PathError::SegmentOutOfRange { index, count });
        }
        self.spec.remove_anchor(index);
        self.handles.remove(index);
        if self.spec.anchor_count() > 0 {
            // The anchor now at `index` (or the new last one) and its
            // neighbours lost a neighbour.
            self.refresh_around(index);
        }
        Ok(())
    }

    fn segment_count(&self) -> usize {
        self.spec.segment_count()
    }

    fn points_in_segment(&self, index: usize) -> Option<[Point3; 4]> {
        let (a, b) = self.spec.segment_anchors(index)?;
        let anchors = self.spec.anchors();
        Some([anchors[a], self.handles[a][1], self.handles[b][0], anchors[b]])
    }

    fn is_closed(&self) -> bool {
        self.spec.is_closed()
    }
}
