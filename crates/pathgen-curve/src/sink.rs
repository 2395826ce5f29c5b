//! Interfaces to the collaborators that consume a finished curve.

use std::cell::RefCell;
use std::rc::Rc;

use pathgen_core::Result;
use pathgen_math::Point3;

use crate::control::AnchorStyle;
use crate::curve::CubicBezier;
use crate::spec::CurveSpec;

/// A Bezier path consumer. It owns the control-point math; the builder
/// only tells it which anchors exist and how each one should behave.
pub trait CurveSink {
    /// Replace everything with the curve described by `spec`.
    fn load(&mut self, spec: &CurveSpec);

    /// Add one segment ending at `anchor` to the end of the path.
    fn append_segment(&mut self, anchor: Point3, style: AnchorStyle);

    /// Change the style of an existing anchor and refresh its handles.
    fn set_anchor_style(&mut self, index: usize, style: AnchorStyle);

    /// Delete segment `index` together with the anchor it starts at.
    fn delete_segment(&mut self, index: usize) -> Result<()>;

    fn segment_count(&self) -> usize;

    /// `[anchor, handle, handle, anchor]` of segment `index`.
    fn points_in_segment(&self, index: usize) -> Option<[Point3; 4]>;

    fn is_closed(&self) -> bool;

    fn segment(&self, index: usize) -> Option<CubicBezier> {
        self.points_in_segment(index).map(CubicBezier::new)
    }
}

/// Regenerates a collision shape from the current curve.
pub trait ColliderBuilder {
    fn regenerate(&mut self, curve: &CurveSpec, sink: &dyn CurveSink) -> Result<()>;
}

/// Lets a host keep reading a collider after handing it to a generator.
impl<T: ColliderBuilder> ColliderBuilder for Rc<RefCell<T>> {
    fn regenerate(&mut self, curve: &CurveSpec, sink: &dyn CurveSink) -> Result<()> {
        self.borrow_mut().regenerate(curve, sink)
    }
}
