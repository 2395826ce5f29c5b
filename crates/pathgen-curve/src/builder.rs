//! Keeps a [`CurveSpec`] and its [`CurveSink`] in step.

use pathgen_core::error::{PathError, Result};
use pathgen_math::{PathSpace, Point3};

use crate::control::{AnchorStyle, ControlMode, DEFAULT_TANGENT_SCALE};
use crate::path::BezierPath;
use crate::sink::CurveSink;
use crate::spec::CurveSpec;

/// Converts a point sequence into a curve, either from scratch or one
/// segment at a time at either end.
pub struct CurveBuilder {
    spec: Option<CurveSpec>,
    sink: Box<dyn CurveSink>,
    mode: ControlMode,
    tangent_scale: f64,
    space: PathSpace,
}

impl CurveBuilder {
    /// Builder writing into a [`BezierPath`].
    pub fn new() -> Self {
        Self::with_sink(Box::new(BezierPath::new()))
    }

    pub fn with_sink(sink: Box<dyn CurveSink>) -> Self {
        Self {
            spec: None,
            sink,
            mode: ControlMode::default(),
            tangent_scale: DEFAULT_TANGENT_SCALE,
            space: PathSpace::Xyz,
        }
    }

    /// Discard any previous curve and build one through all of `points`.
    ///
    /// Every anchor gets `mode` and the current tangent scale. Calling this
    /// twice with the same input yields the same curve.
    pub fn rebuild_full(&mut self, points: &[Point3], closed: bool, mode: ControlMode) -> &CurveSpec {
        self.mode = mode;
        let spec = CurveSpec::new(points, closed, self.space, self.style());
        self.sink.load(&spec);
        tracing::debug!(
            anchors = spec.anchor_count(),
            closed,
            ?mode,
            "curve rebuilt"
        );
        self.spec.insert(spec)
    }

    /// Add one terminal segment ending at `point`. The previous terminal
    /// anchor and the new one both take the current mode.
    pub fn append_point(&mut self, point: Point3) -> Result<()> {
        let style = self.style();
        let spec = self.spec.as_mut().ok_or(PathError::NotInitialized)?;
        spec.push_anchor(point, style);
        let last = spec.anchor_count() - 1;
        if last > 0 {
            spec.set_style(last - 1, style);
            self.sink.set_anchor_style(last - 1, style);
        }
        self.sink.append_segment(point, style);
        Ok(())
    }

    /// Remove the first segment (and the anchor it starts at).
    pub fn delete_front_segment(&mut self) -> Result<()> {
        let spec = self.spec.as_mut().ok_or(PathError::EmptyCurve)?;
        if spec.segment_count() == 0 {
            return Err(PathError::EmptyCurve);
        }
        spec.remove_anchor(0);
        self.sink.delete_segment(0)
    }

    pub fn set_continuity_mode(&mut self, mode: ControlMode) {
        self.mode = mode;
    }

    pub fn set_tangent_scale(&mut self, factor: f64) {
        self.tangent_scale = factor;
    }

    /// Space applied on the next full rebuild.
    pub fn set_space(&mut self, space: PathSpace) {
        self.space = space;
    }

    pub fn continuity_mode(&self) -> ControlMode {
        self.mode
    }

    pub fn tangent_scale(&self) -> f64 {
        self.tangent_scale
    }

    pub fn spec(&self) -> Option<&CurveSpec> {
        self.spec.as_ref()
    }

    pub fn sink(&self) -> &dyn CurveSink {
        self.sink.as_ref()
    }

    pub fn anchor_count(&self) -> usize {
        self.spec.as_ref().map_or(0, CurveSpec::anchor_count)
    }

    pub fn segment_count(&self) -> usize {
        self.spec.as_ref().map_or(0, CurveSpec::segment_count)
    }

    /// Drop the curve. The next change must be a full rebuild.
    pub fn clear(&mut self) {
        self.spec = None;
        self.sink.load(&CurveSpec::new(&[], false, self.space, self.style()));
    }

    fn style(&self) -> AnchorStyle {
        AnchorStyle::new(self.mode, self.tangent_scale)
    }
}

impl Default for CurveBuilder {
    fn default() -> Self {
        Self::new()
    }
}
