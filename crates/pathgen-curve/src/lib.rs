//! Curve representation for generated paths: piecewise-cubic Bezier
//! anchors with per-anchor continuity, the sink interface a Bezier path
//! consumer implements, and the incremental builder that keeps both in step.

pub mod builder;
pub mod control;
pub mod curve;
pub mod path;
pub mod sink;
pub mod spec;
pub mod tessellate;

pub use builder::CurveBuilder;
pub use control::{AnchorStyle, ControlMode};
pub use curve::{CubicBezier, Curve};
pub use path::BezierPath;
pub use sink::{ColliderBuilder, CurveSink};
pub use spec::CurveSpec;
