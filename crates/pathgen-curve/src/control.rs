//! Anchor continuity modes and control-point placement.

use pathgen_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Tangent scale applied when nothing else is configured.
pub const DEFAULT_TANGENT_SCALE: f64 = 0.3;

/// How the incoming and outgoing handles of an anchor relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlMode {
    /// Independent handles, each pointing straight at its own neighbour.
    /// Segments stay straight, so corners stay sharp.
    Free,
    /// Opposite handles of equal length.
    #[default]
    Mirrored,
    /// Opposite handles, each scaled by the distance to its own neighbour.
    Aligned,
}

/// Continuity mode plus handle length factor for one anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorStyle {
    pub mode: ControlMode,
    pub tangent_scale: f64,
}

impl AnchorStyle {
    pub fn new(mode: ControlMode, tangent_scale: f64) -> Self {
        Self {
            mode,
            tangent_scale,
        }
    }
}

impl Default for AnchorStyle {
    fn default() -> Self {
        Self::new(ControlMode::default(), DEFAULT_TANGENT_SCALE)
    }
}

/// Compute `[incoming, outgoing]` handle positions for `anchor`.
///
/// Missing neighbours (the ends of an open path) yield a handle that sits
/// on the anchor for `Free`/`Aligned`, and a mirrored one for `Mirrored`.
pub fn anchor_handles(
    prev: Option<Point3>,
    anchor: Point3,
    next: Option<Point3>,
    style: AnchorStyle,
) -> [Point3; 2] {
    let scale = style.tangent_scale;
    let to_prev = prev.map_or(Vector3::ZERO, |p| p - anchor);
    let to_next = next.map_or(Vector3::ZERO, |n| n - anchor);

    if style.mode == ControlMode::Free {
        return [anchor + to_prev * scale, anchor + to_next * scale];
    }

    // Shared tangent direction, pointing from the anchor towards the
    // previous neighbour's side.
    let mut dir = (to_prev.normalize_or_zero() - to_next.normalize_or_zero()).normalize_or_zero();
    if dir == Vector3::ZERO {
        // Path folds back on itself.
        dir = (to_prev - to_next).normalize_or_zero();
    }

    let (d_prev, d_next) = (to_prev.length(), to_next.length());
    let (len_in, len_out) = match style.mode {
        ControlMode::Aligned => (d_prev * scale, d_next * scale),
        _ => {
            let len = match (prev.is_some(), next.is_some()) {
                (true, true) => (d_prev + d_next) * 0.5,
                _ => d_prev.max(d_next),
            } * scale;
            (len, len)
        }
    };

    [anchor + dir * len_in, anchor - dir * len_out]
}
