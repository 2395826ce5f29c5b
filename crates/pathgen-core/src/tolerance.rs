/// Tolerances used when comparing generated coordinates.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Distance below which two points are treated as coincident (model units)
    pub linear: f64,
    /// Angular tolerance (in degrees, matching the generator configs)
    pub angular_deg: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-9;
    pub const DEFAULT_ANGULAR_DEG: f64 = 1e-6;

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            angular_deg: Self::DEFAULT_ANGULAR_DEG,
        }
    }

    pub fn linear_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }

    pub fn is_zero(self, v: f64) -> bool {
        v.abs() < self.linear
    }

    /// Compare two angles in degrees, modulo a full turn.
    pub fn angular_eq(self, a: f64, b: f64) -> bool {
        let diff = (a - b).rem_euclid(360.0);
        diff < self.angular_deg || 360.0 - diff < self.angular_deg
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
