//! The generator lifecycle and the closed set of generation modes.

use pathgen_core::{Diagnostic, Result};
use pathgen_curve::control::DEFAULT_TANGENT_SCALE;
use pathgen_curve::{AnchorStyle, ControlMode, CurveSpec};
use pathgen_math::{PathSpace, Point3};

use crate::base::{GenerationReport, GeneratorCore, GeneratorState};
use crate::config::{GenerationConfig, ModeConfig};
use crate::polygon::PolygonGenerator;
use crate::random_walk::RandomWalkGenerator;
use crate::spiral::SpiralGenerator;

/// Capability shared by every generation mode.
///
/// Implementors supply the point production (`seed`, `produce_unit`) and
/// how the curve follows (`rebuild`, `full_rebuild`); the lifecycle on top
/// is provided.
pub trait PathGenerator {
    fn core(&self) -> &GeneratorCore;
    fn core_mut(&mut self) -> &mut GeneratorCore;

    /// Fill the freshly reset sequence with the mode's initial points.
    fn seed(&mut self);

    /// Produce one unit of points into the sequence without touching the curve.
    fn produce_unit(&mut self);

    /// Bring the curve up to date after one or more units.
    fn rebuild(&mut self) {
        let space = self.space();
        self.core_mut().extend_curve(space, ControlMode::Mirrored);
    }

    /// Rebuild the curve from every point in the sequence.
    fn full_rebuild(&mut self) {
        let space = self.space();
        self.core_mut()
            .rebuild_full(false, space, AnchorStyle::new(ControlMode::Mirrored, DEFAULT_TANGENT_SCALE));
    }

    fn space(&self) -> PathSpace {
        PathSpace::from_is_3d(self.core().settings().is_3d)
    }

    /// Most recent point the mode continues from, if it tracks one.
    fn last_point(&self) -> Option<Point3> {
        None
    }

    /// Reset the sequence, seed it and build the curve from scratch.
    fn initialize(&mut self) {
        tracing::debug!(generator = %self.core().name(), "initializing");
        self.core_mut().reset();
        self.seed();
        self.core_mut().ensure_minimum();
        self.full_rebuild();
        self.core_mut().set_state(GeneratorState::Ready);
    }

    /// Open a batch: `Ready -> Generating`.
    fn begin_batch(&mut self) -> Result<()> {
        self.core_mut().begin_batch()
    }

    /// Close a batch with one curve update: `Generating -> Ready`.
    fn end_batch(&mut self) -> GenerationReport {
        self.rebuild();
        self.core_mut().finish_batch()
    }

    /// Produce one unit and update the curve.
    fn generate_point(&mut self) -> Result<GenerationReport> {
        self.begin_batch()?;
        self.core_mut().count_unit();
        self.produce_unit();
        Ok(self.end_batch())
    }

    /// Drop everything and initialize again.
    fn clear(&mut self) {
        self.core_mut().set_state(GeneratorState::Cleared);
        self.initialize();
    }

    fn state(&self) -> GeneratorState {
        self.core().state()
    }

    fn points(&self) -> &[Point3] {
        self.core().points()
    }

    /// The finished curve, read-only.
    fn curve(&self) -> Option<&CurveSpec> {
        self.core().curve()
    }

    fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.core_mut().take_diagnostics()
    }
}

/// One generator of any mode.
pub enum Generator {
    RandomWalk(RandomWalkGenerator),
    Polygon(PolygonGenerator),
    Spiral(SpiralGenerator),
}

impl Generator {
    /// Build an uninitialized generator. Out-of-range fields are clamped and
    /// the clamps recorded as diagnostics.
    pub fn from_config(config: GenerationConfig) -> Self {
        let (config, diagnostics) = config.sanitized();
        let mut generator = match config.mode {
            ModeConfig::RandomWalk(c) => {
                Generator::RandomWalk(RandomWalkGenerator::new(config.settings, c))
            }
            ModeConfig::Polygon(c) => Generator::Polygon(PolygonGenerator::new(config.settings, c)),
            ModeConfig::Spiral(c) => Generator::Spiral(SpiralGenerator::new(config.settings, c)),
        };
        generator.core_mut().push_diagnostics(diagnostics);
        generator
    }

    pub fn mode_name(&self) -> &'static str {
        match self {
            Generator::RandomWalk(_) => "random_walk",
            Generator::Polygon(_) => "polygon",
            Generator::Spiral(_) => "spiral",
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $g:ident => $body:expr) => {
        match $self {
            Generator::RandomWalk($g) => $body,
            Generator::Polygon($g) => $body,
            Generator::Spiral($g) => $body,
        }
    };
}

impl PathGenerator for Generator {
    fn core(&self) -> &GeneratorCore {
        dispatch!(self, g => g.core())
    }

    fn core_mut(&mut self) -> &mut GeneratorCore {
        dispatch!(self, g => g.core_mut())
    }

    fn seed(&mut self) {
        dispatch!(self, g => g.seed())
    }

    fn produce_unit(&mut self) {
        dispatch!(self, g => g.produce_unit())
    }

    fn rebuild(&mut self) {
        dispatch!(self, g => g.rebuild())
    }

    fn full_rebuild(&mut self) {
        dispatch!(self, g => g.full_rebuild())
    }

    fn space(&self) -> PathSpace {
        dispatch!(self, g => g.space())
    }

    fn last_point(&self) -> Option<Point3> {
        dispatch!(self, g => g.last_point())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PolygonConfig, RandomWalkConfig, SpiralConfig};
    use pathgen_core::DiagnosticKind;

    #[test]
    fn test_from_config_picks_variant() {
        let g = Generator::from_config(GenerationConfig::polygon(PolygonConfig::default()));
        assert_eq!(g.mode_name(), "polygon");
        let g = Generator::from_config(GenerationConfig::spiral(SpiralConfig::default()));
        assert_eq!(g.mode_name(), "spiral");
        assert_eq!(g.state(), GeneratorState::Uninitialized);
    }

    #[test]
    fn test_generate_before_initialize_is_an_error() {
        let mut g = Generator::from_config(GenerationConfig::random_walk(RandomWalkConfig::default()));
        assert!(g.generate_point().is_err());
        g.initialize();
        assert_eq!(g.state(), GeneratorState::Ready);
        assert!(g.generate_point().is_ok());
    }

    #[test]
    fn test_clamps_surface_as_diagnostics() {
        let mut g = Generator::from_config(GenerationConfig::polygon(PolygonConfig {
            edge_count: 50,
            ..Default::default()
        }));
        let diagnostics = g.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidConfig);
    }

    #[test]
    fn test_clear_reinitializes() {
        let mut g = Generator::from_config(GenerationConfig::spiral(SpiralConfig::default()));
        g.initialize();
        g.generate_point().unwrap();
        let grown = g.points().len();
        g.clear();
        assert_eq!(g.state(), GeneratorState::Ready);
        assert!(g.points().len() < grown);
    }
}
