//! Regular polygons, optionally subdivided and inset, as closed paths.

use pathgen_core::PathError;
use pathgen_curve::{AnchorStyle, ControlMode};
use pathgen_math::{PathSpace, Point3, Vector2};

use crate::base::GeneratorCore;
use crate::config::{GeneratorSettings, PolygonConfig};
use crate::generator::PathGenerator;

/// Rebuilds the whole ring on every generation call; there is nothing to
/// append to a closed shape.
pub struct PolygonGenerator {
    core: GeneratorCore,
    config: PolygonConfig,
    ring_built: bool,
}

impl PolygonGenerator {
    pub fn new(settings: GeneratorSettings, config: PolygonConfig) -> Self {
        Self {
            core: GeneratorCore::new(settings),
            config,
            ring_built: false,
        }
    }

    pub fn config(&self) -> &PolygonConfig {
        &self.config
    }

    /// Changes apply on the next generation call.
    pub fn config_mut(&mut self) -> &mut PolygonConfig {
        &mut self.config
    }

    fn edge_count(&self) -> usize {
        self.config.edge_count.max(3)
    }

    fn divisions(&self) -> usize {
        if self.config.divide_edges && self.config.divisions_per_edge > 0 {
            self.config.divisions_per_edge
        } else {
            1
        }
    }

    /// Number of points the ring has for the current configuration.
    pub fn point_count(&self) -> usize {
        self.edge_count() * self.divisions()
    }

    /// Unit-length direction of every ring point, before inset and scaling,
    /// in the shape's own plane.
    fn directions(&self) -> Vec<Vector2> {
        let edges = self.edge_count();
        let divisions = self.divisions();
        let step = 360.0 / edges as f64;

        let corners: Vec<Vector2> = (0..edges)
            .map(|i| {
                let angle = (i as f64 * step + self.config.offset_angle).to_radians();
                Vector2::new(angle.cos(), angle.sin())
            })
            .collect();

        let mut dirs = Vec::with_capacity(edges * divisions);
        for i in 0..edges {
            let a = corners[i];
            let b = corners[(i + 1) % edges];
            // Intermediate points run along the chord, not the circle.
            for j in 0..divisions {
                dirs.push(a.lerp(b, j as f64 / divisions as f64));
            }
        }
        dirs
    }

    /// Compute the ring without touching the generator.
    pub fn ring(&self) -> Vec<Point3> {
        let (axis, _) = self.config.axis.resolve();
        let stride = self.config.inset_every_nth_point.max(1);
        let length = self.config.center_to_vertex_length;

        self.directions()
            .into_iter()
            .enumerate()
            .map(|(i, mut d)| {
                if self.config.inset && (i + 1) % stride == 0 {
                    d *= self.config.inset_percent;
                }
                axis.map_planar(d) * length + self.config.origin_point
            })
            .collect()
    }

    fn style(&self) -> AnchorStyle {
        if self.config.sharp_corners {
            AnchorStyle::new(ControlMode::Free, 0.0)
        } else {
            AnchorStyle::new(ControlMode::Aligned, self.config.auto_control_length)
        }
    }
}

impl PathGenerator for PolygonGenerator {
    fn core(&self) -> &GeneratorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GeneratorCore {
        &mut self.core
    }

    /// Starts empty; the first generation call builds the ring.
    fn seed(&mut self) {
        self.ring_built = false;
    }

    fn produce_unit(&mut self) {
        if let (_, Some(err)) = self.config.axis.resolve() {
            self.core.report(err);
        }
        let ring = self.ring();
        if let Some(max) = self.core.settings().limit() {
            if ring.len() > max {
                self.core.refuse(PathError::CapacityExceeded {
                    requested: ring.len(),
                    max,
                });
                return;
            }
        }
        self.core.replace_all(ring);
        self.ring_built = true;
    }

    fn rebuild(&mut self) {
        self.full_rebuild();
    }

    fn full_rebuild(&mut self) {
        if self.ring_built {
            let style = self.style();
            self.core.rebuild_full(true, PathSpace::Xyz, style);
        } else {
            self.core
                .rebuild_full(false, PathSpace::Xyz, AnchorStyle::default());
        }
    }

    fn space(&self) -> PathSpace {
        PathSpace::Xyz
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathgen_core::DiagnosticKind;
    use pathgen_math::PathAxis;

    fn polygon(config: PolygonConfig) -> PolygonGenerator {
        let mut g = PolygonGenerator::new(GeneratorSettings::default(), config);
        g.initialize();
        g
    }

    #[test]
    fn test_initialize_leaves_canonical_pair() {
        let g = polygon(PolygonConfig::default());
        assert_eq!(g.points(), &[Point3::ZERO, Point3::ONE]);
        assert!(!g.curve().unwrap().is_closed());
    }

    #[test]
    fn test_generate_builds_closed_ring() {
        let mut g = polygon(PolygonConfig {
            edge_count: 6,
            ..Default::default()
        });
        g.generate_point().unwrap();
        assert_eq!(g.points().len(), 6);
        let curve = g.curve().unwrap();
        assert!(curve.is_closed());
        assert_eq!(curve.segment_count(), 6);
        assert!(curve.styles().iter().all(|s| s.mode == ControlMode::Free));
    }

    #[test]
    fn test_generate_twice_recomputes() {
        let mut g = polygon(PolygonConfig::default());
        g.generate_point().unwrap();
        let first = g.points().to_vec();
        g.generate_point().unwrap();
        assert_eq!(g.points(), first.as_slice());
    }

    #[test]
    fn test_point_count_with_divisions() {
        let g = PolygonGenerator::new(
            GeneratorSettings::default(),
            PolygonConfig {
                edge_count: 5,
                divide_edges: true,
                divisions_per_edge: 3,
                ..Default::default()
            },
        );
        assert_eq!(g.point_count(), 15);
        assert_eq!(g.ring().len(), 15);
    }

    #[test]
    fn test_divided_points_lie_on_chord() {
        let g = PolygonGenerator::new(
            GeneratorSettings::default(),
            PolygonConfig {
                edge_count: 4,
                offset_angle: 0.0,
                divide_edges: true,
                divisions_per_edge: 2,
                axis: PathAxis::Z,
                ..Default::default()
            },
        );
        let ring = g.ring();
        // Midpoint of the chord between (1, 0) and (0, 1), mapped (d.y, d.x, 0).
        assert!((ring[1] - Point3::new(0.5, 0.5, 0.0)).length() < 1e-10);
    }

    #[test]
    fn test_rounded_corners_use_aligned_handles() {
        let mut g = polygon(PolygonConfig {
            sharp_corners: false,
            auto_control_length: 0.5,
            ..Default::default()
        });
        g.generate_point().unwrap();
        let styles = g.curve().unwrap().styles();
        assert!(styles
            .iter()
            .all(|s| s.mode == ControlMode::Aligned && s.tangent_scale == 0.5));
    }

    #[test]
    fn test_custom_axis_falls_back_with_diagnostic() {
        let mut g = polygon(PolygonConfig {
            axis: PathAxis::Custom,
            ..Default::default()
        });
        g.generate_point().unwrap();
        assert!(g.points().iter().all(|p| p.x == 0.0));
        let diagnostics = g.take_diagnostics();
        assert!(diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnsupportedAxis));
    }

    #[test]
    fn test_ring_larger_than_limit_is_refused() {
        let mut g = PolygonGenerator::new(
            GeneratorSettings {
                max_points: 10,
                ..Default::default()
            },
            PolygonConfig {
                edge_count: 6,
                divide_edges: true,
                divisions_per_edge: 2,
                ..Default::default()
            },
        );
        g.initialize();
        let report = g.generate_point().unwrap();
        assert!(report.refused);
        assert_eq!(g.points().len(), 2);
    }
}
