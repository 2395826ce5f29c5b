use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use approx::assert_relative_eq;
use pathgen_core::{DiagnosticKind, PathError, Tolerance};
use pathgen_curve::{ColliderBuilder, CurveSink, CurveSpec};
use pathgen_generator::{
    GenerationConfig, GenerationController, Generator, GeneratorSettings, PathGenerator,
    PeriodicSettings, PolygonConfig, PolygonGenerator, RandomWalkConfig, RandomWalkGenerator,
    SpiralConfig, SpiralGenerator,
};
use pathgen_math::{PathAxis, Point3, Vector3};

fn walk_settings() -> GeneratorSettings {
    GeneratorSettings {
        start_points_num: 0,
        generate_multiple: false,
        ..Default::default()
    }
}

fn seeded_walk(settings: GeneratorSettings, seed: u64) -> RandomWalkGenerator {
    RandomWalkGenerator::new(
        settings,
        RandomWalkConfig {
            seed: Some(seed),
            ..Default::default()
        },
    )
}

/// Angle of a ring point in the shape's own plane, for a Y-aligned polygon.
fn planar_angle_y(p: Point3) -> f64 {
    p.x.atan2(p.z).to_degrees().rem_euclid(360.0)
}

// ---------------------------------------------------------------------------
// Random walk
// ---------------------------------------------------------------------------

#[test]
fn test_random_walk_alternates_y_sign() {
    let mut g = seeded_walk(walk_settings(), 11);
    g.initialize();
    // Without start points the walk continues from the flattened canonical pair.
    assert_eq!(g.points(), &[Point3::ZERO, Point3::new(1.0, 1.0, 0.0)]);
    assert_eq!(g.last_point(), Some(g.points()[1]));

    g.generate_point().unwrap();
    g.generate_point().unwrap();
    let pts = g.points();
    assert_eq!(pts.len(), 4);

    let d1 = pts[2] - pts[1];
    let d2 = pts[3] - pts[2];
    assert!(d1.y > 0.0);
    assert!(d2.y < 0.0);
    assert!((5.0..=20.0).contains(&d1.x));
    assert!((5.0..=20.0).contains(&d2.x));
    assert!(pts.iter().all(|p| p.z == 0.0));
}

#[test]
fn test_random_walk_steps_from_canonical_pair() {
    let mut g = RandomWalkGenerator::new(
        GeneratorSettings {
            is_3d: true,
            ..walk_settings()
        },
        RandomWalkConfig {
            min_distance: Vector3::new(5.0, 2.0, 5.0),
            max_distance: Vector3::new(5.0, 2.0, 5.0),
            seed: Some(1),
            ..Default::default()
        },
    );
    g.initialize();
    g.generate_point().unwrap();
    let pts = g.points();
    assert_eq!(pts.len(), 3);
    assert_eq!(pts[1], Point3::ONE);
    assert_eq!(pts[2] - pts[1], Vector3::new(5.0, 2.0, 5.0));
}

#[test]
fn test_random_walk_refused_step_keeps_alternation() {
    let mut g = seeded_walk(
        GeneratorSettings {
            max_points: 10,
            evict_on_limit: false,
            start_points_num: 9,
            ..walk_settings()
        },
        5,
    );
    g.initialize();
    assert_eq!(g.points().len(), 9);

    g.generate_point().unwrap();
    let tenth = g.points()[9] - g.points()[8];

    let report = g.generate_point().unwrap();
    assert!(report.refused);
    assert_eq!(g.points().len(), 10);

    g.core_mut().settings_mut().max_points = 20;
    g.generate_point().unwrap();
    let eleventh = g.points()[10] - g.points()[9];
    assert!(tenth.y * eleventh.y < 0.0);
}

#[test]
fn test_random_walk_displacement_bound() {
    let mut settings = walk_settings();
    settings.is_3d = true;
    settings.start_points_num = 30;
    let mut g = RandomWalkGenerator::new(
        settings,
        RandomWalkConfig {
            alternate_y: false,
            seed: Some(3),
            ..Default::default()
        },
    );
    g.initialize();
    let pts = g.points();
    assert_eq!(pts.len(), 30);
    let mut prev = Point3::ZERO;
    for &p in pts {
        let d = p - prev;
        assert!((5.0..=20.0).contains(&d.x));
        assert!((2.0..=10.0).contains(&d.y));
        assert!((5.0..=20.0).contains(&d.z));
        prev = p;
    }
}

#[test]
fn test_capacity_invariant_with_eviction() {
    let settings = GeneratorSettings {
        max_points: 10,
        start_points_num: 8,
        ..Default::default()
    };
    let mut g = seeded_walk(settings, 5);
    g.initialize();
    for _ in 0..20 {
        let report = g.generate_point().unwrap();
        assert!(g.points().len() <= 10);
        assert!(!report.refused);
        // Curve follows the sliding window.
        let curve = g.curve().unwrap();
        assert_eq!(curve.anchor_count(), g.points().len());
        assert_eq!(curve.anchors().last(), g.points().last());
    }
    assert_eq!(g.points().len(), 10);
}

#[test]
fn test_capacity_refused_without_eviction() {
    let settings = GeneratorSettings {
        max_points: 10,
        evict_on_limit: false,
        start_points_num: 8,
        ..Default::default()
    };
    let mut g = seeded_walk(settings, 5);
    g.initialize();
    g.take_diagnostics();

    let report = g.generate_point().unwrap();
    assert!(report.refused);
    assert_eq!(report.added, 2);
    assert_eq!(g.points().len(), 10);

    let diagnostics = g.take_diagnostics();
    assert!(diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::CapacityExceeded));
}

#[test]
fn test_spiral_evicts_whole_cycles() {
    let settings = GeneratorSettings {
        max_points: 12,
        generate_multiple: false,
        ..Default::default()
    };
    let mut g = SpiralGenerator::new(settings, SpiralConfig::default());
    g.initialize();
    assert_eq!(g.points().len(), 5);
    for _ in 0..10 {
        g.generate_point().unwrap();
        assert!(g.points().len() <= 12);
    }
    assert_eq!(g.curve().unwrap().anchor_count(), g.points().len());
}

// ---------------------------------------------------------------------------
// Polygon
// ---------------------------------------------------------------------------

#[test]
fn test_square_on_y_axis() {
    let mut g = PolygonGenerator::new(GeneratorSettings::default(), PolygonConfig::default());
    g.initialize();
    g.generate_point().unwrap();

    let pts = g.points();
    assert_eq!(pts.len(), 4);
    for (i, &p) in pts.iter().enumerate() {
        assert_relative_eq!(p.length(), 1.0, epsilon = 1e-10);
        assert_eq!(p.y, 0.0);
        assert_relative_eq!(planar_angle_y(p), 45.0 + 90.0 * i as f64, epsilon = 1e-9);
    }
}

#[test]
fn test_ring_closure() {
    let tol = Tolerance::default_precision();
    for n in 3..=8 {
        let mut g = PolygonGenerator::new(
            GeneratorSettings::default(),
            PolygonConfig {
                edge_count: n,
                offset_angle: 10.0,
                ..Default::default()
            },
        );
        g.initialize();
        g.generate_point().unwrap();
        let pts = g.points();
        assert_eq!(pts.len(), n);
        for i in 0..n {
            let a = planar_angle_y(pts[i]);
            let b = planar_angle_y(pts[(i + 1) % n]);
            assert!(tol.angular_eq(b - a, 360.0 / n as f64));
        }
        assert_eq!(g.curve().unwrap().segment_count(), n);
    }
}

#[test]
fn test_reconfigured_polygon_rebuilds_on_next_call() {
    let mut g = PolygonGenerator::new(GeneratorSettings::default(), PolygonConfig::default());
    g.initialize();
    g.generate_point().unwrap();
    assert_eq!(g.points().len(), 4);

    g.config_mut().edge_count = 5;
    g.config_mut().divide_edges = true;
    assert_eq!(g.point_count(), 10);
    g.generate_point().unwrap();
    assert_eq!(g.points().len(), 10);
    assert_eq!(g.curve().unwrap().segment_count(), 10);
    assert!(g.curve().unwrap().is_closed());
}

#[test]
fn test_inset_every_third_point() {
    let mut g = PolygonGenerator::new(
        GeneratorSettings::default(),
        PolygonConfig {
            edge_count: 6,
            center_to_vertex_length: 2.0,
            inset: true,
            inset_percent: 0.5,
            inset_every_nth_point: 3,
            origin_point: Point3::new(1.0, 2.0, 3.0),
            ..Default::default()
        },
    );
    g.initialize();
    g.generate_point().unwrap();
    for (i, &p) in g.points().iter().enumerate() {
        let expected = if (i + 1) % 3 == 0 { 1.0 } else { 2.0 };
        let radius = (p - Point3::new(1.0, 2.0, 3.0)).length();
        assert!(Tolerance::default_precision().linear_eq(radius, expected));
    }
}

#[test]
fn test_full_rebuild_is_idempotent() {
    let mut g = PolygonGenerator::new(
        GeneratorSettings::default(),
        PolygonConfig {
            sharp_corners: false,
            ..Default::default()
        },
    );
    g.initialize();
    g.generate_point().unwrap();
    let first: CurveSpec = g.curve().unwrap().clone();
    g.full_rebuild();
    assert_eq!(g.curve().unwrap(), &first);

    let mut walk = seeded_walk(GeneratorSettings::default(), 9);
    walk.initialize();
    let first = walk.curve().unwrap().clone();
    walk.full_rebuild();
    assert_eq!(walk.curve().unwrap(), &first);
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_generator_from_json() {
    let config = GenerationConfig::from_json(
        r#"{
            "mode": "spiral",
            "axis": "X",
            "settings": { "name": "coil", "generate_multiple": false }
        }"#,
    )
    .unwrap();
    let mut g = Generator::from_config(config);
    g.initialize();
    assert_eq!(g.core().name(), "coil");
    // Origin plus one cycle along x.
    assert_eq!(g.points().len(), 5);
    assert_eq!(g.points()[4].x, 100.0);
}

#[test]
fn test_config_file_round_trip() {
    let mut config = GenerationConfig::polygon(PolygonConfig {
        edge_count: 7,
        inset: true,
        ..Default::default()
    });
    config.settings.name = "heptagon".into();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("polygon.json");
    std::fs::write(&path, config.to_json().unwrap()).unwrap();
    assert_eq!(GenerationConfig::from_file(&path).unwrap(), config);

    assert!(matches!(
        GenerationConfig::from_file(dir.path().join("missing.json")),
        Err(PathError::Io(_))
    ));
}

#[test]
fn test_spiral_custom_axis_falls_back() {
    let mut g = SpiralGenerator::new(
        walk_settings(),
        SpiralConfig {
            axis: PathAxis::Custom,
            ..Default::default()
        },
    );
    g.initialize();
    assert_eq!(g.points()[4].x, 100.0);
    assert!(g
        .take_diagnostics()
        .iter()
        .any(|d| d.kind == DiagnosticKind::UnsupportedAxis));
}

// ---------------------------------------------------------------------------
// Periodic generation
// ---------------------------------------------------------------------------

fn periodic_spiral(units_per_tick: Option<usize>) -> GenerationController<Generator> {
    let mut config = GenerationConfig::spiral(SpiralConfig::default());
    config.settings.generate_multiple = false;
    config.settings.periodic = PeriodicSettings {
        enabled: true,
        interval_secs: 1.0,
        units_per_batch: 4,
        units_per_tick,
    };
    let mut controller = GenerationController::new(Generator::from_config(config));
    controller.initialize();
    controller
}

#[test]
fn test_periodic_batch_runs_every_interval() {
    let mut c = periodic_spiral(None);
    assert_eq!(c.generator().points().len(), 5);

    let report = c.tick(Duration::from_millis(16)).unwrap();
    assert_eq!(report.units, 4);
    assert_eq!(report.added, 16);
    assert_eq!(c.generator().points().len(), 21);
    assert_eq!(c.generator().curve().unwrap().anchor_count(), 21);

    assert!(c.tick(Duration::from_millis(500)).is_none());
    assert!(c.tick(Duration::from_millis(500)).is_some());
    assert_eq!(c.generator().points().len(), 37);
}

#[test]
fn test_manual_call_queues_behind_open_batch() {
    let mut c = periodic_spiral(Some(1));
    assert!(c.tick(Duration::ZERO).is_none());
    // One unit in, batch still open: the curve has not caught up.
    assert_eq!(c.generator().points().len(), 9);
    assert_eq!(c.generator().curve().unwrap().anchor_count(), 5);

    assert_eq!(c.trigger_manual().unwrap(), None);
    assert_eq!(c.queued(), 1);

    assert!(c.tick(Duration::ZERO).is_none());
    assert!(c.tick(Duration::ZERO).is_none());
    let report = c.tick(Duration::ZERO).unwrap();
    assert_eq!(report.units, 4);
    assert_eq!(c.queued(), 0);
    // Four periodic cycles plus the queued manual one.
    assert_eq!(c.generator().points().len(), 25);
    assert_eq!(c.generator().curve().unwrap().anchor_count(), 25);
}

#[test]
fn test_manual_call_runs_immediately_when_idle() {
    let mut c = periodic_spiral(None);
    c.stop_periodic();
    let report = c.trigger_manual().unwrap().unwrap();
    assert_eq!(report.added, 4);
    assert!(c.tick(Duration::from_secs(5)).is_none());
}

#[test]
fn test_second_start_is_ignored() {
    let mut c = periodic_spiral(None);
    assert!(c.start_periodic());
    let diagnostics = c.generator_mut().take_diagnostics();
    assert!(diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::AlreadyRunning));
    // Still one batch per tick.
    c.tick(Duration::ZERO).unwrap();
    assert_eq!(c.generator().points().len(), 21);
}

#[test]
fn test_toggle_cancels_at_next_tick() {
    let mut c = periodic_spiral(None);
    c.tick(Duration::ZERO).unwrap();
    assert!(!c.toggle_periodic_generation());
    assert!(c.tick(Duration::from_secs(1)).is_none());
    assert!(c.tick(Duration::from_secs(1)).is_none());
    assert!(c.toggle_periodic_generation());
    assert!(c.tick(Duration::ZERO).is_some());
}

#[test]
fn test_reset_drops_open_batch() {
    let mut c = periodic_spiral(Some(1));
    c.tick(Duration::ZERO);
    c.trigger_manual().unwrap();
    c.reset();
    assert_eq!(c.queued(), 0);
    assert_eq!(c.generator().points().len(), 5);
    // Next batch waits a full interval.
    assert!(c.tick(Duration::from_millis(500)).is_none());
    assert_eq!(c.generator().points().len(), 5);
    assert!(c.tick(Duration::from_millis(500)).is_none());
    assert_eq!(c.generator().points().len(), 9);
}

#[test]
fn test_uninitialized_generator_does_not_run_batches() {
    let mut config = GenerationConfig::random_walk(RandomWalkConfig::default());
    config.settings.periodic.enabled = true;
    let mut c = GenerationController::new(Generator::from_config(config));
    assert!(c.start_periodic());
    assert!(c.tick(Duration::ZERO).is_none());
    assert!(c
        .generator_mut()
        .take_diagnostics()
        .iter()
        .any(|d| d.kind == DiagnosticKind::NotInitialized));
    assert!(matches!(c.trigger_manual(), Err(PathError::NotInitialized)));
}

// ---------------------------------------------------------------------------
// Collider hook
// ---------------------------------------------------------------------------

struct CountingCollider {
    calls: Rc<Cell<usize>>,
    fail: bool,
}

impl ColliderBuilder for CountingCollider {
    fn regenerate(&mut self, _curve: &CurveSpec, sink: &dyn CurveSink) -> pathgen_core::Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(PathError::Collider(format!(
                "{} segments rejected",
                sink.segment_count()
            )));
        }
        Ok(())
    }
}

#[test]
fn test_collider_regenerated_after_every_rebuild() {
    let calls = Rc::new(Cell::new(0));
    let mut g = seeded_walk(walk_settings(), 1);
    g.core_mut().set_collider(Box::new(CountingCollider {
        calls: calls.clone(),
        fail: false,
    }));
    g.initialize();
    assert_eq!(calls.get(), 1);
    g.generate_point().unwrap();
    g.generate_point().unwrap();
    assert_eq!(calls.get(), 3);

    g.core_mut().settings_mut().generate_collider = false;
    g.generate_point().unwrap();
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_collider_failure_is_not_fatal() {
    let calls = Rc::new(Cell::new(0));
    let mut g = PolygonGenerator::new(GeneratorSettings::default(), PolygonConfig::default());
    g.core_mut().set_collider(Box::new(CountingCollider {
        calls: calls.clone(),
        fail: true,
    }));
    g.initialize();
    g.generate_point().unwrap();
    assert_eq!(g.points().len(), 4);
    let diagnostics = g.take_diagnostics();
    assert_eq!(
        diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Collider)
            .count(),
        2
    );
}
