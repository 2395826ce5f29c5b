//! Generator parameters.
//!
//! Every struct deserializes with defaults for missing fields, so a host
//! only has to persist what it changed. Ranged fields are clamped by
//! [`GenerationConfig::sanitized`].

use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use pathgen_core::{Diagnostic, PathError, Result};
use pathgen_math::{PathAxis, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Settings shared by every generation mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Used as the source of log lines and diagnostics.
    pub name: String,
    pub limit_points: bool,
    /// Maximum number of points kept when `limit_points` is on.
    pub max_points: usize,
    /// Remove points from the start of the path when the limit is reached.
    pub evict_on_limit: bool,
    /// Produce `points_to_add` points (or cycles) per unit instead of one.
    pub generate_multiple: bool,
    pub points_to_add: usize,
    pub is_3d: bool,
    /// Points generated when the generator first initializes.
    pub start_points_num: usize,
    /// Fixed positions added to the start of the path.
    pub start_points: Vec<Point3>,
    /// Where a random walk starts when there are no start points.
    pub origin: Point3,
    pub periodic: PeriodicSettings,
    pub generate_collider: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            name: "path".into(),
            limit_points: true,
            max_points: 250,
            evict_on_limit: true,
            generate_multiple: true,
            points_to_add: 5,
            is_3d: false,
            start_points_num: 10,
            start_points: Vec::new(),
            origin: Point3::ZERO,
            periodic: PeriodicSettings::default(),
            generate_collider: true,
        }
    }
}

impl GeneratorSettings {
    pub fn limit(&self) -> Option<usize> {
        self.limit_points.then_some(self.max_points)
    }

    /// Units produced by one `generate_point` call.
    pub fn units_per_call(&self) -> usize {
        if self.generate_multiple {
            self.points_to_add
        } else {
            1
        }
    }
}

/// Generation over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodicSettings {
    pub enabled: bool,
    /// Seconds between batches.
    pub interval_secs: f64,
    /// `generate_point` calls per batch.
    pub units_per_batch: usize,
    /// Upper bound on units run in a single tick; a batch larger than this
    /// spreads over several ticks. `None` runs the whole batch at once.
    pub units_per_tick: Option<usize>,
}

impl Default for PeriodicSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: 2.0,
            units_per_batch: 4,
            units_per_tick: None,
        }
    }
}

impl PeriodicSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.interval_secs.max(0.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomWalkConfig {
    pub min_distance: Vector3,
    pub max_distance: Vector3,
    /// Flip the sign of every other point's y offset.
    pub alternate_y: bool,
    /// Fixed seed for reproducible walks.
    pub seed: Option<u64>,
}

impl Default for RandomWalkConfig {
    fn default() -> Self {
        Self {
            min_distance: Vector3::new(5.0, 2.0, 5.0),
            max_distance: Vector3::new(20.0, 10.0, 20.0),
            alternate_y: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonConfig {
    pub edge_count: usize,
    pub center_to_vertex_length: f64,
    /// Rotation of the first vertex, in degrees.
    pub offset_angle: f64,
    pub sharp_corners: bool,
    /// Handle length factor when corners are rounded. 0.35 is close to a circle.
    pub auto_control_length: f64,
    pub inset: bool,
    /// Radius factor of inset points: 0 pulls them to the center, 1 leaves them.
    pub inset_percent: f64,
    pub inset_every_nth_point: usize,
    pub divide_edges: bool,
    pub divisions_per_edge: usize,
    pub origin_point: Point3,
    pub axis: PathAxis,
}

impl Default for PolygonConfig {
    fn default() -> Self {
        Self {
            edge_count: 4,
            center_to_vertex_length: 1.0,
            offset_angle: 45.0,
            sharp_corners: true,
            auto_control_length: 0.35,
            inset: false,
            inset_percent: 0.0,
            inset_every_nth_point: 2,
            divide_edges: false,
            divisions_per_edge: 2,
            origin_point: Point3::ZERO,
            axis: PathAxis::Y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralConfig {
    /// Width, height and depth of one cycle.
    pub spiral_length: Vector3,
    /// Point the spiral revolves around.
    pub spiral_origin: Point3,
    pub axis: PathAxis,
    pub use_variation: bool,
    /// Added to the swing on each axis every time it is used.
    pub variation: Vector3,
    pub clockwise: bool,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            spiral_length: Vector3::splat(50.0),
            spiral_origin: Point3::ZERO,
            axis: PathAxis::Y,
            use_variation: true,
            variation: Vector3::ZERO,
            clockwise: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ModeConfig {
    RandomWalk(RandomWalkConfig),
    Polygon(PolygonConfig),
    Spiral(SpiralConfig),
}

/// Full parameter set of one generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub settings: GeneratorSettings,
    #[serde(flatten)]
    pub mode: ModeConfig,
}

impl GenerationConfig {
    pub fn new(settings: GeneratorSettings, mode: ModeConfig) -> Self {
        Self { settings, mode }
    }

    pub fn random_walk(config: RandomWalkConfig) -> Self {
        Self::new(GeneratorSettings::default(), ModeConfig::RandomWalk(config))
    }

    pub fn polygon(config: PolygonConfig) -> Self {
        Self::new(GeneratorSettings::default(), ModeConfig::Polygon(config))
    }

    pub fn spiral(config: SpiralConfig) -> Self {
        Self::new(GeneratorSettings::default(), ModeConfig::Spiral(config))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp every ranged field into its documented range. Each clamp is
    /// reported as an `InvalidConfig` diagnostic; this never fails.
    pub fn sanitized(mut self) -> (Self, Vec<Diagnostic>) {
        let mut clamp = Clamp {
            source: self.settings.name.clone(),
            diagnostics: Vec::new(),
        };

        let s = &mut self.settings;
        clamp.count("max_points", &mut s.max_points, 10..=1000);
        clamp.count("points_to_add", &mut s.points_to_add, 1..=100);
        clamp.count("start_points_num", &mut s.start_points_num, 0..=50);
        clamp.float("periodic.interval_secs", &mut s.periodic.interval_secs, 0.5..=5.0);
        clamp.count("periodic.units_per_batch", &mut s.periodic.units_per_batch, 0..=20);
        if let Some(per_tick) = s.periodic.units_per_tick.as_mut() {
            clamp.count("periodic.units_per_tick", per_tick, 1..=usize::MAX);
        }

        match &mut self.mode {
            ModeConfig::RandomWalk(c) => {
                for i in 0..3 {
                    if c.min_distance[i] > c.max_distance[i] {
                        clamp.report(format!(
                            "min_distance[{}] = {} exceeds max_distance; swapped",
                            i, c.min_distance[i]
                        ));
                        let min = c.max_distance[i];
                        c.max_distance[i] = c.min_distance[i];
                        c.min_distance[i] = min;
                    }
                }
            }
            ModeConfig::Polygon(c) => {
                clamp.count("edge_count", &mut c.edge_count, 3..=20);
                clamp.float("center_to_vertex_length", &mut c.center_to_vertex_length, 0.1..=20.0);
                clamp.float("offset_angle", &mut c.offset_angle, 0.0..=360.0);
                clamp.float("auto_control_length", &mut c.auto_control_length, 0.0..=3.0);
                clamp.float("inset_percent", &mut c.inset_percent, 0.0..=1.0);
                clamp.count("inset_every_nth_point", &mut c.inset_every_nth_point, 2..=10);
                clamp.count("divisions_per_edge", &mut c.divisions_per_edge, 2..=20);
            }
            ModeConfig::Spiral(_) => {}
        }

        (self, clamp.diagnostics)
    }
}

struct Clamp {
    source: String,
    diagnostics: Vec<Diagnostic>,
}

impl Clamp {
    fn report(&mut self, message: String) {
        self.diagnostics
            .push(Diagnostic::warn(&self.source, &PathError::InvalidConfig(message)));
    }

    fn count(&mut self, field: &str, value: &mut usize, range: RangeInclusive<usize>) {
        let clamped = (*value).clamp(*range.start(), *range.end());
        if clamped != *value {
            self.report(format!("{} = {} clamped to {}", field, value, clamped));
            *value = clamped;
        }
    }

    fn float(&mut self, field: &str, value: &mut f64, range: RangeInclusive<f64>) {
        let clamped = if value.is_nan() {
            *range.start()
        } else {
            value.clamp(*range.start(), *range.end())
        };
        if clamped != *value {
            self.report(format!("{} = {} clamped to {}", field, value, clamped));
            *value = clamped;
        }
    }
}
