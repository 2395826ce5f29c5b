//! Spirals advancing along one principal axis, four points per cycle.

use pathgen_math::{PathAxis, PathSpace, Point3, Vector3};

use crate::base::GeneratorCore;
use crate::config::{GeneratorSettings, SpiralConfig};
use crate::generator::PathGenerator;

/// Points in one spiral cycle; also the eviction unit.
pub const CYCLE_POINTS: usize = 4;

pub struct SpiralGenerator {
    core: GeneratorCore,
    config: SpiralConfig,
    /// Running swing per axis. The component of the spiral axis holds the
    /// depth reached so far.
    accum: Vector3,
    last_point: Option<Point3>,
}

impl SpiralGenerator {
    pub fn new(settings: GeneratorSettings, config: SpiralConfig) -> Self {
        let accum = config.spiral_length;
        Self {
            core: GeneratorCore::new(settings),
            config,
            accum,
            last_point: None,
        }
    }

    pub fn config(&self) -> &SpiralConfig {
        &self.config
    }

    /// Compute the next cycle and advance the accumulators.
    ///
    /// Along axis `a` the cycle steps a quarter of `spiral_length[a]` per
    /// point. The perpendicular axes swing `+p, +q, -p, -q` around the
    /// origin, each growing by `variation` every time it is used.
    fn next_cycle(&mut self, axis: PathAxis) -> [Point3; CYCLE_POINTS] {
        let a = axis.index();
        let (p, q) = axis.perpendicular();
        let (p, q) = (p.index(), q.index());
        let origin = self.config.spiral_origin;
        let add = if self.config.use_variation {
            self.config.variation
        } else {
            Vector3::ZERO
        };
        let quarter = self.config.spiral_length[a] / 4.0;

        let mut cycle = [origin; CYCLE_POINTS];
        for (k, point) in cycle.iter_mut().enumerate() {
            let (swing, sign) = match k {
                0 => (p, 1.0),
                1 => (q, 1.0),
                2 => (p, -1.0),
                _ => (q, -1.0),
            };
            self.accum[swing] += add[swing];
            point[a] = quarter * (k + 1) as f64 + self.accum[a];
            point[swing] = origin[swing] + sign * (self.accum[swing] + add[swing]);
        }
        self.accum[a] += self.config.spiral_length[a];

        if !self.config.clockwise {
            let swapped = cycle[0][p];
            cycle[0][p] = cycle[2][p];
            cycle[2][p] = swapped;
        }
        cycle
    }

    /// Generate one cycle. Returns `false` when it was refused.
    fn cycle(&mut self, axis: PathAxis) -> bool {
        if !self.core.make_room(CYCLE_POINTS, CYCLE_POINTS) {
            return false;
        }
        for point in self.next_cycle(axis) {
            if !self.core.push(point) {
                return false;
            }
            self.last_point = Some(point);
        }
        true
    }
}

impl PathGenerator for SpiralGenerator {
    fn core(&self) -> &GeneratorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GeneratorCore {
        &mut self.core
    }

    /// Start points, the spiral origin, then one unit of cycles.
    fn seed(&mut self) {
        self.accum = self.config.spiral_length;
        self.last_point = None;

        let start_points = self.core.settings().start_points.clone();
        for p in start_points.into_iter().chain([self.config.spiral_origin]) {
            if self.core.make_room(1, 1) && self.core.push(p) {
                self.last_point = Some(p);
            }
        }
        self.produce_unit();
    }

    fn produce_unit(&mut self) {
        let (axis, err) = self.config.axis.resolve();
        if let Some(err) = err {
            self.core.report(err);
        }
        for _ in 0..self.core.settings().units_per_call() {
            if !self.cycle(axis) {
                break;
            }
        }
    }

    fn space(&self) -> PathSpace {
        PathSpace::Xyz
    }

    fn last_point(&self) -> Option<Point3> {
        self.last_point
    }
}
