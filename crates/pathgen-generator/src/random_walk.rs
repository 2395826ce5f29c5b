//! Random walk: every point is a bounded random step from the previous one.

use pathgen_math::{PathSpace, Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::base::GeneratorCore;
use crate::config::{GeneratorSettings, RandomWalkConfig};
use crate::generator::PathGenerator;

pub struct RandomWalkGenerator {
    core: GeneratorCore,
    config: RandomWalkConfig,
    rng: StdRng,
    last_point: Point3,
    /// Sign applied to the next y offset when `alternate_y` is set.
    sign: f64,
}

impl RandomWalkGenerator {
    pub fn new(settings: GeneratorSettings, config: RandomWalkConfig) -> Self {
        let rng = make_rng(config.seed);
        let last_point = settings.origin;
        Self {
            core: GeneratorCore::new(settings),
            config,
            rng,
            last_point,
            sign: 1.0,
        }
    }

    pub fn config(&self) -> &RandomWalkConfig {
        &self.config
    }

    /// Sample one offset within `[min_distance, max_distance]` per axis.
    /// `z` stays zero unless the walk is 3D.
    fn sample_offset(&mut self) -> Vector3 {
        let (min, max) = (self.config.min_distance, self.config.max_distance);
        let x = sample(&mut self.rng, min.x, max.x);
        let mut y = sample(&mut self.rng, min.y, max.y);
        let z = if self.core.settings().is_3d {
            sample(&mut self.rng, min.z, max.z)
        } else {
            0.0
        };
        if self.config.alternate_y {
            y *= self.sign;
            self.sign = -self.sign;
        }
        Vector3::new(x, y, z)
    }

    /// Take one step. Returns `false` when the point was refused.
    fn step(&mut self) -> bool {
        // A refused step must not consume a sample or flip the sign.
        if !self.core.make_room(1, 1) {
            return false;
        }
        let offset = self.sample_offset();
        let point = self.space().flatten(self.last_point + offset);
        if !self.core.push(point) {
            return false;
        }
        self.last_point = point;
        true
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn sample(rng: &mut StdRng, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

impl PathGenerator for RandomWalkGenerator {
    fn core(&self) -> &GeneratorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GeneratorCore {
        &mut self.core
    }

    /// Start points first, then `start_points_num` steps from the last of them.
    fn seed(&mut self) {
        if let Some(seed) = self.config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.sign = 1.0;
        let space = self.space();
        self.last_point = space.flatten(self.core.settings().origin);

        let start_points = self.core.settings().start_points.clone();
        for p in start_points {
            let p = space.flatten(p);
            if self.core.make_room(1, 1) && self.core.push(p) {
                self.last_point = p;
            }
        }
        for _ in 0..self.core.settings().start_points_num {
            if !self.step() {
                break;
            }
        }
        if self.core.sequence().len() < 2 {
            // Canonical pair, kept in the walk's plane and continued from.
            self.core.ensure_minimum();
            let pair = self.core.points().iter().map(|&p| space.flatten(p)).collect();
            self.core.replace_all(pair);
            if let Some(last) = self.core.sequence().last() {
                self.last_point = last;
            }
        }
        tracing::debug!(
            generator = %self.core.name(),
            points = self.core.sequence().len(),
            "random walk seeded"
        );
    }

    fn produce_unit(&mut self) {
        for _ in 0..self.core.settings().units_per_call() {
            if !self.step() {
                break;
            }
        }
    }

    fn space(&self) -> PathSpace {
        PathSpace::from_is_3d(self.core.settings().is_3d)
    }

    fn last_point(&self) -> Option<Point3> {
        Some(self.last_point)
    }
}
