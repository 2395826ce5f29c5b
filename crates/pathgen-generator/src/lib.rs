//! Procedural path generation.
//!
//! A generator owns a [`PointSequence`] and a curve builder. Each call to
//! [`PathGenerator::generate_point`] produces one mode-defined unit of
//! points and brings the curve up to date. [`GenerationController`] adds
//! the periodic, interval-driven mode on top.

pub mod base;
pub mod config;
pub mod generator;
pub mod periodic;
pub mod polygon;
pub mod pool;
pub mod random_walk;
pub mod sequence;
pub mod spiral;

pub use base::{GenerationReport, GeneratorCore, GeneratorState};
pub use config::{
    GenerationConfig, GeneratorSettings, ModeConfig, PeriodicSettings, PolygonConfig,
    RandomWalkConfig, SpiralConfig,
};
pub use generator::{Generator, PathGenerator};
pub use periodic::{GenerationController, PeriodicTask, TaskState};
pub use polygon::PolygonGenerator;
pub use pool::{GeneratorKey, GeneratorPool};
pub use random_walk::RandomWalkGenerator;
pub use sequence::PointSequence;
pub use spiral::SpiralGenerator;
