//! Consumers of a finished curve that live outside the generator: a 2D
//! edge collider rebuilt after every curve update, and an exporter that
//! mirrors the curve into a sprite-shape spline.

pub mod collider;
pub mod sprite;

pub use collider::PathCollider2d;
pub use sprite::{ShapePoint, ShapeSpline, SpriteShapeExporter, TangentMode};
