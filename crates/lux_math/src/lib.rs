//! Math types shared by the Lux crates.
//!
//! Points, vectors, normals and colors are all stored as `glam::Vec3`; what
//! tells them apart is how they transform (see [`Mat4Ext`]).

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod transform;
pub mod solvers;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Mat4Ext;

/// RGB color, linear and unbounded.
pub type Color = Vec3;

/// Minimum ray parameter accepted by primitive hit tests.
pub const HIT_EPSILON: f32 = 1.0e-4;

/// Offset applied to secondary ray origins to avoid self intersection.
pub const SHADOW_EPSILON: f32 = 1.0e-3;

/// Below this magnitude a triangle determinant means the ray is parallel.
pub const DETERMINANT_EPSILON: f32 = 1.0e-8;

/// Stand-in for "no hit yet" and for unbounded distances.
pub const HUGE_VALUE: f32 = 1.0e10;
