//! Tracers: what a ray "sees".

use crate::World;
use lux_math::{Color, Ray};

/// Computes the radiance arriving along a ray.
///
/// Materials recurse through [`World::trace_ray`], which calls back into the
/// world's current tracer with `depth + 1`.
pub trait Tracer: Send + Sync {
    fn trace_ray(&self, world: &World, ray: &Ray, depth: u32) -> Color;
}

/// Shade the nearest hit, or return the background.
fn shade_nearest(world: &World, ray: &Ray, depth: u32) -> Color {
    let mut sr = world.hit_objects(ray);
    if !sr.hit_an_object {
        return world.background();
    }

    sr.depth = depth;
    match sr.material {
        Some(material) => material.shade(&sr),
        None => world.default_material().shade(&sr),
    }
}

/// Single-hit ray casting.
///
/// The depth is only passed through to the shade record, so reflective
/// materials still stop at the configured maximum.
#[derive(Debug, Default, Clone, Copy)]
pub struct RayCast;

impl Tracer for RayCast {
    fn trace_ray(&self, world: &World, ray: &Ray, depth: u32) -> Color {
        shade_nearest(world, ray, depth)
    }
}

/// Recursive Whitted tracer. Rays deeper than `max_depth` are black.
#[derive(Debug, Default, Clone, Copy)]
pub struct Whitted;

impl Tracer for Whitted {
    fn trace_ray(&self, world: &World, ray: &Ray, depth: u32) -> Color {
        if depth > world.config().max_depth {
            return Color::ZERO;
        }
        shade_nearest(world, ray, depth)
    }
}
