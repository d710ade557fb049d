//! Shading record handed from the intersection pipeline to materials.

use crate::{Hit, Material, World};
use lux_math::{Ray, Vec3};

/// Everything a material needs to know about the nearest hit along a ray.
///
/// Built by [`World::hit_objects`] from the winning [`Hit`]; the tracer fills
/// in `depth` before shading.
#[derive(Clone, Copy)]
pub struct ShadeRec<'a> {
    /// Whether the ray hit anything
    pub hit_an_object: bool,
    /// World-space hit point
    pub hit_point: Vec3,
    /// Hit point in the space of the primitive that was hit
    pub local_hit_point: Vec3,
    /// Unit surface normal in world space
    pub normal: Vec3,
    /// Material of the nearest surface
    pub material: Option<&'a dyn Material>,
    /// Ray parameter of the hit
    pub t: f32,
    /// The ray being shaded
    pub ray: Ray,
    /// Reflection depth; 0 for primary rays
    pub depth: u32,
    /// Scene being rendered, for lights, shadows and recursion
    pub world: &'a World,
}

impl<'a> ShadeRec<'a> {
    /// A record for a ray that has not hit anything (yet).
    pub fn new(world: &'a World, ray: Ray) -> Self {
        Self {
            hit_an_object: false,
            hit_point: Vec3::ZERO,
            local_hit_point: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: None,
            t: f32::INFINITY,
            ray,
            depth: 0,
            world,
        }
    }

    /// A record for the nearest hit along `ray`.
    pub fn from_hit(world: &'a World, ray: Ray, hit: Hit<'a>) -> Self {
        Self {
            hit_an_object: true,
            hit_point: ray.at(hit.t),
            local_hit_point: hit.local_hit_point,
            normal: hit.normal,
            material: hit.material,
            t: hit.t,
            ray,
            depth: 0,
            world,
        }
    }
}
