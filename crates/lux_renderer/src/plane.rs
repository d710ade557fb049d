//! Infinite plane primitive.

use crate::{Hit, Material, Renderable};
use lux_math::{Aabb, Ray, Vec3, HIT_EPSILON};
use std::sync::Arc;

/// An infinite plane through `point` with unit normal `normal`.
///
/// The normal is reported as given, whichever side the ray comes from.
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Option<Arc<dyn Material>>,
}

impl Plane {
    /// Create a plane. The normal is normalized.
    pub fn new(point: Vec3, normal: Vec3, material: Arc<dyn Material>) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
            material: Some(material),
        }
    }

    fn intersect(&self, ray: &Ray, t_max: f32) -> Option<f32> {
        // Parallel rays give an infinite or NaN t and fail the range test
        let t = (self.point - ray.origin).dot(self.normal) / ray.direction.dot(self.normal);
        (t > HIT_EPSILON && t < t_max).then_some(t)
    }
}

impl Renderable for Plane {
    fn hit(&self, ray: &Ray, t_max: f32) -> Option<Hit<'_>> {
        let t = self.intersect(ray, t_max)?;
        Some(Hit {
            t,
            local_hit_point: ray.at(t),
            normal: self.normal,
            material: self.material.as_deref(),
        })
    }

    fn shadow_hit(&self, ray: &Ray, t_max: f32) -> bool {
        self.intersect(ray, t_max).is_some()
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::UNIVERSE
    }

    fn material(&self) -> Option<&Arc<dyn Material>> {
        self.material.as_ref()
    }

    fn set_material(&mut self, material: Arc<dyn Material>) {
        self.material = Some(material);
    }
}
