//! Sphere primitive.

use crate::{Hit, Material, Renderable};
use lux_math::{Aabb, Ray, Vec3, HIT_EPSILON};
use std::sync::Arc;

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Option<Arc<dyn Material>>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material: Some(material),
            bbox,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Nearest root of `a t^2 + b t + c` in `(HIT_EPSILON, t_max)`.
    ///
    /// A tangent ray (zero discriminant) counts as a hit.
    fn nearest_root(&self, ray: &Ray, t_max: f32) -> Option<f32> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let e = discriminant.sqrt();
        let denom = 2.0 * a;
        [(-b - e) / denom, (-b + e) / denom]
            .into_iter()
            .find(|&t| t > HIT_EPSILON && t < t_max)
    }
}

impl Renderable for Sphere {
    fn hit(&self, ray: &Ray, t_max: f32) -> Option<Hit<'_>> {
        let t = self.nearest_root(ray, t_max)?;
        let point = ray.at(t);

        let mut normal = (point - self.center) / self.radius;
        if (ray.origin - self.center).length() < self.radius {
            normal = -normal;
        }

        Some(Hit {
            t,
            local_hit_point: point,
            normal,
            material: self.material.as_deref(),
        })
    }

    fn shadow_hit(&self, ray: &Ray, t_max: f32) -> bool {
        self.nearest_root(ray, t_max).is_some()
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn material(&self) -> Option<&Arc<dyn Material>> {
        self.material.as_ref()
    }

    fn set_material(&mut self, material: Arc<dyn Material>) {
        self.material = Some(material);
    }
}
