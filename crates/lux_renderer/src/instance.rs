//! Transformed instances of a shared renderable.
//!
//! The payload is stored once in its own space. Rays are moved into that space
//! with the cached inverse matrix, so a single mesh or grid can appear many
//! times in a scene under different transforms.

use crate::{Hit, Material, Renderable};
use lux_math::{Aabb, Interval, Mat4, Mat4Ext, Ray, Vec3, HIT_EPSILON};
use std::sync::Arc;

/// A renderable placed in the world by an affine transform.
pub struct Instance {
    payload: Arc<dyn Renderable>,
    /// Local-to-world
    forward: Mat4,
    /// World-to-local
    inverse: Mat4,
    bbox: Aabb,
    material: Option<Arc<dyn Material>>,
}

impl Instance {
    /// Wrap `payload` with the identity transform.
    pub fn new(payload: Arc<dyn Renderable>) -> Self {
        let bbox = payload.bounding_box();
        Self {
            payload,
            forward: Mat4::IDENTITY,
            inverse: Mat4::IDENTITY,
            bbox,
            material: None,
        }
    }

    /// Apply `step` after the transforms already on this instance.
    pub fn transform(mut self, step: Mat4) -> Self {
        self.forward = step * self.forward;
        self.inverse = self.forward.inverse();
        self.bbox = self.world_bounds();
        self
    }

    pub fn translate(self, offset: Vec3) -> Self {
        self.transform(Mat4::from_translation(offset))
    }

    pub fn scale(self, factors: Vec3) -> Self {
        self.transform(Mat4::from_scale(factors))
    }

    /// Rotate about the x axis by `degrees`.
    pub fn rotate_x(self, degrees: f32) -> Self {
        self.transform(Mat4::from_rotation_x(degrees.to_radians()))
    }

    /// Rotate about the y axis by `degrees`.
    pub fn rotate_y(self, degrees: f32) -> Self {
        self.transform(Mat4::from_rotation_y(degrees.to_radians()))
    }

    /// Rotate about the z axis by `degrees`.
    pub fn rotate_z(self, degrees: f32) -> Self {
        self.transform(Mat4::from_rotation_z(degrees.to_radians()))
    }

    /// Shade the payload with `material` instead of its own.
    pub fn with_material(mut self, material: Arc<dyn Material>) -> Self {
        self.material = Some(material);
        self
    }

    pub fn forward(&self) -> Mat4 {
        self.forward
    }

    pub fn inverse(&self) -> Mat4 {
        self.inverse
    }

    fn world_bounds(&self) -> Aabb {
        let local = self.payload.bounding_box();
        if local.is_finite() {
            self.forward.transform_aabb(&local)
        } else {
            Aabb::UNIVERSE
        }
    }

    /// Bounding box cull, skipped for unbounded payloads.
    fn may_hit(&self, ray: &Ray, t_max: f32) -> bool {
        !self.bbox.is_finite() || self.bbox.hit(ray, Interval::new(HIT_EPSILON, t_max))
    }
}

impl Renderable for Instance {
    fn hit(&self, ray: &Ray, t_max: f32) -> Option<Hit<'_>> {
        if !self.may_hit(ray, t_max) {
            return None;
        }

        // Direction is left unnormalized so t means the same in both spaces
        let local_ray = self.inverse.transform_ray(ray);
        let hit = self.payload.hit(&local_ray, t_max)?;

        let normal = self.inverse.transform_normal(hit.normal).normalize_or_zero();
        Some(Hit { normal, ..hit }.override_material(self.material.as_deref()))
    }

    fn shadow_hit(&self, ray: &Ray, t_max: f32) -> bool {
        if !self.may_hit(ray, t_max) {
            return false;
        }
        let local_ray = self.inverse.transform_ray(ray);
        self.payload.shadow_hit(&local_ray, t_max)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn material(&self) -> Option<&Arc<dyn Material>> {
        self.material.as_ref().or_else(|| self.payload.material())
    }

    fn set_material(&mut self, material: Arc<dyn Material>) {
        self.material = Some(material);
    }
}
