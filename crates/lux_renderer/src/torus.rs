//! Torus primitive, centred on the origin with the y axis through its hole.
//!
//! Place it elsewhere by wrapping it in an `Instance`.

use crate::{Hit, Material, Renderable};
use lux_math::solvers::solve_quartic;
use lux_math::{Aabb, Interval, Ray, Vec3, HIT_EPSILON};
use std::sync::Arc;

/// A torus with ring radius `a` (centre to tube centre) and tube radius `b`.
pub struct Torus {
    a: f32,
    b: f32,
    material: Option<Arc<dyn Material>>,
    bbox: Aabb,
}

impl Torus {
    pub fn new(a: f32, b: f32, material: Arc<dyn Material>) -> Self {
        let extent = Vec3::new(a + b, b, a + b);
        Self {
            a,
            b,
            material: Some(material),
            bbox: Aabb::from_points(-extent, extent),
        }
    }

    /// Smallest root of the torus quartic in `(HIT_EPSILON, t_max)`.
    fn intersect(&self, ray: &Ray, t_max: f32) -> Option<f32> {
        if !self.bbox.hit(ray, Interval::new(HIT_EPSILON, t_max)) {
            return None;
        }

        let o = ray.origin.as_dvec3();
        let d = ray.direction.as_dvec3();
        let a2 = f64::from(self.a) * f64::from(self.a);
        let b2 = f64::from(self.b) * f64::from(self.b);

        let dd = d.length_squared();
        let e = o.length_squared() - a2 - b2;
        let f = o.dot(d);
        let four_a2 = 4.0 * a2;

        let coeffs = [
            e * e - four_a2 * (b2 - o.y * o.y),
            4.0 * f * e + 2.0 * four_a2 * o.y * d.y,
            2.0 * dd * e + 4.0 * f * f + four_a2 * d.y * d.y,
            4.0 * dd * f,
            dd * dd,
        ];

        let mut roots = [0.0; 4];
        let count = solve_quartic(&coeffs, &mut roots);

        roots[..count]
            .iter()
            .map(|&t| t as f32)
            .filter(|&t| t > HIT_EPSILON && t < t_max)
            .min_by(f32::total_cmp)
    }

    /// Gradient of the implicit surface at `p`.
    fn normal_at(&self, p: Vec3) -> Vec3 {
        let params = self.a * self.a + self.b * self.b;
        let k = p.length_squared() - params;

        Vec3::new(
            4.0 * p.x * k,
            4.0 * p.y * (k + 2.0 * self.a * self.a),
            4.0 * p.z * k,
        )
        .normalize_or_zero()
    }
}

impl Renderable for Torus {
    fn hit(&self, ray: &Ray, t_max: f32) -> Option<Hit<'_>> {
        let t = self.intersect(ray, t_max)?;
        let point = ray.at(t);

        Some(Hit {
            t,
            local_hit_point: point,
            normal: self.normal_at(point),
            material: self.material.as_deref(),
        })
    }

    fn shadow_hit(&self, ray: &Ray, t_max: f32) -> bool {
        self.intersect(ray, t_max).is_some()
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
