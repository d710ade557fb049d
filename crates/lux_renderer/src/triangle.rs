//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{Hit, Material, Renderable};
use lux_math::{Aabb, Ray, Vec3, DETERMINANT_EPSILON, HIT_EPSILON};
use std::sync::Arc;

/// Möller-Trumbore intersection shared with mesh triangles.
///
/// Returns `(t, u, v)` where `u` and `v` are the barycentric weights of `v1`
/// and `v2`. Edges are inclusive: only `u < 0`, `v < 0` or `u + v > 1` reject.
pub(crate) fn moller_trumbore(
    ray: &Ray,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    t_max: f32,
) -> Option<(f32, f32, f32)> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let det = edge1.dot(h);

    // Ray is parallel to triangle
    if det.abs() < DETERMINANT_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - v0;
    let u = inv_det * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = inv_det * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * edge2.dot(q);
    (t > HIT_EPSILON && t < t_max).then_some((t, u, v))
}

/// Bounding box of three points, padded so flat triangles keep some volume.
pub(crate) fn triangle_bounds(v0: Vec3, v1: Vec3, v2: Vec3) -> Aabb {
    let delta = Vec3::splat(0.0001);
    Aabb::from_points(v0.min(v1).min(v2) - delta, v0.max(v1).max(v2) + delta)
}

/// A standalone triangle.
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    material: Option<Arc<dyn Material>>,
    bbox: Aabb,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Arc<dyn Material>) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();

        Self {
            v0,
            v1,
            v2,
            normal,
            material: Some(material),
            bbox: triangle_bounds(v0, v1, v2),
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }
}

impl Renderable for Triangle {
    fn hit(&self, ray: &Ray, t_max: f32) -> Option<Hit<'_>> {
        let (t, _, _) = moller_trumbore(ray, self.v0, self.v1, self.v2, t_max)?;

        // Face the incoming ray
        let normal = if self.normal.dot(ray.direction) >= 0.0 {
            -self.normal
        } else {
            self.normal
        };

        Some(Hit {
            t,
            local_hit_point: ray.at(t),
            normal,
            material: self.material.as_deref(),
        })
    }

    fn shadow_hit(&self, ray: &Ray, t_max: f32) -> bool {
        moller_trumbore(ray, self.v0, self.v1, self.v2, t_max).is_some()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::matte;

    fn corner_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            matte(Vec3::ONE),
        )
    }

    fn down(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 1.0), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_triangle_centroid_hit() {
        let tri = corner_triangle();
        let centroid = (tri.v0 + tri.v1 + tri.v2) / 3.0;
        let ray = Ray::new(centroid + Vec3::Z * 2.0, -Vec3::Z);

        let hit = tri.hit(&ray, f32::INFINITY).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_triangle_normal_faces_ray() {
        let tri = corner_triangle();
        let from_below = Ray::new(Vec3::new(0.25, 0.25, -1.0), Vec3::Z);

        let hit = tri.hit(&from_below, f32::INFINITY).unwrap();
        assert!((hit.normal + Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_triangle_edges_are_inclusive() {
        let tri = corner_triangle();

        // u = 0
        assert!(tri.hit(&down(0.0, 0.5), f32::INFINITY).is_some());
        assert!(tri.hit(&down(-0.001, 0.5), f32::INFINITY).is_none());

        // v = 0
        assert!(tri.hit(&down(0.5, 0.0), f32::INFINITY).is_some());
        assert!(tri.hit(&down(0.5, -0.001), f32::INFINITY).is_none());

        // u + v = 1
        assert!(tri.hit(&down(0.5, 0.5), f32::INFINITY).is_some());
        assert!(tri.hit(&down(0.5, 0.501), f32::INFINITY).is_none());
    }

    #[test]
    fn test_triangle_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(-1.0, 0.25, 0.0), Vec3::X);
        assert!(corner_triangle().hit(&ray, f32::INFINITY).is_none());
        assert!(!corner_triangle().shadow_hit(&ray, f32::INFINITY));
    }

    #[test]
    fn test_triangle_flat_bbox_is_padded() {
        let bbox = corner_triangle().bounding_box();
        assert!(bbox.extent().z > 0.0);
    }
}
