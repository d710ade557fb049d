//! Axis-aligned box primitive.

use crate::{Hit, Material, Renderable};
use lux_math::{Aabb, Ray, Vec3, HIT_EPSILON};
use std::sync::Arc;

/// Outward normal per face index: 0..3 are the min faces, 3..6 the max faces.
const FACE_NORMALS: [Vec3; 6] = [
    Vec3::NEG_X,
    Vec3::NEG_Y,
    Vec3::NEG_Z,
    Vec3::X,
    Vec3::Y,
    Vec3::Z,
];

/// A solid box between two corners.
pub struct AxisBox {
    min: Vec3,
    max: Vec3,
    material: Option<Arc<dyn Material>>,
}

impl AxisBox {
    /// Create a box from two opposite corners, in any order.
    pub fn new(a: Vec3, b: Vec3, material: Arc<dyn Material>) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            material: Some(material),
        }
    }

    /// Ray parameter and face index of the first accepted crossing.
    ///
    /// Reports the entry face from outside and the exit face when the ray
    /// starts inside.
    fn intersect(&self, ray: &Ray, t_max: f32) -> Option<(f32, usize)> {
        let mut t0 = f32::NEG_INFINITY;
        let mut t1 = f32::INFINITY;
        let mut face_in = 0;
        let mut face_out = 3;

        for axis in 0..3 {
            let a = 1.0 / ray.direction[axis];
            let (near, far, near_face, far_face) = if a >= 0.0 {
                (
                    (self.min[axis] - ray.origin[axis]) * a,
                    (self.max[axis] - ray.origin[axis]) * a,
                    axis,
                    axis + 3,
                )
            } else {
                (
                    (self.max[axis] - ray.origin[axis]) * a,
                    (self.min[axis] - ray.origin[axis]) * a,
                    axis + 3,
                    axis,
                )
            };

            if near > t0 {
                t0 = near;
                face_in = near_face;
            }
            if far < t1 {
                t1 = far;
                face_out = far_face;
            }
        }

        if t0 >= t1 || t1 <= HIT_EPSILON {
            return None;
        }

        let (t, face) = if t0 > HIT_EPSILON { (t0, face_in) } else { (t1, face_out) };
        (t < t_max).then_some((t, face))
    }
}

impl Renderable for AxisBox {
    fn hit(&self, ray: &Ray, t_max: f32) -> Option<Hit<'_>> {
        let (t, face) = self.intersect(ray, t_max)?;
        Some(Hit {
            t,
            local_hit_point: ray.at(t),
            normal: FACE_NORMALS[face],
            material: self.material.as_deref(),
        })
    }

    fn shadow_hit(&self, ray: &Ray, t_max: f32) -> bool {
        self.intersect(ray, t_max).is_some()
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::from_points(self.min, self.max)
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

    fn cube() -> AxisBox {
        AxisBox::new(Vec3::splat(1.0), Vec3::splat(-1.0), matte(Vec3::ONE))
    }

    #[test]
    fn test_box_entry_faces() {
        let cases = [
            (Vec3::new(-5.0, 0.0, 0.0), Vec3::X, Vec3::NEG_X),
            (Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X, Vec3::X),
            (Vec3::new(0.0, -5.0, 0.0), Vec3::Y, Vec3::NEG_Y),
            (Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, Vec3::Y),
            (Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Vec3::NEG_Z),
            (Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::Z),
        ];

        let cube = cube();
        for (origin, direction, normal) in cases {
            let hit = cube.hit(&Ray::new(origin, direction), f32::INFINITY).unwrap();
            assert!((hit.t - 4.0).abs() < 1e-5);
            assert_eq!(hit.normal, normal);
        }
    }

    #[test]
    fn test_box_from_inside_reports_exit_face() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let cube = cube();
        let hit = cube.hit(&ray, f32::INFINITY).unwrap();

        assert!((hit.t - 1.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_box_miss_and_behind() {
        let past = Ray::new(Vec3::new(0.0, 2.0, -5.0), Vec3::Z);
        assert!(cube().hit(&past, f32::INFINITY).is_none());

        let away = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z);
        assert!(!cube().shadow_hit(&away, f32::INFINITY));
    }

    #[test]
    fn test_box_diagonal_entry() {
        let ray = Ray::new(Vec3::new(-3.0, -2.0, 0.0), Vec3::new(1.0, 1.0, 0.0).normalize());
        let cube = cube();
        let hit = cube.hit(&ray, f32::INFINITY).unwrap();

        // x slab is entered last
        assert_eq!(hit.normal, Vec3::NEG_X);
        assert!((ray.at(hit.t).x + 1.0).abs() < 1e-5);
    }
}
