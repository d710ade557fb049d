//! Renderable trait, hit results and the compound group.

use crate::Material;
use lux_math::{Aabb, Ray, Vec3, HIT_EPSILON};
use std::sync::Arc;

/// Result of a successful full hit test.
#[derive(Clone, Copy)]
pub struct Hit<'a> {
    /// Ray parameter of the intersection
    pub t: f32,
    /// Intersection point in the primitive's own space
    pub local_hit_point: Vec3,
    /// Unit surface normal
    pub normal: Vec3,
    /// Material of the surface, if it has one
    pub material: Option<&'a dyn Material>,
}

impl<'a> Hit<'a> {
    /// Replace the material when an override is present.
    pub fn override_material(mut self, material: Option<&'a dyn Material>) -> Self {
        if material.is_some() {
            self.material = material;
        }
        self
    }
}

/// Trait for surfaces that rays can hit.
///
/// Both hit tests accept only `HIT_EPSILON < t < t_max`. The comparison with
/// `t_max` is strict, so feeding the best `t` so far back in as the next
/// `t_max` keeps the first of several equally distant hits.
pub trait Renderable: Send + Sync {
    /// Full hit test. Returns the intersection geometry and material.
    fn hit(&self, ray: &Ray, t_max: f32) -> Option<Hit<'_>>;

    /// Occlusion test for shadow rays; may stop at the first qualifying hit.
    fn shadow_hit(&self, ray: &Ray, t_max: f32) -> bool;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;

    /// Material used to shade this object.
    fn material(&self) -> Option<&Arc<dyn Material>>;

    /// Replace the material used to shade this object.
    fn set_material(&mut self, material: Arc<dyn Material>);
}

/// Nearest hit over a set of objects.
///
/// Each object is asked only for hits closer than the best found so far.
pub fn nearest_hit<'a, I>(objects: I, ray: &Ray, t_max: f32) -> Option<Hit<'a>>
where
    I: IntoIterator<Item = &'a Arc<dyn Renderable>>,
{
    objects.into_iter().fold(None, |best: Option<Hit<'a>>, object| {
        let bound = best.map_or(t_max, |hit| hit.t);
        object.hit(ray, bound).or(best)
    })
}

/// An unordered group of renderables tested by linear scan.
///
/// Also used by the uniform grid for cells shared by several objects.
pub struct Compound {
    objects: Vec<Arc<dyn Renderable>>,
    bbox: Aabb,
    material: Option<Arc<dyn Material>>,
}

impl Compound {
    /// Create a new empty group.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
            material: None,
        }
    }

    /// Add an object to the group.
    pub fn add(&mut self, object: Arc<dyn Renderable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Objects in insertion order.
    pub fn objects(&self) -> &[Arc<dyn Renderable>] {
        &self.objects
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the group is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for Compound {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Arc<dyn Renderable>> for Compound {
    fn from_iter<T: IntoIterator<Item = Arc<dyn Renderable>>>(iter: T) -> Self {
        let mut compound = Compound::new();
        for object in iter {
            compound.add(object);
        }
        compound
    }
}

impl Renderable for Compound {
    fn hit(&self, ray: &Ray, t_max: f32) -> Option<Hit<'_>> {
        nearest_hit(&self.objects, ray, t_max)
            .map(|hit| hit.override_material(self.material.as_deref()))
    }

    fn shadow_hit(&self, ray: &Ray, t_max: f32) -> bool {
        self.objects.iter().any(|object| object.shadow_hit(ray, t_max))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn material(&self) -> Option<&Arc<dyn Material>> {
        self.material.as_ref()
    }

    /// Shade every member with `material`.
    fn set_material(&mut self, material: Arc<dyn Material>) {
        self.material = Some(material);
    }
}

/// A bounding box can be placed in the scene to visualise bounds.
///
/// It only reports where the ray enters (or leaves, from inside) and carries
/// no material or normal, so it is never shaded.
impl Renderable for Aabb {
    fn hit(&self, ray: &Ray, t_max: f32) -> Option<Hit<'_>> {
        let (t0, t1) = self.hit_span(ray)?;
        let t = if t0 > HIT_EPSILON { t0 } else { t1 };
        (t > HIT_EPSILON && t < t_max).then(|| Hit {
            t,
            local_hit_point: ray.at(t),
            normal: Vec3::ZERO,
            material: None,
        })
    }

    fn shadow_hit(&self, ray: &Ray, t_max: f32) -> bool {
        Renderable::hit(self, ray, t_max).is_some()
    }

    fn bounding_box(&self) -> Aabb {
        *self
    }

    fn material(&self) -> Option<&Arc<dyn Material>> {
        None
    }

    fn set_material(&mut self, _material: Arc<dyn Material>) {}
}
