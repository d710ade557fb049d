//! Triangles that index into a shared mesh.

use crate::triangle::{moller_trumbore, triangle_bounds};
use crate::{Hit, Material, Renderable};
use lux_core::Mesh;
use lux_math::{Aabb, Ray, Vec3};
use std::sync::Arc;

/// How a mesh triangle picks its shading normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Precomputed face normal
    Flat,
    /// Barycentric blend of the vertex normals
    Smooth,
}

/// One face of a `Mesh`.
///
/// Stores vertex indices into the mesh arena rather than copies of the
/// vertices, so thousands of faces share one vertex buffer.
pub struct MeshTriangle {
    mesh: Arc<Mesh>,
    index: [usize; 3],
    normal: Vec3,
    shading: Shading,
    material: Option<Arc<dyn Material>>,
    bbox: Aabb,
}

impl MeshTriangle {
    /// Create the triangle for face `face` of `mesh`.
    pub fn new(
        mesh: Arc<Mesh>,
        face: usize,
        shading: Shading,
        material: Option<Arc<dyn Material>>,
    ) -> Self {
        let index = mesh.face(face);
        let [v0, v1, v2] = index.map(|i| mesh.positions[i]);

        Self {
            normal: mesh.face_normal(face),
            bbox: triangle_bounds(v0, v1, v2),
            mesh,
            index,
            shading,
            material,
        }
    }

    pub fn shading(&self) -> Shading {
        self.shading
    }

    fn vertices(&self) -> (Vec3, Vec3, Vec3) {
        let p = &self.mesh.positions;
        (p[self.index[0]], p[self.index[1]], p[self.index[2]])
    }

    fn shading_normal(&self, u: f32, v: f32) -> Vec3 {
        match self.shading {
            Shading::Flat => self.normal,
            Shading::Smooth => {
                let n = &self.mesh.normals;
                let blended = (1.0 - u - v) * n[self.index[0]]
                    + u * n[self.index[1]]
                    + v * n[self.index[2]];
                blended.normalize_or(self.normal)
            }
        }
    }
}

impl Renderable for MeshTriangle {
    fn hit(&self, ray: &Ray, t_max: f32) -> Option<Hit<'_>> {
        let (v0, v1, v2) = self.vertices();
        let (t, u, v) = moller_trumbore(ray, v0, v1, v2, t_max)?;

        Some(Hit {
            t,
            local_hit_point: ray.at(t),
            normal: self.shading_normal(u, v),
            material: self.material.as_deref(),
        })
    }

    fn shadow_hit(&self, ray: &Ray, t_max: f32) -> bool {
        let (v0, v1, v2) = self.vertices();
        moller_trumbore(ray, v0, v1, v2, t_max).is_some()
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

/// Build one renderable per face of `mesh`.
///
/// Pass `None` as the material when the triangles go into a group that
/// carries the material for all of them.
pub fn mesh_triangles(
    mesh: Arc<Mesh>,
    shading: Shading,
    material: Option<Arc<dyn Material>>,
) -> Vec<Arc<dyn Renderable>> {
    (0..mesh.triangle_count())
        .map(|face| {
            Arc::new(MeshTriangle::new(mesh.clone(), face, shading, material.clone()))
                as Arc<dyn Renderable>
        })
        .collect()
}
