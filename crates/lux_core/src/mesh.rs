//! Triangle mesh storage.
//!
//! The mesh is an arena: positions and normals live here, and triangles in
//! the renderer refer to them by index. `vertex_faces` lists, for every
//! vertex, the faces that share it, which is what smooth normals are
//! accumulated from.

use lux_math::{Aabb, Vec3};

use crate::{CoreError, Result};

/// A mesh consisting of vertex positions, per-vertex normals, and triangle indices.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Vertex normals (one per vertex, unit length)
    pub normals: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Faces touching each vertex
    pub vertex_faces: Vec<Vec<usize>>,

    /// Axis-aligned bounding box
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a mesh from positions and indices, computing smooth normals.
    ///
    /// Fails when the index count is not a multiple of three or an index
    /// points past the vertex list.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self> {
        Self::validate(&positions, &indices)?;

        let vertex_faces = Self::build_vertex_faces(positions.len(), &indices);
        let bounds = Self::compute_bounds(&positions);
        let mut mesh = Self {
            normals: Vec::new(),
            positions,
            indices,
            vertex_faces,
            bounds,
        };
        mesh.compute_smooth_normals();

        log::debug!(
            "Built mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Create a mesh with normals supplied by the loader.
    pub fn with_normals(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        normals: Vec<Vec3>,
    ) -> Result<Self> {
        if normals.len() != positions.len() {
            return Err(CoreError::InvalidMesh(format!(
                "{} normals for {} vertices",
                normals.len(),
                positions.len()
            )));
        }

        let mut mesh = Self::new(positions, indices)?;
        mesh.normals = normals.into_iter().map(|n| n.normalize_or_zero()).collect();
        Ok(mesh)
    }

    fn validate(positions: &[Vec3], indices: &[u32]) -> Result<()> {
        if indices.len() % 3 != 0 {
            return Err(CoreError::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }

        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(CoreError::InvalidMesh(format!(
                "index {} out of range for {} vertices",
                bad,
                positions.len()
            )));
        }

        Ok(())
    }

    fn build_vertex_faces(vertex_count: usize, indices: &[u32]) -> Vec<Vec<usize>> {
        let mut vertex_faces = vec![Vec::new(); vertex_count];
        for (face, tri) in indices.chunks_exact(3).enumerate() {
            for &index in tri {
                vertex_faces[index as usize].push(face);
            }
        }
        vertex_faces
    }

    /// Compute axis-aligned bounding box from positions.
    fn compute_bounds(positions: &[Vec3]) -> Aabb {
        if positions.is_empty() {
            return Aabb::EMPTY;
        }

        let (min, max) = positions.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        );

        Aabb::from_points(min, max)
    }

    /// Vertex indices of a face.
    pub fn face(&self, face: usize) -> [usize; 3] {
        let base = face * 3;
        [
            self.indices[base] as usize,
            self.indices[base + 1] as usize,
            self.indices[base + 2] as usize,
        ]
    }

    /// Unit normal of a face, counter-clockwise winding. Zero for degenerate faces.
    pub fn face_normal(&self, face: usize) -> Vec3 {
        let [i0, i1, i2] = self.face(face);
        let p0 = self.positions[i0];
        let edge1 = self.positions[i1] - p0;
        let edge2 = self.positions[i2] - p0;
        edge1.cross(edge2).normalize_or_zero()
    }

    /// Replace the vertex normals with the average of each vertex's face normals.
    pub fn compute_smooth_normals(&mut self) {
        let normals = (0..self.positions.len())
            .map(|vertex| {
                let sum: Vec3 = self.vertex_faces[vertex]
                    .iter()
                    .map(|&face| self.face_normal(face))
                    .sum();
                let len = sum.length();
                if len > 0.0 {
                    sum / len
                } else {
                    Vec3::Y // Default up normal for unused or degenerate vertices
                }
            })
            .collect();

        self.normals = normals;
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the mesh center (center of bounding box).
    pub fn center(&self) -> Vec3 {
        self.bounds.centroid()
    }
}
