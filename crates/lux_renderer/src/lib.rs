//! Lux Renderer - Whitted-style CPU ray tracing
//!
//! Shoots rays through a pinhole camera, finds the nearest surface through a
//! uniform grid or a linear scan, and shades it with ambient, diffuse,
//! specular and mirror terms. Reflections recurse up to a configured depth.
//!
//! Rendering splits the image into buckets that rayon renders in parallel.

mod axis_box;
mod brdf;
mod bucket;
mod camera;
mod grid;
mod instance;
mod light;
mod material;
mod mesh_triangle;
mod plane;
mod renderable;
mod renderer;
mod sampler;
mod shade_rec;
mod sphere;
mod torus;
mod tracer;
mod triangle;
mod world;

#[cfg(test)]
mod test_util;

pub use axis_box::AxisBox;
pub use brdf::{reflect, GlossySpecular, Lambertian, PerfectSpecular};
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult};
pub use camera::Pinhole;
pub use grid::UniformGrid;
pub use instance::Instance;
pub use light::{Ambient, Directional, Light, PointLight};
pub use material::{Material, Matte, Phong, Reflective};
pub use mesh_triangle::{mesh_triangles, MeshTriangle, Shading};
pub use plane::Plane;
pub use renderable::{nearest_hit, Compound, Hit, Renderable};
pub use renderer::{
    color_to_rgba, max_to_one, render, render_into, render_pixel, ImageBuffer, PixelSink,
};
pub use sampler::{Jittered, Regular, Sampler};
pub use shade_rec::ShadeRec;
pub use sphere::Sphere;
pub use torus::Torus;
pub use tracer::{RayCast, Tracer, Whitted};
pub use triangle::Triangle;
pub use world::World;

/// Re-export common math types from lux_math
pub use lux_math::{Aabb, Color, Ray, Vec3};
