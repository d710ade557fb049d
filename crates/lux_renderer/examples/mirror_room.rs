//! Mirror room example.
//!
//! Builds a small scene in code (grid-accelerated spheres, a torus, a box,
//! a smooth-shaded mesh and two mirrors) and writes it to a PNG.
//!
//! Usage: `cargo run --release --example mirror_room [config.json]`

use anyhow::{Context, Result};
use lux_core::{Mesh, RenderConfig};
use lux_renderer::{
    mesh_triangles, render, Ambient, AxisBox, Color, Directional, Instance, Jittered, Material,
    Matte, Phong, Pinhole, Plane, PointLight, Reflective, Renderable, Shading, Sphere, Torus,
    UniformGrid, Vec3, World,
};
use std::sync::Arc;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => RenderConfig::from_json_file(&path)
            .with_context(|| format!("loading {path}"))?,
        None => RenderConfig {
            background: [0.05, 0.05, 0.08],
            gamma: 2.2,
            ..RenderConfig::default().with_resolution(640, 480).with_quality(16, 6)
        },
    };

    let start = std::time::Instant::now();
    let world = build_scene(config)?;
    log::info!("Scene built in {:?}", start.elapsed());

    let image = render(&world);

    let filename = "mirror_room.png";
    image.to_image().save(filename).with_context(|| format!("writing {filename}"))?;
    log::info!("Saved to {}", filename);

    Ok(())
}

fn build_scene(config: RenderConfig) -> Result<World> {
    let multiplier = config.grid_multiplier;
    let samples = config.samples_per_pixel;
    let mut world = World::new(config);

    world.set_camera(Pinhole::new(Vec3::new(0.0, 6.0, 22.0), Vec3::new(0.0, 1.5, 0.0), 700.0));
    world.set_sampler(Box::new(Jittered::new(samples, 7)));
    world.set_ambient(Ambient::new(0.4, Color::ONE));

    world.add_light(Arc::new(PointLight::new(Vec3::new(6.0, 14.0, 10.0), 2.5)));
    world.add_light(Arc::new(
        Directional::new(Vec3::new(-0.4, 1.0, 0.6), 0.8).with_color(Color::new(1.0, 0.95, 0.85)),
    ));

    world.add_material("floor", Arc::new(Matte::new(0.3, 0.6, Color::new(0.75, 0.72, 0.68))));
    world.add_material(
        "mirror",
        Arc::new(Reflective::new(Phong::new(0.05, 0.1, 0.4, 200.0, Color::ONE), 0.85, Color::ONE)),
    );
    let gold = Phong::new(0.2, 0.6, 0.5, 40.0, Color::new(0.9, 0.65, 0.2));
    world.add_material("gold", Arc::new(gold));
    world.add_material("clay", Arc::new(Matte::new(0.25, 0.7, Color::new(0.7, 0.3, 0.25))));

    let mirror = world.material_or_default("mirror");
    world.add_object(Arc::new(Plane::new(Vec3::ZERO, Vec3::Y, world.material_or_default("floor"))));
    world.add_object(Arc::new(Plane::new(Vec3::new(0.0, 0.0, -8.0), Vec3::Z, mirror.clone())));
    world.add_object(Arc::new(Plane::new(Vec3::new(-12.0, 0.0, 0.0), Vec3::X, mirror.clone())));

    world.add_object(Arc::new(sphere_field(multiplier)));

    world.define_object("ring", Arc::new(Torus::new(2.0, 0.5, world.material_or_default("gold"))));
    let ring = world
        .instance_of("ring")?
        .rotate_x(70.0)
        .rotate_y(30.0)
        .translate(Vec3::new(-4.0, 2.6, 1.0));
    world.add_object(Arc::new(ring));

    world.add_object(Arc::new(AxisBox::new(
        Vec3::new(3.0, 0.0, -2.0),
        Vec3::new(5.0, 2.0, 0.0),
        world.material_or_default("clay"),
    )));

    world.add_object(Arc::new(pyramid(mirror)?));

    Ok(world)
}

/// A 5x5 carpet of small spheres behind the centre, indexed by a grid.
fn sphere_field(multiplier: f32) -> UniformGrid {
    let mut grid = UniformGrid::with_multiplier(multiplier);

    for i in 0..5 {
        for k in 0..5 {
            let hue = Color::new(0.2 + 0.15 * i as f32, 0.3, 0.9 - 0.15 * k as f32);
            let material: Arc<dyn Material> = Arc::new(Phong::new(0.2, 0.7, 0.3, 20.0, hue));
            let center = Vec3::new(-3.0 + 1.5 * i as f32, 0.5, -6.5 + 1.2 * k as f32);
            grid.add_object(Arc::new(Sphere::new(center, 0.5, material)));
        }
    }

    grid.setup_cells();
    grid
}

/// Square pyramid with smooth normals, scaled and placed by an instance.
fn pyramid(material: Arc<dyn Material>) -> Result<Instance> {
    let positions = vec![
        Vec3::new(-1.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(-1.0, 0.0, 1.0),
        Vec3::new(0.0, 1.5, 0.0),
    ];
    let indices = vec![0, 4, 1, 1, 4, 2, 2, 4, 3, 3, 4, 0, 0, 1, 2, 0, 2, 3];
    let mesh = Arc::new(Mesh::new(positions, indices)?);

    let triangles = mesh_triangles(mesh, Shading::Smooth, None);
    let faces: Arc<dyn Renderable> = Arc::new(UniformGrid::from_objects(triangles, 2.0));
    Ok(Instance::new(faces)
        .scale(Vec3::splat(1.5))
        .rotate_y(20.0)
        .translate(Vec3::new(1.0, 0.0, 3.0))
        .with_material(material))
}
