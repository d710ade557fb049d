//! The scene: objects, lights, materials, camera and tracer.

use crate::{
    nearest_hit, Ambient, Instance, Jittered, Light, Material, Matte, Pinhole, Regular, Renderable,
    Sampler, ShadeRec, Tracer, Whitted,
};
use lux_core::{CoreError, RenderConfig, Result};
use lux_math::{Color, Ray, HUGE_VALUE};
use std::collections::HashMap;
use std::sync::Arc;

/// Everything needed to render one image.
///
/// A world is filled in by the scene setup code and is read-only while
/// rendering, so worker threads share it by reference.
pub struct World {
    config: RenderConfig,
    camera: Pinhole,
    objects: Vec<Arc<dyn Renderable>>,
    definitions: HashMap<String, Arc<dyn Renderable>>,
    lights: Vec<Arc<dyn Light>>,
    materials: HashMap<String, Arc<dyn Material>>,
    ambient: Ambient,
    tracer: Box<dyn Tracer>,
    sampler: Box<dyn Sampler>,
    default_material: Arc<dyn Material>,
}

impl World {
    /// Empty world with a Whitted tracer and a sampler matching
    /// `config.samples_per_pixel`.
    pub fn new(config: RenderConfig) -> Self {
        let sampler: Box<dyn Sampler> = if config.samples_per_pixel > 1 {
            Box::new(Jittered::new(config.samples_per_pixel, 0))
        } else {
            Box::new(Regular::new(1))
        };

        Self {
            config,
            camera: Pinhole::default(),
            objects: Vec::new(),
            definitions: HashMap::new(),
            lights: Vec::new(),
            materials: HashMap::new(),
            ambient: Ambient::default(),
            tracer: Box::new(Whitted),
            sampler,
            default_material: Arc::new(Matte::new(0.25, 0.75, Color::splat(0.5))),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn background(&self) -> Color {
        self.config.background_color()
    }

    pub fn camera(&self) -> &Pinhole {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: Pinhole) {
        self.camera = camera;
    }

    pub fn ambient(&self) -> &Ambient {
        &self.ambient
    }

    pub fn set_ambient(&mut self, ambient: Ambient) {
        self.ambient = ambient;
    }

    pub fn set_tracer(&mut self, tracer: Box<dyn Tracer>) {
        self.tracer = tracer;
    }

    pub fn sampler(&self) -> &dyn Sampler {
        self.sampler.as_ref()
    }

    pub fn set_sampler(&mut self, sampler: Box<dyn Sampler>) {
        self.sampler = sampler;
    }

    /// Objects that are rendered.
    pub fn objects(&self) -> &[Arc<dyn Renderable>] {
        &self.objects
    }

    pub fn lights(&self) -> &[Arc<dyn Light>] {
        &self.lights
    }

    /// Add an object to the render list.
    pub fn add_object(&mut self, object: Arc<dyn Renderable>) {
        self.objects.push(object);
    }

    pub fn add_light(&mut self, light: Arc<dyn Light>) {
        self.lights.push(light);
    }

    /// Register a material under `id`, replacing any previous one.
    pub fn add_material(&mut self, id: impl Into<String>, material: Arc<dyn Material>) {
        self.materials.insert(id.into(), material);
    }

    pub fn get_material_by_id(&self, id: &str) -> Option<Arc<dyn Material>> {
        self.materials.get(id).cloned()
    }

    /// The material registered as `id`, or a grey matte if there is none.
    pub fn material_or_default(&self, id: &str) -> Arc<dyn Material> {
        self.get_material_by_id(id).unwrap_or_else(|| {
            log::warn!("Unknown material '{}', using default", id);
            self.default_material.clone()
        })
    }

    /// Material used for surfaces that carry none.
    pub fn default_material(&self) -> &dyn Material {
        self.default_material.as_ref()
    }

    /// Register an object for instancing. Definitions are not rendered.
    pub fn define_object(&mut self, id: impl Into<String>, object: Arc<dyn Renderable>) {
        self.definitions.insert(id.into(), object);
    }

    pub fn get_object_by_id(&self, id: &str) -> Option<Arc<dyn Renderable>> {
        self.definitions.get(id).cloned()
    }

    /// A new identity instance of the definition `id`.
    pub fn instance_of(&self, id: &str) -> Result<Instance> {
        self.get_object_by_id(id)
            .map(Instance::new)
            .ok_or_else(|| CoreError::UnknownObject(id.to_string()))
    }

    /// Nearest hit over the render list.
    pub fn hit_objects(&self, ray: &Ray) -> ShadeRec<'_> {
        match nearest_hit(&self.objects, ray, HUGE_VALUE) {
            Some(hit) => ShadeRec::from_hit(self, *ray, hit),
            None => ShadeRec::new(self, *ray),
        }
    }

    /// True if any object blocks `ray` before `t_max`.
    pub fn shadow_hit(&self, ray: &Ray, t_max: f32) -> bool {
        self.objects.iter().any(|object| object.shadow_hit(ray, t_max))
    }

    /// Radiance along `ray`, using the current tracer.
    pub fn trace_ray(&self, ray: &Ray, depth: u32) -> Color {
        self.tracer.trace_ray(self, ray, depth)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}
