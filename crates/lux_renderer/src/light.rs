//! Light sources.

use crate::ShadeRec;
use lux_math::{Color, Ray, Vec3, HUGE_VALUE};

/// A light that illuminates hit points.
pub trait Light: Send + Sync {
    /// Unit direction from the hit point towards the light.
    fn direction(&self, sr: &ShadeRec) -> Vec3;

    /// Incident radiance at the hit point.
    fn radiance(&self, sr: &ShadeRec) -> Color;

    /// Whether shading should trace a shadow ray for this light.
    fn casts_shadows(&self) -> bool;

    /// True when something blocks `ray` (cast from the hit point) before it
    /// reaches the light.
    fn in_shadow(&self, ray: &Ray, sr: &ShadeRec) -> bool;
}

/// Constant light from every direction. Never casts shadows.
#[derive(Debug, Clone, Copy)]
pub struct Ambient {
    pub ls: f32,
    pub color: Color,
}

impl Ambient {
    pub fn new(ls: f32, color: Color) -> Self {
        Self { ls, color }
    }
}

impl Default for Ambient {
    fn default() -> Self {
        Self::new(1.0, Color::ONE)
    }
}

impl Light for Ambient {
    fn direction(&self, _sr: &ShadeRec) -> Vec3 {
        Vec3::ZERO
    }

    fn radiance(&self, _sr: &ShadeRec) -> Color {
        self.ls * self.color
    }

    fn casts_shadows(&self) -> bool {
        false
    }

    fn in_shadow(&self, _ray: &Ray, _sr: &ShadeRec) -> bool {
        false
    }
}

/// Light emitted from a single point, without falloff.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub ls: f32,
    pub color: Color,
    pub location: Vec3,
    pub shadows: bool,
}

impl PointLight {
    /// A white shadow-casting point light.
    pub fn new(location: Vec3, ls: f32) -> Self {
        Self {
            ls,
            color: Color::ONE,
            location,
            shadows: true,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_shadows(mut self, shadows: bool) -> Self {
        self.shadows = shadows;
        self
    }
}

impl Light for PointLight {
    fn direction(&self, sr: &ShadeRec) -> Vec3 {
        (self.location - sr.hit_point).normalize_or_zero()
    }

    fn radiance(&self, _sr: &ShadeRec) -> Color {
        self.ls * self.color
    }

    fn casts_shadows(&self) -> bool {
        self.shadows
    }

    /// Only occluders closer than the light count.
    fn in_shadow(&self, ray: &Ray, sr: &ShadeRec) -> bool {
        let distance = self.location.distance(ray.origin);
        sr.world.shadow_hit(ray, distance)
    }
}

/// Parallel light from a fixed direction, as from a distant source.
#[derive(Debug, Clone, Copy)]
pub struct Directional {
    pub ls: f32,
    pub color: Color,
    /// Unit direction towards the light
    pub direction: Vec3,
    pub shadows: bool,
}

impl Directional {
    /// A white shadow-casting light arriving from `direction`.
    pub fn new(direction: Vec3, ls: f32) -> Self {
        Self {
            ls,
            color: Color::ONE,
            direction: direction.normalize_or_zero(),
            shadows: true,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_shadows(mut self, shadows: bool) -> Self {
        self.shadows = shadows;
        self
    }
}

impl Light for Directional {
    fn direction(&self, _sr: &ShadeRec) -> Vec3 {
        self.direction
    }

    fn radiance(&self, _sr: &ShadeRec) -> Color {
        self.ls * self.color
    }

    fn casts_shadows(&self) -> bool {
        self.shadows
    }

    fn in_shadow(&self, ray: &Ray, sr: &ShadeRec) -> bool {
        sr.world.shadow_hit(ray, HUGE_VALUE)
    }
}
