//! Shaders that turn a hit into outgoing radiance.

use crate::brdf::{GlossySpecular, Lambertian, PerfectSpecular};
use crate::{Light, ShadeRec};
use lux_math::{Color, Ray, Vec3, SHADOW_EPSILON};

/// Trait for materials that compute the color seen along a ray.
pub trait Material: Send + Sync {
    /// Outgoing radiance towards `-sr.ray.direction`.
    fn shade(&self, sr: &ShadeRec) -> Color;
}

/// Sum over the world's lights of `f(wi) * L * (n . wi)`.
///
/// Lights behind the surface contribute nothing, and shadow rays start a
/// little above the surface so the surface cannot occlude itself.
fn direct_lighting(sr: &ShadeRec, f: impl Fn(Vec3) -> Color) -> Color {
    sr.world
        .lights()
        .iter()
        .map(|light| {
            let wi = light.direction(sr);
            let n_dot_wi = sr.normal.dot(wi);
            if n_dot_wi <= 0.0 {
                return Color::ZERO;
            }

            if light.casts_shadows() {
                let shadow_ray = Ray::new(sr.hit_point + sr.normal * SHADOW_EPSILON, wi);
                if light.in_shadow(&shadow_ray, sr) {
                    return Color::ZERO;
                }
            }

            f(wi) * light.radiance(sr) * n_dot_wi
        })
        .sum()
}

fn ambient_term(sr: &ShadeRec, ambient: &Lambertian, wo: Vec3) -> Color {
    let ambient_light = sr.world.ambient();
    ambient.rho(sr, wo) * ambient_light.radiance(sr)
}

/// Ambient plus Lambertian diffuse shading.
#[derive(Debug, Clone, Copy)]
pub struct Matte {
    ambient: Lambertian,
    diffuse: Lambertian,
}

impl Matte {
    /// `ka` and `kd` scale the ambient and diffuse response of color `cd`.
    pub fn new(ka: f32, kd: f32, cd: Color) -> Self {
        Self {
            ambient: Lambertian::new(ka, cd),
            diffuse: Lambertian::new(kd, cd),
        }
    }
}

impl Material for Matte {
    fn shade(&self, sr: &ShadeRec) -> Color {
        let wo = -sr.ray.direction;
        ambient_term(sr, &self.ambient, wo) + direct_lighting(sr, |wi| self.diffuse.f(sr, wo, wi))
    }
}

/// Matte shading plus a glossy highlight.
#[derive(Debug, Clone, Copy)]
pub struct Phong {
    ambient: Lambertian,
    diffuse: Lambertian,
    specular: GlossySpecular,
}

impl Phong {
    /// White highlight of strength `ks` and Phong exponent `exp`.
    pub fn new(ka: f32, kd: f32, ks: f32, exp: f32, cd: Color) -> Self {
        Self {
            ambient: Lambertian::new(ka, cd),
            diffuse: Lambertian::new(kd, cd),
            specular: GlossySpecular::new(ks, Color::ONE, exp),
        }
    }

    pub fn with_specular_color(mut self, cs: Color) -> Self {
        self.specular.cs = cs;
        self
    }
}

impl Material for Phong {
    fn shade(&self, sr: &ShadeRec) -> Color {
        let wo = -sr.ray.direction;
        ambient_term(sr, &self.ambient, wo)
            + direct_lighting(sr, |wi| self.diffuse.f(sr, wo, wi) + self.specular.f(sr, wo, wi))
    }
}

/// Phong shading plus a recursive mirror reflection.
#[derive(Debug, Clone, Copy)]
pub struct Reflective {
    phong: Phong,
    reflective: PerfectSpecular,
}

impl Reflective {
    pub fn new(phong: Phong, kr: f32, cr: Color) -> Self {
        Self {
            phong,
            reflective: PerfectSpecular::new(kr, cr),
        }
    }
}

impl Material for Reflective {
    fn shade(&self, sr: &ShadeRec) -> Color {
        let mut radiance = self.phong.shade(sr);

        // Reflection stops once the ray is max_depth bounces deep
        if sr.depth >= sr.world.config().max_depth {
            return radiance;
        }

        let wo = -sr.ray.direction;
        let (wi, fr) = self.reflective.sample_f(sr, wo);
        let n_dot_wi = sr.normal.dot(wi);
        if n_dot_wi > 0.0 {
            let reflected = Ray::new(sr.hit_point + wi * SHADOW_EPSILON, wi);
            radiance += fr * sr.world.trace_ray(&reflected, sr.depth + 1) * n_dot_wi;
        }
        radiance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ambient, Plane, PointLight, Sphere, World};
    use std::sync::Arc;

    /// Floor at y = 0 lit by a point light straight above the origin.
    fn lit_floor() -> World {
        let mut world = World::default();
        world.set_ambient(Ambient::new(0.0, Color::ONE));
        let floor = Arc::new(Matte::new(0.25, 0.75, Color::ONE));
        world.add_object(Arc::new(Plane::new(Vec3::ZERO, Vec3::Y, floor)));
        world.add_light(Arc::new(PointLight::new(Vec3::new(0.0, 10.0, 0.0), 3.0)));
        world
    }

    fn shade_down(world: &World) -> Color {
        let ray = Ray::new(Vec3::new(0.5, 5.0, 0.0), Vec3::NEG_Y);
        let sr = world.hit_objects(&ray);
        assert!(sr.hit_an_object);
        sr.material.unwrap().shade(&sr)
    }

    #[test]
    fn test_unoccluded_point_light_is_positive() {
        let color = shade_down(&lit_floor());
        assert!(color.x > 0.0 && color.y > 0.0 && color.z > 0.0);
    }

    #[test]
    fn test_occluder_zeroes_light_contribution() {
        let mut world = lit_floor();
        let blocker = Arc::new(Matte::new(0.0, 1.0, Color::ONE));
        world.add_object(Arc::new(Sphere::new(Vec3::new(0.0, 7.0, 0.0), 1.0, blocker)));

        assert_eq!(shade_down(&world), Color::ZERO);
    }

    #[test]
    fn test_light_below_surface_contributes_nothing() {
        let mut world = World::default();
        world.set_ambient(Ambient::new(0.0, Color::ONE));
        let floor = Arc::new(Matte::new(0.25, 0.75, Color::ONE));
        world.add_object(Arc::new(Plane::new(Vec3::ZERO, Vec3::Y, floor)));
        let below = PointLight::new(Vec3::new(0.0, -10.0, 0.0), 3.0).with_shadows(false);
        world.add_light(Arc::new(below));

        assert_eq!(shade_down(&world), Color::ZERO);
    }

    #[test]
    fn test_matte_ambient_and_diffuse_values() {
        let mut world = lit_floor();
        world.set_ambient(Ambient::new(1.0, Color::ONE));

        let n_dot_wi = 10.0 / 100.25f32.sqrt();
        let expected = 0.25 + 0.75 * std::f32::consts::FRAC_1_PI * 3.0 * n_dot_wi;
        let color = shade_down(&world);
        assert!((color.x - expected).abs() < 1e-3, "{color}");
    }

    #[test]
    fn test_ambient_only_scales_by_tinted_radiance() {
        let mut world = World::default();
        world.set_ambient(Ambient::new(2.0, Color::new(1.0, 1.0, 0.5)));
        let floor = Arc::new(Matte::new(0.5, 1.0, Color::new(1.0, 0.5, 0.25)));
        world.add_object(Arc::new(Plane::new(Vec3::ZERO, Vec3::Y, floor)));

        let color = shade_down(&world);
        assert!((color - Color::new(1.0, 0.5, 0.125)).length() < 1e-5, "{color}");
    }

    #[test]
    fn test_phong_adds_highlight() {
        let mut world = World::default();
        world.set_ambient(Ambient::new(0.0, Color::ONE));
        world.add_light(Arc::new(PointLight::new(Vec3::new(0.5, 10.0, 0.0), 1.0)));

        let phong = Phong::new(0.0, 0.5, 0.5, 10.0, Color::ONE);
        world.add_object(Arc::new(Plane::new(Vec3::ZERO, Vec3::Y, Arc::new(phong))));
        let with_highlight = shade_down(&world);

        let mut matte_world = World::default();
        matte_world.set_ambient(Ambient::new(0.0, Color::ONE));
        matte_world.add_light(Arc::new(PointLight::new(Vec3::new(0.5, 10.0, 0.0), 1.0)));
        let floor = Arc::new(Matte::new(0.0, 0.5, Color::ONE));
        matte_world.add_object(Arc::new(Plane::new(Vec3::ZERO, Vec3::Y, floor)));

        assert!(with_highlight.x > shade_down(&matte_world).x + 0.1);
    }
}
