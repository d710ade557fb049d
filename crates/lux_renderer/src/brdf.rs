//! Reflectance functions used by the shaders.

use crate::ShadeRec;
use lux_math::{Color, Vec3};
use std::f32::consts::FRAC_1_PI;

/// Mirror `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    -v + 2.0 * n.dot(v) * n
}

/// Perfectly diffuse reflection.
#[derive(Debug, Clone, Copy)]
pub struct Lambertian {
    /// Diffuse coefficient
    pub kd: f32,
    /// Diffuse color
    pub cd: Color,
}

impl Lambertian {
    pub fn new(kd: f32, cd: Color) -> Self {
        Self { kd, cd }
    }

    /// Reflected radiance per unit solid angle: `kd * cd / pi`.
    pub fn f(&self, _sr: &ShadeRec, _wo: Vec3, _wi: Vec3) -> Color {
        self.kd * self.cd * FRAC_1_PI
    }

    /// Hemispherical reflectance, used for the ambient term.
    pub fn rho(&self, _sr: &ShadeRec, _wo: Vec3) -> Color {
        self.kd * self.cd
    }
}

/// Phong-style specular highlight lobe around the mirror direction.
#[derive(Debug, Clone, Copy)]
pub struct GlossySpecular {
    pub ks: f32,
    pub cs: Color,
    /// Phong exponent; larger values give tighter highlights
    pub exp: f32,
}

impl GlossySpecular {
    pub fn new(ks: f32, cs: Color, exp: f32) -> Self {
        Self { ks, cs, exp }
    }

    pub fn f(&self, sr: &ShadeRec, wo: Vec3, wi: Vec3) -> Color {
        let r = reflect(wi, sr.normal);
        let r_dot_wo = r.dot(wo);

        if r_dot_wo > 0.0 {
            self.ks * self.cs * r_dot_wo.powf(self.exp)
        } else {
            Color::ZERO
        }
    }

    /// No hemispherical contribution.
    pub fn rho(&self, _sr: &ShadeRec, _wo: Vec3) -> Color {
        Color::ZERO
    }
}

/// Perfect mirror reflection.
#[derive(Debug, Clone, Copy)]
pub struct PerfectSpecular {
    pub kr: f32,
    pub cr: Color,
}

impl PerfectSpecular {
    pub fn new(kr: f32, cr: Color) -> Self {
        Self { kr, cr }
    }

    /// Mirror direction `wi` for outgoing direction `wo`, and the reflectance
    /// divided by `n . wi` so that the caller's cosine factor cancels.
    ///
    /// The reflectance is zero when `wi` is not above the surface.
    pub fn sample_f(&self, sr: &ShadeRec, wo: Vec3) -> (Vec3, Color) {
        let wi = reflect(wo, sr.normal);
        let n_dot_wi = sr.normal.dot(wi);

        let f = if n_dot_wi > 0.0 {
            self.kr * self.cr / n_dot_wi
        } else {
            Color::ZERO
        };
        (wi, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::World;
    use lux_math::Ray;

    fn shade_rec(world: &World, normal: Vec3) -> ShadeRec<'_> {
        let mut sr = ShadeRec::new(world, Ray::default());
        sr.normal = normal;
        sr
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, 1.0, 0.0);
        assert!((reflect(v, Vec3::Y) - Vec3::new(-1.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_lambertian() {
        let world = World::default();
        let sr = shade_rec(&world, Vec3::Y);
        let brdf = Lambertian::new(0.5, Color::new(1.0, 0.5, 0.0));

        let f = brdf.f(&sr, Vec3::Y, Vec3::Y);
        assert!((f - Color::new(0.5, 0.25, 0.0) / std::f32::consts::PI).length() < 1e-6);
        assert_eq!(brdf.rho(&sr, Vec3::Y), Color::new(0.5, 0.25, 0.0));
    }

    #[test]
    fn test_glossy_peaks_on_mirror_direction() {
        let world = World::default();
        let sr = shade_rec(&world, Vec3::Y);
        let brdf = GlossySpecular::new(0.8, Color::ONE, 20.0);

        let wi = Vec3::new(1.0, 1.0, 0.0).normalize();
        let mirror = Vec3::new(-1.0, 1.0, 0.0).normalize();
        let peak = brdf.f(&sr, mirror, wi);
        assert!((peak - Color::splat(0.8)).length() < 1e-5);

        let off = brdf.f(&sr, Vec3::Y, wi);
        assert!(off.x < peak.x);

        // Pointing away from the lobe contributes nothing
        assert_eq!(brdf.f(&sr, -mirror, wi), Color::ZERO);
    }

    #[test]
    fn test_perfect_specular_sample() {
        let world = World::default();
        let sr = shade_rec(&world, Vec3::Y);
        let brdf = PerfectSpecular::new(0.75, Color::ONE);

        let wo = Vec3::new(-1.0, 1.0, 0.0).normalize();
        let (wi, f) = brdf.sample_f(&sr, wo);

        assert!((wi - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
        // Times the cosine gives back kr * cr
        assert!((f * sr.normal.dot(wi) - Color::splat(0.75)).length() < 1e-5);
    }
}
