//! Pinhole camera for primary ray generation.

use lux_core::RenderConfig;
use lux_math::{Ray, Vec2, Vec3};

/// Pinhole camera looking from `eye` towards `look_at`.
///
/// The view plane sits `view_distance` in front of the eye; `zoom` scales
/// the pixel size on it.
#[derive(Debug, Clone)]
pub struct Pinhole {
    eye: Vec3,
    look_at: Vec3,
    up: Vec3,
    view_distance: f32,
    zoom: f32,

    // Orthonormal basis, refreshed by compute_uvw()
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Pinhole {
    /// Create a camera and compute its basis.
    pub fn new(eye: Vec3, look_at: Vec3, view_distance: f32) -> Self {
        let mut camera = Self {
            eye,
            look_at,
            up: Vec3::Y,
            view_distance,
            zoom: 1.0,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
        };
        camera.compute_uvw();
        camera
    }

    /// Set the up vector.
    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up;
        self.compute_uvw();
        self
    }

    /// Set the zoom factor.
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Basis vectors `(u, v, w)`; `w` points from the target back to the eye.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Rebuild the basis from eye, look-at and up.
    ///
    /// When the view direction is parallel to `up` any perpendicular vector
    /// is used instead, so looking straight up or down still works.
    pub fn compute_uvw(&mut self) {
        self.w = (self.eye - self.look_at).normalize_or(Vec3::Z);

        let u = self.up.cross(self.w);
        self.u = if u.length_squared() > 1e-12 {
            u.normalize()
        } else {
            self.w.any_orthonormal_vector()
        };
        self.v = self.w.cross(self.u);
    }

    /// Unit direction through view plane point `p`.
    pub fn direction(&self, p: Vec2) -> Vec3 {
        (p.x * self.u + p.y * self.v - self.view_distance * self.w).normalize()
    }

    /// Primary ray through pixel `(row, col)`, offset by `sample` in the unit
    /// square. Row 0 is the top of the image.
    pub fn ray_for(&self, config: &RenderConfig, row: u32, col: u32, sample: Vec2) -> Ray {
        let s = config.pixel_size / self.zoom;
        let p = Vec2::new(
            s * (col as f32 + sample.x - 0.5 * config.width as f32),
            s * (0.5 * config.height as f32 - (row as f32 + sample.y)),
        );
        Ray::new(self.eye, self.direction(p))
    }
}

impl Default for Pinhole {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 500.0), Vec3::ZERO, 500.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: u32, height: u32) -> RenderConfig {
        RenderConfig::default().with_resolution(width, height)
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Pinhole::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 100.0);
        let ray = camera.ray_for(&config(100, 100), 50, 50, Vec2::ZERO);

        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 10.0));
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-6);
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_top_left_pixel_points_up_and_left() {
        let camera = Pinhole::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 100.0);
        let ray = camera.ray_for(&config(100, 100), 0, 0, Vec2::splat(0.5));

        assert!(ray.direction.x < 0.0);
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn test_zoom_narrows_the_view() {
        let wide = Pinhole::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 100.0);
        let narrow = wide.clone().with_zoom(2.0);
        let cfg = config(100, 100);

        let a = wide.ray_for(&cfg, 50, 0, Vec2::ZERO);
        let b = narrow.ray_for(&cfg, 50, 0, Vec2::ZERO);
        assert!(b.direction.x.abs() < a.direction.x.abs());
    }

    #[test]
    fn test_looking_straight_down() {
        let camera = Pinhole::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, 100.0);
        let (u, v, w) = camera.basis();

        assert!(u.is_finite() && v.is_finite());
        assert!((w - Vec3::Y).length() < 1e-6);
        assert!(u.dot(w).abs() < 1e-6 && v.dot(w).abs() < 1e-6);

        let ray = camera.ray_for(&config(10, 10), 5, 5, Vec2::ZERO);
        assert!((ray.direction - Vec3::NEG_Y).length() < 1e-6);
    }
}
