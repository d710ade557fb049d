use crate::{Material, Matte};
use lux_math::Color;
use std::sync::Arc;

/// Matte with ka = 0.25 and kd = 0.75.
pub fn matte(color: Color) -> Arc<dyn Material> {
    Arc::new(Matte::new(0.25, 0.75, color))
}

/// True when both references point at the same material instance.
pub fn same_material(a: &dyn Material, b: &dyn Material) -> bool {
    std::ptr::eq(a as *const dyn Material as *const u8, b as *const dyn Material as *const u8)
}
