//! Render configuration.
//!
//! Replaces per-process globals (view plane size, recursion depth, sample
//! count) with one value threaded from scene setup into the renderer.

use std::path::Path;

use lux_math::Color;
use serde::{Deserialize, Serialize};

use crate::{CoreError, Result};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Horizontal resolution in pixels
    pub width: u32,
    /// Vertical resolution in pixels
    pub height: u32,
    /// Size of one pixel on the view plane
    pub pixel_size: f32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum reflection depth; the primary ray is depth 0
    pub max_depth: u32,
    /// Background color (linear RGB) when a ray hits nothing
    pub background: [f32; 3],
    /// Display gamma applied on output
    pub gamma: f32,
    /// Edge length of a render bucket in pixels
    pub bucket_size: u32,
    /// Worker threads; `None` uses the rayon default
    pub threads: Option<usize>,
    /// Uniform grid density factor (cells per axis scale)
    pub grid_multiplier: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            pixel_size: 1.0,
            samples_per_pixel: 1,
            max_depth: 5,
            background: [0.0, 0.0, 0.0],
            gamma: 1.0,
            bucket_size: 64,
            threads: None,
            grid_multiplier: 2.0,
        }
    }
}

impl RenderConfig {
    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loading render config from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Reject settings the renderer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::InvalidConfig(format!(
                "resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(CoreError::InvalidConfig("samples_per_pixel must be at least 1".into()));
        }
        if self.bucket_size == 0 {
            return Err(CoreError::InvalidConfig("bucket_size must be at least 1".into()));
        }
        if self.pixel_size <= 0.0 || self.gamma <= 0.0 || self.grid_multiplier <= 0.0 {
            return Err(CoreError::InvalidConfig(
                "pixel_size, gamma and grid_multiplier must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Background as a color vector.
    pub fn background_color(&self) -> Color {
        Color::from_array(self.background)
    }

    /// Builder-style resolution setter.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder-style quality setter.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }
}
