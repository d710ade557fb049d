//! Image rendering: pixel sampling, parallel buckets and output conversion.

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::{Sampler, World};
use image::{Rgba, RgbaImage};
use lux_math::Color;
use rayon::prelude::*;
use std::time::Instant;

/// Receives finished pixels.
///
/// Implemented by [`ImageBuffer`]; a live preview window could implement it
/// too.
pub trait PixelSink {
    /// Store the color of pixel `(row, col)`; row 0 is the top of the image.
    fn display_pixel(&mut self, row: u32, col: u32, color: Color);
}

/// Average radiance over all samples of one pixel.
pub fn render_pixel(world: &World, sampler: &mut dyn Sampler, row: u32, col: u32) -> Color {
    let n = sampler.num_samples();
    let camera = world.camera();
    let config = world.config();

    let mut pixel_color = Color::ZERO;
    for _ in 0..n {
        let ray = camera.ray_for(config, row, col, sampler.sample_unit_square());
        pixel_color += world.trace_ray(&ray, 0);
    }

    pixel_color / n as f32
}

/// Map an out-of-gamut color back into range by dividing by its largest
/// component.
#[inline]
pub fn max_to_one(color: Color) -> Color {
    let max = color.max_element();
    if max > 1.0 {
        color / max
    } else {
        color
    }
}

/// Convert a linear color to 8-bit RGBA with `1 / gamma` correction.
pub fn color_to_rgba(color: Color, gamma: f32) -> [u8; 4] {
    let mut c = max_to_one(color).max(Color::ZERO);
    if gamma != 1.0 {
        c = c.powf(1.0 / gamma);
    }
    let to_byte = |x: f32| (255.0 * x.clamp(0.0, 1.0)).round() as u8;
    [to_byte(c.x), to_byte(c.y), to_byte(c.z), 255]
}

/// Linear color frame buffer.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    /// Display gamma used when converting to bytes
    pub gamma: f32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            gamma: 1.0,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&color| color_to_rgba(color, self.gamma))
            .collect()
    }

    /// Convert to an 8-bit image for writing to disk.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(color_to_rgba(self.get(x, y), self.gamma))
        })
    }
}

impl PixelSink for ImageBuffer {
    fn display_pixel(&mut self, row: u32, col: u32, color: Color) {
        self.set(col, row, color);
    }
}

/// Render every bucket in parallel on the configured thread pool.
fn render_buckets(world: &World) -> Vec<BucketResult> {
    let config = world.config();
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);
    let work = || buckets.par_iter().map(|bucket| render_bucket(bucket, world)).collect::<Vec<_>>();

    let Some(threads) = config.threads else {
        return work();
    };

    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(work),
        Err(e) => {
            log::warn!("Could not build a {}-thread pool ({}), using the global pool", threads, e);
            work()
        }
    }
}

/// Render the world and hand every pixel to `sink`.
///
/// Buckets cover disjoint pixels, so results are written back without
/// locking once the workers finish.
pub fn render_into(world: &World, sink: &mut dyn PixelSink) {
    let config = world.config();
    let start = Instant::now();
    log::info!(
        "Rendering {}x{}, {} objects, {} lights, {} samples per pixel",
        config.width,
        config.height,
        world.objects().len(),
        world.lights().len(),
        world.sampler().num_samples()
    );

    let results = render_buckets(world);
    let bucket_count = results.len();
    for result in &results {
        for (row, col, color) in result.iter_pixels() {
            sink.display_pixel(row, col, color);
        }
    }

    log::info!("Rendered {} buckets in {:.2?}", bucket_count, start.elapsed());
}

/// Render the world to a new image buffer.
pub fn render(world: &World) -> ImageBuffer {
    let config = world.config();
    let mut image = ImageBuffer::new(config.width, config.height).with_gamma(config.gamma);
    render_into(world, &mut image);
    image
}
