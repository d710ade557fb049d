//! Pixel sample patterns.

use lux_math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces sample offsets inside the unit square of a pixel.
///
/// Samplers carry their own cursor or random state, so every render bucket
/// works on its own [`clone_box`](Sampler::clone_box) copy.
pub trait Sampler: Send + Sync {
    /// Samples taken per pixel.
    fn num_samples(&self) -> usize;

    /// Next offset in `[0, 1) x [0, 1)`.
    fn sample_unit_square(&mut self) -> Vec2;

    fn clone_box(&self) -> Box<dyn Sampler>;
}

impl Clone for Box<dyn Sampler> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Side of the square pattern closest to `n` samples.
fn pattern_side(n: u32) -> u32 {
    ((n as f32).sqrt().round() as u32).max(1)
}

/// Cell centres of a `k x k` grid. One sample gives the pixel centre.
#[derive(Debug, Clone)]
pub struct Regular {
    side: u32,
    next: u32,
}

impl Regular {
    /// `n` is rounded to the nearest perfect square.
    pub fn new(n: u32) -> Self {
        Self {
            side: pattern_side(n),
            next: 0,
        }
    }
}

impl Sampler for Regular {
    fn num_samples(&self) -> usize {
        (self.side * self.side) as usize
    }

    fn sample_unit_square(&mut self) -> Vec2 {
        let k = self.side;
        let i = self.next;
        self.next = (self.next + 1) % (k * k);
        Vec2::new(
            ((i % k) as f32 + 0.5) / k as f32,
            ((i / k) as f32 + 0.5) / k as f32,
        )
    }

    fn clone_box(&self) -> Box<dyn Sampler> {
        Box::new(self.clone())
    }
}

/// One random sample inside each cell of a `k x k` grid.
#[derive(Debug, Clone)]
pub struct Jittered {
    side: u32,
    next: u32,
    rng: StdRng,
}

impl Jittered {
    /// `n` is rounded to the nearest perfect square. The seed makes renders
    /// repeatable.
    pub fn new(n: u32, seed: u64) -> Self {
        Self {
            side: pattern_side(n),
            next: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Sampler for Jittered {
    fn num_samples(&self) -> usize {
        (self.side * self.side) as usize
    }

    fn sample_unit_square(&mut self) -> Vec2 {
        let k = self.side;
        let i = self.next;
        self.next = (self.next + 1) % (k * k);
        Vec2::new(
            ((i % k) as f32 + self.rng.gen::<f32>()) / k as f32,
            ((i / k) as f32 + self.rng.gen::<f32>()) / k as f32,
        )
    }

    fn clone_box(&self) -> Box<dyn Sampler> {
        Box::new(self.clone())
    }
}
