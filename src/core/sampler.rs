// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f, ONE_MINUS_EPSILON};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Stream of uniform samples owned by exactly one in-flight path.
///
/// Samplers are passed as `&mut dyn Sampler`, so a stream can never be
/// shared between two paths that run at the same time.
pub trait Sampler {
    /// Uniform value in `[0, 1)`.
    fn next_1d(&mut self) -> Float;
    /// Two independent uniform values in `[0, 1)`.
    fn next_2d(&mut self) -> Vector2f;
}

pub struct IndependentSampler {
    rng: Xoshiro256PlusPlus,
}

impl IndependentSampler {
    pub fn new(seed: u64) -> Self {
        Self { rng: Xoshiro256PlusPlus::seed_from_u64(seed) }
    }

    /// Stream for one pixel, decorrelated from its neighbours.
    pub fn for_pixel(seed: u64, x: usize, y: usize) -> Self {
        let pixel = ((y as u64) << 32) | (x as u64 & 0xFFFF_FFFF);
        Self::new(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ pixel)
    }
}

impl Sampler for IndependentSampler {
    fn next_1d(&mut self) -> Float {
        self.rng.gen::<Float>().min(ONE_MINUS_EPSILON)
    }

    fn next_2d(&mut self) -> Vector2f {
        let x = self.next_1d();
        let y = self.next_1d();
        Vector2f::new(x, y)
    }
}
