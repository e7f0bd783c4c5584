// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f, FLOAT_MAX};

/// Ray with a valid parametric interval `[min_t, max_t]`.
///
/// Rays are never mutated: every bounce and every shadow test builds a new one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    pub min_t: Float,
    pub max_t: Float
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        Self { origin: o, dir: d.normalize(),
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(FLOAT_MAX)}
    }

    /// Same origin and direction, restricted to `[min_t, max_t]`.
    pub fn with_segment(&self, min_t: Float, max_t: Float) -> Self {
        Self { origin: self.origin, dir: self.dir, min_t, max_t }
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    pub fn test_segment(&self, t: Float) -> bool {
        t >= self.min_t && t <= self.max_t
    }

    /// True when the interval reaches to infinity.
    pub fn is_unbounded(&self) -> bool {
        self.max_t >= FLOAT_MAX
    }
}

/* Tests for Ray */
