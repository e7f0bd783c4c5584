// Copyright @yucwang 2026

use crate::core::sampler::Sampler;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Result of sampling a free-flight distance along a ray segment.
///
/// `weight` is the transmittance (times the scattering coefficient when
/// `scattered` is set) divided by the density of the sampled event, so
/// multiplying it into the throughput keeps the estimator unbiased.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MediumSample {
    pub scattered: bool,
    pub t: Float,
    pub weight: RGBSpectrum,
}

/// World-space directions; `wi` points back along the incoming ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PhaseFunctionQueryRecord {
    pub wi: Vector3f,
    pub wo: Vector3f,
}

impl PhaseFunctionQueryRecord {
    pub fn new(wi: Vector3f) -> Self {
        Self { wi, wo: Vector3f::zeros() }
    }

    pub fn with_directions(wi: Vector3f, wo: Vector3f) -> Self {
        Self { wi, wo }
    }
}

pub trait PhaseFunction: Send + Sync {
    fn eval(&self, rec: &PhaseFunctionQueryRecord) -> RGBSpectrum;
    fn pdf(&self, rec: &PhaseFunctionQueryRecord) -> Float;
    /// Fill in `rec.wo` and return `eval / pdf`.
    fn sample(&self, rec: &mut PhaseFunctionQueryRecord, u: &Vector2f) -> RGBSpectrum;
}

pub trait Medium: Send + Sync {
    /// Transmittance over `[ray.min_t, ray.max_t]`.
    fn eval_transmittance(&self, ray: &Ray3f) -> RGBSpectrum;
    fn sample_distance(&self, ray: &Ray3f, sampler: &mut dyn Sampler) -> MediumSample;
    fn phase_function(&self) -> &dyn PhaseFunction;
}
