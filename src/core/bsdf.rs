// Copyright @yucwang 2023

use crate::core::sampler::Sampler;
use crate::math::constants::{ Float, Vector3f };
use crate::math::spectrum::RGBSpectrum;

/// Measure a BSDF sample or query is expressed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Measure {
    SolidAngle,
    /// Dirac delta lobe (mirror, smooth dielectric).
    Discrete,
}

/// Directions are in the local shading frame. `wi` points back towards
/// the viewer, `wo` towards the light or the continuation of the path.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BSDFQueryRecord {
    pub wi: Vector3f,
    pub wo: Vector3f,
    pub measure: Measure,
    /// Relative refractive index of the sampled interaction.
    pub eta: Float,
}

impl BSDFQueryRecord {
    /// Record for `sample()`: only the incident direction is known.
    pub fn new(wi: Vector3f) -> Self {
        Self {
            wi,
            wo: Vector3f::zeros(),
            measure: Measure::SolidAngle,
            eta: 1.0,
        }
    }

    /// Record for `eval()` and `pdf()`.
    pub fn with_directions(wi: Vector3f, wo: Vector3f, measure: Measure) -> Self {
        Self { wi, wo, measure, eta: 1.0 }
    }
}

pub trait BSDF: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Value of the distribution for `(wi, wo)`, without the cosine.
    fn eval(&self, rec: &BSDFQueryRecord) -> RGBSpectrum;

    /// Solid-angle density with which `sample()` produces `rec.wo`.
    fn pdf(&self, rec: &BSDFQueryRecord) -> Float;

    /// Fill in `wo`, `measure` and `eta` and return
    /// `eval * |cos(wo)| / pdf`, or zero when the sample is unusable.
    fn sample(&self, rec: &mut BSDFQueryRecord, sampler: &mut dyn Sampler) -> RGBSpectrum;
}
