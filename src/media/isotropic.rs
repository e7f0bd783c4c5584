// Copyright @yucwang 2026

use crate::core::medium::{PhaseFunction, PhaseFunctionQueryRecord};
use crate::math::constants::{Float, Vector2f, INV_FOUR_PI};
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{sample_uniform_sphere, sample_uniform_sphere_pdf};

pub struct IsotropicPhase;

impl PhaseFunction for IsotropicPhase {
    fn eval(&self, _rec: &PhaseFunctionQueryRecord) -> RGBSpectrum {
        RGBSpectrum::splat(INV_FOUR_PI)
    }

    fn pdf(&self, _rec: &PhaseFunctionQueryRecord) -> Float {
        sample_uniform_sphere_pdf()
    }

    fn sample(&self, rec: &mut PhaseFunctionQueryRecord, u: &Vector2f) -> RGBSpectrum {
        rec.wo = sample_uniform_sphere(u);
        RGBSpectrum::one()
    }
}
