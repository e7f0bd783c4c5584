// Copyright @yucwang 2026

use crate::core::error::{RenderError, Result};
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Radiance estimator driven by the renderer, one call per camera sample.
pub trait Integrator: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Validate the scene before any path is traced.
    fn preprocess(&self, _scene: &Scene) -> Result<()> {
        Ok(())
    }

    /// Estimate the radiance arriving along `ray`.
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> Result<RGBSpectrum>;

    /// Paths cut short by a numerical guard since construction.
    fn anomaly_count(&self) -> u64 {
        0
    }
}

/// Light sampling is meaningless without area emitters.
pub fn require_emitters(scene: &Scene) -> Result<()> {
    if scene.emitters().is_empty() {
        Err(RenderError::NoEmitters)
    } else {
        Ok(())
    }
}
