// Copyright @yucwang 2026

use crate::core::error::{RenderError, Result};
use crate::core::integrator::Integrator;
use crate::core::properties::PropertyList;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Grey-scale visualisation of the distance to the first hit.
///
/// Hits at `near` map to one, hits at `far` and beyond to `ambient`;
/// misses stay black.
pub struct DepthIntegrator {
    near: Float,
    far: Float,
    ambient: Float,
    gamma: Float,
}

impl DepthIntegrator {
    pub fn new(near: Float, far: Float, ambient: Float, gamma: Float) -> Result<Self> {
        if !(near >= 0.0 && near < far && far.is_finite()) {
            return Err(RenderError::invalid("near/far",
                format!("need 0 <= near < far, got near = {}, far = {}", near, far)));
        }
        if !(0.0..=1.0).contains(&ambient) {
            return Err(RenderError::invalid("ambient", format!("must lie in [0, 1], got {}", ambient)));
        }
        if !(gamma > 0.0 && gamma.is_finite()) {
            return Err(RenderError::invalid("gamma", format!("must be positive, got {}", gamma)));
        }
        Ok(Self { near, far, ambient, gamma })
    }

    /// Older scene files spell the floor intensity `ambiant`.
    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        let ambient = match props.find_float("ambient")? {
            Some(ambient) => ambient,
            None => props.get_float("ambiant", 0.1)?,
        };
        Self::new(props.get_float("near", 1e-4)?,
                  props.get_float("far", 1e2)?,
                  ambient,
                  props.get_float("gamma", 5.0)?)
    }

    pub fn shade(&self, t: Float) -> Float {
        let base = ((self.far - t) / (self.far - self.near)).max(0.0).min(1.0);
        self.ambient + (1.0 - self.ambient) * base.powf(self.gamma)
    }
}

impl Integrator for DepthIntegrator {
    fn li(&self, scene: &Scene, _sampler: &mut dyn Sampler, ray: &Ray3f) -> Result<RGBSpectrum> {
        Ok(match scene.ray_intersection(ray) {
            Some(its) => RGBSpectrum::splat(self.shade(its.t())),
            None => RGBSpectrum::zero(),
        })
    }
}
