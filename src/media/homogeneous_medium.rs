// Copyright @yucwang 2026

use crate::core::error::{RenderError, Result};
use crate::core::medium::{Medium, MediumSample, PhaseFunction};
use crate::core::properties::{ensure_non_negative_color, PropertyList};
use crate::core::sampler::Sampler;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use crate::media::isotropic::IsotropicPhase;

/// Medium with constant extinction and albedo filling the whole scene.
pub struct HomogeneousMedium {
    sigma_t: RGBSpectrum,
    albedo: RGBSpectrum,
    phase: IsotropicPhase,
}

impl HomogeneousMedium {
    pub fn new(sigma_t: RGBSpectrum, albedo: RGBSpectrum) -> Result<Self> {
        let sigma_t = ensure_non_negative_color("sigmaT", sigma_t)?;
        let albedo = ensure_non_negative_color("albedo", albedo)?;
        if albedo.max_component() > 1.0 {
            return Err(RenderError::invalid("albedo", "channels must not exceed 1"));
        }
        Ok(Self { sigma_t, albedo, phase: IsotropicPhase })
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        let sigma_t = props.get_color("sigmaT", RGBSpectrum::splat(1.0))?;
        let albedo = props.get_color("albedo", RGBSpectrum::splat(0.8))?;
        Self::new(sigma_t, albedo)
    }

    pub fn sigma_s(&self) -> RGBSpectrum {
        self.sigma_t * self.albedo
    }

    /// Per-channel `exp(-sigma_t * length)`; channels without extinction
    /// stay at one even for infinite lengths.
    fn transmittance(&self, length: Float) -> RGBSpectrum {
        self.sigma_t.map(|sigma| if sigma > 0.0 { (-sigma * length).exp() } else { 1.0 })
    }
}

impl Medium for HomogeneousMedium {
    fn eval_transmittance(&self, ray: &Ray3f) -> RGBSpectrum {
        self.transmittance(ray.max_t - ray.min_t)
    }

    fn sample_distance(&self, ray: &Ray3f, sampler: &mut dyn Sampler) -> MediumSample {
        let sigma_bar = self.sigma_t.average();
        if sigma_bar <= 0.0 {
            return MediumSample { scattered: false, t: ray.max_t, weight: RGBSpectrum::one() };
        }

        let distance = -(1.0 - sampler.next_1d()).ln() / sigma_bar;
        let length = ray.max_t - ray.min_t;
        if distance < length {
            let pdf = sigma_bar * (-sigma_bar * distance).exp();
            MediumSample {
                scattered: true,
                t: ray.min_t + distance,
                weight: self.sigma_s() * self.transmittance(distance) / pdf,
            }
        } else {
            let pdf = (-sigma_bar * length).exp();
            let weight = if pdf > 0.0 {
                self.transmittance(length) / pdf
            } else {
                RGBSpectrum::zero()
            };
            MediumSample { scattered: false, t: ray.max_t, weight }
        }
    }

    fn phase_function(&self) -> &dyn PhaseFunction {
        &self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sampler::IndependentSampler;
    use crate::math::constants::Vector3f;
    use approx::assert_abs_diff_eq;

    fn segment(length: Float) -> Ray3f {
        Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), Some(0.0), Some(length))
    }

    #[test]
    fn test_transmittance_is_beer_lambert() {
        let medium = HomogeneousMedium::new(RGBSpectrum::new(0.5, 1.0, 0.0), RGBSpectrum::splat(0.5)).unwrap();
        let tr = medium.eval_transmittance(&segment(2.0));
        assert_abs_diff_eq!(tr[0], (-1.0f32).exp(), epsilon = 1e-6);
        assert_abs_diff_eq!(tr[1], (-2.0f32).exp(), epsilon = 1e-6);
        assert_eq!(tr[2], 1.0);

        let unbounded = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), None, None);
        let tr = medium.eval_transmittance(&unbounded);
        assert_eq!(tr[0], 0.0);
        assert_eq!(tr[2], 1.0);
    }

    #[test]
    fn test_grey_medium_scatter_weight_is_albedo() {
        let medium = HomogeneousMedium::new(RGBSpectrum::splat(1.0), RGBSpectrum::splat(0.7)).unwrap();
        let mut sampler = IndependentSampler::new(3);
        let mut scattered = 0usize;
        let trials = 50_000;
        for _ in 0..trials {
            let sample = medium.sample_distance(&segment(1.0), &mut sampler);
            if sample.scattered {
                scattered += 1;
                assert!(sample.t >= 0.0 && sample.t < 1.0);
                assert_abs_diff_eq!(sample.weight[0], 0.7, epsilon = 1e-4);
            } else {
                assert_abs_diff_eq!(sample.weight[1], 1.0, epsilon = 1e-4);
            }
        }
        let fraction = scattered as Float / trials as Float;
        assert_abs_diff_eq!(fraction, 1.0 - (-1.0f32).exp(), epsilon = 0.01);
    }

    #[test]
    fn test_coloured_medium_pass_through_is_unbiased() {
        // E[weight * 1{not scattered}] must equal the transmittance.
        let medium = HomogeneousMedium::new(RGBSpectrum::new(0.2, 1.0, 1.8), RGBSpectrum::splat(1.0)).unwrap();
        let mut sampler = IndependentSampler::new(11);
        let trials = 200_000;
        let mut sum = RGBSpectrum::zero();
        for _ in 0..trials {
            let sample = medium.sample_distance(&segment(1.0), &mut sampler);
            if !sample.scattered {
                sum += sample.weight;
            }
        }
        let mean = sum / trials as Float;
        let expected = medium.eval_transmittance(&segment(1.0));
        for c in 0..3 {
            assert_abs_diff_eq!(mean[c], expected[c], epsilon = 0.01);
        }
    }

    #[test]
    fn test_medium_without_extinction_never_scatters() {
        let medium = HomogeneousMedium::new(RGBSpectrum::zero(), RGBSpectrum::splat(0.5)).unwrap();
        let mut sampler = IndependentSampler::new(0);
        let sample = medium.sample_distance(&segment(10.0), &mut sampler);
        assert!(!sample.scattered);
        assert_eq!(sample.weight, RGBSpectrum::one());
    }

    #[test]
    fn test_medium_rejects_albedo_above_one() {
        assert!(HomogeneousMedium::new(RGBSpectrum::one(), RGBSpectrum::splat(1.5)).is_err());
    }
}
