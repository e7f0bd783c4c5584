// Copyright @yucwang 2026

use crate::core::bsdf::{BSDFQueryRecord, Measure, BSDF};
use crate::core::error::{RenderError, Result};
use crate::core::properties::PropertyList;
use crate::core::sampler::Sampler;
use crate::math::constants::{Float, Vector3f};
use crate::math::frame::{reflect, Frame};
use crate::math::spectrum::RGBSpectrum;

/// Unpolarized Fresnel reflectance at a smooth dielectric interface.
/// `cos_theta_i` is measured on the incident side and must be positive.
pub fn fresnel_dielectric(cos_theta_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let sin_theta_t = eta_i / eta_t * (1.0 - cos_theta_i * cos_theta_i).max(0.0).sqrt();
    if sin_theta_t >= 1.0 {
        return 1.0;
    }

    let cos_theta_t = (1.0 - sin_theta_t * sin_theta_t).max(0.0).sqrt();
    let rs = (eta_i * cos_theta_i - eta_t * cos_theta_t) / (eta_i * cos_theta_i + eta_t * cos_theta_t);
    let rp = (eta_t * cos_theta_i - eta_i * cos_theta_t) / (eta_t * cos_theta_i + eta_i * cos_theta_t);
    0.5 * (rs * rs + rp * rp)
}

/// Smooth glass-like interface between an exterior and an interior medium.
///
/// Reflection and refraction are chosen with the Fresnel reflectance as
/// probability. Refraction reports the relative index in `eta` and scales
/// radiance by `1 / eta^2`.
pub struct Dielectric {
    int_ior: Float,
    ext_ior: Float,
}

impl Dielectric {
    pub fn new(int_ior: Float, ext_ior: Float) -> Result<Self> {
        for (name, value) in [("intIOR", int_ior), ("extIOR", ext_ior)].iter() {
            if !(value.is_finite() && *value > 0.0) {
                return Err(RenderError::invalid(*name, format!("must be positive, got {}", value)));
            }
        }
        Ok(Self { int_ior, ext_ior })
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        let int_ior = props.get_float("intIOR", 1.5046)?;
        let ext_ior = props.get_float("extIOR", 1.000277)?;
        Self::new(int_ior, ext_ior)
    }
}

impl BSDF for Dielectric {
    fn eval(&self, _rec: &BSDFQueryRecord) -> RGBSpectrum {
        RGBSpectrum::zero()
    }

    fn pdf(&self, _rec: &BSDFQueryRecord) -> Float {
        0.0
    }

    fn sample(&self, rec: &mut BSDFQueryRecord, sampler: &mut dyn Sampler) -> RGBSpectrum {
        let cos_theta_i = Frame::cos_theta(&rec.wi);
        let entering = cos_theta_i > 0.0;
        let (eta_i, eta_t) = if entering {
            (self.ext_ior, self.int_ior)
        } else {
            (self.int_ior, self.ext_ior)
        };

        let reflectance = fresnel_dielectric(cos_theta_i.abs(), eta_i, eta_t);
        rec.measure = Measure::Discrete;

        if sampler.next_1d() < reflectance {
            rec.wo = reflect(&rec.wi);
            rec.eta = 1.0;
            return RGBSpectrum::one();
        }

        let ratio = eta_i / eta_t;
        let sin_theta_t2 = ratio * ratio * Frame::sin_theta2(&rec.wi);
        let cos_theta_t = (1.0 - sin_theta_t2).max(0.0).sqrt();
        rec.wo = Vector3f::new(
            -ratio * rec.wi.x,
            -ratio * rec.wi.y,
            if entering { -cos_theta_t } else { cos_theta_t },
        );
        rec.eta = eta_t / eta_i;

        RGBSpectrum::splat(ratio * ratio)
    }
}
