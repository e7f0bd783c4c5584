// Copyright @yucwang 2026

use crate::core::bsdf::{BSDFQueryRecord, Measure, BSDF};
use crate::core::error::Result;
use crate::core::properties::{ensure_non_negative_color, PropertyList};
use crate::core::sampler::Sampler;
use crate::math::constants::Float;
use crate::math::frame::{reflect, Frame};
use crate::math::spectrum::RGBSpectrum;

/// Perfectly specular reflector.
pub struct Mirror {
    reflectance: RGBSpectrum,
}

impl Mirror {
    pub fn new(reflectance: RGBSpectrum) -> Result<Self> {
        Ok(Self { reflectance: ensure_non_negative_color("reflectance", reflectance)? })
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        Self::new(props.get_color("reflectance", RGBSpectrum::one())?)
    }
}

impl BSDF for Mirror {
    fn eval(&self, _rec: &BSDFQueryRecord) -> RGBSpectrum {
        RGBSpectrum::zero()
    }

    fn pdf(&self, _rec: &BSDFQueryRecord) -> Float {
        0.0
    }

    fn sample(&self, rec: &mut BSDFQueryRecord, _sampler: &mut dyn Sampler) -> RGBSpectrum {
        if Frame::cos_theta(&rec.wi) <= 0.0 {
            return RGBSpectrum::zero();
        }

        rec.wo = reflect(&rec.wi);
        rec.measure = Measure::Discrete;
        rec.eta = 1.0;
        self.reflectance
    }
}
