// Copyright @yucwang 2023

use crate::core::bsdf::{BSDFQueryRecord, Measure, BSDF};
use crate::core::error::Result;
use crate::core::properties::{ensure_non_negative_color, PropertyList};
use crate::core::sampler::Sampler;
use crate::math::constants::{ Float, INV_PI };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{ sample_cosine_hemisphere, sample_cosine_hemisphere_pdf };

pub struct LambertianDiffuseBSDF {
    albedo: RGBSpectrum
}

impl LambertianDiffuseBSDF {
    pub fn new(albedo: RGBSpectrum) -> Result<Self> {
        Ok(Self { albedo: ensure_non_negative_color("albedo", albedo)? })
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        Self::new(props.get_color("albedo", RGBSpectrum::splat(0.5))?)
    }
}

impl BSDF for LambertianDiffuseBSDF {
    fn eval(&self, rec: &BSDFQueryRecord) -> RGBSpectrum {
        if rec.measure != Measure::SolidAngle
            || Frame::cos_theta(&rec.wi) <= 0.0
            || Frame::cos_theta(&rec.wo) <= 0.0 {
            return RGBSpectrum::zero();
        }

        self.albedo * INV_PI
    }

    fn pdf(&self, rec: &BSDFQueryRecord) -> Float {
        if rec.measure != Measure::SolidAngle || Frame::cos_theta(&rec.wi) <= 0.0 {
            return 0.0;
        }

        sample_cosine_hemisphere_pdf(Frame::cos_theta(&rec.wo))
    }

    fn sample(&self, rec: &mut BSDFQueryRecord, sampler: &mut dyn Sampler) -> RGBSpectrum {
        if Frame::cos_theta(&rec.wi) <= 0.0 {
            return RGBSpectrum::zero();
        }

        rec.measure = Measure::SolidAngle;
        rec.eta = 1.0;
        rec.wo = sample_cosine_hemisphere(&sampler.next_2d());
        if Frame::cos_theta(&rec.wo) <= 0.0 {
            return RGBSpectrum::zero();
        }

        // eval * cos / pdf, with the cosine cancelled out.
        self.albedo
    }
}
