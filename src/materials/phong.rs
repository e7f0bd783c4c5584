// Copyright @yucwang 2026

use crate::core::bsdf::{BSDFQueryRecord, Measure, BSDF};
use crate::core::error::{RenderError, Result};
use crate::core::properties::{ensure_non_negative, ensure_non_negative_color, PropertyList};
use crate::core::sampler::Sampler;
use crate::math::constants::{Float, INV_PI, INV_TWO_PI};
use crate::math::frame::{reflect, Frame};
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{
    sample_cosine_hemisphere, sample_cosine_hemisphere_pdf, sample_phong_lobe, sample_phong_lobe_pdf,
};

/// Modified Phong reflectance: a Lambertian lobe plus a `cos^n` lobe
/// around the mirror direction.
///
/// Both lobes are importance sampled. The lobe is picked with probability
/// proportional to the luminance of its albedo, and `pdf` uses the same
/// mixture weights, so `sample`, `eval` and `pdf` always agree.
pub struct Phong {
    kd: RGBSpectrum,
    ks: RGBSpectrum,
    exponent: Float,
    specular_weight: Float,
}

impl Phong {
    pub fn new(kd: RGBSpectrum, ks: RGBSpectrum, exponent: Float) -> Result<Self> {
        let kd = ensure_non_negative_color("kd", kd)?;
        let ks = ensure_non_negative_color("ks", ks)?;
        let exponent = ensure_non_negative("n", exponent)?;
        if (kd + ks).max_component() > 1.0 {
            log::warn!("Phong: kd + ks exceeds one ({:?}), the material is not energy conserving.", kd + ks);
        }

        let diffuse = kd.luminance();
        let specular = ks.luminance();
        let specular_weight = if diffuse + specular > 0.0 {
            specular / (diffuse + specular)
        } else {
            0.0
        };
        Ok(Self { kd, ks, exponent, specular_weight })
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        let kd = props.get_color("kd", RGBSpectrum::splat(0.5))?;
        let ks = props.get_color("ks", RGBSpectrum::splat(0.5))?;
        let exponent = props.get_float("n", 20.0)?;
        Self::new(kd, ks, exponent).map_err(|err| match err {
            RenderError::InvalidParameter { name, reason } => {
                RenderError::InvalidParameter { name: format!("phong.{}", name), reason }
            }
            other => other,
        })
    }

    /// Probability of drawing from the specular lobe.
    pub fn specular_weight(&self) -> Float {
        self.specular_weight
    }

    fn cos_alpha(rec: &BSDFQueryRecord) -> Float {
        reflect(&rec.wi).dot(&rec.wo).max(0.0)
    }

    fn is_smooth_query(rec: &BSDFQueryRecord) -> bool {
        rec.measure == Measure::SolidAngle
            && Frame::cos_theta(&rec.wi) > 0.0
            && Frame::cos_theta(&rec.wo) > 0.0
    }
}

impl BSDF for Phong {
    fn eval(&self, rec: &BSDFQueryRecord) -> RGBSpectrum {
        if !Self::is_smooth_query(rec) {
            return RGBSpectrum::zero();
        }

        let specular = (self.exponent + 2.0) * INV_TWO_PI * Self::cos_alpha(rec).powf(self.exponent);
        self.kd * INV_PI + self.ks * specular
    }

    fn pdf(&self, rec: &BSDFQueryRecord) -> Float {
        if !Self::is_smooth_query(rec) {
            return 0.0;
        }

        let specular = sample_phong_lobe_pdf(Self::cos_alpha(rec), self.exponent);
        let diffuse = sample_cosine_hemisphere_pdf(Frame::cos_theta(&rec.wo));
        self.specular_weight * specular + (1.0 - self.specular_weight) * diffuse
    }

    fn sample(&self, rec: &mut BSDFQueryRecord, sampler: &mut dyn Sampler) -> RGBSpectrum {
        if Frame::cos_theta(&rec.wi) <= 0.0 {
            return RGBSpectrum::zero();
        }

        rec.measure = Measure::SolidAngle;
        rec.eta = 1.0;

        let use_specular = sampler.next_1d() < self.specular_weight;
        let u = sampler.next_2d();
        rec.wo = if use_specular {
            let lobe = Frame::from_normal(&reflect(&rec.wi));
            lobe.to_world(&sample_phong_lobe(&u, self.exponent))
        } else {
            sample_cosine_hemisphere(&u)
        };

        let cos_wo = Frame::cos_theta(&rec.wo);
        if cos_wo <= 0.0 {
            return RGBSpectrum::zero();
        }

        let pdf = self.pdf(rec);
        if pdf <= 0.0 {
            return RGBSpectrum::zero();
        }

        self.eval(rec) * (cos_wo / pdf)
    }
}
