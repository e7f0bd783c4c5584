// Copyright @yucwang 2026

use crate::core::emitter::{Emitter, EmitterQueryRecord};
use crate::core::error::Result;
use crate::core::properties::{ensure_non_negative_color, PropertyList};
use crate::math::spectrum::RGBSpectrum;

/// Environment emitter with the same radiance in every direction.
pub struct ConstantEnvironment {
    radiance: RGBSpectrum,
}

impl ConstantEnvironment {
    pub fn new(radiance: RGBSpectrum) -> Result<Self> {
        Ok(Self { radiance: ensure_non_negative_color("radiance", radiance)? })
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        Self::new(props.require_color("radiance")?)
    }
}

impl Emitter for ConstantEnvironment {
    fn eval(&self, _rec: &EmitterQueryRecord) -> RGBSpectrum {
        self.radiance
    }
}
