// Copyright @yucwang 2026

use crate::core::emitter::{Emitter, EmitterQueryRecord};
use crate::core::error::{RenderError, Result};
use crate::core::properties::{ensure_non_negative_color, PropertyList};
use crate::core::shape::SampledShape;
use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

/// Diffuse emitter covering one surface.
///
/// The owning surface is stored as a `SampledShape`, so position sampling is
/// always available to the light sampler.
pub struct AreaEmitter {
    shape: Arc<dyn SampledShape>,
    radiance: RGBSpectrum,
}

impl AreaEmitter {
    pub fn new(shape: Arc<dyn SampledShape>, radiance: RGBSpectrum) -> Result<Self> {
        let area = shape.surface_area();
        if !(area.is_finite() && area > 0.0) {
            return Err(RenderError::UnsupportedEmitterSurface(
                format!("{} has surface area {}", shape.name(), area)));
        }
        let radiance = ensure_non_negative_color("radiance", radiance)?;
        Ok(Self { shape, radiance })
    }

    pub fn from_properties(shape: Arc<dyn SampledShape>, props: &PropertyList) -> Result<Self> {
        Self::new(shape, props.require_color("radiance")?)
    }

    /// The surface this emitter is attached to.
    pub fn shape(&self) -> &dyn SampledShape {
        self.shape.as_ref()
    }

    pub fn radiance(&self) -> RGBSpectrum {
        self.radiance
    }

    /// Convert the area density of `rec.p` into a solid angle density at
    /// `rec.reference`. Zero when the point faces away.
    pub fn pdf_solid_angle(&self, rec: &EmitterQueryRecord) -> Float {
        let cos_emitter = rec.cos_emitter();
        if cos_emitter <= 0.0 {
            return 0.0;
        }
        self.shape.pdf_position() * rec.dist * rec.dist / cos_emitter
    }
}

impl Emitter for AreaEmitter {
    fn eval(&self, rec: &EmitterQueryRecord) -> RGBSpectrum {
        if rec.cos_emitter() > 0.0 {
            self.radiance
        } else {
            RGBSpectrum::zero()
        }
    }
}
