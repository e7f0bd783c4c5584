// Copyright @yucwang 2026

pub mod dielectric;
pub mod lambertian_diffuse;
pub mod mirror;
pub mod phong;

use crate::core::bsdf::BSDF;
use crate::core::error::{RenderError, Result};
use crate::core::properties::PropertyList;
use std::sync::Arc;

/// Build a BSDF from its scene file name.
pub fn create_bsdf(kind: &str, props: &PropertyList) -> Result<Arc<dyn BSDF>> {
    match kind {
        "phong" => Ok(Arc::new(phong::Phong::from_properties(props)?)),
        "diffuse" => Ok(Arc::new(lambertian_diffuse::LambertianDiffuseBSDF::from_properties(props)?)),
        "mirror" => Ok(Arc::new(mirror::Mirror::from_properties(props)?)),
        "dielectric" => Ok(Arc::new(dielectric::Dielectric::from_properties(props)?)),
        other => Err(RenderError::SceneParse(format!("unknown bsdf type '{}'", other))),
    }
}
