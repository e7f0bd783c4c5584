// Copyright @yucwang 2026

pub mod depth;
pub mod direct;
pub mod path;

use crate::core::error::{RenderError, Result};
use crate::core::integrator::Integrator;
use crate::core::properties::PropertyList;

/// Build an integrator from its scene file name.
pub fn create_integrator(kind: &str, props: &PropertyList) -> Result<Box<dyn Integrator>> {
    match kind {
        "path" | "path_mats" => Ok(Box::new(path::PathIntegrator::from_properties(props)?)),
        "direct" | "light" => Ok(Box::new(direct::DirectIntegrator::new())),
        "depth" => Ok(Box::new(depth::DepthIntegrator::from_properties(props)?)),
        other => Err(RenderError::SceneParse(format!("unknown integrator type '{}'", other))),
    }
}
