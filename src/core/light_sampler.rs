// Copyright @yucwang 2026

use crate::core::emitter::{Emitter, EmitterQueryRecord};
use crate::core::error::{RenderError, Result};
use crate::core::scene::Scene;
use crate::math::constants::{Float, Vector2f, EPSILON, ONE_MINUS_EPSILON, SHADOW_EPSILON};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Segment from `rec.reference` towards `rec.p`, pulled back slightly at
/// the emitter end so the emitter itself never counts as an occluder.
pub fn shadow_ray(rec: &EmitterQueryRecord) -> Ray3f {
    Ray3f::new(rec.reference, rec.d, Some(EPSILON), Some(rec.dist * (1.0 - SHADOW_EPSILON)))
}

/// Pick an emitter uniformly with `u.x` and hand back the coordinate
/// rescaled to `[0, 1)` so it can be reused for position sampling.
pub fn select_emitter(count: usize, u: &Vector2f) -> (usize, Vector2f) {
    let scaled = u.x * count as Float;
    let index = (scaled as usize).min(count - 1);
    let reused = (scaled - index as Float).max(0.0).min(ONE_MINUS_EPSILON);
    (index, Vector2f::new(reused, u.y))
}

/// Draw one point on one area emitter for `rec.reference`.
///
/// Returns `Le * cos_e / dist^2` divided by the joint selection and area
/// density, with visibility already resolved, and leaves the solid angle
/// density of the sample in `rec.pdf`. Back-facing and occluded samples
/// yield zero. A scene without area emitters is a configuration error.
pub fn sample_lights(scene: &Scene, rec: &mut EmitterQueryRecord, u: &Vector2f) -> Result<RGBSpectrum> {
    let emitters = scene.emitters();
    if emitters.is_empty() {
        return Err(RenderError::NoEmitters);
    }

    let count = emitters.len();
    let (index, reused) = select_emitter(count, u);
    let emitter = &emitters[index];
    let shape = emitter.shape();

    let position = shape.sample_position(&reused);
    rec.set_point(position.p, position.n);
    rec.pdf = 0.0;

    let cos_emitter = rec.cos_emitter();
    let pdf_area = shape.pdf_position();
    if cos_emitter <= 0.0 || rec.dist <= 0.0 || pdf_area <= 0.0 {
        return Ok(RGBSpectrum::zero());
    }
    rec.pdf = emitter.pdf_solid_angle(rec) / count as Float;

    if scene.ray_intersection_t(&shadow_ray(rec)) {
        return Ok(RGBSpectrum::zero());
    }

    let geometry = cos_emitter / (rec.dist * rec.dist);
    Ok(emitter.eval(rec) * (geometry * count as Float / pdf_area))
}
