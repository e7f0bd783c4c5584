// Copyright @yucwang 2026

use crate::core::bsdf::{BSDFQueryRecord, Measure};
use crate::core::emitter::{Emitter, EmitterQueryRecord};
use crate::core::error::Result;
use crate::core::integrator::{require_emitters, Integrator};
use crate::core::interaction::SurfaceIntersection;
use crate::core::light_sampler::{sample_lights, shadow_ray};
use crate::core::medium::{PhaseFunction, PhaseFunctionQueryRecord};
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::constants::Vector3f;
use crate::math::frame::Frame;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// One light sample at a surface hit, weighted by the BSDF, the cosine at
/// the surface and the transmittance of the shadow segment.
///
/// `wi` is the world space direction back towards the previous vertex.
/// Always consumes exactly one 2D sample, even for delta BSDFs.
pub fn estimate_direct(scene: &Scene, its: &SurfaceIntersection, wi: &Vector3f,
                       sampler: &mut dyn Sampler) -> Result<RGBSpectrum> {
    let mut rec = EmitterQueryRecord::new(its.p());
    let light = sample_lights(scene, &mut rec, &sampler.next_2d())?;
    let bsdf = match its.bsdf() {
        Some(bsdf) => bsdf,
        None => return Ok(RGBSpectrum::zero()),
    };
    if light.is_black() {
        return Ok(RGBSpectrum::zero());
    }

    let query = BSDFQueryRecord::with_directions(its.to_local(wi), its.to_local(&rec.d), Measure::SolidAngle);
    let f = bsdf.eval(&query);
    if f.is_black() {
        return Ok(RGBSpectrum::zero());
    }

    let cos_theta = Frame::cos_theta(&query.wo).abs();
    Ok(light * f * cos_theta * scene.eval_transmittance(&shadow_ray(&rec)))
}

/// Light sample at a scattering event inside a medium.
pub fn estimate_direct_medium(scene: &Scene, p: &Vector3f, wi: &Vector3f, phase: &dyn PhaseFunction,
                              sampler: &mut dyn Sampler) -> Result<RGBSpectrum> {
    let mut rec = EmitterQueryRecord::new(*p);
    let light = sample_lights(scene, &mut rec, &sampler.next_2d())?;
    if light.is_black() {
        return Ok(RGBSpectrum::zero());
    }

    let query = PhaseFunctionQueryRecord::with_directions(*wi, rec.d);
    Ok(light * phase.eval(&query) * scene.eval_transmittance(&shadow_ray(&rec)))
}

/// Radiance arriving along `ray` from an emitter it hits directly.
pub fn emitted_radiance(its: &SurfaceIntersection, ray: &Ray3f) -> RGBSpectrum {
    match its.emitter() {
        Some(emitter) => {
            emitter.eval(&EmitterQueryRecord::between(ray.origin(), its.p(), its.geo_normal()))
        }
        None => RGBSpectrum::zero(),
    }
}

/// Emission seen at the first hit plus a single light sample.
pub struct DirectIntegrator;

impl DirectIntegrator {
    pub fn new() -> Self {
        DirectIntegrator
    }
}

impl Default for DirectIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrator for DirectIntegrator {
    fn preprocess(&self, scene: &Scene) -> Result<()> {
        require_emitters(scene)
    }

    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> Result<RGBSpectrum> {
        require_emitters(scene)?;

        let its = match scene.ray_intersection(ray) {
            Some(its) => its,
            None => {
                return Ok(scene.environment()
                    .map(|env| env.eval(&EmitterQueryRecord::from_ray(ray)))
                    .unwrap_or_else(RGBSpectrum::zero));
            }
        };

        if its.is_emitter() {
            return Ok(emitted_radiance(&its, ray));
        }

        estimate_direct(scene, &its, &-ray.dir(), sampler)
    }
}
