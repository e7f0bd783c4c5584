// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f, FLOAT_MAX};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Query passed to emitters and filled in by the light sampler.
///
/// `d` is the unit direction from `reference` to `p`, and `pdf` the solid
/// angle density (as seen from `reference`) of having drawn `p`. A zero
/// density marks an unusable sample.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EmitterQueryRecord {
    pub reference: Vector3f,
    pub p: Vector3f,
    pub n: Vector3f,
    pub d: Vector3f,
    pub dist: Float,
    pub pdf: Float,
}

impl EmitterQueryRecord {
    /// Record awaiting a light sample drawn for `reference`.
    pub fn new(reference: Vector3f) -> Self {
        Self {
            reference,
            p: reference,
            n: Vector3f::zeros(),
            d: Vector3f::zeros(),
            dist: 0.0,
            pdf: 0.0,
        }
    }

    /// Record for a known point `p` with outward normal `n` on an emitter.
    pub fn between(reference: Vector3f, p: Vector3f, n: Vector3f) -> Self {
        let mut rec = Self::new(reference);
        rec.set_point(p, n);
        rec
    }

    /// Record for a ray that left the scene.
    pub fn from_ray(ray: &Ray3f) -> Self {
        Self {
            reference: ray.origin(),
            p: ray.origin(),
            n: Vector3f::zeros(),
            d: ray.dir(),
            dist: FLOAT_MAX,
            pdf: 0.0,
        }
    }

    pub fn set_point(&mut self, p: Vector3f, n: Vector3f) {
        let to_p = p - self.reference;
        let dist = to_p.norm();
        self.p = p;
        self.n = n;
        self.dist = dist;
        self.d = if dist > 0.0 { to_p / dist } else { Vector3f::zeros() };
    }

    /// Cosine between the emitter normal and the direction back to the reference.
    pub fn cos_emitter(&self) -> Float {
        -self.n.dot(&self.d)
    }
}

pub trait Emitter: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Radiance leaving the emitter towards `rec.reference`.
    fn eval(&self, rec: &EmitterQueryRecord) -> RGBSpectrum;
}
