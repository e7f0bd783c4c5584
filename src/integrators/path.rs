// Copyright @yucwang 2026

use crate::core::bsdf::{BSDFQueryRecord, Measure};
use crate::core::emitter::EmitterQueryRecord;
use crate::core::error::{RenderError, Result};
use crate::core::integrator::{require_emitters, Integrator};
use crate::core::medium::PhaseFunctionQueryRecord;
use crate::core::properties::PropertyList;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::integrators::direct::{emitted_radiance, estimate_direct, estimate_direct_medium};
use crate::math::constants::{Float, EPSILON};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use log::{debug, warn};
use std::convert::TryFrom;
use std::sync::atomic::{AtomicU64, Ordering};

/// Upper bound of the roulette survival probability.
const MAX_SURVIVAL: Float = 0.99;

/// Why a path stopped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PathTermination {
    Escaped,
    HitEmitter,
    ZeroWeight,
    Roulette,
    /// The running relative index left `[eta_min, eta_max]`.
    EtaAnomaly,
    MaxDepth,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PathRecord {
    pub radiance: RGBSpectrum,
    /// Surface or medium interactions visited.
    pub depth: u32,
    pub termination: PathTermination,
}

/// Everything one in-flight path carries from bounce to bounce.
struct PathState {
    ray: Ray3f,
    throughput: RGBSpectrum,
    radiance: RGBSpectrum,
    eta: Float,
    depth: u32,
    include_emitted: bool,
}

impl PathState {
    fn new(ray: Ray3f) -> Self {
        Self {
            ray,
            throughput: RGBSpectrum::one(),
            radiance: RGBSpectrum::zero(),
            eta: 1.0,
            depth: 0,
            include_emitted: true,
        }
    }

    fn finish(&self, termination: PathTermination) -> PathRecord {
        PathRecord { radiance: self.radiance, depth: self.depth, termination }
    }
}

enum Step {
    Continue,
    Terminate(PathTermination),
}

/// Survival decision of Russian roulette.
///
/// Returns the survival probability `q = min(max(throughput) * eta^2, 0.99)`
/// when the path survives the uniform draw `u`, `None` when it dies.
pub fn russian_roulette(throughput: &RGBSpectrum, eta: Float, u: Float) -> Option<Float> {
    let q = (throughput.max_component() * eta * eta).min(MAX_SURVIVAL);
    if q > 0.0 && u < q {
        Some(q)
    } else {
        None
    }
}

/// Unidirectional path tracer with next event estimation and Russian
/// roulette. Emission found by BSDF sampling only counts after delta
/// bounces, so no light is counted twice.
pub struct PathIntegrator {
    rr_depth: u32,
    max_depth: Option<u32>,
    eta_min: Float,
    eta_max: Float,
    anomalies: AtomicU64,
}

impl PathIntegrator {
    pub fn new(rr_depth: u32, max_depth: Option<u32>, eta_min: Float, eta_max: Float) -> Result<Self> {
        if !(eta_min > 0.0 && eta_min <= 1.0) {
            return Err(RenderError::invalid("etaMin", format!("must lie in (0, 1], got {}", eta_min)));
        }
        if !(eta_max >= 1.0 && eta_max.is_finite()) {
            return Err(RenderError::invalid("etaMax", format!("must be finite and at least 1, got {}", eta_max)));
        }
        if let Some(depth) = max_depth {
            if depth == 0 {
                return Err(RenderError::invalid("maxDepth", "must be at least 1"));
            }
            warn!("PathIntegrator: maxDepth = {} truncates paths and biases the estimate", depth);
        }

        Ok(Self { rr_depth, max_depth, eta_min, eta_max, anomalies: AtomicU64::new(0) })
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        let rr_depth = props.get_integer("rrDepth", 3)?;
        let rr_depth = u32::try_from(rr_depth).map_err(|_| {
            RenderError::invalid("rrDepth", format!("must lie in [0, {}], got {}", u32::MAX, rr_depth))
        })?;
        let max_depth = match props.find_integer("maxDepth")? {
            Some(depth) => match u32::try_from(depth) {
                Ok(depth) if depth >= 1 => Some(depth),
                _ => {
                    return Err(RenderError::invalid("maxDepth",
                        format!("must lie in [1, {}], got {}", u32::MAX, depth)));
                }
            },
            None => None,
        };
        let eta_min = props.get_float("etaMin", 0.5)?;
        let eta_max = props.get_float("etaMax", 2.0)?;
        Self::new(rr_depth, max_depth, eta_min, eta_max)
    }

    pub fn rr_depth(&self) -> u32 {
        self.rr_depth
    }

    pub fn max_depth(&self) -> Option<u32> {
        self.max_depth
    }

    /// Iterative estimator; the stack stays flat whatever the path length.
    pub fn trace(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> Result<PathRecord> {
        require_emitters(scene)?;

        let mut state = PathState::new(*ray);
        loop {
            if let Step::Terminate(reason) = self.bounce(scene, sampler, &mut state)? {
                return Ok(state.finish(reason));
            }
        }
    }

    /// Recursive form of `trace`, cut off after `max_recursion` bounces.
    /// Shares the bounce step and the sample order with `trace`, so both
    /// agree exactly for any path shorter than the bound.
    pub fn trace_recursive(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f,
                           max_recursion: u32) -> Result<PathRecord> {
        require_emitters(scene)?;

        let mut state = PathState::new(*ray);
        self.recurse(scene, sampler, &mut state, max_recursion)
    }

    fn recurse(&self, scene: &Scene, sampler: &mut dyn Sampler, state: &mut PathState,
               remaining: u32) -> Result<PathRecord> {
        match self.bounce(scene, sampler, state)? {
            Step::Terminate(reason) => Ok(state.finish(reason)),
            Step::Continue if remaining == 0 => Ok(state.finish(PathTermination::MaxDepth)),
            Step::Continue => self.recurse(scene, sampler, state, remaining - 1),
        }
    }

    /// One vertex of the path: medium or surface interaction, emission,
    /// light sample, continuation and roulette.
    fn bounce(&self, scene: &Scene, sampler: &mut dyn Sampler, state: &mut PathState) -> Result<Step> {
        let its = scene.ray_intersection(&state.ray);

        let segment_end = its.as_ref().map(|its| its.t()).unwrap_or(state.ray.max_t);
        let segment = state.ray.with_segment(state.ray.min_t, segment_end);
        if let Some(medium_sample) = scene.sample_distance(&segment, sampler) {
            state.throughput *= medium_sample.weight;
            if medium_sample.scattered {
                return self.scatter_in_medium(scene, sampler, state, medium_sample.t);
            }
            if state.throughput.is_black() {
                return Ok(Step::Terminate(PathTermination::ZeroWeight));
            }
        }

        let its = match its {
            Some(its) => its,
            None => {
                if state.depth == 0 {
                    if let Some(env) = scene.environment() {
                        let le = env.eval(&EmitterQueryRecord::from_ray(&state.ray));
                        state.radiance += state.throughput * le;
                    }
                }
                return Ok(Step::Terminate(PathTermination::Escaped));
            }
        };
        state.depth += 1;

        if its.is_emitter() {
            if state.include_emitted {
                state.radiance += state.throughput * emitted_radiance(&its, &state.ray);
            }
            return Ok(Step::Terminate(PathTermination::HitEmitter));
        }

        let bsdf = match its.bsdf() {
            Some(bsdf) => bsdf,
            None => return Ok(Step::Terminate(PathTermination::ZeroWeight)),
        };

        let wi = -state.ray.dir();
        let direct = estimate_direct(scene, &its, &wi, sampler)?;
        state.radiance += state.throughput * direct;

        let mut query = BSDFQueryRecord::new(its.to_local(&wi));
        let weight = bsdf.sample(&mut query, sampler);
        if weight.is_black() || !weight.is_valid() {
            return Ok(Step::Terminate(PathTermination::ZeroWeight));
        }

        state.throughput *= weight;
        state.eta *= query.eta;
        if state.eta < self.eta_min || state.eta > self.eta_max {
            self.anomalies.fetch_add(1, Ordering::Relaxed);
            debug!("path terminated at depth {}: eta product {} left [{}, {}]",
                   state.depth, state.eta, self.eta_min, self.eta_max);
            return Ok(Step::Terminate(PathTermination::EtaAnomaly));
        }

        state.include_emitted = query.measure == Measure::Discrete;
        state.ray = Ray3f::new(its.p(), its.to_world(&query.wo), Some(EPSILON), None);

        Ok(self.roulette(sampler, state))
    }

    fn scatter_in_medium(&self, scene: &Scene, sampler: &mut dyn Sampler, state: &mut PathState,
                         t: Float) -> Result<Step> {
        state.depth += 1;
        let phase = match scene.medium() {
            Some(medium) => medium.phase_function(),
            None => return Ok(Step::Terminate(PathTermination::ZeroWeight)),
        };

        let p = state.ray.at(t);
        let wi = -state.ray.dir();
        let direct = estimate_direct_medium(scene, &p, &wi, phase, sampler)?;
        state.radiance += state.throughput * direct;

        let mut query = PhaseFunctionQueryRecord::new(wi);
        let weight = phase.sample(&mut query, &sampler.next_2d());
        if weight.is_black() || state.throughput.is_black() {
            return Ok(Step::Terminate(PathTermination::ZeroWeight));
        }

        state.throughput *= weight;
        state.include_emitted = false;
        state.ray = Ray3f::new(p, query.wo, Some(0.0), None);

        Ok(self.roulette(sampler, state))
    }

    fn roulette(&self, sampler: &mut dyn Sampler, state: &mut PathState) -> Step {
        if let Some(max_depth) = self.max_depth {
            if state.depth >= max_depth {
                return Step::Terminate(PathTermination::MaxDepth);
            }
        }

        if state.depth > self.rr_depth {
            match russian_roulette(&state.throughput, state.eta, sampler.next_1d()) {
                Some(q) => state.throughput /= q,
                None => return Step::Terminate(PathTermination::Roulette),
            }
        }

        Step::Continue
    }
}

impl Integrator for PathIntegrator {
    fn preprocess(&self, scene: &Scene) -> Result<()> {
        require_emitters(scene)
    }

    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> Result<RGBSpectrum> {
        Ok(self.trace(scene, sampler, ray)?.radiance)
    }

    fn anomaly_count(&self) -> u64 {
        self.anomalies.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bsdf::BSDF;
    use crate::core::sampler::tests::SequenceSampler;
    use crate::core::sampler::IndependentSampler;
    use crate::integrators::direct::DirectIntegrator;
    use crate::emitters::constant::ConstantEnvironment;
    use crate::materials::dielectric::Dielectric;
    use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
    use crate::materials::mirror::Mirror;
    use crate::math::constants::{Vector3f, INV_PI};
    use crate::math::frame::Frame;
    use crate::media::homogeneous_medium::HomogeneousMedium;
    use crate::shapes::rectangle::Rectangle;
    use crate::shapes::sphere::Sphere;
    use approx::assert_abs_diff_eq;
    use std::sync::Arc;

    /// Lit like a white diffuser but never continues the path.
    struct Absorber;

    impl BSDF for Absorber {
        fn eval(&self, rec: &BSDFQueryRecord) -> RGBSpectrum {
            if rec.measure == Measure::SolidAngle
                && Frame::cos_theta(&rec.wi) > 0.0
                && Frame::cos_theta(&rec.wo) > 0.0 {
                RGBSpectrum::splat(INV_PI)
            } else {
                RGBSpectrum::zero()
            }
        }

        fn pdf(&self, _rec: &BSDFQueryRecord) -> Float {
            0.0
        }

        fn sample(&self, _rec: &mut BSDFQueryRecord, _sampler: &mut dyn Sampler) -> RGBSpectrum {
            RGBSpectrum::zero()
        }
    }

    fn diffuse(albedo: Float) -> Arc<dyn BSDF> {
        Arc::new(LambertianDiffuseBSDF::new(RGBSpectrum::splat(albedo)).unwrap())
    }

    fn integrator() -> PathIntegrator {
        PathIntegrator::new(3, None, 0.5, 2.0).unwrap()
    }

    fn down(from: Float) -> Ray3f {
        Ray3f::new(Vector3f::new(0.0, 0.0, from), Vector3f::new(0.0, 0.0, -1.0), None, None)
    }

    /// Floor at z = 0 facing up, unit light of radiance 4 at z = 10 facing down.
    fn floor_scene(floor: Arc<dyn BSDF>) -> Scene {
        let mut scene = Scene::new();
        scene.add_object(Arc::new(Rectangle::new(Vector3f::zeros(),
                                                 Vector3f::new(5.0, 0.0, 0.0),
                                                 Vector3f::new(0.0, 5.0, 0.0))), floor);
        let light = Arc::new(Rectangle::new(Vector3f::new(0.0, 0.0, 10.0),
                                            Vector3f::new(0.0, 0.5, 0.0),
                                            Vector3f::new(0.5, 0.0, 0.0)));
        scene.add_emissive_object(light, diffuse(0.0), RGBSpectrum::splat(4.0)).unwrap();
        scene
    }

    /// Open box of diffuse walls with a light in the ceiling.
    fn box_scene() -> Scene {
        let mut scene = Scene::new();
        let walls = [
            (Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0), Vector3f::new(0.0, 1.0, 0.0)),
            (Vector3f::new(0.0, 0.0, 2.0), Vector3f::new(0.0, 1.0, 0.0), Vector3f::new(1.0, 0.0, 0.0)),
            (Vector3f::new(-1.0, 0.0, 1.0), Vector3f::new(0.0, 1.0, 0.0), Vector3f::new(0.0, 0.0, 1.0)),
            (Vector3f::new(1.0, 0.0, 1.0), Vector3f::new(0.0, 0.0, 1.0), Vector3f::new(0.0, 1.0, 0.0)),
            (Vector3f::new(0.0, 1.0, 1.0), Vector3f::new(1.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, 1.0)),
        ];
        for (center, u, v) in walls.iter() {
            scene.add_object(Arc::new(Rectangle::new(*center, *u, *v)), diffuse(0.7));
        }
        let light = Arc::new(Rectangle::new(Vector3f::new(0.0, 0.0, 1.99),
                                            Vector3f::new(0.0, 0.25, 0.0),
                                            Vector3f::new(0.25, 0.0, 0.0)));
        scene.add_emissive_object(light, diffuse(0.0), RGBSpectrum::splat(10.0)).unwrap();
        scene
    }

    #[test]
    fn test_escaped_ray_is_black() {
        let scene = floor_scene(diffuse(0.5));
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 1.0), Vector3f::new(1.0, 0.0, 0.0), None, None);
        let mut sampler = IndependentSampler::new(0);
        let record = integrator().trace(&scene, &mut sampler, &ray).unwrap();
        assert_eq!(record.radiance, RGBSpectrum::zero());
        assert_eq!(record.termination, PathTermination::Escaped);
        assert_eq!(record.depth, 0);
    }

    #[test]
    fn test_primary_hit_on_emitter_returns_radiance() {
        let scene = floor_scene(diffuse(0.5));
        let ray = Ray3f::new(Vector3f::new(0.2, 0.1, 1.0), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let mut sampler = IndependentSampler::new(0);
        let record = integrator().trace(&scene, &mut sampler, &ray).unwrap();
        assert_eq!(record.radiance, RGBSpectrum::splat(4.0));
        assert_eq!(record.termination, PathTermination::HitEmitter);
        assert_eq!(record.depth, 1);
    }

    #[test]
    fn test_scene_without_emitters_is_rejected() {
        let mut scene = Scene::new();
        scene.add_object(Arc::new(Sphere::new(Vector3f::zeros(), 1.0)), diffuse(0.5));
        let path = integrator();
        assert!(matches!(path.preprocess(&scene), Err(RenderError::NoEmitters)));

        let mut sampler = IndependentSampler::new(0);
        assert!(matches!(path.li(&scene, &mut sampler, &down(5.0)), Err(RenderError::NoEmitters)));
    }

    #[test]
    fn test_zero_weight_keeps_only_direct_light() {
        let scene = floor_scene(Arc::new(Absorber));
        let path = integrator();
        for seed in 0..16 {
            let mut a = IndependentSampler::new(seed);
            let mut b = IndependentSampler::new(seed);
            let record = path.trace(&scene, &mut a, &down(1.0)).unwrap();
            let direct = DirectIntegrator.li(&scene, &mut b, &down(1.0)).unwrap();

            assert_eq!(record.termination, PathTermination::ZeroWeight);
            assert_eq!(record.depth, 1);
            assert_eq!(record.radiance, direct);
            assert!(!direct.is_black());
        }
    }

    #[test]
    fn test_mirror_counts_emitter_after_delta_bounce() {
        let scene = floor_scene(Arc::new(Mirror::new(RGBSpectrum::one()).unwrap()));
        let mut sampler = IndependentSampler::new(5);
        let record = integrator().trace(&scene, &mut sampler, &down(5.0)).unwrap();
        assert_eq!(record.termination, PathTermination::HitEmitter);
        assert_eq!(record.depth, 2);
        assert_eq!(record.radiance, RGBSpectrum::splat(4.0));
    }

    #[test]
    fn test_environment_is_seen_by_primary_ray_only() {
        let mut scene = floor_scene(Arc::new(Mirror::new(RGBSpectrum::one()).unwrap()));
        scene.set_environment(Box::new(ConstantEnvironment::new(RGBSpectrum::splat(3.0)).unwrap()));
        let path = integrator();
        let mut sampler = IndependentSampler::new(2);

        let up = Ray3f::new(Vector3f::new(3.0, 3.0, 1.0), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let record = path.trace(&scene, &mut sampler, &up).unwrap();
        assert_eq!(record.termination, PathTermination::Escaped);
        assert_eq!(record.depth, 0);
        assert_eq!(record.radiance, RGBSpectrum::splat(3.0));

        // The mirror reflects the ray past the light into the environment.
        let mirrored = Ray3f::new(Vector3f::new(3.0, 3.0, 5.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let record = path.trace(&scene, &mut sampler, &mirrored).unwrap();
        assert_eq!(record.termination, PathTermination::Escaped);
        assert_eq!(record.depth, 1);
        assert_eq!(record.radiance, RGBSpectrum::zero());

        let recursive = path.trace_recursive(&scene, &mut sampler, &mirrored, 64).unwrap();
        assert_eq!(recursive.radiance, RGBSpectrum::zero());
    }

    #[test]
    fn test_diffuse_bounce_does_not_count_emitter_twice() {
        // A diffuse floor seen from below the light: direct light only
        // arrives through the light sample.
        let scene = floor_scene(diffuse(1.0));
        let path = integrator();
        let mut sampler = IndependentSampler::new(9);
        let n = 20_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            sum += path.li(&scene, &mut sampler, &down(1.0)).unwrap()[0] as f64;
        }
        let expected = 4.0 * 0.0099668 * INV_PI as f64;
        assert_abs_diff_eq!(sum / n as f64, expected, epsilon = 0.02 * expected);
    }

    #[test]
    fn test_iterative_and_recursive_agree() {
        let scene = box_scene();
        let path = integrator();
        let ray = Ray3f::new(Vector3f::new(0.0, -0.9, 1.0), Vector3f::new(0.1, 1.0, -0.3), None, None);
        for seed in 0..64 {
            let mut a = IndependentSampler::new(seed);
            let mut b = IndependentSampler::new(seed);
            let iterative = path.trace(&scene, &mut a, &ray).unwrap();
            let recursive = path.trace_recursive(&scene, &mut b, &ray, 10_000).unwrap();
            assert_eq!(iterative, recursive);
        }
    }

    #[test]
    fn test_box_scene_radiance_is_finite_and_positive() {
        let scene = box_scene();
        let path = integrator();
        let ray = Ray3f::new(Vector3f::new(0.0, -0.9, 1.0), Vector3f::new(0.0, 1.0, -0.5), None, None);
        let mut sampler = IndependentSampler::new(1);
        let mut sum = RGBSpectrum::zero();
        let mut deepest = 0;
        for _ in 0..2_000 {
            let record = path.trace(&scene, &mut sampler, &ray).unwrap();
            assert!(record.radiance.is_valid());
            deepest = deepest.max(record.depth);
            sum += record.radiance;
        }
        assert!(sum[0] > 0.0);
        assert!(deepest > path.rr_depth());
    }

    #[test]
    fn test_russian_roulette_is_unbiased() {
        let throughput = RGBSpectrum::splat(0.3);
        let mut sampler = IndependentSampler::new(17);
        let n = 20_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            if let Some(q) = russian_roulette(&throughput, 1.0, sampler.next_1d()) {
                sum += (1.0 / q) as f64;
            }
        }
        assert_abs_diff_eq!(sum / n as f64, 1.0, epsilon = 0.05);
    }

    #[test]
    fn test_russian_roulette_survival_is_capped() {
        let bright = RGBSpectrum::splat(5.0);
        assert_eq!(russian_roulette(&bright, 1.0, 0.5), Some(MAX_SURVIVAL));
        assert_eq!(russian_roulette(&bright, 1.0, 0.995), None);
        assert_eq!(russian_roulette(&RGBSpectrum::zero(), 1.0, 0.0), None);
        // eta^2 scales the survival probability
        let q = russian_roulette(&RGBSpectrum::splat(0.2), 1.5, 0.0).unwrap();
        assert_abs_diff_eq!(q, 0.45, epsilon = 1e-6);
    }

    #[test]
    fn test_eta_drift_terminates_path() {
        let mut scene = floor_scene(diffuse(0.5));
        scene.add_object(Arc::new(Sphere::new(Vector3f::new(0.0, 0.0, 3.0), 1.0)),
                         Arc::new(Dielectric::new(2.5, 1.0).unwrap()));
        let path = integrator();
        let mut sampler = SequenceSampler::new(vec![0.99]);
        let record = path.trace(&scene, &mut sampler, &down(6.0)).unwrap();

        assert_eq!(record.termination, PathTermination::EtaAnomaly);
        assert_eq!(record.depth, 1);
        assert!(record.radiance.is_valid());
        assert_eq!(path.anomaly_count(), 1);
    }

    #[test]
    fn test_glass_within_bounds_keeps_tracing() {
        let mut scene = floor_scene(diffuse(0.5));
        scene.add_object(Arc::new(Sphere::new(Vector3f::new(0.0, 0.0, 3.0), 1.0)),
                         Arc::new(Dielectric::new(1.5, 1.0).unwrap()));
        let path = integrator();
        let mut sampler = SequenceSampler::new(vec![0.99]);
        let record = path.trace(&scene, &mut sampler, &down(6.0)).unwrap();
        assert_ne!(record.termination, PathTermination::EtaAnomaly);
        assert!(record.depth > 1);
        assert_eq!(path.anomaly_count(), 0);
    }

    #[test]
    fn test_absorbing_medium_attenuates_emitter() {
        let mut scene = floor_scene(diffuse(0.5));
        scene.set_medium(Arc::new(HomogeneousMedium::new(RGBSpectrum::splat(0.125),
                                                         RGBSpectrum::zero()).unwrap()));
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 2.0), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let path = integrator();
        let mut sampler = IndependentSampler::new(23);
        let n = 20_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            sum += path.li(&scene, &mut sampler, &ray).unwrap()[0] as f64;
        }
        // Light of radiance 4 behind 8 units of absorber.
        assert_abs_diff_eq!(sum / n as f64, 4.0 * (-1.0f64).exp(), epsilon = 0.06);
    }

    #[test]
    fn test_max_depth_limits_bounces() {
        let scene = box_scene();
        let path = PathIntegrator::new(3, Some(2), 0.5, 2.0).unwrap();
        let ray = Ray3f::new(Vector3f::new(0.0, -0.9, 1.0), Vector3f::new(0.0, 1.0, -0.5), None, None);
        let mut sampler = IndependentSampler::new(4);
        for _ in 0..200 {
            assert!(path.trace(&scene, &mut sampler, &ray).unwrap().depth <= 2);
        }
    }

    #[test]
    fn test_path_properties_are_validated() {
        let defaults = PathIntegrator::from_properties(&PropertyList::new()).unwrap();
        assert_eq!(defaults.rr_depth(), 3);
        assert_eq!(defaults.max_depth(), None);

        let zero_depth = PropertyList::new().with_integer("maxDepth", 0);
        assert!(PathIntegrator::from_properties(&zero_depth).is_err());
        let bad_eta = PropertyList::new().with_float("etaMin", 0.0);
        assert!(PathIntegrator::from_properties(&bad_eta).is_err());
        let negative_rr = PropertyList::new().with_integer("rrDepth", -1);
        assert!(PathIntegrator::from_properties(&negative_rr).is_err());

        let huge = u32::MAX as i64 + 1;
        for name in ["rrDepth", "maxDepth"].iter() {
            let props = PropertyList::new().with_integer(name, huge);
            match PathIntegrator::from_properties(&props) {
                Err(RenderError::InvalidParameter { name: param, .. }) => assert_eq!(param, *name),
                other => panic!("{} = {} gave {:?}", name, huge, other.err()),
            }
        }
        let deep = PropertyList::new().with_integer("maxDepth", 64);
        assert_eq!(PathIntegrator::from_properties(&deep).unwrap().max_depth(), Some(64));
    }
}
