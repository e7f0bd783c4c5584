// Copyright @yucwang 2026

use crate::core::bsdf::BSDF;
use crate::core::emitter::Emitter;
use crate::core::error::Result;
use crate::core::interaction::SurfaceIntersection;
use crate::core::medium::{Medium, MediumSample};
use crate::core::sampler::Sampler;
use crate::core::shape::{SampledShape, Shape};
use crate::emitters::area::AreaEmitter;
use crate::math::aabb::AABB;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

pub struct SceneObject {
    shape: Arc<dyn Shape>,
    bsdf: Arc<dyn BSDF>,
    emitter: Option<Arc<AreaEmitter>>,
    bounds: AABB,
}

impl SceneObject {
    pub fn new(shape: Arc<dyn Shape>, bsdf: Arc<dyn BSDF>) -> Self {
        let bounds = shape.bounding_box();
        Self { shape, bsdf, emitter: None, bounds }
    }

    pub fn shape(&self) -> &dyn Shape {
        self.shape.as_ref()
    }

    pub fn bsdf(&self) -> &dyn BSDF {
        self.bsdf.as_ref()
    }

    pub fn emitter(&self) -> Option<&AreaEmitter> {
        self.emitter.as_deref()
    }
}

/// Read-only geometry, lights and medium shared by every render thread.
///
/// Traversal is a linear scan with a bounding box early-out per object.
pub struct Scene {
    objects: Vec<SceneObject>,
    emitters: Vec<Arc<AreaEmitter>>,
    environment: Option<Box<dyn Emitter>>,
    medium: Option<Arc<dyn Medium>>,
    bounds: AABB,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            emitters: Vec::new(),
            environment: None,
            medium: None,
            bounds: AABB::default(),
        }
    }

    pub fn add_object(&mut self, shape: Arc<dyn Shape>, bsdf: Arc<dyn BSDF>) {
        let object = SceneObject::new(shape, bsdf);
        self.bounds.expand_by_aabb(&object.bounds);
        self.objects.push(object);
    }

    /// Add a surface that also emits `radiance`. The emitter keeps its own
    /// typed handle on the shape for position sampling.
    pub fn add_emissive_object<S: SampledShape + 'static>(&mut self, shape: Arc<S>,
                                                          bsdf: Arc<dyn BSDF>,
                                                          radiance: RGBSpectrum) -> Result<()> {
        let emitter = Arc::new(AreaEmitter::new(shape.clone(), radiance)?);
        let mut object = SceneObject::new(shape, bsdf);
        object.emitter = Some(Arc::clone(&emitter));
        self.bounds.expand_by_aabb(&object.bounds);
        self.objects.push(object);
        self.emitters.push(emitter);
        Ok(())
    }

    pub fn set_environment(&mut self, environment: Box<dyn Emitter>) {
        self.environment = Some(environment);
    }

    pub fn set_medium(&mut self, medium: Arc<dyn Medium>) {
        self.medium = Some(medium);
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn emitters(&self) -> &[Arc<AreaEmitter>] {
        &self.emitters
    }

    pub fn environment(&self) -> Option<&dyn Emitter> {
        self.environment.as_deref()
    }

    pub fn medium(&self) -> Option<&dyn Medium> {
        self.medium.as_deref()
    }

    pub fn bounding_box(&self) -> AABB {
        self.bounds
    }

    /// Nearest hit along `ray`, with the material and emitter of the
    /// object that was hit attached.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection<'_>> {
        let mut segment = *ray;
        let mut nearest: Option<(SurfaceIntersection<'static>, &SceneObject)> = None;

        for object in self.objects.iter() {
            if !object.bounds.ray_intersect(&segment) {
                continue;
            }
            if let Some(its) = object.shape.ray_intersection(&segment) {
                segment = segment.with_segment(segment.min_t, its.t());
                nearest = Some((its, object));
            }
        }

        nearest.map(|(its, object)| its.with_surface(object.bsdf(), object.emitter()))
    }

    /// True when anything blocks the segment of `ray`.
    pub fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.objects.iter().any(|object| {
            object.bounds.ray_intersect(ray) && object.shape.ray_intersection_t(ray)
        })
    }

    /// Transmittance along the segment of `ray`; one without a medium.
    pub fn eval_transmittance(&self, ray: &Ray3f) -> RGBSpectrum {
        match &self.medium {
            Some(medium) => medium.eval_transmittance(ray),
            None => RGBSpectrum::one(),
        }
    }

    /// Free-flight sample along the segment of `ray`, `None` when the scene
    /// holds no medium.
    pub fn sample_distance(&self, ray: &Ray3f, sampler: &mut dyn Sampler) -> Option<MediumSample> {
        self.medium.as_ref().map(|medium| medium.sample_distance(ray, sampler))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sampler::IndependentSampler;
    use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
    use crate::math::constants::Vector3f;
    use crate::media::homogeneous_medium::HomogeneousMedium;
    use crate::shapes::rectangle::Rectangle;
    use crate::shapes::sphere::Sphere;

    fn grey() -> Arc<dyn BSDF> {
        Arc::new(LambertianDiffuseBSDF::new(RGBSpectrum::splat(0.5)).unwrap())
    }

    fn two_spheres() -> Scene {
        let mut scene = Scene::new();
        scene.add_object(Arc::new(Sphere::new(Vector3f::new(0.0, 0.0, 5.0), 1.0)), grey());
        scene.add_object(Arc::new(Sphere::new(Vector3f::new(0.0, 0.0, 10.0), 1.0)), grey());
        scene
    }

    #[test]
    fn test_scene_returns_nearest_hit() {
        let scene = two_spheres();
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let its = scene.ray_intersection(&ray).unwrap();
        assert!((its.t() - 4.0).abs() < 1e-4);
        assert!(its.bsdf().is_some());
        assert!(!its.is_emitter());

        let back = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), None, None);
        assert!(scene.ray_intersection(&back).is_none());
    }

    #[test]
    fn test_scene_shadow_query_respects_segment() {
        let scene = two_spheres();
        let short = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), Some(0.0), Some(3.5));
        assert!(!scene.ray_intersection_t(&short));
        let long = short.with_segment(0.0, 4.5);
        assert!(scene.ray_intersection_t(&long));
    }

    #[test]
    fn test_scene_tracks_emitters() {
        let mut scene = two_spheres();
        assert!(scene.emitters().is_empty());

        let light = Arc::new(Rectangle::new(Vector3f::new(0.0, 0.0, 2.0),
                                            Vector3f::new(0.0, 0.5, 0.0),
                                            Vector3f::new(0.5, 0.0, 0.0)));
        scene.add_emissive_object(light, grey(), RGBSpectrum::one()).unwrap();
        assert_eq!(scene.emitters().len(), 1);

        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let its = scene.ray_intersection(&ray).unwrap();
        assert!((its.t() - 2.0).abs() < 1e-4);
        assert!(its.is_emitter());
    }

    #[test]
    fn test_scene_transmittance_without_medium() {
        let mut scene = two_spheres();
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), Some(0.0), Some(2.0));
        assert_eq!(scene.eval_transmittance(&ray), RGBSpectrum::one());
        let mut sampler = IndependentSampler::new(1);
        assert!(scene.sample_distance(&ray, &mut sampler).is_none());

        scene.set_medium(Arc::new(HomogeneousMedium::new(RGBSpectrum::splat(0.5),
                                                         RGBSpectrum::splat(0.5)).unwrap()));
        let tr = scene.eval_transmittance(&ray);
        assert!((tr[0] - (-1.0f32).exp()).abs() < 1e-5);
        assert!(scene.sample_distance(&ray, &mut sampler).is_some());
    }
}
