// Copyright @yucwang 2023

use crate::core::interaction::SurfaceIntersection;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::ray::Ray3f;

/// Point drawn on a surface together with its outward normal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PositionSample {
    pub p: Vector3f,
    pub n: Vector3f,
}

pub trait Shape: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
    fn bounding_box(&self) -> AABB;
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection<'static>>;
    /// Any-hit test used by shadow rays.
    fn ray_intersection_t(&self, ray: &Ray3f) -> bool;
    fn surface_area(&self) -> Float;
}

/// Shapes that can draw points uniformly by area.
///
/// Area emitters only accept this kind of shape, so the light sampler never
/// meets a surface it cannot sample.
pub trait SampledShape: Shape {
    fn sample_position(&self, u: &Vector2f) -> PositionSample;

    /// Area density of `sample_position`.
    fn pdf_position(&self) -> Float {
        let area = self.surface_area();
        if area > 0.0 { 1.0 / area } else { 0.0 }
    }
}
