// Copyright @yucwang 2026

use crate::core::error::{RenderError, Result};
use crate::core::interaction::SurfaceIntersection;
use crate::core::properties::PropertyList;
use crate::core::shape::{PositionSample, SampledShape, Shape};
use crate::math::aabb::AABB;
use crate::math::constants::{EPSILON, Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::warp::square_to_centered_square;

/// Parallelogram `center + a * half_u + b * half_v` with `a, b` in `[-1, 1]`.
///
/// The normal is `half_u x half_v`; intersections are reported from both
/// sides.
pub struct Rectangle {
    center: Vector3f,
    half_u: Vector3f,
    half_v: Vector3f,
    cross: Vector3f,
    normal: Vector3f,
    area: Float,
}

impl Rectangle {
    pub fn new(center: Vector3f, half_u: Vector3f, half_v: Vector3f) -> Self {
        let cross = half_u.cross(&half_v);
        let len = cross.norm();
        let normal = if len > 0.0 { cross / len } else { Vector3f::zeros() };
        Self { center, half_u, half_v, cross, normal, area: 4.0 * len }
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        let center = props.get_point("center", Vector3f::zeros())?;
        let half_u = props.get_vector("u", Vector3f::new(1.0, 0.0, 0.0))?;
        let half_v = props.get_vector("v", Vector3f::new(0.0, 1.0, 0.0))?;
        let rect = Self::new(center, half_u, half_v);
        if rect.area <= 0.0 {
            return Err(RenderError::invalid("u", "edge vectors of a rectangle must not be parallel"));
        }
        Ok(rect)
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    fn intersect_local(&self, ray: &Ray3f) -> Option<(Float, Float, Float)> {
        let denom = ray.dir().dot(&self.cross);
        if denom.abs() < 1e-12 {
            return None;
        }

        let t = (self.center - ray.origin()).dot(&self.cross) / denom;
        if !ray.test_segment(t) {
            return None;
        }

        let q = ray.at(t) - self.center;
        let inv_len2 = 1.0 / self.cross.norm_squared();
        let a = q.cross(&self.half_v).dot(&self.cross) * inv_len2;
        let b = self.half_u.cross(&q).dot(&self.cross) * inv_len2;
        if a.abs() > 1.0 || b.abs() > 1.0 {
            return None;
        }
        Some((t, a, b))
    }
}

impl Shape for Rectangle {
    fn bounding_box(&self) -> AABB {
        let mut bbox = AABB::default();
        let corners: [(Float, Float); 4] = [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)];
        for (a, b) in corners.iter() {
            let p = self.center + self.half_u * *a + self.half_v * *b;
            bbox.expand_by_point(&p);
        }
        bbox.dilate(EPSILON)
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection<'static>> {
        let (t, a, b) = self.intersect_local(ray)?;
        let uv = Vector2f::new(0.5 * (a + 1.0), 0.5 * (b + 1.0));
        Some(SurfaceIntersection::new(ray.at(t), self.normal, self.normal, uv, t))
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.intersect_local(ray).is_some()
    }

    fn surface_area(&self) -> Float {
        self.area
    }
}

impl SampledShape for Rectangle {
    fn sample_position(&self, u: &Vector2f) -> PositionSample {
        let ab = square_to_centered_square(u);
        PositionSample {
            p: self.center + self.half_u * ab.x + self.half_v * ab.y,
            n: self.normal,
        }
    }
}
