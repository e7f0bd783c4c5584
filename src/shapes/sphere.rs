// Copyright @yucwang 2026

use crate::core::error::{RenderError, Result};
use crate::core::interaction::SurfaceIntersection;
use crate::core::properties::PropertyList;
use crate::core::shape::{PositionSample, SampledShape, Shape};
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector2f, Vector3f, INV_PI, INV_TWO_PI, PI};
use crate::math::ray::Ray3f;
use crate::math::warp::sample_uniform_sphere;

pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        let center = props.get_point("center", Vector3f::zeros())?;
        let radius = props.get_float("radius", 1.0)?;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(RenderError::invalid("radius", format!("must be positive, got {}", radius)));
        }
        Ok(Self::new(center, radius))
    }

    /// Nearest root of the ray/sphere quadratic inside the ray segment.
    fn intersect_t(&self, ray: &Ray3f) -> Option<Float> {
        let oc = ray.origin() - self.center;
        let half_b = oc.dot(&ray.dir());
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t0 = -half_b - sqrt_d;
        let t1 = -half_b + sqrt_d;
        if ray.test_segment(t0) {
            Some(t0)
        } else if ray.test_segment(t1) {
            Some(t1)
        } else {
            None
        }
    }
}

impl Shape for Sphere {
    fn bounding_box(&self) -> AABB {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        AABB::new(self.center - r, self.center + r)
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection<'static>> {
        let t = self.intersect_t(ray)?;
        let p = ray.at(t);
        let n = (p - self.center) / self.radius;
        let mut phi = n.y.atan2(n.x);
        if phi < 0.0 {
            phi += 2.0 * PI;
        }
        let uv = Vector2f::new(phi * INV_TWO_PI, n.z.max(-1.0).min(1.0).acos() * INV_PI);
        Some(SurfaceIntersection::new(p, n, n, uv, t))
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.intersect_t(ray).is_some()
    }

    fn surface_area(&self) -> Float {
        4.0 * PI * self.radius * self.radius
    }
}

impl SampledShape for Sphere {
    fn sample_position(&self, u: &Vector2f) -> PositionSample {
        let n = sample_uniform_sphere(u);
        PositionSample { p: self.center + n * self.radius, n }
    }
}
