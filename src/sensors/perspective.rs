// Copyright @yucwang 2026

use crate::core::error::{RenderError, Result};
use crate::core::properties::PropertyList;
use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector2f, Vector3f, FLOAT_MAX};
use crate::math::ray::Ray3f;

pub struct PerspectiveCamera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    tan_half_fov_y: Float,
    aspect: Float,
    near_clip: Float,
    far_clip: Float,
    width: usize,
    height: usize,
}

impl PerspectiveCamera {
    pub fn new(origin: Vector3f,
               target: Vector3f,
               up: Vector3f,
               fov_y_radians: Float,
               width: usize,
               height: usize,
               near_clip: Float,
               far_clip: Float) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::invalid("width/height", "resolution must be non-zero"));
        }
        if !(fov_y_radians > 0.0 && fov_y_radians < std::f32::consts::PI) {
            return Err(RenderError::invalid("fov", format!("must lie in (0, 180) degrees, got {}",
                                                           fov_y_radians.to_degrees())));
        }
        if !(near_clip >= 0.0 && near_clip < far_clip) {
            return Err(RenderError::invalid("nearClip/farClip", "need 0 <= nearClip < farClip"));
        }

        let forward = (target - origin).normalize();
        let right = forward.cross(&up).normalize();
        if !(forward.iter().all(|v| v.is_finite()) && right.iter().all(|v| v.is_finite())) {
            return Err(RenderError::invalid("target/up", "view direction is degenerate"));
        }
        let up = right.cross(&forward).normalize();

        Ok(Self {
            origin,
            forward,
            right,
            up,
            tan_half_fov_y: (0.5 * fov_y_radians).tan(),
            aspect: width as Float / height as Float,
            near_clip,
            far_clip,
            width,
            height,
        })
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        let width = props.get_integer("width", 768)?;
        let height = props.get_integer("height", 576)?;
        if width <= 0 || height <= 0 {
            return Err(RenderError::invalid("width/height", "resolution must be positive"));
        }

        Self::new(props.get_point("origin", Vector3f::zeros())?,
                  props.get_point("target", Vector3f::new(0.0, 0.0, -1.0))?,
                  props.get_vector("up", Vector3f::new(0.0, 1.0, 0.0))?,
                  props.get_float("fov", 30.0)?.to_radians(),
                  width as usize,
                  height as usize,
                  props.get_float("nearClip", 1e-4)?,
                  props.get_float("farClip", FLOAT_MAX)?)
    }
}

impl Sensor for PerspectiveCamera {
    fn sample_ray(&self, u: &Vector2f) -> Ray3f {
        let px = (2.0 * u.x - 1.0) * self.aspect * self.tan_half_fov_y;
        let py = (1.0 - 2.0 * u.y) * self.tan_half_fov_y;

        let d_camera = Vector3f::new(px, py, 1.0).normalize();
        let dir = (self.right * d_camera.x + self.up * d_camera.y + self.forward * d_camera.z).normalize();

        let inv_z = 1.0 / d_camera.z;
        let near_t = self.near_clip * inv_z;
        let far_t = if self.far_clip < FLOAT_MAX { self.far_clip * inv_z } else { FLOAT_MAX };
        Ray3f::new(self.origin, dir, Some(near_t), Some(far_t))
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn describe(&self) -> String {
        format!("PerspectiveCamera[{}x{}, origin = {:?}, forward = {:?}, fov_y = {:.2} deg]",
                self.width, self.height, self.origin, self.forward,
                (2.0 * self.tan_half_fov_y.atan()).to_degrees())
    }
}
