// Copyright @yucwang 2023

use crate::core::bsdf::BSDF;
use crate::emitters::area::AreaEmitter;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::frame::Frame;

/// Nearest surface hit along a ray, produced by the scene.
///
/// Shapes fill in the geometry; the scene attaches the material and the
/// emitter of the object that was hit.
pub struct SurfaceIntersection<'a> {
    p: Vector3f,
    geo_normal: Vector3f,
    sh_frame: Frame,
    uv: Vector2f,
    t: Float,
    bsdf: Option<&'a dyn BSDF>,
    emitter: Option<&'a AreaEmitter>,
}

impl<'a> SurfaceIntersection<'a> {
    pub fn new(new_p: Vector3f,
               new_geo_normal: Vector3f,
               new_sh_normal: Vector3f,
               new_uv: Vector2f,
               new_t: Float) -> Self {
        Self { p: new_p, geo_normal: new_geo_normal, sh_frame: Frame::from_normal(&new_sh_normal),
               uv: new_uv, t: new_t, bsdf: None, emitter: None }
    }

    /// Rebind the hit to the material and emitter of the owning object.
    pub fn with_surface<'b>(self, bsdf: &'b dyn BSDF, emitter: Option<&'b AreaEmitter>) -> SurfaceIntersection<'b> {
        SurfaceIntersection {
            p: self.p,
            geo_normal: self.geo_normal,
            sh_frame: self.sh_frame,
            uv: self.uv,
            t: self.t,
            bsdf: Some(bsdf),
            emitter,
        }
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn uv(&self) -> Vector2f {
        self.uv
    }

    pub fn geo_normal(&self) -> Vector3f {
        self.geo_normal
    }

    pub fn sh_frame(&self) -> &Frame {
        &self.sh_frame
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        self.sh_frame.to_local(v)
    }

    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.sh_frame.to_world(v)
    }

    pub fn bsdf(&self) -> Option<&'a dyn BSDF> {
        self.bsdf
    }

    pub fn emitter(&self) -> Option<&'a AreaEmitter> {
        self.emitter
    }

    pub fn is_emitter(&self) -> bool {
        self.emitter.is_some()
    }
}
