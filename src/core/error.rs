// Copyright @yucwang 2026

use thiserror::Error;

/// Failures that abort scene setup or a render.
///
/// Per-path outcomes (occluded light samples, zero BSDF weights, refractive
/// index drift) are never reported through this type.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no area emitters were defined, direct lighting is impossible")]
    NoEmitters,

    #[error("emitter attached to a surface that cannot be sampled: {0}")]
    UnsupportedEmitterSurface(String),

    #[error("invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("parameter '{name}' is not of type {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("scene parse error: {0}")]
    SceneParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write image: {0}")]
    ImageWrite(String),
}

impl RenderError {
    pub fn invalid<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        RenderError::InvalidParameter { name: name.into(), reason: reason.into() }
    }

    /// True for failures caused by the scene description rather than IO.
    pub fn is_configuration(&self) -> bool {
        match self {
            RenderError::NoEmitters
            | RenderError::UnsupportedEmitterSurface(_)
            | RenderError::InvalidParameter { .. }
            | RenderError::MissingParameter(_)
            | RenderError::TypeMismatch { .. } => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
