// Copyright @yucwang 2021

pub mod bsdf;
pub mod emitter;
pub mod error;
pub mod integrator;
pub mod interaction;
pub mod light_sampler;
pub mod medium;
pub mod properties;
pub mod sampler;
pub mod scene;
pub mod scene_loader;
pub mod sensor;
pub mod shape;
