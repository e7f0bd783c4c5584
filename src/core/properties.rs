// Copyright @yucwang 2026

use crate::core::error::{RenderError, Result};
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use std::collections::HashMap;

/// A single named construction parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Boolean(bool),
    Integer(i64),
    Float(Float),
    String(String),
    Color(RGBSpectrum),
    Point(Vector3f),
    Vector(Vector3f),
}

/// Named parameters handed to a component's constructor.
#[derive(Debug, Clone, Default)]
pub struct PropertyList {
    values: HashMap<String, Property>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self { values: HashMap::new() }
    }

    pub fn set<N: Into<String>>(&mut self, name: N, value: Property) {
        let name = name.into();
        if self.values.insert(name.clone(), value).is_some() {
            log::warn!("Property '{}' was specified twice, keeping the last value.", name);
        }
    }

    pub fn with_float(mut self, name: &str, value: Float) -> Self {
        self.set(name, Property::Float(value));
        self
    }

    pub fn with_integer(mut self, name: &str, value: i64) -> Self {
        self.set(name, Property::Integer(value));
        self
    }

    pub fn with_boolean(mut self, name: &str, value: bool) -> Self {
        self.set(name, Property::Boolean(value));
        self
    }

    pub fn with_string(mut self, name: &str, value: &str) -> Self {
        self.set(name, Property::String(value.to_string()));
        self
    }

    pub fn with_color(mut self, name: &str, value: RGBSpectrum) -> Self {
        self.set(name, Property::Color(value));
        self
    }

    pub fn with_point(mut self, name: &str, value: Vector3f) -> Self {
        self.set(name, Property::Point(value));
        self
    }

    pub fn with_vector(mut self, name: &str, value: Vector3f) -> Self {
        self.set(name, Property::Vector(value));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn mismatch(name: &str, expected: &'static str) -> RenderError {
        RenderError::TypeMismatch { name: name.to_string(), expected }
    }

    /// Integers are accepted where a float is expected.
    pub fn find_float(&self, name: &str) -> Result<Option<Float>> {
        match self.values.get(name) {
            None => Ok(None),
            Some(Property::Float(v)) => Ok(Some(*v)),
            Some(Property::Integer(v)) => Ok(Some(*v as Float)),
            Some(_) => Err(Self::mismatch(name, "float")),
        }
    }

    pub fn get_float(&self, name: &str, default: Float) -> Result<Float> {
        Ok(self.find_float(name)?.unwrap_or(default))
    }

    pub fn require_float(&self, name: &str) -> Result<Float> {
        self.find_float(name)?.ok_or_else(|| RenderError::MissingParameter(name.to_string()))
    }

    pub fn find_integer(&self, name: &str) -> Result<Option<i64>> {
        match self.values.get(name) {
            None => Ok(None),
            Some(Property::Integer(v)) => Ok(Some(*v)),
            Some(_) => Err(Self::mismatch(name, "integer")),
        }
    }

    pub fn get_integer(&self, name: &str, default: i64) -> Result<i64> {
        Ok(self.find_integer(name)?.unwrap_or(default))
    }

    pub fn get_boolean(&self, name: &str, default: bool) -> Result<bool> {
        match self.values.get(name) {
            None => Ok(default),
            Some(Property::Boolean(v)) => Ok(*v),
            Some(_) => Err(Self::mismatch(name, "boolean")),
        }
    }

    pub fn get_string(&self, name: &str, default: &str) -> Result<String> {
        match self.values.get(name) {
            None => Ok(default.to_string()),
            Some(Property::String(v)) => Ok(v.clone()),
            Some(_) => Err(Self::mismatch(name, "string")),
        }
    }

    /// A scalar is accepted where a color is expected and means grey.
    pub fn find_color(&self, name: &str) -> Result<Option<RGBSpectrum>> {
        match self.values.get(name) {
            None => Ok(None),
            Some(Property::Color(v)) => Ok(Some(*v)),
            Some(Property::Float(v)) => Ok(Some(RGBSpectrum::splat(*v))),
            Some(Property::Integer(v)) => Ok(Some(RGBSpectrum::splat(*v as Float))),
            Some(_) => Err(Self::mismatch(name, "color")),
        }
    }

    pub fn get_color(&self, name: &str, default: RGBSpectrum) -> Result<RGBSpectrum> {
        Ok(self.find_color(name)?.unwrap_or(default))
    }

    pub fn require_color(&self, name: &str) -> Result<RGBSpectrum> {
        self.find_color(name)?.ok_or_else(|| RenderError::MissingParameter(name.to_string()))
    }

    pub fn get_point(&self, name: &str, default: Vector3f) -> Result<Vector3f> {
        match self.values.get(name) {
            None => Ok(default),
            Some(Property::Point(v)) => Ok(*v),
            Some(_) => Err(Self::mismatch(name, "point")),
        }
    }

    pub fn get_vector(&self, name: &str, default: Vector3f) -> Result<Vector3f> {
        match self.values.get(name) {
            None => Ok(default),
            Some(Property::Vector(v)) => Ok(*v),
            Some(_) => Err(Self::mismatch(name, "vector")),
        }
    }
}

/// Fail with `InvalidParameter` unless `value` is finite and non-negative.
pub fn ensure_non_negative(name: &str, value: Float) -> Result<Float> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(RenderError::invalid(name, format!("expected a finite non-negative value, got {}", value)))
    }
}

pub fn ensure_non_negative_color(name: &str, value: RGBSpectrum) -> Result<RGBSpectrum> {
    if value.is_valid() {
        Ok(value)
    } else {
        Err(RenderError::invalid(name, format!("expected finite non-negative channels, got {:?}", value)))
    }
}
