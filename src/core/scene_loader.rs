// Copyright @yucwang 2026

use std::collections::HashMap;
use std::convert::TryFrom;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::info;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::bsdf::BSDF;
use crate::core::error::{RenderError, Result};
use crate::core::integrator::Integrator;
use crate::core::properties::{Property, PropertyList};
use crate::core::scene::Scene;
use crate::emitters::constant::ConstantEnvironment;
use crate::integrators::create_integrator;
use crate::materials::create_bsdf;
use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::media::homogeneous_medium::HomogeneousMedium;
use crate::sensors::perspective::PerspectiveCamera;
use crate::shapes::rectangle::Rectangle;
use crate::shapes::sphere::Sphere;

const OBJECT_TAGS: [&str; 8] = ["scene", "integrator", "sampler", "camera", "medium", "emitter", "shape", "bsdf"];

pub struct SceneLoadResult {
    pub scene: Scene,
    pub integrator: Box<dyn Integrator>,
    pub camera: PerspectiveCamera,
    pub samples_per_pixel: u32,
    pub seed: u64,
}

/// One `<tag type="..">` object with its parameters and nested objects.
struct Element {
    tag: String,
    kind: String,
    props: PropertyList,
    children: Vec<Element>,
}

pub fn load_scene_with_settings<P: AsRef<Path>>(path: P) -> Result<SceneLoadResult> {
    let path = path.as_ref();
    info!("Loading scene from {}", path.display());
    let xml = fs::read_to_string(path)?;
    parse_scene(&xml)
}

pub fn parse_scene(xml: &str) -> Result<SceneLoadResult> {
    let root = parse_elements(xml)?;
    build_scene(root)
}

fn parse_elements(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut defaults: HashMap<String, String> = HashMap::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            RenderError::SceneParse(format!("at byte {}: {}", reader.buffer_position(), e))
        })?;
        match event {
            Event::Eof => break,
            Event::Start(e) => {
                let tag = tag_name(&e);
                if OBJECT_TAGS.contains(&tag.as_str()) {
                    stack.push(open_element(&e, tag, &defaults)?);
                } else {
                    return Err(RenderError::SceneParse(format!("<{}> must be an empty element", tag)));
                }
            }
            Event::Empty(e) => {
                let tag = tag_name(&e);
                if OBJECT_TAGS.contains(&tag.as_str()) {
                    let element = open_element(&e, tag, &defaults)?;
                    attach(&mut stack, &mut root, element)?;
                } else if tag == "default" {
                    let attrs = attributes(&e, &defaults)?;
                    if let (Some(name), Some(value)) = (attrs.get("name"), attrs.get("value")) {
                        defaults.insert(name.clone(), value.clone());
                    }
                } else {
                    let top = stack.last_mut().ok_or_else(|| {
                        RenderError::SceneParse(format!("<{}> outside of any object", tag))
                    })?;
                    let (name, property) = parse_property(&tag, &attributes(&e, &defaults)?)?;
                    top.props.set(name, property);
                }
            }
            Event::End(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let element = stack.pop().ok_or_else(|| {
                    RenderError::SceneParse(format!("unexpected </{}>", tag))
                })?;
                if element.tag != tag {
                    return Err(RenderError::SceneParse(
                        format!("</{}> closes <{}>", tag, element.tag)));
                }
                attach(&mut stack, &mut root, element)?;
            }
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(RenderError::SceneParse(format!("<{}> is never closed", open.tag)));
    }
    root.ok_or_else(|| RenderError::SceneParse(String::from("document has no <scene> element")))
}

fn tag_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn attributes(e: &BytesStart, defaults: &HashMap<String, String>) -> Result<HashMap<String, String>> {
    let mut out = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| RenderError::SceneParse(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|err| RenderError::SceneParse(err.to_string()))?;
        out.insert(key, resolve_value(&value, defaults));
    }
    Ok(out)
}

fn open_element(e: &BytesStart, tag: String, defaults: &HashMap<String, String>) -> Result<Element> {
    let attrs = attributes(e, defaults)?;
    let kind = attrs.get("type").cloned().unwrap_or_default();
    Ok(Element { tag, kind, props: PropertyList::new(), children: Vec::new() })
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if element.tag == "scene" && root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(RenderError::SceneParse(format!("unexpected top level <{}>", element.tag))),
    }
}

fn parse_property(tag: &str, attrs: &HashMap<String, String>) -> Result<(String, Property)> {
    let name = attrs.get("name")
        .ok_or_else(|| RenderError::SceneParse(format!("<{}> without a name", tag)))?
        .clone();
    let value = attrs.get("value")
        .ok_or_else(|| RenderError::SceneParse(format!("<{} name=\"{}\"> without a value", tag, name)))?;

    let property = match tag {
        "float" => Property::Float(parse_float(value)?),
        "integer" => Property::Integer(value.trim().parse::<i64>()
            .map_err(|_| RenderError::SceneParse(format!("invalid integer: {}", value)))?),
        "boolean" => match value.trim() {
            "true" => Property::Boolean(true),
            "false" => Property::Boolean(false),
            other => return Err(RenderError::SceneParse(format!("invalid boolean: {}", other))),
        },
        "string" => Property::String(value.clone()),
        "color" | "rgb" => Property::Color(parse_spectrum(value)?),
        "point" => Property::Point(parse_vec3(value)?),
        "vector" => Property::Vector(parse_vec3(value)?),
        other => return Err(RenderError::SceneParse(format!("unknown element <{}>", other))),
    };
    Ok((name, property))
}

fn build_scene(root: Element) -> Result<SceneLoadResult> {
    let mut scene = Scene::new();
    let mut integrator: Option<Box<dyn Integrator>> = None;
    let mut camera: Option<PerspectiveCamera> = None;
    let mut samples_per_pixel = 1u32;
    let mut seed = 0u64;

    for child in root.children {
        match child.tag.as_str() {
            "integrator" => {
                if integrator.is_some() {
                    return Err(RenderError::SceneParse(String::from("more than one <integrator>")));
                }
                integrator = Some(create_integrator(&child.kind, &child.props)?);
            }
            "sampler" => {
                if child.kind != "independent" {
                    return Err(RenderError::SceneParse(format!("unknown sampler type '{}'", child.kind)));
                }
                let count = child.props.get_integer("sampleCount", 1)?;
                samples_per_pixel = match u32::try_from(count) {
                    Ok(count) if count >= 1 => count,
                    _ => {
                        return Err(RenderError::invalid("sampleCount",
                            format!("must lie in [1, {}], got {}", u32::MAX, count)));
                    }
                };
                let raw_seed = child.props.get_integer("seed", 0)?;
                seed = u64::try_from(raw_seed).map_err(|_| {
                    RenderError::invalid("seed", format!("must be non-negative, got {}", raw_seed))
                })?;
            }
            "camera" => {
                if child.kind != "perspective" {
                    return Err(RenderError::SceneParse(format!("unknown camera type '{}'", child.kind)));
                }
                camera = Some(PerspectiveCamera::from_properties(&child.props)?);
            }
            "medium" => {
                if child.kind != "homogeneous" {
                    return Err(RenderError::SceneParse(format!("unknown medium type '{}'", child.kind)));
                }
                scene.set_medium(Arc::new(HomogeneousMedium::from_properties(&child.props)?));
            }
            "emitter" => match child.kind.as_str() {
                "constant" | "environment" => {
                    scene.set_environment(Box::new(ConstantEnvironment::from_properties(&child.props)?));
                }
                "area" => {
                    return Err(RenderError::UnsupportedEmitterSurface(
                        String::from("an area emitter must be nested inside a <shape>")));
                }
                other => {
                    return Err(RenderError::SceneParse(format!("unknown emitter type '{}'", other)));
                }
            },
            "shape" => add_shape(&mut scene, child)?,
            other => {
                return Err(RenderError::SceneParse(format!("<{}> is not allowed inside <scene>", other)));
            }
        }
    }

    let integrator = integrator.ok_or_else(|| RenderError::SceneParse(String::from("scene has no <integrator>")))?;
    let camera = camera.ok_or_else(|| RenderError::SceneParse(String::from("scene has no <camera>")))?;

    info!("Scene loaded: {} objects, {} area emitters, environment: {}, medium: {}",
          scene.objects().len(), scene.emitters().len(),
          scene.environment().is_some(), scene.medium().is_some());

    Ok(SceneLoadResult { scene, integrator, camera, samples_per_pixel, seed })
}

fn add_shape(scene: &mut Scene, element: Element) -> Result<()> {
    let mut bsdf: Option<Arc<dyn BSDF>> = None;
    let mut radiance: Option<RGBSpectrum> = None;

    for child in element.children.iter() {
        match child.tag.as_str() {
            "bsdf" => {
                if bsdf.is_some() {
                    return Err(RenderError::SceneParse(String::from("a <shape> takes one <bsdf>")));
                }
                bsdf = Some(create_bsdf(&child.kind, &child.props)?);
            }
            "emitter" if child.kind == "area" => {
                radiance = Some(child.props.require_color("radiance")?);
            }
            "emitter" => {
                return Err(RenderError::SceneParse(
                    format!("emitter type '{}' cannot be attached to a shape", child.kind)));
            }
            other => {
                return Err(RenderError::SceneParse(format!("<{}> is not allowed inside <shape>", other)));
            }
        }
    }

    let bsdf = match bsdf {
        Some(bsdf) => bsdf,
        None => Arc::new(LambertianDiffuseBSDF::new(RGBSpectrum::splat(0.5))?),
    };

    match element.kind.as_str() {
        "rectangle" => {
            let shape = Arc::new(Rectangle::from_properties(&element.props)?);
            match radiance {
                Some(radiance) => scene.add_emissive_object(shape, bsdf, radiance),
                None => {
                    scene.add_object(shape, bsdf);
                    Ok(())
                }
            }
        }
        "sphere" => {
            let shape = Arc::new(Sphere::from_properties(&element.props)?);
            match radiance {
                Some(radiance) => scene.add_emissive_object(shape, bsdf, radiance),
                None => {
                    scene.add_object(shape, bsdf);
                    Ok(())
                }
            }
        }
        other => Err(RenderError::SceneParse(format!("unknown shape type '{}'", other))),
    }
}

fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = raw.to_string();
    for (k, v) in defaults {
        out = out.replace(&format!("${}", k), v);
    }
    out
}

fn parse_float(value: &str) -> Result<Float> {
    value.trim().parse::<Float>().map_err(|_| RenderError::SceneParse(format!("invalid float: {}", value)))
}

fn parse_vec3(value: &str) -> Result<Vector3f> {
    let parts: Vec<&str> = value.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() != 3 {
        return Err(RenderError::SceneParse(format!("invalid vec3: {}", value)));
    }
    Ok(Vector3f::new(parse_float(parts[0])?, parse_float(parts[1])?, parse_float(parts[2])?))
}

/// A color is either three channels or a single grey value.
fn parse_spectrum(value: &str) -> Result<RGBSpectrum> {
    if let Ok(v) = parse_vec3(value) {
        return Ok(RGBSpectrum::new(v.x, v.y, v.z));
    }
    Ok(RGBSpectrum::splat(parse_float(value)?))
}
