//! Scene file loading and validation.
//!
//! The renderer treats its inputs as trusted: every radius is positive,
//! every number is finite and the camera is well formed. This module is where
//! that trust is earned. Anything that would break those assumptions is
//! rejected here with a [`LoadError`].

use std::path::Path;

use pathy_math::Vec3;
use thiserror::Error;

use crate::scene::{CameraSettings, Color, Material, PointLight, Scene, Sphere, SphereLight};
use crate::scene_file::types::{BsdfDesc, CameraDesc, EmitterDesc, SceneFile, ShapeDesc, Triple};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{what} has a non-finite value")]
    NonFinite { what: String },

    #[error("{what} has non-positive radius {radius}")]
    InvalidRadius { what: String, radius: f32 },

    #[error("{what} has a negative color component")]
    NegativeColor { what: String },

    #[error("Scene declares more than one constant emitter")]
    DuplicateConstantLight,

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file from disk.
///
/// The scene name defaults to the file stem when the file does not set one.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    log::info!("Loading scene from {:?}", path);
    let contents = std::fs::read_to_string(path)?;
    load_scene_from_str(&contents, name)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(contents: &str, default_name: &str) -> LoadResult<Scene> {
    let file: SceneFile = serde_json::from_str(contents)?;
    build_scene(file, default_name)
}

/// Validate a parsed scene file and convert it to a [`Scene`].
pub fn build_scene(file: SceneFile, default_name: &str) -> LoadResult<Scene> {
    let name = file.name.unwrap_or_else(|| default_name.to_string());
    let camera = build_camera(file.camera.unwrap_or_default())?;
    let mut scene = Scene::new(name).with_camera(camera);

    let mut constant_seen = false;
    for (i, emitter) in file.emitters.into_iter().enumerate() {
        let what = format!("emitter {i}");
        match emitter {
            EmitterDesc::Point {
                position,
                intensity,
            } => {
                scene.add_point_light(PointLight {
                    position: point(&what, position)?,
                    intensity: color(&what, intensity)?,
                });
            }
            EmitterDesc::Sphere {
                position,
                radius,
                intensity,
            } => {
                scene.add_sphere_light(SphereLight {
                    position: point(&what, position)?,
                    radius: radius_of(&what, radius)?,
                    intensity: color(&what, intensity)?,
                });
            }
            EmitterDesc::Constant { radiance } => {
                if constant_seen {
                    return Err(LoadError::DuplicateConstantLight);
                }
                constant_seen = true;
                scene = scene.with_constant_light(color(&what, radiance)?);
            }
        }
    }

    for (i, shape) in file.shapes.into_iter().enumerate() {
        let what = format!("shape {i}");
        match shape {
            ShapeDesc::Sphere {
                center,
                radius,
                bsdf,
            } => {
                let sphere = Sphere::new(point(&what, center)?, radius_of(&what, radius)?);
                let material = match bsdf {
                    BsdfDesc::Diffuse { reflectance } => {
                        Material::diffuse(color(&what, reflectance)?)
                    }
                    BsdfDesc::Conductor {
                        specular_reflectance,
                    } => Material::mirror(color(&what, specular_reflectance)?),
                    BsdfDesc::RoughConductor {
                        specular_reflectance,
                        alpha,
                    } => {
                        if alpha.is_some_and(|a| !a.is_finite()) {
                            return Err(LoadError::NonFinite { what });
                        }
                        log::debug!("{what}: roughness is ignored, rendering as a mirror");
                        Material::mirror(color(&what, specular_reflectance)?)
                    }
                };
                scene.add_sphere(sphere, material);
            }
        }
    }

    if scene.point_lights.is_empty() && scene.sphere_lights.is_empty() && !constant_seen {
        log::warn!("Scene '{}' has no emitters; it will render black", scene.name);
    }

    log::info!(
        "Loaded scene '{}': {} spheres, {} point lights, {} sphere lights",
        scene.name,
        scene.object_count(),
        scene.point_lights.len(),
        scene.sphere_lights.len()
    );

    Ok(scene)
}

fn build_camera(desc: CameraDesc) -> LoadResult<CameraSettings> {
    let defaults = CameraSettings::default();
    let camera = CameraSettings {
        eye: desc.eye.map(Vec3::from_array).unwrap_or(defaults.eye),
        look_at: desc.look_at.map(Vec3::from_array).unwrap_or(defaults.look_at),
        up: desc.up.map(Vec3::from_array).unwrap_or(defaults.up),
        fov_y_degrees: desc.fov_y.unwrap_or(defaults.fov_y_degrees),
        near: desc.near.unwrap_or(defaults.near),
        far: desc.far.unwrap_or(defaults.far),
    };

    let finite = camera.eye.is_finite()
        && camera.look_at.is_finite()
        && camera.up.is_finite()
        && camera.fov_y_degrees.is_finite()
        && camera.near.is_finite()
        && camera.far.is_finite();
    if !finite {
        return Err(LoadError::NonFinite {
            what: "camera".to_string(),
        });
    }

    let forward = camera.look_at - camera.eye;
    if forward.length_squared() < 1e-12 {
        return Err(LoadError::InvalidCamera("eye and look_at coincide".into()));
    }
    if forward.normalize().cross(camera.up).length_squared() < 1e-12 {
        return Err(LoadError::InvalidCamera(
            "up is zero or parallel to the view direction".into(),
        ));
    }
    if !(camera.fov_y_degrees > 0.0 && camera.fov_y_degrees < 180.0) {
        return Err(LoadError::InvalidCamera(format!(
            "fov_y {} must be in (0, 180)",
            camera.fov_y_degrees
        )));
    }
    if !(camera.near > 0.0 && camera.near < camera.far) {
        return Err(LoadError::InvalidCamera(format!(
            "clip planes near={} far={} must satisfy 0 < near < far",
            camera.near, camera.far
        )));
    }

    Ok(camera)
}

fn point(what: &str, value: Triple) -> LoadResult<Vec3> {
    let v = Vec3::from_array(value);
    if !v.is_finite() {
        return Err(LoadError::NonFinite { what: what.into() });
    }
    Ok(v)
}

fn color(what: &str, value: Triple) -> LoadResult<Color> {
    let c = point(what, value)?;
    if c.min_element() < 0.0 {
        return Err(LoadError::NegativeColor { what: what.into() });
    }
    Ok(c)
}

fn radius_of(what: &str, radius: f32) -> LoadResult<f32> {
    if !radius.is_finite() {
        return Err(LoadError::NonFinite { what: what.into() });
    }
    if radius <= 0.0 {
        return Err(LoadError::InvalidRadius {
            what: what.into(),
            radius,
        });
    }
    Ok(radius)
}
