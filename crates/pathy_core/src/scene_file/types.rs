//! Serialized scene file layout.
//!
//! These types mirror the JSON document exactly; the loader validates them
//! and converts them to [`crate::scene::Scene`].

use serde::Deserialize;

/// Three floats, used for points, directions and RGB triples.
pub type Triple = [f32; 3];

/// Root of a scene file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    /// Optional scene name; defaults to the file stem
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub camera: Option<CameraDesc>,

    #[serde(default)]
    pub emitters: Vec<EmitterDesc>,

    #[serde(default)]
    pub shapes: Vec<ShapeDesc>,
}

/// Camera block. Missing fields take the default viewpoint.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDesc {
    pub eye: Option<Triple>,
    pub look_at: Option<Triple>,
    pub up: Option<Triple>,

    /// Vertical field of view in degrees
    pub fov_y: Option<f32>,

    pub near: Option<f32>,
    pub far: Option<f32>,
}

/// A light source.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum EmitterDesc {
    Point {
        position: Triple,
        intensity: Triple,
    },
    Sphere {
        position: Triple,
        radius: f32,
        intensity: Triple,
    },
    Constant {
        radiance: Triple,
    },
}

/// A geometric shape with its surface description.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum ShapeDesc {
    Sphere {
        center: Triple,
        radius: f32,
        bsdf: BsdfDesc,
    },
}

/// Surface scattering description.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum BsdfDesc {
    Diffuse { reflectance: Triple },
    Conductor { specular_reflectance: Triple },
    /// Rendered as a perfect mirror; `alpha` is validated but not used
    #[serde(rename = "roughconductor")]
    RoughConductor {
        specular_reflectance: Triple,
        alpha: Option<f32>,
    },
}
