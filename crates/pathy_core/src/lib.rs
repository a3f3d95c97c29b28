//! Pathy Core - Scene description and scene files.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `SceneObject`, `Sphere`, `Material`, lights
//!   and `CameraSettings`
//! - **Scene files**: JSON parsing, validation and loading
//!
//! # Example
//!
//! ```ignore
//! use pathy_core::load_scene;
//!
//! let scene = load_scene("scenes/aras.json")?;
//! println!("Loaded {} spheres, {} lights",
//!     scene.object_count(),
//!     scene.light_count());
//! ```

pub mod scene;
pub mod scene_file;

// Re-export commonly used types
pub use scene::{
    CameraSettings, Color, ConstantLight, Material, PointLight, Scene, SceneObject, Sphere,
    SphereLight,
};
pub use scene_file::{load_scene, load_scene_from_str, LoadError, LoadResult};
