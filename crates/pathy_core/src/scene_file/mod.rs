//! JSON scene files for Pathy.
//!
//! A scene file lists a camera, emitters and shapes. The element names follow
//! the usual renderer vocabulary (`emitter`, `shape`, `bsdf`) so scenes
//! exported from other tools translate almost one to one.
//!
//! ## Supported elements
//!
//! - Emitters: `point`, `sphere` (area light), `constant` (environment)
//! - Shapes: `sphere`
//! - BSDFs: `diffuse` (Lambertian), `conductor` (perfect mirror), `roughconductor`
//!   (also rendered as a perfect mirror, its `alpha` is ignored)
//!
//! # Example
//!
//! ```ignore
//! use pathy_core::scene_file::load_scene;
//!
//! let scene = load_scene("scenes/aras.json")?;
//! println!("Loaded {} spheres", scene.object_count());
//! ```

mod loader;
mod types;

pub use loader::*;
pub use types::*;
