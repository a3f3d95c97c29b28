// Re-export glam for convenience
pub use glam::*;

// Pathy math types
mod interval;
mod onb;
mod ray;

pub use interval::Interval;
pub use onb::Onb;
pub use ray::{is_normalized, Ray, NORMALIZED_TOLERANCE};
