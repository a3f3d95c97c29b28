//! Conversion from linear radiance to 8-bit display pixels.

use pathy_core::Color;
use pathy_math::Interval;

/// Exponent of the gamma approximation.
const GAMMA_EXPONENT: f32 = 1.0 / 2.4;

/// Approximate sRGB encoding, `1.055 · c^(1/2.4) − 0.055`.
///
/// There is no linear segment near zero, so `0.0` maps to `-0.055`; the
/// quantizer saturates that to 0. At `1.0` the result is one ulp below 1.0
/// in f32, so full white quantizes to 254.
#[inline]
pub fn linear_to_srgb(c: f32) -> f32 {
    1.055 * c.powf(GAMMA_EXPONENT) - 0.055
}

/// Clamp, gamma encode and quantize one channel.
///
/// The float to integer cast truncates and saturates (NaN becomes 0).
#[inline]
pub fn quantize(c: f32) -> u8 {
    (255.0 * linear_to_srgb(Interval::UNIT.clamp(c))) as u8
}

/// Convert a linear color to a display pixel in (blue, green, red) order.
#[inline]
pub fn color_to_bgr(color: Color) -> [u8; 3] {
    [quantize(color.z), quantize(color.y), quantize(color.x)]
}
