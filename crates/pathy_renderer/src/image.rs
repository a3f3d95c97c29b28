//! Pixel buffer written by the renderer.

/// Bytes per pixel: blue, green, red.
pub const BYTES_PER_PIXEL: usize = 3;

/// An 8-bit BGR image with a fixed row stride.
///
/// Rows are stored bottom-up relative to the view: row 0 holds the pixels at
/// the bottom of the camera's field of view.
#[derive(Debug, Clone)]
pub struct Image {
    width: usize,
    height: usize,
    pitch: usize,
    data: Vec<u8>,
}

impl Image {
    /// Create a tightly packed image filled with white.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_pitch(width, height, width * BYTES_PER_PIXEL)
    }

    /// Create an image whose rows are `pitch` bytes apart, filled with white.
    ///
    /// Padding bytes past the last pixel of a row are never written.
    pub fn with_pitch(width: usize, height: usize, pitch: usize) -> Self {
        assert!(
            pitch >= width * BYTES_PER_PIXEL,
            "pitch {pitch} is too small for {width} pixels"
        );
        Self {
            width,
            height,
            pitch,
            data: vec![255; pitch * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes between the starts of consecutive rows.
    #[inline]
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the `[b, g, r]` pixel at (x, y).
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let offset = y * self.pitch + x * BYTES_PER_PIXEL;
        [self.data[offset], self.data[offset + 1], self.data[offset + 2]]
    }

    /// Raw bytes, `pitch * height` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Convert to tightly packed RGB rows ordered top to bottom, for display
    /// or saving.
    pub fn to_rgb_top_down(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.width * self.height * BYTES_PER_PIXEL);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let [b, g, r] = self.pixel(x, y);
                bytes.extend_from_slice(&[r, g, b]);
            }
        }
        bytes
    }
}
