//! CPU-visible pixel container.

use gl;

/// Pixel format of image data uploaded to or read back from a texture.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Format {
    /// `[R, G, B; R, G, ...]`, one byte per channel.
    U8Rgb,

    /// `[R, G, B, A; R, ...]`, one byte per channel.
    U8Rgba,
}

impl Format {
    /// Returns the corresponding GL `(type, format)` enumeration pair.
    pub(crate) fn as_gl_enums(self) -> (u32, u32) {
        match self {
            Format::U8Rgb => (gl::UNSIGNED_BYTE, gl::RGB),
            Format::U8Rgba => (gl::UNSIGNED_BYTE, gl::RGBA),
        }
    }
}
