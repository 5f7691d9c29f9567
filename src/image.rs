//! CPU-visible pixel descriptors for texture upload.

use crate::gl;

/// An image pixel format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Format {
    /// 32-bit floating point format.
    F32(F32),

    /// 8-bit unsigned integer format.
    U8(U8),
}

impl Format {
    /// Returns the `(data type, channel order)` enumeration constants.
    pub(crate) fn as_gl_enums(&self) -> (u32, u32) {
        match *self {
            Format::F32(F32::R) => (gl::FLOAT, gl::RED),
            Format::F32(F32::Rg) => (gl::FLOAT, gl::RG),
            Format::F32(F32::Rgb) => (gl::FLOAT, gl::RGB),
            Format::F32(F32::Rgba) => (gl::FLOAT, gl::RGBA),

            Format::U8(U8::R) => (gl::UNSIGNED_BYTE, gl::RED),
            Format::U8(U8::Rg) => (gl::UNSIGNED_BYTE, gl::RG),
            Format::U8(U8::Rgb) => (gl::UNSIGNED_BYTE, gl::RGB),
            Format::U8(U8::Rgba) => (gl::UNSIGNED_BYTE, gl::RGBA),
        }
    }
}

impl From<F32> for Format {
    fn from(format: F32) -> Self {
        Format::F32(format)
    }
}

impl From<U8> for Format {
    fn from(format: U8) -> Self {
        Format::U8(format)
    }
}

/// Pixel format where every channel is an unsigned 8-bit integer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum U8 {
    /// `[R; R; R; R; R, ...]`
    R,

    /// `[R, G; R, G; R, ...]`
    Rg,

    /// `[R, G, B; R, G, ...]`
    Rgb,

    /// `[R, G, B, A; R, ...]`
    Rgba,
}

/// Pixel format where every channel is a 32-bit floating point number.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum F32 {
    /// `[R; R; R; R; R, ...]`
    R,

    /// `[R, G; R, G; R, ...]`
    Rg,

    /// `[R, G, B; R, G, ...]`
    Rgb,

    /// `[R, G, B, A; R, ...]`
    Rgba,
}
