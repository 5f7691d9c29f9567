//! GPU-visible pixel containers.

use std::{cmp, fmt, hash, ops, sync};

use crate::gl;
use crate::queue;

/// OpenGL texture ID type.
pub(crate) type Id = u32;

/// Texture format descriptors.
pub mod format {
    /// 32-bit float format.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum F32 {
        /// Corresponds to `GL_DEPTH_COMPONENT32F`.
        Depth,

        /// Corresponds to `GL_RGB32F`.
        Rgb,

        /// Corresponds to `GL_RGBA32F`.
        Rgba,
    }

    /// 8-bit fixed format.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum U8 {
        /// Corresponds to `GL_RGB8`.
        Rgb,

        /// Correponds to `GL_RGBA8`.
        Rgba,
    }
}

/// Format of texture data.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Format {
    /// 32-bit float.
    F32(format::F32),

    /// 8-bit fixed.
    U8(format::U8),
}

impl Format {
    pub(crate) fn as_gl_enum(&self) -> u32 {
        match *self {
            Format::F32(format::F32::Depth) => gl::DEPTH_COMPONENT32F,
            Format::F32(format::F32::Rgb) => gl::RGB32F,
            Format::F32(format::F32::Rgba) => gl::RGBA32F,

            Format::U8(format::U8::Rgb) => gl::RGB8,
            Format::U8(format::U8::Rgba) => gl::RGBA8,
        }
    }
}

impl From<format::F32> for Format {
    fn from(format: format::F32) -> Self {
        Format::F32(format)
    }
}

impl From<format::U8> for Format {
    fn from(format: format::U8) -> Self {
        Format::U8(format)
    }
}

/// Texture filtering mode.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Filter {
    /// Nearest texel.
    Nearest,

    /// Linear filter.
    Linear,
}

impl Filter {
    pub(crate) fn as_gl_enum(self) -> u32 {
        match self {
            Filter::Nearest => gl::NEAREST,
            Filter::Linear => gl::LINEAR,
        }
    }
}

/// Texture co-ordinate wrapping mode.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Wrap {
    /// Repeat.
    Repeat,

    /// Clamp to the edge texel.
    ClampToEdge,
}

impl Wrap {
    pub(crate) fn as_gl_enum(self) -> u32 {
        match self {
            Wrap::Repeat => gl::REPEAT,
            Wrap::ClampToEdge => gl::CLAMP_TO_EDGE,
        }
    }
}

/// Sampling parameters, applied when the texture is created.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Sampler {
    /// Specifies the magnification filter.
    ///
    /// Default: `Linear`.
    pub mag_filter: Filter,

    /// Specifies the minification filter.
    ///
    /// Default: `Linear`.
    pub min_filter: Filter,

    /// Specifies the wrapping mode for the S axis.
    ///
    /// Default: `Repeat`.
    pub wrap_s: Wrap,

    /// Specifies the wrapping mode for the T axis.
    ///
    /// Default: `Repeat`.
    pub wrap_t: Wrap,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            mag_filter: Filter::Linear,
            min_filter: Filter::Linear,
            wrap_s: Wrap::Repeat,
            wrap_t: Wrap::Repeat,
        }
    }
}

/// Texture target.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Target {
    /// Corresponds to `GL_TEXTURE_2D`.
    Texture2,

    /// Corresponds to `GL_TEXTURE_CUBE_MAP`.
    Cubemap,
}

impl Target {
    pub(crate) fn as_gl_enum(self) -> u32 {
        match self {
            Target::Texture2 => gl::TEXTURE_2D,
            Target::Cubemap => gl::TEXTURE_CUBE_MAP,
        }
    }
}

/// Returns the texture back to the factory upon destruction.
pub(crate) struct Destructor {
    id: Id,
    tx: queue::Sender<Id>,
}

impl ops::Drop for Destructor {
    fn drop(&mut self) {
        let _ = self.tx.send(self.id);
    }
}

/// GPU-visible pixel container, bound to a texture unit at draw time.
#[derive(Clone)]
pub struct Texture {
    /// The OpenGL texture ID.
    id: Id,

    /// 2D or cube map.
    target: Target,

    width: u32,
    height: u32,
    format: Format,
    mipmap: bool,

    /// Function pointers to the OpenGL backend.
    backend: gl::Backend,

    /// Returns the texture back to the factory upon destruction.
    _destructor: sync::Arc<Destructor>,
}

impl Texture {
    pub(crate) fn new<F: Into<Format>>(
        id: Id,
        target: Target,
        width: u32,
        height: u32,
        mipmap: bool,
        format: F,
        backend: gl::Backend,
        tx: queue::Sender<Id>,
    ) -> Self {
        Texture {
            id,
            target,
            width,
            height,
            mipmap,
            format: format.into(),
            backend,
            _destructor: sync::Arc::new(Destructor { id, tx }),
        }
    }

    /// Returns the OpenGL texture ID.
    pub(crate) fn id(&self) -> Id {
        self.id
    }

    /// Returns the internal pixel format.
    pub(crate) fn format(&self) -> Format {
        self.format
    }

    /// Returns the texture target.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Returns the width of the texture in pixels.
    pub fn width(&self) -> usize {
        self.width as _
    }

    /// Returns the height of the texture in pixels.
    pub fn height(&self) -> usize {
        self.height as _
    }

    /// Returns `true` if this texture has mipmaps.
    pub fn mipmap(&self) -> bool {
        self.mipmap
    }

    /// Binds the texture to the given texture unit.
    pub fn bind(&self, unit: u32) {
        self.backend.active_texture(unit);
        self.backend.bind_texture(self.target.as_gl_enum(), self.id);
    }
}

impl cmp::Eq for Texture {}

impl cmp::PartialEq<Self> for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct Texture(u32, Target);

        Texture(self.id, self.target).fmt(f)
    }
}

impl hash::Hash for Texture {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
