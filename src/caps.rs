//! Context capability detection.

use crate::gl;

/// Limits and optional entry points of the current context.
///
/// Queried once when the factory is created and treated as constants for
/// the process lifetime.
#[derive(Clone, Copy, Debug)]
pub struct Capabilities {
    /// Maximum number of uniform slots a draw call may assign.
    pub max_uniforms: usize,

    /// Maximum number of uniform buffer binding points.
    pub max_uniform_buffers: usize,

    /// Maximum number of texture units.
    pub max_texture_units: usize,

    /// The plain multi-draw entry points are present.
    pub multi_draw: bool,

    /// The indirect multi-draw entry points are present, enabling batched
    /// instanced submission.
    pub multi_draw_instanced: bool,
}

impl Capabilities {
    /// Queries the capability record from the current context.
    pub(crate) fn query(backend: &gl::Backend) -> Self {
        Capabilities {
            max_uniforms: backend.get_integer(gl::MAX_VERTEX_UNIFORM_VECTORS) as usize,
            max_uniform_buffers: backend.get_integer(gl::MAX_UNIFORM_BUFFER_BINDINGS) as usize,
            max_texture_units: backend.get_integer(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS) as usize,
            multi_draw: backend.has_multi_draw(),
            multi_draw_instanced: backend.has_multi_draw_indirect(),
        }
    }
}
