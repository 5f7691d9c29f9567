//! Crate error taxonomy.

/// Failure conditions surfaced by draw call assembly and dispatch.
///
/// Underlying context errors are not represented here; they surface
/// through the `glGetError` polling in the backend and nowhere else.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A new uniform name was set after every slot was assigned.
    #[error("uniform table full: the context allows {capacity} uniforms")]
    UniformCapacity {
        /// Number of slots the context allows.
        capacity: usize,
    },

    /// A sampler name the bound program does not declare.
    #[error("program declares no sampler named `{0}`")]
    UnknownSampler(String),

    /// A uniform block name the bound program does not declare.
    #[error("program declares no uniform block named `{0}`")]
    UnknownUniformBlock(String),

    /// A sampler unit the program expects has no texture assigned.
    #[error("no texture assigned for sampler unit {unit}")]
    MissingTexture {
        /// The unassigned texture unit.
        unit: usize,
    },

    /// A uniform block base the program expects has no buffer assigned.
    #[error("no buffer assigned for uniform block base {base}")]
    MissingUniformBuffer {
        /// The unassigned binding base.
        base: usize,
    },

    /// A shader object failed to compile.
    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),

    /// A program failed to link.
    #[error("program linking failed: {0}")]
    ProgramLink(String),
}
