//! Thin draw-call batching and submission layer over OpenGL.
//!
//! A [`DrawCall`] gathers a shader program, a vertex array, per-draw
//! uniform values, texture and uniform-buffer bindings, and an optional
//! transform feedback capture target into one reusable object, then
//! submits the lot through the narrowest entry point the context offers:
//! indexed or not, instanced or not, batched through a multi-draw entry
//! point or looped one sub-draw at a time.
//!
//! [`DrawCall`]: draw_call/struct.DrawCall.html

#[macro_use]
extern crate log;

#[cfg(feature = "macros")]
#[macro_use]
mod macros;

mod caps;
mod factory;
mod queue;
mod state;

pub mod gl;

pub mod buffer;
pub mod draw_call;
pub mod error;
pub mod image;
pub mod program;
pub mod texture;
pub mod transform_feedback;
pub mod uniform;
pub mod vertex_array;

use std::os;

/// Initialize the library, creating a factory to instantiate library
/// objects against the current context.
///
/// Context capabilities are queried once here and treated as constants
/// for the lifetime of the factory.
pub fn init<F>(query_proc_address: F) -> Factory
    where F: FnMut(&str) -> *const os::raw::c_void
{
    Factory::new(query_proc_address)
}

#[doc(inline)]
pub use crate::buffer::Accessor;

#[doc(inline)]
pub use crate::buffer::Buffer;

#[doc(inline)]
pub use crate::caps::Capabilities;

#[doc(inline)]
pub use crate::draw_call::DrawCall;

#[doc(inline)]
pub use crate::draw_call::Primitive;

#[doc(inline)]
pub use crate::error::Error;

#[doc(inline)]
pub use crate::factory::Factory;

#[doc(inline)]
pub use crate::program::Program;

#[doc(inline)]
pub use crate::texture::Texture;

#[doc(inline)]
pub use crate::transform_feedback::TransformFeedback;

#[doc(inline)]
pub use crate::uniform::Uniform;

#[doc(inline)]
pub use crate::vertex_array::VertexArray;
