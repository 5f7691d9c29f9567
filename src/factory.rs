//! Factory.

use std::{ffi, mem, os, ptr};

use crate::buffer;
use crate::caps::Capabilities;
use crate::draw_call::DrawCall;
use crate::error::Error;
use crate::gl;
use crate::image;
use crate::program;
use crate::queue::Queue;
use crate::state;
use crate::texture;
use crate::transform_feedback;
use crate::vertex_array;

use crate::program::{
    Bindings,
    Object,
    SamplerBinding,
    UniformBlockBinding,
    MAX_SAMPLERS,
    MAX_UNIFORM_BLOCKS,
};
use crate::texture::{Sampler, Target};
use crate::{Buffer, Program, Texture, TransformFeedback, VertexArray};

fn cstring(name: &str) -> ffi::CString {
    ffi::CString::new(name).expect("binding name contains a NUL byte")
}

/// OpenGL object manager.
///
/// Owns the capability record and the tracked binding state of one
/// context; every object it creates shares both.
#[derive(Clone)]
pub struct Factory {
    /// Function pointers to the OpenGL backend.
    backend: gl::Backend,

    /// Capability record queried once at startup.
    caps: Capabilities,

    /// Tracked bindings of the owning context.
    state: state::Shared,

    /// Destroyed buffers arrive here to be destroyed or recycled.
    buffer_queue: Queue<buffer::Id>,

    /// Destroyed textures arrive here to be destroyed or recycled.
    texture_queue: Queue<texture::Id>,

    /// Destroyed vertex arrays arrive here to be destroyed or recycled.
    vertex_array_queue: Queue<vertex_array::Id>,

    /// Destroyed transform feedback objects arrive here to be destroyed
    /// or recycled.
    transform_feedback_queue: Queue<transform_feedback::Id>,

    /// Destroyed GLSL programs arrive here to be destroyed or recycled.
    program_queue: Queue<program::Destroyed>,
}

impl Factory {
    /// Constructor. Queries the context capability record.
    pub fn new<F>(query_proc_address: F) -> Self
        where F: FnMut(&str) -> *const os::raw::c_void
    {
        let backend = gl::Backend::load(query_proc_address);
        let caps = Capabilities::query(&backend);
        Self {
            backend,
            caps,
            state: state::shared(),
            buffer_queue: Queue::new(),
            texture_queue: Queue::new(),
            vertex_array_queue: Queue::new(),
            transform_feedback_queue: Queue::new(),
            program_queue: Queue::new(),
        }
    }

    /// Returns the capability record queried at startup.
    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Create an uninitialized GPU buffer.
    pub fn buffer(&self, kind: buffer::Kind, usage: buffer::Usage) -> Buffer {
        let id = self.backend.gen_buffer();
        let size = 0;
        let tx = self.buffer_queue.tx();
        Buffer::new(id, kind, size, usage, self.backend.clone(), tx)
    }

    /// (Re)-initialize the contents of a [`Buffer`].
    ///
    /// [`Buffer`]: buffer/struct.Buffer.html
    pub fn initialize_buffer<T>(&self, buffer: &mut Buffer, data: &[T]) {
        let size = data.len() * mem::size_of::<T>();
        self.backend.bind_buffer(buffer.id(), buffer.kind().as_gl_enum());
        self.backend.buffer_data(
            buffer.kind().as_gl_enum(),
            size,
            data.as_ptr() as *const _,
            buffer.usage().as_gl_enum(),
        );
        self.backend.bind_buffer(0, buffer.kind().as_gl_enum());
        buffer.set_size(size);
    }

    /// Overwrite part of a buffer.
    pub fn overwrite_buffer<T>(&self, slice: buffer::Slice, data: &[T]) {
        self.backend.bind_buffer(slice.id(), slice.kind().as_gl_enum());
        self.backend.buffer_sub_data(slice.kind().as_gl_enum(), slice.offset(), slice.length(), data.as_ptr());
        self.backend.bind_buffer(0, slice.kind().as_gl_enum());
    }

    /// A collection of GPU buffers that may be drawn with a program.
    pub fn vertex_array(&self, builder: vertex_array::Builder) -> VertexArray {
        let id = self.backend.gen_vertex_array();
        let tx = self.vertex_array_queue.tx();

        // Setup the vertex array
        {
            self.backend.bind_vertex_array(id);
            if let Some(ref accessor) = builder.indices {
                self.backend.bind_buffer(accessor.buffer().id(), gl::ELEMENT_ARRAY_BUFFER);
            }
            for (binding, accessor) in &builder.attributes {
                self.backend.bind_buffer(accessor.buffer().id(), gl::ARRAY_BUFFER);
                self.backend.enable_vertex_attrib_array(binding as u8);
                self.backend.vertex_attrib_pointer(
                    binding as u8,
                    accessor.format().size() as i32,
                    accessor.format().gl_data_type(),
                    accessor.format().norm(),
                    accessor.stride() as i32,
                    accessor.offset(),
                );
                if let Some(&divisor) = builder.divisors.get(binding) {
                    self.backend.vertex_attrib_divisor(binding as u32, divisor);
                }
            }
            self.backend.bind_vertex_array(0);
            self.state.borrow_mut().vertex_array = None;
        }

        VertexArray::new(id, builder, self.backend.clone(), self.state.clone(), tx)
    }

    /// Compile GLSL shader code into a shader object.
    pub fn shader(
        &self,
        kind: program::Kind,
        source: &ffi::CStr,
    ) -> Result<Object, Error> {
        let id = self.backend.create_shader(kind.as_gl_enum());
        self.backend.shader_source(id, source);
        if !self.backend.compile_shader(id) {
            let log = self.backend.shader_info_log(id);
            let _ = self.program_queue.tx().send(program::Destroyed::Object(id));
            return Err(Error::ShaderCompile(log));
        }
        Ok(Object::new(id, kind, self.program_queue.tx()))
    }

    /// Link GLSL objects into a program and resolve its binding tables.
    ///
    /// Required uniform block names receive binding bases in declaration
    /// order; required sampler names receive texture units in declaration
    /// order, written into the sampler uniforms up front.
    pub fn program(
        &self,
        vertex: &Object,
        fragment: &Object,
        bindings: &Bindings,
    ) -> Result<Program, Error> {
        let id = self.backend.create_program();
        self.backend.attach_shader(id, vertex.id());
        self.backend.attach_shader(id, fragment.id());
        if !self.backend.link_program(id) {
            let log = self.backend.program_info_log(id);
            let _ = self.program_queue.tx().send(program::Destroyed::Program(id));
            return Err(Error::ProgramLink(log));
        }
        let tx = self.program_queue.tx();
        let mut program = Program::new(id, self.backend.clone(), self.state.clone(), tx);

        let mut base = 0;
        for binding in 0..MAX_UNIFORM_BLOCKS {
            if let UniformBlockBinding::Required(name) = bindings.uniform_blocks[binding] {
                let index = match self.backend.get_uniform_block_index(id, &cstring(name)) {
                    gl::INVALID_INDEX => return Err(Error::UnknownUniformBlock(name.to_string())),
                    index => index,
                };
                self.backend.uniform_block_binding(id, index, base);
                program.uniform_blocks.insert(name.to_string(), base);
                base += 1;
            }
        }

        self.backend.use_program(id);
        self.state.borrow_mut().program = Some(id);
        let mut unit = 0;
        for binding in 0..MAX_SAMPLERS {
            if let SamplerBinding::Required(name) = bindings.samplers[binding] {
                let location = match self.backend.get_uniform_location(id, &cstring(name)) {
                    -1 => return Err(Error::UnknownSampler(name.to_string())),
                    location => location,
                };
                self.backend.uniform1i(location, unit as i32);
                program.samplers.insert(name.to_string(), unit);
                unit += 1;
            }
        }

        Ok(program)
    }

    /// Create a 2D texture backed by uninitialized GPU memory.
    pub fn texture2(
        &self,
        width: u32,
        height: u32,
        mipmap: bool,
        format: texture::Format,
        sampler: Sampler,
    ) -> Texture {
        let id = self.backend.gen_texture();
        let tx = self.texture_queue.tx();
        self.backend.bind_texture(gl::TEXTURE_2D, id);
        self.backend.tex_image_2d(
            gl::TEXTURE_2D,
            format.as_gl_enum(),
            width,
            height,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            ptr::null(),
        );
        self.apply_sampler(gl::TEXTURE_2D, &sampler);
        if mipmap {
            self.backend.generate_mipmap(gl::TEXTURE_2D);
        }
        self.backend.bind_texture(gl::TEXTURE_2D, 0);
        Texture::new(id, Target::Texture2, width, height, mipmap, format, self.backend.clone(), tx)
    }

    /// Create a cube map texture backed by uninitialized GPU memory.
    pub fn cubemap(
        &self,
        size: u32,
        mipmap: bool,
        format: texture::Format,
        sampler: Sampler,
    ) -> Texture {
        let id = self.backend.gen_texture();
        let tx = self.texture_queue.tx();
        self.backend.bind_texture(gl::TEXTURE_CUBE_MAP, id);
        for face in 0..6 {
            self.backend.tex_image_2d(
                gl::TEXTURE_CUBE_MAP_POSITIVE_X + face,
                format.as_gl_enum(),
                size,
                size,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                ptr::null(),
            );
        }
        self.apply_sampler(gl::TEXTURE_CUBE_MAP, &sampler);
        if mipmap {
            self.backend.generate_mipmap(gl::TEXTURE_CUBE_MAP);
        }
        self.backend.bind_texture(gl::TEXTURE_CUBE_MAP, 0);
        Texture::new(id, Target::Cubemap, size, size, mipmap, format, self.backend.clone(), tx)
    }

    fn apply_sampler(&self, target: u32, sampler: &Sampler) {
        self.backend.tex_parameteri(target, gl::TEXTURE_MAG_FILTER, sampler.mag_filter.as_gl_enum());
        self.backend.tex_parameteri(target, gl::TEXTURE_MIN_FILTER, sampler.min_filter.as_gl_enum());
        self.backend.tex_parameteri(target, gl::TEXTURE_WRAP_S, sampler.wrap_s.as_gl_enum());
        self.backend.tex_parameteri(target, gl::TEXTURE_WRAP_T, sampler.wrap_t.as_gl_enum());
    }

    /// (Re)-initialize the contents of a 2D [`Texture`].
    ///
    /// [`Texture`]: texture/struct.Texture.html
    pub fn write_texture2<F, T>(
        &self,
        texture: &Texture,
        format: F,
        data: &[T],
    )
        where image::Format: From<F>
    {
        self.backend.bind_texture(gl::TEXTURE_2D, texture.id());
        let (ty, format) = image::Format::from(format).as_gl_enums();
        self.backend.tex_image_2d(
            gl::TEXTURE_2D,
            texture.format().as_gl_enum(),
            texture.width() as u32,
            texture.height() as u32,
            format,
            ty,
            data.as_ptr() as *const _,
        );
        if texture.mipmap() {
            self.backend.generate_mipmap(gl::TEXTURE_2D);
        }
        self.backend.bind_texture(gl::TEXTURE_2D, 0);
    }

    /// Create a transform feedback object with no capture buffers.
    pub fn transform_feedback(&self) -> TransformFeedback {
        let id = self.backend.gen_transform_feedback();
        let tx = self.transform_feedback_queue.tx();
        TransformFeedback::new(id, self.backend.clone(), tx)
    }

    /// Attach a capture buffer to a transform feedback binding point.
    pub fn capture_buffer(
        &self,
        target: &TransformFeedback,
        index: u32,
        buffer: &Buffer,
    ) {
        self.backend.bind_transform_feedback(target.id());
        self.backend.bind_buffer_base(gl::TRANSFORM_FEEDBACK_BUFFER, index, buffer.id());
        self.backend.bind_transform_feedback(0);
        self.state.borrow_mut().transform_feedback = None;
    }

    /// Assemble a reusable draw call for a program/vertex array pair.
    pub fn draw_call(&self, program: &Program, vertex_array: &VertexArray) -> DrawCall {
        DrawCall::new(
            self.backend.clone(),
            self.caps,
            self.state.clone(),
            program,
            vertex_array,
        )
    }

    /// Delete the GL objects whose last handle has been dropped.
    pub fn recycle(&self) {
        while let Some(id) = self.buffer_queue.next() {
            self.backend.delete_buffer(id);
        }
        while let Some(id) = self.texture_queue.next() {
            self.backend.delete_texture(id);
        }
        while let Some(id) = self.vertex_array_queue.next() {
            self.backend.delete_vertex_array(id);
        }
        while let Some(id) = self.transform_feedback_queue.next() {
            self.backend.delete_transform_feedback(id);
        }
        while let Some(item) = self.program_queue.next() {
            match item {
                program::Destroyed::Object(id) => self.backend.delete_shader(id),
                program::Destroyed::Program(id) => self.backend.delete_program(id),
            }
        }
    }
}
