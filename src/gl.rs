use std::{ffi, os, ptr, rc};

// Import OpenGL bindings.
include!(concat!(env!("OUT_DIR"), "/gl.rs"));

/// Per-sub-draw record consumed by `glMultiDrawArraysIndirect`.
///
/// Records are sourced from client memory; no buffer is ever bound to
/// `GL_DRAW_INDIRECT_BUFFER`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct DrawArraysIndirectCommand {
    /// Number of vertices per instance.
    pub(crate) count: u32,

    /// Number of instances.
    pub(crate) instance_count: u32,

    /// First vertex index.
    pub(crate) first: u32,

    /// Must be zero on contexts without base-instance support.
    pub(crate) base_instance: u32,
}

/// Per-sub-draw record consumed by `glMultiDrawElementsIndirect`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct DrawElementsIndirectCommand {
    /// Number of elements per instance.
    pub(crate) count: u32,

    /// Number of instances.
    pub(crate) instance_count: u32,

    /// First element, counted in indices rather than bytes.
    pub(crate) first_index: u32,

    /// Constant added to each index.
    pub(crate) base_vertex: i32,

    /// Must be zero on contexts without base-instance support.
    pub(crate) base_instance: u32,
}

#[derive(Clone)]
pub struct Backend {
    gl: rc::Rc<Gl>,
}

impl Backend {
    /// Constructor.
    pub fn load<F>(mut func: F) -> Self
        where F: FnMut(&str) -> *const os::raw::c_void
    {
        let gl = rc::Rc::new(Gl::load_with(|sym| func(sym) as *const _));
        Backend { gl }
    }

    // Error checking

    /// Corresponds to `glGetError` plus an error check.
    pub fn check_error(&self) {
        let error = unsafe { self.gl.GetError() };
        if error != 0 {
            error!(target: "gl", "0x{:x}", error);
        }
    }

    // Capability queries

    /// Corresponds to `glGetIntegerv(pname)`.
    pub fn get_integer(&self, pname: u32) -> i32 {
        let mut value = 0i32;
        unsafe {
            trace!(target: "gl", "glGetIntegerv{:?} ", (pname,));
            self.gl.GetIntegerv(pname, &mut value as *mut _);
        }
        trace!(target: "gl", "=> {}", value);
        self.check_error();
        value
    }

    /// Returns `true` if the plain multi-draw entry points were loaded.
    pub fn has_multi_draw(&self) -> bool {
        self.gl.MultiDrawArrays.is_loaded() && self.gl.MultiDrawElements.is_loaded()
    }

    /// Returns `true` if the indirect multi-draw entry points were loaded.
    pub fn has_multi_draw_indirect(&self) -> bool {
        self.gl.MultiDrawArraysIndirect.is_loaded()
            && self.gl.MultiDrawElementsIndirect.is_loaded()
    }

    // Buffer operations

    /// Corresponds to `glGenBuffers(1)`.
    pub fn gen_buffer(&self) -> u32 {
        let mut id: u32 = 0;
        unsafe {
            trace!(target: "gl", "glGenBuffers(1) ");
            self.gl.GenBuffers(1, &mut id as *mut _)
        };
        trace!(target: "gl", " => {}", id);
        self.check_error();
        id
    }

    /// Corresponds to `glBindBuffer`.
    pub fn bind_buffer(&self, id: u32, ty: u32) {
        unsafe {
            trace!(target: "gl", "glBindBuffer{:?}", (ty, id));
            self.gl.BindBuffer(ty, id);
        }
        self.check_error();
    }

    /// Corresponds to `glBufferData`.
    pub fn buffer_data<T>(&self, ty: u32, len: usize, ptr: *const T, usage: u32) {
        unsafe {
            trace!(target: "gl", "glBufferData{:?}", (ty, len, ptr, usage));
            self.gl.BufferData(ty, len as _, ptr as *const _, usage);
        }
        self.check_error();
    }

    /// Corresponds to `glBufferSubData`.
    pub fn buffer_sub_data<T>(&self, ty: u32, off: usize, len: usize, ptr: *const T) {
        unsafe {
            trace!(target: "gl", "glBufferSubData{:?}", (ty, off, len, ptr));
            self.gl.BufferSubData(ty, off as _, len as _, ptr as *const _);
        }
        self.check_error();
    }

    /// Corresponds to `glBindBufferBase`.
    pub fn bind_buffer_base(&self, target: u32, binding: u32, id: u32) {
        unsafe {
            trace!(target: "gl", "glBindBufferBase{:?}", (target, binding, id));
            self.gl.BindBufferBase(target, binding, id);
        }
        self.check_error();
    }

    /// Corresponds to `glDeleteBuffers(1)`.
    pub fn delete_buffer(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glDeleteBuffers{:?}", (1, id));
            self.gl.DeleteBuffers(1, &id as *const _);
        }
        self.check_error();
    }

    // Vertex array operations

    /// Corresponds to `glGenVertexArrays(1)`.
    pub fn gen_vertex_array(&self) -> u32 {
        let mut id: u32 = 0;
        unsafe {
            trace!(target: "gl", "glGenVertexArrays(1) ");
            self.gl.GenVertexArrays(1, &mut id as *mut _);
            trace!(target: "gl", "=> {}", id);
        }
        self.check_error();
        id
    }

    /// Corresponds to `glBindVertexArray`.
    pub fn bind_vertex_array(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glBindVertexArray{:?}", (id,));
            self.gl.BindVertexArray(id);
        }
        self.check_error();
    }

    /// Corresponds to `glVertexAttribPointer`.
    pub fn vertex_attrib_pointer(&self, id: u8, sz: i32, ty: u32, norm: bool, stride: i32, off: usize) {
        unsafe {
            trace!(target: "gl", "glVertexAttribPointer{:?}", (id, sz, ty, norm, stride, off));
            self.gl.VertexAttribPointer(id as _, sz as _, ty, if norm { 1 } else { 0 }, stride as _, off as *const _);
        }
        self.check_error();
    }

    /// Corresponds to `glVertexAttribDivisor`.
    pub fn vertex_attrib_divisor(&self, id: u32, divisor: u32) {
        unsafe {
            trace!(target: "gl", "glVertexAttribDivisor{:?}", (id, divisor));
            self.gl.VertexAttribDivisor(id, divisor);
        }
        self.check_error();
    }

    /// Corresponds to `glEnableVertexAttribArray`.
    pub fn enable_vertex_attrib_array(&self, idx: u8) {
        unsafe {
            trace!(target: "gl", "glEnableVertexAttribArray{:?}", (idx,));
            self.gl.EnableVertexAttribArray(idx as _);
        }
        self.check_error();
    }

    /// Corresponds to `glDeleteVertexArrays(1)`.
    pub fn delete_vertex_array(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glDeleteVertexArrays{:?}", (1, id));
            self.gl.DeleteVertexArrays(1, &id as *const _);
        }
        self.check_error();
    }

    // Program operations

    /// Corresponds to `glCreateShader`.
    pub fn create_shader(&self, ty: u32) -> u32 {
        let id = unsafe {
            trace!(target: "gl", "glCreateShader{:?} ", (ty,));
            self.gl.CreateShader(ty)
        };
        trace!(target: "gl", "=> {}", id);
        self.check_error();
        id
    }

    /// Corresponds to `glShaderSource`.
    pub fn shader_source(&self, id: u32, source: &ffi::CStr) {
        unsafe {
            trace!(target: "gl", "glShaderSource{:?}", (id, source));
            let ptr = source.as_ptr();
            self.gl.ShaderSource(id, 1, &ptr as *const _, ptr::null());
        }
        self.check_error();
    }

    /// Corresponds to `glCompileShader` plus a status query.
    pub fn compile_shader(&self, id: u32) -> bool {
        let mut status = 0i32;
        unsafe {
            trace!(target: "gl", "glCompileShader{:?}", (id,));
            self.gl.CompileShader(id);
            self.check_error();
            self.gl.GetShaderiv(id, COMPILE_STATUS, &mut status as *mut _);
        }
        self.check_error();
        status != 0
    }

    /// Corresponds to `glGetShaderInfoLog`.
    pub fn shader_info_log(&self, id: u32) -> String {
        let mut length = 0i32;
        unsafe {
            self.gl.GetShaderiv(id, INFO_LOG_LENGTH, &mut length as *mut _);
        }
        let mut contents = vec![0u8; length as usize];
        unsafe {
            trace!(target: "gl", "glGetShaderInfoLog{:?}", (id, length));
            self.gl.GetShaderInfoLog(id, length, ptr::null_mut(), contents.as_mut_ptr() as *mut _);
        }
        self.check_error();
        while contents.last() == Some(&0) {
            contents.pop();
        }
        String::from_utf8_lossy(&contents).into_owned()
    }

    /// Corresponds to `glDeleteShader`.
    pub fn delete_shader(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glDeleteShader{:?}", (id,));
            self.gl.DeleteShader(id);
        }
        self.check_error();
    }

    /// Corresponds to `glCreateProgram`.
    pub fn create_program(&self) -> u32 {
        let id = unsafe {
            trace!(target: "gl", "glCreateProgram() ");
            self.gl.CreateProgram()
        };
        trace!(target: "gl", "=> {}", id);
        self.check_error();
        id
    }

    /// Corresponds to `glAttachShader`.
    pub fn attach_shader(&self, program: u32, shader: u32) {
        unsafe {
            trace!(target: "gl", "glAttachShader{:?}", (program, shader));
            self.gl.AttachShader(program, shader);
        }
        self.check_error();
    }

    /// Corresponds to `glLinkProgram` plus a status query.
    pub fn link_program(&self, id: u32) -> bool {
        let mut status = 0i32;
        unsafe {
            trace!(target: "gl", "glLinkProgram{:?}", (id,));
            self.gl.LinkProgram(id);
            self.check_error();
            trace!(target: "gl", "glGetProgramiv{:?} ", (id, LINK_STATUS));
            self.gl.GetProgramiv(id, LINK_STATUS, &mut status as *mut _);
            trace!(target: "gl", "=> {}", status);
        }
        self.check_error();
        status != 0
    }

    /// Corresponds to `glGetProgramInfoLog`.
    pub fn program_info_log(&self, id: u32) -> String {
        let mut length = 0i32;
        unsafe {
            self.gl.GetProgramiv(id, INFO_LOG_LENGTH, &mut length as *mut _);
        }
        let mut contents = vec![0u8; length as usize];
        unsafe {
            trace!(target: "gl", "glGetProgramInfoLog{:?}", (id, length));
            self.gl.GetProgramInfoLog(id, length, ptr::null_mut(), contents.as_mut_ptr() as *mut _);
        }
        self.check_error();
        while contents.last() == Some(&0) {
            contents.pop();
        }
        String::from_utf8_lossy(&contents).into_owned()
    }

    /// Corresponds to `glDeleteProgram`.
    pub fn delete_program(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glDeleteProgram{:?}", (id,));
            self.gl.DeleteProgram(id);
        }
        self.check_error();
    }

    /// Corresponds to `glUseProgram`.
    pub fn use_program(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glUseProgram{:?}", (id,));
            self.gl.UseProgram(id);
        }
        self.check_error();
    }

    /// Corresponds to `glGetUniformBlockIndex`.
    pub fn get_uniform_block_index(&self, id: u32, name: &ffi::CStr) -> u32 {
        let index;
        unsafe {
            trace!(target: "gl", "glGetUniformBlockIndex{:?} ", (id, name));
            index = self.gl.GetUniformBlockIndex(id, name.as_ptr() as _);
            trace!(target: "gl", "=> {}", index);
        }
        self.check_error();
        index
    }

    /// Corresponds to `glUniformBlockBinding`.
    pub fn uniform_block_binding(&self, program: u32, index: u32, binding: u32) {
        trace!(target: "gl", "glUniformBlockBinding{:?} ", (program, index, binding));
        unsafe {
            self.gl.UniformBlockBinding(program, index, binding);
        }
        self.check_error();
    }

    /// Corresponds to `glGetUniformLocation`.
    pub fn get_uniform_location(&self, id: u32, name: &ffi::CStr) -> i32 {
        let index;
        unsafe {
            trace!(target: "gl", "glGetUniformLocation{:?} ", (id, name));
            index = self.gl.GetUniformLocation(id, name.as_ptr() as _);
            trace!(target: "gl", "=> {}", index);
        }
        self.check_error();
        index
    }

    // Uniform upload operations

    /// Corresponds to `glUniform1f`.
    pub fn uniform1f(&self, location: i32, v: f32) {
        unsafe {
            trace!(target: "gl", "glUniform1f{:?}", (location, v));
            self.gl.Uniform1f(location, v);
        }
        self.check_error();
    }

    /// Corresponds to `glUniform1i`.
    pub fn uniform1i(&self, location: i32, v: i32) {
        unsafe {
            trace!(target: "gl", "glUniform1i{:?}", (location, v));
            self.gl.Uniform1i(location, v);
        }
        self.check_error();
    }

    /// Corresponds to `glUniform1fv`.
    pub fn uniform1fv(&self, location: i32, count: i32, values: &[f32]) {
        unsafe {
            trace!(target: "gl", "glUniform1fv{:?}", (location, count, values));
            self.gl.Uniform1fv(location, count, values.as_ptr());
        }
        self.check_error();
    }

    /// Corresponds to `glUniform1iv`.
    pub fn uniform1iv(&self, location: i32, count: i32, values: &[i32]) {
        unsafe {
            trace!(target: "gl", "glUniform1iv{:?}", (location, count, values));
            self.gl.Uniform1iv(location, count, values.as_ptr());
        }
        self.check_error();
    }

    /// Corresponds to `glUniform2fv`.
    pub fn uniform2fv(&self, location: i32, count: i32, values: &[f32]) {
        unsafe {
            trace!(target: "gl", "glUniform2fv{:?}", (location, count, values));
            self.gl.Uniform2fv(location, count, values.as_ptr());
        }
        self.check_error();
    }

    /// Corresponds to `glUniform2iv`.
    pub fn uniform2iv(&self, location: i32, count: i32, values: &[i32]) {
        unsafe {
            trace!(target: "gl", "glUniform2iv{:?}", (location, count, values));
            self.gl.Uniform2iv(location, count, values.as_ptr());
        }
        self.check_error();
    }

    /// Corresponds to `glUniform3fv`.
    pub fn uniform3fv(&self, location: i32, count: i32, values: &[f32]) {
        unsafe {
            trace!(target: "gl", "glUniform3fv{:?}", (location, count, values));
            self.gl.Uniform3fv(location, count, values.as_ptr());
        }
        self.check_error();
    }

    /// Corresponds to `glUniform3iv`.
    pub fn uniform3iv(&self, location: i32, count: i32, values: &[i32]) {
        unsafe {
            trace!(target: "gl", "glUniform3iv{:?}", (location, count, values));
            self.gl.Uniform3iv(location, count, values.as_ptr());
        }
        self.check_error();
    }

    /// Corresponds to `glUniform4fv`.
    pub fn uniform4fv(&self, location: i32, count: i32, values: &[f32]) {
        unsafe {
            trace!(target: "gl", "glUniform4fv{:?}", (location, count, values));
            self.gl.Uniform4fv(location, count, values.as_ptr());
        }
        self.check_error();
    }

    /// Corresponds to `glUniform4iv`.
    pub fn uniform4iv(&self, location: i32, count: i32, values: &[i32]) {
        unsafe {
            trace!(target: "gl", "glUniform4iv{:?}", (location, count, values));
            self.gl.Uniform4iv(location, count, values.as_ptr());
        }
        self.check_error();
    }

    /// Corresponds to `glUniformMatrix2fv`.
    pub fn uniform_matrix2fv(&self, location: i32, count: i32, values: &[f32]) {
        unsafe {
            trace!(target: "gl", "glUniformMatrix2fv{:?}", (location, count, values));
            self.gl.UniformMatrix2fv(location, count, FALSE, values.as_ptr());
        }
        self.check_error();
    }

    /// Corresponds to `glUniformMatrix3fv`.
    pub fn uniform_matrix3fv(&self, location: i32, count: i32, values: &[f32]) {
        unsafe {
            trace!(target: "gl", "glUniformMatrix3fv{:?}", (location, count, values));
            self.gl.UniformMatrix3fv(location, count, FALSE, values.as_ptr());
        }
        self.check_error();
    }

    /// Corresponds to `glUniformMatrix4fv`.
    pub fn uniform_matrix4fv(&self, location: i32, count: i32, values: &[f32]) {
        unsafe {
            trace!(target: "gl", "glUniformMatrix4fv{:?}", (location, count, values));
            self.gl.UniformMatrix4fv(location, count, FALSE, values.as_ptr());
        }
        self.check_error();
    }

    // Texture operations

    /// Corresponds to `glGenTextures(1)`.
    pub fn gen_texture(&self) -> u32 {
        let mut id = INVALID_INDEX;
        unsafe {
            trace!(target: "gl", "glGenTextures(1) ");
            self.gl.GenTextures(1, &mut id as *mut _);
            trace!(target: "gl", "=> {}", id);
        }
        self.check_error();
        id
    }

    /// Corresponds to `glBindTexture`.
    pub fn bind_texture(&self, ty: u32, id: u32) {
        unsafe {
            trace!(target: "gl", "glBindTexture{:?}", (ty, id));
            self.gl.BindTexture(ty, id);
        }
        self.check_error();
    }

    /// Corresponds to `glActiveTexture(GL_TEXTURE0 + index)`.
    pub fn active_texture(&self, index: u32) {
        unsafe {
            trace!(target: "gl", "glActiveTexture{:?}", (index,));
            self.gl.ActiveTexture(TEXTURE0 + index);
        }
        self.check_error();
    }

    /// Corresponds to `glTexParameteri`.
    pub fn tex_parameteri(&self, ty: u32, param: u32, value: u32) {
        unsafe {
            trace!(target: "gl", "glTexParameteri{:?}", (ty, param, value));
            self.gl.TexParameteri(ty, param, value as i32);
        }
        self.check_error();
    }

    /// Corresponds to `glTexImage2D`.
    pub fn tex_image_2d(
        &self,
        target: u32,
        internal_format: u32,
        width: u32,
        height: u32,
        format: u32,
        ty: u32,
        data: *const os::raw::c_void,
    ) {
        unsafe {
            trace!(target: "gl",
                "glTexImage2D{:?}",
                (
                    target,
                    0,
                    internal_format,
                    width,
                    height,
                    0,
                    format,
                    ty,
                    data,
                ),
            );
            self.gl.TexImage2D(
                target,
                0,
                internal_format as _,
                width as _,
                height as _,
                0,
                format,
                ty,
                data,
            );
        }
        self.check_error();
    }

    /// Corresponds to `glGenerateMipmap`.
    pub fn generate_mipmap(&self, target: u32) {
        unsafe {
            trace!(target: "gl", "glGenerateMipmap{:?}", (target,));
            self.gl.GenerateMipmap(target);
        }
        self.check_error();
    }

    /// Corresponds to `glDeleteTextures(1)`.
    pub fn delete_texture(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glDeleteTextures{:?}", (1, id));
            self.gl.DeleteTextures(1, &id as *const _);
        }
        self.check_error();
    }

    // Transform feedback operations

    /// Corresponds to `glGenTransformFeedbacks(1)`.
    pub fn gen_transform_feedback(&self) -> u32 {
        let mut id: u32 = 0;
        unsafe {
            trace!(target: "gl", "glGenTransformFeedbacks(1) ");
            self.gl.GenTransformFeedbacks(1, &mut id as *mut _);
            trace!(target: "gl", "=> {}", id);
        }
        self.check_error();
        id
    }

    /// Corresponds to `glBindTransformFeedback`.
    pub fn bind_transform_feedback(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glBindTransformFeedback{:?}", (TRANSFORM_FEEDBACK, id));
            self.gl.BindTransformFeedback(TRANSFORM_FEEDBACK, id);
        }
        self.check_error();
    }

    /// Corresponds to `glBeginTransformFeedback`.
    pub fn begin_transform_feedback(&self, primitive: u32) {
        unsafe {
            trace!(target: "gl", "glBeginTransformFeedback{:?}", (primitive,));
            self.gl.BeginTransformFeedback(primitive);
        }
        self.check_error();
    }

    /// Corresponds to `glEndTransformFeedback`.
    pub fn end_transform_feedback(&self) {
        unsafe {
            trace!(target: "gl", "glEndTransformFeedback() ");
            self.gl.EndTransformFeedback();
        }
        self.check_error();
    }

    /// Corresponds to `glDeleteTransformFeedbacks(1)`.
    pub fn delete_transform_feedback(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glDeleteTransformFeedbacks{:?}", (1, id));
            self.gl.DeleteTransformFeedbacks(1, &id as *const _);
        }
        self.check_error();
    }

    // Draw submission operations

    /// Corresponds to `glDrawArrays`.
    pub fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        unsafe {
            trace!(target: "gl", "glDrawArrays{:?}", (mode, first, count));
            self.gl.DrawArrays(mode, first, count);
        }
        self.check_error();
    }

    /// Corresponds to `glDrawElements`.
    ///
    /// The offset is a byte offset into the bound element array buffer.
    pub fn draw_elements(&self, mode: u32, count: i32, ty: u32, offset: i32) {
        unsafe {
            trace!(target: "gl", "glDrawElements{:?}", (mode, count, ty, offset));
            self.gl.DrawElements(mode, count, ty, offset as usize as *const _);
        }
        self.check_error();
    }

    /// Corresponds to `glDrawArraysInstanced`.
    pub fn draw_arrays_instanced(&self, mode: u32, first: i32, count: i32, instances: i32) {
        unsafe {
            trace!(target: "gl", "glDrawArraysInstanced{:?}", (mode, first, count, instances));
            self.gl.DrawArraysInstanced(mode, first, count, instances);
        }
        self.check_error();
    }

    /// Corresponds to `glDrawElementsInstanced`.
    pub fn draw_elements_instanced(&self, mode: u32, count: i32, ty: u32, offset: i32, instances: i32) {
        unsafe {
            trace!(target: "gl", "glDrawElementsInstanced{:?}", (mode, count, ty, offset, instances));
            self.gl.DrawElementsInstanced(mode, count, ty, offset as usize as *const _, instances);
        }
        self.check_error();
    }

    /// Corresponds to `glMultiDrawArrays`.
    pub fn multi_draw_arrays(&self, mode: u32, firsts: &[i32], counts: &[i32]) {
        unsafe {
            trace!(target: "gl", "glMultiDrawArrays{:?}", (mode, firsts, counts));
            self.gl.MultiDrawArrays(mode, firsts.as_ptr(), counts.as_ptr(), counts.len() as i32);
        }
        self.check_error();
    }

    /// Corresponds to `glMultiDrawElements`.
    ///
    /// Offsets are byte offsets into the bound element array buffer.
    pub fn multi_draw_elements(&self, mode: u32, counts: &[i32], ty: u32, offsets: &[i32]) {
        let indices: Vec<*const os::raw::c_void> = offsets
            .iter()
            .map(|&offset| offset as usize as *const os::raw::c_void)
            .collect();
        unsafe {
            trace!(target: "gl", "glMultiDrawElements{:?}", (mode, counts, ty, offsets));
            self.gl.MultiDrawElements(mode, counts.as_ptr(), ty, indices.as_ptr(), counts.len() as i32);
        }
        self.check_error();
    }

    /// Corresponds to `glMultiDrawArraysIndirect` with command records in
    /// client memory.
    pub(crate) fn multi_draw_arrays_indirect(&self, mode: u32, commands: &[DrawArraysIndirectCommand]) {
        unsafe {
            trace!(target: "gl", "glMultiDrawArraysIndirect{:?}", (mode, commands));
            self.gl.MultiDrawArraysIndirect(mode, commands.as_ptr() as *const _, commands.len() as i32, 0);
        }
        self.check_error();
    }

    /// Corresponds to `glMultiDrawElementsIndirect` with command records in
    /// client memory.
    pub(crate) fn multi_draw_elements_indirect(&self, mode: u32, ty: u32, commands: &[DrawElementsIndirectCommand]) {
        unsafe {
            trace!(target: "gl", "glMultiDrawElementsIndirect{:?}", (mode, ty, commands));
            self.gl.MultiDrawElementsIndirect(mode, ty, commands.as_ptr() as *const _, commands.len() as i32, 0);
        }
        self.check_error();
    }
}
