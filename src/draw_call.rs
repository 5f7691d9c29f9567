//! Draw call assembly and dispatch.

use std::cmp;
use std::collections::HashMap;

use crate::buffer::Buffer;
use crate::caps::Capabilities;
use crate::error::Error;
use crate::gl;
use crate::program::Program;
use crate::state;
use crate::texture::Texture;
use crate::transform_feedback::TransformFeedback;
use crate::uniform::Uniform;
use crate::vertex_array::{Draws, VertexArray};

/// Primitive topology.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Primitive {
    /// List of points.
    Points,

    /// List of line segments.
    Lines,

    /// Connected line segments.
    LineStrip,

    /// List of triangle points.
    Triangles,

    /// Connected triangles.
    TriangleStrip,
}

impl Primitive {
    pub(crate) fn as_gl_enum(self) -> u32 {
        match self {
            Primitive::Points => gl::POINTS,
            Primitive::Lines => gl::LINES,
            Primitive::LineStrip => gl::LINE_STRIP,
            Primitive::Triangles => gl::TRIANGLES,
            Primitive::TriangleStrip => gl::TRIANGLE_STRIP,
        }
    }
}

/// One of the eight mutually exclusive submission paths.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
enum Path {
    /// One batched instanced submission over all indexed sub-draws.
    MultiElementsInstanced,

    /// One batched instanced submission over all array sub-draws.
    MultiArraysInstanced,

    /// One indexed instanced submission per sub-draw.
    ElementsInstancedLoop,

    /// One array instanced submission per sub-draw.
    ArraysInstancedLoop,

    /// One batched submission over all indexed sub-draws.
    MultiElements,

    /// One batched submission over all array sub-draws.
    MultiArrays,

    /// One indexed submission per sub-draw.
    ElementsLoop,

    /// One array submission per sub-draw.
    ArraysLoop,
}

/// Submission path decision table.
///
/// `multi_draw` is the capability flag for the relevant family: the
/// batched instanced entry points when `instanced` holds, the plain
/// multi-draw entry points otherwise. The two families must never be
/// conflated.
fn select_path(instanced: bool, multi_draw: bool, indexed: bool) -> Path {
    match (instanced, multi_draw, indexed) {
        (true, true, true) => Path::MultiElementsInstanced,
        (true, true, false) => Path::MultiArraysInstanced,
        (true, false, true) => Path::ElementsInstancedLoop,
        (true, false, false) => Path::ArraysInstancedLoop,
        (false, true, true) => Path::MultiElements,
        (false, true, false) => Path::MultiArrays,
        (false, false, true) => Path::ElementsLoop,
        (false, false, false) => Path::ArraysLoop,
    }
}

/// Capture target transition for one submission.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Capture {
    /// Bind the target and begin capture.
    Begin(u32),

    /// Unbind a target left bound by an earlier draw call.
    Release,

    /// No capture state to touch.
    Keep,
}

fn capture_transition(target: Option<u32>, bound: Option<u32>) -> Capture {
    match (target, bound) {
        (Some(id), _) => Capture::Begin(id),
        (None, Some(_)) => Capture::Release,
        (None, None) => Capture::Keep,
    }
}

fn array_commands(
    counts: &[i32],
    instances: &[i32],
    offsets: &[i32],
) -> Vec<gl::DrawArraysIndirectCommand> {
    (0..counts.len())
        .map(|index| gl::DrawArraysIndirectCommand {
            count: counts[index] as u32,
            instance_count: instances[index] as u32,
            first: offsets[index] as u32,
            base_instance: 0,
        })
        .collect()
}

fn element_commands(
    counts: &[i32],
    instances: &[i32],
    offsets: &[i32],
    index_size: i32,
) -> Vec<gl::DrawElementsIndirectCommand> {
    (0..counts.len())
        .map(|index| gl::DrawElementsIndirectCommand {
            count: counts[index] as u32,
            instance_count: instances[index] as u32,
            first_index: (offsets[index] / index_size) as u32,
            base_vertex: 0,
            base_instance: 0,
        })
        .collect()
}

/// The program and values of associated uniforms, textures, buffers and
/// transform feedback state for a single draw call.
///
/// A draw call is bound to one program/vertex array pair for its whole
/// life and is typically reused across many frames, with values replaced
/// between submissions through the builder-style setters. It owns none of
/// the referenced resources.
pub struct DrawCall {
    /// Function pointers to the OpenGL backend.
    backend: gl::Backend,

    /// Capability record queried at startup.
    caps: Capabilities,

    /// Tracked bindings of the owning context.
    state: state::Shared,

    /// The program to use for this draw call.
    program: Program,

    /// The vertex array to use for this draw call.
    vertex_array: VertexArray,

    /// The transform feedback target to capture into, if any.
    transform_feedback: Option<TransformFeedback>,

    /// Slot indices keyed by uniform name, in first-seen order.
    uniform_indices: HashMap<String, usize>,

    /// Uniform names by slot.
    uniform_names: Vec<String>,

    /// Uniform values by slot.
    uniform_values: Vec<Uniform>,

    /// Uniform buffers by binding base.
    uniform_buffers: Vec<Option<Buffer>>,

    /// Textures by texture unit.
    textures: Vec<Option<Texture>>,

    /// The primitive topology being drawn.
    primitive: Primitive,

    /// Sub-draw tables shared with the vertex array.
    draws: Draws,
}

impl DrawCall {
    /// Constructor.
    pub(crate) fn new(
        backend: gl::Backend,
        caps: Capabilities,
        state: state::Shared,
        program: &Program,
        vertex_array: &VertexArray,
    ) -> Self {
        Self {
            uniform_indices: HashMap::new(),
            uniform_names: Vec::new(),
            uniform_values: Vec::new(),
            uniform_buffers: vec![None; caps.max_uniform_buffers],
            textures: vec![None; caps.max_texture_units],
            primitive: Primitive::Triangles,
            transform_feedback: None,
            draws: vertex_array.draws(),
            program: program.clone(),
            vertex_array: vertex_array.clone(),
            backend,
            caps,
            state,
        }
    }

    /// Sets the primitive topology.
    pub fn primitive(&mut self, primitive: Primitive) -> &mut Self {
        self.primitive = primitive;
        self
    }

    /// Sets or clears the transform feedback target to capture into.
    ///
    /// Side-effect free until [`draw`] is invoked.
    ///
    /// [`draw`]: #method.draw
    pub fn transform_feedback<'a, T>(&mut self, target: T) -> &mut Self
        where T: Into<Option<&'a TransformFeedback>>
    {
        self.transform_feedback = target.into().cloned();
        self
    }

    /// Sets the value for a uniform.
    ///
    /// The first set of a name assigns it the next free slot; later sets
    /// replace the value in place. Array uniforms are supported by
    /// appending `[0]` to the name and passing a flattened value covering
    /// the whole array.
    ///
    /// # Errors
    ///
    /// `Error::UniformCapacity` when a new name is set and every slot the
    /// context allows is already assigned.
    pub fn uniform<T>(&mut self, name: &str, value: T) -> Result<&mut Self, Error>
        where T: Into<Uniform>
    {
        match self.uniform_indices.get(name).cloned() {
            Some(index) => self.uniform_values[index] = value.into(),
            None => {
                if self.uniform_names.len() == self.caps.max_uniforms {
                    return Err(Error::UniformCapacity {
                        capacity: self.caps.max_uniforms,
                    });
                }
                let index = self.uniform_names.len();
                self.uniform_indices.insert(name.to_string(), index);
                self.uniform_names.push(name.to_string());
                self.uniform_values.push(value.into());
            }
        }

        Ok(self)
    }

    /// Sets the texture to bind to a sampler uniform.
    ///
    /// # Errors
    ///
    /// `Error::UnknownSampler` when the bound program declares no sampler
    /// with this name.
    pub fn texture(&mut self, name: &str, texture: &Texture) -> Result<&mut Self, Error> {
        let unit = self
            .program
            .sampler_unit(name)
            .ok_or_else(|| Error::UnknownSampler(name.to_string()))?;
        self.textures[unit as usize] = Some(texture.clone());

        Ok(self)
    }

    /// Sets the uniform buffer to bind to a uniform block.
    ///
    /// # Errors
    ///
    /// `Error::UnknownUniformBlock` when the bound program declares no
    /// uniform block with this name.
    pub fn uniform_block(&mut self, name: &str, buffer: &Buffer) -> Result<&mut Self, Error> {
        let base = self
            .program
            .uniform_block_base(name)
            .ok_or_else(|| Error::UnknownUniformBlock(name.to_string()))?;
        self.uniform_buffers[base as usize] = Some(buffer.clone());

        Ok(self)
    }

    /// Limits the number of elements drawn by the first sub-draw.
    ///
    /// A positive count is clamped to the vertex array's own element
    /// count; zero restores the full count. Batched sub-draw tables are
    /// edited through the vertex array itself.
    pub fn element_count(&mut self, count: usize) -> &mut Self {
        let max = self.vertex_array.max_elements();
        let mut draws = self.draws.borrow_mut();
        draws.counts[0] = if count > 0 {
            cmp::min(count as i32, max)
        } else {
            max
        };
        drop(draws);

        self
    }

    /// Limits the number of instances drawn by the first sub-draw.
    ///
    /// Same clamping and reset semantics as [`element_count`].
    ///
    /// [`element_count`]: #method.element_count
    pub fn instance_count(&mut self, count: usize) -> &mut Self {
        let max = self.vertex_array.max_instances();
        let mut draws = self.draws.borrow_mut();
        draws.instances[0] = if count > 0 {
            cmp::min(count as i32, max)
        } else {
            max
        };
        drop(draws);

        self
    }

    /// Draws based on the current state.
    ///
    /// Binds the program, vertex array, uniforms, uniform buffers and
    /// textures, settles the transform feedback capture state, then
    /// submits every sub-draw through the narrowest entry point the
    /// context offers.
    ///
    /// # Errors
    ///
    /// `Error::MissingUniformBuffer` / `Error::MissingTexture` when a
    /// binding point the program expects has nothing assigned. The check
    /// runs before any context mutation. Underlying context errors are
    /// not surfaced here.
    pub fn draw(&mut self) -> Result<&mut Self, Error> {
        let block_count = self.program.uniform_block_count();
        let sampler_count = self.program.sampler_count();

        for base in 0..block_count {
            if self.uniform_buffers[base].is_none() {
                return Err(Error::MissingUniformBuffer { base });
            }
        }
        for unit in 0..sampler_count {
            if self.textures[unit].is_none() {
                return Err(Error::MissingTexture { unit });
            }
        }

        self.program.bind();
        self.vertex_array.bind();

        for index in 0..self.uniform_names.len() {
            self.program.uniform(&self.uniform_names[index], &self.uniform_values[index]);
        }
        for base in 0..block_count {
            if let Some(ref buffer) = self.uniform_buffers[base] {
                buffer.bind_base(base as u32);
            }
        }
        for unit in 0..sampler_count {
            if let Some(ref texture) = self.textures[unit] {
                texture.bind(unit as u32);
            }
        }

        let capturing = self.begin_capture();
        self.dispatch();
        if capturing {
            self.backend.end_transform_feedback();
        }

        Ok(self)
    }

    /// Settles the capture state ahead of submission. Returns `true` if a
    /// capture was begun and must be ended afterwards.
    fn begin_capture(&self) -> bool {
        let target = self.transform_feedback.as_ref().map(|target| target.id());
        let mut state = self.state.borrow_mut();
        match capture_transition(target, state.transform_feedback) {
            Capture::Begin(id) => {
                if let Some(ref target) = self.transform_feedback {
                    target.bind();
                }
                state.transform_feedback = Some(id);
                self.backend.begin_transform_feedback(self.primitive.as_gl_enum());
                true
            }
            Capture::Release => {
                self.backend.bind_transform_feedback(0);
                state.transform_feedback = None;
                false
            }
            Capture::Keep => false,
        }
    }

    /// Submits every sub-draw through exactly one of the eight paths.
    fn dispatch(&self) {
        let mode = self.primitive.as_gl_enum();
        let instanced = self.vertex_array.instanced();
        let indexed = self.vertex_array.indexed();
        let ty = self.vertex_array.index_type();
        let multi_draw = if instanced {
            self.caps.multi_draw_instanced
        } else {
            self.caps.multi_draw
        };
        let draws = self.draws.borrow();
        let counts = &draws.counts;
        let instances = &draws.instances;
        let offsets = &draws.offsets;

        match select_path(instanced, multi_draw, indexed) {
            Path::MultiElementsInstanced => {
                let commands =
                    element_commands(counts, instances, offsets, self.vertex_array.index_size());
                self.backend.multi_draw_elements_indirect(mode, ty, &commands);
            }
            Path::MultiArraysInstanced => {
                let commands = array_commands(counts, instances, offsets);
                self.backend.multi_draw_arrays_indirect(mode, &commands);
            }
            Path::ElementsInstancedLoop => {
                for index in 0..counts.len() {
                    self.backend.draw_elements_instanced(
                        mode,
                        counts[index],
                        ty,
                        offsets[index],
                        instances[index],
                    );
                }
            }
            Path::ArraysInstancedLoop => {
                for index in 0..counts.len() {
                    self.backend.draw_arrays_instanced(
                        mode,
                        offsets[index],
                        counts[index],
                        instances[index],
                    );
                }
            }
            Path::MultiElements => {
                self.backend.multi_draw_elements(mode, counts, ty, offsets);
            }
            Path::MultiArrays => {
                self.backend.multi_draw_arrays(mode, offsets, counts);
            }
            Path::ElementsLoop => {
                for index in 0..counts.len() {
                    self.backend.draw_elements(mode, counts[index], ty, offsets[index]);
                }
            }
            Path::ArraysLoop => {
                for index in 0..counts.len() {
                    self.backend.draw_arrays(mode, offsets[index], counts[index]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use crate::buffer::{format, Accessor, Buffer, Kind, Usage};
    use crate::caps::Capabilities;
    use crate::error::Error;
    use crate::gl;
    use crate::program::Program;
    use crate::queue::Queue;
    use crate::state;
    use crate::texture::{self, Target, Texture};
    use crate::transform_feedback::TransformFeedback;
    use crate::uniform::Uniform;
    use crate::vertex_array::{Builder, SubDraw, VertexArray};

    use super::{
        array_commands, capture_transition, element_commands, select_path, Capture, DrawCall,
        Path, Primitive,
    };

    fn backend() -> gl::Backend {
        gl::Backend::load(|_| ptr::null())
    }

    fn caps() -> Capabilities {
        Capabilities {
            max_uniforms: 16,
            max_uniform_buffers: 8,
            max_texture_units: 8,
            multi_draw: false,
            multi_draw_instanced: false,
        }
    }

    fn program(samplers: &[&str], uniform_blocks: &[&str], state: &state::Shared) -> Program {
        let mut program = Program::new(1, backend(), state.clone(), Queue::new().tx());
        for (unit, name) in samplers.iter().enumerate() {
            program.samplers.insert(name.to_string(), unit as u32);
        }
        for (base, name) in uniform_blocks.iter().enumerate() {
            program.uniform_blocks.insert(name.to_string(), base as u32);
        }
        program
    }

    fn vertex_array(builder: Builder, state: &state::Shared) -> VertexArray {
        VertexArray::new(1, builder, backend(), state.clone(), Queue::new().tx())
    }

    fn plain_vertex_array(count: usize, state: &state::Shared) -> VertexArray {
        let mut builder = Builder::default();
        builder.sub_draw(SubDraw { count, instances: 1, offset: 0 });
        vertex_array(builder, state)
    }

    fn draw_call(
        caps: Capabilities,
        program: &Program,
        vertex_array: &VertexArray,
        state: &state::Shared,
    ) -> DrawCall {
        DrawCall::new(backend(), caps, state.clone(), program, vertex_array)
    }

    fn texture() -> Texture {
        Texture::new(
            1,
            Target::Texture2,
            4,
            4,
            false,
            texture::format::U8::Rgba,
            backend(),
            Queue::new().tx(),
        )
    }

    #[test]
    fn uniform_slots_assigned_in_first_seen_order() {
        let state = state::shared();
        let program = program(&[], &[], &state);
        let vertex_array = plain_vertex_array(3, &state);
        let mut call = draw_call(caps(), &program, &vertex_array, &state);

        call.uniform("u_color", [1.0f32, 0.0, 0.0, 1.0]).unwrap();
        call.uniform("u_time", 0.0f32).unwrap();
        call.uniform("u_weights[0]", vec![0.25f32, 0.75]).unwrap();

        assert_eq!(
            vec!["u_color", "u_time", "u_weights[0]"],
            call.uniform_names,
        );
        assert_eq!(Some(&1), call.uniform_indices.get("u_time"));
    }

    #[test]
    fn resetting_a_uniform_keeps_its_slot() {
        let state = state::shared();
        let program = program(&[], &[], &state);
        let vertex_array = plain_vertex_array(3, &state);
        let mut call = draw_call(caps(), &program, &vertex_array, &state);

        call.uniform("u_first", 1.0f32).unwrap();
        call.uniform("u_second", 2.0f32).unwrap();
        call.uniform("u_first", 3.0f32).unwrap();

        assert_eq!(Some(&0), call.uniform_indices.get("u_first"));
        assert_eq!(Uniform::Float(3.0), call.uniform_values[0]);
        assert_eq!(2, call.uniform_names.len());
    }

    #[test]
    fn uniform_capacity_is_checked() {
        let state = state::shared();
        let program = program(&[], &[], &state);
        let vertex_array = plain_vertex_array(3, &state);
        let mut limits = caps();
        limits.max_uniforms = 2;
        let mut call = draw_call(limits, &program, &vertex_array, &state);

        call.uniform("u_first", 1.0f32).unwrap();
        call.uniform("u_second", 2.0f32).unwrap();
        match call.uniform("u_third", 3.0f32) {
            Err(Error::UniformCapacity { capacity: 2 }) => {}
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }

        // Slots already assigned stay writable.
        assert!(call.uniform("u_second", 4.0f32).is_ok());
    }

    #[test]
    fn element_count_clamps_to_the_vertex_array() {
        let state = state::shared();
        let program = program(&[], &[], &state);
        let vertex_array = plain_vertex_array(6, &state);
        let mut call = draw_call(caps(), &program, &vertex_array, &state);

        call.element_count(100);
        assert_eq!(6, call.draws.borrow().counts[0]);

        call.element_count(3);
        assert_eq!(3, call.draws.borrow().counts[0]);
    }

    #[test]
    fn element_count_zero_restores_the_full_count() {
        let state = state::shared();
        let program = program(&[], &[], &state);
        let vertex_array = plain_vertex_array(6, &state);
        let mut call = draw_call(caps(), &program, &vertex_array, &state);

        call.element_count(2);
        call.element_count(0);
        assert_eq!(6, call.draws.borrow().counts[0]);
    }

    #[test]
    fn instance_count_clamps_and_restores() {
        let state = state::shared();
        let program = program(&[], &[], &state);
        let mut builder = Builder::default();
        builder.sub_draw(SubDraw { count: 6, instances: 8, offset: 0 });
        let vertex_array = vertex_array(builder, &state);
        let mut call = draw_call(caps(), &program, &vertex_array, &state);

        call.instance_count(100);
        assert_eq!(8, call.draws.borrow().instances[0]);

        call.instance_count(2);
        assert_eq!(2, call.draws.borrow().instances[0]);

        call.instance_count(0);
        assert_eq!(8, call.draws.borrow().instances[0]);
    }

    #[test]
    fn path_selection_table_holds_for_all_combinations() {
        assert_eq!(Path::MultiElementsInstanced, select_path(true, true, true));
        assert_eq!(Path::MultiArraysInstanced, select_path(true, true, false));
        assert_eq!(Path::ElementsInstancedLoop, select_path(true, false, true));
        assert_eq!(Path::ArraysInstancedLoop, select_path(true, false, false));
        assert_eq!(Path::MultiElements, select_path(false, true, true));
        assert_eq!(Path::MultiArrays, select_path(false, true, false));
        assert_eq!(Path::ElementsLoop, select_path(false, false, true));
        assert_eq!(Path::ArraysLoop, select_path(false, false, false));
    }

    #[test]
    fn stale_capture_targets_are_released() {
        assert_eq!(Capture::Release, capture_transition(None, Some(7)));
        assert_eq!(Capture::Keep, capture_transition(None, None));
        assert_eq!(Capture::Begin(5), capture_transition(Some(5), Some(7)));
        assert_eq!(Capture::Begin(5), capture_transition(Some(5), None));
    }

    #[test]
    fn unknown_sampler_is_an_error() {
        let state = state::shared();
        let program = program(&["u_sampler"], &[], &state);
        let vertex_array = plain_vertex_array(3, &state);
        let mut call = draw_call(caps(), &program, &vertex_array, &state);

        match call.texture("u_other", &texture()) {
            Err(Error::UnknownSampler(ref name)) if name == "u_other" => {}
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn unknown_uniform_block_is_an_error() {
        let state = state::shared();
        let program = program(&[], &["Camera"], &state);
        let vertex_array = plain_vertex_array(3, &state);
        let mut call = draw_call(caps(), &program, &vertex_array, &state);
        let buffer = Buffer::new(1, Kind::Uniform, 0, Usage::DynamicDraw, backend(), Queue::new().tx());

        assert!(call.uniform_block("Camera", &buffer).is_ok());
        match call.uniform_block("Lights", &buffer) {
            Err(Error::UnknownUniformBlock(ref name)) if name == "Lights" => {}
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn draw_rejects_a_missing_texture_before_submission() {
        let state = state::shared();
        let program = program(&["u_sampler"], &[], &state);
        let vertex_array = plain_vertex_array(3, &state);
        let mut call = draw_call(caps(), &program, &vertex_array, &state);

        match call.draw() {
            Err(Error::MissingTexture { unit: 0 }) => {}
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn draw_rejects_a_missing_uniform_buffer_before_submission() {
        let state = state::shared();
        let program = program(&[], &["Camera"], &state);
        let vertex_array = plain_vertex_array(3, &state);
        let mut call = draw_call(caps(), &program, &vertex_array, &state);

        match call.draw() {
            Err(Error::MissingUniformBuffer { base: 0 }) => {}
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn plain_single_sub_draw_assembly() {
        // A 6-vertex non-indexed, non-instanced vertex array with one
        // sampler resolves to unit 0 and the plain array loop path over
        // (offset 0, count 6).
        let state = state::shared();
        let program = program(&["tex"], &[], &state);
        let vertex_array = plain_vertex_array(6, &state);
        let mut call = draw_call(caps(), &program, &vertex_array, &state);

        call.texture("tex", &texture()).unwrap();

        assert_eq!(Some(0), program.sampler_unit("tex"));
        assert!(call.textures[0].is_some());
        assert!(call.textures[1..].iter().all(|slot| slot.is_none()));

        assert_eq!(
            Path::ArraysLoop,
            select_path(vertex_array.instanced(), caps().multi_draw, vertex_array.indexed()),
        );
        let draws = call.draws.borrow();
        assert_eq!(vec![6], draws.counts);
        assert_eq!(vec![0], draws.offsets);
        assert_eq!(1, vertex_array.num_draws());
    }

    #[test]
    fn transform_feedback_target_can_be_set_and_cleared() {
        let state = state::shared();
        let program = program(&[], &[], &state);
        let vertex_array = plain_vertex_array(3, &state);
        let mut call = draw_call(caps(), &program, &vertex_array, &state);
        let target = TransformFeedback::new(9, backend(), Queue::new().tx());

        call.transform_feedback(&target);
        assert!(call.transform_feedback.is_some());

        call.transform_feedback(None);
        assert!(call.transform_feedback.is_none());
    }

    #[test]
    fn shared_sub_draw_tables_are_live() {
        let state = state::shared();
        let program = program(&[], &[], &state);
        let vertex_array = plain_vertex_array(6, &state);
        let mut call = draw_call(caps(), &program, &vertex_array, &state);

        call.element_count(3);
        assert_eq!(3, vertex_array.draws().borrow().counts[0]);

        vertex_array.set_sub_draw(0, SubDraw { count: 5, instances: 2, offset: 12 });
        let draws = call.draws.borrow();
        assert_eq!(5, draws.counts[0]);
        assert_eq!(2, draws.instances[0]);
        assert_eq!(12, draws.offsets[0]);
    }

    #[test]
    fn indirect_array_commands_mirror_the_sub_draw_tables() {
        let commands = array_commands(&[6, 3], &[2, 1], &[0, 6]);
        assert_eq!(2, commands.len());
        assert_eq!(6, commands[0].count);
        assert_eq!(2, commands[0].instance_count);
        assert_eq!(0, commands[0].first);
        assert_eq!(3, commands[1].count);
        assert_eq!(1, commands[1].instance_count);
        assert_eq!(6, commands[1].first);
        assert!(commands.iter().all(|command| command.base_instance == 0));
    }

    #[test]
    fn indirect_element_commands_convert_byte_offsets_to_indices() {
        // 16-bit indices: a byte offset of 12 is the sixth index.
        let commands = element_commands(&[6, 3], &[2, 1], &[0, 12], 2);
        assert_eq!(0, commands[0].first_index);
        assert_eq!(6, commands[1].first_index);
        assert!(commands.iter().all(|command| command.base_vertex == 0));
    }

    #[test]
    fn indexed_instanced_vertex_array_selects_the_instanced_family() {
        let state = state::shared();
        let buffer = Buffer::new(1, Kind::Index, 0, Usage::StaticDraw, backend(), Queue::new().tx());
        let mut builder = Builder::default();
        builder
            .indices(Accessor::new(buffer, format::Format::U16(1), 0, 0))
            .instanced_attribute(
                1,
                1,
                Accessor::new(
                    Buffer::new(2, Kind::Array, 0, Usage::StaticDraw, backend(), Queue::new().tx()),
                    format::Format::F32(4),
                    0,
                    0,
                ),
            )
            .sub_draw(SubDraw { count: 6, instances: 4, offset: 0 });
        let vertex_array = vertex_array(builder, &state);

        // With the batched entry points present the one-shot instanced
        // path wins; without them the dispatch degrades to the loop.
        assert_eq!(
            Path::MultiElementsInstanced,
            select_path(vertex_array.instanced(), true, vertex_array.indexed()),
        );
        assert_eq!(
            Path::ElementsInstancedLoop,
            select_path(vertex_array.instanced(), false, vertex_array.indexed()),
        );
    }

    #[test]
    fn primitive_setter_replaces_the_topology() {
        let state = state::shared();
        let program = program(&[], &[], &state);
        let vertex_array = plain_vertex_array(3, &state);
        let mut call = draw_call(caps(), &program, &vertex_array, &state);

        assert_eq!(gl::TRIANGLES, call.primitive.as_gl_enum());
        call.primitive(Primitive::Points);
        assert_eq!(gl::POINTS, call.primitive.as_gl_enum());
    }
}
