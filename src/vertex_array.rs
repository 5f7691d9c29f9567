//! Vertex array objects.

use std::{cell, cmp, fmt, hash, ops, rc, sync};

use vec_map::VecMap;

use crate::buffer;
use crate::gl;
use crate::queue;
use crate::state;

/// The OpenGL VAO ID type.
pub(crate) type Id = u32;

/// Vertex attribute.
pub type Attribute = buffer::Accessor;

/// Index data.
pub type Indices = buffer::Accessor;

/// One batched draw within a vertex array.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubDraw {
    /// Number of elements (or vertices) to draw.
    pub count: usize,

    /// Number of instances to draw.
    pub instances: usize,

    /// Byte offset into the index buffer for indexed arrays, first vertex
    /// index otherwise.
    pub offset: usize,
}

impl Default for SubDraw {
    fn default() -> Self {
        SubDraw {
            count: 0,
            instances: 1,
            offset: 0,
        }
    }
}

/// Live per-sub-draw tables, shared between a vertex array and every draw
/// call created from it.
#[derive(Debug)]
pub(crate) struct DrawData {
    /// Element counts, one per sub-draw.
    pub(crate) counts: Vec<i32>,

    /// Instance counts, one per sub-draw.
    pub(crate) instances: Vec<i32>,

    /// Offsets, one per sub-draw.
    pub(crate) offsets: Vec<i32>,
}

/// Shared handle to the sub-draw tables.
pub(crate) type Draws = rc::Rc<cell::RefCell<DrawData>>;

/// Collects vertex array configuration ahead of construction.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    /// Attribute accessors keyed by attribute index.
    pub attributes: VecMap<Attribute>,

    /// Instancing divisors keyed by attribute index.
    ///
    /// Any entry marks the whole vertex array as instanced.
    pub divisors: VecMap<u32>,

    /// Index accessor, if the draw sequence is indexed.
    pub indices: Option<Indices>,

    /// Batched sub-draws; exactly one entry for a plain draw. An empty
    /// list yields a single empty sub-draw slot.
    pub draws: Vec<SubDraw>,
}

impl Builder {
    /// Assigns an accessor to an attribute index.
    pub fn attribute(&mut self, index: usize, accessor: Attribute) -> &mut Self {
        self.attributes.insert(index, accessor);
        self
    }

    /// Assigns a per-instance accessor to an attribute index.
    pub fn instanced_attribute(
        &mut self,
        index: usize,
        divisor: u32,
        accessor: Attribute,
    ) -> &mut Self {
        self.attributes.insert(index, accessor);
        self.divisors.insert(index, divisor);
        self
    }

    /// Assigns the index accessor.
    pub fn indices(&mut self, accessor: Indices) -> &mut Self {
        self.indices = Some(accessor);
        self
    }

    /// Appends a sub-draw.
    pub fn sub_draw(&mut self, draw: SubDraw) -> &mut Self {
        self.draws.push(draw);
        self
    }
}

/// Returns the VAO back to the factory upon destruction.
struct Destructor {
    id: Id,
    tx: queue::Sender<Id>,
}

impl ops::Drop for Destructor {
    fn drop(&mut self) {
        let _ = self.tx.send(self.id);
    }
}

/// Corresponds to an OpenGL vertex array object, together with its draw
/// sequence description.
#[derive(Clone)]
pub struct VertexArray {
    /// The OpenGL VAO ID.
    id: Id,

    /// Draw sequence indices bound at draw time.
    indices: Option<Indices>,

    /// Vertex attributes bound at draw time.
    attributes: VecMap<Attribute>,

    /// Whether any attribute advances per instance.
    instanced: bool,

    /// GL data type of the index elements.
    index_type: u32,

    /// Byte width of one index element.
    index_size: i32,

    /// Element count of the first sub-draw as constructed.
    max_elements: i32,

    /// Instance count of the first sub-draw as constructed.
    max_instances: i32,

    /// Sub-draw tables shared with draw calls.
    draws: Draws,

    /// Function pointers to the OpenGL backend.
    backend: gl::Backend,

    /// Tracked bindings of the owning context.
    state: state::Shared,

    /// Returns the VAO back to the factory upon destruction.
    destructor: sync::Arc<Destructor>,
}

impl VertexArray {
    /// Constructor.
    pub(crate) fn new(
        id: Id,
        builder: Builder,
        backend: gl::Backend,
        state: state::Shared,
        tx: queue::Sender<Id>,
    ) -> Self {
        let Builder { attributes, divisors, indices, mut draws } = builder;
        if draws.is_empty() {
            draws.push(SubDraw::default());
        }
        let instanced = !divisors.is_empty();
        let (index_type, index_size) = match indices {
            Some(ref accessor) => {
                let format = accessor.format();
                (format.gl_data_type(), format.byte_width())
            }
            None => (gl::UNSIGNED_INT, 4),
        };
        let data = DrawData {
            counts: draws.iter().map(|draw| draw.count as i32).collect(),
            instances: draws.iter().map(|draw| draw.instances as i32).collect(),
            offsets: draws.iter().map(|draw| draw.offset as i32).collect(),
        };
        Self {
            id,
            indices,
            attributes,
            instanced,
            index_type,
            index_size,
            max_elements: draws[0].count as i32,
            max_instances: draws[0].instances as i32,
            draws: rc::Rc::new(cell::RefCell::new(data)),
            backend,
            state,
            destructor: sync::Arc::new(Destructor { id, tx }),
        }
    }

    /// Makes this vertex array current. No-op when already current.
    pub fn bind(&self) {
        let mut state = self.state.borrow_mut();
        if state.vertex_array != Some(self.id) {
            self.backend.bind_vertex_array(self.id);
            state.vertex_array = Some(self.id);
        }
    }

    /// Returns the accessor bound as the element array buffer.
    pub fn indices(&self) -> Option<&Indices> {
        self.indices.as_ref()
    }

    /// Returns the accessor bound to the given attribute index.
    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    /// Returns `true` if the draw sequence is indexed.
    pub fn indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Returns `true` if any attribute advances per instance.
    pub fn instanced(&self) -> bool {
        self.instanced
    }

    /// Returns the GL data type of the index elements.
    pub(crate) fn index_type(&self) -> u32 {
        self.index_type
    }

    /// Returns the byte width of one index element.
    pub(crate) fn index_size(&self) -> i32 {
        self.index_size
    }

    /// Returns the number of sub-draws.
    pub fn num_draws(&self) -> usize {
        self.draws.borrow().counts.len()
    }

    /// Returns the element count of the first sub-draw as constructed.
    pub fn max_elements(&self) -> i32 {
        self.max_elements
    }

    /// Returns the instance count of the first sub-draw as constructed.
    pub fn max_instances(&self) -> i32 {
        self.max_instances
    }

    /// Rewrites one slot of the shared sub-draw tables.
    ///
    /// Draw calls created from this vertex array observe the new values on
    /// their next submission.
    pub fn set_sub_draw(&self, index: usize, draw: SubDraw) {
        let mut data = self.draws.borrow_mut();
        data.counts[index] = draw.count as i32;
        data.instances[index] = draw.instances as i32;
        data.offsets[index] = draw.offset as i32;
    }

    /// Returns a shared handle to the sub-draw tables.
    pub(crate) fn draws(&self) -> Draws {
        rc::Rc::clone(&self.draws)
    }
}

impl cmp::Eq for VertexArray {}

impl cmp::PartialEq<Self> for VertexArray {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for VertexArray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct VertexArray<'a> {
            id: u32,
            indices: Option<&'a Indices>,
            instanced: bool,
            num_draws: usize,
        }

        VertexArray {
            id: self.id,
            indices: self.indices.as_ref(),
            instanced: self.instanced,
            num_draws: self.num_draws(),
        }.fmt(f)
    }
}

impl hash::Hash for VertexArray {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use crate::buffer::{format, Accessor, Buffer, Kind, Usage};
    use crate::gl;
    use crate::queue::Queue;
    use crate::state;

    use super::{Builder, SubDraw, VertexArray};

    fn backend() -> gl::Backend {
        gl::Backend::load(|_| ptr::null())
    }

    fn index_buffer() -> Buffer {
        Buffer::new(1, Kind::Index, 0, Usage::StaticDraw, backend(), Queue::new().tx())
    }

    fn vertex_array(builder: Builder) -> VertexArray {
        VertexArray::new(1, builder, backend(), state::shared(), Queue::new().tx())
    }

    #[test]
    fn index_type_follows_accessor_format() {
        let mut builder = Builder::default();
        builder
            .indices(Accessor::new(index_buffer(), format::Format::U16(1), 0, 0))
            .sub_draw(SubDraw { count: 6, instances: 1, offset: 0 });
        let vertex_array = vertex_array(builder);
        assert!(vertex_array.indexed());
        assert_eq!(gl::UNSIGNED_SHORT, vertex_array.index_type());
        assert_eq!(2, vertex_array.index_size());
    }

    #[test]
    fn divisor_marks_instanced() {
        let mut builder = Builder::default();
        builder.instanced_attribute(
            1,
            1,
            Accessor::new(
                Buffer::new(2, Kind::Array, 0, Usage::StaticDraw, backend(), Queue::new().tx()),
                format::Format::F32(4),
                0,
                0,
            ),
        );
        let vertex_array = vertex_array(builder);
        assert!(vertex_array.instanced());
        assert!(!vertex_array.indexed());
    }

    #[test]
    fn empty_builder_yields_one_sub_draw() {
        let vertex_array = vertex_array(Builder::default());
        assert_eq!(1, vertex_array.num_draws());
        assert_eq!(0, vertex_array.max_elements());
        assert_eq!(1, vertex_array.max_instances());
    }

    #[test]
    fn set_sub_draw_rewrites_shared_tables() {
        let mut builder = Builder::default();
        builder
            .sub_draw(SubDraw { count: 6, instances: 1, offset: 0 })
            .sub_draw(SubDraw { count: 3, instances: 1, offset: 24 });
        let vertex_array = vertex_array(builder);
        let draws = vertex_array.draws();

        vertex_array.set_sub_draw(1, SubDraw { count: 9, instances: 4, offset: 48 });

        let data = draws.borrow();
        assert_eq!(vec![6, 9], data.counts);
        assert_eq!(vec![1, 4], data.instances);
        assert_eq!(vec![0, 48], data.offsets);
    }
}
