//! GLSL programs.

use std::collections::HashMap;
use std::{cell, cmp, ffi, fmt, hash, ops, rc, sync};

use crate::gl;
use crate::queue;
use crate::state;
use crate::uniform::Uniform;

/// Specifies the maximum number of uniform block declarations permitted
/// by [`Bindings`].
///
/// [`Bindings`]: struct.Bindings.html
pub const MAX_UNIFORM_BLOCKS: usize = 4;

/// Specifies the maximum number of sampler declarations permitted by
/// [`Bindings`].
///
/// [`Bindings`]: struct.Bindings.html
pub const MAX_SAMPLERS: usize = 4;

/// Shader object kind.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// Corresponds to `GL_VERTEX_SHADER`.
    Vertex,

    /// Corresponds to `GL_FRAGMENT_SHADER`.
    Fragment,
}

impl Kind {
    pub(crate) fn as_gl_enum(self) -> u32 {
        match self {
            Kind::Vertex => gl::VERTEX_SHADER,
            Kind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

/// Program interface binding declarations.
///
/// Required names receive texture units and uniform block bases in
/// declaration order, starting from zero; the resulting tables are the
/// reflection data draw calls resolve names against.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Bindings {
    /// The program uniform block declarations.
    pub uniform_blocks: [UniformBlockBinding; MAX_UNIFORM_BLOCKS],

    /// The program sampler declarations.
    pub samplers: [SamplerBinding; MAX_SAMPLERS],
}

/// A binding point for a uniform block in a compiled and linked program.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UniformBlockBinding {
    /// Binding point is required by the program to function correctly.
    Required(&'static str),

    /// Binding point is unassigned.
    None,
}

impl Default for UniformBlockBinding {
    fn default() -> Self {
        UniformBlockBinding::None
    }
}

/// A binding point for a texture sampler in a compiled and linked program.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SamplerBinding {
    /// Binding point is required by the program to function correctly.
    Required(&'static str),

    /// Binding point is unassigned.
    None,
}

impl Default for SamplerBinding {
    fn default() -> Self {
        SamplerBinding::None
    }
}

/// Specifies whether the destroyed item was an object or a program.
#[derive(Clone)]
pub(crate) enum Destroyed {
    /// A shader object.
    Object(u32),

    /// A compiled and linked program.
    Program(u32),
}

/// Pushes the shader ID onto the factory program queue when destroyed.
struct ObjectDestructor {
    id: u32,
    tx: queue::Sender<Destroyed>,
}

impl ops::Drop for ObjectDestructor {
    fn drop(&mut self) {
        let _ = self.tx.send(Destroyed::Object(self.id));
    }
}

/// Pushes the program ID onto the factory program queue when destroyed.
struct ProgramDestructor {
    id: u32,
    tx: queue::Sender<Destroyed>,
}

impl ops::Drop for ProgramDestructor {
    fn drop(&mut self) {
        let _ = self.tx.send(Destroyed::Program(self.id));
    }
}

/// A compiled shader object.
#[derive(Clone)]
pub struct Object {
    /// The OpenGL shader ID.
    id: u32,

    /// Vertex or fragment.
    kind: Kind,

    /// Returns the shader back to the factory upon destruction.
    _destructor: sync::Arc<ObjectDestructor>,
}

impl Object {
    /// Constructor.
    pub(crate) fn new(id: u32, kind: Kind, tx: queue::Sender<Destroyed>) -> Self {
        Self {
            id,
            kind,
            _destructor: sync::Arc::new(ObjectDestructor { id, tx }),
        }
    }

    /// Returns the OpenGL shader ID.
    pub(crate) fn id(&self) -> u32 {
        self.id
    }

    /// Returns the shader object kind.
    pub fn kind(&self) -> Kind {
        self.kind
    }
}

/// A compiled and linked shader program.
#[derive(Clone)]
pub struct Program {
    /// The OpenGL program ID.
    id: u32,

    /// Function pointers to the OpenGL backend.
    backend: gl::Backend,

    /// Tracked bindings of the owning context.
    state: state::Shared,

    /// Texture units keyed by sampler uniform name, assigned at link time.
    pub(crate) samplers: HashMap<String, u32>,

    /// Binding bases keyed by uniform block name, assigned at link time.
    pub(crate) uniform_blocks: HashMap<String, u32>,

    /// Uniform locations, resolved on first use. Misses are cached as -1.
    locations: rc::Rc<cell::RefCell<HashMap<String, i32>>>,

    /// Returns the program back to the factory upon destruction.
    _destructor: sync::Arc<ProgramDestructor>,
}

impl Program {
    /// Constructor.
    pub(crate) fn new(
        id: u32,
        backend: gl::Backend,
        state: state::Shared,
        tx: queue::Sender<Destroyed>,
    ) -> Self {
        Self {
            id,
            backend,
            state,
            samplers: HashMap::new(),
            uniform_blocks: HashMap::new(),
            locations: rc::Rc::new(cell::RefCell::new(HashMap::new())),
            _destructor: sync::Arc::new(ProgramDestructor { id, tx }),
        }
    }

    /// Makes this program current. No-op when already current.
    pub fn bind(&self) {
        let mut state = self.state.borrow_mut();
        if state.program != Some(self.id) {
            self.backend.use_program(self.id);
            state.program = Some(self.id);
        }
    }

    /// Returns the texture unit assigned to a sampler uniform.
    pub fn sampler_unit(&self, name: &str) -> Option<u32> {
        self.samplers.get(name).cloned()
    }

    /// Returns the binding base assigned to a uniform block.
    pub fn uniform_block_base(&self, name: &str) -> Option<u32> {
        self.uniform_blocks.get(name).cloned()
    }

    /// Number of sampler uniforms, occupying texture units `0..count`.
    pub fn sampler_count(&self) -> usize {
        self.samplers.len()
    }

    /// Number of uniform blocks, occupying binding bases `0..count`.
    pub fn uniform_block_count(&self) -> usize {
        self.uniform_blocks.len()
    }

    /// Uploads a uniform value to this program.
    ///
    /// The program must be current. A name without an active location is
    /// skipped; the shader compiler may have optimized the uniform out.
    pub fn uniform(&self, name: &str, value: &Uniform) {
        match self.location(name) {
            Some(location) => value.upload(&self.backend, location),
            None => warn!("skipped uniform `{}`: no active location", name),
        }
    }

    fn location(&self, name: &str) -> Option<i32> {
        if let Some(&location) = self.locations.borrow().get(name) {
            return if location < 0 { None } else { Some(location) };
        }
        let cname = match ffi::CString::new(name) {
            Ok(cname) => cname,
            Err(_) => return None,
        };
        let location = self.backend.get_uniform_location(self.id, &cname);
        self.locations.borrow_mut().insert(name.to_string(), location);
        if location < 0 {
            None
        } else {
            Some(location)
        }
    }
}

impl cmp::Eq for Program {}

impl cmp::PartialEq<Self> for Program {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct Program(u32);

        Program(self.id).fmt(f)
    }
}

impl hash::Hash for Program {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}
