//! Transform feedback capture objects.

use std::{cmp, fmt, hash, ops, sync};

use crate::gl;
use crate::queue;

/// The OpenGL transform feedback ID type.
pub(crate) type Id = u32;

/// Returns the object back to the factory upon destruction.
struct Destructor {
    id: Id,
    tx: queue::Sender<Id>,
}

impl ops::Drop for Destructor {
    fn drop(&mut self) {
        let _ = self.tx.send(self.id);
    }
}

/// Captures vertex pipeline output into buffer objects.
///
/// Capture buffers are attached through
/// [`Factory::capture_buffer`](../struct.Factory.html#method.capture_buffer);
/// capture itself begins and ends inside
/// [`DrawCall::draw`](../draw_call/struct.DrawCall.html#method.draw).
#[derive(Clone)]
pub struct TransformFeedback {
    /// The OpenGL transform feedback ID.
    id: Id,

    /// Function pointers to the OpenGL backend.
    backend: gl::Backend,

    /// Returns the object back to the factory upon destruction.
    destructor: sync::Arc<Destructor>,
}

impl TransformFeedback {
    /// Constructor.
    pub(crate) fn new(id: Id, backend: gl::Backend, tx: queue::Sender<Id>) -> Self {
        Self {
            id,
            backend,
            destructor: sync::Arc::new(Destructor { id, tx }),
        }
    }

    /// Returns the OpenGL transform feedback ID.
    pub(crate) fn id(&self) -> Id {
        self.id
    }

    /// Makes this object the active capture target.
    pub fn bind(&self) {
        self.backend.bind_transform_feedback(self.id);
    }
}

impl cmp::Eq for TransformFeedback {}

impl cmp::PartialEq<Self> for TransformFeedback {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for TransformFeedback {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct TransformFeedback(u32);

        TransformFeedback(self.id).fmt(f)
    }
}

impl hash::Hash for TransformFeedback {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}
