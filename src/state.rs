//! Tracked context state.

use std::cell;
use std::rc;

/// Bindings tracked to skip redundant context changes.
///
/// One record exists per context, shared by every object the factory
/// creates for it. `None` means the binding is unknown and the next bind
/// goes through unconditionally.
#[derive(Debug, Default)]
pub struct State {
    /// Name of the program currently in use.
    pub(crate) program: Option<u32>,

    /// Name of the vertex array currently bound.
    pub(crate) vertex_array: Option<u32>,

    /// Name of the transform feedback target currently bound.
    ///
    /// Written only by draw call dispatch.
    pub(crate) transform_feedback: Option<u32>,
}

/// Shared handle to the tracked state of one context.
pub(crate) type Shared = rc::Rc<cell::RefCell<State>>;

/// Creates the tracked state record for a fresh context.
pub(crate) fn shared() -> Shared {
    rc::Rc::new(cell::RefCell::new(State::default()))
}
