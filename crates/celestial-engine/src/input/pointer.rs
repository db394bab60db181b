use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

/// Single shared pointer slot.
///
/// The host writes whenever the pointer moves; the animation loop reads once
/// per tick. Last value wins, nothing is queued. `None` means the pointer is
/// off the scene, and hit-testing `None` hovers nothing.
#[derive(Debug, Clone, Default)]
pub struct PointerSlot {
    inner: Rc<Cell<Option<Vec2>>>,
}

impl PointerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, pos: Vec2) {
        self.inner.set(Some(pos));
    }

    /// Pointer left the scene.
    pub fn clear(&self) {
        self.inner.set(None);
    }

    pub fn get(&self) -> Option<Vec2> {
        self.inner.get()
    }
}
