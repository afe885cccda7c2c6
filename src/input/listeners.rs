//! Attachment bookkeeping for pointer-event listeners on the render surface.
//!
//! A navigation binding holds a [`ListenerHandle`] for as long as it receives
//! input. Dropping the handle detaches it, so a released binding can never
//! keep driving a camera.

use std::cell::Cell;
use std::rc::Rc;

/// The set of input listeners attached to one render surface.
#[derive(Debug, Default)]
pub struct InputListeners {
    attached: Rc<Cell<usize>>,
}

impl InputListeners {
    /// Empty listener set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener. It stays attached until the handle is dropped.
    #[must_use]
    pub fn attach(&self) -> ListenerHandle {
        self.attached.set(self.attached.get() + 1);
        ListenerHandle {
            attached: Rc::clone(&self.attached),
        }
    }

    /// Number of listeners currently attached.
    #[must_use]
    pub fn attached(&self) -> usize {
        self.attached.get()
    }
}

/// Proof of attachment to an [`InputListeners`] set. Detaches on drop.
#[derive(Debug)]
pub struct ListenerHandle {
    attached: Rc<Cell<usize>>,
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.attached.set(self.attached.get().saturating_sub(1));
    }
}
