//! Keyboard focus management.
//!
//! Focus is a stack: the top entry owns keyboard input, and releasing it hands
//! focus back to whichever frame held it before.
//!
//! # Example
//!
//! ```ignore
//! let mut focus = FocusStack::new();
//! let events = focus.request(edit_box);
//! assert_eq!(focus.focused(), Some(edit_box));
//! focus.release(edit_box); // focus returns to the previous owner
//! ```

use crate::event::UiEvent;
use crate::object::ObjectId;

/// Stack of frames that asked for keyboard focus.
#[derive(Debug, Default)]
pub struct FocusStack {
    entries: Vec<ObjectId>,
}

impl FocusStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame currently owning keyboard input.
    pub fn focused(&self) -> Option<ObjectId> {
        self.entries.last().copied()
    }

    pub fn contains(&self, frame: ObjectId) -> bool {
        self.entries.contains(&frame)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Give `frame` focus, moving it to the top if it was already stacked.
    pub fn request(&mut self, frame: ObjectId) -> Vec<UiEvent> {
        let previous = self.focused();
        if previous == Some(frame) {
            return Vec::new();
        }
        self.entries.retain(|&f| f != frame);
        self.entries.push(frame);
        tracing::debug!("Focus moved to {}", frame);
        Self::transition(previous, Some(frame))
    }

    /// Withdraw `frame` from the stack. Focus falls back to the previous owner.
    pub fn release(&mut self, frame: ObjectId) -> Vec<UiEvent> {
        let previous = self.focused();
        self.entries.retain(|&f| f != frame);
        Self::transition(previous, self.focused())
    }

    /// Drop a destroyed frame. No event targets the dead frame.
    pub fn forget(&mut self, frame: ObjectId) -> Vec<UiEvent> {
        let previous = self.focused();
        self.entries.retain(|&f| f != frame);
        let previous = previous.filter(|&f| f != frame);
        Self::transition(previous, self.focused())
    }

    /// Drop every entry.
    pub fn clear(&mut self) -> Vec<UiEvent> {
        let previous = self.focused();
        self.entries.clear();
        Self::transition(previous, None)
    }

    fn transition(from: Option<ObjectId>, to: Option<ObjectId>) -> Vec<UiEvent> {
        if from == to {
            return Vec::new();
        }
        from.map(|f| UiEvent::focus(f, false))
            .into_iter()
            .chain(to.map(|t| UiEvent::focus(t, true)))
            .collect()
    }
}
