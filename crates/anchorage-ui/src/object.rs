//! Common state shared by every positionable UI object.

use crate::anchor::AnchorSet;
use crate::dirty::DirtyFlags;
use crate::error::UiError;
use crate::length::Length;
use anchorage_core::alloc::sparse_set::IndexSlot;
use anchorage_core::geometry::Rect;
use std::fmt;

/// Handle to an object owned by a [`UiManager`](crate::UiManager).
///
/// Handles are generational: once the object is destroyed, the handle never
/// aliases a later object that reuses the same arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(IndexSlot);

impl ObjectId {
    pub(crate) fn from_slot(slot: IndexSlot) -> Self {
        Self(slot)
    }

    pub(crate) fn slot(self) -> IndexSlot {
        self.0
    }

    /// Raw bits, stable for the object's lifetime.
    pub fn to_raw(self) -> u64 {
        self.0.to_raw()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State every frame and region carries.
#[derive(Debug, Clone)]
pub struct UiObject {
    pub(crate) name: Option<String>,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) anchors: AnchorSet,
    pub(crate) width: Length,
    pub(crate) height: Length,
    pub(crate) rect: Rect<f32>,
    pub(crate) has_valid_geometry: bool,
    pub(crate) dirty: DirtyFlags,
    pub(crate) shown: bool,
    pub(crate) last_error: Option<UiError>,
    /// Objects this one is anchored to, as last bound.
    pub(crate) targets: Vec<ObjectId>,
    /// Names this one is anchored to that no live object carries yet.
    pub(crate) waiting_on: Vec<String>,
}

impl UiObject {
    pub(crate) fn new(name: Option<String>, parent: Option<ObjectId>) -> Self {
        Self {
            name,
            parent,
            anchors: AnchorSet::new(),
            width: Length::Auto,
            height: Length::Auto,
            rect: Rect::ZERO,
            has_valid_geometry: false,
            dirty: DirtyFlags::LAYOUT | DirtyFlags::ANCHORS,
            shown: true,
            last_error: None,
            targets: Vec::new(),
            waiting_on: Vec::new(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Owning frame, `None` for root frames.
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    pub fn width(&self) -> Length {
        self.width
    }

    pub fn height(&self) -> Length {
        self.height
    }

    /// Last successfully resolved rectangle, zero if never resolved.
    pub fn rect(&self) -> Rect<f32> {
        self.rect
    }

    pub fn has_valid_geometry(&self) -> bool {
        self.has_valid_geometry
    }

    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Own shown flag. An object is only visible if its ancestors are shown too.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Error from the most recent failed resolution, cleared on success.
    pub fn last_error(&self) -> Option<&UiError> {
        self.last_error.as_ref()
    }
}
