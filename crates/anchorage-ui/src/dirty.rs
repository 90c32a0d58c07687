//! Fine-grained dirty flag tracking for UI objects.

use bitflags::bitflags;

bitflags! {
    /// Fine-grained dirty flags for UI objects.
    ///
    /// These flags allow selective recomputation based on what actually changed.
    /// A drawable-only change never re-resolves anchors, and a level change never
    /// touches geometry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u16 {
        /// No changes
        const NONE              = 0b0000_0000;

        /// Cached rectangle is stale and must be re-resolved.
        const LAYOUT            = 0b0000_0001;

        /// Anchors were added, removed or re-targeted.
        /// Rebuilds dependency edges and implies LAYOUT.
        const ANCHORS           = 0b0000_0010;

        /// Explicit width or height changed.
        const SIZE              = 0b0000_0100;

        /// Strata or level changed, the object's ordering key moved.
        const ORDER             = 0b0000_1000;

        /// Shown/hidden state changed.
        const VISIBILITY        = 0b0001_0000;

        /// Children or layered regions were added, removed or reparented.
        const CHILDREN          = 0b0010_0000;

        /// Only drawable state changed (texture, text, colour).
        /// Renderer redraw only; no layout or ordering work.
        const PAINT             = 0b0100_0000;
    }
}

impl DirtyFlags {
    /// Returns true if the cached rectangle must be re-resolved.
    #[inline]
    pub fn needs_layout(&self) -> bool {
        self.intersects(Self::LAYOUT | Self::ANCHORS | Self::SIZE)
    }

    /// Returns true if the global draw order must be rebuilt.
    #[inline]
    pub fn affects_order(&self) -> bool {
        self.intersects(Self::ORDER | Self::VISIBILITY | Self::CHILDREN)
    }

    /// Returns true if only drawable state changed.
    #[inline]
    pub fn is_paint_only(&self) -> bool {
        !self.is_empty() && !self.intersects(!Self::PAINT)
    }

    /// Returns true if objects anchored to this one must be invalidated too.
    #[inline]
    pub fn should_propagate_to_dependents(&self) -> bool {
        self.needs_layout()
    }

    /// Get flags that should be applied to dependent objects.
    #[inline]
    pub fn propagation_flags(&self) -> Self {
        if self.needs_layout() {
            Self::LAYOUT
        } else {
            Self::NONE
        }
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        Self::NONE
    }
}
