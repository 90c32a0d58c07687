//! Global draw order of frames.
//!
//! Every frame owns one [`OrderKey`] in an ordered index. Mutations patch the
//! index in place; the flat list of visible frames handed to renderers and the
//! hit-tester is only rebuilt when something changed and someone asks for it.

use crate::frame::FrameStrata;
use crate::object::ObjectId;
use crate::tree::UiTree;
use anchorage_core::profiling::profile_function;
use std::collections::BTreeMap;

/// Total ordering key of a frame: strata, then level, then sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderKey {
    /// Effective strata, never `Parent`.
    pub strata: FrameStrata,
    pub level: i32,
    /// Registration sequence, unique per key.
    pub seq: u64,
}

impl OrderKey {
    pub const fn new(strata: FrameStrata, level: i32, seq: u64) -> Self {
        Self { strata, level, seq }
    }

    fn strata_range(strata: FrameStrata) -> std::ops::RangeInclusive<OrderKey> {
        OrderKey::new(strata, i32::MIN, 0)..=OrderKey::new(strata, i32::MAX, u64::MAX)
    }
}

/// Ordered index of every frame plus the lazily rebuilt visible order.
#[derive(Debug, Default)]
pub struct DrawOrder {
    index: BTreeMap<OrderKey, ObjectId>,
    next_seq: u64,
    visible: Vec<ObjectId>,
    dirty: bool,
    rebuilds: u64,
}

impl DrawOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next registration sequence number.
    pub fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Key for a newly created frame.
    pub(crate) fn register(&mut self, strata: FrameStrata, level: i32) -> OrderKey {
        OrderKey::new(strata, level, self.next_seq())
    }

    pub(crate) fn insert(&mut self, key: OrderKey, id: ObjectId) {
        self.index.insert(key, id);
        self.dirty = true;
    }

    pub(crate) fn remove(&mut self, key: &OrderKey) {
        if self.index.remove(key).is_some() {
            self.dirty = true;
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of frames in the index, hidden ones included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// How many times the visible order has been rebuilt.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Highest level used in `strata`, hidden frames included.
    pub fn highest_level(&self, strata: FrameStrata) -> Option<i32> {
        self.index
            .range(OrderKey::strata_range(strata))
            .next_back()
            .map(|(key, _)| key.level)
    }

    /// Frame drawn last within `strata`.
    pub fn topmost_in(&self, strata: FrameStrata) -> Option<ObjectId> {
        self.index
            .range(OrderKey::strata_range(strata))
            .next_back()
            .map(|(_, &id)| id)
    }

    /// Re-key `root` if its strata or level moved, then its descendants.
    ///
    /// Every descendant frame's level moves by `shift`; `Parent`-strata
    /// descendants follow a strata change. Keys are re-issued in pre-order so
    /// children stay after their parent.
    pub(crate) fn restack(&mut self, tree: &mut UiTree, root: ObjectId, shift: i32) {
        profile_function!();

        let mut stack = vec![(root, 0)];
        while let Some((id, own_shift)) = stack.pop() {
            let parent_strata = tree
                .object(id)
                .and_then(|object| object.parent())
                .and_then(|parent| tree.frame(parent))
                .map(|parent| parent.effective_strata());
            let Some(frame) = tree.frame_mut(id) else {
                continue;
            };
            frame.level = frame.level.saturating_add(own_shift);
            let old = frame.order_key;
            let strata = frame.strata.effective(parent_strata);
            let strata_changed = strata != old.strata;
            if !strata_changed && old.level == frame.level {
                continue;
            }

            let key = OrderKey::new(strata, frame.level, self.next_seq());
            frame.order_key = key;
            self.index.remove(&old);
            self.index.insert(key, id);
            self.dirty = true;
            tracing::trace!("Restacked {} to {:?}", id, key);

            if strata_changed || shift != 0 {
                stack.extend(frame.children.iter().rev().map(|&child| (child, shift)));
            }
        }
    }

    /// Rebuild the visible order if anything changed. Returns true if rebuilt.
    pub fn rebuild(&mut self, tree: &UiTree) -> bool {
        if !self.dirty {
            return false;
        }
        profile_function!();

        self.visible.clear();
        self.visible.extend(
            self.index
                .values()
                .copied()
                .filter(|&id| tree.is_visible(id)),
        );
        self.dirty = false;
        self.rebuilds += 1;
        tracing::debug!(
            "Rebuilt draw order: {} visible of {} frames",
            self.visible.len(),
            self.index.len()
        );
        true
    }

    /// Visible frames, first drawn first. Stale if [`is_dirty`](Self::is_dirty).
    pub fn as_slice(&self) -> &[ObjectId] {
        &self.visible
    }

    /// Every frame in key order, hidden ones included.
    pub fn iter_all(&self) -> impl Iterator<Item = (&OrderKey, ObjectId)> + '_ {
        self.index.iter().map(|(key, &id)| (key, id))
    }
}
