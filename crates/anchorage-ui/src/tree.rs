//! Object arena, frame hierarchy, anchor dependency graph and invalidation.

use crate::anchor::{Anchor, AnchorPoint, AnchorTarget};
use crate::capability::{Container, Layered};
use crate::dirty::DirtyFlags;
use crate::error::{UiError, UiResult};
use crate::frame::{Drawable, Frame, Layer, Region};
use crate::length::Length;
use crate::object::{ObjectId, UiObject};
use crate::registry::NameRegistry;
use anchorage_core::alloc::sparse_set::SparseSet;
use anchorage_core::alloc::{HashMap, HashSet};
use anchorage_core::geometry::{Rect, Size};
use anchorage_core::profiling::profile_function;

/// Placeholder replaced by the parent's name in object names and named anchors.
pub const PARENT_PLACEHOLDER: &str = "$parent";

/// A node in the UI arena.
#[derive(Debug)]
pub struct UiNode {
    pub object: UiObject,
    pub kind: NodeKind,
}

/// Closed set of object kinds.
#[derive(Debug)]
pub enum NodeKind {
    Frame(Frame),
    Region(Region),
}

/// Where an anchor points once looked up.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TargetRef {
    Screen,
    Object(ObjectId),
    /// Dead handle, unknown name or `$parent` without a named parent.
    Missing(String),
}

/// Arena of every frame and region, plus the bookkeeping that links them.
///
/// Containment (parent/children) is ownership. Anchors are lookup edges kept
/// in a reverse graph so a change can be pushed forward to everything that
/// depends on it.
#[derive(Debug)]
pub struct UiTree {
    nodes: SparseSet<UiNode>,
    roots: Vec<ObjectId>,
    names: NameRegistry,
    /// target -> objects anchored to it
    dependents: HashMap<ObjectId, HashSet<ObjectId>>,
    /// unregistered name -> objects anchored to it
    waiting: HashMap<String, HashSet<ObjectId>>,
    /// Objects whose rectangle is stale
    dirty: HashSet<ObjectId>,
    /// Objects carrying non-layout flags until the next settle
    touched: HashSet<ObjectId>,
    screen: Rect<f32>,
}

impl UiTree {
    pub fn new(screen_size: Size<f32>) -> Self {
        Self {
            nodes: SparseSet::new(),
            roots: Vec::new(),
            names: NameRegistry::new(),
            dependents: HashMap::new(),
            waiting: HashMap::new(),
            dirty: HashSet::new(),
            touched: HashSet::new(),
            screen: Rect::from_size(screen_size),
        }
    }

    pub fn screen_rect(&self) -> Rect<f32> {
        self.screen
    }

    /// Resize the screen. Every object is invalidated.
    pub fn set_screen_size(&mut self, size: Size<f32>) {
        let screen = Rect::from_size(size);
        if screen == self.screen {
            return;
        }
        self.screen = screen;
        self.invalidate_all();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.nodes.contains(id.slot())
    }

    pub fn node(&self, id: ObjectId) -> Option<&UiNode> {
        self.nodes.get(id.slot())
    }

    pub(crate) fn node_mut(&mut self, id: ObjectId) -> Option<&mut UiNode> {
        self.nodes.get_mut(id.slot())
    }

    pub fn object(&self, id: ObjectId) -> Option<&UiObject> {
        self.node(id).map(|node| &node.object)
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> Option<&mut UiObject> {
        self.node_mut(id).map(|node| &mut node.object)
    }

    pub fn frame(&self, id: ObjectId) -> Option<&Frame> {
        self.node(id).and_then(UiNode::as_frame)
    }

    pub(crate) fn frame_mut(&mut self, id: ObjectId) -> Option<&mut Frame> {
        self.node_mut(id).and_then(UiNode::as_frame_mut)
    }

    pub fn region(&self, id: ObjectId) -> Option<&Region> {
        self.node(id).and_then(UiNode::as_region)
    }

    pub(crate) fn region_mut(&mut self, id: ObjectId) -> Option<&mut Region> {
        self.node_mut(id).and_then(UiNode::as_region_mut)
    }

    /// The frame behind `id`, distinguishing dead handles from regions.
    pub fn require_frame(&self, id: ObjectId) -> UiResult<&Frame> {
        let node = self.node(id).ok_or(UiError::UnknownObject(id))?;
        node.as_frame().ok_or(UiError::NotAFrame(id))
    }

    pub(crate) fn require_frame_mut(&mut self, id: ObjectId) -> UiResult<&mut Frame> {
        let node = self.node_mut(id).ok_or(UiError::UnknownObject(id))?;
        node.as_frame_mut().ok_or(UiError::NotAFrame(id))
    }

    pub(crate) fn require_object_mut(&mut self, id: ObjectId) -> UiResult<&mut UiObject> {
        self.object_mut(id).ok_or(UiError::UnknownObject(id))
    }

    /// Root frames in creation order.
    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.names.get(name)
    }

    pub fn names(&self) -> &NameRegistry {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &UiNode)> + '_ {
        self.nodes
            .iter()
            .map(|(slot, node)| (ObjectId::from_slot(slot), node))
    }

    /// Shown, and every ancestor shown too.
    pub fn is_visible(&self, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            match self.object(cur) {
                Some(object) if object.shown => current = object.parent,
                _ => return false,
            }
        }
        true
    }

    /// Whether `ancestor` appears on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = self.object(id).and_then(UiObject::parent);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.object(cur).and_then(UiObject::parent);
        }
        false
    }

    /// Closest top-level frame on the parent chain of `id`, `id` included.
    pub fn top_level_frame(&self, id: ObjectId) -> Option<ObjectId> {
        let mut current = Some(id);
        while let Some(cur) = current {
            if self.frame(cur).is_some_and(Frame::is_top_level) {
                return Some(cur);
            }
            current = self.object(cur).and_then(UiObject::parent);
        }
        None
    }

    /// Objects anchored to `id`.
    pub fn dependents(&self, id: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        self.dependents.get(&id).into_iter().flatten().copied()
    }

    /// Expand `$parent` in `raw` with the parent's name.
    fn substitute_parent(&self, raw: &str, parent: Option<ObjectId>) -> Option<String> {
        if !raw.contains(PARENT_PLACEHOLDER) {
            return Some(raw.to_string());
        }
        let parent_name = parent.and_then(|p| self.names.name_of(p))?;
        Some(raw.replace(PARENT_PLACEHOLDER, parent_name))
    }

    fn prepare_name(&self, name: Option<&str>, parent: Option<ObjectId>) -> UiResult<Option<String>> {
        let Some(raw) = name else {
            return Ok(None);
        };
        let name = match self.substitute_parent(raw, parent) {
            Some(name) => name,
            None => {
                tracing::warn!(
                    "\"{}\" uses {} but has no named parent; dropping the placeholder",
                    raw,
                    PARENT_PLACEHOLDER
                );
                raw.replace(PARENT_PLACEHOLDER, "")
            }
        };
        if name.is_empty() {
            return Ok(None);
        }
        if self.names.contains(&name) {
            return Err(UiError::DuplicateName(name));
        }
        Ok(Some(name))
    }

    /// Insert a frame, as a root or as the last child of `parent`.
    pub(crate) fn insert_frame(
        &mut self,
        parent: Option<ObjectId>,
        name: Option<&str>,
        frame: Frame,
    ) -> UiResult<ObjectId> {
        if let Some(parent) = parent {
            self.require_frame(parent)?;
        }
        let name = self.prepare_name(name, parent)?;
        let node = UiNode {
            object: UiObject::new(name, parent),
            kind: NodeKind::Frame(frame),
        };
        let id = self.insert_node(node)?;
        match parent.and_then(|p| self.frame_mut(p)) {
            Some(parent_frame) => parent_frame.children.push(id),
            None => self.roots.push(id),
        }
        tracing::debug!("Created frame {} under {:?}", id, parent);
        Ok(id)
    }

    /// Insert a region at the end of `layer` in `frame`.
    pub(crate) fn insert_region(
        &mut self,
        frame: ObjectId,
        name: Option<&str>,
        layer: Layer,
        drawable: Drawable,
    ) -> UiResult<ObjectId> {
        self.require_frame(frame)?;
        let name = self.prepare_name(name, Some(frame))?;
        let node = UiNode {
            object: UiObject::new(name, Some(frame)),
            kind: NodeKind::Region(Region::new(layer, drawable)),
        };
        let id = self.insert_node(node)?;
        if let Some(owner) = self.frame_mut(frame) {
            owner.regions_mut(layer).push(id);
        }
        tracing::debug!("Created region {} in {} layer of {}", id, layer, frame);
        Ok(id)
    }

    fn insert_node(&mut self, node: UiNode) -> UiResult<ObjectId> {
        let name = node.object.name.clone();
        let id = ObjectId::from_slot(self.nodes.push(node));
        self.dirty.insert(id);
        if let Some(name) = name {
            self.names.register(&name, id)?;
            self.wake_waiting(&name);
        }
        Ok(id)
    }

    /// Re-bind objects that were anchored to `name` before it existed.
    fn wake_waiting(&mut self, name: &str) {
        let Some(waiting) = self.waiting.remove(name) else {
            return;
        };
        for id in waiting {
            self.bind_anchors(id);
            self.invalidate(id, DirtyFlags::ANCHORS);
        }
    }

    /// Look up what an anchor of `id` points at right now.
    pub(crate) fn lookup_target(&self, id: ObjectId, target: &AnchorTarget) -> TargetRef {
        let parent = self.object(id).and_then(UiObject::parent);
        match target {
            AnchorTarget::Parent => match parent {
                Some(parent) => TargetRef::Object(parent),
                None => TargetRef::Screen,
            },
            AnchorTarget::Screen => TargetRef::Screen,
            AnchorTarget::Object(target) if self.contains(*target) => TargetRef::Object(*target),
            AnchorTarget::Object(target) => TargetRef::Missing(target.to_string()),
            AnchorTarget::Named(raw) => match self.substitute_parent(raw, parent) {
                Some(name) => match self.names.get(&name) {
                    Some(target) => TargetRef::Object(target),
                    None => TargetRef::Missing(name),
                },
                None => TargetRef::Missing(raw.clone()),
            },
        }
    }

    /// Rectangle percentages of `id` are measured against, and the object providing it.
    pub(crate) fn size_reference(&self, id: ObjectId) -> Option<ObjectId> {
        self.object(id).and_then(UiObject::parent)
    }

    /// Rebuild the dependency edges of `id` from its current anchors.
    pub(crate) fn bind_anchors(&mut self, id: ObjectId) {
        let Some(object) = self.object_mut(id) else {
            return;
        };
        let old_targets = std::mem::take(&mut object.targets);
        let old_waiting = std::mem::take(&mut object.waiting_on);
        for target in old_targets {
            if let Some(set) = self.dependents.get_mut(&target) {
                set.remove(&id);
                if set.is_empty() {
                    self.dependents.remove(&target);
                }
            }
        }
        for name in old_waiting {
            if let Some(set) = self.waiting.get_mut(&name) {
                set.remove(&id);
                if set.is_empty() {
                    self.waiting.remove(&name);
                }
            }
        }

        let mut targets = Vec::new();
        let mut waiting_on = Vec::new();
        let Some(object) = self.object(id) else {
            return;
        };
        for anchor in object.anchors.iter() {
            match (self.lookup_target(id, &anchor.target), &anchor.target) {
                (TargetRef::Object(target), _) => {
                    if !targets.contains(&target) {
                        targets.push(target);
                    }
                }
                (TargetRef::Missing(name), AnchorTarget::Named(_)) => {
                    if !waiting_on.contains(&name) {
                        waiting_on.push(name);
                    }
                }
                _ => {}
            }
        }
        if object.width.is_percent() || object.height.is_percent() {
            if let Some(reference) = self.size_reference(id) {
                if !targets.contains(&reference) {
                    targets.push(reference);
                }
            }
        }

        for &target in &targets {
            self.dependents.entry(target).or_default().insert(id);
        }
        for name in &waiting_on {
            self.waiting.entry(name.clone()).or_default().insert(id);
        }
        if let Some(object) = self.object_mut(id) {
            object.targets = targets;
            object.waiting_on = waiting_on;
        }
    }

    /// Mark `id` with `flags`. Layout changes propagate forward to every object
    /// anchored to it, directly or transitively, each visited once.
    pub fn invalidate(&mut self, id: ObjectId, flags: DirtyFlags) {
        profile_function!();

        if flags.is_empty() {
            return;
        }
        let Some(object) = self.object_mut(id) else {
            return;
        };
        object.dirty |= flags;

        if !flags.should_propagate_to_dependents() {
            self.touched.insert(id);
            return;
        }
        self.dirty.insert(id);
        if !(flags - (DirtyFlags::LAYOUT | DirtyFlags::ANCHORS | DirtyFlags::SIZE)).is_empty() {
            self.touched.insert(id);
        }

        let propagated = flags.propagation_flags();
        let mut visited = HashSet::new();
        visited.insert(id);
        let mut queue = vec![id];
        let mut reached = Vec::new();
        while let Some(current) = queue.pop() {
            let Some(dependents) = self.dependents.get(&current) else {
                continue;
            };
            for &dependent in dependents {
                if visited.insert(dependent) {
                    queue.push(dependent);
                    reached.push(dependent);
                }
            }
        }

        for dependent in reached {
            if let Some(object) = self.object_mut(dependent) {
                object.dirty |= propagated;
                self.dirty.insert(dependent);
            }
        }
    }

    /// Invalidate the layout of `id` and everything it owns.
    pub fn invalidate_subtree(&mut self, id: ObjectId) {
        for member in self.collect_subtree(id) {
            self.invalidate(member, DirtyFlags::LAYOUT);
        }
    }

    pub fn invalidate_all(&mut self) {
        let ids: Vec<ObjectId> = self.nodes.slots().map(ObjectId::from_slot).collect();
        for id in ids {
            if let Some(object) = self.object_mut(id) {
                object.dirty |= DirtyFlags::LAYOUT;
                self.dirty.insert(id);
            }
        }
        tracing::debug!("Invalidated all {} objects", self.nodes.len());
    }

    /// Objects with a stale rectangle, in handle order.
    pub fn dirty_objects(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.dirty.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Whether any visible object has a stale rectangle.
    pub fn needs_resolve(&self) -> bool {
        self.dirty.iter().any(|&id| self.is_visible(id))
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// Store a successful resolution.
    pub(crate) fn commit_rect(&mut self, id: ObjectId, rect: Rect<f32>) {
        if let Some(object) = self.object_mut(id) {
            object.rect = rect;
            object.has_valid_geometry = true;
            object.last_error = None;
            object.dirty -= DirtyFlags::LAYOUT | DirtyFlags::ANCHORS | DirtyFlags::SIZE;
            self.dirty.remove(&id);
        }
    }

    /// Store a failed resolution. Returns true if the failure is new.
    pub(crate) fn commit_failure(&mut self, id: ObjectId, error: &UiError) -> bool {
        let Some(object) = self.object_mut(id) else {
            return false;
        };
        object.dirty |= DirtyFlags::LAYOUT;
        let fresh = object.last_error.as_ref() != Some(error);
        if fresh {
            object.last_error = Some(error.clone());
        }
        self.dirty.insert(id);
        fresh
    }

    /// Clear non-layout flags once order and renderer caches have caught up.
    pub(crate) fn settle_flags(&mut self) {
        let touched: Vec<ObjectId> = self.touched.drain().collect();
        for id in touched {
            if let Some(object) = self.object_mut(id) {
                object.dirty &= DirtyFlags::LAYOUT | DirtyFlags::ANCHORS | DirtyFlags::SIZE;
            }
        }
    }

    /// Set or replace the anchor on `anchor.point`.
    pub fn set_point(&mut self, id: ObjectId, anchor: Anchor) -> UiResult<()> {
        let object = self.require_object_mut(id)?;
        if object.anchors.get(anchor.point) == Some(&anchor) {
            return Ok(());
        }
        object.anchors.set(anchor);
        self.bind_anchors(id);
        self.invalidate(id, DirtyFlags::ANCHORS);
        Ok(())
    }

    pub fn clear_point(&mut self, id: ObjectId, point: AnchorPoint) -> UiResult<()> {
        let object = self.require_object_mut(id)?;
        if object.anchors.clear(point).is_none() {
            return Ok(());
        }
        self.bind_anchors(id);
        self.invalidate(id, DirtyFlags::ANCHORS);
        Ok(())
    }

    pub fn clear_all_points(&mut self, id: ObjectId) -> UiResult<()> {
        let object = self.require_object_mut(id)?;
        if object.anchors.is_empty() {
            return Ok(());
        }
        object.anchors.clear_all();
        self.bind_anchors(id);
        self.invalidate(id, DirtyFlags::ANCHORS);
        Ok(())
    }

    /// Pin TOPLEFT and BOTTOMRIGHT to the same corners of `target`, replacing
    /// every other anchor.
    pub fn set_all_points(&mut self, id: ObjectId, target: AnchorTarget) -> UiResult<()> {
        if !self.contains(id) {
            return Err(UiError::UnknownObject(id));
        }
        if self.lookup_target(id, &target) == TargetRef::Object(id) {
            return Err(UiError::AnchorToSelf(id));
        }
        let object = self.require_object_mut(id)?;
        object.anchors.clear_all();
        object
            .anchors
            .set(Anchor::new(AnchorPoint::TopLeft, target.clone()));
        object
            .anchors
            .set(Anchor::new(AnchorPoint::BottomRight, target));
        self.bind_anchors(id);
        self.invalidate(id, DirtyFlags::ANCHORS);
        Ok(())
    }

    pub fn set_size(&mut self, id: ObjectId, width: Length, height: Length) -> UiResult<()> {
        let object = self.require_object_mut(id)?;
        if object.width == width && object.height == height {
            return Ok(());
        }
        object.width = width;
        object.height = height;
        self.bind_anchors(id);
        self.invalidate(id, DirtyFlags::SIZE);
        Ok(())
    }

    /// Toggle the shown flag. Returns true if it changed.
    ///
    /// Showing invalidates the subtree so it is laid out on the next pass;
    /// hiding keeps cached geometry.
    pub fn set_shown(&mut self, id: ObjectId, shown: bool) -> UiResult<bool> {
        let object = self.require_object_mut(id)?;
        if object.shown == shown {
            return Ok(false);
        }
        object.shown = shown;
        self.invalidate(id, DirtyFlags::VISIBILITY);
        if shown {
            self.invalidate_subtree(id);
        }
        Ok(true)
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Returns false if `child` already belonged to `parent`.
    pub fn add_child(&mut self, parent: ObjectId, child: ObjectId) -> UiResult<bool> {
        self.require_frame(parent)?;
        self.require_frame(child)?;
        if child == parent || self.is_ancestor(child, parent) {
            return Err(UiError::HierarchyCycle { parent, child });
        }
        if self.object(child).and_then(UiObject::parent) == Some(parent) {
            return Ok(false);
        }
        self.detach(child);
        if let Some(frame) = self.frame_mut(parent) {
            frame.children.push(child);
        }
        if let Some(object) = self.object_mut(child) {
            object.parent = Some(parent);
        }
        self.reparented(child, Some(parent));
        Ok(true)
    }

    /// Detach `child` from `parent`, turning it into a root frame.
    pub fn remove_child(&mut self, parent: ObjectId, child: ObjectId) -> UiResult<()> {
        self.check_ownership(parent, child)?;
        self.require_frame(child)?;
        self.detach(child);
        if let Some(object) = self.object_mut(child) {
            object.parent = None;
        }
        self.roots.push(child);
        self.reparented(child, None);
        Ok(())
    }

    /// Fails with `InvalidOwnership` unless `parent` owns `child`.
    pub fn check_ownership(&self, parent: ObjectId, child: ObjectId) -> UiResult<()> {
        self.require_frame(parent)?;
        let object = self.object(child).ok_or(UiError::UnknownObject(child))?;
        if object.parent != Some(parent) {
            tracing::error!("{} does not own {}", parent, child);
            return Err(UiError::InvalidOwnership { parent, child });
        }
        Ok(())
    }

    fn reparented(&mut self, child: ObjectId, parent: Option<ObjectId>) {
        tracing::debug!("Reparented {} to {:?}", child, parent);
        self.bind_anchors(child);
        self.invalidate(child, DirtyFlags::ANCHORS | DirtyFlags::CHILDREN);
        if let Some(parent) = parent {
            self.invalidate(parent, DirtyFlags::CHILDREN);
        }
    }

    /// Unlink `id` from its owner's child or layer list, or from the roots.
    fn detach(&mut self, id: ObjectId) {
        let parent = self.object(id).and_then(UiObject::parent);
        let layer = self.region(id).map(Region::layer);
        match parent.and_then(|p| self.frame_mut(p)) {
            Some(owner) => match layer {
                Some(layer) => owner.regions_mut(layer).retain(|&r| r != id),
                None => owner.children.retain(|&c| c != id),
            },
            None => self.roots.retain(|&r| r != id),
        }
    }

    /// Move a region to another layer of its frame, at the end.
    pub fn set_layer(&mut self, region: ObjectId, layer: Layer) -> UiResult<()> {
        let node = self.node(region).ok_or(UiError::UnknownObject(region))?;
        let Some(current) = node.as_region().map(Region::layer) else {
            return Ok(());
        };
        if current == layer {
            return Ok(());
        }
        self.detach(region);
        if let Some(region_state) = self.region_mut(region) {
            region_state.layer = layer;
        }
        let owner = self.object(region).and_then(UiObject::parent);
        if let Some(frame) = owner.and_then(|f| self.frame_mut(f)) {
            frame.regions_mut(layer).push(region);
        }
        self.invalidate(region, DirtyFlags::PAINT);
        Ok(())
    }

    /// `id` and everything it owns, in pre-order. A frame's regions come
    /// right after it, in layer order.
    pub fn collect_subtree(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.node(current) else {
                continue;
            };
            out.push(current);
            if let Some(frame) = node.as_frame() {
                out.extend(frame.iter_regions().map(|(_, region)| region));
                stack.extend(frame.children().iter().rev().copied());
            }
        }
        out
    }

    /// Remove `id` and its subtree from the arena, returning the removed nodes
    /// in pre-order. Objects outside the subtree that were anchored into it are
    /// re-bound and invalidated.
    pub(crate) fn remove_subtree(&mut self, id: ObjectId) -> UiResult<Vec<(ObjectId, UiNode)>> {
        if !self.contains(id) {
            return Err(UiError::UnknownObject(id));
        }
        let ids = self.collect_subtree(id);
        let removed: HashSet<ObjectId> = ids.iter().copied().collect();
        self.detach(id);

        let mut orphaned = Vec::new();
        for &member in &ids {
            if let Some(dependents) = self.dependents.remove(&member) {
                orphaned.extend(dependents.into_iter().filter(|d| !removed.contains(d)));
            }
            // Drop the member's own outgoing edges.
            if let Some(object) = self.object_mut(member) {
                object.anchors.clear_all();
                object.width = Length::Auto;
                object.height = Length::Auto;
            }
            self.bind_anchors(member);
            self.names.unregister(member);
            self.dirty.remove(&member);
            self.touched.remove(&member);
        }

        let nodes: Vec<(ObjectId, UiNode)> = ids
            .iter()
            .filter_map(|&member| self.nodes.remove(member.slot()).map(|node| (member, node)))
            .collect();

        orphaned.sort_unstable();
        orphaned.dedup();
        for dependent in orphaned {
            self.bind_anchors(dependent);
            self.invalidate(dependent, DirtyFlags::ANCHORS);
        }
        tracing::debug!("Destroyed {} ({} objects)", id, nodes.len());
        Ok(nodes)
    }
}
