//! Anchorage UI - anchor layout, strata ordering and hit-testing
//!
//! The geometry-and-ordering core of a retained-mode UI toolkit:
//! - Objects positioned by anchors relative to other objects or the screen
//! - Frames stacked by strata, level and creation sequence
//! - Per-frame draw layers holding regions
//! - Incremental resolution driven by dirty flags
//! - Pointer hit-testing with enter/leave, click, drag and long press
//!
//! Rendering, raw input and layout file loading stay with the host.
//!
//! ## Quick Start
//!
//! ```rust
//! use anchorage_ui::{Anchor, AnchorPoint, Length, UiConfig, UiManager};
//!
//! let mut ui = UiManager::new(UiConfig::default().with_screen_size(800.0, 600.0));
//! let panel = ui.create_frame(None, Some("Panel")).unwrap();
//! ui.set_size(panel, Length::Px(200.0), Length::Px(100.0)).unwrap();
//! ui.set_point(panel, Anchor::to_parent(AnchorPoint::Center)).unwrap();
//!
//! // Once per host frame:
//! ui.update();
//! assert_eq!(ui.rect(panel).map(|r| (r.x, r.y)), Some((300.0, 250.0)));
//! ```

pub mod anchor;
pub mod capability;
pub mod config;
pub mod dirty;
pub mod error;
pub mod event;
pub mod focus;
pub mod frame;
pub mod length;
pub mod metrics;
pub mod object;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod strata;
pub mod tree;

pub use anchor::{Anchor, AnchorPoint, AnchorSet, AnchorTarget, Axis, OffsetMode};
pub use capability::{Container, FrameBehavior, Interactive, Layered, Positionable};
pub use config::UiConfig;
pub use dirty::DirtyFlags;
pub use error::{UiError, UiResult};
pub use event::{EventDispatcher, HitFilter, PointerId, PointerPhase, UiEvent, UiEventKind};
pub use focus::FocusStack;
pub use frame::{Drawable, Frame, FrameStrata, Layer, ParseFrameStrataError, Region};
pub use length::Length;
pub use metrics::UiMetrics;
pub use object::{ObjectId, UiObject};
pub use render::{FrameDraw, RegionDraw, UiRenderer};
pub use resolver::{PassStats, ResolvePass};
pub use strata::{DrawOrder, OrderKey};
pub use tree::{NodeKind, UiNode, UiTree};

// Re-export common types from dependencies
pub use anchorage_core::geometry::{Insets, Rect, Size};
pub use anchorage_core::math::Vec2;

use anchorage_core::profiling::profile_function;
use metrics::MetricsTimer;
use std::time::Duration;

/// A frame being dragged around by the pointer.
#[derive(Debug, Clone, Copy)]
struct MoveState {
    frame: ObjectId,
    /// Bound on the first drag movement when started by hand.
    pointer: Option<PointerId>,
    origin: Vec2,
    travelled: Vec2,
}

/// Owns every UI object and drives layout, ordering and input for them.
///
/// Several managers can coexist; objects never cross between them.
pub struct UiManager {
    tree: UiTree,
    order: DrawOrder,
    dispatcher: EventDispatcher,
    focus: FocusStack,
    config: UiConfig,
    metrics: UiMetrics,
    diagnostics: Vec<UiError>,
    moving: Option<MoveState>,
}

impl UiManager {
    pub fn new(config: UiConfig) -> Self {
        Self {
            tree: UiTree::new(config.screen_size),
            order: DrawOrder::new(),
            dispatcher: EventDispatcher::new(&config),
            focus: FocusStack::new(),
            config,
            metrics: UiMetrics::new(),
            diagnostics: Vec::new(),
            moving: None,
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Read access to the object arena.
    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    // Construction and destruction

    /// Create a frame as a root or as the last child of `parent`.
    ///
    /// `$parent` in `name` is replaced with the parent's name.
    pub fn create_frame(&mut self, parent: Option<ObjectId>, name: Option<&str>) -> UiResult<ObjectId> {
        self.insert_frame(parent, name, None)
    }

    /// Create a frame driven by `behavior`.
    pub fn create_frame_with(
        &mut self,
        parent: Option<ObjectId>,
        name: Option<&str>,
        behavior: Box<dyn FrameBehavior>,
    ) -> UiResult<ObjectId> {
        self.insert_frame(parent, name, Some(behavior))
    }

    fn insert_frame(
        &mut self,
        parent: Option<ObjectId>,
        name: Option<&str>,
        behavior: Option<Box<dyn FrameBehavior>>,
    ) -> UiResult<ObjectId> {
        let parent_key = match parent {
            Some(parent) => Some(self.tree.require_frame(parent)?.order_key()),
            None => None,
        };
        // Children start one level above their parent.
        let key = self.order.register(
            FrameStrata::Parent.effective(parent_key.map(|k| k.strata)),
            parent_key.map_or(0, |k| k.level.saturating_add(1)),
        );
        let id = self.tree.insert_frame(parent, name, Frame::new(key, behavior))?;
        self.order.insert(key, id);
        if let Some(parent) = parent {
            self.tree.invalidate(parent, DirtyFlags::CHILDREN);
        }
        Ok(id)
    }

    /// Create a region at the end of `layer` in `frame`.
    pub fn create_region(
        &mut self,
        frame: ObjectId,
        layer: Layer,
        name: Option<&str>,
        drawable: Drawable,
    ) -> UiResult<ObjectId> {
        let id = self.tree.insert_region(frame, name, layer, drawable)?;
        self.tree.invalidate(frame, DirtyFlags::CHILDREN);
        Ok(id)
    }

    /// Destroy an object. Frames take their children and regions with them.
    pub fn destroy(&mut self, id: ObjectId) -> UiResult<()> {
        let parent = self.tree.object(id).and_then(UiObject::parent);
        let removed = self.tree.remove_subtree(id)?;

        let mut events = Vec::new();
        for (removed_id, node) in &removed {
            if let Some(frame) = node.as_frame() {
                self.order.remove(&frame.order_key);
                self.dispatcher.forget(*removed_id);
                events.extend(self.focus.forget(*removed_id));
                if self.is_moving(*removed_id) {
                    self.moving = None;
                }
            }
        }
        if let Some(parent) = parent {
            self.tree.invalidate(parent, DirtyFlags::CHILDREN);
        }
        self.order.mark_dirty();
        self.deliver(&events);
        Ok(())
    }

    /// Destroy `child`, which must be owned by `parent`.
    pub fn destroy_child(&mut self, parent: ObjectId, child: ObjectId) -> UiResult<()> {
        self.tree.check_ownership(parent, child)?;
        self.destroy(child)
    }

    // Hierarchy

    /// Move `child` under `parent`, after its existing children. The child
    /// lands one level above its new parent, its own subtree shifted with it.
    pub fn add_child(&mut self, parent: ObjectId, child: ObjectId) -> UiResult<()> {
        if self.tree.add_child(parent, child)? {
            let level = self.tree.require_frame(parent)?.level.saturating_add(1);
            let frame = self.tree.require_frame_mut(child)?;
            let shift = level.saturating_sub(frame.level);
            frame.level = level;
            self.order.restack(&mut self.tree, child, shift);
            self.order.mark_dirty();
        }
        Ok(())
    }

    /// Detach `child` from `parent`, leaving it as a root frame.
    pub fn remove_child(&mut self, parent: ObjectId, child: ObjectId) -> UiResult<()> {
        self.tree.remove_child(parent, child)?;
        self.order.restack(&mut self.tree, child, 0);
        self.order.mark_dirty();
        Ok(())
    }

    /// Show or hide an object. Hidden frames leave the draw order and hit-testing
    /// with their whole subtree, but keep their cached geometry.
    pub fn set_visible(&mut self, id: ObjectId, visible: bool) -> UiResult<()> {
        if self.tree.set_shown(id, visible)? && self.tree.frame(id).is_some() {
            self.order.mark_dirty();
        }
        Ok(())
    }

    pub fn show(&mut self, id: ObjectId) -> UiResult<()> {
        self.set_visible(id, true)
    }

    pub fn hide(&mut self, id: ObjectId) -> UiResult<()> {
        self.set_visible(id, false)
    }

    /// Shown, with every ancestor shown.
    pub fn is_visible(&self, id: ObjectId) -> bool {
        self.tree.is_visible(id)
    }

    // Stacking

    pub fn set_strata(&mut self, id: ObjectId, strata: FrameStrata) -> UiResult<()> {
        let frame = self.tree.require_frame_mut(id)?;
        if frame.strata == strata {
            return Ok(());
        }
        frame.strata = strata;
        self.tree.invalidate(id, DirtyFlags::ORDER);
        self.order.restack(&mut self.tree, id, 0);
        Ok(())
    }

    /// Set the frame's level. Descendants move by the same amount so they
    /// keep drawing above it.
    pub fn set_level(&mut self, id: ObjectId, level: i32) -> UiResult<()> {
        let frame = self.tree.require_frame_mut(id)?;
        if frame.level == level {
            return Ok(());
        }
        let shift = level.saturating_sub(frame.level);
        frame.level = level;
        self.tree.invalidate(id, DirtyFlags::ORDER);
        self.order.restack(&mut self.tree, id, shift);
        Ok(())
    }

    /// Let the frame be raised by [`raise`](Self::raise) and by presses on it
    /// or its descendants.
    pub fn set_top_level(&mut self, id: ObjectId, top_level: bool) -> UiResult<()> {
        self.tree.require_frame_mut(id)?.top_level = top_level;
        Ok(())
    }

    /// Put a top-level frame above every other frame of its strata. Other
    /// frames are left alone.
    pub fn raise(&mut self, id: ObjectId) -> UiResult<()> {
        let frame = self.tree.require_frame(id)?;
        if !frame.is_top_level() {
            return Ok(());
        }
        let key = frame.order_key();
        if self.order.topmost_in(key.strata) == Some(id) {
            return Ok(());
        }
        let highest = self.order.highest_level(key.strata).unwrap_or(key.level);
        self.set_level(id, highest.saturating_add(1))
    }

    /// Highest level used by any frame of `strata`, hidden ones included.
    pub fn highest_level(&self, strata: FrameStrata) -> Option<i32> {
        self.order.highest_level(strata)
    }

    // Anchors and size

    pub fn set_point(&mut self, id: ObjectId, anchor: Anchor) -> UiResult<()> {
        self.tree.set_point(id, anchor)
    }

    pub fn clear_point(&mut self, id: ObjectId, point: AnchorPoint) -> UiResult<()> {
        self.tree.clear_point(id, point)
    }

    pub fn clear_all_points(&mut self, id: ObjectId) -> UiResult<()> {
        self.tree.clear_all_points(id)
    }

    /// Make the object cover `target` exactly.
    pub fn set_all_points(&mut self, id: ObjectId, target: AnchorTarget) -> UiResult<()> {
        self.tree.set_all_points(id, target)
    }

    pub fn set_size(&mut self, id: ObjectId, width: Length, height: Length) -> UiResult<()> {
        self.tree.set_size(id, width, height)
    }

    pub fn set_width(&mut self, id: ObjectId, width: Length) -> UiResult<()> {
        let height = self.tree.object(id).ok_or(UiError::UnknownObject(id))?.height;
        self.tree.set_size(id, width, height)
    }

    pub fn set_height(&mut self, id: ObjectId, height: Length) -> UiResult<()> {
        let width = self.tree.object(id).ok_or(UiError::UnknownObject(id))?.width;
        self.tree.set_size(id, width, height)
    }

    /// Bound the frame's resolved size. `max` may be infinite.
    pub fn set_size_limits(&mut self, id: ObjectId, min: Size<f32>, max: Size<f32>) -> UiResult<()> {
        let frame = self.tree.require_frame_mut(id)?;
        if frame.min_size == min && frame.max_size == max {
            return Ok(());
        }
        frame.min_size = min;
        frame.max_size = max;
        self.tree.invalidate(id, DirtyFlags::SIZE);
        Ok(())
    }

    /// Keep the frame's rectangle inside the screen after anchoring.
    pub fn set_clamped_to_screen(&mut self, id: ObjectId, clamped: bool) -> UiResult<()> {
        let frame = self.tree.require_frame_mut(id)?;
        if frame.clamped_to_screen == clamped {
            return Ok(());
        }
        frame.clamped_to_screen = clamped;
        self.tree.invalidate(id, DirtyFlags::LAYOUT);
        Ok(())
    }

    /// Resize the screen; every object is laid out again on the next update.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        let size = Size::new(width, height);
        self.config.screen_size = size;
        self.tree.set_screen_size(size);
    }

    // Input configuration and drawables

    pub fn set_mouse_enabled(&mut self, id: ObjectId, enabled: bool) -> UiResult<()> {
        self.tree.require_frame_mut(id)?.mouse_enabled = enabled;
        Ok(())
    }

    pub fn set_wheel_enabled(&mut self, id: ObjectId, enabled: bool) -> UiResult<()> {
        self.tree.require_frame_mut(id)?.wheel_enabled = enabled;
        Ok(())
    }

    /// Shrink (or, with negative values, grow) the area that reacts to the pointer.
    pub fn set_hit_rect_insets(&mut self, id: ObjectId, insets: Insets) -> UiResult<()> {
        self.tree.require_frame_mut(id)?.hit_insets = insets;
        Ok(())
    }

    /// Let drags starting on the frame move it.
    pub fn set_movable(&mut self, id: ObjectId, movable: bool) -> UiResult<()> {
        self.tree.require_frame_mut(id)?.movable = movable;
        if !movable && self.is_moving(id) {
            self.moving = None;
        }
        Ok(())
    }

    /// Request keyboard focus whenever the frame is pressed.
    pub fn set_auto_focus(&mut self, id: ObjectId, enabled: bool) -> UiResult<()> {
        self.tree.require_frame_mut(id)?.auto_focus = enabled;
        Ok(())
    }

    /// Replace a region's drawable. Only the renderer needs to know.
    pub fn set_drawable(&mut self, region: ObjectId, drawable: Drawable) -> UiResult<()> {
        let node = self
            .tree
            .node_mut(region)
            .ok_or(UiError::UnknownObject(region))?;
        let state = node.as_region_mut().ok_or(UiError::NotARegion(region))?;
        if state.drawable == drawable {
            return Ok(());
        }
        state.drawable = drawable;
        self.tree.invalidate(region, DirtyFlags::PAINT);
        Ok(())
    }

    pub fn set_layer(&mut self, region: ObjectId, layer: Layer) -> UiResult<()> {
        if self.tree.frame(region).is_some() {
            return Err(UiError::NotARegion(region));
        }
        self.tree.set_layer(region, layer)
    }

    // Queries

    pub fn object(&self, id: ObjectId) -> Option<&UiObject> {
        self.tree.object(id)
    }

    pub fn frame(&self, id: ObjectId) -> Option<&Frame> {
        self.tree.frame(id)
    }

    pub fn region(&self, id: ObjectId) -> Option<&Region> {
        self.tree.region(id)
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.tree.find(name)
    }

    /// Last resolved rectangle, `None` if the object never resolved.
    pub fn rect(&self, id: ObjectId) -> Option<Rect<f32>> {
        self.tree
            .object(id)
            .filter(|object| object.has_valid_geometry())
            .map(UiObject::rect)
    }

    /// Children of a frame, in insertion order.
    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        self.tree.frame(id).map_or(&[][..], |frame| frame.children())
    }

    /// Resolution failures and dropped anchors from the last update, or from a
    /// later query that had to resolve pending layout.
    pub fn diagnostics(&self) -> &[UiError] {
        &self.diagnostics
    }

    /// Metrics from the last update.
    pub fn metrics(&self) -> &UiMetrics {
        &self.metrics
    }

    // Per-frame work

    /// Run behaviours, resolve every dirty visible object, rebuild the draw
    /// order if needed and refresh hover state. Returns the hover events the
    /// refresh produced.
    pub fn update(&mut self) -> Vec<UiEvent> {
        profile_function!();
        let total = MetricsTimer::start();
        let mut metrics = UiMetrics::new();

        let timer = MetricsTimer::start();
        self.run_behaviors();
        metrics.behavior_time = timer.stop();

        let timer = MetricsTimer::start();
        let (stats, skips) = self.resolve_dirty();
        metrics.objects_resolved = stats.resolved;
        metrics.resolve_failures = stats.failed;
        metrics.resolve_skips = skips;
        metrics.resolve_time = timer.stop();

        let timer = MetricsTimer::start();
        metrics.order_rebuilt = self.order.rebuild(&self.tree);
        metrics.order_time = timer.stop();

        self.tree.settle_flags();
        let events = self.refresh_hover();

        metrics.total_objects = self.tree.len();
        metrics.total_time = total.stop();
        tracing::trace!("{}", metrics.format_summary());
        self.metrics = metrics;
        events
    }

    /// Resolve every dirty visible object. Returns the pass counters and the
    /// number of hidden objects skipped.
    fn resolve_dirty(&mut self) -> (PassStats, usize) {
        let mut pass = ResolvePass::new();
        let mut skips = 0;
        for id in self.tree.dirty_objects() {
            if !self.tree.is_visible(id) {
                skips += 1;
                continue;
            }
            // Failures are kept in the pass diagnostics.
            let _ = pass.resolve(&mut self.tree, id);
        }
        let stats = pass.stats();
        self.diagnostics = pass.into_diagnostics();
        (stats, skips)
    }

    /// Bring geometry and order up to date before anyone reads them.
    fn ensure_resolved(&mut self) {
        if self.tree.needs_resolve() {
            self.resolve_dirty();
        }
        self.order.rebuild(&self.tree);
    }

    fn run_behaviors(&mut self) {
        let frames: Vec<ObjectId> = self
            .tree
            .iter()
            .filter(|(_, node)| node.as_frame().is_some_and(Frame::has_behavior))
            .map(|(id, _)| id)
            .collect();
        for id in frames {
            let Some(mut behavior) = self.tree.frame_mut(id).and_then(|f| f.behavior.take()) else {
                continue;
            };
            behavior.on_update(self, id);
            self.restore_behavior(id, behavior);
        }
    }

    fn restore_behavior(&mut self, id: ObjectId, behavior: Box<dyn FrameBehavior>) {
        if let Some(frame) = self.tree.frame_mut(id) {
            if frame.behavior.is_none() {
                frame.behavior = Some(behavior);
            }
        }
    }

    /// Hand events to the behaviours of their target frames.
    fn deliver(&mut self, events: &[UiEvent]) {
        for event in events {
            let Some(mut behavior) = self
                .tree
                .frame_mut(event.target)
                .and_then(|f| f.behavior.take())
            else {
                continue;
            };
            behavior.on_event(self, event.target, event);
            self.restore_behavior(event.target, behavior);
        }
    }

    fn refresh_hover(&mut self) -> Vec<UiEvent> {
        let mut events = Vec::new();
        for (pointer, point) in self.dispatcher.free_pointers() {
            let hit = event::hit_test(&self.tree, self.order.as_slice(), point, HitFilter::Mouse);
            events.extend(self.dispatcher.refresh(pointer, hit));
        }
        self.deliver(&events);
        events
    }

    /// Resolve one object (and what it depends on) right away.
    pub fn resolve(&mut self, id: ObjectId) -> UiResult<Rect<f32>> {
        ResolvePass::new().resolve(&mut self.tree, id)
    }

    /// Visible frames, first drawn first. Rebuilt lazily.
    pub fn draw_order(&mut self) -> &[ObjectId] {
        self.ensure_resolved();
        self.order.as_slice()
    }

    /// The draw order index, hidden frames included.
    pub fn order(&self) -> &DrawOrder {
        &self.order
    }

    /// Topmost mouse-enabled frame under `point`.
    pub fn hit_test(&mut self, point: Vec2) -> Option<ObjectId> {
        self.ensure_resolved();
        event::hit_test(&self.tree, self.order.as_slice(), point, HitFilter::Mouse)
    }

    /// Immutable view of geometry and order; the manager cannot change while
    /// it is alive.
    pub fn snapshot(&mut self) -> UiSnapshot<'_> {
        self.ensure_resolved();
        UiSnapshot {
            tree: &self.tree,
            order: self.order.as_slice(),
        }
    }

    pub fn render(&mut self, renderer: &dyn UiRenderer) {
        self.snapshot().render(renderer);
    }

    // Pointer input

    pub fn on_pointer_move(&mut self, pointer: PointerId, point: Vec2, time: Duration) -> Vec<UiEvent> {
        let hit = self.hit_test(point);
        let events = self.dispatcher.pointer_move(pointer, point, time, hit);
        self.drive_moving(&events);
        self.deliver(&events);
        events
    }

    /// A press raises the closest top-level frame on the pressed frame's
    /// parent chain, the pressed frame included.
    pub fn on_pointer_down(&mut self, pointer: PointerId, point: Vec2, time: Duration) -> Vec<UiEvent> {
        let hit = self.hit_test(point);
        let mut events = self.dispatcher.pointer_down(pointer, point, time, hit);
        let pressed = events
            .iter()
            .find(|e| e.kind == UiEventKind::Down)
            .map(|e| e.target);
        if let Some(frame) = pressed {
            if let Some(top_level) = self.tree.top_level_frame(frame) {
                let _ = self.raise(top_level);
            }
            if self.tree.frame(frame).is_some_and(Frame::is_auto_focus) {
                events.extend(self.focus.request(frame));
            }
        }
        self.deliver(&events);
        events
    }

    pub fn on_pointer_up(&mut self, pointer: PointerId, point: Vec2, time: Duration) -> Vec<UiEvent> {
        let hit = self.hit_test(point);
        let events = self.dispatcher.pointer_up(pointer, point, time, hit);
        self.drive_moving(&events);
        self.deliver(&events);
        events
    }

    /// Scroll over the topmost wheel-enabled frame under `point`.
    pub fn on_pointer_wheel(&mut self, pointer: PointerId, point: Vec2, delta: f32) -> Vec<UiEvent> {
        self.ensure_resolved();
        let hit = event::hit_test(&self.tree, self.order.as_slice(), point, HitFilter::Wheel);
        let events = self.dispatcher.wheel(pointer, point, delta, hit);
        self.deliver(&events);
        events
    }

    /// Fire long presses that became due while the pointer stood still.
    pub fn poll(&mut self, time: Duration) -> Vec<UiEvent> {
        let events = self.dispatcher.poll(time);
        self.deliver(&events);
        events
    }

    /// The host lost input focus: release every pointer.
    pub fn on_focus_lost(&mut self) -> Vec<UiEvent> {
        let events = self.dispatcher.focus_lost();
        self.drive_moving(&events);
        self.deliver(&events);
        events
    }

    pub fn pointer_phase(&self, pointer: PointerId) -> PointerPhase {
        self.dispatcher.phase(pointer)
    }

    // Moving frames

    /// Start moving a movable frame with the next drag on it. Its anchors are
    /// replaced by a single TOPLEFT screen anchor at its current position.
    /// Returns false if the frame is not movable or has no geometry yet.
    pub fn start_moving(&mut self, id: ObjectId) -> UiResult<bool> {
        self.begin_move(id, None)
    }

    pub fn stop_moving(&mut self) {
        if let Some(state) = self.moving.take() {
            tracing::debug!("Stopped moving {}", state.frame);
        }
    }

    pub fn is_moving(&self, id: ObjectId) -> bool {
        self.moving.is_some_and(|state| state.frame == id)
    }

    fn begin_move(&mut self, id: ObjectId, pointer: Option<PointerId>) -> UiResult<bool> {
        if !self.tree.require_frame(id)?.is_movable() {
            return Ok(false);
        }
        self.ensure_resolved();
        let Some(rect) = self.rect(id) else {
            return Ok(false);
        };
        self.tree.clear_all_points(id)?;
        self.tree
            .set_point(id, Anchor::to_screen(AnchorPoint::TopLeft).offset(rect.x, rect.y))?;
        self.tree
            .set_size(id, Length::Px(rect.width), Length::Px(rect.height))?;
        self.moving = Some(MoveState {
            frame: id,
            pointer,
            origin: rect.origin(),
            travelled: Vec2::ZERO,
        });
        tracing::debug!("Started moving {} from {:?}", id, rect.origin());
        Ok(true)
    }

    /// Follow drag events with the moving frame.
    fn drive_moving(&mut self, events: &[UiEvent]) {
        for event in events {
            match event.kind {
                UiEventKind::DragStart if self.moving.is_none() => {
                    let _ = self.begin_move(event.target, event.pointer);
                }
                UiEventKind::DragMove { delta } => {
                    let Some(state) = self.moving.as_mut() else {
                        continue;
                    };
                    if state.frame != event.target
                        || state.pointer.is_some_and(|p| Some(p) != event.pointer)
                    {
                        continue;
                    }
                    state.pointer = event.pointer;
                    state.travelled += delta;
                    let offset = state.origin + state.travelled;
                    let frame = state.frame;
                    let anchor = Anchor::to_screen(AnchorPoint::TopLeft).offset(offset.x, offset.y);
                    if self.tree.set_point(frame, anchor).is_err() {
                        self.moving = None;
                    }
                }
                UiEventKind::DragStop if self.is_moving(event.target) => self.stop_moving(),
                _ => {}
            }
        }
    }

    // Keyboard focus

    pub fn set_focus(&mut self, frame: ObjectId) -> UiResult<Vec<UiEvent>> {
        self.tree.require_frame(frame)?;
        let events = self.focus.request(frame);
        self.deliver(&events);
        Ok(events)
    }

    pub fn release_focus(&mut self, frame: ObjectId) -> Vec<UiEvent> {
        let events = self.focus.release(frame);
        self.deliver(&events);
        events
    }

    pub fn focused(&self) -> Option<ObjectId> {
        self.focus.focused()
    }
}

impl Default for UiManager {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}

/// Consistent read-only view handed to renderers and input code.
#[derive(Clone, Copy)]
pub struct UiSnapshot<'a> {
    tree: &'a UiTree,
    order: &'a [ObjectId],
}

impl<'a> UiSnapshot<'a> {
    pub fn tree(&self) -> &'a UiTree {
        self.tree
    }

    pub fn draw_order(&self) -> &'a [ObjectId] {
        self.order
    }

    pub fn object(&self, id: ObjectId) -> Option<&'a UiObject> {
        self.tree.object(id)
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.tree.find(name)
    }

    pub fn rect(&self, id: ObjectId) -> Option<Rect<f32>> {
        self.tree
            .object(id)
            .filter(|object| object.has_valid_geometry())
            .map(UiObject::rect)
    }

    pub fn hit_test(&self, point: Vec2) -> Option<ObjectId> {
        event::hit_test(self.tree, self.order, point, HitFilter::Mouse)
    }

    pub fn render(&self, renderer: &dyn UiRenderer) {
        render::render_order(self.tree, self.order, renderer);
    }
}
