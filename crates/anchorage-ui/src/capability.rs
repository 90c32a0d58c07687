//! Capability traits for UI objects.
//!
//! Frames and regions share one closed [`NodeKind`](crate::tree::NodeKind)
//! variant, and callers ask a node for a capability instead of matching on
//! the variant or downcasting:
//!
//! ```rust,ignore
//! if let Some(container) = node.as_container() {
//!     for child in container.children() {
//!         // ...
//!     }
//! }
//! ```

use crate::event::UiEvent;
use crate::frame::{Frame, Layer, Region};
use crate::object::{ObjectId, UiObject};
use crate::tree::{NodeKind, UiNode};
use crate::UiManager;
use anchorage_core::geometry::{Insets, Rect};

/// Capability: anything with a position on screen.
pub trait Positionable {
    fn object(&self) -> &UiObject;

    fn object_mut(&mut self) -> &mut UiObject;

    /// Last resolved rectangle.
    fn rect(&self) -> Rect<f32> {
        self.object().rect
    }

    fn is_shown(&self) -> bool {
        self.object().shown
    }
}

/// Capability: owns child frames.
pub trait Container {
    /// Children in insertion order.
    fn children(&self) -> &[ObjectId];

    fn children_mut(&mut self) -> &mut Vec<ObjectId>;

    fn has_child(&self, child: ObjectId) -> bool {
        self.children().contains(&child)
    }
}

/// Capability: owns regions sorted into draw layers.
pub trait Layered {
    /// Regions of one layer, in insertion order.
    fn regions(&self, layer: Layer) -> &[ObjectId];

    fn regions_mut(&mut self, layer: Layer) -> &mut Vec<ObjectId>;

    /// All regions in draw order: layer by layer, insertion order inside a layer.
    fn iter_regions(&self) -> Box<dyn Iterator<Item = (Layer, ObjectId)> + '_> {
        Box::new(
            Layer::ALL
                .into_iter()
                .flat_map(move |layer| self.regions(layer).iter().map(move |&id| (layer, id))),
        )
    }
}

/// Capability: takes part in hit-testing.
pub trait Interactive {
    fn is_mouse_enabled(&self) -> bool;

    fn is_wheel_enabled(&self) -> bool;

    fn hit_insets(&self) -> Insets;

    /// Hit rectangle for a given resolved rectangle.
    fn hit_rect(&self, rect: Rect<f32>) -> Rect<f32> {
        rect.inset(self.hit_insets())
    }
}

impl Container for Frame {
    fn children(&self) -> &[ObjectId] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<ObjectId> {
        &mut self.children
    }
}

impl Layered for Frame {
    fn regions(&self, layer: Layer) -> &[ObjectId] {
        &self.layers[layer.index()]
    }

    fn regions_mut(&mut self, layer: Layer) -> &mut Vec<ObjectId> {
        &mut self.layers[layer.index()]
    }
}

impl Interactive for Frame {
    fn is_mouse_enabled(&self) -> bool {
        self.mouse_enabled
    }

    fn is_wheel_enabled(&self) -> bool {
        self.wheel_enabled
    }

    fn hit_insets(&self) -> Insets {
        self.hit_insets
    }
}

impl Positionable for UiNode {
    fn object(&self) -> &UiObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut UiObject {
        &mut self.object
    }
}

impl UiNode {
    pub fn as_frame(&self) -> Option<&Frame> {
        match &self.kind {
            NodeKind::Frame(frame) => Some(frame),
            NodeKind::Region(_) => None,
        }
    }

    pub fn as_frame_mut(&mut self) -> Option<&mut Frame> {
        match &mut self.kind {
            NodeKind::Frame(frame) => Some(frame),
            NodeKind::Region(_) => None,
        }
    }

    pub fn as_region(&self) -> Option<&Region> {
        match &self.kind {
            NodeKind::Region(region) => Some(region),
            NodeKind::Frame(_) => None,
        }
    }

    pub fn as_region_mut(&mut self) -> Option<&mut Region> {
        match &mut self.kind {
            NodeKind::Region(region) => Some(region),
            NodeKind::Frame(_) => None,
        }
    }

    /// Query if this node owns child frames.
    pub fn as_container(&self) -> Option<&dyn Container> {
        self.as_frame().map(|frame| frame as &dyn Container)
    }

    pub fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        self.as_frame_mut().map(|frame| frame as &mut dyn Container)
    }

    /// Query if this node owns layered regions.
    pub fn as_layered(&self) -> Option<&dyn Layered> {
        self.as_frame().map(|frame| frame as &dyn Layered)
    }

    pub fn as_layered_mut(&mut self) -> Option<&mut dyn Layered> {
        self.as_frame_mut().map(|frame| frame as &mut dyn Layered)
    }

    /// Query if this node can receive pointer input.
    pub fn as_interactive(&self) -> Option<&dyn Interactive> {
        self.as_frame().map(|frame| frame as &dyn Interactive)
    }
}

/// Script-like behaviour attached to a frame when it is created.
///
/// While a callback runs, the behaviour is detached from its frame, so it
/// may freely mutate the manager (including destroying its own frame).
/// Every mutation goes through the normal dirty-marking paths.
pub trait FrameBehavior {
    /// Called for every event targeted at the frame.
    fn on_event(&mut self, ui: &mut UiManager, frame: ObjectId, event: &UiEvent) {
        let _ = (ui, frame, event);
    }

    /// Called once per [`UiManager::update`], before layout is resolved.
    fn on_update(&mut self, ui: &mut UiManager, frame: ObjectId) {
        let _ = (ui, frame);
    }
}
