//! Recording implementation of [`UiRenderer`].

use anchorage_core::geometry::Rect;
use anchorage_ui::{Drawable, FrameDraw, Layer, ObjectId, RegionDraw, UiRenderer};
use parking_lot::Mutex;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Frame {
        id: ObjectId,
        name: Option<String>,
        rect: Rect<f32>,
    },
    Region {
        id: ObjectId,
        frame: ObjectId,
        layer: Layer,
        rect: Rect<f32>,
        drawable: Drawable,
    },
}

impl RenderCall {
    pub fn id(&self) -> ObjectId {
        match self {
            RenderCall::Frame { id, .. } | RenderCall::Region { id, .. } => *id,
        }
    }
}

/// Renderer that only remembers what it was asked to draw.
///
/// `UiRenderer` methods take `&self`, so calls are recorded behind a `Mutex`.
#[derive(Debug, Default)]
pub struct MockRenderer {
    calls: Mutex<Vec<RenderCall>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls, in issue order.
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().clone()
    }

    /// Ids of the drawn frames, in issue order.
    pub fn frames(&self) -> Vec<ObjectId> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::Frame { id, .. } => Some(*id),
                RenderCall::Region { .. } => None,
            })
            .collect()
    }

    /// Ids of the drawn regions, in issue order.
    pub fn regions(&self) -> Vec<ObjectId> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::Region { id, .. } => Some(*id),
                RenderCall::Frame { .. } => None,
            })
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }
}

impl UiRenderer for MockRenderer {
    fn draw_frame(&self, frame: &FrameDraw<'_>) {
        self.calls.lock().push(RenderCall::Frame {
            id: frame.id,
            name: frame.name.map(str::to_owned),
            rect: frame.rect,
        });
    }

    fn draw_region(&self, region: &RegionDraw<'_>) {
        self.calls.lock().push(RenderCall::Region {
            id: region.id,
            frame: region.frame,
            layer: region.layer,
            rect: region.rect,
            drawable: region.drawable.clone(),
        });
    }
}
