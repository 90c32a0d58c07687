//! Frames, layered regions and their stacking vocabulary.

use crate::capability::FrameBehavior;
use crate::object::ObjectId;
use crate::strata::OrderKey;
use anchorage_core::geometry::{Insets, Rect, Size};
use std::fmt;
use std::str::FromStr;

/// Symbolic stacking category of a frame. Lower strata draw first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FrameStrata {
    /// Inherit the parent's effective strata (`Medium` for root frames).
    #[default]
    Parent,
    Background,
    Low,
    Medium,
    High,
    Dialog,
    Fullscreen,
    FullscreenDialog,
    Tooltip,
}

impl FrameStrata {
    /// Strata used by root frames that inherit.
    pub const ROOT_DEFAULT: FrameStrata = FrameStrata::Medium;

    pub const fn as_str(self) -> &'static str {
        match self {
            FrameStrata::Parent => "PARENT",
            FrameStrata::Background => "BACKGROUND",
            FrameStrata::Low => "LOW",
            FrameStrata::Medium => "MEDIUM",
            FrameStrata::High => "HIGH",
            FrameStrata::Dialog => "DIALOG",
            FrameStrata::Fullscreen => "FULLSCREEN",
            FrameStrata::FullscreenDialog => "FULLSCREEN_DIALOG",
            FrameStrata::Tooltip => "TOOLTIP",
        }
    }

    /// Resolve `Parent` against the parent's effective strata.
    pub fn effective(self, parent: Option<FrameStrata>) -> FrameStrata {
        match self {
            FrameStrata::Parent => parent.unwrap_or(Self::ROOT_DEFAULT),
            other => other,
        }
    }
}

impl fmt::Display for FrameStrata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown strata name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFrameStrataError(pub String);

impl fmt::Display for ParseFrameStrataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown frame strata \"{}\"", self.0)
    }
}

impl std::error::Error for ParseFrameStrataError {}

impl FromStr for FrameStrata {
    type Err = ParseFrameStrataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        [
            FrameStrata::Parent,
            FrameStrata::Background,
            FrameStrata::Low,
            FrameStrata::Medium,
            FrameStrata::High,
            FrameStrata::Dialog,
            FrameStrata::Fullscreen,
            FrameStrata::FullscreenDialog,
            FrameStrata::Tooltip,
        ]
        .into_iter()
        .find(|strata| strata.as_str() == upper)
        .ok_or_else(|| ParseFrameStrataError(s.to_string()))
    }
}

/// Draw layer of a region inside its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Background,
    Border,
    Artwork,
    Overlay,
    Highlight,
    SpecialHigh,
}

impl Layer {
    pub const COUNT: usize = 6;

    /// Layers in draw order.
    pub const ALL: [Layer; Self::COUNT] = [
        Layer::Background,
        Layer::Border,
        Layer::Artwork,
        Layer::Overlay,
        Layer::Highlight,
        Layer::SpecialHigh,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layer::Background => "BACKGROUND",
            Layer::Border => "BORDER",
            Layer::Artwork => "ARTWORK",
            Layer::Overlay => "OVERLAY",
            Layer::Highlight => "HIGHLIGHT",
            Layer::SpecialHigh => "SPECIALHIGH",
        };
        f.write_str(name)
    }
}

/// Renderer-facing content of a region. Opaque to layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    /// Solid fill, linear RGBA.
    Color([f32; 4]),
    /// Texture looked up by the renderer.
    Texture { key: String },
    /// Text shaped and drawn by the renderer.
    Text { content: String },
}

/// Frame-specific state. The shared object state lives in [`UiObject`](crate::UiObject).
pub struct Frame {
    pub(crate) children: Vec<ObjectId>,
    pub(crate) layers: [Vec<ObjectId>; Layer::COUNT],
    pub(crate) strata: FrameStrata,
    pub(crate) level: i32,
    pub(crate) order_key: OrderKey,
    pub(crate) mouse_enabled: bool,
    pub(crate) wheel_enabled: bool,
    pub(crate) auto_focus: bool,
    pub(crate) top_level: bool,
    pub(crate) movable: bool,
    pub(crate) clamped_to_screen: bool,
    pub(crate) min_size: Size<f32>,
    pub(crate) max_size: Size<f32>,
    pub(crate) hit_insets: Insets,
    pub(crate) behavior: Option<Box<dyn FrameBehavior>>,
}

impl Frame {
    /// A frame at the level carried by `order_key`.
    pub(crate) fn new(order_key: OrderKey, behavior: Option<Box<dyn FrameBehavior>>) -> Self {
        Self {
            children: Vec::new(),
            layers: Default::default(),
            strata: FrameStrata::Parent,
            level: order_key.level,
            order_key,
            mouse_enabled: true,
            wheel_enabled: false,
            auto_focus: false,
            top_level: false,
            movable: false,
            clamped_to_screen: false,
            min_size: Size::new(0.0, 0.0),
            max_size: Size::new(f32::INFINITY, f32::INFINITY),
            hit_insets: Insets::ZERO,
            behavior,
        }
    }

    /// Declared strata, possibly `Parent`.
    pub fn strata(&self) -> FrameStrata {
        self.strata
    }

    /// Strata actually used for ordering.
    pub fn effective_strata(&self) -> FrameStrata {
        self.order_key.strata
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn order_key(&self) -> OrderKey {
        self.order_key
    }

    pub fn is_auto_focus(&self) -> bool {
        self.auto_focus
    }

    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }

    /// Raised above its strata when it, or a frame below it, is pressed.
    pub fn is_top_level(&self) -> bool {
        self.top_level
    }

    pub fn is_movable(&self) -> bool {
        self.movable
    }

    pub fn is_clamped_to_screen(&self) -> bool {
        self.clamped_to_screen
    }

    pub fn min_size(&self) -> Size<f32> {
        self.min_size
    }

    pub fn max_size(&self) -> Size<f32> {
        self.max_size
    }

    /// Apply the size limits, then keep the rectangle inside `screen`.
    ///
    /// Limits move the right and bottom edges. A clamped frame larger than the
    /// screen is shrunk to it.
    pub fn constrain(&self, rect: Rect<f32>, screen: Rect<f32>) -> Rect<f32> {
        let mut rect = rect;
        rect.width = rect.width.max(self.min_size.width).min(self.max_size.width);
        rect.height = rect.height.max(self.min_size.height).min(self.max_size.height);
        if !self.clamped_to_screen {
            return rect;
        }
        let (x, width) = clamp_span(rect.x, rect.width, screen.x, screen.width);
        let (y, height) = clamp_span(rect.y, rect.height, screen.y, screen.height);
        Rect::new(x, y, width, height)
    }
}

fn clamp_span(start: f32, extent: f32, bound_start: f32, bound_extent: f32) -> (f32, f32) {
    if extent > bound_extent {
        return (bound_start, bound_extent);
    }
    let end = bound_start + bound_extent;
    if start + extent > end {
        (end - extent, extent)
    } else if start < bound_start {
        (bound_start, extent)
    } else {
        (start, extent)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("children", &self.children)
            .field("strata", &self.strata)
            .field("level", &self.level)
            .field("order_key", &self.order_key)
            .field("mouse_enabled", &self.mouse_enabled)
            .field("wheel_enabled", &self.wheel_enabled)
            .field("top_level", &self.top_level)
            .field("movable", &self.movable)
            .finish_non_exhaustive()
    }
}

/// Region-specific state.
#[derive(Debug, Clone)]
pub struct Region {
    pub(crate) layer: Layer,
    pub(crate) drawable: Drawable,
}

impl Region {
    pub(crate) fn new(layer: Layer, drawable: Drawable) -> Self {
        Self { layer, drawable }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn drawable(&self) -> &Drawable {
        &self.drawable
    }
}
