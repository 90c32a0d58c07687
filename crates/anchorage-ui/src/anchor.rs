//! Anchor declarations: which point of an object is pinned to which point of
//! another object (or the screen), and by how much it is offset.

use crate::object::ObjectId;
use anchorage_core::geometry::Rect;
use anchorage_core::math::Vec2;
use std::fmt;
use std::str::FromStr;

/// Named attachment points on a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnchorPoint {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    Center,
}

impl AnchorPoint {
    pub const COUNT: usize = 9;

    pub const ALL: [AnchorPoint; Self::COUNT] = [
        AnchorPoint::TopLeft,
        AnchorPoint::Top,
        AnchorPoint::TopRight,
        AnchorPoint::Right,
        AnchorPoint::BottomRight,
        AnchorPoint::Bottom,
        AnchorPoint::BottomLeft,
        AnchorPoint::Left,
        AnchorPoint::Center,
    ];

    /// Slot index used for per-object anchor storage.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Position of the point inside a rectangle, as fractions of its size.
    pub const fn fraction(self) -> (f32, f32) {
        match self {
            AnchorPoint::TopLeft => (0.0, 0.0),
            AnchorPoint::Top => (0.5, 0.0),
            AnchorPoint::TopRight => (1.0, 0.0),
            AnchorPoint::Right => (1.0, 0.5),
            AnchorPoint::BottomRight => (1.0, 1.0),
            AnchorPoint::Bottom => (0.5, 1.0),
            AnchorPoint::BottomLeft => (0.0, 1.0),
            AnchorPoint::Left => (0.0, 0.5),
            AnchorPoint::Center => (0.5, 0.5),
        }
    }

    /// Absolute coordinate of this point on `rect`.
    pub fn on(self, rect: &Rect<f32>) -> Vec2 {
        let (fx, fy) = self.fraction();
        Vec2::new(rect.x + rect.width * fx, rect.y + rect.height * fy)
    }

    /// What this point constrains on the given axis.
    pub fn role(self, axis: Axis) -> AxisRole {
        let (fx, fy) = self.fraction();
        let f = match axis {
            Axis::Horizontal => fx,
            Axis::Vertical => fy,
        };
        if f == 0.0 {
            AxisRole::Min
        } else if f == 1.0 {
            AxisRole::Max
        } else {
            AxisRole::Center
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            AnchorPoint::TopLeft => "TOPLEFT",
            AnchorPoint::Top => "TOP",
            AnchorPoint::TopRight => "TOPRIGHT",
            AnchorPoint::Right => "RIGHT",
            AnchorPoint::BottomRight => "BOTTOMRIGHT",
            AnchorPoint::Bottom => "BOTTOM",
            AnchorPoint::BottomLeft => "BOTTOMLEFT",
            AnchorPoint::Left => "LEFT",
            AnchorPoint::Center => "CENTER",
        }
    }
}

impl fmt::Display for AnchorPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown anchor point name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAnchorPointError(pub String);

impl fmt::Display for ParseAnchorPointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown anchor point \"{}\"", self.0)
    }
}

impl std::error::Error for ParseAnchorPointError {}

impl FromStr for AnchorPoint {
    type Err = ParseAnchorPointError;

    /// Case-insensitive, accepts both `TOPLEFT` and `top_left` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        AnchorPoint::ALL
            .into_iter()
            .find(|point| point.as_str() == normalized)
            .ok_or_else(|| ParseAnchorPointError(s.to_string()))
    }
}

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("Horizontal"),
            Axis::Vertical => f.write_str("Vertical"),
        }
    }
}

/// Which part of an axis an anchor point pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRole {
    /// Left or top edge.
    Min,
    /// Horizontal or vertical centre.
    Center,
    /// Right or bottom edge.
    Max,
}

/// What an anchor is attached to.
///
/// Targets are lookup keys, never ownership edges.
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorTarget {
    /// The owning frame, or the screen for root objects.
    Parent,
    /// The whole screen rectangle.
    Screen,
    /// A specific object.
    Object(ObjectId),
    /// An object looked up by name at resolution time. `$parent` is replaced
    /// with the owner's parent name.
    Named(String),
}

impl fmt::Display for AnchorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorTarget::Parent => f.write_str("$parent"),
            AnchorTarget::Screen => f.write_str("$screen"),
            AnchorTarget::Object(id) => write!(f, "{}", id),
            AnchorTarget::Named(name) => f.write_str(name),
        }
    }
}

/// How an anchor offset is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetMode {
    /// Offset in pixels.
    #[default]
    Absolute,
    /// Offset as a fraction of the target's size.
    Relative,
}

/// A single anchor constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    /// Point on the anchored object.
    pub point: AnchorPoint,
    pub target: AnchorTarget,
    /// Point on the target.
    pub relative_point: AnchorPoint,
    pub offset: Vec2,
    pub offset_mode: OffsetMode,
}

impl Anchor {
    /// Anchor `point` to the same point of `target` with no offset.
    pub fn new(point: AnchorPoint, target: AnchorTarget) -> Self {
        Self {
            point,
            target,
            relative_point: point,
            offset: Vec2::ZERO,
            offset_mode: OffsetMode::Absolute,
        }
    }

    pub fn to_parent(point: AnchorPoint) -> Self {
        Self::new(point, AnchorTarget::Parent)
    }

    pub fn to_screen(point: AnchorPoint) -> Self {
        Self::new(point, AnchorTarget::Screen)
    }

    pub fn to_object(point: AnchorPoint, target: ObjectId) -> Self {
        Self::new(point, AnchorTarget::Object(target))
    }

    pub fn to_named(point: AnchorPoint, name: impl Into<String>) -> Self {
        Self::new(point, AnchorTarget::Named(name.into()))
    }

    pub fn relative_to(mut self, relative_point: AnchorPoint) -> Self {
        self.relative_point = relative_point;
        self
    }

    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self.offset_mode = OffsetMode::Absolute;
        self
    }

    /// Offset expressed as a fraction of the target's size.
    pub fn relative_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self.offset_mode = OffsetMode::Relative;
        self
    }

    /// Absolute position this anchor pins, given the target's rectangle.
    pub fn project(&self, target: &Rect<f32>) -> Vec2 {
        let offset = match self.offset_mode {
            OffsetMode::Absolute => self.offset,
            OffsetMode::Relative => self.offset * Vec2::new(target.width, target.height),
        };
        self.relative_point.on(target) + offset
    }
}

/// Fixed-capacity storage, at most one anchor per point.
#[derive(Debug, Clone, Default)]
pub struct AnchorSet {
    slots: [Option<Anchor>; AnchorPoint::COUNT],
}

impl AnchorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the anchor on `anchor.point`, returning the previous one.
    pub fn set(&mut self, anchor: Anchor) -> Option<Anchor> {
        self.slots[anchor.point.index()].replace(anchor)
    }

    pub fn get(&self, point: AnchorPoint) -> Option<&Anchor> {
        self.slots[point.index()].as_ref()
    }

    pub fn clear(&mut self, point: AnchorPoint) -> Option<Anchor> {
        self.slots[point.index()].take()
    }

    pub fn clear_all(&mut self) {
        self.slots = Default::default();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Anchor> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
