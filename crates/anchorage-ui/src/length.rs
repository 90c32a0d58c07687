//! Explicit object dimensions.

use std::fmt;

/// Explicit width or height of a UI object.
///
/// # Examples
/// ```
/// use anchorage_ui::Length;
///
/// let fixed = Length::Px(100.0);
/// let relative = Length::Percent(50.0);
/// assert_eq!(fixed.resolve(400.0), Some(100.0));
/// assert_eq!(relative.resolve(400.0), Some(200.0));
/// assert_eq!(Length::Auto.resolve(400.0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Length {
    /// Fixed pixel value
    Px(f32),
    /// Percentage of the parent's (or screen's) size, 0.0 - 100.0
    Percent(f32),
    /// Derived from anchors
    #[default]
    Auto,
}

impl Length {
    /// Create a pixel length.
    pub fn px(value: f32) -> Self {
        Self::Px(value)
    }

    /// Create a percentage length.
    pub fn percent(value: f32) -> Self {
        Self::Percent(value)
    }

    /// Create an auto length.
    pub fn auto() -> Self {
        Self::Auto
    }

    /// Concrete extent, given the reference extent used for percentages.
    ///
    /// Zero and negative sizes count as unset, so they cannot constrain an axis.
    pub fn resolve(self, reference: f32) -> Option<f32> {
        let value = match self {
            Length::Px(v) => v,
            Length::Percent(p) => reference * p / 100.0,
            Length::Auto => return None,
        };
        (value.is_finite() && value > 0.0).then_some(value)
    }

    /// Check if this is a fixed pixel value.
    pub fn is_px(&self) -> bool {
        matches!(self, Length::Px(_))
    }

    /// Check if this is a percentage value.
    pub fn is_percent(&self) -> bool {
        matches!(self, Length::Percent(_))
    }

    /// Check if this is auto.
    pub fn is_auto(&self) -> bool {
        matches!(self, Length::Auto)
    }
}

impl From<f32> for Length {
    fn from(value: f32) -> Self {
        Length::Px(value)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{}px", v),
            Length::Percent(v) => write!(f, "{}%", v),
            Length::Auto => write!(f, "auto"),
        }
    }
}
