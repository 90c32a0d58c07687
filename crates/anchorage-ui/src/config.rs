//! Manager configuration.

use anchorage_core::geometry::Size;
use std::time::Duration;

/// Settings for a [`UiManager`](crate::UiManager).
///
/// # Example
/// ```
/// use anchorage_ui::UiConfig;
/// use std::time::Duration;
///
/// let config = UiConfig::default()
///     .with_screen_size(1280.0, 720.0)
///     .with_double_click_time(Duration::from_millis(300));
/// assert_eq!(config.screen_size.width, 1280.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Size of the screen rectangle in pixels.
    pub screen_size: Size<f32>,
    /// Distance a pressed pointer must travel before a drag starts.
    pub drag_threshold: f32,
    /// Maximum delay between two presses for a double click.
    pub double_click_time: Duration,
    /// Hold time before a press turns into a long press.
    pub long_press_time: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            screen_size: Size::new(800.0, 600.0),
            drag_threshold: 4.0,
            double_click_time: Duration::from_millis(250),
            long_press_time: Duration::from_millis(500),
        }
    }
}

impl UiConfig {
    pub fn with_screen_size(mut self, width: f32, height: f32) -> Self {
        self.screen_size = Size::new(width, height);
        self
    }

    pub fn with_drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    pub fn with_double_click_time(mut self, time: Duration) -> Self {
        self.double_click_time = time;
        self
    }

    pub fn with_long_press_time(mut self, time: Duration) -> Self {
        self.long_press_time = time;
        self
    }
}
