//! Shorthands for building UI trees in tests.

use anchorage_ui::{Anchor, AnchorPoint, Length, ObjectId, UiConfig, UiManager};

/// A manager on an 800x600 screen plus helpers for common setups.
pub struct UiFixture {
    pub ui: UiManager,
}

impl UiFixture {
    pub fn new() -> Self {
        Self::with_config(UiConfig::default().with_screen_size(800.0, 600.0))
    }

    pub fn with_config(config: UiConfig) -> Self {
        Self {
            ui: UiManager::new(config),
        }
    }

    /// Anonymous frame placed at an absolute offset from its parent's top-left.
    ///
    /// # Panics
    /// Panics if `parent` is not a live frame.
    pub fn frame_at(
        &mut self,
        parent: Option<ObjectId>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> ObjectId {
        self.named_frame_at(parent, None, x, y, width, height)
    }

    /// Named variant of [`UiFixture::frame_at`].
    ///
    /// # Panics
    /// Panics if `parent` is not a live frame or `name` is taken.
    pub fn named_frame_at(
        &mut self,
        parent: Option<ObjectId>,
        name: Option<&str>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> ObjectId {
        let frame = self
            .ui
            .create_frame(parent, name)
            .expect("fixture frame creation failed");
        self.ui
            .set_size(frame, Length::Px(width), Length::Px(height))
            .expect("fixture sizing failed");
        self.ui
            .set_point(frame, Anchor::to_parent(AnchorPoint::TopLeft).offset(x, y))
            .expect("fixture anchoring failed");
        frame
    }

    /// Root frame covering the whole screen.
    ///
    /// # Panics
    /// Panics if `name` is taken.
    pub fn fullscreen(&mut self, name: Option<&str>) -> ObjectId {
        let frame = self
            .ui
            .create_frame(None, name)
            .expect("fixture frame creation failed");
        self.ui
            .set_all_points(frame, anchorage_ui::AnchorTarget::Screen)
            .expect("fixture anchoring failed");
        frame
    }
}

impl Default for UiFixture {
    fn default() -> Self {
        Self::new()
    }
}
