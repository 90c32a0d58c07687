//! Test utilities for Anchorage.
//!
//! - [`MockRenderer`] records draw calls so tests can assert on what a
//!   real backend would have been asked to draw.
//! - [`UiFixture`] wraps a [`UiManager`](anchorage_ui::UiManager) with
//!   shorthands for building frames in tests and benches.
//!
//! # Example
//!
//! ```rust
//! use anchorage_test_utils::{MockRenderer, UiFixture};
//!
//! let mut fixture = UiFixture::new();
//! let frame = fixture.frame_at(None, 10.0, 10.0, 100.0, 50.0);
//! fixture.ui.update();
//!
//! let renderer = MockRenderer::new();
//! fixture.ui.render(&renderer);
//! assert_eq!(renderer.frames(), vec![frame]);
//! ```

pub mod fixture;
pub mod mock_render;

pub use fixture::*;
pub use mock_render::*;
