/// Fast mathematical operations using SIMD-accelerated `glam` types.
///
/// Pointer positions, anchor offsets and drag deltas are all [`Vec2`].
///
/// # Examples
///
/// ```
/// use anchorage_core::math::Vec2;
///
/// let down = Vec2::new(10.0, 20.0);
/// let now = Vec2::new(13.0, 24.0);
/// assert_eq!(down.distance(now), 5.0);
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

pub use fast::{Vec2, vec2};

/// Interop with other math libraries through `mint`.
pub fn to_mint(v: Vec2) -> mint::Vector2<f32> {
    v.into()
}

/// Convert a `mint` vector coming from a host application.
pub fn from_mint(v: mint::Vector2<f32>) -> Vec2 {
    v.into()
}
