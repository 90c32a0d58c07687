//! Anchorage Core
//!
//! Shared building blocks for the Anchorage UI layout core: the generational
//! arena used to address UI objects, hashing collections, geometry and math
//! types, logging setup and profiling hooks.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
