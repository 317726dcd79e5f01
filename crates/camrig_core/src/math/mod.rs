//! Math utilities for 2D camera work

mod bounds;
pub mod decay;

pub use bounds::Bounds2;
pub use decay::{decay, decay_angle, decay_vec2, decay_zoom, delta_angle};

// Re-export the vector types used across the public API
pub use glam::{Vec2, Vec4};
