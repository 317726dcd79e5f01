//! Frame-rate independent exponential decay
//!
//! `decay(from, to, rate, dt)` moves `from` toward `to` so that the remaining
//! distance shrinks by `e^(-rate * dt)`. Splitting `dt` into smaller steps
//! gives the same result, which keeps smoothing stable on variable frame times.

use glam::Vec2;

/// Decay a scalar toward a target
pub fn decay(from: f32, to: f32, rate: f32, dt: f32) -> f32 {
    to + (from - to) * (-rate * dt).exp()
}

/// Decay a vector toward a target
pub fn decay_vec2(from: Vec2, to: Vec2, rate: f32, dt: f32) -> Vec2 {
    to + (from - to) * (-rate * dt).exp()
}

/// Decay a zoom level in log space, so halving and doubling take equally long
pub fn decay_zoom(from: f32, to: f32, rate: f32, dt: f32) -> f32 {
    decay(from.ln(), to.ln(), rate, dt).exp()
}

/// Decay an angle in degrees along the shortest arc
pub fn decay_angle(from: f32, to: f32, rate: f32, dt: f32) -> f32 {
    let delta = delta_angle(from, to);
    from + delta * (1.0 - (-rate * dt).exp())
}

/// Shortest signed difference `to - from` in degrees, in `(-180, 180]`
pub fn delta_angle(from: f32, to: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}
