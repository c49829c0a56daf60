//! Centralized interpolation utilities for animation.
//!
//! All public rotation values in this crate are degrees; angular
//! interpolation always takes the shortest path around the circle.

use glam::Vec2;

/// Signed shortest angular delta from `start` to `end`, in degrees.
///
/// The result lies in (-180, 180]: a 180° separation resolves to +180,
/// and 350° → 10° yields +20, never −340.
#[inline]
#[must_use]
pub fn angle_delta(start: f32, end: f32) -> f32 {
    let mut delta = (end - start).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Interpolate between two headings along the shortest angular path.
///
/// `t=0` returns `start`; `t=1` returns `end` modulo 360.
#[inline]
#[must_use]
pub fn interpolate_rotation(start: f32, end: f32, t: f32) -> f32 {
    start + angle_delta(start, end) * t
}

/// Linear interpolation between two scalars.
#[inline]
#[must_use]
pub fn lerp_f32(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Linear interpolation between two points.
#[inline]
#[must_use]
pub fn lerp_vec2(start: Vec2, end: Vec2, t: f32) -> Vec2 {
    start + (end - start) * t
}
