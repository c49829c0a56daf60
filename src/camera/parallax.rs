//! Depth-scaled transforms for non-focusable background layers.

use glam::Vec2;

use super::transform::NodeTransform;
use crate::animation::interpolation::lerp_vec2;

/// The active focus frame a background layer responds to: the focus point,
/// how far the world zooms toward it, and how far the scene rolls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxFrame {
    /// World-space focus point (the focused node's unfocused position).
    pub focus: Vec2,
    /// Zoom the world reaches at full progress.
    pub world_zoom: f32,
    /// Scene roll in degrees at full progress.
    pub rotation_deg: f32,
}

/// Compute a background layer's transform at focus progress `p`.
///
/// `depth` in [0, 1] controls how strongly the layer responds: 0 is
/// stationary, 1 moves fully with the camera. The layer's vector from the
/// focus point expands by `1 + (world_zoom - 1) * depth` interpolated by
/// `p`, counter-rotates against the scene roll, and re-anchors on an origin
/// that slides from the focus point toward `screen_center` as `p` advances.
/// The slide and roll response scale with `depth` as well, so a zero-depth
/// layer holds exactly still; the whole transform is the full-depth formula
/// evaluated at `p * depth`.
#[must_use]
pub fn parallax_transform(
    p: f32,
    base: Vec2,
    base_scale: f32,
    base_rotation_deg: f32,
    depth: f32,
    frame: &ParallaxFrame,
    screen_center: Vec2,
) -> NodeTransform {
    let q = p * depth.clamp(0.0, 1.0);
    let expansion = 1.0 + (frame.world_zoom - 1.0) * q;
    let roll = frame.rotation_deg * q;

    let vec = base - frame.focus;
    let (sin, cos) = (-roll).to_radians().sin_cos();
    let rotated = Vec2::new(vec.x * cos - vec.y * sin, vec.x * sin + vec.y * cos);

    let origin = lerp_vec2(frame.focus, screen_center, q);
    let pos = origin + rotated * expansion;

    NodeTransform {
        x: pos.x,
        y: pos.y,
        scale_x: base_scale * expansion,
        scale_y: base_scale * expansion,
        rotation_deg: base_rotation_deg - roll,
        opacity: 1.0,
    }
}
