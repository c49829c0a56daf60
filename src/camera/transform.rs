//! Screen-space transform math relative to an interpolated camera.

use glam::Vec2;

use super::pose::CameraPose;
use crate::animation::interpolation::{angle_delta, lerp_f32};

/// The per-frame output record for one drawable: where to place it on
/// screen and how to scale, rotate, and fade it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    /// Screen-space x position.
    pub x: f32,
    /// Screen-space y position.
    pub y: f32,
    /// Horizontal scale factor.
    pub scale_x: f32,
    /// Vertical scale factor.
    pub scale_y: f32,
    /// Rotation in degrees.
    pub rotation_deg: f32,
    /// Opacity in [0, 1].
    pub opacity: f32,
}

impl NodeTransform {
    /// Screen position as a vector.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Linear interpolation toward another transform. Rotation takes the
    /// shortest angular path; opacity stays clamped to [0, 1].
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            x: lerp_f32(self.x, other.x, t),
            y: lerp_f32(self.y, other.y, t),
            scale_x: lerp_f32(self.scale_x, other.scale_x, t),
            scale_y: lerp_f32(self.scale_y, other.scale_y, t),
            rotation_deg: self.rotation_deg
                + angle_delta(self.rotation_deg, other.rotation_deg) * t,
            opacity: lerp_f32(self.opacity, other.opacity, t)
                .clamp(0.0, 1.0),
        }
    }

    /// Componentwise approximate equality, for continuity checks.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.scale_x - other.scale_x).abs() < epsilon
            && (self.scale_y - other.scale_y).abs() < epsilon
            && angle_delta(self.rotation_deg, other.rotation_deg).abs()
                < epsilon
            && (self.opacity - other.opacity).abs() < epsilon
    }
}

/// Rotate a vector by an angle in degrees.
#[inline]
fn rotate_deg(v: Vec2, deg: f32) -> Vec2 {
    let (sin, cos) = deg.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Project a node's static world pose through a single camera pose.
///
/// The node's vector from the camera is counter-rotated against the camera
/// roll, scaled by the camera zoom, and re-centered on `screen_center`.
/// Scale multiplies by the zoom; rotation subtracts the camera roll.
///
/// Defining property: a camera positioned exactly on `node_world` with
/// `zoom = s` and `rotation_deg = base_rotation_deg` renders the node
/// centered on screen, upright, at magnification `s`.
#[must_use]
pub fn project(
    node_world: Vec2,
    base_scale: f32,
    base_rotation_deg: f32,
    cam: &CameraPose,
    screen_center: Vec2,
) -> NodeTransform {
    let vec = node_world - cam.world;
    let rotated = rotate_deg(vec, -cam.rotation_deg);
    let screen = screen_center + rotated * cam.zoom;
    let scale = base_scale * cam.zoom;

    NodeTransform {
        x: screen.x,
        y: screen.y,
        scale_x: scale,
        scale_y: scale,
        rotation_deg: base_rotation_deg - cam.rotation_deg,
        opacity: 1.0,
    }
}

/// Project a node through the camera interpolated between two poses at
/// progress `t`.
///
/// At `t=0` this reproduces `start_cam`'s projection exactly; at `t=1`,
/// `end_cam`'s.
#[must_use]
pub fn relative_transform(
    t: f32,
    node_world: Vec2,
    base_scale: f32,
    base_rotation_deg: f32,
    start_cam: &CameraPose,
    end_cam: &CameraPose,
    screen_center: Vec2,
) -> NodeTransform {
    let cam = start_cam.lerp(end_cam, t);
    project(node_world, base_scale, base_rotation_deg, &cam, screen_center)
}
