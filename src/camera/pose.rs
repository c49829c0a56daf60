//! Virtual camera pose.

use glam::Vec2;

use crate::animation::interpolation::{interpolate_rotation, lerp_f32, lerp_vec2};

/// The virtual camera's pose at an instant: where it looks, how far it has
/// zoomed, and how far it has rolled.
///
/// Every on-screen transform in the crate is derived from one of these by
/// reference; the camera itself is never drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// World-space point the camera is centered on.
    pub world: Vec2,
    /// Magnification factor (1.0 = unzoomed).
    pub zoom: f32,
    /// Roll in degrees; the scene counter-rotates against it.
    pub rotation_deg: f32,
}

impl CameraPose {
    /// The resting pose for a given screen center: the unique pose under
    /// which every node projects exactly to its unfocused position,
    /// unscaled and unrotated.
    #[must_use]
    pub fn rest(screen_center: Vec2) -> Self {
        Self {
            world: screen_center,
            zoom: 1.0,
            rotation_deg: 0.0,
        }
    }

    /// Interpolate toward another pose. Position and zoom lerp linearly;
    /// rotation takes the shortest angular path.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            world: lerp_vec2(self.world, other.world, t),
            zoom: lerp_f32(self.zoom, other.zoom, t),
            rotation_deg: interpolate_rotation(
                self.rotation_deg,
                other.rotation_deg,
                t,
            ),
        }
    }

    /// Whether every component is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.world.is_finite()
            && self.zoom.is_finite()
            && self.rotation_deg.is_finite()
    }
}
