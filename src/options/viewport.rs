use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Viewport", inline)]
#[serde(default)]
/// Logical viewport dimensions; the focus camera centers on their midpoint.
pub struct ViewportOptions {
    /// Logical viewport width in pixels.
    #[schemars(title = "Width", range(min = 1.0, max = 16384.0))]
    pub width: f32,
    /// Logical viewport height in pixels.
    #[schemars(title = "Height", range(min = 1.0, max = 16384.0))]
    pub height: f32,
}

impl ViewportOptions {
    /// The screen-center point every projection re-anchors on.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}
