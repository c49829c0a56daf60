use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Parallax", inline)]
#[serde(default)]
/// Neighbor and background response parameters.
pub struct ParallaxOptions {
    /// Depth applied to vanishing neighbors: how strongly their recede
    /// tracks the camera's zoom and roll.
    #[schemars(title = "Neighbor Depth", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub neighbor_depth: f32,
    /// Screen-space distance a vanishing neighbor travels; large enough to
    /// exit the viewport.
    #[schemars(title = "Vanish Distance", range(min = 100.0, max = 4000.0), extend("step" = 50.0))]
    pub vanish_distance: f32,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            neighbor_depth: 0.6,
            vanish_distance: 1400.0,
        }
    }
}
