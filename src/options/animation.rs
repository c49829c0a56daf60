use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::animation::EasingFunction;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Tween durations and easing.
pub struct AnimationOptions {
    /// Focus gain/release duration in milliseconds.
    #[schemars(title = "Focus Duration", range(min = 0, max = 2000))]
    pub focus_ms: u64,
    /// Hop (focus-to-focus) duration in milliseconds.
    #[schemars(title = "Hop Duration", range(min = 0, max = 2000))]
    pub hop_ms: u64,
    /// Neighbor vanish/return duration in milliseconds.
    #[schemars(title = "Vanish Duration", range(min = 0, max = 2000))]
    pub vanish_ms: u64,
    /// Easing curve applied to every tween.
    pub easing: EasingFunction,
}

impl AnimationOptions {
    /// Focus duration as a [`Duration`].
    #[must_use]
    pub fn focus_duration(&self) -> Duration {
        Duration::from_millis(self.focus_ms)
    }

    /// Hop duration as a [`Duration`].
    #[must_use]
    pub fn hop_duration(&self) -> Duration {
        Duration::from_millis(self.hop_ms)
    }

    /// Vanish/return duration as a [`Duration`].
    #[must_use]
    pub fn vanish_duration(&self) -> Duration {
        Duration::from_millis(self.vanish_ms)
    }
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            focus_ms: 300,
            hop_ms: 400,
            vanish_ms: 350,
            easing: EasingFunction::DEFAULT,
        }
    }
}
