//! Animation system: easing, interpolation, tweens, and the per-key driver.

pub mod driver;
pub mod easing;
pub mod interpolation;
pub mod tween;

pub use driver::{AnimationDriver, FrameUpdate};
pub use easing::EasingFunction;
pub use tween::{Tween, TweenParams};
