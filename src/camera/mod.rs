//! Pure camera math: poses, relative projection, and parallax.

pub mod parallax;
pub mod pose;
pub mod transform;

pub use parallax::{parallax_transform, ParallaxFrame};
pub use pose::CameraPose;
pub use transform::{project, relative_transform, NodeTransform};
