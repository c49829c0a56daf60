//! Static node and layer definitions.

use std::fmt;

use glam::Vec2;

use crate::camera::{CameraPose, NodeTransform};
use crate::error::SkylensError;

/// Unique, stable identifier for a focusable node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique, stable identifier for a parallax background layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// A node's resting pose and how much it magnifies when focused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStaticTransform {
    /// World position when nothing is focused.
    pub unfocused: Vec2,
    /// Resting scale factor.
    pub base_scale: f32,
    /// Resting rotation in degrees.
    pub base_rotation_deg: f32,
    /// Camera zoom reached when this node is focused.
    pub focus_scale: f32,
}

impl NodeStaticTransform {
    /// Validate at registration time, so a bad configuration can never
    /// surface mid-animation.
    pub fn validate(&self) -> Result<(), SkylensError> {
        if !self.unfocused.is_finite() {
            return Err(SkylensError::InvalidTransform(format!(
                "non-finite unfocused position {:?}",
                self.unfocused
            )));
        }
        if !self.base_scale.is_finite() || self.base_scale <= 0.0 {
            return Err(SkylensError::InvalidTransform(format!(
                "base scale must be finite and positive, got {}",
                self.base_scale
            )));
        }
        if !self.base_rotation_deg.is_finite() {
            return Err(SkylensError::InvalidTransform(
                "non-finite base rotation".to_owned(),
            ));
        }
        if !self.focus_scale.is_finite() || self.focus_scale <= 0.0 {
            return Err(SkylensError::InvalidTransform(format!(
                "focus scale must be finite and positive, got {}",
                self.focus_scale
            )));
        }
        Ok(())
    }

    /// The camera pose that centers this node on screen at its focus
    /// magnification, upright.
    #[must_use]
    pub fn focus_pose(&self) -> CameraPose {
        CameraPose {
            world: self.unfocused,
            zoom: self.focus_scale,
            rotation_deg: self.base_rotation_deg,
        }
    }

    /// The transform this node renders at when nothing is focused.
    #[must_use]
    pub fn rest_transform(&self) -> NodeTransform {
        NodeTransform {
            x: self.unfocused.x,
            y: self.unfocused.y,
            scale_x: self.base_scale,
            scale_y: self.base_scale,
            rotation_deg: self.base_rotation_deg,
            opacity: 1.0,
        }
    }
}

/// A non-focusable background element that partially tracks the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    /// World position when nothing is focused.
    pub base: Vec2,
    /// Resting scale factor.
    pub base_scale: f32,
    /// Resting rotation in degrees.
    pub base_rotation_deg: f32,
    /// Response strength in [0, 1]: 0 = stationary, 1 = moves fully with
    /// the camera.
    pub depth: f32,
}

impl ParallaxLayer {
    /// Validate at registration time.
    pub fn validate(&self) -> Result<(), SkylensError> {
        if !self.base.is_finite() {
            return Err(SkylensError::InvalidTransform(format!(
                "non-finite layer position {:?}",
                self.base
            )));
        }
        if !self.base_scale.is_finite() || self.base_scale <= 0.0 {
            return Err(SkylensError::InvalidTransform(format!(
                "layer scale must be finite and positive, got {}",
                self.base_scale
            )));
        }
        if !self.base_rotation_deg.is_finite() {
            return Err(SkylensError::InvalidTransform(
                "non-finite layer rotation".to_owned(),
            ));
        }
        if !self.depth.is_finite() || !(0.0..=1.0).contains(&self.depth) {
            return Err(SkylensError::InvalidTransform(format!(
                "layer depth must lie in [0, 1], got {}",
                self.depth
            )));
        }
        Ok(())
    }

    /// The transform this layer renders at when nothing is focused.
    #[must_use]
    pub fn rest_transform(&self) -> NodeTransform {
        NodeTransform {
            x: self.base.x,
            y: self.base.y,
            scale_x: self.base_scale,
            scale_y: self.base_scale,
            rotation_deg: self.base_rotation_deg,
            opacity: 1.0,
        }
    }
}
