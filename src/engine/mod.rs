//! The composition root: registries, focus store, classifier, and driver.

mod focus;
mod frame;

use glam::Vec2;
pub use frame::FrameSink;
use rustc_hash::FxHashMap;
use web_time::{Duration, Instant};

use crate::animation::{AnimationDriver, EasingFunction};
use crate::camera::{CameraPose, NodeTransform, ParallaxFrame};
use crate::error::SkylensError;
use crate::focus::{FocusState, FocusStore, SubscriptionId, TransitionMode};
use crate::options::Options;
use crate::scene::{LayerId, NodeId, NodeStaticTransform, ParallaxLayer};

/// The camera's own in-flight interpolation between two poses.
///
/// Every camera-driven tween carries a copy of the same pose pair; this
/// record is what makes the *current* interpolated pose observable, so an
/// interrupting transition can start exactly where the scene last rendered.
#[derive(Debug, Clone, Copy)]
struct CameraDrive {
    start: CameraPose,
    end: CameraPose,
    started_at: Instant,
    duration: Duration,
    easing: EasingFunction,
}

impl CameraDrive {
    /// Pose at `now` plus whether the drive has completed.
    fn pose_at(&self, now: Instant) -> (CameraPose, bool) {
        let elapsed = now.saturating_duration_since(self.started_at);
        let raw = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        let pose = self.start.lerp(&self.end, self.easing.evaluate(raw));
        (pose, raw >= 1.0)
    }

    fn expire(&mut self) {
        self.duration = Duration::ZERO;
    }
}

/// The focus-camera engine.
///
/// Owns the node and layer registries, the focus store, and the animation
/// driver. Hosts feed it `request_focus` intents and call
/// [`tick`](Self::tick) once per rendering frame; transforms flow out
/// through a [`FrameSink`].
pub struct SkylensEngine {
    options: Options,
    screen_center: Vec2,
    nodes: FxHashMap<NodeId, NodeStaticTransform>,
    layers: FxHashMap<LayerId, ParallaxLayer>,
    focus: FocusStore,
    node_tweens: AnimationDriver<NodeId>,
    layer_tweens: AnimationDriver<LayerId>,
    /// Last transform committed for each node, kept across tween lifetimes
    /// so an interrupting transition can anchor on it.
    rendered: FxHashMap<NodeId, NodeTransform>,
    layer_rendered: FxHashMap<LayerId, NodeTransform>,
    /// Each layer's settled parallax progress toward the active frame.
    layer_progress: FxHashMap<LayerId, f32>,
    /// Parallax progress window (start, end) of each layer's live tween.
    layer_drive: FxHashMap<LayerId, (f32, f32)>,
    /// The focus frame background layers currently track.
    layer_frame: Option<ParallaxFrame>,
    camera_drive: Option<CameraDrive>,
    camera_anchor: CameraPose,
    enabled: bool,
}

impl SkylensEngine {
    /// Engine with the given options; the camera starts at rest.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let screen_center = options.viewport.center();
        Self {
            options,
            screen_center,
            nodes: FxHashMap::default(),
            layers: FxHashMap::default(),
            focus: FocusStore::new(),
            node_tweens: AnimationDriver::new(),
            layer_tweens: AnimationDriver::new(),
            rendered: FxHashMap::default(),
            layer_rendered: FxHashMap::default(),
            layer_progress: FxHashMap::default(),
            layer_drive: FxHashMap::default(),
            layer_frame: None,
            camera_drive: None,
            camera_anchor: CameraPose::rest(screen_center),
            enabled: true,
        }
    }

    /// Register a focusable node. Rejects duplicate ids and non-finite
    /// static transforms; a bad configuration can never surface
    /// mid-animation.
    pub fn register_node(
        &mut self,
        id: NodeId,
        transform: NodeStaticTransform,
    ) -> Result<(), SkylensError> {
        transform.validate()?;
        if self.nodes.contains_key(&id) {
            return Err(SkylensError::DuplicateNode(id));
        }
        let _ = self.nodes.insert(id, transform);
        log::debug!("registered node {id} at {:?}", transform.unfocused);
        Ok(())
    }

    /// Register a parallax background layer.
    pub fn register_layer(
        &mut self,
        id: LayerId,
        layer: ParallaxLayer,
    ) -> Result<(), SkylensError> {
        layer.validate()?;
        if self.layers.contains_key(&id) {
            return Err(SkylensError::DuplicateLayer(id));
        }
        let _ = self.layers.insert(id, layer);
        log::debug!("registered {id} at depth {}", layer.depth);
        Ok(())
    }

    /// Resize the logical viewport; projections re-anchor on the new
    /// midpoint from the next transition on.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.options.viewport.width = width;
        self.options.viewport.height = height;
        self.screen_center = self.options.viewport.center();
    }

    /// Enable or disable animations. Disabling completes in-flight tweens
    /// on the next tick and makes future transitions instant.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.node_tweens.finish_on_next_tick();
            self.layer_tweens.finish_on_next_tick();
            if let Some(drive) = self.camera_drive.as_mut() {
                drive.expire();
            }
        }
    }

    /// Whether animations are enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether any node, layer, or camera animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.node_tweens.is_animating()
            || self.layer_tweens.is_animating()
            || self.camera_drive.is_some()
    }

    /// Current focus state.
    #[must_use]
    pub fn focus_state(&self) -> FocusState {
        self.focus.state()
    }

    /// Subscribe to focus changes; fires on every effective change, before
    /// any transform for the new state is computed.
    pub fn subscribe_focus(
        &mut self,
        subscriber: impl FnMut(&FocusState) + 'static,
    ) -> SubscriptionId {
        self.focus.subscribe(subscriber)
    }

    /// Remove a focus subscriber. Idempotent.
    pub fn unsubscribe_focus(&mut self, id: SubscriptionId) -> bool {
        self.focus.unsubscribe(id)
    }

    /// The camera pose as of the last committed frame.
    #[must_use]
    pub fn camera(&self) -> CameraPose {
        self.camera_anchor
    }

    /// The camera pose interpolated to `now`.
    #[must_use]
    pub fn camera_pose_at(&self, now: Instant) -> CameraPose {
        self.camera_drive
            .as_ref()
            .map_or(self.camera_anchor, |drive| drive.pose_at(now).0)
    }

    /// The transition mode of `id`'s live tween, if one is in flight.
    #[must_use]
    pub fn active_mode_of(&self, id: NodeId) -> Option<TransitionMode> {
        self.node_tweens.mode_of(id)
    }

    /// The transform `id` currently renders at: its last committed frame,
    /// or its resting transform if it has never animated. `None` for
    /// unregistered ids.
    #[must_use]
    pub fn transform_of(&self, id: NodeId) -> Option<NodeTransform> {
        if let Some(t) = self.rendered.get(&id) {
            return Some(*t);
        }
        self.nodes.get(&id).map(NodeStaticTransform::rest_transform)
    }

    /// The transform a layer currently renders at. `None` for unregistered
    /// ids.
    #[must_use]
    pub fn layer_transform_of(&self, id: LayerId) -> Option<NodeTransform> {
        if let Some(t) = self.layer_rendered.get(&id) {
            return Some(*t);
        }
        self.layers.get(&id).map(ParallaxLayer::rest_transform)
    }

    /// Number of registered nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of registered layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl std::fmt::Debug for SkylensEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkylensEngine")
            .field("nodes", &self.nodes.len())
            .field("layers", &self.layers.len())
            .field("focus", &self.focus.state())
            .field("animating", &self.is_animating())
            .finish_non_exhaustive()
    }
}
