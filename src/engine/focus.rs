//! Focus-change handling: classification and tween construction.

use glam::Vec2;
use web_time::{Duration, Instant};

use super::{CameraDrive, SkylensEngine};
use crate::animation::{EasingFunction, Tween, TweenParams};
use crate::camera::{CameraPose, NodeTransform, ParallaxFrame};
use crate::error::SkylensError;
use crate::focus::{classify, FocusChange, TransitionMode};
use crate::scene::{NodeId, NodeStaticTransform};

impl SkylensEngine {
    /// Change the focused node (or clear focus with `None`).
    ///
    /// Rejected synchronously for unregistered ids, leaving every piece of
    /// state untouched. A request that changes nothing is a silent no-op.
    /// Otherwise the store updates and notifies, every node is classified,
    /// and one tween per affected node starts — all before this returns,
    /// so no frame can render a partially classified scene. Re-entrant
    /// requests mid-animation are always accepted: the in-flight tweens
    /// are destroyed and their replacements start from the last rendered
    /// state.
    pub fn request_focus(
        &mut self,
        target: Option<NodeId>,
    ) -> Result<(), SkylensError> {
        self.request_focus_at(target, Instant::now())
    }

    /// [`request_focus`](Self::request_focus) with an explicit clock, for
    /// deterministic tests and hosts that own their own time source.
    pub fn request_focus_at(
        &mut self,
        target: Option<NodeId>,
        now: Instant,
    ) -> Result<(), SkylensError> {
        if let Some(id) = target {
            if !self.nodes.contains_key(&id) {
                return Err(SkylensError::UnknownNode(id));
            }
        }

        let from = self.focus.state().focused;
        if !self.focus.set(target) {
            return Ok(());
        }
        log::debug!("focus change: {from:?} -> {target:?}");

        let change = FocusChange { from, to: target };

        // Camera continuity: the new drive starts wherever the previous one
        // last rendered, never from an idealized pose.
        let start_cam = self.camera_pose_at(now);
        let end_cam = target.and_then(|id| self.nodes.get(&id)).map_or_else(
            || CameraPose::rest(self.screen_center),
            NodeStaticTransform::focus_pose,
        );

        let easing = self.options.animation.easing;
        self.camera_anchor = start_cam;
        self.camera_drive = Some(CameraDrive {
            start: start_cam,
            end: end_cam,
            started_at: now,
            duration: self.duration_for_change(&change),
            easing,
        });

        // Classify every node before any of them renders a new frame.
        let mut starts = Vec::new();
        for (&id, stat) in &self.nodes {
            let mode = classify(&change, id);
            if !mode.is_animated() {
                continue;
            }
            let params =
                self.params_for(mode, id, stat, &change, start_cam, end_cam);
            starts.push((
                id,
                Tween::with_start_time(
                    now,
                    mode,
                    params,
                    self.duration_for_mode(mode),
                    easing,
                ),
            ));
        }
        for (id, tween) in starts {
            let _ = self.node_tweens.start(id, tween);
        }

        self.retarget_layers(&change, now, easing);
        Ok(())
    }

    /// Tween duration for the camera's own drive.
    fn duration_for_change(&self, change: &FocusChange) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        if change.from.is_some() && change.to.is_some() {
            self.options.animation.hop_duration()
        } else {
            self.options.animation.focus_duration()
        }
    }

    fn duration_for_mode(&self, mode: TransitionMode) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        match mode {
            TransitionMode::FocusIn | TransitionMode::FocusOut => {
                self.options.animation.focus_duration()
            }
            TransitionMode::HopIn
            | TransitionMode::HopOut
            | TransitionMode::PeerSwitch => self.options.animation.hop_duration(),
            TransitionMode::NeighborVanish | TransitionMode::NeighborReturn => {
                self.options.animation.vanish_duration()
            }
            TransitionMode::Idle => Duration::ZERO,
        }
    }

    /// Build the tween parameters for one node's assigned mode.
    fn params_for(
        &self,
        mode: TransitionMode,
        id: NodeId,
        stat: &NodeStaticTransform,
        change: &FocusChange,
        start_cam: CameraPose,
        end_cam: CameraPose,
    ) -> TweenParams {
        match mode {
            TransitionMode::NeighborVanish => {
                let focus_stat = change
                    .to
                    .and_then(|m| self.nodes.get(&m))
                    .copied()
                    .unwrap_or(*stat);
                TweenParams::Drift {
                    start: self.rendered_or_rest(id, stat),
                    end: self.vanish_target(stat, &focus_stat),
                }
            }
            TransitionMode::NeighborReturn => TweenParams::Drift {
                start: self.rendered_or_rest(id, stat),
                end: stat.rest_transform(),
            },
            _ => {
                // Camera-driven: FocusIn/FocusOut hold full opacity, the
                // hop roles fade against their last rendered opacity.
                let (fallback, end_opacity) = match mode {
                    TransitionMode::HopIn => (0.0, 1.0),
                    TransitionMode::HopOut => (1.0, 0.0),
                    TransitionMode::PeerSwitch => (0.0, 0.0),
                    _ => (1.0, 1.0),
                };
                let start_opacity = self
                    .rendered
                    .get(&id)
                    .map_or(fallback, |t| t.opacity);
                TweenParams::Camera {
                    node_world: stat.unfocused,
                    base_scale: stat.base_scale,
                    base_rotation_deg: stat.base_rotation_deg,
                    start_cam,
                    end_cam,
                    screen_center: self.screen_center,
                    start_opacity,
                    end_opacity,
                }
            }
        }
    }

    fn rendered_or_rest(
        &self,
        id: NodeId,
        stat: &NodeStaticTransform,
    ) -> NodeTransform {
        self.rendered
            .get(&id)
            .copied()
            .unwrap_or_else(|| stat.rest_transform())
    }

    /// Where a vanishing neighbor ends: pushed out along the ray from the
    /// focus point through its own position until it leaves the viewport,
    /// expanded and counter-rotated at the configured neighbor depth,
    /// fully faded.
    fn vanish_target(
        &self,
        stat: &NodeStaticTransform,
        focus_stat: &NodeStaticTransform,
    ) -> NodeTransform {
        let away = stat.unfocused - focus_stat.unfocused;
        let dir = if away.length_squared() < 1e-6 {
            // Node sits exactly on the focus point: recede straight up.
            Vec2::new(0.0, -1.0)
        } else {
            away.normalize()
        };

        let depth = self.options.parallax.neighbor_depth;
        let expansion = 1.0 + (focus_stat.focus_scale - 1.0) * depth;
        let exit =
            stat.unfocused + dir * self.options.parallax.vanish_distance;

        NodeTransform {
            x: exit.x,
            y: exit.y,
            scale_x: stat.base_scale * expansion,
            scale_y: stat.base_scale * expansion,
            rotation_deg: stat.base_rotation_deg
                - focus_stat.base_rotation_deg * depth,
            opacity: 0.0,
        }
    }

    /// Re-target every background layer for a focus change.
    ///
    /// Gaining or releasing focus slides each layer's parallax progress
    /// toward 1 or 0 within the active frame. A hop drifts each layer from
    /// its last rendered transform to the new frame's settled pose;
    /// re-running the progress math across two different anchor points
    /// would snap.
    fn retarget_layers(
        &mut self,
        change: &FocusChange,
        now: Instant,
        easing: EasingFunction,
    ) {
        let duration = self.duration_for_change(change);
        let mut starts = Vec::new();

        match (change.from, change.to) {
            (None, Some(m)) => {
                let Some(frame) = self.frame_of(m) else { return };
                self.layer_frame = Some(frame);
                for (&id, layer) in &self.layers {
                    let start_p =
                        self.layer_progress.get(&id).copied().unwrap_or(0.0);
                    starts.push((
                        id,
                        (start_p, 1.0),
                        Tween::with_start_time(
                            now,
                            TransitionMode::FocusIn,
                            TweenParams::Parallax {
                                base: layer.base,
                                base_scale: layer.base_scale,
                                base_rotation_deg: layer.base_rotation_deg,
                                depth: layer.depth,
                                frame,
                                screen_center: self.screen_center,
                                start_p,
                                end_p: 1.0,
                            },
                            duration,
                            easing,
                        ),
                    ));
                }
            }
            (Some(_), None) => {
                let Some(frame) = self.layer_frame else { return };
                for (&id, layer) in &self.layers {
                    let start_p =
                        self.layer_progress.get(&id).copied().unwrap_or(1.0);
                    starts.push((
                        id,
                        (start_p, 0.0),
                        Tween::with_start_time(
                            now,
                            TransitionMode::FocusOut,
                            TweenParams::Parallax {
                                base: layer.base,
                                base_scale: layer.base_scale,
                                base_rotation_deg: layer.base_rotation_deg,
                                depth: layer.depth,
                                frame,
                                screen_center: self.screen_center,
                                start_p,
                                end_p: 0.0,
                            },
                            duration,
                            easing,
                        ),
                    ));
                }
            }
            (Some(_), Some(m)) => {
                let Some(frame) = self.frame_of(m) else { return };
                self.layer_frame = Some(frame);
                for (&id, layer) in &self.layers {
                    let start_p =
                        self.layer_progress.get(&id).copied().unwrap_or(1.0);
                    let start = self
                        .layer_rendered
                        .get(&id)
                        .copied()
                        .unwrap_or_else(|| layer.rest_transform());
                    let end = crate::camera::parallax_transform(
                        1.0,
                        layer.base,
                        layer.base_scale,
                        layer.base_rotation_deg,
                        layer.depth,
                        &frame,
                        self.screen_center,
                    );
                    starts.push((
                        id,
                        (start_p, 1.0),
                        Tween::with_start_time(
                            now,
                            TransitionMode::PeerSwitch,
                            TweenParams::Drift { start, end },
                            duration,
                            easing,
                        ),
                    ));
                }
            }
            (None, None) => return,
        }

        for (id, window, tween) in starts {
            let _ = self.layer_drive.insert(id, window);
            let _ = self.layer_tweens.start(id, tween);
        }
    }

    fn frame_of(&self, id: NodeId) -> Option<ParallaxFrame> {
        self.nodes.get(&id).map(|stat| ParallaxFrame {
            focus: stat.unfocused,
            world_zoom: stat.focus_scale,
            rotation_deg: stat.base_rotation_deg,
        })
    }
}
