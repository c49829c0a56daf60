//! Per-frame evaluation: tick, skip, and cancel.

use web_time::Instant;

use super::SkylensEngine;
use crate::camera::NodeTransform;
use crate::scene::{LayerId, NodeId};

/// Rendering boundary: applies computed transforms to actual drawables.
///
/// The engine's math is side-effect-free; all retained-object mutation is
/// confined to implementations of this trait.
pub trait FrameSink {
    /// Apply a node's transform for this frame.
    fn apply_node(&mut self, id: NodeId, transform: &NodeTransform);

    /// Apply a background layer's transform for this frame.
    fn apply_layer(&mut self, id: LayerId, transform: &NodeTransform) {
        let _ = (id, transform);
    }
}

impl SkylensEngine {
    /// Advance every live animation to `now` and deliver one transform per
    /// animating node and layer through `sink`.
    ///
    /// Nodes with no live tween are not re-delivered; their last committed
    /// transform stands. Returns whether anything is still animating.
    pub fn tick(&mut self, now: Instant, sink: &mut dyn FrameSink) -> bool {
        // Commit the camera pose first so queries from inside sink
        // callbacks observe this frame's pose.
        if let Some(drive) = self.camera_drive {
            let (pose, done) = drive.pose_at(now);
            self.camera_anchor = pose;
            if done {
                self.camera_drive = None;
            }
        }

        for update in self.node_tweens.tick(now) {
            let _ = self.rendered.insert(update.key, update.transform);
            sink.apply_node(update.key, &update.transform);
        }

        for update in self.layer_tweens.tick(now) {
            let _ = self.layer_rendered.insert(update.key, update.transform);
            if let Some(&(start_p, end_p)) = self.layer_drive.get(&update.key)
            {
                let p = start_p + (end_p - start_p) * update.eased;
                let _ = self.layer_progress.insert(update.key, p);
                if update.finished {
                    let _ = self.layer_drive.remove(&update.key);
                }
            }
            sink.apply_layer(update.key, &update.transform);
        }

        self.is_animating()
    }

    /// Jump every live animation to its end state, delivering the final
    /// transforms through `sink`. Each tween finishes exactly once.
    pub fn skip_all(&mut self, sink: &mut dyn FrameSink) {
        if let Some(drive) = self.camera_drive.take() {
            self.camera_anchor = drive.end;
        }

        for update in self.node_tweens.skip_all() {
            let _ = self.rendered.insert(update.key, update.transform);
            sink.apply_node(update.key, &update.transform);
        }

        for update in self.layer_tweens.skip_all() {
            let _ = self.layer_rendered.insert(update.key, update.transform);
            if let Some((_, end_p)) = self.layer_drive.remove(&update.key) {
                let _ = self.layer_progress.insert(update.key, end_p);
            }
            sink.apply_layer(update.key, &update.transform);
        }
    }

    /// Destroy every live animation, freezing each node and layer at
    /// whatever it last rendered. No finish is ever reported for the
    /// destroyed tweens.
    pub fn cancel_all(&mut self, now: Instant) {
        self.camera_anchor = self.camera_pose_at(now);
        self.camera_drive = None;
        self.node_tweens.cancel_all();
        self.layer_tweens.cancel_all();
        self.layer_drive.clear();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use web_time::Duration;

    use super::*;
    use crate::animation::EasingFunction;
    use crate::camera::parallax_transform;
    use crate::error::SkylensError;
    use crate::focus::TransitionMode;
    use crate::options::Options;
    use crate::scene::{NodeStaticTransform, ParallaxLayer};

    const A: NodeId = NodeId(1);
    const B: NodeId = NodeId(2);
    const C: NodeId = NodeId(3);

    #[derive(Default)]
    struct RecordingSink {
        nodes: Vec<(NodeId, NodeTransform)>,
        layers: Vec<(LayerId, NodeTransform)>,
    }

    impl FrameSink for RecordingSink {
        fn apply_node(&mut self, id: NodeId, transform: &NodeTransform) {
            self.nodes.push((id, *transform));
        }

        fn apply_layer(&mut self, id: LayerId, transform: &NodeTransform) {
            self.layers.push((id, *transform));
        }
    }

    fn test_options() -> Options {
        let mut options = Options::default();
        options.viewport.width = 200.0;
        options.viewport.height = 200.0;
        options.animation.easing = EasingFunction::Linear;
        options
    }

    fn node_at(x: f32, y: f32, focus_scale: f32) -> NodeStaticTransform {
        NodeStaticTransform {
            unfocused: Vec2::new(x, y),
            base_scale: 1.0,
            base_rotation_deg: 0.0,
            focus_scale,
        }
    }

    fn engine_with_three_nodes() -> SkylensEngine {
        let mut engine = SkylensEngine::new(test_options());
        engine.register_node(A, node_at(50.0, 50.0, 2.0)).unwrap();
        engine.register_node(B, node_at(150.0, 50.0, 2.0)).unwrap();
        engine.register_node(C, node_at(50.0, 150.0, 3.0)).unwrap();
        engine
    }

    #[test]
    fn test_unknown_focus_target_rejected() {
        let mut engine = engine_with_three_nodes();
        let err = engine.request_focus(Some(NodeId(99))).unwrap_err();
        assert!(matches!(err, SkylensError::UnknownNode(NodeId(99))));
        assert_eq!(engine.focus_state().focused, None);
        assert!(!engine.is_animating());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut engine = engine_with_three_nodes();
        let err = engine
            .register_node(A, node_at(0.0, 0.0, 2.0))
            .unwrap_err();
        assert!(matches!(err, SkylensError::DuplicateNode(A)));
    }

    #[test]
    fn test_focus_in_classifies_all_nodes() {
        let mut engine = engine_with_three_nodes();
        let now = Instant::now();
        engine.request_focus_at(Some(A), now).unwrap();

        assert_eq!(engine.active_mode_of(A), Some(TransitionMode::FocusIn));
        assert_eq!(
            engine.active_mode_of(B),
            Some(TransitionMode::NeighborVanish)
        );
        assert_eq!(
            engine.active_mode_of(C),
            Some(TransitionMode::NeighborVanish)
        );
    }

    #[test]
    fn test_focused_node_ends_centered_and_magnified() {
        let mut engine = engine_with_three_nodes();
        let now = Instant::now();
        engine.request_focus_at(Some(A), now).unwrap();

        let mut sink = RecordingSink::default();
        let animating =
            engine.tick(now + Duration::from_secs(2), &mut sink);
        assert!(!animating);

        let t = engine.transform_of(A).unwrap();
        assert!((t.x - 100.0).abs() < 1e-3);
        assert!((t.y - 100.0).abs() < 1e-3);
        assert!((t.scale_x - 2.0).abs() < 1e-3);
        assert!((t.opacity - 1.0).abs() < 1e-5);

        // Neighbors have left the viewport fully faded
        let b = engine.transform_of(B).unwrap();
        assert!(b.opacity < 1e-5);
        assert!(
            b.position().distance(Vec2::new(150.0, 50.0)) > 1000.0,
            "vanished neighbor should exit the viewport"
        );
    }

    #[test]
    fn test_hop_assigns_hop_roles_to_everyone() {
        let mut engine = engine_with_three_nodes();
        let now = Instant::now();
        engine.request_focus_at(Some(A), now).unwrap();
        let mut sink = RecordingSink::default();
        let _ = engine.tick(now + Duration::from_secs(2), &mut sink);

        engine
            .request_focus_at(Some(B), now + Duration::from_secs(2))
            .unwrap();
        assert_eq!(engine.active_mode_of(A), Some(TransitionMode::HopOut));
        assert_eq!(engine.active_mode_of(B), Some(TransitionMode::HopIn));
        assert_eq!(engine.active_mode_of(C), Some(TransitionMode::PeerSwitch));

        // The hop completes with B centered at its focus scale and A faded
        let end = now + Duration::from_secs(4);
        let _ = engine.tick(end, &mut sink);
        let b = engine.transform_of(B).unwrap();
        assert!((b.x - 100.0).abs() < 1e-3);
        assert!((b.y - 100.0).abs() < 1e-3);
        assert!((b.opacity - 1.0).abs() < 1e-5);
        let a = engine.transform_of(A).unwrap();
        assert!(a.opacity < 1e-5);
    }

    #[test]
    fn test_interruption_preserves_continuity() {
        let mut engine = engine_with_three_nodes();
        let t0 = Instant::now();
        engine.request_focus_at(Some(A), t0).unwrap();

        // Render mid-flight, then clear focus at the same instant
        let mid = t0 + Duration::from_millis(150);
        let mut sink = RecordingSink::default();
        let _ = engine.tick(mid, &mut sink);
        let before_a = engine.transform_of(A).unwrap();
        let before_b = engine.transform_of(B).unwrap();

        engine.request_focus_at(None, mid).unwrap();
        let mut sink2 = RecordingSink::default();
        let _ = engine.tick(mid, &mut sink2);

        let after_a = engine.transform_of(A).unwrap();
        let after_b = engine.transform_of(B).unwrap();
        assert!(
            after_a.approx_eq(&before_a, 1e-3),
            "focused node jumped on interruption: {before_a:?} vs {after_a:?}"
        );
        assert!(
            after_b.approx_eq(&before_b, 1e-3),
            "neighbor jumped on interruption: {before_b:?} vs {after_b:?}"
        );
    }

    #[test]
    fn test_refocus_during_return_is_continuous() {
        let mut engine = engine_with_three_nodes();
        let t0 = Instant::now();
        let mut sink = RecordingSink::default();

        engine.request_focus_at(Some(A), t0).unwrap();
        let settled = t0 + Duration::from_secs(1);
        let _ = engine.tick(settled, &mut sink);

        // Start returning to rest, interrupt halfway by re-focusing A
        engine.request_focus_at(None, settled).unwrap();
        let mid = settled + Duration::from_millis(120);
        let _ = engine.tick(mid, &mut sink);
        let before = engine.transform_of(B).unwrap();

        engine.request_focus_at(Some(A), mid).unwrap();
        let _ = engine.tick(mid, &mut sink);
        let after = engine.transform_of(B).unwrap();

        assert!(
            after.approx_eq(&before, 1e-3),
            "return interrupted by refocus must not snap: {before:?} vs {after:?}"
        );
    }

    #[test]
    fn test_reentrant_requests_keep_one_tween_per_node() {
        let mut engine = engine_with_three_nodes();
        let t0 = Instant::now();
        engine.request_focus_at(Some(A), t0).unwrap();
        engine
            .request_focus_at(Some(B), t0 + Duration::from_millis(10))
            .unwrap();
        engine
            .request_focus_at(None, t0 + Duration::from_millis(20))
            .unwrap();
        engine
            .request_focus_at(Some(C), t0 + Duration::from_millis(30))
            .unwrap();

        // One live tween per node, reflecting only the latest transition
        assert_eq!(engine.active_mode_of(A), Some(TransitionMode::NeighborVanish));
        assert_eq!(engine.active_mode_of(B), Some(TransitionMode::NeighborVanish));
        assert_eq!(engine.active_mode_of(C), Some(TransitionMode::FocusIn));
    }

    #[test]
    fn test_degenerate_geometry_recedes_upward() {
        let mut engine = SkylensEngine::new(test_options());
        engine.register_node(A, node_at(50.0, 50.0, 2.0)).unwrap();
        // B sits exactly on A: the vanish direction falls back to straight up
        engine.register_node(B, node_at(50.0, 50.0, 2.0)).unwrap();

        let now = Instant::now();
        engine.request_focus_at(Some(A), now).unwrap();
        let mut sink = RecordingSink::default();
        let _ = engine.tick(now + Duration::from_secs(2), &mut sink);

        let b = engine.transform_of(B).unwrap();
        assert!((b.x - 50.0).abs() < 1e-3);
        assert!(b.y < 50.0, "fallback direction should point up");
    }

    #[test]
    fn test_focus_notifies_subscribers_synchronously() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut engine = engine_with_three_nodes();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = engine.subscribe_focus(move |state| {
            sink.borrow_mut().push(state.focused);
        });

        engine.request_focus(Some(A)).unwrap();
        engine.request_focus(Some(A)).unwrap(); // no-op, no notify
        engine.request_focus(None).unwrap();

        assert_eq!(*seen.borrow(), vec![Some(A), None]);
    }

    #[test]
    fn test_disabled_engine_snaps() {
        let mut engine = engine_with_three_nodes();
        engine.set_enabled(false);

        let now = Instant::now();
        engine.request_focus_at(Some(A), now).unwrap();
        let mut sink = RecordingSink::default();
        let animating = engine.tick(now, &mut sink);

        assert!(!animating);
        let t = engine.transform_of(A).unwrap();
        assert!((t.x - 100.0).abs() < 1e-3);
        assert!((t.scale_x - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_skip_all_finishes_in_flight_transition() {
        let mut engine = engine_with_three_nodes();
        let now = Instant::now();
        engine.request_focus_at(Some(A), now).unwrap();

        let mut sink = RecordingSink::default();
        engine.skip_all(&mut sink);

        assert!(!engine.is_animating());
        assert_eq!(sink.nodes.len(), 3);
        let t = engine.transform_of(A).unwrap();
        assert!((t.x - 100.0).abs() < 1e-3);
        assert!((engine.camera().zoom - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_cancel_all_freezes_mid_flight() {
        let mut engine = engine_with_three_nodes();
        let t0 = Instant::now();
        engine.request_focus_at(Some(A), t0).unwrap();

        let mid = t0 + Duration::from_millis(150);
        let mut sink = RecordingSink::default();
        let _ = engine.tick(mid, &mut sink);
        let frozen = engine.transform_of(A).unwrap();

        engine.cancel_all(mid);
        assert!(!engine.is_animating());

        // Nothing further renders; the node stays where it was
        let mut sink2 = RecordingSink::default();
        let _ = engine.tick(mid + Duration::from_secs(1), &mut sink2);
        assert!(sink2.nodes.is_empty());
        assert_eq!(engine.transform_of(A).unwrap(), frozen);
    }

    #[test]
    fn test_layers_track_focus_frame() {
        let mut engine = engine_with_three_nodes();
        let layer_id = LayerId(10);
        let layer = ParallaxLayer {
            base: Vec2::new(80.0, 120.0),
            base_scale: 1.0,
            base_rotation_deg: 0.0,
            depth: 0.5,
        };
        engine.register_layer(layer_id, layer).unwrap();

        let now = Instant::now();
        engine.request_focus_at(Some(A), now).unwrap();
        let mut sink = RecordingSink::default();
        let _ = engine.tick(now + Duration::from_secs(2), &mut sink);
        assert!(!sink.layers.is_empty());

        let got = engine.layer_transform_of(layer_id).unwrap();
        let frame = crate::camera::ParallaxFrame {
            focus: Vec2::new(50.0, 50.0),
            world_zoom: 2.0,
            rotation_deg: 0.0,
        };
        let expected = parallax_transform(
            1.0,
            layer.base,
            layer.base_scale,
            layer.base_rotation_deg,
            layer.depth,
            &frame,
            Vec2::new(100.0, 100.0),
        );
        assert!(got.approx_eq(&expected, 1e-3));

        // Releasing focus slides the layer back to rest
        engine
            .request_focus_at(None, now + Duration::from_secs(2))
            .unwrap();
        let _ = engine.tick(now + Duration::from_secs(4), &mut sink);
        let rested = engine.layer_transform_of(layer_id).unwrap();
        assert!(rested.approx_eq(&layer.rest_transform(), 1e-3));
    }

    #[test]
    fn test_hop_retargets_layers_to_new_frame() {
        let mut engine = engine_with_three_nodes();
        let layer_id = LayerId(10);
        let layer = ParallaxLayer {
            base: Vec2::new(80.0, 120.0),
            base_scale: 1.0,
            base_rotation_deg: 0.0,
            depth: 1.0,
        };
        engine.register_layer(layer_id, layer).unwrap();

        let now = Instant::now();
        let mut sink = RecordingSink::default();
        engine.request_focus_at(Some(A), now).unwrap();
        let _ = engine.tick(now + Duration::from_secs(2), &mut sink);

        engine
            .request_focus_at(Some(C), now + Duration::from_secs(2))
            .unwrap();
        let _ = engine.tick(now + Duration::from_secs(4), &mut sink);

        let got = engine.layer_transform_of(layer_id).unwrap();
        let frame = crate::camera::ParallaxFrame {
            focus: Vec2::new(50.0, 150.0),
            world_zoom: 3.0,
            rotation_deg: 0.0,
        };
        let expected = parallax_transform(
            1.0,
            layer.base,
            layer.base_scale,
            layer.base_rotation_deg,
            layer.depth,
            &frame,
            Vec2::new(100.0, 100.0),
        );
        assert!(got.approx_eq(&expected, 1e-3));
    }

    #[test]
    fn test_rotation_wraps_through_zero_during_hop() {
        let mut engine = SkylensEngine::new(test_options());
        let mut a = node_at(50.0, 50.0, 2.0);
        a.base_rotation_deg = 30.0;
        let mut b = node_at(150.0, 50.0, 2.0);
        b.base_rotation_deg = 350.0;
        engine.register_node(A, a).unwrap();
        engine.register_node(B, b).unwrap();

        let now = Instant::now();
        let mut sink = RecordingSink::default();
        engine.request_focus_at(Some(A), now).unwrap();
        let _ = engine.tick(now + Duration::from_secs(2), &mut sink);

        let hop_start = now + Duration::from_secs(2);
        engine.request_focus_at(Some(B), hop_start).unwrap();
        // Halfway through the 400ms hop (linear easing): the camera roll
        // must pass through 10°, not 190°.
        let pose = engine
            .camera_pose_at(hop_start + Duration::from_millis(200));
        assert!(
            (pose.rotation_deg - 10.0).abs() < 1.0,
            "camera roll should cross the 0/360 boundary, got {}",
            pose.rotation_deg
        );
    }
}
