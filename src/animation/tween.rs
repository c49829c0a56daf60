//! A single tween: timing, parameters, and pure per-frame evaluation.

use glam::Vec2;
use web_time::{Duration, Instant};

use super::easing::EasingFunction;
use super::interpolation::lerp_f32;
use crate::camera::{
    parallax_transform, relative_transform, CameraPose, NodeTransform,
    ParallaxFrame,
};
use crate::focus::TransitionMode;

/// What a tween interpolates. Evaluation is a pure function of these
/// parameters and an eased progress value; nothing here is mutated
/// per frame.
#[derive(Debug, Clone, Copy)]
pub enum TweenParams {
    /// Project a node through a camera interpolated between two poses,
    /// fading opacity alongside.
    Camera {
        /// The node's static world position.
        node_world: Vec2,
        /// The node's resting scale.
        base_scale: f32,
        /// The node's resting rotation in degrees.
        base_rotation_deg: f32,
        /// Camera pose at progress 0 (the pose the scene was last rendered
        /// from, for continuity).
        start_cam: CameraPose,
        /// Camera pose at progress 1.
        end_cam: CameraPose,
        /// Screen center the projection re-anchors on.
        screen_center: Vec2,
        /// Opacity at progress 0.
        start_opacity: f32,
        /// Opacity at progress 1.
        end_opacity: f32,
    },
    /// Interpolate directly between two captured transforms (vanish and
    /// return paths).
    Drift {
        /// Transform at progress 0 — the node's last rendered transform.
        start: NodeTransform,
        /// Transform at progress 1.
        end: NodeTransform,
    },
    /// Slide a background layer's parallax progress between two values
    /// within a fixed focus frame.
    Parallax {
        /// Layer world position.
        base: Vec2,
        /// Layer resting scale.
        base_scale: f32,
        /// Layer resting rotation in degrees.
        base_rotation_deg: f32,
        /// Layer response strength in [0, 1].
        depth: f32,
        /// The focus frame being tracked.
        frame: ParallaxFrame,
        /// Screen center the parallax re-anchors on.
        screen_center: Vec2,
        /// Parallax progress at tween progress 0.
        start_p: f32,
        /// Parallax progress at tween progress 1.
        end_p: f32,
    },
}

impl TweenParams {
    /// Evaluate the transform at eased progress `t` in [0, 1].
    #[must_use]
    pub fn evaluate(&self, t: f32) -> NodeTransform {
        match self {
            Self::Camera {
                node_world,
                base_scale,
                base_rotation_deg,
                start_cam,
                end_cam,
                screen_center,
                start_opacity,
                end_opacity,
            } => {
                let mut out = relative_transform(
                    t,
                    *node_world,
                    *base_scale,
                    *base_rotation_deg,
                    start_cam,
                    end_cam,
                    *screen_center,
                );
                out.opacity =
                    lerp_f32(*start_opacity, *end_opacity, t).clamp(0.0, 1.0);
                out
            }
            Self::Drift { start, end } => start.lerp(end, t),
            Self::Parallax {
                base,
                base_scale,
                base_rotation_deg,
                depth,
                frame,
                screen_center,
                start_p,
                end_p,
            } => parallax_transform(
                lerp_f32(*start_p, *end_p, t),
                *base,
                *base_scale,
                *base_rotation_deg,
                *depth,
                frame,
                *screen_center,
            ),
        }
    }

    /// The parallax progress reached at eased progress `t`, for
    /// [`TweenParams::Parallax`]; `None` otherwise.
    #[must_use]
    pub fn parallax_progress(&self, t: f32) -> Option<f32> {
        match self {
            Self::Parallax { start_p, end_p, .. } => {
                Some(lerp_f32(*start_p, *end_p, t))
            }
            _ => None,
        }
    }
}

/// One live animation: a mode, parameters, and a clock window.
///
/// Raw progress runs 0→1 over `duration`, monotonically — a tween never
/// moves backwards even if the supplied clock does.
pub struct Tween {
    started_at: Instant,
    duration: Duration,
    easing: EasingFunction,
    mode: TransitionMode,
    params: TweenParams,
    raw_progress: f32,
    last: Option<NodeTransform>,
}

impl Tween {
    /// Start a tween now.
    #[must_use]
    pub fn new(
        mode: TransitionMode,
        params: TweenParams,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self::with_start_time(Instant::now(), mode, params, duration, easing)
    }

    /// Start a tween at an explicit instant (deterministic tests, hosts
    /// with their own clock).
    #[must_use]
    pub fn with_start_time(
        started_at: Instant,
        mode: TransitionMode,
        params: TweenParams,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            started_at,
            duration,
            easing,
            mode,
            params,
            raw_progress: 0.0,
            last: None,
        }
    }

    /// The transition mode that created this tween.
    #[must_use]
    pub fn mode(&self) -> TransitionMode {
        self.mode
    }

    /// The tween's parameters.
    #[must_use]
    pub fn params(&self) -> &TweenParams {
        &self.params
    }

    /// Total duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Raw progress at `now`, clamped to [0, 1] and monotonic across calls.
    /// A zero duration is complete immediately.
    pub fn raw_progress(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started_at);
        let computed = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        self.raw_progress = self.raw_progress.max(computed);
        self.raw_progress
    }

    /// Eased progress at `now`.
    pub fn eased_progress(&mut self, now: Instant) -> f32 {
        let raw = self.raw_progress(now);
        self.easing.evaluate(raw)
    }

    /// Advance to `now`: returns the transform for this frame and whether
    /// the tween has completed. The transform is also retained as the
    /// tween's last rendered state.
    pub fn advance(&mut self, now: Instant) -> (NodeTransform, bool) {
        let raw = self.raw_progress(now);
        let transform = self.params.evaluate(self.easing.evaluate(raw));
        self.last = Some(transform);
        (transform, raw >= 1.0)
    }

    /// Jump to completion and return the final transform.
    pub fn finish(&mut self) -> NodeTransform {
        self.raw_progress = 1.0;
        let transform = self.params.evaluate(1.0);
        self.last = Some(transform);
        transform
    }

    /// Collapse the remaining duration so the next [`advance`](Self::advance)
    /// completes the tween.
    pub fn expire(&mut self) {
        self.duration = Duration::ZERO;
    }

    /// The transform most recently produced by
    /// [`advance`](Self::advance)/[`finish`](Self::finish), if any frame has
    /// rendered yet.
    #[must_use]
    pub fn last_rendered(&self) -> Option<NodeTransform> {
        self.last
    }
}

impl std::fmt::Debug for Tween {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("mode", &self.mode)
            .field("duration", &self.duration)
            .field("raw_progress", &self.raw_progress)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_params() -> TweenParams {
        TweenParams::Camera {
            node_world: Vec2::new(50.0, 50.0),
            base_scale: 1.0,
            base_rotation_deg: 0.0,
            start_cam: CameraPose::rest(Vec2::new(100.0, 100.0)),
            end_cam: CameraPose {
                world: Vec2::new(50.0, 50.0),
                zoom: 2.0,
                rotation_deg: 0.0,
            },
            screen_center: Vec2::new(100.0, 100.0),
            start_opacity: 1.0,
            end_opacity: 1.0,
        }
    }

    #[test]
    fn test_progress_is_clamped_and_monotonic() {
        let start = Instant::now();
        let mut tween = Tween::with_start_time(
            start,
            TransitionMode::FocusIn,
            camera_params(),
            Duration::from_millis(100),
            EasingFunction::Linear,
        );

        assert!((tween.raw_progress(start) - 0.0).abs() < 0.01);
        let mid = start + Duration::from_millis(50);
        assert!((tween.raw_progress(mid) - 0.5).abs() < 0.01);

        // A clock that moves backwards must not rewind progress.
        let earlier = start + Duration::from_millis(20);
        assert!((tween.raw_progress(earlier) - 0.5).abs() < 0.01);

        let past = start + Duration::from_millis(500);
        assert!((tween.raw_progress(past) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let start = Instant::now();
        let mut tween = Tween::with_start_time(
            start,
            TransitionMode::FocusIn,
            camera_params(),
            Duration::ZERO,
            EasingFunction::Linear,
        );
        let (_, complete) = tween.advance(start);
        assert!(complete);
    }

    #[test]
    fn test_advance_reaches_focused_projection() {
        let start = Instant::now();
        let mut tween = Tween::with_start_time(
            start,
            TransitionMode::FocusIn,
            camera_params(),
            Duration::from_millis(100),
            EasingFunction::Linear,
        );

        let (transform, complete) =
            tween.advance(start + Duration::from_millis(100));
        assert!(complete);
        assert!((transform.x - 100.0).abs() < 1e-3);
        assert!((transform.y - 100.0).abs() < 1e-3);
        assert!((transform.scale_x - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_last_rendered_tracks_advance() {
        let start = Instant::now();
        let mut tween = Tween::with_start_time(
            start,
            TransitionMode::FocusIn,
            camera_params(),
            Duration::from_millis(200),
            EasingFunction::Linear,
        );
        assert!(tween.last_rendered().is_none());

        let (transform, _) = tween.advance(start + Duration::from_millis(50));
        assert_eq!(tween.last_rendered(), Some(transform));
    }

    #[test]
    fn test_drift_params_lerp() {
        let a = NodeTransform {
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation_deg: 0.0,
            opacity: 1.0,
        };
        let b = NodeTransform {
            x: 100.0,
            y: 50.0,
            scale_x: 2.0,
            scale_y: 2.0,
            rotation_deg: 90.0,
            opacity: 0.0,
        };
        let params = TweenParams::Drift { start: a, end: b };
        let mid = params.evaluate(0.5);
        assert!((mid.x - 50.0).abs() < 1e-4);
        assert!((mid.opacity - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_parallax_progress_exposed() {
        let params = TweenParams::Parallax {
            base: Vec2::ZERO,
            base_scale: 1.0,
            base_rotation_deg: 0.0,
            depth: 1.0,
            frame: ParallaxFrame {
                focus: Vec2::new(10.0, 10.0),
                world_zoom: 2.0,
                rotation_deg: 0.0,
            },
            screen_center: Vec2::ZERO,
            start_p: 0.25,
            end_p: 1.0,
        };
        assert_eq!(params.parallax_progress(0.0), Some(0.25));
        assert_eq!(params.parallax_progress(1.0), Some(1.0));
        assert!(camera_params().parallax_progress(0.5).is_none());
    }
}
