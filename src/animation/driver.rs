//! Per-key tween ownership: start, per-frame update, cancel, finish.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use web_time::Instant;

use super::tween::Tween;
use crate::camera::NodeTransform;
use crate::focus::TransitionMode;

/// One evaluated frame for one key.
#[derive(Debug, Clone, Copy)]
pub struct FrameUpdate<K> {
    /// The node or layer this update belongs to.
    pub key: K,
    /// The transform to render this frame.
    pub transform: NodeTransform,
    /// Eased progress the transform was evaluated at.
    pub eased: f32,
    /// Whether the tween completed on this frame. A finished tween is
    /// released; a cancelled one never reports finished.
    pub finished: bool,
}

/// Owns every live tween, keyed by node or layer id.
///
/// Invariants: at most one live tween per key (starting a new one destroys
/// the prior), and a destroyed tween never produces a finished update.
/// All state lives in the map; dropping a tween detaches everything.
pub struct AnimationDriver<K> {
    tweens: FxHashMap<K, Tween>,
}

impl<K: Copy + Eq + Hash> AnimationDriver<K> {
    /// Empty driver.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tweens: FxHashMap::default(),
        }
    }

    /// Start a tween for `key`, destroying any in-flight tween first.
    /// Returns `true` if a prior tween was cancelled by this start.
    pub fn start(&mut self, key: K, tween: Tween) -> bool {
        self.tweens.insert(key, tween).is_some()
    }

    /// Cancel the tween for `key`, leaving the node at whatever it last
    /// rendered. Idempotent; never reports a finish. Returns whether a
    /// tween was live.
    pub fn cancel(&mut self, key: K) -> bool {
        self.tweens.remove(&key).is_some()
    }

    /// Cancel every live tween.
    pub fn cancel_all(&mut self) {
        self.tweens.clear();
    }

    /// Advance every live tween to `now`. Completed tweens are released
    /// after reporting their final frame with `finished` set.
    pub fn tick(&mut self, now: Instant) -> Vec<FrameUpdate<K>> {
        let mut updates = Vec::with_capacity(self.tweens.len());
        let mut finished_keys = Vec::new();
        for (&key, tween) in &mut self.tweens {
            let (transform, finished) = tween.advance(now);
            let eased = tween.eased_progress(now);
            updates.push(FrameUpdate {
                key,
                transform,
                eased,
                finished,
            });
            if finished {
                finished_keys.push(key);
            }
        }
        for key in finished_keys {
            let _ = self.tweens.remove(&key);
        }
        updates
    }

    /// Jump every live tween to its end state. Each reports one final
    /// finished update, then is released.
    pub fn skip_all(&mut self) -> Vec<FrameUpdate<K>> {
        let updates = self
            .tweens
            .iter_mut()
            .map(|(&key, tween)| FrameUpdate {
                key,
                transform: tween.finish(),
                eased: 1.0,
                finished: true,
            })
            .collect();
        self.tweens.clear();
        updates
    }

    /// Collapse every live tween's remaining duration so the next
    /// [`tick`](Self::tick) completes it through the normal path.
    pub fn finish_on_next_tick(&mut self) {
        for tween in self.tweens.values_mut() {
            tween.expire();
        }
    }

    /// Whether any tween is live.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    /// Number of live tweens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether no tween is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// The mode of `key`'s live tween, if any.
    #[must_use]
    pub fn mode_of(&self, key: K) -> Option<TransitionMode> {
        self.tweens.get(&key).map(Tween::mode)
    }

    /// The live tween for `key`, if any.
    #[must_use]
    pub fn tween_of(&self, key: K) -> Option<&Tween> {
        self.tweens.get(&key)
    }

    /// The last transform `key`'s live tween rendered, if any.
    #[must_use]
    pub fn last_rendered_of(&self, key: K) -> Option<NodeTransform> {
        self.tweens.get(&key).and_then(Tween::last_rendered)
    }
}

impl<K: Copy + Eq + Hash> Default for AnimationDriver<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> std::fmt::Debug for AnimationDriver<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationDriver")
            .field("live", &self.tweens.len())
            .finish()
    }
}
