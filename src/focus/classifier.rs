//! Maps a focus change to exactly one transition mode per node.

use crate::scene::NodeId;

/// How a node reacts to a focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionMode {
    /// No reaction; any in-flight animation is left undisturbed.
    Idle,
    /// The node gains focus from an unfocused scene.
    FocusIn,
    /// The node loses focus and the scene returns to rest.
    FocusOut,
    /// The node gains focus directly from another focused node.
    HopIn,
    /// The node loses focus directly to another node.
    HopOut,
    /// A bystander during a hop: its frame re-targets from the old focus
    /// pose to the new one, ending hidden.
    PeerSwitch,
    /// A bystander when focus is gained: recedes outward and fades out.
    NeighborVanish,
    /// A bystander when focus is cleared: returns to rest and fades in.
    NeighborReturn,
}

impl TransitionMode {
    /// Whether this mode creates an animation at all.
    #[inline]
    #[must_use]
    pub fn is_animated(&self) -> bool {
        *self != Self::Idle
    }
}

/// A single focus transition: who held focus before, who holds it now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    /// Focus holder before the change.
    pub from: Option<NodeId>,
    /// Focus holder after the change.
    pub to: Option<NodeId>,
}

/// Assign `node` its transition mode for `change`.
///
/// Exactly one mode applies per node per transition; a no-op change yields
/// [`TransitionMode::Idle`] for every node.
#[must_use]
pub fn classify(change: &FocusChange, node: NodeId) -> TransitionMode {
    match (change.from, change.to) {
        (None, Some(to)) if node == to => TransitionMode::FocusIn,
        (Some(from), None) if node == from => TransitionMode::FocusOut,
        (Some(from), Some(to)) if node == to && from != to => {
            TransitionMode::HopIn
        }
        (Some(from), Some(to)) if node == from && from != to => {
            TransitionMode::HopOut
        }
        (Some(from), Some(to)) if from != to => TransitionMode::PeerSwitch,
        (None, Some(_)) => TransitionMode::NeighborVanish,
        (Some(_), None) => TransitionMode::NeighborReturn,
        _ => TransitionMode::Idle,
    }
}
