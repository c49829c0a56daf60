//! The single owned focus value with an explicit subscribe/notify contract.

use crate::scene::NodeId;

/// Which node, if any, is focused, and which one was focused before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusState {
    /// The currently focused node.
    pub focused: Option<NodeId>,
    /// The node that was focused before the last change.
    pub previous: Option<NodeId>,
}

/// Handle returned by [`FocusStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&FocusState)>;

/// Owns the process-wide [`FocusState`] and notifies subscribers on change.
///
/// The store is the only place focus mutates; consumers receive it
/// injected rather than reading ambient state. All access is
/// single-threaded: notification runs synchronously inside
/// [`set`](Self::set), before the caller regains control.
#[derive(Default)]
pub struct FocusStore {
    state: FocusState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl FocusStore {
    /// Empty store: nothing focused, no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current focus state.
    #[must_use]
    pub fn state(&self) -> FocusState {
        self.state
    }

    /// Replace the focused node.
    ///
    /// Returns `false` (and notifies nobody) when `target` already holds
    /// focus. Otherwise the state is fully replaced and every subscriber is
    /// notified before this call returns.
    pub fn set(&mut self, target: Option<NodeId>) -> bool {
        if self.state.focused == target {
            return false;
        }

        self.state = FocusState {
            previous: self.state.focused,
            focused: target,
        };

        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.state);
        }
        true
    }

    /// Register a change callback; it fires on every effective focus change.
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&FocusState) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Idempotent; returns whether one was removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for FocusStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusStore")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
