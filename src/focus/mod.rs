//! Focus state ownership and transition classification.

mod classifier;
mod store;

pub use classifier::{classify, FocusChange, TransitionMode};
pub use store::{FocusState, FocusStore, SubscriptionId};
