//! Small host-facing utilities.

pub mod frame_clock;

pub use frame_clock::FrameClock;
