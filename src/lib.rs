// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Focus-camera transform engine for interactive 2D constellation scenes.
//!
//! Skylens computes, once per animation frame, the screen-space transform
//! (position, scale, rotation, opacity) of every node in a 2D scene as a
//! function of a virtual camera. Focusing a node animates the camera to
//! center on it; every other node reacts relative to that camera — vanishing
//! outward, returning, or re-parallaxing. The crate draws nothing: a
//! rendering collaborator applies each [`camera::NodeTransform`] to an actual
//! drawable object through the [`engine::FrameSink`] trait.
//!
//! # Key entry points
//!
//! - [`engine::SkylensEngine`] - the composition root: node registry, focus
//!   store, classifier, and animation driver
//! - [`focus::FocusStore`] - the single owned focus value with
//!   subscribe/notify
//! - [`camera`] - the pure transform math (relative and parallax)
//! - [`options::Options`] - runtime configuration (durations, easing,
//!   parallax, viewport)
//!
//! # Architecture
//!
//! Everything runs on the caller's UI/animation thread. A focus-change
//! intent flows through [`engine::SkylensEngine::request_focus`]: the focus
//! store updates and notifies subscribers, the classifier assigns every node
//! exactly one transition mode, and the driver starts one tween per
//! affected node — all before the next frame renders. Each
//! [`engine::SkylensEngine::tick`] then evaluates the live tweens as pure
//! `(state, time) -> transform` functions and hands the results to the
//! frame sink.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod focus;
pub mod options;
pub mod scene;
pub mod util;
