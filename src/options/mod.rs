//! Centralized engine options with TOML preset support.
//!
//! All tweakable settings (tween durations, easing, parallax response,
//! viewport) are consolidated here. Options serialize to/from TOML for
//! presets a host can ship alongside its scenes.

mod animation;
mod parallax;
mod viewport;

use std::path::Path;

pub use animation::AnimationOptions;
pub use parallax::ParallaxOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use viewport::ViewportOptions;

use crate::error::SkylensError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[animation]`) work correctly.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Tween durations and easing.
    pub animation: AnimationOptions,
    /// Neighbor and background response parameters.
    pub parallax: ParallaxOptions,
    /// Logical viewport dimensions.
    pub viewport: ViewportOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SkylensError> {
        let content = std::fs::read_to_string(path).map_err(SkylensError::Io)?;
        toml::from_str(&content)
            .map_err(|e| SkylensError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SkylensError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SkylensError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SkylensError::Io)?;
        }
        std::fs::write(path, content).map_err(SkylensError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
