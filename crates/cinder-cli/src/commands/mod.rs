//! CLI command implementations

pub mod presets;
pub mod simulate;

use anyhow::{Context, Result};
use cinder_particles::PresetLibrary;
use std::path::Path;

/// Built-in presets, overlaid with `path` when given
pub fn load_library(path: Option<&str>) -> Result<PresetLibrary> {
    match path {
        Some(path) => PresetLibrary::load_file(Path::new(path))
            .with_context(|| format!("Failed to load presets from {path}")),
        None => Ok(PresetLibrary::builtin()),
    }
}
