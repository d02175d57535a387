//! Emission presets: spawn ranges, colour/size ramps, and forces
//!
//! A `PresetConfig` is plain data edited live by the host. Named presets are
//! kept in a `PresetLibrary`, which ships five authored looks and can be
//! extended from a TOML file whose top-level tables are preset names:
//!
//! ```toml
//! [ember]
//! label = "Slow ember"
//! spawn_rate = 500.0
//! min_life = 2.0
//! max_life = 6.0
//! gravity = -0.5
//! ```
//!
//! Missing keys fall back to the `fire` preset.

use crate::render::RenderSettings;
use cinder_core::{CinderError, Color, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f32::consts::PI;
use std::path::Path;

/// Key of the preset applied at startup
pub const DEFAULT_PRESET: &str = "fire";

/// Configuration for the single emitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetConfig {
    /// Display name
    #[serde(default)]
    pub label: String,
    /// Particles per second
    pub spawn_rate: f32,
    pub min_life: f32,
    pub max_life: f32,
    /// Half-angle of the emission cone around +Z, in radians
    pub spread: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub initial_color: Color,
    pub final_color: Color,
    pub initial_size: f32,
    pub final_size: f32,
    /// Edge softness, consumed by the renderer only
    pub initial_fuzz: f32,
    pub final_fuzz: f32,
    /// Acceleration along +Z
    pub gravity: f32,
    /// Drift along +Y, scaled by normalized age
    pub wind: f32,
    /// Alpha, background and quad outlines used while this preset is active
    pub render: RenderSettings,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self::fire()
    }
}

impl PresetConfig {
    pub fn fire() -> Self {
        Self {
            label: "Realistic fire".to_string(),
            spawn_rate: 1_000.0,
            min_life: 3.0,
            max_life: 5.0,
            spread: 0.2,
            min_speed: 0.611,
            max_speed: 1.137,
            initial_color: Color::from_rgba8(255, 131, 64, 47),
            final_color: Color::from_rgba8(0, 0, 0, 7),
            initial_size: 0.01,
            final_size: 0.1,
            initial_fuzz: 0.05,
            final_fuzz: 0.4,
            gravity: -2.388,
            wind: 0.1,
            render: RenderSettings::default(),
        }
    }

    pub fn torch() -> Self {
        Self {
            label: "Toon torch".to_string(),
            spawn_rate: 200.0,
            min_life: 3.0,
            max_life: 5.0,
            spread: 0.2,
            min_speed: 0.611,
            max_speed: 1.137,
            initial_color: Color::new(200.0 / 255.0, 0.0, 0.0, 1.0),
            final_color: Color::BLACK,
            initial_size: 0.2,
            final_size: 0.0,
            initial_fuzz: 0.0,
            final_fuzz: 0.0,
            gravity: -1.0,
            wind: 0.0,
            render: RenderSettings::default(),
        }
    }

    pub fn fountain() -> Self {
        Self {
            label: "Fountain".to_string(),
            spawn_rate: 1_000.0,
            min_life: 3.0,
            max_life: 4.0,
            spread: 0.2,
            min_speed: 1.0,
            max_speed: 2.0,
            initial_color: Color::from_rgba8(102, 141, 181, 25),
            final_color: Color::new(197.0 / 255.0, 231.0 / 255.0, 1.0, 0.0),
            initial_size: 0.01,
            final_size: 0.1,
            initial_fuzz: 0.0,
            final_fuzz: 0.0,
            gravity: -9.82,
            wind: 0.2,
            render: RenderSettings::default(),
        }
    }

    /// Life bounds are authored reversed; sampling normalizes them.
    pub fn comet() -> Self {
        Self {
            label: "Green comet".to_string(),
            spawn_rate: 2_000.0,
            min_life: 4.128,
            max_life: 0.873,
            spread: 1.269,
            min_speed: 0.0,
            max_speed: 0.718,
            initial_color: Color::new(134.0 / 255.0, 1.0, 0.5, 28.0 / 255.0),
            final_color: Color::from_rgba8(0, 91, 9, 99),
            initial_size: 0.047,
            final_size: 0.0,
            initial_fuzz: 0.5,
            final_fuzz: 0.0,
            gravity: 20.0,
            wind: 0.0,
            render: RenderSettings::default(),
        }
    }

    pub fn smoke() -> Self {
        Self {
            label: "Smoke".to_string(),
            spawn_rate: 1_000.0,
            min_life: 4.0,
            max_life: 7.0,
            spread: PI,
            min_speed: 0.0,
            max_speed: 0.3,
            initial_color: Color::from_rgba8(145, 145, 145, 70),
            final_color: Color::from_rgba8(51, 51, 51, 10),
            initial_size: 0.0,
            final_size: 0.2,
            initial_fuzz: 0.5,
            final_fuzz: 0.9,
            gravity: 3.5,
            wind: -0.2,
            render: RenderSettings::default(),
        }
    }

    /// Reject values the simulation cannot represent.
    ///
    /// Crossed min/max pairs are allowed; they are normalized when sampled.
    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("spawn_rate", self.spawn_rate),
            ("min_life", self.min_life),
            ("max_life", self.max_life),
            ("spread", self.spread),
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
            ("initial_size", self.initial_size),
            ("final_size", self.final_size),
            ("initial_fuzz", self.initial_fuzz),
            ("final_fuzz", self.final_fuzz),
            ("gravity", self.gravity),
            ("wind", self.wind),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(CinderError::InvalidPreset(format!(
                    "{field} must be finite, got {value}"
                )));
            }
        }
        for (field, value) in [
            ("spawn_rate", self.spawn_rate),
            ("min_life", self.min_life),
            ("max_life", self.max_life),
            ("initial_size", self.initial_size),
            ("final_size", self.final_size),
        ] {
            if value < 0.0 {
                return Err(CinderError::InvalidPreset(format!(
                    "{field} must not be negative, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.render.alpha) {
            return Err(CinderError::InvalidPreset(format!(
                "render.alpha must be within 0..=1, got {}",
                self.render.alpha
            )));
        }
        if !self.initial_color.is_finite()
            || !self.final_color.is_finite()
            || !self.render.clear_color.is_finite()
        {
            return Err(CinderError::InvalidPreset(
                "colours must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Named presets selectable by the host application
#[derive(Debug, Clone)]
pub struct PresetLibrary {
    presets: BTreeMap<String, PresetConfig>,
}

impl Default for PresetLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetLibrary {
    /// The authored presets: fire, torch, fountain, comet, smoke
    pub fn builtin() -> Self {
        let presets = [
            ("fire", PresetConfig::fire()),
            ("torch", PresetConfig::torch()),
            ("fountain", PresetConfig::fountain()),
            ("comet", PresetConfig::comet()),
            ("smoke", PresetConfig::smoke()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self { presets }
    }

    /// Built-in presets overlaid with the tables of a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let parsed: BTreeMap<String, PresetConfig> = toml::from_str(source)?;
        let mut library = Self::builtin();
        for (name, mut preset) in parsed {
            preset.validate().map_err(|e| {
                log::warn!("[particles] Rejecting preset '{name}': {e}");
                CinderError::InvalidPreset(format!("{name}: {e}"))
            })?;
            if preset.label.is_empty() {
                preset.label = name.clone();
            }
            library.insert(name, preset);
        }
        Ok(library)
    }

    /// Built-in presets overlaid with a TOML preset file
    pub fn load_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let library = Self::from_toml_str(&source)?;
        log::info!(
            "[particles] Loaded presets from {} ({} total)",
            path.display(),
            library.len()
        );
        Ok(library)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(&self.presets)?)
    }

    pub fn get(&self, name: &str) -> Result<&PresetConfig> {
        self.presets
            .get(name)
            .ok_or_else(|| CinderError::PresetNotFound(name.to_string()))
    }

    pub fn insert(&mut self, name: impl Into<String>, preset: PresetConfig) {
        self.presets.insert(name.into(), preset);
    }

    /// Preset keys in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PresetConfig)> {
        self.presets.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
