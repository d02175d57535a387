//! Owned simulation state and the per-frame tick
//!
//! One tick runs emission, integration, sorting, and compaction in that order
//! on the calling thread. Nothing is carried between ticks except the pool,
//! the emitter's fractional accumulator, and the random state.

use crate::compact::DrawBuffer;
use crate::emitter::{Emitter, SpawnReport, NOMINAL_FRAME};
use crate::integrate::integrate;
use crate::particle::ParticlePool;
use crate::preset::PresetConfig;
use crate::rand::RandomSource;
use crate::sort::{collect_keys, sort_back_to_front, SortKey};
use cinder_core::Result;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Simulated seconds per wall-clock second
pub const DEFAULT_STRETCH: f32 = 0.1;
pub const DEFAULT_CAPACITY: usize = 10_000;
pub const DEFAULT_SEED: u32 = 0xDEAD_BEEF;

/// Fixed parameters of a simulation, chosen at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of particle slots
    pub capacity: usize,
    /// Scale from wall-clock delta to simulated delta; also scales sampled lives
    pub stretch: f32,
    /// Frame length bounding the per-tick spawn burst, in wall seconds
    pub nominal_frame: f64,
    pub origin: [f32; 3],
    pub seed: u32,
    /// Order the draw buffer back to front; slot order when false
    pub sort_particles: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            stretch: DEFAULT_STRETCH,
            nominal_frame: NOMINAL_FRAME,
            origin: [0.0; 3],
            seed: DEFAULT_SEED,
            sort_particles: true,
        }
    }
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawn: SpawnReport,
    /// Particles simulated this tick
    pub live: usize,
    /// Entries written to the draw buffer
    pub drawn: usize,
}

pub struct SimulationState {
    config: SimulationConfig,
    pool: ParticlePool,
    emitter: Emitter,
    rng: RandomSource,
    preset: PresetConfig,
    keys: Vec<SortKey>,
    draw: DrawBuffer,
    ticks: u64,
}

impl SimulationState {
    pub fn new(config: SimulationConfig, preset: PresetConfig) -> Result<Self> {
        preset.validate()?;
        Ok(Self {
            pool: ParticlePool::new(config.capacity),
            emitter: Emitter::new(Vec3::from_array(config.origin), config.nominal_frame),
            rng: RandomSource::new(config.seed),
            keys: Vec::with_capacity(config.capacity),
            draw: DrawBuffer::with_capacity(config.capacity),
            preset,
            config,
            ticks: 0,
        })
    }

    /// Switch presets. The pool is cleared so particles spawned under the old
    /// ranges do not linger.
    pub fn apply_preset(&mut self, preset: PresetConfig) -> Result<()> {
        preset.validate()?;
        log::info!("[particles] Applying preset '{}'", preset.label);
        self.preset = preset;
        self.reset();
        Ok(())
    }

    /// Edit the active preset in place without clearing the pool.
    ///
    /// The edit is discarded if it leaves the preset invalid.
    pub fn edit_preset(&mut self, edit: impl FnOnce(&mut PresetConfig)) -> Result<()> {
        let mut preset = self.preset.clone();
        edit(&mut preset);
        preset.validate()?;
        self.preset = preset;
        Ok(())
    }

    /// Kill every particle and empty the draw buffer
    pub fn reset(&mut self) {
        self.pool.reset();
        self.emitter.reset();
        self.keys.clear();
        self.draw.clear();
    }

    /// Advance one frame of `dt` wall-clock seconds as seen from `camera`
    pub fn tick(&mut self, dt: f64, camera: Vec3) -> TickReport {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let spawn = self.emitter.emit(
            &mut self.pool,
            &self.preset,
            &mut self.rng,
            dt,
            self.config.stretch,
        );

        let sim_dt = (dt * self.config.stretch as f64) as f32;
        let live = integrate(&mut self.pool, &self.preset, camera, sim_dt);

        collect_keys(&self.pool, &mut self.keys);
        if self.config.sort_particles {
            sort_back_to_front(&mut self.keys);
        }
        self.draw.compact(&self.pool, &self.keys);
        self.ticks += 1;

        TickReport {
            spawn,
            live,
            drawn: self.draw.len(),
        }
    }

    pub fn draw_buffer(&self) -> &DrawBuffer {
        &self.draw
    }

    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn preset(&self) -> &PresetConfig {
        &self.preset
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn set_sorting(&mut self, enabled: bool) {
        self.config.sort_particles = enabled;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(capacity: usize) -> SimulationConfig {
        SimulationConfig {
            capacity,
            seed: 42,
            ..Default::default()
        }
    }

    #[test]
    fn default_config_is_sane() {
        let config = SimulationConfig::default();
        assert_eq!(config.capacity, 10_000);
        assert!((config.stretch - 0.1).abs() < 1e-6);
        assert!(config.sort_particles);
    }

    #[test]
    fn config_parses_from_partial_toml() {
        let config: SimulationConfig =
            toml::from_str("capacity = 500\nsort_particles = false").unwrap();
        assert_eq!(config.capacity, 500);
        assert!(!config.sort_particles);
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn new_rejects_invalid_preset() {
        let mut preset = PresetConfig::fire();
        preset.gravity = f32::INFINITY;
        assert!(SimulationState::new(small_config(10), preset).is_err());
    }

    #[test]
    fn tick_spawns_and_draws() {
        let mut sim = SimulationState::new(small_config(1000), PresetConfig::fire()).unwrap();
        let report = sim.tick(0.016, Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(report.spawn.spawned, 16);
        assert_eq!(report.live, 16);
        assert_eq!(report.drawn, 16);
        assert_eq!(sim.live_count(), 16);
        assert_eq!(sim.ticks(), 1);
    }

    #[test]
    fn apply_preset_clears_the_pool() {
        let mut sim = SimulationState::new(small_config(1000), PresetConfig::fire()).unwrap();
        sim.tick(0.016, Vec3::ZERO);
        sim.apply_preset(PresetConfig::smoke()).unwrap();
        assert_eq!(sim.live_count(), 0);
        assert!(sim.draw_buffer().is_empty());
        assert_eq!(sim.preset().label, "Smoke");
    }

    #[test]
    fn edit_preset_keeps_particles_and_rejects_bad_values() {
        let mut sim = SimulationState::new(small_config(1000), PresetConfig::fire()).unwrap();
        sim.tick(0.016, Vec3::ZERO);
        sim.edit_preset(|p| p.wind = 0.5).unwrap();
        assert_eq!(sim.live_count(), 16);
        assert_eq!(sim.preset().wind, 0.5);

        assert!(sim.edit_preset(|p| p.spawn_rate = f32::NAN).is_err());
        assert!(sim.preset().spawn_rate.is_finite());
    }

    #[test]
    fn non_finite_delta_is_treated_as_zero() {
        let mut sim = SimulationState::new(small_config(100), PresetConfig::fire()).unwrap();
        let report = sim.tick(f64::NAN, Vec3::ZERO);
        assert_eq!(report.spawn.requested, 0);
        assert_eq!(report.live, 0);
    }

    #[test]
    fn unsorted_output_is_slot_ordered() {
        let config = SimulationConfig {
            sort_particles: false,
            ..small_config(1000)
        };
        let mut sim = SimulationState::new(config, PresetConfig::fire()).unwrap();
        sim.tick(0.016, Vec3::new(4.0, 0.0, 0.0));
        let lives = sim.draw_buffer().initial_lives();
        let expected: Vec<f32> = sim
            .pool()
            .iter()
            .filter(|p| p.camera_distance >= 0.0)
            .map(|p| p.initial_life)
            .collect();
        assert_eq!(lives, expected.as_slice());
    }
}
