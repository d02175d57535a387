//! Cinder Particles - pooled billboard particle simulation
//!
//! Provides a single-emitter particle simulation with:
//! - Fixed-capacity slot pool with a ring-searched free cursor
//! - Rate-driven emission with a per-frame burst cap and seeded sampling
//! - Half-step gravity, age-scaled wind, and size/colour over lifetime
//! - Back-to-front depth ordering and dense per-instance attribute arrays

pub mod camera;
pub mod compact;
pub mod curves;
pub mod emitter;
pub mod integrate;
pub mod particle;
pub mod preset;
pub mod rand;
pub mod render;
pub mod simulation;
pub mod sort;

use cinder_core::Result;
use cinder_runtime::{FrameClock, RuntimeSystem};

pub use camera::Camera;
pub use compact::{DrawBuffer, ParticleInstance};
pub use emitter::{Emitter, SpawnReport};
pub use particle::{Particle, ParticlePool};
pub use preset::{PresetConfig, PresetLibrary, DEFAULT_PRESET};
pub use rand::RandomSource;
pub use render::{DrawFrame, HeadlessRenderer, RenderSettings, Renderer};
pub use simulation::{SimulationConfig, SimulationState, TickReport};

/// Live/max count and frame rate, as shown in the stats readout
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub live: usize,
    pub capacity: usize,
    pub fps: f64,
    pub frame: u64,
}

/// The particle system; implements RuntimeSystem for integration with the frame loop.
pub struct ParticleSystem<R: Renderer> {
    pub camera: Camera,
    pub settings: RenderSettings,
    state: SimulationState,
    library: PresetLibrary,
    renderer: R,
    stats: FrameStats,
    last_tick: TickReport,
}

impl<R: Renderer> ParticleSystem<R> {
    /// Start with the library's default preset
    pub fn new(config: SimulationConfig, library: PresetLibrary, renderer: R) -> Result<Self> {
        let preset = library.get(DEFAULT_PRESET)?.clone();
        let settings = preset.render.clone();
        let state = SimulationState::new(config, preset)?;
        Ok(Self {
            camera: Camera::default(),
            settings,
            stats: FrameStats {
                capacity: state.capacity(),
                ..Default::default()
            },
            state,
            library,
            renderer,
            last_tick: TickReport::default(),
        })
    }

    /// Switch to a named preset from the library, taking its render settings
    pub fn select_preset(&mut self, name: &str) -> Result<()> {
        let preset = self.library.get(name)?.clone();
        let settings = preset.render.clone();
        self.state.apply_preset(preset)?;
        self.settings = settings;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.stats.live = 0;
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn library(&self) -> &PresetLibrary {
        &self.library
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Report from the most recent update
    pub fn last_tick(&self) -> TickReport {
        self.last_tick
    }
}

impl<R: Renderer> RuntimeSystem for ParticleSystem<R> {
    fn initialize(&mut self) -> Result<()> {
        log::info!(
            "[particles] {} slots, preset '{}'",
            self.state.capacity(),
            self.state.preset().label
        );
        Ok(())
    }

    fn update(&mut self, clock: &FrameClock) -> Result<()> {
        let report = self.state.tick(clock.delta_time, self.camera.position);
        self.last_tick = report;
        self.stats = FrameStats {
            live: report.live,
            capacity: self.state.capacity(),
            fps: clock.fps(),
            frame: clock.frame,
        };

        let frame = DrawFrame::new(
            self.state.draw_buffer(),
            self.state.capacity(),
            &self.camera,
            self.state.preset(),
            &self.settings,
        );
        // A failed draw drops this frame only; the simulation has already advanced
        if let Err(e) = self.renderer.draw(&frame) {
            log::warn!(
                "[particles] Draw failed, skipping frame {}: {e}",
                clock.frame
            );
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.state.reset();
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinder_core::CinderError;

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn draw(&mut self, _frame: &DrawFrame<'_>) -> Result<()> {
            Err(CinderError::RuntimeError("shader reload".to_string()))
        }
    }

    fn system() -> ParticleSystem<HeadlessRenderer> {
        let config = SimulationConfig {
            capacity: 2000,
            ..Default::default()
        };
        ParticleSystem::new(
            config,
            PresetLibrary::builtin(),
            HeadlessRenderer::default(),
        )
        .unwrap()
    }

    #[test]
    fn update_ticks_and_draws() {
        let mut sys = system();
        sys.initialize().unwrap();
        let mut clock = FrameClock::new();
        for _ in 0..3 {
            clock.advance_by(0.016);
            sys.update(&clock).unwrap();
        }
        assert_eq!(sys.renderer().frames, 3);
        assert_eq!(sys.stats().live, 48);
        assert_eq!(sys.stats().capacity, 2000);
        assert_eq!(sys.renderer().last_instances, 48);
        assert_eq!(sys.last_tick().spawn.spawned, 16);
        assert_eq!(sys.name(), "particles");
    }

    #[test]
    fn select_preset_resets_and_switches() {
        let mut sys = system();
        let mut clock = FrameClock::new();
        clock.advance_by(0.016);
        sys.update(&clock).unwrap();
        sys.select_preset("smoke").unwrap();
        assert_eq!(sys.state().live_count(), 0);
        assert_eq!(sys.state().preset().label, "Smoke");
        assert!(matches!(
            sys.select_preset("plasma"),
            Err(CinderError::PresetNotFound(_))
        ));
    }

    #[test]
    fn select_preset_applies_its_render_settings() {
        let mut library = PresetLibrary::builtin();
        let mut night = PresetConfig::smoke();
        night.render.alpha = 0.25;
        night.render.clear_color = cinder_core::Color::BLACK;
        library.insert("night", night);

        let mut sys = ParticleSystem::new(
            SimulationConfig::default(),
            library,
            HeadlessRenderer::default(),
        )
        .unwrap();
        assert_eq!(sys.settings, RenderSettings::default());

        sys.select_preset("night").unwrap();
        assert_eq!(sys.settings.alpha, 0.25);
        assert_eq!(sys.settings.clear_color, cinder_core::Color::BLACK);

        sys.select_preset("fire").unwrap();
        assert_eq!(sys.settings, RenderSettings::default());
    }

    #[test]
    fn draw_failure_is_not_fatal() {
        let mut sys = ParticleSystem::new(
            SimulationConfig::default(),
            PresetLibrary::builtin(),
            FailingRenderer,
        )
        .unwrap();
        let mut clock = FrameClock::new();
        clock.advance_by(0.016);
        assert!(sys.update(&clock).is_ok());
        assert_eq!(sys.state().live_count(), 16);
    }

    #[test]
    fn shutdown_clears_the_pool() {
        let mut sys = system();
        let mut clock = FrameClock::new();
        clock.advance_by(0.016);
        sys.update(&clock).unwrap();
        sys.shutdown().unwrap();
        assert_eq!(sys.state().live_count(), 0);
    }
}
