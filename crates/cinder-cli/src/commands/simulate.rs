//! Simulate command: run frames headlessly and summarize

use super::load_library;
use anyhow::{Context, Result};
use cinder_particles::{HeadlessRenderer, ParticleSystem, PresetLibrary, SimulationConfig};
use cinder_runtime::{FrameClock, RuntimeSystem};
use glam::Vec3;
use serde::Serialize;
use std::path::Path;

pub struct SimulateArgs {
    pub preset: String,
    pub frames: u64,
    pub dt: f64,
    pub seed: Option<u32>,
    pub capacity: Option<usize>,
    pub config: Option<String>,
    pub presets: Option<String>,
    pub camera: Option<[f32; 3]>,
    pub no_sort: bool,
    pub format: String,
}

/// Statistics for one headless run
#[derive(Debug, Serialize)]
pub struct SimulationSummary {
    pub preset: String,
    pub label: String,
    pub frames: u64,
    pub capacity: usize,
    pub sorted: bool,
    pub final_live: usize,
    pub peak_live: usize,
    pub total_spawned: u64,
    pub exhausted_frames: u64,
    pub instances_drawn: u64,
    pub bytes_uploaded: u64,
    pub wall_seconds: f64,
    pub simulated_seconds: f64,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if args.format != "text" && args.format != "json" {
        anyhow::bail!("Unknown format: {}", args.format);
    }
    if !(args.dt > 0.0) || !args.dt.is_finite() {
        anyhow::bail!("--dt must be a positive number of seconds, got {}", args.dt);
    }

    let library = load_library(args.presets.as_deref())?;
    let mut config = match &args.config {
        Some(path) => load_config(Path::new(path))?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }
    if args.no_sort {
        config.sort_particles = false;
    }

    let summary = simulate(&args, config, library)?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => print_text(&summary),
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<SimulationConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&source)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}

/// Drive a particle system through `args.frames` fixed-length frames
pub fn simulate(
    args: &SimulateArgs,
    config: SimulationConfig,
    library: PresetLibrary,
) -> Result<SimulationSummary> {
    let stretch = config.stretch as f64;
    let mut system = ParticleSystem::new(config, library, HeadlessRenderer::default())
        .context("Failed to create particle system")?;
    system
        .select_preset(&args.preset)
        .with_context(|| format!("Failed to select preset '{}'", args.preset))?;
    if let Some(camera) = args.camera {
        system.camera.position = Vec3::from_array(camera);
    }

    system.initialize()?;

    let mut clock = FrameClock::new();
    let mut peak_live = 0;
    let mut total_spawned = 0u64;
    let mut exhausted_frames = 0u64;

    for _ in 0..args.frames {
        clock.advance_by(args.dt);
        system.update(&clock)?;

        let report = system.last_tick();
        peak_live = peak_live.max(report.live);
        total_spawned += report.spawn.spawned as u64;
        if report.spawn.exhausted {
            exhausted_frames += 1;
        }
    }

    let renderer = system.renderer();
    let summary = SimulationSummary {
        preset: args.preset.clone(),
        label: system.state().preset().label.clone(),
        frames: args.frames,
        capacity: system.state().capacity(),
        sorted: system.state().config().sort_particles,
        final_live: system.state().live_count(),
        peak_live,
        total_spawned,
        exhausted_frames,
        instances_drawn: renderer.instances_drawn,
        bytes_uploaded: renderer.bytes_uploaded,
        wall_seconds: clock.elapsed_time,
        simulated_seconds: clock.elapsed_time * stretch,
    };

    system.shutdown()?;
    log::info!(
        "Simulated {} frames of '{}': {} live at end, peak {}",
        summary.frames,
        summary.preset,
        summary.final_live,
        summary.peak_live
    );

    Ok(summary)
}

fn print_text(summary: &SimulationSummary) {
    println!("Preset:          {} ({})", summary.label, summary.preset);
    println!("Frames:          {}", summary.frames);
    println!(
        "Time:            {:.3}s wall, {:.3}s simulated",
        summary.wall_seconds, summary.simulated_seconds
    );
    println!(
        "Live particles:  {:6} of {}",
        summary.final_live, summary.capacity
    );
    println!("Peak live:       {}", summary.peak_live);
    println!("Spawned:         {}", summary.total_spawned);
    if summary.exhausted_frames > 0 {
        println!("Pool exhausted:  {} frame(s)", summary.exhausted_frames);
    }
    println!(
        "Drawn:           {} instances, {} bytes{}",
        summary.instances_drawn,
        summary.bytes_uploaded,
        if summary.sorted { "" } else { " (unsorted)" }
    );
}
