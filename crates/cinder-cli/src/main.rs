//! Cinder CLI - headless driver for the particle simulator

mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{presets, simulate};

#[derive(Parser)]
#[command(name = "cinder")]
#[command(about = "Real-time billboard particle simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation for a number of frames and report statistics
    Simulate {
        /// Preset to run
        #[arg(short, long, default_value = "fire")]
        preset: String,

        /// Number of frames to simulate
        #[arg(long, default_value = "600")]
        frames: u64,

        /// Wall-clock seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f64,

        /// Random seed
        #[arg(long)]
        seed: Option<u32>,

        /// Number of particle slots
        #[arg(long)]
        capacity: Option<usize>,

        /// Simulation config file (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Extra presets file (TOML)
        #[arg(long)]
        presets: Option<String>,

        /// Camera position (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        camera: Option<[f32; 3]>,

        /// Emit particles in slot order instead of back to front
        #[arg(long)]
        no_sort: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Preset library operations
    #[command(subcommand)]
    Presets(presets::PresetCommands),
}

fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!(
            "expected 3 comma-separated values, got {}",
            parts.len()
        ));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    let z: f32 = parts[2].trim().parse().map_err(|e| format!("invalid z: {}", e))?;
    Ok([x, y, z])
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate {
            preset,
            frames,
            dt,
            seed,
            capacity,
            config,
            presets,
            camera,
            no_sort,
            format,
        } => simulate::run(simulate::SimulateArgs {
            preset,
            frames,
            dt,
            seed,
            capacity,
            config,
            presets,
            camera,
            no_sort,
            format,
        }),
        Commands::Presets(cmd) => presets::run(cmd),
    }
}
