//! Preset library commands

use super::load_library;
use anyhow::{Context, Result};
use cinder_particles::PresetLibrary;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum PresetCommands {
    /// List available presets
    List {
        /// Extra presets file (TOML)
        #[arg(long)]
        presets: Option<String>,
    },

    /// Write the preset library as TOML
    Export {
        /// Extra presets file (TOML) to merge before exporting
        #[arg(long)]
        presets: Option<String>,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },
}

pub fn run(cmd: PresetCommands) -> Result<()> {
    match cmd {
        PresetCommands::List { presets } => {
            let library = load_library(presets.as_deref())?;
            print!("{}", format_list(&library));
            Ok(())
        }
        PresetCommands::Export { presets, output } => {
            let library = load_library(presets.as_deref())?;
            let text = library.to_toml_string().context("Failed to serialize presets")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, text)
                        .with_context(|| format!("Failed to write {path}"))?;
                    println!("Exported {} presets to {}", library.len(), path);
                }
                None => print!("{text}"),
            }
            Ok(())
        }
    }
}

fn format_list(library: &PresetLibrary) -> String {
    let mut out = String::new();
    for (name, preset) in library.iter() {
        let (lo, hi) = if preset.min_life <= preset.max_life {
            (preset.min_life, preset.max_life)
        } else {
            (preset.max_life, preset.min_life)
        };
        out.push_str(&format!(
            "{:<10} {:<16} {:>8.0}/s  life {:.2}-{:.2}s  gravity {:+.2}  wind {:+.2}\n",
            name, preset.label, preset.spawn_rate, lo, hi, preset.gravity, preset.wind
        ));
    }
    out
}
