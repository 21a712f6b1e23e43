//! Terramesh CLI - Export heightfield terrains as Wavefront OBJ meshes

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{export, inspect, Format};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "terramesh")]
#[command(about = "Convert heightfield terrains to OBJ meshes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export terrain descriptors or heightmap images to OBJ files
    Export {
        /// Descriptor files (.toml), heightmap images, or directories to scan
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Destination directory (defaults to the configured output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// World size for sources without one (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        size: Option<[f32; 3]>,

        /// World origin for sources without one (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        origin: Option<[f32; 3]>,

        /// Write NaN/infinite elevations through instead of rejecting them
        #[arg(long)]
        allow_non_finite: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Show resolution, size and elevation range of a terrain source
    Inspect {
        /// Descriptor file (.toml) or heightmap image
        input: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Configuration operations
    #[command(subcommand)]
    Config(commands::config::ConfigCommands),
}

fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    let z: f32 = parts[2].trim().parse().map_err(|e| format!("invalid z: {}", e))?;
    Ok([x, y, z])
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Export {
            inputs,
            output,
            size,
            origin,
            allow_non_finite,
            format,
        } => export::run(export::ExportArgs {
            inputs,
            output,
            size,
            origin,
            allow_non_finite,
            format,
        }),
        Commands::Inspect { input, format } => inspect::run(&input, format),
        Commands::Config(cmd) => commands::config::run(cmd),
    }
}
