//! Configuration commands

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::config::TerrameshConfig;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,

    /// Remember the directory exported OBJ files are written to
    SetOutput {
        /// Destination directory
        dir: PathBuf,

        /// Write to ~/.terramesh/config.toml instead of the project config
        #[arg(long)]
        global: bool,
    },
}

pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(),
        ConfigCommands::SetOutput { dir, global } => set_output(dir, global),
    }
}

fn show() -> Result<()> {
    let config = TerrameshConfig::load().context("Failed to load config")?;

    match &config.output_dir {
        Some(dir) => println!("output_dir       = {}", dir.display()),
        None => println!("output_dir       = (not set)"),
    }
    println!("allow_non_finite = {}", config.allow_non_finite);
    println!(
        "default_size     = [{}, {}, {}]",
        config.default_size.x, config.default_size.y, config.default_size.z
    );

    Ok(())
}

fn set_output(dir: PathBuf, global: bool) -> Result<()> {
    let path = if global {
        TerrameshConfig::global_config_path().context("Could not locate home directory")?
    } else {
        TerrameshConfig::local_config_path()
    };

    let dir = absolute_output_dir(&dir)?;
    if !dir.is_dir() {
        log::warn!("{} does not exist yet; exports will fail until it is created", dir.display());
    }

    TerrameshConfig::save_output_dir(&path, &dir)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Output directory set to {} in {}", dir.display(), path.display());

    Ok(())
}

/// Resolve `dir` against the current directory so later exports from
/// elsewhere write to the same place
fn absolute_output_dir(dir: &Path) -> Result<PathBuf> {
    std::path::absolute(dir)
        .with_context(|| format!("Failed to resolve output directory {}", dir.display()))
}
