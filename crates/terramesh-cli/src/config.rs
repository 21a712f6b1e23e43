//! Layered configuration
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variable: `TERRAMESH_OUTPUT_DIR`
//! 2. Project-local: `.terramesh/config.toml`
//! 3. Global: `~/.terramesh/config.toml`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use terramesh_core::{Result, TerrameshError, Vec3};

pub const OUTPUT_DIR_ENV: &str = "TERRAMESH_OUTPUT_DIR";

/// The `[export]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_non_finite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_size: Option<[f32; 3]>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerrameshConfigFile {
    #[serde(default)]
    pub export: ExportConfig,
}

/// Resolved configuration with environment overrides applied
#[derive(Debug, Clone, PartialEq)]
pub struct TerrameshConfig {
    pub output_dir: Option<PathBuf>,
    pub allow_non_finite: bool,
    pub default_size: Vec3,
}

impl TerrameshConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        Self::load_layers(
            Self::global_config_path().as_deref(),
            &Self::local_config_path(),
            |key| std::env::var(key).ok(),
        )
    }

    /// Merge the given config files (missing files are skipped) and apply
    /// overrides from `env`
    pub fn load_layers(
        global: Option<&Path>,
        local: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = TerrameshConfigFile::default();

        if let Some(global) = global {
            if global.exists() {
                Self::merge_into(&mut config, Self::load_file(global)?);
            }
        }

        if local.exists() {
            Self::merge_into(&mut config, Self::load_file(local)?);
        }

        if let Some(dir) = env(OUTPUT_DIR_ENV).filter(|d| !d.is_empty()) {
            config.export.output_dir = Some(dir);
        }

        Ok(Self {
            output_dir: config
                .export
                .output_dir
                .filter(|d| !d.is_empty())
                .map(PathBuf::from),
            allow_non_finite: config.export.allow_non_finite.unwrap_or(false),
            default_size: config
                .export
                .default_size
                .map(Vec3::from_array)
                .unwrap_or(Vec3::ONE),
        })
    }

    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".terramesh").join("config.toml"))
    }

    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".terramesh/config.toml")
    }

    /// Persist the output directory into the config file at `path`, keeping
    /// any other settings already stored there
    pub fn save_output_dir(path: &Path, output_dir: &Path) -> Result<()> {
        let mut file = if path.exists() {
            Self::load_file(path)?
        } else {
            TerrameshConfigFile::default()
        };
        file.export.output_dir = Some(output_dir.to_string_lossy().into_owned());

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(&file)?)?;
        Ok(())
    }

    fn load_file(path: &Path) -> Result<TerrameshConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            TerrameshError::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge_into(base: &mut TerrameshConfigFile, overlay: TerrameshConfigFile) {
        if overlay.export.output_dir.is_some() {
            base.export.output_dir = overlay.export.output_dir;
        }
        if overlay.export.allow_non_finite.is_some() {
            base.export.allow_non_finite = overlay.export.allow_non_finite;
        }
        if overlay.export.default_size.is_some() {
            base.export.default_size = overlay.export.default_size;
        }
    }
}
