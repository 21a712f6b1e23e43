//! Terrain source descriptors and input collection
//!
//! A terrain source is either a TOML descriptor or a bare grayscale
//! heightmap image. Descriptors look like:
//!
//! ```toml
//! [terrain]
//! name = "island"
//! heightmap = "island.png"
//! size = [1000.0, 600.0, 1000.0]
//! origin = [0.0, 0.0, 0.0]
//! ```
//!
//! or carry the samples inline with `resolution = [w, h]` and `heights = [...]`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use terramesh_core::{Result, TerrameshError, Vec3};

use crate::heightfield::Heightfield;

/// Size and origin applied when a source does not specify its own
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceDefaults {
    pub size: Vec3,
    pub origin: Vec3,
}

impl Default for SourceDefaults {
    fn default() -> Self {
        Self {
            size: Vec3::ONE,
            origin: Vec3::ZERO,
        }
    }
}

/// Top-level descriptor file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainFile {
    pub terrain: TerrainDef,
}

/// The `[terrain]` table of a descriptor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerrainDef {
    #[serde(default)]
    pub name: Option<String>,
    /// Heightmap image path, relative to the descriptor
    #[serde(default)]
    pub heightmap: Option<String>,
    #[serde(default)]
    pub resolution: Option<[u32; 2]>,
    #[serde(default)]
    pub heights: Option<Vec<f32>>,
    #[serde(default)]
    pub size: Option<[f32; 3]>,
    #[serde(default)]
    pub origin: Option<[f32; 3]>,
}

/// A terrain input discovered on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerrainSource {
    Descriptor(PathBuf),
    Heightmap(PathBuf),
}

impl TerrainSource {
    pub fn path(&self) -> &Path {
        match self {
            TerrainSource::Descriptor(p) | TerrainSource::Heightmap(p) => p,
        }
    }

    /// Classify a file by extension: `.toml` is a descriptor, anything else
    /// is treated as a heightmap image
    pub fn from_path(path: PathBuf) -> Self {
        let is_toml = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        if is_toml {
            TerrainSource::Descriptor(path)
        } else {
            TerrainSource::Heightmap(path)
        }
    }

    /// Load the heightfield this source describes
    pub fn load(&self, defaults: &SourceDefaults) -> Result<Heightfield> {
        match self {
            TerrainSource::Descriptor(path) => load_descriptor(path, defaults),
            TerrainSource::Heightmap(path) => {
                let hf = Heightfield::from_png(path, defaults.size, defaults.origin)?;
                check_name(&hf.name)?;
                Ok(hf)
            }
        }
    }
}

/// Load a terrain descriptor file
pub fn load_descriptor(path: &Path, defaults: &SourceDefaults) -> Result<Heightfield> {
    let content = fs::read_to_string(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "terrain".to_string());
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    load_descriptor_string(&content, &stem, base_dir, defaults)
}

/// Load a terrain descriptor from a TOML string.
///
/// `fallback_name` is used when the descriptor has no `name`, and relative
/// heightmap paths resolve against `base_dir`.
pub fn load_descriptor_string(
    content: &str,
    fallback_name: &str,
    base_dir: &Path,
    defaults: &SourceDefaults,
) -> Result<Heightfield> {
    let file: TerrainFile = toml::from_str(content)?;
    let def = file.terrain;

    let name = def.name.unwrap_or_else(|| fallback_name.to_string());
    check_name(&name)?;

    let size = def.size.map(Vec3::from_array).unwrap_or(defaults.size);
    let origin = def.origin.map(Vec3::from_array).unwrap_or(defaults.origin);

    match (def.heightmap, def.heights) {
        (Some(heightmap), None) => {
            if def.resolution.is_some() {
                log::warn!("Terrain '{}': resolution is ignored for image heightmaps", name);
            }
            let mut hf = Heightfield::from_png(&base_dir.join(heightmap), size, origin)?;
            hf.name = name;
            Ok(hf)
        }
        (None, Some(heights)) => {
            let [width, depth] = def.resolution.ok_or_else(|| {
                TerrameshError::Source(format!(
                    "Terrain '{}': inline heights require `resolution = [width, depth]`",
                    name
                ))
            })?;
            Heightfield::new(name, width, depth, heights, size, origin)
        }
        (Some(_), Some(_)) => Err(TerrameshError::Source(format!(
            "Terrain '{}': set either `heightmap` or `heights`, not both",
            name
        ))),
        (None, None) => Err(TerrameshError::Source(format!(
            "Terrain '{}': missing `heightmap` or `heights`",
            name
        ))),
    }
}

/// Names become file stems, so they must be non-empty and free of separators
fn check_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(TerrameshError::Source(format!(
            "Invalid terrain name '{}'",
            name
        )));
    }
    Ok(())
}

/// Expand input paths into terrain sources.
///
/// Directories are walked recursively for `.toml` descriptors. Each file is
/// added once, in order of first appearance.
pub fn collect_sources(inputs: &[PathBuf]) -> Result<Vec<TerrainSource>> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found = Vec::new();
            collect_descriptors(input, &mut found)?;
            for path in found {
                push_unique(TerrainSource::Descriptor(path), &mut seen, &mut sources)?;
            }
        } else if input.is_file() {
            push_unique(TerrainSource::from_path(input.clone()), &mut seen, &mut sources)?;
        } else {
            return Err(TerrameshError::Source(format!(
                "Input not found: {}",
                input.display()
            )));
        }
    }

    Ok(sources)
}

fn push_unique(
    source: TerrainSource,
    seen: &mut HashSet<PathBuf>,
    sources: &mut Vec<TerrainSource>,
) -> Result<()> {
    let key = fs::canonicalize(source.path())?;
    if seen.insert(key) {
        sources.push(source);
    }
    Ok(())
}

fn collect_descriptors(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_descriptors(&path, found)?;
        } else if matches!(TerrainSource::from_path(path.clone()), TerrainSource::Descriptor(_)) {
            found.push(path);
        }
    }
    Ok(())
}
