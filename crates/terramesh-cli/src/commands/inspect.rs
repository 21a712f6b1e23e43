//! Terrain source inspection command

use anyhow::{Context, Result};
use std::path::Path;
use terramesh_core::Vec3;
use terramesh_terrain::{Heightfield, SourceDefaults, TerrainSource};

use super::Format;
use crate::config::TerrameshConfig;

pub fn run(input: &str, format: Format) -> Result<()> {
    let config = TerrameshConfig::load().context("Failed to load config")?;
    let defaults = SourceDefaults {
        size: config.default_size,
        origin: Vec3::ZERO,
    };

    let path = Path::new(input);
    if !path.is_file() {
        anyhow::bail!("Terrain source not found: {}", input);
    }

    let heightfield = TerrainSource::from_path(path.to_path_buf())
        .load(&defaults)
        .with_context(|| format!("Failed to load terrain source {}", input))?;

    let output = match format {
        Format::Json => serde_json::to_string_pretty(&describe_json(&heightfield))?,
        Format::Text => describe_text(&heightfield),
    };
    println!("{}", output);

    Ok(())
}

fn describe_text(hf: &Heightfield) -> String {
    let mut lines = vec![
        format!("Terrain: {}", hf.name),
        format!("Resolution: {} x {}", hf.width, hf.depth),
        format!("Size: {} x {} x {}", hf.size.x, hf.size.y, hf.size.z),
        format!("Origin: ({}, {}, {})", hf.origin.x, hf.origin.y, hf.origin.z),
        format!("Vertices: {}", hf.vertex_count()),
        format!("Triangles: {}", hf.triangle_count()),
    ];

    match hf.elevation_range() {
        Some((lo, hi)) => lines.push(format!("Elevation: {} .. {}", lo, hi)),
        None => lines.push("Elevation: no finite samples".to_string()),
    }
    if let Err(e) = hf.validate_finite() {
        lines.push(format!("Warning: {}", e));
    }

    lines.join("\n")
}

fn describe_json(hf: &Heightfield) -> serde_json::Value {
    let range = hf.elevation_range();
    serde_json::json!({
        "name": hf.name,
        "width": hf.width,
        "depth": hf.depth,
        "size": hf.size.to_array(),
        "origin": hf.origin.to_array(),
        "vertices": hf.vertex_count(),
        "triangles": hf.triangle_count(),
        "elevation_min": range.map(|r| r.0),
        "elevation_max": range.map(|r| r.1),
        "finite": hf.validate_finite().is_ok(),
    })
}
