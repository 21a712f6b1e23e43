//! Terrain export command

use anyhow::{Context, Result};
use std::path::PathBuf;
use terramesh_core::Vec3;
use terramesh_terrain::{collect_sources, export_batch, ExportOptions, ExportReport, SourceDefaults};

use super::Format;
use crate::config::TerrameshConfig;

pub struct ExportArgs {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub size: Option<[f32; 3]>,
    pub origin: Option<[f32; 3]>,
    pub allow_non_finite: bool,
    pub format: Format,
}

pub fn run(args: ExportArgs) -> Result<()> {
    let config = TerrameshConfig::load().context("Failed to load config")?;
    let options = resolve_options(&args, &config)?;

    let sources = collect_sources(&args.inputs).context("Failed to collect terrain sources")?;
    if sources.is_empty() {
        anyhow::bail!("No terrain sources found");
    }

    log::info!(
        "Exporting {} terrain(s) to {}",
        sources.len(),
        options.output_dir.display()
    );
    let report = export_batch(&sources, &options);

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print_report_text(&report),
    }

    if !report.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

/// Combine command-line flags with config; flags win
fn resolve_options(args: &ExportArgs, config: &TerrameshConfig) -> Result<ExportOptions> {
    let output_dir = match args.output.clone().or_else(|| config.output_dir.clone()) {
        Some(dir) => dir,
        None => anyhow::bail!(
            "No output directory set; pass --output or run `terramesh config set-output <DIR>`"
        ),
    };

    Ok(ExportOptions {
        output_dir,
        allow_non_finite: args.allow_non_finite || config.allow_non_finite,
        defaults: SourceDefaults {
            size: args.size.map(Vec3::from_array).unwrap_or(config.default_size),
            origin: args.origin.map(Vec3::from_array).unwrap_or(Vec3::ZERO),
        },
    })
}

fn print_report_text(report: &ExportReport) {
    for entry in &report.entries {
        let name = entry.name.as_deref().unwrap_or("?");
        match (&entry.exported, &entry.error) {
            (Some(mesh), _) => println!(
                "  [OK]   {} -> {} ({} vertices, {} triangles, {})",
                name,
                mesh.path.display(),
                mesh.vertices,
                mesh.triangles,
                mesh.body_hash
            ),
            (None, Some(err)) => {
                println!("  [FAIL] {} ({}): {}", name, entry.source.display(), err)
            }
            (None, None) => {}
        }
    }
    println!();
    println!("{}", report.summary());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(output: Option<&str>) -> ExportArgs {
        ExportArgs {
            inputs: Vec::new(),
            output: output.map(PathBuf::from),
            size: None,
            origin: Some([1.0, 2.0, 3.0]),
            allow_non_finite: false,
            format: Format::Text,
        }
    }

    fn config(output_dir: Option<&str>) -> TerrameshConfig {
        TerrameshConfig {
            output_dir: output_dir.map(PathBuf::from),
            allow_non_finite: true,
            default_size: Vec3::new(10.0, 2.0, 10.0),
        }
    }

    #[test]
    fn flag_output_beats_config() {
        let options = resolve_options(&args(Some("cli/out")), &config(Some("cfg/out"))).unwrap();
        assert_eq!(options.output_dir, PathBuf::from("cli/out"));
        assert!(options.allow_non_finite);
        assert_eq!(options.defaults.size, Vec3::new(10.0, 2.0, 10.0));
        assert_eq!(options.defaults.origin, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn config_output_is_fallback() {
        let options = resolve_options(&args(None), &config(Some("cfg/out"))).unwrap();
        assert_eq!(options.output_dir, PathBuf::from("cfg/out"));
    }

    #[test]
    fn json_report_carries_prefixed_hash() {
        let dir = std::env::temp_dir().join(format!("terramesh_cli_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let descriptor = dir.join("flat.toml");
        std::fs::write(
            &descriptor,
            "[terrain]\nresolution = [2, 2]\nheights = [0.0, 0.0, 0.0, 0.0]\n",
        )
        .unwrap();

        let options = ExportOptions {
            output_dir: dir.clone(),
            allow_non_finite: false,
            defaults: SourceDefaults::default(),
        };
        let sources = collect_sources(&[descriptor]).unwrap();
        let report = export_batch(&sources, &options);
        let json = serde_json::to_value(&report).unwrap();

        let entry = &json["entries"][0];
        assert_eq!(entry["name"], "flat");
        assert_eq!(entry["exported"]["triangles"], 2);
        assert!(entry["exported"]["body_hash"]
            .as_str()
            .unwrap()
            .starts_with("sha256:"));
        assert!(entry.get("error").is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_output_is_an_error() {
        let err = resolve_options(&args(None), &config(None)).unwrap_err();
        assert!(err.to_string().contains("No output directory set"));
    }
}
