//! Heightfield export, single and batched

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use terramesh_core::{Result, TerrameshError};

use crate::heightfield::Heightfield;
use crate::mesh::TerrainMesh;
use crate::obj::{export_obj, ExportedMesh};
use crate::source::{SourceDefaults, TerrainSource};

/// Settings shared by every export in a batch
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Existing directory receiving `<name>.obj` files
    pub output_dir: PathBuf,
    /// Skip the finite-elevation check and let NaN/inf reach the file
    pub allow_non_finite: bool,
    pub defaults: SourceDefaults,
}

/// Convert one heightfield to a mesh and write it to `<output_dir>/<name>.obj`.
///
/// Resolution problems were already rejected when the heightfield was built;
/// non-finite samples are rejected here unless `allow_non_finite` is set.
pub fn export_heightfield(
    heightfield: &Heightfield,
    output_dir: &Path,
    allow_non_finite: bool,
) -> Result<ExportedMesh> {
    if !allow_non_finite {
        heightfield.validate_finite()?;
    }
    let mesh = TerrainMesh::from_heightfield(heightfield);
    export_obj(&mesh, &heightfield.name, output_dir)
}

/// Outcome of exporting one source
#[derive(Debug, Clone, Serialize)]
pub struct ExportEntry {
    pub source: PathBuf,
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported: Option<ExportedMesh>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-source results of a batch export
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportReport {
    pub entries: Vec<ExportEntry>,
}

impl ExportReport {
    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.exported.is_some()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|e| e.error.is_some()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "{} of {} terrain(s) exported, {} failed",
            self.succeeded(),
            self.entries.len(),
            self.failed()
        )
    }
}

/// Export every source in order, one finished file before the next starts.
///
/// A failing source is recorded in the report and does not stop the batch.
/// Two sources with the same name would write the same file, so the later
/// one fails with `DuplicateTerrainName`.
pub fn export_batch(sources: &[TerrainSource], options: &ExportOptions) -> ExportReport {
    let mut report = ExportReport::default();
    let mut names = HashSet::new();

    for source in sources {
        let mut entry = ExportEntry {
            source: source.path().to_path_buf(),
            name: None,
            exported: None,
            error: None,
        };

        let result = source.load(&options.defaults).and_then(|hf| {
            entry.name = Some(hf.name.clone());
            if !names.insert(hf.name.clone()) {
                return Err(TerrameshError::DuplicateTerrainName(hf.name.clone()));
            }
            export_heightfield(&hf, &options.output_dir, options.allow_non_finite)
        });

        match result {
            Ok(exported) => entry.exported = Some(exported),
            Err(e) => {
                log::warn!("Skipping {}: {}", source.path().display(), e);
                entry.error = Some(e.to_string());
            }
        }

        report.entries.push(entry);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use terramesh_core::Vec3;

    fn temp_dir() -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("terramesh_export_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_descriptor(dir: &Path, file: &str, body: &str) -> TerrainSource {
        let path = dir.join(file);
        fs::write(&path, body).unwrap();
        TerrainSource::Descriptor(path)
    }

    fn options(output_dir: PathBuf) -> ExportOptions {
        ExportOptions {
            output_dir,
            allow_non_finite: false,
            defaults: SourceDefaults::default(),
        }
    }

    #[test]
    fn export_heightfield_rejects_nan_unless_allowed() {
        let dir = temp_dir();
        let hf = Heightfield::new(
            "spiky",
            2,
            2,
            vec![0.0, f32::NAN, 0.0, 0.0],
            Vec3::ONE,
            Vec3::ZERO,
        )
        .unwrap();

        let err = export_heightfield(&hf, &dir, false).unwrap_err();
        assert!(matches!(err, TerrameshError::NonFiniteElevation { x: 1, y: 0, .. }));
        assert!(!dir.join("spiky.obj").exists());

        let exported = export_heightfield(&hf, &dir, true).unwrap();
        let text = fs::read_to_string(&exported.path).unwrap();
        assert!(text.contains("NaN"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn batch_continues_past_failures() {
        let src = temp_dir();
        let out = temp_dir();

        let sources = vec![
            write_descriptor(
                &src,
                "good.toml",
                "[terrain]\nresolution = [3, 3]\nheights = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8]\n",
            ),
            write_descriptor(&src, "bad.toml", "[terrain]\nresolution = [1, 1]\nheights = [0.0]\n"),
            write_descriptor(
                &src,
                "nan.toml",
                "[terrain]\nresolution = [2, 2]\nheights = [0.0, nan, 0.0, 0.0]\n",
            ),
            write_descriptor(
                &src,
                "also_good.toml",
                "[terrain]\nresolution = [2, 2]\nheights = [0.0, 0.0, 0.0, 0.0]\n",
            ),
        ];

        let report = export_batch(&sources, &options(out.clone()));

        assert_eq!(report.entries.len(), 4);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 2);
        assert!(!report.is_success());
        assert_eq!(report.summary(), "2 of 4 terrain(s) exported, 2 failed");

        let good = report.entries[0].exported.as_ref().unwrap();
        assert_eq!(good.path, out.join("good.obj"));
        assert_eq!(good.vertices, 9);
        assert_eq!(good.triangles, 8);
        assert!(report.entries[1].error.as_ref().unwrap().contains("Insufficient resolution"));
        assert!(report.entries[2].error.as_ref().unwrap().contains("Non-finite"));
        assert!(out.join("also_good.obj").exists());
        assert!(!out.join("bad.obj").exists());

        fs::remove_dir_all(&src).ok();
        fs::remove_dir_all(&out).ok();
    }

    #[test]
    fn duplicate_names_do_not_overwrite() {
        let src = temp_dir();
        let out = temp_dir();
        let body = "[terrain]\nname = \"twin\"\nresolution = [2, 2]\nheights = [0.0, 0.0, 0.0, 0.0]\n";

        let sources = vec![
            write_descriptor(&src, "one.toml", body),
            write_descriptor(&src, "two.toml", body),
        ];
        let report = export_batch(&sources, &options(out.clone()));

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.entries[1].name.as_deref(), Some("twin"));
        assert!(report.entries[1].error.as_ref().unwrap().contains("Duplicate terrain name"));

        fs::remove_dir_all(&src).ok();
        fs::remove_dir_all(&out).ok();
    }

    #[test]
    fn missing_output_dir_fails_each_entry() {
        let src = temp_dir();
        let out = std::env::temp_dir().join(format!("terramesh_absent_{}", uuid::Uuid::new_v4()));
        let sources = vec![write_descriptor(
            &src,
            "flat.toml",
            "[terrain]\nresolution = [2, 2]\nheights = [0.0, 0.0, 0.0, 0.0]\n",
        )];

        let report = export_batch(&sources, &options(out.clone()));
        assert_eq!(report.failed(), 1);
        assert!(report.entries[0].error.as_ref().unwrap().starts_with("IO error"));
        assert!(!out.exists());

        fs::remove_dir_all(&src).ok();
    }
}
