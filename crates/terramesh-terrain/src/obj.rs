//! Wavefront OBJ serialization

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use terramesh_core::{ContentHash, HashingWriter, Result};

use crate::mesh::TerrainMesh;

const HEADER_TEXT: &str = "Terramesh terrain OBJ file";

/// Summary of one mesh written to disk
#[derive(Debug, Clone, Serialize)]
pub struct ExportedMesh {
    pub path: PathBuf,
    pub vertices: usize,
    pub triangles: usize,
    /// Hash of everything after the two header lines
    pub body_hash: ContentHash,
}

/// Write the vertex, normal, UV and face blocks.
///
/// Face indices are 1-based and repeated for the position, UV and normal
/// slots since all three share one per-vertex array.
pub fn write_obj_body<W: Write>(mesh: &TerrainMesh, writer: &mut W) -> std::io::Result<()> {
    for v in &mesh.positions {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for n in &mesh.normals {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for uv in &mesh.uvs {
        writeln!(writer, "vt {} {}", uv.x, uv.y)?;
    }
    for [a, b, c] in &mesh.triangles {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    Ok(())
}

/// Write the two-line comment header followed by the mesh body
pub fn write_obj<W: Write>(
    mesh: &TerrainMesh,
    writer: &mut W,
    timestamp: &str,
) -> std::io::Result<ContentHash> {
    writeln!(writer, "# {}", HEADER_TEXT)?;
    writeln!(writer, "# File created at {}", timestamp)?;

    let mut hashing = HashingWriter::new(writer);
    write_obj_body(mesh, &mut hashing)?;
    let (_, hash) = hashing.finish();
    Ok(hash)
}

/// Write `mesh` to `<dir>/<name>.obj`.
///
/// The directory must already exist; a missing or read-only destination is
/// reported as an IO error and nothing is retried.
pub fn export_obj(mesh: &TerrainMesh, name: &str, dir: &Path) -> Result<ExportedMesh> {
    let path = dir.join(format!("{}.obj", name));
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);

    let body_hash = write_obj(mesh, &mut writer, &timestamp())?;
    writer.flush()?;

    log::info!("Saved {} as OBJ to {}", name, path.display());

    Ok(ExportedMesh {
        path,
        vertices: mesh.vertex_count(),
        triangles: mesh.triangle_count(),
        body_hash,
    })
}

fn timestamp() -> String {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => format!("{} (seconds since Unix epoch)", d.as_secs()),
        Err(_) => "unknown time".to_string(),
    }
}
