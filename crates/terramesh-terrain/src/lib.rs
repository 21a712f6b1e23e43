//! Terramesh Terrain - Heightfield to OBJ conversion
//!
//! Samples a heightfield grid into world-space vertices, triangulates it with
//! a fixed winding, averages face normals per vertex and writes the result as
//! a Wavefront OBJ file. Exports are synchronous and run one after another.

pub mod export;
pub mod heightfield;
pub mod mesh;
pub mod normals;
pub mod obj;
pub mod source;

pub use export::{export_batch, export_heightfield, ExportEntry, ExportOptions, ExportReport};
pub use heightfield::Heightfield;
pub use mesh::{triangulate, TerrainMesh};
pub use normals::{accumulate_normals, face_normal};
pub use obj::{export_obj, write_obj, write_obj_body, ExportedMesh};
pub use source::{collect_sources, load_descriptor, SourceDefaults, TerrainSource};
