//! Terrain mesh generation

use terramesh_core::{Vec2, Vec3};

use crate::heightfield::Heightfield;
use crate::normals::accumulate_normals;

/// Indexed triangle mesh derived from one heightfield
#[derive(Clone, Debug)]
pub struct TerrainMesh {
    /// Vertex positions in world space, row-major over the grid
    pub positions: Vec<Vec3>,
    /// Averaged vertex normals, parallel to `positions`
    pub normals: Vec<Vec3>,
    /// Grid UVs in [0..1], parallel to `positions`
    pub uvs: Vec<Vec2>,
    /// Triangle vertex indices, two per grid cell
    pub triangles: Vec<[u32; 3]>,
}

impl TerrainMesh {
    /// Sample every grid vertex, triangulate the grid and accumulate normals
    pub fn from_heightfield(heightfield: &Heightfield) -> Self {
        let vert_count = heightfield.vertex_count();
        let mut positions = Vec::with_capacity(vert_count);
        let mut uvs = Vec::with_capacity(vert_count);

        for y in 0..heightfield.depth {
            for x in 0..heightfield.width {
                positions.push(heightfield.world_position(x, y));
                uvs.push(heightfield.uv(x, y));
            }
        }

        let triangles = triangulate(heightfield.width, heightfield.depth);
        let normals = accumulate_normals(&positions, &triangles);

        log::debug!(
            "Built mesh '{}': {} vertices, {} triangles",
            heightfield.name,
            positions.len(),
            triangles.len()
        );

        Self {
            positions,
            normals,
            uvs,
            triangles,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Split a `width` x `depth` vertex grid into triangles.
///
/// Cells are visited row by row. Each cell with corner `i = y * width + x`
/// yields `[i, i + width, i + 1]` then `[i + width, i + width + 1, i + 1]`;
/// the winding decides which way the face normals point.
///
/// # Panics
///
/// Panics if `width * depth` vertices cannot be indexed with `u32`.
/// Sizes accepted by [`Heightfield::new`] always can.
pub fn triangulate(width: u32, depth: u32) -> Vec<[u32; 3]> {
    assert!(
        width as u64 * depth as u64 <= u32::MAX as u64,
        "{}x{} grid is too large to index with u32",
        width,
        depth
    );
    let cells = width.saturating_sub(1) as usize * depth.saturating_sub(1) as usize;
    let mut triangles = Vec::with_capacity(cells * 2);

    for y in 0..depth.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            let here = y * width + x;
            let right = here + 1;
            let below = here + width;
            let below_right = below + 1;

            triangles.push([here, below, right]);
            triangles.push([below, below_right, right]);
        }
    }

    triangles
}
