//! Heightfield storage and grid-to-world sampling

use std::path::Path;

use terramesh_core::{Result, TerrameshError, Vec2, Vec3};

/// A rectangular grid of elevation samples with world-space scale and origin
#[derive(Clone, Debug)]
pub struct Heightfield {
    /// Identifier used as the exported file stem
    pub name: String,
    /// Row-major elevation samples, `heights[y * width + x]`
    heights: Vec<f32>,
    /// Samples along the grid's X axis
    pub width: u32,
    /// Samples along the grid's Y axis
    pub depth: u32,
    /// World extent (sx, sy, sz); elevation is multiplied by `size.y`
    pub size: Vec3,
    /// World-space position of the terrain origin
    pub origin: Vec3,
}

impl Heightfield {
    /// Build a heightfield from raw row-major samples.
    ///
    /// Fails before allocating anything else if the grid is smaller than
    /// 2x2, if its vertex count cannot be indexed with `u32`, or if the
    /// sample count does not match `width * depth`.
    pub fn new(
        name: impl Into<String>,
        width: u32,
        depth: u32,
        heights: Vec<f32>,
        size: Vec3,
        origin: Vec3,
    ) -> Result<Self> {
        if width < 2 || depth < 2 {
            return Err(TerrameshError::InsufficientResolution {
                width,
                height: depth,
            });
        }

        let vertex_count = width as u64 * depth as u64;
        if vertex_count > u32::MAX as u64 {
            return Err(TerrameshError::ResolutionTooLarge {
                width,
                height: depth,
            });
        }

        if heights.len() as u64 != vertex_count {
            return Err(TerrameshError::SampleCountMismatch {
                expected: vertex_count as usize,
                got: heights.len(),
            });
        }

        Ok(Self {
            name: name.into(),
            heights,
            width,
            depth,
            size,
            origin,
        })
    }

    /// Load a heightfield from a grayscale image file.
    /// Pixel values are normalized to [0..1] regardless of bit depth, and the
    /// heightfield is named after the file stem.
    pub fn from_png(path: &Path, size: Vec3, origin: Vec3) -> Result<Self> {
        let img = image::open(path).map_err(|e| {
            TerrameshError::Heightmap(format!(
                "Failed to load heightmap '{}': {}",
                path.display(),
                e
            ))
        })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "terrain".to_string());

        Self::from_image(name, img, size, origin)
    }

    /// Build a heightfield from an already decoded image
    pub fn from_image(
        name: impl Into<String>,
        img: image::DynamicImage,
        size: Vec3,
        origin: Vec3,
    ) -> Result<Self> {
        let gray = img.into_luma16();
        let width = gray.width();
        let depth = gray.height();

        let heights: Vec<f32> = gray
            .pixels()
            .map(|p| p.0[0] as f32 / 65535.0)
            .collect();

        Self::new(name, width, depth, heights, size, origin)
    }

    /// Raw elevation sample at grid coordinates
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= depth`.
    pub fn elevation(&self, x: u32, y: u32) -> f32 {
        self.heights[self.index(x, y)]
    }

    /// Flat row-major vertex index of a grid coordinate
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= depth`.
    pub fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.depth,
            "grid coordinate ({}, {}) outside {}x{} heightfield",
            x,
            y,
            self.width,
            self.depth
        );
        (y * self.width + x) as usize
    }

    /// Normalized grid coordinates, used unrotated as the vertex UV
    pub fn uv(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(
            x as f32 / (self.width - 1) as f32,
            y as f32 / (self.depth - 1) as f32,
        )
    }

    /// World-space position of a grid vertex.
    ///
    /// The local position is turned 90 degrees about Y
    /// (`x' = -z`, `z' = x`) and offset by the origin with its X and Z
    /// swapped, `(-origin.z, origin.y, origin.x)`. Exported files depend on
    /// this exact convention.
    pub fn world_position(&self, x: u32, y: u32) -> Vec3 {
        let uv = self.uv(x, y);
        let local_x = uv.x * self.size.x;
        let local_y = self.elevation(x, y) * self.size.y;
        let local_z = uv.y * self.size.z;

        let rotated = Vec3::new(-local_z, local_y, local_x);
        let offset = Vec3::new(-self.origin.z, self.origin.y, self.origin.x);
        rotated + offset
    }

    /// Reject NaN or infinite samples, reporting the first offender
    pub fn validate_finite(&self) -> Result<()> {
        match self.heights.iter().position(|h| !h.is_finite()) {
            Some(i) => {
                let i = i as u32;
                Err(TerrameshError::NonFiniteElevation {
                    x: i % self.width,
                    y: i / self.width,
                    value: self.heights[i as usize],
                })
            }
            None => Ok(()),
        }
    }

    /// Smallest and largest finite samples, or `None` if there are none
    pub fn elevation_range(&self) -> Option<(f32, f32)> {
        self.heights
            .iter()
            .copied()
            .filter(|h| h.is_finite())
            .fold(None, |acc, h| match acc {
                None => Some((h, h)),
                Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
            })
    }

    /// Number of vertices the derived mesh will have
    pub fn vertex_count(&self) -> usize {
        self.heights.len()
    }

    /// Number of triangles the derived mesh will have
    pub fn triangle_count(&self) -> usize {
        (self.width as usize - 1) * (self.depth as usize - 1) * 2
    }
}
