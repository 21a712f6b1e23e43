//! Per-vertex normal accumulation

use terramesh_core::Vec3;

/// Face normal of a triangle, already carried into the exported frame.
///
/// The unit cross product `(p1 - p0) x (p2 - p0)` is mapped through
/// `(x, y, z) -> (-z, y, -x)`. This is not the same mapping as the vertex
/// position rotation; both are fixed conventions of the output format.
/// Degenerate triangles yield `Vec3::ZERO`.
pub fn face_normal(p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    let n = (p1 - p0).cross(&(p2 - p0)).normalized();
    Vec3::new(-n.z, n.y, -n.x)
}

/// Average the face normals incident to each vertex.
///
/// Vertices that no triangle references keep a zero normal.
pub fn accumulate_normals(positions: &[Vec3], triangles: &[[u32; 3]]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    let mut face_counts = vec![0u32; positions.len()];

    for &[a, b, c] in triangles {
        let (a, b, c) = (a as usize, b as usize, c as usize);
        let normal = face_normal(positions[a], positions[b], positions[c]);

        for v in [a, b, c] {
            normals[v] += normal;
            face_counts[v] += 1;
        }
    }

    for (normal, &count) in normals.iter_mut().zip(&face_counts) {
        if count > 0 {
            *normal = (*normal / count as f32).normalized();
        }
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upward_face_stays_upward() {
        // Winding of the first triangle of a flat 2x2 terrain
        let n = face_normal(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        assert_eq!(n, Vec3::UP);
    }

    #[test]
    fn sloped_face_uses_mirrored_rotation() {
        // Raw unit normal is (0, 1, 1)/sqrt(2); the mapping sends z to -x
        let n = face_normal(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
        let s = std::f32::consts::FRAC_1_SQRT_2;
        assert!((n.x + s).abs() < 1e-6);
        assert!((n.y - s).abs() < 1e-6);
        assert!(n.z.abs() < 1e-6);
    }

    #[test]
    fn degenerate_face_is_zero_not_nan() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let n = face_normal(p, p, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(n, Vec3::ZERO);
        assert!(n.is_finite());
    }

    #[test]
    fn unreferenced_vertex_keeps_zero_normal() {
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(5.0, 5.0, 5.0),
        ];
        let normals = accumulate_normals(&positions, &[[0, 1, 2]]);

        assert_eq!(normals.len(), 4);
        assert_eq!(normals[0], Vec3::UP);
        assert_eq!(normals[3], Vec3::ZERO);
    }

    #[test]
    fn shared_vertex_averages_faces() {
        // Two faces meeting at vertex 0: one flat, one tilted
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, -1.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        ];
        let normals = accumulate_normals(&positions, &[[0, 1, 2], [0, 3, 4]]);

        let n = normals[0];
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!(n.x < 0.0);
        assert!(n.y > n.x.abs());
        assert!(n.z.abs() < 1e-6);
    }
}
