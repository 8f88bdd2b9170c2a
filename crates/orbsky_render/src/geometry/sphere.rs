//! UV sphere generation
//!
//! Vertices are laid out in `height_segments + 1` rings of
//! `width_segments + 1` vertices; the seam column is duplicated so UVs can
//! run from 0 to 1. Triangles wind counter-clockwise seen from outside.
//! The quads touching a pole collapse to a single triangle.

use std::f32::consts::PI;

use orbsky_core::SphereGeometryDesc;

use crate::pipeline::MeshVertex;

/// Indexed triangle mesh of a sphere centred at the origin
#[derive(Debug, Clone)]
pub struct SphereGeometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl SphereGeometry {
    /// Build a full sphere
    ///
    /// Segment counts are clamped to `3..=MAX_SEGMENTS` around and
    /// `2..=MAX_SEGMENTS` from pole to pole.
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.clamp(3, SphereGeometryDesc::MAX_SEGMENTS);
        let height_segments = height_segments.clamp(2, SphereGeometryDesc::MAX_SEGMENTS);

        let mut vertices =
            Vec::with_capacity((width_segments as usize + 1) * (height_segments as usize + 1));
        let mut grid: Vec<Vec<u32>> = Vec::with_capacity(height_segments as usize + 1);

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let theta = v * PI;
            let mut row = Vec::with_capacity(width_segments as usize + 1);

            // Nudge pole UVs to the middle of their triangle
            let u_offset = if iy == 0 {
                0.5 / width_segments as f32
            } else if iy == height_segments {
                -0.5 / width_segments as f32
            } else {
                0.0
            };

            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * PI * 2.0;

                let normal = [
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                ];
                row.push(vertices.len() as u32);
                vertices.push(MeshVertex {
                    position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                    normal,
                    uv: [u + u_offset, 1.0 - v],
                });
            }
            grid.push(row);
        }

        let mut indices = Vec::new();
        for iy in 0..height_segments as usize {
            for ix in 0..width_segments as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments as usize - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { vertices, indices }
    }

    /// Build from a scene description
    pub fn from_desc(desc: &SphereGeometryDesc) -> Self {
        Self::new(desc.radius, desc.width_segments, desc.height_segments)
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[test]
    fn test_counts_match_segment_layout() {
        let sphere = SphereGeometry::new(15.0, 32, 16);
        assert_eq!(sphere.vertex_count(), 33 * 17);
        // Pole rows contribute one triangle per quad
        assert_eq!(sphere.triangle_count(), 32 * 15 * 2);

        let sky = SphereGeometry::new(4000.0, 32, 15);
        assert_eq!(sky.vertex_count(), 33 * 16);
        assert_eq!(sky.triangle_count(), 32 * 14 * 2);
    }

    #[test]
    fn test_vertices_on_surface() {
        let sphere = SphereGeometry::new(15.0, 32, 16);
        for v in &sphere.vertices {
            let r = dot(v.position, v.position).sqrt();
            assert!((r - 15.0).abs() < 1e-3, "radius {}", r);
            let n = dot(v.normal, v.normal).sqrt();
            assert!((n - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_poles() {
        let sphere = SphereGeometry::new(2.0, 8, 4);
        assert!((sphere.vertices[0].position[1] - 2.0).abs() < 1e-6);
        let last = sphere.vertices.last().unwrap();
        assert!((last.position[1] + 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_indices_in_range() {
        let sphere = SphereGeometry::new(1.0, 12, 6);
        let count = sphere.vertex_count() as u32;
        assert!(sphere.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_triangles_face_outward() {
        let sphere = SphereGeometry::new(1.0, 16, 8);
        for tri in sphere.indices.chunks(3) {
            let p0 = sphere.vertices[tri[0] as usize].position;
            let p1 = sphere.vertices[tri[1] as usize].position;
            let p2 = sphere.vertices[tri[2] as usize].position;
            let normal = cross(sub(p1, p0), sub(p2, p0));
            let centroid = [
                (p0[0] + p1[0] + p2[0]) / 3.0,
                (p0[1] + p1[1] + p2[1]) / 3.0,
                (p0[2] + p1[2] + p2[2]) / 3.0,
            ];
            assert!(dot(normal, centroid) > 0.0, "inward triangle {:?}", tri);
        }
    }

    #[test]
    fn test_degenerate_segments_clamped() {
        let sphere = SphereGeometry::new(1.0, 0, 0);
        assert_eq!(sphere.vertex_count(), 4 * 3);
        assert!(sphere.triangle_count() > 0);
    }

    #[test]
    fn test_huge_segments_clamped() {
        let max = SphereGeometryDesc::MAX_SEGMENTS as usize;
        let sphere = SphereGeometry::new(1.0, 70_000, 2);
        assert_eq!(sphere.vertex_count(), (max + 1) * 3);
        assert_eq!(sphere.triangle_count(), max * 2);
    }

    #[test]
    fn test_from_desc() {
        let desc = SphereGeometryDesc::new(4000.0, 32, 15);
        let sky = SphereGeometry::from_desc(&desc);
        assert!((sky.vertices[0].position[1] - 4000.0).abs() < 1e-2);
    }
}
