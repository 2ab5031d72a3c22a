// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drawable primitive buffers
//!
//! Buffers are flat `f32` arrays ready for upload by the rendering host.
//! Coordinates are computed in f64 and converted only when pushed, so callers
//! check the f32 range first (see `cuboid::corners_drawable`).

use nalgebra::{Point3, Vector3};
use serde::Serialize;

#[inline]
fn push_xyz(buffer: &mut Vec<f32>, x: f64, y: f64, z: f64) {
    buffer.extend_from_slice(&[x as f32, y as f32, z as f32]);
}

/// Indexed line segments (pairs of indices into `positions`)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineSet {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Segment indices (i0, i1)
    pub indices: Vec<u32>,
}

impl LineSet {
    pub fn with_capacity(vertex_count: usize, segment_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(segment_count * 2),
        }
    }

    /// Add a vertex, returning its index
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>) -> u32 {
        let index = self.vertex_count() as u32;
        push_xyz(&mut self.positions, position.x, position.y, position.z);
        index
    }

    /// Add a segment between two existing vertices
    #[inline]
    pub fn add_segment(&mut self, i0: u32, i1: u32) {
        self.indices.extend_from_slice(&[i0, i1]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }
}

/// Flat-shaded triangle mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Add a vertex with its normal, returning its index
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) -> u32 {
        let index = self.vertex_count() as u32;
        push_xyz(&mut self.positions, position.x, position.y, position.z);
        push_xyz(&mut self.normals, normal.x, normal.y, normal.z);
        index
    }

    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Unconnected points (corner markers)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PointSet {
    pub positions: Vec<f32>,
}

impl PointSet {
    pub fn with_capacity(point_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(point_count * 3),
        }
    }

    #[inline]
    pub fn add_point(&mut self, position: Point3<f64>) {
        push_xyz(&mut self.positions, position.x, position.y, position.z);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_set_indices_follow_vertices() {
        let mut lines = LineSet::with_capacity(3, 2);
        let a = lines.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = lines.add_vertex(Point3::new(1.0, 2.0, 3.0));
        let c = lines.add_vertex(Point3::new(-1.0, 0.5, 0.0));
        lines.add_segment(a, b);
        lines.add_segment(b, c);

        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(lines.vertex_count(), 3);
        assert_eq!(lines.segment_count(), 2);
        assert_eq!(lines.indices, vec![0, 1, 1, 2]);
        assert_eq!(&lines.positions[3..6], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_mesh_keeps_normals_parallel_to_positions() {
        let mut mesh = Mesh::default();
        for x in [0.0, 1.0, 0.0] {
            mesh.add_vertex(Point3::new(x, 1.0 - x, 0.0), Vector3::z());
        }
        mesh.add_triangle(0, 1, 2);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
        assert_eq!(&mesh.normals[6..9], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_point_set() {
        let mut points = PointSet::with_capacity(2);
        assert!(points.is_empty());
        points.add_point(Point3::new(1.0, 1.0, 1.0));
        points.add_point(Point3::new(2.0, 2.0, 2.0));
        assert_eq!(points.len(), 2);
        assert_eq!(points.positions[3], 2.0);
    }
}
