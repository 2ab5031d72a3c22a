// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Oriented boxes shared by the wall and opening builders

use crate::primitives::{LineSet, Mesh};
use nalgebra::{Point3, Vector3};
use roomfit_core::ElementPose;

/// Corner order: bottom ring then top ring, both counter-clockwise seen from above
const LOCAL_CORNERS: [(f64, f64, f64); 8] = [
    (-1.0, -1.0, -1.0),
    (1.0, -1.0, -1.0),
    (1.0, -1.0, 1.0),
    (-1.0, -1.0, 1.0),
    (-1.0, 1.0, -1.0),
    (1.0, 1.0, -1.0),
    (1.0, 1.0, 1.0),
    (-1.0, 1.0, 1.0),
];

/// Bottom perimeter, top perimeter, verticals
pub const BOX_EDGES: [(u32, u32); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Faces as corner quads (outward winding) with their local normal
const BOX_FACES: [([usize; 4], (f64, f64, f64)); 6] = [
    ([0, 1, 2, 3], (0.0, -1.0, 0.0)),
    ([4, 7, 6, 5], (0.0, 1.0, 0.0)),
    ([0, 4, 5, 1], (0.0, 0.0, -1.0)),
    ([3, 2, 6, 7], (0.0, 0.0, 1.0)),
    ([0, 3, 7, 4], (-1.0, 0.0, 0.0)),
    ([1, 5, 6, 2], (1.0, 0.0, 0.0)),
];

/// Box with half extents along the local axes of a pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    pub pose: ElementPose,
    pub half_extents: Vector3<f64>,
}

impl OrientedBox {
    pub fn new(pose: ElementPose, half_extents: Vector3<f64>) -> Self {
        Self { pose, half_extents }
    }

    /// The 8 corners in `LOCAL_CORNERS` order
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let h = &self.half_extents;
        LOCAL_CORNERS.map(|(sx, sy, sz)| {
            self.pose
                .transform_point(&Point3::new(sx * h.x, sy * h.y, sz * h.z))
        })
    }

    /// 8 vertices, 12 edges
    pub fn wireframe(&self) -> LineSet {
        let mut lines = LineSet::with_capacity(8, BOX_EDGES.len());
        for corner in self.corners() {
            lines.add_vertex(corner);
        }
        for (a, b) in BOX_EDGES {
            lines.add_segment(a, b);
        }
        lines
    }

    /// Flat-shaded solid: 24 vertices, 12 triangles
    pub fn solid(&self) -> Mesh {
        let corners = self.corners();
        let mut mesh = Mesh::with_capacity(24, 36);
        for (quad, (nx, ny, nz)) in BOX_FACES {
            let normal = self.pose.rotation * Vector3::new(nx, ny, nz);
            let base = mesh.vertex_count() as u32;
            for index in quad {
                mesh.add_vertex(corners[index], normal);
            }
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        }
        mesh
    }
}

/// True when every corner coordinate stays finite once narrowed to `f32`
pub fn corners_drawable(corners: &[Point3<f64>]) -> bool {
    corners
        .iter()
        .all(|c| c.iter().all(|v| v.is_finite() && v.abs() <= f32::MAX as f64))
}
