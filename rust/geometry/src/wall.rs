// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall wireframes, areas and labels

use crate::compose::PlacementContext;
use crate::config::{Palette, Rgba};
use crate::cuboid::{corners_drawable, OrientedBox};
use crate::label::DimensionLabel;
use crate::primitives::LineSet;
use crate::warning::OverlayWarning;
use nalgebra::{Point3, Vector3};
use roomfit_core::{ElementPose, WallSegment};
use serde::Serialize;

/// One wall drawn in model space
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallOverlay {
    pub identifier: String,
    /// Model-space center and orientation
    pub pose: ElementPose,
    /// Scaled half extents (width, height, depth)
    pub half_extents: Vector3<f64>,
    /// Bottom ring then top ring
    pub corners: [Point3<f64>; 8],
    /// 8 vertices, 12 edges
    pub wireframe: LineSet,
    /// Unscaled width x height
    pub surface_area: f64,
    pub color: Rgba,
    pub visible: bool,
}

impl WallOverlay {
    /// Emitted thickness in model units
    pub fn thickness(&self) -> f64 {
        (self.corners[3] - self.corners[0]).norm()
    }

    /// Lowest corner height
    pub fn min_y(&self) -> f64 {
        self.corners
            .iter()
            .map(|c| c.y)
            .fold(f64::INFINITY, f64::min)
    }
}

/// Build the overlay and dimension label for one validated wall
///
/// Area is always the unscaled `width * height`, independent of the placement
/// scale. Fails only when the transformed corners are not finite in the f32
/// buffers handed to the renderer.
pub fn build_wall(
    segment: &WallSegment,
    ctx: &PlacementContext,
    palette: &Palette,
    label_precision: usize,
) -> Result<(WallOverlay, DimensionLabel), OverlayWarning> {
    let pose = ctx.compose(&segment.pose);
    let half_extents = ctx.half_extents(&segment.dimensions);
    let cuboid = OrientedBox::new(pose, half_extents);

    let corners = cuboid.corners();
    if !corners_drawable(&corners) {
        return Err(OverlayWarning::NonFiniteGeometry {
            element: format!("wall '{}'", segment.identifier),
        });
    }

    let dims = &segment.dimensions;
    let label = DimensionLabel::new(
        &segment.identifier,
        dims.width,
        dims.height,
        &pose,
        palette,
        label_precision,
    );

    let overlay = WallOverlay {
        identifier: segment.identifier.clone(),
        pose,
        half_extents,
        corners,
        wireframe: cuboid.wireframe(),
        surface_area: dims.surface_area(),
        color: palette.wall_line,
        visible: true,
    };

    Ok((overlay, label))
}
