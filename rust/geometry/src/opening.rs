// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door and window markers

use crate::compose::PlacementContext;
use crate::config::{Palette, Rgba};
use crate::cuboid::{corners_drawable, OrientedBox};
use crate::primitives::{LineSet, Mesh};
use crate::warning::OverlayWarning;
use nalgebra::{Point3, Vector3};
use roomfit_core::{ElementPose, Opening, OpeningKind};
use serde::Serialize;

/// One door or window drawn in model space at nominal size
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningOverlay {
    pub kind: OpeningKind,
    /// Index within its kind's list in the scan metadata
    pub index: usize,
    pub pose: ElementPose,
    pub half_extents: Vector3<f64>,
    pub corners: [Point3<f64>; 8],
    /// Translucent volumetric marker
    pub solid: Mesh,
    pub outline: LineSet,
    pub color: Rgba,
    pub visible: bool,
}

impl OpeningOverlay {
    pub fn min_y(&self) -> f64 {
        self.corners
            .iter()
            .map(|c| c.y)
            .fold(f64::INFINITY, f64::min)
    }
}

/// Build the marker for one validated opening
///
/// Openings have no measured size; the nominal dimensions of their kind are
/// scaled exactly like a wall. No dimension label is produced.
pub fn build_opening(
    opening: &Opening,
    index: usize,
    ctx: &PlacementContext,
    palette: &Palette,
) -> Result<OpeningOverlay, OverlayWarning> {
    let pose = ctx.compose(&opening.pose);
    let half_extents = ctx.half_extents(&opening.kind.nominal_dimensions());
    let cuboid = OrientedBox::new(pose, half_extents);

    let corners = cuboid.corners();
    if !corners_drawable(&corners) {
        return Err(OverlayWarning::NonFiniteGeometry {
            element: format!("{} #{}", opening.kind, index),
        });
    }

    let color = match opening.kind {
        OpeningKind::Door => palette.door,
        OpeningKind::Window => palette.window,
    };

    Ok(OpeningOverlay {
        kind: opening.kind,
        index,
        pose,
        half_extents,
        corners,
        solid: cuboid.solid(),
        outline: cuboid.wireframe(),
        color,
        visible: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use approx::assert_relative_eq;
    use roomfit_core::PoseTransform;

    fn context() -> PlacementContext {
        PlacementContext {
            horizontal_scale: 2.0,
            vertical_scale: 4.0,
            model_floor_y: 1.0,
            scan_floor_y: -1.0,
            offset_x: 0.5,
            offset_z: 0.5,
        }
    }

    #[test]
    fn test_door_uses_nominal_size() {
        let door = Opening {
            kind: OpeningKind::Door,
            pose: PoseTransform::from_translation(0.0, 0.0, 0.0),
        };
        let overlay = build_opening(&door, 3, &context(), &Theme::Light.palette()).unwrap();

        assert_eq!(overlay.index, 3);
        assert_relative_eq!(overlay.half_extents.x, 0.9 * 2.0 / 2.0);
        assert_relative_eq!(overlay.half_extents.y, 2.0 * 4.0 / 2.0);
        assert_relative_eq!(overlay.half_extents.z, 0.1 * 2.0 / 2.0);
        assert_eq!(overlay.solid.triangle_count(), 12);
        assert_eq!(overlay.outline.segment_count(), 12);
        assert_eq!(overlay.color, Theme::Light.palette().door);
    }

    #[test]
    fn test_window_floor_relative_placement() {
        let ctx = context();
        let window = Opening {
            kind: OpeningKind::Window,
            pose: PoseTransform::from_translation(1.0, 0.5, 1.0),
        };
        let overlay = build_opening(&window, 0, &ctx, &Theme::Dark.palette()).unwrap();

        assert_relative_eq!(overlay.pose.position.x, 2.5);
        assert_relative_eq!(overlay.pose.position.z, 2.5);
        let center_y = ctx.model_floor_y + (0.5 - ctx.scan_floor_y) * ctx.vertical_scale;
        let expected = center_y - 1.5 * 4.0 / 2.0;
        assert_relative_eq!(overlay.min_y(), expected, epsilon = 1e-12);
        assert_eq!(overlay.color, Theme::Dark.palette().window);
    }
}
