// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-element scan-to-model transform

use crate::alignment::HorizontalAlignment;
use crate::resolve::ResolvedScale;
use nalgebra::{Point3, Vector3};
use roomfit_core::{ElementPose, PoseTransform, WallDimensions};

/// Resolver outputs needed to place one element, computed once per build
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementContext {
    pub horizontal_scale: f64,
    pub vertical_scale: f64,
    pub model_floor_y: f64,
    pub scan_floor_y: f64,
    pub offset_x: f64,
    pub offset_z: f64,
}

impl PlacementContext {
    pub fn new(scale: &ResolvedScale, alignment: &HorizontalAlignment) -> Self {
        Self {
            horizontal_scale: scale.horizontal_scale,
            vertical_scale: scale.vertical_scale,
            model_floor_y: scale.model_floor_y,
            scan_floor_y: scale.scan_floor_y,
            offset_x: alignment.offset.x,
            offset_z: alignment.offset.z,
        }
    }

    /// Map a scan pose into model space
    ///
    /// X/Z are scaled then shifted by the shared offset. Y is taken relative
    /// to the scan floor, scaled, and re-based on the model floor. Rotation
    /// passes through unchanged since both frames share a convention.
    pub fn compose(&self, pose: &PoseTransform) -> ElementPose {
        let source = pose.decompose();
        let p = source.position;

        let scaled_x = p.x * self.horizontal_scale;
        let scaled_z = p.z * self.horizontal_scale;
        let floor_relative_y = (p.y - self.scan_floor_y) * self.vertical_scale;

        ElementPose::new(
            Point3::new(
                scaled_x + self.offset_x,
                self.model_floor_y + floor_relative_y,
                scaled_z + self.offset_z,
            ),
            source.rotation,
        )
    }

    /// Scaled half extents (width, height, depth) with the thickness floor applied
    pub fn half_extents(&self, dimensions: &WallDimensions) -> Vector3<f64> {
        Vector3::new(
            dimensions.width * self.horizontal_scale / 2.0,
            dimensions.height * self.vertical_scale / 2.0,
            dimensions.effective_depth() * self.horizontal_scale / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;

    fn context() -> PlacementContext {
        PlacementContext {
            horizontal_scale: 11.3,
            vertical_scale: 11.1,
            model_floor_y: -1.5,
            scan_floor_y: -0.2,
            offset_x: 4.0,
            offset_z: -6.0,
        }
    }

    #[test]
    fn test_compose_position() {
        let pose = PoseTransform::from_translation(1.0, 1.05, 2.0);
        let placed = context().compose(&pose);

        assert_relative_eq!(placed.position.x, 11.3 + 4.0);
        assert_relative_eq!(placed.position.y, -1.5 + 1.25 * 11.1, epsilon = 1e-12);
        assert_relative_eq!(placed.position.z, 22.6 - 6.0);
    }

    #[test]
    fn test_compose_passes_rotation_through() {
        let rotation = UnitQuaternion::from_euler_angles(0.0, 0.7, 0.0);
        let pose = PoseTransform::from_pose(Point3::new(0.0, 0.0, 0.0), rotation);
        let placed = context().compose(&pose);
        assert_relative_eq!(placed.rotation.angle_to(&rotation), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_half_extents_apply_depth_floor() {
        let ctx = context();
        let half = ctx.half_extents(&WallDimensions::new(4.0, 2.5, 0.0));
        assert_relative_eq!(half.x, 4.0 * 11.3 / 2.0);
        assert_relative_eq!(half.y, 2.5 * 11.1 / 2.0);
        assert_relative_eq!(half.z * 2.0, 0.1 * 11.3, epsilon = 1e-12);
    }
}
