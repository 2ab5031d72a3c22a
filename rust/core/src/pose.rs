// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pose transforms for scanned elements
//!
//! The scan importer serializes every wall, door and window pose as a 4x4
//! column-major matrix (16 numbers, translation at indices 12..15). The
//! matrix is nominally rigid, but importers occasionally bake a scale into
//! the basis. Element size always comes from dimensions, so decomposition
//! keeps only translation and rotation.

use crate::error::{Error, Result};
use nalgebra::{
    Isometry3, Matrix3, Matrix4, Point3, Rotation3, Translation3, UnitQuaternion, Vector3,
};
use serde::{Deserialize, Serialize};

/// Basis columns shorter than this are treated as degenerate
const DEGENERATE_AXIS_EPSILON: f64 = 1e-12;

/// Validated 4x4 column-major pose matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseTransform([f64; 16]);

impl PoseTransform {
    /// Validate a loose transform array
    ///
    /// Anything other than 16 finite numbers is rejected here, so geometry
    /// code only ever sees well-formed matrices.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != 16 {
            return Err(Error::TransformLength(values.len()));
        }
        let mut elements = [0.0; 16];
        for (index, (&value, slot)) in values.iter().zip(elements.iter_mut()).enumerate() {
            if !value.is_finite() {
                return Err(Error::NonFiniteTransform { index, value });
            }
            *slot = value;
        }
        Ok(Self(elements))
    }

    /// Identity pose
    pub fn identity() -> Self {
        Self::from_matrix(&Matrix4::identity())
    }

    /// Build a pose from a position and a rotation
    pub fn from_pose(position: Point3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        let isometry = Isometry3::from_parts(Translation3::from(position.coords), rotation);
        Self::from_matrix(&isometry.to_homogeneous())
    }

    /// Pure translation
    pub fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self::from_matrix(&Matrix4::new_translation(&Vector3::new(x, y, z)))
    }

    fn from_matrix(matrix: &Matrix4<f64>) -> Self {
        let mut elements = [0.0; 16];
        elements.copy_from_slice(matrix.as_slice());
        Self(elements)
    }

    /// Raw column-major elements
    pub fn elements(&self) -> &[f64; 16] {
        &self.0
    }

    /// Translation component
    #[inline]
    pub fn translation(&self) -> Point3<f64> {
        Point3::new(self.0[12], self.0[13], self.0[14])
    }

    /// Split into position and rotation, discarding any encoded scale
    ///
    /// Basis columns are normalized before the rotation is extracted. A
    /// mirrored basis (negative determinant) is un-mirrored on X, and a basis
    /// with a zero-length column decodes to the identity rotation.
    pub fn decompose(&self) -> ElementPose {
        let e = &self.0;
        let mut x_axis = Vector3::new(e[0], e[1], e[2]);
        let y_axis = Vector3::new(e[4], e[5], e[6]);
        let z_axis = Vector3::new(e[8], e[9], e[10]);

        let (sx, sy, sz) = (x_axis.norm(), y_axis.norm(), z_axis.norm());
        if sx.min(sy).min(sz) < DEGENERATE_AXIS_EPSILON {
            return ElementPose::new(self.translation(), UnitQuaternion::identity());
        }

        let basis = Matrix3::from_columns(&[x_axis, y_axis, z_axis]);
        if basis.determinant() < 0.0 {
            x_axis = -x_axis;
        }

        let normalized = Matrix3::from_columns(&[x_axis / sx, y_axis / sy, z_axis / sz]);
        let rotation = Rotation3::from_matrix(&normalized);

        ElementPose::new(self.translation(), UnitQuaternion::from_rotation_matrix(&rotation))
    }
}

impl TryFrom<&[f64]> for PoseTransform {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self> {
        Self::from_slice(values)
    }
}

/// Position and rotation of one element in its source frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementPose {
    pub position: Point3<f64>,
    pub rotation: UnitQuaternion<f64>,
}

impl ElementPose {
    pub fn new(position: Point3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self { position, rotation }
    }

    /// Map a point from the element's local frame into its parent frame
    #[inline]
    pub fn transform_point(&self, local: &Point3<f64>) -> Point3<f64> {
        self.position + self.rotation * local.coords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn rejects_wrong_length() {
        let values = vec![0.0; 12];
        assert_eq!(PoseTransform::from_slice(&values), Err(Error::TransformLength(12)));
        assert_eq!(PoseTransform::from_slice(&[]), Err(Error::TransformLength(0)));
    }

    #[test]
    fn rejects_non_finite_component() {
        let mut values = PoseTransform::identity().elements().to_vec();
        values[13] = f64::NAN;
        match PoseTransform::from_slice(&values) {
            Err(Error::NonFiniteTransform { index, .. }) => assert_eq!(index, 13),
            other => panic!("expected NonFiniteTransform, got {:?}", other),
        }
    }

    #[test]
    fn translation_is_read_from_last_column() {
        let pose = PoseTransform::from_translation(1.5, 2.0, -3.0);
        assert_eq!(pose.elements()[12], 1.5);
        assert_eq!(pose.elements()[13], 2.0);
        assert_eq!(pose.elements()[14], -3.0);

        let decomposed = pose.decompose();
        assert_relative_eq!(decomposed.position, Point3::new(1.5, 2.0, -3.0));
        assert_relative_eq!(decomposed.rotation.angle(), 0.0);
    }

    #[test]
    fn decompose_round_trips_rotation() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        let pose = PoseTransform::from_pose(Point3::new(4.0, 1.25, 2.0), rotation);

        let decomposed = pose.decompose();
        assert_relative_eq!(decomposed.position, Point3::new(4.0, 1.25, 2.0), epsilon = 1e-12);
        assert_relative_eq!(decomposed.rotation.angle_to(&rotation), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn decompose_discards_encoded_scale() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.3);
        let scaled = Isometry3::from_parts(Translation3::new(1.0, 0.0, 1.0), rotation)
            .to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 3.0, 0.5));
        let pose = PoseTransform::from_slice(scaled.as_slice()).unwrap();

        let decomposed = pose.decompose();
        assert_relative_eq!(decomposed.rotation.angle_to(&rotation), 0.0, epsilon = 1e-9);

        // Unit local X stays unit length after the pose is applied
        let moved = decomposed.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!((moved - decomposed.position).norm(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_basis_decodes_to_identity() {
        let mut values = [0.0; 16];
        values[12] = 7.0;
        values[15] = 1.0;
        let pose = PoseTransform::from_slice(&values).unwrap();

        let decomposed = pose.decompose();
        assert_relative_eq!(decomposed.position.x, 7.0);
        assert_relative_eq!(decomposed.rotation.angle(), 0.0);
    }

    #[test]
    fn mirrored_basis_yields_proper_rotation() {
        let mirrored = Matrix4::new_nonuniform_scaling(&Vector3::new(-1.0, 1.0, 1.0));
        let pose = PoseTransform::from_slice(mirrored.as_slice()).unwrap();

        let rotation = pose.decompose().rotation;
        let determinant = rotation.to_rotation_matrix().matrix().determinant();
        assert_relative_eq!(determinant, 1.0, epsilon = 1e-9);
    }
}
