// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Calibration inputs supplied by the scan importer and the model loader

use crate::error::{Error, Result};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Wall height assumed when the scan summary does not provide one
pub const DEFAULT_WALL_HEIGHT: f64 = 2.5;

/// Floor summary computed by the scan importer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanFloorSummary {
    pub bounding_box_min_y: f64,
    pub bounding_box_center_y: f64,
    #[serde(default = "default_wall_height")]
    pub average_wall_height: f64,
}

fn default_wall_height() -> f64 {
    DEFAULT_WALL_HEIGHT
}

impl ScanFloorSummary {
    /// Average wall height, falling back to the default for unusable values
    pub fn wall_height(&self) -> f64 {
        if self.average_wall_height.is_finite() && self.average_wall_height > 0.0 {
            self.average_wall_height
        } else {
            DEFAULT_WALL_HEIGHT
        }
    }

    /// Floor height in scan space
    ///
    /// `bounding_box_min_y` is measured at wall centers, so the floor sits
    /// half an average wall height below it.
    pub fn floor_y(&self) -> f64 {
        let min_y = if self.bounding_box_min_y.is_finite() {
            self.bounding_box_min_y
        } else {
            0.0
        };
        min_y - self.wall_height() / 2.0
    }
}

/// Axis-aligned bounding box of the loaded model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
    pub center: Point3<f64>,
    pub size: Vector3<f64>,
}

impl BoundingBox {
    /// Build from corners, deriving center and size
    pub fn from_corners(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min,
            max,
            center: nalgebra::center(&min, &max),
            size: max - min,
        }
    }
}

/// Bounding sphere of the loaded model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: Point3<f64>,
    pub radius: f64,
}

/// Placement and extents of the loaded model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelFrame {
    pub position: Point3<f64>,
    pub rotation: UnitQuaternion<f64>,
    pub bounding_box: BoundingBox,
    pub bounding_sphere: BoundingSphere,
}

impl ModelFrame {
    /// Model frame at the origin enclosing the given box
    pub fn from_bounds(min: Point3<f64>, max: Point3<f64>) -> Self {
        let bounding_box = BoundingBox::from_corners(min, max);
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
            bounding_box,
            bounding_sphere: BoundingSphere {
                center: bounding_box.center,
                radius: bounding_box.size.norm() / 2.0,
            },
        }
    }

    /// Model floor height (bottom of the bounding box)
    #[inline]
    pub fn floor_y(&self) -> f64 {
        self.bounding_box.min.y
    }

    /// Finite bounding box with `min <= max` on every axis
    pub fn validate(&self) -> Result<()> {
        let bb = &self.bounding_box;
        let finite = bb.min.iter().chain(bb.max.iter()).all(|v| v.is_finite());
        if !finite {
            return Err(Error::InvalidModelFrame("bounding box is not finite".into()));
        }
        for axis in 0..3 {
            if bb.min[axis] > bb.max[axis] {
                return Err(Error::InvalidModelFrame(format!(
                    "bounding box min exceeds max on axis {}",
                    axis
                )));
            }
        }
        Ok(())
    }
}

/// Trust in supplied calibration data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        };
        f.write_str(label)
    }
}

/// Scan-to-model scale computed by the model loader
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleFactor {
    pub scale_x: f64,
    pub scale_y: f64,
    pub scale_z: f64,
    pub uniform_horizontal_scale: f64,
    pub vertical_scale: f64,
    /// Estimated relative error of the fit
    #[serde(default)]
    pub precision: f64,
    pub confidence: Confidence,
}

impl ScaleFactor {
    /// Same scale on every axis
    pub fn uniform(scale: f64, confidence: Confidence) -> Self {
        Self::new(scale, scale, confidence)
    }

    pub fn new(horizontal: f64, vertical: f64, confidence: Confidence) -> Self {
        Self {
            scale_x: horizontal,
            scale_y: vertical,
            scale_z: horizontal,
            uniform_horizontal_scale: horizontal,
            vertical_scale: vertical,
            precision: 0.0,
            confidence,
        }
    }

    /// Every scale value must be finite and strictly positive
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("scaleX", self.scale_x),
            ("scaleY", self.scale_y),
            ("scaleZ", self.scale_z),
            ("uniformHorizontalScale", self.uniform_horizontal_scale),
            ("verticalScale", self.vertical_scale),
        ];
        for (name, value) in values {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidScaleFactor(format!("{} = {}", name, value)));
            }
        }
        Ok(())
    }
}
