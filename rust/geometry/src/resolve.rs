// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scale and floor resolution
//!
//! Derives the horizontal and vertical scale factors and the two floor
//! references (scan space and model space) used by every later stage.

use crate::warning::OverlayWarning;
use roomfit_core::{Confidence, ModelFrame, ScaleFactor, ScanFloorSummary};
use serde::Serialize;

/// Output of the scale and floor resolver
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedScale {
    /// Uniform horizontal (X/Z) scale
    pub horizontal_scale: f64,
    pub vertical_scale: f64,
    /// Model floor height (model space)
    pub model_floor_y: f64,
    /// Scan floor height (scan space)
    pub scan_floor_y: f64,
    pub confidence: Confidence,
    /// False on the fallback path
    pub calibrated: bool,
}

impl ResolvedScale {
    /// Unit scale, both floors at 0
    pub fn fallback() -> Self {
        Self {
            horizontal_scale: 1.0,
            vertical_scale: 1.0,
            model_floor_y: 0.0,
            scan_floor_y: 0.0,
            confidence: Confidence::Low,
            calibrated: false,
        }
    }
}

/// Resolve scale factors and floor references
///
/// Invalid calibration inputs are treated as absent. When either the scale
/// factor or the model frame is unavailable, the fallback constants are used
/// and a low-confidence warning is returned. Never fails.
pub fn resolve_scale(
    scale_factor: Option<&ScaleFactor>,
    model_frame: Option<&ModelFrame>,
    floor_summary: Option<&ScanFloorSummary>,
) -> (ResolvedScale, Vec<OverlayWarning>) {
    let mut warnings = Vec::new();

    let scale_factor = scale_factor.and_then(|s| match s.validate() {
        Ok(()) => Some(s),
        Err(e) => {
            warnings.push(OverlayWarning::InvalidCalibration(e));
            None
        }
    });
    let model_frame = model_frame.and_then(|m| match m.validate() {
        Ok(()) => Some(m),
        Err(e) => {
            warnings.push(OverlayWarning::InvalidCalibration(e));
            None
        }
    });

    match (scale_factor, model_frame) {
        (Some(scale), Some(frame)) => {
            let resolved = ResolvedScale {
                horizontal_scale: scale.uniform_horizontal_scale,
                vertical_scale: scale.vertical_scale,
                model_floor_y: frame.floor_y(),
                scan_floor_y: floor_summary.map(ScanFloorSummary::floor_y).unwrap_or(0.0),
                confidence: scale.confidence,
                calibrated: true,
            };
            (resolved, warnings)
        }
        (scale, frame) => {
            warnings.push(OverlayWarning::MissingCalibration {
                scale_factor: scale.is_none(),
                model_frame: frame.is_none(),
            });
            (ResolvedScale::fallback(), warnings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn frame() -> ModelFrame {
        ModelFrame::from_bounds(Point3::new(-5.0, -1.2, -4.0), Point3::new(30.0, 27.0, 40.0))
    }

    fn summary() -> ScanFloorSummary {
        ScanFloorSummary {
            bounding_box_min_y: 0.2,
            bounding_box_center_y: 1.1,
            average_wall_height: 2.4,
        }
    }

    #[test]
    fn test_calibrated_path() {
        let scale = ScaleFactor::new(11.3, 11.1, Confidence::High);
        let (resolved, warnings) = resolve_scale(Some(&scale), Some(&frame()), Some(&summary()));

        assert!(warnings.is_empty());
        assert!(resolved.calibrated);
        assert_eq!(resolved.horizontal_scale, 11.3);
        assert_eq!(resolved.vertical_scale, 11.1);
        assert_eq!(resolved.model_floor_y, -1.2);
        assert_relative_eq!(resolved.scan_floor_y, 0.2 - 1.2);
        assert_eq!(resolved.confidence, Confidence::High);
    }

    #[test]
    fn test_missing_summary_puts_scan_floor_at_zero() {
        let scale = ScaleFactor::uniform(2.0, Confidence::Medium);
        let (resolved, warnings) = resolve_scale(Some(&scale), Some(&frame()), None);
        assert!(warnings.is_empty());
        assert_eq!(resolved.scan_floor_y, 0.0);
    }

    #[test]
    fn test_no_calibration_falls_back() {
        let (resolved, warnings) = resolve_scale(None, None, Some(&summary()));

        assert_eq!(resolved, ResolvedScale::fallback());
        assert_eq!(resolved.horizontal_scale, 1.0);
        assert_eq!(resolved.vertical_scale, 1.0);
        assert_eq!(resolved.model_floor_y, 0.0);
        assert_eq!(resolved.scan_floor_y, 0.0);
        assert_eq!(
            warnings,
            vec![OverlayWarning::MissingCalibration {
                scale_factor: true,
                model_frame: true
            }]
        );
    }

    #[test]
    fn test_half_calibration_falls_back() {
        let scale = ScaleFactor::uniform(3.0, Confidence::High);
        let (resolved, warnings) = resolve_scale(Some(&scale), None, None);
        assert!(!resolved.calibrated);
        assert_eq!(resolved.confidence, Confidence::Low);
        assert_eq!(
            warnings,
            vec![OverlayWarning::MissingCalibration {
                scale_factor: false,
                model_frame: true
            }]
        );
    }

    #[test]
    fn test_invalid_scale_is_treated_as_absent() {
        let scale = ScaleFactor::new(0.0, 11.1, Confidence::High);
        let (resolved, warnings) = resolve_scale(Some(&scale), Some(&frame()), None);

        assert!(!resolved.calibrated);
        assert_eq!(warnings.len(), 2);
        assert!(matches!(warnings[0], OverlayWarning::InvalidCalibration(_)));
        assert!(matches!(
            warnings[1],
            OverlayWarning::MissingCalibration {
                scale_factor: true,
                model_frame: false
            }
        ));
    }
}
