// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Measurement overlay assembly
//!
//! One call runs the whole pipeline synchronously:
//!
//! 1. Scale and floor resolution
//! 2. Validation of every wall, door and window record
//! 3. Horizontal alignment over the validated elements
//! 4. Wall and opening geometry in model space
//!
//! Nothing is cached between calls. Element-level problems skip that element
//! and are reported as warnings; the assembly itself cannot fail.

use crate::alignment::resolve_alignment;
use crate::compose::PlacementContext;
use crate::config::OverlayConfig;
use crate::opening::build_opening;
use crate::overlay::{CornerMarkers, MeasurementGeometry};
use crate::primitives::PointSet;
use crate::resolve::resolve_scale;
use crate::wall::build_wall;
use crate::warning::OverlayWarning;
use roomfit_core::{ModelFrame, Opening, ScaleFactor, ScanFloorSummary, ScanMetadata, WallSegment};

/// Read-only inputs for one build
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlayRequest<'a> {
    pub metadata: Option<&'a ScanMetadata>,
    pub visualization_enabled: bool,
    pub model_frame: Option<&'a ModelFrame>,
    pub scale_factor: Option<&'a ScaleFactor>,
    pub floor_summary: Option<&'a ScanFloorSummary>,
}

impl<'a> OverlayRequest<'a> {
    /// Enabled request without calibration
    pub fn new(metadata: &'a ScanMetadata) -> Self {
        Self {
            metadata: Some(metadata),
            visualization_enabled: true,
            ..Self::default()
        }
    }

    pub fn with_model_frame(mut self, model_frame: &'a ModelFrame) -> Self {
        self.model_frame = Some(model_frame);
        self
    }

    pub fn with_scale_factor(mut self, scale_factor: &'a ScaleFactor) -> Self {
        self.scale_factor = Some(scale_factor);
        self
    }

    pub fn with_floor_summary(mut self, floor_summary: &'a ScanFloorSummary) -> Self {
        self.floor_summary = Some(floor_summary);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.visualization_enabled = enabled;
        self
    }
}

/// Build the measurement overlay for one set of inputs
///
/// Returns an empty `Disabled` container when metadata is absent or
/// visualization is off. Identical inputs always produce identical output.
pub fn build_measurement_overlay(
    request: &OverlayRequest<'_>,
    config: &OverlayConfig,
) -> MeasurementGeometry {
    let metadata = match request.metadata {
        Some(metadata) if request.visualization_enabled => metadata,
        _ => {
            tracing::debug!("measurement overlay disabled");
            return MeasurementGeometry::disabled(config.theme);
        }
    };

    let (scale, scale_warnings) = resolve_scale(
        request.scale_factor,
        request.model_frame,
        request.floor_summary,
    );

    let mut skipped = Vec::new();
    let walls = validate_walls(metadata, &mut skipped);
    let openings = validate_openings(metadata, &mut skipped);

    let (alignment, alignment_warning) = resolve_alignment(
        &walls,
        &openings.iter().map(|(_, o)| *o).collect::<Vec<_>>(),
        &scale,
        request.model_frame,
        config.strategy_override,
    );

    tracing::debug!(
        horizontal_scale = scale.horizontal_scale,
        vertical_scale = scale.vertical_scale,
        model_floor_y = scale.model_floor_y,
        scan_floor_y = scale.scan_floor_y,
        strategy = %alignment.strategy,
        offset_x = alignment.offset.x,
        offset_z = alignment.offset.z,
        "resolved placement"
    );

    let mut overlay = MeasurementGeometry::new(config.theme, scale, alignment);
    for warning in scale_warnings
        .into_iter()
        .chain(skipped)
        .chain(alignment_warning)
    {
        overlay.record(warning);
    }

    let ctx = PlacementContext::new(&scale, &alignment);
    let palette = config.theme.palette();

    for segment in &walls {
        match build_wall(segment, &ctx, &palette, config.label_precision) {
            Ok((wall, label)) => {
                overlay.total_surface_area += wall.surface_area;
                if overlay.surface_areas.contains_key(&wall.identifier) {
                    overlay.record(OverlayWarning::DuplicateWallIdentifier {
                        identifier: wall.identifier.clone(),
                    });
                } else {
                    overlay
                        .surface_areas
                        .insert(wall.identifier.clone(), wall.surface_area);
                }
                overlay.walls.push(wall);
                overlay.labels.push(label);
            }
            Err(warning) => overlay.record(warning),
        }
    }

    for (index, opening) in &openings {
        match build_opening(opening, *index, &ctx, &palette) {
            Ok(marker) => overlay.openings.push(marker),
            Err(warning) => overlay.record(warning),
        }
    }

    if config.corner_markers {
        let mut points = PointSet::with_capacity(overlay.walls.len() * 8);
        for wall in &overlay.walls {
            for corner in &wall.corners {
                points.add_point(*corner);
            }
        }
        overlay.corner_markers = Some(CornerMarkers {
            points,
            color: palette.corner_marker,
            visible: true,
        });
    }

    tracing::info!(
        walls = overlay.walls.len(),
        openings = overlay.openings.len(),
        skipped = overlay.skipped_count(),
        total_surface_area = overlay.total_surface_area,
        confidence = %overlay.scale.confidence,
        "measurement overlay assembled"
    );

    overlay
}

fn validate_walls(metadata: &ScanMetadata, skipped: &mut Vec<OverlayWarning>) -> Vec<WallSegment> {
    let mut walls = Vec::with_capacity(metadata.walls.len());
    for (index, record) in metadata.walls.iter().enumerate() {
        match record.validate() {
            Ok(segment) => walls.push(segment),
            Err(error) => skipped.push(OverlayWarning::SkippedWall {
                index,
                identifier: record.identifier.clone(),
                error,
            }),
        }
    }
    walls
}

/// Validated openings paired with their index within their kind's list
fn validate_openings(
    metadata: &ScanMetadata,
    skipped: &mut Vec<OverlayWarning>,
) -> Vec<(usize, Opening)> {
    let mut openings = Vec::with_capacity(metadata.doors.len() + metadata.windows.len());
    for (kind, index, record) in metadata.openings() {
        match record.validate(kind) {
            Ok(opening) => openings.push((index, opening)),
            Err(error) => skipped.push(OverlayWarning::SkippedOpening { kind, index, error }),
        }
    }
    openings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::AlignmentStrategy;
    use crate::overlay::OverlayState;
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use roomfit_core::{Confidence, OpeningRecord, PoseTransform, WallRecord};

    fn at(x: f64, y: f64, z: f64) -> Vec<f64> {
        PoseTransform::from_translation(x, y, z).elements().to_vec()
    }

    fn metadata() -> ScanMetadata {
        ScanMetadata {
            walls: vec![
                WallRecord::new("a", vec![3.0, 2.5, 0.1], at(1.5, 1.25, 0.0)),
                WallRecord::new("b", vec![4.0, 2.5, 0.0], at(3.0, 1.25, 2.0)),
            ],
            doors: vec![OpeningRecord::new(at(1.0, 1.0, 0.0))],
            windows: vec![OpeningRecord::new(vec![1.0; 9])],
        }
    }

    #[test]
    fn test_disabled_when_flag_off() {
        let metadata = metadata();
        let request = OverlayRequest::new(&metadata).enabled(false);
        let overlay = build_measurement_overlay(&request, &OverlayConfig::default());
        assert_eq!(overlay.state, OverlayState::Disabled);
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_disabled_without_metadata() {
        let request = OverlayRequest {
            visualization_enabled: true,
            ..Default::default()
        };
        let overlay = build_measurement_overlay(&request, &OverlayConfig::default());
        assert_eq!(overlay.state, OverlayState::Disabled);
        assert!(overlay.warnings.is_empty());
    }

    #[test]
    fn test_malformed_window_is_skipped() {
        let metadata = metadata();
        let request = OverlayRequest::new(&metadata);
        let overlay = build_measurement_overlay(&request, &OverlayConfig::default());

        assert_eq!(overlay.state, OverlayState::Assembled);
        assert_eq!(overlay.walls.len(), 2);
        assert_eq!(overlay.openings.len(), 1);
        assert_eq!(overlay.skipped_count(), 1);
        assert!(overlay
            .warnings
            .iter()
            .any(|w| matches!(w, OverlayWarning::SkippedOpening { index: 0, .. })));
    }

    #[test]
    fn test_duplicate_identifier_keeps_first_area() {
        let mut metadata = metadata();
        metadata.walls[1].identifier = "a".into();
        let request = OverlayRequest::new(&metadata);
        let overlay = build_measurement_overlay(&request, &OverlayConfig::default());

        assert_eq!(overlay.walls.len(), 2);
        assert_eq!(overlay.surface_area("a"), Some(7.5));
        assert_eq!(overlay.total_surface_area, 17.5);
        assert!(overlay
            .warnings
            .contains(&OverlayWarning::DuplicateWallIdentifier { identifier: "a".into() }));
    }

    #[test]
    fn test_corner_markers_only_on_request() {
        let metadata = metadata();
        let request = OverlayRequest::new(&metadata);

        let plain = build_measurement_overlay(&request, &OverlayConfig::default());
        assert!(plain.corner_markers.is_none());

        let config = OverlayConfig {
            corner_markers: true,
            ..Default::default()
        };
        let marked = build_measurement_overlay(&request, &config);
        assert_eq!(marked.corner_markers.as_ref().map(|m| m.points.len()), Some(16));
    }

    #[test]
    fn test_anchor_wall_must_fully_validate() {
        let mut metadata = metadata();
        metadata.walls[0].dimensions = vec![3.0, 2.5];
        let frame = ModelFrame::from_bounds(
            Point3::new(-10.0, 0.0, -10.0),
            Point3::new(10.0, 3.0, 10.0),
        );
        let scale = ScaleFactor::uniform(1.0, Confidence::High);
        let request = OverlayRequest::new(&metadata)
            .with_model_frame(&frame)
            .with_scale_factor(&scale);
        let overlay = build_measurement_overlay(&request, &OverlayConfig::default());

        // Wall "a" has a valid transform but is skipped, so "b" anchors the alignment
        assert_eq!(overlay.alignment.strategy, AlignmentStrategy::FirstWallToMin);
        assert_eq!(overlay.walls[0].identifier, "b");
        assert_relative_eq!(overlay.alignment.offset.x, -10.0 - 3.0);
        assert_relative_eq!(overlay.alignment.offset.z, -10.0 - 2.0);
    }

    #[test]
    fn test_uncalibrated_override_warns_but_builds() {
        let metadata = metadata();
        let config = OverlayConfig {
            strategy_override: Some(AlignmentStrategy::CenterToCenter),
            ..Default::default()
        };
        let overlay = build_measurement_overlay(&OverlayRequest::new(&metadata), &config);

        assert_eq!(overlay.alignment.strategy, AlignmentStrategy::Unaligned);
        assert_eq!(overlay.walls.len(), 2);
        assert!(overlay.warnings.iter().any(|w| matches!(
            w,
            OverlayWarning::StrategyOverrideUnavailable { .. }
        )));
    }
}
