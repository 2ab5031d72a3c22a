// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Measurement overlay container returned to the rendering host

use crate::alignment::HorizontalAlignment;
use crate::config::{Rgba, Theme};
use crate::label::DimensionLabel;
use crate::opening::OpeningOverlay;
use crate::primitives::PointSet;
use crate::resolve::ResolvedScale;
use crate::wall::WallOverlay;
use crate::warning::OverlayWarning;
use roomfit_core::Confidence;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Name of the group the host attaches to its scene graph
pub const GROUP_NAME: &str = "measurement-overlay";

/// Build state of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlayState {
    /// Metadata absent or visualization off; no drawables
    Disabled,
    /// Fully built
    Assembled,
}

/// Wall corner points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CornerMarkers {
    pub points: PointSet,
    pub color: Rgba,
    pub visible: bool,
}

/// All overlay drawables produced by one build
///
/// Owned by the caller, who is responsible for releasing the previous
/// container when it is replaced. Nothing inside references the inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementGeometry {
    pub name: &'static str,
    pub state: OverlayState,
    pub visible: bool,
    pub theme: Theme,
    pub walls: Vec<WallOverlay>,
    pub openings: Vec<OpeningOverlay>,
    pub labels: Vec<DimensionLabel>,
    pub corner_markers: Option<CornerMarkers>,
    /// Wall identifier to unscaled surface area
    pub surface_areas: FxHashMap<String, f64>,
    /// Sum over every built wall
    pub total_surface_area: f64,
    pub scale: ResolvedScale,
    pub alignment: HorizontalAlignment,
    pub warnings: Vec<OverlayWarning>,
}

impl MeasurementGeometry {
    /// Empty, valid container
    pub fn new(theme: Theme, scale: ResolvedScale, alignment: HorizontalAlignment) -> Self {
        Self {
            name: GROUP_NAME,
            state: OverlayState::Assembled,
            visible: true,
            theme,
            walls: Vec::new(),
            openings: Vec::new(),
            labels: Vec::new(),
            corner_markers: None,
            surface_areas: FxHashMap::default(),
            total_surface_area: 0.0,
            scale,
            alignment,
            warnings: Vec::new(),
        }
    }

    /// Container returned when there is nothing to build
    pub fn disabled(theme: Theme) -> Self {
        Self {
            state: OverlayState::Disabled,
            ..Self::new(theme, ResolvedScale::fallback(), HorizontalAlignment::unaligned())
        }
    }

    /// Record a warning and log it
    pub fn record(&mut self, warning: OverlayWarning) {
        tracing::warn!(group = GROUP_NAME, "{}", warning);
        self.warnings.push(warning);
    }

    /// Show or hide every drawable without rebuilding
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        for wall in &mut self.walls {
            wall.visible = visible;
        }
        for opening in &mut self.openings {
            opening.visible = visible;
        }
        for label in &mut self.labels {
            label.visible = visible;
        }
        if let Some(markers) = &mut self.corner_markers {
            markers.visible = visible;
        }
    }

    /// Flip visibility, returning the new state
    pub fn toggle_visible(&mut self) -> bool {
        let visible = !self.visible;
        self.set_visible(visible);
        visible
    }

    /// Area of one wall by identifier
    pub fn surface_area(&self, identifier: &str) -> Option<f64> {
        self.surface_areas.get(identifier).copied()
    }

    /// True when there are no drawables
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
            && self.openings.is_empty()
            && self.labels.is_empty()
            && self.corner_markers.as_ref().map_or(true, |m| m.points.is_empty())
    }

    /// Vertices across all wall wireframes
    pub fn wireframe_vertex_count(&self) -> usize {
        self.walls.iter().map(|w| w.wireframe.vertex_count()).sum()
    }

    /// Vertices across every drawable buffer
    pub fn vertex_count(&self) -> usize {
        let openings: usize = self
            .openings
            .iter()
            .map(|o| o.solid.vertex_count() + o.outline.vertex_count())
            .sum();
        let markers = self.corner_markers.as_ref().map_or(0, |m| m.points.len());
        self.wireframe_vertex_count() + openings + markers
    }

    /// Line segments across wall wireframes and opening outlines
    pub fn segment_count(&self) -> usize {
        let walls: usize = self.walls.iter().map(|w| w.wireframe.segment_count()).sum();
        let openings: usize = self.openings.iter().map(|o| o.outline.segment_count()).sum();
        walls + openings
    }

    /// Triangles across opening markers
    pub fn triangle_count(&self) -> usize {
        self.openings.iter().map(|o| o.solid.triangle_count()).sum()
    }

    /// Calibration was missing or reported low confidence
    ///
    /// Hosts may dim the overlay or show a calibration hint.
    pub fn is_low_confidence(&self) -> bool {
        self.scale.confidence == Confidence::Low
    }

    /// Number of elements skipped during the build
    pub fn skipped_count(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_skip()).count()
    }

    /// Release every buffer; the container reverts to the disabled state
    pub fn clear(&mut self) {
        self.walls.clear();
        self.openings.clear();
        self.labels.clear();
        self.corner_markers = None;
        self.surface_areas.clear();
        self.total_surface_area = 0.0;
        self.warnings.clear();
        self.state = OverlayState::Disabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_container_is_valid_and_empty() {
        let overlay = MeasurementGeometry::disabled(Theme::Light);
        assert_eq!(overlay.name, GROUP_NAME);
        assert_eq!(overlay.state, OverlayState::Disabled);
        assert!(overlay.is_empty());
        assert!(overlay.visible);
        assert_eq!(overlay.vertex_count(), 0);
        assert_eq!(overlay.total_surface_area, 0.0);
    }

    #[test]
    fn test_toggle_visible() {
        let mut overlay = MeasurementGeometry::disabled(Theme::Dark);
        overlay.corner_markers = Some(CornerMarkers {
            points: PointSet::default(),
            color: Theme::Dark.palette().corner_marker,
            visible: true,
        });

        assert!(!overlay.toggle_visible());
        assert!(!overlay.visible);
        assert_eq!(overlay.corner_markers.as_ref().map(|m| m.visible), Some(false));
        assert!(overlay.toggle_visible());
    }

    #[test]
    fn test_record_keeps_warnings_in_order() {
        let mut overlay = MeasurementGeometry::disabled(Theme::Light);
        overlay.record(OverlayWarning::DuplicateWallIdentifier {
            identifier: "a".into(),
        });
        overlay.record(OverlayWarning::NonFiniteGeometry {
            element: "wall 'b'".into(),
        });
        assert_eq!(overlay.warnings.len(), 2);
        assert_eq!(overlay.skipped_count(), 1);
    }
}
