// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimension label descriptors

use crate::config::{Palette, Rgba};
use nalgebra::{Point3, UnitQuaternion};
use roomfit_core::ElementPose;
use serde::Serialize;

/// Text and anchor for one wall's measured size
///
/// The host renders the text; the engine only decides what it says and where
/// it sits (the wall's model-space center and orientation).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionLabel {
    pub wall_identifier: String,
    pub text: String,
    /// Unscaled width in meters
    pub width: f64,
    /// Unscaled height in meters
    pub height: f64,
    /// Unscaled surface area in square meters
    pub surface_area: f64,
    pub anchor_position: Point3<f64>,
    pub anchor_rotation: UnitQuaternion<f64>,
    pub text_color: Rgba,
    pub background_color: Rgba,
    pub visible: bool,
}

impl DimensionLabel {
    pub fn new(
        wall_identifier: &str,
        width: f64,
        height: f64,
        anchor: &ElementPose,
        palette: &Palette,
        precision: usize,
    ) -> Self {
        let surface_area = width * height;
        Self {
            wall_identifier: wall_identifier.to_string(),
            text: format_dimensions(width, height, surface_area, precision),
            width,
            height,
            surface_area,
            anchor_position: anchor.position,
            anchor_rotation: anchor.rotation,
            text_color: palette.label_text,
            background_color: palette.label_background,
            visible: true,
        }
    }
}

/// `"3.00m × 2.50m\n7.50 m²"`
pub fn format_dimensions(width: f64, height: f64, area: f64, precision: usize) -> String {
    format!(
        "{:.p$}m × {:.p$}m\n{:.p$} m²",
        width,
        height,
        area,
        p = precision
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;

    #[test]
    fn test_format_dimensions() {
        assert_eq!(format_dimensions(3.0, 2.5, 7.5, 2), "3.00m × 2.50m\n7.50 m²");
        assert_eq!(format_dimensions(4.125, 2.5, 10.3125, 1), "4.1m × 2.5m\n10.3 m²");
    }

    #[test]
    fn test_label_carries_anchor_and_area() {
        let anchor = ElementPose::new(Point3::new(1.0, 2.0, 3.0), UnitQuaternion::identity());
        let label = DimensionLabel::new("W-1", 4.0, 2.5, &anchor, &Theme::Dark.palette(), 2);

        assert_eq!(label.surface_area, 10.0);
        assert_eq!(label.anchor_position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(label.text_color, Theme::Dark.palette().label_text);
        assert!(label.visible);
        assert!(label.text.contains("10.00 m²"));
    }
}
