// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input bundle: scan metadata plus optional calibration

use anyhow::{Context, Result};
use roomfit_core::{ModelFrame, ScaleFactor, ScanFloorSummary, ScanMetadata};
use roomfit_geometry::OverlayRequest;
use serde::Deserialize;
use std::path::Path;

/// Everything the host hands the overlay engine, as one JSON document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputBundle {
    #[serde(default)]
    pub metadata: Option<ScanMetadata>,
    #[serde(default)]
    pub model_frame: Option<ModelFrame>,
    #[serde(default)]
    pub scale_factor: Option<ScaleFactor>,
    #[serde(default)]
    pub floor_summary: Option<ScanFloorSummary>,
}

impl InputBundle {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("malformed input bundle")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Borrow the bundle as an engine request
    pub fn request(&self, enabled: bool) -> OverlayRequest<'_> {
        OverlayRequest {
            metadata: self.metadata.as_ref(),
            visualization_enabled: enabled,
            model_frame: self.model_frame.as_ref(),
            scale_factor: self.scale_factor.as_ref(),
            floor_summary: self.floor_summary.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_only_bundle() {
        let bundle = InputBundle::from_json(
            r#"{"metadata":{"walls":[{"identifier":"w1","dimensions":[4,2.5,0.2],
                "transform":[1,0,0,0, 0,1,0,0, 0,0,1,0, 0,1.25,0,1]}]}}"#,
        )
        .unwrap();
        assert_eq!(bundle.metadata.as_ref().map(|m| m.walls.len()), Some(1));
        assert!(bundle.model_frame.is_none());
        assert!(bundle.scale_factor.is_none());
        assert!(bundle.floor_summary.is_none());

        let request = bundle.request(true);
        assert!(request.visualization_enabled);
        assert!(request.model_frame.is_none());
    }

    #[test]
    fn empty_document_has_no_metadata() {
        let bundle = InputBundle::from_json("{}").unwrap();
        assert!(bundle.metadata.is_none());
        assert!(bundle.request(true).metadata.is_none());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(InputBundle::from_json("{\"metadata\": 3}").is_err());
    }
}
