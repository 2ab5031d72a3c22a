// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Non-fatal diagnostics collected during an overlay build

use crate::alignment::AlignmentStrategy;
use roomfit_core::{Error, OpeningKind};
use serde::{Serialize, Serializer};
use std::fmt;

/// Something the engine recovered from
///
/// Every warning is also logged through `tracing` when recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayWarning {
    /// Scale factor or model frame absent; fallback constants in use
    MissingCalibration {
        scale_factor: bool,
        model_frame: bool,
    },
    /// Calibration input failed validation and was treated as absent
    InvalidCalibration(Error),
    /// Wall record rejected at the parsing boundary
    SkippedWall {
        index: usize,
        identifier: String,
        error: Error,
    },
    /// Door or window record rejected at the parsing boundary
    SkippedOpening {
        kind: OpeningKind,
        index: usize,
        error: Error,
    },
    /// Element coordinates are non-finite after transformation or overflow `f32`
    NonFiniteGeometry { element: String },
    /// A second wall reused an identifier; its area is excluded from the map
    DuplicateWallIdentifier { identifier: String },
    /// Requested alignment could not be computed for this input
    StrategyOverrideUnavailable { requested: AlignmentStrategy },
}

impl OverlayWarning {
    /// Calibration-related warnings lower trust in the whole overlay
    pub fn is_calibration(&self) -> bool {
        matches!(
            self,
            OverlayWarning::MissingCalibration { .. } | OverlayWarning::InvalidCalibration(_)
        )
    }

    /// Element-level skips
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            OverlayWarning::SkippedWall { .. }
                | OverlayWarning::SkippedOpening { .. }
                | OverlayWarning::NonFiniteGeometry { .. }
        )
    }
}

impl fmt::Display for OverlayWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayWarning::MissingCalibration {
                scale_factor,
                model_frame,
            } => {
                let missing = match (scale_factor, model_frame) {
                    (true, true) => "scale factor and model frame",
                    (true, false) => "scale factor",
                    _ => "model frame",
                };
                write!(f, "low confidence: {} missing, using unit scale at floor 0", missing)
            }
            OverlayWarning::InvalidCalibration(err) => {
                write!(f, "ignoring calibration input: {}", err)
            }
            OverlayWarning::SkippedWall {
                index,
                identifier,
                error,
            } => write!(
                f,
                "skipped wall #{} '{}': {} ({})",
                index,
                identifier,
                error.field(),
                error
            ),
            OverlayWarning::SkippedOpening { kind, index, error } => write!(
                f,
                "skipped {} #{}: {} ({})",
                kind,
                index,
                error.field(),
                error
            ),
            OverlayWarning::NonFiniteGeometry { element } => {
                write!(f, "skipped {}: non-finite coordinates", element)
            }
            OverlayWarning::DuplicateWallIdentifier { identifier } => {
                write!(f, "duplicate wall identifier '{}'", identifier)
            }
            OverlayWarning::StrategyOverrideUnavailable { requested } => write!(
                f,
                "alignment override {} unavailable, keeping automatic choice",
                requested
            ),
        }
    }
}

impl Serialize for OverlayWarning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
