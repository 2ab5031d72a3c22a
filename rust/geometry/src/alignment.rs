// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Horizontal alignment between scan space and model space
//!
//! Produces one X/Z translation applied uniformly to every scaled element.
//! Four candidate offsets are computed; `FirstWallToMin` is preferred when a
//! wall exists and `MinToMin` otherwise. `MaxToMax` and `CenterToCenter` are
//! never auto-selected and exist so a caller can compare or override.
//!
//! The preference for `FirstWallToMin` is a heuristic. It tracks L-shaped
//! footprints better than bounding-box alignment, but nothing guarantees it
//! is the best choice for every floor plan.

use crate::resolve::ResolvedScale;
use crate::warning::OverlayWarning;
use nalgebra::Point3;
use roomfit_core::{FootprintBounds, ModelFrame, Opening, WallSegment};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Alignment strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlignmentStrategy {
    /// First wall's scaled position onto the model's min corner
    FirstWallToMin,
    /// Scan cloud min corner onto model min corner
    MinToMin,
    /// Scan cloud max corner onto model max corner
    MaxToMax,
    /// Scan cloud center onto model center
    CenterToCenter,
    /// No translation (uncalibrated input or nothing to align)
    Unaligned,
}

impl AlignmentStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlignmentStrategy::FirstWallToMin => "firstWallToMin",
            AlignmentStrategy::MinToMin => "minToMin",
            AlignmentStrategy::MaxToMax => "maxToMax",
            AlignmentStrategy::CenterToCenter => "centerToCenter",
            AlignmentStrategy::Unaligned => "unaligned",
        }
    }
}

impl fmt::Display for AlignmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlignmentStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "firstwalltomin" => Ok(AlignmentStrategy::FirstWallToMin),
            "mintomin" => Ok(AlignmentStrategy::MinToMin),
            "maxtomax" => Ok(AlignmentStrategy::MaxToMax),
            "centertocenter" => Ok(AlignmentStrategy::CenterToCenter),
            "unaligned" | "none" => Ok(AlignmentStrategy::Unaligned),
            _ => Err(format!("unknown alignment strategy '{}'", s)),
        }
    }
}

/// Horizontal translation in model units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset2 {
    pub x: f64,
    pub z: f64,
}

impl Offset2 {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// `target - source`
    fn between(target: (f64, f64), source: (f64, f64)) -> Self {
        Self::new(target.0 - source.0, target.1 - source.1)
    }
}

/// Every candidate offset; `None` when a candidate cannot be computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentAlternatives {
    pub min_to_min: Option<Offset2>,
    pub max_to_max: Option<Offset2>,
    pub center_to_center: Option<Offset2>,
    pub first_wall_to_min: Option<Offset2>,
}

impl AlignmentAlternatives {
    pub fn get(&self, strategy: AlignmentStrategy) -> Option<Offset2> {
        match strategy {
            AlignmentStrategy::FirstWallToMin => self.first_wall_to_min,
            AlignmentStrategy::MinToMin => self.min_to_min,
            AlignmentStrategy::MaxToMax => self.max_to_max,
            AlignmentStrategy::CenterToCenter => self.center_to_center,
            AlignmentStrategy::Unaligned => Some(Offset2::default()),
        }
    }
}

/// Decision of the horizontal alignment resolver
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalAlignment {
    pub strategy: AlignmentStrategy,
    pub offset: Offset2,
    pub alternatives: AlignmentAlternatives,
    /// Scaled scan-space footprint the candidates were computed from
    pub scan_bounds: FootprintBounds,
}

impl HorizontalAlignment {
    /// Zero offset
    pub fn unaligned() -> Self {
        Self {
            strategy: AlignmentStrategy::Unaligned,
            offset: Offset2::default(),
            alternatives: AlignmentAlternatives::default(),
            scan_bounds: FootprintBounds::new(),
        }
    }

    /// Same alternatives, different choice
    ///
    /// Returns `None` when the requested candidate was not computable.
    pub fn with_strategy(&self, strategy: AlignmentStrategy) -> Option<Self> {
        let offset = self.alternatives.get(strategy)?;
        Some(Self {
            strategy,
            offset,
            ..*self
        })
    }
}

/// Footprint corners (x, z) of a wall in scan space, unscaled
///
/// Uses half width and half effective depth rotated by the wall's own rotation.
pub fn wall_footprint(wall: &WallSegment) -> SmallVec<[(f64, f64); 4]> {
    let pose = wall.pose.decompose();
    let half_width = wall.dimensions.width / 2.0;
    let half_depth = wall.dimensions.effective_depth() / 2.0;

    [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
        .iter()
        .map(|&(sx, sz)| {
            let p = pose.transform_point(&Point3::new(sx * half_width, 0.0, sz * half_depth));
            (p.x, p.z)
        })
        .collect()
}

/// Scaled scan-space footprint: 4 corners per wall plus every opening center
pub fn scan_footprint(walls: &[WallSegment], openings: &[Opening], scale: f64) -> FootprintBounds {
    let mut bounds = FootprintBounds::new();
    for wall in walls {
        bounds.extend(
            wall_footprint(wall)
                .into_iter()
                .map(|(x, z)| (x * scale, z * scale)),
        );
    }
    for opening in openings {
        let center = opening.pose.translation();
        bounds.expand(center.x * scale, center.z * scale);
    }
    bounds
}

/// Resolve the horizontal offset
///
/// Returns `Unaligned` when calibration is incomplete, there is no model
/// frame, or no element survived validation. A `requested` strategy replaces
/// the automatic choice when its candidate exists; otherwise a warning is
/// returned alongside the automatic choice.
///
/// `walls` are validated segments, so the `FirstWallToMin` anchor is the first
/// wall whose dimensions and transform both parse; a wall rejected for bad
/// dimensions is never the anchor even if its transform is valid.
pub fn resolve_alignment(
    walls: &[WallSegment],
    openings: &[Opening],
    scale: &ResolvedScale,
    model_frame: Option<&ModelFrame>,
    requested: Option<AlignmentStrategy>,
) -> (HorizontalAlignment, Option<OverlayWarning>) {
    let automatic = match model_frame {
        Some(frame) if scale.calibrated => {
            automatic_alignment(walls, openings, scale.horizontal_scale, frame)
        }
        _ => HorizontalAlignment::unaligned(),
    };

    match requested {
        None => (automatic, None),
        Some(strategy) => match automatic.with_strategy(strategy) {
            Some(overridden) => (overridden, None),
            None => (
                automatic,
                Some(OverlayWarning::StrategyOverrideUnavailable {
                    requested: strategy,
                }),
            ),
        },
    }
}

fn automatic_alignment(
    walls: &[WallSegment],
    openings: &[Opening],
    scale: f64,
    frame: &ModelFrame,
) -> HorizontalAlignment {
    let bounds = scan_footprint(walls, openings, scale);
    if !bounds.is_valid() {
        return HorizontalAlignment::unaligned();
    }

    let bb = &frame.bounding_box;
    let model_min = (bb.min.x, bb.min.z);
    let model_max = (bb.max.x, bb.max.z);
    let model_center = (bb.center.x, bb.center.z);

    let first_wall_to_min = walls.first().map(|wall| {
        let position = wall.pose.translation();
        Offset2::between(model_min, (position.x * scale, position.z * scale))
    });

    let min_to_min = Offset2::between(model_min, bounds.min());
    let alternatives = AlignmentAlternatives {
        min_to_min: Some(min_to_min),
        max_to_max: Some(Offset2::between(model_max, bounds.max())),
        center_to_center: Some(Offset2::between(model_center, bounds.center())),
        first_wall_to_min,
    };

    let (strategy, offset) = match first_wall_to_min {
        Some(offset) => (AlignmentStrategy::FirstWallToMin, offset),
        None => (AlignmentStrategy::MinToMin, min_to_min),
    };

    HorizontalAlignment {
        strategy,
        offset,
        alternatives,
        scan_bounds: bounds,
    }
}
