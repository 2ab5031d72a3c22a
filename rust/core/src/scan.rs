// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scan records produced by the scan importer
//!
//! Records arrive as loose shapes (`Vec<f64>` dimensions and transforms).
//! `validate` turns them into typed entities; anything that would produce
//! corrupt geometry is rejected here rather than deep inside the builders.

use crate::error::{Error, Result};
use crate::pose::PoseTransform;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Minimum wall thickness in meters applied before scaling
pub const MIN_WALL_THICKNESS: f64 = 0.1;

/// Wall as delivered by the scan importer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallRecord {
    /// Unique within a scan
    #[serde(default, deserialize_with = "lenient_identifier")]
    pub identifier: String,
    /// Width, height, depth in meters
    #[serde(default, deserialize_with = "lenient_components")]
    pub dimensions: Vec<f64>,
    /// Column-major 4x4 pose
    #[serde(default, deserialize_with = "lenient_components")]
    pub transform: Vec<f64>,
    /// Unscaled surface area, only present after `annotate_surface_areas`
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub surface_area: Option<f64>,
}

impl WallRecord {
    pub fn new(identifier: impl Into<String>, dimensions: Vec<f64>, transform: Vec<f64>) -> Self {
        Self {
            identifier: identifier.into(),
            dimensions,
            transform,
            surface_area: None,
        }
    }

    /// Parse into a typed wall segment
    pub fn validate(&self) -> Result<WallSegment> {
        let dimensions = WallDimensions::from_slice(&self.dimensions)?;
        let pose = PoseTransform::from_slice(&self.transform)?;
        Ok(WallSegment {
            identifier: self.identifier.clone(),
            dimensions,
            pose,
        })
    }
}

/// Door or window as delivered by the scan importer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningRecord {
    /// Column-major 4x4 pose
    #[serde(default, deserialize_with = "lenient_components")]
    pub transform: Vec<f64>,
}

impl OpeningRecord {
    pub fn new(transform: Vec<f64>) -> Self {
        Self { transform }
    }

    /// Parse into a typed opening of the given kind
    pub fn validate(&self, kind: OpeningKind) -> Result<Opening> {
        Ok(Opening {
            kind,
            pose: PoseTransform::from_slice(&self.transform)?,
        })
    }
}

// Record fields are read leniently so one malformed element cannot fail the
// whole document. A non-array field becomes empty and a non-numeric entry
// becomes NaN; `validate` then rejects that element alone.

fn lenient_components<'de, D>(deserializer: D) -> std::result::Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_f64().unwrap_or(f64::NAN))
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn lenient_identifier<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Aggregate scan metadata; every list may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMetadata {
    #[serde(default)]
    pub walls: Vec<WallRecord>,
    #[serde(default)]
    pub doors: Vec<OpeningRecord>,
    #[serde(default)]
    pub windows: Vec<OpeningRecord>,
}

impl ScanMetadata {
    /// Parse scan metadata from the importer's JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty() && self.doors.is_empty() && self.windows.is_empty()
    }

    /// Total number of element records
    pub fn element_count(&self) -> usize {
        self.walls.len() + self.doors.len() + self.windows.len()
    }

    /// Doors then windows, tagged with their kind
    pub fn openings(&self) -> impl Iterator<Item = (OpeningKind, usize, &OpeningRecord)> {
        let doors = self
            .doors
            .iter()
            .enumerate()
            .map(|(i, r)| (OpeningKind::Door, i, r));
        let windows = self
            .windows
            .iter()
            .enumerate()
            .map(|(i, r)| (OpeningKind::Window, i, r));
        doors.chain(windows)
    }

    /// Write computed areas back onto the wall records
    ///
    /// Compatibility shim for callers that read `surfaceArea` off the scan
    /// metadata. Walls without an entry in `areas` keep their current value.
    pub fn annotate_surface_areas(&mut self, areas: &FxHashMap<String, f64>) {
        for wall in &mut self.walls {
            if let Some(&area) = areas.get(&wall.identifier) {
                wall.surface_area = Some(area);
            }
        }
    }
}

/// Measured wall size in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallDimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl WallDimensions {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self { width, height, depth }
    }

    /// Exactly three finite, non-negative components
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != 3 {
            return Err(Error::DimensionCount(values.len()));
        }
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidDimension { index, value });
            }
        }
        Ok(Self::new(values[0], values[1], values[2]))
    }

    /// Depth with the thickness floor applied
    #[inline]
    pub fn effective_depth(&self) -> f64 {
        self.depth.max(MIN_WALL_THICKNESS)
    }

    /// Unscaled face area (width x height)
    #[inline]
    pub fn surface_area(&self) -> f64 {
        self.width * self.height
    }
}

/// Validated wall
#[derive(Debug, Clone, PartialEq)]
pub struct WallSegment {
    pub identifier: String,
    pub dimensions: WallDimensions,
    pub pose: PoseTransform,
}

/// Opening category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    /// Nominal size (width, height, depth) in meters
    ///
    /// Openings carry no measured size, so every door and window is drawn
    /// with the same standard dimensions.
    pub fn nominal_dimensions(&self) -> WallDimensions {
        match self {
            OpeningKind::Door => WallDimensions::new(0.9, 2.0, 0.1),
            OpeningKind::Window => WallDimensions::new(1.2, 1.5, 0.1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OpeningKind::Door => "door",
            OpeningKind::Window => "window",
        }
    }
}

impl std::fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated door or window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opening {
    pub kind: OpeningKind,
    pub pose: PoseTransform,
}
