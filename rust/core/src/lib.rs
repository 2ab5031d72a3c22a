// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # RoomFit Core
//!
//! Data contracts shared by the room scan importer, the model loader and the
//! measurement overlay engine.
//!
//! - **Scan records**: walls, doors and windows as loose importer shapes
//!   ([`WallRecord`], [`OpeningRecord`], [`ScanMetadata`])
//! - **Typed entities**: [`WallSegment`] and [`Opening`], obtainable only
//!   through `validate`, which rejects malformed dimensions and transforms
//! - **Poses**: [`PoseTransform`], a fixed 16-element column-major matrix,
//!   and its rigid decomposition [`ElementPose`]
//! - **Calibration**: [`ScaleFactor`], [`ModelFrame`], [`ScanFloorSummary`]
//!
//! ```rust,ignore
//! use roomfit_core::ScanMetadata;
//!
//! let metadata = ScanMetadata::from_json(&json)?;
//! for wall in &metadata.walls {
//!     match wall.validate() {
//!         Ok(segment) => {
//!             println!("{}: {:.2} m²", segment.identifier, segment.dimensions.surface_area())
//!         }
//!         Err(e) => eprintln!("skipping {}: {}", wall.identifier, e),
//!     }
//! }
//! ```

pub mod bounds;
pub mod calibration;
pub mod error;
pub mod pose;
pub mod scan;

pub use bounds::FootprintBounds;
pub use calibration::{
    BoundingBox, BoundingSphere, Confidence, ModelFrame, ScaleFactor, ScanFloorSummary,
    DEFAULT_WALL_HEIGHT,
};
pub use error::{Error, Result};
pub use pose::{ElementPose, PoseTransform};
pub use scan::{
    Opening, OpeningKind, OpeningRecord, ScanMetadata, WallDimensions, WallRecord, WallSegment,
    MIN_WALL_THICKNESS,
};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};
