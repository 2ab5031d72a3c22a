// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RoomFit Geometry
//!
//! Reconciles a room scan's coordinate frame with a separately loaded and
//! scaled model of the same room, and builds measurement overlays (wall
//! wireframes, dimension labels, door and window markers, surface-area
//! totals) in model space.
//!
//! Pipeline, leaves first:
//!
//! - [`resolve_scale`]: horizontal/vertical scale and both floor references
//! - [`resolve_alignment`]: one X/Z offset shared by every element
//! - [`PlacementContext`]: maps a scan pose into model space
//! - [`build_wall`] / [`build_opening`]: per-element geometry
//! - [`build_measurement_overlay`]: orchestration and failure containment
//!
//! ```rust,ignore
//! use roomfit_geometry::{build_measurement_overlay, OverlayConfig, OverlayRequest};
//!
//! let request = OverlayRequest::new(&metadata)
//!     .with_model_frame(&frame)
//!     .with_scale_factor(&scale);
//! let overlay = build_measurement_overlay(&request, &OverlayConfig::default());
//! println!("{:.2} m² across {} walls", overlay.total_surface_area, overlay.walls.len());
//! ```

pub mod alignment;
pub mod assembler;
pub mod compose;
pub mod config;
pub mod cuboid;
pub mod label;
pub mod opening;
pub mod overlay;
pub mod primitives;
pub mod resolve;
pub mod wall;
pub mod warning;

pub use alignment::{
    resolve_alignment, scan_footprint, AlignmentAlternatives, AlignmentStrategy,
    HorizontalAlignment, Offset2,
};
pub use assembler::{build_measurement_overlay, OverlayRequest};
pub use compose::PlacementContext;
pub use config::{OverlayConfig, Palette, Rgba, Theme};
pub use label::DimensionLabel;
pub use opening::{build_opening, OpeningOverlay};
pub use overlay::{CornerMarkers, MeasurementGeometry, OverlayState, GROUP_NAME};
pub use primitives::{LineSet, Mesh, PointSet};
pub use resolve::{resolve_scale, ResolvedScale};
pub use wall::{build_wall, WallOverlay};
pub use warning::OverlayWarning;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};
