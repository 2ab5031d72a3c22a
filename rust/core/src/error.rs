// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for scan records and calibration inputs.

use thiserror::Error;

/// Result type for data-contract operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the parsing boundary
///
/// None of these abort an overlay build: the engine turns each one into a
/// per-element skip or a calibration fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("dimensions must have exactly 3 components, got {0}")]
    DimensionCount(usize),

    #[error("dimension component {index} is not a finite non-negative number ({value})")]
    InvalidDimension { index: usize, value: f64 },

    #[error("transform must have exactly 16 components, got {0}")]
    TransformLength(usize),

    #[error("transform component {index} is not finite ({value})")]
    NonFiniteTransform { index: usize, value: f64 },

    #[error("invalid scale factor: {0}")]
    InvalidScaleFactor(String),

    #[error("invalid model frame: {0}")]
    InvalidModelFrame(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl Error {
    /// Name of the record field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Error::DimensionCount(_) | Error::InvalidDimension { .. } => "dimensions",
            Error::TransformLength(_) | Error::NonFiniteTransform { .. } => "transform",
            Error::InvalidScaleFactor(_) => "scaleFactor",
            Error::InvalidModelFrame(_) => "modelFrame",
            Error::Json(_) => "json",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
