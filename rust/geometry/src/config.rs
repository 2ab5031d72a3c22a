// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Overlay configuration and theme palettes

use crate::alignment::AlignmentStrategy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// RGBA color, components in 0..=1
pub type Rgba = [f32; 4];

/// Host color scheme; affects colors only, never geometry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette {
                wall_line: [0.13, 0.16, 0.22, 1.0],
                door: [0.92, 0.45, 0.12, 0.35],
                window: [0.15, 0.50, 0.90, 0.35],
                corner_marker: [0.86, 0.15, 0.15, 1.0],
                label_text: [0.07, 0.09, 0.13, 1.0],
                label_background: [1.0, 1.0, 1.0, 0.85],
            },
            Theme::Dark => Palette {
                wall_line: [0.90, 0.92, 0.95, 1.0],
                door: [0.98, 0.62, 0.30, 0.40],
                window: [0.40, 0.70, 1.0, 0.40],
                corner_marker: [0.98, 0.44, 0.44, 1.0],
                label_text: [0.96, 0.97, 0.98, 1.0],
                label_background: [0.07, 0.09, 0.13, 0.85],
            },
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}' (expected light or dark)", other)),
        }
    }
}

/// Colors for every overlay drawable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub wall_line: Rgba,
    pub door: Rgba,
    pub window: Rgba,
    pub corner_marker: Rgba,
    pub label_text: Rgba,
    pub label_background: Rgba,
}

/// Configuration for one overlay build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    /// Color scheme
    pub theme: Theme,
    /// Emit a point set with every wall corner
    pub corner_markers: bool,
    /// Replace the automatic alignment choice when the alternative is available
    pub strategy_override: Option<AlignmentStrategy>,
    /// Decimal places in label text
    pub label_precision: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            corner_markers: false,
            strategy_override: None,
            label_precision: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parse() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(" Light ".parse::<Theme>(), Ok(Theme::Light));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_palettes_differ_by_theme() {
        let light = Theme::Light.palette();
        let dark = Theme::Dark.palette();
        assert_ne!(light.wall_line, dark.wall_line);
        assert_ne!(light.label_text, dark.label_text);
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: OverlayConfig = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert!(!config.corner_markers);
        assert_eq!(config.strategy_override, None);
        assert_eq!(config.label_precision, 2);
    }
}
