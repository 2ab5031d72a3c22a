// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables.

use roomfit_geometry::{AlignmentStrategy, OverlayConfig, Theme};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Overlay color scheme.
    pub theme: Theme,
    /// Alignment strategy override, automatic when unset.
    pub strategy: Option<AlignmentStrategy>,
    /// Emit wall corner markers.
    pub corner_markers: bool,
    /// Decimal places in dimension labels.
    pub label_precision: usize,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            theme: lookup("ROOMFIT_THEME")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            strategy: lookup("ROOMFIT_STRATEGY").and_then(|v| v.parse().ok()),
            corner_markers: lookup("ROOMFIT_CORNER_MARKERS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            label_precision: lookup("ROOMFIT_LABEL_PRECISION")
                .unwrap_or_else(|| "2".into())
                .parse()
                .unwrap_or(2),
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| "info,roomfit_geometry=debug".into()),
        }
    }

    /// Engine configuration for one overlay build.
    pub fn overlay_config(&self) -> OverlayConfig {
        OverlayConfig {
            theme: self.theme,
            corner_markers: self.corner_markers,
            strategy_override: self.strategy,
            label_precision: self.label_precision,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
