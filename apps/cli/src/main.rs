// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! roomfit - build a measurement overlay from a room scan and print a summary

mod config;
mod input;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use input::InputBundle;
use roomfit_geometry::{build_measurement_overlay, AlignmentStrategy, MeasurementGeometry, Theme};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roomfit")]
#[command(
    about = "Align a room scan to a model and build its measurement overlay",
    long_about = None
)]
struct Cli {
    /// Input bundle (JSON with metadata, modelFrame, scaleFactor, floorSummary)
    input: PathBuf,

    /// Color theme (light or dark)
    #[arg(long)]
    theme: Option<Theme>,

    /// Alignment strategy override (firstWallToMin, minToMin, maxToMax, centerToCenter, unaligned)
    #[arg(long)]
    strategy: Option<AlignmentStrategy>,

    /// Emit wall corner markers
    #[arg(long)]
    corner_markers: bool,

    /// Build with visualization turned off
    #[arg(long)]
    disabled: bool,

    /// Write the overlay as pretty JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if cli.strategy.is_some() {
        config.strategy = cli.strategy;
    }
    config.corner_markers |= cli.corner_markers;

    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.clone())
        .with_writer(std::io::stderr)
        .init();

    let bundle = InputBundle::load(&cli.input)?;
    let request = bundle.request(!cli.disabled);
    let overlay = build_measurement_overlay(&request, &config.overlay_config());

    print_summary(&overlay);

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&overlay)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote overlay");
    }

    Ok(())
}

fn print_summary(overlay: &MeasurementGeometry) {
    println!("{} ({:?})", overlay.name, overlay.state);
    if overlay.is_empty() {
        println!("  nothing to draw");
    }
    println!(
        "  scale: {:.4} horizontal, {:.4} vertical ({})",
        overlay.scale.horizontal_scale, overlay.scale.vertical_scale, overlay.scale.confidence
    );
    println!(
        "  floors: model {:.3}, scan {:.3}",
        overlay.scale.model_floor_y, overlay.scale.scan_floor_y
    );
    println!(
        "  alignment: {} ({:.3}, {:.3})",
        overlay.alignment.strategy, overlay.alignment.offset.x, overlay.alignment.offset.z
    );
    println!(
        "  walls: {}  openings: {}  labels: {}",
        overlay.walls.len(),
        overlay.openings.len(),
        overlay.labels.len()
    );
    println!(
        "  buffers: {} vertices, {} segments, {} triangles",
        overlay.vertex_count(),
        overlay.segment_count(),
        overlay.triangle_count()
    );

    let mut areas: Vec<_> = overlay.surface_areas.iter().collect();
    areas.sort_by(|a, b| a.0.cmp(b.0));
    for (identifier, area) in areas {
        println!("    {:<24} {:>8.2} m²", identifier, area);
    }
    println!("  total surface area: {:.2} m²", overlay.total_surface_area);

    for warning in &overlay.warnings {
        println!("  warning: {}", warning);
    }
}
