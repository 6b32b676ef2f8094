//! Static orbit plotting built on plotters.
//!
//! A deliberately thin adapter: it accepts plain coordinate sequences
//! and draws one equal-scale chart with the central body at the origin.
//! The dynamics crates know nothing about it.

use std::fs;
use std::path::Path;

use plotters::prelude::*;
use thiserror::Error;

use orbit_core::units::m_to_au;

/// One body's path in the plot, positions in metres.
#[derive(Debug, Clone)]
pub struct TrajectoryPlot {
    pub name: String,
    pub xy_m: Vec<(f64, f64)>,
}

/// Chart options. An empty title and `labels: false` render a bare
/// canvas with no text, which keeps headless environments font-free.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub labels: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 900,
            height: 900,
            title: "Planetary trajectories".to_string(),
            labels: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to prepare output path: {0}")]
    Io(#[from] std::io::Error),
    #[error("output path contains invalid UTF-8")]
    InvalidPath,
    #[error("nothing to plot: no trajectory has any sample")]
    Empty,
    #[error("plotting failed: {0}")]
    Backend(String),
}

/// Fixed path palette, in catalog order (Mercury, Venus, Earth, Mars,
/// then spares).
const PALETTE: [RGBColor; 6] = [
    RGBColor(139, 69, 19),
    RGBColor(218, 165, 32),
    RGBColor(30, 100, 200),
    RGBColor(200, 40, 40),
    RGBColor(90, 160, 90),
    RGBColor(120, 120, 120),
];

/// Render trajectories into a PNG at `output`. Axes are in AU with a
/// common symmetric range so orbits keep their aspect ratio; the
/// central mass is marked at the origin.
pub fn render_orbits(
    output: &Path,
    options: &PlotOptions,
    trajectories: &[TrajectoryPlot],
) -> Result<(), RenderError> {
    let mut extent_au = 0.0f64;
    for trajectory in trajectories {
        for &(x, y) in &trajectory.xy_m {
            extent_au = extent_au.max(m_to_au(x).abs()).max(m_to_au(y).abs());
        }
    }
    if extent_au == 0.0 {
        return Err(RenderError::Empty);
    }
    let range = extent_au * 1.05;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = output.to_str().ok_or(RenderError::InvalidPath)?;

    let root = BitMapBackend::new(output_str, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE).map_err(backend)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if options.labels {
        builder
            .caption(options.title.clone(), ("sans-serif", 24))
            .x_label_area_size(50)
            .y_label_area_size(60);
    }
    let mut chart = builder
        .build_cartesian_2d(-range..range, -range..range)
        .map_err(backend)?;

    let mut mesh = chart.configure_mesh();
    if options.labels {
        mesh.x_desc("x (AU)").y_desc("y (AU)").x_labels(8).y_labels(8);
    } else {
        mesh.disable_mesh().x_labels(0).y_labels(0);
    }
    mesh.draw().map_err(backend)?;

    // Central mass at the origin.
    chart
        .draw_series(std::iter::once(Circle::new(
            (0.0, 0.0),
            6,
            RGBColor(240, 200, 40).filled(),
        )))
        .map_err(backend)?;

    for (idx, trajectory) in trajectories.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        let points = trajectory
            .xy_m
            .iter()
            .map(|&(x, y)| (m_to_au(x), m_to_au(y)));
        let series = chart
            .draw_series(LineSeries::new(points, &color))
            .map_err(backend)?;
        if options.labels {
            series
                .label(trajectory.name.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color));
        }
    }

    if options.labels {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(backend)?;
    }

    root.present().map_err(backend)?;
    Ok(())
}

fn backend<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Backend(err.to_string())
}
