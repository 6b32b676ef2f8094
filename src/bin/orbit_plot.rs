use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use csv::ReaderBuilder;

use orbit_trace::render::{PlotOptions, TrajectoryPlot, render_orbits};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render a static orbit plot from a trajectory CSV"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/orbits.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 900)]
    width: u32,
    #[arg(long, default_value_t = 900)]
    height: u32,
    #[arg(long, default_value = "Planetary trajectories")]
    title: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(&cli.input)
        .with_context(|| format!("opening {}", cli.input))?;

    let headers = reader.headers()?.clone();
    let body_idx = column(&headers, "body")?;
    let x_idx = column(&headers, "x_m")?;
    let y_idx = column(&headers, "y_m")?;

    // Group rows by body, preserving first-seen order.
    let mut plots: Vec<TrajectoryPlot> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let body = record
            .get(body_idx)
            .context("row is missing the body column")?;
        let x: f64 = record
            .get(x_idx)
            .context("row is missing the x_m column")?
            .parse()?;
        let y: f64 = record
            .get(y_idx)
            .context("row is missing the y_m column")?
            .parse()?;

        match plots.iter_mut().find(|p| p.name == body) {
            Some(plot) => plot.xy_m.push((x, y)),
            None => plots.push(TrajectoryPlot {
                name: body.to_string(),
                xy_m: vec![(x, y)],
            }),
        }
    }
    if plots.is_empty() {
        anyhow::bail!("no trajectory rows in {}", cli.input);
    }

    let options = PlotOptions {
        width: cli.width,
        height: cli.height,
        title: cli.title.clone(),
        labels: true,
    };
    render_orbits(&cli.output, &options, &plots)
        .with_context(|| format!("rendering {}", cli.output.display()))?;
    Ok(())
}

fn column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("CSV is missing the `{name}` column"))
}
