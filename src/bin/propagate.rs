use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use orbit_trace::config::{self, BodyConfig, ScenarioConfig};
use orbit_trace::dynamics::{
    GravityField, Tolerances, Trajectory, linspace, propagate_2d, propagate_3d,
    specific_energy_2d, specific_energy_3d,
};
use orbit_trace::export::summary::{BodySummary, RunSummary, write_summary};
use orbit_trace::export::trajectory::{Record, write_header, writer_for_path};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Integrate planetary trajectories around a central mass"
)]
struct Cli {
    /// Scenario file (YAML or TOML). Defaults to the built-in
    /// inner-planet catalog.
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Trajectory CSV destination; `-` writes to stdout.
    #[arg(long, default_value = "-")]
    output: PathBuf,
    /// Optional JSON run-summary sidecar.
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (scenario, label) = match &cli.scenario {
        Some(path) => (
            config::load_scenario(path)
                .with_context(|| format!("loading scenario {}", path.display()))?,
            path.display().to_string(),
        ),
        None => (
            ScenarioConfig::inner_planets(),
            "inner_planets (built-in)".to_string(),
        ),
    };

    let field = GravityField::new(
        scenario.field.gravitational_constant,
        scenario.field.central_mass_kg,
    );
    let tol = Tolerances {
        atol: scenario.solver.atol,
        rtol: scenario.solver.rtol,
    };
    let span = (scenario.time.t_start_s, scenario.time.t_end_s);
    let t_eval = linspace(span.0, span.1, scenario.time.samples);

    let mut writer = writer_for_path(&cli.output)?;
    write_header(writer.as_mut())?;

    let mut summaries = Vec::new();
    for body in &scenario.bodies {
        let summary = if body.position_m.len() == 2 {
            integrate_2d(&field, body, span, &t_eval, tol, writer.as_mut())?
        } else {
            integrate_3d(&field, body, span, &t_eval, tol, writer.as_mut())?
        };
        summaries.push(summary);
    }
    writer.flush()?;

    if let Some(path) = &cli.summary {
        let run = RunSummary {
            generated_utc: Utc::now().to_rfc3339(),
            scenario: label,
            gravitational_constant: field.gravitational_constant,
            central_mass_kg: field.central_mass_kg,
            bodies: summaries,
        };
        write_summary(path, &run)
            .with_context(|| format!("writing summary {}", path.display()))?;
    }

    Ok(())
}

fn integrate_2d(
    field: &GravityField,
    body: &BodyConfig,
    span: (f64, f64),
    t_eval: &[f64],
    tol: Tolerances,
    writer: &mut dyn Write,
) -> Result<BodySummary> {
    let y0 = [
        body.position_m[0],
        body.position_m[1],
        body.velocity_m_s[0],
        body.velocity_m_s[1],
    ];
    let trajectory = propagate_2d(field, &y0, span, Some(t_eval), tol)
        .with_context(|| format!("integrating {}", body.name))?;
    for (t, y) in trajectory.samples() {
        Record {
            body: &body.name,
            t_s: t,
            position_m: [y[0], y[1], 0.0],
            velocity_m_s: [y[2], y[3], 0.0],
        }
        .write_to(writer)?;
    }
    endpoints(&trajectory, &body.name, |y| {
        ((y[0] * y[0] + y[1] * y[1]).sqrt(), specific_energy_2d(field, y))
    })
}

fn integrate_3d(
    field: &GravityField,
    body: &BodyConfig,
    span: (f64, f64),
    t_eval: &[f64],
    tol: Tolerances,
    writer: &mut dyn Write,
) -> Result<BodySummary> {
    let y0 = [
        body.position_m[0],
        body.position_m[1],
        body.position_m[2],
        body.velocity_m_s[0],
        body.velocity_m_s[1],
        body.velocity_m_s[2],
    ];
    let trajectory = propagate_3d(field, &y0, span, Some(t_eval), tol)
        .with_context(|| format!("integrating {}", body.name))?;
    for (t, y) in trajectory.samples() {
        Record {
            body: &body.name,
            t_s: t,
            position_m: [y[0], y[1], y[2]],
            velocity_m_s: [y[3], y[4], y[5]],
        }
        .write_to(writer)?;
    }
    endpoints(&trajectory, &body.name, |y| {
        (
            (y[0] * y[0] + y[1] * y[1] + y[2] * y[2]).sqrt(),
            specific_energy_3d(field, y),
        )
    })
}

fn endpoints<const N: usize>(
    trajectory: &Trajectory<N>,
    name: &str,
    diagnostics: impl Fn(&[f64; N]) -> (f64, f64),
) -> Result<BodySummary> {
    let (t_start, first) = trajectory.first().context("trajectory has no samples")?;
    let (t_end, last) = trajectory.last().context("trajectory has no samples")?;
    let (initial_radius_m, initial_specific_energy_j_kg) = diagnostics(first);
    let (final_radius_m, final_specific_energy_j_kg) = diagnostics(last);
    Ok(BodySummary {
        name: name.to_string(),
        samples: trajectory.len(),
        t_start_s: t_start,
        t_end_s: t_end,
        initial_radius_m,
        final_radius_m,
        initial_specific_energy_j_kg,
        final_specific_energy_j_kg,
    })
}
