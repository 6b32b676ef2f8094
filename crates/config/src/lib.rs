//! Scenario models and loaders for the orbit_trace workspace.
//!
//! A scenario bundles the gravitational field, the evaluation time
//! grid, solver tolerances, and the initial conditions of every body.
//! Scenarios load from YAML by default or TOML by file extension; the
//! built-in inner-planet catalog covers the common demo case without
//! any file at all.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use orbit_core::constants::{GRAVITATIONAL_CONSTANT, SOLAR_MASS_KG, YEAR_SECONDS};

/// Gravitational field parameters; both fields default to the Sun.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct FieldConfig {
    pub gravitational_constant: f64,
    pub central_mass_kg: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            central_mass_kg: SOLAR_MASS_KG,
        }
    }
}

/// Uniform evaluation grid over the integration span.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct TimeGridConfig {
    #[serde(default)]
    pub t_start_s: f64,
    pub t_end_s: f64,
    #[serde(default = "default_samples")]
    pub samples: usize,
}

fn default_samples() -> usize {
    1_000
}

/// Solver tolerances, defaulted to the integrator's own defaults.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct SolverConfig {
    pub atol: f64,
    pub rtol: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            atol: 1e-6,
            rtol: 1e-6,
        }
    }
}

/// Initial conditions for a single body. Position and velocity must
/// both have two components (2D) or both have three (3D).
#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub position_m: Vec<f64>,
    pub velocity_m_s: Vec<f64>,
}

/// Top-level scenario.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub field: FieldConfig,
    pub time: TimeGridConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    pub bodies: Vec<BodyConfig>,
}

/// Errors that can occur while loading or validating scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("scenario defines no bodies")]
    NoBodies,
    #[error("body `{name}`: {reason}")]
    InvalidBody { name: String, reason: String },
    #[error("time grid: {0}")]
    InvalidTimeGrid(String),
}

/// Load a scenario from a YAML or TOML file, dispatching on extension,
/// and validate it.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ScenarioError> {
    let path = path.as_ref();
    let scenario: ScenarioConfig = if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)?
    } else {
        let reader = File::open(path)?;
        serde_yaml::from_reader(reader)?
    };
    scenario.validate()?;
    Ok(scenario)
}

/// Parse and validate a scenario from a YAML string.
pub fn from_yaml_str(contents: &str) -> Result<ScenarioConfig, ScenarioError> {
    let scenario: ScenarioConfig = serde_yaml::from_str(contents)?;
    scenario.validate()?;
    Ok(scenario)
}

impl ScenarioConfig {
    /// The classic four inner planets around the Sun: one year of
    /// flight, a thousand uniform samples.
    pub fn inner_planets() -> Self {
        let planet = |name: &str, x0: f64, vy0: f64| BodyConfig {
            name: name.to_string(),
            position_m: vec![x0, 0.0],
            velocity_m_s: vec![0.0, vy0],
        };
        Self {
            field: FieldConfig::default(),
            time: TimeGridConfig {
                t_start_s: 0.0,
                t_end_s: YEAR_SECONDS,
                samples: default_samples(),
            },
            solver: SolverConfig::default(),
            bodies: vec![
                planet("Mercury", 5.79e10, 47_400.0),
                planet("Venus", 1.082e11, 35_000.0),
                planet("Earth", 1.496e11, 29_780.0),
                planet("Mars", 2.279e11, 24_100.0),
            ],
        }
    }

    /// Structural validation; solver-level input checks (finiteness,
    /// singular positions) stay with the integrator.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.bodies.is_empty() {
            return Err(ScenarioError::NoBodies);
        }
        if !self.time.t_end_s.is_finite()
            || !self.time.t_start_s.is_finite()
            || self.time.t_end_s <= self.time.t_start_s
        {
            return Err(ScenarioError::InvalidTimeGrid(format!(
                "span ({}, {}) must be finite with t_end > t_start",
                self.time.t_start_s, self.time.t_end_s
            )));
        }
        if self.time.samples < 2 {
            return Err(ScenarioError::InvalidTimeGrid(
                "at least two samples are required".to_string(),
            ));
        }
        for body in &self.bodies {
            let dim = body.position_m.len();
            if dim != 2 && dim != 3 {
                return Err(invalid_body(body, "position must have 2 or 3 components"));
            }
            if body.velocity_m_s.len() != dim {
                return Err(invalid_body(
                    body,
                    "position and velocity must have the same dimension",
                ));
            }
        }
        Ok(())
    }
}

fn invalid_body(body: &BodyConfig, reason: &str) -> ScenarioError {
    ScenarioError::InvalidBody {
        name: body.name.clone(),
        reason: reason.to_string(),
    }
}
