//! Newtonian point-mass gravity about a central body at the origin.
//!
//! The right-hand side implements
//!
//! ```text
//! dposition/dt = velocity
//! dvelocity/dt = -G * M * position / |position|^3
//! ```
//!
//! for 2D (`[x, y, vx, vy]`) and 3D (`[x, y, z, vx, vy, vz]`) states.
//! There is no planet-planet interaction: every body is an independent
//! test particle in the field of the central mass.

use orbit_core::constants::{GRAVITATIONAL_CONSTANT, SOLAR_MASS_KG};

use crate::solver::{self, OdeSystem, SolverError, Tolerances, Trajectory};

/// 2D state vector `[x, y, vx, vy]` in metres and metres per second.
pub type State2 = [f64; 4];
/// 3D state vector `[x, y, z, vx, vy, vz]` in metres and metres per second.
pub type State3 = [f64; 6];

/// The physical configuration of a run: gravitational constant and
/// central mass. Immutable, passed explicitly into every propagation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    pub gravitational_constant: f64,
    pub central_mass_kg: f64,
}

impl GravityField {
    pub fn new(gravitational_constant: f64, central_mass_kg: f64) -> Self {
        Self {
            gravitational_constant,
            central_mass_kg,
        }
    }

    /// The Sun with the CODATA gravitational constant.
    pub fn solar() -> Self {
        Self::new(GRAVITATIONAL_CONSTANT, SOLAR_MASS_KG)
    }

    /// Standard gravitational parameter `mu = G * M` (m³/s²).
    #[inline]
    pub fn mu(&self) -> f64 {
        self.gravitational_constant * self.central_mass_kg
    }

    /// Speed of a circular orbit at radius `r` metres.
    #[inline]
    pub fn circular_speed_m_s(&self, r: f64) -> f64 {
        (self.mu() / r).sqrt()
    }

    fn validate(&self) -> Result<(), SolverError> {
        if !(self.gravitational_constant > 0.0) || !self.gravitational_constant.is_finite() {
            return Err(invalid("gravitational constant must be finite and > 0"));
        }
        if !(self.central_mass_kg > 0.0) || !self.central_mass_kg.is_finite() {
            return Err(invalid("central mass must be finite and > 0"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> SolverError {
    SolverError::InvalidInput {
        reason: reason.to_string(),
    }
}

/// 2D point-mass gravity as an [`OdeSystem`].
pub struct PointMassGravity2 {
    mu: f64,
}

impl PointMassGravity2 {
    pub fn new(field: &GravityField) -> Self {
        Self { mu: field.mu() }
    }
}

impl OdeSystem<4> for PointMassGravity2 {
    fn rhs(&self, _t: f64, y: &[f64; 4], dydt: &mut [f64; 4]) {
        let r2 = y[0] * y[0] + y[1] * y[1];
        let r = r2.sqrt();
        let mu_r3 = self.mu / (r2 * r);

        dydt[0] = y[2];
        dydt[1] = y[3];
        dydt[2] = -mu_r3 * y[0];
        dydt[3] = -mu_r3 * y[1];
    }
}

/// 3D point-mass gravity as an [`OdeSystem`].
pub struct PointMassGravity3 {
    mu: f64,
}

impl PointMassGravity3 {
    pub fn new(field: &GravityField) -> Self {
        Self { mu: field.mu() }
    }
}

impl OdeSystem<6> for PointMassGravity3 {
    fn rhs(&self, _t: f64, y: &[f64; 6], dydt: &mut [f64; 6]) {
        let r2 = y[0] * y[0] + y[1] * y[1] + y[2] * y[2];
        let r = r2.sqrt();
        let mu_r3 = self.mu / (r2 * r);

        dydt[0] = y[3];
        dydt[1] = y[4];
        dydt[2] = y[5];
        dydt[3] = -mu_r3 * y[0];
        dydt[4] = -mu_r3 * y[1];
        dydt[5] = -mu_r3 * y[2];
    }
}

/// Propagate a 2D state through `field` over `span`.
///
/// Rejects a zero-magnitude or non-finite initial position before any
/// stepping; a trajectory that later falls toward the origin surfaces
/// as a numerical failure from the solver.
pub fn propagate_2d(
    field: &GravityField,
    y0: &State2,
    span: (f64, f64),
    t_eval: Option<&[f64]>,
    tol: Tolerances,
) -> Result<Trajectory<4>, SolverError> {
    field.validate()?;
    check_position(&[y0[0], y0[1]])?;
    solver::integrate(&PointMassGravity2::new(field), y0, span, t_eval, tol)
}

/// Propagate a 3D state through `field` over `span`.
pub fn propagate_3d(
    field: &GravityField,
    y0: &State3,
    span: (f64, f64),
    t_eval: Option<&[f64]>,
    tol: Tolerances,
) -> Result<Trajectory<6>, SolverError> {
    field.validate()?;
    check_position(&[y0[0], y0[1], y0[2]])?;
    solver::integrate(&PointMassGravity3::new(field), y0, span, t_eval, tol)
}

fn check_position<const N: usize>(pos: &[f64; N]) -> Result<(), SolverError> {
    if pos.iter().any(|v| !v.is_finite()) {
        return Err(invalid("initial position contains a non-finite component"));
    }
    if orbit_core::vector::norm(pos) == 0.0 {
        return Err(invalid(
            "initial position magnitude is zero (singular configuration)",
        ));
    }
    Ok(())
}

/// Specific orbital energy `v²/2 - mu/r` (J/kg) of a 2D state.
pub fn specific_energy_2d(field: &GravityField, y: &State2) -> f64 {
    let r = (y[0] * y[0] + y[1] * y[1]).sqrt();
    let v2 = y[2] * y[2] + y[3] * y[3];
    0.5 * v2 - field.mu() / r
}

/// Specific orbital energy `v²/2 - mu/r` (J/kg) of a 3D state.
pub fn specific_energy_3d(field: &GravityField, y: &State3) -> f64 {
    let r = (y[0] * y[0] + y[1] * y[1] + y[2] * y[2]).sqrt();
    let v2 = y[3] * y[3] + y[4] * y[4] + y[5] * y[5];
    0.5 * v2 - field.mu() / r
}
