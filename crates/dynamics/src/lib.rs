//! Gravitational trajectory integration.
//!
//! `solver` holds the general-purpose adaptive Runge-Kutta machinery;
//! `gravity` holds the one problem-specific piece, the point-mass
//! right-hand side, together with validated propagation entry points.

pub mod gravity;
pub mod solver;

pub use gravity::{
    GravityField, State2, State3, propagate_2d, propagate_3d, specific_energy_2d,
    specific_energy_3d,
};
pub use solver::{OdeSystem, SolverError, Tolerances, Trajectory, linspace};
