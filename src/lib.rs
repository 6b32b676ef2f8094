//! Gravitational trajectory integration with static plot rendering.
//!
//! The numerical core lives in `orbit_dynamics`; this facade re-exports
//! the member crates so front-ends (CLI binaries, tests) address one
//! coherent API, and adds the optional plotting adapter, which consumes
//! trajectories without the dynamics crate ever learning about it.

pub mod render;

pub use orbit_config as config;
pub use orbit_core::{constants, time, units, vector};
pub use orbit_dynamics as dynamics;
pub use orbit_export as export;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
