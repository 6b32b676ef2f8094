//! Core constants, units, and shared primitives for the orbit_trace workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Newtonian gravitational constant (m³ kg⁻¹ s⁻²).
    pub const GRAVITATIONAL_CONSTANT: f64 = 6.6743e-11;
    /// Mass of the Sun (kg).
    pub const SOLAR_MASS_KG: f64 = 1.989e30;
    /// Metres per astronomical unit.
    pub const AU_M: f64 = 1.495_978_707e11;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Seconds per year, to the precision used throughout the scenarios.
    pub const YEAR_SECONDS: f64 = 3.154e7;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::AU_M;

    /// Convert metres to astronomical units.
    #[inline]
    pub fn m_to_au(v: f64) -> f64 {
        v / AU_M
    }

    /// Convert astronomical units to metres.
    #[inline]
    pub fn au_to_m(v: f64) -> f64 {
        v * AU_M
    }

    /// Convert metres per second to kilometres per second.
    #[inline]
    pub fn ms_to_kms(v: f64) -> f64 {
        v / 1_000.0
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::SECONDS_PER_DAY;

    /// Convert days to seconds.
    #[inline]
    pub fn days_to_seconds(days: f64) -> f64 {
        days * SECONDS_PER_DAY
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }
}

/// Minimal vector helpers shared by the 2D and 3D state types.
pub mod vector {
    /// Euclidean norm of a fixed-size vector.
    #[inline]
    pub fn norm<const N: usize>(v: &[f64; N]) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two fixed-size vectors.
    #[inline]
    pub fn dot<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
        let mut acc = 0.0;
        for i in 0..N {
            acc += a[i] * b[i];
        }
        acc
    }
}
