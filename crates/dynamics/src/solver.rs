//! Adaptive embedded Runge-Kutta integration.
//!
//! Implements the Dormand-Prince 5(4) pair with proportional step-size
//! control and FSAL reuse. Solutions can be sampled either at the
//! accepted steps or at a caller-supplied, sorted set of evaluation
//! times via cubic Hermite interpolation between accepted steps.

use thiserror::Error;

/// Hard cap on accepted plus rejected steps for a single integration.
const MAX_STEPS: usize = 1_000_000;

/// Step-size controller bounds and safety factor.
const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

/// A first-order ODE system `dy/dt = f(t, y)` over a fixed-size state.
///
/// Implementations must be pure functions of `(t, y)` with no interior
/// mutability; the `Send + Sync` bound lets callers run independent
/// integrations from any thread.
pub trait OdeSystem<const N: usize>: Send + Sync {
    fn rhs(&self, t: f64, y: &[f64; N], dydt: &mut [f64; N]);
}

/// Absolute and relative error tolerances for the step controller.
#[derive(Debug, Clone, Copy)]
pub struct Tolerances {
    pub atol: f64,
    pub rtol: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            atol: 1e-6,
            rtol: 1e-6,
        }
    }
}

/// An ordered sequence of `(time, state)` samples produced by one
/// integration. Immutable once returned; owned by the caller.
#[derive(Debug, Clone)]
pub struct Trajectory<const N: usize> {
    pub times: Vec<f64>,
    pub states: Vec<[f64; N]>,
}

impl<const N: usize> Trajectory<N> {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// First `(time, state)` sample, if any.
    pub fn first(&self) -> Option<(f64, &[f64; N])> {
        self.times.first().map(|t| (*t, &self.states[0]))
    }

    /// Last `(time, state)` sample, if any.
    pub fn last(&self) -> Option<(f64, &[f64; N])> {
        self.times
            .last()
            .map(|t| (*t, &self.states[self.states.len() - 1]))
    }

    /// Iterate over `(time, state)` samples in order.
    pub fn samples(&self) -> impl Iterator<Item = (f64, &[f64; N])> {
        self.times.iter().copied().zip(self.states.iter())
    }
}

/// Errors surfaced by the integrator. Invalid inputs are rejected before
/// the first step; numerical failures carry the time reached, with no
/// retry or partial-result recovery beyond that.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
    #[error("step size underflow at t = {t} (trajectory approaching a singularity?)")]
    StepSizeUnderflow { t: f64 },
    #[error("exceeded {max_steps} steps at t = {t} without reaching the end of the span")]
    MaxStepsExceeded { t: f64, max_steps: usize },
}

impl SolverError {
    fn invalid(reason: impl Into<String>) -> Self {
        SolverError::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// `n` uniformly spaced times covering `[t0, t1]` inclusive.
///
/// Panics if `n < 2`; use the raw span for single-point evaluation.
pub fn linspace(t0: f64, t1: f64, n: usize) -> Vec<f64> {
    assert!(n >= 2, "linspace needs at least two points");
    let dt = (t1 - t0) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { t1 } else { t0 + i as f64 * dt })
        .collect()
}

// Dormand-Prince 5(4) tableau. The fifth-order weights are the last row
// of A (FSAL), so the seventh stage doubles as the first stage of the
// next step.
const C: [f64; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];
const A: [[f64; 6]; 7] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
        0.0,
    ],
    [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
];
/// Difference between the fifth- and embedded fourth-order weights.
const E: [f64; 7] = [
    71.0 / 57600.0,
    0.0,
    -71.0 / 16695.0,
    71.0 / 1920.0,
    -17253.0 / 339200.0,
    22.0 / 525.0,
    -1.0 / 40.0,
];

/// Integrate `system` from `span.0` to `span.1` starting at `y0`.
///
/// With `t_eval = Some(times)` the trajectory is sampled exactly at the
/// requested times (which must be finite, sorted, and inside the span);
/// otherwise it contains the initial state followed by every accepted
/// step.
pub fn integrate<const N: usize, S: OdeSystem<N>>(
    system: &S,
    y0: &[f64; N],
    span: (f64, f64),
    t_eval: Option<&[f64]>,
    tol: Tolerances,
) -> Result<Trajectory<N>, SolverError> {
    let (t0, t1) = span;
    validate_inputs(y0, span, t_eval, tol)?;

    let mut trajectory = Trajectory {
        times: Vec::new(),
        states: Vec::new(),
    };

    // Index of the next requested evaluation time still to be emitted.
    let mut eval_idx = 0;
    match t_eval {
        Some(times) => {
            // Requested times equal to t0 are served by the initial state.
            while eval_idx < times.len() && times[eval_idx] <= t0 {
                trajectory.times.push(times[eval_idx]);
                trajectory.states.push(*y0);
                eval_idx += 1;
            }
        }
        None => {
            trajectory.times.push(t0);
            trajectory.states.push(*y0);
        }
    }

    let mut t = t0;
    let mut y = *y0;
    let mut k = [[0.0; N]; 7];
    system.rhs(t, &y, &mut k[0]);

    let mut h = ((t1 - t0) / 100.0).min(t1 - t0);
    let mut steps = 0usize;

    while t < t1 {
        steps += 1;
        if steps > MAX_STEPS {
            return Err(SolverError::MaxStepsExceeded {
                t,
                max_steps: MAX_STEPS,
            });
        }

        let h_floor = 16.0 * f64::EPSILON * t.abs().max(t1 - t0);
        if h < h_floor {
            return Err(SolverError::StepSizeUnderflow { t });
        }
        let mut last = false;
        if t + h >= t1 {
            h = t1 - t;
            last = true;
        }

        // Stages 2..=7; stage 7 is evaluated at the candidate solution.
        let mut y_new = [0.0; N];
        for s in 1..7 {
            let mut ys = y;
            for i in 0..N {
                let mut acc = 0.0;
                for (j, kj) in k.iter().enumerate().take(s) {
                    acc += A[s][j] * kj[i];
                }
                ys[i] += h * acc;
            }
            if s == 6 {
                y_new = ys;
            }
            let mut ks = [0.0; N];
            system.rhs(t + C[s] * h, &ys, &mut ks);
            k[s] = ks;
        }

        // Weighted max-norm of the embedded error estimate. A max norm
        // keeps the step sequence independent of padding the state with
        // identically-zero components.
        let mut err = 0.0f64;
        for i in 0..N {
            let mut e = 0.0;
            for (j, kj) in k.iter().enumerate() {
                e += E[j] * kj[i];
            }
            let scale = tol.atol + tol.rtol * y[i].abs().max(y_new[i].abs());
            err = err.max((h * e / scale).abs());
        }

        if !err.is_finite() {
            return Err(SolverError::StepSizeUnderflow { t });
        }

        if err <= 1.0 {
            // Snap the final step onto t1 so accumulated rounding cannot
            // leave an unreachable sliver of the span.
            let t_new = if last { t1 } else { t + h };

            match t_eval {
                Some(times) => {
                    while eval_idx < times.len() && times[eval_idx] <= t_new {
                        let s = times[eval_idx];
                        let ys = hermite(t, h, &y, &k[0], &y_new, &k[6], s);
                        trajectory.times.push(s);
                        trajectory.states.push(ys);
                        eval_idx += 1;
                    }
                }
                None => {
                    trajectory.times.push(t_new);
                    trajectory.states.push(y_new);
                }
            }

            t = t_new;
            y = y_new;
            k[0] = k[6]; // FSAL
        }

        let factor = if err == 0.0 {
            MAX_FACTOR
        } else {
            (SAFETY * err.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
        };
        h *= factor;
    }

    Ok(trajectory)
}

/// Cubic Hermite interpolant over one accepted step.
fn hermite<const N: usize>(
    t: f64,
    h: f64,
    y0: &[f64; N],
    f0: &[f64; N],
    y1: &[f64; N],
    f1: &[f64; N],
    s: f64,
) -> [f64; N] {
    let theta = ((s - t) / h).clamp(0.0, 1.0);
    let t2 = theta * theta;
    let t3 = t2 * theta;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + theta;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    let mut out = [0.0; N];
    for i in 0..N {
        out[i] = h00 * y0[i] + h10 * h * f0[i] + h01 * y1[i] + h11 * h * f1[i];
    }
    out
}

fn validate_inputs<const N: usize>(
    y0: &[f64; N],
    span: (f64, f64),
    t_eval: Option<&[f64]>,
    tol: Tolerances,
) -> Result<(), SolverError> {
    let (t0, t1) = span;
    if !t0.is_finite() || !t1.is_finite() || t1 <= t0 {
        return Err(SolverError::invalid(format!(
            "time span ({t0}, {t1}) must be finite with t1 > t0"
        )));
    }
    if y0.iter().any(|v| !v.is_finite()) {
        return Err(SolverError::invalid(
            "initial state contains a non-finite component",
        ));
    }
    if !(tol.atol > 0.0) || !(tol.rtol > 0.0) {
        return Err(SolverError::invalid("tolerances must be positive"));
    }
    if let Some(times) = t_eval {
        if times.is_empty() {
            return Err(SolverError::invalid("evaluation times are empty"));
        }
        if times.iter().any(|s| !s.is_finite()) {
            return Err(SolverError::invalid("evaluation times must be finite"));
        }
        if times.windows(2).any(|w| w[1] < w[0]) {
            return Err(SolverError::invalid("evaluation times must be sorted"));
        }
        let (lo, hi) = (times[0], times[times.len() - 1]);
        if lo < t0 || hi > t1 {
            return Err(SolverError::invalid(format!(
                "evaluation times [{lo}, {hi}] fall outside the span ({t0}, {t1})"
            )));
        }
    }
    Ok(())
}
