use std::f64::consts::PI;

use orbit_trace::dynamics::{
    GravityField, SolverError, Tolerances, linspace, propagate_2d, propagate_3d,
    specific_energy_2d,
};

const R_EARTH_M: f64 = 1.496e11; // m
const V_EARTH_M_S: f64 = 29_780.0; // m/s
const YEAR_S: f64 = 3.154e7; // s

fn orbital_period(field: &GravityField, r: f64) -> f64 {
    2.0 * PI * (r.powi(3) / field.mu()).sqrt()
}

#[test]
fn circular_orbit_radius_stays_within_one_percent() {
    let field = GravityField::solar();
    let r = R_EARTH_M;
    let v = field.circular_speed_m_s(r);
    let period = orbital_period(&field, r);

    let t_eval = linspace(0.0, period, 400);
    let trajectory = propagate_2d(
        &field,
        &[r, 0.0, 0.0, v],
        (0.0, period),
        Some(&t_eval),
        Tolerances::default(),
    )
    .expect("circular orbit integrates");

    for (t, y) in trajectory.samples() {
        let radius = (y[0] * y[0] + y[1] * y[1]).sqrt();
        assert!(
            (radius - r).abs() < 0.01 * r,
            "radius drifted to {radius} at t = {t}"
        );
    }
}

#[test]
fn specific_energy_conserved_over_closed_orbit() {
    let field = GravityField::solar();
    let r = R_EARTH_M;
    let v = field.circular_speed_m_s(r);
    let period = orbital_period(&field, r);

    let t_eval = linspace(0.0, period, 200);
    let trajectory = propagate_2d(
        &field,
        &[r, 0.0, 0.0, v],
        (0.0, period),
        Some(&t_eval),
        Tolerances::default(),
    )
    .expect("closed orbit integrates");

    let (_, first) = trajectory.first().expect("samples");
    let (_, last) = trajectory.last().expect("samples");
    let e0 = specific_energy_2d(&field, first);
    let ef = specific_energy_2d(&field, last);
    let relative = ((ef - e0) / e0).abs();
    assert!(relative < 1e-3, "energy drift {relative}");
}

#[test]
fn earth_returns_near_start_after_one_year() {
    let field = GravityField::solar();
    let t_eval = linspace(0.0, YEAR_S, 1000);
    let trajectory = propagate_2d(
        &field,
        &[R_EARTH_M, 0.0, 0.0, V_EARTH_M_S],
        (0.0, YEAR_S),
        Some(&t_eval),
        Tolerances::default(),
    )
    .expect("Earth-like orbit integrates");

    let (_, last) = trajectory.last().expect("samples");
    let miss = ((last[0] - R_EARTH_M).powi(2) + last[1].powi(2)).sqrt();
    assert!(
        miss < 0.05 * R_EARTH_M,
        "ended {miss} m from the start ({:.2}% of r0)",
        100.0 * miss / R_EARTH_M
    );
}

#[test]
fn velocity_reversal_retraces_the_same_path() {
    let field = GravityField::solar();
    let r = R_EARTH_M;
    // Slightly elliptic so the test is not trivially circular; the apse
    // line lies along x, so the reversed orbit is the mirror image in y.
    let v = 1.1 * field.circular_speed_m_s(r);
    let span = (0.0, YEAR_S);
    let t_eval = linspace(span.0, span.1, 500);

    let forward = propagate_2d(&field, &[r, 0.0, 0.0, v], span, Some(&t_eval), Tolerances::default())
        .expect("forward orbit integrates");
    let reversed = propagate_2d(&field, &[r, 0.0, 0.0, -v], span, Some(&t_eval), Tolerances::default())
        .expect("reversed orbit integrates");

    for ((_, a), (_, b)) in forward.samples().zip(reversed.samples()) {
        assert!((a[0] - b[0]).abs() < 1.0, "x diverged: {} vs {}", a[0], b[0]);
        assert!((a[1] + b[1]).abs() < 1.0, "y not mirrored: {} vs {}", a[1], b[1]);
    }
}

#[test]
fn zero_initial_position_is_rejected() {
    let field = GravityField::solar();
    let err = propagate_2d(
        &field,
        &[0.0, 0.0, 0.0, 1_000.0],
        (0.0, YEAR_S),
        None,
        Tolerances::default(),
    )
    .expect_err("zero-magnitude position must fail");
    assert!(matches!(err, SolverError::InvalidInput { .. }), "{err}");
}

#[test]
fn non_finite_state_is_rejected() {
    let field = GravityField::solar();
    let err = propagate_2d(
        &field,
        &[R_EARTH_M, 0.0, f64::NAN, V_EARTH_M_S],
        (0.0, YEAR_S),
        None,
        Tolerances::default(),
    )
    .expect_err("non-finite velocity must fail");
    assert!(matches!(err, SolverError::InvalidInput { .. }), "{err}");
}

#[test]
fn planar_3d_run_matches_2d_run() {
    let field = GravityField::solar();
    let span = (0.0, YEAR_S);
    let t_eval = linspace(span.0, span.1, 400);

    let flat = propagate_2d(
        &field,
        &[R_EARTH_M, 0.0, 0.0, V_EARTH_M_S],
        span,
        Some(&t_eval),
        Tolerances::default(),
    )
    .expect("2D run integrates");
    let spatial = propagate_3d(
        &field,
        &[R_EARTH_M, 0.0, 0.0, 0.0, V_EARTH_M_S, 0.0],
        span,
        Some(&t_eval),
        Tolerances::default(),
    )
    .expect("3D run integrates");

    for ((_, a), (_, b)) in flat.samples().zip(spatial.samples()) {
        assert!((a[0] - b[0]).abs() < 1e-3, "x differs: {} vs {}", a[0], b[0]);
        assert!((a[1] - b[1]).abs() < 1e-3, "y differs: {} vs {}", a[1], b[1]);
        assert_eq!(b[2], 0.0, "z picked up a component");
    }
}

#[test]
fn radial_plunge_surfaces_a_numerical_failure() {
    let field = GravityField::solar();
    // Dropped from rest well inside the system, the body free-falls
    // into the origin in a few seconds; the solver must give up rather
    // than clamp through the singularity.
    let err = propagate_2d(
        &field,
        &[1.0e7, 0.0, 0.0, 0.0],
        (0.0, 10.0),
        None,
        Tolerances::default(),
    )
    .expect_err("plunge through the origin must fail");
    assert!(
        matches!(
            err,
            SolverError::StepSizeUnderflow { .. } | SolverError::MaxStepsExceeded { .. }
        ),
        "{err}"
    );
}

#[test]
fn evaluation_times_outside_span_are_rejected() {
    let field = GravityField::solar();
    let t_eval = [0.0, YEAR_S * 2.0];
    let err = propagate_2d(
        &field,
        &[R_EARTH_M, 0.0, 0.0, V_EARTH_M_S],
        (0.0, YEAR_S),
        Some(&t_eval),
        Tolerances::default(),
    )
    .expect_err("out-of-span evaluation times must fail");
    assert!(matches!(err, SolverError::InvalidInput { .. }), "{err}");
}
