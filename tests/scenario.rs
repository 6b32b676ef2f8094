use std::path::Path;

use orbit_trace::config::{ScenarioConfig, ScenarioError, from_yaml_str, load_scenario};
use orbit_trace::constants::{GRAVITATIONAL_CONSTANT, SOLAR_MASS_KG, YEAR_SECONDS};

#[test]
fn minimal_yaml_fills_defaults() {
    let scenario = from_yaml_str(
        r#"
time:
  t_end_s: 3.154e7
bodies:
  - name: Earth
    position_m: [1.496e11, 0.0]
    velocity_m_s: [0.0, 29780.0]
"#,
    )
    .expect("minimal scenario parses");

    assert_eq!(scenario.field.gravitational_constant, GRAVITATIONAL_CONSTANT);
    assert_eq!(scenario.field.central_mass_kg, SOLAR_MASS_KG);
    assert_eq!(scenario.time.t_start_s, 0.0);
    assert_eq!(scenario.time.samples, 1000);
    assert_eq!(scenario.solver.atol, 1e-6);
    assert_eq!(scenario.bodies.len(), 1);
}

#[test]
fn empty_body_list_is_rejected() {
    let err = from_yaml_str(
        r#"
time:
  t_end_s: 100.0
bodies: []
"#,
    )
    .expect_err("no bodies must fail");
    assert!(matches!(err, ScenarioError::NoBodies), "{err}");
}

#[test]
fn mismatched_dimensions_are_rejected() {
    let err = from_yaml_str(
        r#"
time:
  t_end_s: 100.0
bodies:
  - name: Oddball
    position_m: [1.0e11, 0.0, 0.0]
    velocity_m_s: [0.0, 30000.0]
"#,
    )
    .expect_err("2D velocity with 3D position must fail");
    match err {
        ScenarioError::InvalidBody { name, .. } => assert_eq!(name, "Oddball"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn degenerate_time_grid_is_rejected() {
    let err = from_yaml_str(
        r#"
time:
  t_start_s: 100.0
  t_end_s: 100.0
bodies:
  - name: Earth
    position_m: [1.496e11, 0.0]
    velocity_m_s: [0.0, 29780.0]
"#,
    )
    .expect_err("zero-length span must fail");
    assert!(matches!(err, ScenarioError::InvalidTimeGrid(_)), "{err}");

    let err = from_yaml_str(
        r#"
time:
  t_end_s: 100.0
  samples: 1
bodies:
  - name: Earth
    position_m: [1.496e11, 0.0]
    velocity_m_s: [0.0, 29780.0]
"#,
    )
    .expect_err("single-sample grid must fail");
    assert!(matches!(err, ScenarioError::InvalidTimeGrid(_)), "{err}");
}

#[test]
fn toml_scenario_loads_by_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("run.toml");
    std::fs::write(
        &path,
        r#"
[time]
t_end_s = 3.154e7
samples = 500

[[bodies]]
name = "Earth"
position_m = [1.496e11, 0.0]
velocity_m_s = [0.0, 29780.0]
"#,
    )
    .expect("write scenario");

    let scenario = load_scenario(&path).expect("TOML scenario loads");
    assert_eq!(scenario.time.samples, 500);
    assert_eq!(scenario.bodies[0].name, "Earth");
}

#[test]
fn bundled_scenario_file_stays_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/inner_planets.yaml");
    let scenario = load_scenario(&path).expect("bundled scenario loads");
    assert_eq!(scenario.bodies.len(), 4);
}

#[test]
fn builtin_catalog_matches_the_classic_table() {
    let scenario = ScenarioConfig::inner_planets();
    scenario.validate().expect("catalog validates");

    let names: Vec<&str> = scenario.bodies.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Mercury", "Venus", "Earth", "Mars"]);
    assert_eq!(scenario.time.t_end_s, YEAR_SECONDS);

    let earth = &scenario.bodies[2];
    assert_eq!(earth.position_m, [1.496e11, 0.0]);
    assert_eq!(earth.velocity_m_s, [0.0, 29_780.0]);
}
