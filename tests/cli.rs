use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

use orbit_trace::export::trajectory::HEADER;

#[test]
fn propagate_streams_the_builtin_catalog_to_stdout() {
    Command::cargo_bin("propagate")
        .expect("binary builds")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(HEADER))
        .stdout(predicate::str::contains("Mercury"))
        .stdout(predicate::str::contains("Mars"));
}

#[test]
fn propagate_writes_csv_and_summary_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("run.csv");
    let summary_path = dir.path().join("run.json");
    let scenario = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/inner_planets.yaml");

    Command::cargo_bin("propagate")
        .expect("binary builds")
        .arg("--scenario")
        .arg(&scenario)
        .arg("--output")
        .arg(&csv_path)
        .arg("--summary")
        .arg(&summary_path)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&csv_path).expect("csv exists");
    assert!(csv.starts_with(HEADER));
    // Four bodies, a thousand samples each, plus the header.
    assert_eq!(csv.lines().count(), 4 * 1000 + 1);

    let summary = std::fs::read_to_string(&summary_path).expect("summary exists");
    let value: serde_json::Value = serde_json::from_str(&summary).expect("valid JSON");
    assert_eq!(value["bodies"].as_array().expect("bodies").len(), 4);
    assert!(value["generated_utc"].as_str().is_some());
}

#[test]
fn propagate_reports_singular_initial_conditions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let scenario_path = dir.path().join("bad.yaml");
    std::fs::write(
        &scenario_path,
        r#"
time:
  t_end_s: 100.0
bodies:
  - name: Singular
    position_m: [0.0, 0.0]
    velocity_m_s: [0.0, 1000.0]
"#,
    )
    .expect("write scenario");

    Command::cargo_bin("propagate")
        .expect("binary builds")
        .arg("--scenario")
        .arg(&scenario_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));
}

#[test]
fn orbit_plot_rejects_a_csv_without_trajectory_columns() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("wrong.csv");
    std::fs::write(&csv_path, "a,b,c\n1,2,3\n").expect("write csv");

    Command::cargo_bin("orbit_plot")
        .expect("binary builds")
        .arg("--input")
        .arg(&csv_path)
        .arg("--output")
        .arg(dir.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}
