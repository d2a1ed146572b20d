//! # Scenario Runner End to End
//!
//! Loads YAML scenarios from disk and checks the outcome records, the final
//! system report, and the inspector snapshots.

use std::io::Write;

use insp_cli::scenario::{run_scenario, Scenario, ScenarioError};
use insp_state::PhaseKind;

const FULL_SCENARIO: &str = r#"
start_time: "2026-03-01T09:00:00Z"
admin: { name: Carlos, age: 25, email: carlos@ejemplo.com }
locations:
  - { name: "Ubicación 1", coordinates: "Descripción 1" }
assignments:
  - location: Parque Central
    coordinates: "19.4326,-99.1332"
    inspector: { name: Laura, age: 31, email: laura@ejemplo.com }
  - location: Plaza Mayor
    coordinates: "40.4155,-3.7074"
    inspector: { name: Diego, age: 28, email: diego@ejemplo.com }
steps:
  - { action: finish, inspector: Laura }
  - { action: start, inspector: Laura, location: Parque Central }
  - { action: start, inspector: Laura, location: Plaza Mayor }
  - { action: advance, seconds: 45 }
  - { action: finish, inspector: Laura }
  - { action: finish, inspector: Laura }
  - { action: start, inspector: Diego, location: Plaza Mayor }
  - { action: set_status, locations: [Plaza Mayor], status: inactive }
"#;

fn write_scenario(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn scenario_from_disk_runs_to_completion() {
    let file = write_scenario(FULL_SCENARIO);
    let scenario = Scenario::load(file.path()).unwrap();
    let run = run_scenario(&scenario).unwrap();

    let applied: Vec<bool> = run.steps.iter().map(|s| s.applied).collect();
    assert_eq!(
        applied,
        [false, true, false, true, true, false, true, true]
    );
    assert_eq!(
        run.steps[4].message,
        "Inspector Laura ha finalizado la inspección en Parque Central. Duración: 45 segundos"
    );

    assert_eq!(run.report.total_locations, 3);
    assert_eq!(run.report.inactive_locations, 1);
    assert_eq!(run.report.total_inspectors, 2);
    assert_eq!(run.report.total_admins, 1);

    let phases: Vec<PhaseKind> = run.inspectors.iter().map(|i| i.phase.kind()).collect();
    assert_eq!(phases, [PhaseKind::Completed, PhaseKind::InProgress]);
}

#[test]
fn run_output_serializes_to_json() {
    let scenario = Scenario::from_yaml(FULL_SCENARIO).unwrap();
    let run = run_scenario(&scenario).unwrap();
    let json = serde_json::to_value(&run).unwrap();

    assert_eq!(json["steps"].as_array().unwrap().len(), 8);
    assert_eq!(json["report"]["total_locations"], 3);
    assert_eq!(json["inspectors"][0]["profile"]["name"], "Laura");
}

#[test]
fn unsupported_user_kind_fails_the_run() {
    let scenario = Scenario::from_yaml(
        r#"
admin: { name: Carlos, age: 25, email: c@e.com }
users:
  - { kind: supervisor, name: X, age: 1, email: x@e.com }
"#,
    )
    .unwrap();
    let err = run_scenario(&scenario).unwrap_err();
    assert!(matches!(err, ScenarioError::Domain(_)));
    assert!(err.to_string().contains("supervisor"));
}

#[test]
fn unknown_inspector_names_the_step() {
    let scenario = Scenario::from_yaml(
        r#"
admin: { name: Carlos, age: 25, email: c@e.com }
steps:
  - { action: finish, inspector: Nadie }
"#,
    )
    .unwrap();
    match run_scenario(&scenario).unwrap_err() {
        ScenarioError::UnknownInspector { step, name } => {
            assert_eq!(step, 1);
            assert_eq!(name, "Nadie");
        }
        other => panic!("Expected UnknownInspector, got: {other:?}"),
    }
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    let err = Scenario::load(&path).unwrap_err();
    assert!(matches!(err, ScenarioError::Io { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}
