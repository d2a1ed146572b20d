//! # Scenario Subcommand
//!
//! Loads a YAML scenario (an admin, locations, users, and an ordered list
//! of lifecycle steps), runs it against a fresh registry on a simulated
//! clock, and prints the outcomes and the final report as JSON.
//!
//! ```yaml
//! start_time: "2026-01-15T09:00:00Z"
//! admin: { name: Carlos, age: 25, email: carlos@ejemplo.com }
//! locations:
//!   - { name: Plaza Mayor, coordinates: "40.4155,-3.7074", status: inactive }
//! users:
//!   - { kind: inspector, name: Diego, age: 28, email: diego@ejemplo.com }
//! assignments:
//!   - location: Parque Central
//!     coordinates: "19.4326,-99.1332"
//!     inspector: { name: Laura, age: 31, email: laura@ejemplo.com }
//! steps:
//!   - { action: start, inspector: Laura, location: Parque Central }
//!   - { action: advance, seconds: 90 }
//!   - { action: finish, inspector: Laura }
//!   - { action: set_status, locations: [Plaza Mayor], status: active }
//! ```
//!
//! Steps refer to inspectors and locations by name. Names are not unique in
//! the registry; a step resolves to the first one registered with that name,
//! so a later namesake cannot be driven by a step. `set_status` is the
//! exception: it updates every location with a listed name.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use insp_core::{InspError, Location, LocationStatus, ManualClock, Timestamp};
use insp_facade::{AdminFacade, CreatedUser, SystemReport, UserFactory};
use insp_registry::Registry;
use insp_state::{Inspector, InspectorSnapshot, Outcome};

/// Arguments for the `insp run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the scenario YAML file.
    pub scenario: PathBuf,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

// ─── Scenario file ───────────────────────────────────────────────────

/// Errors loading or running a scenario.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("failed to read scenario {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scenario file is not valid YAML for a scenario.
    #[error("invalid scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A tag in the scenario was rejected by the domain.
    #[error(transparent)]
    Domain(#[from] InspError),

    /// A step names an inspector that was never registered.
    #[error("step {step}: unknown inspector {name:?}")]
    UnknownInspector { step: usize, name: String },

    /// A step names a location that was never registered.
    #[error("step {step}: unknown location {name:?}")]
    UnknownLocation { step: usize, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserEntry {
    /// `admin` or `inspector`.
    pub kind: String,
    pub name: String,
    pub age: u32,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationEntry {
    pub name: String,
    #[serde(default)]
    pub coordinates: String,
    /// `active` or `inactive`; defaults to active.
    #[serde(default)]
    pub status: Option<String>,
}

/// A location set up together with its inspector through the facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignmentEntry {
    pub location: String,
    #[serde(default)]
    pub coordinates: String,
    pub inspector: Profile,
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Start { inspector: String, location: String },
    Finish { inspector: String },
    Reset { inspector: String },
    /// Move the simulated clock forward.
    Advance { seconds: u32 },
    SetStatus { locations: Vec<String>, status: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Initial instant of the simulated clock. Defaults to now.
    #[serde(default)]
    pub start_time: Option<String>,
    pub admin: Profile,
    #[serde(default)]
    pub locations: Vec<LocationEntry>,
    #[serde(default)]
    pub users: Vec<UserEntry>,
    #[serde(default)]
    pub assignments: Vec<AssignmentEntry>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_yaml(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }
}

// ─── Runner ──────────────────────────────────────────────────────────

/// What one step did.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step: usize,
    pub message: String,
    pub applied: bool,
}

/// Everything a scenario run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioRun {
    pub steps: Vec<StepRecord>,
    pub report: SystemReport,
    pub inspectors: Vec<InspectorSnapshot>,
}

/// Run `scenario` against a fresh registry.
pub fn run_scenario(scenario: &Scenario) -> Result<ScenarioRun, ScenarioError> {
    let start = match &scenario.start_time {
        Some(s) => Timestamp::parse(s)?,
        None => Timestamp::now(),
    };
    let clock = ManualClock::new(start);
    let registry = Registry::new();
    let facade = AdminFacade::with_factory(
        registry.clone(),
        UserFactory::with_clock(Arc::new(clock.clone())),
        scenario.admin.name.clone(),
        scenario.admin.age,
        scenario.admin.email.clone(),
    );

    for entry in &scenario.locations {
        let status = match &entry.status {
            Some(tag) => tag.parse::<LocationStatus>()?,
            None => LocationStatus::Active,
        };
        facade.admin().create_location(
            &registry,
            Location::with_status(entry.name.clone(), entry.coordinates.clone(), status),
        );
    }

    for entry in &scenario.users {
        match facade.factory().create_user_from_tag(
            &entry.kind,
            entry.name.clone(),
            entry.age,
            entry.email.clone(),
        )? {
            CreatedUser::Admin(admin) => {
                registry.register_admin(admin);
            }
            CreatedUser::Inspector(inspector) => {
                registry.register_inspector(inspector);
            }
        }
    }

    for a in &scenario.assignments {
        facade.setup_location_with_inspector(
            a.location.clone(),
            a.coordinates.clone(),
            a.inspector.name.clone(),
            a.inspector.age,
            a.inspector.email.clone(),
        );
    }

    let mut records = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        let step_no = index + 1;
        let record = match step {
            Step::Start {
                inspector,
                location,
            } => {
                let inspector = find_inspector(&registry, step_no, inspector)?;
                let location = registry.find_location(location).ok_or_else(|| {
                    ScenarioError::UnknownLocation {
                        step: step_no,
                        name: location.clone(),
                    }
                })?;
                outcome_record(step_no, inspector.start_inspection(location))
            }
            Step::Finish { inspector } => {
                let inspector = find_inspector(&registry, step_no, inspector)?;
                outcome_record(step_no, inspector.finish_inspection())
            }
            Step::Reset { inspector } => {
                let inspector = find_inspector(&registry, step_no, inspector)?;
                outcome_record(step_no, inspector.reset_to_available())
            }
            Step::Advance { seconds } => {
                clock.advance_millis(i64::from(*seconds) * 1000);
                StepRecord {
                    step: step_no,
                    message: format!("Reloj avanzado {seconds} segundos"),
                    applied: true,
                }
            }
            Step::SetStatus { locations, status } => {
                let status: LocationStatus = status.parse()?;
                let updated = facade.bulk_update_location_status(locations.as_slice(), status);
                StepRecord {
                    step: step_no,
                    message: format!("{} ubicaciones actualizadas a {status}", updated.len()),
                    applied: !updated.is_empty(),
                }
            }
        };
        tracing::debug!(step = record.step, applied = record.applied, "{}", record.message);
        records.push(record);
    }

    Ok(ScenarioRun {
        steps: records,
        report: facade.system_report(),
        inspectors: registry
            .list_inspectors()
            .iter()
            .map(|i| i.snapshot())
            .collect(),
    })
}

/// First registered inspector named `name`.
fn find_inspector(
    registry: &Registry,
    step: usize,
    name: &str,
) -> Result<Arc<Inspector>, ScenarioError> {
    registry
        .find_inspector(name)
        .ok_or_else(|| ScenarioError::UnknownInspector {
            step,
            name: name.to_string(),
        })
}

fn outcome_record(step: usize, outcome: Outcome) -> StepRecord {
    StepRecord {
        step,
        applied: outcome.is_applied(),
        message: outcome.message(),
    }
}

/// Execute the run subcommand.
pub fn run_run(args: &RunArgs) -> Result<u8> {
    let scenario = Scenario::load(&args.scenario)?;
    tracing::info!(
        path = %args.scenario.display(),
        steps = scenario.steps.len(),
        "running scenario"
    );

    let run = run_scenario(&scenario)
        .with_context(|| format!("scenario {} failed", args.scenario.display()))?;

    let json = if args.compact {
        serde_json::to_string(&run)?
    } else {
        serde_json::to_string_pretty(&run)?
    };
    println!("{json}");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insp_state::PhaseKind;

    const SCENARIO: &str = r#"
start_time: "2026-01-15T09:00:00Z"
admin: { name: Carlos, age: 25, email: carlos@ejemplo.com }
locations:
  - { name: Plaza Mayor, coordinates: "40.4155,-3.7074" }
assignments:
  - location: Parque Central
    coordinates: "19.4326,-99.1332"
    inspector: { name: Laura, age: 31, email: laura@ejemplo.com }
users:
  - { kind: inspector, name: Diego, age: 28, email: diego@ejemplo.com }
steps:
  - { action: start, inspector: Laura, location: Parque Central }
  - { action: start, inspector: Laura, location: Plaza Mayor }
  - { action: advance, seconds: 90 }
  - { action: finish, inspector: Laura }
  - { action: finish, inspector: Diego }
  - { action: set_status, locations: [Plaza Mayor], status: inactive }
"#;

    #[test]
    fn test_parse_scenario() {
        let s = Scenario::from_yaml(SCENARIO).unwrap();
        assert_eq!(s.admin.name, "Carlos");
        assert_eq!(s.steps.len(), 6);
        assert_eq!(s.steps[2], Step::Advance { seconds: 90 });
        assert_eq!(s.users[0].kind, "inspector");
    }

    #[test]
    fn test_run_scenario() {
        let run = run_scenario(&Scenario::from_yaml(SCENARIO).unwrap()).unwrap();

        let applied: Vec<bool> = run.steps.iter().map(|r| r.applied).collect();
        assert_eq!(applied, [true, false, true, true, false, true]);
        assert_eq!(
            run.steps[3].message,
            "Inspector Laura ha finalizado la inspección en Parque Central. Duración: 90 segundos"
        );

        assert_eq!(run.report.total_locations, 2);
        assert_eq!(run.report.inactive_locations, 1);
        assert_eq!(run.report.total_inspectors, 2);
        assert_eq!(run.report.total_admins, 1);

        let laura = run
            .inspectors
            .iter()
            .find(|s| s.profile.name() == "Laura")
            .unwrap();
        assert_eq!(laura.phase.kind(), PhaseKind::Completed);
    }

    #[test]
    fn test_unknown_user_kind_is_rejected() {
        let yaml = r#"
admin: { name: Carlos, age: 25, email: c@e.com }
users:
  - { kind: supervisor, name: Eva, age: 40, email: e@e.com }
"#;
        let err = run_scenario(&Scenario::from_yaml(yaml).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Domain(InspError::UnsupportedUserKind(ref k)) if k == "supervisor"
        ));
    }

    #[test]
    fn test_unknown_inspector_names_step() {
        let yaml = r#"
admin: { name: Carlos, age: 25, email: c@e.com }
steps:
  - { action: finish, inspector: Nadie }
"#;
        let err = run_scenario(&Scenario::from_yaml(yaml).unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "step 1: unknown inspector \"Nadie\"");
    }

    #[test]
    fn test_duplicate_inspector_names_resolve_to_first() {
        let yaml = r#"
admin: { name: Carlos, age: 25, email: c@e.com }
locations:
  - { name: Mercado }
users:
  - { kind: inspector, name: Laura, age: 31, email: laura1@e.com }
  - { kind: inspector, name: Laura, age: 45, email: laura2@e.com }
steps:
  - { action: start, inspector: Laura, location: Mercado }
  - { action: start, inspector: Laura, location: Mercado }
"#;
        let run = run_scenario(&Scenario::from_yaml(yaml).unwrap()).unwrap();

        let applied: Vec<bool> = run.steps.iter().map(|r| r.applied).collect();
        assert_eq!(applied, [true, false]);
        assert_eq!(run.inspectors[0].profile.email(), "laura1@e.com");
        assert_eq!(run.inspectors[0].phase.kind(), PhaseKind::InProgress);
        assert_eq!(run.inspectors[1].phase.kind(), PhaseKind::Available);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let yaml = r#"
admin: { name: Carlos, age: 25, email: c@e.com, role: boss }
"#;
        assert!(matches!(
            Scenario::from_yaml(yaml),
            Err(ScenarioError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.yaml");
        std::fs::write(&path, SCENARIO).unwrap();
        let s = Scenario::load(&path).unwrap();
        assert_eq!(s.assignments.len(), 1);

        let missing = Scenario::load(&dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(ScenarioError::Io { .. })));
    }
}
