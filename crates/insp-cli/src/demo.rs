//! # Demo Subcommand
//!
//! Walks through the whole system once: an admin registers locations, the
//! facade sets up locations with inspectors, an inspector is driven through
//! every row of the lifecycle table, and the system report is printed
//! before and after a bulk status change.
//!
//! Time runs on a simulated clock so the reported durations are stable.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use insp_core::{Location, LocationStatus, ManualClock, Timestamp};
use insp_facade::{AdminFacade, UserFactory};
use insp_registry::Registry;

/// Arguments for the `insp demo` subcommand.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Simulated length of each inspection, in seconds.
    #[arg(long, default_value_t = 45)]
    pub inspection_secs: u32,
}

/// Execute the demo subcommand.
pub fn run_demo(args: &DemoArgs) -> Result<u8> {
    let lines = demo_transcript(args)?;
    for line in lines {
        println!("{line}");
    }
    Ok(0)
}

/// Run the demonstration and return what it would print.
pub fn demo_transcript(args: &DemoArgs) -> Result<Vec<String>> {
    let clock = ManualClock::new(Timestamp::now());
    let registry = Registry::new();
    let facade = AdminFacade::with_factory(
        registry.clone(),
        UserFactory::with_clock(Arc::new(clock.clone())),
        "Carlos",
        25,
        "carlos@ejemplo.com",
    );
    let admin = facade.admin();
    let mut out = Vec::new();

    admin.create_location(&registry, Location::new("Ubicación 1", "Descripción 1"));
    out.push(format!(
        "Ubicaciones: {}",
        serde_json::to_string(&admin.list_locations(&registry))?
    ));

    let parque = facade.setup_location_with_inspector(
        "Parque Central",
        "19.4326,-99.1332",
        "Laura",
        31,
        "laura@ejemplo.com",
    );
    let plaza = facade.setup_location_with_inspector(
        "Plaza Mayor",
        "40.4155,-3.7074",
        "Diego",
        28,
        "diego@ejemplo.com",
    );
    out.push(format!(
        "Usuarios: {}",
        serde_json::to_string(&registry.list_users())?
    ));

    let laura = &parque.inspector;
    let step = i64::from(args.inspection_secs) * 1000;

    out.push(laura.state_info());
    out.push(laura.finish_inspection().message());
    out.push(laura.start_inspection(parque.location.clone()).message());
    out.push(laura.state_info());
    out.push(laura.start_inspection(plaza.location.clone()).message());
    clock.advance_millis(step);
    out.push(laura.finish_inspection().message());
    out.push(laura.finish_inspection().message());
    if let Some(report) = laura.last_inspection_report() {
        out.push(format!("Reporte: {}", serde_json::to_string(&report)?));
    }
    out.push(format!("¿Puede iniciar? {}", laura.can_start_inspection()));
    out.push(laura.start_inspection(plaza.location.clone()).message());
    clock.advance_millis(step);
    out.push(laura.finish_inspection().message());
    out.push(laura.reset_to_available().message());
    out.push(laura.state_info());

    out.push(format!(
        "Reporte del sistema: {}",
        serde_json::to_string(&facade.system_report())?
    ));
    let updated = facade.bulk_update_location_status(&["Plaza Mayor"], LocationStatus::Inactive);
    out.push(format!(
        "Actualizadas: {}",
        serde_json::to_string(&updated)?
    ));
    out.push(format!(
        "Reporte del sistema: {}",
        serde_json::to_string(&facade.system_report())?
    ));

    Ok(out)
}
