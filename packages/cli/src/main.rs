#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crisis drill console for the relief-ops pipeline.
//!
//! Runs a drill against an in-process operations center: seeds
//! generated units, reports, and shelters, dispatches pending
//! incidents in triage order until the fleet is exhausted, and prints
//! the resulting board. The `classify` and `score` subcommands expose
//! the triage pipeline for one-off messages.

use clap::{Parser, Subcommand};
use relief_ops_dispatch::{Assignment, DispatchError, OpsCenter};
use relief_ops_registry_models::IncidentStatus;
use relief_ops_scenario::{DEFAULT_CENTER, drill_fleet, drill_reports, drill_shelters};
use relief_ops_triage::{Severity, classify, score};

#[derive(Parser)]
#[command(name = "relief_ops_cli", about = "Relief operations drill console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a crisis drill against an in-process operations center
    Drill {
        /// Number of SOS reports to seed
        #[arg(long, default_value = "15")]
        reports: usize,
        /// Number of responder units to seed
        #[arg(long, default_value = "5")]
        responders: usize,
        /// Number of shelters to seed
        #[arg(long, default_value = "4")]
        shelters: usize,
    },
    /// Classify a single SOS message
    Classify {
        /// Message text, e.g. "water rising in the stairwell"
        message: String,
    },
    /// Score a message against its declared severity
    Score {
        /// Message text
        message: String,
        /// Declared severity, 1-5
        #[arg(default_value = "3")]
        declared: u8,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Drill {
            reports,
            responders,
            shelters,
        } => run_drill(reports, responders, shelters)?,
        Commands::Classify { message } => {
            println!("{}", classify(&message));
        }
        Commands::Score { message, declared } => {
            let effective = score(&message, Severity::from_value(declared)?);
            println!("{effective} ({})", effective.value());
        }
    }

    Ok(())
}

/// Seeds a drill, dispatches until the fleet runs dry, and prints the
/// board, assignments, shelters, and summary.
fn run_drill(
    reports: usize,
    responders: usize,
    shelters: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let ops = OpsCenter::new();

    for unit in drill_fleet(responders, DEFAULT_CENTER) {
        ops.register_responder(unit.name, unit.location, unit.kind)?;
    }
    for report in drill_reports(reports, DEFAULT_CENTER) {
        ops.submit_report(report)?;
    }
    for shelter in drill_shelters(shelters, DEFAULT_CENTER) {
        ops.register_shelter(
            shelter.name,
            shelter.location,
            shelter.capacity,
            shelter.occupancy,
        )?;
    }

    // Work the board top-down; stop once every unit is committed.
    let mut assignments = Vec::new();
    for incident in ops.triage_queue() {
        if incident.status != IncidentStatus::Pending {
            continue;
        }
        match ops.request_dispatch(incident.id) {
            Ok(assignment) => assignments.push(assignment),
            Err(DispatchError::NoAvailableResponders) => break,
            Err(e) => log::error!("Dispatch failed for {}: {e}", incident.id),
        }
    }

    print_board(&ops);
    print_assignments(&ops, &assignments);
    print_shelters(&ops);
    print_summary(&ops);

    Ok(())
}

fn print_board(ops: &OpsCenter) {
    println!();
    println!("TRIAGE BOARD");
    println!(
        "{:<12} {:<11} {:<11} {:<15} MESSAGE",
        "SEVERITY", "CATEGORY", "STATUS", "REPORTER"
    );
    println!("{}", "-".repeat(78));

    for incident in ops.triage_queue() {
        println!(
            "{:<12} {:<11} {:<11} {:<15} {}",
            format!("{} {}", incident.severity.value(), incident.severity),
            incident.category.to_string(),
            incident.status.to_string(),
            incident.reporter_name,
            incident.message,
        );
    }
}

fn print_assignments(ops: &OpsCenter, assignments: &[Assignment]) {
    println!();
    println!("ASSIGNMENTS");
    println!(
        "{:<38} {:<14} {:>8} {:>8}",
        "INCIDENT", "UNIT", "DIST KM", "ETA MIN"
    );
    println!("{}", "-".repeat(72));

    for assignment in assignments {
        let unit = ops
            .responder(assignment.responder_id)
            .map_or_else(|_| assignment.responder_id.to_string(), |r| r.name);
        println!(
            "{:<38} {:<14} {:>8.2} {:>8}",
            assignment.incident_id.to_string(),
            unit,
            assignment.distance_km,
            assignment.eta_minutes,
        );
    }
}

fn print_shelters(ops: &OpsCenter) {
    println!();
    println!("SHELTERS");
    println!(
        "{:<28} {:>9} {:>9} {:>7}",
        "SHELTER", "OCCUPIED", "CAPACITY", "UTIL"
    );
    println!("{}", "-".repeat(56));

    for shelter in ops.shelters() {
        println!(
            "{:<28} {:>9} {:>9} {:>6.1}%",
            shelter.name,
            shelter.occupancy,
            shelter.capacity,
            shelter.utilization_pct(),
        );
    }
}

fn print_summary(ops: &OpsCenter) {
    let summary = ops.summary();

    println!();
    println!("SUMMARY");
    println!("{}", "-".repeat(40));
    println!("Pending incidents     {}", summary.pending_incidents);
    println!("Dispatched incidents  {}", summary.dispatched_incidents);
    println!("Resolved incidents    {}", summary.resolved_incidents);
    println!("Idle units            {}", summary.idle_responders);
    println!("En-route units        {}", summary.en_route_responders);
    println!("On-site units         {}", summary.on_site_responders);
    println!("Shelters              {}", summary.shelter_count);
    println!(
        "Shelter utilization   {:.1}%",
        summary.shelter_utilization_pct
    );
}
