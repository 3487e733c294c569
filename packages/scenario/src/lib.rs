#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Mock data for crisis drills.
//!
//! Operators run drills to exercise the whole triage-and-dispatch
//! pipeline without real emergencies. The generators here produce
//! plausible SOS reports, responder units, and shelters scattered
//! around a centre coordinate; the caller feeds them into an
//! operations center exactly as live traffic would arrive.

use rand::Rng as _;
use relief_ops_geo::Coordinate;
use relief_ops_registry_models::{ResponderKind, SosReport};

/// Default drill centre: Mumbai.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(19.0760, 72.8777);

/// Degrees of jitter applied to report and shelter positions.
const WIDE_JITTER_DEG: f64 = 0.05;

/// Degrees of jitter applied to responder positions (units start
/// closer to the centre than the incidents they will be sent to).
const FLEET_JITTER_DEG: f64 = 0.04;

/// Capacity assigned to every drill shelter.
const SHELTER_CAPACITY: u32 = 500;

/// Reporter names drawn for drill reports.
const REPORTER_NAMES: &[&str] = &[
    "Asha Verma",
    "Rajesh Kumar",
    "Priya Nair",
    "Imran Shaikh",
    "Sunita Patil",
];

/// Drill report messages. Each one trips a different path through the
/// classifier and scorer, so a seeded drill covers every category tier.
const REPORT_MESSAGES: &[&str] = &[
    "Flooding in basement, rising fast.",
    "Trapped on roof with two children.",
    "Medical emergency, insulin required.",
    "Road washed out, stuck in vehicle.",
    "Elderly neighbor unresponsive.",
];

/// Shelter venues, assigned round-robin.
const SHELTER_NAMES: &[&str] = &[
    "Andheri Sports Complex",
    "Dadar Municipal School",
    "Bandra Community Hall",
    "Goregaon Exhibition Centre",
];

/// Responder kinds, assigned round-robin.
const UNIT_KINDS: [ResponderKind; 3] = [
    ResponderKind::Rescue,
    ResponderKind::Medical,
    ResponderKind::Supply,
];

/// A responder unit to be registered for a drill.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillUnit {
    /// Call sign, e.g. `UNIT-A-10`.
    pub name: String,
    /// Starting position.
    pub location: Coordinate,
    /// Equipment profile, cycling rescue/medical/supply.
    pub kind: ResponderKind,
}

/// A shelter to be registered for a drill.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillShelter {
    /// Venue name.
    pub name: String,
    /// Position.
    pub location: Coordinate,
    /// Planned capacity.
    pub capacity: u32,
    /// Randomized starting headcount.
    pub occupancy: u32,
}

fn jitter(center: f64, spread_deg: f64) -> f64 {
    center + rand::rng().random_range(-spread_deg..spread_deg)
}

/// Generates `count` random SOS reports around `center`.
///
/// Positions land within ±0.05° of the centre, declared severities
/// are uniform in 1-5, and names and messages are drawn from fixed
/// pools.
#[must_use]
pub fn drill_reports(count: usize, center: Coordinate) -> Vec<SosReport> {
    let mut rng = rand::rng();

    let reports = (0..count)
        .map(|_| {
            let message = REPORT_MESSAGES[rng.random_range(0..REPORT_MESSAGES.len())];
            let name = REPORTER_NAMES[rng.random_range(0..REPORTER_NAMES.len())];

            SosReport::new(
                message.to_string(),
                rng.random_range(1..=5),
                Coordinate::new(
                    jitter(center.lat, WIDE_JITTER_DEG),
                    jitter(center.lng, WIDE_JITTER_DEG),
                ),
            )
            .with_reporter(name)
        })
        .collect();

    log::info!("Generated {count} drill reports around {}, {}", center.lat, center.lng);
    reports
}

/// Generates `count` responder units around `center`.
///
/// Call signs follow the `UNIT-<letter>-<number>` scheme, letters
/// wrapping after `Z`; kinds cycle rescue, medical, supply.
#[must_use]
pub fn drill_fleet(count: usize, center: Coordinate) -> Vec<DrillUnit> {
    let units = (0..count)
        .map(|i| {
            #[allow(clippy::cast_possible_truncation)]
            let letter = (b'A' + (i % 26) as u8) as char;

            DrillUnit {
                name: format!("UNIT-{letter}-{}", 10 + i),
                location: Coordinate::new(
                    jitter(center.lat, FLEET_JITTER_DEG),
                    jitter(center.lng, FLEET_JITTER_DEG),
                ),
                kind: UNIT_KINDS[i % UNIT_KINDS.len()],
            }
        })
        .collect();

    log::info!("Generated {count} drill units");
    units
}

/// Generates `count` shelters around `center`.
///
/// Venues cycle through a fixed pool; every shelter gets the same
/// capacity and a random starting headcount below it.
#[must_use]
pub fn drill_shelters(count: usize, center: Coordinate) -> Vec<DrillShelter> {
    let mut rng = rand::rng();

    let shelters = (0..count)
        .map(|i| DrillShelter {
            name: SHELTER_NAMES[i % SHELTER_NAMES.len()].to_string(),
            location: Coordinate::new(
                jitter(center.lat, WIDE_JITTER_DEG),
                jitter(center.lng, WIDE_JITTER_DEG),
            ),
            capacity: SHELTER_CAPACITY,
            occupancy: rng.random_range(0..400),
        })
        .collect();

    log::info!("Generated {count} drill shelters");
    shelters
}
