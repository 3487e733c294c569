//! The operations center: one lock around all operational state.

use std::sync::{Mutex, MutexGuard};

use relief_ops_geo::Coordinate;
use relief_ops_registry::{IncidentRegistry, RegistryError, ResponderRegistry};
use relief_ops_registry_models::{
    Incident, IncidentStatus, Responder, ResponderKind, ResponderStatus, SosReport,
};
use relief_ops_shelter::{Shelter, ShelterDirectory, ShelterError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Assignment, DispatchError, engine};

/// Everything the operations center owns, behind one lock.
#[derive(Debug, Default)]
struct OpsState {
    incidents: IncidentRegistry,
    responders: ResponderRegistry,
    shelters: ShelterDirectory,
}

/// Counts for the command summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpsSummary {
    /// Incidents awaiting dispatch.
    pub pending_incidents: usize,
    /// Incidents with a unit underway.
    pub dispatched_incidents: usize,
    /// Incidents closed out.
    pub resolved_incidents: usize,
    /// Units available for assignment.
    pub idle_responders: usize,
    /// Units travelling to an incident.
    pub en_route_responders: usize,
    /// Units working at an incident.
    pub on_site_responders: usize,
    /// Shelters in the directory.
    pub shelter_count: usize,
    /// Aggregate shelter occupancy as a percentage of capacity.
    pub shelter_utilization_pct: f64,
}

/// Single owner of the incident registry, responder roster, and
/// shelter directory.
///
/// Every mutation and every query runs under one internal mutex, so a
/// dispatch request — plan plus commit — is a single critical section
/// and no unit can be promised to two incidents at once. Queries hand
/// out cloned snapshots, never references into the guarded state.
///
/// All methods panic if the mutex is poisoned, i.e. if a previous
/// caller panicked mid-operation.
///
/// Share across threads as `Arc<OpsCenter>`; the server does exactly
/// that.
#[derive(Debug, Default)]
pub struct OpsCenter {
    state: Mutex<OpsState>,
}

impl OpsCenter {
    /// Creates an operations center with empty registries.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(OpsState {
                incidents: IncidentRegistry::new(),
                responders: ResponderRegistry::new(),
                shelters: ShelterDirectory::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, OpsState> {
        self.state.lock().expect("Ops center mutex poisoned")
    }

    // -----------------------------------------------------------------
    // Intake and lifecycle
    // -----------------------------------------------------------------

    /// Triages and registers an SOS report, returning the incident id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the report's location or declared
    /// severity fails validation.
    pub fn submit_report(&self, report: SosReport) -> Result<Uuid, RegistryError> {
        self.state().incidents.insert(report)
    }

    /// Plans and commits a dispatch for a pending incident.
    ///
    /// Runs as one critical section: the nearest idle unit at plan
    /// time is still idle at commit time.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] if the incident is unknown, not
    /// pending, or no unit is idle.
    pub fn request_dispatch(&self, incident_id: Uuid) -> Result<Assignment, DispatchError> {
        let mut guard = self.state();
        // Reborrow so both registries can be borrowed at once.
        let state = &mut *guard;

        let plan = engine::plan(incident_id, &state.incidents, &state.responders)?;
        engine::commit(plan, &mut state.incidents, &mut state.responders)
    }

    /// Resolves an incident.
    ///
    /// The assigned unit, if any, keeps working until its completion
    /// is reported separately; resolution is about the incident, not
    /// the unit.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the incident is unknown or already
    /// resolved.
    pub fn resolve_incident(&self, incident_id: Uuid) -> Result<(), RegistryError> {
        self.state().incidents.mark_resolved(incident_id)
    }

    /// Records that a unit has arrived at its incident.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the responder is unknown or not en
    /// route.
    pub fn responder_on_site(&self, responder_id: Uuid) -> Result<(), RegistryError> {
        self.state().responders.mark_on_site(responder_id)
    }

    /// Returns a unit to the idle pool.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the responder is unknown or
    /// already idle.
    pub fn complete_responder_task(&self, responder_id: Uuid) -> Result<(), RegistryError> {
        self.state().responders.complete(responder_id)
    }

    // -----------------------------------------------------------------
    // Roster and directory feeds
    // -----------------------------------------------------------------

    /// Adds a unit to the roster.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the starting coordinate is invalid.
    pub fn register_responder(
        &self,
        name: impl Into<String>,
        location: Coordinate,
        kind: ResponderKind,
    ) -> Result<Uuid, RegistryError> {
        self.state().responders.register(name, location, kind)
    }

    /// Stores a position update for a unit.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the responder is unknown or the
    /// coordinate is invalid.
    pub fn update_responder_location(
        &self,
        responder_id: Uuid,
        location: Coordinate,
    ) -> Result<(), RegistryError> {
        self.state()
            .responders
            .update_location(responder_id, location)
    }

    /// Adds a shelter to the directory.
    ///
    /// # Errors
    ///
    /// Returns [`ShelterError`] if the coordinate is invalid.
    pub fn register_shelter(
        &self,
        name: impl Into<String>,
        location: Coordinate,
        capacity: u32,
        occupancy: u32,
    ) -> Result<Uuid, ShelterError> {
        self.state()
            .shelters
            .register(name, location, capacity, occupancy)
    }

    /// Stores a headcount report for a shelter.
    ///
    /// # Errors
    ///
    /// Returns [`ShelterError`] if the shelter is unknown.
    pub fn update_shelter_occupancy(
        &self,
        shelter_id: Uuid,
        occupancy: u32,
    ) -> Result<(), ShelterError> {
        self.state().shelters.set_occupancy(shelter_id, occupancy)
    }

    // -----------------------------------------------------------------
    // Queries (cloned snapshots)
    // -----------------------------------------------------------------

    /// The triage-ordered incident board.
    #[must_use]
    pub fn triage_queue(&self) -> Vec<Incident> {
        self.state()
            .incidents
            .triage_queue()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Looks up one incident.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no incident has the id.
    pub fn incident(&self, incident_id: Uuid) -> Result<Incident, RegistryError> {
        self.state().incidents.get(incident_id).cloned()
    }

    /// Looks up one responder.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no responder has the id.
    pub fn responder(&self, responder_id: Uuid) -> Result<Responder, RegistryError> {
        self.state().responders.get(responder_id).cloned()
    }

    /// The full unit roster.
    #[must_use]
    pub fn responders(&self) -> Vec<Responder> {
        self.state()
            .responders
            .list()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Units currently available for assignment.
    #[must_use]
    pub fn available_responders(&self) -> Vec<Responder> {
        self.state()
            .responders
            .list_available()
            .into_iter()
            .cloned()
            .collect()
    }

    /// All registered shelters.
    #[must_use]
    pub fn shelters(&self) -> Vec<Shelter> {
        self.state().shelters.list().into_iter().cloned().collect()
    }

    /// Looks up one shelter.
    ///
    /// # Errors
    ///
    /// Returns [`ShelterError::NotFound`] if no shelter has the id.
    pub fn shelter(&self, shelter_id: Uuid) -> Result<Shelter, ShelterError> {
        self.state().shelters.get(shelter_id).cloned()
    }

    /// The nearest shelter with free space within `radius_km`.
    #[must_use]
    pub fn nearest_shelter(&self, from: Coordinate, radius_km: f64) -> Option<(Shelter, f64)> {
        self.state()
            .shelters
            .nearest_with_space(from, radius_km)
            .map(|(shelter, distance)| (shelter.clone(), distance))
    }

    /// Counts for the command summary panel.
    #[must_use]
    pub fn summary(&self) -> OpsSummary {
        let state = self.state();

        let mut summary = OpsSummary {
            pending_incidents: 0,
            dispatched_incidents: 0,
            resolved_incidents: 0,
            idle_responders: 0,
            en_route_responders: 0,
            on_site_responders: 0,
            shelter_count: state.shelters.len(),
            shelter_utilization_pct: state.shelters.aggregate_utilization_pct(),
        };

        for incident in state.incidents.list() {
            match incident.status {
                IncidentStatus::Pending => summary.pending_incidents += 1,
                IncidentStatus::Dispatched => summary.dispatched_incidents += 1,
                IncidentStatus::Resolved => summary.resolved_incidents += 1,
            }
        }

        for responder in state.responders.list() {
            match responder.status {
                ResponderStatus::Idle => summary.idle_responders += 1,
                ResponderStatus::EnRoute => summary.en_route_responders += 1,
                ResponderStatus::OnSite => summary.on_site_responders += 1,
            }
        }

        summary
    }
}
