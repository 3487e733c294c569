//! Dispatch planning and commit.

use relief_ops_geo::distance_km;
use relief_ops_registry::{IncidentRegistry, RegistryError, ResponderRegistry};
use relief_ops_registry_models::{IncidentStatus, ResponderStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DispatchError;

/// Straight-line travel estimate: five minutes per kilometre.
const ETA_MINUTES_PER_KM: f64 = 5.0;

/// The outcome of planning: which unit should take which incident.
///
/// A plan is a pure decision — nothing has been mutated yet. Pass it
/// to [`commit`] to apply it, or drop it to discard it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchPlan {
    /// The pending incident to be worked.
    pub incident_id: Uuid,
    /// The idle unit chosen for it.
    pub responder_id: Uuid,
    /// Straight-line distance between the two, in km.
    pub distance_km: f64,
}

/// A committed dispatch, as reported back to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// The incident being worked.
    pub incident_id: Uuid,
    /// The unit now en route.
    pub responder_id: Uuid,
    /// Straight-line distance at dispatch time, in km.
    pub distance_km: f64,
    /// Estimated travel time in minutes.
    pub eta_minutes: u32,
}

impl Assignment {
    /// Builds the operator-facing record for a committed plan.
    #[must_use]
    pub fn from_plan(plan: DispatchPlan) -> Self {
        Self {
            incident_id: plan.incident_id,
            responder_id: plan.responder_id,
            distance_km: plan.distance_km,
            eta_minutes: eta_minutes(plan.distance_km),
        }
    }
}

/// Estimated travel time for a straight-line distance, in minutes.
#[must_use]
pub fn eta_minutes(distance_km: f64) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = (distance_km * ETA_MINUTES_PER_KM).round() as u32;
    minutes
}

/// Picks the nearest idle unit for a pending incident.
///
/// Read-only: registries are not modified. The scan is a strict
/// minimum search over the idle units in registration order, so when
/// two units are equally near, the one registered first wins — the
/// same deterministic tie-break the registries guarantee elsewhere.
///
/// # Errors
///
/// * [`DispatchError::NotFound`] if no incident has the id.
/// * [`DispatchError::InvalidState`] if the incident is not `Pending`.
/// * [`DispatchError::NoAvailableResponders`] if no unit is idle.
pub fn plan(
    incident_id: Uuid,
    incidents: &IncidentRegistry,
    responders: &ResponderRegistry,
) -> Result<DispatchPlan, DispatchError> {
    let incident = incidents
        .get(incident_id)
        .map_err(|_| DispatchError::NotFound(incident_id))?;

    if incident.status != IncidentStatus::Pending {
        return Err(DispatchError::InvalidState {
            id: incident_id,
            status: incident.status.to_string(),
        });
    }

    let mut best: Option<(Uuid, f64)> = None;
    for responder in responders.list_available() {
        let distance = distance_km(incident.location, responder.location);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((responder.id, distance)),
        }
    }

    let (responder_id, distance) = best.ok_or(DispatchError::NoAvailableResponders)?;

    log::debug!(
        "Planned dispatch for incident {incident_id}: responder {responder_id} at {distance:.2} km"
    );

    Ok(DispatchPlan {
        incident_id,
        responder_id,
        distance_km: distance,
    })
}

/// Applies a dispatch plan to both registries.
///
/// Both transitions are validated before either is applied, so a
/// rejected commit leaves the incident `Pending` and the unit
/// untouched. A plan can go stale between planning and commit (the
/// unit grabbed for another incident, the incident resolved); commit
/// catches that instead of half-applying.
///
/// # Errors
///
/// * [`DispatchError::NotFound`] if the incident no longer exists.
/// * [`DispatchError::InvalidState`] if the incident is no longer
///   `Pending`.
/// * [`DispatchError::Registry`] if the planned unit is missing or no
///   longer idle.
pub fn commit(
    plan: DispatchPlan,
    incidents: &mut IncidentRegistry,
    responders: &mut ResponderRegistry,
) -> Result<Assignment, DispatchError> {
    let incident = incidents
        .get(plan.incident_id)
        .map_err(|_| DispatchError::NotFound(plan.incident_id))?;
    if incident.status != IncidentStatus::Pending {
        return Err(DispatchError::InvalidState {
            id: plan.incident_id,
            status: incident.status.to_string(),
        });
    }

    let responder = responders.get(plan.responder_id)?;
    if !responder.status.is_available() {
        return Err(RegistryError::InvalidTransition {
            from: responder.status.to_string(),
            to: ResponderStatus::EnRoute.to_string(),
        }
        .into());
    }

    incidents.mark_dispatched(plan.incident_id, plan.responder_id)?;
    responders.assign(plan.responder_id, plan.incident_id)?;

    let assignment = Assignment::from_plan(plan);
    log::info!(
        "Dispatched responder {} to incident {} ({:.2} km, ETA {} min)",
        assignment.responder_id,
        assignment.incident_id,
        assignment.distance_km,
        assignment.eta_minutes
    );

    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use relief_ops_geo::Coordinate;
    use relief_ops_registry::{IncidentRegistry, RegistryError, ResponderRegistry};
    use relief_ops_registry_models::{IncidentStatus, ResponderKind, ResponderStatus, SosReport};
    use uuid::Uuid;

    use super::{DispatchPlan, commit, eta_minutes, plan};
    use crate::DispatchError;

    fn incident_at(registry: &mut IncidentRegistry, lat: f64, lng: f64) -> Uuid {
        registry
            .insert(SosReport::new(
                "help needed".to_string(),
                3,
                Coordinate::new(lat, lng),
            ))
            .unwrap()
    }

    #[test]
    fn plan_picks_the_nearest_idle_unit() {
        let mut incidents = IncidentRegistry::new();
        let mut responders = ResponderRegistry::new();
        let incident = incident_at(&mut incidents, 19.00, 72.80);

        responders
            .register("UNIT-A-1", Coordinate::new(19.50, 72.80), ResponderKind::Rescue)
            .unwrap();
        let near = responders
            .register("UNIT-A-2", Coordinate::new(19.05, 72.80), ResponderKind::Medical)
            .unwrap();

        let plan = plan(incident, &incidents, &responders).unwrap();
        assert_eq!(plan.responder_id, near);
        assert!(plan.distance_km < 10.0);
    }

    #[test]
    fn plan_breaks_distance_ties_by_registration_order() {
        let mut incidents = IncidentRegistry::new();
        let mut responders = ResponderRegistry::new();
        let incident = incident_at(&mut incidents, 19.00, 72.80);

        // Distances 3.0, 1.0, 1.0 (in spirit): one far unit, then two
        // at the same spot. The first of the equally-near pair wins.
        responders
            .register("UNIT-FAR", Coordinate::new(19.30, 72.80), ResponderKind::Rescue)
            .unwrap();
        let first_near = responders
            .register("UNIT-B-1", Coordinate::new(19.10, 72.80), ResponderKind::Rescue)
            .unwrap();
        responders
            .register("UNIT-B-2", Coordinate::new(19.10, 72.80), ResponderKind::Rescue)
            .unwrap();

        let plan = plan(incident, &incidents, &responders).unwrap();
        assert_eq!(plan.responder_id, first_near);
    }

    #[test]
    fn plan_ignores_busy_units() {
        let mut incidents = IncidentRegistry::new();
        let mut responders = ResponderRegistry::new();
        let incident = incident_at(&mut incidents, 19.00, 72.80);

        let near = responders
            .register("UNIT-A-1", Coordinate::new(19.01, 72.80), ResponderKind::Rescue)
            .unwrap();
        let far = responders
            .register("UNIT-A-2", Coordinate::new(19.40, 72.80), ResponderKind::Rescue)
            .unwrap();
        responders.assign(near, Uuid::new_v4()).unwrap();

        let plan = plan(incident, &incidents, &responders).unwrap();
        assert_eq!(plan.responder_id, far);
    }

    #[test]
    fn plan_errors_on_unknown_incident() {
        let incidents = IncidentRegistry::new();
        let responders = ResponderRegistry::new();

        let err = plan(Uuid::new_v4(), &incidents, &responders).unwrap_err();
        assert!(matches!(err, DispatchError::NotFound(_)));
    }

    #[test]
    fn plan_errors_when_incident_is_not_pending() {
        let mut incidents = IncidentRegistry::new();
        let mut responders = ResponderRegistry::new();
        let incident = incident_at(&mut incidents, 19.00, 72.80);
        responders
            .register("UNIT-A-1", Coordinate::new(19.01, 72.80), ResponderKind::Rescue)
            .unwrap();

        incidents.mark_resolved(incident).unwrap();

        let err = plan(incident, &incidents, &responders).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidState { .. }));
    }

    #[test]
    fn plan_errors_when_no_unit_is_idle() {
        let mut incidents = IncidentRegistry::new();
        let mut responders = ResponderRegistry::new();
        let incident = incident_at(&mut incidents, 19.00, 72.80);

        let only = responders
            .register("UNIT-A-1", Coordinate::new(19.01, 72.80), ResponderKind::Rescue)
            .unwrap();
        responders.assign(only, Uuid::new_v4()).unwrap();

        let err = plan(incident, &incidents, &responders).unwrap_err();
        assert!(matches!(err, DispatchError::NoAvailableResponders));
    }

    #[test]
    fn commit_applies_both_transitions() {
        let mut incidents = IncidentRegistry::new();
        let mut responders = ResponderRegistry::new();
        let incident = incident_at(&mut incidents, 19.00, 72.80);
        responders
            .register("UNIT-A-1", Coordinate::new(19.05, 72.80), ResponderKind::Rescue)
            .unwrap();

        let planned = plan(incident, &incidents, &responders).unwrap();
        let assignment = commit(planned, &mut incidents, &mut responders).unwrap();

        let stored = incidents.get(incident).unwrap();
        assert_eq!(stored.status, IncidentStatus::Dispatched);
        assert_eq!(stored.assigned_responder, Some(assignment.responder_id));

        let unit = responders.get(assignment.responder_id).unwrap();
        assert_eq!(unit.status, ResponderStatus::EnRoute);
        assert_eq!(unit.current_task, Some(incident));
    }

    #[test]
    fn stale_commit_leaves_registries_untouched() {
        let mut incidents = IncidentRegistry::new();
        let mut responders = ResponderRegistry::new();
        let incident = incident_at(&mut incidents, 19.00, 72.80);
        let unit = responders
            .register("UNIT-A-1", Coordinate::new(19.05, 72.80), ResponderKind::Rescue)
            .unwrap();

        let planned = plan(incident, &incidents, &responders).unwrap();
        // The unit gets grabbed for something else before commit.
        responders.assign(unit, Uuid::new_v4()).unwrap();

        let err = commit(planned, &mut incidents, &mut responders).unwrap_err();
        assert!(matches!(err, DispatchError::Registry(RegistryError::InvalidTransition { .. })));
        assert_eq!(incidents.get(incident).unwrap().status, IncidentStatus::Pending);
        assert!(incidents.get(incident).unwrap().assigned_responder.is_none());
    }

    #[test]
    fn commit_rejects_a_no_longer_pending_incident() {
        let mut incidents = IncidentRegistry::new();
        let mut responders = ResponderRegistry::new();
        let incident = incident_at(&mut incidents, 19.00, 72.80);
        responders
            .register("UNIT-A-1", Coordinate::new(19.05, 72.80), ResponderKind::Rescue)
            .unwrap();

        let planned = plan(incident, &incidents, &responders).unwrap();
        incidents.mark_resolved(incident).unwrap();

        let err = commit(planned, &mut incidents, &mut responders).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidState { .. }));
        // The unit never left the idle pool.
        assert_eq!(responders.list_available().len(), 1);
    }

    #[test]
    fn eta_rounds_to_whole_minutes() {
        assert_eq!(eta_minutes(0.0), 0);
        assert_eq!(eta_minutes(2.0), 10);
        assert_eq!(eta_minutes(2.49), 12);
        assert_eq!(eta_minutes(2.51), 13);
    }

    #[test]
    fn assignments_carry_the_eta() {
        let plan = DispatchPlan {
            incident_id: Uuid::new_v4(),
            responder_id: Uuid::new_v4(),
            distance_km: 3.0,
        };
        let assignment = super::Assignment::from_plan(plan);
        assert_eq!(assignment.eta_minutes, 15);
        assert!((assignment.distance_km - 3.0).abs() < f64::EPSILON);
    }
}
