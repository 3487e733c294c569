//! Incident intake, triage ordering, and lifecycle transitions.

use std::cmp::Reverse;

use chrono::Utc;
use relief_ops_registry_models::{Incident, IncidentStatus, SosReport};
use relief_ops_triage::{classify, score};
use relief_ops_triage_models::Severity;
use uuid::Uuid;

use crate::RegistryError;

/// Reporter name stored when a report arrives without one.
pub const ANONYMOUS_REPORTER: &str = "Anonymous";

/// Owns every incident that ever entered the system.
///
/// Incidents are never removed; resolved records stay available for
/// lookups and the operations summary. Storage is insertion-ordered,
/// and every ordered view ([`Self::triage_queue`]) ties back to that
/// order, so two incidents with equal sort keys always appear in the
/// order they arrived.
#[derive(Debug, Default)]
pub struct IncidentRegistry {
    incidents: Vec<Incident>,
}

impl IncidentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            incidents: Vec::new(),
        }
    }

    /// Triages and stores a raw SOS report, returning the new incident id.
    ///
    /// Validation happens here, at the boundary: the location must be a
    /// valid WGS84 coordinate and the declared severity must be 1-5.
    /// Classification and keyword escalation run exactly once, on the
    /// message as submitted; the derived category and severity are
    /// never recomputed afterwards.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::InvalidLocation`] if the coordinate is not valid.
    /// * [`RegistryError::InvalidSeverity`] if the declared severity is
    ///   outside 1-5.
    pub fn insert(&mut self, report: SosReport) -> Result<Uuid, RegistryError> {
        report.location.validate()?;
        let declared = Severity::from_value(report.declared_severity)?;

        let category = classify(&report.message);
        let severity = score(&report.message, declared);
        let id = Uuid::new_v4();

        log::info!(
            "Incident {id} registered: {category}, severity {} (declared {})",
            severity.value(),
            declared.value()
        );

        self.incidents.push(Incident {
            id,
            reporter_name: report
                .reporter_name
                .unwrap_or_else(|| ANONYMOUS_REPORTER.to_string()),
            message: report.message,
            declared_severity: declared,
            category,
            severity,
            location: report.location,
            reported_at: Utc::now(),
            status: IncidentStatus::Pending,
            assigned_responder: None,
        });

        Ok(id)
    }

    /// Looks up an incident by id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no incident has the id.
    pub fn get(&self, id: Uuid) -> Result<&Incident, RegistryError> {
        self.incidents
            .iter()
            .find(|incident| incident.id == id)
            .ok_or(RegistryError::NotFound(id))
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Incident, RegistryError> {
        self.incidents
            .iter_mut()
            .find(|incident| incident.id == id)
            .ok_or(RegistryError::NotFound(id))
    }

    /// All incidents in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<&Incident> {
        self.incidents.iter().collect()
    }

    /// Number of incidents ever registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    /// Returns `true` if no incident has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Incidents ordered for the operator board.
    ///
    /// Pending incidents come first, then everything else; within each
    /// group, higher effective severity first. The sort is stable over
    /// insertion order, so equally urgent incidents are worked
    /// first-come-first-served. Dispatched and resolved incidents rank
    /// alike: once an incident is being worked, it no longer competes
    /// for attention.
    #[must_use]
    pub fn triage_queue(&self) -> Vec<&Incident> {
        let mut queue: Vec<&Incident> = self.incidents.iter().collect();
        queue.sort_by_key(|incident| {
            (
                incident.status != IncidentStatus::Pending,
                Reverse(incident.severity.value()),
            )
        });
        queue
    }

    /// Marks a pending incident as dispatched to the given responder.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::NotFound`] if no incident has the id.
    /// * [`RegistryError::InvalidTransition`] if the incident is not
    ///   `Pending`.
    pub fn mark_dispatched(
        &mut self,
        id: Uuid,
        responder_id: Uuid,
    ) -> Result<(), RegistryError> {
        let incident = self.get_mut(id)?;

        if incident.status != IncidentStatus::Pending {
            log::warn!(
                "Rejected dispatch of incident {id}: status is {}",
                incident.status
            );
            return Err(RegistryError::InvalidTransition {
                from: incident.status.to_string(),
                to: IncidentStatus::Dispatched.to_string(),
            });
        }

        incident.status = IncidentStatus::Dispatched;
        incident.assigned_responder = Some(responder_id);
        log::info!("Incident {id} dispatched to responder {responder_id}");

        Ok(())
    }

    /// Marks an incident as resolved.
    ///
    /// Allowed from `Pending` (closed without a unit) and from
    /// `Dispatched`; the assignment reference is kept for the record.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::NotFound`] if no incident has the id.
    /// * [`RegistryError::InvalidTransition`] if the incident is
    ///   already `Resolved`.
    pub fn mark_resolved(&mut self, id: Uuid) -> Result<(), RegistryError> {
        let incident = self.get_mut(id)?;

        if incident.status.is_terminal() {
            log::warn!("Rejected resolve of incident {id}: already resolved");
            return Err(RegistryError::InvalidTransition {
                from: incident.status.to_string(),
                to: IncidentStatus::Resolved.to_string(),
            });
        }

        incident.status = IncidentStatus::Resolved;
        log::info!("Incident {id} resolved");

        Ok(())
    }
}
