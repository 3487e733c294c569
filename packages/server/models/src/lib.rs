#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the relief-ops server.
//!
//! These types are serialized to JSON for the REST API. They are
//! separate from the registry record types so the API contract can
//! evolve independently of what the registries store. Field names are
//! camelCase on the wire; enum values keep their
//! `SCREAMING_SNAKE_CASE` encoding.

use chrono::{DateTime, Utc};
use relief_ops_dispatch::{Assignment, OpsSummary};
use relief_ops_registry_models::{
    Incident, IncidentStatus, Responder, ResponderKind, ResponderStatus,
};
use relief_ops_shelter::Shelter;
use relief_ops_triage_models::{IncidentCategory, Severity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Machine-readable error body returned with 4xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Stable error code, e.g. `NO_AVAILABLE_RESPONDERS`.
    pub error: String,
    /// Human-readable detail.
    pub message: String,
}

impl ApiError {
    /// Builds an error body from a stable code and a rendered detail.
    #[must_use]
    pub fn new(error: &str, message: String) -> Self {
        Self {
            error: error.to_string(),
            message,
        }
    }
}

/// Body for `POST /api/reports`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportRequest {
    /// Free-text description of the emergency.
    pub message: String,
    /// Sender-declared severity, 1-5.
    pub severity: u8,
    /// Latitude of the emergency.
    pub lat: f64,
    /// Longitude of the emergency.
    pub lng: f64,
    /// Reporter name, omitted for anonymous reports.
    pub reporter_name: Option<String>,
}

/// Response carrying the id of a newly created record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCreated {
    /// Id assigned by the registry.
    pub id: Uuid,
}

/// An incident as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIncident {
    /// Unique incident id.
    pub id: Uuid,
    /// Reporter name (`Anonymous` when the report carried none).
    pub reporter_name: String,
    /// Original free-text message.
    pub message: String,
    /// Incident category derived at triage.
    pub category: IncidentCategory,
    /// Effective severity level name.
    pub severity: Severity,
    /// Effective severity numeric value (1-5).
    pub severity_value: u8,
    /// Severity the sender declared (1-5).
    pub declared_severity: u8,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// When the report entered the registry (ISO 8601).
    pub reported_at: DateTime<Utc>,
    /// Lifecycle status.
    pub status: IncidentStatus,
    /// Assigned responder, once dispatched.
    pub assigned_responder: Option<Uuid>,
}

impl From<Incident> for ApiIncident {
    fn from(incident: Incident) -> Self {
        Self {
            id: incident.id,
            reporter_name: incident.reporter_name,
            message: incident.message,
            category: incident.category,
            severity: incident.severity,
            severity_value: incident.severity.value(),
            declared_severity: incident.declared_severity.value(),
            lat: incident.location.lat,
            lng: incident.location.lng,
            reported_at: incident.reported_at,
            status: incident.status,
            assigned_responder: incident.assigned_responder,
        }
    }
}

/// Body for `POST /api/responders`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponderRequest {
    /// Call sign or display name.
    pub name: String,
    /// Starting latitude.
    pub lat: f64,
    /// Starting longitude.
    pub lng: f64,
    /// Equipment profile.
    pub kind: ResponderKind,
}

/// A responder unit as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponder {
    /// Unique responder id.
    pub id: Uuid,
    /// Call sign or display name.
    pub name: String,
    /// Last reported latitude.
    pub lat: f64,
    /// Last reported longitude.
    pub lng: f64,
    /// Lifecycle status.
    pub status: ResponderStatus,
    /// Equipment profile.
    pub kind: ResponderKind,
    /// Incident the unit is working, if any.
    pub current_task: Option<Uuid>,
}

impl From<Responder> for ApiResponder {
    fn from(responder: Responder) -> Self {
        Self {
            id: responder.id,
            name: responder.name,
            lat: responder.location.lat,
            lng: responder.location.lng,
            status: responder.status,
            kind: responder.kind,
            current_task: responder.current_task,
        }
    }
}

/// Body for `POST /api/responders/{id}/location`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    /// New latitude.
    pub lat: f64,
    /// New longitude.
    pub lng: f64,
}

/// A committed dispatch as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAssignment {
    /// The incident being worked.
    pub incident_id: Uuid,
    /// The unit now en route.
    pub responder_id: Uuid,
    /// Straight-line distance at dispatch time, in km.
    pub distance_km: f64,
    /// Estimated travel time in minutes.
    pub eta_minutes: u32,
}

impl From<Assignment> for ApiAssignment {
    fn from(assignment: Assignment) -> Self {
        Self {
            incident_id: assignment.incident_id,
            responder_id: assignment.responder_id,
            distance_km: assignment.distance_km,
            eta_minutes: assignment.eta_minutes,
        }
    }
}

/// Body for `POST /api/shelters`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterShelterRequest {
    /// Venue name.
    pub name: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Planned capacity.
    pub capacity: u32,
    /// Starting headcount, defaults to zero.
    pub occupancy: Option<u32>,
}

/// Body for `POST /api/shelters/{id}/occupancy`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyRequest {
    /// Reported headcount.
    pub occupancy: u32,
}

/// A shelter as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiShelter {
    /// Unique shelter id.
    pub id: Uuid,
    /// Venue name.
    pub name: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Planned capacity.
    pub capacity: u32,
    /// Last reported headcount.
    pub occupancy: u32,
    /// Occupancy as a percentage of capacity.
    pub utilization_pct: f64,
    /// Whether the shelter can take more people.
    pub has_space: bool,
}

impl From<Shelter> for ApiShelter {
    fn from(shelter: Shelter) -> Self {
        Self {
            id: shelter.id,
            name: shelter.name.clone(),
            lat: shelter.location.lat,
            lng: shelter.location.lng,
            capacity: shelter.capacity,
            occupancy: shelter.occupancy,
            utilization_pct: shelter.utilization_pct(),
            has_space: shelter.has_space(),
        }
    }
}

/// Query parameters for `GET /api/shelters/nearest`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestShelterParams {
    /// Latitude to search from.
    pub lat: f64,
    /// Longitude to search from.
    pub lng: f64,
    /// Search radius in km; the server default applies when omitted.
    pub radius_km: Option<f64>,
}

/// Response from `GET /api/shelters/nearest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNearestShelter {
    /// The nearest shelter with free space.
    pub shelter: ApiShelter,
    /// Straight-line distance to it, in km.
    pub distance_km: f64,
}

/// Command summary as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSummary {
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

impl From<OpsSummary> for ApiSummary {
    fn from(summary: OpsSummary) -> Self {
        Self {
            pending_incidents: summary.pending_incidents,
            dispatched_incidents: summary.dispatched_incidents,
            resolved_incidents: summary.resolved_incidents,
            idle_responders: summary.idle_responders,
            en_route_responders: summary.en_route_responders,
            on_site_responders: summary.on_site_responders,
            shelter_count: summary.shelter_count,
            shelter_utilization_pct: summary.shelter_utilization_pct,
        }
    }
}

/// Query parameters for `POST /api/drill`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillParams {
    /// Number of SOS reports to seed (default 15).
    pub reports: Option<usize>,
    /// Number of responder units to seed (default 5).
    pub responders: Option<usize>,
    /// Number of shelters to seed (default 4).
    pub shelters: Option<usize>,
}

/// Response from `POST /api/drill`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDrillSeeded {
    /// Incidents created.
    pub reports: usize,
    /// Units registered.
    pub responders: usize,
    /// Shelters registered.
    pub shelters: usize,
}
