#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Record types shared by the incident and responder registries.
//!
//! These are the shapes the registries in `relief_ops_registry` store and
//! hand out: the raw [`SosReport`] submission, the triaged [`Incident`]
//! it becomes, and the [`Responder`] roster entry, together with their
//! lifecycle status enums.

use chrono::{DateTime, Utc};
use relief_ops_geo::Coordinate;
use relief_ops_triage_models::{IncidentCategory, Severity};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Lifecycle status of an incident.
///
/// Incidents move strictly forward: `Pending` -> `Dispatched` ->
/// `Resolved`, with a shortcut from `Pending` straight to `Resolved`
/// when no unit is needed. `Resolved` is terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentStatus {
    /// Awaiting triage and dispatch.
    Pending,
    /// A responder has been assigned and is underway.
    Dispatched,
    /// Closed out by an operator. Terminal.
    Resolved,
}

impl IncidentStatus {
    /// Returns `true` if no further transitions are allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved)
    }
}

/// Lifecycle status of a responder unit.
///
/// Units cycle `Idle` -> `EnRoute` -> `OnSite` -> `Idle`; completion
/// is also allowed directly from `EnRoute` when a unit is recalled
/// before arrival.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponderStatus {
    /// Available for assignment.
    Idle,
    /// Assigned and travelling to an incident.
    EnRoute,
    /// Working at the incident location.
    OnSite,
}

impl ResponderStatus {
    /// Returns `true` if the unit can accept a new assignment.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// What a responder unit is equipped for.
///
/// Informational only: assignment is by distance, never by kind.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponderKind {
    /// Search-and-rescue unit.
    Rescue,
    /// Medical / ambulance unit.
    Medical,
    /// Supply and logistics unit.
    Supply,
}

/// A raw SOS submission, before triage.
///
/// Carries no id or timestamp; the incident registry assigns both at
/// insertion. The declared severity is the sender's own 1-5 estimate
/// and is validated (and possibly escalated) during triage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SosReport {
    /// Free-text description of the emergency.
    pub message: String,
    /// Sender-declared severity, 1 (minor) to 5 (critical).
    pub declared_severity: u8,
    /// Where the emergency is.
    pub location: Coordinate,
    /// Who sent the report, if they identified themselves.
    pub reporter_name: Option<String>,
}

impl SosReport {
    /// Creates an anonymous report.
    #[must_use]
    pub const fn new(message: String, declared_severity: u8, location: Coordinate) -> Self {
        Self {
            message,
            declared_severity,
            location,
            reporter_name: None,
        }
    }

    /// Attaches a reporter name.
    #[must_use]
    pub fn with_reporter(mut self, name: impl Into<String>) -> Self {
        self.reporter_name = Some(name.into());
        self
    }
}

/// A triaged incident as stored by the incident registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Registry-assigned identifier.
    pub id: Uuid,
    /// Reporter name, or `"Anonymous"` when the report carried none.
    pub reporter_name: String,
    /// Original free-text message.
    pub message: String,
    /// Severity the sender declared.
    pub declared_severity: Severity,
    /// Category derived from the message at insertion.
    pub category: IncidentCategory,
    /// Effective severity after keyword escalation.
    pub severity: Severity,
    /// Where the emergency is.
    pub location: Coordinate,
    /// When the report entered the registry.
    pub reported_at: DateTime<Utc>,
    /// Current lifecycle status.
    pub status: IncidentStatus,
    /// Responder assigned to this incident, once dispatched.
    pub assigned_responder: Option<Uuid>,
}

/// A responder unit as stored by the responder registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Responder {
    /// Registry-assigned identifier.
    pub id: Uuid,
    /// Call sign or display name, e.g. `UNIT-A-3`.
    pub name: String,
    /// Last reported position.
    pub location: Coordinate,
    /// Current lifecycle status.
    pub status: ResponderStatus,
    /// What the unit is equipped for.
    pub kind: ResponderKind,
    /// Incident the unit is currently working, if any.
    pub current_task: Option<Uuid>,
}
