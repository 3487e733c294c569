#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! The two authoritative state machines of the operations core.
//!
//! [`IncidentRegistry`] owns every SOS report that ever entered the
//! system and moves it `Pending` -> `Dispatched` -> `Resolved`.
//! [`ResponderRegistry`] owns the unit roster and cycles each unit
//! `Idle` -> `EnRoute` -> `OnSite` -> `Idle`. Both validate at their
//! insertion boundaries, so no invalid coordinate or severity is ever
//! stored, and both keep insertion order, which makes tie-breaking in
//! triage and dispatch deterministic.
//!
//! Registries are plain owned values. Callers that need shared access
//! wrap them (see the operations center in `relief_ops_dispatch`).

pub mod incident;
pub mod responder;

use relief_ops_geo::CoordinateError;
use relief_ops_triage_models::InvalidSeverityError;
use thiserror::Error;
use uuid::Uuid;

pub use incident::{ANONYMOUS_REPORTER, IncidentRegistry};
pub use responder::ResponderRegistry;

/// Errors from registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A submitted coordinate failed validation.
    #[error("Invalid location: {0}")]
    InvalidLocation(#[from] CoordinateError),

    /// A declared severity was outside the 1-5 range.
    #[error("Invalid severity: {0}")]
    InvalidSeverity(#[from] InvalidSeverityError),

    /// No record exists with the given id.
    #[error("No record with id {0}")]
    NotFound(Uuid),

    /// The record's current status does not allow the requested change.
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        /// Status the record is currently in.
        from: String,
        /// Status the operation tried to move it to.
        to: String,
    },
}
