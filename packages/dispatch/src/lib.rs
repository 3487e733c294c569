#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Nearest-unit dispatch and the operations center.
//!
//! Dispatch is split into two phases so the decision is auditable:
//! [`engine::plan`] picks the nearest idle unit without touching any
//! state, and [`engine::commit`] applies the paired transitions
//! (incident -> `Dispatched`, responder -> `EnRoute`) atomically.
//! [`OpsCenter`] wraps both registries and the shelter directory
//! behind one lock and is the only type collaborators talk to.

pub mod engine;
pub mod ops;

use relief_ops_registry::RegistryError;
use thiserror::Error;
use uuid::Uuid;

pub use engine::{Assignment, DispatchPlan, commit, eta_minutes, plan};
pub use ops::{OpsCenter, OpsSummary};

/// Errors from dispatch planning and execution.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No incident exists with the requested id.
    #[error("No incident with id {0}")]
    NotFound(Uuid),

    /// The incident has already been dispatched or resolved.
    #[error("Incident {id} cannot be dispatched: status is {status}")]
    InvalidState {
        /// The incident that was asked for.
        id: Uuid,
        /// Its current lifecycle status.
        status: String,
    },

    /// Every unit on the roster is already working.
    #[error("No available responders")]
    NoAvailableResponders,

    /// A registry rejected part of the dispatch.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}
