#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Severity and incident category taxonomy types.
//!
//! This crate defines the canonical severity scale and incident categories
//! used across the entire relief-ops system. Reports declare a severity on
//! submission; the triage pipeline derives the final severity and category
//! from these same types.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Severity level for an incident, from 1 (minimal impact) to 5
/// (life-threatening).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Level 1: nuisance reports, no immediate danger
    Minor = 1,
    /// Level 2: property at risk, people safe
    Low = 2,
    /// Level 3: assistance needed, situation stable
    Moderate = 3,
    /// Level 4: people at risk, deteriorating situation
    High = 4,
    /// Level 5: immediate threat to life
    Critical = 5,
}

impl Severity {
    /// Returns the numeric value of this severity level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Creates a severity level from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-5.
    pub const fn from_value(value: u8) -> Result<Self, InvalidSeverityError> {
        match value {
            1 => Ok(Self::Minor),
            2 => Ok(Self::Low),
            3 => Ok(Self::Moderate),
            4 => Ok(Self::High),
            5 => Ok(Self::Critical),
            _ => Err(InvalidSeverityError { value }),
        }
    }

    /// Saturating addition on the numeric scale, clamped to [1, 5].
    ///
    /// This is the escalation primitive for the priority scorer: keyword
    /// bumps can never push a severity past `Critical`.
    #[must_use]
    pub const fn saturating_add(self, bump: u8) -> Self {
        let raw = self.value().saturating_add(bump);
        let clamped = if raw > 5 { 5 } else { raw };
        match Self::from_value(clamped) {
            Ok(severity) => severity,
            // Unreachable: clamped is always in 1..=5.
            Err(_) => Self::Critical,
        }
    }

    /// Returns all variants of this enum, lowest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Minor,
            Self::Low,
            Self::Moderate,
            Self::High,
            Self::Critical,
        ]
    }
}

/// Error returned when attempting to create a [`Severity`] from an invalid
/// numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSeverityError {
    /// The invalid severity value that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidSeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid severity value {}: expected 1-5", self.value)
    }
}

impl std::error::Error for InvalidSeverityError {}

/// Incident categories derived from the free-text report message.
///
/// The classifier in `relief_ops_triage` maps keywords onto these
/// variants in a fixed priority order; [`IncidentCategory::General`] is
/// the fallback for messages matching no category keywords.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentCategory {
    /// Rising water, inundation, people cut off by water
    Flood,
    /// Fire and smoke, including structure and brush fires
    Fire,
    /// Collapsed or unstable structures, people trapped in debris
    Structural,
    /// Injuries, illness, and medical assistance requests
    Medical,
    /// Anything that matches no specific category
    General,
}

impl IncidentCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Flood,
            Self::Fire,
            Self::Structural,
            Self::Medical,
            Self::General,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_from_value_roundtrip() {
        for v in 1..=5u8 {
            let severity = Severity::from_value(v).unwrap();
            assert_eq!(severity.value(), v);
        }
        assert!(Severity::from_value(0).is_err());
        assert!(Severity::from_value(6).is_err());
    }

    #[test]
    fn severity_order_follows_value() {
        assert!(Severity::Minor < Severity::Critical);
        assert!(Severity::Moderate < Severity::High);
    }

    #[test]
    fn saturating_add_clamps_at_critical() {
        assert_eq!(Severity::Minor.saturating_add(2), Severity::Moderate);
        assert_eq!(Severity::High.saturating_add(1), Severity::Critical);
        assert_eq!(Severity::Critical.saturating_add(2), Severity::Critical);
        assert_eq!(Severity::Moderate.saturating_add(0), Severity::Moderate);
    }

    #[test]
    fn invalid_severity_message_names_value() {
        let err = Severity::from_value(9).unwrap_err();
        assert_eq!(err.to_string(), "invalid severity value 9: expected 1-5");
    }

    #[test]
    fn category_display_roundtrip() {
        for cat in IncidentCategory::all() {
            let parsed: IncidentCategory = cat.to_string().parse().unwrap();
            assert_eq!(parsed, *cat);
        }
        assert_eq!(IncidentCategory::Structural.to_string(), "STRUCTURAL");
    }

    #[test]
    fn category_parses_from_string() {
        let cat: IncidentCategory = "MEDICAL".parse().unwrap();
        assert_eq!(cat, IncidentCategory::Medical);
        assert!("MUDSLIDE".parse::<IncidentCategory>().is_err());
    }
}
