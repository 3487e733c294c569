#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Turns free-text SOS messages into categories and severity levels.
//!
//! Field reports arrive as short unstructured messages. This crate
//! provides the two read-only passes the intake pipeline runs over
//! each message: [`classifier::classify`] assigns an
//! [`IncidentCategory`] and [`scorer::score`] escalates the sender's
//! declared [`Severity`] based on urgency keywords.

pub mod classifier;
pub mod scorer;

pub use classifier::classify;
pub use relief_ops_triage_models::{IncidentCategory, Severity};
pub use scorer::score;

/// Returns `true` if `haystack` contains any of the `needles`.
///
/// Callers are expected to lowercase `haystack` first; needles are
/// stored lowercase.
pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::contains_any;

    #[test]
    fn contains_any_matches_substring() {
        assert!(contains_any("water rising in basement", &["rising"]));
    }

    #[test]
    fn contains_any_matches_inside_longer_word() {
        assert!(contains_any("flooding reported", &["flood"]));
    }

    #[test]
    fn contains_any_empty_needles_never_match() {
        assert!(!contains_any("anything at all", &[]));
    }
}
