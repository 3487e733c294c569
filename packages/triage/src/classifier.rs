//! Maps SOS message text to an incident category.

use relief_ops_triage_models::IncidentCategory;

use crate::contains_any;

/// Assigns an [`IncidentCategory`] to a free-text SOS message.
///
/// Matching is case-insensitive substring search, so "Flooding" and
/// "FLOOD" both hit the `flood` keyword. When a message mentions more
/// than one hazard, the first matching group below wins:
///
/// 1. `flood`, `water` -> [`IncidentCategory::Flood`]
/// 2. `fire`, `smoke` -> [`IncidentCategory::Fire`]
/// 3. `collapse`, `trapped` -> [`IncidentCategory::Structural`]
/// 4. `medical`, `unconscious`, `doctor` -> [`IncidentCategory::Medical`]
///
/// Messages matching none of the groups fall back to
/// [`IncidentCategory::General`].
#[must_use]
pub fn classify(message: &str) -> IncidentCategory {
    let message = message.to_lowercase();

    if contains_any(&message, &["flood", "water"]) {
        return IncidentCategory::Flood;
    }
    if contains_any(&message, &["fire", "smoke"]) {
        return IncidentCategory::Fire;
    }
    if contains_any(&message, &["collapse", "trapped"]) {
        return IncidentCategory::Structural;
    }
    if contains_any(&message, &["medical", "unconscious", "doctor"]) {
        return IncidentCategory::Medical;
    }

    IncidentCategory::General
}
