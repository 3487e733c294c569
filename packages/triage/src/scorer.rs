//! Escalates declared severity based on urgency keywords.

use relief_ops_triage_models::Severity;

use crate::contains_any;

/// Keywords that escalate a report by two severity levels.
const CRITICAL_KEYWORDS: &[&str] = &[
    "trapped",
    "unconscious",
    "bleeding",
    "rising",
    "chest pain",
    "baby",
];

/// Keywords that escalate a report by one severity level.
const HIGH_KEYWORDS: &[&str] = &["smoke", "stuck", "flood", "elderly", "fire"];

/// Computes the effective severity of an SOS message.
///
/// Starts from the severity the sender declared and applies at most
/// one escalation: +2 levels if the message contains any critical
/// keyword, otherwise +1 level if it contains any high-urgency
/// keyword. The tiers do not stack, and the result saturates at
/// [`Severity::Critical`].
///
/// Matching is case-insensitive substring search over the whole
/// message, so multi-word keywords like `chest pain` must appear
/// contiguously.
#[must_use]
pub fn score(message: &str, declared: Severity) -> Severity {
    let message = message.to_lowercase();

    let bump = if contains_any(&message, CRITICAL_KEYWORDS) {
        2
    } else if contains_any(&message, HIGH_KEYWORDS) {
        1
    } else {
        0
    };

    declared.saturating_add(bump)
}
