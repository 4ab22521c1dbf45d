//! Grade scale - the closed set of letter-grade labels a grade may carry.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Allowed grade labels, highest to lowest.
pub const ALLOWED_GRADES: [&str; 12] = [
    "A (93-100)",
    "A- (90-92)",
    "B+ (87-89)",
    "B (83-86)",
    "B- (80-82)",
    "C+ (77-79)",
    "C (73-76)",
    "C- (70-72)",
    "D+ (67-69)",
    "D (63-66)",
    "D- (60-62)",
    "F (0-59)",
];

static ALLOWED_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ALLOWED_GRADES.iter().copied().collect());

/// Canonical label for `value`, if it names one.
///
/// Surrounding whitespace is ignored; everything else must match exactly
/// (case and inner spacing included).
pub fn canonical(value: &str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    ALLOWED_SET.get(trimmed).copied()
}

/// Check whether `value` is an allowed grade label.
pub fn is_valid(value: &str) -> bool {
    canonical(value).is_some()
}
