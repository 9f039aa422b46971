//! Custom Test Assertions
//!
//! Assertion helpers for cases and timelines that give more meaningful
//! failure messages than standard assertions.

use domain_case::{Case, CaseStatus, StageClass, StatusHistoryEntry, TimelineStep};

/// Asserts the case's status is the status of its newest history entry
///
/// # Panics
///
/// Panics if the history is empty or the last entry disagrees with the status
pub fn assert_status_matches_history(case: &Case) {
    let last = case
        .status_history()
        .last()
        .unwrap_or_else(|| panic!("Case {} has an empty status history", case.id));
    assert_eq!(
        last.status(),
        case.status(),
        "Case {} status {} does not match last history entry {}",
        case.id,
        case.status(),
        last.status()
    );
}

/// Asserts `after` extends `before` without altering any earlier entry
pub fn assert_history_extends(before: &[StatusHistoryEntry], after: &[StatusHistoryEntry]) {
    assert!(
        after.len() > before.len(),
        "History did not grow: {} entries before, {} after",
        before.len(),
        after.len()
    );
    assert_eq!(
        &after[..before.len()],
        before,
        "Existing history entries were modified"
    );
}

/// Asserts history timestamps never go backwards
pub fn assert_history_chronological(case: &Case) {
    for pair in case.status_history().windows(2) {
        assert!(
            pair[0].timestamp() <= pair[1].timestamp(),
            "History entry {} at {} precedes entry {} at {}",
            pair[1].id(),
            pair[1].timestamp(),
            pair[0].id(),
            pair[0].timestamp()
        );
    }
}

/// Asserts a timeline has exactly one current stage and it is `current`
pub fn assert_single_current(steps: &[TimelineStep], current: CaseStatus) {
    let currents: Vec<_> = steps
        .iter()
        .filter(|s| s.class == StageClass::Current)
        .map(|s| s.descriptor.status)
        .collect();
    assert_eq!(
        currents,
        vec![current],
        "Expected exactly one current stage {}, found {:?}",
        current,
        currents
    );
}

/// Asserts two percentages are equal within a small tolerance
pub fn assert_percent_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "Progress {} differs from expected {}",
        actual,
        expected
    );
}
