//! Property-Based Test Generators
//!
//! Proptest strategies for statuses, roles and free-form notes.

use domain_case::{CaseStatus, Role};
use proptest::prelude::*;

/// Strategy for any canonical status
pub fn case_status_strategy() -> impl Strategy<Value = CaseStatus> {
    (0..CaseStatus::COUNT).prop_map(|ordinal| CaseStatus::ALL[ordinal])
}

/// Strategy for an ordered pair of statuses `(from, to)`
pub fn status_pair_strategy() -> impl Strategy<Value = (CaseStatus, CaseStatus)> {
    (case_status_strategy(), case_status_strategy())
}

/// Strategy for a sequence of target statuses, as an admin might enter them
pub fn status_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<CaseStatus>> {
    prop::collection::vec(case_status_strategy(), 1..=max_len)
}

pub fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Client), Just(Role::Admin)]
}

/// Strategy for notes, including blank and whitespace-only ones
pub fn note_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[a-zA-Z0-9 .,]{1,40}",
    ]
}

/// Strategy for status strings that are not canonical values
pub fn unknown_status_strategy() -> impl Strategy<Value = String> {
    "[a-z_]{1,20}".prop_filter("must not be a canonical status", |s| {
        s.parse::<CaseStatus>().is_err()
    })
}
