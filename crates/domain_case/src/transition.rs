//! Recording status transitions

use chrono::Utc;
use tracing::debug;

use crate::case::Case;
use crate::error::CaseError;
use crate::history::StatusHistoryEntry;
use crate::role::{Actor, ensure_can_transition};
use crate::status::CaseStatus;

/// Builds the history entry for moving `case` to `to`
///
/// The entry is stamped with the server clock. Nothing is persisted and the
/// case is left untouched; apply the entry with [`Case::apply_transition`].
///
/// # Errors
///
/// * `ForbiddenTransition` - the actor's role may not change case status
/// * `NoOpUpdate` - `to` equals the current status and `note` is blank
pub fn record_transition(
    case: &Case,
    to: CaseStatus,
    note: &str,
    actor: &Actor,
) -> Result<StatusHistoryEntry, CaseError> {
    let from = case.status();
    ensure_can_transition(actor.role, from, to)?;

    let note = note.trim();
    let note = if note.is_empty() { None } else { Some(note.to_string()) };

    if to == from && note.is_none() {
        return Err(CaseError::NoOpUpdate);
    }

    debug!(
        case_id = %case.id,
        from = %from,
        to = %to,
        actor = %actor.user_id,
        "Recording status transition"
    );

    Ok(StatusHistoryEntry::new(to, note, Utc::now(), Some(actor.user_id)))
}
