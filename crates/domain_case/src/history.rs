//! Status history entries
//!
//! Entries are immutable once created: fields are private and there are no
//! setters. They are only produced by [`crate::record_transition`] and by case
//! intake.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{HistoryEntryId, UserId};
use crate::status::CaseStatus;

/// Note attached to the first entry of every case
pub const SUBMISSION_NOTE: &str = "Application submitted";

/// Audit record of one status change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    id: HistoryEntryId,
    status: CaseStatus,
    #[serde(default, rename = "notes", skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recorded_by: Option<UserId>,
}

impl StatusHistoryEntry {
    pub(crate) fn new(
        status: CaseStatus,
        note: Option<String>,
        timestamp: DateTime<Utc>,
        recorded_by: Option<UserId>,
    ) -> Self {
        Self {
            id: HistoryEntryId::new_v7(),
            status,
            note,
            timestamp,
            recorded_by,
        }
    }

    /// The entry every new case starts with
    pub fn application_submitted(timestamp: DateTime<Utc>) -> Self {
        Self::new(
            CaseStatus::Pending,
            Some(SUBMISSION_NOTE.to_string()),
            timestamp,
            None,
        )
    }

    pub fn id(&self) -> HistoryEntryId {
        self.id
    }

    /// Target status of the change
    pub fn status(&self) -> CaseStatus {
        self.status
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Admin who recorded the change; `None` for the intake entry
    pub fn recorded_by(&self) -> Option<UserId> {
        self.recorded_by
    }

    /// Text shown in history lists when the entry carries no note
    pub fn display_note(&self) -> String {
        match &self.note {
            Some(note) => note.clone(),
            None => format!("Status updated to {}", self.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_submitted_entry() {
        let now = Utc::now();
        let entry = StatusHistoryEntry::application_submitted(now);
        assert_eq!(entry.status(), CaseStatus::Pending);
        assert_eq!(entry.note(), Some(SUBMISSION_NOTE));
        assert_eq!(entry.timestamp(), now);
        assert!(entry.recorded_by().is_none());
    }

    #[test]
    fn test_display_note_fallback() {
        let entry = StatusHistoryEntry::new(CaseStatus::LettersSent, None, Utc::now(), None);
        assert_eq!(entry.display_note(), "Status updated to letters_sent");
    }

    #[test]
    fn test_serialized_field_names() {
        let entry = StatusHistoryEntry::application_submitted(Utc::now());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["notes"], SUBMISSION_NOTE);
        assert!(json.get("recorded_by").is_none());
    }
}
