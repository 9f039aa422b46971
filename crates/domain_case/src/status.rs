//! Canonical case statuses
//!
//! The eight statuses form a fixed, totally ordered sequence. Declaration
//! order is the ordinal, so the derived `Ord` agrees with [`CaseStatus::ordinal`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CaseError;

/// Where a case stands in the remediation process
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Application submitted, awaiting review
    Pending,
    /// Identity documents checked
    DocumentsVerified,
    /// Security freezes placed with the secondary bureaus
    FreezeCompleted,
    /// Dispute letters sent to the three major bureaus
    LettersSent,
    /// FTC identity theft report filed
    FtcCreated,
    /// CFPB complaint filed
    CfpbFiled,
    /// Bureau responses received and reviewed
    ResultReceived,
    /// Case closed
    Completed,
}

impl CaseStatus {
    /// Number of canonical statuses
    pub const COUNT: usize = 8;

    /// All statuses in progression order
    pub const ALL: [CaseStatus; Self::COUNT] = [
        CaseStatus::Pending,
        CaseStatus::DocumentsVerified,
        CaseStatus::FreezeCompleted,
        CaseStatus::LettersSent,
        CaseStatus::FtcCreated,
        CaseStatus::CfpbFiled,
        CaseStatus::ResultReceived,
        CaseStatus::Completed,
    ];

    /// Position in the progression, 0 through 7
    pub fn ordinal(self) -> usize {
        match self {
            CaseStatus::Pending => 0,
            CaseStatus::DocumentsVerified => 1,
            CaseStatus::FreezeCompleted => 2,
            CaseStatus::LettersSent => 3,
            CaseStatus::FtcCreated => 4,
            CaseStatus::CfpbFiled => 5,
            CaseStatus::ResultReceived => 6,
            CaseStatus::Completed => 7,
        }
    }

    /// Status at the given ordinal, if any
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    /// Wire name of the status
    pub fn as_str(self) -> &'static str {
        match self {
            CaseStatus::Pending => "pending",
            CaseStatus::DocumentsVerified => "documents_verified",
            CaseStatus::FreezeCompleted => "freeze_completed",
            CaseStatus::LettersSent => "letters_sent",
            CaseStatus::FtcCreated => "ftc_created",
            CaseStatus::CfpbFiled => "cfpb_filed",
            CaseStatus::ResultReceived => "result_received",
            CaseStatus::Completed => "completed",
        }
    }

    /// The following status, `None` at `Completed`
    pub fn next(self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// The preceding status, `None` at `Pending`
    pub fn previous(self) -> Option<Self> {
        self.ordinal().checked_sub(1).and_then(Self::from_ordinal)
    }

    pub fn is_initial(self) -> bool {
        self == CaseStatus::Pending
    }

    /// Terminal in normal flow; admins may still move a case away from it
    pub fn is_terminal(self) -> bool {
        self == CaseStatus::Completed
    }

    /// Strictly between intake and completion
    pub fn is_in_progress(self) -> bool {
        !self.is_initial() && !self.is_terminal()
    }
}

impl Default for CaseStatus {
    fn default() -> Self {
        CaseStatus::Pending
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = CaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CaseError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_follow_declaration_order() {
        for (index, status) in CaseStatus::ALL.iter().enumerate() {
            assert_eq!(status.ordinal(), index);
            assert_eq!(CaseStatus::from_ordinal(index), Some(*status));
        }
        assert_eq!(CaseStatus::from_ordinal(8), None);
    }

    #[test]
    fn test_parse_round_trip() {
        for status in CaseStatus::ALL {
            assert_eq!(status.as_str().parse::<CaseStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = "not_a_real_status".parse::<CaseStatus>().unwrap_err();
        assert!(matches!(err, CaseError::UnknownStatus(ref s) if s == "not_a_real_status"));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Pending".parse::<CaseStatus>().is_err());
    }

    #[test]
    fn test_next_and_previous() {
        assert_eq!(CaseStatus::Pending.previous(), None);
        assert_eq!(CaseStatus::Pending.next(), Some(CaseStatus::DocumentsVerified));
        assert_eq!(CaseStatus::Completed.next(), None);
        assert_eq!(CaseStatus::Completed.previous(), Some(CaseStatus::ResultReceived));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&CaseStatus::CfpbFiled).unwrap();
        assert_eq!(json, "\"cfpb_filed\"");
        let back: CaseStatus = serde_json::from_str("\"ftc_created\"").unwrap();
        assert_eq!(back, CaseStatus::FtcCreated);
    }

    #[test]
    fn test_in_progress() {
        assert!(!CaseStatus::Pending.is_in_progress());
        assert!(CaseStatus::ResultReceived.is_in_progress());
        assert!(!CaseStatus::Completed.is_in_progress());
    }
}
