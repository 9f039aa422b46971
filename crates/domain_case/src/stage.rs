//! Stage descriptors, temporal classification and the progress timeline
//!
//! This is the single table of display metadata for every status. Client and
//! admin views render different fields of the same [`StageDescriptor`].

use serde::Serialize;
use tracing::warn;

use crate::error::CaseError;
use crate::status::CaseStatus;

/// Display and progress metadata for one status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageDescriptor {
    pub status: CaseStatus,
    /// Position in the progression, 0 through 7
    pub ordinal: usize,
    /// Badge label, e.g. "Pending Review"
    pub label: &'static str,
    /// Timeline heading, e.g. "Application Received"
    pub title: &'static str,
    pub short_title: &'static str,
    /// One-sentence guidance shown for the current stage
    pub guidance: &'static str,
    pub what_happens: &'static str,
    pub details: &'static [&'static str],
    pub estimated_duration: &'static str,
    /// `ordinal * 100 / 7`, in `[0, 100]`
    pub progress_percentage: f64,
}

struct StageText {
    label: &'static str,
    title: &'static str,
    short_title: &'static str,
    guidance: &'static str,
    what_happens: &'static str,
    details: &'static [&'static str],
    estimated_duration: &'static str,
}

const STAGES: [StageText; CaseStatus::COUNT] = [
    StageText {
        label: "Pending Review",
        title: "Application Received",
        short_title: "Received",
        guidance: "Your application has been submitted and is under review by our team.",
        what_happens: "Our specialists are reviewing your application and verifying all submitted information and documents.",
        details: &[
            "Application form received",
            "Documents uploaded successfully",
            "Initial review in progress",
        ],
        estimated_duration: "Within 24 hours",
    },
    StageText {
        label: "Documents Verified",
        title: "Documents Verified",
        short_title: "Verified",
        guidance: "All your documents have been verified and approved.",
        what_happens: "We verify your identity documents, confirm your SSN, and validate your billing address proof to ensure accuracy.",
        details: &[
            "SSN verified",
            "Driver License validated",
            "Billing address confirmed",
            "Identity verification complete",
        ],
        estimated_duration: "1-2 business days",
    },
    StageText {
        label: "Freeze Completed",
        title: "Credit Freeze Initiated",
        short_title: "Credit Freeze",
        guidance: "Credit freeze has been completed with LexisNexis and Innovis.",
        what_happens: "We place security freezes on your credit reports at LexisNexis and Innovis to protect your information during the dispute process.",
        details: &[
            "LexisNexis freeze placed",
            "Innovis freeze placed",
            "Confirmation numbers saved",
            "Freeze documentation archived",
        ],
        estimated_duration: "2-3 business days",
    },
    StageText {
        label: "Letters Sent",
        title: "Dispute Letters Sent",
        short_title: "Letters Sent",
        guidance: "Certified letters sent to all three major credit bureaus.",
        what_happens: "We send certified dispute letters with your personal information correction requests to Experian, Equifax, and TransUnion. Bureaus have 30 days to respond.",
        details: &[
            "Letter to Experian sent",
            "Letter to Equifax sent",
            "Letter to TransUnion sent",
            "Tracking numbers recorded",
            "Delivery confirmation pending",
        ],
        estimated_duration: "1 week for delivery",
    },
    StageText {
        label: "FTC Report Created",
        title: "FTC Report Filed",
        short_title: "FTC Report",
        guidance: "Identity theft report created and filed with the FTC.",
        what_happens: "After waiting 14 days from letter submission, we create an official FTC identity theft report on IdentityTheft.gov to support your case.",
        details: &[
            "FTC account created",
            "Identity theft report submitted",
            "FTC report number obtained",
            "Report PDF archived",
            "Waiting period: 14 days",
        ],
        estimated_duration: "14 days waiting period",
    },
    StageText {
        label: "CFPB Complaint Filed",
        title: "CFPB Complaint Submitted",
        short_title: "CFPB Filed",
        guidance: "Official complaint filed with Consumer Financial Protection Bureau.",
        what_happens: "We file an official complaint with the CFPB against credit bureaus that haven't resolved your disputes. They must respond within 30 days.",
        details: &[
            "CFPB account created",
            "Complaint form completed",
            "Supporting documents attached",
            "Complaint number assigned",
            "Bureaus notified (30-day response time)",
        ],
        estimated_duration: "30 days for bureau response",
    },
    StageText {
        label: "Result Received",
        title: "Results & Phone Disputes",
        short_title: "Results",
        guidance: "Reviewing bureau responses and conducting phone disputes if needed.",
        what_happens: "We review all responses from credit bureaus. If items weren't removed, we conduct phone disputes and escalate through additional channels.",
        details: &[
            "CFPB responses received",
            "Results analyzed",
            "Phone disputes initiated (if needed)",
            "Additional follow-ups in progress",
            "Final verification pending",
        ],
        estimated_duration: "30 days",
    },
    StageText {
        label: "Completed",
        title: "Case Completed",
        short_title: "Completed",
        guidance: "Your credit repair case has been successfully completed!",
        what_happens: "Your case is complete! Negative items have been successfully disputed and removed from your credit reports.",
        details: &[
            "All disputes resolved",
            "Credit reports updated",
            "Final report generated",
            "Case documentation archived",
        ],
        estimated_duration: "Completed",
    },
];

/// Progress through the process as a percentage
pub fn progress_percentage(status: CaseStatus) -> f64 {
    status.ordinal() as f64 * 100.0 / (CaseStatus::COUNT - 1) as f64
}

/// Display and progress metadata for a status
pub fn describe(status: CaseStatus) -> StageDescriptor {
    let ordinal = status.ordinal();
    let text = &STAGES[ordinal];
    StageDescriptor {
        status,
        ordinal,
        label: text.label,
        title: text.title,
        short_title: text.short_title,
        guidance: text.guidance,
        what_happens: text.what_happens,
        details: text.details,
        estimated_duration: text.estimated_duration,
        progress_percentage: progress_percentage(status),
    }
}

/// [`describe`] for a raw wire value
///
/// # Errors
///
/// `CaseError::UnknownStatus` when `raw` is not one of the eight canonical values.
pub fn describe_str(raw: &str) -> Result<StageDescriptor, CaseError> {
    raw.parse::<CaseStatus>().map(describe)
}

/// A status rendered for display, possibly through the degraded fallback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusDisplay {
    /// The value as received
    pub raw: String,
    pub descriptor: StageDescriptor,
    /// True when `raw` was not recognised and `descriptor` is the pending
    /// fallback; progress must not be read from it
    pub degraded: bool,
}

/// Describes a raw status, falling back to `pending` for unrecognised values
pub fn display_status(raw: &str) -> StatusDisplay {
    match describe_str(raw) {
        Ok(descriptor) => StatusDisplay {
            raw: raw.to_string(),
            descriptor,
            degraded: false,
        },
        Err(_) => {
            warn!(status = %raw, "Unrecognised case status, displaying as pending");
            StatusDisplay {
                raw: raw.to_string(),
                descriptor: describe(CaseStatus::Pending),
                degraded: true,
            }
        }
    }
}

/// Position of a stage relative to a case's current status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageClass {
    Past,
    Current,
    Future,
}

/// Classifies `status` against the case's actual `reference` status
pub fn classify(status: CaseStatus, reference: CaseStatus) -> StageClass {
    use std::cmp::Ordering;

    match status.ordinal().cmp(&reference.ordinal()) {
        Ordering::Less => StageClass::Past,
        Ordering::Equal => StageClass::Current,
        Ordering::Greater => StageClass::Future,
    }
}

/// One row of the progress timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineStep {
    pub descriptor: StageDescriptor,
    pub class: StageClass,
}

/// Every stage, in order, classified against `current`
pub fn timeline(current: CaseStatus) -> Vec<TimelineStep> {
    CaseStatus::ALL
        .iter()
        .map(|&status| TimelineStep {
            descriptor: describe(status),
            class: classify(status, current),
        })
        .collect()
}

/// The stage after `current`, `None` once completed
pub fn next_stage(current: CaseStatus) -> Option<StageDescriptor> {
    current.next().map(describe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_of_progress() {
        assert_eq!(describe(CaseStatus::Pending).progress_percentage, 0.0);
        assert_eq!(describe(CaseStatus::Completed).progress_percentage, 100.0);
    }

    #[test]
    fn test_descriptor_matches_status() {
        for status in CaseStatus::ALL {
            let descriptor = describe(status);
            assert_eq!(descriptor.status, status);
            assert_eq!(descriptor.ordinal, status.ordinal());
            assert!(!descriptor.label.is_empty());
            assert!(!descriptor.details.is_empty());
        }
    }

    #[test]
    fn test_describe_str_unknown() {
        assert!(matches!(
            describe_str("not_a_real_status"),
            Err(CaseError::UnknownStatus(_))
        ));
    }

    #[test]
    fn test_display_status_degrades_to_pending() {
        let display = display_status("archived");
        assert!(display.degraded);
        assert_eq!(display.raw, "archived");
        assert_eq!(display.descriptor.status, CaseStatus::Pending);
        assert_eq!(display.descriptor.progress_percentage, 0.0);
    }

    #[test]
    fn test_display_status_known() {
        let display = display_status("letters_sent");
        assert!(!display.degraded);
        assert_eq!(display.descriptor.status, CaseStatus::LettersSent);
    }

    #[test]
    fn test_timeline_classification() {
        let steps = timeline(CaseStatus::LettersSent);
        assert_eq!(steps.len(), CaseStatus::COUNT);
        let classes: Vec<StageClass> = steps.iter().map(|s| s.class).collect();
        assert_eq!(&classes[..3], &[StageClass::Past; 3]);
        assert_eq!(classes[3], StageClass::Current);
        assert_eq!(&classes[4..], &[StageClass::Future; 4]);
    }

    #[test]
    fn test_next_stage() {
        assert_eq!(
            next_stage(CaseStatus::Pending).map(|d| d.status),
            Some(CaseStatus::DocumentsVerified)
        );
        assert!(next_stage(CaseStatus::Completed).is_none());
    }
}
