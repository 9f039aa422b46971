//! Lenient decoding of case bodies
//!
//! The backend of record may report statuses this build does not know. Such
//! a case still decodes: the unknown values are kept verbatim and the typed
//! case carries `pending` in their place, so views render them through the
//! degraded fallback instead of failing the whole response.

use serde_json::Value;

use domain_case::{display_status, Case, CaseStatus, StatusDisplay};
use interface_api::dto::CaseResponse;

/// A case as received from the API, with its statuses as sent
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedCase {
    pub response: CaseResponse,
    /// `case_status` exactly as sent
    pub raw_status: String,
    /// `status` of each history entry as sent, oldest first
    pub raw_history: Vec<String>,
}

impl ReceivedCase {
    /// Decodes one case body, tolerating unknown status values
    pub fn from_value(mut value: Value) -> Result<Self, serde_json::Error> {
        let raw_status = take_status(value.get_mut("case_status"));
        let raw_history = value
            .get_mut("status_history")
            .and_then(Value::as_array_mut)
            .map(|entries| {
                entries
                    .iter_mut()
                    .map(|entry| take_status(entry.get_mut("status")))
                    .collect()
            })
            .unwrap_or_default();

        let response = serde_json::from_value(value)?;
        Ok(Self {
            response,
            raw_status,
            raw_history,
        })
    }

    pub fn case(&self) -> &Case {
        &self.response.case
    }

    /// Current status for display; degraded when the raw value is unknown
    pub fn status(&self) -> StatusDisplay {
        display_status(&self.raw_status)
    }

    pub fn is_degraded(&self) -> bool {
        self.raw_status.parse::<CaseStatus>().is_err()
    }

    /// Raw status of the history entry at `index`, oldest first
    pub fn raw_history_status(&self, index: usize) -> &str {
        match self.raw_history.get(index) {
            Some(raw) => raw,
            None => self
                .case()
                .status_history()
                .get(index)
                .map(|entry| entry.status().as_str())
                .unwrap_or_default(),
        }
    }
}

impl From<CaseResponse> for ReceivedCase {
    fn from(response: CaseResponse) -> Self {
        let raw_status = response.case.status().as_str().to_string();
        let raw_history = response
            .case
            .status_history()
            .iter()
            .map(|entry| entry.status().as_str().to_string())
            .collect();
        Self {
            response,
            raw_status,
            raw_history,
        }
    }
}

/// Returns the status as sent, putting `pending` in place of an unknown value
fn take_status(slot: Option<&mut Value>) -> String {
    let Some(slot) = slot else {
        return String::new();
    };

    let raw = match slot.as_str() {
        Some(raw) => raw.to_string(),
        None => slot.to_string(),
    };
    if raw.parse::<CaseStatus>().is_err() {
        *slot = Value::from(CaseStatus::Pending.as_str());
    }
    raw
}
