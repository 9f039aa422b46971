//! Client-facing DTOs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClientId, FileId};
use domain_case::{Case, CaseDetail, DocumentInfo, DocumentType, SubmissionReceipt};

/// Shown with the generated password after intake
pub const PASSWORD_NOTE: &str = "Save this password to access your client portal";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
    pub client_id: ClientId,
    pub email: String,
    pub password: String,
    pub note: String,
}

impl From<SubmissionReceipt> for SubmissionResponse {
    fn from(receipt: SubmissionReceipt) -> Self {
        Self {
            success: true,
            message: "Application submitted successfully".to_string(),
            client_id: receipt.client_id,
            email: receipt.email,
            password: receipt.password,
            note: PASSWORD_NOTE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfoResponse {
    pub id: FileId,
    pub filename: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

impl From<DocumentInfo> for DocumentInfoResponse {
    fn from(info: DocumentInfo) -> Self {
        Self {
            id: info.file_id,
            filename: info.filename,
            size: info.size_bytes,
            uploaded_at: info.uploaded_at,
        }
    }
}

/// A case with its document metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResponse {
    #[serde(flatten)]
    pub case: Case,
    #[serde(default)]
    pub documents_info: BTreeMap<DocumentType, DocumentInfoResponse>,
}

impl CaseResponse {
    /// Uses the document index carried on the case itself
    pub fn from_case(case: Case) -> Self {
        let documents_info = case
            .documents
            .iter()
            .map(|(kind, info)| (*kind, DocumentInfoResponse::from(info.clone())))
            .collect();
        Self { case, documents_info }
    }
}

impl From<CaseDetail> for CaseResponse {
    fn from(detail: CaseDetail) -> Self {
        let documents_info = detail
            .documents
            .into_iter()
            .map(|(kind, info)| (kind, info.into()))
            .collect();
        Self {
            case: detail.case,
            documents_info,
        }
    }
}
