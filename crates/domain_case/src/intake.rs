//! Client intake
//!
//! Validation of an applicant's submission and its conversion into a new
//! `pending` case.
//!
//! # Validation Rules
//!
//! - First and last name: 1 to 100 characters once trimmed
//! - Email: syntactically valid
//! - Phone: optional `+`, optional leading `1`, then 9 to 15 digits
//! - Date of birth: in the past
//! - SSN: `NNN-NN-NNNN`
//! - Street address at least 5 characters, city at least 2, state exactly 2
//! - ZIP: `NNNNN` or `NNNNN-NNNN`
//! - Terms and conditions accepted
//! - Driver license and billing address proof both listed

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::FileId;
use crate::case::{ApplicantIdentity, Case, DocumentIndex, DocumentInfo, DocumentType, GovernmentId, PostalAddress};
use crate::error::CaseError;

/// Metadata of one document attached to a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub document_type: DocumentType,
    pub filename: String,
    pub size_bytes: u64,
}

/// Application form submitted by a prospective client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientSubmission {
    #[validate(custom(function = "validate_name"))]
    pub first_name: String,
    #[validate(custom(function = "validate_name"))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(custom(function = "validate_birth_date"))]
    pub date_of_birth: NaiveDate,
    #[validate(custom(function = "validate_ssn"))]
    pub ssn: String,
    #[validate(length(min = 5))]
    pub address: String,
    #[validate(length(min = 2))]
    pub city: String,
    #[validate(length(equal = 2))]
    pub state: String,
    #[validate(custom(function = "validate_zip"))]
    pub zip_code: String,
    #[validate(custom(function = "validate_terms"))]
    pub agreed_to_terms: bool,
    #[serde(default)]
    pub documents: Vec<DocumentUpload>,
}

impl ClientSubmission {
    /// Runs every field rule plus the required-documents check
    ///
    /// # Errors
    ///
    /// `CaseError::ValidationFailed` listing each failing field.
    pub fn check(&self) -> Result<(), CaseError> {
        let mut errors = Vec::new();

        if let Err(validation) = self.validate() {
            for (field, field_errors) in validation.field_errors() {
                for error in field_errors.iter() {
                    match &error.message {
                        Some(message) => errors.push(format!("{}: {}", field, message)),
                        None => errors.push(format!("{}: {}", field, error.code)),
                    }
                }
            }
        }

        for required in DocumentType::REQUIRED {
            if !self.documents.iter().any(|d| d.document_type == required) {
                errors.push(format!("documents: {} is required", required));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            errors.sort();
            Err(CaseError::validation_failed(errors))
        }
    }

    /// Normalised email used as the account login
    pub fn login_email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    /// Validates the submission and opens a `pending` case from it
    pub fn into_case(self, now: DateTime<Utc>) -> Result<Case, CaseError> {
        self.check()?;

        let documents: DocumentIndex = self
            .documents
            .iter()
            .map(|upload| {
                (
                    upload.document_type,
                    DocumentInfo {
                        file_id: FileId::new(),
                        filename: upload.filename.clone(),
                        size_bytes: upload.size_bytes,
                        uploaded_at: now,
                    },
                )
            })
            .collect();

        let email = self.login_email();
        let identity = ApplicantIdentity {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            ssn: GovernmentId::new(self.ssn),
            address: PostalAddress {
                street: self.address,
                city: self.city,
                state: self.state.to_uppercase(),
                zip_code: self.zip_code,
            },
        };

        Ok(Case::open(identity, documents, now))
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Checks the trimmed name, which is what the case stores
fn validate_name(name: &str) -> Result<(), ValidationError> {
    let length = name.trim().chars().count();
    if (1..=100).contains(&length) {
        Ok(())
    } else {
        Err(invalid("length", "must be 1 to 100 characters"))
    }
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    let plain = (9..=15).contains(&digits.len());
    let with_country_code = digits.starts_with('1') && (10..=16).contains(&digits.len());
    if all_digits(digits) && (plain || with_country_code) {
        Ok(())
    } else {
        Err(invalid("phone", "must be 9 to 15 digits, optionally prefixed with +1"))
    }
}

fn validate_ssn(ssn: &str) -> Result<(), ValidationError> {
    let parts: Vec<&str> = ssn.split('-').collect();
    let shaped = matches!(parts.as_slice(), [a, b, c] if a.len() == 3 && b.len() == 2 && c.len() == 4);
    if shaped && parts.iter().all(|p| all_digits(p)) {
        Ok(())
    } else {
        Err(invalid("ssn", "must match XXX-XX-XXXX"))
    }
}

fn validate_zip(zip: &str) -> Result<(), ValidationError> {
    let valid = match zip.split_once('-') {
        Some((five, four)) => five.len() == 5 && four.len() == 4 && all_digits(five) && all_digits(four),
        None => zip.len() == 5 && all_digits(zip),
    };
    if valid {
        Ok(())
    } else {
        Err(invalid("zip_code", "must be NNNNN or NNNNN-NNNN"))
    }
}

fn validate_birth_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date < Utc::now().date_naive() {
        Ok(())
    } else {
        Err(invalid("date_of_birth", "must be in the past"))
    }
}

fn validate_terms(agreed: &bool) -> Result<(), ValidationError> {
    if *agreed {
        Ok(())
    } else {
        Err(invalid("agreed_to_terms", "you must agree to the terms and conditions"))
    }
}
