//! pre-mint validation
//!
//! every problem is reported at once so a form can surface the full list,
//! and validation always runs before any contract call is issued.

use chrono::NaiveDate;

use crate::certificate::{trimmed_skills, CertificateData};

/// validate certificate data before minting, collecting all problems
pub fn validate_certificate_data(data: &CertificateData) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if data.name.trim().is_empty() {
        errors.push("Certificate name is required".to_string());
    }
    if data.issuer.trim().is_empty() {
        errors.push("Issuer is required".to_string());
    }
    if data.recipient.trim().is_empty() {
        errors.push("Recipient is required".to_string());
    }
    if data.certificate_id.trim().is_empty() {
        errors.push("Certificate ID is required".to_string());
    }
    if data.course_name.trim().is_empty() {
        errors.push("Course name is required".to_string());
    }
    if data.issue_date.trim().is_empty() {
        errors.push("Issue date is required".to_string());
    }

    if !data.issue_date.trim().is_empty() && !is_valid_date(&data.issue_date) {
        errors.push("Issue date must be in YYYY-MM-DD format".to_string());
    }
    if let Some(expiry) = &data.expiry_date {
        if !expiry.is_empty() && !is_valid_date(expiry) {
            errors.push("Expiry date must be in YYYY-MM-DD format".to_string());
        }
    }

    if trimmed_skills(&data.skills).is_empty() {
        errors.push("At least one skill is required".to_string());
    }

    if !data.certificate_id.is_empty() && !is_valid_identifier(&data.certificate_id) {
        errors.push(
            "Certificate ID can only contain letters, numbers, hyphens, and underscores"
                .to_string(),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// strict `YYYY-MM-DD` with a real calendar date behind it
pub fn is_valid_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits_ok = value
        .bytes()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    digits_ok && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn is_valid_identifier(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
