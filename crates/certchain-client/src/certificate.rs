//! certificate data model
//!
//! form input, the raw on-chain payload shapes and the read-time projection
//! assembled from them. certificates never round-trip to storage, they are
//! rebuilt from chain lookups on every read.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

/// certificate form data submitted for minting
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateData {
    pub name: String,
    pub issuer: String,
    pub recipient: String,
    pub certificate_id: String,
    pub course_name: String,
    pub issue_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CertificateData {
    /// canonical JSON document for export: trimmed skills, an issuance
    /// timestamp, a format version and the metadata block
    pub fn to_json_document(&self) -> String {
        let mut doc = serde_json::to_value(self).unwrap_or(Value::Null);
        if let Value::Object(ref mut map) = doc {
            map.insert("skills".into(), json!(trimmed_skills(&self.skills)));
            map.insert("timestamp".into(), json!(Utc::now().to_rfc3339()));
            map.insert("version".into(), json!("1.0"));
            map.insert(
                "metadata".into(),
                json!({
                    "type": "certificate",
                    "format": "json",
                    "blockchain": "stacks",
                }),
            );
        }
        serde_json::to_string_pretty(&doc).unwrap_or_default()
    }

    /// digest over the identifying fields, for spot-checking integrity
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.name.as_bytes());
        hasher.update(self.issuer.as_bytes());
        hasher.update(self.recipient.as_bytes());
        hasher.update(self.certificate_id.as_bytes());
        hasher.update(self.issue_date.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// drop whitespace-only skills
pub fn trimmed_skills(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// raw `get-certificate` payload with the contract's kebab-case keys
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawCertificateData {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub recipient: Option<String>,
    #[serde(rename = "certificate-id")]
    pub certificate_id: Option<String>,
    #[serde(rename = "course-name")]
    pub course_name: Option<String>,
    #[serde(rename = "issue-date")]
    pub issue_date: Option<String>,
    #[serde(rename = "expiry-date")]
    pub expiry_date: Option<String>,
    pub skills: Option<Vec<String>>,
    pub grade: Option<String>,
    #[serde(rename = "image-uri")]
    pub image_uri: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "metadata-frozen")]
    pub metadata_frozen: Option<bool>,
}

/// raw `get-certificate-extra-data` payload
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CertificateExtraData {
    pub institution: Option<String>,
}

/// read-time projection assembled from the chain lookups
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub token_id: u64,
    pub name: String,
    pub issuer: String,
    pub recipient: String,
    pub certificate_id: String,
    pub course_name: String,
    pub issue_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_verified: bool,
    pub metadata_frozen: bool,
    pub created_at: i64,
}

impl Certificate {
    /// merge the two raw payloads into the projection, applying fallback
    /// labels for missing base fields
    pub fn assemble(token_id: u64, raw: RawCertificateData, extra: CertificateExtraData) -> Self {
        let metadata_frozen = raw.metadata_frozen.unwrap_or(false);
        Self {
            token_id,
            name: raw.name.unwrap_or_else(|| "Unknown Certificate".into()),
            issuer: raw.issuer.unwrap_or_else(|| "Unknown Issuer".into()),
            recipient: raw.recipient.unwrap_or_else(|| "Unknown Recipient".into()),
            certificate_id: raw
                .certificate_id
                .unwrap_or_else(|| format!("cert-{token_id}")),
            course_name: raw.course_name.unwrap_or_else(|| "Unknown Course".into()),
            issue_date: raw
                .issue_date
                .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string()),
            expiry_date: raw.expiry_date,
            skills: raw.skills.unwrap_or_default(),
            grade: raw.grade,
            // the current contract stores no instructor
            instructor: None,
            institution: extra.institution,
            image_uri: raw.image_uri,
            description: raw.description,
            is_verified: metadata_frozen,
            metadata_frozen,
            created_at: Utc::now().timestamp_millis(),
        }
    }
}

/// terminal result of a mint
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResult {
    pub success: bool,
    pub token_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MintResult {
    pub fn ok(token_id: u64, transaction_id: Option<String>) -> Self {
        Self {
            success: true,
            token_id,
            transaction_id,
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            token_id: 0,
            transaction_id: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> CertificateData {
        CertificateData {
            name: "Blockchain Development Certificate".into(),
            issuer: "Stacks Academy".into(),
            recipient: "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7".into(),
            certificate_id: "CERT-2026-001".into(),
            course_name: "Advanced Stacks Development".into(),
            issue_date: "2026-01-15".into(),
            skills: vec!["Clarity".into(), "  ".into(), "Smart Contracts".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_json_document() {
        let doc = data().to_json_document();
        let value: Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["metadata"]["blockchain"], "stacks");
        assert_eq!(value["skills"], json!(["Clarity", "Smart Contracts"]));
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_fingerprint_is_stable_and_input_sensitive() {
        let a = data().fingerprint();
        assert_eq!(a, data().fingerprint());
        assert_eq!(a.len(), 64);

        let mut other = data();
        other.certificate_id = "CERT-2026-002".into();
        assert_ne!(a, other.fingerprint());
    }

    #[test]
    fn test_raw_payload_kebab_keys() {
        let raw: RawCertificateData = serde_json::from_value(json!({
            "name": "Rust Basics",
            "certificate-id": "CERT-7",
            "course-name": "Rust",
            "issue-date": "2026-02-01",
            "metadata-frozen": true,
        }))
        .unwrap();
        assert_eq!(raw.certificate_id.as_deref(), Some("CERT-7"));
        assert_eq!(raw.metadata_frozen, Some(true));
    }

    #[test]
    fn test_assemble_applies_fallbacks() {
        let cert = Certificate::assemble(
            9,
            RawCertificateData::default(),
            CertificateExtraData::default(),
        );
        assert_eq!(cert.token_id, 9);
        assert_eq!(cert.name, "Unknown Certificate");
        assert_eq!(cert.certificate_id, "cert-9");
        assert_eq!(cert.institution, None);
        assert!(!cert.is_verified);
    }

    #[test]
    fn test_assemble_merges_extra_data() {
        let raw: RawCertificateData = serde_json::from_value(json!({
            "name": "Rust Basics",
            "metadata-frozen": true,
        }))
        .unwrap();
        let extra = CertificateExtraData {
            institution: Some("Blockchain University".into()),
        };

        let cert = Certificate::assemble(3, raw, extra);
        assert_eq!(cert.name, "Rust Basics");
        assert_eq!(cert.institution.as_deref(), Some("Blockchain University"));
        assert!(cert.is_verified);
        assert!(cert.metadata_frozen);
    }
}
