//! certificate operations
//!
//! maps each domain action onto exactly one gateway call and a deterministic
//! result transform. the positional argument order of `create-certificate`
//! is the wire contract with the deployed certchain contract, do not
//! reorder.

use tracing::warn;

use crate::certificate::{
    trimmed_skills, Certificate, CertificateData, CertificateExtraData, MintResult,
    RawCertificateData,
};
use crate::config::StacksProvider;
use crate::error::ClientError;
use crate::gateway::{
    ContractArg, ContractCallOptions, ContractGateway, ReadResult, TransactionResult,
};
use crate::validate::validate_certificate_data;

/// certificate operations bound to one provider snapshot
#[derive(Clone)]
pub struct CertificateOps {
    gateway: ContractGateway,
    provider: StacksProvider,
}

impl CertificateOps {
    pub fn new(gateway: ContractGateway, provider: StacksProvider) -> Self {
        Self { gateway, provider }
    }

    pub fn provider(&self) -> &StacksProvider {
        &self.provider
    }

    fn options(&self, function_name: &str, function_args: Vec<ContractArg>) -> ContractCallOptions {
        let contract_name = if self.provider.contract_name.is_empty() {
            "certchain".to_string()
        } else {
            self.provider.contract_name.clone()
        };
        ContractCallOptions {
            contract_address: self.provider.contract_address.clone(),
            contract_name,
            function_name: function_name.to_string(),
            function_args,
            sender_key: None,
        }
    }

    /// mint a certificate nft; validation runs before any network call
    pub async fn mint(&self, data: &CertificateData) -> MintResult {
        if let Err(errors) = validate_certificate_data(data) {
            return MintResult::fail(ClientError::Validation(errors).to_string());
        }

        let args = vec![
            ContractArg::from(data.recipient.as_str()),
            ContractArg::from(data.name.as_str()),
            ContractArg::from(data.description.clone().unwrap_or_default()),
            ContractArg::from(data.image_uri.clone().unwrap_or_default()),
            ContractArg::from(data.issuer.as_str()),
            ContractArg::from(data.recipient.as_str()),
            ContractArg::from(data.issue_date.as_str()),
            ContractArg::optional(data.expiry_date.clone().filter(|d| !d.is_empty())),
            ContractArg::from(data.certificate_id.as_str()),
            ContractArg::from(data.course_name.as_str()),
            ContractArg::optional(data.grade.clone().filter(|g| !g.is_empty())),
            ContractArg::from(trimmed_skills(&data.skills)),
        ];

        let submitted = self
            .gateway
            .call_public(&self.options("create-certificate", args))
            .await;
        if !submitted.success {
            return MintResult::fail(
                submitted
                    .error
                    .unwrap_or_else(|| "Failed to mint certificate NFT".into()),
            );
        }

        // the submission only yields a txid; report the freshly minted id
        // via a best-effort follow-up read
        let token_id = self.get_last_token_id().await;
        MintResult::ok(token_id, submitted.tx_id)
    }

    /// freeze certificate metadata on chain
    pub async fn verify(&self, token_id: u64) -> TransactionResult {
        self.gateway
            .call_public(&self.options(
                "freeze-certificate-metadata",
                vec![ContractArg::from(token_id)],
            ))
            .await
    }

    /// raw certificate details
    pub async fn get_certificate(&self, token_id: u64) -> ReadResult {
        self.gateway
            .call_read_only(&self.options("get-certificate", vec![ContractArg::from(token_id)]))
            .await
    }

    /// raw supplemental data
    pub async fn get_certificate_extra_data(&self, token_id: u64) -> ReadResult {
        self.gateway
            .call_read_only(&self.options(
                "get-certificate-extra-data",
                vec![ContractArg::from(token_id)],
            ))
            .await
    }

    /// owner address, or none when the lookup fails or yields no string
    pub async fn get_owner(&self, token_id: u64) -> Option<String> {
        let result = self
            .gateway
            .call_read_only(&self.options("get-owner", vec![ContractArg::from(token_id)]))
            .await;
        if !result.success {
            return None;
        }
        result
            .result
            .and_then(|v| v.as_str().map(str::to_string))
    }

    /// certificate count held by an address, 0 on failure
    pub async fn get_balance(&self, address: &str) -> u64 {
        read_u64(
            self.gateway
                .call_read_only(&self.options("get-balance", vec![ContractArg::from(address)]))
                .await,
        )
    }

    /// highest minted token id, 0 on failure
    pub async fn get_last_token_id(&self) -> u64 {
        read_u64(
            self.gateway
                .call_read_only(&self.options("get-last-token-id", vec![]))
                .await,
        )
    }

    /// full certificate lookup
    ///
    /// two-step assembly: the base details decide existence; the extra-data
    /// call degrades to empty supplemental fields instead of failing the
    /// lookup. ownership is a separate caller-level operation.
    pub async fn check_certificate(&self, token_id: u64) -> Option<Certificate> {
        let base = self.get_certificate(token_id).await;
        let raw_value = match (base.success, base.result) {
            (true, Some(value)) if !value.is_null() => value,
            _ => return None,
        };
        let raw: RawCertificateData = match serde_json::from_value(raw_value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("unparseable certificate payload for token {token_id}: {e}");
                RawCertificateData::default()
            }
        };

        let extra_result = self.get_certificate_extra_data(token_id).await;
        let extra = match (extra_result.success, extra_result.result) {
            (true, Some(value)) => serde_json::from_value(value).unwrap_or_default(),
            _ => CertificateExtraData::default(),
        };

        Some(Certificate::assemble(token_id, raw, extra))
    }
}

fn read_u64(result: ReadResult) -> u64 {
    if !result.success {
        return 0;
    }
    result.result.and_then(|v| v.as_u64()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::error::Result;
    use crate::gateway::ContractTransport;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// transport that records every call and replays canned read results
    struct RecordingTransport {
        calls: Mutex<Vec<ContractCallOptions>>,
        reads: Mutex<Vec<Result<Value>>>,
    }

    impl RecordingTransport {
        fn new(reads: Vec<Result<Value>>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reads: Mutex::new(reads),
            })
        }

        fn calls(&self) -> Vec<ContractCallOptions> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContractTransport for RecordingTransport {
        async fn read_only(&self, options: &ContractCallOptions) -> Result<Value> {
            self.calls.lock().unwrap().push(options.clone());
            let mut reads = self.reads.lock().unwrap();
            if reads.is_empty() {
                Ok(Value::Null)
            } else {
                reads.remove(0)
            }
        }

        async fn submit(&self, options: &ContractCallOptions) -> Result<String> {
            self.calls.lock().unwrap().push(options.clone());
            Ok("0xfeed".into())
        }
    }

    fn ops(transport: Arc<RecordingTransport>) -> CertificateOps {
        let config = NetworkConfig::testnet();
        CertificateOps::new(
            ContractGateway::new(transport),
            StacksProvider::connect("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7", &config),
        )
    }

    fn mint_data() -> CertificateData {
        CertificateData {
            name: "Blockchain Development Certificate".into(),
            issuer: "Stacks Academy".into(),
            recipient: "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7".into(),
            certificate_id: "CERT-2026-001".into(),
            course_name: "Advanced Stacks Development".into(),
            issue_date: "2026-01-15".into(),
            expiry_date: Some("2027-01-15".into()),
            skills: vec!["Clarity".into(), "Smart Contracts".into()],
            grade: Some("A+".into()),
            description: Some("Advanced course".into()),
            image_uri: Some("https://example.com/cert1.png".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_mint_argument_order() {
        let transport = RecordingTransport::new(vec![Ok(json!(42))]);
        let result = ops(transport.clone()).mint(&mint_data()).await;
        assert!(result.success);
        assert_eq!(result.token_id, 42);
        assert_eq!(result.transaction_id.as_deref(), Some("0xfeed"));

        let calls = transport.calls();
        assert_eq!(calls[0].function_name, "create-certificate");
        let args = serde_json::to_value(&calls[0].function_args).unwrap();
        assert_eq!(
            args,
            json!([
                "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7",
                "Blockchain Development Certificate",
                "Advanced course",
                "https://example.com/cert1.png",
                "Stacks Academy",
                "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7",
                "2026-01-15",
                ["2027-01-15"],
                "CERT-2026-001",
                "Advanced Stacks Development",
                ["A+"],
                ["Clarity", "Smart Contracts"],
            ])
        );
        // txid submission plus the follow-up token id read
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].function_name, "get-last-token-id");
    }

    #[tokio::test]
    async fn test_mint_optional_fields_become_null() {
        let transport = RecordingTransport::new(vec![Ok(json!(1))]);
        let mut data = mint_data();
        data.expiry_date = None;
        data.grade = Some(String::new());
        data.description = None;
        data.image_uri = None;

        ops(transport.clone()).mint(&data).await;
        let args = serde_json::to_value(&transport.calls()[0].function_args).unwrap();
        assert_eq!(args[2], json!(""));
        assert_eq!(args[3], json!(""));
        assert_eq!(args[7], json!(null));
        assert_eq!(args[10], json!(null));
    }

    #[tokio::test]
    async fn test_mint_validation_precedes_gateway() {
        let transport = RecordingTransport::new(vec![]);
        let mut data = mint_data();
        data.name = String::new();
        data.skills = vec!["  ".into()];

        let result = ops(transport.clone()).mint(&data).await;
        assert!(!result.success);
        assert_eq!(result.token_id, 0);
        let error = result.error.unwrap();
        assert!(error.contains("Certificate name is required"));
        assert!(error.contains("At least one skill is required"));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_verify_calls_freeze() {
        let transport = RecordingTransport::new(vec![]);
        let result = ops(transport.clone()).verify(7).await;
        assert!(result.success);
        let calls = transport.calls();
        assert_eq!(calls[0].function_name, "freeze-certificate-metadata");
        assert_eq!(
            serde_json::to_value(&calls[0].function_args).unwrap(),
            json!([7])
        );
    }

    #[tokio::test]
    async fn test_get_owner_typing() {
        let transport = RecordingTransport::new(vec![Ok(json!("SP9QZX9C4S1RZV3HZ7K2NAB0W2C9XC5QGGD9P0FM"))]);
        assert_eq!(
            ops(transport).get_owner(7).await.as_deref(),
            Some("SP9QZX9C4S1RZV3HZ7K2NAB0W2C9XC5QGGD9P0FM")
        );

        let failing = RecordingTransport::new(vec![Err(ClientError::Network("down".into()))]);
        assert_eq!(ops(failing).get_owner(7).await, None);

        let non_string = RecordingTransport::new(vec![Ok(json!(13))]);
        assert_eq!(ops(non_string).get_owner(7).await, None);
    }

    #[tokio::test]
    async fn test_balance_and_last_token_id_default_zero() {
        let transport = RecordingTransport::new(vec![
            Err(ClientError::Network("down".into())),
            Ok(json!("not-a-number")),
        ]);
        let ops = ops(transport);
        assert_eq!(ops.get_balance("SP123").await, 0);
        assert_eq!(ops.get_last_token_id().await, 0);
    }

    #[tokio::test]
    async fn test_assembly_degrades_on_extra_data_failure() {
        let transport = RecordingTransport::new(vec![
            Ok(json!({
                "name": "Rust Basics",
                "issuer": "Crypto Institute",
                "recipient": "SP123",
                "certificate-id": "CERT-7",
                "course-name": "Rust",
                "issue-date": "2026-02-01",
                "skills": ["Rust"],
                "metadata-frozen": false,
            })),
            Err(ClientError::Network("down".into())),
        ]);

        let cert = ops(transport).check_certificate(7).await.unwrap();
        assert_eq!(cert.name, "Rust Basics");
        assert_eq!(cert.skills, vec!["Rust"]);
        assert_eq!(cert.institution, None);
    }

    #[tokio::test]
    async fn test_assembly_absent_when_base_lookup_fails() {
        let failing = RecordingTransport::new(vec![Err(ClientError::Network("down".into()))]);
        assert!(ops(failing.clone()).check_certificate(7).await.is_none());
        // the extra-data call is never made once the base lookup fails
        assert_eq!(failing.calls().len(), 1);

        let null_result = RecordingTransport::new(vec![Ok(Value::Null)]);
        assert!(ops(null_result).check_certificate(7).await.is_none());
    }

    #[tokio::test]
    async fn test_assembly_merges_extra_data() {
        let transport = RecordingTransport::new(vec![
            Ok(json!({ "name": "Rust Basics", "metadata-frozen": true })),
            Ok(json!({ "institution": "Blockchain University" })),
        ]);

        let cert = ops(transport).check_certificate(3).await.unwrap();
        assert_eq!(cert.institution.as_deref(), Some("Blockchain University"));
        assert!(cert.is_verified);
    }
}
