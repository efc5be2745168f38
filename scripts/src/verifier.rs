//! Source verification against an Etherscan-compatible block explorer (BscScan).
//!
//! Verification is a two step exchange: the standard JSON input is submitted
//! and the explorer answers with a GUID, which is then polled until the
//! explorer reports a final result.

use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    artifacts::{BuildInfo, ContractArtifact},
    config::{DeployConfig, ExplorerConfig},
    constants::{API_KEY_ENV_VAR, EXPLORER_STATUS_OK, STANDARD_JSON_CODE_FORMAT, VERIFY_PENDING_RESULT},
    errors::ScriptError,
    types::{ConstructorArgs, DeployedContract, VerificationOutcome},
};

/// The timeout applied to each request to the explorer
const EXPLORER_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can verify a deployed contract's source
#[async_trait]
pub trait ContractVerifier: Sync {
    /// Check that verification can run, so a procedure can fail before it
    /// deploys anything
    fn check_ready(&self) -> Result<(), ScriptError> {
        Ok(())
    }

    /// Verify `deployed`, which must have been constructed with `args`
    async fn verify(
        &self,
        deployed: &DeployedContract,
        args: &ConstructorArgs,
    ) -> Result<VerificationOutcome, ScriptError>;
}

/// The envelope every explorer API response is wrapped in
#[derive(Clone, Debug, Deserialize)]
pub struct ExplorerResponse {
    /// `"1"` on success, `"0"` otherwise
    pub status: String,
    /// A short status message, e.g. `OK` or `NOTOK`
    pub message: String,
    /// The payload: a GUID, a status string, or an error description
    pub result: String,
}

/// The state of a submitted verification
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Still queued at the explorer
    Pending,
    /// Verified, with the explorer's message
    Verified(String),
}

/// Interpret the response to a verification submission, returning the GUID
/// to poll
pub fn interpret_submission(resp: &ExplorerResponse) -> Result<String, ScriptError> {
    if resp.status == EXPLORER_STATUS_OK {
        Ok(resp.result.clone())
    } else {
        Err(ScriptError::Verification(format!(
            "submission rejected ({}): {}",
            resp.message, resp.result
        )))
    }
}

/// Interpret the response to a verification status check
pub fn interpret_status(resp: &ExplorerResponse) -> Result<VerificationStatus, ScriptError> {
    if resp.result == VERIFY_PENDING_RESULT {
        Ok(VerificationStatus::Pending)
    } else if resp.status == EXPLORER_STATUS_OK {
        Ok(VerificationStatus::Verified(resp.result.clone()))
    } else {
        Err(ScriptError::Verification(resp.result.clone()))
    }
}

/// Build the form fields of a `verifysourcecode` submission
pub fn submission_form(
    api_key: &str,
    deployed: &DeployedContract,
    args: &ConstructorArgs,
    artifact: &ContractArtifact,
    build_info: &BuildInfo,
) -> Result<Vec<(&'static str, String)>, ScriptError> {
    let source_code = serde_json::to_string(&build_info.input)
        .map_err(|e| ScriptError::Verification(e.to_string()))?;

    Ok(vec![
        ("apikey", api_key.to_string()),
        ("module", "contract".to_string()),
        ("action", "verifysourcecode".to_string()),
        ("contractaddress", format!("{:#x}", deployed.address)),
        ("sourceCode", source_code),
        ("codeformat", STANDARD_JSON_CODE_FORMAT.to_string()),
        ("contractname", artifact.fully_qualified_name()),
        ("compilerversion", build_info.compiler_version()),
        // The misspelling is part of the explorer API
        ("constructorArguements", hex::encode(args.abi_encode())),
    ])
}

/// Verifies contracts through the explorer's HTTP API
pub struct ExplorerVerifier {
    /// The HTTP client
    client: reqwest::Client,
    /// Explorer settings
    config: ExplorerConfig,
    /// The Hardhat artifacts directory
    artifacts_dir: PathBuf,
}

impl ExplorerVerifier {
    /// Create a verifier from the deploy configuration
    pub fn new(config: &DeployConfig) -> Result<Self, ScriptError> {
        let client = reqwest::Client::builder()
            .timeout(EXPLORER_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

        Ok(Self {
            client,
            config: config.explorer.clone(),
            artifacts_dir: config.artifacts_dir.clone(),
        })
    }

    /// The explorer API key
    fn api_key(&self) -> Result<&str, ScriptError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(ScriptError::MissingConfig(API_KEY_ENV_VAR))
    }

    /// Submit the source for verification, returning the GUID to poll
    async fn submit(&self, form: &[(&'static str, String)]) -> Result<String, ScriptError> {
        let resp: ExplorerResponse = self
            .client
            .post(self.config.api_url.clone())
            .query(&[("chainid", self.config.chain_id)])
            .form(form)
            .send()
            .await
            .map_err(|e| ScriptError::Verification(e.to_string()))?
            .json()
            .await
            .map_err(|e| ScriptError::Verification(e.to_string()))?;

        interpret_submission(&resp)
    }

    /// Check on a submitted verification
    async fn check_status(
        &self,
        api_key: &str,
        guid: &str,
    ) -> Result<VerificationStatus, ScriptError> {
        let chain_id = self.config.chain_id.to_string();
        let resp: ExplorerResponse = self
            .client
            .get(self.config.api_url.clone())
            .query(&[
                ("chainid", chain_id.as_str()),
                ("apikey", api_key),
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
            ])
            .send()
            .await
            .map_err(|e| ScriptError::Verification(e.to_string()))?
            .json()
            .await
            .map_err(|e| ScriptError::Verification(e.to_string()))?;

        interpret_status(&resp)
    }
}

#[async_trait]
impl ContractVerifier for ExplorerVerifier {
    fn check_ready(&self) -> Result<(), ScriptError> {
        self.api_key().map(|_| ())
    }

    async fn verify(
        &self,
        deployed: &DeployedContract,
        args: &ConstructorArgs,
    ) -> Result<VerificationOutcome, ScriptError> {
        let api_key = self.api_key()?;
        if deployed.contract != args.contract() {
            return Err(ScriptError::Verification(format!(
                "{} arguments given for a {} deployment",
                args.contract(),
                deployed.contract
            )));
        }

        let artifact = ContractArtifact::load(&self.artifacts_dir, deployed.contract)?;
        artifact.check_constructor(args)?;
        let build_info = artifact.build_info()?;

        let form = submission_form(api_key, deployed, args, &artifact, &build_info)?;
        let guid = self.submit(&form).await?;
        info!("Verification of {:#x} submitted, guid {guid}", deployed.address);

        for _ in 0..self.config.max_polls {
            tokio::time::sleep(self.config.poll_interval).await;
            match self.check_status(api_key, &guid).await? {
                VerificationStatus::Pending => continue,
                VerificationStatus::Verified(message) => {
                    return Ok(VerificationOutcome {
                        address: deployed.address,
                        message,
                    })
                }
            }
        }

        warn!("Verification {guid} still pending after {} checks", self.config.max_polls);
        Err(ScriptError::Verification(format!(
            "timed out waiting for verification of {:#x}",
            deployed.address
        )))
    }
}
