//! Typed configuration assembled once at startup from the CLI / environment

use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

use alloy::transports::http::reqwest::Url;
use alloy_primitives::Address;

use crate::{
    cli::GlobalArgs,
    constants::{API_KEY_ENV_VAR, PRIVATE_KEY_ENV_VAR, RPC_URL_ENV_VAR},
    errors::ScriptError,
};

/// Settings for talking to the block explorer's verification API
#[derive(Clone, Debug)]
pub struct ExplorerConfig {
    /// The Etherscan-compatible API endpoint
    pub api_url: Url,
    /// The API key, only needed once something is verified
    pub api_key: Option<String>,
    /// The chain the contracts are deployed on
    pub chain_id: u64,
    /// How long to wait between verification status checks
    pub poll_interval: Duration,
    /// How many status checks to make before giving up
    pub max_polls: u32,
}

/// The configuration shared by every deploy procedure
#[derive(Clone)]
pub struct DeployConfig {
    /// The RPC endpoint to deploy through
    pub rpc_url: Url,
    /// The deployer's private key
    pub private_key: String,
    /// The path to the Hardhat artifacts directory
    pub artifacts_dir: PathBuf,
    /// The number of confirmations to wait for on each deployment
    pub confirmations: u64,
    /// Block explorer settings
    pub explorer: ExplorerConfig,
}

impl fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployConfig")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("private_key", &"<redacted>")
            .field("artifacts_dir", &self.artifacts_dir)
            .field("confirmations", &self.confirmations)
            .field("explorer", &self.explorer)
            .finish()
    }
}

impl DeployConfig {
    /// Validate the global arguments, failing on the first required value
    /// that is absent or blank.
    ///
    /// The explorer API key is not required here; the verifier checks for it
    /// before any procedure that verifies deploys anything.
    pub fn from_args(args: &GlobalArgs) -> Result<Self, ScriptError> {
        let rpc_url = require(RPC_URL_ENV_VAR, args.rpc_url.as_deref())?;
        let rpc_url = parse_url(RPC_URL_ENV_VAR, &rpc_url)?;
        let private_key = require(PRIVATE_KEY_ENV_VAR, args.priv_key.as_deref())?;
        let api_key = require(API_KEY_ENV_VAR, args.api_key.as_deref()).ok();
        let api_url = parse_url("explorer URL", &args.explorer_url)?;

        if args.verify_max_polls == 0 {
            return Err(ScriptError::InvalidConfig(
                "verification needs at least one status check".to_string(),
            ));
        }

        Ok(Self {
            rpc_url,
            private_key,
            artifacts_dir: PathBuf::from(&args.artifacts),
            confirmations: args.confirmations,
            explorer: ExplorerConfig {
                api_url,
                api_key,
                chain_id: args.chain_id,
                poll_interval: Duration::from_millis(args.verify_poll_interval_ms),
                max_polls: args.verify_max_polls,
            },
        })
    }
}

/// Require that a configuration value is present and non-blank,
/// returning it trimmed
pub fn require(name: &'static str, value: Option<&str>) -> Result<String, ScriptError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ScriptError::MissingConfig(name)),
    }
}

/// Require that a configuration value is present and parses as an address
pub fn parse_address(name: &'static str, value: Option<&str>) -> Result<Address, ScriptError> {
    let value = require(name, value)?;
    Address::from_str(&value)
        .map_err(|e| ScriptError::InvalidConfig(format!("{name} is not an address: {e}")))
}

/// Parse a URL-valued setting
fn parse_url(name: &str, value: &str) -> Result<Url, ScriptError> {
    Url::parse(value).map_err(|e| ScriptError::InvalidConfig(format!("{name}: {e}")))
}
