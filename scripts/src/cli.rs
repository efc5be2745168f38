//! Definitions of CLI arguments and commands for deploy scripts
//!
//! Every setting can also be supplied through the environment (or a `.env` file),
//! which is how the scripts are usually driven.

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    commands::{deploy_mining_pools, deploy_runes, verify_rune},
    constants::{
        API_KEY_ENV_VAR, DEFAULT_ARTIFACTS_DIR, DEFAULT_EXPLORER_API_URL, EXPLORER_URL_ENV_VAR,
        NUM_DEPLOY_CONFIRMATIONS, PRIVATE_KEY_ENV_VAR, PRL_TOKEN_ADDRESS_ENV_VAR, RPC_URL_ENV_VAR,
        RUNES, RUNE_PLASTIC_ADDRESS_ENV_VAR, RUNE_PROXY_ADDRESS_ENV_VAR, VERIFY_MAX_POLLS,
        VERIFY_POLL_INTERVAL_MS,
    },
    deployer::ContractDeployer,
    errors::ScriptError,
    verifier::ContractVerifier,
};

/// The chain ID of the BSC testnet
const BSC_TESTNET_CHAIN_ID: u64 = 97;

/// Deploy and verify the MiningPools and Runes contracts
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings shared by every command
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by every command.
///
/// Required values are left optional here so that absence is reported by
/// [`crate::config::DeployConfig::from_args`] rather than by the parser.
#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Network RPC URL
    #[arg(short, long, env = RPC_URL_ENV_VAR)]
    pub rpc_url: Option<String>,

    /// Private key of the deployer
    #[arg(short, long, env = PRIVATE_KEY_ENV_VAR, hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Block explorer API key, needed by every command that verifies
    #[arg(long, env = API_KEY_ENV_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Block explorer API URL
    #[arg(long, env = EXPLORER_URL_ENV_VAR, default_value = DEFAULT_EXPLORER_API_URL)]
    pub explorer_url: String,

    /// Chain ID reported to the block explorer
    #[arg(long, default_value_t = BSC_TESTNET_CHAIN_ID)]
    pub chain_id: u64,

    /// Path to the Hardhat artifacts directory
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: String,

    /// Number of confirmations to wait for each deployment
    #[arg(long, default_value_t = NUM_DEPLOY_CONFIRMATIONS)]
    pub confirmations: u64,

    /// Milliseconds between verification status checks
    #[arg(long, default_value_t = VERIFY_POLL_INTERVAL_MS)]
    pub verify_poll_interval_ms: u64,

    /// Maximum number of verification status checks
    #[arg(long, default_value_t = VERIFY_MAX_POLLS)]
    pub verify_max_polls: u32,
}

/// The available commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy and verify the MiningPools contract
    DeployMiningPools(MiningPoolsArgs),
    /// Deploy and verify one Runes token per symbol
    DeployRunes(RunesArgs),
    /// Verify an already-deployed Runes token
    VerifyRune(VerifyRuneArgs),
}

impl Command {
    /// Run the command against the given deployer and verifier
    pub async fn run(
        self,
        deployer: &impl ContractDeployer,
        verifier: &impl ContractVerifier,
    ) -> Result<(), ScriptError> {
        match self {
            Command::DeployMiningPools(args) => {
                deploy_mining_pools(&args, deployer, verifier).await?;
            }
            Command::DeployRunes(args) => {
                let deployed = deploy_runes(&args, deployer, verifier).await?;
                for (symbol, contract) in &deployed {
                    info!("{symbol}: {:#x}", contract.address);
                }
            }
            Command::VerifyRune(args) => {
                verify_rune(&args, verifier).await?;
            }
        }

        Ok(())
    }
}

/// Deploy the MiningPools contract.
///
/// Both constructor arguments are required; the command fails before
/// deploying anything if either is absent.
#[derive(Args, Clone, Debug, Default)]
pub struct MiningPoolsArgs {
    /// Address of the PRL token
    #[arg(long, env = PRL_TOKEN_ADDRESS_ENV_VAR)]
    pub prl_token: Option<String>,

    /// Address of the rune proxy contract
    #[arg(long, env = RUNE_PROXY_ADDRESS_ENV_VAR)]
    pub rune_proxy: Option<String>,
}

/// Deploy a Runes token for each symbol, verifying each one right after it
/// is deployed
#[derive(Args, Clone, Debug)]
pub struct RunesArgs {
    /// Comma-separated rune symbols, deployed in order
    #[arg(long, value_delimiter = ',', default_values_t = RUNES.map(String::from))]
    pub symbols: Vec<String>,

    /// Deploy without verifying
    #[arg(long)]
    pub skip_verification: bool,
}

impl Default for RunesArgs {
    fn default() -> Self {
        Self {
            symbols: RUNES.iter().map(|s| s.to_string()).collect(),
            skip_verification: false,
        }
    }
}

/// Verify a Runes token deployed in an earlier run
#[derive(Args, Clone, Debug)]
pub struct VerifyRuneArgs {
    /// Address of the deployed token
    #[arg(long, env = RUNE_PLASTIC_ADDRESS_ENV_VAR)]
    pub address: Option<String>,

    /// The symbol the token was deployed with
    #[arg(long, default_value = RUNES[0])]
    pub symbol: String,
}
