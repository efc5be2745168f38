//! Constants used in the deploy scripts

/// The rune symbols, in deployment order.
///
/// Each rune is deployed as a `Runes` token whose name and symbol are both the rune symbol.
pub const RUNES: [&str; 12] = [
    "PLASTIC", "PAPER", "FUR", "LEAF", "BRICK", "WOOD", "STONE", "IRON", "SILVER", "ICE", "GOLD",
    "DIAMOND",
];

// --- Environment variables --- //

/// The environment variable holding the BSC testnet RPC URL
pub const RPC_URL_ENV_VAR: &str = "BSC_TEST_RPC";

/// The environment variable holding the deployer's private key
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// The environment variable holding the BscScan API key
pub const API_KEY_ENV_VAR: &str = "BSCSCAN_API_KEY";

/// The environment variable overriding the block explorer API URL
pub const EXPLORER_URL_ENV_VAR: &str = "EXPLORER_API_URL";

/// The environment variable holding the PRL token address
pub const PRL_TOKEN_ADDRESS_ENV_VAR: &str = "PRL_TOKEN_ADDRESS";

/// The environment variable holding the rune proxy contract address
pub const RUNE_PROXY_ADDRESS_ENV_VAR: &str = "RUNE_PROXY_CONTRACT_ADDRESS";

/// The environment variable holding the address of the deployed PLASTIC rune
pub const RUNE_PLASTIC_ADDRESS_ENV_VAR: &str = "RUNE_PLASTIC_ADDRESS";

// --- Defaults --- //

/// The BscScan testnet API endpoint
pub const DEFAULT_EXPLORER_API_URL: &str = "https://api-testnet.bscscan.com/api";

/// The directory Hardhat writes compilation artifacts to
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The interval between verification status checks, in milliseconds
pub const VERIFY_POLL_INTERVAL_MS: u64 = 5_000;

/// The maximum number of verification status checks before giving up
pub const VERIFY_MAX_POLLS: u32 = 20;

// --- Hardhat artifacts --- //

/// The directory under the artifacts root holding solc build info files
pub const BUILD_INFO_DIR: &str = "build-info";

/// The extension of a Hardhat artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The suffix of the debug sidecar Hardhat writes next to each artifact
pub const DBG_ARTIFACT_SUFFIX: &str = ".dbg.json";

// --- Explorer API --- //

/// The `codeformat` value for standard JSON input submissions
pub const STANDARD_JSON_CODE_FORMAT: &str = "solidity-standard-json-input";

/// The status string the explorer returns on success
pub const EXPLORER_STATUS_OK: &str = "1";

/// The verification status result reported while a submission is queued
pub const VERIFY_PENDING_RESULT: &str = "Pending in queue";
