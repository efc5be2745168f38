//! Implementations of the various deploy scripts

use tracing::info;

use crate::{
    cli::{MiningPoolsArgs, RunesArgs, VerifyRuneArgs},
    config::{parse_address, require},
    constants::{
        PRL_TOKEN_ADDRESS_ENV_VAR, RUNE_PLASTIC_ADDRESS_ENV_VAR, RUNE_PROXY_ADDRESS_ENV_VAR,
    },
    deployer::ContractDeployer,
    errors::ScriptError,
    types::{ConstructorArgs, Contract, DeployedContract, VerificationOutcome},
    verifier::ContractVerifier,
};

/// Deploy the MiningPools contract and verify it.
///
/// Both constructor addresses, and the verifier's settings, are validated
/// before anything is deployed.
pub async fn deploy_mining_pools(
    args: &MiningPoolsArgs,
    deployer: &impl ContractDeployer,
    verifier: &impl ContractVerifier,
) -> Result<DeployedContract, ScriptError> {
    let prl_token = parse_address(PRL_TOKEN_ADDRESS_ENV_VAR, args.prl_token.as_deref())?;
    let rune_proxy = parse_address(RUNE_PROXY_ADDRESS_ENV_VAR, args.rune_proxy.as_deref())?;
    verifier.check_ready()?;
    let constructor_args = ConstructorArgs::MiningPools {
        prl_token,
        rune_proxy,
    };

    info!("Deploying {} with {constructor_args} ...", Contract::MiningPools);
    let deployed = deployer.deploy(&constructor_args).await?;
    info!("Deployed {:#x}", deployed.address);

    info!("Verifying ...");
    let outcome = verifier.verify(&deployed, &constructor_args).await?;
    info!("Verified: {}", outcome.message);

    Ok(deployed)
}

/// Deploy one Runes token per symbol, in order.
///
/// Each token is verified immediately after it is deployed. The first failure
/// stops the run; tokens after it are not deployed. Returns each deployed
/// token with the symbol it was deployed under.
pub async fn deploy_runes(
    args: &RunesArgs,
    deployer: &impl ContractDeployer,
    verifier: &impl ContractVerifier,
) -> Result<Vec<(String, DeployedContract)>, ScriptError> {
    let symbols = args
        .symbols
        .iter()
        .map(|symbol| require("rune symbol", Some(symbol.as_str())))
        .collect::<Result<Vec<_>, _>>()?;
    if symbols.is_empty() {
        return Err(ScriptError::MissingConfig("rune symbols"));
    }
    if !args.skip_verification {
        verifier.check_ready()?;
    }

    info!("Deploying {} runes ...", symbols.len());
    let mut deployed = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let constructor_args = ConstructorArgs::rune(&symbol);

        let rune = deployer.deploy(&constructor_args).await?;
        info!("Deployed {symbol} {:#x}", rune.address);

        if args.skip_verification {
            info!("Skipping verification of {symbol}");
        } else {
            info!("Verifying {symbol} ...");
            verifier.verify(&rune, &constructor_args).await?;
            info!("Verified {symbol}");
        }

        deployed.push((symbol, rune));
    }

    Ok(deployed)
}

/// Verify a Runes token deployed in an earlier run
pub async fn verify_rune(
    args: &VerifyRuneArgs,
    verifier: &impl ContractVerifier,
) -> Result<VerificationOutcome, ScriptError> {
    let address = parse_address(RUNE_PLASTIC_ADDRESS_ENV_VAR, args.address.as_deref())?;
    let symbol = require("rune symbol", Some(args.symbol.as_str()))?;
    verifier.check_ready()?;

    let rune = DeployedContract {
        contract: Contract::Runes,
        address,
        tx_hash: Default::default(),
    };

    info!("Verifying {symbol} at {address:#x} ...");
    let outcome = verifier
        .verify(&rune, &ConstructorArgs::rune(&symbol))
        .await?;
    info!("Verified: {}", outcome.message);

    Ok(outcome)
}
