//! Tests of the deploy procedures against recording fakes of the deployer
//! and verifier

use std::sync::{Arc, Mutex};

use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use eyre::Result;
use runes_scripts::{
    cli::{MiningPoolsArgs, RunesArgs, VerifyRuneArgs},
    commands::{deploy_mining_pools, deploy_runes, verify_rune},
    constants::RUNES,
    deployer::ContractDeployer,
    errors::ScriptError,
    exit_status,
    types::{ConstructorArgs, Contract, DeployedContract, VerificationOutcome},
    verifier::ContractVerifier,
};

const PRL_TOKEN: &str = "0x875c975E8e2aFa863855f79c85a6054a48596Af7";
const RUNE_PROXY: &str = "0x70aC089d98332ddB7cB49EEA95033c569c823eE8";

// -----------
// | Helpers |
// -----------

/// A call made to one of the fakes
#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    Deploy(ConstructorArgs),
    Verify(Address, ConstructorArgs),
}

/// The ordered log of calls shared by both fakes
#[derive(Clone, Default)]
struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    fn deploys(&self) -> Vec<ConstructorArgs> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Deploy(args) => Some(args),
                _ => None,
            })
            .collect()
    }
}

/// A deployer that hands out sequential addresses, optionally failing on
/// the deploy with the given index
struct FakeDeployer {
    log: CallLog,
    fail_at: Option<usize>,
}

#[async_trait]
impl ContractDeployer for FakeDeployer {
    async fn deploy(&self, args: &ConstructorArgs) -> Result<DeployedContract, ScriptError> {
        let index = self.log.deploys().len();
        self.log.push(Call::Deploy(args.clone()));
        if self.fail_at == Some(index) {
            return Err(ScriptError::ContractDeployment("insufficient funds".to_string()));
        }

        Ok(DeployedContract {
            contract: args.contract(),
            address: Address::with_last_byte(index as u8 + 1),
            tx_hash: TxHash::with_last_byte(index as u8 + 1),
        })
    }
}

/// A verifier that records each request and optionally always fails, or
/// reports that its API key is missing
struct FakeVerifier {
    log: CallLog,
    fail: bool,
    missing_key: bool,
}

#[async_trait]
impl ContractVerifier for FakeVerifier {
    fn check_ready(&self) -> Result<(), ScriptError> {
        if self.missing_key {
            return Err(ScriptError::MissingConfig("BSCSCAN_API_KEY"));
        }
        Ok(())
    }

    async fn verify(
        &self,
        deployed: &DeployedContract,
        args: &ConstructorArgs,
    ) -> Result<VerificationOutcome, ScriptError> {
        self.log.push(Call::Verify(deployed.address, args.clone()));
        if self.fail {
            return Err(ScriptError::Verification("Already Verified".to_string()));
        }

        Ok(VerificationOutcome {
            address: deployed.address,
            message: "Pass - Verified".to_string(),
        })
    }
}

/// Build a deployer / verifier pair sharing one call log
fn fakes(
    fail_deploy_at: Option<usize>,
    fail_verify: bool,
) -> (CallLog, FakeDeployer, FakeVerifier) {
    let log = CallLog::default();
    let deployer = FakeDeployer {
        log: log.clone(),
        fail_at: fail_deploy_at,
    };
    let verifier = FakeVerifier {
        log: log.clone(),
        fail: fail_verify,
        missing_key: false,
    };
    (log, deployer, verifier)
}

fn mining_pools_args() -> MiningPoolsArgs {
    MiningPoolsArgs {
        prl_token: Some(PRL_TOKEN.to_string()),
        rune_proxy: Some(RUNE_PROXY.to_string()),
    }
}

// ----------------------
// | MINING POOLS TESTS |
// ----------------------

#[tokio::test]
async fn test_mining_pools_deploy_then_verify() -> Result<()> {
    let (log, deployer, verifier) = fakes(None, false);

    let deployed = deploy_mining_pools(&mining_pools_args(), &deployer, &verifier).await?;
    assert_eq!(deployed.contract, Contract::MiningPools);

    let expected_args = ConstructorArgs::MiningPools {
        prl_token: PRL_TOKEN.parse()?,
        rune_proxy: RUNE_PROXY.parse()?,
    };
    assert_eq!(
        log.calls(),
        vec![
            Call::Deploy(expected_args.clone()),
            Call::Verify(deployed.address, expected_args),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_mining_pools_missing_config_deploys_nothing() -> Result<()> {
    let cases = [
        (None, Some(RUNE_PROXY), "PRL_TOKEN_ADDRESS"),
        (Some(""), Some(RUNE_PROXY), "PRL_TOKEN_ADDRESS"),
        (Some(PRL_TOKEN), None, "RUNE_PROXY_CONTRACT_ADDRESS"),
        (Some(PRL_TOKEN), Some("  "), "RUNE_PROXY_CONTRACT_ADDRESS"),
    ];

    for (prl_token, rune_proxy, missing) in cases {
        let (log, deployer, verifier) = fakes(None, false);
        let args = MiningPoolsArgs {
            prl_token: prl_token.map(String::from),
            rune_proxy: rune_proxy.map(String::from),
        };

        let res = deploy_mining_pools(&args, &deployer, &verifier).await;
        assert_eq!(res.unwrap_err(), ScriptError::MissingConfig(missing));
        assert!(log.calls().is_empty());
    }

    Ok(())
}

#[tokio::test]
async fn test_mining_pools_invalid_address_deploys_nothing() -> Result<()> {
    let (log, deployer, verifier) = fakes(None, false);
    let args = MiningPoolsArgs {
        prl_token: Some("0xnot-an-address".to_string()),
        ..mining_pools_args()
    };

    let res = deploy_mining_pools(&args, &deployer, &verifier).await;
    assert!(matches!(res, Err(ScriptError::InvalidConfig(_))));
    assert!(log.calls().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_mining_pools_missing_api_key_deploys_nothing() -> Result<()> {
    let (log, deployer, mut verifier) = fakes(None, false);
    verifier.missing_key = true;

    let res = deploy_mining_pools(&mining_pools_args(), &deployer, &verifier).await;
    assert_eq!(res.unwrap_err(), ScriptError::MissingConfig("BSCSCAN_API_KEY"));
    assert!(log.calls().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_mining_pools_verification_failure_propagates() -> Result<()> {
    let (log, deployer, verifier) = fakes(None, true);

    let res = deploy_mining_pools(&mining_pools_args(), &deployer, &verifier).await;
    assert_eq!(
        res.unwrap_err(),
        ScriptError::Verification("Already Verified".to_string())
    );
    assert_eq!(log.calls().len(), 2);

    Ok(())
}

// ---------------
// | RUNES TESTS |
// ---------------

#[tokio::test]
async fn test_runes_deployed_in_order() -> Result<()> {
    let (log, deployer, verifier) = fakes(None, false);

    let deployed = deploy_runes(&RunesArgs::default(), &deployer, &verifier).await?;
    let symbols = deployed.iter().map(|(symbol, _)| symbol.as_str()).collect::<Vec<_>>();
    assert_eq!(symbols, RUNES);

    let expected = RUNES.iter().map(|s| ConstructorArgs::rune(s)).collect::<Vec<_>>();
    assert_eq!(log.deploys(), expected);

    for args in log.deploys() {
        let ConstructorArgs::Runes { name, symbol } = &args else {
            panic!("expected rune arguments, got {args:?}");
        };
        assert_eq!(name, symbol);
    }

    Ok(())
}

#[tokio::test]
async fn test_runes_verified_after_each_deploy() -> Result<()> {
    let (log, deployer, verifier) = fakes(None, false);

    let deployed = deploy_runes(&RunesArgs::default(), &deployer, &verifier).await?;

    // Calls alternate deploy / verify, and each verify matches the deploy before it
    let calls = log.calls();
    assert_eq!(calls.len(), 2 * RUNES.len());
    for (i, pair) in calls.chunks(2).enumerate() {
        let [Call::Deploy(deploy_args), Call::Verify(address, verify_args)] = pair else {
            panic!("expected a deploy followed by a verify, got {pair:?}");
        };
        assert_eq!(deploy_args, verify_args);
        assert_eq!(*address, deployed[i].1.address);
    }

    Ok(())
}

#[tokio::test]
async fn test_runes_deploy_failure_stops_run() -> Result<()> {
    let (log, deployer, verifier) = fakes(Some(3), false);

    let res = deploy_runes(&RunesArgs::default(), &deployer, &verifier).await;
    assert!(matches!(res, Err(ScriptError::ContractDeployment(_))));

    // Three runes deployed and verified, then the failing fourth deploy
    let deploys = log.deploys();
    assert_eq!(deploys.len(), 4);
    assert_eq!(deploys[3], ConstructorArgs::rune(RUNES[3]));
    assert_eq!(log.calls().len(), 3 * 2 + 1);

    Ok(())
}

#[tokio::test]
async fn test_runes_verification_failure_stops_run() -> Result<()> {
    let (log, deployer, verifier) = fakes(None, true);

    let res = deploy_runes(&RunesArgs::default(), &deployer, &verifier).await;
    assert!(matches!(res, Err(ScriptError::Verification(_))));
    assert_eq!(log.deploys(), vec![ConstructorArgs::rune(RUNES[0])]);

    Ok(())
}

#[tokio::test]
async fn test_runes_custom_symbols() -> Result<()> {
    let (log, deployer, verifier) = fakes(None, false);
    let args = RunesArgs {
        symbols: vec!["GOLD".to_string(), " ICE ".to_string()],
        skip_verification: true,
    };

    let deployed = deploy_runes(&args, &deployer, &verifier).await?;
    let symbols = deployed.iter().map(|(symbol, _)| symbol.as_str()).collect::<Vec<_>>();
    assert_eq!(symbols, ["GOLD", "ICE"]);
    assert_eq!(
        log.calls(),
        vec![
            Call::Deploy(ConstructorArgs::rune("GOLD")),
            Call::Deploy(ConstructorArgs::rune("ICE")),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_runes_blank_symbol_deploys_nothing() -> Result<()> {
    let (log, deployer, verifier) = fakes(None, false);
    let args = RunesArgs {
        symbols: vec!["GOLD".to_string(), "".to_string()],
        skip_verification: false,
    };

    let res = deploy_runes(&args, &deployer, &verifier).await;
    assert!(matches!(res, Err(ScriptError::MissingConfig(_))));
    assert!(log.calls().is_empty());

    let empty = RunesArgs {
        symbols: vec![],
        skip_verification: false,
    };
    let res = deploy_runes(&empty, &deployer, &verifier).await;
    assert!(matches!(res, Err(ScriptError::MissingConfig(_))));

    Ok(())
}

#[tokio::test]
async fn test_runes_missing_api_key_deploys_nothing() -> Result<()> {
    let (log, deployer, mut verifier) = fakes(None, false);
    verifier.missing_key = true;

    let res = deploy_runes(&RunesArgs::default(), &deployer, &verifier).await;
    assert_eq!(res.unwrap_err(), ScriptError::MissingConfig("BSCSCAN_API_KEY"));
    assert!(log.calls().is_empty());

    // Without verification the key is never needed
    let args = RunesArgs {
        skip_verification: true,
        ..RunesArgs::default()
    };
    let deployed = deploy_runes(&args, &deployer, &verifier).await?;
    assert_eq!(deployed.len(), RUNES.len());
    assert_eq!(log.deploys().len(), RUNES.len());

    Ok(())
}

// ---------------------
// | VERIFY RUNE TESTS |
// ---------------------

#[tokio::test]
async fn test_verify_existing_rune() -> Result<()> {
    let (log, _, verifier) = fakes(None, false);
    let address = "0x1111111111111111111111111111111111111111";
    let args = VerifyRuneArgs {
        address: Some(address.to_string()),
        symbol: "PLASTIC".to_string(),
    };

    let outcome = verify_rune(&args, &verifier).await?;
    assert_eq!(outcome.address, address.parse::<Address>()?);
    assert_eq!(
        log.calls(),
        vec![Call::Verify(
            address.parse()?,
            ConstructorArgs::rune("PLASTIC")
        )]
    );

    let missing = VerifyRuneArgs {
        address: None,
        symbol: "PLASTIC".to_string(),
    };
    assert_eq!(
        verify_rune(&missing, &verifier).await.unwrap_err(),
        ScriptError::MissingConfig("RUNE_PLASTIC_ADDRESS")
    );

    Ok(())
}

// ---------------------
// | EXIT STATUS TESTS |
// ---------------------

#[tokio::test]
async fn test_exit_status() -> Result<()> {
    let (_, deployer, verifier) = fakes(None, false);
    let ok = deploy_mining_pools(&mining_pools_args(), &deployer, &verifier).await;
    assert_eq!(exit_status(&ok), 0);

    let failed = deploy_mining_pools(&MiningPoolsArgs::default(), &deployer, &verifier).await;
    assert_eq!(exit_status(&failed), 1);

    Ok(())
}
