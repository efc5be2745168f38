//! Contract deployment over JSON-RPC

use std::{path::PathBuf, str::FromStr};

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use async_trait::async_trait;
use tracing::info;

use crate::{
    artifacts::ContractArtifact,
    config::DeployConfig,
    errors::ScriptError,
    types::{ConstructorArgs, DeployedContract},
};

/// Something that can deploy a contract and report where it landed
#[async_trait]
pub trait ContractDeployer: Sync {
    /// Deploy the contract that `args` construct and wait until it is confirmed
    async fn deploy(&self, args: &ConstructorArgs) -> Result<DeployedContract, ScriptError>;
}

/// Sets up a provider that signs with the given private key and sends
/// through the given RPC url.
///
/// No request is made until the provider is first used.
pub fn setup_client(priv_key: &str, rpc_url: Url) -> Result<DynProvider, ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(rpc_url);

    Ok(DynProvider::new(provider))
}

/// Deploys contracts from their Hardhat artifacts through an RPC provider
pub struct RpcDeployer {
    /// The signing provider
    provider: DynProvider,
    /// The Hardhat artifacts directory
    artifacts_dir: PathBuf,
    /// The number of confirmations to wait for
    confirmations: u64,
}

impl RpcDeployer {
    /// Create a deployer from the deploy configuration
    pub fn new(config: &DeployConfig) -> Result<Self, ScriptError> {
        let provider = setup_client(&config.private_key, config.rpc_url.clone())?;
        Ok(Self {
            provider,
            artifacts_dir: config.artifacts_dir.clone(),
            confirmations: config.confirmations,
        })
    }
}

#[async_trait]
impl ContractDeployer for RpcDeployer {
    async fn deploy(&self, args: &ConstructorArgs) -> Result<DeployedContract, ScriptError> {
        let contract = args.contract();
        let artifact = ContractArtifact::load(&self.artifacts_dir, contract)?;
        let code = artifact.deploy_code(args)?;

        let tx = TransactionRequest::default().with_deploy_code(code);
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        info!("{contract} creation tx sent: {:#x}", pending.tx_hash());

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "{contract} creation tx {:#x} reverted",
                receipt.transaction_hash
            )));
        }

        let address = receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "receipt for {:#x} has no contract address",
                receipt.transaction_hash
            ))
        })?;

        Ok(DeployedContract {
            contract,
            address,
            tx_hash: receipt.transaction_hash,
        })
    }
}
