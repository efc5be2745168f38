//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy_primitives::{Address, TxHash};
use alloy_sol_types::SolValue;

/// The contracts the scripts know how to deploy
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Contract {
    /// The mining pools contract
    MiningPools,
    /// A rune token contract
    Runes,
}

impl Display for Contract {
    /// Formats the contract as its Hardhat contract name
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contract::MiningPools => write!(f, "MiningPools"),
            Contract::Runes => write!(f, "Runes"),
        }
    }
}

/// The constructor arguments for a deployment.
///
/// The same value is used to build the deploy transaction and to verify the
/// resulting contract, so the two can never disagree on argument order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructorArgs {
    /// `MiningPools(address prlToken, address runeProxy)`
    MiningPools {
        /// The PRL token address
        prl_token: Address,
        /// The rune proxy contract address
        rune_proxy: Address,
    },
    /// `Runes(string name, string symbol)`
    Runes {
        /// The token name
        name: String,
        /// The token symbol
        symbol: String,
    },
}

impl ConstructorArgs {
    /// The arguments for a rune whose name and symbol are both `symbol`
    pub fn rune(symbol: &str) -> Self {
        ConstructorArgs::Runes {
            name: symbol.to_string(),
            symbol: symbol.to_string(),
        }
    }

    /// The contract these arguments construct
    pub fn contract(&self) -> Contract {
        match self {
            ConstructorArgs::MiningPools { .. } => Contract::MiningPools,
            ConstructorArgs::Runes { .. } => Contract::Runes,
        }
    }

    /// The Solidity types of the constructor parameters, in declaration order
    pub fn param_types(&self) -> &'static [&'static str] {
        match self {
            ConstructorArgs::MiningPools { .. } => &["address", "address"],
            ConstructorArgs::Runes { .. } => &["string", "string"],
        }
    }

    /// ABI-encode the arguments as constructor parameters, in declaration order
    pub fn abi_encode(&self) -> Vec<u8> {
        match self {
            ConstructorArgs::MiningPools {
                prl_token,
                rune_proxy,
            } => (*prl_token, *rune_proxy).abi_encode_params(),
            ConstructorArgs::Runes { name, symbol } => {
                (name.clone(), symbol.clone()).abi_encode_params()
            }
        }
    }
}

impl Display for ConstructorArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructorArgs::MiningPools {
                prl_token,
                rune_proxy,
            } => write!(f, "[{:#x}, {:#x}]", prl_token, rune_proxy),
            ConstructorArgs::Runes { name, symbol } => write!(f, "[{}, {}]", name, symbol),
        }
    }
}

/// A contract that has been deployed and confirmed on-chain
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployedContract {
    /// Which contract was deployed
    pub contract: Contract,
    /// The address the contract was deployed to
    pub address: Address,
    /// The hash of the creation transaction
    pub tx_hash: TxHash,
}

/// The result of a successful verification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// The address that was verified
    pub address: Address,
    /// The explorer's final status message
    pub message: String,
}
