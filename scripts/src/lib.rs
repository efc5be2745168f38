//! Scripts for deploying and verifying the MiningPools and Runes contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod deployer;
pub mod errors;
pub mod types;
pub mod verifier;

#[cfg(test)]
mod test_helpers;

/// The process exit status for the outcome of a script
pub fn exit_status<T>(result: &Result<T, errors::ScriptError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
