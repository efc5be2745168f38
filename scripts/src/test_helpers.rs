//! Fixtures shared by the unit tests

use std::{fs, path::Path};

use serde_json::json;

/// The solc version recorded in the fixture build info
pub const FIXTURE_SOLC_VERSION: &str = "0.8.9+commit.e5eed63a";

/// A minimal artifact for the `Runes` contract with the given creation code
pub fn runes_artifact_json(bytecode: &str) -> String {
    json!({
        "_format": "hh-sol-artifact-1",
        "contractName": "Runes",
        "sourceName": "contracts/Runes.sol",
        "abi": [
            {
                "type": "constructor",
                "stateMutability": "nonpayable",
                "inputs": [
                    { "name": "name_", "type": "string", "internalType": "string" },
                    { "name": "symbol_", "type": "string", "internalType": "string" }
                ]
            }
        ],
        "bytecode": bytecode,
        "deployedBytecode": "0x",
        "linkReferences": {},
        "deployedLinkReferences": {}
    })
    .to_string()
}

/// Lay out a Hardhat artifacts directory under `root` holding the `Runes`
/// artifact, its debug sidecar and the build info they point to
pub fn write_runes_artifacts(root: &Path, bytecode: &str) {
    let contract_dir = root.join("contracts").join("Runes.sol");
    let build_info_dir = root.join("build-info");
    fs::create_dir_all(&contract_dir).unwrap();
    fs::create_dir_all(&build_info_dir).unwrap();

    fs::write(contract_dir.join("Runes.json"), runes_artifact_json(bytecode)).unwrap();
    fs::write(
        contract_dir.join("Runes.dbg.json"),
        json!({ "_format": "hh-sol-dbg-1", "buildInfo": "../../build-info/abc123.json" })
            .to_string(),
    )
    .unwrap();
    fs::write(
        build_info_dir.join("abc123.json"),
        json!({
            "_format": "hh-sol-build-info-1",
            "id": "abc123",
            "solcVersion": "0.8.9",
            "solcLongVersion": FIXTURE_SOLC_VERSION,
            "input": { "language": "Solidity", "sources": {} },
            "output": {}
        })
        .to_string(),
    )
    .unwrap();
}
