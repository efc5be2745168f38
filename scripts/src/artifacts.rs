//! Loading of Hardhat compilation artifacts.
//!
//! Compilation itself is left to `npx hardhat compile`; the scripts only read
//! its output. An artifact supplies the creation bytecode for a deployment, and
//! the build info file it points to supplies the compiler version and standard
//! JSON input needed for verification.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::json_abi::JsonAbi;
use alloy_primitives::Bytes;
use itertools::Itertools;
use serde::Deserialize;
use serde_json::Value;
use walkdir::WalkDir;

use crate::{
    constants::{ARTIFACT_EXTENSION, BUILD_INFO_DIR, DBG_ARTIFACT_SUFFIX},
    errors::ScriptError,
    types::{ConstructorArgs, Contract},
};

/// The on-disk layout of a Hardhat artifact
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    /// The contract name
    contract_name: String,
    /// The source file, relative to the project root
    source_name: String,
    /// The contract ABI
    abi: JsonAbi,
    /// The creation bytecode, hex-encoded
    bytecode: String,
    /// Unresolved library references in the creation bytecode
    #[serde(default)]
    link_references: serde_json::Map<String, Value>,
}

/// The on-disk layout of the debug sidecar written next to an artifact
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDbgArtifact {
    /// Path to the build info file, relative to the sidecar
    build_info: String,
}

/// A compiled contract, ready to deploy
#[derive(Clone, Debug)]
pub struct ContractArtifact {
    /// Where the artifact was read from
    pub path: PathBuf,
    /// The contract name
    pub contract_name: String,
    /// The source file the contract is defined in
    pub source_name: String,
    /// The contract ABI
    pub abi: JsonAbi,
    /// The creation bytecode
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Locate and parse the artifact for the given contract under `artifacts_dir`
    pub fn load(artifacts_dir: &Path, contract: Contract) -> Result<Self, ScriptError> {
        let path = find_artifact(artifacts_dir, &contract.to_string())?;
        let json = fs::read_to_string(&path)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {e}", path.display())))?;

        Self::from_json(path, &json)
    }

    /// Parse an artifact from its JSON contents
    pub fn from_json(path: PathBuf, json: &str) -> Result<Self, ScriptError> {
        let raw: RawArtifact =
            serde_json::from_str(json).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

        if !raw.link_references.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!(
                "{} requires library linking, which is not supported",
                raw.contract_name
            )));
        }

        let bytecode = Bytes::from_str(&raw.bytecode)
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
        if bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!(
                "{} has no creation bytecode, is it abstract?",
                raw.contract_name
            )));
        }

        Ok(Self {
            path,
            contract_name: raw.contract_name,
            source_name: raw.source_name,
            abi: raw.abi,
            bytecode,
        })
    }

    /// The `source:name` identifier the explorer expects
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Check that the artifact's constructor takes exactly the given arguments
    pub fn check_constructor(&self, args: &ConstructorArgs) -> Result<(), ScriptError> {
        let inputs = self
            .abi
            .constructor
            .as_ref()
            .map(|c| c.inputs.iter().map(|p| p.ty.as_str()).collect_vec())
            .unwrap_or_default();

        if inputs != args.param_types() {
            return Err(ScriptError::ArtifactParsing(format!(
                "{} constructor takes ({}), but was given ({})",
                self.contract_name,
                inputs.join(","),
                args.param_types().join(","),
            )));
        }

        Ok(())
    }

    /// The creation code for a deployment: bytecode followed by the encoded
    /// constructor arguments
    pub fn deploy_code(&self, args: &ConstructorArgs) -> Result<Bytes, ScriptError> {
        self.check_constructor(args)?;

        let mut code = self.bytecode.to_vec();
        code.extend(args.abi_encode());
        Ok(Bytes::from(code))
    }

    /// Load the build info this artifact was compiled in
    pub fn build_info(&self) -> Result<BuildInfo, ScriptError> {
        let dbg_path = self
            .path
            .with_file_name(format!("{}{}", self.contract_name, DBG_ARTIFACT_SUFFIX));
        let dbg_json = fs::read_to_string(&dbg_path)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {e}", dbg_path.display())))?;
        let dbg: RawDbgArtifact = serde_json::from_str(&dbg_json)
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

        // The build info path is relative to the sidecar's directory
        let base = dbg_path.parent().unwrap_or_else(|| Path::new("."));
        let build_info_path = base.join(dbg.build_info);
        let json = fs::read_to_string(&build_info_path).map_err(|e| {
            ScriptError::ArtifactParsing(format!("{}: {e}", build_info_path.display()))
        })?;

        BuildInfo::from_json(&json)
    }
}

/// The subset of a Hardhat build info file needed for verification
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// The full solc version, e.g. `0.8.9+commit.e5eed63a`
    pub solc_long_version: String,
    /// The standard JSON input the compiler was invoked with
    pub input: Value,
}

impl BuildInfo {
    /// Parse a build info file from its JSON contents
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(json).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
    }

    /// The compiler version in the form the explorer expects
    pub fn compiler_version(&self) -> String {
        format!("v{}", self.solc_long_version)
    }
}

/// Find the single artifact file named after `contract_name`
fn find_artifact(artifacts_dir: &Path, contract_name: &str) -> Result<PathBuf, ScriptError> {
    let file_name = format!("{contract_name}.{ARTIFACT_EXTENSION}");

    let matches = WalkDir::new(artifacts_dir)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != BUILD_INFO_DIR)
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == file_name.as_str())
        .map(|entry| entry.into_path())
        .collect_vec();

    match matches.as_slice() {
        [path] => Ok(path.clone()),
        [] => Err(ScriptError::ArtifactParsing(format!(
            "no artifact for {contract_name} under {}, run `npx hardhat compile` first",
            artifacts_dir.display()
        ))),
        _ => Err(ScriptError::ArtifactParsing(format!(
            "multiple artifacts named {contract_name}: {}",
            matches.iter().map(|p| p.display()).join(", ")
        ))),
    }
}
