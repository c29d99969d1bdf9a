// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts in the Hardhat JSON layout.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::JsonAbi,
    primitives::Bytes,
};
use serde::Deserialize;

/// Build output for a single contract.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub source_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
    #[serde(default)]
    pub deployed_bytecode: Bytes,
    #[serde(default)]
    pub link_references: BTreeMap<String, serde_json::Value>,
}

impl Artifact {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Creation code followed by the ABI-encoded constructor arguments.
    pub fn initcode(&self, args: &[String]) -> Result<Vec<u8>, ArtifactError> {
        if self.bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode(self.contract_name.clone()));
        }
        if !self.link_references.is_empty() {
            return Err(ArtifactError::UnlinkedLibraries(
                self.link_references.keys().cloned().collect(),
            ));
        }

        let mut code = self.bytecode.to_vec();
        let Some(constructor) = &self.abi.constructor else {
            if !args.is_empty() {
                return Err(ArtifactError::InvalidConstructor(format!(
                    "{} has no constructor but got {} arguments",
                    self.contract_name,
                    args.len()
                )));
            }
            return Ok(code);
        };
        if args.len() != constructor.inputs.len() {
            return Err(ArtifactError::InvalidConstructor(format!(
                "mismatch number of constructor arguments (want {}; got {})",
                constructor.inputs.len(),
                args.len(),
            )));
        }

        let mut values = Vec::<DynSolValue>::with_capacity(args.len());
        for (arg, param) in args.iter().zip(constructor.inputs.iter()) {
            let value = param
                .resolve()
                .and_then(|ty| ty.coerce_str(arg))
                .map_err(|err| {
                    ArtifactError::InvalidConstructor(format!(
                        "could not parse constructor arg {param}: {err}"
                    ))
                })?;
            values.push(value);
        }
        let encoded = constructor
            .abi_encode_input_raw(&values)
            .map_err(|err| ArtifactError::InvalidConstructor(err.to_string()))?;
        code.extend(encoded);
        Ok(code)
    }
}

/// Directory tree of artifacts, searched by contract name.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Finds the unique `<name>.json` under the root, ignoring build-info output.
    pub fn find(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let pattern = format!("{root}/**/{}.json", glob::Pattern::escape(name));
        let mut matches = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry?;
            if path.components().any(|c| c.as_os_str() == "build-info") {
                continue;
            }
            matches.push(path);
        }
        match matches.len() {
            0 => Err(ArtifactError::NotFound {
                name: name.to_owned(),
                root: self.root.clone(),
            }),
            1 => Ok(matches.remove(0)),
            _ => Err(ArtifactError::Ambiguous {
                name: name.to_owned(),
                paths: matches,
            }),
        }
    }

    pub fn load(&self, name: &str) -> Result<Artifact, ArtifactError> {
        let path = self.find(name)?;
        debug!(@grey, "loading artifact {name} from {}", path.display());
        Artifact::from_file(path)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact {name} not found under {}", .root.display())]
    NotFound { name: String, root: PathBuf },
    #[error("artifact {name} is ambiguous: {paths:?}")]
    Ambiguous { name: String, paths: Vec<PathBuf> },
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid artifact search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("artifact search failed: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("{0} has no bytecode, is it abstract?")]
    EmptyBytecode(String),
    #[error("unlinked libraries in {0:?}")]
    UnlinkedLibraries(Vec<String>),
    #[error("invalid constructor: {0}")]
    InvalidConstructor(String),
}
