use super::CompilerVersion;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, num::NonZeroU32};

/// Whether and how the metadata hash is appended to the deployed bytecode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BytecodeHash {
    None,
    #[default]
    Ipfs,
    Bzzr1,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataSettings {
    pub bytecode_hash: BytecodeHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerSettings {
    pub enabled: bool,
    /// How many times each opcode is expected to be executed over the
    /// lifetime of the contract. Solc uses `200` if not specified.
    pub runs: NonZeroU32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            runs: NonZeroU32::new(200).expect("Is not zero"),
        }
    }
}

/// Settings passed to solc alongside the sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolcSettings {
    pub metadata: MetadataSettings,
    pub optimizer: OptimizerSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolcCompiler {
    pub version: CompilerVersion,
    #[serde(default)]
    pub settings: SolcSettings,
}

impl SolcCompiler {
    pub fn new(version: CompilerVersion, settings: SolcSettings) -> Self {
        Self { version, settings }
    }
}

/// Solidity compilers the project builds with.
///
/// Deserializes from a bare version string, a single `{ version, settings }`
/// entry or the full `{ compilers, overrides }` form. Always serializes to the
/// full form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SolidityUserConfig")]
pub struct SolidityConfig {
    pub compilers: Vec<SolcCompiler>,
    /// Compilers pinned for particular source files, keyed by the source path
    /// relative to the project root.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, SolcCompiler>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SolidityUserConfig {
    Version(CompilerVersion),
    Single(SolcCompiler),
    Multiple(MultipleSolidityCompilers),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MultipleSolidityCompilers {
    compilers: Vec<SolcCompiler>,
    #[serde(default)]
    overrides: BTreeMap<String, SolcCompiler>,
}

impl From<SolidityUserConfig> for SolidityConfig {
    fn from(value: SolidityUserConfig) -> Self {
        match value {
            SolidityUserConfig::Version(version) => Self {
                compilers: vec![SolcCompiler::new(version, Default::default())],
                overrides: BTreeMap::new(),
            },
            SolidityUserConfig::Single(compiler) => Self {
                compilers: vec![compiler],
                overrides: BTreeMap::new(),
            },
            SolidityUserConfig::Multiple(multiple) => Self {
                compilers: multiple.compilers,
                overrides: multiple.overrides,
            },
        }
    }
}

impl SolidityConfig {
    pub fn versions(&self) -> impl Iterator<Item = &CompilerVersion> {
        self.compilers.iter().map(|compiler| &compiler.version)
    }

    pub fn override_for(&self, source_path: &str) -> Option<&SolcCompiler> {
        self.overrides.get(source_path)
    }
}
