use super::CompilerVersion;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VyperCompiler {
    pub version: CompilerVersion,
}

impl VyperCompiler {
    pub fn new(version: CompilerVersion) -> Self {
        Self { version }
    }
}

/// Vyper compilers the project builds with. Accepts the same shorthand forms
/// as the solidity section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "VyperUserConfig")]
pub struct VyperConfig {
    pub compilers: Vec<VyperCompiler>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VyperUserConfig {
    Version(CompilerVersion),
    Single(VyperCompiler),
    Multiple(MultipleVyperCompilers),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MultipleVyperCompilers {
    compilers: Vec<VyperCompiler>,
}

impl From<VyperUserConfig> for VyperConfig {
    fn from(value: VyperUserConfig) -> Self {
        let compilers = match value {
            VyperUserConfig::Version(version) => vec![VyperCompiler::new(version)],
            VyperUserConfig::Single(compiler) => vec![compiler],
            VyperUserConfig::Multiple(multiple) => multiple.compilers,
        };
        Self { compilers }
    }
}

impl VyperConfig {
    pub fn versions(&self) -> impl Iterator<Item = &CompilerVersion> {
        self.compilers.iter().map(|compiler| &compiler.version)
    }
}
