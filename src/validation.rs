use crate::{
    compiler::{CompilerVersion, Language},
    consts::HARDHAT_NETWORK,
    network::NetworkSettings,
    paths::normalize,
    Settings,
};
use std::{
    collections::HashSet,
    fmt::{Display, Formatter},
    path::Path,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("default network name is empty")]
    EmptyDefaultNetwork,
    #[error("default network '{0}' is neither built-in nor declared in networks")]
    UnknownDefaultNetwork(String),
    #[error("network name is empty")]
    EmptyNetworkName,
    #[error("network '{0}' has no url")]
    MissingNetworkUrl(String),
    #[error("network 'hardhat' runs in-process and cannot have a url")]
    HardhatNetworkUrl,
    #[error("path '{0}' is empty")]
    EmptyPath(&'static str),
    #[error("paths '{first}' and '{second}' both point to '{path}'")]
    DuplicatePath {
        first: &'static str,
        second: &'static str,
        path: String,
    },
    #[error("{language} compiler {version} is declared more than once")]
    DuplicateVersion {
        language: Language,
        version: CompilerVersion,
    },
    #[error("solidity override has an empty source path")]
    EmptyOverridePath,
}

/// Every invariant the configuration violates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let errors: Vec<_> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", errors.join("; "))
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        self.validate_networks(&mut errors);
        self.validate_paths(&mut errors);
        self.validate_compilers(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    fn validate_networks(&self, errors: &mut Vec<ValidationError>) {
        let default_network = self.default_network.trim();
        if default_network.is_empty() {
            errors.push(ValidationError::EmptyDefaultNetwork);
        } else if !NetworkSettings::is_builtin(default_network)
            && !self.networks.contains_key(default_network)
        {
            errors.push(ValidationError::UnknownDefaultNetwork(
                self.default_network.clone(),
            ));
        }

        for (name, network) in &self.networks {
            if name.trim().is_empty() {
                errors.push(ValidationError::EmptyNetworkName);
            } else if name == HARDHAT_NETWORK {
                if network.url.is_some() {
                    errors.push(ValidationError::HardhatNetworkUrl);
                }
            } else if network.url.is_none() && !NetworkSettings::is_builtin(name) {
                errors.push(ValidationError::MissingNetworkUrl(name.clone()));
            }
        }
    }

    fn validate_paths(&self, errors: &mut Vec<ValidationError>) {
        let entries = self.paths.entries();
        for (name, path) in entries {
            if path.trim().is_empty() {
                errors.push(ValidationError::EmptyPath(name));
            }
        }
        for (i, (first, first_path)) in entries.iter().enumerate() {
            for (second, second_path) in &entries[i + 1..] {
                if first_path.trim().is_empty() || second_path.trim().is_empty() {
                    continue;
                }
                let normalized = normalize(Path::new(first_path.trim()));
                if normalized == normalize(Path::new(second_path.trim())) {
                    errors.push(ValidationError::DuplicatePath {
                        first: *first,
                        second: *second,
                        path: normalized.display().to_string(),
                    });
                }
            }
        }
    }

    fn validate_compilers(&self, errors: &mut Vec<ValidationError>) {
        check_unique_versions(Language::Solidity, self.solidity.versions(), errors);
        check_unique_versions(Language::Vyper, self.vyper.versions(), errors);
        if self
            .solidity
            .overrides
            .keys()
            .any(|path| path.trim().is_empty())
        {
            errors.push(ValidationError::EmptyOverridePath);
        }
    }
}

fn check_unique_versions<'a>(
    language: Language,
    versions: impl Iterator<Item = &'a CompilerVersion>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for version in versions {
        if !seen.insert(version) && reported.insert(version) {
            errors.push(ValidationError::DuplicateVersion {
                language,
                version: version.clone(),
            });
        }
    }
}
