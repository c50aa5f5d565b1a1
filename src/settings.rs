use crate::{
    compiler::{
        self, BytecodeHash, CompilerVersion, MetadataSettings, OptimizerSettings, SelectedCompiler,
        SelectionError, SolcCompiler, SolcSettings, SolidityConfig, VyperCompiler, VyperConfig,
    },
    consts::{ENV_PREFIX, HARDHAT_NETWORK, OPTIMIZER_RUNS, SOLIDITY_VERSIONS, VYPER_VERSIONS},
    network::NetworkSettings,
    paths::{normalize, Paths, ResolvedPaths},
    validation::ValidationErrors,
};
use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    num::NonZeroU32,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("couldn't read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("couldn't load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("couldn't parse toml configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("couldn't parse json configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Build configuration of the project.
///
/// Constructed once at startup and only read afterwards. Fields missing from
/// the loaded sources are taken from [`Settings::default`], which is the
/// project's own configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub default_network: String,
    pub paths: Paths,
    pub solidity: SolidityConfig,
    pub vyper: VyperConfig,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub networks: BTreeMap<String, NetworkSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        let settings = project_solc_settings();
        Self {
            default_network: HARDHAT_NETWORK.to_string(),
            paths: Paths::default(),
            solidity: SolidityConfig {
                compilers: SOLIDITY_VERSIONS
                    .iter()
                    .map(|version| SolcCompiler::new(known_version(version), settings.clone()))
                    .collect(),
                overrides: BTreeMap::new(),
            },
            vyper: VyperConfig {
                compilers: VYPER_VERSIONS
                    .iter()
                    .map(|version| VyperCompiler::new(known_version(version)))
                    .collect(),
            },
            networks: BTreeMap::new(),
        }
    }
}

/// Settings shared by every solidity compiler of the project: no metadata
/// hash in the bytecode and the optimizer tuned for frequently called code.
fn project_solc_settings() -> SolcSettings {
    SolcSettings {
        metadata: MetadataSettings {
            bytecode_hash: BytecodeHash::None,
        },
        optimizer: OptimizerSettings {
            enabled: true,
            runs: NonZeroU32::new(OPTIMIZER_RUNS).expect("Is not zero"),
        },
    }
}

fn known_version(version: &str) -> CompilerVersion {
    CompilerVersion::from_str(version).expect("valid compiler version")
}

impl Settings {
    /// Layers the file at `config_path` (if it exists) and `BUILD_CONFIG__*`
    /// environment variables over the defaults, then validates the result.
    ///
    /// The file is read with `toml` or `serde_json` (by extension) since its
    /// keys hold case-sensitive source paths and network names, which `config`
    /// would lowercase. Only the environment goes through `config`.
    pub fn load(config_path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut value = match config_path {
            Some(path) if path.exists() => {
                log::info!("loading configuration from {}", path.display());
                read_file(path)?
            }
            Some(path) => {
                log::warn!(
                    "configuration file {} does not exist, using defaults",
                    path.display()
                );
                serde_json::Value::Object(Default::default())
            }
            None => serde_json::Value::Object(Default::default()),
        };
        // Use `__` so that keys with underscores in names (e.g. `default_network`) are addressable
        let environment: serde_json::Value = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        merge(&mut value, &environment);

        let settings: Self = serde_json::from_value(value)?;
        settings.validate()?;
        log::debug!("loaded configuration: {:?}", settings);
        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Directory the configured paths are relative to: the parent directory of
    /// the configuration file, or the current directory without one.
    pub fn project_root(config_path: Option<&Path>) -> Result<PathBuf, SettingsError> {
        let current_dir = std::env::current_dir()?;
        let root = config_path
            .filter(|path| path.exists())
            .and_then(Path::parent)
            .map(|parent| normalize(&current_dir.join(parent)))
            .unwrap_or(current_dir);
        Ok(root)
    }

    pub fn resolved_paths(&self, root: &Path) -> ResolvedPaths {
        self.paths.resolve(root)
    }

    /// Declared profile merged over the built-in one of the same name.
    pub fn network(&self, name: &str) -> Option<NetworkSettings> {
        match (self.networks.get(name), NetworkSettings::builtin(name)) {
            (Some(declared), Some(builtin)) => Some(NetworkSettings {
                url: declared.url.clone().or(builtin.url),
                chain_id: declared.chain_id.or(builtin.chain_id),
            }),
            (Some(declared), None) => Some(declared.clone()),
            (None, builtin) => builtin,
        }
    }

    pub fn default_network_settings(&self) -> Option<NetworkSettings> {
        self.network(&self.default_network)
    }

    /// See [`compiler::select_compiler`].
    pub fn select_compiler(
        &self,
        source_path: &Path,
        content: &str,
    ) -> Result<SelectedCompiler<'_>, SelectionError> {
        compiler::select_compiler(&self.solidity, &self.vyper, source_path, content)
    }
}

fn read_file(path: &Path) -> Result<serde_json::Value, SettingsError> {
    let content = std::fs::read_to_string(path)?;
    let value = match path.extension().and_then(|extension| extension.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => toml::from_str(&content)?,
    };
    Ok(value)
}

/// Recursively merges `b` into `a`; values of `b` win except for objects,
/// which are merged key by key.
fn merge(a: &mut serde_json::Value, b: &serde_json::Value) {
    match (a, b) {
        (serde_json::Value::Object(a), serde_json::Value::Object(b)) => {
            for (k, v) in b {
                merge(a.entry(k.clone()).or_insert(serde_json::Value::Null), v);
            }
        }
        (a, b) => *a = b.clone(),
    }
}
