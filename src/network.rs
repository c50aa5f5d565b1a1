use crate::consts::{HARDHAT_NETWORK, LOCALHOST_NETWORK, LOCALHOST_URL};
use serde::{Deserialize, Serialize};
use url::Url;

/// Network profile a build tool deploys to or runs tests against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkSettings {
    /// JSON-RPC endpoint. The in-process `hardhat` network has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

impl NetworkSettings {
    pub fn is_builtin(name: &str) -> bool {
        name == HARDHAT_NETWORK || name == LOCALHOST_NETWORK
    }

    /// Profiles available without being declared in the configuration.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            HARDHAT_NETWORK => Some(Self {
                url: None,
                chain_id: Some(31337),
            }),
            LOCALHOST_NETWORK => Some(Self {
                url: Some(Url::parse(LOCALHOST_URL).expect("valid url")),
                chain_id: None,
            }),
            _ => None,
        }
    }
}
