pub const ENV_PREFIX: &str = "BUILD_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "build-config.toml";

pub const HARDHAT_NETWORK: &str = "hardhat";
pub const LOCALHOST_NETWORK: &str = "localhost";
pub const LOCALHOST_URL: &str = "http://127.0.0.1:8545";

pub const DEFAULT_ARTIFACTS_PATH: &str = "./artifacts";
pub const DEFAULT_CACHE_PATH: &str = "./cache";
pub const DEFAULT_SOURCES_PATH: &str = "./contracts";
pub const DEFAULT_TESTS_PATH: &str = "./test";

pub const SOLIDITY_VERSIONS: [&str; 2] = ["0.6.12", "0.8.11"];
pub const VYPER_VERSIONS: [&str; 5] = ["0.3.3", "0.3.1", "0.2.4", "0.2.7", "0.2.12"];
pub const OPTIMIZER_RUNS: u32 = 800;
