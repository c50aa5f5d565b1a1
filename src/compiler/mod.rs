pub mod pragma;
mod selection;
mod solidity;
mod version;
mod vyper;

pub use selection::{select_compiler, Language, SelectedCompiler, SelectionError};
pub use solidity::{
    BytecodeHash, MetadataSettings, OptimizerSettings, SolcCompiler, SolcSettings, SolidityConfig,
};
pub use version::CompilerVersion;
pub use vyper::{VyperCompiler, VyperConfig};
