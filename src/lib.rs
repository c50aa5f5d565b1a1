mod cli;
pub mod compiler;
mod consts;
mod network;
mod paths;
mod render;
mod run;
mod settings;
mod validation;

pub use cli::{Args, Command};
pub use network::NetworkSettings;
pub use paths::{Paths, ResolvedPaths};
pub use render::{Format, RenderError};
pub use run::run;
pub use settings::{Settings, SettingsError};
pub use validation::{ValidationError, ValidationErrors};
