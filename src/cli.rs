use crate::{consts::DEFAULT_CONFIG_PATH, render::Format};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config_path: PathBuf,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the effective configuration
    Show {
        #[clap(short, long, default_value = "toml")]
        format: Format,
    },
    /// Validate the configuration and report every violation
    Check,
    /// Print the project directories resolved against the project root
    Paths,
    /// List declared compiler versions per language
    Compilers,
    /// Print the compiler each source file is built with
    Select {
        #[clap(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the compiler of every source in the sources directory
    Scan,
}
