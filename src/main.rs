use build_config::{run, Args};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run(args, &mut std::io::stdout().lock())
}
