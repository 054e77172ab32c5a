use anyhow::Result;
use clap::Parser;
use scrollkeep::cli::{self, Cli};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();

    let cli = Cli::parse();
    cli::run(cli)
}
