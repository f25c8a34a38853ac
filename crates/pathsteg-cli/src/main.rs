use clap::Parser;

use pathsteg_core::StegError;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub(crate) type CliResult<T> = Result<T, StegError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    match args.command {
        Commands::Hide(hide) => hide.run(),
        Commands::Unveil(unveil) => unveil.run(),
        Commands::Keygen(keygen) => keygen.run(),
    }
}
