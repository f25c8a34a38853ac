use clap::Args;

use crate::CliResult;

/// Generates a random shared key for the key and path encodings
#[derive(Args, Debug)]
pub struct KeygenArgs {}

impl KeygenArgs {
    pub fn run(self) -> CliResult<()> {
        println!("{}", pathsteg_core::commands::keygen());
        Ok(())
    }
}
