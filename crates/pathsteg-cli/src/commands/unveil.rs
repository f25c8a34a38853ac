use std::path::PathBuf;

use clap::Args;

use crate::cli::{key_for, EncodingArg};
use crate::CliResult;

/// Unveils a text message from an image or a coefficient file
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Source image or coefficient file that contains the message
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// Also store the message in that file
    #[arg(short = 'o', long = "out", value_name = "output file")]
    pub output_file: Option<PathBuf>,

    /// Path strategy the message was hidden with
    #[arg(long, value_enum, default_value_t = EncodingArg::Simple)]
    pub encoding: EncodingArg,

    /// Shared key or passphrase, asked for when the encoding needs one
    #[arg(short, long, value_name = "key")]
    pub key: Option<String>,

    /// Path token file for the path encoding [default: path_token.txt next to the input]
    #[arg(short = 't', long = "path-token", value_name = "token file")]
    pub path_token: Option<PathBuf>,
}

impl UnveilArgs {
    pub fn run(self) -> CliResult<()> {
        let key = key_for(self.encoding, self.key);

        let message = pathsteg_core::commands::unveil(
            &self.media,
            self.output_file.as_deref(),
            key,
            self.path_token.as_deref(),
            self.encoding.into(),
        )?;
        println!("{}", message.text);

        Ok(())
    }
}
