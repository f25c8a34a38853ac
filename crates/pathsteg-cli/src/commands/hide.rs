use std::path::PathBuf;

use clap::Args;
use log::info;
use pathsteg_core::{CodecOptions, StegError, DEFAULT_QUALITY};

use crate::cli::{ask_for_message, key_for, EmbeddingArg, EncodingArg};
use crate::CliResult;

/// Hides a text message in an image, or in the DCT coefficients of its compressed form
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Image such as PNG, JPEG or BMP, or a coefficient file, used readonly.
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,

    /// Final carrier will be stored as file, PNG for pixels and .dct for coefficients
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// A text message that will be hidden, asked for when missing
    #[arg(short, long, value_name = "text message")]
    pub message: Option<String>,

    /// Compress the image and hide in its quantized DCT coefficients
    #[arg(long)]
    pub compress: bool,

    /// Quality factor of the compression
    #[arg(long, default_value_t = DEFAULT_QUALITY, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: u8,

    /// Path strategy
    #[arg(long, value_enum, default_value_t = EncodingArg::Simple)]
    pub encoding: EncodingArg,

    /// Embedding technique
    #[arg(long, value_enum, default_value_t = EmbeddingArg::Matching)]
    pub embedding: EmbeddingArg,

    /// Shared key or passphrase, asked for when the encoding needs one
    #[arg(short, long, value_name = "key")]
    pub key: Option<String>,

    /// Path token file for the path encoding [default: path_token.txt next to the output]
    #[arg(short = 't', long = "path-token", value_name = "token file")]
    pub path_token: Option<PathBuf>,

    /// Also store a PNG of the decompressed carrier
    #[arg(long, value_name = "preview file")]
    pub preview: Option<PathBuf>,
}

impl HideArgs {
    pub fn run(self) -> CliResult<()> {
        let message = self
            .message
            .or_else(ask_for_message)
            .ok_or(StegError::MissingMessage)?;
        let key = key_for(self.encoding, self.key);

        let options = CodecOptions::default()
            .with_compression(self.compress.then_some(self.quality))
            .with_encoding(self.encoding.into())
            .with_technique(self.embedding.into());

        let hidden = pathsteg_core::commands::hide(
            &self.media,
            &self.write_to_file,
            message,
            key,
            self.path_token.as_deref(),
            self.preview.as_deref(),
            options,
        )?;

        info!("Message hidden in {:?}", hidden.output);
        if let Some((_, token_file)) = hidden.token {
            println!("Path token written to {}", token_file.display());
        }

        Ok(())
    }
}
