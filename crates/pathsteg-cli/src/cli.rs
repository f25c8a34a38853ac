use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Input, Password};
use pathsteg_core::{Encoding, SecretKey, Technique};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Keygen(keygen::KeygenArgs),
}

/// Where the message bits go
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EncodingArg {
    /// Sequential samples, or the zigzag order of coefficient blocks
    #[default]
    Simple,
    /// A permutation derived from the key
    Key,
    /// A random path, stored encrypted in the path token file
    Path,
}

impl From<EncodingArg> for Encoding {
    fn from(value: EncodingArg) -> Self {
        match value {
            EncodingArg::Simple => Encoding::Simple,
            EncodingArg::Key => Encoding::Key,
            EncodingArg::Path => Encoding::Path,
        }
    }
}

/// How a bit is written into a sample
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmbeddingArg {
    /// Overwrite the least significant bit
    Replacement,
    /// Step the sample by one when its least significant bit differs
    #[default]
    Matching,
}

impl From<EmbeddingArg> for Technique {
    fn from(value: EmbeddingArg) -> Self {
        match value {
            EmbeddingArg::Replacement => Technique::Replacement,
            EmbeddingArg::Matching => Technique::Matching,
        }
    }
}

/// The key from the command line, or asked for when the encoding needs one.
pub fn key_for(encoding: EncodingArg, key: Option<String>) -> Option<SecretKey> {
    match (encoding, key) {
        (_, Some(key)) => Some(key.into()),
        (EncodingArg::Simple, None) => None,
        (_, None) => ask_for_key().map(SecretKey::from),
    }
}

pub fn ask_for_key() -> Option<String> {
    Password::new()
        .with_prompt("Enter the key or passphrase")
        .allow_empty_password(false)
        .interact()
        .ok()
}

pub fn ask_for_message() -> Option<String> {
    Input::<String>::new()
        .with_prompt("Enter the message to hide")
        .interact_text()
        .ok()
}
