use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::shared::{has_extension, DEFAULT_TOKEN_FILE};
use crate::codec::{encode, Encoded};
use crate::media::{Media, Persist};
use crate::path::PathToken;
use crate::{CodecOptions, Message, SecretKey, StegError};

pub fn prepare() -> HideApi {
    HideApi::default()
}

/// What a hide run produced.
#[derive(Debug)]
pub struct Hidden {
    /// Where the carrier was written, the extension follows the carrier domain.
    pub output: PathBuf,
    /// The path token and the file it was written to, for the path encoding only.
    pub token: Option<(PathToken, PathBuf)>,
}

#[derive(Default, Debug)]
pub struct HideApi {
    message: Option<String>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    key: Option<SecretKey>,
    token_output: Option<PathBuf>,
    preview: Option<PathBuf>,
    options: CodecOptions,
}

impl HideApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn use_message<S: AsRef<str>>(mut self, message: Option<S>) -> Self {
        self.message = message.map(|s| s.as_ref().to_string());
        self
    }

    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Set the key, a shared key from `keygen` or any passphrase
    pub fn with_key<K: Into<SecretKey>>(mut self, key: K) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the key
    /// If `None` is passed only the simple encoding can be used
    pub fn use_key<K: Into<SecretKey>>(mut self, key: Option<K>) -> Self {
        self.key = key.map(Into::into);
        self
    }

    /// Where the path token goes, defaults to `path_token.txt` next to the output
    pub fn with_token_output<A: AsRef<Path>>(mut self, token_output: A) -> Self {
        self.token_output = Some(token_output.as_ref().to_path_buf());
        self
    }

    pub fn use_token_output<A: AsRef<Path>>(mut self, token_output: Option<A>) -> Self {
        self.token_output = token_output.map(|t| t.as_ref().to_path_buf());
        self
    }

    /// Also write a PNG of what the carrier looks like once decompressed
    pub fn with_preview<A: AsRef<Path>>(mut self, preview: A) -> Self {
        self.preview = Some(preview.as_ref().to_path_buf());
        self
    }

    pub fn use_preview<A: AsRef<Path>>(mut self, preview: Option<A>) -> Self {
        self.preview = preview.map(|p| p.as_ref().to_path_buf());
        self
    }

    pub fn execute(self) -> Result<Hidden, StegError> {
        let Some(message) = self.message else {
            return Err(StegError::MissingMessage);
        };
        let Some(image) = self.image else {
            return Err(StegError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(StegError::TargetNotSet);
        };

        let cover = Media::from_file(&image)?;
        let Encoded { media, token } = encode(
            cover,
            &Message::new(message),
            &self.options,
            self.key.as_ref(),
        )?;

        let output = if has_extension(&output, media.extension()) {
            output
        } else {
            let adjusted = output.with_extension(media.extension());
            warn!("Writing {adjusted:?} instead of {output:?} to match the carrier format");
            adjusted
        };
        media.save_as(&output)?;
        info!("Carrier written to {output:?}");

        if let Some(preview) = self.preview {
            Media::from_image(media.preview()?).save_as(&preview)?;
        }

        let token = match token {
            Some(token) => {
                let token_file = self.token_output.unwrap_or_else(|| {
                    output
                        .parent()
                        .unwrap_or_else(|| Path::new(""))
                        .join(DEFAULT_TOKEN_FILE)
                });
                fs::write(&token_file, format!("{token}\n"))
                    .map_err(|source| StegError::WriteError { source })?;
                info!("Path token written to {token_file:?}");
                Some((token, token_file))
            }
            None => None,
        };

        Ok(Hidden { output, token })
    }
}
