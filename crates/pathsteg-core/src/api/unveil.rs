use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::shared::DEFAULT_TOKEN_FILE;
use crate::codec::decode;
use crate::media::{Encoding, Media};
use crate::path::PathToken;
use crate::{Message, SecretKey, StegError};

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_media: Option<PathBuf>,
    output_file: Option<PathBuf>,
    key: Option<SecretKey>,
    token: Option<PathToken>,
    token_file: Option<PathBuf>,
    encoding: Encoding,
}

impl UnveilApi {
    /// The path strategy the message was hidden with
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// This is the secret image or coefficient file that contains the message
    pub fn from_secret_file(mut self, secret_media: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_media.as_ref().to_path_buf());
        self
    }

    /// Also write the unveiled text into this file
    pub fn into_output_file(mut self, output_file: impl AsRef<Path>) -> Self {
        self.output_file = Some(output_file.as_ref().to_path_buf());
        self
    }

    pub fn use_output_file<A: AsRef<Path>>(mut self, output_file: Option<A>) -> Self {
        self.output_file = output_file.map(|o| o.as_ref().to_path_buf());
        self
    }

    pub fn with_key<K: Into<SecretKey>>(mut self, key: K) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the key
    /// If `None` is passed only the simple encoding can be unveiled
    pub fn use_key<K: Into<SecretKey>>(mut self, key: Option<K>) -> Self {
        self.key = key.map(Into::into);
        self
    }

    pub fn with_token(mut self, token: PathToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Read the path token from this file, defaults to `path_token.txt` next to the secret file
    pub fn with_token_file(mut self, token_file: impl AsRef<Path>) -> Self {
        self.token_file = Some(token_file.as_ref().to_path_buf());
        self
    }

    pub fn use_token_file<A: AsRef<Path>>(mut self, token_file: Option<A>) -> Self {
        self.token_file = token_file.map(|t| t.as_ref().to_path_buf());
        self
    }

    /// Execute the unveil process and blocks until it is finished
    pub fn execute(self) -> Result<Message, StegError> {
        let Some(secret_media) = self.secret_media else {
            return Err(StegError::CarrierNotSet);
        };

        let media = Media::from_file(&secret_media)?;
        let token = match (self.encoding, self.token) {
            (Encoding::Path, None) => {
                let token_file = self.token_file.unwrap_or_else(|| {
                    secret_media
                        .parent()
                        .unwrap_or_else(|| Path::new(""))
                        .join(DEFAULT_TOKEN_FILE)
                });
                debug!("Reading path token from {token_file:?}");
                let text = fs::read_to_string(&token_file)
                    .map_err(|source| StegError::ReadError { source })?;
                Some(text.parse::<PathToken>()?)
            }
            (_, token) => token,
        };

        let message = decode(&media, self.encoding, self.key.as_ref(), token.as_ref())?;

        if let Some(output_file) = self.output_file {
            fs::write(output_file, message.text.as_bytes())
                .map_err(|source| StegError::WriteError { source })?;
        }

        Ok(message)
    }
}
