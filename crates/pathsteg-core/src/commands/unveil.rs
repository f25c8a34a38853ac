use std::path::Path;

use crate::media::Encoding;
use crate::{Message, SecretKey, StegError};

pub fn unveil(
    secret_media: &Path,
    output_file: Option<&Path>,
    key: Option<SecretKey>,
    token_file: Option<&Path>,
    encoding: Encoding,
) -> Result<Message, StegError> {
    crate::api::unveil::prepare()
        .with_encoding(encoding)
        .from_secret_file(secret_media)
        .use_output_file(output_file)
        .use_key(key)
        .use_token_file(token_file)
        .execute()
}
