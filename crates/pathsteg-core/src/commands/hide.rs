use std::path::Path;

use crate::api::hide::Hidden;
use crate::{CodecOptions, SecretKey, StegError};

pub fn hide(
    media: &Path,
    write_to_file: &Path,
    message: String,
    key: Option<SecretKey>,
    token_file: Option<&Path>,
    preview: Option<&Path>,
    options: CodecOptions,
) -> Result<Hidden, StegError> {
    crate::api::hide::prepare()
        .with_options(options)
        .with_image(media)
        .with_output(write_to_file)
        .with_message(&message)
        .use_key(key)
        .use_token_output(token_file)
        .use_preview(preview)
        .execute()
}
