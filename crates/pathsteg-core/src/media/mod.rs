pub mod codec_options;
pub mod container;
mod pixels;
mod types;

use std::path::Path;

pub use codec_options::{CodecOptions, Encoding};
pub use pixels::*;
pub use types::*;

pub trait Persist {
    fn save_as(&self, _: &Path) -> crate::Result<()>;
}
