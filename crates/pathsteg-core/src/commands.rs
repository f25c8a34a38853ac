//! One call per CLI subcommand, thin wrappers around [`crate::api`].

mod hide;
mod unveil;

pub use hide::hide;
pub use unveil::unveil;

/// Generate a fresh shared key, URL safe base64 text.
pub fn keygen() -> String {
    pathsteg_cipher::generate_key()
}
