pub use argon2::Error as Argon2Error;
pub use chacha20poly1305::Error as Chacha20Poly1305Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("Key derivation error")]
    KeyDerivationError(Argon2Error),

    #[error("Key derivation parameter error")]
    KeyDerivationParamError(Argon2Error),

    /// Wrong key or tampered data, the AEAD tag did not verify.
    #[error("Decryption error")]
    DecryptionError(Chacha20Poly1305Error),

    #[error("Encryption error")]
    EncryptionError(Chacha20Poly1305Error),

    #[error("Encrypted data is too short: {len} bytes, need at least {min}")]
    TooShort { len: usize, min: usize },
}
