//! # Path token cryptography
//!
//! Authenticated encryption for path tokens plus the key derivation that
//! turns a shared key into deterministic seed material.
//!
//! A key is either a *shared key* as produced by [`generate_key`] (32 random
//! bytes, URL safe base64) which is used directly as the XChaCha20Poly1305
//! key, or any other text which is treated as a passphrase and stretched
//! with argon2id under a random salt.

use argon2::{Argon2, ParamsBuilder};
use base64::{engine::general_purpose::URL_SAFE, Engine};
use chacha20poly1305::aead::{Aead, AeadCore};
use chacha20poly1305::{KeyInit, XChaCha20Poly1305};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

pub mod error;

pub use crate::error::CipherError;

const NONCE_LEN: usize = 24;
const SALT_LEN: usize = 32;
pub const KEY_LEN: usize = 32;

pub type Result<T> = std::result::Result<T, CipherError>;
pub type Key = [u8; KEY_LEN];

/// Create a fresh random shared key, encoded as URL safe base64.
pub fn generate_key() -> String {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    OsRng.fill_bytes(&mut *key);
    URL_SAFE.encode(*key)
}

/// The raw key bytes when `key` is a base64 shared key of the right length.
fn shared_key(key: &[u8]) -> Option<Zeroizing<Key>> {
    let text = std::str::from_utf8(key).ok()?;
    let mut decoded = URL_SAFE.decode(text.trim()).ok()?;
    let raw: Option<Key> = decoded.as_slice().try_into().ok();
    decoded.zeroize();
    raw.map(Zeroizing::new)
}

/// Whether `key` is a shared key rather than a passphrase.
pub fn is_shared_key(key: &[u8]) -> bool {
    shared_key(key).is_some()
}

/// decrypt data with a shared key or passphrase, see [`encrypt_data`] for the layout
pub fn decrypt_data(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let (cipher_key, rest) = match shared_key(key) {
        Some(raw) => (raw, data),
        None => {
            let min = SALT_LEN + NONCE_LEN;
            if data.len() < min {
                return Err(CipherError::TooShort {
                    len: data.len(),
                    min,
                });
            }
            let (rest, salt) = data.split_at(data.len() - SALT_LEN);
            (derive_key(key, salt)?, rest)
        }
    };
    if rest.len() < NONCE_LEN {
        return Err(CipherError::TooShort {
            len: data.len(),
            min: NONCE_LEN,
        });
    }
    let (cipher_data, nonce) = rest.split_at(rest.len() - NONCE_LEN);

    let decryptor = XChaCha20Poly1305::new((&*cipher_key).into());
    decryptor
        .decrypt(nonce.into(), cipher_data)
        .map_err(CipherError::DecryptionError)
}

/// encrypt data with XChaCha20Poly1305
///
/// The output is `cipher || nonce` for a shared key and
/// `cipher || nonce || salt` for a passphrase.
pub fn encrypt_data(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut salt = None;
    let cipher_key = match shared_key(key) {
        Some(raw) => raw,
        None => {
            let mut fresh = [0u8; SALT_LEN];
            OsRng.fill_bytes(&mut fresh);
            let derived = derive_key(key, &fresh)?;
            salt = Some(fresh);
            derived
        }
    };

    let mut nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);
    let encryptor = XChaCha20Poly1305::new((&*cipher_key).into());
    let mut cipher_data = encryptor
        .encrypt(&nonce, data)
        .map_err(CipherError::EncryptionError)?;
    cipher_data.extend_from_slice(&nonce);
    nonce.zeroize();

    if let Some(mut salt) = salt {
        cipher_data.extend_from_slice(&salt);
        salt.zeroize();
    }

    Ok(cipher_data)
}

/// Fill `output` with seed material derived from `key` under a fixed `domain` salt.
///
/// Deterministic: the same key and domain always give the same bytes, which
/// is what lets two parties regenerate the same path independently.
/// Different domains give unrelated outputs for the same key.
pub fn derive_seed(key: &[u8], domain: &[u8], output: &mut [u8]) -> Result<()> {
    let params = ParamsBuilder::default()
        .m_cost(4096)
        .t_cost(2)
        .p_cost(1)
        .output_len(output.len())
        .build()
        .map_err(CipherError::KeyDerivationParamError)?;

    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
        .hash_password_into(key, domain, output)
        .map_err(CipherError::KeyDerivationError)
}

fn default_secure_argon<'key>() -> Result<Argon2<'key>> {
    // increased time costs to make it more secure
    let params = ParamsBuilder::default()
        .t_cost(10)
        .output_len(KEY_LEN)
        .build()
        .map_err(CipherError::KeyDerivationParamError)?;

    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

fn derive_key(password: &[u8], salt: &[u8]) -> Result<Zeroizing<Key>> {
    let mut output_key_material = Zeroizing::new([0u8; KEY_LEN]);
    default_secure_argon()?
        .hash_password_into(password, salt, &mut *output_key_material)
        .map_err(CipherError::KeyDerivationError)?;

    Ok(output_key_material)
}
