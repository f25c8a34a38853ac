//! Encrypted, serialized paths.
//!
//! Wire format before encryption, all integers big endian:
//! ```text
//! u8 channels (1 or 3) | u32 count | count × (u32 y, u32 x, u8 z)
//! ```
//! The ciphertext is carried as URL safe base64 text.

use std::fmt;
use std::io::{Cursor, Read};
use std::str::FromStr;

use base64::{engine::general_purpose::URL_SAFE, Engine};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use pathsteg_dct::ImageKind;

use super::{Coordinate, Path};
use crate::{Result, SecretKey, StegError};

const COORDINATE_LEN: usize = 9;

/// The encrypted form of a [`Path`], opaque to everyone without the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathToken(String);

impl PathToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PathToken {
    type Err = StegError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(StegError::MissingPathToken);
        }
        Ok(PathToken(s.to_string()))
    }
}

fn serialize_path(path: &Path) -> Result<Vec<u8>> {
    let count = u32::try_from(path.len()).map_err(|_| StegError::InvalidToken)?;
    let mut buf = Vec::with_capacity(5 + path.len() * COORDINATE_LEN);
    buf.write_u8(path.kind().channels() as u8)?;
    buf.write_u32::<BigEndian>(count)?;

    for c in path.iter() {
        let out_of_range = || StegError::PathBounds {
            y: c.y,
            x: c.x,
            z: c.z,
        };
        buf.write_u32::<BigEndian>(u32::try_from(c.y).map_err(|_| out_of_range())?)?;
        buf.write_u32::<BigEndian>(u32::try_from(c.x).map_err(|_| out_of_range())?)?;
        buf.write_u8(u8::try_from(c.z).map_err(|_| out_of_range())?)?;
    }

    Ok(buf)
}

fn deserialize_path(data: &[u8]) -> Result<Path> {
    let mut reader = Cursor::new(data);
    let invalid = |_| StegError::InvalidToken;

    let kind = match reader.read_u8().map_err(invalid)? {
        1 => ImageKind::Greyscale,
        3 => ImageKind::Colour,
        _ => return Err(StegError::InvalidToken),
    };
    let count = reader.read_u32::<BigEndian>().map_err(invalid)? as usize;

    let remaining = data.len() - reader.position() as usize;
    if count.checked_mul(COORDINATE_LEN) != Some(remaining) {
        return Err(StegError::InvalidToken);
    }

    let mut coordinates = Vec::with_capacity(count);
    for _ in 0..count {
        let y = reader.read_u32::<BigEndian>().map_err(invalid)? as usize;
        let x = reader.read_u32::<BigEndian>().map_err(invalid)? as usize;
        let z = reader.read_u8().map_err(invalid)? as usize;
        if z >= kind.channels() {
            return Err(StegError::InvalidToken);
        }
        coordinates.push(Coordinate::new(y, x, z));
    }

    let mut rest = Vec::new();
    if reader.read_to_end(&mut rest)? != 0 {
        return Err(StegError::InvalidToken);
    }

    Ok(Path::new(kind, coordinates))
}

/// Serialize `path` and encrypt it under `key`.
pub fn encrypt_path(path: &Path, key: &SecretKey) -> Result<PathToken> {
    let plain = serialize_path(path)?;
    let cipher = pathsteg_cipher::encrypt_data(key.as_bytes(), &plain)?;

    Ok(PathToken(URL_SAFE.encode(cipher)))
}

/// Decrypt and deserialize a token.
///
/// A wrong key or a modified token fails with [`StegError::Authentication`],
/// a partial or garbage path is never returned.
pub fn decrypt_path(token: &PathToken, key: &SecretKey) -> Result<Path> {
    let cipher = URL_SAFE
        .decode(token.as_str())
        .map_err(|_| StegError::InvalidToken)?;
    let plain = pathsteg_cipher::decrypt_data(key.as_bytes(), &cipher)?;

    deserialize_path(&plain)
}
