use std::fmt::{self, Debug, Formatter};

use zeroize::Zeroizing;

/// The secret both parties share out of band.
///
/// Either a shared key from [`generate_key`](crate::generate_key) or any
/// passphrase. Its content never shows up in debug output.
#[derive(Clone)]
pub struct SecretKey(Zeroizing<String>);

impl SecretKey {
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(Zeroizing::new(key.into()))
    }

    /// Create a fresh random shared key.
    pub fn generate() -> Self {
        Self::new(pathsteg_cipher::generate_key())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({})", "*".repeat(self.0.len()))
    }
}

impl From<&str> for SecretKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for SecretKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for SecretKey {}
