use std::string::FromUtf8Error;
use thiserror::Error;

pub use pathsteg_cipher::CipherError;
pub use pathsteg_dct::DctError;

#[derive(Error, Debug)]
pub enum StegError {
    /// Represents a message that does not fit into the usable samples of a carrier
    #[error("Capacity Error: the message needs {required} usable samples but the carrier only offers {available}")]
    Capacity { required: usize, available: usize },

    /// Represents a path coordinate outside of the carrier, or a path made for another image kind
    #[error("Path coordinate (y: {y}, x: {x}, z: {z}) is outside of the carrier")]
    PathBounds { y: usize, x: usize, z: usize },

    /// Represents a path that is not exactly as long as the bits to embed
    #[error("Path of {path} coordinates does not match {bits} message bits")]
    LengthMismatch { path: usize, bits: usize },

    /// Represents a path token that did not decrypt under the given key, wrong key or tampered token
    #[error("Path token authentication failed, wrong key or tampered token")]
    Authentication,

    /// Represents a token that decrypted fine but does not hold a valid path
    #[error("Path token is malformed")]
    InvalidToken,

    /// Represents image dimensions the compression engine can not work with, for example not multiples of 8
    #[error("Image of {width}x{height} is not a multiple of 8 in both dimensions, crop it first")]
    Dimension { width: usize, height: usize },

    /// Represents planes or sample buffers that do not agree in size
    #[error("Image shape error: {0}")]
    Shape(#[source] DctError),

    /// Represents a failure of the cipher other than authentication, for example key derivation
    #[error("Cipher error: {0}")]
    Cipher(#[source] CipherError),

    /// Represents a message longer than the length header can express
    #[error("Message of {0} bytes is too long")]
    MessageTooLong(usize),

    /// Represents a length header that announces more data than the path can carry
    #[error("Message header announces {announced} bits but only {available} are available")]
    CorruptMessage { announced: usize, available: usize },

    /// Represents the error of invalid UTF-8 text data found inside of a text only message
    #[error("Invalid text data found inside a message")]
    InvalidTextData(#[from] FromUtf8Error),

    /// Represents an unveil of no secret data. For example when a carrier is too small to even hold a header
    #[error("No secret data found")]
    NoSecretData,

    /// Represents an unsupported carrier media. For example, a Movie file is not supported
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a coefficient file with a wrong magic, version or truncated content
    #[error("Coefficient file is invalid: {0}")]
    InvalidCoefficientFile(&'static str),

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,

    #[error("API Error: Missing key, the key and path encodings need one")]
    MissingKey,

    #[error("API Error: Missing path token, the path encoding needs one to unveil")]
    MissingPathToken,
}

impl From<CipherError> for StegError {
    fn from(e: CipherError) -> Self {
        match e {
            CipherError::DecryptionError(_) | CipherError::TooShort { .. } => {
                StegError::Authentication
            }
            other => StegError::Cipher(other),
        }
    }
}

impl From<DctError> for StegError {
    fn from(e: DctError) -> Self {
        match e {
            DctError::Dimension { width, height } => StegError::Dimension { width, height },
            other => StegError::Shape(other),
        }
    }
}
