use crate::embed::Technique;

/// Which path strategy to use, the key itself is supplied separately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Sequential path for plain images, zigzag path for compressed ones
    #[default]
    Simple,
    /// Path derived from the shared key
    Key,
    /// Random path, handed over as an encrypted path token
    Path,
}

/// Codec configuration for hiding and unveiling
///
/// The compression choice determines both the carrier domain AND output format:
/// - `None` → pixel samples, PNG output
/// - `Some(quality)` → quantized DCT coefficients, coefficient file output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecOptions {
    /// JPEG quality (0-100) to compress the cover with before hiding
    pub compression: Option<u8>,
    pub encoding: Encoding,
    pub technique: Technique,
}

impl CodecOptions {
    pub fn with_compression(mut self, quality: Option<u8>) -> Self {
        self.compression = quality.map(|q| q.min(100));
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_technique(mut self, technique: Technique) -> Self {
        self.technique = technique;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CodecOptions::default();
        assert_eq!(options.compression, None);
        assert_eq!(options.encoding, Encoding::Simple);
        assert_eq!(options.technique, Technique::Matching);
    }

    #[test]
    fn test_builder() {
        let options = CodecOptions::default()
            .with_compression(Some(120))
            .with_encoding(Encoding::Path)
            .with_technique(Technique::Replacement);
        assert_eq!(options.compression, Some(100));
        assert_eq!(options.encoding, Encoding::Path);
        assert_eq!(options.technique, Technique::Replacement);
    }
}
