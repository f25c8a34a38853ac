//! Text messages and their framed bit form.
//!
//! A message is carried as a 32 bit big endian byte length followed by the
//! UTF-8 bytes, every byte most significant bit first.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitWrite, BitWriter};
use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::bit_iterator::BitIterator;
use crate::result::Result;
use crate::StegError;

/// Bits taken by the length header in front of every message.
pub const LENGTH_HEADER_BITS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
}

impl Message {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    /// Number of bits [`Message::to_bits`] produces.
    pub fn bit_len(&self) -> usize {
        LENGTH_HEADER_BITS + self.text.len() * 8
    }

    /// The framed bit sequence: length header then text.
    pub fn to_bits(&self) -> Result<Vec<bool>> {
        let bytes = self.text.as_bytes();
        let len = u32::try_from(bytes.len()).map_err(|_| StegError::MessageTooLong(bytes.len()))?;

        let mut buf = Vec::with_capacity(bytes.len() + 4);
        buf.write_u32::<byteorder::BigEndian>(len)?;
        buf.extend_from_slice(bytes);

        Ok(BitIterator::new(&buf[..]).collect())
    }

    /// Total bit length announced by a length header.
    ///
    /// `header` must hold at least [`LENGTH_HEADER_BITS`] bits, only those are read.
    pub fn announced_bit_len(header: &[bool]) -> Result<usize> {
        if header.len() < LENGTH_HEADER_BITS {
            return Err(StegError::NoSecretData);
        }
        let bytes = pack_bits(&header[..LENGTH_HEADER_BITS])?;
        let len = Cursor::new(bytes).read_u32::<byteorder::BigEndian>()? as usize;

        len.checked_mul(8)
            .and_then(|bits| bits.checked_add(LENGTH_HEADER_BITS))
            .ok_or(StegError::CorruptMessage {
                announced: usize::MAX,
                available: header.len(),
            })
    }

    /// Rebuild a message from its framed bits, trailing bits are ignored.
    pub fn from_bits(bits: &[bool]) -> Result<Self> {
        let total = Self::announced_bit_len(bits)?;
        if total > bits.len() {
            return Err(StegError::CorruptMessage {
                announced: total,
                available: bits.len(),
            });
        }
        let bytes = pack_bits(&bits[LENGTH_HEADER_BITS..total])?;

        Ok(Self::new(String::from_utf8(bytes)?))
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Pack bits into bytes, most significant bit first, zero padding the last byte.
pub fn pack_bits(bits: &[bool]) -> Result<Vec<u8>> {
    let mut writer = BitWriter::endian(Vec::with_capacity(bits.len() / 8 + 1), BigEndian);
    for &bit in bits {
        writer.write_bit(bit)?;
    }
    writer.byte_align()?;

    Ok(writer.into_writer())
}
