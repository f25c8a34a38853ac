//! File format for compressed carriers.
//!
//! Quantized coefficients are persisted as they are, so that the receiver
//! sees exactly the values that were embedded into. Layout, big endian:
//! ```text
//! "PSDC" | u8 version | u8 quality | u8 channels | u32 width | u32 height
//! | channels × height × width × i16 coefficients, plane by plane, row-major
//! ```

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use pathsteg_dct::{CoefficientImage, Image, Plane, BLOCK_SIZE};

use crate::{Result, StegError};

pub const MAGIC: &[u8; 4] = b"PSDC";
pub const VERSION: u8 = 1;

/// File extension used for coefficient files.
pub const EXTENSION: &str = "dct";

pub fn write_coefficients<W: Write>(
    writer: &mut W,
    quality: u8,
    coefficients: &CoefficientImage,
) -> Result<()> {
    let dimension = |v: usize| {
        u32::try_from(v).map_err(|_| StegError::InvalidCoefficientFile("image too large"))
    };

    writer.write_all(MAGIC)?;
    writer.write_u8(VERSION)?;
    writer.write_u8(quality)?;
    writer.write_u8(coefficients.kind().channels() as u8)?;
    writer.write_u32::<BigEndian>(dimension(coefficients.width())?)?;
    writer.write_u32::<BigEndian>(dimension(coefficients.height())?)?;

    for plane in coefficients.planes() {
        for &c in plane.samples() {
            let c = i16::try_from(c)
                .map_err(|_| StegError::InvalidCoefficientFile("coefficient exceeds 16 bit"))?;
            writer.write_i16::<BigEndian>(c)?;
        }
    }

    Ok(())
}

/// Read a coefficient file, returning the quality it was compressed with and the coefficients.
pub fn read_coefficients<R: Read>(reader: &mut R) -> Result<(u8, CoefficientImage)> {
    let truncated = |_| StegError::InvalidCoefficientFile("truncated");

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(truncated)?;
    if &magic != MAGIC {
        return Err(StegError::InvalidCoefficientFile("bad magic"));
    }
    if reader.read_u8().map_err(truncated)? != VERSION {
        return Err(StegError::InvalidCoefficientFile("unsupported version"));
    }
    let quality = reader.read_u8().map_err(truncated)?;
    if quality > 100 {
        return Err(StegError::InvalidCoefficientFile("quality above 100"));
    }
    let channels = reader.read_u8().map_err(truncated)?;
    let width = reader.read_u32::<BigEndian>().map_err(truncated)? as usize;
    let height = reader.read_u32::<BigEndian>().map_err(truncated)? as usize;
    if width % BLOCK_SIZE != 0 || height % BLOCK_SIZE != 0 {
        return Err(StegError::InvalidCoefficientFile("dimensions not multiples of 8"));
    }

    let mut read_plane = || -> Result<Plane<i32>> {
        let len = width
            .checked_mul(height)
            .ok_or(StegError::InvalidCoefficientFile("image too large"))?;
        let mut samples = Vec::with_capacity(len.min(1 << 24));
        for _ in 0..len {
            samples.push(i32::from(reader.read_i16::<BigEndian>().map_err(truncated)?));
        }
        Ok(Plane::from_samples(width, height, samples)?)
    };

    let image = match channels {
        1 => Image::Greyscale(read_plane()?),
        3 => {
            let y = read_plane()?;
            let cb = read_plane()?;
            let cr = read_plane()?;
            Image::colour(y, cb, cr)?
        }
        _ => return Err(StegError::InvalidCoefficientFile("unsupported channel count")),
    };

    let mut rest = [0u8; 1];
    if reader.read(&mut rest)? != 0 {
        return Err(StegError::InvalidCoefficientFile("trailing data"));
    }

    Ok((quality, image))
}
