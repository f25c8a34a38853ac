use std::io::prelude::*;
use std::io::ErrorKind;
use std::slice;

/// Iterates the bits of a byte source, most significant bit of each byte first.
pub struct BitIterator<I> {
    i: u32,
    iter: I,
    byte: Option<u8>,
}

impl<I> BitIterator<I> {
    pub fn new(s: I) -> Self {
        BitIterator {
            i: 0,
            iter: s,
            byte: None,
        }
    }
}

impl<I> Iterator for BitIterator<I>
where
    I: Read,
{
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let bit = self.i % 8;
            if bit == 0 {
                self.byte = None;
                let mut b = 0;
                match self.iter.read(slice::from_mut(&mut b)) {
                    Ok(0) => return None,
                    Ok(..) => self.byte = Some(b),
                    Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(_) => return None,
                }
            }
            self.i += 1;
            return self.byte.map(|b| (b >> (7 - bit)) & 1 == 1);
        }
    }
}
