use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;

use crate::error::{HuffmanError, Result};

/// Concatenated codes of an encoded input, in input order.
///
/// The bit length is tracked explicitly; when packed into bytes the final
/// byte is padded with zero bits that carry no data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedStream {
    bits: BitVec<u8, Msb0>,
}

impl EncodedStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        EncodedStream {
            bits: BitVec::with_capacity(bits),
        }
    }

    /// Rebuilds a stream from packed bytes and the number of meaningful bits.
    pub fn from_packed(bytes: &[u8], bit_len: usize) -> Result<Self> {
        let available = bytes.len().saturating_mul(8);
        if bit_len > available {
            return Err(HuffmanError::TruncatedStream {
                offset: available,
                decoded: 0,
            });
        }
        let mut bits = BitVec::<u8, Msb0>::from_slice(bytes);
        bits.truncate(bit_len);
        Ok(EncodedStream { bits })
    }

    pub fn push_code(&mut self, code: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(code);
    }

    /// Number of data bits, excluding any byte padding.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Packs the bits MSB-first; trailing bits of the last byte are zero.
    pub fn to_packed(&self) -> Vec<u8> {
        let mut bits = self.bits.clone();
        bits.set_uninitialized(false);
        bits.into_vec()
    }
}

impl fmt::Display for EncodedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter() {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Parses a textual bit string such as `"010011"`.
impl FromStr for EncodedStream {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self> {
        let mut bits = BitVec::with_capacity(s.len());
        for (offset, ch) in s.chars().enumerate() {
            match ch {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => return Err(HuffmanError::InvalidBit { ch, offset }),
            }
        }
        Ok(EncodedStream { bits })
    }
}
