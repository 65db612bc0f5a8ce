//! Self-describing file layout for byte inputs.
//!
//! All integers are big-endian:
//!
//! ```text
//! magic         4 bytes  "HUF1"
//! original_len  u64
//! symbol_count  u32
//! entries       symbol_count x (byte: u8, frequency: u64)
//! bit_len       u64
//! data          ceil(bit_len / 8) bytes, zero padded
//! ```
//!
//! The decoder rebuilds the tree from the frequency entries; since tree
//! construction is deterministic this yields the encoder's tree.

use log::{debug, trace};

use crate::error::{HuffmanError, Result};
use crate::huffman::codes::CodeTable;
use crate::huffman::decode::decode_exact;
use crate::huffman::encode::encode;
use crate::huffman::frequency::{FreqTable, count_frequencies, sorted_entries};
use crate::huffman::stream::EncodedStream;
use crate::huffman::tree::HuffmanTree;

pub const MAGIC: &[u8; 4] = b"HUF1";

const ENTRY_SIZE: usize = 1 + 8;

/// One entry per possible byte value at most.
const MAX_SYMBOLS: usize = 256;

/// Encodes `data` into a container. Empty input yields a header-only container.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        let mut bytes = header(0, &FreqTable::new());
        bytes.extend_from_slice(&0u64.to_be_bytes());
        return Ok(bytes);
    }

    let freq = count_frequencies(data)?;
    let tree = HuffmanTree::build(&freq)?;
    let table = CodeTable::generate(&tree);
    let stream = encode(data, &table)?;

    let mut bytes = header(data.len(), &freq);
    bytes.extend_from_slice(&(stream.len() as u64).to_be_bytes());
    bytes.extend_from_slice(&stream.to_packed());

    debug!(
        "Container: {} input bytes -> {} bytes ({} data bits)",
        data.len(),
        bytes.len(),
        stream.len()
    );
    Ok(bytes)
}

/// Parses a container produced by [`compress`] and returns the original bytes.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut reader = Reader { bytes, pos: 0 };

    if reader.take(MAGIC.len())? != MAGIC {
        return Err(HuffmanError::CorruptContainer("bad magic".to_string()));
    }
    let original_len = usize::try_from(reader.u64()?)
        .map_err(|_| HuffmanError::CorruptContainer("original length overflow".to_string()))?;
    let symbol_count = reader.u32()? as usize;
    trace!("Container header: {original_len} bytes, {symbol_count} symbols");

    if symbol_count > MAX_SYMBOLS {
        return Err(HuffmanError::CorruptContainer(format!(
            "{symbol_count} frequency entries exceed the {MAX_SYMBOLS} possible bytes"
        )));
    }
    if symbol_count * ENTRY_SIZE > reader.remaining() {
        return Err(HuffmanError::CorruptContainer(format!(
            "{symbol_count} frequency entries need {} bytes, {} left",
            symbol_count * ENTRY_SIZE,
            reader.remaining()
        )));
    }

    let mut freq = FreqTable::with_capacity(symbol_count);
    for _ in 0..symbol_count {
        let symbol = reader.u8()?;
        let frequency = reader.u64()?;
        if freq.insert(symbol, frequency).is_some() {
            return Err(HuffmanError::CorruptContainer(format!(
                "duplicate frequency entry for byte {symbol:#04x}"
            )));
        }
    }

    let bit_len = usize::try_from(reader.u64()?)
        .map_err(|_| HuffmanError::CorruptContainer("bit length overflow".to_string()))?;
    let data = reader.rest();
    if data.len() != bit_len.div_ceil(8) {
        return Err(HuffmanError::CorruptContainer(format!(
            "expected {} data bytes for {} bits, found {}",
            bit_len.div_ceil(8),
            bit_len,
            data.len()
        )));
    }

    if freq.is_empty() {
        if original_len != 0 || bit_len != 0 {
            return Err(HuffmanError::CorruptContainer(
                "no frequency entries for non-empty data".to_string(),
            ));
        }
        return Ok(Vec::new());
    }

    let total = freq
        .values()
        .try_fold(0u64, |acc, &f| acc.checked_add(f))
        .ok_or_else(|| HuffmanError::CorruptContainer("frequency total overflow".to_string()))?;
    if total != original_len as u64 {
        return Err(HuffmanError::CorruptContainer(format!(
            "frequencies sum to {total}, header says {original_len}"
        )));
    }

    let tree = HuffmanTree::build(&freq)?;
    let stream = EncodedStream::from_packed(data, bit_len)?;
    decode_exact(&stream, &tree, original_len)
}

fn header(original_len: usize, freq: &FreqTable<u8>) -> Vec<u8> {
    let entries = sorted_entries(freq);
    let mut bytes = Vec::with_capacity(MAGIC.len() + 8 + 4 + entries.len() * ENTRY_SIZE + 8);

    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&(original_len as u64).to_be_bytes());
    bytes.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    for (symbol, frequency) in entries {
        bytes.push(symbol);
        bytes.extend_from_slice(&frequency.to_be_bytes());
    }
    bytes
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).filter(|&end| end <= self.bytes.len());
        let Some(end) = end else {
            return Err(HuffmanError::CorruptContainer(format!(
                "unexpected end of data at byte {}",
                self.bytes.len()
            )));
        };
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(buf))
    }

    fn u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(u64::from_be_bytes(buf))
    }

    fn rest(&mut self) -> &'a [u8] {
        let rest = &self.bytes[self.pos..];
        self.pos = self.bytes.len();
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(b"" ; "empty")]
    #[test_case(b"a" ; "single byte")]
    #[test_case(b"aaaaaaa" ; "single symbol")]
    #[test_case(b"hello, world\r\n" ; "text")]
    #[test_case(&[0u8, 255, 0, 1, 2, 255, 255] ; "binary")]
    fn restores_original(data: &[u8]) {
        let packed = compress(data).unwrap();
        assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn layout_for_single_symbol() {
        let packed = compress(b"aaaa").unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(b"HUF1");
        expected.extend_from_slice(&4u64.to_be_bytes());
        expected.extend_from_slice(&1u32.to_be_bytes());
        expected.push(b'a');
        expected.extend_from_slice(&4u64.to_be_bytes());
        expected.extend_from_slice(&4u64.to_be_bytes());
        expected.push(0);
        assert_eq!(packed, expected);
    }

    #[test]
    fn bad_magic() {
        let mut packed = compress(b"abc").unwrap();
        packed[0] = b'X';
        assert!(matches!(
            decompress(&packed),
            Err(HuffmanError::CorruptContainer(_))
        ));
    }

    #[test]
    fn truncated_data() {
        let packed = compress(b"abcabcabcabc").unwrap();
        let err = decompress(&packed[..packed.len() - 1]).unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptContainer(_)));
    }

    #[test]
    fn truncated_header() {
        let err = decompress(b"HUF1\0\0").unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptContainer(_)));
    }

    #[test]
    fn oversized_symbol_count() {
        let mut packed = Vec::new();
        packed.extend_from_slice(b"HUF1");
        packed.extend_from_slice(&0u64.to_be_bytes());
        packed.extend_from_slice(&u32::MAX.to_be_bytes());
        let err = decompress(&packed).unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptContainer(_)));
    }

    #[test]
    fn symbol_count_beyond_available_entries() {
        let mut packed = Vec::new();
        packed.extend_from_slice(b"HUF1");
        packed.extend_from_slice(&3u64.to_be_bytes());
        packed.extend_from_slice(&200u32.to_be_bytes());
        packed.push(b'a');
        packed.extend_from_slice(&3u64.to_be_bytes());
        let err = decompress(&packed).unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptContainer(msg) if msg.contains("1800 bytes")));
    }

    #[test]
    fn frequency_total_overflow() {
        let mut packed = Vec::new();
        packed.extend_from_slice(b"HUF1");
        packed.extend_from_slice(&4u64.to_be_bytes());
        packed.extend_from_slice(&2u32.to_be_bytes());
        packed.push(b'a');
        packed.extend_from_slice(&u64::MAX.to_be_bytes());
        packed.push(b'b');
        packed.extend_from_slice(&u64::MAX.to_be_bytes());
        packed.extend_from_slice(&0u64.to_be_bytes());
        let err = decompress(&packed).unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptContainer(msg) if msg == "frequency total overflow"));
    }

    #[test]
    fn frequency_total_must_match_length() {
        let mut packed = compress(b"abab").unwrap();
        // original_len lives right after the magic
        packed[4..12].copy_from_slice(&5u64.to_be_bytes());
        assert!(matches!(
            decompress(&packed),
            Err(HuffmanError::CorruptContainer(_))
        ));
    }
}
