use log::debug;

use crate::error::{HuffmanError, Result};
use crate::huffman::frequency::Symbol;
use crate::huffman::stream::EncodedStream;
use crate::huffman::tree::{HuffmanTree, Node};

/// Walks the tree bit by bit, emitting a symbol at every leaf and restarting
/// from the root.
///
/// An empty stream decodes to an empty sequence. A stream that stops part way
/// down the tree fails with [`HuffmanError::TruncatedStream`].
///
/// A single-leaf tree is read as a leaf reachable through its one-bit code
/// `0`: each `0` emits the symbol, and a `1` follows an edge that does not
/// exist and fails with [`HuffmanError::MalformedTree`].
pub fn decode<S: Symbol>(stream: &EncodedStream, tree: &HuffmanTree<S>) -> Result<Vec<S>> {
    debug!("Decoding {} bits", stream.len());

    let root = tree.root();
    let mut output = Vec::new();

    if let Node::Leaf { symbol, .. } = root {
        for (offset, bit) in stream.bits().iter().by_vals().enumerate() {
            if bit {
                return Err(HuffmanError::MalformedTree(format!(
                    "bit 1 at offset {offset} has no edge in a single-leaf tree"
                )));
            }
            output.push(*symbol);
        }
        return Ok(output);
    }

    let mut cursor = root;
    for (offset, bit) in stream.bits().iter().by_vals().enumerate() {
        let Node::Internal { left, right, .. } = cursor else {
            return Err(HuffmanError::MalformedTree(format!(
                "cursor rested on a leaf at offset {offset}"
            )));
        };
        cursor = if bit { &**right } else { &**left };

        if let Node::Leaf { symbol, .. } = cursor {
            output.push(*symbol);
            cursor = root;
        }
    }

    if !std::ptr::eq(cursor, root) {
        return Err(HuffmanError::TruncatedStream {
            offset: stream.len(),
            decoded: output.len(),
        });
    }

    debug!("Decoded {} symbols", output.len());
    Ok(output)
}

/// Like [`decode`], but also requires exactly `expected` symbols.
pub fn decode_exact<S: Symbol>(
    stream: &EncodedStream,
    tree: &HuffmanTree<S>,
    expected: usize,
) -> Result<Vec<S>> {
    let output = decode(stream, tree)?;
    if output.len() < expected {
        return Err(HuffmanError::TruncatedStream {
            offset: stream.len(),
            decoded: output.len(),
        });
    }
    if output.len() > expected {
        return Err(HuffmanError::LengthMismatch {
            expected,
            actual: output.len(),
        });
    }
    Ok(output)
}

/// Checks that `decoded` reproduces `original` symbol for symbol.
pub fn ensure_identical<S: Symbol>(original: &[S], decoded: &[S]) -> Result<()> {
    let mismatch = original
        .iter()
        .zip(decoded)
        .position(|(a, b)| a != b)
        .or_else(|| (original.len() != decoded.len()).then(|| original.len().min(decoded.len())));
    match mismatch {
        Some(position) => Err(HuffmanError::RoundTripMismatch { position }),
        None => Ok(()),
    }
}
