pub mod codes;
pub mod container;
pub mod decode;
pub mod encode;
pub mod frequency;
pub mod render;
pub mod stats;
pub mod stream;
pub mod tree;

use crate::error::Result;

use self::codes::CodeTable;
use self::frequency::{FreqTable, Symbol, count_frequencies};
use self::stream::EncodedStream;
use self::tree::HuffmanTree;

/// The artifacts derived from one input: its frequencies, tree and codes.
///
/// Everything is computed once in [`HuffmanCoder::new`] and only read after.
#[derive(Debug, Clone)]
pub struct HuffmanCoder<S: Symbol> {
    frequencies: FreqTable<S>,
    tree: HuffmanTree<S>,
    codes: CodeTable<S>,
}

impl<S: Symbol> HuffmanCoder<S> {
    pub fn new(input: &[S]) -> Result<Self> {
        let frequencies = count_frequencies(input)?;
        let tree = HuffmanTree::build(&frequencies)?;
        let codes = CodeTable::generate(&tree);
        Ok(HuffmanCoder {
            frequencies,
            tree,
            codes,
        })
    }

    pub fn frequencies(&self) -> &FreqTable<S> {
        &self.frequencies
    }

    pub fn tree(&self) -> &HuffmanTree<S> {
        &self.tree
    }

    pub fn codes(&self) -> &CodeTable<S> {
        &self.codes
    }

    pub fn encode(&self, input: &[S]) -> Result<EncodedStream> {
        encode::encode(input, &self.codes)
    }

    pub fn decode(&self, stream: &EncodedStream) -> Result<Vec<S>> {
        decode::decode(stream, &self.tree)
    }
}
