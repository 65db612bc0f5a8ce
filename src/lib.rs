//! Huffman coding over in-memory symbol sequences.
//!
//! The pipeline runs strictly forward: count symbol frequencies, build the
//! tree, derive the code table, then encode with the table and decode with
//! the tree.
//!
//! ```
//! use huffman_engine::HuffmanCoder;
//!
//! let input = b"abracadabra";
//! let coder = HuffmanCoder::new(input)?;
//! let stream = coder.encode(input)?;
//! assert_eq!(coder.decode(&stream)?, input.to_vec());
//! # Ok::<(), huffman_engine::HuffmanError>(())
//! ```

pub mod error;
pub mod huffman;

pub use error::{HuffmanError, Result};
pub use huffman::HuffmanCoder;
pub use huffman::codes::{Code, CodeTable, code_string};
pub use huffman::decode::{decode, decode_exact, ensure_identical};
pub use huffman::encode::encode;
pub use huffman::frequency::{FreqTable, Symbol, count_frequencies};
pub use huffman::stats::{average_bits_per_symbol, compression_ratio, entropy};
pub use huffman::stream::EncodedStream;
pub use huffman::tree::{HuffmanTree, Node};
