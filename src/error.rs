use std::io;
use std::path::PathBuf;

/// Errors produced while counting, building, encoding or decoding.
///
/// Symbols are carried in their `Debug` rendering so that the error type stays
/// independent of the symbol type being coded.
#[derive(Debug, thiserror::Error)]
pub enum HuffmanError {
    #[error("cannot build a huffman tree from empty input")]
    EmptyInput,

    #[error("symbol {symbol} has invalid frequency {frequency}")]
    InvalidFrequency { symbol: String, frequency: u64 },

    #[error("symbol {symbol} at position {position} is not in the code table")]
    UnknownSymbol { symbol: String, position: usize },

    #[error("stream ended mid-code at bit {offset} after {decoded} symbols")]
    TruncatedStream { offset: usize, decoded: usize },

    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error("expected {expected} symbols, decoded {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("decoded output differs from the input at position {position}")]
    RoundTripMismatch { position: usize },

    #[error("invalid bit character {ch:?} at offset {offset}")]
    InvalidBit { ch: char, offset: usize },

    #[error("corrupt container: {0}")]
    CorruptContainer(String),

    #[error("cannot read input {}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
