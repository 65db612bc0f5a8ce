//! Human-readable views of tables, trees and streams.

use crate::huffman::codes::{CodeTable, code_string};
use crate::huffman::frequency::{FreqTable, Symbol, sorted_entries};
use crate::huffman::stream::EncodedStream;
use crate::huffman::tree::{HuffmanTree, Node};

/// Shows whitespace symbols in a visible form.
pub fn escape_symbol(c: char) -> String {
    match c {
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        ' ' => "' '".to_string(),
        c if c.is_control() => c.escape_default().to_string(),
        c => c.to_string(),
    }
}

pub fn frequency_lines<S: Symbol + Into<char>>(freq: &FreqTable<S>) -> Vec<String> {
    sorted_entries(freq)
        .into_iter()
        .map(|(symbol, count)| format!("{} = {}", escape_symbol(symbol.into()), count))
        .collect()
}

pub fn code_lines<S: Symbol + Into<char>>(table: &CodeTable<S>) -> Vec<String> {
    table
        .sorted()
        .into_iter()
        .map(|(symbol, code)| format!("{} = {}", escape_symbol(symbol.into()), code_string(code)))
        .collect()
}

/// One line per tree level. Leaves print as `(weight)symbol`, internal nodes
/// as `(weight)`; each node is preceded by indentation proportional to the
/// tree height.
pub fn tree_lines<S: Symbol + Into<char>>(tree: &HuffmanTree<S>) -> Vec<String> {
    let indent = "  ".repeat(tree.height());
    tree.levels()
        .into_iter()
        .map(|level| {
            level
                .into_iter()
                .map(|node| match node {
                    Node::Leaf { symbol, weight } => {
                        format!("{indent}({weight}){}", escape_symbol((*symbol).into()))
                    }
                    Node::Internal { weight, .. } => format!("{indent}({weight})"),
                })
                .collect::<String>()
        })
        .collect()
}

/// Splits the stream's bit string into lines of at most `width` bits.
pub fn wrap_bits(stream: &EncodedStream, width: usize) -> Vec<String> {
    let text = stream.to_string();
    if width == 0 {
        return vec![text];
    }
    text.as_bytes()
        .chunks(width)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect()
}
