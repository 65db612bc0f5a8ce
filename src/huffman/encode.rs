use log::debug;

use crate::error::{HuffmanError, Result};
use crate::huffman::codes::CodeTable;
use crate::huffman::frequency::Symbol;
use crate::huffman::stream::EncodedStream;

/// Replaces every input symbol with its code, in input order.
pub fn encode<S: Symbol>(input: &[S], table: &CodeTable<S>) -> Result<EncodedStream> {
    debug!("Encoding {} symbols", input.len());

    let mut stream = EncodedStream::with_capacity(input.len() * table.min_code_len().max(1));
    for (position, symbol) in input.iter().enumerate() {
        let Some(code) = table.get(symbol) else {
            return Err(HuffmanError::UnknownSymbol {
                symbol: format!("{symbol:?}"),
                position,
            });
        };
        stream.push_code(code);
    }

    debug!("Encoded stream is {} bits", stream.len());
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::frequency::count_frequencies;
    use crate::huffman::tree::HuffmanTree;

    fn table_for(input: &[u8]) -> CodeTable<u8> {
        CodeTable::generate(&HuffmanTree::build(&count_frequencies(input).unwrap()).unwrap())
    }

    #[test]
    fn single_symbol_uses_one_bit_each() {
        let stream = encode(b"aaaa", &table_for(b"aaaa")).unwrap();
        assert_eq!(stream.to_string(), "0000");
    }

    #[test]
    fn concatenates_codes_in_order() {
        // a:1 -> '0', b:2 -> '1'
        let stream = encode(b"bab", &table_for(b"abb")).unwrap();
        assert_eq!(stream.to_string(), "101");
    }

    #[test]
    fn bit_length_is_sum_of_code_lengths() {
        let input = b"abracadabra";
        let table = table_for(input);
        let expected: usize = input.iter().map(|s| table.get(s).unwrap().len()).sum();
        let stream = encode(input, &table).unwrap();
        assert_eq!(stream.len(), expected);
        assert!(stream.len() >= input.len());
    }

    #[test]
    fn unknown_symbol_reports_position() {
        let err = encode(b"aabz", &table_for(b"ab")).unwrap_err();
        match err {
            HuffmanError::UnknownSymbol { symbol, position } => {
                assert_eq!(symbol, "122");
                assert_eq!(position, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_input_encodes_to_empty_stream() {
        let stream = encode(&[], &table_for(b"ab")).unwrap();
        assert!(stream.is_empty());
    }
}
