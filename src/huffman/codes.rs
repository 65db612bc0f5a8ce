use std::collections::HashMap;

use bitvec::prelude::*;
use log::{debug, trace};

use crate::huffman::frequency::Symbol;
use crate::huffman::tree::{HuffmanTree, Node};

/// A symbol's path from the root: `0` = left, `1` = right.
pub type Code = BitVec<u8, Msb0>;

/// Symbol to code mapping derived from a [`HuffmanTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Symbol> {
    codes: HashMap<S, Code>,
}

impl<S: Symbol> CodeTable<S> {
    /// Walks the tree depth-first with an explicit stack, so deeply skewed
    /// trees do not recurse.
    ///
    /// A tree that is a single leaf gets the one-bit code `0`; a zero-length
    /// code could not be written to or read from a stream.
    pub fn generate(tree: &HuffmanTree<S>) -> Self {
        let mut codes = HashMap::new();

        if let Node::Leaf { symbol, .. } = tree.root() {
            trace!("Single-symbol tree, assigning {symbol:?} the code '0'");
            codes.insert(*symbol, bitvec![u8, Msb0; 0]);
            return CodeTable { codes };
        }

        let mut stack: Vec<(&Node<S>, Code)> = vec![(tree.root(), Code::new())];
        while let Some((node, prefix)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    trace!("Assigning code to {:?} : '{}'", symbol, code_string(&prefix));
                    codes.insert(*symbol, prefix);
                }
                Node::Internal { left, right, .. } => {
                    let mut right_prefix = prefix.clone();
                    right_prefix.push(true);
                    stack.push((&**right, right_prefix));

                    let mut left_prefix = prefix;
                    left_prefix.push(false);
                    stack.push((&**left, left_prefix));
                }
            }
        }

        debug!("Code table built with {} entries", codes.len());
        CodeTable { codes }
    }

    pub fn get(&self, symbol: &S) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(symbol).map(|code| code.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &Code)> {
        self.codes.iter()
    }

    /// Entries ordered by symbol.
    pub fn sorted(&self) -> Vec<(S, &Code)> {
        let mut entries: Vec<(S, &Code)> = self.iter().map(|(&s, c)| (s, c)).collect();
        entries.sort_unstable_by_key(|&(s, _)| s);
        entries
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(|c| c.len()).max().unwrap_or(0)
    }

    pub fn min_code_len(&self) -> usize {
        self.codes.values().map(|c| c.len()).min().unwrap_or(0)
    }

    /// True if no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&Code> = self.codes.values().collect();
        // Lexicographic order places any prefix directly before some code it
        // prefixes, so checking neighbours is enough.
        codes.sort();
        codes
            .windows(2)
            .all(|pair| !pair[1].starts_with(pair[0].as_bitslice()))
    }
}

/// Renders a code as a string of `0` and `1`.
pub fn code_string(code: &BitSlice<u8, Msb0>) -> String {
    code.iter().map(|bit| if *bit { '1' } else { '0' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::frequency::count_frequencies;
    use test_case::test_case;

    fn table_for(input: &[u8]) -> CodeTable<u8> {
        let tree = HuffmanTree::build(&count_frequencies(input).unwrap()).unwrap();
        CodeTable::generate(&tree)
    }

    #[test]
    fn single_symbol_gets_one_bit_code() {
        let table = table_for(b"aaaa");
        assert_eq!(table.len(), 1);
        assert_eq!(code_string(table.get(&b'a').unwrap()), "0");
    }

    #[test]
    fn two_symbols_get_complementary_bits() {
        let table = table_for(b"abb");
        assert_eq!(code_string(table.get(&b'a').unwrap()), "0");
        assert_eq!(code_string(table.get(&b'b').unwrap()), "1");
    }

    #[test]
    fn skewed_distribution_gives_frequent_symbol_shortest_code() {
        let mut input = vec![b'a'; 100];
        input.extend_from_slice(b"bc");
        let table = table_for(&input);
        assert_eq!(table.get(&b'a').unwrap().len(), 1);
        assert_eq!(table.get(&b'b').unwrap().len(), 2);
        assert_eq!(table.get(&b'c').unwrap().len(), 2);
    }

    #[test_case(b"abracadabra" ; "abracadabra")]
    #[test_case(b"mississippi river" ; "mississippi")]
    #[test_case(b"aaaaaaaabbbbccd\n\r " ; "skewed with whitespace")]
    #[test_case(b"abcdefghijklmnopqrstuvwxyz" ; "uniform alphabet")]
    fn codes_are_prefix_free(input: &[u8]) {
        let table = table_for(input);
        assert!(table.is_prefix_free());
        assert_eq!(table.len(), count_frequencies(input).unwrap().len());
    }

    #[test]
    fn fibonacci_weights_give_maximal_depth() {
        let freq = crate::huffman::frequency::FreqTable::from([
            (b'a', 1),
            (b'b', 1),
            (b'c', 2),
            (b'd', 3),
            (b'e', 5),
        ]);
        let table = CodeTable::generate(&HuffmanTree::build(&freq).unwrap());
        assert_eq!(table.max_code_len(), 4);
        assert_eq!(table.min_code_len(), 1);
    }

    #[test]
    fn iter_and_sorted_cover_every_symbol() {
        let table = table_for(b"mississippi");
        assert_eq!(table.iter().count(), 4);
        let symbols: Vec<u8> = table.sorted().into_iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, b"imps".to_vec());
    }

    #[test]
    fn prefix_check_detects_violation() {
        let mut codes = HashMap::new();
        codes.insert(b'a', bitvec![u8, Msb0; 0]);
        codes.insert(b'b', bitvec![u8, Msb0; 0, 1]);
        let table = CodeTable { codes };
        assert!(!table.is_prefix_free());
    }
}
