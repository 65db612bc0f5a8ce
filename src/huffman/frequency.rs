use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

use crate::error::{HuffmanError, Result};

/// One unit of input. `Ord` is needed for the reproducible tie-break when
/// seeding the tree builder.
pub trait Symbol: Copy + Eq + Hash + Ord + Debug {}

impl<T: Copy + Eq + Hash + Ord + Debug> Symbol for T {}

pub type FreqTable<S> = HashMap<S, u64>;

/// Counts occurrences of every distinct symbol in `input`.
pub fn count_frequencies<S: Symbol>(input: &[S]) -> Result<FreqTable<S>> {
    if input.is_empty() {
        return Err(HuffmanError::EmptyInput);
    }

    let mut freq = FreqTable::new();
    for &symbol in input {
        *freq.entry(symbol).or_insert(0) += 1;
    }

    debug!(
        "Counted {} unique symbols over {} input symbols",
        freq.len(),
        input.len()
    );
    Ok(freq)
}

/// Entries sorted by symbol, for stable presentation and serialization.
pub fn sorted_entries<S: Symbol>(freq: &FreqTable<S>) -> Vec<(S, u64)> {
    let mut entries: Vec<(S, u64)> = freq.iter().map(|(&s, &f)| (s, f)).collect();
    entries.sort_unstable_by_key(|&(s, _)| s);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_symbol() {
        let freq = count_frequencies(b"abracadabra").unwrap();
        assert_eq!(freq[&b'a'], 5);
        assert_eq!(freq[&b'b'], 2);
        assert_eq!(freq[&b'r'], 2);
        assert_eq!(freq[&b'c'], 1);
        assert_eq!(freq[&b'd'], 1);
        assert_eq!(freq.len(), 5);
    }

    #[test]
    fn total_matches_input_length() {
        let input: Vec<char> = "hello world\r\n".chars().collect();
        let freq = count_frequencies(&input).unwrap();
        assert_eq!(freq.values().sum::<u64>(), input.len() as u64);
        assert_eq!(freq[&'\n'], 1);
        assert_eq!(freq[&' '], 1);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = count_frequencies::<u8>(&[]).unwrap_err();
        assert!(matches!(err, HuffmanError::EmptyInput));
    }

    #[test]
    fn sorted_entries_are_ordered_by_symbol() {
        let freq = count_frequencies(b"cabbca").unwrap();
        assert_eq!(sorted_entries(&freq), vec![(b'a', 2), (b'b', 2), (b'c', 2)]);
    }
}
