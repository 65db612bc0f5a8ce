use log::debug;

use crate::huffman::frequency::{FreqTable, Symbol};

/// Encoded size as a percentage of the fixed 8-bit-per-symbol size.
///
/// Returns 0 for empty input.
pub fn compression_ratio(input_len: usize, encoded_bits: usize) -> f64 {
    if input_len == 0 {
        return 0.0;
    }
    encoded_bits as f64 / (input_len as f64 * 8.0) * 100.0
}

pub fn average_bits_per_symbol(input_len: usize, encoded_bits: usize) -> f64 {
    if input_len == 0 {
        return 0.0;
    }
    encoded_bits as f64 / input_len as f64
}

/// Shannon entropy of the distribution, in bits per symbol.
pub fn entropy<S: Symbol>(freq: &FreqTable<S>) -> f64 {
    let total: u64 = freq.values().sum();
    if total == 0 {
        return 0.0;
    }
    let total_f = total as f64;

    let entropy: f64 = freq
        .values()
        .map(|&count| {
            let p = count as f64 / total_f;
            -p * p.log2()
        })
        .sum();

    debug!("Calculated entropy: {entropy:.4} bits/symbol (total samples: {total})");
    entropy
}
