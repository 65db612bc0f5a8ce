use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use huffman_engine::huffman::container;
use huffman_engine::{HuffmanError, count_frequencies, entropy};
use log::{debug, error, info};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        error!("Usage: {} <input_file> [output_file]", args[0]);
        std::process::exit(1);
    }

    let input_filepath = &args[1];
    let output_filepath = args.get(2).map_or("output.huff", |s| s.as_str());

    let raw_data = match fs::read(input_filepath) {
        Ok(data) => data,
        Err(source) => {
            let e = HuffmanError::InputUnreadable {
                path: PathBuf::from(input_filepath),
                source,
            };
            error!("{e}");
            std::process::exit(1);
        }
    };
    info!("Encoding {} ({} bytes)", input_filepath, raw_data.len());

    let start_time = Instant::now();
    let encoded = match container::compress(&raw_data) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Encoding failed: {e}");
            std::process::exit(1);
        }
    };
    debug!("Encoding finished in {:.2?}", start_time.elapsed());

    if let Err(e) = fs::write(output_filepath, &encoded) {
        error!("Could not write {}: {}", output_filepath, e);
        std::process::exit(1);
    }

    let file_entropy = count_frequencies(raw_data.as_slice())
        .map(|freq| entropy(&freq))
        .unwrap_or(0.0);
    let ratio = if raw_data.is_empty() {
        0.0
    } else {
        100.0 * (1.0 - (encoded.len() as f64) / (raw_data.len() as f64))
    };

    println!(
        "Encoding successful.\n\
         Input:   {} ({} bytes)\n\
         Output:  {} ({} bytes)\n\
         Entropy: {:.4} bits/symbol\n\
         Saved:   {:.4}%",
        input_filepath,
        raw_data.len(),
        output_filepath,
        encoded.len(),
        file_entropy,
        ratio
    );
}
