use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use huffman_engine::HuffmanError;
use huffman_engine::huffman::container;
use log::{debug, error, info};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        error!("Usage: {} <input_file> <output_file>", args[0]);
        eprintln!("  <input_file>:  path to the encoded file.");
        eprintln!("  <output_file>: path to write the decoded output.");
        std::process::exit(1);
    }

    let input_filepath = &args[1];
    let output_filepath = &args[2];

    info!("--- Start Decoding ---");

    let content = match fs::read(input_filepath) {
        Ok(content) => content,
        Err(source) => {
            let e = HuffmanError::InputUnreadable {
                path: PathBuf::from(input_filepath),
                source,
            };
            error!("{e}");
            std::process::exit(1);
        }
    };
    debug!("Total file size: {} bytes", content.len());

    let start_time = Instant::now();
    let decoded = match container::decompress(&content) {
        Ok(decoded) => decoded,
        Err(e) => {
            error!("Failed to decode {}: {}", input_filepath, e);
            std::process::exit(1);
        }
    };
    debug!("Decoding finished in {:.2?}", start_time.elapsed());

    info!("Writing decoded output to file: {}", output_filepath);
    if let Err(e) = fs::write(output_filepath, &decoded) {
        error!("Could not write decoded data: {}", e);
        std::process::exit(1);
    }

    println!(
        "Decoding successful.\n\
         Input:  {} ({} bytes)\n\
         Output: {} ({} bytes)",
        input_filepath,
        content.len(),
        output_filepath,
        decoded.len()
    );

    info!("--- End ---");
}
