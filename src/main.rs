use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use huffman_engine::huffman::decode::ensure_identical;
use huffman_engine::huffman::render;
use huffman_engine::{HuffmanCoder, HuffmanError, Result, Symbol, compression_ratio, entropy};
use log::{debug, error, info, warn};

const DEFAULT_WIDTH: usize = 80;

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| HuffmanError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Prints every stage for one input: frequencies, encoded bits, codes, the
/// tree, the bits-per-symbol percentage and the decoded text.
fn report<S: Symbol + Into<char>>(symbols: &[S], width: usize) -> Result<()> {
    let coder = HuffmanCoder::new(symbols)?;

    println!("Original Text:");
    println!("{}", symbols.iter().map(|&s| Into::<char>::into(s)).collect::<String>());

    println!("\nFrequency Table:");
    for line in render::frequency_lines(coder.frequencies()) {
        println!("{line}");
    }

    let stream = coder.encode(symbols)?;
    println!("\nEncoded Text:");
    for line in render::wrap_bits(&stream, width) {
        println!("{line}");
    }

    println!("\nCode Table:");
    for line in render::code_lines(coder.codes()) {
        println!("{line}");
    }

    println!("\nHuffman Tree:");
    println!("...........................................");
    for line in render::tree_lines(coder.tree()) {
        println!("{line}");
    }
    println!("...........................................");

    println!(
        "Average number of bits per symbol: {:.2}%",
        compression_ratio(symbols.len(), stream.len())
    );
    debug!("Entropy: {:.4} bits/symbol", entropy(coder.frequencies()));

    let decoded = coder.decode(&stream)?;
    ensure_identical(symbols, &decoded)?;
    println!("Decoded Text:");
    println!("{}", decoded.into_iter().map(Into::<char>::into).collect::<String>());

    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        error!("Usage: {} <input_file> [--width=N]", args[0]);
        std::process::exit(1);
    }

    let input_filepath = PathBuf::from(&args[1]);
    let mut width = DEFAULT_WIDTH;
    for arg in &args[2..] {
        if let Some(value) = arg.strip_prefix("--width=") {
            match value.parse::<usize>() {
                Ok(n) => width = n,
                Err(_) => warn!("Ignoring invalid width {value:?}, using {width}"),
            }
        } else {
            warn!("Ignoring unknown argument {arg:?}");
        }
    }

    println!("Selected file: {}", input_filepath.display());
    let result = read_input(&input_filepath).and_then(|bytes| match String::from_utf8(bytes) {
        Ok(text) => {
            info!("Reporting on {} characters", text.chars().count());
            report(text.chars().collect::<Vec<char>>().as_slice(), width)
        }
        Err(e) => {
            info!("Input is not UTF-8, reporting on raw bytes");
            report(e.into_bytes().as_slice(), width)
        }
    });

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}
