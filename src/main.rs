//! # svgc CLI
//!
//! Usage:
//!   svgc icon.svg -o icon.json
//!   cat icon.svg | svgc
//!
//! Compiles one SVG file into its drawing program and writes it as JSON.
//! One file per invocation; batch policy (abort vs. continue over many
//! files) belongs to the caller.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    // Read input
    let input_path = args.get(1).filter(|a| !a.starts_with('-')).cloned();
    let input = match &input_path {
        Some(path) => fs::read_to_string(path).expect("Failed to read input file"),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .expect("Failed to read stdin");
            buf
        }
    };

    // Parse output path
    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone());

    let source = input_path.as_deref().unwrap_or("<stdin>");
    match svgc::compile(&input) {
        Ok(document) => {
            let json = serde_json::to_string_pretty(&document)
                .expect("Failed to serialize drawing program");
            match &output_path {
                Some(path) => {
                    fs::write(path, &json).expect("Failed to write output");
                    eprintln!(
                        "✓ Compiled {} shapes to {}",
                        document.shapes.len(),
                        path
                    );
                }
                None => println!("{}", json),
            }
        }
        Err(e) => {
            eprintln!("✗ {}:{}", source, e);
            process::exit(1);
        }
    }
}
