//! Image info command.
//!
//! Reads format and dimensions from headers only.

use crate::InfoArgs;
use anyhow::{Context, Result};
use std::fs;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)
            .with_context(|| format!("Failed to stat: {}", path.display()))?
            .len();
        let format = imgkit_io::read_format(path)?;

        println!("{}", path.display());
        println!("  Format:     {format}");
        match imgkit_io::read_size(path) {
            Ok(size) => {
                println!("  Resolution: {}x{}", size.width, size.height);
                if verbose {
                    println!("  Pixels:     {}", size.width as u64 * size.height as u64);
                }
            }
            Err(e) => println!("  Resolution: unknown ({e})"),
        }
        println!("  File size:  {}", super::format_size(file_size));
        if verbose {
            println!("  Decodable:  {}", if format.is_decodable() { "yes" } else { "no" });
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}
