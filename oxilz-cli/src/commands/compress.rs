//! Compress command implementation.

use oxilz::{Lz77Config, compress_to_vec};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub fn cmd_compress(
    input: &Path,
    output: &Path,
    config: &Lz77Config,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!(?config, "codec settings");

    let data = fs::read(input)?;
    let compressed = compress_to_vec(&data, config)?;
    fs::write(output, &compressed)?;

    info!(
        original = data.len(),
        compressed = compressed.len(),
        "compressed {}",
        input.display()
    );
    println!(
        "{} -> {} ({} -> {} bytes)",
        input.display(),
        output.display(),
        data.len(),
        compressed.len()
    );

    Ok(())
}
