//! Decompress command implementation.

use oxilz::{Lz77Config, decompress_to_vec};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub fn cmd_decompress(
    input: &Path,
    output: &Path,
    size: usize,
    config: &Lz77Config,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!(?config, capacity = size, "codec settings");

    let stream = fs::read(input)?;
    let data = decompress_to_vec(&stream, size, config)?;
    if data.len() != size {
        warn!(
            expected = size,
            produced = data.len(),
            "stream ended before the expected size"
        );
    }
    fs::write(output, &data)?;

    info!(
        compressed = stream.len(),
        decompressed = data.len(),
        "decompressed {}",
        input.display()
    );
    println!(
        "{} -> {} ({} -> {} bytes)",
        input.display(),
        output.display(),
        stream.len(),
        data.len()
    );

    Ok(())
}
