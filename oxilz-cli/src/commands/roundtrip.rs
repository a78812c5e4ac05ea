//! Roundtrip command implementation.
//!
//! Reads a whole file, compresses it into a worst-case sized buffer,
//! decompresses into a buffer of exactly the original size, and compares.

use oxilz::{Lz77Config, Lz77Decoder, Lz77Encoder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// JSON report of one round trip.
#[derive(Debug, Serialize, Deserialize)]
struct RoundtripReport {
    file: String,
    original_size: usize,
    compressed_size: usize,
    decompressed_size: usize,
    /// Compressed size as a percentage of the original.
    ratio: f64,
    identical: bool,
    compress_ms: f64,
    decompress_ms: f64,
}

impl RoundtripReport {
    fn print(&self) {
        println!("File:         {}", self.file);
        println!("Original:     {} bytes", self.original_size);
        println!(
            "Compressed:   {} bytes ({:.1}%)",
            self.compressed_size, self.ratio
        );
        println!("Decompressed: {} bytes", self.decompressed_size);
        println!(
            "Result:       {}",
            if self.identical { "OK" } else { "MISMATCH" }
        );
    }
}

fn ratio(compressed: usize, original: usize) -> f64 {
    if original == 0 {
        0.0
    } else {
        compressed as f64 / original as f64 * 100.0
    }
}

pub fn cmd_roundtrip(
    file: &Path,
    config: &Lz77Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!(?config, "codec settings");

    let original = fs::read(file)?;
    let mut encoder = Lz77Encoder::new(*config)?;
    let mut decoder = Lz77Decoder::new(*config)?;

    let start = Instant::now();
    let capacity = encoder.derived().max_compressed_len(config, original.len());
    let mut compressed = vec![0u8; capacity];
    let compressed_size = encoder.compress(&original, &mut compressed)?;
    let compress_time = start.elapsed();

    let start = Instant::now();
    let mut decompressed = vec![0u8; original.len()];
    let decompressed_size =
        decoder.decompress(&compressed[..compressed_size], &mut decompressed)?;
    let decompress_time = start.elapsed();

    let identical = decompressed[..decompressed_size] == original[..];

    let report = RoundtripReport {
        file: file.display().to_string(),
        original_size: original.len(),
        compressed_size,
        decompressed_size,
        ratio: ratio(compressed_size, original.len()),
        identical,
        compress_ms: compress_time.as_secs_f64() * 1000.0,
        decompress_ms: decompress_time.as_secs_f64() * 1000.0,
    };

    info!(
        compress_ms = report.compress_ms,
        decompress_ms = report.decompress_ms,
        "round trip finished"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }

    if !identical {
        return Err(format!("{}: decompressed data differs from input", file.display()).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(0, 0), 0.0);
        assert_eq!(ratio(50, 200), 25.0);
    }

    #[test]
    fn test_report_json_fields() {
        let report = RoundtripReport {
            file: "a.txt".to_string(),
            original_size: 10,
            compressed_size: 5,
            decompressed_size: 10,
            ratio: 50.0,
            identical: true,
            compress_ms: 0.0,
            decompress_ms: 0.0,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["original_size"], 10);
        assert_eq!(value["identical"], true);

        let parsed: RoundtripReport = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.compressed_size, 5);
    }
}
