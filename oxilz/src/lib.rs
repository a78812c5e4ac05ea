//! # OxiLZ
//!
//! Pure Rust hash-chained sliding-dictionary LZ77.
//!
//! The encoder loads its input into a power-of-two window one sector at a
//! time, indexes every position through a rolling hash, and walks bounded
//! hash chains to find matches. Tokens are fixed-width fields packed
//! LSB-first; there is no entropy stage and no header.
//!
//! - [`config`]: tunable parameters and their derived constants
//! - [`window`]: the sliding dictionary with its wraparound mirror
//! - [`hash_chain`]: bucket heads, back links and sector eviction
//! - [`matcher`]: bounded longest-match search
//! - [`token`]: tokens and token sinks
//! - [`encode`] / [`decode`]: codec sessions
//!
//! ## Example
//!
//! ```rust
//! use oxilz::{Lz77Config, compress_to_vec, decompress_to_vec};
//!
//! let config = Lz77Config::DEFAULT;
//! let original = b"TOBEORNOTTOBEORTOBEORNOT".repeat(8);
//!
//! let compressed = compress_to_vec(&original, &config).unwrap();
//! assert!(compressed.len() < original.len());
//!
//! let decompressed = decompress_to_vec(&compressed, original.len(), &config).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Caller-owned buffers
//!
//! ```rust
//! use oxilz::{Lz77Config, OxiLzError, compress};
//!
//! let mut tiny = [0u8; 2];
//! let err = compress(b"not going to fit", &mut tiny, &Lz77Config::FAST).unwrap_err();
//! assert!(matches!(err, OxiLzError::OutputExhausted { .. }));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod decode;
pub mod encode;
pub mod hash_chain;
pub mod matcher;
pub mod token;
pub mod window;

// Re-exports
pub use config::{DerivedParams, Lz77Config};
pub use decode::Lz77Decoder;
pub use encode::Lz77Encoder;
pub use matcher::{Match, MatchFinder};
pub use oxilz_core::{OxiLzError, Result};
pub use token::{Token, TokenSink};

/// Compress `input` into `output`.
///
/// Returns the number of bytes written, or `OutputExhausted` if `output`
/// cannot hold the stream.
pub fn compress(input: &[u8], output: &mut [u8], config: &Lz77Config) -> Result<usize> {
    Lz77Encoder::new(*config)?.compress(input, output)
}

/// Decompress `input` into `output`.
///
/// `config` must match the one used to compress. Returns the number of
/// bytes produced.
pub fn decompress(input: &[u8], output: &mut [u8], config: &Lz77Config) -> Result<usize> {
    Lz77Decoder::new(*config)?.decompress(input, output)
}

/// Compress into a freshly allocated, worst-case sized buffer.
pub fn compress_to_vec(input: &[u8], config: &Lz77Config) -> Result<Vec<u8>> {
    let mut encoder = Lz77Encoder::new(*config)?;
    let mut output = vec![0u8; encoder.derived().max_compressed_len(config, input.len())];
    let written = encoder.compress(input, &mut output)?;
    output.truncate(written);
    Ok(output)
}

/// Decompress at most `capacity` bytes into a fresh buffer.
pub fn decompress_to_vec(input: &[u8], capacity: usize, config: &Lz77Config) -> Result<Vec<u8>> {
    let mut output = vec![0u8; capacity];
    let produced = decompress(input, &mut output, config)?;
    output.truncate(produced);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_default() {
        let original = b"Hello, Hello, Hello! Hello, World!";
        let compressed = compress_to_vec(original, &Lz77Config::DEFAULT).unwrap();
        let decompressed =
            decompress_to_vec(&compressed, original.len(), &Lz77Config::DEFAULT).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_empty_input() {
        let compressed = compress_to_vec(b"", &Lz77Config::DEFAULT).unwrap();
        // End marker only: 18 bits padded to 3 bytes.
        assert_eq!(compressed.len(), 3);
        let decompressed = decompress_to_vec(&compressed, 0, &Lz77Config::DEFAULT).unwrap();
        assert!(decompressed.is_empty());
    }

    #[test]
    fn test_single_byte() {
        let compressed = compress_to_vec(b"Z", &Lz77Config::FAST).unwrap();
        let decompressed = decompress_to_vec(&compressed, 1, &Lz77Config::FAST).unwrap();
        assert_eq!(decompressed, b"Z");
    }

    #[test]
    fn test_seven_bit_literals() {
        let config = Lz77Config::DEFAULT.with_literal_bits(7);
        let text = b"plain ASCII text, plain ASCII text";
        let compressed = compress_to_vec(text, &config).unwrap();
        assert_eq!(decompress_to_vec(&compressed, text.len(), &config).unwrap(), text);

        let err = compress_to_vec(&[255, 128, 65], &config).unwrap_err();
        assert_eq!(err, OxiLzError::literal_overflow(255, 7));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = Lz77Config::DEFAULT.with_sector_bits(2);
        let mut out = [0u8; 16];
        assert!(matches!(
            compress(b"abc", &mut out, &config),
            Err(OxiLzError::InvalidConfig { .. })
        ));
        assert!(matches!(
            decompress(&[0u8; 4], &mut out, &config),
            Err(OxiLzError::InvalidConfig { .. })
        ));
    }
}
