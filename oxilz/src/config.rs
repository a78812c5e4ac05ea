//! Codec configuration and the constants derived from it.
//!
//! The compressed stream carries no header, so the encoder and decoder must
//! be built from the same [`Lz77Config`]. Every size derived from it is a
//! power of two (except the hash mixing shift), which keeps all window and
//! table arithmetic down to bitmasks.

use oxilz_core::error::{OxiLzError, Result};

/// User-tunable codec parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lz77Config {
    /// Emit the first acceptable match instead of looking one byte ahead.
    ///
    /// Greedy parsing is faster; lazy parsing usually compresses better.
    pub greedy: bool,
    /// Maximum number of chain hops per match search.
    pub max_comparisons: u32,
    /// Width of a literal field in bits.
    ///
    /// 8 for arbitrary bytes. With a narrower width, compressing a byte that
    /// does not fit fails with `LiteralOverflow`.
    pub literal_bits: u8,
    /// Matches of this length or shorter are sent as literals.
    pub threshold: u32,
    /// Width of the match-length field in bits.
    pub length_bits: u8,
    /// Dictionary (window) address width in bits.
    pub dictionary_bits: u8,
    /// Hash table address width in bits.
    pub hash_bits: u8,
    /// Sector width in bits; sectors are the unit of loading and eviction.
    pub sector_bits: u8,
}

impl Lz77Config {
    /// Balanced settings: lazy parsing over an 8 KB window.
    pub const DEFAULT: Self = Self {
        greedy: false,
        max_comparisons: 75,
        literal_bits: 8,
        threshold: 2,
        length_bits: 4,
        dictionary_bits: 13,
        hash_bits: 10,
        sector_bits: 10,
    };

    /// Greedy parsing with a short chain budget.
    pub const FAST: Self = Self {
        greedy: true,
        max_comparisons: 16,
        ..Self::DEFAULT
    };

    /// Lazy parsing over a 32 KB window with deep chain walks.
    pub const BEST: Self = Self {
        greedy: false,
        max_comparisons: 512,
        dictionary_bits: 15,
        hash_bits: 12,
        sector_bits: 11,
        ..Self::DEFAULT
    };

    /// Set greedy parsing.
    pub fn with_greedy(mut self, greedy: bool) -> Self {
        self.greedy = greedy;
        self
    }

    /// Set the chain search budget.
    pub fn with_max_comparisons(mut self, max_comparisons: u32) -> Self {
        self.max_comparisons = max_comparisons;
        self
    }

    /// Set the literal field width.
    pub fn with_literal_bits(mut self, bits: u8) -> Self {
        self.literal_bits = bits;
        self
    }

    /// Set the minimum-match threshold.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the match-length field width.
    pub fn with_length_bits(mut self, bits: u8) -> Self {
        self.length_bits = bits;
        self
    }

    /// Set the dictionary address width.
    pub fn with_dictionary_bits(mut self, bits: u8) -> Self {
        self.dictionary_bits = bits;
        self
    }

    /// Set the hash table address width.
    pub fn with_hash_bits(mut self, bits: u8) -> Self {
        self.hash_bits = bits;
        self
    }

    /// Set the sector width.
    pub fn with_sector_bits(mut self, bits: u8) -> Self {
        self.sector_bits = bits;
        self
    }

    /// Check that the parameters describe a usable codec.
    pub fn validate(&self) -> Result<()> {
        check_range("literal_bits", self.literal_bits, 1, 16)?;
        check_range("length_bits", self.length_bits, 1, 16)?;
        check_range("dictionary_bits", self.dictionary_bits, 1, 24)?;
        check_range("hash_bits", self.hash_bits, 1, 24)?;

        if self.sector_bits > self.dictionary_bits {
            return Err(OxiLzError::invalid_config(format!(
                "sector_bits ({}) must not exceed dictionary_bits ({})",
                self.sector_bits, self.dictionary_bits
            )));
        }
        // A match longer than the threshold must fit in one sector, and a
        // sector is at most 2^24 bytes.
        if self.threshold == 0 || self.threshold >= MAX_SECTOR_SIZE {
            return Err(OxiLzError::invalid_config(format!(
                "threshold must be in 1..{MAX_SECTOR_SIZE}, got {}",
                self.threshold
            )));
        }
        if self.max_comparisons == 0 {
            return Err(OxiLzError::invalid_config(
                "max_comparisons must be at least 1",
            ));
        }

        // The mirror behind the window is refreshed only when sector 0 is
        // loaded, so that sector must cover it entirely.
        let derived = DerivedParams::from_config(self);
        if derived.sector_size < derived.max_match {
            return Err(OxiLzError::invalid_config(format!(
                "sector size ({}) must be at least the maximum match length ({})",
                derived.sector_size, derived.max_match
            )));
        }

        Ok(())
    }
}

impl Default for Lz77Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Largest sector: `2^24`, the widest dictionary.
const MAX_SECTOR_SIZE: u32 = 1 << 24;

fn check_range(name: &str, value: u8, min: u8, max: u8) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(OxiLzError::invalid_config(format!(
            "{name} must be in {min}..={max}, got {value}"
        )))
    }
}

/// Fixed numeric constants computed once per configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedParams {
    /// Longest encodable match: `2^length_bits + threshold - 1`.
    pub max_match: usize,
    /// Window size: `2^dictionary_bits`.
    pub dictionary_size: usize,
    /// Hash table size: `2^hash_bits`.
    pub hash_size: usize,
    /// Rolling hash shift: `(hash_bits + threshold) / (threshold + 1)`.
    pub hash_shift: u32,
    /// Sector size: `2^sector_bits`.
    pub sector_size: usize,
    /// Mask selecting the sector a window position belongs to.
    pub sector_mask: usize,
}

impl DerivedParams {
    /// Derive the constants for `config`.
    ///
    /// Pure arithmetic; the result is only meaningful for configurations
    /// that pass [`Lz77Config::validate`].
    pub fn from_config(config: &Lz77Config) -> Self {
        let threshold = config.threshold as usize;
        let dictionary_size = 1usize << config.dictionary_bits;
        let sector_size = 1usize << config.sector_bits;

        Self {
            max_match: (1usize << config.length_bits) + threshold - 1,
            dictionary_size,
            hash_size: 1usize << config.hash_bits,
            hash_shift: (config.hash_bits as u32 + config.threshold) / (config.threshold + 1),
            sector_size,
            sector_mask: (dictionary_size - 1) & !(sector_size - 1),
        }
    }

    /// Mask that wraps a position into the window.
    #[inline]
    pub fn dictionary_mask(&self) -> usize {
        self.dictionary_size - 1
    }

    /// Decoded match length that marks the end of the stream.
    ///
    /// One past the longest real match, so no real match can produce it.
    #[inline]
    pub fn end_marker(&self) -> usize {
        self.max_match + 1
    }

    /// Upper bound on the compressed size of `input_len` bytes.
    ///
    /// Each literal covers one byte and each match at least `threshold + 1`
    /// bytes; the bound charges every byte the dearer of the two rates and
    /// adds the end-of-stream token.
    pub fn max_compressed_len(&self, config: &Lz77Config, input_len: usize) -> usize {
        let literal_cost = 1 + config.literal_bits as usize;
        let match_cost = 1 + config.length_bits as usize + config.dictionary_bits as usize;
        let per_byte = literal_cost.max(match_cost.div_ceil(config.threshold as usize + 1));

        (input_len * per_byte + match_cost).div_ceil(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Lz77Config::default();
        assert_eq!(config, Lz77Config::DEFAULT);
        assert!(!config.greedy);
        assert_eq!(config.max_comparisons, 75);
        assert_eq!(config.literal_bits, 8);
        assert_eq!(config.threshold, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        assert!(Lz77Config::FAST.greedy);
        assert!(Lz77Config::FAST.validate().is_ok());
        assert!(Lz77Config::BEST.validate().is_ok());
    }

    #[test]
    fn test_derived_defaults() {
        let derived = DerivedParams::from_config(&Lz77Config::DEFAULT);
        assert_eq!(derived.max_match, 17);
        assert_eq!(derived.dictionary_size, 8192);
        assert_eq!(derived.hash_size, 1024);
        assert_eq!(derived.hash_shift, 4);
        assert_eq!(derived.sector_size, 1024);
        assert_eq!(derived.sector_mask, 0x1C00);
        assert_eq!(derived.dictionary_mask(), 0x1FFF);
        assert_eq!(derived.end_marker(), 18);
    }

    #[test]
    fn test_sector_mask_tags_sector_start() {
        let derived = DerivedParams::from_config(&Lz77Config::DEFAULT);
        assert_eq!(1023 & derived.sector_mask, 0);
        assert_eq!(1024 & derived.sector_mask, 1024);
        assert_eq!(8191 & derived.sector_mask, 7168);
    }

    #[test]
    fn test_validate_rejects() {
        let base = Lz77Config::DEFAULT;
        assert!(base.with_threshold(0).validate().is_err());
        assert!(matches!(
            base.with_threshold(u32::MAX).validate(),
            Err(OxiLzError::InvalidConfig { .. })
        ));
        assert!(base.with_threshold(1 << 24).validate().is_err());
        assert!(base.with_max_comparisons(0).validate().is_err());
        assert!(base.with_literal_bits(0).validate().is_err());
        assert!(base.with_literal_bits(17).validate().is_err());
        assert!(base.with_length_bits(0).validate().is_err());
        assert!(base.with_dictionary_bits(25).validate().is_err());
        assert!(base.with_hash_bits(0).validate().is_err());
        assert!(base.with_sector_bits(14).validate().is_err());
        // 16-byte sectors cannot cover a 17-byte mirror.
        assert!(base.with_sector_bits(4).validate().is_err());
        assert!(base.with_sector_bits(5).validate().is_ok());
    }

    #[test]
    fn test_max_compressed_len() {
        let config = Lz77Config::DEFAULT;
        let derived = DerivedParams::from_config(&config);
        // Empty input still carries the 18-bit end marker.
        assert_eq!(derived.max_compressed_len(&config, 0), 3);
        // 9 bits per literal dominates 18 / 3 = 6 bits per matched byte.
        assert_eq!(derived.max_compressed_len(&config, 8), (72 + 18usize).div_ceil(8));
    }
}
