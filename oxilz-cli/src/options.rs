//! Codec flags shared by every subcommand.

use clap::{Args, ValueEnum};
use oxilz::Lz77Config;

/// Starting point for the codec settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Preset {
    /// Greedy parsing, short chain walks
    Fast,
    /// Lazy parsing over an 8 KB window (default)
    #[default]
    Default,
    /// Lazy parsing over a 32 KB window, deep chain walks
    Best,
}

impl Preset {
    fn config(self) -> Lz77Config {
        match self {
            Preset::Fast => Lz77Config::FAST,
            Preset::Default => Lz77Config::DEFAULT,
            Preset::Best => Lz77Config::BEST,
        }
    }
}

/// Codec settings. Individual flags override the chosen preset.
#[derive(Debug, Clone, Args)]
pub struct CodecArgs {
    /// Preset to start from
    #[arg(short, long, value_enum, default_value = "default", global = true)]
    pub preset: Preset,

    /// Use greedy parsing
    #[arg(long, global = true, conflicts_with = "lazy")]
    pub greedy: bool,

    /// Use lazy parsing
    #[arg(long, global = true)]
    pub lazy: bool,

    /// Maximum hash-chain hops per match search
    #[arg(long, global = true)]
    pub max_comparisons: Option<u32>,

    /// Literal field width in bits
    #[arg(long, global = true)]
    pub literal_bits: Option<u8>,

    /// Matches of this length or shorter are sent as literals
    #[arg(long, global = true)]
    pub threshold: Option<u32>,

    /// Match-length field width in bits
    #[arg(long, global = true)]
    pub length_bits: Option<u8>,

    /// Dictionary address width in bits
    #[arg(long, global = true)]
    pub dictionary_bits: Option<u8>,

    /// Hash table address width in bits
    #[arg(long, global = true)]
    pub hash_bits: Option<u8>,

    /// Sector width in bits
    #[arg(long, global = true)]
    pub sector_bits: Option<u8>,
}

impl CodecArgs {
    /// Resolve the preset and overrides into a configuration.
    ///
    /// The result is not validated here; codec sessions reject bad values.
    pub fn to_config(&self) -> Lz77Config {
        let mut config = self.preset.config();

        if self.greedy {
            config.greedy = true;
        }
        if self.lazy {
            config.greedy = false;
        }
        if let Some(n) = self.max_comparisons {
            config.max_comparisons = n;
        }
        if let Some(bits) = self.literal_bits {
            config.literal_bits = bits;
        }
        if let Some(t) = self.threshold {
            config.threshold = t;
        }
        if let Some(bits) = self.length_bits {
            config.length_bits = bits;
        }
        if let Some(bits) = self.dictionary_bits {
            config.dictionary_bits = bits;
        }
        if let Some(bits) = self.hash_bits {
            config.hash_bits = bits;
        }
        if let Some(bits) = self.sector_bits {
            config.sector_bits = bits;
        }

        config
    }
}
