//! Sector-driven LZ77 encoder.
//!
//! The input is fed through the window one sector at a time. Once the window
//! has been filled completely, each new sector first evicts the index
//! entries that point into the bytes it is about to overwrite.
//!
//! # Parsing strategies
//!
//! - **Greedy**: take the longest match at each position if it beats the
//!   threshold, otherwise emit a literal.
//! - **Lazy**: hold a match and probe one byte further; while the next
//!   position offers a strictly longer match, emit a literal and move the
//!   held match forward.

use crate::config::{DerivedParams, Lz77Config};
use crate::hash_chain::HashChain;
use crate::matcher::MatchFinder;
use crate::token::{BitstreamSink, Token, TokenSink};
use crate::window::SlidingWindow;
use oxilz_core::error::Result;

/// LZ77 encoder session.
///
/// Owns its window and hash tables. Every call starts from a clean state, so
/// one encoder can serve many independent inputs.
#[derive(Debug, Clone)]
pub struct Lz77Encoder {
    config: Lz77Config,
    derived: DerivedParams,
    window: SlidingWindow,
    chain: HashChain,
    finder: MatchFinder,
}

impl Lz77Encoder {
    /// Create an encoder for `config`.
    pub fn new(config: Lz77Config) -> Result<Self> {
        config.validate()?;
        let derived = DerivedParams::from_config(&config);
        Ok(Self {
            config,
            derived,
            window: SlidingWindow::new(&derived),
            chain: HashChain::new(&config, &derived),
            finder: MatchFinder::new(&config, &derived),
        })
    }

    /// The configuration this encoder was built with.
    pub fn config(&self) -> &Lz77Config {
        &self.config
    }

    /// The constants derived from the configuration.
    pub fn derived(&self) -> &DerivedParams {
        &self.derived
    }

    /// Compress `input` into `output`, returning the compressed length.
    ///
    /// Fails with `OutputExhausted` if `output` is too small; see
    /// [`DerivedParams::max_compressed_len`] for a safe size.
    pub fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let mut sink = BitstreamSink::new(output, &self.config, &self.derived);
        self.encode_into(input, &mut sink)?;
        Ok(sink.bytes_written())
    }

    /// Run the encoder and collect its tokens instead of packing them.
    ///
    /// The end-of-stream marker is not included.
    pub fn tokenize(&mut self, input: &[u8]) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        self.encode_into(input, &mut tokens)?;
        Ok(tokens)
    }

    /// Drive the whole session into `sink`.
    pub fn encode_into<S: TokenSink>(&mut self, input: &[u8], sink: &mut S) -> Result<()> {
        self.window.reset();
        self.chain.reset();

        let sector_size = self.derived.sector_size;
        let mut position = 0;
        let mut consumed = 0;
        let mut evict = false;

        loop {
            if evict {
                self.chain.invalidate_sector(position);
            }

            let loaded = self.window.load_sector(position, &input[consumed..]);
            if loaded == 0 {
                break;
            }
            consumed += loaded;

            self.chain.hash_sector(&self.window, position, loaded);
            if self.config.greedy {
                self.parse_greedy(position, loaded, sink)?;
            } else {
                self.parse_lazy(position, loaded, sink)?;
            }

            position += sector_size;
            if position == self.derived.dictionary_size {
                position = 0;
                evict = true;
            }
        }

        sink.finish()
    }

    #[inline]
    fn distance(&self, from: usize, to: usize) -> usize {
        self.window.wrap(from.wrapping_sub(to))
    }

    fn parse_greedy<S: TokenSink>(
        &self,
        mut position: usize,
        mut remaining: usize,
        sink: &mut S,
    ) -> Result<()> {
        let threshold = self.config.threshold as usize;

        while remaining > 0 {
            let found = self
                .finder
                .find(&self.window, &self.chain, position, threshold);

            match found {
                Some(m) if m.length.min(remaining) > threshold => {
                    let length = m.length.min(remaining);
                    sink.matched(length, self.distance(position, m.position))?;
                    position += length;
                    remaining -= length;
                }
                _ => {
                    sink.literal(self.window.byte_at(position))?;
                    position += 1;
                    remaining -= 1;
                }
            }
        }
        Ok(())
    }

    fn parse_lazy<S: TokenSink>(
        &self,
        mut position: usize,
        mut remaining: usize,
        sink: &mut S,
    ) -> Result<()> {
        let threshold = self.config.threshold as usize;
        let max_match = self.derived.max_match;

        while remaining > 0 {
            let Some(mut held) = self
                .finder
                .find(&self.window, &self.chain, position, threshold)
            else {
                sink.literal(self.window.byte_at(position))?;
                position += 1;
                remaining -= 1;
                continue;
            };

            loop {
                // Probe one byte ahead while the sector still has room.
                if remaining > 1 && held.length < max_match {
                    let next = self
                        .finder
                        .find(&self.window, &self.chain, position + 1, held.length);
                    if let Some(better) = next {
                        sink.literal(self.window.byte_at(position))?;
                        position += 1;
                        remaining -= 1;
                        held = better;
                        continue;
                    }
                }

                let length = held.length.min(remaining);
                if length <= threshold {
                    sink.literal(self.window.byte_at(position))?;
                    position += 1;
                    remaining -= 1;
                } else {
                    sink.matched(length, self.distance(position, held.position))?;
                    position += length;
                    remaining -= length;
                }
                break;
            }
        }
        Ok(())
    }
}
