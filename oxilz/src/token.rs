//! Literal/match tokens and the sinks the encoder emits them into.
//!
//! On the wire every token starts with a flag bit:
//!
//! ```text
//! literal: 0 | byte            (literal_bits)
//! match:   1 | length - (t+1)  (length_bits) | distance (dictionary_bits)
//! end:     1 | all ones        (length_bits) | 0        (dictionary_bits)
//! ```
//!
//! The end marker decodes to `max_match + 1`, one past any real match.

use crate::config::{DerivedParams, Lz77Config};
use oxilz_core::bitstream::BitWriter;
use oxilz_core::error::{OxiLzError, Result};

/// One encoded unit of the compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A literal byte.
    Literal(u8),
    /// A back-reference into the window.
    Match {
        /// Number of bytes to copy.
        length: usize,
        /// Distance back from the write cursor, masked to the window size.
        distance: usize,
    },
}

impl Token {
    /// Number of input bytes this token reproduces.
    pub fn covered_len(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Match { length, .. } => *length,
        }
    }
}

/// Receiver of the encoder's token stream.
pub trait TokenSink {
    /// Accept a literal byte.
    fn literal(&mut self, byte: u8) -> Result<()>;

    /// Accept a match of `length` bytes at `distance`.
    fn matched(&mut self, length: usize, distance: usize) -> Result<()>;

    /// Terminate the stream.
    fn finish(&mut self) -> Result<()>;
}

impl TokenSink for Vec<Token> {
    fn literal(&mut self, byte: u8) -> Result<()> {
        self.push(Token::Literal(byte));
        Ok(())
    }

    fn matched(&mut self, length: usize, distance: usize) -> Result<()> {
        self.push(Token::Match { length, distance });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes tokens in the fixed-width wire format.
#[derive(Debug)]
pub struct BitstreamSink<'a> {
    writer: BitWriter<'a>,
    literal_bits: u8,
    length_bits: u8,
    dictionary_bits: u8,
    length_bias: usize,
    end_marker: usize,
}

impl<'a> BitstreamSink<'a> {
    /// Create a sink writing into `output`.
    pub fn new(output: &'a mut [u8], config: &Lz77Config, derived: &DerivedParams) -> Self {
        Self {
            writer: BitWriter::new(output),
            literal_bits: config.literal_bits,
            length_bits: config.length_bits,
            dictionary_bits: config.dictionary_bits,
            length_bias: config.threshold as usize + 1,
            end_marker: derived.end_marker(),
        }
    }

    /// Bytes emitted so far.
    pub fn bytes_written(&self) -> usize {
        self.writer.bytes_written()
    }

    fn write_match(&mut self, length: usize, distance: usize) -> Result<()> {
        self.writer.write_bit(true)?;
        self.writer
            .write_bits((length - self.length_bias) as u32, self.length_bits)?;
        self.writer.write_bits(distance as u32, self.dictionary_bits)
    }
}

impl TokenSink for BitstreamSink<'_> {
    fn literal(&mut self, byte: u8) -> Result<()> {
        if self.literal_bits < 8 && byte >> self.literal_bits != 0 {
            return Err(OxiLzError::literal_overflow(byte, self.literal_bits));
        }
        self.writer.write_bit(false)?;
        self.writer.write_bits(byte as u32, self.literal_bits)
    }

    fn matched(&mut self, length: usize, distance: usize) -> Result<()> {
        debug_assert!(length >= self.length_bias && length < self.end_marker);
        self.write_match(length, distance)
    }

    fn finish(&mut self) -> Result<()> {
        self.write_match(self.end_marker, 0)?;
        self.writer.align_to_byte()
    }
}
