//! LZ77 decoder.
//!
//! Tokens are replayed into a window of the encoder's size. Whenever the
//! write cursor reaches the end of the window the whole window is flushed to
//! the output and the cursor restarts at 0; the end marker flushes whatever
//! precedes the cursor.

use crate::config::{DerivedParams, Lz77Config};
use crate::window::SlidingWindow;
use oxilz_core::bitstream::BitReader;
use oxilz_core::error::{OxiLzError, Result};

/// Output side of one decode call.
struct OutputCursor<'a> {
    buf: &'a mut [u8],
    flushed: usize,
}

impl OutputCursor<'_> {
    fn flush(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.flushed + bytes.len();
        if end > self.buf.len() {
            return Err(OxiLzError::output_exhausted(self.buf.len()));
        }
        self.buf[self.flushed..end].copy_from_slice(bytes);
        self.flushed = end;
        Ok(())
    }
}

/// LZ77 decoder session.
///
/// Must be built from the same configuration as the encoder that produced
/// the stream; the stream itself does not describe its parameters.
#[derive(Debug, Clone)]
pub struct Lz77Decoder {
    config: Lz77Config,
    derived: DerivedParams,
    window: SlidingWindow,
    cursor: usize,
}

impl Lz77Decoder {
    /// Create a decoder for `config`.
    pub fn new(config: Lz77Config) -> Result<Self> {
        config.validate()?;
        let derived = DerivedParams::from_config(&config);
        Ok(Self {
            config,
            derived,
            window: SlidingWindow::new(&derived),
            cursor: 0,
        })
    }

    /// The configuration this decoder was built with.
    pub fn config(&self) -> &Lz77Config {
        &self.config
    }

    /// Decompress `input` into `output`, returning the decompressed length.
    ///
    /// # Errors
    ///
    /// - `InputExhausted` if the stream ends before its end marker
    /// - `OutputExhausted` if the data does not fit in `output`
    /// - `InvalidDistance` if a match reaches before the start of the data
    /// - `DictionaryOverflow` if the write cursor leaves the window
    pub fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        self.window.reset();
        self.cursor = 0;

        let mut reader = BitReader::new(input);
        let mut out = OutputCursor {
            buf: output,
            flushed: 0,
        };

        let length_bias = self.config.threshold as usize + 1;
        let end_marker = self.derived.end_marker();

        loop {
            if !reader.read_bit()? {
                let value = reader.read_bits(self.config.literal_bits)?;
                self.put(value as u8, &mut out)?;
                continue;
            }

            let length = reader.read_bits(self.config.length_bits)? as usize + length_bias;
            if length == end_marker {
                out.flush(&self.window.as_slice()[..self.cursor])?;
                return Ok(out.flushed);
            }

            let distance = reader.read_bits(self.config.dictionary_bits)? as usize;
            let history = (out.flushed + self.cursor).min(self.window.size());
            if distance == 0 || distance > history {
                return Err(OxiLzError::invalid_distance(distance, history));
            }

            // Byte by byte: source and destination overlap when distance < length.
            let mut source = self.window.wrap(self.cursor.wrapping_sub(distance));
            for _ in 0..length {
                let byte = self.window.byte_at(source);
                self.put(byte, &mut out)?;
                source = self.window.wrap(source + 1);
            }
        }
    }

    /// Append one byte at the write cursor, flushing a completed window.
    #[inline]
    fn put(&mut self, byte: u8, out: &mut OutputCursor<'_>) -> Result<()> {
        if self.cursor >= self.window.capacity() {
            return Err(OxiLzError::dictionary_overflow(
                self.cursor,
                self.window.capacity(),
            ));
        }
        if out.flushed + self.cursor >= out.buf.len() {
            return Err(OxiLzError::output_exhausted(out.buf.len()));
        }

        self.window.set_byte(self.cursor, byte);
        self.cursor += 1;
        if self.cursor == self.window.size() {
            out.flush(&self.window.as_slice()[..self.cursor])?;
            self.cursor = 0;
        }
        Ok(())
    }
}
