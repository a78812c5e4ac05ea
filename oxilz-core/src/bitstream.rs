//! Bit-level I/O over caller-owned byte buffers.
//!
//! This module provides `BitWriter` and `BitReader`, the only way the codec
//! touches its compressed stream. Both borrow a fixed-size slice for the
//! duration of one call: the writer never grows its destination and the
//! reader never looks past the end of its source.
//!
//! # Bit Ordering
//!
//! Bits are packed LSB-first within each byte. A value written with
//! `write_bits(v, n)` occupies the next `n` bit slots starting from the least
//! significant bit of the pending byte, and `read_bits(n)` returns them in
//! the same order.
//!
//! # Example
//!
//! ```
//! use oxilz_core::bitstream::{BitReader, BitWriter};
//!
//! let mut buf = [0u8; 4];
//! let written = {
//!     let mut writer = BitWriter::new(&mut buf);
//!     writer.write_bits(0b101, 3).unwrap();
//!     writer.write_bits(0b1100, 4).unwrap();
//!     writer.align_to_byte().unwrap();
//!     writer.bytes_written()
//! };
//!
//! let mut reader = BitReader::new(&buf[..written]);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{OxiLzError, Result};

/// A bit-level reader over a borrowed byte slice.
///
/// Bytes are pulled into a 64-bit accumulator only when a read needs them,
/// so `bytes_consumed` reports exactly how much of the source was touched.
#[derive(Debug)]
pub struct BitReader<'a> {
    /// Source bytes.
    input: &'a [u8],
    /// Next byte to pull from `input`.
    position: usize,
    /// Bit buffer (LSB-first).
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<'a> BitReader<'a> {
    /// Create a new `BitReader` over the given bytes.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            position: 0,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Get the total number of bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Number of source bytes pulled into the accumulator so far.
    pub fn bytes_consumed(&self) -> usize {
        self.position
    }

    /// Ensure at least `count` bits are available in the buffer.
    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        while self.bits_in_buffer < count {
            let Some(&byte) = self.input.get(self.position) else {
                return Err(OxiLzError::input_exhausted(self.total_bits_read));
            };
            self.buffer |= (byte as u64) << self.bits_in_buffer;
            self.bits_in_buffer += 8;
            self.position += 1;
        }
        Ok(())
    }

    /// Read up to 32 bits from the stream.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bits to read (0-32)
    ///
    /// # Returns
    ///
    /// The bits read as a u32, with the first bit read in the LSB position.
    /// Fails with `InputExhausted` if the source ends first.
    #[inline]
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if count == 0 {
            return Ok(0);
        }

        self.fill_buffer(count)?;

        let mask = (1u64 << count).wrapping_sub(1);
        let result = (self.buffer & mask) as u32;

        self.buffer >>= count;
        self.bits_in_buffer -= count;
        self.total_bits_read += count as u64;

        Ok(result)
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }
}

/// A bit-level writer over a borrowed, fixed-capacity byte slice.
///
/// Complete bytes leave the accumulator as soon as they form. A byte that
/// would land past the end of the destination fails the write with
/// `OutputExhausted`; nothing is ever truncated silently.
#[derive(Debug)]
pub struct BitWriter<'a> {
    /// Destination bytes.
    output: &'a mut [u8],
    /// Next free byte in `output`.
    position: usize,
    /// Bit buffer (LSB-first).
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<'a> BitWriter<'a> {
    /// Create a new `BitWriter` over the given destination.
    pub fn new(output: &'a mut [u8]) -> Self {
        Self {
            output,
            position: 0,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Number of complete bytes emitted to the destination.
    pub fn bytes_written(&self) -> usize {
        self.position
    }

    /// Capacity of the destination buffer.
    pub fn capacity(&self) -> usize {
        self.output.len()
    }

    /// Move complete bytes from the buffer to the destination.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        while self.bits_in_buffer >= 8 {
            let Some(slot) = self.output.get_mut(self.position) else {
                return Err(OxiLzError::output_exhausted(self.output.len()));
            };
            *slot = (self.buffer & 0xFF) as u8;
            self.position += 1;
            self.buffer >>= 8;
            self.bits_in_buffer -= 8;
        }
        Ok(())
    }

    /// Write up to 32 bits to the stream.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write (LSB-first); bits above `count` are ignored
    /// * `count` - Number of bits to write (0-32)
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return Ok(());
        }

        let mask = (1u64 << count).wrapping_sub(1);
        self.buffer |= (value as u64 & mask) << self.bits_in_buffer;
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        self.flush_bytes()
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    /// Pad to byte boundary with zeros and emit the final partial byte.
    pub fn align_to_byte(&mut self) -> Result<()> {
        if self.bits_in_buffer % 8 != 0 {
            let padding = 8 - (self.bits_in_buffer % 8);
            self.write_bits(0, padding)?;
        }
        Ok(())
    }
}
