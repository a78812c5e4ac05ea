//! # OxiLZ Core
//!
//! Core components for the OxiLZ codec.
//!
//! - [`bitstream`]: LSB-first bit I/O over caller-owned byte buffers
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Driver                                              │
//! │     oxilz CLI (file round trip, raw streams)            │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Sliding dictionary, hash chains, greedy/lazy LZ77  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, OxiLzError                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxilz_core::{BitReader, BitWriter, OxiLzError};
//!
//! let mut out = [0u8; 1];
//! let mut writer = BitWriter::new(&mut out);
//! writer.write_bits(0x3F, 8).unwrap();
//! assert!(matches!(
//!     writer.write_bits(0xFF, 8),
//!     Err(OxiLzError::OutputExhausted { capacity: 1 })
//! ));
//!
//! let mut reader = BitReader::new(&out);
//! assert_eq!(reader.read_bits(6).unwrap(), 0x3F);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{OxiLzError, Result};
