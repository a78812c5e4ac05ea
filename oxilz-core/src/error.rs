//! Error types for OxiLZ operations.
//!
//! Every failure the codec can hit is terminal for the call that produced
//! it: the codec reports and unwinds, the caller decides whether to retry
//! (for example with a larger output buffer).

use thiserror::Error;

/// The main error type for OxiLZ operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OxiLzError {
    /// The destination buffer has no room for the next byte.
    #[error("Output buffer exhausted: capacity is {capacity} bytes")]
    OutputExhausted {
        /// Capacity of the caller-supplied output buffer.
        capacity: usize,
    },

    /// The source buffer ran out before a bit read could be satisfied.
    #[error("Input exhausted at bit position {bit_position}")]
    InputExhausted {
        /// Bit offset at which the read was attempted.
        bit_position: u64,
    },

    /// The decoder write cursor would leave the dictionary window.
    #[error("Dictionary overflow: cursor {cursor} exceeds window capacity {capacity}")]
    DictionaryOverflow {
        /// Write cursor at the time of the failure.
        cursor: usize,
        /// Structural capacity of the window.
        capacity: usize,
    },

    /// A match refers to data that was never produced.
    #[error("Invalid back-reference distance: {distance} exceeds history size {history}")]
    InvalidDistance {
        /// Distance carried by the match token.
        distance: usize,
        /// Number of bytes available behind the write cursor.
        history: usize,
    },

    /// An input byte does not fit in the configured literal width.
    #[error("Literal 0x{byte:02X} does not fit in {literal_bits} literal bits")]
    LiteralOverflow {
        /// The byte that could not be encoded.
        byte: u8,
        /// Configured literal width.
        literal_bits: u8,
    },

    /// The codec configuration is outside the supported ranges.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the rejected parameter.
        message: String,
    },
}

/// Result type alias for OxiLZ operations.
pub type Result<T> = std::result::Result<T, OxiLzError>;

impl OxiLzError {
    /// Create an output exhausted error.
    pub fn output_exhausted(capacity: usize) -> Self {
        Self::OutputExhausted { capacity }
    }

    /// Create an input exhausted error.
    pub fn input_exhausted(bit_position: u64) -> Self {
        Self::InputExhausted { bit_position }
    }

    /// Create a dictionary overflow error.
    pub fn dictionary_overflow(cursor: usize, capacity: usize) -> Self {
        Self::DictionaryOverflow { cursor, capacity }
    }

    /// Create an invalid distance error.
    pub fn invalid_distance(distance: usize, history: usize) -> Self {
        Self::InvalidDistance { distance, history }
    }

    /// Create a literal overflow error.
    pub fn literal_overflow(byte: u8, literal_bits: u8) -> Self {
        Self::LiteralOverflow { byte, literal_bits }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
