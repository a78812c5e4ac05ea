//! Command implementations for the OxiLZ CLI.

pub mod compress;
pub mod decompress;
pub mod roundtrip;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use roundtrip::cmd_roundtrip;
