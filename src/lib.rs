//! lzww - Decoder for Animal Crossing: Wild World text containers
//!
//! This crate decodes the proprietary LZSS container format embedded in
//! the game's text resource files. A container starts with a one-byte
//! envelope magic, carries an opaque 9-byte header, and then holds one
//! or more compressed chunks. Each chunk declares its decompressed
//! length in a 4-byte header and encodes the data as a bitstream of
//! literal bytes and `(offset, length)` back-references over a 4KB
//! window.
//!
//! Damaged bitstreams decode best-effort: truncation and bad
//! back-references produce [`Warning`]s in the [`DecodeReport`] rather
//! than failing the run. Only an invalid envelope, a missing chunk
//! header, or sink I/O failures are fatal.
//!
//! # Example
//!
//! ```no_run
//! use lzww::decode_bytes;
//!
//! let container = std::fs::read("msg.bin")?;
//! let output = decode_bytes(&container)?;
//! for warning in &output.report.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! std::fs::write("msg.bin", &output.data)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The paired encoder is intentionally absent; this crate only decodes.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod decode;
pub mod error;

// Re-export commonly used types
pub use common::{
    DecodeStats, LzwwError, Result, Warning, CHUNK_MAGIC, ENVELOPE_MAGIC, MAX_CHUNK_LEN,
    MAX_FILE_SIZE, MAX_MATCH, MIN_FILE_SIZE, MIN_MATCH, SCAN_LIMIT, SCAN_START, SCAN_STRIDE,
    WINDOW_SIZE,
};
pub use decode::{
    decode_bytes, decode_into, locate_first_chunk, DecodeOutput, DecodeReport, Sink, Termination,
};
