//! LZSS container decoding
//!
//! Three pieces, consumed in order: the scanner validates the envelope
//! and finds the first chunk, the chunk decoder expands one token
//! bitstream, and the assembler chains chunks into a sink.

mod assembler;
mod chunk;
mod cursor;
mod scanner;

pub use assembler::{decode_into, DecodeReport, Sink, Termination};
pub use chunk::{ChunkEnd, ChunkResult};
pub use cursor::Cursor;
pub use scanner::locate_first_chunk;

use crate::Result;

/// Decoded container bytes together with the run's report
#[derive(Debug)]
pub struct DecodeOutput {
    /// Concatenated decoded bytes of every chunk, in chunk order
    pub data: Vec<u8>,
    /// Chunk count, termination reason, warnings and counters
    pub report: DecodeReport,
}

/// Convenience function to decode a whole container in memory
pub fn decode_bytes(container: &[u8]) -> Result<DecodeOutput> {
    let mut data = Vec::new();
    let report = decode_into(container, &mut data)?;
    Ok(DecodeOutput { data, report })
}
