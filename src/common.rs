//! Common types and constants for the Wild World LZSS container format
//!
//! This module defines the magic values, size bounds, error type and
//! warning type shared by the scanner, chunk decoder and assembler.

use thiserror::Error;

/// First byte of a Wild World text resource envelope
pub const ENVELOPE_MAGIC: u8 = 0x4C;

/// Low byte of every compressed chunk header
pub const CHUNK_MAGIC: u8 = 0x10;

/// Offset at which the scan for the first chunk begins
pub const SCAN_START: usize = 10;

/// Stride of the chunk scan, in bytes
pub const SCAN_STRIDE: usize = 2;

/// Maximum number of strides past the first probe before the scan gives up
pub const SCAN_LIMIT: usize = 20;

/// Minimum back-reference copy length
pub const MIN_MATCH: usize = 3;

/// Maximum back-reference copy length ((1 << 4) + MIN_MATCH - 1)
pub const MAX_MATCH: usize = 18;

/// Sliding window size; the largest expressible back-reference offset
pub const WINDOW_SIZE: usize = 0x1000;

/// Largest declared chunk length expressible in the 24-bit header field
pub const MAX_CHUNK_LEN: usize = 0x00FF_FFFF;

/// Smallest container the decoder accepts (a bare chunk header)
pub const MIN_FILE_SIZE: usize = 0x4;

/// Largest container the decoder accepts (header + 16MB payload + flags, padded)
pub const MAX_FILE_SIZE: usize = 0x0140_0000;

/// Error type for fatal decode conditions
#[derive(Debug, Error)]
pub enum LzwwError {
    /// Byte 0 of the container does not carry the envelope magic
    #[error("not a Wild World text resource (leading byte {0:#04x})")]
    BadEnvelopeMagic(u8),

    /// No chunk magic found within the bounded scan
    #[error("not LZSS encoded (no chunk header within {0} scan positions)")]
    ChunkNotFound(usize),

    /// Container too short to hold the envelope header and scan region
    #[error("container truncated at {0} bytes")]
    Truncated(usize),

    /// Input file size outside the supported range
    #[error("file size {0} outside supported range ({MIN_FILE_SIZE}..={MAX_FILE_SIZE})")]
    SizeOutOfRange(usize),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for decode operations
pub type Result<T> = std::result::Result<T, LzwwError>;

/// Non-fatal conditions observed while decoding; reported, never raised
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Bitstream ran out before the chunk's declared length was filled
    UnexpectedEnd {
        /// Zero-based index of the affected chunk
        chunk: usize,
        /// Bytes actually decoded
        decoded: usize,
        /// Length the chunk header declared
        declared: usize,
    },
    /// A back-reference length overran the remaining buffer capacity
    WrongDecodedLength {
        /// Zero-based index of the affected chunk
        chunk: usize,
        /// Length the token asked for
        requested: usize,
        /// Length actually copied after clamping
        clamped: usize,
    },
    /// A back-reference offset reached before the start of the output buffer
    BadBackReference {
        /// Zero-based index of the affected chunk
        chunk: usize,
        /// Offset the token asked for
        offset: usize,
        /// Output position at which it was seen
        position: usize,
    },
    /// A chunk magic byte remained at the cursor after an abnormal chunk end
    TrailingChunk {
        /// Byte offset of the ignored chunk magic within the container
        offset: usize,
    },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnexpectedEnd {
                chunk,
                decoded,
                declared,
            } => write!(
                f,
                "unexpected end of encoded file (chunk {chunk}: {decoded} of {declared} bytes)"
            ),
            Warning::WrongDecodedLength {
                chunk,
                requested,
                clamped,
            } => write!(
                f,
                "wrong decoded length (chunk {chunk}: {requested} clamped to {clamped})"
            ),
            Warning::BadBackReference {
                chunk,
                offset,
                position,
            } => write!(
                f,
                "back-reference out of range (chunk {chunk}: offset {offset} at position {position})"
            ),
            Warning::TrailingChunk { offset } => {
                write!(f, "there is more to decode (chunk magic at offset {offset})")
            }
        }
    }
}

/// Counters accumulated over one container decode
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStats {
    /// Number of literal bytes decoded
    pub literal_count: usize,
    /// Number of back-reference tokens decoded
    pub match_count: usize,
    /// Total bytes written to the sink
    pub output_bytes: usize,
}
