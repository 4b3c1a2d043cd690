//! Chunk Decoder
//!
//! Decompresses one self-contained chunk: a 4-byte header declaring the
//! decompressed length, followed by the token bitstream. Damaged
//! bitstreams stop the chunk early with a warning instead of failing the
//! whole run.

use super::cursor::Cursor;
use crate::{DecodeStats, Warning, CHUNK_MAGIC, MIN_MATCH};

/// Why a chunk's decode loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkEnd {
    /// The declared length was filled and the bitstream stayed in sync
    Filled,
    /// The bitstream ran out before the declared length was filled
    InputExhausted,
    /// A damaged token desynchronized the stream; no further chunks are trusted
    Desynced,
}

/// One decoded chunk plus how its decode loop ended
#[derive(Debug)]
pub struct ChunkResult {
    /// Decoded bytes, always exactly the declared length (zero fill past
    /// whatever prefix a truncated bitstream produced)
    pub data: Vec<u8>,
    /// Termination condition of the decode loop
    pub end: ChunkEnd,
}

/// Decode the chunk at the cursor, which must sit on a chunk header
///
/// Advances the cursor past the consumed bitstream. Warnings are pushed
/// to `warnings` tagged with `index`; stats accumulate into `stats`.
pub fn decode_chunk(
    cursor: &mut Cursor<'_>,
    index: usize,
    warnings: &mut Vec<Warning>,
    stats: &mut DecodeStats,
) -> ChunkResult {
    let header = match cursor.read_u32_le() {
        Some(h) => h,
        None => {
            warnings.push(Warning::UnexpectedEnd {
                chunk: index,
                decoded: 0,
                declared: 0,
            });
            return ChunkResult {
                data: Vec::new(),
                end: ChunkEnd::InputExhausted,
            };
        }
    };
    debug_assert_eq!(header as u8, CHUNK_MAGIC);

    // Low byte is the chunk magic; the upper 24 bits declare the length.
    let declared = (header >> 8) as usize;
    let mut data = vec![0u8; declared];
    let mut pos = 0usize;

    let mut flags = 0u8;
    let mut mask = 0u8;
    let mut end = ChunkEnd::Filled;

    while pos < declared {
        mask >>= 1;
        if mask == 0 {
            flags = match cursor.read_u8() {
                Some(b) => b,
                None => {
                    end = ChunkEnd::InputExhausted;
                    break;
                }
            };
            mask = 0x80;
        }

        if flags & mask == 0 {
            let b = match cursor.read_u8() {
                Some(b) => b,
                None => {
                    end = ChunkEnd::InputExhausted;
                    break;
                }
            };
            data[pos] = b;
            pos += 1;
            stats.literal_count += 1;
        } else {
            let v = match cursor.read_u16_be() {
                Some(v) => v,
                None => {
                    end = ChunkEnd::InputExhausted;
                    break;
                }
            };
            let mut len = ((v >> 12) as usize) + MIN_MATCH;
            let offset = ((v & 0x0FFF) as usize) + 1;

            if offset > pos {
                warnings.push(Warning::BadBackReference {
                    chunk: index,
                    offset,
                    position: pos,
                });
                end = ChunkEnd::Desynced;
                break;
            }
            if len > declared - pos {
                warnings.push(Warning::WrongDecodedLength {
                    chunk: index,
                    requested: len,
                    clamped: declared - pos,
                });
                len = declared - pos;
                end = ChunkEnd::Desynced;
            }

            // Byte-by-byte so a source inside the copy target repeats,
            // which is how runs with offset < len expand.
            for _ in 0..len {
                data[pos] = data[pos - offset];
                pos += 1;
            }
            stats.match_count += 1;
        }
    }

    if end == ChunkEnd::InputExhausted {
        warnings.push(Warning::UnexpectedEnd {
            chunk: index,
            decoded: pos,
            declared,
        });
    }

    ChunkResult { data, end }
}
